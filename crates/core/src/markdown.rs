use crate::format::{format_local_timestamp, format_size};
use crate::model::OrganizedResult;

pub fn render_markdown_summary(result: &OrganizedResult) -> String {
    let mut out = String::new();
    out.push_str("# Directory Organization Plan\n\n");
    out.push_str(&format!(
        "- Strategy: `{}`\n- Categories: {}\n- Files: {}\n\n",
        result.summary.strategy_label, result.summary.category_count, result.summary.file_count
    ));

    let buckets = result.sorted_buckets();

    out.push_str("## Categories\n\n");
    out.push_str("| Category | Files | Total size |\n|---|---:|---:|\n");
    for bucket in &buckets {
        out.push_str(&format!(
            "| `{}` | {} | {} |\n",
            bucket.label,
            bucket.files.len(),
            format_size(bucket.total_bytes())
        ));
    }
    out.push('\n');

    for bucket in &buckets {
        out.push_str(&format!("### {}\n\n", bucket.label));
        for file in &bucket.files {
            out.push_str(&format!(
                "- `{}`: {}, modified {}\n",
                file.name,
                format_size(file.size),
                format_local_timestamp(&file.modified_at)
            ));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::render_markdown_summary;
    use crate::format::format_local_timestamp;
    use crate::model::{FileRecord, Strategy};
    use crate::organize::organize;

    #[test]
    fn lists_categories_in_sorted_order_with_totals() {
        let modified = Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap();
        let records = vec![
            FileRecord::new("z.txt", "/z.txt", 10, modified),
            FileRecord::new("a.csv", "/a.csv", 2048, modified),
            FileRecord::new("b.txt", "/b.txt", 20, modified),
        ];
        let result = organize(&records, Strategy::ByExtension, modified).expect("organizes");
        let markdown = render_markdown_summary(&result);

        assert!(markdown.contains("- Strategy: `By Extension`"));
        assert!(markdown.contains("| `.csv` | 1 | 2.0 KB |"));
        assert!(markdown.contains("| `.txt` | 2 | 30 B |"));
        let expected = format!("- `z.txt`: 10 B, modified {}", format_local_timestamp(&modified));
        assert!(markdown.contains(&expected));

        let csv_at = markdown.find("### .csv").expect("csv section");
        let txt_at = markdown.find("### .txt").expect("txt section");
        assert!(csv_at < txt_at);
    }
}
