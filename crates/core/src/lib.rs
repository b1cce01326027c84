pub mod categorize;
pub mod error;
pub mod format;
pub mod markdown;
pub mod model;
pub mod organize;
pub mod plan;

pub use categorize::{
    category_for, date_category, days_between, extension_category, extension_of, size_category,
    type_for_extension, FileType, NO_EXTENSION,
};
pub use error::OrganizeError;
pub use format::{format_local_timestamp, format_size, format_timestamp};
pub use markdown::render_markdown_summary;
pub use model::{
    CategoryBucket, FileRecord, OrganizedResult, PlanSummary, Strategy, PLAN_VERSION,
};
pub use organize::{organize, organize_now};
pub use plan::{
    build_plan_document, render_plan, write_plan, write_plan_document, PlanCategory,
    PlanDocument, PlanFile,
};
