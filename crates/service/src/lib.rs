pub mod collect;
pub mod request;
pub mod session;

pub use collect::{collect_records, record_from_path, CollectOptions, Collected};
pub use request::{load_request, run_request, OrganizeRequest, RunOutcome, DEFAULT_PLAN_FILE};
pub use session::{SelectedFileRow, Session};
