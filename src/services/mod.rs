pub mod export;
pub mod session;

pub use export::{ReportExporter, EXPORT_FILE_NAME};
pub use session::{SessionManager, SessionState};
