pub mod document;
pub mod loaders;
pub mod profession;
pub mod report;

pub use document::{CandidateDocument, DocumentKind, NewDocument};
pub use loaders::{load_all_resume_files, load_resume_file};
pub use profession::{Profession, ProfessionListResponse};
pub use report::{AnalysisReport, ReportVerbosity};
