pub mod file_loader;

pub use file_loader::{load_all_resume_files, load_resume_file};
