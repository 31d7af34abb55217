pub mod filesystem;

pub use filesystem::{is_pdf_name, validate_name, ProjectStorage, StoredFile};
