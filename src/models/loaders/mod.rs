pub mod json_loader;

pub use json_loader::{list_documents, load_document, Document};
