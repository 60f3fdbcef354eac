pub mod download;
pub mod list;
pub mod manage;
pub mod types;
pub mod upload;

// Re-export all types
pub use types::*;

// Re-export all handlers
pub use download::record_download;
pub use list::{list_documents, my_documents};
pub use manage::{delete_document, get_document};
pub use upload::upload_document;
