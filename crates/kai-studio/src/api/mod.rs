//! API endpoint implementations.

mod files;
mod instance;

pub use files::FilesApi;
pub use instance::InstanceApi;
