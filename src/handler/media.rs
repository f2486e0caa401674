pub mod upload;
pub use upload as Upload;
