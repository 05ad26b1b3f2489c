//! Source loading with compile-time size limits and global logging integration

mod processor;

use crate::config::compile_time::file_processing::MAX_FILE_SIZE;
pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

/// Load a file with preferences taken from the environment
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    processor::process_file(file_path)
}

/// The compile-time maximum file size. Not adjustable at runtime.
pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}
