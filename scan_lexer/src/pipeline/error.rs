use crate::file_processor::FileProcessorError;

/// Failures that stop the pipeline before a report exists.
///
/// A lexical failure is not one of them: it ends the scan but the report
/// still carries the tokens recognized before it.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{0}")]
    FileProcessing(#[from] FileProcessorError),
}

impl PipelineError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            PipelineError::FileProcessing(e) => e.error_code(),
        }
    }
}
