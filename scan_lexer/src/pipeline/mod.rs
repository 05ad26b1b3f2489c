mod error;
mod result;
mod validation;

pub use error::PipelineError;
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::config::runtime::RuntimeConfig;
use crate::file_processor::FileProcessor;
use crate::lexical::LexicalAnalyzer;
use crate::logging;
use std::path::PathBuf;
use std::time::Instant;

/// Load and scan a single file (file -> lexical) with preferences from the environment
pub fn process_file(file_path: &str) -> Result<PipelineResult, PipelineError> {
    process_file_with_preferences(file_path, &RuntimeConfig::default())
}

/// Load and scan a single file with explicit runtime preferences
pub fn process_file_with_preferences(
    file_path: &str,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(PathBuf::from(file_path), || {
        crate::log_info!("Starting scan pipeline",
            "file" => file_path,
            "strip_trailing_byte" => config.file_processor.strip_trailing_byte,
            "track_category_histogram" => config.lexical.track_category_histogram
        );

        // Stage 1: File processing
        let file_result =
            FileProcessor::from_preferences(&config.file_processor).process_file(file_path)?;

        // Stage 2: Lexical analysis
        let mut analyzer = LexicalAnalyzer::with_preferences(config.lexical.clone());
        let report = analyzer.scan_file_result(&file_result);

        let result = PipelineResult::new(
            report,
            file_result.metadata,
            analyzer.metrics().clone(),
            start_time.elapsed(),
        );

        result.log_completion(file_path);

        Ok(result)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::{FileProcessorPreferences, LexicalPreferences};
    use crate::file_processor::FileProcessorError;
    use crate::lexical::{LexerError, Termination};
    use crate::tokens::TokenCategory;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn config() -> RuntimeConfig {
        RuntimeConfig {
            file_processor: FileProcessorPreferences {
                strip_trailing_byte: false,
                enable_performance_logging: false,
            },
            lexical: LexicalPreferences {
                track_category_histogram: true,
                include_position_in_errors: true,
            },
            ..RuntimeConfig::default()
        }
    }

    #[test]
    fn test_validate_pipeline() {
        let _ = crate::logging::init_global_logging();
        assert!(validate_pipeline().is_ok());
    }

    #[test]
    fn test_process_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prog.txt");
        fs::write(&path, "var x;\nbegin x = 1 end.\n").unwrap();

        let result = process_file_with_preferences(path.to_str().unwrap(), &config()).unwrap();
        assert!(result.is_success());
        assert_eq!(result.token_count(), 9);
        assert_eq!(result.lexical_metrics.total_tokens, 9);
        assert_eq!(result.file_metadata.line_count, 2);
        assert_eq!(
            result.lexical_metrics.category_histogram.get(&TokenCategory::Identifier),
            Some(&2)
        );
    }

    #[test]
    fn test_lexical_failure_keeps_partial_tokens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, "var x; ?").unwrap();

        let result = process_file_with_preferences(path.to_str().unwrap(), &config()).unwrap();
        assert!(!result.is_success());
        assert_eq!(result.token_count(), 3);
        assert_matches!(
            result.report.termination,
            Termination::Failed(LexerError::IllegalCharacter { byte: b'?', .. })
        );
    }

    #[test]
    fn test_empty_file_never_scanned() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        let err = process_file_with_preferences(path.to_str().unwrap(), &config()).unwrap_err();
        assert_matches!(err, PipelineError::FileProcessing(FileProcessorError::EmptyFile { .. }));
        assert_eq!(err.error_code().as_str(), "E008");
        assert!(err.to_string().ends_with("empty.txt)."));
    }
}
