use crate::file_processor::FileMetadata;
use crate::lexical::{LexicalMetrics, ScanReport};
use std::time::Duration;

/// Outcome of loading and scanning one file.
///
/// A lexical failure lives in `report.termination`, next to the tokens
/// recognized before it.
#[derive(Debug)]
pub struct PipelineResult {
    pub report: ScanReport,
    pub file_metadata: FileMetadata,
    pub lexical_metrics: LexicalMetrics,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(
        report: ScanReport,
        file_metadata: FileMetadata,
        lexical_metrics: LexicalMetrics,
        processing_duration: Duration,
    ) -> Self {
        Self {
            report,
            file_metadata,
            lexical_metrics,
            processing_duration,
        }
    }

    pub fn is_success(&self) -> bool {
        self.report.is_success()
    }

    pub fn token_count(&self) -> usize {
        self.report.tokens.len()
    }

    pub fn log_completion(&self, file_path: &str) {
        let seconds = self.processing_duration.as_secs_f64();
        let per_second = |amount: f64| {
            if seconds > 0.0 {
                format!("{:.0}", amount / seconds)
            } else {
                "n/a".to_string()
            }
        };

        crate::log_info!("Scan pipeline finished",
            "file" => file_path,
            "success" => self.is_success(),
            "duration_ms" => format!("{:.2}", seconds * 1000.0),
            "processing_rate_bytes_per_sec" => per_second(self.file_metadata.size as f64),
            "processing_rate_tokens_per_sec" => per_second(self.token_count() as f64)
        );
    }
}
