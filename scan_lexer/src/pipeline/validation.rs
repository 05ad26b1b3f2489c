/// Check that every stage is configured before the first file is scanned
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::logging::config::validate_config()?;
    crate::lexical::validate_tokenization()?;

    if crate::file_processor::get_max_file_size() == 0 {
        return Err("Maximum file size must be greater than zero".to_string());
    }

    crate::log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "stages_validated" => 3,
        "build_config" => crate::config::build_info::source_info()
    );

    Ok(())
}
