// crates/logo-check-service/src/wiring.rs
// ============================================================================
// Module: Trigger Wiring
// Description: Assemble a verification trigger from validated configuration.
// Purpose: Connect config, HTTP service, and diagnostic sinks in one place.
// Dependencies: logo-check-config, logo-check-core, crate::http, tokio
// ============================================================================

//! ## Overview
//! Wiring turns a [`LogoCheckConfig`] into a ready [`VerificationTrigger`]:
//! it validates the config, opens the selected diagnostic sink, builds the
//! [`HttpVerificationService`], and applies the activation deadline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use logo_check_config::ConfigError;
use logo_check_config::DiagnosticsConfig;
use logo_check_config::DiagnosticsSinkKind;
use logo_check_config::LogoCheckConfig;
use logo_check_core::DiagnosticSink;
use logo_check_core::FileDiagnosticSink;
use logo_check_core::NoopDiagnosticSink;
use logo_check_core::StderrDiagnosticSink;
use logo_check_core::TriggerBuildError;
use logo_check_core::VerificationTrigger;
use thiserror::Error;
use tokio::runtime::Handle;

use crate::http::HttpServiceError;
use crate::http::HttpVerificationService;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while wiring a trigger.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum WiringError {
    /// Configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Verification service could not be built.
    #[error("verification service: {0}")]
    Service(#[from] HttpServiceError),
    /// Diagnostic sink could not be opened.
    #[error("diagnostic sink: {0}")]
    Diagnostics(String),
    /// Trigger could not be assembled.
    #[error("trigger: {0}")]
    Trigger(#[from] TriggerBuildError),
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Opens the diagnostic sink selected by configuration.
///
/// # Errors
///
/// Returns [`WiringError`] when the settings are invalid or the file cannot be opened.
pub fn build_diagnostics(config: &DiagnosticsConfig) -> Result<Arc<dyn DiagnosticSink>, WiringError> {
    config.validate()?;
    match (config.sink, config.path.as_deref()) {
        (DiagnosticsSinkKind::Stderr, _) => Ok(Arc::new(StderrDiagnosticSink)),
        (DiagnosticsSinkKind::None, _) => Ok(Arc::new(NoopDiagnosticSink)),
        (DiagnosticsSinkKind::File, Some(path)) => {
            let sink = FileDiagnosticSink::new(Path::new(path))
                .map_err(|err| WiringError::Diagnostics(err.to_string()))?;
            Ok(Arc::new(sink))
        }
        (DiagnosticsSinkKind::File, None) => Err(WiringError::Diagnostics(
            "diagnostics.path required for file sink".to_string(),
        )),
    }
}

/// Builds a trigger on the current Tokio runtime.
///
/// # Errors
///
/// Returns [`WiringError`] when configuration, service, sink, or runtime setup fails.
pub fn build_trigger(config: &LogoCheckConfig) -> Result<VerificationTrigger, WiringError> {
    let runtime = Handle::try_current().map_err(|_| TriggerBuildError::NoRuntime)?;
    build_trigger_on(config, runtime)
}

/// Builds a trigger that spawns activations on the given runtime.
///
/// # Errors
///
/// Returns [`WiringError`] when configuration, service, or sink setup fails.
pub fn build_trigger_on(
    config: &LogoCheckConfig,
    runtime: Handle,
) -> Result<VerificationTrigger, WiringError> {
    config.validate()?;
    let service = HttpVerificationService::new(&config.service)?;
    let diagnostics = build_diagnostics(&config.diagnostics)?;
    let mut builder = VerificationTrigger::builder()
        .service(service)
        .diagnostics_arc(diagnostics)
        .runtime(runtime);
    if let Some(timeout_ms) = config.trigger.timeout_ms {
        builder = builder.timeout(Duration::from_millis(timeout_ms));
    }
    Ok(builder.build()?)
}
