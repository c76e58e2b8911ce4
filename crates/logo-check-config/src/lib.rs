// crates/logo-check-config/src/lib.rs
// ============================================================================
// Module: Logo Check Config Library
// Description: Canonical configuration for the logo check trigger.
// Purpose: Centralize config loading and validation for all crates.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! Logo Check Config owns the TOML configuration model. Other crates consume
//! validated [`LogoCheckConfig`] values and never parse files themselves.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::CONFIG_ENV_VAR;
pub use config::ConfigError;
pub use config::DEFAULT_CONFIG_NAME;
pub use config::DiagnosticsConfig;
pub use config::DiagnosticsSinkKind;
pub use config::LogoCheckConfig;
pub use config::MAX_CONFIG_FILE_BYTES;
pub use config::MAX_TIMEOUT_MS;
pub use config::ServiceConfig;
pub use config::TriggerConfig;
