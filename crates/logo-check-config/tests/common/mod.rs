// crates/logo-check-config/tests/common/mod.rs
// ============================================================================
// Module: Common Config Test Utilities
// Description: Shared config fixtures for validation tests.
// Purpose: Provide a minimal valid configuration to mutate per test.
// Dependencies: logo-check-config
// ============================================================================

//! ## Overview
//! Provides a minimal valid [`LogoCheckConfig`].

use logo_check_config::ConfigError;
use logo_check_config::LogoCheckConfig;

/// Minimal valid configuration text.
pub const MINIMAL_TOML: &str = r#"
[service]
base_url = "https://verify.example.com"
"#;

/// Returns a minimal valid configuration.
pub fn minimal_config() -> Result<LogoCheckConfig, ConfigError> {
    LogoCheckConfig::from_toml_str(MINIMAL_TOML)
}
