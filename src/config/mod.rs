// ==========================================
// Prospect Intake - Config Layer
// ==========================================
// Responsibility: layered configuration (defaults, file, environment, CLI)
// ==========================================

pub mod config_manager;
pub mod intake_config_trait;

pub use config_manager::{config_keys, defaults, ConfigManager};
pub use intake_config_trait::IntakeConfigReader;
