mod registry;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use registry::{RuleRegistry, default_registry};
pub use types::{Config, ConfigError, RuleConfig, normalize_key};
pub use validation::{ConfigValidationWarning, validate_config};
