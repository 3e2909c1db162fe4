//! Errors raised while loading or validating gradebook settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML layer or `GRADEBOOK_*` variable failed to parse.
    #[error("failed to load gradebook config: {0}")]
    Figment(#[from] figment::Error),

    /// `section` lacks a value that `gbd` needs; set it in
    /// `.gradebook/config.toml` or through `GRADEBOOK_<SECTION>__<FIELD>`.
    #[error(
        "[{section}] is not configured; set it in .gradebook/config.toml or GRADEBOOK_{}__* variables",
        .section.to_uppercase()
    )]
    NotConfigured { section: String },

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_configured_names_file_and_env_prefix() {
        let message = ConfigError::NotConfigured {
            section: "auth".into(),
        }
        .to_string();
        assert_eq!(
            message,
            "[auth] is not configured; set it in .gradebook/config.toml or GRADEBOOK_AUTH__* variables"
        );
    }
}
