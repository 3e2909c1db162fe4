use gb_config::{ENV_PREFIX, GradebookConfig};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &GradebookConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &GradebookConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.auth.is_configured() && has_single_underscore_key(&env_keys, "AUTH") {
        warnings.push(
            "Auth config appears default while GRADEBOOK_AUTH* env vars exist. Use double underscores (example: GRADEBOOK_AUTH__JWT_SECRET)."
                .to_string(),
        );
    }

    if !config.registrar.is_configured() && has_single_underscore_key(&env_keys, "REGISTRAR") {
        warnings.push(
            "Registrar config appears default while GRADEBOOK_REGISTRAR* env vars exist. Use double underscores (example: GRADEBOOK_REGISTRAR__URL)."
                .to_string(),
        );
    }

    if config.database.is_in_memory() {
        warnings.push("Database path is ':memory:'; nothing will persist across restarts.".to_string());
    }

    warnings
}

/// `GRADEBOOK_<SECTION>` followed by anything but the `__` separator.
fn has_single_underscore_key(keys: &[String], section: &str) -> bool {
    let prefix = format!("{ENV_PREFIX}{section}");
    keys.iter().any(|key| {
        key.strip_prefix(&prefix)
            .is_some_and(|rest| !rest.starts_with("__"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter()
            .map(|key| ((*key).to_string(), "x".to_string()))
            .collect()
    }

    #[test]
    fn warns_about_single_underscore_auth_key() {
        let config = GradebookConfig::default();
        let warnings = collect_unconfigured_warnings(&config, env(&["GRADEBOOK_AUTH_JWT_SECRET"]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("GRADEBOOK_AUTH__JWT_SECRET"));
    }

    #[test]
    fn correct_keys_produce_no_warning() {
        let config = GradebookConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            env(&["GRADEBOOK_AUTH__JWT_SECRET", "GRADEBOOK_REGISTRAR__URL", "HOME"]),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn in_memory_database_is_flagged() {
        let mut config = GradebookConfig::default();
        config.database.path = ":memory:".into();
        let warnings = collect_unconfigured_warnings(&config, env(&[]));
        assert_eq!(warnings.len(), 1);
    }
}
