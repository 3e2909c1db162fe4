use std::path::Path;

use anyhow::Context;
use figment::providers::{Format, Toml};
use gb_config::GradebookConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered config, then `--config` on top.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<GradebookConfig> {
    load_dotenv()?;

    let mut figment = GradebookConfig::figment();
    if let Some(path) = &flags.config {
        anyhow::ensure!(
            path.is_file(),
            "config file '{}' does not exist",
            path.display()
        );
        figment = figment.merge(Toml::file(path));
    }

    figment
        .extract()
        .context("failed to load gradebook configuration")
}

fn load_dotenv() -> anyhow::Result<()> {
    let env_path = Path::new(".env");
    if env_path.exists() {
        dotenvy::from_path(env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn flags(config: Option<&Path>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: false,
            verbose: false,
            config: config.map(Path::to_path_buf),
        }
    }

    #[test]
    fn explicit_config_file_is_layered_on_top() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gb.toml");
        std::fs::write(
            &path,
            "[server]\nbind_addr = \"0.0.0.0:9999\"\n[registrar]\nqueue_capacity = 8\n",
        )
        .unwrap();

        let config = load_config(&flags(Some(&path))).unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:9999");
        assert_eq!(config.registrar.queue_capacity, 8);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = load_config(&flags(Some(Path::new("/nonexistent/gb.toml")))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
