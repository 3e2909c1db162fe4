//! Integration tests for layered configuration loading.
//!
//! Uses figment::Jail for sandboxed env var and file manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use gb_config::GradebookConfig;

fn layered(file: &str) -> Figment {
    Figment::from(Serialized::defaults(GradebookConfig::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed("GRADEBOOK_").split("__"))
}

#[test]
fn loads_every_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
bind_addr = "0.0.0.0:9000"

[database]
path = ":memory:"

[auth]
jwt_secret = "toml-secret"
issuer = "csumb"
leeway_secs = 5

[registrar]
url = "http://registrar.local"
queue_capacity = 16
max_attempts = 2

[general]
log_level = "debug"
"#,
        )?;

        let config: GradebookConfig = layered("config.toml").extract()?;

        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
        assert!(config.database.is_in_memory());
        assert_eq!(config.auth.jwt_secret, "toml-secret");
        assert_eq!(config.auth.expected_issuer(), Some("csumb"));
        assert_eq!(config.auth.leeway_secs, 5);
        assert_eq!(config.registrar.url, "http://registrar.local");
        assert_eq!(config.registrar.queue_capacity, 16);
        assert_eq!(config.registrar.max_attempts, 2);
        // unspecified fields keep their defaults
        assert_eq!(config.registrar.base_delay_ms, 200);
        assert_eq!(config.general.log_level, "debug");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[auth]
jwt_secret = "from-toml"

[registrar]
queue_capacity = 16
"#,
        )?;
        jail.set_env("GRADEBOOK_AUTH__JWT_SECRET", "from-env");
        jail.set_env("GRADEBOOK_REGISTRAR__QUEUE_CAPACITY", "4");

        let config: GradebookConfig = layered("config.toml").extract()?;

        assert_eq!(config.auth.jwt_secret, "from-env");
        assert_eq!(config.registrar.queue_capacity, 4);
        Ok(())
    });
}

#[test]
fn missing_file_falls_back_to_defaults() {
    Jail::expect_with(|_jail| {
        let config: GradebookConfig = layered("absent.toml").extract()?;
        assert!(!config.auth.is_configured());
        assert_eq!(config.registrar.queue_capacity, 256);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".gradebook")?;
        jail.create_file(
            ".gradebook/config.toml",
            r#"
[server]
bind_addr = "127.0.0.1:9999"
"#,
        )?;

        let config: GradebookConfig = GradebookConfig::figment().extract()?;
        assert_eq!(config.server.bind_addr, "127.0.0.1:9999");
        Ok(())
    });
}

#[test]
fn malformed_value_is_an_error() {
    Jail::expect_with(|jail| {
        jail.set_env("GRADEBOOK_REGISTRAR__QUEUE_CAPACITY", "lots");
        let result: Result<GradebookConfig, _> = layered("absent.toml").extract();
        assert!(result.is_err());
        Ok(())
    });
}
