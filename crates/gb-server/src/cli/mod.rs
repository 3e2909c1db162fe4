use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `gbd` binary.
#[derive(Debug, Parser)]
#[command(name = "gbd", version, about = "Gradebook server and admin tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra TOML config file, layered above every other source
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use gb_core::enums::Role;

    use super::root_commands::SchemaType;
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["gbd", "--format", "raw", "--verbose", "serve"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Serve));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["gbd", "serve", "--quiet"]).expect("cli should parse");
        assert!(cli.quiet);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["gbd", "--format", "table", "serve"]).is_err());
    }

    #[test]
    fn token_parses_role_and_ttl() {
        let cli = Cli::try_parse_from([
            "gbd",
            "token",
            "--email",
            "ted@csumb.edu",
            "--role",
            "instructor",
            "--ttl-secs",
            "60",
        ])
        .expect("cli should parse");

        let Commands::Token(args) = cli.command else {
            panic!("expected token command");
        };
        assert_eq!(args.email, "ted@csumb.edu");
        assert_eq!(args.role, Role::Instructor);
        assert_eq!(args.ttl_secs, 60);
    }

    #[test]
    fn token_rejects_unknown_role() {
        let parsed = Cli::try_parse_from(["gbd", "token", "--email", "a@b.c", "--role", "dean"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn schema_type_uses_kebab_case() {
        let cli = Cli::try_parse_from(["gbd", "schema", "assignment-student"])
            .expect("cli should parse");
        let Commands::Schema(args) = cli.command else {
            panic!("expected schema command");
        };
        assert_eq!(args.type_name, SchemaType::AssignmentStudent);
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["gbd", "--config", "/tmp/gb.toml", "serve"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(
            flags.config.as_deref(),
            Some(std::path::Path::new("/tmp/gb.toml"))
        );
    }
}
