use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use gb_core::enums::{AuditAction, EntityKind, Role};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Serve the HTTP API until interrupted.
    Serve,
    /// Load a roster snapshot (terms, courses, users, sections, enrollments).
    Import(ImportArgs),
    /// Mint a development bearer token with the configured secret.
    Token(TokenArgs),
    /// Print the JSON schema of a wire type.
    Schema(SchemaArgs),
    /// Query the mutation audit trail.
    Audit(AuditArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// Roster JSON file.
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct TokenArgs {
    /// Subject email.
    #[arg(long)]
    pub email: String,
    /// instructor, student or admin.
    #[arg(long)]
    pub role: Role,
    /// Display name claim.
    #[arg(long)]
    pub name: Option<String>,
    /// Lifetime in seconds.
    #[arg(long, default_value_t = 3600)]
    pub ttl_secs: i64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    Section,
    Assignment,
    AssignmentStudent,
    Enrollment,
    Grade,
    Notice,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Wire type to describe.
    #[arg(value_enum)]
    pub type_name: SchemaType,
}

#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    /// Entity kind (assignment, grade, enrollment, ...).
    #[arg(long)]
    pub entity: Option<EntityKind>,
    /// Entity id.
    #[arg(long)]
    pub entity_id: Option<String>,
    /// Action (created, updated, deleted, score_changed, letter_grade_changed).
    #[arg(long)]
    pub action: Option<AuditAction>,
    /// Actor email.
    #[arg(long)]
    pub actor: Option<String>,
    /// Max rows to return.
    #[arg(short, long, default_value_t = 50)]
    pub limit: u32,
}
