//! Roles, semesters, entity kinds, and audit actions.
//!
//! Every enum round-trips through the string form stored in SQL via
//! `as_str()` / `FromStr`, and through serde for the wire.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Semester
// ---------------------------------------------------------------------------

/// Academic semester of a term. Serialized as the capitalized name
/// (`"Fall"`), which is also the form accepted in query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Semester {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Semester {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Winter => "Winter",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Semester {
    type Err = CoreError;

    /// Case-insensitive, so `?semester=fall` and `?semester=Fall` both work.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "fall" => Ok(Self::Fall),
            "winter" => Ok(Self::Winter),
            _ => Err(CoreError::Validation(format!("unknown semester '{s}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role claim carried by an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Instructor,
    Student,
    Admin,
}

impl Role {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instructor => "instructor",
            Self::Student => "student",
            Self::Admin => "admin",
        }
    }

    /// Scope value carried in bearer tokens (`ROLE_INSTRUCTOR`, ...).
    #[must_use]
    pub const fn scope(self) -> &'static str {
        match self {
            Self::Instructor => "ROLE_INSTRUCTOR",
            Self::Student => "ROLE_STUDENT",
            Self::Admin => "ROLE_ADMIN",
        }
    }

    /// Parse a token scope claim. Accepts an optional `SCOPE_` prefix.
    #[must_use]
    pub fn from_scope(scope: &str) -> Option<Self> {
        let scope = scope.trim();
        let scope = scope.strip_prefix("SCOPE_").unwrap_or(scope);
        match scope {
            "ROLE_INSTRUCTOR" => Some(Self::Instructor),
            "ROLE_STUDENT" => Some(Self::Student),
            "ROLE_ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instructor" => Ok(Self::Instructor),
            "student" => Ok(Self::Student),
            "admin" => Ok(Self::Admin),
            _ => Err(CoreError::Validation(format!("unknown role '{s}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Kinds of records the gradebook stores. Used in audit rows and
/// not-found errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Term,
    Course,
    Section,
    Assignment,
    Enrollment,
    Grade,
    User,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Term => "term",
            Self::Course => "course",
            Self::Section => "section",
            Self::Assignment => "assignment",
            Self::Enrollment => "enrollment",
            Self::Grade => "grade",
            Self::User => "user",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "term" => Ok(Self::Term),
            "course" => Ok(Self::Course),
            "section" => Ok(Self::Section),
            "assignment" => Ok(Self::Assignment),
            "enrollment" => Ok(Self::Enrollment),
            "grade" => Ok(Self::Grade),
            "user" => Ok(Self::User),
            _ => Err(CoreError::Validation(format!("unknown entity kind '{s}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Mutation recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
    ScoreChanged,
    LetterGradeChanged,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::ScoreChanged => "score_changed",
            Self::LetterGradeChanged => "letter_grade_changed",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "deleted" => Ok(Self::Deleted),
            "score_changed" => Ok(Self::ScoreChanged),
            "letter_grade_changed" => Ok(Self::LetterGradeChanged),
            _ => Err(CoreError::Validation(format!("unknown audit action '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Fall", Semester::Fall)]
    #[case("fall", Semester::Fall)]
    #[case(" SPRING ", Semester::Spring)]
    #[case("Summer", Semester::Summer)]
    fn semester_parses_case_insensitively(#[case] input: &str, #[case] expected: Semester) {
        assert_eq!(input.parse::<Semester>().unwrap(), expected);
    }

    #[test]
    fn semester_rejects_unknown() {
        let err = "Autumn".parse::<Semester>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn semester_serializes_as_display_name() {
        assert_eq!(serde_json::to_string(&Semester::Fall).unwrap(), "\"Fall\"");
    }

    #[rstest]
    #[case("ROLE_INSTRUCTOR", Some(Role::Instructor))]
    #[case("SCOPE_ROLE_STUDENT", Some(Role::Student))]
    #[case("ROLE_ADMIN", Some(Role::Admin))]
    #[case("ROLE_DEAN", None)]
    #[case("", None)]
    fn role_from_scope(#[case] scope: &str, #[case] expected: Option<Role>) {
        assert_eq!(Role::from_scope(scope), expected);
    }

    #[test]
    fn role_scope_roundtrip() {
        for role in [Role::Instructor, Role::Student, Role::Admin] {
            assert_eq!(Role::from_scope(role.scope()), Some(role));
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn audit_action_str_roundtrip() {
        for action in [
            AuditAction::Created,
            AuditAction::Updated,
            AuditAction::Deleted,
            AuditAction::ScoreChanged,
            AuditAction::LetterGradeChanged,
        ] {
            assert_eq!(action.as_str().parse::<AuditAction>().unwrap(), action);
        }
    }

    #[test]
    fn entity_kind_matches_serde() {
        let json = serde_json::to_string(&EntityKind::Enrollment).unwrap();
        assert_eq!(json, format!("\"{}\"", EntityKind::Enrollment.as_str()));
    }
}
