//! Ownership guard.
//!
//! A section's `instructor_email` governs the section and everything beneath
//! it. Child records carry no owner of their own: `gb-db` resolves any
//! [`OwnedTarget`] up to its section, and [`authorize`] compares the caller
//! against that one field.

use std::fmt;

use crate::entities::Section;
use crate::enums::{EntityKind, Role};
use crate::errors::CoreError;
use crate::identity::CallerIdentity;

/// Reason attached to every ownership denial.
pub const NOT_SECTION_INSTRUCTOR: &str = "Logged in user is not instructor for the given section";

/// A record whose owner is the instructor of its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedTarget {
    Section(i64),
    Assignment(i64),
    Enrollment(i64),
    Grade(i64),
}

impl OwnedTarget {
    #[must_use]
    pub const fn kind(self) -> EntityKind {
        match self {
            Self::Section(_) => EntityKind::Section,
            Self::Assignment(_) => EntityKind::Assignment,
            Self::Enrollment(_) => EntityKind::Enrollment,
            Self::Grade(_) => EntityKind::Grade,
        }
    }

    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Section(id) | Self::Assignment(id) | Self::Enrollment(id) | Self::Grade(id) => id,
        }
    }

    /// The not-found error for this target.
    #[must_use]
    pub fn not_found(self) -> CoreError {
        CoreError::not_found(self.kind(), self.id())
    }
}

impl fmt::Display for OwnedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}

/// Outcome of an ownership check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    Denied(String),
}

impl Authorization {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// # Errors
    ///
    /// Returns `CoreError::Forbidden` carrying the denial reason.
    pub fn into_result(self) -> Result<(), CoreError> {
        match self {
            Self::Allowed => Ok(()),
            Self::Denied(reason) => Err(CoreError::Forbidden(reason)),
        }
    }
}

/// The email that owns `section` and everything beneath it.
#[must_use]
pub fn owning_instructor(section: &Section) -> &str {
    &section.instructor_email
}

/// Decide whether `caller` may act on `section` as its instructor.
#[must_use]
pub fn authorize(caller: &CallerIdentity, section: &Section) -> Authorization {
    if caller.role != Role::Instructor {
        return Authorization::Denied(format!(
            "role '{}' may not manage sections",
            caller.role
        ));
    }
    if caller.email == owning_instructor(section) {
        Authorization::Allowed
    } else {
        Authorization::Denied(NOT_SECTION_INSTRUCTOR.to_string())
    }
}

/// Role gate for an operation.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if the caller holds a different role.
pub fn require_role(caller: &CallerIdentity, role: Role) -> Result<(), CoreError> {
    if caller.role == role {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "operation requires role '{role}', caller has '{}'",
            caller.role
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn section_owned_by(email: &str) -> Section {
        Section {
            section_no: 1,
            course_id: "cst438".into(),
            term_id: 1,
            sec_id: 1,
            building: Some("052".into()),
            room: Some("104".into()),
            times: Some("M W 10:00-11:50".into()),
            instructor_email: email.into(),
        }
    }

    #[test]
    fn owner_is_allowed() {
        let section = section_owned_by("ted@csumb.edu");
        let caller = CallerIdentity::instructor("ted@csumb.edu");
        assert_eq!(authorize(&caller, &section), Authorization::Allowed);
    }

    #[test]
    fn other_instructor_is_denied() {
        let section = section_owned_by("ted@csumb.edu");
        let caller = CallerIdentity::instructor("teddy@csumb.edu");
        let decision = authorize(&caller, &section);
        assert_eq!(
            decision,
            Authorization::Denied(NOT_SECTION_INSTRUCTOR.to_string())
        );
        assert!(matches!(
            decision.into_result(),
            Err(CoreError::Forbidden(_))
        ));
    }

    #[test]
    fn student_with_owner_email_is_denied() {
        let section = section_owned_by("ted@csumb.edu");
        let caller = CallerIdentity::student("ted@csumb.edu");
        assert!(!authorize(&caller, &section).is_allowed());
    }

    #[test]
    fn email_match_is_exact() {
        let section = section_owned_by("ted@csumb.edu");
        let caller = CallerIdentity::instructor("Ted@csumb.edu");
        assert!(!authorize(&caller, &section).is_allowed());
    }

    #[test]
    fn require_role_rejects_mismatch() {
        let caller = CallerIdentity::instructor("ted@csumb.edu");
        assert!(require_role(&caller, Role::Instructor).is_ok());
        assert!(matches!(
            require_role(&caller, Role::Student),
            Err(CoreError::Forbidden(_))
        ));
    }

    #[test]
    fn target_not_found_names_kind() {
        let err = OwnedTarget::Enrollment(9).not_found();
        assert_eq!(err.to_string(), "enrollment 9 not found");
    }
}
