//! Cross-cutting error types for the gradebook.
//!
//! `CoreError` carries the three failure kinds every mutation can surface:
//! a referenced record does not exist, the caller may not act on it, or the
//! input is invalid. Storage errors live in `gb-db`; the two converge in
//! `gb_db::ServiceError`.

use thiserror::Error;

use crate::enums::EntityKind;

/// Coarse classification used by transports to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Validation,
    Internal,
}

/// Errors raised by the ownership guard and the domain rules.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced section/assignment/enrollment/grade id does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: String },

    /// The caller is not the owning instructor, or holds the wrong role.
    #[error("{0}")]
    Forbidden(String),

    /// Input failed a domain rule (date bounds, malformed date, id mismatch).
    #[error("{0}")]
    Validation(String),
}

impl CoreError {
    pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = CoreError::not_found(EntityKind::Grade, 42);
        assert_eq!(err.to_string(), "grade 42 not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn forbidden_and_validation_are_distinct_kinds() {
        assert_eq!(
            CoreError::Forbidden("nope".into()).kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(
            CoreError::Validation("bad".into()).kind(),
            ErrorKind::Validation
        );
    }
}
