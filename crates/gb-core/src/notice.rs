//! Registrar notice envelope.
//!
//! The registrar is the external system of record for final grades. Each
//! persisted enrollment-grade change produces one notice; delivery is the
//! notifier's concern, never the request's.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::responses::EnrollmentDto;

/// Operation key understood by the registrar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum NoticeAction {
    #[serde(rename = "updateEnrollment")]
    UpdateEnrollment,
}

impl NoticeAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UpdateEnrollment => "updateEnrollment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrarNotice {
    pub action: NoticeAction,
    pub payload: EnrollmentDto,
    pub issued_at: DateTime<Utc>,
}

impl RegistrarNotice {
    #[must_use]
    pub fn update_enrollment(payload: EnrollmentDto) -> Self {
        Self {
            action: NoticeAction::UpdateEnrollment,
            payload,
            issued_at: Utc::now(),
        }
    }
}
