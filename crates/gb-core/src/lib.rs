//! # gb-core
//!
//! Core types shared by every gradebook crate:
//! - Entity structs for terms, courses, sections, assignments, enrollments,
//!   grades, and users
//! - Role and semester enums
//! - The caller identity produced by authentication
//! - The ownership guard that binds a caller to a section's instructor
//! - Due-date parsing and term-bound checks
//! - Wire projections (DTOs) returned by the HTTP surface
//! - The registrar notice envelope
//! - The core error taxonomy (not found / forbidden / validation)

pub mod audit_detail;
pub mod dates;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod notice;
pub mod ownership;
pub mod requests;
pub mod responses;
