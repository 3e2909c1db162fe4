//! Repository functions for every gradebook table.
//!
//! Each function takes a `&libsql::Connection`, so the same code runs on the
//! shared connection or inside a transaction (which derefs to one). Authorization
//! never happens here; see `crate::workflows`.

pub mod assignment;
pub mod audit;
pub mod course;
pub mod enrollment;
pub mod grade;
pub mod section;
pub mod term;
pub mod user;
