//! Entity structs for all gradebook records.
//!
//! Each entity maps to a table in the libSQL store (see
//! `gb-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema`.

mod assignment;
mod audit;
mod course;
mod enrollment;
mod grade;
mod section;
mod term;
mod user;

pub use assignment::Assignment;
pub use audit::AuditEntry;
pub use course::Course;
pub use enrollment::Enrollment;
pub use grade::Grade;
pub use section::Section;
pub use term::Term;
pub use user::User;
