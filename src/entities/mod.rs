//! Entities module - domain entities persisted in the database
//!
//! Every entity maps one table. Rows are decoded at runtime through `sqlx::FromRow`.

pub mod enrollment;
pub mod enums;
pub mod gathering;
pub mod member;

// Re-exports
pub use enrollment::Enrollment;
pub use enums::GatheringStatus;
pub use gathering::Gathering;
pub use member::Member;
