//! Repositories module - one repository per table
//!
//! Queries are built with the runtime-checked `sqlx::query` / `sqlx::query_as` API and
//! decoded through `#[derive(sqlx::FromRow)]`, so the crate builds without a live database.
//! The schema lives in `migrations/`, the test data in `fixtures/`.
//!
//! Number of rows | method
//! ---------------|--------------------------------
//! none           | `.execute(conn)`
//! zero or one    | `.fetch_optional(conn)`
//! exactly one    | `.fetch_one(conn)` (aggregates such as `COUNT(*)`)
//! many           | `.fetch_all(conn)`

pub mod enrollment;
pub mod gathering;
pub mod member;
pub mod traits;

pub use traits::{Create, Read, ReadMany};

pub use enrollment::EnrollmentRepository;
pub use gathering::GatheringRepository;
pub use member::MemberRepository;
