//! Domain services
//!
//! Business rules over the entities. Every service method works on a connection handed
//! in by the caller; the use cases in `crate::usecases` decide the transaction boundary.

pub mod enrollment_service;
pub mod error;
pub mod gathering_service;
pub mod geo;
pub mod member_service;

pub use enrollment_service::EnrollmentService;
pub use error::DomainError;
pub use gathering_service::GatheringService;
pub use member_service::MemberService;
