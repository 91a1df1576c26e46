//! Application State - shared state of the application
//!
//! Holds the connection pool, the domain services and the JWT secret.

use crate::domain::{EnrollmentService, GatheringService, MemberService};
use crate::repositories::{EnrollmentRepository, GatheringRepository, MemberRepository};
use sqlx::MySqlPool;

/// Global state shared by every route and middleware
pub struct AppState {
    /// MySQL connection pool; use cases open their transactions from here
    pub pool: MySqlPool,

    pub members: MemberService,
    pub gatherings: GatheringService,
    pub enrollments: EnrollmentService,

    /// Secret key for JWT tokens
    pub jwt_secret: String,
}

impl AppState {
    /// Creates the state, wiring every service to its repositories.
    ///
    /// # Arguments
    /// * `pool` - Shared MySQL connection pool
    /// * `jwt_secret` - Secret used to verify the bearer tokens
    pub fn new(pool: MySqlPool, jwt_secret: String) -> Self {
        let member_repository = MemberRepository::new();
        let gathering_repository = GatheringRepository::new();
        let enrollment_repository = EnrollmentRepository::new();

        Self {
            pool,
            members: MemberService::new(member_repository),
            gatherings: GatheringService::new(gathering_repository, enrollment_repository),
            enrollments: EnrollmentService::new(
                enrollment_repository,
                member_repository,
                gathering_repository,
            ),
            jwt_secret,
        }
    }
}
