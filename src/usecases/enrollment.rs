//! Enrollment use cases

use crate::core::AppState;
use crate::domain::DomainError;
use crate::dtos::EnrollmentData;
use crate::entities::Member;
use tracing::{info, instrument};

pub struct EnrollGatheringUseCase<'a> {
    state: &'a AppState,
}

impl<'a> EnrollGatheringUseCase<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    #[instrument(skip_all, fields(post_id = %post_id, member_id = %member.member_id))]
    pub async fn execute(&self, post_id: i64, member: &Member) -> Result<(), DomainError> {
        let mut tx = self.state.pool.begin().await?;
        self.state
            .enrollments
            .save_enrollment(&mut tx, post_id, member.member_id)
            .await?;
        tx.commit().await?;
        info!("Enrollment committed");
        Ok(())
    }
}

pub struct GetEnrollmentListUseCase<'a> {
    state: &'a AppState,
}

impl<'a> GetEnrollmentListUseCase<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn execute(&self, post_id: i64) -> Result<Vec<EnrollmentData>, DomainError> {
        let mut tx = self.state.pool.begin().await?;
        self.state.gatherings.find_gathering(&mut tx, post_id).await?;
        let list = self
            .state
            .enrollments
            .get_enrollment_list(&mut tx, post_id)
            .await?;
        tx.commit().await?;
        Ok(list)
    }
}

pub struct GetEnrolledCountUseCase<'a> {
    state: &'a AppState,
}

impl<'a> GetEnrolledCountUseCase<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn execute(&self, post_id: i64) -> Result<i64, DomainError> {
        let mut conn = self.state.pool.acquire().await?;
        self.state.gatherings.find_gathering(&mut conn, post_id).await?;
        self.state
            .enrollments
            .get_enrolled_count(&mut conn, post_id)
            .await
    }
}
