//! Enrollment handlers - /enrollment

use crate::core::{AppError, AppState};
use crate::dtos::{EnrolledCountDTO, EnrollmentData};
use crate::entities::Member;
use crate::usecases::{EnrollGatheringUseCase, GetEnrolledCountUseCase, GetEnrollmentListUseCase};
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use std::sync::Arc;
use tracing::{debug, instrument};

#[instrument(skip(state, current_member), fields(post_id = %post_id, member_id = %current_member.member_id))]
pub async fn enroll_gathering(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
    Extension(current_member): Extension<Member>,
) -> Result<(), AppError> {
    debug!("Enrollment requested");
    EnrollGatheringUseCase::new(&state)
        .execute(post_id, &current_member)
        .await?;
    Ok(())
}

#[instrument(skip(state), fields(post_id = %post_id))]
pub async fn get_enrollment_list(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<EnrollmentData>>, AppError> {
    let list = GetEnrollmentListUseCase::new(&state).execute(post_id).await?;
    Ok(Json(list))
}

#[instrument(skip(state), fields(post_id = %post_id))]
pub async fn get_enrolled_count(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<EnrolledCountDTO>, AppError> {
    let count = GetEnrolledCountUseCase::new(&state).execute(post_id).await?;
    Ok(Json(EnrolledCountDTO { count }))
}
