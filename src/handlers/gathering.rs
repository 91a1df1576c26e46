//! Gathering handlers - /gathering

use crate::core::{AppError, AppState};
use crate::domain::geo::is_valid_coordinate;
use crate::dtos::{
    CreateGatheringDTO, DecidePendingStatusDTO, DeleteGatheringDTO, GatheringDetailResponse,
    GatheringsNearSpotResponse, UpdateGatheringAmountDTO,
};
use crate::entities::Member;
use crate::usecases::{
    CreateGatheringUseCase, DecidePendingPostStatusUseCase, FinishGatheringUseCase,
    GetGatheringDataUseCase, GetGatheringsNearSpotUseCase, UpdateGatheringAmountUseCase,
    UpdatePostStatusAsDeletedUseCase,
};
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use axum_macros::debug_handler;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

#[debug_handler]
#[instrument(skip(state, current_member, body), fields(member_id = %current_member.member_id))]
pub async fn post_new_gathering(
    State(state): State<Arc<AppState>>,
    Extension(current_member): Extension<Member>,
    Json(body): Json<CreateGatheringDTO>,
) -> Result<(), AppError> {
    body.validate()?;
    let post_id = CreateGatheringUseCase::new(&state)
        .execute(body, current_member.member_id)
        .await?;
    info!("New gathering {}", post_id);
    Ok(())
}

#[instrument(skip(state, current_member), fields(post_id = %post_id, member_id = %current_member.member_id))]
pub async fn get_gathering_data(
    State(state): State<Arc<AppState>>,
    Extension(current_member): Extension<Member>,
    Path(post_id): Path<i64>,
) -> Result<Json<GatheringDetailResponse>, AppError> {
    let detail = GetGatheringDataUseCase::new(&state)
        .execute(&current_member, post_id)
        .await?;
    Ok(Json(detail))
}

/// Gatherings within 5 km of the spot
#[instrument(skip(state))]
pub async fn get_gatherings_near_spot(
    State(state): State<Arc<AppState>>,
    Path((latitude, longitude)): Path<(f64, f64)>,
) -> Result<Json<GatheringsNearSpotResponse>, AppError> {
    if !is_valid_coordinate(latitude, longitude) {
        warn!("Coordinates out of range");
        return Err(AppError::bad_request("Invalid coordinates")
            .with_details(format!("({}, {}) is not a valid position", latitude, longitude)));
    }

    let response = GetGatheringsNearSpotUseCase::new(&state)
        .execute(latitude, longitude)
        .await?;
    Ok(Json(response))
}

#[instrument(skip(state, current_member, body), fields(member_id = %current_member.member_id))]
pub async fn update_gathering_as_deleted(
    State(state): State<Arc<AppState>>,
    Extension(current_member): Extension<Member>,
    Json(body): Json<DeleteGatheringDTO>,
) -> Result<(), AppError> {
    UpdatePostStatusAsDeletedUseCase::new(&state)
        .execute(&body, current_member.member_id)
        .await?;
    Ok(())
}

#[debug_handler]
#[instrument(skip(state, current_member, body), fields(member_id = %current_member.member_id))]
pub async fn update_gathering_amount(
    State(state): State<Arc<AppState>>,
    Extension(current_member): Extension<Member>,
    Json(body): Json<UpdateGatheringAmountDTO>,
) -> Result<(), AppError> {
    body.validate()?;
    UpdateGatheringAmountUseCase::new(&state)
        .execute(&body, current_member.member_id)
        .await?;
    Ok(())
}

#[instrument(skip(state, current_member), fields(post_id = %post_id, member_id = %current_member.member_id))]
pub async fn finish_gathering(
    State(state): State<Arc<AppState>>,
    Extension(current_member): Extension<Member>,
    Path(post_id): Path<i64>,
) -> Result<(), AppError> {
    FinishGatheringUseCase::new(&state)
        .execute(post_id, current_member.member_id)
        .await?;
    Ok(())
}

#[instrument(skip(state, current_member, body), fields(member_id = %current_member.member_id))]
pub async fn decide_proceed_or_not(
    State(state): State<Arc<AppState>>,
    Extension(current_member): Extension<Member>,
    Json(body): Json<DecidePendingStatusDTO>,
) -> Result<(), AppError> {
    DecidePendingPostStatusUseCase::new(&state)
        .execute(current_member.member_id, &body)
        .await?;
    Ok(())
}
