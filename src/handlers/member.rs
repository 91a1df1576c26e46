//! Member handlers - /member

use crate::core::{AppError, AppState};
use crate::dtos::{MemberProfileDTO, UpdateNicknameDTO, UpdateProfileImageDTO};
use crate::entities::Member;
use crate::usecases::{
    GetMemberProfileUseCase, UpdateMemberNicknameUseCase, UpdateMemberProfileImageUseCase,
};
use axum::{
    Extension,
    extract::{Json, State},
};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

#[instrument(skip(state, current_member), fields(member_id = %current_member.member_id))]
pub async fn get_my_profile(
    State(state): State<Arc<AppState>>,
    Extension(current_member): Extension<Member>, // set by authentication_middleware
) -> Result<Json<MemberProfileDTO>, AppError> {
    let profile = GetMemberProfileUseCase::new(&state)
        .execute(&current_member)
        .await?;
    Ok(Json(profile))
}

#[instrument(skip(state, current_member, body), fields(member_id = %current_member.member_id))]
pub async fn update_nickname(
    State(state): State<Arc<AppState>>,
    Extension(current_member): Extension<Member>,
    Json(body): Json<UpdateNicknameDTO>,
) -> Result<(), AppError> {
    body.validate()?;
    UpdateMemberNicknameUseCase::new(&state)
        .execute(&current_member, &body)
        .await?;
    info!("Nickname changed");
    Ok(())
}

#[instrument(skip(state, current_member, body), fields(member_id = %current_member.member_id))]
pub async fn update_profile_image(
    State(state): State<Arc<AppState>>,
    Extension(current_member): Extension<Member>,
    Json(body): Json<UpdateProfileImageDTO>,
) -> Result<(), AppError> {
    body.validate()?;
    UpdateMemberProfileImageUseCase::new(&state)
        .execute(&current_member, &body)
        .await?;
    Ok(())
}
