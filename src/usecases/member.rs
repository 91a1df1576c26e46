//! Member use cases

use crate::core::AppState;
use crate::domain::DomainError;
use crate::dtos::{MemberProfileDTO, UpdateNicknameDTO, UpdateProfileImageDTO};
use crate::entities::Member;
use tracing::instrument;

pub struct UpdateMemberNicknameUseCase<'a> {
    state: &'a AppState,
}

impl<'a> UpdateMemberNicknameUseCase<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    #[instrument(skip_all, fields(member_id = %member.member_id))]
    pub async fn execute(
        &self,
        member: &Member,
        request: &UpdateNicknameDTO,
    ) -> Result<(), DomainError> {
        let mut tx = self.state.pool.begin().await?;
        self.state
            .members
            .update_nickname(&mut tx, member, &request.nickname)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

pub struct UpdateMemberProfileImageUseCase<'a> {
    state: &'a AppState,
}

impl<'a> UpdateMemberProfileImageUseCase<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    #[instrument(skip_all, fields(member_id = %member.member_id))]
    pub async fn execute(
        &self,
        member: &Member,
        request: &UpdateProfileImageDTO,
    ) -> Result<(), DomainError> {
        let mut tx = self.state.pool.begin().await?;
        self.state
            .members
            .update_profile_image(&mut tx, member, &request.profile_image_url)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

pub struct GetMemberProfileUseCase<'a> {
    state: &'a AppState,
}

impl<'a> GetMemberProfileUseCase<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Re-reads the member so the profile reflects writes made after authentication
    pub async fn execute(&self, member: &Member) -> Result<MemberProfileDTO, DomainError> {
        let mut conn = self.state.pool.acquire().await?;
        let member = self
            .state
            .members
            .find_member(&mut conn, member.member_id)
            .await?;
        Ok(member.into())
    }
}
