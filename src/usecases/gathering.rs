//! Gathering use cases - every operation behind /gathering

use crate::core::AppState;
use crate::domain::DomainError;
use crate::dtos::{
    CreateGatheringDTO, DecidePendingStatusDTO, DeleteGatheringDTO, GatheringDetailResponse,
    GatheringNearSpotDTO, GatheringsNearSpotResponse, NewGatheringDTO, UpdateGatheringAmountDTO,
};
use crate::entities::{GatheringStatus, Member};
use tracing::{info, instrument};

pub struct CreateGatheringUseCase<'a> {
    state: &'a AppState,
}

impl<'a> CreateGatheringUseCase<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    #[instrument(skip_all, fields(author_id = %member_id))]
    pub async fn execute(
        &self,
        request: CreateGatheringDTO,
        member_id: i64,
    ) -> Result<i64, DomainError> {
        let data = NewGatheringDTO::new(member_id, request);

        let mut tx = self.state.pool.begin().await?;
        let gathering = self.state.gatherings.create_gathering(&mut tx, &data).await?;
        tx.commit().await?;

        Ok(gathering.gathering_id)
    }
}

pub struct GetGatheringDataUseCase<'a> {
    state: &'a AppState,
}

impl<'a> GetGatheringDataUseCase<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    #[instrument(skip_all, fields(post_id = %post_id, member_id = %member.member_id))]
    pub async fn execute(
        &self,
        member: &Member,
        post_id: i64,
    ) -> Result<GatheringDetailResponse, DomainError> {
        // one transaction so the detail is a consistent snapshot
        let mut tx = self.state.pool.begin().await?;

        let gathering = self.state.gatherings.find_gathering(&mut tx, post_id).await?;
        let author = self
            .state
            .members
            .find_member(&mut tx, gathering.author_id)
            .await
            .map_err(|err| match err {
                DomainError::MemberNotFound(id) => DomainError::DataIntegrity(format!(
                    "gathering {} references missing author {}",
                    post_id, id
                )),
                other => other,
            })?;
        let participants = self
            .state
            .enrollments
            .get_enrollment_list(&mut tx, post_id)
            .await?;
        let is_enrolled = participants.iter().any(|p| p.member_id == member.member_id);

        tx.commit().await?;

        Ok(GatheringDetailResponse::new(
            gathering,
            author,
            member.member_id,
            is_enrolled,
            participants,
        ))
    }
}

pub struct GetGatheringsNearSpotUseCase<'a> {
    state: &'a AppState,
}

impl<'a> GetGatheringsNearSpotUseCase<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<GatheringsNearSpotResponse, DomainError> {
        let mut conn = self.state.pool.acquire().await?;

        let nearby = self
            .state
            .gatherings
            .find_near_spot(&mut conn, latitude, longitude)
            .await?;
        let post_ids: Vec<i64> = nearby.iter().map(|(g, _)| g.gathering_id).collect();
        let counts = self
            .state
            .enrollments
            .get_enrolled_counts(&mut conn, &post_ids)
            .await?;

        let gatherings = nearby
            .into_iter()
            .map(|(gathering, distance)| {
                let enrolled = counts.get(&gathering.gathering_id).copied().unwrap_or(0);
                GatheringNearSpotDTO::new(gathering, distance, enrolled)
            })
            .collect();

        Ok(GatheringsNearSpotResponse { gatherings })
    }
}

pub struct UpdatePostStatusAsDeletedUseCase<'a> {
    state: &'a AppState,
}

impl<'a> UpdatePostStatusAsDeletedUseCase<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    #[instrument(skip_all, fields(post_id = %request.post_id, member_id = %member_id))]
    pub async fn execute(
        &self,
        request: &DeleteGatheringDTO,
        member_id: i64,
    ) -> Result<(), DomainError> {
        let mut tx = self.state.pool.begin().await?;
        let gathering = self
            .state
            .gatherings
            .find_owned_with_lock(&mut tx, request.post_id, member_id)
            .await?;
        self.state
            .gatherings
            .change_status(&mut tx, &gathering, GatheringStatus::Deleted)
            .await?;
        tx.commit().await?;

        info!("Gathering deleted");
        Ok(())
    }
}

pub struct UpdateGatheringAmountUseCase<'a> {
    state: &'a AppState,
}

impl<'a> UpdateGatheringAmountUseCase<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    #[instrument(skip_all, fields(post_id = %request.post_id, member_id = %member_id))]
    pub async fn execute(
        &self,
        request: &UpdateGatheringAmountDTO,
        member_id: i64,
    ) -> Result<(), DomainError> {
        let mut tx = self.state.pool.begin().await?;
        self.state
            .gatherings
            .update_amount(
                &mut tx,
                request.post_id,
                member_id,
                request.participant_max_number,
                &request.image_urls,
            )
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

/// Closes recruitment early; the gathering waits for the owner's decision
pub struct FinishGatheringUseCase<'a> {
    state: &'a AppState,
}

impl<'a> FinishGatheringUseCase<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    #[instrument(skip_all, fields(post_id = %post_id, member_id = %member_id))]
    pub async fn execute(&self, post_id: i64, member_id: i64) -> Result<(), DomainError> {
        let mut tx = self.state.pool.begin().await?;
        let gathering = self
            .state
            .gatherings
            .find_owned_with_lock(&mut tx, post_id, member_id)
            .await?;
        self.state
            .gatherings
            .change_status(&mut tx, &gathering, GatheringStatus::GatheringPending)
            .await?;
        tx.commit().await?;

        info!("Recruitment closed early");
        Ok(())
    }
}

pub struct DecidePendingPostStatusUseCase<'a> {
    state: &'a AppState,
}

impl<'a> DecidePendingPostStatusUseCase<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    #[instrument(skip_all, fields(post_id = %request.post_id, member_id = %member_id, proceed = %request.proceed))]
    pub async fn execute(
        &self,
        member_id: i64,
        request: &DecidePendingStatusDTO,
    ) -> Result<(), DomainError> {
        let next = if request.proceed {
            GatheringStatus::GatheringFinished
        } else {
            GatheringStatus::Deleted
        };

        let mut tx = self.state.pool.begin().await?;
        let gathering = self
            .state
            .gatherings
            .find_owned_with_lock(&mut tx, request.post_id, member_id)
            .await?;
        if gathering.status != GatheringStatus::GatheringPending {
            return Err(DomainError::InvalidStatusTransition {
                from: gathering.status,
                to: next,
            });
        }
        self.state
            .gatherings
            .change_status(&mut tx, &gathering, next)
            .await?;
        tx.commit().await?;

        info!("Pending gathering decided: {:?}", next);
        Ok(())
    }
}
