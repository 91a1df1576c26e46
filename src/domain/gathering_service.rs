//! GatheringService - gathering lifecycle

use super::DomainError;
use super::geo::{BoundingBox, NEAR_SPOT_RADIUS_KM, haversine_km};
use crate::dtos::NewGatheringDTO;
use crate::entities::{Gathering, GatheringStatus};
use crate::repositories::{Create, EnrollmentRepository, GatheringRepository, Read};
use sqlx::{MySql, MySqlConnection, Transaction};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Default)]
pub struct GatheringService {
    gatherings: GatheringRepository,
    enrollments: EnrollmentRepository,
}

impl GatheringService {
    pub fn new(gatherings: GatheringRepository, enrollments: EnrollmentRepository) -> Self {
        Self {
            gatherings,
            enrollments,
        }
    }

    #[instrument(skip(self, conn, data), fields(author_id = %data.author_id))]
    pub async fn create_gathering(
        &self,
        conn: &mut MySqlConnection,
        data: &NewGatheringDTO,
    ) -> Result<Gathering, DomainError> {
        let gathering = self.gatherings.create(conn, data).await?;
        info!("Gathering {} created", gathering.gathering_id);
        Ok(gathering)
    }

    /// Reads a visible (non-deleted) gathering
    #[instrument(skip(self, conn), fields(post_id = %post_id))]
    pub async fn find_gathering(
        &self,
        conn: &mut MySqlConnection,
        post_id: i64,
    ) -> Result<Gathering, DomainError> {
        self.gatherings
            .read(conn, &post_id)
            .await?
            .filter(|g| g.status != GatheringStatus::Deleted)
            .ok_or_else(|| {
                warn!("Gathering not found");
                DomainError::InvalidPostId(post_id)
            })
    }

    /// Locks the gathering row and checks that `member_id` wrote it
    #[instrument(skip(self, tx), fields(post_id = %post_id, member_id = %member_id))]
    pub async fn find_owned_with_lock(
        &self,
        tx: &mut Transaction<'_, MySql>,
        post_id: i64,
        member_id: i64,
    ) -> Result<Gathering, DomainError> {
        let gathering = self
            .gatherings
            .find_with_lock_by_id(tx, &post_id)
            .await?
            .filter(|g| g.status != GatheringStatus::Deleted)
            .ok_or(DomainError::InvalidPostId(post_id))?;

        if !gathering.is_author(member_id) {
            warn!("Member is not the author of the gathering");
            return Err(DomainError::NotGatheringOwner { post_id, member_id });
        }
        Ok(gathering)
    }

    /// Moves `gathering` to `next` if the lifecycle allows it
    pub async fn change_status(
        &self,
        conn: &mut MySqlConnection,
        gathering: &Gathering,
        next: GatheringStatus,
    ) -> Result<(), DomainError> {
        apply_status_change(&self.gatherings, conn, gathering, next).await
    }

    /// Changes participant maximum and images of a recruiting gathering.
    ///
    /// The maximum cannot drop below the members already enrolled; matching it exactly
    /// closes recruitment as if the last seat had been taken.
    #[instrument(skip(self, tx, image_urls), fields(post_id = %post_id, max = %participant_max_number))]
    pub async fn update_amount(
        &self,
        tx: &mut Transaction<'_, MySql>,
        post_id: i64,
        member_id: i64,
        participant_max_number: i32,
        image_urls: &[String],
    ) -> Result<(), DomainError> {
        let gathering = self.find_owned_with_lock(tx, post_id, member_id).await?;

        if !gathering.status.is_recruiting() {
            return Err(DomainError::GatheringNotRecruiting {
                post_id,
                status: gathering.status,
            });
        }

        let enrolled = self.enrollments.count_by_post_id(tx, &post_id).await?;
        if i64::from(participant_max_number) < enrolled {
            warn!("New maximum {} below {} enrolled", participant_max_number, enrolled);
            return Err(DomainError::InvalidParticipantMax {
                requested: participant_max_number,
                enrolled,
            });
        }

        self.gatherings
            .update_amount(tx, &post_id, participant_max_number, image_urls)
            .await?;

        if i64::from(participant_max_number) == enrolled {
            debug!("Maximum equals enrolled count, confirming");
            self.change_status(tx, &gathering, GatheringStatus::GatheringConfirmed)
                .await?;
        }
        Ok(())
    }

    /// Visible gatherings within 5 km of the spot, closest first, paired with their distance
    #[instrument(skip(self, conn))]
    pub async fn find_near_spot(
        &self,
        conn: &mut MySqlConnection,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<(Gathering, f64)>, DomainError> {
        let area = BoundingBox::around(latitude, longitude, NEAR_SPOT_RADIUS_KM);

        let mut nearby: Vec<(Gathering, f64)> = self
            .gatherings
            .find_in_area(conn, &area)
            .await?
            .into_iter()
            .map(|g| {
                let distance = haversine_km(latitude, longitude, g.latitude, g.longitude);
                (g, distance)
            })
            .filter(|(_, distance)| *distance <= NEAR_SPOT_RADIUS_KM)
            .collect();

        nearby.sort_by(|a, b| a.1.total_cmp(&b.1));
        debug!("{} gatherings near spot", nearby.len());
        Ok(nearby)
    }
}

/// The single write path for `gatherings.status`; rejects moves outside
/// [`GatheringStatus::can_transition_to`].
#[instrument(skip(gatherings, conn, gathering), fields(post_id = %gathering.gathering_id, from = ?gathering.status, to = ?next))]
pub(crate) async fn apply_status_change(
    gatherings: &GatheringRepository,
    conn: &mut MySqlConnection,
    gathering: &Gathering,
    next: GatheringStatus,
) -> Result<(), DomainError> {
    if !gathering.status.can_transition_to(next) {
        warn!("Rejected status transition");
        return Err(DomainError::InvalidStatusTransition {
            from: gathering.status,
            to: next,
        });
    }

    gatherings
        .update_status(conn, &gathering.gathering_id, next)
        .await?;
    Ok(())
}
