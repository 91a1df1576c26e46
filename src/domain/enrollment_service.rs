//! EnrollmentService - enrollment invariants
//!
//! Capacity check and insert happen under the gathering row lock, so two members racing
//! for the last seat cannot both pass the check.

use super::DomainError;
use super::gathering_service::apply_status_change;
use crate::dtos::{EnrollmentData, NewEnrollmentDTO};
use crate::entities::{GatheringStatus, Member};
use crate::repositories::{
    Create, EnrollmentRepository, GatheringRepository, MemberRepository, ReadMany,
};
use sqlx::{MySql, MySqlConnection, Transaction};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Clone, Default)]
pub struct EnrollmentService {
    enrollments: EnrollmentRepository,
    members: MemberRepository,
    gatherings: GatheringRepository,
}

impl EnrollmentService {
    pub fn new(
        enrollments: EnrollmentRepository,
        members: MemberRepository,
        gatherings: GatheringRepository,
    ) -> Self {
        Self {
            enrollments,
            members,
            gatherings,
        }
    }

    /// Enrolls `member_id` into `post_id`.
    ///
    /// Order of checks: post exists, not already enrolled, seats left, still recruiting.
    /// When the insert fills the last seat the gathering becomes `GATHERING_CONFIRMED`.
    /// Everything runs on `tx`; dropping it without commit undoes the insert and the
    /// status change together.
    #[instrument(skip(self, tx), fields(post_id = %post_id, member_id = %member_id))]
    pub async fn save_enrollment(
        &self,
        tx: &mut Transaction<'_, MySql>,
        post_id: i64,
        member_id: i64,
    ) -> Result<(), DomainError> {
        let gathering = self
            .gatherings
            .find_with_lock_by_id(tx, &post_id)
            .await?
            .filter(|g| g.status != GatheringStatus::Deleted)
            .ok_or_else(|| {
                warn!("Enrollment to missing post");
                DomainError::InvalidPostId(post_id)
            })?;

        let current_count = self.enrollments.count_by_post_id(tx, &post_id).await?;

        if self
            .enrollments
            .exists_by_post_id_and_member_id(tx, &post_id, &member_id)
            .await?
        {
            warn!("Member already enrolled");
            return Err(DomainError::DuplicatedEnrollment { post_id, member_id });
        }

        if gathering.is_full(current_count) {
            warn!("Post is full ({} / {})", current_count, gathering.participant_max_number);
            return Err(DomainError::ExceedParticipantLimit {
                post_id,
                max: gathering.participant_max_number,
            });
        }

        if !gathering.status.is_recruiting() {
            warn!("Post is not recruiting: {:?}", gathering.status);
            return Err(DomainError::GatheringNotRecruiting {
                post_id,
                status: gathering.status,
            });
        }

        info!("Enrolling member to post");
        self.enrollments
            .create(tx, &NewEnrollmentDTO { member_id, post_id })
            .await
            .map_err(|err| DomainError::from_enrollment_insert(err, post_id, member_id))?;

        let current_count = self.enrollments.count_by_post_id(tx, &post_id).await?;
        if current_count == i64::from(gathering.participant_max_number) {
            info!("Last seat taken, confirming gathering");
            apply_status_change(
                &self.gatherings,
                tx,
                &gathering,
                GatheringStatus::GatheringConfirmed,
            )
            .await?;
        }

        Ok(())
    }

    /// Public identity of every member enrolled in `post_id`, in enrollment order
    #[instrument(skip(self, conn), fields(post_id = %post_id))]
    pub async fn get_enrollment_list(
        &self,
        conn: &mut MySqlConnection,
        post_id: i64,
    ) -> Result<Vec<EnrollmentData>, DomainError> {
        let enrollments = self.enrollments.find_all_by_post_id(conn, &post_id).await?;
        let member_ids: Vec<i64> = enrollments.iter().map(|e| e.member_id).collect();

        let mut members: HashMap<i64, Member> = self
            .members
            .read_many(conn, &member_ids)
            .await?
            .into_iter()
            .map(|m| (m.member_id, m))
            .collect();

        let result = enrollments
            .iter()
            .map(|enrollment| {
                members
                    .remove(&enrollment.member_id)
                    .map(EnrollmentData::from)
                    .ok_or_else(|| {
                        error!(
                            "Enrollment {} references missing member {}",
                            enrollment.enrollment_id, enrollment.member_id
                        );
                        DomainError::DataIntegrity(format!(
                            "enrollment {} references missing member {}",
                            enrollment.enrollment_id, enrollment.member_id
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Found {} enrolled members", result.len());
        Ok(result)
    }

    pub async fn get_enrolled_count(
        &self,
        conn: &mut MySqlConnection,
        post_id: i64,
    ) -> Result<i64, DomainError> {
        Ok(self.enrollments.count_by_post_id(conn, &post_id).await?)
    }

    /// Counts for several posts at once; posts without enrollments map to nothing
    pub async fn get_enrolled_counts(
        &self,
        conn: &mut MySqlConnection,
        post_ids: &[i64],
    ) -> Result<HashMap<i64, i64>, DomainError> {
        Ok(self.enrollments.count_by_post_ids(conn, post_ids).await?)
    }
}
