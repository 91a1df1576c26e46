//! Domain errors raised by the services

use crate::entities::GatheringStatus;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// The post does not exist or was deleted
    #[error("post {0} does not exist")]
    InvalidPostId(i64),

    #[error("member {member_id} already enrolled in post {post_id}")]
    DuplicatedEnrollment { post_id: i64, member_id: i64 },

    #[error("post {post_id} already has its {max} participants")]
    ExceedParticipantLimit { post_id: i64, max: i32 },

    #[error("post {post_id} is not recruiting (status {status:?})")]
    GatheringNotRecruiting { post_id: i64, status: GatheringStatus },

    #[error("gathering cannot move from {from:?} to {to:?}")]
    InvalidStatusTransition {
        from: GatheringStatus,
        to: GatheringStatus,
    },

    /// The new participant maximum is lower than the members already enrolled
    #[error("participant maximum {requested} is lower than the {enrolled} enrolled members")]
    InvalidParticipantMax { requested: i32, enrolled: i64 },

    #[error("member {member_id} is not the author of post {post_id}")]
    NotGatheringOwner { post_id: i64, member_id: i64 },

    #[error("member {0} does not exist")]
    MemberNotFound(i64),

    /// A row references something that is gone. Never caused by the client.
    #[error("data integrity violation: {0}")]
    DataIntegrity(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl DomainError {
    /// Maps a unique-key violation from the enrollment insert to `DuplicatedEnrollment`
    pub(crate) fn from_enrollment_insert(err: sqlx::Error, post_id: i64, member_id: i64) -> Self {
        match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Self::DuplicatedEnrollment { post_id, member_id }
            }
            other => Self::Database(other),
        }
    }
}
