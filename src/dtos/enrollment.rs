//! Enrollment DTOs

use crate::entities::Member;
use serde::{Deserialize, Serialize};

/// Public identity of an enrolled member
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnrollmentData {
    pub member_id: i64,
    pub nickname: String,
    pub profile_image_url: Option<String>,
}

impl From<Member> for EnrollmentData {
    fn from(value: Member) -> Self {
        Self {
            member_id: value.member_id,
            nickname: value.nickname,
            profile_image_url: value.profile_image_url,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct EnrolledCountDTO {
    pub count: i64,
}

/// DTO to create a new enrollment (without enrollment_id and created_at)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewEnrollmentDTO {
    pub member_id: i64,
    pub post_id: i64,
}
