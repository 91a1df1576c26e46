//! Member DTOs

use crate::entities::Member;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Profile of the current member
#[derive(Serialize, Deserialize, Debug)]
pub struct MemberProfileDTO {
    pub member_id: i64,
    pub email: String,
    pub nickname: String,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Member> for MemberProfileDTO {
    fn from(value: Member) -> Self {
        Self {
            member_id: value.member_id,
            email: value.email,
            nickname: value.nickname,
            profile_image_url: value.profile_image_url,
            created_at: value.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct UpdateNicknameDTO {
    #[validate(length(min = 2, max = 20, message = "Nickname must be between 2 and 20 characters"))]
    pub nickname: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct UpdateProfileImageDTO {
    #[validate(url(message = "Profile image must be a valid URL"))]
    pub profile_image_url: String,
}
