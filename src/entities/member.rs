//! Member entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Member {
    pub member_id: i64,
    pub email: String,
    pub nickname: String,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
