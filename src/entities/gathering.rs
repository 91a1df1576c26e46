//! Gathering entity - a meetup post

use super::enums::GatheringStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Gathering {
    pub gathering_id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub participant_max_number: i32,
    pub gathering_time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub image_urls: Json<Vec<String>>,
    #[sqlx(try_from = "String")]
    pub status: GatheringStatus,
    pub created_at: DateTime<Utc>,
}

impl Gathering {
    pub fn is_author(&self, member_id: i64) -> bool {
        self.author_id == member_id
    }

    /// `true` once `enrolled` participants fill every seat
    pub fn is_full(&self, enrolled: i64) -> bool {
        enrolled >= i64::from(self.participant_max_number)
    }
}
