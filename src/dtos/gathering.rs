//! Gathering DTOs - request bodies and responses of /gathering

use crate::dtos::EnrollmentData;
use crate::entities::{Gathering, GatheringStatus, Member};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of POST /gathering/new
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateGatheringDTO {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Content must be at most 2000 characters"))]
    pub content: String,

    #[validate(range(min = 2, max = 100, message = "Participants must be between 2 and 100"))]
    pub participant_max_number: i32,

    pub gathering_time: DateTime<Utc>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[validate(length(min = 1, max = 255))]
    pub address: String,

    #[serde(default)]
    #[validate(length(max = 5, message = "At most 5 images per gathering"))]
    pub image_urls: Vec<String>,
}

/// Row data for a new gathering, the request plus its author
#[derive(Debug, Clone)]
pub struct NewGatheringDTO {
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub participant_max_number: i32,
    pub gathering_time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub image_urls: Vec<String>,
}

impl NewGatheringDTO {
    pub fn new(author_id: i64, request: CreateGatheringDTO) -> Self {
        Self {
            author_id,
            title: request.title,
            content: request.content,
            participant_max_number: request.participant_max_number,
            gathering_time: request.gathering_time,
            latitude: request.latitude,
            longitude: request.longitude,
            address: request.address,
            image_urls: request.image_urls,
        }
    }
}

/// Body of POST /gathering/delete
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeleteGatheringDTO {
    pub post_id: i64,
}

/// Body of POST /gathering/update
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct UpdateGatheringAmountDTO {
    pub post_id: i64,

    #[validate(range(min = 2, max = 100, message = "Participants must be between 2 and 100"))]
    pub participant_max_number: i32,

    #[serde(default)]
    #[validate(length(max = 5, message = "At most 5 images per gathering"))]
    pub image_urls: Vec<String>,
}

/// Body of PUT /gathering/status-decision
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DecidePendingStatusDTO {
    pub post_id: i64,
    /// `true` to run the gathering with the current participants, `false` to cancel it
    pub proceed: bool,
}

/// Response of GET /gathering/{post_id}
#[derive(Serialize, Deserialize, Debug)]
pub struct GatheringDetailResponse {
    pub post_id: i64,
    pub title: String,
    pub content: String,
    pub image_urls: Vec<String>,
    pub participant_max_number: i32,
    pub enrolled_count: i64,
    pub gathering_time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub status: GatheringStatus,
    pub created_at: DateTime<Utc>,
    pub author: EnrollmentData,
    pub is_author: bool,
    pub is_enrolled: bool,
    pub participants: Vec<EnrollmentData>,
}

impl GatheringDetailResponse {
    pub fn new(
        gathering: Gathering,
        author: Member,
        viewer_id: i64,
        is_enrolled: bool,
        participants: Vec<EnrollmentData>,
    ) -> Self {
        Self {
            post_id: gathering.gathering_id,
            is_author: gathering.is_author(viewer_id),
            title: gathering.title,
            content: gathering.content,
            image_urls: gathering.image_urls.0,
            participant_max_number: gathering.participant_max_number,
            enrolled_count: participants.len() as i64,
            gathering_time: gathering.gathering_time,
            latitude: gathering.latitude,
            longitude: gathering.longitude,
            address: gathering.address,
            status: gathering.status,
            created_at: gathering.created_at,
            author: author.into(),
            is_enrolled,
            participants,
        }
    }
}

/// One entry of GET /gathering/spot/{latitude}/{longitude}
#[derive(Serialize, Deserialize, Debug)]
pub struct GatheringNearSpotDTO {
    pub post_id: i64,
    pub title: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
    pub participant_max_number: i32,
    pub enrolled_count: i64,
    pub gathering_time: DateTime<Utc>,
    pub status: GatheringStatus,
    pub thumbnail_url: Option<String>,
}

impl GatheringNearSpotDTO {
    pub fn new(gathering: Gathering, distance_km: f64, enrolled_count: i64) -> Self {
        Self {
            post_id: gathering.gathering_id,
            thumbnail_url: gathering.image_urls.0.into_iter().next(),
            title: gathering.title,
            address: gathering.address,
            latitude: gathering.latitude,
            longitude: gathering.longitude,
            distance_km,
            participant_max_number: gathering.participant_max_number,
            enrolled_count,
            gathering_time: gathering.gathering_time,
            status: gathering.status,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct GatheringsNearSpotResponse {
    pub gatherings: Vec<GatheringNearSpotDTO>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateGatheringDTO {
        CreateGatheringDTO {
            title: "Han river plogging".to_string(),
            content: "Meet at the bike rental".to_string(),
            participant_max_number: 4,
            gathering_time: Utc::now(),
            latitude: 37.52,
            longitude: 126.93,
            address: "Yeouido Park".to_string(),
            image_urls: vec![],
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_single_participant() {
        let mut body = request();
        body.participant_max_number = 1;
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_out_of_range_coordinates() {
        let mut body = request();
        body.latitude = 91.0;
        assert!(body.validate().is_err());

        let mut body = request();
        body.longitude = -181.0;
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_too_many_images() {
        let mut body = request();
        body.image_urls = (0..6).map(|i| format!("https://img.plogging.test/{i}.png")).collect();
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_image_urls_default_to_empty() {
        let body: CreateGatheringDTO = serde_json::from_value(serde_json::json!({
            "title": "t",
            "content": "",
            "participant_max_number": 3,
            "gathering_time": "2025-07-01T07:00:00Z",
            "latitude": 37.5,
            "longitude": 127.0,
            "address": "somewhere"
        }))
        .unwrap();
        assert!(body.image_urls.is_empty());
    }
}
