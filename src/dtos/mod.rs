//! DTOs module - Data Transfer Objects
//!
//! Wire shapes of the HTTP API and the input structs of the repositories.
//! DTOs keep the external representation apart from the entities.

pub mod enrollment;
pub mod gathering;
pub mod member;

pub use enrollment::{EnrolledCountDTO, EnrollmentData, NewEnrollmentDTO};
pub use gathering::{
    CreateGatheringDTO, DecidePendingStatusDTO, DeleteGatheringDTO, GatheringDetailResponse,
    GatheringNearSpotDTO, GatheringsNearSpotResponse, NewGatheringDTO, UpdateGatheringAmountDTO,
};
pub use member::{MemberProfileDTO, UpdateNicknameDTO, UpdateProfileImageDTO};
