//! Use cases - one struct per application operation
//!
//! Each use case is one unit of work: it opens a transaction on the pool, calls the
//! domain services and commits. An early `?` drops the transaction, which rolls it back.

pub mod enrollment;
pub mod gathering;
pub mod member;

pub use enrollment::{EnrollGatheringUseCase, GetEnrolledCountUseCase, GetEnrollmentListUseCase};
pub use gathering::{
    CreateGatheringUseCase, DecidePendingPostStatusUseCase, FinishGatheringUseCase,
    GetGatheringDataUseCase, GetGatheringsNearSpotUseCase, UpdateGatheringAmountUseCase,
    UpdatePostStatusAsDeletedUseCase,
};
pub use member::{
    GetMemberProfileUseCase, UpdateMemberNicknameUseCase, UpdateMemberProfileImageUseCase,
};
