//! MemberService - member profile mutations

use super::DomainError;
use crate::entities::Member;
use crate::repositories::{MemberRepository, Read};
use sqlx::MySqlConnection;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Default)]
pub struct MemberService {
    members: MemberRepository,
}

impl MemberService {
    pub fn new(members: MemberRepository) -> Self {
        Self { members }
    }

    #[instrument(skip(self, conn), fields(member_id = %member_id))]
    pub async fn find_member(
        &self,
        conn: &mut MySqlConnection,
        member_id: i64,
    ) -> Result<Member, DomainError> {
        self.members
            .read(conn, &member_id)
            .await?
            .ok_or_else(|| {
                warn!("Member not found");
                DomainError::MemberNotFound(member_id)
            })
    }

    #[instrument(skip(self, conn, member), fields(member_id = %member.member_id))]
    pub async fn update_nickname(
        &self,
        conn: &mut MySqlConnection,
        member: &Member,
        nickname: &str,
    ) -> Result<(), DomainError> {
        debug!("Updating nickname from {} to {}", member.nickname, nickname);
        self.members
            .update_nickname(conn, &member.member_id, nickname)
            .await
            .map_err(|err| match err {
                sqlx::Error::RowNotFound => DomainError::MemberNotFound(member.member_id),
                other => other.into(),
            })?;
        info!("Nickname updated");
        Ok(())
    }

    #[instrument(skip(self, conn, member), fields(member_id = %member.member_id))]
    pub async fn update_profile_image(
        &self,
        conn: &mut MySqlConnection,
        member: &Member,
        profile_image_url: &str,
    ) -> Result<(), DomainError> {
        self.members
            .update_profile_image(conn, &member.member_id, profile_image_url)
            .await
            .map_err(|err| match err {
                sqlx::Error::RowNotFound => DomainError::MemberNotFound(member.member_id),
                other => other.into(),
            })?;
        info!("Profile image updated");
        Ok(())
    }
}
