//! MemberRepository - members table

use super::{Read, ReadMany};
use crate::entities::Member;
use sqlx::{Error, MySql, MySqlConnection, QueryBuilder};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct MemberRepository;

impl MemberRepository {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self, conn), fields(member_id = %member_id))]
    pub async fn update_nickname(
        &self,
        conn: &mut MySqlConnection,
        member_id: &i64,
        nickname: &str,
    ) -> Result<(), Error> {
        debug!("Updating nickname");
        let result = sqlx::query("UPDATE members SET nickname = ? WHERE member_id = ?")
            .bind(nickname)
            .bind(member_id)
            .execute(&mut *conn)
            .await?;

        // MySQL reports 0 affected rows when the value does not change, so only a
        // missing row is treated as an error
        if result.rows_affected() == 0 && self.read(conn, member_id).await?.is_none() {
            return Err(Error::RowNotFound);
        }
        Ok(())
    }

    #[instrument(skip(self, conn), fields(member_id = %member_id))]
    pub async fn update_profile_image(
        &self,
        conn: &mut MySqlConnection,
        member_id: &i64,
        profile_image_url: &str,
    ) -> Result<(), Error> {
        debug!("Updating profile image");
        let result = sqlx::query("UPDATE members SET profile_image_url = ? WHERE member_id = ?")
            .bind(profile_image_url)
            .bind(member_id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 && self.read(conn, member_id).await?.is_none() {
            return Err(Error::RowNotFound);
        }
        Ok(())
    }
}

impl Read<Member, i64> for MemberRepository {
    #[instrument(skip(self, conn), fields(member_id = %id))]
    async fn read(&self, conn: &mut MySqlConnection, id: &i64) -> Result<Option<Member>, Error> {
        debug!("Reading member by id");
        sqlx::query_as::<_, Member>(
            r#"
            SELECT member_id, email, nickname, profile_image_url, created_at
            FROM members
            WHERE member_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }
}

impl ReadMany<Member, i64> for MemberRepository {
    #[instrument(skip(self, conn, ids), fields(count = ids.len()))]
    async fn read_many(
        &self,
        conn: &mut MySqlConnection,
        ids: &[i64],
    ) -> Result<Vec<Member>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Reading members by id list");

        let mut query_builder = QueryBuilder::<MySql>::new(
            "SELECT member_id, email, nickname, profile_image_url, created_at FROM members WHERE member_id IN (",
        );
        let mut separated = query_builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        query_builder
            .build_query_as::<Member>()
            .fetch_all(&mut *conn)
            .await
    }
}
