//! EnrollmentRepository - enrollments table

use super::Create;
use crate::dtos::NewEnrollmentDTO;
use crate::entities::Enrollment;
use chrono::{SubsecRound, Utc};
use sqlx::{Error, MySql, MySqlConnection, QueryBuilder};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct EnrollmentRepository;

impl EnrollmentRepository {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self, conn), fields(post_id = %post_id, member_id = %member_id))]
    pub async fn exists_by_post_id_and_member_id(
        &self,
        conn: &mut MySqlConnection,
        post_id: &i64,
        member_id: &i64,
    ) -> Result<bool, Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM enrollments WHERE post_id = ? AND member_id = ?",
        )
        .bind(post_id)
        .bind(member_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(count > 0)
    }

    #[instrument(skip(self, conn), fields(post_id = %post_id))]
    pub async fn count_by_post_id(
        &self,
        conn: &mut MySqlConnection,
        post_id: &i64,
    ) -> Result<i64, Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(&mut *conn)
            .await?;

        debug!("Post has {} enrollments", count);
        Ok(count)
    }

    /// Enrollment counts of several posts in one query. Posts without enrollments are absent.
    #[instrument(skip(self, conn, post_ids), fields(count = post_ids.len()))]
    pub async fn count_by_post_ids(
        &self,
        conn: &mut MySqlConnection,
        post_ids: &[i64],
    ) -> Result<HashMap<i64, i64>, Error> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut query_builder =
            QueryBuilder::<MySql>::new("SELECT post_id, COUNT(*) FROM enrollments WHERE post_id IN (");
        let mut separated = query_builder.separated(", ");
        for id in post_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") GROUP BY post_id");

        let rows: Vec<(i64, i64)> = query_builder
            .build_query_as()
            .fetch_all(&mut *conn)
            .await?;

        Ok(rows.into_iter().collect())
    }

    /// All enrollments of a post, oldest first
    #[instrument(skip(self, conn), fields(post_id = %post_id))]
    pub async fn find_all_by_post_id(
        &self,
        conn: &mut MySqlConnection,
        post_id: &i64,
    ) -> Result<Vec<Enrollment>, Error> {
        sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT enrollment_id, member_id, post_id, created_at
            FROM enrollments
            WHERE post_id = ?
            ORDER BY created_at ASC, enrollment_id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&mut *conn)
        .await
    }
}

impl Create<Enrollment, NewEnrollmentDTO> for EnrollmentRepository {
    #[instrument(skip(self, conn, data), fields(post_id = %data.post_id, member_id = %data.member_id))]
    async fn create(
        &self,
        conn: &mut MySqlConnection,
        data: &NewEnrollmentDTO,
    ) -> Result<Enrollment, Error> {
        // DATETIME keeps whole seconds
        let now = Utc::now().trunc_subsecs(0);

        let result = sqlx::query(
            "INSERT INTO enrollments (member_id, post_id, created_at) VALUES (?, ?, ?)",
        )
        .bind(data.member_id)
        .bind(data.post_id)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        let new_id = result.last_insert_id() as i64;
        info!("Enrollment created with id {}", new_id);

        Ok(Enrollment {
            enrollment_id: new_id,
            member_id: data.member_id,
            post_id: data.post_id,
            created_at: now,
        })
    }
}
