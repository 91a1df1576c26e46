//! GatheringRepository - gatherings table

use super::{Create, Read};
use crate::domain::geo::BoundingBox;
use crate::dtos::NewGatheringDTO;
use crate::entities::{Gathering, GatheringStatus};
use chrono::{SubsecRound, Utc};
use sqlx::types::Json;
use sqlx::{Error, MySqlConnection};
use tracing::{debug, info, instrument};

const GATHERING_COLUMNS: &str = "gathering_id, author_id, title, content, participant_max_number, \
     gathering_time, latitude, longitude, address, image_urls, status, created_at";

#[derive(Debug, Clone, Copy, Default)]
pub struct GatheringRepository;

impl GatheringRepository {
    pub fn new() -> Self {
        Self
    }

    /// Reads the gathering and takes an exclusive row lock (`SELECT ... FOR UPDATE`).
    ///
    /// The lock is held until the surrounding transaction commits or rolls back, so this
    /// must run on a transaction connection to serialize anything.
    #[instrument(skip(self, conn), fields(post_id = %id))]
    pub async fn find_with_lock_by_id(
        &self,
        conn: &mut MySqlConnection,
        id: &i64,
    ) -> Result<Option<Gathering>, Error> {
        debug!("Locking gathering row");
        let query = format!("SELECT {GATHERING_COLUMNS} FROM gatherings WHERE gathering_id = ? FOR UPDATE");
        sqlx::query_as::<_, Gathering>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    #[instrument(skip(self, conn), fields(post_id = %id, status = ?status))]
    pub async fn update_status(
        &self,
        conn: &mut MySqlConnection,
        id: &i64,
        status: GatheringStatus,
    ) -> Result<(), Error> {
        let result = sqlx::query("UPDATE gatherings SET status = ? WHERE gathering_id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }
        info!("Gathering status updated");
        Ok(())
    }

    #[instrument(skip(self, conn, image_urls), fields(post_id = %id, max = %participant_max_number))]
    pub async fn update_amount(
        &self,
        conn: &mut MySqlConnection,
        id: &i64,
        participant_max_number: i32,
        image_urls: &[String],
    ) -> Result<(), Error> {
        sqlx::query(
            "UPDATE gatherings SET participant_max_number = ?, image_urls = ? WHERE gathering_id = ?",
        )
        .bind(participant_max_number)
        .bind(Json(image_urls))
        .bind(id)
        .execute(&mut *conn)
        .await?;

        info!("Gathering amount updated");
        Ok(())
    }

    /// Non-deleted gatherings whose coordinates fall inside `area`
    #[instrument(skip(self, conn))]
    pub async fn find_in_area(
        &self,
        conn: &mut MySqlConnection,
        area: &BoundingBox,
    ) -> Result<Vec<Gathering>, Error> {
        let query = format!(
            "SELECT {GATHERING_COLUMNS} FROM gatherings \
             WHERE latitude BETWEEN ? AND ? AND longitude BETWEEN ? AND ? AND status <> ?"
        );
        let gatherings = sqlx::query_as::<_, Gathering>(&query)
            .bind(area.min_latitude)
            .bind(area.max_latitude)
            .bind(area.min_longitude)
            .bind(area.max_longitude)
            .bind(GatheringStatus::Deleted.as_str())
            .fetch_all(&mut *conn)
            .await?;

        debug!("Found {} gatherings in area", gatherings.len());
        Ok(gatherings)
    }
}

impl Create<Gathering, NewGatheringDTO> for GatheringRepository {
    #[instrument(skip(self, conn, data), fields(author_id = %data.author_id))]
    async fn create(
        &self,
        conn: &mut MySqlConnection,
        data: &NewGatheringDTO,
    ) -> Result<Gathering, Error> {
        debug!("Creating new gathering");
        let now = Utc::now().trunc_subsecs(0);
        let gathering_time = data.gathering_time.trunc_subsecs(0);
        let status = GatheringStatus::Gathering;

        let result = sqlx::query(
            r#"
            INSERT INTO gatherings
                (author_id, title, content, participant_max_number, gathering_time,
                 latitude, longitude, address, image_urls, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(data.author_id)
        .bind(&data.title)
        .bind(&data.content)
        .bind(data.participant_max_number)
        .bind(gathering_time)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(&data.address)
        .bind(Json(&data.image_urls))
        .bind(status.as_str())
        .bind(now)
        .execute(&mut *conn)
        .await?;

        let new_id = result.last_insert_id() as i64;
        info!("Gathering created with id {}", new_id);

        Ok(Gathering {
            gathering_id: new_id,
            author_id: data.author_id,
            title: data.title.clone(),
            content: data.content.clone(),
            participant_max_number: data.participant_max_number,
            gathering_time,
            latitude: data.latitude,
            longitude: data.longitude,
            address: data.address.clone(),
            image_urls: Json(data.image_urls.clone()),
            status,
            created_at: now,
        })
    }
}

impl Read<Gathering, i64> for GatheringRepository {
    #[instrument(skip(self, conn), fields(post_id = %id))]
    async fn read(&self, conn: &mut MySqlConnection, id: &i64) -> Result<Option<Gathering>, Error> {
        debug!("Reading gathering by id");
        let query = format!("SELECT {GATHERING_COLUMNS} FROM gatherings WHERE gathering_id = ?");
        sqlx::query_as::<_, Gathering>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::BoundingBox;
    use sqlx::MySqlPool;

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("members", "gatherings")))]
    async fn test_read_decodes_status_and_images(pool: MySqlPool) -> sqlx::Result<()> {
        let mut conn = pool.acquire().await?;
        let repo = GatheringRepository::new();

        let first = repo.read(&mut conn, &1).await?.expect("gathering 1 exists");
        assert_eq!(first.status, GatheringStatus::Gathering);
        assert_eq!(first.participant_max_number, 2);
        assert_eq!(first.image_urls.0.len(), 2);

        let pending = repo.read(&mut conn, &3).await?.unwrap();
        assert_eq!(pending.status, GatheringStatus::GatheringPending);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("members", "gatherings")))]
    async fn test_find_with_lock_inside_transaction(pool: MySqlPool) -> sqlx::Result<()> {
        let mut tx = pool.begin().await?;
        let repo = GatheringRepository::new();

        let locked = repo.find_with_lock_by_id(&mut tx, &2).await?;
        assert_eq!(locked.map(|g| g.gathering_id), Some(2));
        assert!(repo.find_with_lock_by_id(&mut tx, &999).await?.is_none());

        tx.rollback().await?;
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("members", "gatherings")))]
    async fn test_update_status_and_amount(pool: MySqlPool) -> sqlx::Result<()> {
        let mut conn = pool.acquire().await?;
        let repo = GatheringRepository::new();

        repo.update_status(&mut conn, &1, GatheringStatus::GatheringPending)
            .await?;
        repo.update_amount(&mut conn, &2, 6, &["https://img.plogging.test/new.png".to_string()])
            .await?;

        let first = repo.read(&mut conn, &1).await?.unwrap();
        assert_eq!(first.status, GatheringStatus::GatheringPending);

        let second = repo.read(&mut conn, &2).await?.unwrap();
        assert_eq!(second.participant_max_number, 6);
        assert_eq!(second.image_urls.0, vec!["https://img.plogging.test/new.png"]);

        let missing = repo
            .update_status(&mut conn, &999, GatheringStatus::Deleted)
            .await;
        assert!(matches!(missing, Err(Error::RowNotFound)));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("members", "gatherings")))]
    async fn test_find_in_area_skips_deleted(pool: MySqlPool) -> sqlx::Result<()> {
        let mut conn = pool.acquire().await?;
        let repo = GatheringRepository::new();

        let area = BoundingBox::around(37.5665, 126.9780, 5.0);
        let mut ids: Vec<i64> = repo
            .find_in_area(&mut conn, &area)
            .await?
            .into_iter()
            .map(|g| g.gathering_id)
            .collect();
        ids.sort();

        // 4 is deleted, 5 is in Busan
        assert_eq!(ids, vec![1, 2, 3, 6]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("members")))]
    async fn test_create_starts_recruiting(pool: MySqlPool) -> sqlx::Result<()> {
        let mut conn = pool.acquire().await?;
        let repo = GatheringRepository::new();

        let created = repo
            .create(
                &mut conn,
                &NewGatheringDTO {
                    author_id: 4,
                    title: "Seoul forest".to_string(),
                    content: "".to_string(),
                    participant_max_number: 3,
                    gathering_time: Utc::now(),
                    latitude: 37.5443,
                    longitude: 127.0374,
                    address: "Seoul Forest".to_string(),
                    image_urls: vec![],
                },
            )
            .await?;

        let stored = repo.read(&mut conn, &created.gathering_id).await?.unwrap();
        assert_eq!(stored.status, GatheringStatus::Gathering);
        assert_eq!(stored.author_id, 4);
        assert_eq!(stored.gathering_time, created.gathering_time);
        Ok(())
    }
}
