//! Enrollment entity - one member applying to one gathering

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Enrollment {
    pub enrollment_id: i64,
    pub member_id: i64,
    // the gathering is called "post" on the wire and in the enrollments table
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
}
