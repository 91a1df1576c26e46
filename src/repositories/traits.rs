//! Common repository traits
//!
//! This module defines generic interfaces for database operations.
//!
//! Every method receives the connection to run on instead of owning a pool, so the
//! same repository call works on a plain pooled connection or inside a transaction
//! (`&mut *tx`). The unit of work is decided by the caller.

use sqlx::MySqlConnection;

/// Trait for creating new entities in the database
///
/// # Type Parameters
/// * `Entity` - Type of the returned entity (with ID assigned by the database)
/// * `CreateDTO` - DTO for creation (without ID, will be automatically generated)
pub trait Create<Entity, CreateDTO> {
    /// Creates a new entity in the database
    ///
    /// # Returns
    /// * `Ok(Entity)` - Created entity with ID assigned by the database
    /// * `Err(sqlx::Error)` - Error during insertion
    async fn create(
        &self,
        conn: &mut MySqlConnection,
        data: &CreateDTO,
    ) -> Result<Entity, sqlx::Error>;
}

/// Trait for reading a single entity by primary key
///
/// # Type Parameters
/// * `Entity` - Type of the entity to read
/// * `Id` - Type of the primary key (e.g. `i64`)
pub trait Read<Entity, Id> {
    /// Reads an entity from the database by its primary key
    ///
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No entity with that ID
    /// * `Err(sqlx::Error)` - Error during reading
    async fn read(&self, conn: &mut MySqlConnection, id: &Id)
    -> Result<Option<Entity>, sqlx::Error>;
}

/// Trait for reading multiple entities by list of primary keys
///
/// # Type Parameters
/// * `Entity` - Type of the entities to read
/// * `Id` - Type of the primary key
pub trait ReadMany<Entity, Id> {
    /// Reads multiple entities from the database by their primary keys
    ///
    /// # Returns
    /// * `Ok(Vec<Entity>)` - Vec containing all found entities (can be empty)
    /// * `Err(sqlx::Error)` - Error during reading
    ///
    /// # Note
    /// Entities are returned in the order they are found in the database,
    /// which may not match the order of the provided IDs. Missing IDs are skipped.
    async fn read_many(
        &self,
        conn: &mut MySqlConnection,
        ids: &[Id],
    ) -> Result<Vec<Entity>, sqlx::Error>;
}
