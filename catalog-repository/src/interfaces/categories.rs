//! This module defines the `CategoryRepository` trait, the read-only lookup
//! that maps a category id to its display name. Categories are owned by an
//! external category-management service; this side only resolves names for
//! validation and denormalization.

use std::collections::HashMap;

use uuid::Uuid;

use crate::errors::CategoryRepositoryError;

/// A trait that defines the read-only category lookup.
#[async_trait::async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Resolves a category id to its display name.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(name))` - The category exists
    /// * `Ok(None)` - No category with that id
    async fn resolve_name(&self, id: Uuid) -> Result<Option<String>, CategoryRepositoryError>;

    /// Resolves a batch of category ids to their names in one round trip.
    ///
    /// Ids that do not resolve are simply absent from the returned map.
    async fn name_map(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, CategoryRepositoryError>;
}
