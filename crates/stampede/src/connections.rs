//! Named connection registry.
//!
//! The registry replaces an implicit module-level default connection with
//! an explicit parameter threaded through every call: operations take a
//! `&Connections` plus an optional alias, and `None` selects
//! [`DEFAULT_CONNECTION`].

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::error::{BulkError, Result};

/// The alias selected when an operation is called without `using`.
pub const DEFAULT_CONNECTION: &str = "default";

/// A set of named connection pools.
#[derive(Debug, Clone, Default)]
pub struct Connections {
    pools: HashMap<String, SqlitePool>,
}

impl Connections {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding one pool under the default alias.
    #[must_use]
    pub fn single(pool: SqlitePool) -> Self {
        let mut connections = Self::new();
        connections.insert(DEFAULT_CONNECTION, pool);
        connections
    }

    /// Registers a pool under the given alias, replacing any previous one.
    pub fn insert(&mut self, alias: impl Into<String>, pool: SqlitePool) {
        self.pools.insert(alias.into(), pool);
    }

    /// Returns the pool for the given alias, or the default pool when the
    /// alias is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`BulkError::UnknownConnection`] when no pool is registered
    /// under the resolved alias.
    pub fn get(&self, alias: Option<&str>) -> Result<&SqlitePool> {
        let alias = alias.unwrap_or(DEFAULT_CONNECTION);
        self.pools
            .get(alias)
            .ok_or_else(|| BulkError::UnknownConnection(alias.to_string()))
    }

    /// Returns whether a pool is registered under the alias.
    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.pools.contains_key(alias)
    }
}
