//! Named store operations.
//!
//! A store is a row in `caches`; its entries cascade when it is deleted.
//! Stores are created lazily by [`CacheDb::open_cache`].

use super::connection::CacheDb;
use super::entries::{ENTRY_COLUMNS, ResponseRow, response_from_row};
use crate::{Error, Request, Response};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite::OptionalExtension;

/// Handle to one named store inside a [`CacheDb`].
#[derive(Clone, Debug)]
pub struct CacheHandle {
    pub(crate) db: CacheDb,
    pub(crate) id: i64,
    name: String,
}

impl CacheHandle {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl CacheDb {
    /// Open the named store, creating it if absent.
    pub async fn open_cache(&self, name: &str) -> Result<CacheHandle, Error> {
        if name.is_empty() {
            return Err(Error::InvalidInput("cache name cannot be empty".into()));
        }

        let owned = name.to_string();
        let created_at = chrono::Utc::now().to_rfc3339();
        let id = self
            .conn
            .call(move |conn| -> Result<i64, Error> {
                conn.execute(
                    "INSERT OR IGNORE INTO caches (name, created_at) VALUES (?1, ?2)",
                    params![owned, created_at],
                )?;
                let id = conn.query_row("SELECT id FROM caches WHERE name = ?1", params![owned], |row| row.get(0))?;
                Ok(id)
            })
            .await
            .map_err(Error::from)?;

        Ok(CacheHandle { db: self.clone(), id, name: name.to_string() })
    }

    /// Check whether a store with this name exists.
    pub async fn has_cache(&self, name: &str) -> Result<bool, Error> {
        let name = name.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let exists = conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM caches WHERE name = ?1)",
                    params![name],
                    |row| row.get(0),
                )?;
                Ok(exists)
            })
            .await
            .map_err(Error::from)
    }

    /// Names of all stores, oldest first.
    pub async fn cache_names(&self) -> Result<Vec<String>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<String>, Error> {
                let mut stmt = conn.prepare("SELECT name FROM caches ORDER BY id ASC")?;
                let names = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok(names)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete a store and all of its entries.
    ///
    /// Returns false if no store had that name.
    pub async fn delete_cache(&self, name: &str) -> Result<bool, Error> {
        let name = name.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let deleted = conn.execute("DELETE FROM caches WHERE name = ?1", params![name])?;
                Ok(deleted > 0)
            })
            .await
            .map_err(Error::from)
    }

    /// Look a request up across every store, oldest store first.
    ///
    /// Returns the first stored response; there is no freshness check.
    pub async fn match_request(&self, request: &Request) -> Result<Option<Response>, Error> {
        let key = request.key();
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM entries e
             JOIN caches c ON c.id = e.cache_id
             WHERE e.key_hash = ?1
             ORDER BY c.id ASC
             LIMIT 1"
        );
        self.conn
            .call(move |conn| -> Result<Option<Response>, Error> {
                let row: Option<ResponseRow> = conn
                    .query_row(&sql, params![key], |row| {
                        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
                    })
                    .optional()?;
                row.map(response_from_row).transpose()
            })
            .await
            .map_err(Error::from)
    }
}
