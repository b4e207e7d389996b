//! Entry CRUD within a single named store.
//!
//! Writes overwrite by request key. [`CacheHandle::put_all`] writes a batch
//! in one transaction so a bulk add is all-or-nothing.

use super::stores::CacheHandle;
use crate::{Error, Request, Response};
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite::{self, OptionalExtension};

/// Columns decoded by [`response_from_row`], in order.
pub(crate) const ENTRY_COLUMNS: &str = "e.response_url, e.status, e.headers_json, e.body";

/// Raw row shape for a stored response.
pub(crate) type ResponseRow = (String, i64, String, Vec<u8>);

pub(crate) fn response_from_row((url, status, headers_json, body): ResponseRow) -> Result<Response, Error> {
    let status = u16::try_from(status).map_err(|_| Error::CorruptEntry(format!("status out of range: {status}")))?;
    let headers: Vec<(String, String)> =
        serde_json::from_str(&headers_json).map_err(|e| Error::CorruptEntry(format!("headers: {e}")))?;
    Ok(Response { url, status, headers, body })
}

/// Metadata of one stored entry, without its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CachedEntry {
    pub method: String,
    pub url: String,
    pub status: u16,
    pub body_len: u64,
    pub stored_at: String,
}

fn insert_entry(
    conn: &rusqlite::Connection, cache_id: i64, request: &Request, response: &Response, stored_at: &str,
) -> Result<(), Error> {
    let headers_json =
        serde_json::to_string(&response.headers).map_err(|e| Error::InvalidInput(format!("headers: {e}")))?;
    conn.execute(
        "INSERT INTO entries (cache_id, key_hash, method, url, response_url, status, headers_json, body, stored_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(cache_id, key_hash) DO UPDATE SET
            response_url = excluded.response_url,
            status = excluded.status,
            headers_json = excluded.headers_json,
            body = excluded.body,
            stored_at = excluded.stored_at",
        params![
            cache_id,
            request.key(),
            &request.method,
            request.url.as_str(),
            &response.url,
            response.status as i64,
            headers_json,
            &response.body,
            stored_at,
        ],
    )?;
    Ok(())
}

impl CacheHandle {
    /// Store a single response, overwriting any entry for the same request.
    pub async fn put(&self, request: &Request, response: &Response) -> Result<(), Error> {
        self.put_all(vec![(request.clone(), response.clone())]).await
    }

    /// Store a batch of responses in one transaction.
    ///
    /// Either every pair is written or none is. Entries for other requests
    /// are left untouched.
    pub async fn put_all(&self, pairs: Vec<(Request, Response)>) -> Result<(), Error> {
        let cache_id = self.id;
        let stored_at = chrono::Utc::now().to_rfc3339();
        self.db
            .conn
            .call(move |conn| -> Result<(), Error> {
                let tx = conn.transaction()?;
                for (request, response) in &pairs {
                    insert_entry(&tx, cache_id, request, response, &stored_at)?;
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Look a request up in this store only.
    pub async fn match_request(&self, request: &Request) -> Result<Option<Response>, Error> {
        let cache_id = self.id;
        let key = request.key();
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM entries e WHERE e.cache_id = ?1 AND e.key_hash = ?2");
        self.db
            .conn
            .call(move |conn| -> Result<Option<Response>, Error> {
                let row: Option<ResponseRow> = conn
                    .query_row(&sql, params![cache_id, key], |row| {
                        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
                    })
                    .optional()?;
                row.map(response_from_row).transpose()
            })
            .await
            .map_err(Error::from)
    }

    /// List stored entries in insertion order.
    pub async fn keys(&self) -> Result<Vec<CachedEntry>, Error> {
        let cache_id = self.id;
        self.db
            .conn
            .call(move |conn| -> Result<Vec<CachedEntry>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT method, url, status, LENGTH(body), stored_at
                     FROM entries WHERE cache_id = ?1 ORDER BY rowid ASC",
                )?;
                let rows = stmt.query_map(params![cache_id], |row| {
                    Ok(CachedEntry {
                        method: row.get(0)?,
                        url: row.get(1)?,
                        status: row.get::<_, i64>(2)? as u16,
                        body_len: row.get::<_, i64>(3)? as u64,
                        stored_at: row.get(4)?,
                    })
                })?;
                Ok(rows.collect::<Result<Vec<_>, _>>()?)
            })
            .await
            .map_err(Error::from)
    }

    /// Remove the entry for a request. Returns false if there was none.
    pub async fn delete(&self, request: &Request) -> Result<bool, Error> {
        let cache_id = self.id;
        let key = request.key();
        self.db
            .conn
            .call(move |conn| -> Result<bool, Error> {
                let deleted =
                    conn.execute("DELETE FROM entries WHERE cache_id = ?1 AND key_hash = ?2", params![cache_id, key])?;
                Ok(deleted > 0)
            })
            .await
            .map_err(Error::from)
    }
}
