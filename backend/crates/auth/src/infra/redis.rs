//! Redis Pending-State Cache Implementation
//!
//! Pending registrations and resets are JSON payloads under prefixed
//! keys with a server-side TTL; Redis owns expiry, so nothing here ever
//! sweeps. Every read goes to the store.

use redis::aio::ConnectionManager;

use crate::domain::entity::pending::{PendingRegistration, PendingReset};
use crate::domain::repository::PendingStore;
use crate::domain::value_object::{Email, OtpCode};
use crate::error::{AuthError, AuthResult};
use std::time::Duration;

const REGISTRATION_PREFIX: &str = "pending_reg";
const RESET_PREFIX: &str = "pending_reset";

/// Redis-backed pending-state cache
#[derive(Clone)]
pub struct RedisPendingStore {
    conn: ConnectionManager,
}

impl RedisPendingStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    fn registration_key(code: &OtpCode) -> String {
        format!("{REGISTRATION_PREFIX}:{}", code.as_str())
    }

    fn reset_key(email: &Email) -> String {
        format!("{RESET_PREFIX}:{}", email.as_str())
    }
}

fn cache_err(context: &str, err: impl std::fmt::Display) -> AuthError {
    AuthError::Cache(format!("{context}: {err}"))
}

impl PendingStore for RedisPendingStore {
    async fn put_registration_if_absent(
        &self,
        pending: &PendingRegistration,
        ttl: Duration,
    ) -> AuthResult<bool> {
        let payload = serde_json::to_string(pending)
            .map_err(|e| cache_err("serialize pending registration", e))?;

        // SET NX EX: claims the code only if it is free. The reply is
        // nil when the key already exists.
        let mut conn = self.conn.clone();
        let reply: Option<String> = redis::cmd("SET")
            .arg(Self::registration_key(&pending.code))
            .arg(payload)
            .arg("NX")
            .arg("EX")
            .arg(ttl.as_secs())
            .query_async(&mut conn)
            .await
            .map_err(|e| cache_err("store pending registration", e))?;

        Ok(reply.is_some())
    }

    async fn get_registration(&self, code: &OtpCode) -> AuthResult<Option<PendingRegistration>> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = redis::cmd("GET")
            .arg(Self::registration_key(code))
            .query_async(&mut conn)
            .await
            .map_err(|e| cache_err("fetch pending registration", e))?;

        payload
            .map(|p| serde_json::from_str(&p))
            .transpose()
            .map_err(|e| cache_err("decode pending registration", e))
    }

    async fn delete_registration(&self, code: &OtpCode) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        redis::cmd("DEL")
            .arg(Self::registration_key(code))
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| cache_err("delete pending registration", e))?;

        Ok(())
    }

    async fn put_reset(&self, pending: &PendingReset, ttl: Duration) -> AuthResult<()> {
        let payload = serde_json::to_string(pending)
            .map_err(|e| cache_err("serialize pending reset", e))?;

        // Plain SETEX: a re-request replaces the previous code.
        let mut conn = self.conn.clone();
        redis::cmd("SETEX")
            .arg(Self::reset_key(&pending.email))
            .arg(ttl.as_secs())
            .arg(payload)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| cache_err("store pending reset", e))?;

        Ok(())
    }

    async fn get_reset(&self, email: &Email) -> AuthResult<Option<PendingReset>> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = redis::cmd("GET")
            .arg(Self::reset_key(email))
            .query_async(&mut conn)
            .await
            .map_err(|e| cache_err("fetch pending reset", e))?;

        payload
            .map(|p| serde_json::from_str(&p))
            .transpose()
            .map_err(|e| cache_err("decode pending reset", e))
    }

    async fn delete_reset(&self, email: &Email) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        redis::cmd("DEL")
            .arg(Self::reset_key(email))
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| cache_err("delete pending reset", e))?;

        Ok(())
    }
}
