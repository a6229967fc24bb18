// service/auth_service.rs
use redis::aio::ConnectionManager;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::{
    db::{db::DBClient, userdb::UserExt},
    models::usermodel::Profile,
    service::error::ServiceError,
    utils::otp_generator::generate_otp,
};

const OTP_TTL_SECS: u64 = 300;

/// Time-bounded, single-use OTP storage. Codes live in Redis (with a TTL)
/// when it is configured, so they survive restarts and multiple instances;
/// without Redis they fall back to a process-local map with the same expiry
/// semantics.
pub struct OtpStore {
    redis: Option<Arc<ConnectionManager>>,
    local: Mutex<HashMap<String, LocalOtp>>,
    ttl: Duration,
}

impl std::fmt::Debug for OtpStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpStore")
            .field("redis", &self.redis.is_some())
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[derive(Debug)]
struct LocalOtp {
    code: String,
    expires_at: Instant,
}

impl OtpStore {
    pub fn new(redis: Option<Arc<ConnectionManager>>) -> Self {
        Self::with_ttl(redis, Duration::from_secs(OTP_TTL_SECS))
    }

    pub fn with_ttl(redis: Option<Arc<ConnectionManager>>, ttl: Duration) -> Self {
        Self {
            redis,
            local: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn put(&self, mobile: &str, code: &str) {
        if let Some(redis) = &self.redis {
            let mut conn = ConnectionManager::clone(redis);
            let result: Result<(), redis::RedisError> = redis::cmd("SET")
                .arg(Self::key(mobile))
                .arg(code)
                .arg("EX")
                .arg(self.ttl.as_secs())
                .query_async(&mut conn)
                .await;

            match result {
                Ok(()) => return,
                Err(e) => {
                    tracing::warn!("Redis OTP write failed: {}. Using local store.", e);
                }
            }
        }

        let mut local = self.local.lock().await;
        local.retain(|_, otp| otp.expires_at > Instant::now());
        local.insert(
            mobile.to_string(),
            LocalOtp {
                code: code.to_string(),
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Check and consume in one step; a code can only be used once.
    pub async fn take(&self, mobile: &str, code: &str) -> bool {
        if let Some(redis) = &self.redis {
            let mut conn = ConnectionManager::clone(redis);
            let stored: Result<Option<String>, redis::RedisError> = redis::cmd("GET")
                .arg(Self::key(mobile))
                .query_async(&mut conn)
                .await;

            match stored {
                Ok(Some(stored)) if stored == code => {
                    let _: Result<(), redis::RedisError> = redis::cmd("DEL")
                        .arg(Self::key(mobile))
                        .query_async(&mut conn)
                        .await;
                    return true;
                }
                Ok(_) => return false,
                Err(e) => {
                    tracing::warn!("Redis OTP read failed: {}. Using local store.", e);
                }
            }
        }

        let mut local = self.local.lock().await;
        match local.get(mobile) {
            Some(otp) if otp.code == code && otp.expires_at > Instant::now() => {
                local.remove(mobile);
                true
            }
            _ => false,
        }
    }

    fn key(mobile: &str) -> String {
        format!("otp:{}", mobile)
    }
}

#[derive(Debug)]
pub struct AuthService {
    db_client: Arc<DBClient>,
    otp_store: OtpStore,
}

impl AuthService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        let otp_store = OtpStore::new(db_client.redis_client.clone());
        Self {
            db_client,
            otp_store,
        }
    }

    pub async fn send_otp(&self, mobile: &str) -> Result<(), ServiceError> {
        let otp = generate_otp();
        self.otp_store.put(mobile, &otp).await;

        // An SMS gateway would go here; codes are surfaced in the debug log
        tracing::info!("OTP sent to {}", mobile);
        tracing::debug!("OTP for {}: {}", mobile, otp);

        Ok(())
    }

    /// Verify the code and return the profile, registering a fresh one on
    /// first login.
    pub async fn verify_otp(&self, mobile: &str, otp: &str) -> Result<Profile, ServiceError> {
        if !self.otp_store.take(mobile, otp).await {
            tracing::warn!("Invalid OTP attempt for {}", mobile);
            return Err(ServiceError::InvalidOtp);
        }

        if let Some(profile) = self.db_client.get_profile_by_mobile(mobile).await? {
            return Ok(profile);
        }

        let profile = self.db_client.create_profile(mobile).await?;
        tracing::info!("Registered new profile {} for {}", profile.id, mobile);
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn a_stored_code_verifies_once() {
        let store = OtpStore::new(None);
        store.put("9876543210", "123456").await;

        assert!(store.take("9876543210", "123456").await);
        // consumed on first use
        assert!(!store.take("9876543210", "123456").await);
    }

    #[tokio::test]
    async fn a_wrong_code_is_rejected_and_not_consumed() {
        let store = OtpStore::new(None);
        store.put("9876543210", "123456").await;

        assert!(!store.take("9876543210", "654321").await);
        assert!(store.take("9876543210", "123456").await);
    }

    #[tokio::test]
    async fn an_unknown_mobile_is_rejected() {
        let store = OtpStore::new(None);
        assert!(!store.take("0000000000", "123456").await);
    }

    #[tokio::test]
    async fn an_expired_code_is_rejected() {
        let store = OtpStore::with_ttl(None, Duration::from_millis(10));
        store.put("9876543210", "123456").await;

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!store.take("9876543210", "123456").await);
    }

    #[tokio::test]
    async fn a_new_code_replaces_the_old_one() {
        let store = OtpStore::new(None);
        store.put("9876543210", "111111").await;
        store.put("9876543210", "222222").await;

        assert!(!store.take("9876543210", "111111").await);
        assert!(store.take("9876543210", "222222").await);
    }
}
