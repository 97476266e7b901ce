use std::future::Future;

use chrono::{Duration, Utc};
use tokio::sync::Mutex;

use crate::{error::Result, types::Credential};

/// Credentials are refreshed once they are this close to expiry.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Exchanges long-lived client secrets for a short-lived [`Credential`].
pub trait Authorizer: Send + Sync {
    fn authorize(&self) -> impl Future<Output = Result<Credential>> + Send;
}

/// Process-wide cache for the catalog access credential.
///
/// The check-then-refresh sequence runs while holding one async mutex, so
/// concurrent callers never race duplicate refreshes: the first caller that
/// finds the credential stale refreshes it, the others wait on the lock and
/// then observe the fresh value.
pub struct TokenManager<A> {
    authorizer: A,
    credential: Mutex<Option<Credential>>,
}

impl<A: Authorizer> TokenManager<A> {
    pub fn new(authorizer: A) -> Self {
        TokenManager {
            authorizer,
            credential: Mutex::new(None),
        }
    }

    /// Returns a credential that is not within [`EXPIRY_MARGIN_SECS`] of expiry.
    ///
    /// On a failed refresh the previous credential stays cached and the
    /// authorization error is returned. Nothing is retried.
    pub async fn get_valid_token(&self) -> Result<Credential> {
        let mut cached = self.credential.lock().await;

        if let Some(credential) = cached.as_ref() {
            if !is_expired(credential) {
                return Ok(credential.clone());
            }
        }

        tracing::debug!("refreshing catalog credential");
        let fresh = self.authorizer.authorize().await?;
        *cached = Some(fresh.clone());

        Ok(fresh)
    }

    #[cfg(test)]
    async fn current_token(&self) -> Option<Credential> {
        self.credential.lock().await.clone()
    }
}

fn is_expired(credential: &Credential) -> bool {
    Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECS) >= credential.expires_at
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::error::Error;

    struct CountingAuthorizer {
        calls: Arc<AtomicUsize>,
        lifetime_secs: i64,
        fail: bool,
    }

    impl Authorizer for CountingAuthorizer {
        async fn authorize(&self) -> Result<Credential> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail {
                return Err(Error::Authorization("token endpoint returned 500".into()));
            }
            Ok(Credential {
                token: format!("token-{}", n),
                expires_at: Utc::now() + Duration::seconds(self.lifetime_secs),
            })
        }
    }

    fn manager(lifetime_secs: i64, fail: bool) -> (TokenManager<CountingAuthorizer>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let manager = TokenManager::new(CountingAuthorizer {
            calls: Arc::clone(&calls),
            lifetime_secs,
            fail,
        });
        (manager, calls)
    }

    #[tokio::test]
    async fn long_lived_credential_is_reused() {
        let (manager, calls) = manager(3600, false);

        for _ in 0..5 {
            let credential = manager.get_valid_token().await.unwrap();
            assert_eq!(credential.token, "token-1");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn credential_inside_margin_is_refreshed() {
        let (manager, calls) = manager(30, false);

        let first = manager.get_valid_token().await.unwrap();
        let second = manager.get_valid_token().await.unwrap();

        assert_eq!(first.token, "token-1");
        assert_eq!(second.token, "token-2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_refresh_leaves_cache_untouched() {
        let (manager, calls) = manager(3600, true);

        let err = manager.get_valid_token().await.unwrap_err();

        assert!(matches!(err, Error::Authorization(_)));
        assert!(manager.current_token().await.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_refresh() {
        let (manager, calls) = manager(3600, false);
        let manager = Arc::new(manager);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move { manager.get_valid_token().await })
            })
            .collect();

        for handle in handles {
            let credential = handle.await.unwrap().unwrap();
            assert_eq!(credential.token, "token-1");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
