use std::collections::HashSet;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::auth::init_data::{InitDataVerifier, Verification};
use crate::database::admins::AdminRepository;
use crate::error::ApiError;

/// A verified identity annotated with the admin decision
#[derive(Debug, Clone, Serialize)]
pub struct AdminIdentity {
    pub user_id: i64,
    pub username: String,
    pub is_admin: bool,
}

/// Decides admin privilege for a verified identity: the static allow-list
/// from config first, then the admins table. Two calling modes:
/// [`resolve`](Self::resolve) is advisory (non-admin is a normal outcome),
/// [`require_admin`](Self::require_admin) enforces.
pub struct AuthResolver {
    verifier: InitDataVerifier,
    static_admin_ids: HashSet<i64>,
}

impl AuthResolver {
    pub fn new(bot_token: Option<String>, static_admin_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            verifier: InitDataVerifier::new(bot_token),
            static_admin_ids: static_admin_ids.into_iter().collect(),
        }
    }

    /// Verify the assertion and annotate with admin status. Fails only when
    /// no identity can be established (401); non-admin callers pass through.
    pub async fn resolve(
        &self,
        init_data: Option<&str>,
        pool: &SqlitePool,
    ) -> Result<AdminIdentity, ApiError> {
        let identity = match self.verifier.verify(init_data.unwrap_or("")) {
            Verification::Verified(identity) => identity,
            Verification::Rejected(reason) => {
                tracing::debug!("init data rejected: {:?}", reason);
                return Err(ApiError::unauthorized("Authentication required"));
            }
        };

        let is_admin = self.is_admin(identity.user_id, pool).await;
        Ok(AdminIdentity {
            user_id: identity.user_id,
            username: identity.username,
            is_admin,
        })
    }

    /// Enforcing mode for write/administrative endpoints: 401 without a
    /// verifiable identity, 403 for a verified non-admin.
    pub async fn require_admin(
        &self,
        init_data: Option<&str>,
        pool: &SqlitePool,
    ) -> Result<AdminIdentity, ApiError> {
        let identity = self.resolve(init_data, pool).await?;
        if !identity.is_admin {
            tracing::warn!("admin action denied for user {}", identity.user_id);
            return Err(ApiError::forbidden("Admin required"));
        }
        Ok(identity)
    }

    async fn is_admin(&self, user_id: i64, pool: &SqlitePool) -> bool {
        if self.static_admin_ids.contains(&user_id) {
            return true;
        }
        // A missing or unreadable admins table means "no dynamic admins",
        // not a failed request
        match AdminRepository::new(pool.clone()).contains(user_id).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("admins lookup failed, treating as empty: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    const TOKEN: &str = "1234567890:TEST_TOKEN_abc";

    fn signed_init(user_id: i64) -> String {
        let user = format!(
            "%7B%22id%22%3A{}%2C%22username%22%3A%22u{}%22%7D",
            user_id, user_id
        );
        testing::signed_init_data(&[("auth_date", "1700000000"), ("user", &user)], TOKEN)
    }

    fn resolver(static_ids: &[i64]) -> AuthResolver {
        AuthResolver::new(Some(TOKEN.to_string()), static_ids.iter().copied())
    }

    #[tokio::test]
    async fn static_admin_is_admin_without_store_entry() {
        let pool = testing::memory_pool().await;
        let identity = resolver(&[42])
            .resolve(Some(&signed_init(42)), &pool)
            .await
            .unwrap();
        assert!(identity.is_admin);
        assert_eq!(identity.user_id, 42);
    }

    #[tokio::test]
    async fn dynamic_admin_is_admin_without_static_entry() {
        let pool = testing::memory_pool().await;
        sqlx::query("INSERT INTO admins (user_id) VALUES (77)")
            .execute(&pool)
            .await
            .unwrap();

        let identity = resolver(&[])
            .resolve(Some(&signed_init(77)), &pool)
            .await
            .unwrap();
        assert!(identity.is_admin);
    }

    #[tokio::test]
    async fn unknown_id_is_denied_not_errored() {
        let pool = testing::memory_pool().await;
        let identity = resolver(&[1])
            .resolve(Some(&signed_init(2)), &pool)
            .await
            .unwrap();
        assert!(!identity.is_admin);
    }

    #[tokio::test]
    async fn require_admin_distinguishes_401_from_403() {
        let pool = testing::memory_pool().await;
        let resolver = resolver(&[1]);

        let unauthenticated = resolver.require_admin(Some("garbage"), &pool).await;
        assert!(matches!(unauthenticated, Err(ApiError::Unauthorized(_))));

        let missing = resolver.require_admin(None, &pool).await;
        assert!(matches!(missing, Err(ApiError::Unauthorized(_))));

        let forbidden = resolver.require_admin(Some(&signed_init(2)), &pool).await;
        assert!(matches!(forbidden, Err(ApiError::Forbidden(_))));

        let granted = resolver.require_admin(Some(&signed_init(1)), &pool).await;
        assert!(granted.is_ok());
    }

    #[tokio::test]
    async fn absent_admins_table_reads_as_no_dynamic_admins() {
        let pool = testing::memory_pool().await;
        sqlx::query("DROP TABLE admins").execute(&pool).await.unwrap();

        let resolver = resolver(&[1]);

        // static entry still grants
        let identity = resolver.resolve(Some(&signed_init(1)), &pool).await.unwrap();
        assert!(identity.is_admin);

        // everyone else is a plain non-admin, not a 500
        let identity = resolver.resolve(Some(&signed_init(2)), &pool).await.unwrap();
        assert!(!identity.is_admin);
    }
}
