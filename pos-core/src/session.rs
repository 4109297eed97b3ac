//! Staff session
//!
//! Login checks the staff record in the remote store and caches it locally
//! so a relaunch can restore the session offline. The resulting [`Session`]
//! is an explicit context object handed to checkout; nothing reads shared
//! storage behind the scenes.

use crate::media::MediaStore;
use crate::store::{LocalCache, RemoteStore, paths};
use serde_json::json;
use shared::{AppError, AppResult, Staff, StaffUpdate};
use std::sync::Arc;

/// Authenticated staff context
#[derive(Debug, Clone)]
pub struct Session {
    staff: Staff,
}

impl Session {
    pub fn new(staff: Staff) -> Self {
        Self { staff }
    }

    pub fn staff(&self) -> &Staff {
        &self.staff
    }

    pub fn staff_name(&self) -> &str {
        &self.staff.name
    }
}

/// Login, restore and profile maintenance
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn RemoteStore>,
    cache: LocalCache,
    media: Arc<dyn MediaStore>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn RemoteStore>, cache: LocalCache, media: Arc<dyn MediaStore>) -> Self {
        Self {
            store,
            cache,
            media,
        }
    }

    /// Check credentials against the staff record and open a session
    ///
    /// All three fields must match. The error never says which one did not.
    pub async fn login(&self, staff_id: &str, email: &str, password: &str) -> AppResult<Session> {
        let Some(value) = self.store.get(&paths::staff(staff_id)).await? else {
            return Err(AppError::invalid_credentials());
        };
        let staff: Staff = serde_json::from_value(value)
            .map_err(|e| AppError::internal(format!("malformed staff record: {e}")))?;

        if staff.email != email || staff.password != password {
            return Err(AppError::invalid_credentials());
        }

        self.cache.set(paths::CACHE_STAFF_INFO, &json!(staff))?;
        tracing::info!(staff = %staff.name, "staff logged in");
        Ok(Session { staff })
    }

    /// Rebuild the session from the device cache after a relaunch
    pub fn restore(&self) -> AppResult<Option<Session>> {
        let Some(value) = self.cache.get(paths::CACHE_STAFF_INFO)? else {
            return Ok(None);
        };
        let staff: Staff = serde_json::from_value(value)
            .map_err(|e| AppError::cache(format!("malformed cached session: {e}")))?;
        Ok(Some(Session { staff }))
    }

    /// Drop the cached session
    pub fn logout(&self) -> AppResult<()> {
        self.cache.remove(paths::CACHE_STAFF_INFO)?;
        Ok(())
    }

    /// Apply a profile edit and re-cache the record
    pub fn update_profile(&self, session: &mut Session, update: StaffUpdate) -> AppResult<()> {
        session.staff.apply(update);
        self.cache.set(paths::CACHE_STAFF_INFO, &json!(session.staff))?;
        Ok(())
    }

    /// Upload a new profile photo and store its URL on the cached record
    pub async fn update_photo(&self, session: &mut Session, bytes: &[u8]) -> AppResult<String> {
        let url = self.media.upload(&session.staff.name, bytes).await?;
        session.staff.image_url = Some(url.clone());
        self.cache.set(paths::CACHE_STAFF_INFO, &json!(session.staff))?;
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::FsMediaStore;
    use crate::store::MemoryStore;
    use shared::ErrorCode;

    fn staff_value() -> serde_json::Value {
        json!({
            "id": "s1",
            "name": "Leo",
            "email": "leo@cafe.ph",
            "password": "secret",
            "role": "Cashier",
            "phone": "0917",
            "age": "24",
            "birthday": {"Date": "7", "Month": "3", "Year": "2000"},
        })
    }

    async fn manager() -> (tempfile::TempDir, Arc<MemoryStore>, SessionManager) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        store.set(&paths::staff("s1"), staff_value()).await.unwrap();
        let cache = LocalCache::open(dir.path().join("cache.redb")).unwrap();
        let media = Arc::new(FsMediaStore::new(dir.path().join("images")));
        let manager = SessionManager::new(store.clone(), cache, media);
        (dir, store, manager)
    }

    #[tokio::test]
    async fn login_and_restore_round_trip() {
        let (_dir, _store, manager) = manager().await;

        let session = manager.login("s1", "leo@cafe.ph", "secret").await.unwrap();
        assert_eq!(session.staff_name(), "Leo");

        let restored = manager.restore().unwrap().unwrap();
        assert_eq!(restored.staff(), session.staff());

        manager.logout().unwrap();
        assert!(manager.restore().unwrap().is_none());
    }

    #[tokio::test]
    async fn any_field_mismatch_is_invalid_credentials() {
        let (_dir, _store, manager) = manager().await;

        for (id, email, password) in [
            ("nope", "leo@cafe.ph", "secret"),
            ("s1", "other@cafe.ph", "secret"),
            ("s1", "leo@cafe.ph", "wrong"),
        ] {
            let err = manager.login(id, email, password).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidCredentials);
        }
    }

    #[tokio::test]
    async fn profile_edits_re_cache() {
        let (_dir, _store, manager) = manager().await;
        let mut session = manager.login("s1", "leo@cafe.ph", "secret").await.unwrap();

        manager
            .update_profile(
                &mut session,
                StaffUpdate {
                    phone: Some("0999".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        let restored = manager.restore().unwrap().unwrap();
        assert_eq!(restored.staff().phone, "0999");
    }

    #[tokio::test]
    async fn photo_upload_lands_on_the_record() {
        let (_dir, _store, manager) = manager().await;
        let mut session = manager.login("s1", "leo@cafe.ph", "secret").await.unwrap();

        let url = manager.update_photo(&mut session, b"img").await.unwrap();
        assert_eq!(session.staff().image_url.as_deref(), Some(url.as_str()));
    }
}
