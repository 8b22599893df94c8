use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::anyhow;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::models::verification::UserType;

const AUTH_SESSION_KEY: &str = "auth.session";
const SPLASH_SEEN_KEY: &str = "splash.seen";

/// Minimal persistent key-value storage the application context reads at
/// startup and writes through on every change.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, anyhow::Error>;
    fn set(&self, key: &str, value: &str) -> Result<(), anyhow::Error>;
    fn remove(&self, key: &str) -> Result<(), anyhow::Error>;
}

/// JSON-file-backed store kept under the platform data directory.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new() -> Result<Self, anyhow::Error> {
        let dirs = ProjectDirs::from("app", "RevoVend", "revovend")
            .ok_or_else(|| anyhow!("Could not resolve a data directory."))?;
        fs::create_dir_all(dirs.data_dir())?;

        Ok(Self {
            path: dirs.data_dir().join("storage.json"),
        })
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_map(&self) -> Result<HashMap<String, String>, anyhow::Error> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), anyhow::Error> {
        fs::write(&self.path, serde_json::to_string(map)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, anyhow::Error> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), anyhow::Error> {
        let mut map = self.read_map()?;
        map.remove(key);
        self.write_map(&map)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthSession {
    pub user_id: String,
    pub token: String,
    pub user_type: UserType,
}

/// Session and onboarding state, loaded once at startup and passed by
/// reference to whatever needs it.
#[derive(Debug, Default)]
pub struct AppContext {
    auth: Option<AuthSession>,
    splash_seen: bool,
}

impl AppContext {
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, anyhow::Error> {
        let auth = match store.get(AUTH_SESSION_KEY)? {
            // A stored session that no longer parses means signed out.
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(session) => Some(session),
                Err(error) => {
                    log::warn!("Discarding stored session: {}", error);
                    None
                }
            },
            None => None,
        };
        let splash_seen = matches!(store.get(SPLASH_SEEN_KEY)?.as_deref(), Some("true"));

        Ok(Self { auth, splash_seen })
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.auth.as_ref()
    }

    pub fn splash_seen(&self) -> bool {
        self.splash_seen
    }

    pub fn sign_in(
        &mut self,
        store: &dyn KeyValueStore,
        session: AuthSession,
    ) -> Result<(), anyhow::Error> {
        store.set(AUTH_SESSION_KEY, &serde_json::to_string(&session)?)?;
        self.auth = Some(session);
        Ok(())
    }

    pub fn sign_out(&mut self, store: &dyn KeyValueStore) -> Result<(), anyhow::Error> {
        store.remove(AUTH_SESSION_KEY)?;
        self.auth = None;
        Ok(())
    }

    pub fn mark_splash_seen(&mut self, store: &dyn KeyValueStore) -> Result<(), anyhow::Error> {
        store.set(SPLASH_SEEN_KEY, "true")?;
        self.splash_seen = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        map: Mutex<HashMap<String, String>>,
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, anyhow::Error> {
            Ok(self.map.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), anyhow::Error> {
            self.map
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), anyhow::Error> {
            self.map.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn session() -> AuthSession {
        AuthSession {
            user_id: "user-1".to_string(),
            token: "token-1".to_string(),
            user_type: UserType::EventHost,
        }
    }

    #[test]
    fn fresh_store_loads_signed_out() {
        let store = MemoryStore::default();
        let context = AppContext::load(&store).unwrap();

        assert!(context.session().is_none());
        assert!(!context.splash_seen());
    }

    #[test]
    fn session_round_trips_through_the_store() {
        let store = MemoryStore::default();

        let mut context = AppContext::load(&store).unwrap();
        context.sign_in(&store, session()).unwrap();

        let reloaded = AppContext::load(&store).unwrap();
        assert_eq!(reloaded.session(), Some(&session()));
    }

    #[test]
    fn corrupt_stored_session_loads_as_signed_out() {
        let store = MemoryStore::default();
        store.set(AUTH_SESSION_KEY, "{not json").unwrap();

        let context = AppContext::load(&store).unwrap();
        assert!(context.session().is_none());
    }

    #[test]
    fn sign_out_clears_and_is_idempotent() {
        let store = MemoryStore::default();

        let mut context = AppContext::load(&store).unwrap();
        context.sign_in(&store, session()).unwrap();
        context.sign_out(&store).unwrap();
        context.sign_out(&store).unwrap();

        assert!(context.session().is_none());
        assert!(AppContext::load(&store).unwrap().session().is_none());
    }

    #[test]
    fn splash_flag_persists() {
        let store = MemoryStore::default();

        let mut context = AppContext::load(&store).unwrap();
        context.mark_splash_seen(&store).unwrap();

        assert!(AppContext::load(&store).unwrap().splash_seen());
    }
}
