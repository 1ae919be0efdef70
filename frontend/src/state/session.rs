use std::rc::Rc;

use crate::{
    api::{LoginResponse, StoredUser},
    utils::storage::{default_store, KeyValueStore, StorageError},
};

pub const TOKEN_KEY: &str = "token";
pub const USER_INFO_KEY: &str = "userInfo";

/// Credentials persisted between page loads.
///
/// Created once at start-up and shared by the HTTP client and the
/// permission resolver. [`Session::begin`] runs on login and
/// [`Session::end`] on logout or on a rejected token.
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn browser() -> Self {
        Self::new(default_store())
    }

    pub fn token(&self) -> Option<String> {
        self.store
            .get(TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// `None` when absent or not valid JSON.
    pub fn user_info(&self) -> Option<StoredUser> {
        let raw = self.store.get(USER_INFO_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                log::warn!("discarding malformed userInfo: {}", err);
                None
            }
        }
    }

    pub fn raw_user_info(&self) -> Option<String> {
        self.store.get(USER_INFO_KEY)
    }

    pub fn begin(&self, login: &LoginResponse) -> Result<(), StorageError> {
        self.store.set(TOKEN_KEY, &login.access_token)?;
        match &login.user {
            Some(user) => self.store_user(user),
            None => {
                self.store.remove(USER_INFO_KEY);
                Ok(())
            }
        }
    }

    pub fn store_user(&self, user: &StoredUser) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(user)
            .map_err(|_| StorageError::Write(USER_INFO_KEY.to_string()))?;
        self.store.set(USER_INFO_KEY, &encoded)
    }

    pub fn end(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_INFO_KEY);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
