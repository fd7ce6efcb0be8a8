//! # Session model
//!
//! A [`Session`] is either [`Session::LoggedOut`] or a complete set of
//! [`Credentials`]. There is no way to represent a half-present session: the
//! token, the user id and the role travel together or not at all.
//!
//! [`SessionStore`] is the only typed accessor over the persisted session. It
//! reads and writes three keys through a [`KeyValueStorage`] backend:
//!
//! | Key | Value |
//! |-----|-------|
//! | `token` | opaque bearer token issued by the backend |
//! | `userId` | decimal user id |
//! | `role` | `admin`, `instruktur` or `user` |
//!
//! A read that finds any key missing or unparsable yields `LoggedOut`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStorage;

pub const TOKEN_KEY: &str = "token";
pub const USER_ID_KEY: &str = "userId";
pub const ROLE_KEY: &str = "role";

/// Role granted to an account by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Instruktur,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Instruktur => "instruktur",
            Role::User => "user",
        }
    }

    /// Default landing route for this role.
    pub fn home_route(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Instruktur => "/instruktur",
            Role::User => "/",
        }
    }

    /// Human-readable label used in the dashboards.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Instruktur => "Instruktur",
            Role::User => "Pengguna",
        }
    }

    pub fn all() -> [Role; 3] {
        [Role::Admin, Role::Instruktur, Role::User]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(Role::Admin),
            "instruktur" => Ok(Role::Instruktur),
            "user" => Ok(Role::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Proof of login held by the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub user_id: i64,
    pub role: Role,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(Credentials),
}

impl Session {
    pub fn credentials(&self) -> Option<&Credentials> {
        match self {
            Session::LoggedIn(creds) => Some(creds),
            Session::LoggedOut => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::LoggedIn(_))
    }

    pub fn role(&self) -> Option<Role> {
        self.credentials().map(|c| c.role)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.credentials().map(|c| c.user_id)
    }

    pub fn token(&self) -> Option<&str> {
        self.credentials().map(|c| c.token.as_str())
    }
}

/// Typed accessor over the persisted session.
#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Overwrite the persisted session with a fresh login.
    pub fn set_session(&self, token: &str, user_id: i64, role: Role) {
        self.storage.set(TOKEN_KEY, token);
        self.storage.set(USER_ID_KEY, &user_id.to_string());
        self.storage.set(ROLE_KEY, role.as_str());
        tracing::debug!(user_id, role = %role, "session stored");
    }

    pub fn session(&self) -> Session {
        let Some(token) = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty()) else {
            return Session::LoggedOut;
        };
        let Some(user_id) = self
            .storage
            .get(USER_ID_KEY)
            .and_then(|v| v.trim().parse::<i64>().ok())
        else {
            return Session::LoggedOut;
        };
        let Some(role) = self.storage.get(ROLE_KEY).and_then(|v| v.parse::<Role>().ok()) else {
            return Session::LoggedOut;
        };
        Session::LoggedIn(Credentials {
            token,
            user_id,
            role,
        })
    }

    pub fn role(&self) -> Option<Role> {
        self.session().role()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.session().user_id()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    pub fn clear_session(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_ID_KEY);
        self.storage.remove(ROLE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    #[test]
    fn test_round_trip_and_clear() {
        let store = SessionStore::new(MemoryStorage::new());
        assert!(!store.is_authenticated());

        store.set_session("abc", 7, Role::Instruktur);
        assert_eq!(store.role(), Some(Role::Instruktur));
        assert_eq!(store.user_id(), Some(7));
        assert!(store.is_authenticated());

        store.clear_session();
        assert_eq!(store.role(), None);
        assert_eq!(store.user_id(), None);
        assert!(!store.is_authenticated());

        // Clearing twice is harmless
        store.clear_session();
        assert_eq!(store.session(), Session::LoggedOut);
    }

    #[test]
    fn test_missing_token_is_logged_out() {
        let storage = MemoryStorage::new();
        storage.set(USER_ID_KEY, "3");
        storage.set(ROLE_KEY, "admin");
        let store = SessionStore::new(storage);
        assert!(!store.is_authenticated());
        assert_eq!(store.role(), None);
    }

    #[test]
    fn test_partial_or_corrupt_values_are_logged_out() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "abc");
        storage.set(USER_ID_KEY, "not-a-number");
        storage.set(ROLE_KEY, "admin");
        let store = SessionStore::new(storage.clone());
        assert_eq!(store.session(), Session::LoggedOut);

        storage.set(USER_ID_KEY, "4");
        storage.set(ROLE_KEY, "superuser");
        assert_eq!(store.session(), Session::LoggedOut);

        storage.set(ROLE_KEY, "user");
        assert_eq!(store.role(), Some(Role::User));
    }

    #[test]
    fn test_relogin_replaces_everything() {
        let store = SessionStore::new(MemoryStorage::new());
        store.set_session("first", 1, Role::Admin);
        store.set_session("second", 2, Role::User);
        assert_eq!(
            store.session(),
            Session::LoggedIn(Credentials {
                token: "second".into(),
                user_id: 2,
                role: Role::User,
            })
        );
    }

    #[test]
    fn test_role_parsing_and_home_routes() {
        for role in Role::all() {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert_eq!(Role::Admin.home_route(), "/admin");
        assert_eq!(Role::Instruktur.home_route(), "/instruktur");
        assert_eq!(Role::User.home_route(), "/");
        assert!("guest".parse::<Role>().is_err());
    }
}
