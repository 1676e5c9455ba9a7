//! In-process HTTP session store
//!
//! Sessions are keyed by a random id carried in the `SESSION` cookie. Each
//! session holds named attributes serialized as JSON and expires after an
//! idle period.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "SESSION";

/// Attribute holding the logged-in [`shared::models::SessionUser`]
pub const USER_ATTRIBUTE: &str = "user";

struct SessionEntry {
    attributes: HashMap<String, serde_json::Value>,
    last_access: Instant,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<DashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Start an empty session and return its id
    pub fn create(&self) -> String {
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.inner.insert(
            id.clone(),
            SessionEntry {
                attributes: HashMap::new(),
                last_access: Instant::now(),
            },
        );
        id
    }

    /// Store an attribute; `false` when the session does not exist
    pub fn set_attribute<T: Serialize>(
        &self,
        session_id: &str,
        name: &str,
        value: &T,
    ) -> Result<bool, serde_json::Error> {
        let value = serde_json::to_value(value)?;
        match self.inner.get_mut(session_id) {
            Some(mut entry) => {
                entry.attributes.insert(name.to_string(), value);
                entry.last_access = Instant::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Read an attribute and refresh the idle timer.
    ///
    /// Expired sessions are dropped on access.
    pub fn get_attribute<T: DeserializeOwned>(&self, session_id: &str, name: &str) -> Option<T> {
        let value = {
            let mut entry = self.inner.get_mut(session_id)?;
            if entry.last_access.elapsed() >= self.ttl {
                None
            } else {
                entry.last_access = Instant::now();
                Some(entry.attributes.get(name).cloned())
            }
        };
        match value {
            Some(raw) => raw.and_then(|v| serde_json::from_value(v).ok()),
            None => {
                self.inner.remove(session_id);
                None
            }
        }
    }

    pub fn invalidate(&self, session_id: &str) -> bool {
        self.inner.remove(session_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Remove idle sessions, returning how many were dropped
    pub fn cleanup(&self) -> usize {
        let before = self.inner.len();
        let ttl = self.ttl;
        self.inner.retain(|_, entry| entry.last_access.elapsed() < ttl);
        before.saturating_sub(self.inner.len())
    }
}

fn cookie_attributes(secure: bool) -> &'static str {
    if secure {
        "Path=/; HttpOnly; SameSite=Lax; Secure"
    } else {
        "Path=/; HttpOnly; SameSite=Lax"
    }
}

/// `Set-Cookie` value for a session id. `secure` adds the `Secure` flag.
pub fn session_cookie(session_id: &str, secure: bool) -> String {
    format!("{SESSION_COOKIE}={session_id}; {}", cookie_attributes(secure))
}

/// `Set-Cookie` value that clears the session cookie
pub fn expired_session_cookie(secure: bool) -> String {
    format!("{SESSION_COOKIE}=; {}; Max-Age=0", cookie_attributes(secure))
}

/// Session id from a `Cookie` request header value
pub fn session_id_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
    })
}
