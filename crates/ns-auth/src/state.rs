//! Authentication state and the persisted session snapshot

use ns_core::User;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Storage key the session snapshot lives under
pub const SESSION_STORAGE_KEY: &str = "nage_show_user_data";

/// Live session state. `is_authenticated` is the only thing the guard reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<User>,
}

impl AuthState {
    pub fn guest() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
        }
    }

    /// Restore from a snapshot; only remembered logins come back signed in.
    /// A record that does not fit [`User`] still authenticates, without a typed user.
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        if !snapshot.is_remembered() {
            return Self::guest();
        }
        Self {
            is_authenticated: true,
            user: snapshot.user(),
        }
    }

    pub fn sign_out(&mut self) {
        self.is_authenticated = false;
        self.user = None;
    }
}

/// Persisted shape: `{"user": {...}, "rememberMe": true}`.
///
/// The user record is kept as raw JSON: other writers may store ids as
/// numbers or omit fields, and only its presence decides authentication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionSnapshot {
    pub user: Option<Value>,
    pub remember_me: bool,
}

impl SessionSnapshot {
    pub fn new(user: User, remember_me: bool) -> Self {
        Self {
            user: serde_json::to_value(&user).ok(),
            remember_me,
        }
    }

    /// Snapshot holding an arbitrary user record
    pub fn with_record(user: Value, remember_me: bool) -> Self {
        Self {
            user: Some(user),
            remember_me,
        }
    }

    /// A user record is present and asked to be remembered
    pub fn is_remembered(&self) -> bool {
        self.remember_me && self.user.as_ref().is_some_and(record_present)
    }

    /// Typed view of the stored record, if it has the [`User`] shape
    pub fn user(&self) -> Option<User> {
        self.user
            .as_ref()
            .and_then(|record| serde_json::from_value(record.clone()).ok())
    }
}

/// `null`, `false`, `0` and `""` do not count as a stored user
fn record_present(record: &Value) -> bool {
    match record {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
