// Account endpoints. Login is the only write path for the session
// markers: its answer carries the token plus the user profile that gets
// stored as the `userInfo` blob.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ApiRequest;
use crate::error::Result;
use crate::session::SessionMarkers;

/// Login request payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login answer. Everything besides the token is kept as an opaque
/// profile object; the UI only reads the display name from it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoginResult {
    pub token: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl LoginResult {
    /// Name to greet the user with, falling back to the username.
    pub fn display_name(&self) -> Option<&str> {
        ["nickname", "name", "username"]
            .iter()
            .find_map(|key| self.profile.get(*key).and_then(Value::as_str))
            .filter(|s| !s.is_empty())
    }

    pub fn user_id(&self) -> Option<i64> {
        ["userId", "id"]
            .iter()
            .find_map(|key| self.profile.get(*key).and_then(Value::as_i64))
    }

    /// Session markers to persist after a successful login.
    ///
    /// # Errors
    ///
    /// Only if the profile cannot be re-serialised.
    pub fn to_markers(&self) -> Result<SessionMarkers> {
        let user_info = serde_json::to_string(&self.profile)?;
        Ok(SessionMarkers::new(Some(self.token.clone()), Some(user_info)))
    }
}

/// # Errors
///
/// Only on body serialization failure.
pub fn login(username: &str, password: &str) -> Result<ApiRequest<LoginResult>> {
    ApiRequest::post("/api/user/login").json(&LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    })
}
