// Chat sessions with the nutrition assistant. Sending a message returns
// the assistant's reply.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{timestamp, ApiRequest};
use crate::error::Result;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NewSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub session_id: i64,
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: i64,
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub message_count: Option<i64>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Option<i64>,
    pub session_id: Option<i64>,
    /// `user` or `assistant`.
    pub role: Option<String>,
    pub content: String,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<NaiveDateTime>,
}

/// # Errors
///
/// Only on body serialization failure.
pub fn create_session(data: &NewSession) -> Result<ApiRequest<ChatSession>> {
    ApiRequest::post("/api/chat/sessions").json(data)
}

pub fn list_sessions() -> ApiRequest<Vec<ChatSession>> {
    ApiRequest::get("/api/chat/sessions")
}

pub fn get_session(session_id: i64) -> ApiRequest<ChatSession> {
    ApiRequest::get(format!("/api/chat/sessions/{session_id}"))
}

pub fn get_messages(session_id: i64) -> ApiRequest<Vec<ChatMessage>> {
    ApiRequest::get("/api/chat/messages").query("sessionId", session_id)
}

/// # Errors
///
/// Only on body serialization failure.
pub fn send_message(payload: &NewMessage) -> Result<ApiRequest<ChatMessage>> {
    ApiRequest::post("/api/chat/messages").json(payload)
}

/// The chat backend answers with either `null` or a boolean here.
pub fn delete_session(session_id: i64) -> ApiRequest<Value> {
    ApiRequest::delete(format!("/api/chat/sessions/{session_id}"))
}
