use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Outcome, Rejection};
use crate::models::Priority;

// -- Users --

#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(self) -> Outcome<String> {
        self.name.ok_or(Rejection::MissingArgument(vec!["name"]))
    }
}

// -- Messages --

/// Body of `POST /messages` as it arrives. Every field is optional here so
/// that absent fields can be reported together by `validate`.
#[derive(Debug, Default, Deserialize)]
pub struct NewMessageRequest {
    pub topic: Option<String>,
    pub priority: Option<Priority>,
    pub token: Option<String>,
    pub details: Option<String>,
}

/// A message submission with all required fields present.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub topic: String,
    pub priority: Priority,
    pub token: String,
    pub details: Option<String>,
}

impl NewMessageRequest {
    pub fn validate(self) -> Outcome<NewMessage> {
        let mut missing = Vec::new();
        if self.topic.is_none() {
            missing.push("topic");
        }
        if self.priority.is_none() {
            missing.push("priority");
        }
        if self.token.is_none() {
            missing.push("token");
        }

        match (self.topic, self.priority, self.token) {
            (Some(topic), Some(priority), Some(token)) => Ok(NewMessage {
                topic,
                priority,
                token,
                details: self.details,
            }),
            _ => Err(Rejection::MissingArgument(missing)),
        }
    }
}

// -- Replies --

/// The `(success, message, payload)` triple every store operation returns.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Reply<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

// -- Envelope --

pub const DEFAULT_OK_MESSAGE: &str = "request processed properly";
pub const DEFAULT_FAIL_MESSAGE: &str = "A failure occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Fail,
}

/// JSON response shape: `{"status": "ok"|"fail", "message": ..., "data"?: {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<Map<String, Value>>,
}

impl Envelope {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            message: message.into(),
            data: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            message: message.into(),
            data: None,
        }
    }

    /// Insert `key` into the data section, creating it on first use.
    pub fn append_data(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.data
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Map a store reply onto an envelope, placing the payload under `key`.
    pub fn from_reply<T: Serialize>(reply: Reply<T>, key: &str) -> serde_json::Result<Self> {
        let mut envelope = if reply.success {
            Self::ok(reply.message)
        } else {
            Self::fail(reply.message)
        };
        if let Some(data) = reply.data {
            envelope.append_data(key, serde_json::to_value(data)?);
        }
        Ok(envelope)
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::ok(DEFAULT_OK_MESSAGE)
    }
}
