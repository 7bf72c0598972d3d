use serde::{ Serialize, Deserialize };
use serde_json::{ json, Value as JsonValue };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A turn the server writes itself. Turns coming from the browser are relayed
/// as raw JSON and never pass through this type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    /// The wire form sent in a completions `messages` array.
    pub fn into_message(self) -> JsonValue {
        json!({ "role": self.role, "content": self.content })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub content: String,
}
