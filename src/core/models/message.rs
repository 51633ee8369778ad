use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which chat command a stored message carried, if any.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Split,
    Expense,
    Predict,
    Summary,
}

/// A chat message, either in a group or between two users.
/// Exactly one of `group_id` and `recipient_id` is set.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub group_id: Option<String>,
    pub recipient_id: Option<String>,
    pub content: String,
    pub command: Option<CommandKind>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub sent_at: chrono::DateTime<chrono::Utc>,
}
