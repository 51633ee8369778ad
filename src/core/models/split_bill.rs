use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    Equal,
    Custom,
    Percentage,
    Itemized,
}

/// One person's slice of a split bill. `paid_at` and `rejected_at` are set
/// exactly once, when the matching flag first flips true.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    pub user_id: String,
    pub amount: f64,
    pub is_paid: bool,
    pub is_rejected: bool,
    #[schema(value_type = Option<String>, example = "2024-06-01T12:34:56Z")]
    pub paid_at: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>)]
    pub rejected_at: Option<DateTime<Utc>>,
}

impl Participant {
    pub fn new(user_id: String, amount: f64) -> Self {
        Participant {
            user_id,
            amount,
            is_paid: false,
            is_rejected: false,
            paid_at: None,
            rejected_at: None,
        }
    }
}

/// A shared bill fronted by `created_by`. Participants owe their `amount`
/// back to the creator; `is_settled` is derived, never set directly.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SplitBill {
    pub id: String,
    pub description: String,
    pub total_amount: f64,
    pub created_by: String,
    pub group_id: Option<String>,
    pub participants: Vec<Participant>,
    pub split_type: SplitType,
    pub category: String,
    pub is_settled: bool,
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
}

impl SplitBill {
    pub fn participant(&self, user_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.user_id == user_id)
    }

    pub fn participant_mut(&mut self, user_id: &str) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.user_id == user_id)
    }
}
