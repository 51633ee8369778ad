use crate::constants::constants::{DEFAULT_CATEGORY, DEFAULT_DESCRIPTION};
use crate::core::models::message::CommandKind;
use crate::core::models::split_bill::SplitType;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// The amount is the first numeric token anywhere in the message, with an
// optional leading or trailing currency symbol. A digit inside the description
// ("Room 2 rent") therefore wins over a later real amount; kept as-is until
// the command grammar pins the amount to a fixed position.
static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[₹$€£¥]\s*)?(\d+(?:\.\d{1,2})?)(?:\s*[₹$€£¥])?").unwrap());

static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@(\w+)").unwrap());

static PERCENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?%").unwrap());

static CATEGORY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:category|cat):(\w+)").unwrap());

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SplitCommand {
    pub description: String,
    pub amount: f64,
    pub participants: Vec<String>,
    pub split_type: SplitType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExpenseCommand {
    pub description: String,
    pub amount: f64,
    pub category: String,
}

/// A chat message classified into a structured command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ChatCommand {
    Split(SplitCommand),
    Expense(ExpenseCommand),
    Predict,
    Summary,
    Unknown,
}

impl ChatCommand {
    pub fn kind(&self) -> Option<CommandKind> {
        match self {
            ChatCommand::Split(_) => Some(CommandKind::Split),
            ChatCommand::Expense(_) => Some(CommandKind::Expense),
            ChatCommand::Predict => Some(CommandKind::Predict),
            ChatCommand::Summary => Some(CommandKind::Summary),
            ChatCommand::Unknown => None,
        }
    }
}

/// Classifies a raw chat message. Total over arbitrary input: anything that
/// is not a well-formed command comes back as `ChatCommand::Unknown`.
///
/// Prefixes are matched case-insensitively on the trimmed message, in order:
/// `@split`, `@addexpense`, `@predict`, `@summary`.
pub fn parse(message: &str) -> ChatCommand {
    let trimmed = message.trim();
    let lower = trimmed.to_lowercase();

    if lower.starts_with("@split") {
        parse_split(trimmed)
    } else if lower.starts_with("@addexpense") {
        parse_expense(trimmed)
    } else if lower.starts_with("@predict") {
        ChatCommand::Predict
    } else if lower.starts_with("@summary") {
        ChatCommand::Summary
    } else {
        ChatCommand::Unknown
    }
}

fn parse_split(message: &str) -> ChatCommand {
    let description = second_token(message).unwrap_or(DEFAULT_DESCRIPTION).to_string();
    let amount = extract_amount(message);

    if description.trim().is_empty() || amount <= 0.0 {
        return ChatCommand::Unknown;
    }

    let participants = extract_mentions(message);
    // One percentage token per participant plus one for the payer flags a
    // percentage split; the grammar carries no per-person values, only counts.
    let split_type = if PERCENT_RE.find_iter(message).count() == participants.len() + 1 {
        SplitType::Percentage
    } else {
        SplitType::Equal
    };

    ChatCommand::Split(SplitCommand {
        description,
        amount,
        participants,
        split_type,
    })
}

fn parse_expense(message: &str) -> ChatCommand {
    let description = second_token(message).unwrap_or(DEFAULT_DESCRIPTION).to_string();
    let amount = extract_amount(message);

    if description.trim().is_empty() || amount <= 0.0 {
        return ChatCommand::Unknown;
    }

    let category = CATEGORY_RE
        .captures(message)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    ChatCommand::Expense(ExpenseCommand {
        description,
        amount,
        category,
    })
}

fn second_token(message: &str) -> Option<&str> {
    message.split_whitespace().nth(1)
}

fn extract_amount(message: &str) -> f64 {
    AMOUNT_RE
        .captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Every `@word` token in order, `@` stripped, except the literal `@split`
/// command token itself. Duplicates are preserved.
fn extract_mentions(message: &str) -> Vec<String> {
    MENTION_RE
        .captures_iter(message)
        .filter(|c| !c[0].eq_ignore_ascii_case("@split"))
        .map(|c| c[1].to_string())
        .collect()
}
