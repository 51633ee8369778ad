use crate::constants::constants::SPLIT_TOLERANCE;
use crate::core::errors::SplitchatError;
use crate::core::models::split_bill::{SplitBill, SplitType};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

/// One participant's intended share when creating a bill.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ParticipantShare {
    pub user_id: String,
    pub amount: f64,
}

/// Validated input for constructing a `SplitBill`.
#[derive(Clone, Debug)]
pub struct CreateSplitBillParams {
    pub description: String,
    pub total_amount: f64,
    pub participants: Vec<ParticipantShare>,
    pub split_type: Option<SplitType>,
    pub category: Option<String>,
    pub group_id: Option<String>,
}

/// Accepts or rejects bill creation input as a whole; nothing is partially
/// applied and failures are never retried.
pub fn validate_create(params: &CreateSplitBillParams) -> Result<(), SplitchatError> {
    if params.description.trim().is_empty() {
        return Err(SplitchatError::MissingDescription);
    }
    if params.total_amount <= 0.0 || !params.total_amount.is_finite() {
        return Err(SplitchatError::InvalidAmount);
    }
    if params.participants.is_empty() {
        return Err(SplitchatError::NoParticipants);
    }

    let mut seen = HashSet::new();
    for share in &params.participants {
        if share.user_id.trim().is_empty() || share.amount <= 0.0 || !share.amount.is_finite() {
            return Err(SplitchatError::InvalidParticipant(share.user_id.clone()));
        }
        // Participants are an ordered set, unique by user.
        if !seen.insert(share.user_id.as_str()) {
            return Err(SplitchatError::InvalidParticipant(share.user_id.clone()));
        }
    }

    let sum: f64 = params.participants.iter().map(|p| p.amount).sum();
    if (sum - params.total_amount).abs() > SPLIT_TOLERANCE {
        return Err(SplitchatError::AmountMismatch {
            expected: params.total_amount,
            actual: round_currency(sum),
        });
    }

    Ok(())
}

/// Equal share of `total_amount` across `participant_count` people, rounded
/// to two decimal places. `participant_count` must be non-zero.
pub fn compute_equal_share(total_amount: f64, participant_count: usize) -> f64 {
    round_currency(total_amount / participant_count as f64)
}

pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Records a participant's payment. Idempotent: repeat calls leave the bill
/// untouched, including `paid_at`.
pub fn mark_paid(bill: &mut SplitBill, user_id: &str) -> Result<(), SplitchatError> {
    let participant = bill
        .participant_mut(user_id)
        .ok_or_else(|| SplitchatError::ParticipantNotFound(user_id.to_string()))?;
    if !participant.is_paid {
        participant.is_paid = true;
        participant.paid_at = Some(Utc::now());
    }
    recompute_settled(bill);
    Ok(())
}

/// Marks a participant's share as rejected. Terminal and idempotent;
/// `rejected_at` is set on the first call only. Rejected shares drop out of
/// the settlement reduction but stay on the bill for dispute follow-up.
pub fn reject(bill: &mut SplitBill, user_id: &str) -> Result<(), SplitchatError> {
    let participant = bill
        .participant_mut(user_id)
        .ok_or_else(|| SplitchatError::ParticipantNotFound(user_id.to_string()))?;
    if !participant.is_rejected {
        participant.is_rejected = true;
        participant.rejected_at = Some(Utc::now());
    }
    recompute_settled(bill);
    Ok(())
}

fn recompute_settled(bill: &mut SplitBill) {
    bill.is_settled = bill
        .participants
        .iter()
        .filter(|p| !p.is_rejected)
        .all(|p| p.is_paid);
}
