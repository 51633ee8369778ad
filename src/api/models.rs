use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::SplitchatError;
use crate::core::models::split_bill::SplitType;
use crate::core::split_engine::ParticipantShare;

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_by_id: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    pub member_ids: Vec<String>,
    pub created_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub user_id: String,
    pub added_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddMemberByEmailRequest {
    pub email: String,
    pub added_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RemoveMemberRequest {
    pub user_id: String,
    pub removed_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SendGroupMessageRequest {
    pub group_id: String,
    pub sender_id: String,
    pub content: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SendDirectMessageRequest {
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
}

#[derive(Deserialize, ToSchema)]
pub struct GroupHistoryRequest {
    pub group_id: String,
    pub user_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct DirectHistoryRequest {
    pub user_id: String,
    pub peer_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ParseCommandRequest {
    pub message: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateSplitBillRequest {
    pub description: String,
    pub total_amount: f64,
    pub participants: Vec<ParticipantShare>,
    pub split_type: Option<SplitType>,
    pub category: Option<String>,
    pub group_id: Option<String>,
    pub created_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct MarkPaidRequest {
    pub participant_user_id: String,
    pub marked_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RejectBillRequest {
    pub participant_user_id: String,
    pub rejected_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct GroupSplitBillsRequest {
    pub group_id: String,
    pub user_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UserSplitBillsRequest {
    pub user_id: String,
    pub queried_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddExpenseRequest {
    pub user_id: String,
    pub description: String,
    pub amount: f64,
    pub category: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct ListExpensesRequest {
    pub user_id: String,
    pub queried_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SetBudgetRequest {
    pub user_id: String,
    pub category: String,
    pub monthly_limit: f64,
}

#[derive(Deserialize, ToSchema)]
pub struct BudgetStatusRequest {
    pub user_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct InsightsRequest {
    pub user_id: String,
    pub queried_by_id: String,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for SplitchatError to implement IntoResponse
pub struct ApiError(pub SplitchatError);

impl From<SplitchatError> for ApiError {
    fn from(err: SplitchatError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self.0 {
            SplitchatError::MissingEmail => (StatusCode::BAD_REQUEST, "Email is required".to_string()),
            SplitchatError::EmailAlreadyRegistered(email) => {
                (StatusCode::CONFLICT, format!("Email {} already registered", email))
            }
            SplitchatError::UserNotFound(id) => (StatusCode::NOT_FOUND, format!("User {} not found", id)),
            SplitchatError::GroupNotFound(id) => (StatusCode::NOT_FOUND, format!("Group {} not found", id)),
            SplitchatError::AlreadyGroupMember(id) => {
                (StatusCode::CONFLICT, format!("User {} is already a group member", id))
            }
            SplitchatError::NotGroupMember(id) => {
                (StatusCode::FORBIDDEN, format!("User {} is not a group member", id))
            }
            SplitchatError::NotGroupOwner(id) => (StatusCode::FORBIDDEN, format!("User {} is not group owner", id)),
            SplitchatError::InvalidOwnerCount(count) => {
                (StatusCode::BAD_REQUEST, format!("Invalid owner count: {}", count))
            }
            SplitchatError::OwnerCannotRemoveSelf => {
                (StatusCode::FORBIDDEN, "Owner cannot remove themselves".to_string())
            }
            SplitchatError::CannotRemoveLastMember => {
                (StatusCode::BAD_REQUEST, "Cannot remove last group member".to_string())
            }
            SplitchatError::CannotMessageSelf => {
                (StatusCode::BAD_REQUEST, "Cannot send a direct message to yourself".to_string())
            }
            SplitchatError::MissingDescription => {
                (StatusCode::BAD_REQUEST, "Split bill description is required".to_string())
            }
            SplitchatError::InvalidAmount => (
                StatusCode::BAD_REQUEST,
                "Split bill amount must be a positive number".to_string(),
            ),
            SplitchatError::NoParticipants => (
                StatusCode::BAD_REQUEST,
                "Split bill needs at least one participant".to_string(),
            ),
            SplitchatError::InvalidParticipant(id) => {
                (StatusCode::BAD_REQUEST, format!("Invalid participant {}", id))
            }
            SplitchatError::AmountMismatch { expected, actual } => (
                StatusCode::BAD_REQUEST,
                format!("Participant amounts {} do not sum to bill total {}", actual, expected),
            ),
            SplitchatError::ParticipantNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Participant {} not found on bill", id),
            ),
            SplitchatError::SplitBillNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Split bill {} not found", id))
            }
            SplitchatError::UnauthorizedBillUpdate(id) => (
                StatusCode::FORBIDDEN,
                format!("User {} is not allowed to update this bill", id),
            ),
            SplitchatError::UnknownMention(name) => (
                StatusCode::BAD_REQUEST,
                format!("Mentioned user @{} is not a group member", name),
            ),
            SplitchatError::NoSpendingData => {
                (StatusCode::BAD_REQUEST, "No spending data available".to_string())
            }
            SplitchatError::InvalidEmail(email) => (StatusCode::BAD_REQUEST, format!("Invalid email: {}", email)),
            SplitchatError::InvalidInput(field, msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid input for {}: {:?}", field, msg),
            ),
            SplitchatError::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal server error: {}", msg),
            ),
            SplitchatError::StorageError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Storage error: {}", msg))
            }
            SplitchatError::LoggingError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Logging error: {}", msg))
            }
            SplitchatError::CacheError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Cache error: {}", msg))
            }
        };
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
