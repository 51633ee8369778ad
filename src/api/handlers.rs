use crate::{
    api::models::*,
    core::{
        commands::{self, ChatCommand},
        errors::SplitchatError,
        models::{
            audit::{AppLog, GroupAudit},
            budget::Budget,
            expense::Expense,
            group::Group,
            message::Message,
            split_bill::SplitBill,
            user::User,
        },
        services::{
            BudgetStatus, SendMessageOutcome, SpendingForecast, SpendingSummary, SplitchatService,
        },
        split_engine::CreateSplitBillParams,
    },
    infrastructure::{
        cache::in_memory::InMemoryCache, logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage,
    },
    visualization::Visualization,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
};

use std::sync::Arc;

type Service = SplitchatService<InMemoryLogging, InMemoryStorage, InMemoryCache>;

// Define API routes
pub fn api_routes(service: Arc<Service>) -> Router {
    Router::new()
        .route("/users", axum::routing::post(create_user))
        .route("/users/{user_id}", axum::routing::get(get_user))
        .route("/users/{user_id}/groups", axum::routing::get(get_user_groups))
        .route("/groups", axum::routing::post(create_group))
        .route("/groups/{group_id}", axum::routing::get(get_group))
        .route("/groups/{group_id}/members", axum::routing::post(add_member_to_group))
        .route(
            "/groups/{group_id}/members/email",
            axum::routing::post(add_member_by_email),
        )
        .route(
            "/groups/{group_id}/members/remove",
            axum::routing::post(remove_member_from_group),
        )
        .route("/groups/{group_id}/audits", axum::routing::get(get_group_audits))
        .route("/messages/group", axum::routing::post(send_group_message))
        .route("/messages/group/history", axum::routing::post(get_group_messages))
        .route("/messages/direct", axum::routing::post(send_direct_message))
        .route("/messages/direct/history", axum::routing::post(get_direct_messages))
        .route("/commands/parse", axum::routing::post(parse_command))
        .route("/split-bills", axum::routing::post(create_split_bill))
        .route("/split-bills/{bill_id}", axum::routing::get(get_split_bill))
        .route(
            "/split-bills/{bill_id}/mark-paid",
            axum::routing::patch(mark_participant_paid),
        )
        .route("/split-bills/{bill_id}/reject", axum::routing::patch(reject_split_bill))
        .route("/split-bills/group", axum::routing::post(get_group_split_bills))
        .route("/split-bills/user", axum::routing::post(get_user_split_bills))
        .route("/expenses", axum::routing::post(add_expense))
        .route("/expenses/list", axum::routing::post(get_user_expenses))
        .route("/budgets", axum::routing::post(set_budget))
        .route("/budgets/status", axum::routing::post(get_budget_status))
        .route("/budgets/chart", axum::routing::post(get_budget_chart))
        .route("/insights/summary", axum::routing::post(get_spending_summary))
        .route("/insights/forecast", axum::routing::post(get_spending_forecast))
        .route("/logs", axum::routing::get(get_app_logs))
        .with_state(service)
}

// Verbs the route table above speaks; the CORS layer advertises exactly these.
pub fn cors_methods() -> [http::Method; 3] {
    [http::Method::GET, http::Method::POST, http::Method::PATCH]
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully"),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Created by user not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_user(
    State(service): State<Arc<Service>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<StatusCode, ApiError> {
    let user = User {
        id: req.id,
        name: req.name,
        email: req.email,
    };
    let created_by_user = if let Some(ref id) = req.created_by_id {
        Some(
            service
                .get_user(id)
                .await?
                .ok_or_else(|| SplitchatError::UserNotFound(id.clone()))?,
        )
    } else {
        None
    };
    service.add_user(user, created_by_user.as_ref()).await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "ID of the user to retrieve")
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_user(
    State(service): State<Arc<Service>>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = service
        .get_user(&user_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(user_id))?;
    Ok(Json(user))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/groups",
    params(
        ("user_id" = String, Path, description = "ID of the user")
    ),
    responses(
        (status = 200, description = "Groups retrieved successfully", body = Vec<Group>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_user_groups(
    State(service): State<Arc<Service>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Group>>, ApiError> {
    let groups = service.get_user_groups(&user_id).await?;
    Ok(Json(groups))
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 200, description = "Group created successfully", body = Group),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_group(
    State(service): State<Arc<Service>>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    let created_by = service
        .get_user(&req.created_by_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.created_by_id))?;
    let members = req
        .member_ids
        .into_iter()
        .map(|id| async {
            service
                .get_user(&id)
                .await?
                .ok_or_else(|| SplitchatError::UserNotFound(id))
        })
        .collect::<Vec<_>>();
    let members = futures::future::try_join_all(members).await?;
    let group = service.create_group(req.name, members, &created_by).await?;
    Ok(Json(group))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    params(
        ("group_id" = String, Path, description = "ID of the group to retrieve")
    ),
    responses(
        (status = 200, description = "Group retrieved successfully", body = Group),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_group(
    State(service): State<Arc<Service>>,
    Path(group_id): Path<String>,
) -> Result<Json<Group>, ApiError> {
    let group = service
        .get_group(&group_id)
        .await?
        .ok_or_else(|| SplitchatError::GroupNotFound(group_id))?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/members",
    request_body = AddMemberRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Member added successfully"),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Not authorized", body = ErrorResponse),
        (status = 404, description = "User or group not found", body = ErrorResponse),
        (status = 409, description = "User already a member", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn add_member_to_group(
    State(service): State<Arc<Service>>,
    Path(group_id): Path<String>,
    Json(req): Json<AddMemberRequest>,
) -> Result<StatusCode, ApiError> {
    let user = service
        .get_user(&req.user_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.user_id))?;
    let added_by = service
        .get_user(&req.added_by_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.added_by_id))?;
    service.add_member_to_group(&group_id, user, &added_by).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/members/email",
    request_body = AddMemberByEmailRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Member added successfully"),
        (status = 400, description = "Invalid email", body = ErrorResponse),
        (status = 403, description = "Not authorized", body = ErrorResponse),
        (status = 404, description = "User or group not found", body = ErrorResponse),
        (status = 409, description = "User already a member", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn add_member_by_email(
    State(service): State<Arc<Service>>,
    Path(group_id): Path<String>,
    Json(req): Json<AddMemberByEmailRequest>,
) -> Result<StatusCode, ApiError> {
    let added_by = service
        .get_user(&req.added_by_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.added_by_id))?;
    service.add_member_by_email(&group_id, &req.email, &added_by).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/members/remove",
    request_body = RemoveMemberRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Member removed successfully"),
        (status = 400, description = "Cannot remove last member", body = ErrorResponse),
        (status = 403, description = "Not authorized", body = ErrorResponse),
        (status = 404, description = "User or group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn remove_member_from_group(
    State(service): State<Arc<Service>>,
    Path(group_id): Path<String>,
    Json(req): Json<RemoveMemberRequest>,
) -> Result<StatusCode, ApiError> {
    let removed_by = service
        .get_user(&req.removed_by_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.removed_by_id))?;
    service
        .remove_member_from_group(&group_id, &req.user_id, &removed_by)
        .await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/audits",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Group audits retrieved successfully", body = Vec<GroupAudit>),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_group_audits(
    State(service): State<Arc<Service>>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<GroupAudit>>, ApiError> {
    let audits = service.get_group_audits(&group_id).await?;
    Ok(Json(audits))
}

#[utoipa::path(
    post,
    path = "/api/messages/group",
    request_body = SendGroupMessageRequest,
    responses(
        (status = 200, description = "Message sent successfully", body = SendMessageOutcome),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Sender not a group member", body = ErrorResponse),
        (status = 404, description = "User or group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn send_group_message(
    State(service): State<Arc<Service>>,
    Json(req): Json<SendGroupMessageRequest>,
) -> Result<Json<SendMessageOutcome>, ApiError> {
    let sender = service
        .get_user(&req.sender_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.sender_id))?;
    let outcome = service.send_group_message(&req.group_id, &sender, req.content).await?;
    Ok(Json(outcome))
}

#[utoipa::path(
    post,
    path = "/api/messages/group/history",
    request_body = GroupHistoryRequest,
    responses(
        (status = 200, description = "Messages retrieved successfully", body = Vec<Message>),
        (status = 403, description = "Not a group member", body = ErrorResponse),
        (status = 404, description = "User or group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_group_messages(
    State(service): State<Arc<Service>>,
    Json(req): Json<GroupHistoryRequest>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let user = service
        .get_user(&req.user_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.user_id))?;
    let messages = service.get_group_messages(&req.group_id, &user).await?;
    Ok(Json(messages))
}

#[utoipa::path(
    post,
    path = "/api/messages/direct",
    request_body = SendDirectMessageRequest,
    responses(
        (status = 200, description = "Message sent successfully", body = SendMessageOutcome),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Sender or recipient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn send_direct_message(
    State(service): State<Arc<Service>>,
    Json(req): Json<SendDirectMessageRequest>,
) -> Result<Json<SendMessageOutcome>, ApiError> {
    let sender = service
        .get_user(&req.sender_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.sender_id))?;
    let outcome = service
        .send_direct_message(&sender, &req.recipient_id, req.content)
        .await?;
    Ok(Json(outcome))
}

#[utoipa::path(
    post,
    path = "/api/messages/direct/history",
    request_body = DirectHistoryRequest,
    responses(
        (status = 200, description = "Messages retrieved successfully", body = Vec<Message>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_direct_messages(
    State(service): State<Arc<Service>>,
    Json(req): Json<DirectHistoryRequest>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let user = service
        .get_user(&req.user_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.user_id))?;
    let messages = service.get_direct_messages(&user, &req.peer_id).await?;
    Ok(Json(messages))
}

#[utoipa::path(
    post,
    path = "/api/commands/parse",
    request_body = ParseCommandRequest,
    responses(
        (status = 200, description = "Message parsed successfully", body = ChatCommand),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn parse_command(Json(req): Json<ParseCommandRequest>) -> Json<ChatCommand> {
    Json(commands::parse(&req.message))
}

#[utoipa::path(
    post,
    path = "/api/split-bills",
    request_body = CreateSplitBillRequest,
    responses(
        (status = 200, description = "Split bill created successfully", body = SplitBill),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Creator not a group member", body = ErrorResponse),
        (status = 404, description = "User or group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_split_bill(
    State(service): State<Arc<Service>>,
    Json(req): Json<CreateSplitBillRequest>,
) -> Result<Json<SplitBill>, ApiError> {
    let created_by = service
        .get_user(&req.created_by_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.created_by_id))?;
    let params = CreateSplitBillParams {
        description: req.description,
        total_amount: req.total_amount,
        participants: req.participants,
        split_type: req.split_type,
        category: req.category,
        group_id: req.group_id,
    };
    let bill = service.create_split_bill(params, &created_by).await?;
    Ok(Json(bill))
}

#[utoipa::path(
    get,
    path = "/api/split-bills/{bill_id}",
    params(
        ("bill_id" = String, Path, description = "ID of the split bill")
    ),
    responses(
        (status = 200, description = "Split bill retrieved successfully", body = SplitBill),
        (status = 404, description = "Split bill not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_split_bill(
    State(service): State<Arc<Service>>,
    Path(bill_id): Path<String>,
) -> Result<Json<SplitBill>, ApiError> {
    let bill = service
        .get_split_bill(&bill_id)
        .await?
        .ok_or_else(|| SplitchatError::SplitBillNotFound(bill_id))?;
    Ok(Json(bill))
}

#[utoipa::path(
    patch,
    path = "/api/split-bills/{bill_id}/mark-paid",
    request_body = MarkPaidRequest,
    params(
        ("bill_id" = String, Path, description = "ID of the split bill")
    ),
    responses(
        (status = 200, description = "Participant marked paid", body = SplitBill),
        (status = 403, description = "Not authorized", body = ErrorResponse),
        (status = 404, description = "Bill, participant or user not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn mark_participant_paid(
    State(service): State<Arc<Service>>,
    Path(bill_id): Path<String>,
    Json(req): Json<MarkPaidRequest>,
) -> Result<Json<SplitBill>, ApiError> {
    let marked_by = service
        .get_user(&req.marked_by_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.marked_by_id))?;
    let bill = service
        .mark_participant_paid(&bill_id, &req.participant_user_id, &marked_by)
        .await?;
    Ok(Json(bill))
}

#[utoipa::path(
    patch,
    path = "/api/split-bills/{bill_id}/reject",
    request_body = RejectBillRequest,
    params(
        ("bill_id" = String, Path, description = "ID of the split bill")
    ),
    responses(
        (status = 200, description = "Participant share rejected", body = SplitBill),
        (status = 403, description = "Not authorized", body = ErrorResponse),
        (status = 404, description = "Bill, participant or user not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn reject_split_bill(
    State(service): State<Arc<Service>>,
    Path(bill_id): Path<String>,
    Json(req): Json<RejectBillRequest>,
) -> Result<Json<SplitBill>, ApiError> {
    let rejected_by = service
        .get_user(&req.rejected_by_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.rejected_by_id))?;
    let bill = service
        .reject_split_bill(&bill_id, &req.participant_user_id, &rejected_by)
        .await?;
    Ok(Json(bill))
}

#[utoipa::path(
    post,
    path = "/api/split-bills/group",
    request_body = GroupSplitBillsRequest,
    responses(
        (status = 200, description = "Split bills retrieved successfully", body = Vec<SplitBill>),
        (status = 403, description = "Not a group member", body = ErrorResponse),
        (status = 404, description = "User or group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_group_split_bills(
    State(service): State<Arc<Service>>,
    Json(req): Json<GroupSplitBillsRequest>,
) -> Result<Json<Vec<SplitBill>>, ApiError> {
    let user = service
        .get_user(&req.user_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.user_id))?;
    let bills = service.get_group_split_bills(&req.group_id, &user).await?;
    Ok(Json(bills))
}

#[utoipa::path(
    post,
    path = "/api/split-bills/user",
    request_body = UserSplitBillsRequest,
    responses(
        (status = 200, description = "Split bills retrieved successfully", body = Vec<SplitBill>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_user_split_bills(
    State(service): State<Arc<Service>>,
    Json(req): Json<UserSplitBillsRequest>,
) -> Result<Json<Vec<SplitBill>>, ApiError> {
    let queried_by = service
        .get_user(&req.queried_by_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.queried_by_id))?;
    let bills = service.get_user_split_bills(&req.user_id, &queried_by).await?;
    Ok(Json(bills))
}

#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = AddExpenseRequest,
    responses(
        (status = 200, description = "Expense added successfully", body = Expense),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn add_expense(
    State(service): State<Arc<Service>>,
    Json(req): Json<AddExpenseRequest>,
) -> Result<Json<Expense>, ApiError> {
    let user = service
        .get_user(&req.user_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.user_id))?;
    let expense = service
        .add_expense(&user, req.description, req.amount, req.category)
        .await?;
    Ok(Json(expense))
}

#[utoipa::path(
    post,
    path = "/api/expenses/list",
    request_body = ListExpensesRequest,
    responses(
        (status = 200, description = "Expenses retrieved successfully", body = Vec<Expense>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_user_expenses(
    State(service): State<Arc<Service>>,
    Json(req): Json<ListExpensesRequest>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let queried_by = service
        .get_user(&req.queried_by_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.queried_by_id))?;
    let expenses = service.get_user_expenses(&req.user_id, &queried_by).await?;
    Ok(Json(expenses))
}

#[utoipa::path(
    post,
    path = "/api/budgets",
    request_body = SetBudgetRequest,
    responses(
        (status = 200, description = "Budget saved successfully", body = Budget),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn set_budget(
    State(service): State<Arc<Service>>,
    Json(req): Json<SetBudgetRequest>,
) -> Result<Json<Budget>, ApiError> {
    let user = service
        .get_user(&req.user_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.user_id))?;
    let budget = service.set_budget(&user, req.category, req.monthly_limit).await?;
    Ok(Json(budget))
}

#[utoipa::path(
    post,
    path = "/api/budgets/status",
    request_body = BudgetStatusRequest,
    responses(
        (status = 200, description = "Budget status retrieved successfully", body = Vec<BudgetStatus>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_budget_status(
    State(service): State<Arc<Service>>,
    Json(req): Json<BudgetStatusRequest>,
) -> Result<Json<Vec<BudgetStatus>>, ApiError> {
    let user = service
        .get_user(&req.user_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.user_id))?;
    let statuses = service.get_budget_status(&user).await?;
    Ok(Json(statuses))
}

#[utoipa::path(
    post,
    path = "/api/budgets/chart",
    request_body = BudgetStatusRequest,
    responses(
        (status = 200, description = "Budget chart generated successfully", body = Object),
        (status = 400, description = "No budgets to chart", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_budget_chart(
    State(service): State<Arc<Service>>,
    Json(req): Json<BudgetStatusRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = service
        .get_user(&req.user_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.user_id))?;
    let statuses = service.get_budget_status(&user).await?;
    let chart = Visualization::generate_budget_chart(&statuses)?;
    Ok(Json(chart))
}

#[utoipa::path(
    post,
    path = "/api/insights/summary",
    request_body = InsightsRequest,
    responses(
        (status = 200, description = "Spending summary retrieved successfully", body = SpendingSummary),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_spending_summary(
    State(service): State<Arc<Service>>,
    Json(req): Json<InsightsRequest>,
) -> Result<Json<SpendingSummary>, ApiError> {
    let queried_by = service
        .get_user(&req.queried_by_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.queried_by_id))?;
    let summary = service.spending_summary(&req.user_id, &queried_by).await?;
    Ok(Json(summary))
}

#[utoipa::path(
    post,
    path = "/api/insights/forecast",
    request_body = InsightsRequest,
    responses(
        (status = 200, description = "Spending forecast retrieved successfully", body = SpendingForecast),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_spending_forecast(
    State(service): State<Arc<Service>>,
    Json(req): Json<InsightsRequest>,
) -> Result<Json<SpendingForecast>, ApiError> {
    let queried_by = service
        .get_user(&req.queried_by_id)
        .await?
        .ok_or_else(|| SplitchatError::UserNotFound(req.queried_by_id))?;
    let forecast = service.forecast_spending(&req.user_id, &queried_by).await?;
    Ok(Json(forecast))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Application logs retrieved successfully", body = Vec<AppLog>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_app_logs(State(service): State<Arc<Service>>) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}
