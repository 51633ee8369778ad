use utoipa::OpenApi;

use crate::{
    api::models::{
        AddExpenseRequest, AddMemberByEmailRequest, AddMemberRequest, BudgetStatusRequest,
        CreateGroupRequest, CreateSplitBillRequest, CreateUserRequest, DirectHistoryRequest,
        ErrorResponse, GroupHistoryRequest, GroupSplitBillsRequest, InsightsRequest,
        ListExpensesRequest, MarkPaidRequest, ParseCommandRequest, RejectBillRequest,
        RemoveMemberRequest, SendDirectMessageRequest, SendGroupMessageRequest, SetBudgetRequest,
        UserSplitBillsRequest,
    },
    core::{
        commands::{ChatCommand, ExpenseCommand, SplitCommand},
        models::{
            audit::{AppLog, GroupAudit},
            budget::Budget,
            expense::Expense,
            group::{Group, GroupMember, Role},
            message::{CommandKind, Message},
            split_bill::{Participant, SplitBill, SplitType},
            user::User,
        },
        services::{
            BudgetStatus, CategorySpending, CommandResult, SendMessageOutcome, SpendingForecast,
            SpendingSummary,
        },
        split_engine::ParticipantShare,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_user,
        super::handlers::get_user,
        super::handlers::get_user_groups,
        super::handlers::create_group,
        super::handlers::get_group,
        super::handlers::add_member_to_group,
        super::handlers::add_member_by_email,
        super::handlers::remove_member_from_group,
        super::handlers::get_group_audits,
        super::handlers::send_group_message,
        super::handlers::get_group_messages,
        super::handlers::send_direct_message,
        super::handlers::get_direct_messages,
        super::handlers::parse_command,
        super::handlers::create_split_bill,
        super::handlers::get_split_bill,
        super::handlers::mark_participant_paid,
        super::handlers::reject_split_bill,
        super::handlers::get_group_split_bills,
        super::handlers::get_user_split_bills,
        super::handlers::add_expense,
        super::handlers::get_user_expenses,
        super::handlers::set_budget,
        super::handlers::get_budget_status,
        super::handlers::get_budget_chart,
        super::handlers::get_spending_summary,
        super::handlers::get_spending_forecast,
        super::handlers::get_app_logs
    ),
    components(schemas(
        CreateUserRequest,
        CreateGroupRequest,
        AddMemberRequest,
        AddMemberByEmailRequest,
        RemoveMemberRequest,
        SendGroupMessageRequest,
        SendDirectMessageRequest,
        GroupHistoryRequest,
        DirectHistoryRequest,
        ParseCommandRequest,
        CreateSplitBillRequest,
        MarkPaidRequest,
        RejectBillRequest,
        GroupSplitBillsRequest,
        UserSplitBillsRequest,
        AddExpenseRequest,
        ListExpensesRequest,
        SetBudgetRequest,
        BudgetStatusRequest,
        InsightsRequest,
        ErrorResponse,
        User,
        Group,
        GroupMember,
        Role,
        Message,
        CommandKind,
        ChatCommand,
        SplitCommand,
        ExpenseCommand,
        ParticipantShare,
        SplitBill,
        Participant,
        SplitType,
        Expense,
        Budget,
        AppLog,
        GroupAudit,
        SendMessageOutcome,
        CommandResult,
        SpendingSummary,
        SpendingForecast,
        CategorySpending,
        BudgetStatus
    )),
    info(
        title = "Splitchat API",
        description = "API for splitting bills and tracking spending through chat commands",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
