use crate::config::CONFIG;
use crate::constants::constants::{
    BUDGET_SET, DEFAULT_CATEGORY, EXPENSE_ADDED, FORECAST_QUERIED, GROUP_CREATED, MEMBER_ADDED,
    MEMBER_REMOVED, MESSAGE_SENT, SPLIT_BILLS_QUERIED, SPLIT_BILL_CREATED, SPLIT_BILL_PAID,
    SPLIT_BILL_REJECTED, SUMMARY_QUERIED, USER_ADDED,
};
use crate::core::commands::{self, ChatCommand, SplitCommand};
use crate::core::errors::{FieldError, SplitchatError};
use crate::core::models::{
    audit::{AppLog, GroupAudit},
    budget::Budget,
    expense::Expense,
    group::{Group, GroupMember, Role},
    message::Message,
    split_bill::{Participant, SplitBill, SplitType},
    user::User,
};
use crate::core::split_engine::{self, CreateSplitBillParams, ParticipantShare};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct CategorySpending {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct SpendingSummary {
    pub user_id: String,
    pub total_spent: f64,
    pub expense_count: usize,
    pub by_category: Vec<CategorySpending>,
    pub top_category: Option<String>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub generated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct SpendingForecast {
    pub user_id: String,
    pub month_to_date: f64,
    pub daily_average: f64,
    pub projected_total: f64,
    pub days_elapsed: u32,
    pub days_in_month: u32,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub generated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct BudgetStatus {
    pub category: String,
    pub monthly_limit: f64,
    pub spent: f64,
    pub remaining: f64,
}

/// What a recognized chat command produced, returned alongside the stored
/// message.
#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum CommandResult {
    SplitBillCreated(SplitBill),
    ExpenseAdded(Expense),
    Summary(SpendingSummary),
    Forecast(SpendingForecast),
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct SendMessageOutcome {
    pub message: Message,
    pub command_result: Option<CommandResult>,
}

enum SplitContext<'a> {
    Group(&'a Group),
    Direct(&'a User),
}

pub struct SplitchatService<L: LoggingService, S: Storage, C: Cache> {
    storage: S,
    logging: L,
    cache: C,
}

impl<L: LoggingService, S: Storage, C: Cache> SplitchatService<L, S, C> {
    pub fn new(storage: S, logging: L, cache: C) -> Self {
        SplitchatService { storage, logging, cache }
    }

    pub async fn validate_users(&self, user_ids: &[&str]) -> Result<(), SplitchatError> {
        for &user_id in user_ids {
            if self.storage.get_user(user_id).await?.is_none() {
                return Err(SplitchatError::UserNotFound(user_id.to_string()));
            }
        }
        Ok(())
    }

    async fn validate_group_and_owner(&self, group_id: &str, owner_id: &str) -> Result<Group, SplitchatError> {
        let group = self
            .storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| SplitchatError::GroupNotFound(group_id.to_string()))?;
        if !group
            .members
            .iter()
            .any(|m| m.user.id == owner_id && m.role == Role::Owner)
        {
            return Err(SplitchatError::NotGroupOwner(owner_id.to_string()));
        }
        Ok(group)
    }

    async fn validate_group_membership(&self, group_id: &str, user_id: &str) -> Result<Group, SplitchatError> {
        let group = self
            .storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| SplitchatError::GroupNotFound(group_id.to_string()))?;
        if !group.members.iter().any(|m| m.user.id == *user_id) {
            return Err(SplitchatError::NotGroupMember(user_id.to_string()));
        }
        Ok(group)
    }

    fn validate_group_roles(&self, group: &Group) -> Result<(), SplitchatError> {
        let owner_count = group.members.iter().filter(|m| m.is_owner()).count();
        if owner_count != 1 {
            return Err(SplitchatError::InvalidOwnerCount(owner_count));
        }
        Ok(())
    }

    async fn log_and_audit(
        &self,
        group_id: Option<&str>,
        action: &str,
        log_details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), SplitchatError> {
        self.logging.log_action(action, log_details.clone(), user_id).await?;
        if let Some(gid) = group_id {
            self.storage
                .save_group_audit(GroupAudit {
                    id: Uuid::new_v4().to_string(),
                    group_id: gid.to_string(),
                    action: action.to_string(),
                    user_id: user_id.map(String::from),
                    details: serde_json::from_value(log_details).unwrap_or_default(),
                    timestamp: Utc::now(),
                })
                .await?;
        }
        Ok(())
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), SplitchatError> {
        if value.trim().is_empty() {
            return Err(SplitchatError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.len() > max_length {
            return Err(SplitchatError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(SplitchatError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} contains invalid characters", field),
                },
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<(), SplitchatError> {
        if amount <= 0.0 {
            return Err(SplitchatError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be greater than 0".to_string(),
                },
            ));
        }
        if amount > 1_000_000.0 {
            return Err(SplitchatError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Amount Too Large".to_string(),
                    description: "Amount cannot exceed 1,000,000".to_string(),
                },
            ));
        }
        if !amount.is_finite() {
            return Err(SplitchatError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be a finite number".to_string(),
                },
            ));
        }
        if ((amount * 100.0).round() - amount * 100.0).abs() > 1e-6 {
            return Err(SplitchatError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount cannot have more than 2 decimal places".to_string(),
                },
            ));
        }
        Ok(())
    }

    // USER MANAGEMENT

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, SplitchatError> {
        self.storage.get_user(user_id).await
    }

    pub async fn add_user(&self, user: User, created_by: Option<&User>) -> Result<User, SplitchatError> {
        if user.email.is_empty() {
            return Err(SplitchatError::MissingEmail);
        }
        if !user.email.contains('@') || !user.email.contains('.') || user.email.len() < 5 {
            return Err(SplitchatError::InvalidEmail(user.email.clone()));
        }
        self.validate_string_input("name", &user.name, 100)?;

        self.storage.save_user(user.clone()).await?;
        self.log_and_audit(
            None,
            USER_ADDED,
            json!({ "user_id": user.id, "name": user.name, "email": user.email }),
            created_by.map(|u| u.id.as_str()),
        )
        .await?;
        Ok(user)
    }

    // GROUP MANAGEMENT

    pub async fn create_group(
        &self,
        name: String,
        members: Vec<User>,
        created_by: &User,
    ) -> Result<Group, SplitchatError> {
        self.validate_users(&[&created_by.id]).await?;
        self.validate_string_input("name", &name, 100)?;

        let mut all_members = members;
        if !all_members.iter().any(|m| m.id == created_by.id) {
            all_members.push(created_by.clone());
        }

        self.validate_users(&all_members.iter().map(|m| m.id.as_str()).collect::<Vec<_>>())
            .await?;

        let group_members = all_members
            .into_iter()
            .map(|user| GroupMember {
                role: if user.id == created_by.id {
                    Role::Owner
                } else {
                    Role::Member
                },
                user,
            })
            .collect();

        let group = Group {
            id: Uuid::new_v4().to_string(),
            name,
            members: group_members,
            created_at: Utc::now(),
        };

        self.validate_group_roles(&group)?;
        self.storage.save_group(group.clone()).await?;

        self.log_and_audit(
            Some(&group.id),
            GROUP_CREATED,
            json!({
                "group_id": group.id,
                "name": group.name,
                "member_ids": group.members.iter().map(|m| m.user.id.clone()).collect::<Vec<_>>()
            }),
            Some(created_by.id.as_str()),
        )
        .await?;

        Ok(group)
    }

    pub async fn add_member_to_group(&self, group_id: &str, user: User, added_by: &User) -> Result<(), SplitchatError> {
        let mut group = self.validate_group_and_owner(group_id, &added_by.id).await?;
        self.validate_users(&[&user.id]).await?;

        if group.members.iter().any(|m| m.user.id == user.id) {
            return Err(SplitchatError::AlreadyGroupMember(user.id));
        }

        group.members.push(GroupMember {
            user: user.clone(),
            role: Role::Member,
        });
        self.storage.save_group(group.clone()).await?;

        self.log_and_audit(
            Some(group_id),
            MEMBER_ADDED,
            json!({ "group_id": group_id, "user_id": user.id, "name": user.name, "email": user.email }),
            Some(added_by.id.as_str()),
        )
        .await?;
        Ok(())
    }

    pub async fn add_member_by_email(&self, group_id: &str, email: &str, added_by: &User) -> Result<(), SplitchatError> {
        let user = self
            .storage
            .get_user_by_email(email)
            .await?
            .ok_or_else(|| SplitchatError::UserNotFound(email.to_string()))?;
        self.add_member_to_group(group_id, user, added_by).await
    }

    pub async fn remove_member_from_group(
        &self,
        group_id: &str,
        user_id: &str,
        removed_by: &User,
    ) -> Result<(), SplitchatError> {
        let mut group = self.validate_group_and_owner(group_id, &removed_by.id).await?;
        self.validate_users(&[user_id]).await?;

        if user_id == removed_by.id {
            return Err(SplitchatError::OwnerCannotRemoveSelf);
        }
        if group.members.len() <= 1 {
            return Err(SplitchatError::CannotRemoveLastMember);
        }

        let member = group
            .members
            .iter()
            .find(|m| m.user.id == user_id)
            .cloned()
            .ok_or_else(|| SplitchatError::NotGroupMember(user_id.to_string()))?;
        group.members.retain(|m| m.user.id != user_id);
        self.storage.save_group(group.clone()).await?;

        self.log_and_audit(
            Some(group_id),
            MEMBER_REMOVED,
            json!({ "group_id": group_id, "user_id": user_id, "name": member.user.name, "email": member.user.email }),
            Some(removed_by.id.as_str()),
        )
        .await?;
        Ok(())
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Option<Group>, SplitchatError> {
        self.storage.get_group(group_id).await
    }

    pub async fn get_user_groups(&self, user_id: &str) -> Result<Vec<Group>, SplitchatError> {
        self.validate_users(&[user_id]).await?;
        self.storage.get_user_groups(user_id).await
    }

    // MESSAGING

    /// Parses and executes any command in `content`, then stores the message.
    /// A failing command aborts the whole send; nothing is persisted.
    pub async fn send_group_message(
        &self,
        group_id: &str,
        sender: &User,
        content: String,
    ) -> Result<SendMessageOutcome, SplitchatError> {
        let group = self.validate_group_membership(group_id, &sender.id).await?;

        let command = commands::parse(&content);
        let command_result = self.run_command(&command, sender, SplitContext::Group(&group)).await?;

        let message = Message {
            id: Uuid::new_v4().to_string(),
            sender_id: sender.id.clone(),
            group_id: Some(group.id.clone()),
            recipient_id: None,
            content,
            command: command.kind(),
            sent_at: Utc::now(),
        };
        self.storage.save_message(message.clone()).await?;

        self.log_and_audit(
            Some(&group.id),
            MESSAGE_SENT,
            json!({ "message_id": message.id, "group_id": group.id, "sender_id": sender.id, "command": message.command }),
            Some(sender.id.as_str()),
        )
        .await?;

        Ok(SendMessageOutcome { message, command_result })
    }

    pub async fn send_direct_message(
        &self,
        sender: &User,
        recipient_id: &str,
        content: String,
    ) -> Result<SendMessageOutcome, SplitchatError> {
        if sender.id == recipient_id {
            return Err(SplitchatError::CannotMessageSelf);
        }
        self.validate_users(&[&sender.id]).await?;
        let recipient = self
            .storage
            .get_user(recipient_id)
            .await?
            .ok_or_else(|| SplitchatError::UserNotFound(recipient_id.to_string()))?;

        let command = commands::parse(&content);
        let command_result = self
            .run_command(&command, sender, SplitContext::Direct(&recipient))
            .await?;

        let message = Message {
            id: Uuid::new_v4().to_string(),
            sender_id: sender.id.clone(),
            group_id: None,
            recipient_id: Some(recipient.id.clone()),
            content,
            command: command.kind(),
            sent_at: Utc::now(),
        };
        self.storage.save_message(message.clone()).await?;

        self.log_and_audit(
            None,
            MESSAGE_SENT,
            json!({ "message_id": message.id, "recipient_id": recipient.id, "sender_id": sender.id, "command": message.command }),
            Some(sender.id.as_str()),
        )
        .await?;

        Ok(SendMessageOutcome { message, command_result })
    }

    pub async fn get_group_messages(&self, group_id: &str, queried_by: &User) -> Result<Vec<Message>, SplitchatError> {
        self.validate_group_membership(group_id, &queried_by.id).await?;
        self.storage.get_group_messages(group_id).await
    }

    pub async fn get_direct_messages(&self, user: &User, peer_id: &str) -> Result<Vec<Message>, SplitchatError> {
        self.validate_users(&[&user.id, peer_id]).await?;
        self.storage.get_direct_messages(&user.id, peer_id).await
    }

    async fn run_command(
        &self,
        command: &ChatCommand,
        sender: &User,
        context: SplitContext<'_>,
    ) -> Result<Option<CommandResult>, SplitchatError> {
        match command {
            ChatCommand::Split(split) => {
                let (params, settle_creator) = match context {
                    SplitContext::Group(group) => (self.group_split_params(group, sender, split)?, true),
                    SplitContext::Direct(recipient) => (direct_split_params(recipient, split), false),
                };
                let bill = self.create_split_bill_inner(params, sender, settle_creator).await?;
                Ok(Some(CommandResult::SplitBillCreated(bill)))
            }
            ChatCommand::Expense(expense) => {
                let expense = self
                    .add_expense(
                        sender,
                        expense.description.clone(),
                        expense.amount,
                        Some(expense.category.clone()),
                    )
                    .await?;
                Ok(Some(CommandResult::ExpenseAdded(expense)))
            }
            ChatCommand::Predict => {
                let forecast = self.forecast_spending(&sender.id, sender).await?;
                Ok(Some(CommandResult::Forecast(forecast)))
            }
            ChatCommand::Summary => {
                let summary = self.spending_summary(&sender.id, sender).await?;
                Ok(Some(CommandResult::Summary(summary)))
            }
            ChatCommand::Unknown => Ok(None),
        }
    }

    /// Turns a group-chat `@split` into bill params. Each mention owes an
    /// equal share of `amount / (mentions + 1)`; the sender takes the last
    /// share plus any rounding remainder, so the rows always sum to the total.
    fn group_split_params(
        &self,
        group: &Group,
        sender: &User,
        split: &SplitCommand,
    ) -> Result<CreateSplitBillParams, SplitchatError> {
        let share = split_engine::compute_equal_share(split.amount, split.participants.len() + 1);

        let mut participants = Vec::with_capacity(split.participants.len() + 1);
        for mention in &split.participants {
            let member = group
                .members
                .iter()
                .find(|m| m.user.name.eq_ignore_ascii_case(mention))
                .ok_or_else(|| SplitchatError::UnknownMention(mention.clone()))?;
            participants.push(ParticipantShare {
                user_id: member.user.id.clone(),
                amount: share,
            });
        }
        let creator_share =
            split_engine::round_currency(split.amount - share * split.participants.len() as f64);
        participants.push(ParticipantShare {
            user_id: sender.id.clone(),
            amount: creator_share,
        });

        Ok(CreateSplitBillParams {
            description: split.description.clone(),
            total_amount: split.amount,
            participants,
            split_type: Some(split.split_type),
            category: None,
            group_id: Some(group.id.clone()),
        })
    }

    // SPLIT BILLS

    pub async fn create_split_bill(
        &self,
        params: CreateSplitBillParams,
        created_by: &User,
    ) -> Result<SplitBill, SplitchatError> {
        self.create_split_bill_inner(params, created_by, false).await
    }

    async fn create_split_bill_inner(
        &self,
        params: CreateSplitBillParams,
        created_by: &User,
        settle_creator: bool,
    ) -> Result<SplitBill, SplitchatError> {
        split_engine::validate_create(&params)?;
        self.validate_string_input("description", &params.description, 255)?;
        self.validate_amount_input("total_amount", params.total_amount)?;
        self.validate_users(&[&created_by.id]).await?;

        for share in &params.participants {
            if self.storage.get_user(&share.user_id).await?.is_none() {
                return Err(SplitchatError::InvalidParticipant(share.user_id.clone()));
            }
        }

        if let Some(group_id) = &params.group_id {
            let group = self.validate_group_membership(group_id, &created_by.id).await?;
            for share in &params.participants {
                if !group.members.iter().any(|m| m.user.id == share.user_id) {
                    return Err(SplitchatError::InvalidParticipant(share.user_id.clone()));
                }
            }
        }

        let category = match params.category.as_deref().filter(|c| !c.trim().is_empty()) {
            Some(category) => {
                self.validate_string_input("category", category, 100)?;
                category.to_string()
            }
            None => DEFAULT_CATEGORY.to_string(),
        };

        let mut bill = SplitBill {
            id: Uuid::new_v4().to_string(),
            description: params.description,
            total_amount: params.total_amount,
            created_by: created_by.id.clone(),
            group_id: params.group_id,
            participants: params
                .participants
                .iter()
                .map(|s| Participant::new(s.user_id.clone(), s.amount))
                .collect(),
            split_type: params.split_type.unwrap_or(SplitType::Equal),
            category,
            is_settled: false,
            created_at: Utc::now(),
        };

        // A group-chat creator fronted the money; their own share is recorded
        // as paid through the same event path as everyone else's.
        if settle_creator {
            split_engine::mark_paid(&mut bill, &created_by.id)?;
        }

        self.storage.save_split_bill(bill.clone()).await?;

        self.log_and_audit(
            bill.group_id.as_deref(),
            SPLIT_BILL_CREATED,
            json!({
                "bill_id": bill.id,
                "description": bill.description,
                "total_amount": bill.total_amount,
                "split_type": bill.split_type,
                "participant_ids": bill.participants.iter().map(|p| p.user_id.clone()).collect::<Vec<_>>()
            }),
            Some(created_by.id.as_str()),
        )
        .await?;

        Ok(bill)
    }

    pub async fn get_split_bill(&self, bill_id: &str) -> Result<Option<SplitBill>, SplitchatError> {
        self.storage.get_split_bill(bill_id).await
    }

    pub async fn mark_participant_paid(
        &self,
        bill_id: &str,
        participant_user_id: &str,
        marked_by: &User,
    ) -> Result<SplitBill, SplitchatError> {
        self.validate_users(&[&marked_by.id]).await?;
        let mut bill = self
            .storage
            .get_split_bill(bill_id)
            .await?
            .ok_or_else(|| SplitchatError::SplitBillNotFound(bill_id.to_string()))?;

        if marked_by.id != participant_user_id && marked_by.id != bill.created_by {
            return Err(SplitchatError::UnauthorizedBillUpdate(marked_by.id.clone()));
        }

        split_engine::mark_paid(&mut bill, participant_user_id)?;
        self.storage.save_split_bill(bill.clone()).await?;

        self.log_and_audit(
            bill.group_id.as_deref(),
            SPLIT_BILL_PAID,
            json!({ "bill_id": bill.id, "participant_id": participant_user_id, "is_settled": bill.is_settled }),
            Some(marked_by.id.as_str()),
        )
        .await?;

        Ok(bill)
    }

    pub async fn reject_split_bill(
        &self,
        bill_id: &str,
        participant_user_id: &str,
        rejected_by: &User,
    ) -> Result<SplitBill, SplitchatError> {
        self.validate_users(&[&rejected_by.id]).await?;
        let mut bill = self
            .storage
            .get_split_bill(bill_id)
            .await?
            .ok_or_else(|| SplitchatError::SplitBillNotFound(bill_id.to_string()))?;

        if rejected_by.id != participant_user_id && rejected_by.id != bill.created_by {
            return Err(SplitchatError::UnauthorizedBillUpdate(rejected_by.id.clone()));
        }

        split_engine::reject(&mut bill, participant_user_id)?;
        self.storage.save_split_bill(bill.clone()).await?;

        self.log_and_audit(
            bill.group_id.as_deref(),
            SPLIT_BILL_REJECTED,
            json!({ "bill_id": bill.id, "participant_id": participant_user_id, "is_settled": bill.is_settled }),
            Some(rejected_by.id.as_str()),
        )
        .await?;

        Ok(bill)
    }

    pub async fn get_group_split_bills(
        &self,
        group_id: &str,
        queried_by: &User,
    ) -> Result<Vec<SplitBill>, SplitchatError> {
        self.validate_group_membership(group_id, &queried_by.id).await?;
        let bills = self.storage.get_group_split_bills(group_id).await?;
        self.log_and_audit(
            Some(group_id),
            SPLIT_BILLS_QUERIED,
            json!({ "group_id": group_id, "user_id": queried_by.id }),
            Some(queried_by.id.as_str()),
        )
        .await?;
        Ok(bills)
    }

    pub async fn get_user_split_bills(
        &self,
        user_id: &str,
        queried_by: &User,
    ) -> Result<Vec<SplitBill>, SplitchatError> {
        self.validate_users(&[user_id, &queried_by.id]).await?;
        self.storage.get_user_split_bills(user_id).await
    }

    // EXPENSES AND BUDGETS

    pub async fn add_expense(
        &self,
        user: &User,
        description: String,
        amount: f64,
        category: Option<String>,
    ) -> Result<Expense, SplitchatError> {
        self.validate_users(&[&user.id]).await?;
        self.validate_string_input("description", &description, 255)?;
        self.validate_amount_input("amount", amount)?;

        let category = match category.filter(|c| !c.trim().is_empty()) {
            Some(category) => {
                self.validate_string_input("category", &category, 100)?;
                category
            }
            None => DEFAULT_CATEGORY.to_string(),
        };

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            description,
            amount,
            category,
            created_at: Utc::now(),
        };
        self.storage.save_expense(expense.clone()).await?;
        self.cache.invalidate_spending_summary(&user.id).await?;

        self.log_and_audit(
            None,
            EXPENSE_ADDED,
            json!({ "expense_id": expense.id, "user_id": user.id, "amount": expense.amount, "category": expense.category }),
            Some(user.id.as_str()),
        )
        .await?;

        Ok(expense)
    }

    pub async fn get_user_expenses(&self, user_id: &str, queried_by: &User) -> Result<Vec<Expense>, SplitchatError> {
        self.validate_users(&[user_id, &queried_by.id]).await?;
        self.storage.get_user_expenses(user_id).await
    }

    pub async fn set_budget(&self, user: &User, category: String, monthly_limit: f64) -> Result<Budget, SplitchatError> {
        self.validate_users(&[&user.id]).await?;
        self.validate_string_input("category", &category, 100)?;
        self.validate_amount_input("monthly_limit", monthly_limit)?;

        let now = Utc::now();
        let budget = match self
            .storage
            .get_user_budgets(&user.id)
            .await?
            .into_iter()
            .find(|b| b.category == category)
        {
            Some(mut existing) => {
                existing.monthly_limit = monthly_limit;
                existing.updated_at = now;
                existing
            }
            None => Budget {
                id: Uuid::new_v4().to_string(),
                user_id: user.id.clone(),
                category,
                monthly_limit,
                created_at: now,
                updated_at: now,
            },
        };
        self.storage.save_budget(budget.clone()).await?;

        self.log_and_audit(
            None,
            BUDGET_SET,
            json!({ "budget_id": budget.id, "user_id": user.id, "category": budget.category, "monthly_limit": budget.monthly_limit }),
            Some(user.id.as_str()),
        )
        .await?;

        Ok(budget)
    }

    /// Current-month spend against each of the user's budgets.
    pub async fn get_budget_status(&self, user: &User) -> Result<Vec<BudgetStatus>, SplitchatError> {
        self.validate_users(&[&user.id]).await?;
        let budgets = self.storage.get_user_budgets(&user.id).await?;
        let expenses = self.storage.get_user_expenses(&user.id).await?;
        let now = Utc::now();

        let mut statuses: Vec<BudgetStatus> = budgets
            .into_iter()
            .map(|budget| {
                let spent = split_engine::round_currency(
                    expenses
                        .iter()
                        .filter(|e| e.category == budget.category && same_month(e.created_at, now))
                        .map(|e| e.amount)
                        .sum(),
                );
                BudgetStatus {
                    remaining: split_engine::round_currency(budget.monthly_limit - spent),
                    category: budget.category,
                    monthly_limit: budget.monthly_limit,
                    spent,
                }
            })
            .collect();
        statuses.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(statuses)
    }

    // INSIGHTS

    pub async fn spending_summary(&self, user_id: &str, queried_by: &User) -> Result<SpendingSummary, SplitchatError> {
        self.validate_users(&[user_id, &queried_by.id]).await?;

        if let Some(summary) = self.cache.get_spending_summary(user_id).await? {
            return Ok(summary);
        }

        let expenses = self.storage.get_user_expenses(user_id).await?;
        let mut totals: HashMap<String, (f64, usize)> = HashMap::new();
        for expense in &expenses {
            let entry = totals.entry(expense.category.clone()).or_insert((0.0, 0));
            entry.0 += expense.amount;
            entry.1 += 1;
        }
        let mut by_category: Vec<CategorySpending> = totals
            .into_iter()
            .map(|(category, (total, count))| CategorySpending {
                category,
                total: split_engine::round_currency(total),
                count,
            })
            .collect();
        by_category.sort_by(|a, b| b.total.total_cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

        let summary = SpendingSummary {
            user_id: user_id.to_string(),
            total_spent: split_engine::round_currency(expenses.iter().map(|e| e.amount).sum()),
            expense_count: expenses.len(),
            top_category: by_category.first().map(|c| c.category.clone()),
            by_category,
            generated_at: Utc::now(),
        };

        self.cache
            .save_spending_summary(
                user_id,
                &summary,
                std::time::Duration::from_secs(CONFIG.summary_cache_ttl_secs),
            )
            .await?;

        self.log_and_audit(
            None,
            SUMMARY_QUERIED,
            json!({ "user_id": user_id, "queried_by": queried_by.id }),
            Some(queried_by.id.as_str()),
        )
        .await?;

        Ok(summary)
    }

    /// Linear month-end projection of the user's current-month spend.
    pub async fn forecast_spending(&self, user_id: &str, queried_by: &User) -> Result<SpendingForecast, SplitchatError> {
        self.validate_users(&[user_id, &queried_by.id]).await?;
        let expenses = self.storage.get_user_expenses(user_id).await?;
        let now = Utc::now();

        let month_to_date: f64 = expenses
            .iter()
            .filter(|e| same_month(e.created_at, now))
            .map(|e| e.amount)
            .sum();
        let days_elapsed = now.day();
        let days_in_month = days_in_month(now.year(), now.month());
        let daily_average = month_to_date / days_elapsed as f64;

        let forecast = SpendingForecast {
            user_id: user_id.to_string(),
            month_to_date: split_engine::round_currency(month_to_date),
            daily_average: split_engine::round_currency(daily_average),
            projected_total: split_engine::round_currency(daily_average * days_in_month as f64),
            days_elapsed,
            days_in_month,
            generated_at: now,
        };

        self.log_and_audit(
            None,
            FORECAST_QUERIED,
            json!({ "user_id": user_id, "queried_by": queried_by.id }),
            Some(queried_by.id.as_str()),
        )
        .await?;

        Ok(forecast)
    }

    // AUDITS

    pub async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, SplitchatError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| SplitchatError::GroupNotFound(group_id.to_string()))?;
        self.storage.get_group_audits(group_id).await
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, SplitchatError> {
        self.logging.get_logs().await
    }
}

fn direct_split_params(recipient: &User, split: &SplitCommand) -> CreateSplitBillParams {
    // In a direct chat the peer is fixed, so the whole amount lands on the
    // recipient and the sender never appears as a participant.
    CreateSplitBillParams {
        description: split.description.clone(),
        total_amount: split.amount,
        participants: vec![ParticipantShare {
            user_id: recipient.id.clone(),
            amount: split.amount,
        }],
        split_type: Some(split.split_type),
        category: None,
        group_id: None,
    }
}

fn same_month(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(first_of_next)) => (first_of_next - first).num_days() as u32,
        _ => 30,
    }
}
