use crate::core::errors::SplitchatError;
use crate::core::models::{
    audit::GroupAudit, budget::Budget, expense::Expense, group::Group, message::Message,
    split_bill::SplitBill, user::User,
};
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_user(&self, user: User) -> Result<(), SplitchatError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, SplitchatError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, SplitchatError>;
    async fn save_group(&self, group: Group) -> Result<(), SplitchatError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, SplitchatError>;
    async fn get_user_groups(&self, user_id: &str) -> Result<Vec<Group>, SplitchatError>;
    async fn save_message(&self, message: Message) -> Result<(), SplitchatError>;
    async fn get_group_messages(&self, group_id: &str) -> Result<Vec<Message>, SplitchatError>;
    async fn get_direct_messages(&self, user_a: &str, user_b: &str) -> Result<Vec<Message>, SplitchatError>;
    async fn save_split_bill(&self, bill: SplitBill) -> Result<(), SplitchatError>;
    async fn get_split_bill(&self, bill_id: &str) -> Result<Option<SplitBill>, SplitchatError>;
    async fn get_group_split_bills(&self, group_id: &str) -> Result<Vec<SplitBill>, SplitchatError>;
    async fn get_user_split_bills(&self, user_id: &str) -> Result<Vec<SplitBill>, SplitchatError>;
    async fn save_expense(&self, expense: Expense) -> Result<(), SplitchatError>;
    async fn get_user_expenses(&self, user_id: &str) -> Result<Vec<Expense>, SplitchatError>;
    async fn save_budget(&self, budget: Budget) -> Result<(), SplitchatError>;
    async fn get_user_budgets(&self, user_id: &str) -> Result<Vec<Budget>, SplitchatError>;
    async fn save_group_audit(&self, audit: GroupAudit) -> Result<(), SplitchatError>;
    async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, SplitchatError>;
}

pub mod in_memory;
