use crate::core::errors::SplitchatError;
use crate::core::models::{
    audit::GroupAudit, budget::Budget, expense::Expense, group::Group, message::Message,
    split_bill::SplitBill, user::User,
};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct InMemoryStorage {
    users: Arc<RwLock<HashMap<String, User>>>,
    users_by_email: Arc<RwLock<HashMap<String, User>>>,
    groups: Arc<RwLock<HashMap<String, Group>>>,
    messages: Arc<RwLock<HashMap<String, Message>>>,
    split_bills: Arc<RwLock<HashMap<String, SplitBill>>>,
    expenses: Arc<RwLock<HashMap<String, Expense>>>,
    budgets: Arc<RwLock<HashMap<String, Budget>>>,
    group_audits: Arc<RwLock<HashMap<String, Vec<GroupAudit>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            users: Arc::new(RwLock::new(HashMap::new())),
            users_by_email: Arc::new(RwLock::new(HashMap::new())),
            groups: Arc::new(RwLock::new(HashMap::new())),
            messages: Arc::new(RwLock::new(HashMap::new())),
            split_bills: Arc::new(RwLock::new(HashMap::new())),
            expenses: Arc::new(RwLock::new(HashMap::new())),
            budgets: Arc::new(RwLock::new(HashMap::new())),
            group_audits: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_user(&self, user: User) -> Result<(), SplitchatError> {
        let mut users_by_email = self.users_by_email.write().await;
        if users_by_email.contains_key(&user.email) {
            return Err(SplitchatError::EmailAlreadyRegistered(user.email));
        }
        users_by_email.insert(user.email.clone(), user.clone());
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, SplitchatError> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, SplitchatError> {
        let users_by_email = self.users_by_email.read().await;
        Ok(users_by_email.get(email).cloned())
    }

    async fn save_group(&self, group: Group) -> Result<(), SplitchatError> {
        let mut groups = self.groups.write().await;
        groups.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, SplitchatError> {
        let groups = self.groups.read().await;
        Ok(groups.get(group_id).cloned())
    }

    async fn get_user_groups(&self, user_id: &str) -> Result<Vec<Group>, SplitchatError> {
        let groups = self.groups.read().await;
        let mut groups: Vec<Group> = groups
            .values()
            .filter(|g| g.members.iter().any(|m| m.user.id == user_id))
            .cloned()
            .collect();
        groups.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(groups)
    }

    async fn save_message(&self, message: Message) -> Result<(), SplitchatError> {
        let mut messages = self.messages.write().await;
        messages.insert(message.id.clone(), message);
        Ok(())
    }

    async fn get_group_messages(&self, group_id: &str) -> Result<Vec<Message>, SplitchatError> {
        let messages = self.messages.read().await;
        let mut messages: Vec<Message> = messages
            .values()
            .filter(|m| m.group_id.as_deref() == Some(group_id))
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.sent_at.cmp(&b.sent_at).then_with(|| a.id.cmp(&b.id)));
        Ok(messages)
    }

    async fn get_direct_messages(&self, user_a: &str, user_b: &str) -> Result<Vec<Message>, SplitchatError> {
        let messages = self.messages.read().await;
        let mut messages: Vec<Message> = messages
            .values()
            .filter(|m| {
                m.group_id.is_none()
                    && ((m.sender_id == user_a && m.recipient_id.as_deref() == Some(user_b))
                        || (m.sender_id == user_b && m.recipient_id.as_deref() == Some(user_a)))
            })
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.sent_at.cmp(&b.sent_at).then_with(|| a.id.cmp(&b.id)));
        Ok(messages)
    }

    async fn save_split_bill(&self, bill: SplitBill) -> Result<(), SplitchatError> {
        let mut split_bills = self.split_bills.write().await;
        split_bills.insert(bill.id.clone(), bill);
        Ok(())
    }

    async fn get_split_bill(&self, bill_id: &str) -> Result<Option<SplitBill>, SplitchatError> {
        let split_bills = self.split_bills.read().await;
        Ok(split_bills.get(bill_id).cloned())
    }

    async fn get_group_split_bills(&self, group_id: &str) -> Result<Vec<SplitBill>, SplitchatError> {
        let split_bills = self.split_bills.read().await;
        let mut bills: Vec<SplitBill> = split_bills
            .values()
            .filter(|b| b.group_id.as_deref() == Some(group_id))
            .cloned()
            .collect();
        bills.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(bills)
    }

    async fn get_user_split_bills(&self, user_id: &str) -> Result<Vec<SplitBill>, SplitchatError> {
        let split_bills = self.split_bills.read().await;
        let mut bills: Vec<SplitBill> = split_bills
            .values()
            .filter(|b| {
                b.created_by == user_id || b.participants.iter().any(|p| p.user_id == user_id)
            })
            .cloned()
            .collect();
        bills.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(bills)
    }

    async fn save_expense(&self, expense: Expense) -> Result<(), SplitchatError> {
        let mut expenses = self.expenses.write().await;
        expenses.insert(expense.id.clone(), expense);
        Ok(())
    }

    async fn get_user_expenses(&self, user_id: &str) -> Result<Vec<Expense>, SplitchatError> {
        let expenses = self.expenses.read().await;
        let mut expenses: Vec<Expense> = expenses
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        expenses.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(expenses)
    }

    async fn save_budget(&self, budget: Budget) -> Result<(), SplitchatError> {
        let mut budgets = self.budgets.write().await;
        budgets.insert(budget.id.clone(), budget);
        Ok(())
    }

    async fn get_user_budgets(&self, user_id: &str) -> Result<Vec<Budget>, SplitchatError> {
        let budgets = self.budgets.read().await;
        let mut budgets: Vec<Budget> = budgets
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        budgets.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(budgets)
    }

    async fn save_group_audit(&self, audit: GroupAudit) -> Result<(), SplitchatError> {
        let mut group_audits = self.group_audits.write().await;
        group_audits
            .entry(audit.group_id.clone())
            .or_insert_with(Vec::new)
            .push(audit);
        Ok(())
    }

    async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, SplitchatError> {
        let group_audits = self.group_audits.read().await;
        Ok(group_audits.get(group_id).cloned().unwrap_or_default())
    }
}
