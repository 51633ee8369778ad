// Audit action names recorded through LoggingService and group audits.
pub const USER_ADDED: &str = "user_added";
pub const GROUP_CREATED: &str = "group_created";
pub const MEMBER_ADDED: &str = "member_added";
pub const MEMBER_REMOVED: &str = "member_removed";
pub const MESSAGE_SENT: &str = "message_sent";
pub const SPLIT_BILL_CREATED: &str = "split_bill_created";
pub const SPLIT_BILL_PAID: &str = "split_bill_paid";
pub const SPLIT_BILL_REJECTED: &str = "split_bill_rejected";
pub const SPLIT_BILLS_QUERIED: &str = "split_bills_queried";
pub const EXPENSE_ADDED: &str = "expense_added";
pub const BUDGET_SET: &str = "budget_set";
pub const SUMMARY_QUERIED: &str = "summary_queried";
pub const FORECAST_QUERIED: &str = "forecast_queried";

/// Absolute tolerance between a bill's total and the sum of participant shares.
pub const SPLIT_TOLERANCE: f64 = 0.01;

pub const DEFAULT_CATEGORY: &str = "Other";
pub const DEFAULT_DESCRIPTION: &str = "Expense";
