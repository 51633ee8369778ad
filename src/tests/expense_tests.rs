use crate::constants::constants::{BUDGET_SET, SUMMARY_QUERIED};
use crate::core::errors::SplitchatError;
use crate::core::models::expense::Expense;
use crate::core::services::SplitchatService;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::Storage;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use crate::tests::{create_test_service, user};
use chrono::{Datelike, NaiveDate, Utc};

#[tokio::test]
async fn test_add_expense_defaults_category() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();

    let expense = service
        .add_expense(&alice, "Parking".to_string(), 12.5, None)
        .await
        .unwrap();
    assert_eq!(expense.category, "Other");
    assert_eq!(expense.amount, 12.5);

    let expenses = service.get_user_expenses("u1", &alice).await.unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].description, "Parking");
}

#[tokio::test]
async fn test_add_expense_input_validation() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();

    let result = service.add_expense(&alice, "Lunch".to_string(), -5.0, None).await;
    assert!(matches!(result, Err(SplitchatError::InvalidInput(ref field, _)) if field == "amount"));

    // Fractions of a cent are rejected.
    let result = service.add_expense(&alice, "Lunch".to_string(), 10.005, None).await;
    assert!(matches!(result, Err(SplitchatError::InvalidInput(ref field, _)) if field == "amount"));

    let result = service.add_expense(&alice, "Lunch".to_string(), 1_000_000.01, None).await;
    assert!(matches!(result, Err(SplitchatError::InvalidInput(ref field, _)) if field == "amount"));

    let result = service.add_expense(&alice, "".to_string(), 10.0, None).await;
    assert!(matches!(result, Err(SplitchatError::InvalidInput(ref field, _)) if field == "description"));

    let result = service
        .add_expense(&alice, "<script>alert(1)</script>".to_string(), 10.0, None)
        .await;
    assert!(matches!(result, Err(SplitchatError::InvalidInput(ref field, _)) if field == "description"));

    let ghost = user("ghost", "Ghost");
    let result = service.add_expense(&ghost, "Lunch".to_string(), 10.0, None).await;
    assert!(matches!(result, Err(SplitchatError::UserNotFound(_))));
}

#[tokio::test]
async fn test_set_budget_upserts_by_category() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();

    let first = service.set_budget(&alice, "Food".to_string(), 500.0).await.unwrap();
    let second = service.set_budget(&alice, "Food".to_string(), 650.0).await.unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.monthly_limit, 650.0);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);

    let statuses = service.get_budget_status(&alice).await.unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].monthly_limit, 650.0);

    let logs = service.get_app_logs().await.unwrap();
    assert_eq!(logs.iter().filter(|l| l.action == BUDGET_SET).count(), 2);

    let result = service.set_budget(&alice, "Food".to_string(), 0.0).await;
    assert!(matches!(result, Err(SplitchatError::InvalidInput(ref field, _)) if field == "monthly_limit"));
}

#[tokio::test]
async fn test_budget_status_tracks_current_month_spend() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();

    service.set_budget(&alice, "Transport".to_string(), 200.0).await.unwrap();
    service.set_budget(&alice, "Food".to_string(), 500.0).await.unwrap();
    service
        .add_expense(&alice, "Groceries".to_string(), 120.5, Some("Food".to_string()))
        .await
        .unwrap();
    service
        .add_expense(&alice, "Snacks".to_string(), 30.25, Some("Food".to_string()))
        .await
        .unwrap();
    // No budget covers this one.
    service
        .add_expense(&alice, "Gift".to_string(), 10.0, Some("Misc".to_string()))
        .await
        .unwrap();

    let statuses = service.get_budget_status(&alice).await.unwrap();
    assert_eq!(statuses.len(), 2);

    assert_eq!(statuses[0].category, "Food");
    assert_eq!(statuses[0].spent, 150.75);
    assert_eq!(statuses[0].remaining, 349.25);

    assert_eq!(statuses[1].category, "Transport");
    assert_eq!(statuses[1].spent, 0.0);
    assert_eq!(statuses[1].remaining, 200.0);
}

#[tokio::test]
async fn test_spending_summary_orders_categories_by_total() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();

    service
        .add_expense(&alice, "Flights".to_string(), 200.0, Some("Travel".to_string()))
        .await
        .unwrap();
    service
        .add_expense(&alice, "Dinner".to_string(), 60.0, Some("Food".to_string()))
        .await
        .unwrap();
    service
        .add_expense(&alice, "Lunch".to_string(), 40.0, Some("Food".to_string()))
        .await
        .unwrap();
    service
        .add_expense(&alice, "Petrol".to_string(), 100.0, Some("Gas".to_string()))
        .await
        .unwrap();

    let summary = service.spending_summary("u1", &alice).await.unwrap();
    assert_eq!(summary.total_spent, 400.0);
    assert_eq!(summary.expense_count, 4);
    assert_eq!(summary.top_category.as_deref(), Some("Travel"));

    // Biggest total first; ties fall back to category name.
    let order: Vec<(&str, f64, usize)> = summary
        .by_category
        .iter()
        .map(|c| (c.category.as_str(), c.total, c.count))
        .collect();
    assert_eq!(order, vec![("Travel", 200.0, 1), ("Food", 100.0, 2), ("Gas", 100.0, 1)]);
}

#[tokio::test]
async fn test_spending_summary_is_cached_until_new_expense() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();
    service
        .add_expense(&alice, "Lunch".to_string(), 20.0, None)
        .await
        .unwrap();

    let first = service.spending_summary("u1", &alice).await.unwrap();
    let second = service.spending_summary("u1", &alice).await.unwrap();
    assert_eq!(second.generated_at, first.generated_at);
    assert_eq!(second.expense_count, 1);

    // The cached read never recomputes, so only one query is logged.
    let logs = service.get_app_logs().await.unwrap();
    assert_eq!(logs.iter().filter(|l| l.action == SUMMARY_QUERIED).count(), 1);

    service
        .add_expense(&alice, "Dinner".to_string(), 35.0, None)
        .await
        .unwrap();
    let third = service.spending_summary("u1", &alice).await.unwrap();
    assert_eq!(third.expense_count, 2);
    assert_eq!(third.total_spent, 55.0);
}

#[tokio::test]
async fn test_forecast_projects_month_end() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();
    service
        .add_expense(&alice, "Groceries".to_string(), 50.0, None)
        .await
        .unwrap();
    service
        .add_expense(&alice, "Fuel".to_string(), 40.0, None)
        .await
        .unwrap();

    let forecast = service.forecast_spending("u1", &alice).await.unwrap();
    assert_eq!(forecast.month_to_date, 90.0);

    let now = forecast.generated_at;
    assert_eq!(forecast.days_elapsed, now.day());

    let (next_year, next_month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };
    let month_days = (NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap()
        - NaiveDate::from_ymd_opt(now.year(), now.month(), 1).unwrap())
    .num_days() as u32;
    assert_eq!(forecast.days_in_month, month_days);

    let daily = 90.0 / forecast.days_elapsed as f64;
    assert_eq!(forecast.daily_average, (daily * 100.0).round() / 100.0);
    assert_eq!(
        forecast.projected_total,
        (daily * forecast.days_in_month as f64 * 100.0).round() / 100.0
    );
}

#[tokio::test]
async fn test_forecast_counts_only_current_month() {
    let storage = InMemoryStorage::default();
    let service = SplitchatService::new(storage.clone(), InMemoryLogging::default(), InMemoryCache::default());
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();

    // Planted directly in storage so it can carry a last-month timestamp.
    storage
        .save_expense(Expense {
            id: "e-old".to_string(),
            user_id: "u1".to_string(),
            description: "Old rent".to_string(),
            amount: 800.0,
            category: "Rent".to_string(),
            created_at: Utc::now() - chrono::Duration::days(40),
        })
        .await
        .unwrap();
    service
        .add_expense(&alice, "Groceries".to_string(), 60.0, None)
        .await
        .unwrap();

    let forecast = service.forecast_spending("u1", &alice).await.unwrap();
    assert_eq!(forecast.month_to_date, 60.0);

    // The all-time summary still sees both.
    let summary = service.spending_summary("u1", &alice).await.unwrap();
    assert_eq!(summary.total_spent, 860.0);
    assert_eq!(summary.expense_count, 2);
}

#[tokio::test]
async fn test_forecast_with_no_expenses_is_flat() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();

    let forecast = service.forecast_spending("u1", &alice).await.unwrap();
    assert_eq!(forecast.month_to_date, 0.0);
    assert_eq!(forecast.daily_average, 0.0);
    assert_eq!(forecast.projected_total, 0.0);
}
