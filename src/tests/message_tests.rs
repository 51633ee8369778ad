use crate::constants::constants::{MESSAGE_SENT, SPLIT_BILL_CREATED};
use crate::core::errors::SplitchatError;
use crate::core::models::message::CommandKind;
use crate::core::models::split_bill::SplitType;
use crate::core::services::CommandResult;
use crate::tests::{create_test_service, user};

#[tokio::test]
async fn test_group_split_command_creates_bill() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();
    let bob = service.add_user(user("u2", "Bob"), None).await.unwrap();
    let carol = service.add_user(user("u3", "Carol"), None).await.unwrap();

    let group = service
        .create_group("Trip".to_string(), vec![bob.clone(), carol.clone()], &alice)
        .await
        .unwrap();

    let outcome = service
        .send_group_message(&group.id, &alice, "@split Dinner 120 @bob @carol".to_string())
        .await
        .unwrap();

    assert_eq!(outcome.message.command, Some(CommandKind::Split));
    let bill = match outcome.command_result {
        Some(CommandResult::SplitBillCreated(bill)) => bill,
        other => panic!("expected a split bill, got {:?}", other),
    };

    assert_eq!(bill.total_amount, 120.0);
    assert_eq!(bill.group_id.as_deref(), Some(group.id.as_str()));
    assert_eq!(bill.split_type, SplitType::Equal);
    assert_eq!(bill.participants.len(), 3);
    let sum: f64 = bill.participants.iter().map(|p| p.amount).sum();
    assert!((sum - bill.total_amount).abs() < 0.01);

    // The sender fronted the money, so their own share starts out paid.
    let alice_share = bill.participant(&alice.id).unwrap();
    assert!(alice_share.is_paid);
    assert!(alice_share.paid_at.is_some());
    let bob_share = bill.participant(&bob.id).unwrap();
    assert_eq!(bob_share.amount, 40.0);
    assert!(!bob_share.is_paid);
    assert!(!bill.is_settled);
}

#[tokio::test]
async fn test_group_split_absorbs_rounding_remainder() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();
    let bob = service.add_user(user("u2", "Bob"), None).await.unwrap();

    let group = service
        .create_group("Trip".to_string(), vec![bob.clone()], &alice)
        .await
        .unwrap();

    // 100 / 2 leaves no remainder, but 100.01 / 2 does.
    let outcome = service
        .send_group_message(&group.id, &alice, "@split Fuel 100.01 @bob".to_string())
        .await
        .unwrap();
    let bill = match outcome.command_result {
        Some(CommandResult::SplitBillCreated(bill)) => bill,
        other => panic!("expected a split bill, got {:?}", other),
    };

    assert_eq!(bill.participant(&bob.id).unwrap().amount, 50.01);
    assert_eq!(bill.participant(&alice.id).unwrap().amount, 50.0);
    let sum: f64 = bill.participants.iter().map(|p| p.amount).sum();
    assert!((sum - 100.01).abs() < 0.01);
}

#[tokio::test]
async fn test_direct_split_assigns_full_amount_to_recipient() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();
    let bob = service.add_user(user("u2", "Bob"), None).await.unwrap();

    let outcome = service
        .send_direct_message(&alice, &bob.id, "@split Taxi 45".to_string())
        .await
        .unwrap();

    assert_eq!(outcome.message.recipient_id.as_deref(), Some(bob.id.as_str()));
    assert_eq!(outcome.message.group_id, None);
    let bill = match outcome.command_result {
        Some(CommandResult::SplitBillCreated(bill)) => bill,
        other => panic!("expected a split bill, got {:?}", other),
    };

    assert_eq!(bill.created_by, alice.id);
    assert_eq!(bill.group_id, None);
    assert_eq!(bill.participants.len(), 1);
    assert_eq!(bill.participants[0].user_id, bob.id);
    assert_eq!(bill.participants[0].amount, 45.0);
    assert!(!bill.is_settled);
}

#[tokio::test]
async fn test_unknown_mention_aborts_send() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();
    let bob = service.add_user(user("u2", "Bob"), None).await.unwrap();
    // Mallory is a registered user but not a member of the group.
    service.add_user(user("u5", "Mallory"), None).await.unwrap();

    let group = service
        .create_group("Trip".to_string(), vec![bob.clone()], &alice)
        .await
        .unwrap();

    let result = service
        .send_group_message(&group.id, &alice, "@split Dinner 60 @mallory".to_string())
        .await;
    assert!(matches!(result, Err(SplitchatError::UnknownMention(ref name)) if name == "mallory"));

    // Nothing was persisted: no message, no bill.
    let messages = service.get_group_messages(&group.id, &alice).await.unwrap();
    assert!(messages.is_empty());
    let bills = service.get_group_split_bills(&group.id, &alice).await.unwrap();
    assert!(bills.is_empty());
}

#[tokio::test]
async fn test_bill_is_created_before_message_is_stored() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();
    let bob = service.add_user(user("u2", "Bob"), None).await.unwrap();

    let group = service
        .create_group("Trip".to_string(), vec![bob.clone()], &alice)
        .await
        .unwrap();

    service
        .send_group_message(&group.id, &alice, "@split Dinner 80 @bob".to_string())
        .await
        .unwrap();

    let audits = service.get_group_audits(&group.id).await.unwrap();
    let bill_pos = audits.iter().position(|a| a.action == SPLIT_BILL_CREATED).unwrap();
    let message_pos = audits.iter().position(|a| a.action == MESSAGE_SENT).unwrap();
    assert!(bill_pos < message_pos);
}

#[tokio::test]
async fn test_expense_command_records_expense() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();
    let bob = service.add_user(user("u2", "Bob"), None).await.unwrap();

    let group = service
        .create_group("Trip".to_string(), vec![bob.clone()], &alice)
        .await
        .unwrap();

    let outcome = service
        .send_group_message(&group.id, &alice, "@addexpense Coffee 25 category:Food".to_string())
        .await
        .unwrap();

    assert_eq!(outcome.message.command, Some(CommandKind::Expense));
    let expense = match outcome.command_result {
        Some(CommandResult::ExpenseAdded(expense)) => expense,
        other => panic!("expected an expense, got {:?}", other),
    };
    assert_eq!(expense.amount, 25.0);
    assert_eq!(expense.category, "Food");
    assert_eq!(expense.user_id, alice.id);

    let expenses = service.get_user_expenses(&alice.id, &alice).await.unwrap();
    assert_eq!(expenses.len(), 1);
}

#[tokio::test]
async fn test_summary_and_predict_commands() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();
    let bob = service.add_user(user("u2", "Bob"), None).await.unwrap();

    service
        .add_expense(&alice, "Groceries".to_string(), 80.0, Some("Food".to_string()))
        .await
        .unwrap();

    let outcome = service
        .send_direct_message(&alice, &bob.id, "@summary".to_string())
        .await
        .unwrap();
    assert_eq!(outcome.message.command, Some(CommandKind::Summary));
    match outcome.command_result {
        Some(CommandResult::Summary(summary)) => {
            assert_eq!(summary.user_id, alice.id);
            assert_eq!(summary.total_spent, 80.0);
            assert_eq!(summary.expense_count, 1);
        }
        other => panic!("expected a summary, got {:?}", other),
    }

    let outcome = service
        .send_direct_message(&alice, &bob.id, "@predict".to_string())
        .await
        .unwrap();
    assert_eq!(outcome.message.command, Some(CommandKind::Predict));
    match outcome.command_result {
        Some(CommandResult::Forecast(forecast)) => {
            assert_eq!(forecast.user_id, alice.id);
            assert_eq!(forecast.month_to_date, 80.0);
            assert!(forecast.projected_total >= forecast.month_to_date);
        }
        other => panic!("expected a forecast, got {:?}", other),
    }
}

#[tokio::test]
async fn test_plain_message_is_stored_without_command() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();
    let bob = service.add_user(user("u2", "Bob"), None).await.unwrap();

    let group = service
        .create_group("Trip".to_string(), vec![bob.clone()], &alice)
        .await
        .unwrap();

    let outcome = service
        .send_group_message(&group.id, &alice, "see you at 8".to_string())
        .await
        .unwrap();
    assert_eq!(outcome.message.command, None);
    assert!(outcome.command_result.is_none());

    // A malformed split is treated as plain chat, not an error.
    let outcome = service
        .send_group_message(&group.id, &alice, "@split no amount here".to_string())
        .await
        .unwrap();
    assert_eq!(outcome.message.command, None);

    let messages = service.get_group_messages(&group.id, &alice).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "see you at 8");
}

#[tokio::test]
async fn test_direct_message_rules() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();
    let bob = service.add_user(user("u2", "Bob"), None).await.unwrap();

    let result = service
        .send_direct_message(&alice, &alice.id, "hi me".to_string())
        .await;
    assert!(matches!(result, Err(SplitchatError::CannotMessageSelf)));

    let result = service
        .send_direct_message(&alice, "missing", "hello".to_string())
        .await;
    assert!(matches!(result, Err(SplitchatError::UserNotFound(_))));

    service
        .send_direct_message(&alice, &bob.id, "hello".to_string())
        .await
        .unwrap();
    service
        .send_direct_message(&bob, &alice.id, "hey".to_string())
        .await
        .unwrap();

    // Both directions land in the same conversation.
    let conversation = service.get_direct_messages(&alice, &bob.id).await.unwrap();
    assert_eq!(conversation.len(), 2);
    assert_eq!(conversation[0].content, "hello");
    assert_eq!(conversation[1].content, "hey");
}

#[tokio::test]
async fn test_non_member_cannot_send_group_message() {
    let service = create_test_service();
    let alice = service.add_user(user("u1", "Alice"), None).await.unwrap();
    let mallory = service.add_user(user("u5", "Mallory"), None).await.unwrap();

    let group = service.create_group("Trip".to_string(), vec![], &alice).await.unwrap();

    let result = service
        .send_group_message(&group.id, &mallory, "let me in".to_string())
        .await;
    assert!(matches!(result, Err(SplitchatError::NotGroupMember(_))));

    let result = service.get_group_messages(&group.id, &mallory).await;
    assert!(matches!(result, Err(SplitchatError::NotGroupMember(_))));
}
