use crate::core::errors::SplitchatError;
use crate::core::models::user::User;
use crate::tests::{create_test_service, user};
use uuid::Uuid;

#[tokio::test]
async fn test_add_user() {
    let service = create_test_service();
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
    };
    let added_user = service.add_user(user.clone(), None).await.unwrap();
    assert_eq!(added_user.id, user.id);
    assert_eq!(added_user.email, user.email);

    let fetched = service.get_user(&user.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Test User");
}

#[tokio::test]
async fn test_add_user_duplicate_email() {
    let service = create_test_service();
    let first = User {
        id: "u1".to_string(),
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
    };
    let second = User {
        id: "u2".to_string(),
        name: "Other Alice".to_string(),
        email: "alice@example.com".to_string(),
    };
    service.add_user(first, None).await.unwrap();

    let result = service.add_user(second, None).await;
    assert!(matches!(result, Err(SplitchatError::EmailAlreadyRegistered(_))));
}

#[tokio::test]
async fn test_add_user_invalid_email() {
    let service = create_test_service();
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: "Test User".to_string(),
        email: "invalid".to_string(),
    };
    let result = service.add_user(user, None).await;
    assert!(matches!(result, Err(SplitchatError::InvalidEmail(_))));
}

#[tokio::test]
async fn test_add_user_missing_email() {
    let service = create_test_service();
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: "Test User".to_string(),
        email: String::new(),
    };
    let result = service.add_user(user, None).await;
    assert!(matches!(result, Err(SplitchatError::MissingEmail)));
}

#[tokio::test]
async fn test_user_creation_is_logged() {
    let service = create_test_service();
    service.add_user(user("u1", "Alice"), None).await.unwrap();

    let logs = service.get_app_logs().await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "user_added");
    assert_eq!(logs[0].user_id, None);
}
