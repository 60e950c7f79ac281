mod helpers;

use aurum_domain::account::AccountRole;
use aurum_web::error::WebServiceError;
use aurum_web::usecase::login::{LoginInput, LoginUseCase};

use crate::helpers::{MockAccountRepo, test_admin, test_customer, test_google_customer};

fn input(email: &str, password: &str, role: AccountRole) -> LoginInput {
    LoginInput {
        email: email.to_owned(),
        password: password.to_owned(),
        role,
    }
}

#[tokio::test]
async fn should_login_customer_with_correct_password() {
    let customer = test_customer("dana@example.com", "Password1");
    let uc = LoginUseCase {
        accounts: MockAccountRepo::new(vec![customer.clone()]),
    };

    let account_id = uc
        .execute(input("Dana@Example.com", "Password1", AccountRole::Customer))
        .await
        .unwrap();
    assert_eq!(account_id, customer.id);
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let uc = LoginUseCase {
        accounts: MockAccountRepo::new(vec![test_customer("dana@example.com", "Password1")]),
    };
    let result = uc
        .execute(input("dana@example.com", "Password2", AccountRole::Customer))
        .await;
    assert!(matches!(result, Err(WebServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_unknown_email() {
    let uc = LoginUseCase {
        accounts: MockAccountRepo::empty(),
    };
    let result = uc
        .execute(input("nobody@example.com", "Password1", AccountRole::Customer))
        .await;
    assert!(matches!(result, Err(WebServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_admin_account_on_customer_login() {
    let uc = LoginUseCase {
        accounts: MockAccountRepo::new(vec![test_admin("boss@example.com", "Password1")]),
    };
    let result = uc
        .execute(input("boss@example.com", "Password1", AccountRole::Customer))
        .await;
    assert!(
        matches!(result, Err(WebServiceError::InvalidCredentials)),
        "admin on the storefront surface reads as nonexistent, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_customer_account_on_admin_login() {
    let uc = LoginUseCase {
        accounts: MockAccountRepo::new(vec![test_customer("dana@example.com", "Password1")]),
    };
    let result = uc
        .execute(input("dana@example.com", "Password1", AccountRole::Admin))
        .await;
    assert!(matches!(result, Err(WebServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn should_login_admin_on_admin_surface() {
    let admin = test_admin("boss@example.com", "Password1");
    let uc = LoginUseCase {
        accounts: MockAccountRepo::new(vec![admin.clone()]),
    };
    let account_id = uc
        .execute(input("boss@example.com", "Password1", AccountRole::Admin))
        .await
        .unwrap();
    assert_eq!(account_id, admin.id);
}

#[tokio::test]
async fn should_report_blocked_before_checking_password() {
    let mut customer = test_customer("dana@example.com", "Password1");
    customer.is_blocked = true;

    let uc = LoginUseCase {
        accounts: MockAccountRepo::new(vec![customer]),
    };

    // Even with the wrong password, a blocked account answers AccountBlocked:
    // the blocked check runs before any password comparison.
    let result = uc
        .execute(input("dana@example.com", "WrongPassword9", AccountRole::Customer))
        .await;
    assert!(
        matches!(result, Err(WebServiceError::AccountBlocked)),
        "expected AccountBlocked, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_blocked_admin() {
    let mut admin = test_admin("boss@example.com", "Password1");
    admin.is_blocked = true;

    let uc = LoginUseCase {
        accounts: MockAccountRepo::new(vec![admin]),
    };
    let result = uc
        .execute(input("boss@example.com", "Password1", AccountRole::Admin))
        .await;
    assert!(matches!(result, Err(WebServiceError::AccountBlocked)));
}

#[tokio::test]
async fn should_point_google_only_account_at_google_signin() {
    let uc = LoginUseCase {
        accounts: MockAccountRepo::new(vec![test_google_customer(
            "dana@example.com",
            "google-sub-1",
        )]),
    };
    let result = uc
        .execute(input("dana@example.com", "Password1", AccountRole::Customer))
        .await;
    assert!(matches!(result, Err(WebServiceError::UseGoogleSignin)));
}

#[tokio::test]
async fn should_reject_empty_credentials() {
    let uc = LoginUseCase {
        accounts: MockAccountRepo::empty(),
    };
    let result = uc.execute(input("", "", AccountRole::Customer)).await;
    assert!(matches!(result, Err(WebServiceError::MissingFields)));
}
