mod helpers;

use chrono::{Duration, Utc};

use aurum_domain::account::AccountRole;
use aurum_web::domain::types::{OneTimeCode, PendingRegistration};
use aurum_web::error::WebServiceError;
use aurum_web::usecase::signup::{
    ResendSignupUseCase, StartSignupInput, StartSignupUseCase, VerifySignupInput,
    VerifySignupUseCase,
};

use crate::helpers::{MockAccountRepo, MockMailer, test_customer};

fn signup_input() -> StartSignupInput {
    StartSignupInput {
        name: "Dana".to_owned(),
        email: "Dana@Example.com".to_owned(),
        phone: Some("555-0100".to_owned()),
        password: "Password1".to_owned(),
        confirm_password: "Password1".to_owned(),
    }
}

#[tokio::test]
async fn should_mail_code_and_return_pending_registration() {
    let mailer = MockMailer::new();
    let sent_handle = mailer.sent_handle();

    let uc = StartSignupUseCase {
        accounts: MockAccountRepo::empty(),
        mailer,
    };

    let pending = uc.execute(signup_input()).await.unwrap();

    assert_eq!(pending.email, "dana@example.com", "email must be lowercased");
    assert_eq!(pending.otp.code.len(), 6);
    assert!(pending.otp.code.chars().all(|c| c.is_ascii_digit()));
    assert!(pending.otp.expires_at > Utc::now());

    let sent = sent_handle.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "dana@example.com");
    assert_eq!(sent[0].1, pending.otp.code);
}

#[tokio::test]
async fn should_reject_duplicate_email_without_mailing() {
    let mailer = MockMailer::new();
    let sent_handle = mailer.sent_handle();

    let uc = StartSignupUseCase {
        accounts: MockAccountRepo::new(vec![test_customer("dana@example.com", "Password1")]),
        mailer,
    };

    let result = uc.execute(signup_input()).await;

    assert!(
        matches!(result, Err(WebServiceError::EmailTaken)),
        "expected EmailTaken, got {result:?}"
    );
    assert!(sent_handle.lock().unwrap().is_empty(), "no mail on conflict");
}

#[tokio::test]
async fn should_reject_duplicate_phone() {
    let mut existing = test_customer("other@example.com", "Password1");
    existing.phone = Some("555-0100".to_owned());

    let uc = StartSignupUseCase {
        accounts: MockAccountRepo::new(vec![existing]),
        mailer: MockMailer::new(),
    };

    let result = uc.execute(signup_input()).await;
    assert!(matches!(result, Err(WebServiceError::PhoneTaken)));
}

#[tokio::test]
async fn should_reject_password_mismatch() {
    let uc = StartSignupUseCase {
        accounts: MockAccountRepo::empty(),
        mailer: MockMailer::new(),
    };

    let result = uc
        .execute(StartSignupInput {
            confirm_password: "Different1".to_owned(),
            ..signup_input()
        })
        .await;
    assert!(matches!(result, Err(WebServiceError::PasswordMismatch)));
}

#[tokio::test]
async fn should_reject_weak_password() {
    let uc = StartSignupUseCase {
        accounts: MockAccountRepo::empty(),
        mailer: MockMailer::new(),
    };

    let result = uc
        .execute(StartSignupInput {
            password: "password".to_owned(),
            confirm_password: "password".to_owned(),
            ..signup_input()
        })
        .await;
    assert!(matches!(result, Err(WebServiceError::WeakPassword)));
}

#[tokio::test]
async fn should_reject_missing_fields() {
    let uc = StartSignupUseCase {
        accounts: MockAccountRepo::empty(),
        mailer: MockMailer::new(),
    };

    let result = uc
        .execute(StartSignupInput {
            name: "   ".to_owned(),
            ..signup_input()
        })
        .await;
    assert!(matches!(result, Err(WebServiceError::MissingFields)));
}

#[tokio::test]
async fn should_store_nothing_when_mail_delivery_fails() {
    let repo = MockAccountRepo::empty();
    let accounts_handle = repo.accounts_handle();

    let uc = StartSignupUseCase {
        accounts: repo,
        mailer: MockMailer::failing(),
    };

    let result = uc.execute(signup_input()).await;

    assert!(
        matches!(result, Err(WebServiceError::MailDelivery)),
        "expected MailDelivery, got {result:?}"
    );
    assert!(accounts_handle.lock().unwrap().is_empty());
}

// ── Verify step ──────────────────────────────────────────────────────────────

fn pending_with_code(code: &str) -> PendingRegistration {
    PendingRegistration {
        name: "Dana".to_owned(),
        email: "dana@example.com".to_owned(),
        phone: None,
        password: "Password1".to_owned(),
        otp: OneTimeCode::issue(code.to_owned(), Utc::now()),
    }
}

#[tokio::test]
async fn should_create_account_on_correct_code() {
    let repo = MockAccountRepo::empty();
    let accounts_handle = repo.accounts_handle();

    let uc = VerifySignupUseCase { accounts: repo };

    let account_id = uc
        .execute(VerifySignupInput {
            pending: pending_with_code("123456"),
            code: "123456".to_owned(),
        })
        .await
        .unwrap();

    let accounts = accounts_handle.lock().unwrap();
    assert_eq!(accounts.len(), 1);
    let created = &accounts[0];
    assert_eq!(created.id, account_id);
    assert_eq!(created.email, "dana@example.com");
    assert_eq!(created.role, AccountRole::Customer);
    assert!(!created.is_blocked);
    // Stored as a bcrypt hash, never the raw password.
    let hash = created.password_hash.as_deref().unwrap();
    assert_ne!(hash, "Password1");
    assert!(bcrypt::verify("Password1", hash).unwrap());
}

#[tokio::test]
async fn should_reject_expired_code_even_if_matching() {
    let repo = MockAccountRepo::empty();
    let accounts_handle = repo.accounts_handle();

    let mut pending = pending_with_code("123456");
    pending.otp.expires_at = Utc::now() - Duration::seconds(1);

    let uc = VerifySignupUseCase { accounts: repo };
    let result = uc
        .execute(VerifySignupInput {
            pending,
            code: "123456".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(WebServiceError::ExpiredOtp)),
        "expected ExpiredOtp, got {result:?}"
    );
    assert!(accounts_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_wrong_code() {
    let uc = VerifySignupUseCase {
        accounts: MockAccountRepo::empty(),
    };
    let result = uc
        .execute(VerifySignupInput {
            pending: pending_with_code("123456"),
            code: "654321".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(WebServiceError::InvalidOtp)));
}

#[tokio::test]
async fn should_reject_when_email_was_taken_while_code_sat_in_inbox() {
    let uc = VerifySignupUseCase {
        accounts: MockAccountRepo::new(vec![test_customer("dana@example.com", "Password1")]),
    };
    let result = uc
        .execute(VerifySignupInput {
            pending: pending_with_code("123456"),
            code: "123456".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(WebServiceError::EmailTaken)));
}

// ── Resend step ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_mail_fresh_code_on_resend() {
    let mailer = MockMailer::new();
    let sent_handle = mailer.sent_handle();

    let uc = ResendSignupUseCase { mailer };
    let pending = pending_with_code("123456");
    let otp = uc.execute(&pending).await.unwrap();

    assert_eq!(otp.code.len(), 6);
    let sent = sent_handle.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0], ("dana@example.com".to_owned(), otp.code.clone()));
}

#[tokio::test]
async fn should_not_issue_code_when_resend_mail_fails() {
    let uc = ResendSignupUseCase {
        mailer: MockMailer::failing(),
    };
    let result = uc.execute(&pending_with_code("123456")).await;
    assert!(matches!(result, Err(WebServiceError::MailDelivery)));
}
