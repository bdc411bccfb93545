//! End-to-end workflow tests against a SQLite user store and the in-process
//! session cache.

use std::sync::Arc;
use std::time::Duration;

use entry_config::{DatabaseConfig, PasswordScheme};
use entry_database::{initialize_database, NewUser, UserRepository, UserStatus};
use entry_identity::{
    CredentialValidator, EditRequest, IdentityError, IdentityService, LoginRequest,
    MemorySessionStore, RegisterRequest, UserRecordGateway,
};
use tempfile::TempDir;

type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

struct TestContext {
    repository: UserRepository,
    service: IdentityService,
    _temp_dir: TempDir,
}

impl TestContext {
    async fn new(scheme: PasswordScheme) -> TestResult<Self> {
        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("identity.sqlite");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 5,
        };

        let pool = initialize_database(&config).await?;
        let repository = UserRepository::new(pool);
        let sessions = Arc::new(MemorySessionStore::new(Duration::from_secs(3_600)));
        let service = IdentityService::new(
            Arc::new(repository.clone()),
            sessions,
            CredentialValidator::new(scheme),
        );

        Ok(Self {
            repository,
            service,
            _temp_dir: temp_dir,
        })
    }

    async fn new_default() -> TestResult<Self> {
        Self::new(PasswordScheme::Argon2).await
    }

    async fn register(&self, username: &str, password: &str) -> Result<(), IdentityError> {
        self.service
            .register(&RegisterRequest {
                username: username.to_string(),
                password: password.to_string(),
                nickname: format!("{username} nick"),
                profile_pic: String::new(),
            })
            .await
            .map(|_| ())
    }
}

#[tokio::test]
async fn register_login_and_resolve_session() -> TestResult {
    let ctx = TestContext::new_default().await?;

    ctx.register("alice", "correct horse").await?;
    let response = ctx
        .service
        .login(&LoginRequest::new("alice", "correct horse"))
        .await?;

    assert!(!response.session_id.is_empty());
    assert_eq!(ctx.service.authenticate(&response.session_id).await?, "alice");

    let stored = ctx.repository.find_by_username("alice").await?.unwrap();
    assert!(stored.password_hash.starts_with("$argon2"));
    assert_eq!(stored.status, UserStatus::Enabled);
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_is_rejected() -> TestResult {
    let ctx = TestContext::new(PasswordScheme::Sha256).await?;

    ctx.register("alice", "first").await?;
    let err = ctx.register("alice", "second").await.unwrap_err();

    assert!(matches!(err, IdentityError::DuplicateUsername));
    let stored = ctx.repository.find_by_username("alice").await?.unwrap();
    assert!(ctx.service.credentials().verify("first", &stored.password_hash)?);
    Ok(())
}

#[tokio::test]
async fn disabled_account_cannot_log_in_or_edit() -> TestResult {
    let ctx = TestContext::new(PasswordScheme::Sha256).await?;
    let password_hash = ctx.service.credentials().hash("secret")?;
    ctx.repository
        .create(&NewUser {
            username: "bob".to_string(),
            password_hash,
            nickname: "Bob".to_string(),
            profile_pic: "bob.png".to_string(),
            status: UserStatus::Disabled,
        })
        .await?;

    let login = ctx
        .service
        .login(&LoginRequest::new("bob", "secret"))
        .await
        .unwrap_err();
    assert!(matches!(login, IdentityError::AccountDisabled));

    let edit = ctx
        .service
        .edit_profile(&EditRequest {
            username: "bob".to_string(),
            nickname: "Robert".to_string(),
            profile_pic: "robert.png".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(edit, IdentityError::AccountDisabled));

    let stored = ctx.repository.find_by_username("bob").await?.unwrap();
    assert_eq!(stored.nickname, "Bob");
    assert_eq!(stored.profile_pic, "bob.png");
    Ok(())
}

#[tokio::test]
async fn edit_profile_persists_only_profile_fields() -> TestResult {
    let ctx = TestContext::new(PasswordScheme::Sha256).await?;
    ctx.register("carol", "secret").await?;
    let before = ctx.repository.find_by_username("carol").await?.unwrap();

    ctx.service
        .edit_profile(&EditRequest {
            username: "carol".to_string(),
            nickname: "Caz".to_string(),
            profile_pic: "https://example.com/caz.png".to_string(),
        })
        .await?;

    let after = ctx.repository.find_by_username("carol").await?.unwrap();
    assert_eq!(after.nickname, "Caz");
    assert_eq!(after.profile_pic, "https://example.com/caz.png");
    assert_eq!(after.username, before.username);
    assert_eq!(after.password_hash, before.password_hash);
    assert_eq!(after.status, before.status);
    Ok(())
}

#[tokio::test]
async fn invalid_credentials_do_not_reveal_account_existence() -> TestResult {
    let ctx = TestContext::new(PasswordScheme::Sha256).await?;
    ctx.register("alice", "secret").await?;

    let wrong_password = ctx
        .service
        .login(&LoginRequest::new("alice", "nope"))
        .await
        .unwrap_err();
    let no_such_user = ctx
        .service
        .login(&LoginRequest::new("nobody", "nope"))
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, IdentityError::InvalidCredentials));
    assert!(matches!(no_such_user, IdentityError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), no_such_user.to_string());
    Ok(())
}

#[tokio::test]
async fn legacy_unsalted_rows_still_verify_after_switching_to_argon2() -> TestResult {
    let legacy = TestContext::new(PasswordScheme::Sha256).await?;
    legacy.register("dave", "old-password").await?;
    let stored = legacy.repository.find_by_username("dave").await?.unwrap();
    assert!(!stored.password_hash.starts_with("$argon2"));

    let upgraded = IdentityService::new(
        Arc::new(legacy.repository.clone()),
        Arc::new(MemorySessionStore::new(Duration::from_secs(60))),
        CredentialValidator::new(PasswordScheme::Argon2),
    );
    let response = upgraded
        .login(&LoginRequest::new("dave", "old-password"))
        .await?;
    assert_eq!(upgraded.authenticate(&response.session_id).await?, "dave");
    Ok(())
}

#[tokio::test]
async fn racing_registrations_fall_back_on_unique_constraint() -> TestResult {
    let ctx = TestContext::new(PasswordScheme::Sha256).await?;

    let mut handles = Vec::new();
    for _ in 0..4 {
        let service = ctx.service.clone();
        handles.push(tokio::spawn(async move {
            service
                .register(&RegisterRequest {
                    username: "erin".to_string(),
                    password: "secret".to_string(),
                    nickname: "Erin".to_string(),
                    profile_pic: String::new(),
                })
                .await
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await? {
            Ok(_) => created += 1,
            Err(IdentityError::DuplicateUsername) => {}
            Err(other) => return Err(other.into()),
        }
    }

    assert_eq!(created, 1);
    assert!(ctx.repository.get_by_username("erin").await.is_ok());
    Ok(())
}
