//! Page model tests: validation, submit, feedback and navigation

use chirp::app::create_store;
use chirp::auth::AuthAction;
use chirp::pages::{
    ChangePasswordPage, CreateTweetPage, LoginPage, PageContext, SignUpPage, Submitted, ViewTweetsPage,
};
use chirp::router::{Route, Router};
use chirp::users::{UserProfile, UsersAction};
use chirp::validation::Field;
use chirp::ChirpEnvironment;
use chirp_api::mocks::{Endpoint, MockChirpApi};
use chirp_api::{ApiError, SignInRequest, Tweet, User};
use chirp_runtime::StoreError;
use serde_json::json;
use std::time::Duration;

fn context(api: MockChirpApi) -> PageContext<MockChirpApi> {
    PageContext::new(
        create_store(ChirpEnvironment::new(api)),
        Router::default(),
        Duration::from_secs(30),
    )
}

fn tweet(id: i64) -> Tweet {
    Tweet {
        id,
        content: format!("tweet {id}"),
        user_id: 1,
        shared_with: vec![],
    }
}

#[tokio::test(start_paused = true)]
async fn test_login_success_redirects_to_tweets() {
    let api = MockChirpApi::new().respond(Endpoint::SignIn, json!({"email": "user@example.com"}));
    let ctx = context(api);

    let mut page = LoginPage::new();
    page.set_field(Field::Email, "user@example.com");
    page.set_field(Field::Password, "secret1");

    let outcome = page.submit(&ctx).await.unwrap();
    assert_eq!(outcome, Submitted::Succeeded);
    assert_eq!(page.success_message(), Some("Login successful!"));
    assert!(page.errors().is_empty());
    assert!(!page.is_submitting());

    let auth = ctx.store.snapshot().await.auth;
    assert_eq!(auth.user.unwrap().email(), Some("user@example.com"));
    assert!(auth.success);

    // Navigation waits two seconds
    tokio::time::sleep(Duration::from_millis(1900)).await;
    assert_eq!(ctx.router.current(), Route::Login);
    page.wait_for_redirect().await;
    assert_eq!(ctx.router.current(), Route::Tweets);
}

/// Dispatch a sign-in outside any page
async fn sign_in_elsewhere(ctx: &PageContext<MockChirpApi>, email: &str) {
    let request_id = ctx.store.environment().next_request_id();
    let action = AuthAction::SignIn {
        request_id,
        request: SignInRequest::new(email, "secret1"),
    };
    let _ = ctx.store.send(action.into()).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_login_reports_its_own_request_not_an_earlier_one() {
    let api = MockChirpApi::new()
        .respond_after(Endpoint::SignIn, Duration::from_millis(40), json!({"email": "other@example.com"}))
        .fail_after(
            Endpoint::SignIn,
            Duration::from_millis(300),
            ApiError::ServerRejection {
                status: 401,
                body: json!({"message": "Invalid credentials"}),
            },
        );
    let ctx = context(api);

    sign_in_elsewhere(&ctx, "other@example.com").await;

    let mut page = LoginPage::new();
    page.set_field(Field::Email, "user@example.com");
    page.set_field(Field::Password, "wrong-password");

    let outcome = page.submit(&ctx).await.unwrap();
    assert!(matches!(outcome, Submitted::Failed(_)));
    assert_eq!(page.success_message(), None);
    assert_eq!(page.errors().get(Field::Server), Some("Invalid credentials"));

    let auth = ctx.store.snapshot().await.auth;
    assert!(auth.user.is_none(), "the earlier sign-in was superseded");
    assert!(!auth.loading);
    assert!(!auth.success);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(ctx.router.current(), Route::Login);
}

#[tokio::test(start_paused = true)]
async fn test_login_superseded_by_a_newer_sign_in() {
    let api = MockChirpApi::new()
        .respond_after(Endpoint::SignIn, Duration::from_millis(300), json!({"email": "user@example.com"}))
        .respond_after(Endpoint::SignIn, Duration::from_millis(10), json!({"email": "other@example.com"}));
    let ctx = context(api);

    let mut page = LoginPage::new();
    page.set_field(Field::Email, "user@example.com");
    page.set_field(Field::Password, "secret1");

    let (outcome, ()) = tokio::join!(page.submit(&ctx), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        sign_in_elsewhere(&ctx, "other@example.com").await;
    });

    assert_eq!(outcome.unwrap(), Submitted::Superseded);
    assert_eq!(page.success_message(), None);
    assert_eq!(
        ctx.store.state(|s| s.auth.user.clone()).await,
        Some(User::new("other@example.com"))
    );
    assert_eq!(ctx.router.current(), Route::Login);
}

#[tokio::test]
async fn test_login_rejection_sets_server_error() {
    let api = MockChirpApi::new().reject(Endpoint::SignIn, 401, json!({"message": "Invalid credentials"}));
    let ctx = context(api);

    let mut page = LoginPage::new();
    page.set_field(Field::Email, "user@example.com");
    page.set_field(Field::Password, "wrong-password");

    let outcome = page.submit(&ctx).await.unwrap();
    assert!(matches!(outcome, Submitted::Failed(_)));
    assert_eq!(page.errors().get(Field::Server), Some("Invalid credentials"));
    assert_eq!(page.success_message(), None);
    assert_eq!(ctx.router.current(), Route::Login);
}

#[tokio::test]
async fn test_invalid_input_never_reaches_backend() {
    let api = MockChirpApi::new();
    let ctx = context(api.clone());

    let mut page = LoginPage::new();
    page.set_field(Field::Email, "notanemail");
    page.set_field(Field::Password, "12345");

    assert_eq!(page.submit(&ctx).await.unwrap(), Submitted::Invalid);
    assert!(api.calls().is_empty());
    assert!(!ctx.store.state(|s| s.auth.loading).await);
}

#[tokio::test(start_paused = true)]
async fn test_signup_resets_auth_and_redirects_to_login() {
    let api = MockChirpApi::new().respond(Endpoint::SignUp, json!({"email": "ada@example.com", "name": "Ada"}));
    let ctx = context(api);
    ctx.router.navigate(Route::SignUp);

    let mut page = SignUpPage::new();
    page.set_field(Field::Name, "Ada");
    page.set_field(Field::Email, "ada@example.com");
    page.set_field(Field::Password, "secret1");

    assert_eq!(page.submit(&ctx).await.unwrap(), Submitted::Succeeded);
    assert_eq!(page.success_message(), Some("Sign up successful!"));
    assert_eq!(page.name(), "");
    assert_eq!(page.email(), "");
    assert!(ctx.store.state(|s| s.auth.is_reset()).await);
    assert_eq!(ctx.router.current(), Route::SignUp);

    page.wait_for_redirect().await;
    assert_eq!(ctx.router.current(), Route::Login);
    assert_eq!(page.success_message(), None);
}

#[tokio::test]
async fn test_signup_error_message_from_body() {
    let api = MockChirpApi::new().reject(Endpoint::SignUp, 409, json!({"message": "Email already in use"}));
    let ctx = context(api);

    let mut page = SignUpPage::new();
    page.set_field(Field::Name, "Ada");
    page.set_field(Field::Email, "ada@example.com");
    page.set_field(Field::Password, "secret1");

    let outcome = page.submit(&ctx).await.unwrap();
    assert!(matches!(outcome, Submitted::Failed(_)));
    assert_eq!(page.errors().get(Field::Server), Some("Email already in use"));
    assert_eq!(page.name(), "Ada");
}

#[tokio::test]
async fn test_change_password_feedback() {
    let api = MockChirpApi::new()
        .reject(Endpoint::ChangePassword, 400, json!({"message": "wrong password"}))
        .respond(Endpoint::ChangePassword, json!({}));
    let ctx = context(api.clone());

    let mut page = ChangePasswordPage::new();
    page.set_field(Field::CurrentPassword, "not-it");
    page.set_field(Field::NewPassword, "brand-new");
    assert!(matches!(page.submit(&ctx).await.unwrap(), Submitted::Failed(_)));
    assert_eq!(page.errors().get(Field::Server), Some("wrong password"));

    let status = ctx.store.state(ChangePasswordPage::status).await;
    assert!(!status.loading);
    assert_eq!(status.lines(), vec!["Error: wrong password"]);

    page.set_field(Field::CurrentPassword, "the-real-one");
    assert_eq!(page.submit(&ctx).await.unwrap(), Submitted::Succeeded);
    assert_eq!(page.success_message(), Some("Password changed successfully!"));
    assert!(page.errors().is_empty());
    assert!(ctx.store.state(ChangePasswordPage::status).await.lines().is_empty());
    assert_eq!(
        api.calls()[1].body,
        json!({"currentPassword": "the-real-one", "newPassword": "brand-new"})
    );
}

#[tokio::test]
async fn test_create_tweet_then_view() {
    let api = MockChirpApi::new()
        .respond(Endpoint::FetchTweets, vec![tweet(1), tweet(2)])
        .respond(Endpoint::CreateTweet, tweet(3));
    let ctx = context(api.clone());

    let mut view = ViewTweetsPage::new();
    assert_eq!(view.open(&ctx).await.unwrap(), Submitted::Succeeded);
    assert!(view.is_loaded());

    let _ = ctx
        .store
        .send(
            UsersAction::Loaded(vec![UserProfile {
                id: 2,
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
            }])
            .into(),
        )
        .await
        .unwrap();

    let mut page = CreateTweetPage::new();
    page.set_field(Field::Content, "tweet 3");
    page.set_field(Field::Users, "2, 5");
    let targets = ctx.store.state(|s| page.share_targets(&s.users)).await;
    assert_eq!(targets, vec!["Grace", "#5"]);

    assert_eq!(page.submit(&ctx).await.unwrap(), Submitted::Succeeded);
    assert_eq!(page.success_message(), Some("Tweet posted!"));
    assert_eq!(api.calls()[1].body, json!({"content": "tweet 3", "users": [2, 5]}));

    let tweets = ctx.store.state(|s| ViewTweetsPage::tweets(s).to_vec()).await;
    assert_eq!(tweets, vec![tweet(1), tweet(2), tweet(3)]);
}

#[tokio::test]
async fn test_view_tweets_failure_status() {
    let api = MockChirpApi::new().reject(Endpoint::FetchTweets, 500, json!("Internal Server Error"));
    let ctx = context(api);

    let mut view = ViewTweetsPage::new();
    let outcome = view.open(&ctx).await.unwrap();
    assert!(matches!(outcome, Submitted::Failed(_)));

    let status = ctx.store.state(ViewTweetsPage::status).await;
    assert_eq!(status.lines(), vec!["Error: Request failed with status code 500"]);
}

#[tokio::test]
async fn test_submit_times_out_when_backend_stalls() {
    let api = MockChirpApi::new().respond_after(Endpoint::SignIn, Duration::from_millis(500), json!({"email": "a@b.com"}));
    let ctx = PageContext::new(
        create_store(ChirpEnvironment::new(api)),
        Router::default(),
        Duration::from_millis(50),
    );

    let mut page = LoginPage::new();
    page.set_field(Field::Email, "a@b.com");
    page.set_field(Field::Password, "secret1");

    let result = page.submit(&ctx).await;
    assert!(matches!(result, Err(StoreError::Timeout)));
    assert!(!page.is_submitting());
    assert!(ctx.store.state(|s| s.auth.loading).await);
}
