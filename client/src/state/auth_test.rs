use super::*;
use std::cell::RefCell;

// =============================================================
// FakeApi
// =============================================================

fn alice() -> PublicUser {
    PublicUser {
        id: "u1".to_owned(),
        email: "a@b.com".to_owned(),
        created_at: "2025-01-01T00:00:00Z".to_owned(),
    }
}

fn unauthorized() -> ApiError {
    ApiError::from_response(401, Some(serde_json::json!({ "ok": false, "error": "Invalid credentials" })))
}

/// Canned responses plus a record of `loading` as seen mid-call.
struct FakeApi {
    user: Result<PublicUser, ApiError>,
    logout: Result<(), ApiError>,
    observed: RwSignal<AuthState>,
    loading_during_call: RefCell<Vec<bool>>,
}

impl FakeApi {
    fn new(user: Result<PublicUser, ApiError>, observed: RwSignal<AuthState>) -> Self {
        Self { user, logout: Ok(()), observed, loading_during_call: RefCell::new(Vec::new()) }
    }

    fn note(&self) {
        self.loading_during_call
            .borrow_mut()
            .push(self.observed.get_untracked().loading);
    }
}

impl AuthApi for FakeApi {
    async fn me(&self) -> Result<PublicUser, ApiError> {
        self.note();
        self.user.clone()
    }

    async fn register(&self, _email: &str, _password: &str) -> Result<PublicUser, ApiError> {
        self.note();
        self.user.clone()
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<PublicUser, ApiError> {
        self.note();
        self.user.clone()
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.note();
        self.logout.clone()
    }
}

fn client(user: Result<PublicUser, ApiError>) -> AuthClient<FakeApi> {
    let state = RwSignal::new(AuthState::default());
    AuthClient::new(FakeApi::new(user, state), state)
}

fn snapshot(client: &AuthClient<FakeApi>) -> AuthState {
    client.state().get_untracked()
}

// =============================================================
// AuthState
// =============================================================

#[test]
fn auth_state_default_is_logged_out_and_idle() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(!state.loading);
    assert!(!state.is_authed());
}

#[test]
fn auth_state_with_user_is_authed() {
    let state = AuthState { user: Some(alice()), loading: false };
    assert!(state.is_authed());
}

// =============================================================
// refresh
// =============================================================

#[tokio::test]
async fn refresh_sets_user_on_success() {
    let client = client(Ok(alice()));
    client.refresh().await;
    assert_eq!(snapshot(&client), AuthState { user: Some(alice()), loading: false });
    assert_eq!(*client.api().loading_during_call.borrow(), vec![true]);
}

#[tokio::test]
async fn refresh_clears_user_on_failure_without_erroring() {
    let client = client(Err(ApiError::transport("offline")));
    client.state().set(AuthState { user: Some(alice()), loading: false });
    client.refresh().await;
    assert_eq!(snapshot(&client), AuthState::default());
}

// =============================================================
// register / login
// =============================================================

#[tokio::test]
async fn login_success_sets_user() {
    let client = client(Ok(alice()));
    let user = client.login("a@b.com", "longenough1").await.unwrap();
    assert_eq!(user, alice());
    assert_eq!(snapshot(&client).user, Some(alice()));
    assert!(!snapshot(&client).loading);
    assert_eq!(*client.api().loading_during_call.borrow(), vec![true]);
}

#[tokio::test]
async fn login_failure_propagates_and_keeps_state() {
    let client = client(Err(unauthorized()));
    let err = client.login("a@b.com", "wrongpassword").await.unwrap_err();
    assert_eq!(err.status, 401);
    assert_eq!(err.message, "Invalid credentials");
    assert_eq!(snapshot(&client), AuthState::default());
}

#[tokio::test]
async fn register_success_sets_user() {
    let client = client(Ok(alice()));
    client.register("a@b.com", "longenough1").await.unwrap();
    assert!(snapshot(&client).is_authed());
}

#[tokio::test]
async fn register_failure_clears_loading() {
    let client = client(Err(ApiError::from_response(409, Some(serde_json::json!({ "error": "Email already in use" })))));
    let err = client.register("a@b.com", "longenough1").await.unwrap_err();
    assert_eq!(err.message, "Email already in use");
    assert!(!snapshot(&client).loading);
}

// =============================================================
// logout
// =============================================================

#[tokio::test]
async fn logout_clears_user() {
    let client = client(Ok(alice()));
    client.login("a@b.com", "longenough1").await.unwrap();
    client.logout().await.unwrap();
    assert_eq!(snapshot(&client), AuthState::default());
}

#[tokio::test]
async fn logout_clears_user_even_when_server_fails() {
    let state = RwSignal::new(AuthState { user: Some(alice()), loading: false });
    let mut api = FakeApi::new(Ok(alice()), state);
    api.logout = Err(ApiError::transport("offline"));
    let client = AuthClient::new(api, state);

    let err = client.logout().await.unwrap_err();
    assert_eq!(err.status, 0);
    assert_eq!(snapshot(&client), AuthState::default());
}
