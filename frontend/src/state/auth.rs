use crate::{
    api::{ApiClient, ApiError, LoginRequest, StoredUser},
    state::permissions::{use_permissions, Permissions},
    utils::navigation::LOGIN_PATH,
};
use leptos::*;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<StoredUser>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    /// A stored token is trusted provisionally until the backend confirms it.
    pub fn from_client(client: &ApiClient) -> Self {
        let session = client.session();
        let has_token = session.is_authenticated();
        Self {
            user: session.user_info(),
            is_authenticated: has_token,
            loading: has_token,
        }
    }
}

fn create_auth_context(client: ApiClient) -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState::from_client(&client));
    if auth_state.get_untracked().loading {
        create_effect(move |_| {
            let client = client.clone();
            spawn_local(async move {
                verify_session(&client, set_auth_state).await;
            });
        });
    }
    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let client = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let ctx = create_auth_context(client);
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

/// Confirms the stored token against `/my/profile`.
///
/// A rejected token has already been cleared by the client. Transport
/// failures keep the provisional session.
pub async fn verify_session(client: &ApiClient, set_auth_state: WriteSignal<AuthState>) {
    match client.get_profile().await {
        Ok(_) => set_auth_state.update(|state| state.loading = false),
        Err(error) if error.is_unauthorized() => set_auth_state.update(|state| {
            state.user = None;
            state.is_authenticated = false;
            state.loading = false;
        }),
        Err(error) => {
            log::warn!("session check failed: {}", error);
            set_auth_state.update(|state| state.loading = false);
        }
    }
}

pub async fn login_request(
    request: LoginRequest,
    client: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
    permissions: Permissions,
) -> Result<(), ApiError> {
    set_auth_state.update(|state| state.loading = true);

    match client.login(&request).await {
        Ok(response) => {
            let mut user = response.user.unwrap_or_default();
            if user.role.is_none() && !user.is_admin {
                match client.refresh_current_user().await {
                    Ok(current) => user = current,
                    Err(error) => log::warn!("could not load the signed-in user: {}", error),
                }
            }
            permissions.update_permissions(&user);
            log::info!("signed in as {}", user.username);
            set_auth_state.update(|state| {
                state.user = Some(user);
                state.is_authenticated = true;
                state.loading = false;
            });
            Ok(())
        }
        Err(error) => {
            set_auth_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

/// Ends the session locally; the backend keeps no server-side session.
pub fn logout(client: &ApiClient, set_auth_state: WriteSignal<AuthState>) {
    client.logout();
    set_auth_state.update(|state| {
        state.user = None;
        state.is_authenticated = false;
        state.loading = false;
    });
}

pub fn use_login_action() -> Action<LoginRequest, Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let client = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let permissions = use_permissions();

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let client = client.clone();
        async move { login_request(payload, &client, set_auth, permissions).await }
    })
}

pub fn use_logout() -> Callback<()> {
    let (_auth, set_auth) = use_auth();
    let client = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    Callback::new(move |_| {
        logout(&client, set_auth);
        client.navigator().go_to(LOGIN_PATH);
    })
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        state::{
            permissions::{Permission, Role},
            session::{TOKEN_KEY, USER_INFO_KEY},
        },
        test_support::helpers::memory_client,
        utils::storage::KeyValueStore,
    };
    use httpmock::prelude::*;

    #[tokio::test]
    async fn login_and_logout_update_auth_state() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200).json_body(serde_json::json!({
                "access_token": "tok-9",
                "token_type": "bearer",
                "user": { "employee_id": 4, "name": "li", "role": "manager" }
            }));
        });

        let runtime = create_runtime();
        let (client, store, _notifier) = memory_client(&server.url("/api"));
        let (state, set_state) = create_signal(AuthState::default());
        let permissions = Permissions::unresolved();

        login_request(
            LoginRequest {
                username: "li".into(),
                password: "secret".into(),
            },
            &client,
            set_state,
            permissions,
        )
        .await
        .unwrap();

        let snapshot = state.get_untracked();
        assert!(snapshot.is_authenticated);
        assert_eq!(snapshot.user.and_then(|u| u.role).as_deref(), Some("manager"));
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-9"));
        assert!(permissions.is_manager());
        assert!(permissions.has(Permission::ScheduleDelete));

        logout(&client, set_state);
        let snapshot = state.get_untracked();
        assert!(!snapshot.is_authenticated);
        assert!(store.get(TOKEN_KEY).is_none());
        assert!(store.get(USER_INFO_KEY).is_none());
        runtime.dispose();
    }

    #[tokio::test]
    async fn login_without_user_loads_it_from_employees_me() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200).json_body(serde_json::json!({
                "access_token": "tok-3",
                "token_type": "bearer"
            }));
        });
        let me = server.mock(|when, then| {
            when.method(GET).path("/api/employees/me");
            then.status(200).json_body(serde_json::json!({
                "employee_id": 2,
                "employee_no": "E002",
                "name": "周八",
                "is_admin": true
            }));
        });

        let runtime = create_runtime();
        let (client, store, _notifier) = memory_client(&server.url("/api"));
        let (state, set_state) = create_signal(AuthState::default());
        let permissions = Permissions::unresolved();

        login_request(
            LoginRequest {
                username: "zhou".into(),
                password: "secret".into(),
            },
            &client,
            set_state,
            permissions,
        )
        .await
        .unwrap();

        assert_eq!(me.calls(), 1);
        let user = state.get_untracked().user.unwrap();
        assert_eq!(user.id, Some(2));
        assert_eq!(user.role.as_deref(), Some("admin"));
        assert!(permissions.is_admin());
        assert!(store.get(USER_INFO_KEY).unwrap().contains("周八"));
        runtime.dispose();
    }

    #[tokio::test]
    async fn rejected_token_signs_out() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/my/profile");
            then.status(401);
        });

        let runtime = create_runtime();
        let (client, store, _notifier) = memory_client(&server.url("/api"));
        store.set(TOKEN_KEY, "stale").unwrap();
        let initial = AuthState::from_client(&client);
        assert!(initial.loading && initial.is_authenticated);
        let (state, set_state) = create_signal(initial);

        verify_session(&client, set_state).await;
        let snapshot = state.get_untracked();
        assert!(!snapshot.is_authenticated);
        assert!(!snapshot.loading);
        assert!(store.get(TOKEN_KEY).is_none());
        assert_eq!(Role::from_user(snapshot.user.as_ref()), Role::Employee);
        runtime.dispose();
    }
}
