#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use std::{rc::Rc, time::Duration};

    use crate::api::{retry::RetryPolicy, ApiClient, StoredUser};
    use crate::state::{
        auth::AuthState,
        notifications::RecordingNotifier,
        permissions::{Permissions, Role},
        session::{Session, TOKEN_KEY, USER_INFO_KEY},
    };
    use crate::utils::{
        navigation::{MemoryNavigator, HOME_PATH},
        storage::{KeyValueStore, MemoryStore},
    };
    use leptos::*;

    /// Client wired to in-memory storage, navigation and notifications.
    pub fn memory_client(base_url: &str) -> (ApiClient, MemoryStore, RecordingNotifier) {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::new();
        let client = ApiClient::new_with_base_url(base_url)
            .with_session(Session::new(Rc::new(store.clone())))
            .with_navigator(Rc::new(MemoryNavigator::at(HOME_PATH)))
            .with_notifier(Rc::new(notifier.clone()))
            .with_retry(RetryPolicy::disabled())
            .with_timeout(Duration::from_secs(5));
        (client, store, notifier)
    }

    pub fn user_with_role(role: Role) -> StoredUser {
        StoredUser {
            id: Some(1),
            username: format!("{}-user", role.as_str()),
            role: Some(role.as_str().to_string()),
            is_admin: role == Role::Admin,
        }
    }

    /// Signs a user in against a memory-backed client and provides the
    /// client, auth state and permissions as context.
    pub fn provide_signed_in(role: Role) -> (ApiClient, Permissions) {
        let (client, store, _notifier) = memory_client("http://127.0.0.1:9/api");
        let user = user_with_role(role);
        store.set(TOKEN_KEY, "test-token").unwrap();
        store
            .set(USER_INFO_KEY, &serde_json::to_string(&user).unwrap())
            .unwrap();
        provide_context(client.clone());
        let (auth, set_auth) = create_signal(AuthState {
            user: Some(user),
            is_authenticated: true,
            loading: false,
        });
        provide_context((auth, set_auth));
        let permissions = Permissions::resolved(client.session());
        provide_context(permissions);
        (client, permissions)
    }

    pub fn provide_auth(user: Option<StoredUser>, loading: bool) {
        let (auth, set_auth) = create_signal(AuthState {
            is_authenticated: user.is_some(),
            user,
            loading,
        });
        provide_context((auth, set_auth));
    }
}
