use super::utils::{login_failure, LoginFormState};
use crate::api::{ApiClient, ApiError, LoginRequest};
use crate::state::auth;
use crate::utils::navigation::HOME_PATH;
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub login_action: Action<LoginRequest, Result<(), ApiError>>,
}

impl LoginViewModel {
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        match self.form.to_request() {
            Ok(request) => {
                self.error.set(None);
                self.login_action.dispatch(request);
            }
            Err(err) => self.error.set(Some(err)),
        }
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let form = LoginFormState::default();
    let error = create_rw_signal(None::<ApiError>);
    let login_action = auth::use_login_action();
    let client = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(()) => {
                    error.set(None);
                    form.password.set(String::new());
                    client.navigator().go_to(HOME_PATH);
                }
                Err(err) => error.set(Some(login_failure(err))),
            }
        }
    });

    LoginViewModel {
        form,
        error,
        login_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn login_view_model_defaults_empty() {
        with_runtime(|| {
            let vm = use_login_view_model();
            assert!(vm.error.get().is_none());
            assert!(vm.form.username.get().is_empty());
        });
    }

    #[test]
    fn submit_without_credentials_sets_validation_error() {
        with_runtime(|| {
            let vm = use_login_view_model();
            vm.submit();
            assert_eq!(vm.error.get().map(|e| e.error).as_deref(), Some("请输入用户名"));
            assert!(vm.login_action.value().get().is_none());
        });
    }
}
