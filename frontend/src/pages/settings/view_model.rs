use std::{future::Future, rc::Rc};

use leptos::*;

use super::{
    repository,
    utils::{map_change_password_error, PasswordForm},
};
use crate::{
    api::{ApiClient, ApiError},
    state::{
        lifetime::{use_lifetime, Lifetime},
        notifications::{use_notifier, Notifier},
    },
};

#[derive(Clone, Copy)]
pub struct SettingsViewModel {
    api: StoredValue<ApiClient>,
    notifier: StoredValue<Rc<dyn Notifier>>,
    lifetime: StoredValue<Lifetime>,
    pub form: PasswordForm,
    pub error: RwSignal<Option<ApiError>>,
    pub saving: RwSignal<bool>,
}

impl SettingsViewModel {
    pub fn new(api: ApiClient, notifier: Rc<dyn Notifier>, lifetime: Lifetime) -> Self {
        Self {
            api: store_value(api),
            notifier: store_value(notifier),
            lifetime: store_value(lifetime),
            form: PasswordForm::new(),
            error: create_rw_signal(None),
            saving: create_rw_signal(false),
        }
    }

    async fn bound<T>(
        &self,
        request: impl Future<Output = Result<T, ApiError>>,
    ) -> Option<Result<T, ApiError>> {
        self.lifetime.with_value(|lifetime| lifetime.bind(request)).await
    }

    pub async fn change_password(&self) -> bool {
        if self.saving.get_untracked() {
            return false;
        }
        let request = match self.form.draft().validate() {
            Ok(request) => request,
            Err(error) => {
                self.error.set(Some(error));
                return false;
            }
        };
        self.error.set(None);
        self.saving.set(true);
        let api = self.api.get_value();
        let outcome = self
            .bound(async move { repository::change_password(&api, &request).await })
            .await;
        let changed = match outcome {
            None => return false,
            Some(Ok(())) => {
                log::info!("password changed");
                self.notifier.with_value(|notifier| notifier.success("密码修改成功"));
                self.form.reset();
                true
            }
            Some(Err(error)) => {
                log::warn!("password change failed: {}", error);
                if !error.reported_by_client() {
                    self.notifier
                        .with_value(|notifier| notifier.error("密码修改失败，请检查当前密码是否正确"));
                }
                self.error.set(Some(map_change_password_error(&error)));
                false
            }
        };
        self.saving.set(false);
        changed
    }
}

pub fn use_settings_view_model() -> SettingsViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    SettingsViewModel::new(api, use_notifier(), use_lifetime())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::notifications::{NoticeLevel, RecordingNotifier};
    use crate::test_support::helpers::memory_client;
    use httpmock::prelude::*;
    use serde_json::json;

    fn view_model(server: &MockServer) -> (SettingsViewModel, RecordingNotifier) {
        let (client, _store, notifier) = memory_client(&server.url("/api"));
        let vm = SettingsViewModel::new(client, Rc::new(notifier.clone()), Lifetime::new());
        (vm, notifier)
    }

    fn fill(vm: &SettingsViewModel, new: &str, confirm: &str) {
        vm.form.current.set("old-pass".into());
        vm.form.new.set(new.into());
        vm.form.confirm.set(confirm.into());
    }

    #[tokio::test]
    async fn mismatch_never_reaches_server() {
        let server = MockServer::start_async().await;
        let change = server.mock(|when, then| {
            when.method(POST).path("/api/my/change-password");
            then.status(200).json_body(json!({}));
        });
        let runtime = create_runtime();
        let (vm, _notifier) = view_model(&server);
        fill(&vm, "new-pass", "other-pass");
        assert!(!vm.change_password().await);
        assert_eq!(change.calls(), 0);
        assert_eq!(vm.error.get_untracked().unwrap().error, "新密码和确认密码不一致");
        runtime.dispose();
    }

    #[tokio::test]
    async fn success_clears_form() {
        let server = MockServer::start_async().await;
        let change = server.mock(|when, then| {
            when.method(POST).path("/api/my/change-password").json_body(json!({
                "current_password": "old-pass",
                "new_password": "new-pass"
            }));
            then.status(200).json_body(json!({ "message": "Password updated successfully" }));
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        fill(&vm, "new-pass", "new-pass");
        assert!(vm.change_password().await);
        assert_eq!(change.calls(), 1);
        assert!(vm.form.current.get_untracked().is_empty());
        assert_eq!(notifier.messages(NoticeLevel::Success), vec!["密码修改成功".to_string()]);
        runtime.dispose();
    }

    #[tokio::test]
    async fn wrong_current_password_shows_inline() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/my/change-password");
            then.status(400).json_body(json!({ "detail": "Current password is incorrect" }));
        });
        let runtime = create_runtime();
        let (vm, _notifier) = view_model(&server);
        fill(&vm, "new-pass", "new-pass");
        assert!(!vm.change_password().await);
        assert_eq!(vm.error.get_untracked().unwrap().error, "当前密码不正确");
        assert!(!vm.saving.get_untracked());
        runtime.dispose();
    }
}
