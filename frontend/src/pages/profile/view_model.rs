use std::{future::Future, rc::Rc};

use leptos::*;

use super::{
    repository,
    utils::{ProfileDraft, ProfileForm},
};
use crate::{
    api::{ApiClient, ApiError, Profile},
    state::{
        lifetime::{spawn_bound, use_lifetime, Lifetime},
        notifications::{use_notifier, Notifier},
    },
};

#[derive(Clone, Copy)]
pub struct ProfileViewModel {
    api: StoredValue<ApiClient>,
    notifier: StoredValue<Rc<dyn Notifier>>,
    lifetime: StoredValue<Lifetime>,
    pub profile: RwSignal<Option<Profile>>,
    pub loading: RwSignal<bool>,
    pub editing: RwSignal<bool>,
    pub form: ProfileForm,
    pub form_error: RwSignal<Option<ApiError>>,
    pub saving: RwSignal<bool>,
}

impl ProfileViewModel {
    pub fn new(api: ApiClient, notifier: Rc<dyn Notifier>, lifetime: Lifetime) -> Self {
        Self {
            api: store_value(api),
            notifier: store_value(notifier),
            lifetime: store_value(lifetime),
            profile: create_rw_signal(None),
            loading: create_rw_signal(true),
            editing: create_rw_signal(false),
            form: ProfileForm::new(),
            form_error: create_rw_signal(None),
            saving: create_rw_signal(false),
        }
    }

    async fn bound<T>(
        &self,
        request: impl Future<Output = Result<T, ApiError>>,
    ) -> Option<Result<T, ApiError>> {
        self.lifetime.with_value(|lifetime| lifetime.bind(request)).await
    }

    fn report(&self, summary: &str, error: &ApiError) {
        log::warn!("{}: {}", summary, error);
        if !error.reported_by_client() {
            self.notifier.with_value(|notifier| notifier.error(summary));
        }
    }

    pub async fn load(&self) -> bool {
        self.loading.set(true);
        let api = self.api.get_value();
        let outcome = self
            .bound(async move { repository::fetch_profile(&api).await })
            .await;
        let loaded = match outcome {
            None => return false,
            Some(Ok(profile)) => {
                self.profile.set(Some(profile));
                true
            }
            Some(Err(error)) => {
                self.report("获取个人信息失败，请稍后重试", &error);
                false
            }
        };
        self.loading.set(false);
        loaded
    }

    pub fn open_edit(&self) {
        let draft = self
            .profile
            .with_untracked(|profile| profile.as_ref().map(ProfileDraft::from_profile))
            .unwrap_or_default();
        self.form.load(draft);
        self.form_error.set(None);
        self.editing.set(true);
    }

    pub fn close_edit(&self) {
        self.editing.set(false);
        self.form_error.set(None);
    }

    pub async fn submit(&self) -> bool {
        let update = match self.form.draft().validate() {
            Ok(update) => update,
            Err(error) => {
                self.form_error.set(Some(error));
                return false;
            }
        };
        self.form_error.set(None);
        self.saving.set(true);
        let api = self.api.get_value();
        let outcome = self
            .bound(async move { repository::update_profile(&api, &update).await })
            .await;
        let saved = match outcome {
            None => return false,
            Some(Ok(_)) => {
                self.notifier
                    .with_value(|notifier| notifier.success("个人信息更新成功！"));
                self.editing.set(false);
                true
            }
            Some(Err(error)) => {
                self.report("更新失败，请重试", &error);
                false
            }
        };
        self.saving.set(false);
        if saved {
            self.load().await;
        }
        saved
    }
}

pub fn use_profile_view_model() -> ProfileViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let lifetime = use_lifetime();
    let vm = ProfileViewModel::new(api, use_notifier(), lifetime.clone());
    create_effect(move |_| {
        spawn_bound(&lifetime, async move {
            vm.load().await;
        });
    });
    vm
}
