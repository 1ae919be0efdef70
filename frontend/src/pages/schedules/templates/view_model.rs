use std::rc::Rc;

use leptos::*;

use super::{
    repository,
    utils::{FormMode, TemplateDraft, TemplateForm, SEARCH_FIELDS},
};
use crate::{
    api::{ApiClient, ApiError, ShiftTemplate, ShiftTemplatePayload},
    state::{
        crud::CrudController,
        lifetime::{spawn_bound, use_lifetime, Lifetime},
        loading::{use_global_loading, GlobalLoading},
        notifications::{use_notifier, Notifier},
    },
};

#[derive(Clone, Copy)]
pub struct TemplatesViewModel {
    pub crud: CrudController<ShiftTemplate, ShiftTemplatePayload>,
    pub form: TemplateForm,
    pub mode: RwSignal<Option<FormMode>>,
    pub form_error: RwSignal<Option<ApiError>>,
    pub saving: RwSignal<bool>,
}

impl TemplatesViewModel {
    pub fn new(
        api: ApiClient,
        notifier: Rc<dyn Notifier>,
        global: GlobalLoading,
        lifetime: Lifetime,
    ) -> Self {
        Self {
            crud: CrudController::new(
                repository::crud_ops(api),
                "模板",
                SEARCH_FIELDS,
                notifier,
                global,
                lifetime,
            ),
            form: TemplateForm::new(),
            mode: create_rw_signal(None),
            form_error: create_rw_signal(None),
            saving: create_rw_signal(false),
        }
    }

    pub fn open_add(&self) {
        self.form.reset();
        self.form_error.set(None);
        self.mode.set(Some(FormMode::Add));
    }

    pub fn open_edit(&self, template: &ShiftTemplate) {
        self.form.load(TemplateDraft::from_template(template));
        self.form_error.set(None);
        self.mode.set(Some(FormMode::Edit(template.id)));
    }

    pub fn close_form(&self) {
        self.mode.set(None);
        self.form_error.set(None);
    }

    pub async fn submit(&self) -> bool {
        let Some(mode) = self.mode.get_untracked() else {
            return false;
        };
        let payload = match self.form.draft().validate() {
            Ok(payload) => payload,
            Err(error) => {
                self.form_error.set(Some(error));
                return false;
            }
        };
        self.form_error.set(None);
        self.saving.set(true);
        let saved = match mode {
            FormMode::Add => self.crud.add(payload).await,
            FormMode::Edit(id) => self.crud.edit(id, payload).await,
        };
        self.saving.set(false);
        if saved {
            self.mode.set(None);
        }
        saved
    }
}

pub fn use_templates_view_model() -> TemplatesViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let lifetime = use_lifetime();
    let vm = TemplatesViewModel::new(api, use_notifier(), use_global_loading(), lifetime.clone());
    create_effect(move |_| {
        spawn_bound(&lifetime, async move {
            vm.crud.fetch().await;
        });
    });
    vm
}
