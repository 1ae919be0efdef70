use std::rc::Rc;

use leptos::*;

use super::{
    repository,
    utils::{export_filename, EmployeeDraft, EmployeeForm, FormMode, SEARCH_FIELDS},
};
use crate::{
    api::{ApiClient, ApiError, Employee, EmployeePayload, UploadFile},
    state::{
        crud::CrudController,
        lifetime::{spawn_bound, use_lifetime, Lifetime},
        loading::{use_global_loading, GlobalLoading},
        notifications::{use_notifier, Notifier},
    },
    utils::{
        download::deliver_download,
        time::today,
        upload::{check_extension, read_upload, SPREADSHEET_EXTENSIONS},
    },
};

#[derive(Clone, Copy)]
pub struct EmployeesViewModel {
    api: StoredValue<ApiClient>,
    notifier: StoredValue<Rc<dyn Notifier>>,
    lifetime: StoredValue<Lifetime>,
    pub crud: CrudController<Employee, EmployeePayload>,
    pub form: EmployeeForm,
    /// `None` while the form modal is closed.
    pub mode: RwSignal<Option<FormMode>>,
    pub form_error: RwSignal<Option<ApiError>>,
    pub saving: RwSignal<bool>,
    pub importing: RwSignal<bool>,
    pub exporting: RwSignal<bool>,
}

impl EmployeesViewModel {
    pub fn new(
        api: ApiClient,
        notifier: Rc<dyn Notifier>,
        global: GlobalLoading,
        lifetime: Lifetime,
    ) -> Self {
        let crud = CrudController::new(
            repository::crud_ops(api.clone()),
            "员工",
            SEARCH_FIELDS,
            Rc::clone(&notifier),
            global,
            lifetime.clone(),
        );
        Self {
            api: store_value(api),
            notifier: store_value(notifier),
            lifetime: store_value(lifetime),
            crud,
            form: EmployeeForm::new(),
            mode: create_rw_signal(None),
            form_error: create_rw_signal(None),
            saving: create_rw_signal(false),
            importing: create_rw_signal(false),
            exporting: create_rw_signal(false),
        }
    }

    pub fn open_add(&self) {
        self.form.reset();
        self.form_error.set(None);
        self.mode.set(Some(FormMode::Add));
    }

    pub fn open_edit(&self, employee: &Employee) {
        self.form.load(EmployeeDraft::from_employee(employee));
        self.form_error.set(None);
        self.mode.set(Some(FormMode::Edit(employee.employee_id)));
    }

    pub fn close_form(&self) {
        self.mode.set(None);
        self.form_error.set(None);
    }

    /// Validates locally, then adds or edits; the modal closes on success.
    pub async fn submit(&self) -> bool {
        let Some(mode) = self.mode.get_untracked() else {
            return false;
        };
        let payload = match self.form.draft().validate(mode) {
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
            self.form.reset();
            self.mode.set(None);
        }
        saved
    }

    fn notify_error(&self, message: &str) {
        self.notifier.with_value(|notifier| notifier.error(message));
    }

    fn report(&self, summary: &str, error: &ApiError) {
        log::warn!("{}: {}", summary, error);
        if !error.reported_by_client() {
            self.notify_error(summary);
        }
    }

    /// Reads a picked spreadsheet and uploads it.
    pub async fn import_file(&self, file: web_sys::File) -> bool {
        if let Err(error) = check_extension(&file.name(), SPREADSHEET_EXTENSIONS) {
            self.notify_error(&error.to_string());
            return false;
        }
        match read_upload(file).await {
            Ok(upload) => self.import_upload(upload).await,
            Err(error) => {
                self.notify_error(&error.to_string());
                false
            }
        }
    }

    pub async fn import_upload(&self, upload: UploadFile) -> bool {
        if let Err(error) = check_extension(&upload.name, SPREADSHEET_EXTENSIONS) {
            self.notify_error(&error.to_string());
            return false;
        }
        self.importing.set(true);
        let api = self.api.get_value();
        let request = async move { repository::import_employees(&api, upload).await };
        let outcome = self.lifetime.with_value(|lifetime| lifetime.bind(request)).await;
        let imported = match outcome {
            None => return false,
            Some(Ok(_)) => {
                self.notifier.with_value(|notifier| notifier.success("导入成功"));
                true
            }
            Some(Err(error)) => {
                self.report("导入失败", &error);
                false
            }
        };
        self.importing.set(false);
        if imported {
            self.crud.fetch().await;
        }
        imported
    }

    pub async fn export(&self) -> bool {
        if self.exporting.get_untracked() {
            return false;
        }
        self.exporting.set(true);
        let api = self.api.get_value();
        let request = async move { repository::export_employees(&api).await };
        let outcome = self.lifetime.with_value(|lifetime| lifetime.bind(request)).await;
        let saved = match outcome {
            None => return false,
            Some(Ok(file)) => self.notifier.with_value(|notifier| {
                deliver_download(&file, &export_filename(today()), notifier.as_ref(), "导出成功")
            }),
            Some(Err(error)) => {
                self.report("导出失败", &error);
                false
            }
        };
        self.exporting.set(false);
        saved
    }
}

pub fn use_employees_view_model() -> EmployeesViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let lifetime = use_lifetime();
    let vm = EmployeesViewModel::new(api, use_notifier(), use_global_loading(), lifetime.clone());
    create_effect(move |_| {
        spawn_bound(&lifetime, async move {
            vm.crud.fetch().await;
        });
    });
    vm
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::notifications::NoticeLevel;
    use crate::test_support::helpers::memory_client;
    use httpmock::prelude::*;
    use serde_json::json;

    fn view_model(server: &MockServer) -> (EmployeesViewModel, crate::state::notifications::RecordingNotifier) {
        let (client, _store, notifier) = memory_client(&server.url("/api"));
        let vm = EmployeesViewModel::new(
            client,
            Rc::new(notifier.clone()),
            GlobalLoading::new(),
            Lifetime::new(),
        );
        (vm, notifier)
    }

    fn fill_form(form: &EmployeeForm) {
        form.employee_no.set("E010".into());
        form.name.set("孙七".into());
        form.gender.set("女".into());
        form.email.set("sun@example.com".into());
        form.phone.set("13900000000".into());
        form.position.set("会计".into());
        form.hire_date.set("2024-02-01".into());
        form.password.set("secret1".into());
    }

    #[tokio::test]
    async fn invalid_form_is_never_sent() {
        let server = MockServer::start_async().await;
        let create = server.mock(|when, then| {
            when.method(POST).path("/api/employees");
            then.status(201).json_body(json!({}));
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        vm.open_add();
        assert!(!vm.submit().await);
        assert_eq!(create.calls(), 0);
        assert_eq!(
            vm.form_error.get_untracked().map(|e| e.error).as_deref(),
            Some("请输入工号")
        );
        assert!(notifier.is_empty());
        assert_eq!(vm.mode.get_untracked(), Some(FormMode::Add));
        runtime.dispose();
    }

    #[tokio::test]
    async fn add_posts_then_refetches_and_closes() {
        let server = MockServer::start_async().await;
        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/api/employees")
                .json_body_includes(r#"{"employee_no":"E010","password":"secret1"}"#);
            then.status(201).json_body(json!({
                "employee_id": 10, "employee_no": "E010", "name": "孙七"
            }));
        });
        let list = server.mock(|when, then| {
            when.method(GET).path("/api/employees");
            then.status(200).json_body(json!({ "data": [
                { "employee_id": 10, "employee_no": "E010", "name": "孙七" }
            ]}));
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        vm.open_add();
        fill_form(&vm.form);
        assert!(vm.submit().await);
        assert_eq!(create.calls(), 1);
        assert_eq!(list.calls(), 1);
        assert_eq!(vm.mode.get_untracked(), None);
        assert_eq!(vm.crud.data().get_untracked().len(), 1);
        assert_eq!(notifier.messages(NoticeLevel::Success), vec!["添加员工成功"]);
        assert!(vm.form.name.get_untracked().is_empty());
        runtime.dispose();
    }

    #[tokio::test]
    async fn edit_puts_to_the_employee_path() {
        let server = MockServer::start_async().await;
        let update = server.mock(|when, then| {
            when.method(PUT).path("/api/employees/4");
            then.status(200).json_body(json!({
                "employee_id": 4, "employee_no": "E010", "name": "孙七"
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/employees");
            then.status(200).json_body(json!([]));
        });
        let runtime = create_runtime();
        let (vm, _notifier) = view_model(&server);
        let existing = Employee {
            employee_id: 4,
            employee_no: "E004".into(),
            name: "旧名".into(),
            gender: None,
            email: None,
            phone: None,
            position: None,
            hire_date: None,
            contract_end_date: None,
            is_admin: false,
        };
        vm.open_edit(&existing);
        assert_eq!(vm.form.employee_no.get_untracked(), "E004");
        fill_form(&vm.form);
        vm.form.password.set(String::new());
        assert!(vm.submit().await);
        assert_eq!(update.calls(), 1);
        runtime.dispose();
    }

    #[tokio::test]
    async fn import_rejects_wrong_extension_locally() {
        let server = MockServer::start_async().await;
        let upload = server.mock(|when, then| {
            when.method(POST).path("/api/employees/import");
            then.status(200).json_body(json!({}));
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        let file = UploadFile {
            name: "staff.txt".into(),
            mime: None,
            bytes: b"x".to_vec(),
        };
        assert!(!vm.import_upload(file).await);
        assert_eq!(upload.calls(), 0);
        assert_eq!(notifier.messages(NoticeLevel::Error), vec!["只支持 .xlsx/.xls 格式的文件"]);
        runtime.dispose();
    }

    #[tokio::test]
    async fn import_uploads_and_refreshes() {
        let server = MockServer::start_async().await;
        let upload = server.mock(|when, then| {
            when.method(POST).path("/api/employees/import");
            then.status(200).json_body(json!({ "message": "ok" }));
        });
        let list = server.mock(|when, then| {
            when.method(GET).path("/api/employees");
            then.status(200).json_body(json!([]));
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        let file = UploadFile {
            name: "staff.XLSX".into(),
            mime: None,
            bytes: b"PK".to_vec(),
        };
        assert!(vm.import_upload(file).await);
        assert_eq!(upload.calls(), 1);
        assert_eq!(list.calls(), 1);
        assert_eq!(notifier.messages(NoticeLevel::Success), vec!["导入成功"]);
        assert!(!vm.importing.get_untracked());
        runtime.dispose();
    }

    #[tokio::test]
    async fn export_saves_file_and_notifies() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/employees/export");
            then.status(200)
                .header("content-type", "application/octet-stream")
                .body("bytes");
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        assert!(vm.export().await);
        assert_eq!(notifier.messages(NoticeLevel::Success), vec!["导出成功"]);
        assert!(!vm.exporting.get_untracked());
        runtime.dispose();
    }
}
