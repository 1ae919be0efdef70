use std::{future::Future, rc::Rc};

use leptos::*;

use super::{
    repository,
    utils::{build_query, export_filename, sync_message, AttendanceDraft, AttendanceForm, FormMode},
};
use crate::{
    api::{ApiClient, ApiError, AttendanceQuery, AttendanceRecord, Employee, ProcessStatus, UploadFile},
    state::{
        lifetime::{spawn_bound, use_lifetime, Lifetime},
        loading::{use_global_loading, GlobalLoading},
        notifications::{use_notifier, Notifier},
    },
    utils::{
        download::deliver_download,
        time::{format_date, today},
        upload::{check_extension, read_upload, SPREADSHEET_EXTENSIONS},
    },
};

#[derive(Clone, Copy)]
pub struct AttendanceViewModel {
    api: StoredValue<ApiClient>,
    notifier: StoredValue<Rc<dyn Notifier>>,
    lifetime: StoredValue<Lifetime>,
    global: GlobalLoading,
    pub records: RwSignal<Vec<AttendanceRecord>>,
    pub loading: RwSignal<bool>,
    pub start_date: RwSignal<String>,
    pub end_date: RwSignal<String>,
    pub name: RwSignal<String>,
    /// Filters of the last successful search; export reuses them.
    pub applied: RwSignal<AttendanceQuery>,
    pub filter_error: RwSignal<Option<ApiError>>,
    pub detail: RwSignal<Option<AttendanceRecord>>,
    pub status_saving: RwSignal<bool>,
    pub form: AttendanceForm,
    pub mode: RwSignal<Option<FormMode>>,
    pub employees: RwSignal<Vec<Employee>>,
    pub form_error: RwSignal<Option<ApiError>>,
    pub saving: RwSignal<bool>,
    pub importing: RwSignal<bool>,
    pub exporting: RwSignal<bool>,
    pub syncing: RwSignal<bool>,
}

impl AttendanceViewModel {
    pub fn new(
        api: ApiClient,
        notifier: Rc<dyn Notifier>,
        global: GlobalLoading,
        lifetime: Lifetime,
    ) -> Self {
        Self {
            api: store_value(api),
            notifier: store_value(notifier),
            lifetime: store_value(lifetime),
            global,
            records: create_rw_signal(Vec::new()),
            loading: create_rw_signal(false),
            start_date: create_rw_signal(String::new()),
            end_date: create_rw_signal(String::new()),
            name: create_rw_signal(String::new()),
            applied: create_rw_signal(AttendanceQuery::default()),
            filter_error: create_rw_signal(None),
            detail: create_rw_signal(None),
            status_saving: create_rw_signal(false),
            form: AttendanceForm::new(),
            mode: create_rw_signal(None),
            employees: create_rw_signal(Vec::new()),
            form_error: create_rw_signal(None),
            saving: create_rw_signal(false),
            importing: create_rw_signal(false),
            exporting: create_rw_signal(false),
            syncing: create_rw_signal(false),
        }
    }

    async fn bound<T>(
        &self,
        request: impl Future<Output = Result<T, ApiError>>,
    ) -> Option<Result<T, ApiError>> {
        self.lifetime.with_value(|lifetime| lifetime.bind(request)).await
    }

    fn notify_error(&self, message: &str) {
        self.notifier.with_value(|notifier| notifier.error(message));
    }

    fn notify_success(&self, message: &str) {
        self.notifier.with_value(|notifier| notifier.success(message));
    }

    fn report(&self, summary: &str, error: &ApiError) {
        log::warn!("{}: {}", summary, error);
        if !error.reported_by_client() {
            self.notify_error(summary);
        }
    }

    pub async fn load(&self) -> bool {
        self.loading.set(true);
        let api = self.api.get_value();
        let query = self.applied.get_untracked();
        let outcome = self
            .bound(async move { repository::fetch_records(&api, &query).await })
            .await;
        let loaded = match outcome {
            None => return false,
            Some(Ok(records)) => {
                self.records.set(records);
                true
            }
            Some(Err(error)) => {
                self.report("获取考勤记录失败", &error);
                false
            }
        };
        self.loading.set(false);
        loaded
    }

    /// Applies the filter inputs and reloads from the server.
    pub async fn search(&self) -> bool {
        let query = match build_query(
            &self.start_date.get_untracked(),
            &self.end_date.get_untracked(),
            &self.name.get_untracked(),
        ) {
            Ok(query) => query,
            Err(error) => {
                self.filter_error.set(Some(error));
                return false;
            }
        };
        self.filter_error.set(None);
        self.applied.set(query);
        self.load().await
    }

    pub async fn reset_filters(&self) -> bool {
        self.start_date.set(String::new());
        self.end_date.set(String::new());
        self.name.set(String::new());
        self.filter_error.set(None);
        self.applied.set(AttendanceQuery::default());
        self.load().await
    }

    pub fn open_detail(&self, record: AttendanceRecord) {
        self.detail.set(Some(record));
    }

    pub fn close_detail(&self) {
        self.detail.set(None);
    }

    pub async fn change_status(&self, status: ProcessStatus) -> bool {
        let Some(record_id) = self
            .detail
            .with_untracked(|record| record.as_ref().map(|r| r.record_id))
        else {
            return false;
        };
        self.status_saving.set(true);
        let api = self.api.get_value();
        let outcome = self
            .bound(async move { repository::set_process_status(&api, record_id, status).await })
            .await;
        let updated = match outcome {
            None => return false,
            Some(Ok(())) => {
                self.notify_success("状态更新成功");
                self.detail.update(|record| {
                    if let Some(record) = record {
                        record.process_status = status;
                    }
                });
                true
            }
            Some(Err(error)) => {
                self.report("状态更新失败", &error);
                false
            }
        };
        self.status_saving.set(false);
        if updated {
            self.load().await;
        }
        updated
    }

    pub fn open_add(&self) {
        self.form.load(AttendanceDraft {
            date: format_date(today()),
            status: "正常".to_string(),
            ..AttendanceDraft::default()
        });
        self.form_error.set(None);
        self.mode.set(Some(FormMode::Add));
    }

    pub fn open_edit(&self, record: &AttendanceRecord) {
        self.form.load(AttendanceDraft::from_record(record));
        self.form_error.set(None);
        self.detail.set(None);
        self.mode.set(Some(FormMode::Edit(record.record_id)));
    }

    pub fn close_form(&self) {
        self.mode.set(None);
        self.form_error.set(None);
    }

    /// Loads the employee picker once per view.
    pub async fn load_employees(&self) -> bool {
        if !self.employees.with_untracked(Vec::is_empty) {
            return true;
        }
        let api = self.api.get_value();
        match self
            .bound(async move { repository::fetch_employees(&api).await })
            .await
        {
            None => false,
            Some(Ok(employees)) => {
                self.employees.set(employees);
                true
            }
            Some(Err(error)) => {
                self.report("获取员工列表失败", &error);
                false
            }
        }
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
        self.global.show("正在保存考勤记录...");
        let api = self.api.get_value();
        let record_id = match mode {
            FormMode::Add => None,
            FormMode::Edit(id) => Some(id),
        };
        let outcome = self
            .bound(async move { repository::save_record(&api, record_id, &payload).await })
            .await;
        self.global.hide();
        let saved = match outcome {
            None => return false,
            Some(Ok(_)) => {
                self.notify_success(mode.success_message());
                self.mode.set(None);
                true
            }
            Some(Err(error)) => {
                self.report(mode.failure_message(), &error);
                false
            }
        };
        self.saving.set(false);
        if saved {
            self.load().await;
        }
        saved
    }

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
        let outcome = self
            .bound(async move { repository::import_records(&api, upload).await })
            .await;
        let imported = match outcome {
            None => return false,
            Some(Ok(_)) => {
                self.notify_success("导入成功");
                true
            }
            Some(Err(error)) => {
                self.report("导入失败", &error);
                false
            }
        };
        self.importing.set(false);
        if imported {
            self.load().await;
        }
        imported
    }

    pub async fn export(&self) -> bool {
        if self.exporting.get_untracked() {
            return false;
        }
        self.exporting.set(true);
        let api = self.api.get_value();
        let query = self.applied.get_untracked();
        let outcome = self
            .bound(async move { repository::export_records(&api, &query).await })
            .await;
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

    /// Pulls punches from the external clock system, then reloads.
    pub async fn sync(&self) -> bool {
        if self.syncing.get_untracked() {
            return false;
        }
        self.syncing.set(true);
        let api = self.api.get_value();
        let outcome = self
            .bound(async move { repository::sync_external(&api).await })
            .await;
        let synced = match outcome {
            None => return false,
            Some(Ok(result)) => {
                self.notify_success(&sync_message(&result));
                true
            }
            Some(Err(error)) => {
                self.report("同步失败", &error);
                false
            }
        };
        self.syncing.set(false);
        if synced {
            self.load().await;
        }
        synced
    }
}

pub fn use_attendance_view_model() -> AttendanceViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let lifetime = use_lifetime();
    let vm = AttendanceViewModel::new(api, use_notifier(), use_global_loading(), lifetime.clone());
    let initial = lifetime.clone();
    create_effect(move |_| {
        spawn_bound(&initial, async move {
            vm.load().await;
        });
    });
    create_effect(move |_| {
        if vm.mode.with(Option::is_some) {
            spawn_bound(&lifetime, async move {
                vm.load_employees().await;
            });
        }
    });
    vm
}
