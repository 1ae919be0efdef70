use std::rc::Rc;

use chrono::NaiveDate;
use leptos::*;

use super::{repository, utils::export_filename};
use crate::{
    api::{ApiClient, ApiError, AttendanceRecord, DashboardSnapshot, ProcessStatus},
    state::{
        lifetime::{spawn_bound, use_lifetime, Lifetime},
        notifications::{use_notifier, Notifier},
    },
    utils::{
        download::deliver_download,
        time::{format_date, parse_date_input, today},
    },
};

#[derive(Clone, Copy)]
pub struct DashboardViewModel {
    api: StoredValue<ApiClient>,
    notifier: StoredValue<Rc<dyn Notifier>>,
    lifetime: StoredValue<Lifetime>,
    pub date: RwSignal<String>,
    pub snapshot: RwSignal<DashboardSnapshot>,
    pub loading: RwSignal<bool>,
    pub exporting: RwSignal<bool>,
    pub detail_open: RwSignal<bool>,
    pub detail_record: RwSignal<Option<AttendanceRecord>>,
    pub detail_loading: RwSignal<bool>,
    pub status_saving: RwSignal<bool>,
}

impl DashboardViewModel {
    pub fn new(api: ApiClient, notifier: Rc<dyn Notifier>, lifetime: Lifetime) -> Self {
        Self {
            api: store_value(api),
            notifier: store_value(notifier),
            lifetime: store_value(lifetime),
            date: create_rw_signal(format_date(today())),
            snapshot: create_rw_signal(DashboardSnapshot::default()),
            loading: create_rw_signal(false),
            exporting: create_rw_signal(false),
            detail_open: create_rw_signal(false),
            detail_record: create_rw_signal(None),
            detail_loading: create_rw_signal(false),
            status_saving: create_rw_signal(false),
        }
    }

    /// A cleared date picker falls back to today.
    pub fn selected_date(&self) -> NaiveDate {
        parse_date_input(&self.date.get_untracked()).unwrap_or_else(today)
    }

    fn report(&self, summary: &str, error: &ApiError) {
        log::warn!("{}: {}", summary, error);
        if !error.reported_by_client() {
            self.notifier.with_value(|notifier| notifier.error(summary));
        }
    }

    /// Loads stats, distribution and records together.
    pub async fn load(&self) -> bool {
        self.loading.set(true);
        let api = self.api.get_value();
        let date = self.selected_date();
        let request = async move { repository::load_snapshot(&api, date).await };
        let outcome = self.lifetime.with_value(|lifetime| lifetime.bind(request)).await;
        let loaded = match outcome {
            None => return false,
            Some(Ok(snapshot)) => {
                self.snapshot.set(snapshot);
                true
            }
            Some(Err(error)) => {
                self.report("获取数据失败", &error);
                false
            }
        };
        self.loading.set(false);
        loaded
    }

    pub fn reload(&self) {
        let vm = *self;
        self.lifetime.with_value(|lifetime| {
            spawn_bound(lifetime, async move {
                vm.load().await;
            })
        });
    }

    pub async fn export(&self) -> bool {
        if self.exporting.get_untracked() {
            return false;
        }
        self.exporting.set(true);
        let api = self.api.get_value();
        let date = self.selected_date();
        let request = async move { repository::export_exception_records(&api, date).await };
        let outcome = self.lifetime.with_value(|lifetime| lifetime.bind(request)).await;
        let saved = match outcome {
            None => return false,
            Some(Ok(file)) => self.notifier.with_value(|notifier| {
                deliver_download(&file, &export_filename(date), notifier.as_ref(), "导出成功")
            }),
            Some(Err(error)) => {
                self.report("导出失败", &error);
                false
            }
        };
        self.exporting.set(false);
        saved
    }

    pub async fn open_detail(&self, record_id: i64) {
        self.detail_open.set(true);
        self.detail_record.set(None);
        self.detail_loading.set(true);
        let api = self.api.get_value();
        let request = async move { repository::fetch_record(&api, record_id).await };
        match self.lifetime.with_value(|lifetime| lifetime.bind(request)).await {
            None => return,
            Some(Ok(record)) => self.detail_record.set(Some(record)),
            Some(Err(error)) => self.report("获取记录详情失败", &error),
        }
        self.detail_loading.set(false);
    }

    pub fn close_detail(&self) {
        self.detail_open.set(false);
        self.detail_record.set(None);
    }

    /// Updates the open record and refreshes the dashboard on success.
    pub async fn change_status(&self, status: ProcessStatus) -> bool {
        let Some(record_id) = self
            .detail_record
            .with_untracked(|record| record.as_ref().map(|r| r.record_id))
        else {
            return false;
        };
        self.status_saving.set(true);
        let api = self.api.get_value();
        let request =
            async move { repository::set_process_status(&api, record_id, status).await };
        let outcome = self.lifetime.with_value(|lifetime| lifetime.bind(request)).await;
        let updated = match outcome {
            None => return false,
            Some(Ok(())) => {
                self.notifier
                    .with_value(|notifier| notifier.success("状态更新成功"));
                self.detail_record.update(|record| {
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
}

pub fn use_dashboard_view_model() -> DashboardViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let vm = DashboardViewModel::new(api, use_notifier(), use_lifetime());
    create_effect(move |_| {
        vm.date.with(|_| ());
        vm.reload();
    });
    vm
}
