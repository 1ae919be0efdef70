use std::{future::Future, rc::Rc};

use leptos::*;

use super::{
    repository,
    utils::{download_filename, export_range, export_filename, required_range, GENERATE_SUCCESS},
};
use crate::{
    api::{ApiClient, ApiError, Report, ReportDetail},
    state::{
        lifetime::{spawn_bound, use_lifetime, Lifetime},
        loading::{use_global_loading, GlobalLoading},
        notifications::{use_notifier, Notifier},
    },
    utils::{download::deliver_download, time::today},
};

#[derive(Clone, Copy)]
pub struct ReportsViewModel {
    api: StoredValue<ApiClient>,
    notifier: StoredValue<Rc<dyn Notifier>>,
    lifetime: StoredValue<Lifetime>,
    global: GlobalLoading,
    pub reports: RwSignal<Vec<Report>>,
    pub loading: RwSignal<bool>,
    pub start_date: RwSignal<String>,
    pub end_date: RwSignal<String>,
    pub generating: RwSignal<bool>,
    pub exporting: RwSignal<bool>,
    /// Report id currently downloading.
    pub downloading: RwSignal<Option<String>>,
    pub detail: RwSignal<Option<(Report, ReportDetail)>>,
}

impl ReportsViewModel {
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
            reports: create_rw_signal(Vec::new()),
            loading: create_rw_signal(false),
            start_date: create_rw_signal(String::new()),
            end_date: create_rw_signal(String::new()),
            generating: create_rw_signal(false),
            exporting: create_rw_signal(false),
            downloading: create_rw_signal(None),
            detail: create_rw_signal(None),
        }
    }

    async fn bound<T>(
        &self,
        request: impl Future<Output = Result<T, ApiError>>,
    ) -> Option<Result<T, ApiError>> {
        self.lifetime.with_value(|lifetime| lifetime.bind(request)).await
    }

    fn notify(&self, f: impl FnOnce(&dyn Notifier)) {
        self.notifier.with_value(|notifier| f(notifier.as_ref()));
    }

    fn report(&self, summary: &str, error: &ApiError) {
        log::warn!("{}: {}", summary, error);
        if !error.reported_by_client() {
            self.notify(|n| n.error(summary));
        }
    }

    pub async fn load(&self) -> bool {
        self.loading.set(true);
        let api = self.api.get_value();
        let outcome = self
            .bound(async move { repository::fetch_reports(&api).await })
            .await;
        let loaded = match outcome {
            None => return false,
            Some(Ok(reports)) => {
                self.reports.set(reports);
                true
            }
            Some(Err(error)) => {
                self.report("获取报表列表失败", &error);
                false
            }
        };
        self.loading.set(false);
        loaded
    }

    /// Generates the monthly and exception reports for the picked range.
    pub async fn generate(&self) -> bool {
        if self.generating.get_untracked() {
            return false;
        }
        let range = match required_range(&self.start_date.get_untracked(), &self.end_date.get_untracked()) {
            Ok(range) => range,
            Err(error) => {
                self.notify(|n| n.error(&error.error));
                return false;
            }
        };
        self.generating.set(true);
        self.global.show("正在生成报表...");
        let api = self.api.get_value();
        let outcome = self
            .bound(async move { repository::generate_pair(&api, &range).await })
            .await;
        self.global.hide();
        let generated = match outcome {
            None => return false,
            Some(Ok(())) => {
                log::info!("generated monthly and exception reports");
                self.notify(|n| n.success(GENERATE_SUCCESS));
                true
            }
            Some(Err(error)) => {
                self.report("报表生成失败", &error);
                false
            }
        };
        self.generating.set(false);
        if generated {
            self.load().await;
        }
        generated
    }

    pub async fn view(&self, report: Report) -> bool {
        let api = self.api.get_value();
        let id = report.id.clone();
        let outcome = self
            .bound(async move { repository::view(&api, &id).await })
            .await;
        match outcome {
            None => false,
            Some(Ok(detail)) => {
                self.detail.set(Some((report, detail)));
                true
            }
            Some(Err(error)) => {
                self.report("获取报表详情失败", &error);
                false
            }
        }
    }

    pub fn close_detail(&self) {
        self.detail.set(None);
    }

    pub async fn download(&self, report: Report) -> bool {
        if self.downloading.with_untracked(Option::is_some) {
            return false;
        }
        self.downloading.set(Some(report.id.clone()));
        let api = self.api.get_value();
        let id = report.id.clone();
        let outcome = self
            .bound(async move { repository::download(&api, &id).await })
            .await;
        let saved = match outcome {
            None => return false,
            Some(Ok(file)) => self.notifier.with_value(|notifier| {
                deliver_download(&file, &download_filename(&report), notifier.as_ref(), "报表下载成功")
            }),
            Some(Err(error)) => {
                self.report("下载失败，请稍后重试", &error);
                false
            }
        };
        self.downloading.set(None);
        saved
    }

    /// Per-record export; without a picked range covers the current year.
    pub async fn export_detailed(&self) -> bool {
        if self.exporting.get_untracked() {
            return false;
        }
        let range = match export_range(
            &self.start_date.get_untracked(),
            &self.end_date.get_untracked(),
            today(),
        ) {
            Ok(range) => range,
            Err(error) => {
                self.notify(|n| n.error(&error.error));
                return false;
            }
        };
        self.exporting.set(true);
        let api = self.api.get_value();
        let filename = export_filename(&range);
        let outcome = self
            .bound(async move { repository::export_detailed(&api, &range).await })
            .await;
        let saved = match outcome {
            None => return false,
            Some(Ok(file)) => self.notifier.with_value(|notifier| {
                deliver_download(&file, &filename, notifier.as_ref(), "导出成功")
            }),
            Some(Err(error)) => {
                self.report("导出失败，请稍后重试", &error);
                false
            }
        };
        self.exporting.set(false);
        saved
    }
}

pub fn use_reports_view_model() -> ReportsViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let lifetime = use_lifetime();
    let vm = ReportsViewModel::new(api, use_notifier(), use_global_loading(), lifetime.clone());
    create_effect(move |_| {
        spawn_bound(&lifetime, async move {
            vm.load().await;
        });
    });
    vm
}
