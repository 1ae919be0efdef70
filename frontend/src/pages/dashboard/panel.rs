use leptos::*;

use super::{
    components::{
        distribution::ExceptionDistribution, records::ExceptionRecordsTable,
        summary::SummaryCards,
    },
    view_model::use_dashboard_view_model,
};
use crate::{
    api::ProcessStatus,
    components::{forms::DatePicker, record_detail::RecordDetailModal},
};

#[component]
pub fn DashboardPanel() -> impl IntoView {
    let vm = use_dashboard_view_model();
    let snapshot = vm.snapshot;

    let on_open = Callback::new(move |id: i64| {
        spawn_local(async move { vm.open_detail(id).await });
    });
    let on_export = Callback::new(move |_| {
        spawn_local(async move {
            vm.export().await;
        });
    });
    let on_status = Callback::new(move |status: ProcessStatus| {
        spawn_local(async move {
            vm.change_status(status).await;
        });
    });

    view! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-end justify-between gap-4">
                <h2 class="text-2xl font-bold text-fg">"今日考勤概览"</h2>
                <div class="w-56">
                    <DatePicker value=vm.date />
                </div>
            </div>
            <SummaryCards stats=Signal::derive(move || snapshot.with(|s| s.stats.clone())) />
            <ExceptionDistribution stats=Signal::derive(move || {
                snapshot.with(|s| s.exception_stats.clone())
            }) />
            <ExceptionRecordsTable
                records=Signal::derive(move || snapshot.with(|s| s.exception_records.clone()))
                loading=vm.loading
                exporting=vm.exporting
                on_open=on_open
                on_export=on_export
            />
            <RecordDetailModal
                is_open=vm.detail_open
                record=vm.detail_record
                loading=vm.detail_loading
                saving=vm.status_saving
                on_close=Callback::new(move |_| vm.close_detail())
                on_status=on_status
            />
        </div>
    }
}
