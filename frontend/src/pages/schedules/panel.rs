use chrono::NaiveDate;
use leptos::*;

use super::{
    calendar::entry_label,
    components::{
        calendar::{CalendarActions, ScheduleCalendar},
        day_detail::DayDetailModal,
        edit_modal::EditScheduleModal,
        schedule_modal::ScheduleModal,
    },
    view_model::use_schedules_view_model,
};
use crate::{
    components::{
        common::{Button, ButtonVariant},
        confirm_dialog::ConfirmDialog,
        forms::FileButton,
        guard::PermissionGate,
        layout::LoadingSpinner,
    },
    state::permissions::Permission,
    utils::time::month_title,
};

pub const TEMPLATES_PATH: &str = "/schedules/templates";

#[component]
pub fn SchedulesPanel() -> impl IntoView {
    let vm = use_schedules_view_model();

    let change_month = move |delta: i32| {
        spawn_local(async move {
            vm.change_month(delta).await;
        });
    };
    let actions = CalendarActions {
        on_day: Callback::new(move |date: NaiveDate| {
            spawn_local(async move {
                vm.select_day(date).await;
            });
        }),
        on_details: Callback::new(move |date| vm.detail_day.set(Some(date))),
        on_edit: Callback::new(move |entry| vm.open_edit(entry)),
        on_delete: Callback::new(move |entry| vm.request_delete(entry)),
        on_copy: Callback::new(move |entry| vm.start_copy(entry)),
    };
    let on_import = Callback::new(move |file: web_sys::File| {
        spawn_local(async move {
            vm.import_file(file).await;
        });
    });
    let on_confirm_delete = Callback::new(move |_| {
        spawn_local(async move {
            vm.confirm_delete().await;
        });
    });
    let detail_entries = Signal::derive(move || {
        vm.detail_day
            .get()
            .map(|day| vm.day_entries(day))
            .unwrap_or_default()
    });

    view! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-3">
                <h2 class="text-2xl font-bold text-fg">"排班管理"</h2>
                <div class="flex flex-wrap gap-2">
                    <a
                        href=TEMPLATES_PATH
                        class=format!("inline-flex items-center rounded-md px-4 py-2 text-sm font-semibold {}", ButtonVariant::Secondary.classes())
                    >
                        "模板管理"
                    </a>
                    <PermissionGate require=Permission::ScheduleCreate hide=true>
                        <FileButton label="导入排班" accept=".csv" on_file=on_import disabled=vm.importing />
                        <Button on:click=move |_| vm.open_create(None)>"新增排班"</Button>
                    </PermissionGate>
                </div>
            </div>
            <section class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                <div class="flex items-center justify-between">
                    <Button variant=ButtonVariant::Ghost on:click=move |_| change_month(-1)>"上个月"</Button>
                    <div class="flex items-center gap-3">
                        <h3 class="text-lg font-semibold text-fg">
                            {move || month_title(vm.year.get(), vm.month.get())}
                        </h3>
                        <Button
                            variant=ButtonVariant::Secondary
                            on:click=move |_| {
                                spawn_local(async move {
                                    vm.go_today().await;
                                });
                            }
                        >
                            "今天"
                        </Button>
                    </div>
                    <Button variant=ButtonVariant::Ghost on:click=move |_| change_month(1)>"下个月"</Button>
                </div>
                {move || {
                    vm.pending_copy.get().map(|entry| view! {
                        <div class="flex items-center justify-between rounded-md border border-status-info-border bg-status-info-bg px-4 py-2 text-sm text-status-info-text">
                            <span>{format!("已选择排班：{}，点击目标日期进行复制", entry_label(&entry))}</span>
                            <button type="button" class="hover:underline" on:click=move |_| vm.cancel_copy()>
                                "取消"
                            </button>
                        </div>
                    })
                }}
                <Show when=move || !vm.loading.get() fallback=|| view! { <LoadingSpinner /> }>
                    <ScheduleCalendar
                        year=vm.year
                        month=vm.month
                        schedules=vm.schedules
                        copying=Signal::derive(move || vm.pending_copy.with(Option::is_some))
                        actions=actions
                    />
                </Show>
            </section>
            <DayDetailModal
                day=vm.detail_day
                entries=detail_entries
                on_close=Callback::new(move |_| vm.detail_day.set(None))
                on_add=Callback::new(move |date| {
                    vm.detail_day.set(None);
                    vm.open_create(Some(date));
                })
            />
            <ScheduleModal vm=vm />
            <EditScheduleModal vm=vm />
            <ConfirmDialog
                is_open=Signal::derive(move || vm.pending_delete.with(Option::is_some))
                title="删除排班"
                message="确定删除此排班吗？"
                on_confirm=on_confirm_delete
                on_cancel=Callback::new(move |_| vm.cancel_delete())
                destructive=true
            />
        </div>
    }
}
