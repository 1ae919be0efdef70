use leptos::*;

use crate::{
    api::{AttendanceRecord, AttendanceStatus, ProcessStatus},
    components::{common::Tag, layout::LoadingSpinner, modal::Modal},
};

pub fn attendance_tone(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Normal => {
            "bg-status-success-bg text-status-success-text border border-status-success-border"
        }
        AttendanceStatus::Late | AttendanceStatus::EarlyLeave => {
            "bg-status-warning-bg text-status-warning-text border border-status-warning-border"
        }
        AttendanceStatus::Absent | AttendanceStatus::Exception => {
            "bg-status-error-bg text-status-error-text border border-status-error-border"
        }
    }
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

/// Read-only view of one attendance record with a process-status picker.
#[component]
pub fn RecordDetailModal(
    #[prop(into)] is_open: Signal<bool>,
    #[prop(into)] record: Signal<Option<AttendanceRecord>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] saving: Signal<bool>,
    on_close: Callback<()>,
    on_status: Callback<ProcessStatus>,
) -> impl IntoView {
    view! {
        <Modal is_open=is_open title="考勤详情" on_close=on_close wide=true>
            {move || {
                if loading.get() {
                    return view! { <LoadingSpinner /> }.into_view();
                }
                let Some(record) = record.get() else {
                    return view! { <p class="text-center text-fg-muted py-8">"暂无数据"</p> }.into_view();
                };
                let status = record.attendance_status();
                let current = record.process_status;
                view! {
                    <dl class="grid grid-cols-2 gap-4 text-sm">
                        <div>
                            <dt class="text-fg-muted">"员工姓名"</dt>
                            <dd class="text-fg">{or_placeholder(Some(&record.name), "未知")}</dd>
                        </div>
                        <div>
                            <dt class="text-fg-muted">"部门"</dt>
                            <dd class="text-fg">{or_placeholder(record.department.as_deref(), "未知")}</dd>
                        </div>
                        <div class="col-span-2">
                            <dt class="text-fg-muted">"考勤日期"</dt>
                            <dd class="text-fg">{record.date.clone()}</dd>
                        </div>
                        <div>
                            <dt class="text-fg-muted">"上班时间"</dt>
                            <dd class="text-fg">{or_placeholder(record.check_in.as_deref(), "未打卡")}</dd>
                        </div>
                        <div>
                            <dt class="text-fg-muted">"下班时间"</dt>
                            <dd class="text-fg">{or_placeholder(record.check_out.as_deref(), "未打卡")}</dd>
                        </div>
                        <div>
                            <dt class="text-fg-muted">"考勤状态"</dt>
                            <dd><Tag tone=attendance_tone(status) label=status.label() /></dd>
                        </div>
                        <div>
                            <dt class="text-fg-muted">"处理状态"</dt>
                            <dd>
                                <select
                                    class="rounded-md border border-border bg-surface-elevated px-2 py-1 text-sm disabled:opacity-50"
                                    disabled=move || saving.get()
                                    on:change=move |ev| {
                                        if let Some(next) = ProcessStatus::parse(&event_target_value(&ev)) {
                                            if next != current {
                                                on_status.call(next);
                                            }
                                        }
                                    }
                                >
                                    {ProcessStatus::ALL
                                        .into_iter()
                                        .map(|option| view! {
                                            <option value=option.as_str() selected=option == current>
                                                {option.label()}
                                            </option>
                                        })
                                        .collect_view()}
                                </select>
                            </dd>
                        </div>
                        <div class="col-span-2">
                            <dt class="text-fg-muted">"工作时长"</dt>
                            <dd class="text-fg">{or_placeholder(record.work_hours.as_deref(), "-")}</dd>
                        </div>
                        <div class="col-span-2">
                            <dt class="text-fg-muted">"备注"</dt>
                            <dd class="text-fg">{or_placeholder(record.remarks.as_deref(), "无")}</dd>
                        </div>
                    </dl>
                }
                .into_view()
            }}
            <div class="flex justify-end">
                <button
                    class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg border border-border"
                    on:click=move |_| on_close.call(())
                >
                    "关闭"
                </button>
            </div>
        </Modal>
    }
}
