use chrono::{Datelike, NaiveDate, Weekday};
use leptos::*;

use crate::{
    api::ScheduleEntry,
    components::{common::Tag, empty_state::EmptyState, modal::Modal},
    pages::schedules::calendar::{day_stats, day_title, group_by_shift, shift_label, status_label},
    utils::time::today,
};

const TODAY_TONE: &str = "bg-action-primary-bg text-action-primary-text";
const ARRANGED_TONE: &str = "bg-status-success-bg text-status-success-text";
const PENDING_TONE: &str = "bg-status-warning-bg text-status-warning-text";

#[component]
pub fn DayDetailModal(
    #[prop(into)] day: Signal<Option<NaiveDate>>,
    #[prop(into)] entries: Signal<Vec<ScheduleEntry>>,
    on_close: Callback<()>,
    on_add: Callback<NaiveDate>,
) -> impl IntoView {
    let is_open = Signal::derive(move || day.with(Option::is_some));
    let title = Signal::derive(move || day.get().map(day_title).unwrap_or_default());

    view! {
        <Modal is_open=is_open title=title on_close=on_close wide=true>
            {move || {
                let Some(date) = day.get() else {
                    return ().into_view();
                };
                let entries = entries.get();
                let stats = day_stats(&entries);
                let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
                view! {
                    <div class="flex gap-2">
                        {(date == today()).then(|| view! { <Tag tone=TODAY_TONE label="今天" /> })}
                        {weekend.then(|| view! { <Tag tone=PENDING_TONE label="周末" /> })}
                    </div>
                    <div class="grid grid-cols-3 gap-3 text-center">
                        <Stat label="总排班数" value=stats.total />
                        <Stat label="参与员工" value=stats.employees />
                        <Stat label="班次类型" value=stats.shift_types />
                    </div>
                    {if entries.is_empty() {
                        view! { <EmptyState title="该日期暂无排班安排" /> }.into_view()
                    } else {
                        group_by_shift(&entries)
                            .into_iter()
                            .map(|(shift_type_id, members)| view! { <ShiftGroup shift_type_id=shift_type_id members=members /> })
                            .collect_view()
                    }}
                    <div class="flex justify-end">
                        <button
                            type="button"
                            class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                            on:click=move |_| on_add.call(date)
                        >
                            "新增排班"
                        </button>
                    </div>
                }
                .into_view()
            }}
        </Modal>
    }
}

#[component]
fn Stat(label: &'static str, value: usize) -> impl IntoView {
    view! {
        <div class="rounded-md bg-surface-muted p-3">
            <div class="text-2xl font-bold text-fg">{value}</div>
            <div class="text-xs text-fg-muted">{label}</div>
        </div>
    }
}

#[component]
fn ShiftGroup(shift_type_id: i64, members: Vec<ScheduleEntry>) -> impl IntoView {
    let name = members
        .first()
        .and_then(|entry| entry.shift_type_name.clone())
        .unwrap_or_else(|| shift_label(shift_type_id).to_string());
    view! {
        <section class="space-y-2">
            <h4 class="text-sm font-semibold text-fg">{format!("{} ({}人)", name, members.len())}</h4>
            <ul class="divide-y divide-border rounded-md border border-border">
                {members
                    .into_iter()
                    .map(|entry| {
                        let tone = if entry.status == 1 { ARRANGED_TONE } else { PENDING_TONE };
                        view! {
                            <li class="flex items-center justify-between px-3 py-2 text-sm">
                                <span class="text-fg">
                                    {entry.employee_name.clone().unwrap_or_else(|| format!("员工 #{}", entry.employee_id))}
                                </span>
                                <span class="text-xs text-fg-muted">
                                    {format!("{} 至 {}", entry.start_date, entry.end_date)}
                                </span>
                                <Tag tone=tone label=status_label(entry.status) />
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </section>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{pages::schedules::calendar::entry, test_support::ssr::render_to_string};

    #[test]
    fn groups_entries_and_shows_totals() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 11).unwrap();
        let mut pending = entry(3, 2, 2, date);
        pending.status = 0;
        let entries = vec![entry(1, 1, 1, date), entry(2, 2, 1, date), pending];
        let html = render_to_string(move || {
            let entries = entries.clone();
            view! {
                <DayDetailModal
                    day=Signal::derive(move || Some(date))
                    entries=Signal::derive(move || entries.clone())
                    on_close=Callback::new(|_| {})
                    on_add=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("2024年05月11日 (星期六)"));
        assert!(html.contains("周末"));
        assert!(html.contains("早班 (2人)"));
        assert!(html.contains("中班 (1人)"));
        assert!(html.contains("待确认"));
        assert!(html.contains("总排班数"));
    }
}
