use chrono::{Datelike, NaiveDate};
use leptos::*;

use crate::{
    api::{ScheduleEntry, ScheduleMap},
    components::guard::PermissionGate,
    pages::schedules::calendar::{
        badge_text, day_content, entries_for, entry_label, month_grid, shift_tone, CalendarDay,
        DayContent,
    },
    state::permissions::Permission,
    utils::time::{today, WEEKDAY_LABELS},
};

#[derive(Clone, Copy)]
pub struct CalendarActions {
    pub on_day: Callback<NaiveDate>,
    pub on_details: Callback<NaiveDate>,
    pub on_edit: Callback<ScheduleEntry>,
    pub on_delete: Callback<ScheduleEntry>,
    pub on_copy: Callback<ScheduleEntry>,
}

#[component]
pub fn ScheduleCalendar(
    #[prop(into)] year: Signal<i32>,
    #[prop(into)] month: Signal<u32>,
    #[prop(into)] schedules: Signal<ScheduleMap>,
    #[prop(into)] copying: Signal<bool>,
    actions: CalendarActions,
) -> impl IntoView {
    view! {
        <div class="grid grid-cols-7 gap-px rounded-lg border border-border bg-border overflow-hidden">
            {WEEKDAY_LABELS
                .iter()
                .map(|label| view! {
                    <div class="bg-surface-muted py-2 text-center text-xs font-semibold text-fg-muted">
                        {format!("周{}", label)}
                    </div>
                })
                .collect_view()}
            {move || {
                let map = schedules.get();
                month_grid(year.get(), month.get())
                    .into_iter()
                    .flatten()
                    .map(|day| {
                        let entries = entries_for(&map, day.date);
                        view! { <DayCell day=day entries=entries copying=copying actions=actions /> }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn DayCell(
    day: CalendarDay,
    entries: Vec<ScheduleEntry>,
    copying: Signal<bool>,
    actions: CalendarActions,
) -> impl IntoView {
    let date = day.date;
    let is_today = date == today();
    let background = if !day.in_month {
        "bg-surface-muted text-fg-muted"
    } else if day.is_weekend {
        "bg-surface-muted/50"
    } else {
        "bg-surface-elevated"
    };
    let content = match day_content(entries) {
        DayContent::Empty => ().into_view(),
        DayContent::Inline(entries) => entries
            .into_iter()
            .map(|entry| view! { <InlineEntry entry=entry actions=actions /> })
            .collect_view(),
        DayContent::Summary { badges, total } => view! {
            <div class="flex flex-wrap gap-1">
                {badges
                    .into_iter()
                    .map(|(label, count)| view! {
                        <span class="rounded px-1.5 py-0.5 text-xs bg-surface-muted text-fg">
                            {badge_text(label, count)}
                        </span>
                    })
                    .collect_view()}
            </div>
            <button
                type="button"
                class="text-xs text-action-primary-bg hover:underline"
                title=format!("共 {} 个排班，点击查看详情", total)
                on:click=move |ev| {
                    ev.stop_propagation();
                    actions.on_details.call(date);
                }
            >
                "查看详情"
            </button>
        }
        .into_view(),
    };

    view! {
        <div
            class=move || format!(
                "min-h-[6rem] p-1.5 space-y-1 cursor-pointer {} {}",
                background,
                if copying.get() { "hover:ring-2 hover:ring-action-primary-focus" } else { "hover:bg-surface-muted" }
            )
            on:click=move |_| actions.on_day.call(date)
        >
            <div class=if is_today {
                "text-xs font-bold text-action-primary-bg"
            } else {
                "text-xs font-medium"
            }>
                {date.day()}
            </div>
            {content}
        </div>
    }
}

#[component]
fn InlineEntry(entry: ScheduleEntry, actions: CalendarActions) -> impl IntoView {
    let label = entry_label(&entry);
    let tone = shift_tone(entry.shift_type_id);
    let conflict = entry.conflict.as_ref().map(|c| c.detail.clone());
    let entry = store_value(entry);

    view! {
        <div class=format!("group rounded px-1.5 py-0.5 text-xs {}", tone)>
            <div class="flex items-center justify-between gap-1">
                <span class="truncate">{label}</span>
                {conflict.map(|detail| view! {
                    <i class="fas fa-exclamation-triangle text-status-error-text" title=detail></i>
                })}
            </div>
            <div class="hidden group-hover:flex gap-2">
                <PermissionGate require=Permission::ScheduleCreate hide=true>
                    <button
                        type="button"
                        class="hover:underline"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            actions.on_copy.call(entry.get_value());
                        }
                    >
                        "复制"
                    </button>
                </PermissionGate>
                <PermissionGate require=Permission::ScheduleEdit hide=true>
                    <button
                        type="button"
                        class="hover:underline"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            actions.on_edit.call(entry.get_value());
                        }
                    >
                        "编辑"
                    </button>
                </PermissionGate>
                <PermissionGate require=Permission::ScheduleDelete hide=true>
                    <button
                        type="button"
                        class="hover:underline"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            actions.on_delete.call(entry.get_value());
                        }
                    >
                        "删除"
                    </button>
                </PermissionGate>
            </div>
        </div>
    }
}
