use leptos::*;

use crate::{
    components::{
        common::{Button, ButtonVariant},
        error::InlineErrorMessage,
        forms::DatePicker,
    },
    pages::attendance::view_model::AttendanceViewModel,
};

#[component]
pub fn AttendanceFilters(vm: AttendanceViewModel) -> impl IntoView {
    let search = move |_| {
        spawn_local(async move {
            vm.search().await;
        });
    };
    let reset = move |_| {
        spawn_local(async move {
            vm.reset_filters().await;
        });
    };

    view! {
        <div class="space-y-2">
            <div class="flex flex-wrap items-end gap-3">
                <div class="w-48">
                    <DatePicker value=vm.start_date label="开始日期" />
                </div>
                <div class="w-48">
                    <DatePicker value=vm.end_date label="结束日期" />
                </div>
                <input
                    type="search"
                    class="w-52 rounded-md border border-border bg-surface-elevated px-3 py-2 text-sm text-fg"
                    placeholder="搜索员工"
                    prop:value=move || vm.name.get()
                    on:input=move |ev| vm.name.set(event_target_value(&ev))
                />
                <Button loading=vm.loading on:click=search>"查询"</Button>
                <Button variant=ButtonVariant::Secondary on:click=reset>"重置"</Button>
            </div>
            <InlineErrorMessage error=vm.filter_error />
        </div>
    }
}
