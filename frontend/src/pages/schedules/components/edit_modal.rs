use leptos::*;

use crate::{
    components::{
        common::ButtonVariant,
        error::InlineErrorMessage,
        forms::{DatePicker, SelectField},
        modal::Modal,
    },
    pages::{
        attendance::utils::employee_options,
        schedules::{
            utils::{shift_type_options, STATUS_OPTIONS},
            view_model::SchedulesViewModel,
        },
    },
};

#[component]
pub fn EditScheduleModal(vm: SchedulesViewModel) -> impl IntoView {
    let form = vm.edit_form;
    let employees = Signal::derive(move || employee_options(&vm.employees.get()));
    let shift_types = Signal::derive(move || shift_type_options(&vm.shift_types.get()));
    let statuses: Vec<(String, String)> = STATUS_OPTIONS
        .iter()
        .map(|(value, label)| (value.to_string(), label.to_string()))
        .collect();

    let submit = move || {
        spawn_local(async move {
            vm.submit_edit().await;
        });
    };

    view! {
        <Modal
            is_open=Signal::derive(move || vm.editing.with(Option::is_some))
            title="编辑排班"
            on_close=Callback::new(move |_| vm.close_edit())
        >
            <form
                class="space-y-4"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                <SelectField label="员工" value=form.employee_id options=employees placeholder="请选择员工" required=true />
                <SelectField
                    label="班次类型"
                    value=form.shift_type_id
                    options=shift_types
                    placeholder="请选择班次类型"
                    required=true
                />
                <div class="grid grid-cols-1 gap-4 sm:grid-cols-2">
                    <DatePicker value=form.start_date label="开始日期" />
                    <DatePicker value=form.end_date label="结束日期" />
                </div>
                <SelectField label="状态" value=form.status options=statuses.clone() />
                <InlineErrorMessage error=vm.edit_error />
                <div class="flex justify-end gap-2">
                    <button
                        type="button"
                        class=format!("rounded-md px-4 py-2 text-sm font-semibold {}", ButtonVariant::Secondary.classes())
                        on:click=move |_| vm.close_edit()
                    >
                        "取消"
                    </button>
                    <button
                        type="submit"
                        class=format!("rounded-md px-4 py-2 text-sm font-semibold disabled:opacity-50 {}", ButtonVariant::Primary.classes())
                        disabled=move || vm.saving.get()
                    >
                        {move || if vm.saving.get() { "保存中..." } else { "保存" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
