use leptos::*;

use crate::{
    components::{
        common::ButtonVariant,
        error::InlineErrorMessage,
        forms::{DatePicker, SelectField, TextAreaField, TextField},
        modal::Modal,
    },
    pages::attendance::{
        utils::{employee_options, STATUS_OPTIONS},
        view_model::AttendanceViewModel,
    },
};

#[component]
pub fn AttendanceFormModal(vm: AttendanceViewModel) -> impl IntoView {
    let form = vm.form;
    let is_open = Signal::derive(move || vm.mode.with(Option::is_some));
    let title = Signal::derive(move || {
        vm.mode
            .get()
            .map(|mode| mode.title())
            .unwrap_or_default()
            .to_string()
    });
    let submit_label = move || {
        if vm.saving.get() {
            "保存中..."
        } else {
            vm.mode.get().map(|mode| mode.submit_label()).unwrap_or("确定")
        }
    };
    let employees = Signal::derive(move || vm.employees.with(|list| employee_options(list)));
    let statuses: Vec<(String, String)> = STATUS_OPTIONS
        .iter()
        .map(|status| (status.to_string(), status.to_string()))
        .collect();

    view! {
        <Modal is_open=is_open title=title on_close=Callback::new(move |_| vm.close_form())>
            <form
                class="space-y-4"
                on:submit=move |ev| {
                    ev.prevent_default();
                    spawn_local(async move {
                        vm.submit().await;
                    });
                }
            >
                <SelectField
                    label="员工"
                    value=form.employee_id
                    options=employees
                    placeholder="选择员工"
                    required=true
                />
                <DatePicker value=form.date label="日期" />
                <div class="grid grid-cols-2 gap-4">
                    <TextField label="上班时间" value=form.clock_in input_type="time" />
                    <TextField label="下班时间" value=form.clock_out input_type="time" />
                </div>
                <SelectField
                    label="考勤状态"
                    value=form.status
                    options=statuses.clone()
                    placeholder="选择考勤状态"
                    required=true
                />
                <TextAreaField label="备注" value=form.remarks placeholder="输入备注" />
                <InlineErrorMessage error=vm.form_error />
                <div class="flex justify-end gap-2">
                    <button
                        type="button"
                        class=format!("rounded-md px-4 py-2 text-sm font-semibold {}", ButtonVariant::Secondary.classes())
                        on:click=move |_| vm.close_form()
                    >
                        "取消"
                    </button>
                    <button
                        type="submit"
                        class=format!("rounded-md px-4 py-2 text-sm font-semibold disabled:opacity-50 {}", ButtonVariant::Primary.classes())
                        disabled=move || vm.saving.get()
                    >
                        {submit_label}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
