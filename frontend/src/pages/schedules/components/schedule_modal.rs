use leptos::*;

use crate::{
    api::Employee,
    components::{
        common::ButtonVariant,
        error::InlineErrorMessage,
        forms::{DatePicker, SelectField},
        modal::Modal,
    },
    pages::{
        attendance::utils::employee_options,
        schedules::{
            utils::{all_selected, shift_type_options, template_options, ScheduleForm, ScheduleTab},
            view_model::SchedulesViewModel,
        },
    },
};

#[component]
pub fn ScheduleModal(vm: SchedulesViewModel) -> impl IntoView {
    let form = vm.form;
    let employees = Signal::derive(move || employee_options(&vm.employees.get()));
    let shift_types = Signal::derive(move || shift_type_options(&vm.shift_types.get()));
    let templates = Signal::derive(move || template_options(&vm.templates.get()));

    let submit = move || {
        spawn_local(async move {
            vm.submit().await;
        });
    };

    view! {
        <Modal
            is_open=Signal::derive(move || vm.create_open.get())
            title="排班管理"
            on_close=Callback::new(move |_| vm.close_create())
            wide=true
        >
            <div class="flex border-b border-border">
                {ScheduleTab::ALL
                    .into_iter()
                    .map(|tab| view! {
                        <button
                            type="button"
                            class=move || format!(
                                "px-4 py-2 text-sm font-medium border-b-2 {}",
                                if vm.tab.get() == tab {
                                    "border-action-primary-bg text-action-primary-bg"
                                } else {
                                    "border-transparent text-fg-muted hover:text-fg"
                                }
                            )
                            on:click=move |_| {
                                vm.tab.set(tab);
                                vm.form_error.set(None);
                            }
                        >
                            {tab.label()}
                        </button>
                    })
                    .collect_view()}
            </div>
            <form
                class="space-y-4"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                {move || match vm.tab.get() {
                    ScheduleTab::Single => view! {
                        <SelectField
                            label="员工"
                            value=form.employee_id
                            options=employees
                            placeholder="请选择员工"
                            required=true
                        />
                        <SelectField
                            label="班次类型"
                            value=form.shift_type_id
                            options=shift_types
                            placeholder="请选择班次类型"
                            required=true
                        />
                    }
                    .into_view(),
                    ScheduleTab::Batch => view! {
                        <EmployeePicker form=form employees=vm.employees />
                        <SelectField
                            label="班次类型"
                            value=form.shift_type_id
                            options=shift_types
                            placeholder="请选择班次类型"
                            required=true
                        />
                    }
                    .into_view(),
                    ScheduleTab::Template => view! {
                        <SelectField
                            label="排班模板"
                            value=form.template_id
                            options=templates
                            placeholder="请选择排班模板"
                            required=true
                        />
                        <EmployeePicker form=form employees=vm.employees />
                    }
                    .into_view(),
                }}
                <div class="grid grid-cols-1 gap-4 sm:grid-cols-2">
                    <DatePicker value=form.start_date label="开始日期" />
                    <DatePicker value=form.end_date label="结束日期" />
                </div>
                <InlineErrorMessage error=vm.form_error />
                <div class="flex justify-end gap-2">
                    <button
                        type="button"
                        class=format!("rounded-md px-4 py-2 text-sm font-semibold {}", ButtonVariant::Secondary.classes())
                        on:click=move |_| vm.close_create()
                    >
                        "取消"
                    </button>
                    <button
                        type="submit"
                        class=format!("rounded-md px-4 py-2 text-sm font-semibold disabled:opacity-50 {}", ButtonVariant::Primary.classes())
                        disabled=move || vm.saving.get()
                    >
                        {move || if vm.saving.get() { "提交中..." } else { "提交" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

/// Checkbox list of employees with a select-all toggle.
#[component]
pub fn EmployeePicker(form: ScheduleForm, #[prop(into)] employees: Signal<Vec<Employee>>) -> impl IntoView {
    let ids = move || employees.with(|list| list.iter().map(|e| e.employee_id).collect::<Vec<_>>());
    let everyone = move || form.selected.with(|selected| all_selected(selected, &ids()));

    view! {
        <div class="space-y-2">
            <div class="flex items-center justify-between">
                <span class="text-sm font-medium text-fg-muted">
                    "选择员工"
                    <span class="text-status-error-text ml-0.5">"*"</span>
                </span>
                <label class="flex items-center gap-1 text-sm text-fg">
                    <input
                        type="checkbox"
                        prop:checked=everyone
                        on:change=move |ev| form.select_all(&ids(), event_target_checked(&ev))
                    />
                    "全选"
                </label>
            </div>
            <div class="grid max-h-48 grid-cols-2 gap-1 overflow-y-auto rounded-md border border-border p-2 sm:grid-cols-3">
                {move || {
                    employees
                        .get()
                        .into_iter()
                        .map(|employee| {
                            let id = employee.employee_id;
                            view! {
                                <label class="flex items-center gap-1 text-sm text-fg">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || form.selected.with(|selected| selected.contains(&id))
                                        on:change=move |_| form.toggle(id)
                                    />
                                    {employee.name}
                                </label>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <p class="text-xs text-fg-muted">
                {move || format!("已选择 {} 人", form.selected.with(|selected| selected.len()))}
            </p>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        api::ApiClient,
        state::{lifetime::Lifetime, loading::GlobalLoading, notifications::RecordingNotifier},
        test_support::ssr::render_to_string,
    };
    use std::rc::Rc;

    fn employee(id: i64, name: &str) -> Employee {
        Employee {
            employee_id: id,
            employee_no: format!("E{:03}", id),
            name: name.into(),
            gender: None,
            email: None,
            phone: None,
            position: None,
            hire_date: None,
            contract_end_date: None,
            is_admin: false,
        }
    }

    #[test]
    fn batch_tab_lists_employees_with_select_all() {
        let html = render_to_string(|| {
            let vm = SchedulesViewModel::new(
                ApiClient::new_with_base_url("http://127.0.0.1:9/api"),
                Rc::new(RecordingNotifier::new()),
                GlobalLoading::new(),
                Lifetime::new(),
            );
            vm.employees.set(vec![employee(1, "张三"), employee(2, "李四")]);
            vm.open_create(None);
            vm.tab.set(ScheduleTab::Batch);
            vm.form.toggle(2);
            view! { <ScheduleModal vm=vm /> }
        });
        assert!(html.contains("排班管理"));
        assert!(html.contains("单个排班"));
        assert!(html.contains("模板应用"));
        assert!(html.contains("全选"));
        assert!(html.contains("张三"));
        assert!(html.contains("已选择 1 人"));
    }
}
