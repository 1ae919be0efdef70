use leptos::*;

use crate::{
    components::{
        common::ButtonVariant,
        error::InlineErrorMessage,
        forms::{DatePicker, SelectField, TextField},
        modal::Modal,
    },
    pages::employees::{
        utils::{FormMode, GENDERS},
        view_model::EmployeesViewModel,
    },
};

#[component]
pub fn EmployeeFormModal(vm: EmployeesViewModel) -> impl IntoView {
    let form = vm.form;
    let is_open = Signal::derive(move || vm.mode.with(Option::is_some));
    let title = Signal::derive(move || {
        vm.mode
            .get()
            .map(|mode| mode.title())
            .unwrap_or_default()
            .to_string()
    });
    let is_add = move || matches!(vm.mode.get(), Some(FormMode::Add));
    let genders: Vec<(String, String)> = GENDERS
        .iter()
        .map(|g| (g.to_string(), g.to_string()))
        .collect();

    let submit = move || {
        spawn_local(async move {
            vm.submit().await;
        });
    };

    view! {
        <Modal
            is_open=is_open
            title=title
            on_close=Callback::new(move |_| vm.close_form())
        >
            <form
                class="space-y-4"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                <div class="grid grid-cols-1 gap-4 sm:grid-cols-2">
                    <TextField label="工号" value=form.employee_no placeholder="请输入员工工号" required=true />
                    <TextField label="姓名" value=form.name placeholder="请输入员工姓名" required=true />
                    <SelectField
                        label="性别"
                        value=form.gender
                        options=genders.clone()
                        placeholder="请选择性别"
                        required=true
                    />
                    <TextField
                        label="邮箱"
                        value=form.email
                        input_type="email"
                        placeholder="请输入邮箱地址"
                        required=true
                    />
                    <TextField label="电话" value=form.phone placeholder="请输入电话号码" required=true />
                    <TextField label="职位" value=form.position placeholder="请输入职位" required=true />
                    <Show when=is_add>
                        <TextField
                            label="密码"
                            value=form.password
                            input_type="password"
                            placeholder="请输入登录密码"
                            required=true
                        />
                    </Show>
                    <DatePicker value=form.hire_date label="入职日期" />
                    <DatePicker value=form.contract_end_date label="合同期限" />
                </div>
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
                        {move || if vm.saving.get() { "保存中..." } else { "确定" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
