use leptos::*;

use crate::{
    api::Employee,
    components::{empty_state::EmptyState, guard::PermissionGate, layout::LoadingSpinner},
    state::permissions::Permission,
    utils::time::format_date,
};

fn cell(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

#[component]
pub fn EmployeeTable(
    #[prop(into)] employees: Signal<Vec<Employee>>,
    #[prop(into)] loading: Signal<bool>,
    on_edit: Callback<Employee>,
    on_delete: Callback<i64>,
) -> impl IntoView {
    view! {
        <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
            {move || {
                let rows = employees.get();
                if rows.is_empty() {
                    return view! { <EmptyState title="暂无员工数据" /> }.into_view();
                }
                view! {
                    <div class="overflow-x-auto">
                        <table class="min-w-full divide-y divide-border text-sm">
                            <thead>
                                <tr class="text-left text-fg-muted">
                                    <th class="py-2 pr-4">"工号"</th>
                                    <th class="py-2 pr-4">"姓名"</th>
                                    <th class="py-2 pr-4">"性别"</th>
                                    <th class="py-2 pr-4">"邮箱"</th>
                                    <th class="py-2 pr-4">"电话"</th>
                                    <th class="py-2 pr-4">"职位"</th>
                                    <th class="py-2 pr-4">"入职日期"</th>
                                    <th class="py-2 pr-4">"合同期限"</th>
                                    <th class="py-2">"操作"</th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-border">
                                {rows
                                    .into_iter()
                                    .map(|employee| {
                                        let id = employee.employee_id;
                                        let for_edit = store_value(employee.clone());
                                        view! {
                                            <tr>
                                                <td class="py-2 pr-4 text-fg">{employee.employee_no.clone()}</td>
                                                <td class="py-2 pr-4 text-fg">{employee.name.clone()}</td>
                                                <td class="py-2 pr-4">{cell(employee.gender.as_deref())}</td>
                                                <td class="py-2 pr-4">{cell(employee.email.as_deref())}</td>
                                                <td class="py-2 pr-4">{cell(employee.phone.as_deref())}</td>
                                                <td class="py-2 pr-4">{cell(employee.position.as_deref())}</td>
                                                <td class="py-2 pr-4">
                                                    {employee.hire_date.map(format_date).unwrap_or_else(|| "-".into())}
                                                </td>
                                                <td class="py-2 pr-4">
                                                    {employee.contract_end_date.map(format_date).unwrap_or_else(|| "-".into())}
                                                </td>
                                                <td class="py-2 space-x-3 whitespace-nowrap">
                                                    <PermissionGate require=Permission::EmployeeEdit hide=true>
                                                        <button
                                                            class="text-action-primary-bg hover:underline"
                                                            on:click=move |_| on_edit.call(for_edit.get_value())
                                                        >
                                                            "编辑"
                                                        </button>
                                                    </PermissionGate>
                                                    <PermissionGate require=Permission::EmployeeDelete hide=true>
                                                        <button
                                                            class="text-action-danger-bg hover:underline"
                                                            on:click=move |_| on_delete.call(id)
                                                        >
                                                            "删除"
                                                        </button>
                                                    </PermissionGate>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    </div>
                }
                .into_view()
            }}
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        state::permissions::Role,
        test_support::{helpers::provide_signed_in, ssr::render_to_string},
    };
    use chrono::NaiveDate;

    fn employee() -> Employee {
        Employee {
            employee_id: 1,
            employee_no: "E001".into(),
            name: "王五".into(),
            gender: Some("男".into()),
            email: None,
            phone: None,
            position: Some("工程师".into()),
            hire_date: NaiveDate::from_ymd_opt(2023, 7, 1),
            contract_end_date: None,
            is_admin: false,
        }
    }

    #[test]
    fn admin_sees_row_actions() {
        let html = render_to_string(|| {
            provide_signed_in(Role::Admin);
            view! {
                <EmployeeTable
                    employees=Signal::derive(|| vec![employee()])
                    loading=Signal::derive(|| false)
                    on_edit=Callback::new(|_| {})
                    on_delete=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("E001"));
        assert!(html.contains("2023-07-01"));
        assert!(html.contains("编辑"));
        assert!(html.contains("删除"));
    }

    #[test]
    fn employee_role_gets_read_only_rows() {
        let html = render_to_string(|| {
            provide_signed_in(Role::Employee);
            view! {
                <EmployeeTable
                    employees=Signal::derive(|| vec![employee()])
                    loading=Signal::derive(|| false)
                    on_edit=Callback::new(|_| {})
                    on_delete=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("王五"));
        assert!(!html.contains("编辑"));
        assert!(!html.contains(">删除<"));
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let html = render_to_string(|| {
            provide_signed_in(Role::Admin);
            view! {
                <EmployeeTable
                    employees=Signal::derive(Vec::new)
                    loading=Signal::derive(|| false)
                    on_edit=Callback::new(|_| {})
                    on_delete=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("暂无员工数据"));
    }
}
