use leptos::*;

use crate::{
    components::{
        common::{Button, ButtonVariant},
        forms::FileButton,
        guard::PermissionGate,
    },
    state::permissions::Permission,
};

/// Search box on the left; import, export and add on the right.
#[component]
pub fn EmployeeToolbar(
    #[prop(into)] query: Signal<String>,
    on_search: Callback<String>,
    on_import: Callback<web_sys::File>,
    on_export: Callback<()>,
    on_add: Callback<()>,
    #[prop(into)] importing: Signal<bool>,
    #[prop(into)] exporting: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="flex flex-wrap items-center justify-between gap-3">
            <input
                type="search"
                class="w-72 rounded-md border border-border bg-surface-elevated px-3 py-2 text-sm text-fg"
                placeholder="搜索员工姓名或工号"
                prop:value=move || query.get()
                on:input=move |ev| on_search.call(event_target_value(&ev))
            />
            <div class="flex flex-wrap gap-2">
                <PermissionGate require=Permission::EmployeeImport hide=true>
                    <FileButton
                        label="导入Excel"
                        accept=".xlsx,.xls"
                        on_file=on_import
                        disabled=importing
                    />
                </PermissionGate>
                <PermissionGate require=Permission::EmployeeExport hide=true>
                    <Button
                        variant=ButtonVariant::Secondary
                        loading=exporting
                        on:click=move |_| on_export.call(())
                    >
                        "导出Excel"
                    </Button>
                </PermissionGate>
                <PermissionGate require=Permission::EmployeeCreate hide=true>
                    <Button on:click=move |_| on_add.call(())>"新增员工"</Button>
                </PermissionGate>
            </div>
        </div>
    }
}
