use leptos::*;

use super::view_model::{use_templates_view_model, TemplatesViewModel};
use crate::{
    api::ShiftTemplate,
    components::{
        common::{Button, ButtonVariant},
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        error::InlineErrorMessage,
        forms::{SelectField, TextAreaField, TextField},
        guard::PermissionGate,
        layout::LoadingSpinner,
        modal::Modal,
    },
    pages::schedules::{calendar::shift_label, utils::shift_type_options},
    state::{crud::DELETE_DIALOG_MESSAGE, permissions::Permission},
    utils::time::format_time,
};

const SCHEDULES_PATH: &str = "/schedules";

#[component]
pub fn ShiftTemplatesPanel() -> impl IntoView {
    let vm = use_templates_view_model();
    let crud = vm.crud;
    let on_confirm_delete = Callback::new(move |_| {
        spawn_local(async move {
            crud.confirm_delete().await;
        });
    });

    view! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-3">
                <div class="flex items-center gap-3">
                    <a
                        href=SCHEDULES_PATH
                        class=format!("inline-flex items-center rounded-md px-3 py-2 text-sm {}", ButtonVariant::Ghost.classes())
                    >
                        "返回"
                    </a>
                    <h2 class="text-2xl font-bold text-fg">"排班模板管理"</h2>
                </div>
                <PermissionGate require=Permission::ScheduleCreate hide=true>
                    <Button on:click=move |_| vm.open_add()>"新建模板"</Button>
                </PermissionGate>
            </div>
            <section class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                <input
                    type="search"
                    class="w-72 rounded-md border border-border bg-surface-elevated px-3 py-2 text-sm text-fg"
                    placeholder="搜索模板名称或描述"
                    prop:value=move || crud.query().get()
                    on:input=move |ev| crud.search(&event_target_value(&ev))
                />
                <TemplateTable
                    templates=crud.filtered()
                    loading=crud.loading()
                    on_edit=Callback::new(move |template: ShiftTemplate| vm.open_edit(&template))
                    on_delete=Callback::new(move |id| crud.request_delete(id))
                />
            </section>
            <TemplateFormModal vm=vm />
            <ConfirmDialog
                is_open=Signal::derive(move || crud.pending_delete().get().is_some())
                title=crud.delete_dialog_title()
                message=DELETE_DIALOG_MESSAGE
                on_confirm=on_confirm_delete
                on_cancel=Callback::new(move |_| crud.cancel_delete())
                destructive=true
            />
        </div>
    }
}

#[component]
fn TemplateTable(
    #[prop(into)] templates: Signal<Vec<ShiftTemplate>>,
    #[prop(into)] loading: Signal<bool>,
    on_edit: Callback<ShiftTemplate>,
    on_delete: Callback<i64>,
) -> impl IntoView {
    view! {
        <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
            {move || {
                let rows = templates.get();
                if rows.is_empty() {
                    return view! { <EmptyState title="暂无排班模板" /> }.into_view();
                }
                view! {
                    <table class="min-w-full divide-y divide-border text-sm">
                        <thead>
                            <tr class="text-left text-fg-muted">
                                <th class="py-2 pr-4">"模板名称"</th>
                                <th class="py-2 pr-4">"描述"</th>
                                <th class="py-2 pr-4">"班次类型"</th>
                                <th class="py-2 pr-4">"开始时间"</th>
                                <th class="py-2 pr-4">"结束时间"</th>
                                <th class="py-2">"操作"</th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            {rows
                                .into_iter()
                                .map(|template| {
                                    let id = template.id;
                                    let for_edit = store_value(template.clone());
                                    view! {
                                        <tr>
                                            <td class="py-2 pr-4 text-fg">{template.name.clone()}</td>
                                            <td class="py-2 pr-4">{template.description.clone().unwrap_or_else(|| "-".into())}</td>
                                            <td class="py-2 pr-4">{template.shift_type_id.map(shift_label).unwrap_or("-")}</td>
                                            <td class="py-2 pr-4">{format_time(template.start_time)}</td>
                                            <td class="py-2 pr-4">{format_time(template.end_time)}</td>
                                            <td class="py-2 space-x-3 whitespace-nowrap">
                                                <PermissionGate require=Permission::ScheduleEdit hide=true>
                                                    <button
                                                        class="text-action-primary-bg hover:underline"
                                                        on:click=move |_| on_edit.call(for_edit.get_value())
                                                    >
                                                        "编辑"
                                                    </button>
                                                </PermissionGate>
                                                <PermissionGate require=Permission::ScheduleDelete hide=true>
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
                }
                .into_view()
            }}
        </Show>
    }
}

#[component]
fn TemplateFormModal(vm: TemplatesViewModel) -> impl IntoView {
    let form = vm.form;
    let title = Signal::derive(move || {
        vm.mode
            .get()
            .map(|mode| mode.title())
            .unwrap_or_default()
            .to_string()
    });
    let shift_types = shift_type_options(&[]);
    let submit = move || {
        spawn_local(async move {
            vm.submit().await;
        });
    };

    view! {
        <Modal
            is_open=Signal::derive(move || vm.mode.with(Option::is_some))
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
                <TextField label="模板名称" value=form.name placeholder="请输入模板名称" required=true />
                <TextAreaField label="描述" value=form.description placeholder="请输入模板描述" />
                <SelectField
                    label="班次类型"
                    value=form.shift_type_id
                    options=shift_types.clone()
                    placeholder="不指定"
                />
                <div class="grid grid-cols-2 gap-4">
                    <TextField label="开始时间" value=form.start_time input_type="time" required=true />
                    <TextField label="结束时间" value=form.end_time input_type="time" required=true />
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
                        {move || if vm.saving.get() { "保存中..." } else { "保存" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        state::permissions::Role,
        test_support::{helpers::provide_signed_in, ssr::{render_as, render_to_string}},
    };
    use chrono::NaiveTime;

    #[test]
    fn table_lists_template_times() {
        let html = render_to_string(|| {
            provide_signed_in(Role::Admin);
            let rows = vec![ShiftTemplate {
                id: 1,
                name: "晚班模板".into(),
                description: None,
                shift_type_id: Some(3),
                start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            }];
            view! {
                <TemplateTable
                    templates=Signal::derive(move || rows.clone())
                    loading=Signal::derive(|| false)
                    on_edit=Callback::new(|_| {})
                    on_delete=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("晚班模板"));
        assert!(html.contains("晚班"));
        assert!(html.contains("22:00"));
        assert!(html.contains("06:00"));
        assert!(html.contains("编辑"));
    }

    #[test]
    fn panel_shows_back_link_and_create_for_admin() {
        let html = render_as(Role::Admin, || view! { <ShiftTemplatesPanel /> });
        assert!(html.contains("排班模板管理"));
        assert!(html.contains("返回"));
        assert!(html.contains("新建模板"));
    }
}
