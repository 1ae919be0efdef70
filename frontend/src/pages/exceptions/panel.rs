use leptos::*;

use super::{
    utils::{rule_tone, rule_type_label, threshold_label, type_options},
    view_model::{use_exceptions_view_model, ExceptionsViewModel},
};
use crate::{
    api::{ExceptionRule, ExceptionRuleType},
    components::{
        common::{Button, ButtonVariant, Tag},
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        error::InlineErrorMessage,
        forms::{SelectField, TextField},
        guard::PermissionGate,
        layout::LoadingSpinner,
        modal::Modal,
    },
    state::{crud::DELETE_DIALOG_MESSAGE, permissions::Permission},
};

#[component]
pub fn ExceptionsPanel() -> impl IntoView {
    let vm = use_exceptions_view_model();
    let crud = vm.crud;
    let on_confirm_delete = Callback::new(move |_| {
        spawn_local(async move {
            crud.confirm_delete().await;
        });
    });

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold text-fg">"异常设定"</h2>
            <section class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                <div class="flex flex-wrap items-center justify-between gap-3">
                    <input
                        type="search"
                        class="w-72 rounded-md border border-border bg-surface-elevated px-3 py-2 text-sm text-fg"
                        placeholder="搜索规则名称或类型"
                        prop:value=move || crud.query().get()
                        on:input=move |ev| crud.search(&event_target_value(&ev))
                    />
                    <PermissionGate require=Permission::ExceptionCreate hide=true>
                        <Button on:click=move |_| vm.open_add()>"新增规则"</Button>
                    </PermissionGate>
                </div>
                <RuleTable
                    rules=crud.filtered()
                    loading=crud.loading()
                    on_edit=Callback::new(move |rule: ExceptionRule| vm.open_edit(&rule))
                    on_delete=Callback::new(move |id| crud.request_delete(id))
                />
            </section>
            <RuleFormModal vm=vm />
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
fn RuleTable(
    #[prop(into)] rules: Signal<Vec<ExceptionRule>>,
    #[prop(into)] loading: Signal<bool>,
    on_edit: Callback<ExceptionRule>,
    on_delete: Callback<i64>,
) -> impl IntoView {
    view! {
        <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
            {move || {
                let rows = rules.get();
                if rows.is_empty() {
                    return view! { <EmptyState title="暂无异常规则" /> }.into_view();
                }
                view! {
                    <table class="min-w-full divide-y divide-border text-sm">
                        <thead>
                            <tr class="text-left text-fg-muted">
                                <th class="py-2 pr-4">"规则名称"</th>
                                <th class="py-2 pr-4">"规则类型"</th>
                                <th class="py-2 pr-4">"时间阈值"</th>
                                <th class="py-2 pr-4">"处理方式"</th>
                                <th class="py-2">"操作"</th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            {rows
                                .into_iter()
                                .map(|rule| {
                                    let id = rule.rule_id;
                                    let kind = rule.kind();
                                    let threshold = rule
                                        .threshold
                                        .map(|value| {
                                            let unit = if kind == Some(ExceptionRuleType::Overdue) { "天" } else { "分钟" };
                                            format!("{} {}", value, unit)
                                        })
                                        .unwrap_or_else(|| "-".into());
                                    let for_edit = store_value(rule.clone());
                                    view! {
                                        <tr>
                                            <td class="py-2 pr-4 text-fg">{rule.rule_name.clone()}</td>
                                            <td class="py-2 pr-4">
                                                <Tag tone=rule_tone(kind) label=rule_type_label(&rule) />
                                            </td>
                                            <td class="py-2 pr-4">{threshold}</td>
                                            <td class="py-2 pr-4">{rule.description.clone().unwrap_or_else(|| "-".into())}</td>
                                            <td class="py-2 space-x-3 whitespace-nowrap">
                                                <PermissionGate require=Permission::ExceptionEdit hide=true>
                                                    <button
                                                        class="text-action-primary-bg hover:underline"
                                                        on:click=move |_| on_edit.call(for_edit.get_value())
                                                    >
                                                        "编辑"
                                                    </button>
                                                </PermissionGate>
                                                <PermissionGate require=Permission::ExceptionDelete hide=true>
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
fn RuleFormModal(vm: ExceptionsViewModel) -> impl IntoView {
    let form = vm.form;
    let title = Signal::derive(move || {
        vm.mode
            .get()
            .map(|mode| mode.title())
            .unwrap_or_default()
            .to_string()
    });
    let threshold_title = Signal::derive(move || {
        threshold_label(ExceptionRuleType::parse(&form.rule_type.get())).to_string()
    });
    let types = type_options();
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
                <TextField label="规则名称" value=form.rule_name placeholder="请输入规则名称" required=true />
                <SelectField
                    label="规则类型"
                    value=form.rule_type
                    options=types.clone()
                    placeholder="请选择规则类型"
                    required=true
                />
                {move || view! {
                    <TextField
                        label=threshold_title.get()
                        value=form.threshold
                        input_type="number"
                        required=true
                    />
                }}
                <TextField label="处理方式" value=form.description placeholder="发送提醒" required=true />
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
                        "确定"
                    </button>
                </div>
            </form>
        </Modal>
    }
}
