use crate::{
    api::ApiClient,
    components::layout::LoadingSpinner,
    state::{
        auth::use_auth,
        permissions::{use_permissions, Permission, PermissionSet},
    },
    utils::navigation::{default_navigator, redirect_to_login},
};
use leptos::*;

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let navigator = use_context::<ApiClient>()
        .map(|client| client.navigator())
        .unwrap_or_else(default_navigator);
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let is_loading = create_memo(move |_| auth.get().loading);
    create_effect(move |_| {
        let state = auth.get();
        if state.loading || state.is_authenticated {
            return;
        }
        redirect_to_login(navigator.as_ref());
    });
    view! {
        <Show
            when=move || should_render_children(is_authenticated.get(), is_loading.get())
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, is_loading: bool) -> bool {
    is_authenticated && !is_loading
}

/// What a [`PermissionGate`] checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    One(Permission),
    Any(Vec<Permission>),
    All(Vec<Permission>),
}

impl Requirement {
    pub fn is_met(&self, set: &PermissionSet) -> bool {
        match self {
            Requirement::One(permission) => set.has(*permission),
            Requirement::Any(permissions) => set.has_any(permissions),
            Requirement::All(permissions) => set.has_all(permissions),
        }
    }
}

impl From<Permission> for Requirement {
    fn from(permission: Permission) -> Self {
        Requirement::One(permission)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateOutcome {
    Children,
    Hidden,
    Fallback,
    Forbidden,
}

/// Children are shown while permissions are still loading to avoid flicker.
fn gate_outcome(
    set: &PermissionSet,
    requirement: &Requirement,
    hide: bool,
    has_fallback: bool,
) -> GateOutcome {
    if set.is_loading() || requirement.is_met(set) {
        GateOutcome::Children
    } else if hide {
        GateOutcome::Hidden
    } else if has_fallback {
        GateOutcome::Fallback
    } else {
        GateOutcome::Forbidden
    }
}

#[component]
pub fn PermissionGate(
    #[prop(into)] require: Requirement,
    #[prop(optional)] hide: bool,
    #[prop(optional, into)] fallback: Option<ViewFn>,
    children: ChildrenFn,
) -> impl IntoView {
    let permissions = use_permissions();
    let snapshot = permissions.snapshot();
    let has_fallback = fallback.is_some();
    move || match snapshot.with(|set| gate_outcome(set, &require, hide, has_fallback)) {
        GateOutcome::Children => children().into_view(),
        GateOutcome::Hidden => ().into_view(),
        GateOutcome::Fallback => fallback
            .as_ref()
            .map(|fallback| fallback.run())
            .unwrap_or_default(),
        GateOutcome::Forbidden => view! { <Forbidden /> }.into_view(),
    }
}

#[component]
pub fn Forbidden() -> impl IntoView {
    view! {
        <div class="text-center py-16 space-y-2">
            <p class="text-4xl font-bold text-fg-muted">"403"</p>
            <h2 class="text-lg font-semibold text-fg">"权限不足"</h2>
            <p class="text-sm text-fg-muted">"抱歉，您没有访问此功能的权限。"</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::permissions::Role;

    #[test]
    fn guard_blocks_until_authenticated() {
        assert!(!should_render_children(false, true));
        assert!(!should_render_children(false, false));
        assert!(!should_render_children(true, true));
        assert!(should_render_children(true, false));
    }

    #[test]
    fn gate_resolution_order() {
        let employee = PermissionSet::for_role(Role::Employee);
        let delete = Requirement::One(Permission::EmployeeDelete);
        assert_eq!(gate_outcome(&employee, &delete, false, false), GateOutcome::Forbidden);
        assert_eq!(gate_outcome(&employee, &delete, false, true), GateOutcome::Fallback);
        assert_eq!(gate_outcome(&employee, &delete, true, true), GateOutcome::Hidden);
        assert_eq!(
            gate_outcome(&PermissionSet::loading(), &delete, true, false),
            GateOutcome::Children
        );

        let any = Requirement::Any(vec![Permission::EmployeeDelete, Permission::ReportView]);
        let all = Requirement::All(vec![Permission::EmployeeDelete, Permission::ReportView]);
        assert!(any.is_met(&employee));
        assert!(!all.is_met(&employee));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::permissions::Role;
    use crate::test_support::helpers::{provide_auth, provide_signed_in, user_with_role};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn require_auth_renders_children_when_authenticated() {
        let html = render_to_string(move || {
            provide_auth(Some(user_with_role(Role::Employee)), false);
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn require_auth_hides_children_when_unauthenticated() {
        let html = render_to_string(move || {
            provide_auth(None, false);
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn require_auth_shows_loading_spinner_while_loading() {
        let html = render_to_string(move || {
            provide_auth(None, true);
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("animate-spin"));
    }

    #[test]
    fn permission_gate_shows_forbidden_page_for_missing_permission() {
        let html = render_to_string(move || {
            provide_signed_in(Role::Employee);
            view! {
                <PermissionGate require=Permission::EmployeeDelete>
                    <button>"delete-button"</button>
                </PermissionGate>
            }
        });
        assert!(!html.contains("delete-button"));
        assert!(html.contains("权限不足"));
    }

    #[test]
    fn permission_gate_can_hide_or_allow() {
        let html = render_to_string(move || {
            provide_signed_in(Role::Manager);
            view! {
                <div>
                    <PermissionGate require=Permission::EmployeeImport hide=true>
                        <span>"import-button"</span>
                    </PermissionGate>
                    <PermissionGate require=Requirement::All(vec![Permission::ScheduleEdit, Permission::ScheduleDelete])>
                        <span>"schedule-tools"</span>
                    </PermissionGate>
                </div>
            }
        });
        assert!(!html.contains("import-button"));
        assert!(!html.contains("权限不足"));
        assert!(html.contains("schedule-tools"));
    }
}
