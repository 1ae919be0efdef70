use std::rc::Rc;

use leptos::*;
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::{
        error_boundary::AppErrorBoundary,
        guard::{PermissionGate, RequireAuth},
        layout::Layout,
        toast::ToastHost,
    },
    pages::{
        attendance::AttendancePage, dashboard::DashboardPage, employees::EmployeesPage,
        exceptions::ExceptionsPage, login::LoginPage, profile::ProfilePage, reports::ReportsPage,
        schedules::{SchedulesPage, ShiftTemplatesPage, TEMPLATES_PATH},
        settings::SettingsPage,
    },
    state::{
        auth::AuthProvider, loading::provide_global_loading, notifications::ToastStore,
        permissions::{provide_permissions, Permission},
    },
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/login",
    "/employees",
    "/attendance",
    "/schedules",
    TEMPLATES_PATH,
    "/exceptions",
    "/reports",
    "/profile",
    "/settings",
];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/login"];

/// Routes behind a permission; everything else only needs a session.
pub const GATED_ROUTES: &[(&str, Permission)] = &[
    ("/employees", Permission::EmployeeView),
    ("/schedules", Permission::ScheduleView),
    (TEMPLATES_PATH, Permission::ScheduleView),
    ("/exceptions", Permission::ExceptionView),
    ("/reports", Permission::ReportView),
];

pub fn required_permission(path: &str) -> Option<Permission> {
    GATED_ROUTES
        .iter()
        .find(|(route, _)| *route == path)
        .map(|(_, permission)| *permission)
}

pub fn mount_app() {
    mount_to_body(|| view! { <App /> });
}

/// Root view: provides the client, toasts, global loading and permissions,
/// then routes.
#[component]
pub fn App() -> impl IntoView {
    let toasts = ToastStore::new();
    provide_context(toasts);
    let client = ApiClient::new().with_notifier(Rc::new(toasts));
    provide_context(client.clone());
    provide_global_loading();
    provide_permissions(client.session());

    view! {
        <AppErrorBoundary>
            <AuthProvider>
                <Router>
                    <Routes>
                        <Route path="/login" view=LoginPage />
                        <Route path="/" view=|| view! { <Protected><DashboardPage /></Protected> } />
                        <Route
                            path="/employees"
                            view=|| view! { <Protected path="/employees"><EmployeesPage /></Protected> }
                        />
                        <Route path="/attendance" view=|| view! { <Protected><AttendancePage /></Protected> } />
                        <Route
                            path="/schedules"
                            view=|| view! { <Protected path="/schedules"><SchedulesPage /></Protected> }
                        />
                        <Route
                            path=TEMPLATES_PATH
                            view=|| view! { <Protected path=TEMPLATES_PATH><ShiftTemplatesPage /></Protected> }
                        />
                        <Route
                            path="/exceptions"
                            view=|| view! { <Protected path="/exceptions"><ExceptionsPage /></Protected> }
                        />
                        <Route
                            path="/reports"
                            view=|| view! { <Protected path="/reports"><ReportsPage /></Protected> }
                        />
                        <Route path="/profile" view=|| view! { <Protected><ProfilePage /></Protected> } />
                        <Route path="/settings" view=|| view! { <Protected><SettingsPage /></Protected> } />
                        <Route path="/*any" view=|| view! { <Redirect path="/" /> } />
                    </Routes>
                </Router>
            </AuthProvider>
        </AppErrorBoundary>
        <ToastHost store=toasts />
    }
}

/// Session check, shared layout and the route's permission gate.
#[component]
fn Protected(#[prop(optional)] path: Option<&'static str>, children: ChildrenFn) -> impl IntoView {
    let children = store_value(children);
    let requirement = path.and_then(required_permission);
    view! {
        <RequireAuth>
            <Layout>
                {move || match requirement {
                    Some(permission) => view! {
                        <PermissionGate require=permission>
                            {children.with_value(|children| children())}
                        </PermissionGate>
                    }
                    .into_view(),
                    None => children.with_value(|children| children()).into_view(),
                }}
            </Layout>
        </RequireAuth>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_section_has_a_route() {
        for path in ["/employees", "/schedules", "/schedules/templates", "/reports", "/settings"] {
            assert!(ROUTE_PATHS.contains(&path), "missing route {}", path);
        }
    }

    #[test]
    fn gated_and_public_routes_are_known() {
        let all: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        for (path, _) in GATED_ROUTES {
            assert!(all.contains(path), "gated path missing from ROUTE_PATHS: {}", path);
        }
        for path in PUBLIC_ROUTE_PATHS {
            assert!(all.contains(path));
            assert!(required_permission(path).is_none());
        }
    }

    #[test]
    fn templates_share_schedule_permission() {
        assert_eq!(required_permission(TEMPLATES_PATH), Some(Permission::ScheduleView));
        assert_eq!(required_permission("/attendance"), None);
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }
}
