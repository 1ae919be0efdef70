use std::collections::BTreeSet;

use leptos::*;

use crate::{api::StoredUser, state::session::Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Permission {
    EmployeeView,
    EmployeeCreate,
    EmployeeEdit,
    EmployeeDelete,
    EmployeeImport,
    EmployeeExport,
    ScheduleView,
    ScheduleCreate,
    ScheduleEdit,
    ScheduleDelete,
    ExceptionView,
    ExceptionCreate,
    ExceptionEdit,
    ExceptionDelete,
    ReportView,
    ReportExport,
    ReportDownload,
    SystemAdmin,
}

impl Permission {
    pub const ALL: [Permission; 18] = [
        Self::EmployeeView,
        Self::EmployeeCreate,
        Self::EmployeeEdit,
        Self::EmployeeDelete,
        Self::EmployeeImport,
        Self::EmployeeExport,
        Self::ScheduleView,
        Self::ScheduleCreate,
        Self::ScheduleEdit,
        Self::ScheduleDelete,
        Self::ExceptionView,
        Self::ExceptionCreate,
        Self::ExceptionEdit,
        Self::ExceptionDelete,
        Self::ReportView,
        Self::ReportExport,
        Self::ReportDownload,
        Self::SystemAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmployeeView => "employee:view",
            Self::EmployeeCreate => "employee:create",
            Self::EmployeeEdit => "employee:edit",
            Self::EmployeeDelete => "employee:delete",
            Self::EmployeeImport => "employee:import",
            Self::EmployeeExport => "employee:export",
            Self::ScheduleView => "schedule:view",
            Self::ScheduleCreate => "schedule:create",
            Self::ScheduleEdit => "schedule:edit",
            Self::ScheduleDelete => "schedule:delete",
            Self::ExceptionView => "exception:view",
            Self::ExceptionCreate => "exception:create",
            Self::ExceptionEdit => "exception:edit",
            Self::ExceptionDelete => "exception:delete",
            Self::ReportView => "report:view",
            Self::ReportExport => "report:export",
            Self::ReportDownload => "report:download",
            Self::SystemAdmin => "system:admin",
        }
    }
}

const MANAGER_PERMISSIONS: &[Permission] = &[
    Permission::EmployeeView,
    Permission::EmployeeCreate,
    Permission::EmployeeEdit,
    Permission::EmployeeExport,
    Permission::ScheduleView,
    Permission::ScheduleCreate,
    Permission::ScheduleEdit,
    Permission::ScheduleDelete,
    Permission::ExceptionView,
    Permission::ExceptionCreate,
    Permission::ExceptionEdit,
    Permission::ExceptionDelete,
    Permission::ReportView,
    Permission::ReportExport,
    Permission::ReportDownload,
];

const EMPLOYEE_PERMISSIONS: &[Permission] = &[
    Permission::EmployeeView,
    Permission::ScheduleView,
    Permission::ExceptionView,
    Permission::ReportView,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Employee,
}

impl Role {
    /// Unknown role names resolve to `Employee`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "manager" => Self::Manager,
            _ => Self::Employee,
        }
    }

    pub fn from_user(user: Option<&StoredUser>) -> Self {
        match user {
            Some(user) => match user.role.as_deref() {
                Some(role) if !role.trim().is_empty() => Self::parse(role),
                _ if user.is_admin => Self::Admin,
                _ => Self::Employee,
            },
            None => Self::Employee,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "管理员",
            Self::Manager => "经理",
            Self::Employee => "员工",
        }
    }

    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Self::Admin => &Permission::ALL,
            Self::Manager => MANAGER_PERMISSIONS,
            Self::Employee => EMPLOYEE_PERMISSIONS,
        }
    }
}

/// Resolved permission set. Every check is `false` while `loading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSet {
    role: Option<Role>,
    granted: BTreeSet<Permission>,
    loading: bool,
}

impl PermissionSet {
    pub fn loading() -> Self {
        Self {
            role: None,
            granted: BTreeSet::new(),
            loading: true,
        }
    }

    pub fn for_role(role: Role) -> Self {
        Self {
            role: Some(role),
            granted: role.permissions().iter().copied().collect(),
            loading: false,
        }
    }

    pub fn from_session(session: &Session) -> Self {
        Self::for_role(Role::from_user(session.user_info().as_ref()))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn has(&self, permission: Permission) -> bool {
        !self.loading && self.granted.contains(&permission)
    }

    pub fn has_any(&self, permissions: &[Permission]) -> bool {
        !self.loading && permissions.iter().any(|p| self.granted.contains(p))
    }

    pub fn has_all(&self, permissions: &[Permission]) -> bool {
        !self.loading && permissions.iter().all(|p| self.granted.contains(p))
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    pub fn is_manager(&self) -> bool {
        self.role == Some(Role::Manager)
    }

    pub fn is_employee(&self) -> bool {
        self.role == Some(Role::Employee)
    }

    pub fn all(&self) -> Vec<Permission> {
        self.granted.iter().copied().collect()
    }
}

/// Reactive handle shared through context.
///
/// The set is read from the session once and only changes on
/// [`Permissions::update_permissions`]; later writes to storage are not
/// observed.
#[derive(Clone, Copy)]
pub struct Permissions {
    set: RwSignal<PermissionSet>,
}

impl Permissions {
    pub fn unresolved() -> Self {
        Self {
            set: create_rw_signal(PermissionSet::loading()),
        }
    }

    pub fn resolved(session: &Session) -> Self {
        let permissions = Self::unresolved();
        permissions.reload(session);
        permissions
    }

    pub fn reload(&self, session: &Session) {
        let set = PermissionSet::from_session(session);
        log::debug!("permissions resolved for role {:?}", set.role());
        self.set.set(set);
    }

    pub fn update_permissions(&self, user: &StoredUser) {
        self.set
            .set(PermissionSet::for_role(Role::from_user(Some(user))));
    }

    pub fn snapshot(&self) -> Signal<PermissionSet> {
        self.set.into()
    }

    pub fn loading(&self) -> bool {
        self.set.with(|set| set.is_loading())
    }

    pub fn has(&self, permission: Permission) -> bool {
        self.set.with(|set| set.has(permission))
    }

    pub fn has_any(&self, permissions: &[Permission]) -> bool {
        self.set.with(|set| set.has_any(permissions))
    }

    pub fn has_all(&self, permissions: &[Permission]) -> bool {
        self.set.with(|set| set.has_all(permissions))
    }

    pub fn is_admin(&self) -> bool {
        self.set.with(|set| set.is_admin())
    }

    pub fn is_manager(&self) -> bool {
        self.set.with(|set| set.is_manager())
    }

    pub fn is_employee(&self) -> bool {
        self.set.with(|set| set.is_employee())
    }

    pub fn all_permissions(&self) -> Vec<Permission> {
        self.set.with(|set| set.all())
    }
}

pub fn provide_permissions(session: &Session) -> Permissions {
    let permissions = Permissions::resolved(session);
    provide_context(permissions);
    permissions
}

pub fn use_permissions() -> Permissions {
    use_context::<Permissions>().unwrap_or_else(Permissions::unresolved)
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        state::session::USER_INFO_KEY,
        test_support::ssr::with_runtime,
        utils::storage::{KeyValueStore, MemoryStore},
    };
    use std::rc::Rc;

    #[test]
    fn permissions_do_not_follow_storage_until_updated() {
        with_runtime(|| {
            let store = MemoryStore::new();
            store
                .set(USER_INFO_KEY, r#"{"username":"a","role":"employee"}"#)
                .unwrap();
            let session = Session::new(Rc::new(store.clone()));
            let permissions = Permissions::resolved(&session);
            assert!(permissions.is_employee());

            store
                .set(USER_INFO_KEY, r#"{"username":"a","role":"admin"}"#)
                .unwrap();
            assert!(!permissions.is_admin());

            permissions.update_permissions(&StoredUser {
                username: "a".into(),
                role: Some("admin".into()),
                ..StoredUser::default()
            });
            assert!(permissions.is_admin());
            assert!(permissions.has(Permission::SystemAdmin));
        });
    }

    #[test]
    fn unresolved_handle_is_loading() {
        with_runtime(|| {
            let permissions = use_permissions();
            assert!(permissions.loading());
            assert!(!permissions.has(Permission::ReportView));
        });
    }
}
