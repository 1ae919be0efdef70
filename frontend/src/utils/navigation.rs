use std::{cell::RefCell, rc::Rc};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

pub trait Navigator {
    fn current_path(&self) -> String;
    fn go_to(&self, path: &str);
    fn reload(&self);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|win| win.location().pathname().ok())
            .unwrap_or_default()
    }

    fn go_to(&self, path: &str) {
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href(path);
        }
    }

    fn reload(&self) {
        if let Some(win) = web_sys::window() {
            let _ = win.location().reload();
        }
    }
}

/// Keeps the visited paths in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryNavigator {
    history: Rc<RefCell<Vec<String>>>,
    reloads: Rc<RefCell<u32>>,
}

impl MemoryNavigator {
    pub fn at(path: &str) -> Self {
        let navigator = Self::default();
        navigator.history.borrow_mut().push(path.to_string());
        navigator
    }

    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    pub fn reloads(&self) -> u32 {
        *self.reloads.borrow()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.history.borrow().last().cloned().unwrap_or_default()
    }

    fn go_to(&self, path: &str) {
        self.history.borrow_mut().push(path.to_string());
    }

    fn reload(&self) {
        *self.reloads.borrow_mut() += 1;
    }
}

pub fn default_navigator() -> Rc<dyn Navigator> {
    if cfg!(target_arch = "wasm32") {
        Rc::new(BrowserNavigator)
    } else {
        Rc::new(MemoryNavigator::at(HOME_PATH))
    }
}

/// Sends the user to the login screen unless already there.
pub fn redirect_to_login(navigator: &dyn Navigator) {
    if navigator.current_path() != LOGIN_PATH {
        navigator.go_to(LOGIN_PATH);
    }
}
