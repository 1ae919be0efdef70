use std::{cell::RefCell, rc::Rc};

use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn classes(&self) -> &'static str {
        match self {
            NoticeLevel::Success => {
                "bg-status-success-bg border-status-success-border text-status-success-text"
            }
            NoticeLevel::Info => "bg-status-info-bg border-status-info-border text-status-info-text",
            NoticeLevel::Warning => {
                "bg-status-warning-bg border-status-warning-border text-status-warning-text"
            }
            NoticeLevel::Error => {
                "bg-status-error-bg border-status-error-border text-status-error-text"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Sink for transient user-facing messages.
pub trait Notifier {
    fn notify(&self, level: NoticeLevel, message: String);

    fn success(&self, message: &str) {
        self.notify(NoticeLevel::Success, message.to_string());
    }

    fn info(&self, message: &str) {
        self.notify(NoticeLevel::Info, message.to_string());
    }

    fn warning(&self, message: &str) {
        self.notify(NoticeLevel::Warning, message.to_string());
    }

    fn error(&self, message: &str) {
        self.notify(NoticeLevel::Error, message.to_string());
    }
}

pub const TOAST_LIFETIME_MS: u64 = 3_000;

/// Reactive toast queue rendered by `ToastHost`.
#[derive(Clone, Copy)]
pub struct ToastStore {
    notices: RwSignal<Vec<Notice>>,
    next_id: StoredValue<u64>,
}

impl ToastStore {
    pub fn new() -> Self {
        Self {
            notices: create_rw_signal(Vec::new()),
            next_id: store_value(0),
        }
    }

    pub fn notices(&self) -> Signal<Vec<Notice>> {
        self.notices.into()
    }

    pub fn push(&self, level: NoticeLevel, message: String) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id.wrapping_add(1));
        self.notices
            .update(|list| list.push(Notice { id, level, message }));
        id
    }

    pub fn dismiss(&self, id: u64) {
        self.notices.update(|list| list.retain(|notice| notice.id != id));
    }
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastStore {
    fn notify(&self, level: NoticeLevel, message: String) {
        let id = self.push(level, message);
        if cfg!(target_arch = "wasm32") {
            let store = *self;
            set_timeout(
                move || store.dismiss(id),
                std::time::Duration::from_millis(TOAST_LIFETIME_MS),
            );
        }
    }
}

/// Writes to the log; used before a toast host exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: NoticeLevel, message: String) {
        match level {
            NoticeLevel::Error => log::error!("{}", message),
            NoticeLevel::Warning => log::warn!("{}", message),
            _ => log::info!("{}", message),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Rc<RefCell<Vec<(NoticeLevel, String)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self, level: NoticeLevel) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .filter(|(lvl, _)| *lvl == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.notices.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: String) {
        self.notices.borrow_mut().push((level, message));
    }
}

pub fn use_notifier() -> Rc<dyn Notifier> {
    match use_context::<ToastStore>() {
        Some(store) => Rc::new(store),
        None => Rc::new(LogNotifier),
    }
}
