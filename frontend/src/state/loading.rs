use leptos::*;

pub const DEFAULT_LOADING_TEXT: &str = "加载中...";

/// Blocking overlay shown while a mutation is in flight.
#[derive(Clone, Copy)]
pub struct GlobalLoading {
    active: RwSignal<bool>,
    text: RwSignal<String>,
}

impl GlobalLoading {
    pub fn new() -> Self {
        Self {
            active: create_rw_signal(false),
            text: create_rw_signal(DEFAULT_LOADING_TEXT.to_string()),
        }
    }

    pub fn show(&self, text: impl Into<String>) {
        let text = text.into();
        self.text.set(if text.trim().is_empty() {
            DEFAULT_LOADING_TEXT.to_string()
        } else {
            text
        });
        self.active.set(true);
    }

    pub fn hide(&self) {
        self.active.set(false);
        self.text.set(DEFAULT_LOADING_TEXT.to_string());
    }

    pub fn is_active(&self) -> Signal<bool> {
        self.active.into()
    }

    pub fn text(&self) -> Signal<String> {
        self.text.into()
    }
}

impl Default for GlobalLoading {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_global_loading() -> GlobalLoading {
    let loading = GlobalLoading::new();
    provide_context(loading);
    loading
}

pub fn use_global_loading() -> GlobalLoading {
    use_context::<GlobalLoading>().unwrap_or_default()
}
