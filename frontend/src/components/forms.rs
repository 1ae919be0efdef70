use crate::utils::{time::WEEKDAY_LABELS, upload::take_selected_file};
use chrono::{Datelike, NaiveDate};
use leptos::*;
use wasm_bindgen::JsCast;

const CONTROL_CLASS: &str = "w-full rounded-md border border-border bg-surface-elevated px-3 py-2 text-sm text-fg focus:outline-none focus:ring-2 focus:ring-action-primary-focus disabled:opacity-50";
const LABEL_CLASS: &str = "block text-sm font-medium text-fg-muted mb-1";

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional)] required: bool,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class=LABEL_CLASS>
                {label}
                {required.then(|| view! { <span class="text-status-error-text ml-0.5">"*"</span> })}
            </span>
            <input
                type=input_type.unwrap_or("text")
                class=CONTROL_CLASS
                placeholder=placeholder
                required=required
                disabled=move || disabled.get()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional, into)] placeholder: String,
    #[prop(default = 3)] rows: u32,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class=LABEL_CLASS>{label}</span>
            <textarea
                class=CONTROL_CLASS
                rows=rows
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            ></textarea>
        </label>
    }
}

/// `options` are `(value, label)` pairs.
#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(into)] options: MaybeSignal<Vec<(String, String)>>,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class=LABEL_CLASS>
                {label}
                {required.then(|| view! { <span class="text-status-error-text ml-0.5">"*"</span> })}
            </span>
            <select
                class=CONTROL_CLASS
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                {placeholder.map(|text| view! { <option value="">{text}</option> })}
                {move || {
                    options
                        .get()
                        .into_iter()
                        .map(|(option_value, option_label)| {
                            let selected = option_value == value.get_untracked();
                            view! { <option value=option_value selected=selected>{option_label}</option> }
                        })
                        .collect_view()
                }}
            </select>
        </label>
    }
}

pub fn describe_date(raw: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let weekday = WEEKDAY_LABELS[date.weekday().num_days_from_monday() as usize];
    Some(format!("{} (周{})", date.format("%Y/%m/%d"), weekday))
}

#[component]
pub fn DatePicker(
    value: RwSignal<String>,
    #[prop(optional)] label: Option<&'static str>,
    #[prop(optional)] disabled: MaybeSignal<bool>,
) -> impl IntoView {
    let input_ref = create_node_ref::<html::Input>();

    let display_value = move || {
        let raw = value.get();
        if raw.is_empty() {
            return "选择日期".to_string();
        }
        describe_date(&raw).unwrap_or(raw)
    };

    let on_click = move |_| {
        if disabled.get() {
            return;
        }
        if let Some(input) = input_ref.get() {
            if let Ok(show_picker) = js_sys::Reflect::get(&input, &"showPicker".into()) {
                if show_picker.is_function() {
                    let _ = js_sys::Reflect::apply(
                        &show_picker.unchecked_into::<js_sys::Function>(),
                        &input,
                        &js_sys::Array::new(),
                    );
                }
            }
            let _ = input.focus();
        }
    };

    view! {
        <div class="flex flex-col gap-1 w-full">
            {label.map(|l| view! { <span class=LABEL_CLASS>{l}</span> })}
            <div
                class=move || format!(
                    "relative cursor-pointer rounded-md border border-border bg-surface-elevated py-2 px-3 flex items-center justify-between {}",
                    if disabled.get() { "opacity-50 cursor-not-allowed" } else { "hover:border-action-primary-bg" }
                )
                on:click=on_click
            >
                <span class=move || if value.get().is_empty() { "text-sm text-fg-muted" } else { "text-sm text-fg" }>
                    {display_value}
                </span>
                <i class="far fa-calendar-alt text-fg-muted"></i>
                <input
                    type="date"
                    node_ref=input_ref
                    class="absolute inset-0 w-full h-full opacity-0 pointer-events-none"
                    disabled=move || disabled.get()
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </div>
        </div>
    }
}

/// Button that opens the native file chooser and hands over the picked file.
#[component]
pub fn FileButton(
    #[prop(into)] label: String,
    accept: &'static str,
    on_file: Callback<web_sys::File>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
) -> impl IntoView {
    view! {
        <label class=move || format!(
            "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg border border-border {}",
            if disabled.get() { "opacity-50 cursor-not-allowed" } else { "cursor-pointer hover:bg-surface-elevated" }
        )>
            {label}
            <input
                type="file"
                class="hidden"
                accept=accept
                disabled=move || disabled.get()
                on:change=move |ev| {
                    if let Some(file) = take_selected_file(&ev) {
                        on_file.call(file);
                    }
                }
            />
        </label>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn fields_render_labels_and_values() {
        let html = render_to_string(move || {
            let name = create_rw_signal("张三".to_string());
            let gender = create_rw_signal("女".to_string());
            let options = vec![("男".to_string(), "男".to_string()), ("女".to_string(), "女".to_string())];
            view! {
                <form>
                    <TextField label="姓名" value=name required=true />
                    <SelectField label="性别" value=gender options=options placeholder="请选择" />
                </form>
            }
        });
        assert!(html.contains("姓名"));
        assert!(html.contains("性别"));
        assert!(html.contains("请选择"));
        assert!(html.contains("selected"));
    }

    #[test]
    fn date_picker_shows_placeholder_when_empty() {
        let html = render_to_string(move || {
            let value = create_rw_signal(String::new());
            view! { <DatePicker value=value label="入职日期" /> }
        });
        assert!(html.contains("选择日期"));
        assert!(html.contains("入职日期"));
    }
}
