//! Settings form: one widget per settings field.
//!
//! Widgets report raw values; [`FieldEvent::into_patch`] turns each
//! interaction into a single-field patch handed to `on_change`.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdQrCode, LdShield, LdSlidersHorizontal};
use qrsmith_core::defaults::{LOGO_SIZE_RANGE, RangeSpec, SIZE_RANGE};
use qrsmith_core::form::{self, FormEvent as FieldEvent, LEVEL_OPTIONS};
use qrsmith_core::{QrSettings, SettingsPatch};

use super::logo::LogoField;

/// Props for the [`SettingsForm`] component.
#[derive(Props, Clone, PartialEq)]
pub struct SettingsFormProps {
    /// Current settings record.
    settings: QrSettings,
    /// Called with one single-field patch per interaction.
    on_change: EventHandler<SettingsPatch>,
}

/// The settings form.
///
/// Text, size, colors, error-correction level, margin, and the optional
/// logo with its size.
#[component]
pub fn SettingsForm(props: SettingsFormProps) -> Element {
    let on_change = props.on_change;
    let emit = move |event: FieldEvent| {
        if let Some(patch) = event.into_patch() {
            on_change.call(patch);
        }
    };

    let settings = &props.settings;
    let level_options: Vec<(&str, &str)> = LEVEL_OPTIONS
        .iter()
        .map(|(level, label)| (level.as_str(), *label))
        .collect();

    rsx! {
        form { class: "space-y-6",
            onsubmit: move |e| e.prevent_default(),

            div { class: "flex flex-col gap-1",
                label { r#for: "text",
                    class: "flex items-center gap-2 text-sm text-[var(--text-heading)] font-medium",
                    Icon { width: 16, height: 16, icon: LdQrCode }
                    span { "Text or URL" }
                }
                textarea {
                    id: "text",
                    class: "min-h-[80px] px-2 py-1 rounded border border-[var(--border)] bg-[var(--surface)] text-[var(--text)]",
                    placeholder: "Enter URL or text...",
                    value: "{settings.text}",
                    oninput: move |e| emit(FieldEvent::TextEdited(e.value())),
                }
            }

            {render_slider(
                "size",
                rsx! {
                    Icon { width: 16, height: 16, icon: LdSlidersHorizontal }
                    span { "Size: {settings.size}x{settings.size} px" }
                },
                settings.size,
                SIZE_RANGE,
                move |raw| emit(FieldEvent::SizeSlid(raw)),
            )}

            div { class: "grid grid-cols-1 md:grid-cols-2 gap-4",
                ColorField {
                    id: "fg-color",
                    label: "Foreground Color",
                    value: settings.fg_color.clone(),
                    on_edit: move |v| emit(FieldEvent::ForegroundEdited(v)),
                    on_pick: move |v| emit(FieldEvent::ForegroundPicked(v)),
                }
                ColorField {
                    id: "bg-color",
                    label: "Background Color",
                    value: settings.bg_color.clone(),
                    on_edit: move |v| emit(FieldEvent::BackgroundEdited(v)),
                    on_pick: move |v| emit(FieldEvent::BackgroundPicked(v)),
                }
            }

            {render_select(
                "level",
                "Error Correction Level",
                "Higher levels allow QR code to remain scannable even if partially damaged.",
                &level_options,
                settings.level.as_str(),
                move |raw| emit(FieldEvent::LevelSelected(raw)),
            )}

            {render_toggle(
                "include-margin",
                "Include white margin around QR code",
                settings.include_margin,
                move |checked| emit(FieldEvent::MarginToggled(checked)),
            )}

            LogoField {
                logo: settings.logo_file.clone(),
                on_drop: move |files| emit(FieldEvent::LogoDropped(files)),
                on_remove: move |()| emit(FieldEvent::LogoRemoved),
            }

            if settings.logo_file.is_some() {
                {render_slider(
                    "logo-size",
                    rsx! { span { "Logo Size: {settings.logo_size}px" } },
                    settings.logo_size,
                    LOGO_SIZE_RANGE,
                    move |raw| emit(FieldEvent::LogoSizeSlid(raw)),
                )}
            }
        }
    }
}

/// Props for the [`ColorField`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ColorFieldProps {
    id: &'static str,
    label: &'static str,
    /// Free-form color text as stored in the settings.
    value: String,
    /// The hex text field changed.
    on_edit: EventHandler<String>,
    /// A color was chosen in the native picker.
    on_pick: EventHandler<String>,
}

/// A free-form hex text field next to a native color picker.
///
/// The text field shows the stored value verbatim; the picker shows the
/// nearest `#rrggbb` it can display.
#[component]
pub fn ColorField(props: ColorFieldProps) -> Element {
    let picker = form::picker_value(&props.value);
    let on_edit = props.on_edit;
    let on_pick = props.on_pick;

    rsx! {
        div { class: "flex flex-col gap-1",
            label { r#for: "{props.id}",
                class: "text-sm text-[var(--text-heading)] font-medium",
                "{props.label}"
            }
            div { class: "flex items-center gap-2",
                input {
                    r#type: "color",
                    class: "w-10 h-10 rounded border border-[var(--border)] cursor-pointer",
                    value: "{picker}",
                    oninput: move |e| on_pick.call(e.value()),
                }
                input {
                    r#type: "text",
                    id: "{props.id}",
                    class: "flex-1 px-2 py-1 rounded border border-[var(--border)] bg-[var(--surface)] text-[var(--text)]",
                    value: "{props.value}",
                    oninput: move |e| on_edit.call(e.value()),
                }
            }
        }
    }
}

/// Render a labeled range slider with min/max captions.
///
/// The raw input value is forwarded untouched.
fn render_slider(
    id: &str,
    label: Element,
    value: u32,
    range: RangeSpec,
    on_input: impl Fn(String) + 'static,
) -> Element {
    let id = id.to_string();

    rsx! {
        div { class: "flex flex-col gap-1",
            label { r#for: "{id}",
                class: "flex items-center gap-2 text-sm text-[var(--text-heading)] font-medium",
                {label}
            }
            input {
                r#type: "range",
                id: "{id}",
                min: "{range.min}",
                max: "{range.max}",
                step: "{range.step}",
                value: "{value}",
                class: "w-full accent-[var(--btn-primary)]",
                oninput: move |e| on_input(e.value()),
            }
            div { class: "flex justify-between text-xs text-[var(--text-secondary)]",
                span { "{range.min}px" }
                span { "{range.max}px" }
            }
        }
    }
}

/// Render a labeled toggle checkbox.
fn render_toggle(
    id: &str,
    label: &str,
    checked: bool,
    on_change: impl Fn(bool) + 'static,
) -> Element {
    let id = id.to_string();
    let label = label.to_string();

    rsx! {
        div { class: "flex items-center gap-2",
            input {
                r#type: "checkbox",
                id: "{id}",
                checked: checked,
                class: "w-4 h-4 accent-[var(--btn-primary)]",
                onchange: move |e| {
                    on_change(e.checked());
                },
            }
            label { r#for: "{id}",
                class: "text-sm text-[var(--text)]",
                "{label}"
            }
        }
    }
}

/// Render a labeled select dropdown with an optional description.
fn render_select(
    id: &str,
    label: &str,
    description: &str,
    options: &[(&str, &str)],
    selected: &str,
    on_change: impl Fn(String) + 'static,
) -> Element {
    let id = id.to_string();
    let label = label.to_string();
    let description = description.to_string();
    let options: Vec<(String, String)> = options
        .iter()
        .map(|(v, l)| ((*v).to_string(), (*l).to_string()))
        .collect();
    let selected = selected.to_string();

    rsx! {
        div { class: "flex flex-col gap-1",
            label { r#for: "{id}",
                class: "flex items-center gap-2 text-sm text-[var(--text-heading)] font-medium",
                Icon { width: 16, height: 16, icon: LdShield }
                span { "{label}" }
            }
            select {
                id: "{id}",
                class: "px-2 py-1 rounded border border-[var(--border)] bg-[var(--surface)]
                        text-[var(--text)] text-sm",
                value: "{selected}",
                onchange: move |e| {
                    on_change(e.value());
                },

                for (value, display) in options.iter() {
                    option {
                        value: "{value}",
                        selected: value == &selected,
                        "{display}"
                    }
                }
            }
            if !description.is_empty() {
                p { class: "text-xs text-[var(--text-secondary)]", "{description}" }
            }
        }
    }
}
