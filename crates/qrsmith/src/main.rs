use dioxus::prelude::*;
use qrsmith_core::{SettingsPatch, SettingsStore};
use qrsmith_io::{QrPreview, SettingsForm, SummaryPanel};

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the session's [`SettingsStore`] and wires the form's patches
/// into it; the preview and summary read the current record.
fn app() -> Element {
    // --- Application state ---
    let mut store = use_signal(SettingsStore::new);

    // --- Settings change handler ---
    let on_change = move |patch: SettingsPatch| {
        store.write().apply(patch);
    };

    let settings = store.read().settings().clone();

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!(env!("TAILWIND_CSS_PATH")) }

        div { class: "min-h-screen bg-[var(--bg)] text-[var(--text)] flex flex-col",
            header { class: "px-6 py-4 border-b border-[var(--border)]",
                h1 { class: "text-2xl font-semibold", "QR Code Generator" }
                p { class: "text-[var(--muted)] text-sm",
                    "Create a QR code with custom colors and an optional logo"
                }
            }

            div { class: "flex-1 grid grid-cols-1 lg:grid-cols-2 gap-8 p-6",
                div { class: "bg-[var(--surface)] rounded-lg p-6",
                    SettingsForm {
                        settings: settings.clone(),
                        on_change: on_change,
                    }
                }

                div { class: "flex flex-col gap-8",
                    QrPreview { settings: settings.clone() }
                    SummaryPanel { settings: settings }
                }
            }
        }
    }
}
