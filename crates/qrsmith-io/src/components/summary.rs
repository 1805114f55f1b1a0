//! "QR Code Details" summary panel.

use dioxus::prelude::*;
use qrsmith_core::{QrSettings, Summary};

/// Props for the [`SummaryPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct SummaryPanelProps {
    settings: QrSettings,
}

/// Read-only size, error-correction, and content summary.
#[component]
pub fn SummaryPanel(props: SummaryPanelProps) -> Element {
    let summary = Summary::from_settings(&props.settings);

    rsx! {
        div { class: "text-sm text-[var(--text-secondary)]",
            p { class: "mb-2 font-medium", "QR Code Details:" }
            ul { class: "list-disc list-inside space-y-1",
                li { "Size: {summary.dimensions}" }
                li { "Error Correction: {summary.error_correction}" }
                li { class: "break-all", "Content: {summary.content}" }
            }
        }
    }
}
