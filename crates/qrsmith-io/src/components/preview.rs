//! QR preview with download and clipboard buttons.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdDownload, LdShare};
use qrsmith_core::export::{self, PNG_MIME_TYPE, SaveOutcome};
use qrsmith_core::{EncodeSurface, ExportGate, PreviewAdapter, QrSettings};
use qrsmith_render::{LogoDecoder, QrRenderer, RenderedSymbol};

use crate::clipboard::BrowserClipboard;
use crate::download::BrowserSaver;
use crate::raster;

/// A rendered symbol and the Blob URL it is displayed through.
struct Shown {
    symbol: Rc<RenderedSymbol>,
    url: String,
}

/// Renderer state kept across re-renders of [`QrPreview`].
struct PreviewState {
    adapter: PreviewAdapter<LogoDecoder>,
    renderer: QrRenderer,
    /// Settings of the last render and its outcome.
    last: Option<(QrSettings, Result<Shown, String>)>,
}

impl PreviewState {
    fn new() -> Self {
        Self {
            adapter: PreviewAdapter::new(LogoDecoder),
            renderer: QrRenderer::new(),
            last: None,
        }
    }

    /// Re-render if `settings` differ from the last render.
    fn refresh(&mut self, settings: &QrSettings) {
        if self.last.as_ref().is_some_and(|(seen, _)| seen == settings) {
            return;
        }
        self.revoke();
        let shown = self.render(settings);
        if let Err(ref e) = shown {
            tracing::warn!("preview render failed: {e}");
        }
        self.last = Some((settings.clone(), shown));
    }

    fn render(&mut self, settings: &QrSettings) -> Result<Shown, String> {
        let symbol = self
            .adapter
            .render(settings, &self.renderer)
            .map_err(|e| e.to_string())?;
        let png = symbol.encode_png().map_err(|e| e.to_string())?;
        let url = raster::bytes_to_blob_url(&png, PNG_MIME_TYPE).map_err(|e| e.to_string())?;
        Ok(Shown {
            symbol: Rc::new(symbol),
            url,
        })
    }

    fn shown(&self) -> Option<&Result<Shown, String>> {
        self.last.as_ref().map(|(_, shown)| shown)
    }

    fn revoke(&mut self) {
        if let Some((_, Ok(shown))) = self.last.take() {
            raster::revoke_blob_url(&shown.url);
        }
    }

    fn teardown(&mut self) {
        self.revoke();
        self.adapter.teardown();
    }
}

/// Props for the [`QrPreview`] component.
#[derive(Props, Clone, PartialEq)]
pub struct QrPreviewProps {
    /// Settings to render.
    settings: QrSettings,
}

/// Live QR preview with "Download PNG" and "Copy to Clipboard".
///
/// Re-renders only when the settings change. Downloading is guarded so
/// that a second click while a save is pending does nothing; copying is
/// not.
#[component]
pub fn QrPreview(props: QrPreviewProps) -> Element {
    let state = use_hook(|| Rc::new(RefCell::new(PreviewState::new())));
    let gate = use_hook(ExportGate::new);
    let mut generating = use_signal(|| false);
    let mut export_error = use_signal(|| Option::<String>::None);

    {
        let state = Rc::clone(&state);
        use_drop(move || state.borrow_mut().teardown());
    }

    let (surface, view) = {
        let mut state = state.borrow_mut();
        state.refresh(&props.settings);
        match state.shown() {
            Some(Ok(shown)) => (Some(Rc::clone(&shown.symbol)), Ok(shown.url.clone())),
            Some(Err(e)) => (None, Err(e.clone())),
            None => (None, Err(String::from("Nothing rendered"))),
        }
    };

    let download_click = {
        let surface = surface.clone();
        move |_| {
            let Some(pending) = gate.try_begin() else {
                return;
            };
            generating.set(true);
            let surface = surface.clone();
            spawn(async move {
                // Let the browser paint "Generating..." before encoding.
                gloo_timers::future::TimeoutFuture::new(0).await;

                let outcome =
                    export::save_pending(pending, surface.as_deref(), &BrowserSaver).await;
                generating.set(false);
                match outcome {
                    SaveOutcome::Failed(message) => export_error.set(Some(message)),
                    SaveOutcome::Saved => export_error.set(None),
                    SaveOutcome::Busy | SaveOutcome::NoSurface => {}
                }
            });
        }
    };

    let copy_click = move |_| {
        let surface = surface.clone();
        spawn(async move {
            let outcome = export::copy_to_clipboard(surface.as_deref(), &BrowserClipboard).await;
            if let Some(message) = outcome.user_message() {
                alert(message);
            }
        });
    };

    let primary_class = "flex-1 flex items-center justify-center gap-2 px-4 py-2 bg-[var(--btn-primary)] hover:bg-[var(--btn-primary-hover)] rounded text-white font-medium transition-colors cursor-pointer";
    let disabled_class = "flex-1 flex items-center justify-center gap-2 px-4 py-2 bg-[var(--btn-disabled)] rounded text-[var(--text-disabled)] cursor-not-allowed";
    let secondary_class = "flex-1 flex items-center justify-center gap-2 px-4 py-2 border border-[var(--border)] hover:bg-[var(--surface-active)] rounded text-[var(--text)] font-medium transition-colors cursor-pointer";

    rsx! {
        div { class: "flex flex-col items-center flex-1 gap-6",
            div { class: "w-[400px] h-[400px] max-w-full p-6 bg-[var(--preview-bg)] rounded-lg shadow-inner flex items-center justify-center",
                if let Ok(ref url) = view {
                    img {
                        src: "{url}",
                        alt: "QR code preview",
                        class: "max-w-full max-h-full w-auto h-auto",
                    }
                }
                if let Err(ref e) = view {
                    p { class: "text-[var(--text-error)] text-sm", "{e}" }
                }
            }

            div { class: "flex flex-col sm:flex-row gap-4 w-full",
                button {
                    class: if generating() { disabled_class } else { primary_class },
                    disabled: generating(),
                    onclick: download_click,
                    Icon { width: 16, height: 16, icon: LdDownload }
                    if generating() { "Generating..." } else { "Download PNG" }
                }
                button {
                    class: "{secondary_class}",
                    onclick: copy_click,
                    Icon { width: 16, height: 16, icon: LdShare }
                    "Copy to Clipboard"
                }
            }

            if let Some(ref err) = export_error() {
                p { class: "text-[var(--text-error)] text-sm", "{err}" }
            }
        }
    }
}

/// Show a blocking `window.alert`.
fn alert(message: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.alert_with_message(message) {
        tracing::warn!("alert failed: {e:?}");
    }
}
