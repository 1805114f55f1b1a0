//! Logo field: drag-and-drop zone with file picker, or a thumbnail of
//! the current logo with a remove button.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdImage;
use qrsmith_core::form::{self, ACCEPT_ATTRIBUTE, DroppedFile};
use qrsmith_core::{HandleSlot, LogoFile};

use crate::raster::ObjectUrlAllocator;

/// Props for the [`LogoField`] component.
#[derive(Props, Clone, PartialEq)]
pub struct LogoFieldProps {
    /// The current logo, if any.
    logo: Option<LogoFile>,
    /// Called with the files of one drop or picker selection.
    on_drop: EventHandler<Vec<DroppedFile>>,
    /// Called when the remove button is pressed.
    on_remove: EventHandler<()>,
}

/// Shows the current logo, or a drop zone when there is none.
#[component]
pub fn LogoField(props: LogoFieldProps) -> Element {
    let LogoFieldProps {
        logo,
        on_drop,
        on_remove,
    } = props;

    rsx! {
        div { class: "flex flex-col gap-1",
            span { class: "flex items-center gap-2 text-sm text-[var(--text-heading)] font-medium",
                Icon { width: 16, height: 16, icon: LdImage }
                "Logo (Optional)"
            }
            if let Some(logo) = logo {
                LogoThumbnail { logo, on_remove }
            } else {
                LogoDrop { on_drop }
            }
        }
    }
}

/// Props for the [`LogoThumbnail`] component.
#[derive(Props, Clone, PartialEq)]
struct LogoThumbnailProps {
    logo: LogoFile,
    on_remove: EventHandler<()>,
}

/// Thumbnail, filename, and remove button for the current logo.
///
/// The thumbnail is an object URL held in a [`HandleSlot`]: replaced when
/// the logo changes, revoked when the component unmounts.
#[component]
fn LogoThumbnail(props: LogoThumbnailProps) -> Element {
    let slot = use_hook(|| Rc::new(RefCell::new(HandleSlot::new(ObjectUrlAllocator))));

    {
        let slot = Rc::clone(&slot);
        use_drop(move || slot.borrow_mut().teardown());
    }

    let url = {
        let mut slot = slot.borrow_mut();
        slot.sync(Some(&props.logo));
        slot.handle().map(|url| url.as_str().to_owned())
    };
    let name = props.logo.name().to_owned();
    let on_remove = props.on_remove;

    rsx! {
        div { class: "flex items-center mt-2",
            div { class: "w-16 h-16 border border-[var(--border)] rounded p-1 mr-3",
                if let Some(url) = url {
                    img {
                        src: "{url}",
                        alt: "Logo preview",
                        class: "w-full h-full object-contain",
                    }
                }
            }
            div {
                p { class: "text-sm font-medium text-[var(--text)] truncate mb-1", "{name}" }
                button {
                    r#type: "button",
                    class: "text-sm text-[var(--text-error)] hover:underline cursor-pointer",
                    onclick: move |_| on_remove.call(()),
                    "Remove"
                }
            }
        }
    }
}

/// Props for the [`LogoDrop`] component.
#[derive(Props, Clone, PartialEq)]
struct LogoDropProps {
    on_drop: EventHandler<Vec<DroppedFile>>,
}

/// A drag-and-drop zone with a file picker.
///
/// Reads the first file that passes the image filter and forwards it;
/// anything else in the selection is ignored.
#[component]
fn LogoDrop(props: LogoDropProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let on_drop = props.on_drop;

    // Shared by the picker and drag-and-drop paths.
    let process_files = move |files: Vec<FileData>| async move {
        let candidate = files.iter().find_map(|f| {
            let name = f.name();
            let mime_type = form::resolve_mime_type(&name, f.content_type().as_deref());
            form::is_accepted_image(&name, &mime_type).then_some((f, name, mime_type))
        });
        let Some((file, name, mime_type)) = candidate else {
            if let Some(file) = files.first() {
                error.set(Some(format!("Unsupported file type: {}", file.name())));
            }
            return;
        };
        match file.read_bytes().await {
            Ok(bytes) => {
                error.set(None);
                on_drop.call(vec![DroppedFile {
                    name,
                    mime_type,
                    bytes: bytes.to_vec(),
                }]);
            }
            Err(e) => {
                tracing::warn!("failed to read {name}: {e}");
                error.set(Some(format!("Failed to read file: {e}")));
            }
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    let border_class = if dragging() {
        "border-[var(--border-accent)] bg-[var(--surface-active)]"
    } else {
        "border-[var(--border-muted)] bg-[var(--surface)]"
    };

    rsx! {
        div {
            class: "mt-1 border-2 border-dashed rounded-md px-6 pt-5 pb-6 text-center transition-colors {border_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            if let Some(ref err) = error() {
                p { class: "text-[var(--text-error)] text-sm mb-2", "{err}" }
            }

            label {
                class: "cursor-pointer font-medium text-[var(--btn-primary)]",
                input {
                    r#type: "file",
                    accept: ACCEPT_ATTRIBUTE,
                    class: "hidden",
                    onchange: handle_files,
                }
                "Upload a file"
            }
            span { class: "text-sm text-[var(--text-secondary)] pl-1", "or drag and drop" }
            p { class: "text-xs text-[var(--muted)] mt-1", "PNG, JPG, SVG" }
        }
    }
}
