//! Integration test: drive a settings session through the store, the
//! preview adapter, and the renderer, then export the surface as PNG.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::rc::Rc;

use image::{ImageEncoder, Rgba, RgbaImage};
use qrsmith_core::form::{self, DroppedFile};
use qrsmith_core::{
    EncodeSurface, FormEvent, LogoFile, PreviewAdapter, QrSettings, SettingsPatch, SettingsStore,
    Summary,
};
use qrsmith_render::{LogoDecoder, MAX_SIDE, QrRenderer, RenderError};

const RED_SVG: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16">
  <rect width="16" height="16" fill="#ff0000"/>
</svg>"##;

fn logo_png(color: Rgba<u8>) -> Vec<u8> {
    let img = RgbaImage::from_pixel(16, 16, color);
    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(img.as_raw(), 16, 16, image::ExtendedColorType::Rgba8)
        .unwrap();
    buf
}

fn center_pixel(settings: &QrSettings, adapter: &mut PreviewAdapter<LogoDecoder>) -> Rgba<u8> {
    let symbol = adapter.render(settings, &QrRenderer::new()).unwrap();
    let half = settings.size / 2;
    *symbol.image().get_pixel(half, half)
}

#[test]
fn default_session_exports_png() {
    let store = SettingsStore::new();
    let mut adapter = PreviewAdapter::new(LogoDecoder);

    let symbol = adapter
        .render(store.settings(), &QrRenderer::new())
        .expect("default settings should render");
    let png = symbol.encode_png().expect("surface should encode");

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (300, 300));
    assert_eq!(*decoded.get_pixel(0, 0), Rgba([255, 255, 255, 255]));

    let summary = Summary::from_settings(store.settings());
    assert_eq!(summary.dimensions, "300x300px");
    assert_eq!(summary.error_correction, "High (30%)");
    assert_eq!(summary.content, "https://calpa.me/");
}

#[test]
fn form_events_drive_preview() {
    let mut store = SettingsStore::new();
    let renders = Rc::new(RefCell::new(Vec::new()));

    let seen = Rc::clone(&renders);
    let adapter = Rc::new(RefCell::new(PreviewAdapter::new(LogoDecoder)));
    let preview = Rc::clone(&adapter);
    let _subscription = store.subscribe(move |settings, _patch| {
        let symbol = preview
            .borrow_mut()
            .render(settings, &QrRenderer::new())
            .unwrap();
        seen.borrow_mut().push(symbol.image().dimensions());
    });

    for event in [
        FormEvent::SizeSlid("420".into()),
        FormEvent::LevelSelected("L".into()),
        FormEvent::MarginToggled(false),
        FormEvent::TextEdited(String::new()),
    ] {
        if let Some(patch) = event.into_patch() {
            store.apply(patch);
        }
    }

    assert_eq!(renders.borrow().len(), 4);
    assert_eq!(renders.borrow()[0], (420, 420));

    // Empty text still renders, using the placeholder content.
    assert_eq!(store.settings().content(), "https://example.com");
    let symbol = adapter
        .borrow_mut()
        .render(store.settings(), &QrRenderer::new())
        .unwrap();
    assert_eq!(*symbol.image().get_pixel(0, 0), Rgba([0, 0, 0, 255]));
}

#[test]
fn logo_upload_swap_and_removal() {
    let mut store = SettingsStore::new();
    let mut adapter = PreviewAdapter::new(LogoDecoder);

    let red = Rgba([255, 0, 0, 255]);
    let blue = Rgba([0, 0, 255, 255]);

    let dropped = vec![
        DroppedFile {
            name: "notes.txt".into(),
            mime_type: "text/plain".into(),
            bytes: b"not an image".to_vec(),
        },
        DroppedFile {
            name: "red.png".into(),
            mime_type: String::new(),
            bytes: logo_png(red),
        },
    ];
    let patch = FormEvent::LogoDropped(dropped).into_patch().unwrap();
    store.apply(patch);
    assert_eq!(store.settings().logo_file.as_ref().unwrap().name(), "red.png");
    assert_eq!(center_pixel(store.settings(), &mut adapter), red);

    store.apply(SettingsPatch::new().with_logo_size(80));
    assert_eq!(center_pixel(store.settings(), &mut adapter), red);

    let blue_logo = LogoFile::new("blue.png", "image/png", logo_png(blue));
    store.apply(SettingsPatch::new().with_logo_file(Some(blue_logo)));
    assert_eq!(center_pixel(store.settings(), &mut adapter), blue);

    store.apply(FormEvent::LogoRemoved.into_patch().unwrap());
    assert!(store.settings().logo_file.is_none());
    assert_eq!(store.settings().logo_size, 80);
    let center = center_pixel(store.settings(), &mut adapter);
    assert_ne!(center, blue);
    assert!(adapter.handle().is_none());
}

#[test]
fn svg_logo_is_overlaid_and_excavated() {
    let svg = LogoFile::new(
        "logo.svg",
        form::mime_type_for("logo.svg").unwrap(),
        RED_SVG.to_vec(),
    );
    let with_logo = QrSettings {
        logo_file: Some(svg),
        ..QrSettings::default()
    };

    let mut adapter = PreviewAdapter::new(LogoDecoder);
    assert_eq!(center_pixel(&with_logo, &mut adapter), Rgba([255, 0, 0, 255]));
    assert_eq!(adapter.handle().unwrap().image().dimensions(), (16, 16));

    let request = adapter.render_request(&with_logo);
    let overlay = request.overlay.expect("SVG logo should produce an overlay");
    assert!(overlay.excavate);
    assert_eq!((overlay.width, overlay.height), (50, 50));
}

#[test]
fn unencodable_content_reports_error() {
    let settings = QrSettings {
        text: "x".repeat(2000),
        ..QrSettings::default()
    };
    let result = PreviewAdapter::new(LogoDecoder).render(&settings, &QrRenderer::new());
    assert!(matches!(result, Err(RenderError::Encode(_))));
}

#[test]
fn oversized_symbol_reports_error() {
    let settings = QrSettings {
        size: 70_000,
        ..QrSettings::default()
    };
    let result = PreviewAdapter::new(LogoDecoder).render(&settings, &QrRenderer::new());
    assert!(matches!(result, Err(RenderError::TooLarge { pixels, .. }) if pixels > MAX_SIDE));
}
