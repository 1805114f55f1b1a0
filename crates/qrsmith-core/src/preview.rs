//! Preview adapter: render inputs and the logo display-handle lifecycle.
//!
//! # Display handles
//!
//! Showing or drawing a logo needs a temporary resource derived from the
//! uploaded bytes (an object URL in the browser, a decoded raster for the
//! native renderer). [`HandleAllocator`] is the acquire/release pair for
//! such a resource and [`HandleSlot`] owns at most one live handle,
//! replacing it on every transition of `logo_file`:
//!
//! 1. the previous handle (if any) is released, then
//! 2. a new handle is acquired if a logo is present.
//!
//! The slot releases whatever it holds on [`HandleSlot::teardown`] and on
//! drop, so repeated logo swaps never leak handles.

use std::fmt;

use crate::types::{Level, LogoFile, QrSettings};

/// Creates and releases display handles for logo resources.
pub trait HandleAllocator {
    /// The handle produced for one logo.
    type Handle;
    /// Why a handle could not be produced.
    type Error: fmt::Display;

    /// Create a handle for `logo`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be turned into a handle
    /// (e.g. an undecodable image).
    fn acquire(&mut self, logo: &LogoFile) -> Result<Self::Handle, Self::Error>;

    /// Release a handle previously returned by [`acquire`](Self::acquire).
    fn release(&mut self, handle: Self::Handle);
}

/// The live handle together with the resource it was made from.
struct Held<H> {
    logo: LogoFile,
    /// `None` when acquisition failed; the logo is still tracked so the
    /// failure is not retried on every sync.
    handle: Option<H>,
}

/// Owns at most one display handle and keeps it in step with a logo.
pub struct HandleSlot<A: HandleAllocator> {
    allocator: A,
    held: Option<Held<A::Handle>>,
}

impl<A: HandleAllocator> HandleSlot<A> {
    /// An empty slot using `allocator`.
    pub const fn new(allocator: A) -> Self {
        Self {
            allocator,
            held: None,
        }
    }

    /// Bring the slot in line with `logo`.
    ///
    /// Does nothing if `logo` is the resource already held. Otherwise
    /// releases the current handle before acquiring one for the new logo.
    /// Returns `true` if the slot changed.
    pub fn sync(&mut self, logo: Option<&LogoFile>) -> bool {
        let unchanged = match (&self.held, logo) {
            (Some(held), Some(logo)) => held.logo.same_resource(logo),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return false;
        }

        self.release_held();

        if let Some(logo) = logo {
            let handle = match self.allocator.acquire(logo) {
                Ok(handle) => {
                    tracing::debug!(logo = logo.name(), "acquired logo display handle");
                    Some(handle)
                }
                Err(e) => {
                    tracing::warn!(logo = logo.name(), "cannot display logo: {e}");
                    None
                }
            };
            self.held = Some(Held {
                logo: logo.clone(),
                handle,
            });
        }
        true
    }

    /// The live handle, if a logo is held and acquisition succeeded.
    #[must_use]
    pub fn handle(&self) -> Option<&A::Handle> {
        self.held.as_ref().and_then(|held| held.handle.as_ref())
    }

    /// The logo the slot currently tracks.
    #[must_use]
    pub fn logo(&self) -> Option<&LogoFile> {
        self.held.as_ref().map(|held| &held.logo)
    }

    /// Release any live handle and forget the logo.
    pub fn teardown(&mut self) {
        self.release_held();
    }

    /// The allocator backing this slot.
    pub const fn allocator(&self) -> &A {
        &self.allocator
    }

    fn release_held(&mut self) {
        if let Some(held) = self.held.take()
            && let Some(handle) = held.handle
        {
            tracing::debug!(logo = held.logo.name(), "releasing logo display handle");
            self.allocator.release(handle);
        }
    }
}

impl<A: HandleAllocator> Drop for HandleSlot<A> {
    fn drop(&mut self) {
        self.release_held();
    }
}

/// Logo overlay passed to the renderer.
#[derive(Debug)]
pub struct Overlay<'a, H> {
    /// Display handle of the logo.
    pub handle: &'a H,
    /// Clear the modules under the logo before drawing it.
    pub excavate: bool,
    /// Overlay width in pixels.
    pub width: u32,
    /// Overlay height in pixels.
    pub height: u32,
}

/// Everything the renderer needs to draw one symbol.
#[derive(Debug)]
pub struct RenderRequest<'a, H> {
    /// Content to encode (never empty; see [`QrSettings::content`]).
    pub content: &'a str,
    /// Output edge length in pixels.
    pub size: u32,
    /// Module color text.
    pub fg_color: &'a str,
    /// Background color text.
    pub bg_color: &'a str,
    /// Error-correction tier.
    pub level: Level,
    /// Draw the quiet-zone margin.
    pub include_margin: bool,
    /// Logo overlay, present only while a logo handle is held.
    pub overlay: Option<Overlay<'a, H>>,
}

/// An opaque symbol renderer.
///
/// Any implementation can sit behind this trait without affecting the
/// store or the preview adapter.
pub trait Renderer {
    /// Logo display handle this renderer can draw.
    type Handle;
    /// The rendered visual surface.
    type Surface;
    /// Rendering failure.
    type Error: std::error::Error;

    /// Render one symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be rendered (e.g. content
    /// too long for the chosen tier, unparsable colors).
    fn render(&self, request: &RenderRequest<'_, Self::Handle>)
    -> Result<Self::Surface, Self::Error>;
}

/// Turns the current settings into render requests.
///
/// Owns the logo display handle used by the renderer. Call
/// [`sync_logo`](Self::sync_logo) whenever the settings may have changed
/// (it is a no-op when the logo did not).
pub struct PreviewAdapter<A: HandleAllocator> {
    slot: HandleSlot<A>,
}

impl<A: HandleAllocator> PreviewAdapter<A> {
    pub const fn new(allocator: A) -> Self {
        Self {
            slot: HandleSlot::new(allocator),
        }
    }

    /// Follow a change of `logo_file`. Returns `true` if the handle changed.
    pub fn sync_logo(&mut self, logo: Option<&LogoFile>) -> bool {
        self.slot.sync(logo)
    }

    /// Build the render inputs for `settings`.
    ///
    /// The overlay is attached only if a logo handle is held; its size
    /// comes from `settings.logo_size`.
    pub fn render_request<'a>(&'a self, settings: &'a QrSettings) -> RenderRequest<'a, A::Handle> {
        RenderRequest {
            content: settings.content(),
            size: settings.size,
            fg_color: &settings.fg_color,
            bg_color: &settings.bg_color,
            level: settings.level,
            include_margin: settings.include_margin,
            overlay: self.slot.handle().map(|handle| Overlay {
                handle,
                excavate: true,
                width: settings.logo_size,
                height: settings.logo_size,
            }),
        }
    }

    /// Sync the logo handle with `settings` and render.
    ///
    /// # Errors
    ///
    /// Propagates the renderer's error.
    pub fn render<R>(
        &mut self,
        settings: &QrSettings,
        renderer: &R,
    ) -> Result<R::Surface, R::Error>
    where
        R: Renderer<Handle = A::Handle>,
    {
        self.sync_logo(settings.logo_file.as_ref());
        renderer.render(&self.render_request(settings))
    }

    /// The held display handle, if any.
    #[must_use]
    pub fn handle(&self) -> Option<&A::Handle> {
        self.slot.handle()
    }

    /// Release the display handle.
    pub fn teardown(&mut self) {
        self.slot.teardown();
    }

    /// The allocator backing the display handle.
    pub const fn allocator(&self) -> &A {
        self.slot.allocator()
    }
}
