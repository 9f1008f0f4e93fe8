//! Page abstraction and the enum wrapper the page manager stores.
//!
//! [`Page`] is the lifecycle and drawing contract for every screen.
//! [`PageWrapper`] is a concrete enum that delegates each [`Page`] method to
//! the inner page, so the [`PageManager`](super::page_manager::PageManager)
//! can hold both pages in a `heapless::Vec` without trait objects.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::pages::clock_editor::ClockEditorPage;
use crate::pages::readout::ReadoutPage;
use crate::ui::{PageEvent, PageId};

/// Trait that all pages implement.
///
/// Per frame the manager calls, in order:
///
/// 1. **`on_activate`**: once, when the page becomes active.
/// 2. **`on_event`**: for each event of the frame.
/// 3. **`draw_page`**: when `is_dirty()` is true.
/// 4. **`on_deactivate`**: once, when another page takes over.
pub trait Page {
    fn id(&self) -> PageId;

    /// Human-readable title, used in logs.
    fn title(&self) -> &str;

    fn on_activate(&mut self) {}

    fn on_deactivate(&mut self) {}

    /// Handle an incoming event.
    ///
    /// Returns `true` if the page changed and needs a redraw.
    fn on_event(&mut self, _event: &PageEvent) -> bool {
        false
    }

    fn draw_page<D: DrawTarget<Color = BinaryColor>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error>;

    fn is_dirty(&self) -> bool;

    /// Clear the dirty flag after a successful draw.
    fn mark_clean(&mut self);

    /// Force a full redraw on the next frame.
    fn mark_dirty(&mut self);
}

pub enum PageWrapper {
    Readout(ReadoutPage),
    ClockEditor(ClockEditorPage),
}

impl Page for PageWrapper {
    fn id(&self) -> PageId {
        match self {
            PageWrapper::Readout(page) => page.id(),
            PageWrapper::ClockEditor(page) => page.id(),
        }
    }

    fn title(&self) -> &str {
        match self {
            PageWrapper::Readout(page) => page.title(),
            PageWrapper::ClockEditor(page) => page.title(),
        }
    }

    fn on_activate(&mut self) {
        match self {
            PageWrapper::Readout(page) => page.on_activate(),
            PageWrapper::ClockEditor(page) => page.on_activate(),
        }
    }

    fn on_deactivate(&mut self) {
        match self {
            PageWrapper::Readout(page) => page.on_deactivate(),
            PageWrapper::ClockEditor(page) => page.on_deactivate(),
        }
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        match self {
            PageWrapper::Readout(page) => page.on_event(event),
            PageWrapper::ClockEditor(page) => page.on_event(event),
        }
    }

    fn draw_page<D: DrawTarget<Color = BinaryColor>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        match self {
            PageWrapper::Readout(page) => page.draw_page(display),
            PageWrapper::ClockEditor(page) => page.draw_page(display),
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            PageWrapper::Readout(page) => page.is_dirty(),
            PageWrapper::ClockEditor(page) => page.is_dirty(),
        }
    }

    fn mark_clean(&mut self) {
        match self {
            PageWrapper::Readout(page) => page.mark_clean(),
            PageWrapper::ClockEditor(page) => page.mark_clean(),
        }
    }

    fn mark_dirty(&mut self) {
        match self {
            PageWrapper::Readout(page) => page.mark_dirty(),
            PageWrapper::ClockEditor(page) => page.mark_dirty(),
        }
    }
}

impl From<ReadoutPage> for PageWrapper {
    fn from(page: ReadoutPage) -> Self {
        PageWrapper::Readout(page)
    }
}

impl From<ClockEditorPage> for PageWrapper {
    fn from(page: ClockEditorPage) -> Self {
        PageWrapper::ClockEditor(page)
    }
}
