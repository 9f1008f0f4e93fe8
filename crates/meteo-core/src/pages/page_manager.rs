//! Page manager with page switching and event dispatching.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use heapless::Vec;
use log::{debug, info, warn};

use crate::pages::page::{Page, PageWrapper};
use crate::ui::{PageEvent, PageId};

/// Upper bound on registered pages.
const MAX_PAGES: usize = 2;

/// Owns the pages, tracks the active one and draws it.
pub struct PageManager {
    pages: Vec<PageWrapper, MAX_PAGES>,
    current_page: PageId,
    needs_clear: bool,
}

impl PageManager {
    pub fn new(initial_page: PageId) -> Self {
        Self {
            pages: Vec::new(),
            current_page: initial_page,
            needs_clear: true,
        }
    }

    /// Register a page. The page whose id matches the initial page starts
    /// active.
    pub fn register_page(&mut self, page: impl Into<PageWrapper>) {
        let mut page = page.into();
        let id = page.id();
        if id == self.current_page {
            page.on_activate();
        }
        if self.pages.push(page).is_err() {
            warn!("Page table full, dropping {:?}", id);
        }
    }

    /// Switch to `page_id`. The screen is cleared before the next draw.
    pub fn navigate_to(&mut self, page_id: PageId) {
        if page_id == self.current_page {
            return;
        }

        if let Some(current) = self.current_page_mut() {
            current.on_deactivate();
        }
        self.current_page = page_id;
        self.needs_clear = true;

        if let Some(page) = self.current_page_mut() {
            info!("Switched to page {}", page.title());
            page.on_activate();
        }
    }

    /// Flip between the two pages.
    pub fn toggle(&mut self) {
        self.navigate_to(self.current_page.toggled());
    }

    fn current_page_mut(&mut self) -> Option<&mut PageWrapper> {
        self.pages.iter_mut().find(|p| p.id() == self.current_page)
    }

    fn current_page(&self) -> Option<&PageWrapper> {
        self.pages.iter().find(|p| p.id() == self.current_page)
    }

    /// Dispatch an event to the current page.
    ///
    /// Returns `true` if the page needs a redraw.
    pub fn dispatch_event(&mut self, event: &PageEvent) -> bool {
        let current = self.current_page;
        match self.current_page_mut() {
            Some(page) => {
                let changed = page.on_event(event);
                debug!("Event {:?} on {:?}, changed: {}", event, current, changed);
                changed
            }
            None => false,
        }
    }

    /// Draw the current page if it is dirty.
    ///
    /// After a page switch the whole display is cleared first and the page
    /// redrawn from scratch. Returns whether anything was drawn.
    pub fn draw<D: DrawTarget<Color = BinaryColor>>(
        &mut self,
        display: &mut D,
    ) -> Result<bool, D::Error> {
        if self.needs_clear {
            display.clear(BinaryColor::Off)?;
            self.needs_clear = false;
            if let Some(page) = self.current_page_mut() {
                page.mark_dirty();
            }
        }

        let Some(page) = self.current_page_mut() else {
            return Ok(false);
        };
        if !page.is_dirty() {
            return Ok(false);
        }

        page.draw_page(display)?;
        page.mark_clean();
        Ok(true)
    }

    pub fn is_dirty(&self) -> bool {
        self.needs_clear || self.current_page().is_some_and(|p| p.is_dirty())
    }

    pub fn current_page_id(&self) -> PageId {
        self.current_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::DateTime;
    use crate::framebuffer::FrameBuffer;
    use crate::pages::{ClockEditorPage, ReadoutPage};
    use crate::ui::Readings;

    fn manager() -> PageManager {
        let mut manager = PageManager::new(PageId::Readout);
        manager.register_page(ReadoutPage::new(25));
        manager.register_page(ClockEditorPage::new());
        manager
    }

    #[test]
    fn test_first_draw_clears_and_draws() {
        let mut manager = manager();
        let mut frame = FrameBuffer::new();

        assert!(manager.is_dirty());
        assert_eq!(manager.draw(&mut frame), Ok(true));
        assert!(!manager.is_dirty());
        assert_eq!(manager.draw(&mut frame), Ok(false), "nothing changed");
    }

    #[test]
    fn test_toggle_switches_pages_and_forces_redraw() {
        let mut manager = manager();
        let mut frame = FrameBuffer::new();
        manager.draw(&mut frame).unwrap();

        manager.toggle();
        assert_eq!(manager.current_page_id(), PageId::ClockEditor);
        assert!(manager.is_dirty());
        assert_eq!(manager.draw(&mut frame), Ok(true));

        manager.toggle();
        assert_eq!(manager.current_page_id(), PageId::Readout);
    }

    #[test]
    fn test_navigate_to_current_page_is_a_no_op() {
        let mut manager = manager();
        let mut frame = FrameBuffer::new();
        manager.draw(&mut frame).unwrap();

        manager.navigate_to(PageId::Readout);

        assert!(!manager.is_dirty());
    }

    #[test]
    fn test_events_reach_only_the_current_page() {
        let mut manager = manager();
        let mut frame = FrameBuffer::new();
        manager.draw(&mut frame).unwrap();

        let clock = PageEvent::ClockUpdate(DateTime::new(1, 2, 2025, 3, 4, 5));
        assert!(!manager.dispatch_event(&clock), "readout ignores the clock");

        let readings = Readings {
            pressure_pa: Some(101_325),
            ..Readings::default()
        };
        assert!(manager.dispatch_event(&PageEvent::SensorUpdate(readings)));
        assert!(manager.is_dirty());
    }
}
