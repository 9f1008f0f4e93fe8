pub mod clock_editor;
pub mod page;
pub mod page_manager;
pub mod readout;

pub use clock_editor::ClockEditorPage;
pub use page::{Page, PageWrapper};
pub use page_manager::PageManager;
pub use readout::ReadoutPage;
