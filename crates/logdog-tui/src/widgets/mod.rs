//! Custom widget components

mod device_list;
mod footer;
mod header;
mod log_view;
pub mod modal_overlay;
mod severity_picker;

pub use device_list::DeviceList;
pub use footer::Footer;
pub use header::Header;
pub use log_view::LogView;
pub use severity_picker::SeverityPicker;

// Re-export state types from app layer (these are used by render/)
pub use logdog_app::log_view_state::LogViewState;
