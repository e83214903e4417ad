// GUI components
pub mod confirm_modal;
pub mod grid_view;
pub mod header;
pub mod toasts;

pub use confirm_modal::ConfirmModal;
pub use grid_view::GridView;
pub use header::Header;
pub use toasts::Toasts;
