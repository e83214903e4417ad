// Shared grid state: the row snapshot, selection and the services behind them
pub mod bulk_activity;
pub mod grid_services;
pub mod grid_state;
pub mod notifications;

pub use bulk_activity::BulkActivity;
pub use grid_services::{ErrorHandler, GridServices};
pub use grid_state::{Dispatch, GridAction, GridState, RefreshToken};
pub use notifications::{Notification, NotificationCategory, NotificationQueue};
