// Injected collaborators for the grid, provided to components through context
use std::sync::Arc;

use crate::error::GridError;
use crate::services::{DownloadSink, PermissionCheck, TableRowsApi};

/// Receives mutation failures verbatim. Without one, failures are only logged.
pub type ErrorHandler = Arc<dyn Fn(&GridError) + Send + Sync>;

#[derive(Clone)]
pub struct GridServices {
    pub rows: Arc<dyn TableRowsApi>,
    pub permissions: Arc<dyn PermissionCheck>,
    pub downloads: Arc<dyn DownloadSink>,
    pub on_error: Option<ErrorHandler>,
}

impl GridServices {
    pub fn new(rows: Arc<dyn TableRowsApi>, permissions: Arc<dyn PermissionCheck>, downloads: Arc<dyn DownloadSink>) -> Self {
        Self { rows, permissions, downloads, on_error: None }
    }

    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.on_error = Some(handler);
        self
    }
}

// Props compare by identity; the collaborators themselves are opaque.
impl PartialEq for GridServices {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rows, &other.rows)
            && Arc::ptr_eq(&self.permissions, &other.permissions)
            && Arc::ptr_eq(&self.downloads, &other.downloads)
            && match (&self.on_error, &other.on_error) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}
