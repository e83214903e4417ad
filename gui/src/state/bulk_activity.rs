// Progress of the toolbar's bulk actions. Lives above the toolbar so that an export or delete
// started from it can finish and report after the selection (and the toolbar) is gone.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkActivity {
    pub exporting: bool,
    pub deleting: bool,
    /// Delete confirmation is showing.
    pub confirming: bool,
}

impl BulkActivity {
    pub fn start_delete(&mut self) {
        self.deleting = true;
    }

    /// Closes the confirmation together with the finished delete.
    pub fn finish_delete(&mut self) {
        self.deleting = false;
        self.confirming = false;
    }

    /// Cancel is ignored while the delete is running.
    pub fn cancel_confirm(&mut self) {
        if !self.deleting {
            self.confirming = false;
        }
    }

    pub fn shows_confirm(&self) -> bool {
        self.confirming || self.deleting
    }
}
