// Grid state and its reducer. All selection changes go through `GridAction`.
use grid_shared::models::Row;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    /// Currently loaded page of rows.
    pub rows: Vec<Row>,
    pub selected_rows: BTreeSet<usize>,
    /// Operate on the whole remote result set, not just `selected_rows`.
    pub all_rows_selected: bool,
    pub editable: bool,
    /// 1-based
    pub page: u32,
    pub rows_per_page: u32,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            selected_rows: BTreeSet::new(),
            all_rows_selected: false,
            editable: false,
            page: 1,
            rows_per_page: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridAction {
    /// Replaces the loaded snapshot.
    SetRows(Vec<Row>),
    SelectAllRows { selected_rows: BTreeSet<usize> },
    SelectedRowsChange { selected_rows: BTreeSet<usize> },
    RemoveRows { row_idxs: Vec<usize> },
    RemoveAllRows,
    SetPage(u32),
    SetRowsPerPage(u32),
}

impl GridAction {
    pub fn clear_selection() -> Self {
        GridAction::SelectedRowsChange { selected_rows: BTreeSet::new() }
    }
}

pub trait Dispatch {
    fn dispatch(&mut self, action: GridAction);
}

impl GridState {
    pub fn new(rows_per_page: u32, editable: bool) -> Self {
        Self { rows_per_page, editable, ..Self::default() }
    }

    pub fn has_selection(&self) -> bool {
        !self.selected_rows.is_empty()
    }

    pub fn is_selected(&self, idx: usize) -> bool {
        self.selected_rows.contains(&idx)
    }

    pub fn apply(&mut self, action: GridAction) {
        tracing::trace!(?action, "Grid action");
        match action {
            GridAction::SetRows(rows) => {
                self.rows = rows;
                self.prune_selection();
            }
            GridAction::SelectAllRows { selected_rows } => {
                self.selected_rows = selected_rows;
                self.all_rows_selected = true;
            }
            GridAction::SelectedRowsChange { selected_rows } => {
                self.selected_rows = selected_rows;
                self.all_rows_selected = false;
            }
            GridAction::RemoveRows { row_idxs } => {
                self.rows.retain(|row| !row_idxs.contains(&row.idx));
                self.prune_selection();
            }
            GridAction::RemoveAllRows => {
                self.rows.clear();
                self.prune_selection();
            }
            GridAction::SetPage(page) => {
                self.page = page.max(1);
            }
            GridAction::SetRowsPerPage(rows_per_page) => {
                self.rows_per_page = rows_per_page.max(1);
                self.page = 1;
            }
        }
    }

    // Selection may only name rows in the current snapshot
    fn prune_selection(&mut self) {
        let present: BTreeSet<usize> = self.rows.iter().map(|row| row.idx).collect();
        self.selected_rows.retain(|idx| present.contains(idx));
        if self.selected_rows.is_empty() {
            self.all_rows_selected = false;
        }
    }
}

impl Dispatch for GridState {
    fn dispatch(&mut self, action: GridAction) {
        self.apply(action);
    }
}

/// Bumped to re-run every row and count query for the current table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshToken(pub u64);

impl RefreshToken {
    pub fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}
