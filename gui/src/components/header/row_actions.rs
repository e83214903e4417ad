//! Bulk actions behind the selection toolbar.
//!
//! `RowSelection` is a snapshot of everything the toolbar reads when a handler fires:
//! labels and prompts are derived from it synchronously, while [`delete_rows`] and
//! [`export_rows`] run the remote calls and report back through a [`GridHost`].

use grid_shared::export_rows_to_csv;
use grid_shared::models::{Filter, Row, Sort, TableDescriptor};
use grid_shared::utils::{format_thousands, row_noun};
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::error::GridError;
use crate::services::{DownloadSink, TableRowsApi};
use crate::state::{Dispatch, ErrorHandler, GridAction, GridState, Notification};

/// Largest "export all" a client will attempt; anything bigger is refused up front.
pub const MAX_EXPORT_ROW_COUNT: u64 = 500_000;

/// Effects a bulk action may have on the surrounding UI.
pub trait GridHost: Dispatch {
    fn notify(&mut self, notification: Notification);
    fn is_exporting(&self) -> bool;
    fn set_exporting(&mut self, exporting: bool);
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowSelection {
    pub table: TableDescriptor,
    pub sorts: Vec<Sort>,
    pub filters: Vec<Filter>,
    pub loaded_rows: Vec<Row>,
    pub total_rows: u64,
    pub selected_rows: BTreeSet<usize>,
    pub all_rows_selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeletePlan {
    /// Every row, no filters: truncate the table.
    Truncate,
    /// Every row matching the active filters.
    DeleteMatching(Vec<Filter>),
    /// Exactly these loaded rows.
    DeleteRows { row_idxs: Vec<usize>, rows: Vec<Row> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Truncated { rows_affected: u64 },
    DeletedMatching { rows_affected: u64 },
    Deleted { row_idxs: Vec<usize>, rows_affected: u64 },
    Failed,
}

impl DeleteOutcome {
    pub fn succeeded(&self) -> bool {
        !matches!(self, DeleteOutcome::Failed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Saved { path: PathBuf, rows: usize },
    TooLarge { total_rows: u64 },
    AlreadyExporting,
    Failed,
}

impl RowSelection {
    pub fn from_state(
        table: &TableDescriptor,
        sorts: &[Sort],
        filters: &[Filter],
        state: &GridState,
        total_rows: u64,
    ) -> Self {
        Self {
            table: table.clone(),
            sorts: sorts.to_vec(),
            filters: filters.to_vec(),
            loaded_rows: state.rows.clone(),
            total_rows,
            selected_rows: state.selected_rows.clone(),
            all_rows_selected: state.all_rows_selected,
        }
    }

    /// Rows a bulk action will touch: the remote total when everything is selected.
    pub fn affected_count(&self) -> u64 {
        if self.all_rows_selected {
            self.total_rows
        } else {
            self.selected_rows.len() as u64
        }
    }

    pub fn summary_label(&self) -> String {
        if self.all_rows_selected {
            format!("{} rows selected", self.total_rows)
        } else {
            let n = self.selected_rows.len() as u64;
            format!("{} {} selected", n, row_noun(n))
        }
    }

    pub fn delete_label(&self) -> String {
        if self.all_rows_selected {
            format!("Delete {} rows", self.total_rows)
        } else {
            let n = self.selected_rows.len() as u64;
            format!("Delete {} {}", n, row_noun(n))
        }
    }

    pub fn can_select_all(&self) -> bool {
        !self.all_rows_selected && self.total_rows > self.loaded_rows.len() as u64
    }

    pub fn select_all_label(&self) -> String {
        format!("Select all {} rows", self.total_rows)
    }

    /// Marks every row as selected. Only the loaded indices go into the set; the
    /// flag is what tells delete and export to work on the full result.
    pub fn select_all_action(&self) -> GridAction {
        GridAction::SelectAllRows {
            selected_rows: self.loaded_rows.iter().map(|row| row.idx).collect(),
        }
    }

    pub fn confirm_prompt(&self) -> ConfirmPrompt {
        let n = self.affected_count();
        let noun = if n > 1 { "rows" } else { "row" };
        ConfirmPrompt {
            title: "Confirm to delete".to_string(),
            message: format!(
                "Are you sure you want to delete the selected {} {}? This action cannot be undone.",
                n, noun
            ),
            confirm_text: format!("Delete {} rows", n),
        }
    }

    /// Loaded rows whose index is selected, in snapshot order.
    pub fn selected_loaded_rows(&self) -> Vec<Row> {
        self.loaded_rows
            .iter()
            .filter(|row| self.selected_rows.contains(&row.idx))
            .cloned()
            .collect()
    }

    pub fn delete_plan(&self) -> DeletePlan {
        if self.all_rows_selected {
            if self.filters.is_empty() {
                DeletePlan::Truncate
            } else {
                DeletePlan::DeleteMatching(self.filters.clone())
            }
        } else {
            DeletePlan::DeleteRows {
                row_idxs: self.selected_rows.iter().copied().collect(),
                rows: self.selected_loaded_rows(),
            }
        }
    }

    pub fn export_file_name(&self) -> String {
        format!("{}_rows.csv", self.table.name)
    }

    pub fn exceeds_export_cap(&self) -> bool {
        self.all_rows_selected && self.total_rows > MAX_EXPORT_ROW_COUNT
    }
}

/// Size of the filtered result set the toolbar acts on. A failed count reads as 0.
pub async fn selection_total(api: &dyn TableRowsApi, table: &TableDescriptor, filters: &[Filter]) -> u64 {
    match api.count_rows(table, filters).await {
        Ok(count) => count,
        Err(err) => {
            tracing::warn!(table = %table.qualified_name(), error = %err, "Failed to count rows");
            0
        }
    }
}

/// Runs the confirmed bulk delete. On success the store sees the removal followed by an
/// emptied selection; on failure the error goes to `on_error` (if any) and the selection
/// is left alone.
pub async fn delete_rows<H>(
    selection: &RowSelection,
    api: &dyn TableRowsApi,
    on_error: Option<&ErrorHandler>,
    host: &mut H,
) -> DeleteOutcome
where
    H: GridHost + ?Sized,
{
    let table = &selection.table;
    let result = match selection.delete_plan() {
        DeletePlan::Truncate => api
            .truncate_rows(table)
            .await
            .map(|rows_affected| DeleteOutcome::Truncated { rows_affected }),
        DeletePlan::DeleteMatching(filters) => api
            .delete_all_rows(table, &filters)
            .await
            .map(|rows_affected| DeleteOutcome::DeletedMatching { rows_affected }),
        DeletePlan::DeleteRows { row_idxs, rows } => api
            .delete_rows(table, &rows)
            .await
            .map(|rows_affected| DeleteOutcome::Deleted { row_idxs, rows_affected }),
    };

    match result {
        Ok(outcome) => {
            match &outcome {
                DeleteOutcome::Deleted { row_idxs, rows_affected } => {
                    tracing::info!(table = %table.qualified_name(), rows_affected, "Deleted selected rows");
                    host.dispatch(GridAction::RemoveRows { row_idxs: row_idxs.clone() });
                }
                _ => {
                    tracing::info!(table = %table.qualified_name(), ?outcome, "Deleted all rows");
                    host.dispatch(GridAction::RemoveAllRows);
                }
            }
            host.dispatch(GridAction::clear_selection());
            outcome
        }
        Err(err) => {
            tracing::error!(table = %table.qualified_name(), error = %err, "Bulk delete failed");
            if let Some(handler) = on_error {
                handler(&err);
            }
            DeleteOutcome::Failed
        }
    }
}

/// Exports the selection as `<table>_rows.csv`. The exporting flag is held for the whole
/// call and is always released before returning.
pub async fn export_rows<H>(
    selection: &RowSelection,
    api: &dyn TableRowsApi,
    downloads: &dyn DownloadSink,
    host: &mut H,
) -> ExportOutcome
where
    H: GridHost + ?Sized,
{
    if host.is_exporting() {
        return ExportOutcome::AlreadyExporting;
    }
    host.set_exporting(true);

    if selection.exceeds_export_cap() {
        tracing::warn!(
            table = %selection.table.qualified_name(),
            total_rows = selection.total_rows,
            "Refusing CSV export above row cap"
        );
        host.notify(Notification::error(format!(
            "Sorry! We're unable to support exporting of CSV for row counts larger than {} at the moment.",
            format_thousands(MAX_EXPORT_ROW_COUNT)
        )));
        host.set_exporting(false);
        return ExportOutcome::TooLarge { total_rows: selection.total_rows };
    }

    let outcome = match write_export(selection, api, downloads).await {
        Ok((path, rows)) => {
            tracing::info!(table = %selection.table.qualified_name(), rows, path = %path.display(), "Exported rows to CSV");
            host.notify(Notification::success(format!(
                "Exported {} {} to {}",
                rows,
                row_noun(rows as u64),
                path.display()
            )));
            ExportOutcome::Saved { path, rows }
        }
        Err(err) => {
            tracing::error!(table = %selection.table.qualified_name(), error = %err, "CSV export failed");
            host.notify(Notification::error(format!("Failed to export rows: {}", err)));
            ExportOutcome::Failed
        }
    };
    host.set_exporting(false);
    outcome
}

async fn write_export(
    selection: &RowSelection,
    api: &dyn TableRowsApi,
    downloads: &dyn DownloadSink,
) -> Result<(PathBuf, usize), GridError> {
    let rows = if selection.all_rows_selected {
        api.fetch_all_rows(&selection.table, &selection.filters, &selection.sorts).await?
    } else {
        selection.selected_loaded_rows()
    };

    let csv = export_rows_to_csv(&selection.table.columns, &rows).map_err(|e| GridError::Csv(e.to_string()))?;
    let path = downloads.save(&selection.export_file_name(), csv.as_bytes())?;
    Ok((path, rows.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NotificationCategory;
    use async_trait::async_trait;
    use grid_shared::models::{Column, FilterOperator};
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    #[derive(Default)]
    struct RecordingHost {
        actions: Vec<GridAction>,
        notifications: Vec<Notification>,
        exporting: bool,
        exporting_history: Vec<bool>,
    }

    impl Dispatch for RecordingHost {
        fn dispatch(&mut self, action: GridAction) {
            self.actions.push(action);
        }
    }

    impl GridHost for RecordingHost {
        fn notify(&mut self, notification: Notification) {
            self.notifications.push(notification);
        }

        fn is_exporting(&self) -> bool {
            self.exporting
        }

        fn set_exporting(&mut self, exporting: bool) {
            self.exporting = exporting;
            self.exporting_history.push(exporting);
        }
    }

    /// Applies actions to a grid the test can also change while an action is running.
    #[derive(Default)]
    struct SharedGridHost {
        grid: Rc<RefCell<GridState>>,
        notifications: Vec<Notification>,
        exporting: bool,
    }

    impl Dispatch for SharedGridHost {
        fn dispatch(&mut self, action: GridAction) {
            self.grid.borrow_mut().apply(action);
        }
    }

    impl GridHost for SharedGridHost {
        fn notify(&mut self, notification: Notification) {
            self.notifications.push(notification);
        }

        fn is_exporting(&self) -> bool {
            self.exporting
        }

        fn set_exporting(&mut self, exporting: bool) {
            self.exporting = exporting;
        }
    }

    #[derive(Default)]
    struct MockRowsApi {
        calls: Mutex<Vec<String>>,
        deleted: Mutex<Vec<Row>>,
        all_rows: Vec<Row>,
        fail: bool,
        /// Holds `fetch_all_rows` until notified.
        gate: Option<Arc<Notify>>,
    }

    impl MockRowsApi {
        fn failing() -> Self {
            Self { fail: true, ..Self::default() }
        }

        fn record(&self, call: String) -> Result<(), GridError> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                Err(GridError::Remote(tonic::Status::internal("connection reset")))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TableRowsApi for MockRowsApi {
        async fn get_table(&self, schema: &str, name: &str) -> Result<TableDescriptor, GridError> {
            self.record(format!("get_table {}.{}", schema, name))?;
            Ok(users_table())
        }

        async fn query_rows(&self, query: &crate::services::RowsQuery) -> Result<Vec<Row>, GridError> {
            self.record(format!("query page {}", query.page))?;
            Ok(Vec::new())
        }

        async fn count_rows(&self, _table: &TableDescriptor, filters: &[Filter]) -> Result<u64, GridError> {
            let columns: Vec<&str> = filters.iter().map(|f| f.column.as_str()).collect();
            self.record(format!("count {:?}", columns))?;
            Ok(self.all_rows.len() as u64)
        }

        async fn delete_rows(&self, _table: &TableDescriptor, rows: &[Row]) -> Result<u64, GridError> {
            self.record(format!("delete {:?}", rows.iter().map(|r| r.idx).collect::<Vec<_>>()))?;
            self.deleted.lock().unwrap().extend(rows.iter().cloned());
            Ok(rows.len() as u64)
        }

        async fn delete_all_rows(&self, _table: &TableDescriptor, filters: &[Filter]) -> Result<u64, GridError> {
            self.record(format!("delete_all {} filters", filters.len()))?;
            Ok(42)
        }

        async fn truncate_rows(&self, _table: &TableDescriptor) -> Result<u64, GridError> {
            self.record("truncate".to_string())?;
            Ok(1_000)
        }

        async fn fetch_all_rows(&self, _table: &TableDescriptor, filters: &[Filter], sorts: &[Sort]) -> Result<Vec<Row>, GridError> {
            self.record(format!("fetch_all {} filters {} sorts", filters.len(), sorts.len()))?;
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            Ok(self.all_rows.clone())
        }
    }

    #[derive(Default)]
    struct RecordingDownloads {
        saved: Mutex<Vec<(String, String)>>,
    }

    impl DownloadSink for RecordingDownloads {
        fn save(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, GridError> {
            let text = String::from_utf8(contents.to_vec()).unwrap();
            self.saved.lock().unwrap().push((file_name.to_string(), text));
            Ok(PathBuf::from("/downloads").join(file_name))
        }
    }

    fn users_table() -> TableDescriptor {
        TableDescriptor::new(
            "public",
            "users",
            vec![Column::new("id", "int8").primary_key(), Column::new("email", "text")],
        )
    }

    fn loaded(idxs: &[usize]) -> Vec<Row> {
        idxs.iter()
            .map(|&idx| {
                let values = json!({"email": format!("u{}@example.com", idx), "id": idx + 100});
                Row::new(idx, values.as_object().cloned().unwrap())
            })
            .collect()
    }

    fn selection(loaded_idxs: &[usize], selected: &[usize], total_rows: u64, all: bool) -> RowSelection {
        RowSelection {
            table: users_table(),
            sorts: vec![],
            filters: vec![],
            loaded_rows: loaded(loaded_idxs),
            total_rows,
            selected_rows: selected.iter().copied().collect(),
            all_rows_selected: all,
        }
    }

    #[test]
    fn test_labels_for_partial_selection() {
        let one = selection(&[0, 1, 2], &[1], 3, false);
        assert_eq!(one.summary_label(), "1 row selected");
        assert_eq!(one.delete_label(), "Delete 1 row");

        let two = selection(&[0, 1, 2], &[0, 2], 3, false);
        assert_eq!(two.summary_label(), "2 rows selected");
        assert_eq!(two.delete_label(), "Delete 2 rows");
    }

    #[test]
    fn test_labels_use_total_when_all_selected() {
        let all = selection(&[0, 1], &[0, 1], 1_200, true);
        assert_eq!(all.summary_label(), "1200 rows selected");
        assert_eq!(all.delete_label(), "Delete 1200 rows");
        assert_eq!(all.affected_count(), 1_200);
    }

    #[test]
    fn test_select_all_visibility() {
        assert!(selection(&[0, 1], &[0], 10, false).can_select_all());
        assert!(!selection(&[0, 1], &[0], 2, false).can_select_all());
        assert!(!selection(&[0, 1], &[0, 1], 10, true).can_select_all());
        assert_eq!(selection(&[0, 1], &[0], 10, false).select_all_label(), "Select all 10 rows");
    }

    #[test]
    fn test_select_all_only_marks_loaded_indices() {
        let sel = selection(&[0, 1, 2], &[1], 1_000_000, false);
        assert_eq!(
            sel.select_all_action(),
            GridAction::SelectAllRows { selected_rows: [0, 1, 2].into_iter().collect() }
        );
    }

    #[test]
    fn test_confirm_prompt_counts() {
        let prompt = selection(&[0, 1, 2], &[0, 2], 3, false).confirm_prompt();
        assert_eq!(prompt.title, "Confirm to delete");
        assert_eq!(
            prompt.message,
            "Are you sure you want to delete the selected 2 rows? This action cannot be undone."
        );
        assert_eq!(prompt.confirm_text, "Delete 2 rows");

        let single = selection(&[0, 1, 2], &[1], 3, false).confirm_prompt();
        assert!(single.message.contains("selected 1 row?"));

        let all = selection(&[0, 1], &[0, 1], 5_000, true).confirm_prompt();
        assert!(all.message.contains("selected 5000 rows"));
    }

    #[test]
    fn test_delete_plan_branches() {
        assert_eq!(selection(&[0], &[0], 9, true).delete_plan(), DeletePlan::Truncate);

        let mut filtered = selection(&[0], &[0], 9, true);
        filtered.filters = vec![Filter::new("email", FilterOperator::Like, "%@example.com")];
        assert!(matches!(filtered.delete_plan(), DeletePlan::DeleteMatching(f) if f.len() == 1));

        match selection(&[0, 1, 2], &[2, 0], 3, false).delete_plan() {
            DeletePlan::DeleteRows { row_idxs, rows } => {
                assert_eq!(row_idxs, vec![0, 2]);
                assert_eq!(rows.iter().map(|r| r.idx).collect::<Vec<_>>(), vec![0, 2]);
            }
            other => panic!("unexpected plan {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_all_without_filters_truncates() {
        let api = MockRowsApi::default();
        let mut host = RecordingHost::default();
        let outcome = delete_rows(&selection(&[0, 1], &[0, 1], 1_000, true), &api, None, &mut host).await;

        assert_eq!(outcome, DeleteOutcome::Truncated { rows_affected: 1_000 });
        assert_eq!(api.calls(), vec!["truncate"]);
        assert_eq!(host.actions, vec![GridAction::RemoveAllRows, GridAction::clear_selection()]);
    }

    #[tokio::test]
    async fn test_delete_all_with_filters_deletes_matching() {
        let api = MockRowsApi::default();
        let mut host = RecordingHost::default();
        let mut sel = selection(&[0, 1], &[0, 1], 1_000, true);
        sel.filters = vec![Filter::new("id", FilterOperator::GreaterThan, "5")];

        let outcome = delete_rows(&sel, &api, None, &mut host).await;
        assert_eq!(outcome, DeleteOutcome::DeletedMatching { rows_affected: 42 });
        assert_eq!(api.calls(), vec!["delete_all 1 filters"]);
        assert_eq!(host.actions, vec![GridAction::RemoveAllRows, GridAction::clear_selection()]);
    }

    #[tokio::test]
    async fn test_partial_delete_dispatches_removed_indices() {
        let api = MockRowsApi::default();
        let mut host = RecordingHost::default();
        let sel = selection(&[0, 1, 2, 3, 4, 5], &[2, 5], 6, false);

        let outcome = delete_rows(&sel, &api, None, &mut host).await;
        assert!(outcome.succeeded());
        assert_eq!(api.calls(), vec!["delete [2, 5]"]);
        assert_eq!(
            host.actions,
            vec![GridAction::RemoveRows { row_idxs: vec![2, 5] }, GridAction::clear_selection()]
        );
    }

    #[tokio::test]
    async fn test_three_loaded_rows_scenario() {
        // 3 rows loaded, {0,2} selected, editable
        let mut state = GridState::new(100, true);
        state.apply(GridAction::SetRows(loaded(&[0, 1, 2])));
        state.apply(GridAction::SelectedRowsChange { selected_rows: [0, 2].into_iter().collect() });
        let sel = RowSelection::from_state(&users_table(), &[], &[], &state, 3);
        assert_eq!(sel.delete_label(), "Delete 2 rows");

        let api = MockRowsApi::default();
        let mut host = RecordingHost::default();
        delete_rows(&sel, &api, None, &mut host).await;

        let deleted = api.deleted.lock().unwrap().clone();
        assert_eq!(deleted.iter().map(|r| r.get("id").cloned()).collect::<Vec<_>>(), vec![Some(json!(100)), Some(json!(102))]);
        assert_eq!(
            host.actions,
            vec![GridAction::RemoveRows { row_idxs: vec![0, 2] }, GridAction::clear_selection()]
        );

        for action in host.actions {
            state.apply(action);
        }
        assert!(!state.has_selection());
        assert_eq!(state.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_forwards_error_and_keeps_selection() {
        let api = MockRowsApi::failing();
        let mut host = RecordingHost::default();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_in_handler = seen.clone();
        let handler: ErrorHandler = Arc::new(move |err: &GridError| {
            assert!(err.to_string().contains("connection reset"));
            seen_in_handler.fetch_add(1, Ordering::SeqCst);
        });

        let outcome = delete_rows(&selection(&[0, 1], &[1], 2, false), &api, Some(&handler), &mut host).await;
        assert_eq!(outcome, DeleteOutcome::Failed);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert!(host.actions.is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_without_handler_is_swallowed() {
        let api = MockRowsApi::failing();
        let mut host = RecordingHost::default();
        let outcome = delete_rows(&selection(&[0], &[0], 1, false), &api, None, &mut host).await;
        assert_eq!(outcome, DeleteOutcome::Failed);
        assert!(host.actions.is_empty());
        assert!(host.notifications.is_empty());
    }

    #[tokio::test]
    async fn test_export_over_cap_is_rejected() {
        // "users" with 1,200,000 rows, everything selected
        let api = MockRowsApi::default();
        let downloads = RecordingDownloads::default();
        let mut host = RecordingHost::default();
        let sel = selection(&[0, 1], &[0, 1], 1_200_000, true);

        let outcome = export_rows(&sel, &api, &downloads, &mut host).await;
        assert_eq!(outcome, ExportOutcome::TooLarge { total_rows: 1_200_000 });
        assert!(api.calls().is_empty());
        assert!(downloads.saved.lock().unwrap().is_empty());
        assert_eq!(host.exporting_history, vec![true, false]);
        assert!(!host.exporting);
        assert_eq!(host.notifications.len(), 1);
        assert_eq!(host.notifications[0].category, NotificationCategory::Error);
        assert!(host.notifications[0].message.contains("larger than 500,000"));
    }

    #[tokio::test]
    async fn test_export_partial_selection_uses_loaded_rows() {
        let api = MockRowsApi::default();
        let downloads = RecordingDownloads::default();
        let mut host = RecordingHost::default();
        let sel = selection(&[0, 1, 2, 3], &[3, 1], 4, false);

        let outcome = export_rows(&sel, &api, &downloads, &mut host).await;
        assert_eq!(outcome, ExportOutcome::Saved { path: PathBuf::from("/downloads/users_rows.csv"), rows: 2 });
        assert!(api.calls().is_empty());

        let saved = downloads.saved.lock().unwrap();
        assert_eq!(saved[0].0, "users_rows.csv");
        assert_eq!(saved[0].1, "id,email\n101,u1@example.com\n103,u3@example.com\n");
        assert_eq!(host.exporting_history, vec![true, false]);
        assert_eq!(host.notifications[0].category, NotificationCategory::Success);
        assert_eq!(host.notifications[0].message, "Exported 2 rows to /downloads/users_rows.csv");
    }

    #[tokio::test]
    async fn test_export_all_fetches_full_result() {
        let api = MockRowsApi { all_rows: loaded(&[0, 1, 2, 3, 4]), ..MockRowsApi::default() };
        let downloads = RecordingDownloads::default();
        let mut host = RecordingHost::default();
        let mut sel = selection(&[0, 1], &[0, 1], 5, true);
        sel.sorts = vec![Sort::desc("id")];

        let outcome = export_rows(&sel, &api, &downloads, &mut host).await;
        assert!(matches!(outcome, ExportOutcome::Saved { rows: 5, .. }));
        assert_eq!(api.calls(), vec!["fetch_all 0 filters 1 sorts"]);
        assert_eq!(downloads.saved.lock().unwrap()[0].1.lines().count(), 6);
    }

    #[tokio::test]
    async fn test_export_failure_notifies_and_clears_flag() {
        let api = MockRowsApi::failing();
        let downloads = RecordingDownloads::default();
        let mut host = RecordingHost::default();

        let outcome = export_rows(&selection(&[0], &[0], 10, true), &api, &downloads, &mut host).await;
        assert_eq!(outcome, ExportOutcome::Failed);
        assert!(!host.exporting);
        assert!(host.notifications[0].message.starts_with("Failed to export rows"));
    }

    #[tokio::test]
    async fn test_export_is_not_reentrant() {
        let api = MockRowsApi::default();
        let downloads = RecordingDownloads::default();
        let mut host = RecordingHost { exporting: true, ..RecordingHost::default() };

        let outcome = export_rows(&selection(&[0], &[0], 1, false), &api, &downloads, &mut host).await;
        assert_eq!(outcome, ExportOutcome::AlreadyExporting);
        assert!(host.exporting_history.is_empty());
        assert!(downloads.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_selection_total_counts_with_given_filters() {
        let api = MockRowsApi { all_rows: loaded(&[0, 1, 2]), ..MockRowsApi::default() };
        let filters = vec![Filter::new("email", FilterOperator::ILike, "%@example.com")];

        assert_eq!(selection_total(&api, &users_table(), &filters).await, 3);
        assert_eq!(selection_total(&api, &users_table(), &[]).await, 3);
        assert_eq!(api.calls(), vec![r#"count ["email"]"#, "count []"]);
    }

    #[tokio::test]
    async fn test_selection_total_failure_reads_as_zero() {
        assert_eq!(selection_total(&MockRowsApi::failing(), &users_table(), &[]).await, 0);
    }

    #[test]
    fn test_export_cap_boundary() {
        assert!(!selection(&[0], &[0], MAX_EXPORT_ROW_COUNT, true).exceeds_export_cap());
        assert!(selection(&[0], &[0], MAX_EXPORT_ROW_COUNT + 1, true).exceeds_export_cap());
        // A partial selection never hits the cap, whatever the table size
        assert!(!selection(&[0], &[0], MAX_EXPORT_ROW_COUNT + 1, false).exceeds_export_cap());
    }

    #[tokio::test]
    async fn test_export_at_cap_is_allowed() {
        let api = MockRowsApi { all_rows: loaded(&[0, 1, 2]), ..MockRowsApi::default() };
        let downloads = RecordingDownloads::default();
        let mut host = RecordingHost::default();
        let sel = selection(&[0, 1, 2], &[0, 1, 2], 500_000, true);

        let outcome = export_rows(&sel, &api, &downloads, &mut host).await;
        assert!(matches!(outcome, ExportOutcome::Saved { rows: 3, .. }));
        assert_eq!(api.calls(), vec!["fetch_all 0 filters 0 sorts"]);
        assert_eq!(host.exporting_history, vec![true, false]);
        assert_eq!(host.notifications[0].category, NotificationCategory::Success);
    }

    #[tokio::test]
    async fn test_export_one_over_cap_is_rejected() {
        let api = MockRowsApi { all_rows: loaded(&[0, 1, 2]), ..MockRowsApi::default() };
        let downloads = RecordingDownloads::default();
        let mut host = RecordingHost::default();
        let sel = selection(&[0, 1, 2], &[0, 1, 2], 500_001, true);

        let outcome = export_rows(&sel, &api, &downloads, &mut host).await;
        assert_eq!(outcome, ExportOutcome::TooLarge { total_rows: 500_001 });
        assert!(api.calls().is_empty());
        assert!(downloads.saved.lock().unwrap().is_empty());
        assert!(!host.exporting);
    }

    #[tokio::test]
    async fn test_export_finishes_after_selection_is_cleared() {
        let gate = Arc::new(Notify::new());
        let api = MockRowsApi { all_rows: loaded(&[0, 1, 2, 3]), gate: Some(gate.clone()), ..MockRowsApi::default() };
        let downloads = RecordingDownloads::default();
        let grid = Rc::new(RefCell::new(GridState::default()));
        grid.borrow_mut().apply(GridAction::SetRows(loaded(&[0, 1])));
        grid.borrow_mut().apply(GridAction::SelectAllRows { selected_rows: BTreeSet::from([0, 1]) });
        let sel = RowSelection::from_state(&users_table(), &[], &[], &grid.borrow(), 4);
        let mut host = SharedGridHost { grid: grid.clone(), ..SharedGridHost::default() };

        // The user clears the selection (hiding the toolbar) while the full result is still loading
        let (outcome, _) = tokio::join!(export_rows(&sel, &api, &downloads, &mut host), async {
            grid.borrow_mut().apply(GridAction::clear_selection());
            gate.notify_one();
        });

        assert!(!grid.borrow().has_selection());
        assert_eq!(outcome, ExportOutcome::Saved { path: PathBuf::from("/downloads/users_rows.csv"), rows: 4 });
        assert_eq!(downloads.saved.lock().unwrap()[0].1.lines().count(), 5);
        assert!(!host.exporting);
        assert_eq!(host.notifications.len(), 1);
        assert_eq!(host.notifications[0].message, "Exported 4 rows to /downloads/users_rows.csv");
    }

    #[tokio::test]
    async fn test_delete_finishes_after_selection_is_cleared() {
        let api = MockRowsApi::default();
        let grid = Rc::new(RefCell::new(GridState::default()));
        grid.borrow_mut().apply(GridAction::SetRows(loaded(&[0, 1, 2])));
        grid.borrow_mut().apply(GridAction::SelectedRowsChange { selected_rows: BTreeSet::from([0, 2]) });
        let sel = RowSelection::from_state(&users_table(), &[], &[], &grid.borrow(), 3);
        let mut host = SharedGridHost { grid: grid.clone(), ..SharedGridHost::default() };
        grid.borrow_mut().apply(GridAction::clear_selection());

        let outcome = delete_rows(&sel, &api, None, &mut host).await;
        assert_eq!(outcome, DeleteOutcome::Deleted { row_idxs: vec![0, 2], rows_affected: 2 });
        assert_eq!(grid.borrow().rows.iter().map(|r| r.idx).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(selection(&[], &[], 0, false).export_file_name(), "users_rows.csv");
    }
}
