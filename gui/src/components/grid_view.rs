// Paginated row table with per-row selection checkboxes
#![allow(non_snake_case)]
use dioxus::prelude::*;
use grid_shared::models::{Filter, Row, Sort, TableDescriptor};
use grid_shared::utils::cell_text;
use std::collections::BTreeSet;

use crate::services::RowsQuery;
use crate::state::{GridAction, GridServices, GridState, Notification, NotificationQueue, RefreshToken};

/// Selection after clicking the checkbox of row `idx`.
pub fn toggled_selection(selected: &BTreeSet<usize>, idx: usize) -> BTreeSet<usize> {
    let mut next = selected.clone();
    if !next.remove(&idx) {
        next.insert(idx);
    }
    next
}

/// Selection after clicking the header checkbox: all loaded rows, or none if they already are.
pub fn toggled_page_selection(rows: &[Row], selected: &BTreeSet<usize>) -> BTreeSet<usize> {
    let all_selected = !rows.is_empty() && rows.iter().all(|row| selected.contains(&row.idx));
    if all_selected {
        BTreeSet::new()
    } else {
        rows.iter().map(|row| row.idx).collect()
    }
}

const PAGE_SIZES: [u32; 4] = [25, 50, 100, 500];

/// Page sizes offered in the footer. A configured size outside the presets is kept as an option.
pub fn page_size_options(current: u32) -> Vec<u32> {
    let mut sizes = PAGE_SIZES.to_vec();
    if !sizes.contains(&current) {
        sizes.push(current);
        sizes.sort_unstable();
    }
    sizes
}

fn display_cell(row: &Row, column: &str) -> String {
    match row.get(column) {
        Some(value) if !value.is_null() => cell_text(value),
        _ => "NULL".to_string(),
    }
}

#[component]
pub fn GridView(table: TableDescriptor) -> Element {
    let services = use_context::<GridServices>();
    let mut grid = use_context::<Signal<GridState>>();
    let mut notifications = use_context::<Signal<NotificationQueue>>();
    let filters = use_context::<Signal<Vec<Filter>>>();
    let sorts = use_context::<Signal<Vec<Sort>>>();
    let refresh = use_context::<Signal<RefreshToken>>();

    // Only paging changes re-run the query; row and selection updates don't
    let paging = use_memo(move || {
        let state = grid.read();
        (state.page, state.rows_per_page)
    });

    let api = services.rows.clone();
    let query_table = table.clone();
    let rows_loaded = use_resource(move || {
        let api = api.clone();
        let (page, rows_per_page) = paging();
        let query = RowsQuery {
            schema: query_table.schema.clone(),
            table: query_table.name.clone(),
            page,
            rows_per_page,
            sorts: sorts(),
            filters: filters(),
        };
        let _token = refresh();
        async move {
            match api.query_rows(&query).await {
                Ok(rows) => {
                    tracing::debug!(table = %query.table, page, rows = rows.len(), "Loaded rows");
                    grid.write().apply(GridAction::SetRows(rows));
                    true
                }
                Err(err) => {
                    tracing::error!(table = %query.table, error = %err, "Failed to load rows");
                    notifications.write().push(Notification::error(format!("Failed to load rows: {}", err)));
                    false
                }
            }
        }
    });
    let loading = rows_loaded.read().is_none();

    let state = grid.read();
    let column_names: Vec<String> = table.columns.iter().map(|c| c.name.clone()).collect();
    let page_checked = !state.rows.is_empty() && state.rows.iter().all(|row| state.is_selected(row.idx));
    let body: Vec<(usize, bool, Vec<String>)> = state
        .rows
        .iter()
        .map(|row| {
            let cells = column_names.iter().map(|c| display_cell(row, c)).collect();
            (row.idx, state.is_selected(row.idx), cells)
        })
        .collect();
    let page = state.page;
    let rows_per_page = state.rows_per_page;
    let has_next = state.rows.len() as u32 >= state.rows_per_page;
    drop(state);

    let mut go_to_page = move |target: u32| {
        let mut state = grid.write();
        state.apply(GridAction::clear_selection());
        state.apply(GridAction::SetPage(target));
    };

    // Changing the page size restarts at page 1 with nothing selected
    let set_page_size = move |evt: FormEvent| {
        if let Ok(size) = evt.value().parse::<u32>() {
            let mut state = grid.write();
            state.apply(GridAction::clear_selection());
            state.apply(GridAction::SetRowsPerPage(size));
        }
    };

    rsx! {
        div { class: "grid-view",
            table { class: "grid-table",
                thead {
                    tr {
                        th { class: "grid-table__select",
                            input {
                                r#type: "checkbox",
                                checked: page_checked,
                                onchange: move |_| {
                                    let next = {
                                        let state = grid.read();
                                        toggled_page_selection(&state.rows, &state.selected_rows)
                                    };
                                    grid.write().apply(GridAction::SelectedRowsChange { selected_rows: next });
                                },
                            }
                        }
                        for name in column_names {
                            th { key: "{name}", "{name}" }
                        }
                    }
                }
                tbody {
                    for (idx, selected, cells) in body {
                        tr { key: "{idx}", class: if selected { "grid-table__row grid-table__row--selected" } else { "grid-table__row" },
                            td { class: "grid-table__select",
                                input {
                                    r#type: "checkbox",
                                    checked: selected,
                                    onchange: move |_| {
                                        let next = toggled_selection(&grid.read().selected_rows, idx);
                                        grid.write().apply(GridAction::SelectedRowsChange { selected_rows: next });
                                    },
                                }
                            }
                            for (i, cell) in cells.into_iter().enumerate() {
                                td { key: "{i}", "{cell}" }
                            }
                        }
                    }
                }
            }
            if loading {
                div { class: "grid-status", "Loading rows..." }
            }
            div { class: "grid-footer",
                button {
                    class: "btn btn-sm",
                    disabled: page <= 1,
                    onclick: move |_| go_to_page(page.saturating_sub(1)),
                    "Previous"
                }
                span { class: "grid-footer__page", "Page {page}" }
                button {
                    class: "btn btn-sm",
                    disabled: !has_next,
                    onclick: move |_| go_to_page(page + 1),
                    "Next"
                }
                select {
                    class: "grid-footer__page-size",
                    onchange: set_page_size,
                    for size in page_size_options(rows_per_page) {
                        option { key: "{size}", value: "{size}", selected: size == rows_per_page, "{size} rows" }
                    }
                }
            }
        }
    }
}
