#![allow(non_snake_case)]
use dioxus::prelude::*;
use grid_shared::models::{Sort, TableDescriptor};

use super::restart_paging;
use crate::state::GridState;

pub fn sort_button_label(count: usize) -> String {
    match count {
        0 => "Sort".to_string(),
        1 => "Sorted by 1 rule".to_string(),
        n => format!("Sorted by {} rules", n),
    }
}

/// Adds a sort on `column`, or flips its direction if the column is already sorted.
pub fn toggle_sort(sorts: &mut Vec<Sort>, column: &str) {
    match sorts.iter_mut().find(|s| s.column == column) {
        Some(existing) => existing.ascending = !existing.ascending,
        None => sorts.push(Sort::asc(column)),
    }
}

#[component]
pub fn SortPopover(table: TableDescriptor) -> Element {
    let mut sorts = use_context::<Signal<Vec<Sort>>>();
    let grid = use_context::<Signal<GridState>>();
    let mut open = use_signal(|| false);

    let first_column = table.columns.first().map(|c| c.name.clone()).unwrap_or_default();
    let mut column = use_signal(move || first_column);

    let label = sort_button_label(sorts.read().len());
    let rules: Vec<(usize, String, String, &'static str)> = sorts
        .read()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let direction = if s.ascending { "ascending" } else { "descending" };
            (i, s.column.clone(), s.column.clone(), direction)
        })
        .collect();
    let column_names: Vec<String> = table.columns.iter().map(|c| c.name.clone()).collect();

    rsx! {
        div { class: "popover",
            button {
                class: "btn btn-sm",
                onclick: move |_| {
                    let is_open = open();
                    open.set(!is_open);
                },
                "{label}"
            }
            if open() {
                div { class: "popover__panel",
                    if rules.is_empty() {
                        p { class: "popover__empty", "No sorts applied to this view" }
                    }
                    for (i, label, name, direction) in rules {
                        div { key: "{i}", class: "popover__rule",
                            code { "{label}" }
                            button {
                                class: "btn-ghost btn-sm",
                                onclick: move |_| {
                                    toggle_sort(&mut sorts.write(), &name);
                                    restart_paging(grid);
                                },
                                "{direction}"
                            }
                            button {
                                class: "btn-ghost btn-sm",
                                title: "Remove sort",
                                onclick: move |_| {
                                    sorts.write().remove(i);
                                    restart_paging(grid);
                                },
                                "×"
                            }
                        }
                    }
                    div { class: "popover__form",
                        select {
                            value: "{column}",
                            onchange: move |evt| column.set(evt.value()),
                            for name in column_names {
                                option { key: "{name}", value: "{name}", "{name}" }
                            }
                        }
                        button {
                            class: "btn btn-primary btn-sm",
                            disabled: column.read().is_empty(),
                            onclick: move |_| {
                                toggle_sort(&mut sorts.write(), &column.read());
                                restart_paging(grid);
                            },
                            "Add sort"
                        }
                    }
                }
            }
        }
    }
}
