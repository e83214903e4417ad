#![allow(non_snake_case)]
use dioxus::prelude::*;
use grid_shared::models::{Filter, FilterOperator, TableDescriptor};

use super::restart_paging;
use crate::state::GridState;

pub fn filter_button_label(count: usize) -> String {
    match count {
        0 => "Filter".to_string(),
        1 => "Filtered by 1 rule".to_string(),
        n => format!("Filtered by {} rules", n),
    }
}

/// Edits the active filter rules held in context.
#[component]
pub fn FilterPopover(table: TableDescriptor) -> Element {
    let mut filters = use_context::<Signal<Vec<Filter>>>();
    let grid = use_context::<Signal<GridState>>();
    let mut open = use_signal(|| false);

    let first_column = table.columns.first().map(|c| c.name.clone()).unwrap_or_default();
    let mut column = use_signal(move || first_column);
    let mut operator = use_signal(|| FilterOperator::Equal);
    let mut value = use_signal(String::new);

    let label = filter_button_label(filters.read().len());
    let rules: Vec<(usize, String)> = filters
        .read()
        .iter()
        .enumerate()
        .map(|(i, f)| (i, format!("{} {} {}", f.column, f.operator, f.value)))
        .collect();
    let column_names: Vec<String> = table.columns.iter().map(|c| c.name.clone()).collect();
    let symbols: Vec<&'static str> = FilterOperator::ALL.iter().map(|op| op.as_str()).collect();

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
                        p { class: "popover__empty", "No filters applied to this view" }
                    }
                    for (i, text) in rules {
                        div { key: "{i}", class: "popover__rule",
                            code { "{text}" }
                            button {
                                class: "btn-ghost btn-sm",
                                title: "Remove filter",
                                onclick: move |_| {
                                    filters.write().remove(i);
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
                        select {
                            value: "{operator}",
                            onchange: move |evt| {
                                if let Ok(op) = evt.value().parse::<FilterOperator>() {
                                    operator.set(op);
                                }
                            },
                            for symbol in symbols {
                                option { key: "{symbol}", value: "{symbol}", "{symbol}" }
                            }
                        }
                        input {
                            r#type: "text",
                            placeholder: "Value",
                            value: "{value}",
                            oninput: move |evt| value.set(evt.value()),
                        }
                        button {
                            class: "btn btn-primary btn-sm",
                            disabled: column.read().is_empty(),
                            onclick: move |_| {
                                let rule = Filter::new(&column.read(), operator(), &value.read());
                                tracing::debug!(?rule, "Adding filter");
                                filters.write().push(rule);
                                value.set(String::new());
                                restart_paging(grid);
                            },
                            "Apply filter"
                        }
                    }
                }
            }
        }
    }
}
