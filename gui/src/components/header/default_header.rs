#![allow(non_snake_case)]
use dioxus::prelude::*;
use grid_shared::models::TableDescriptor;

use super::filter_popover::FilterPopover;
use super::refresh_button::RefreshButton;
use super::sort_popover::SortPopover;
use crate::services::{PermissionAction, PermissionCheck};
use crate::state::GridServices;

#[derive(Clone, Copy, PartialEq)]
pub struct InsertHandlers {
    pub on_add_row: Option<EventHandler<()>>,
    pub on_add_column: Option<EventHandler<()>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMenuEntry {
    Row,
    Column,
}

impl InsertMenuEntry {
    pub fn label(self) -> &'static str {
        match self {
            InsertMenuEntry::Row => "Insert row",
            InsertMenuEntry::Column => "Insert column",
        }
    }

    pub fn description(self, table_name: &str) -> String {
        match self {
            InsertMenuEntry::Row => format!("Insert a new row into {}", table_name),
            InsertMenuEntry::Column => format!("Insert a new column into {}", table_name),
        }
    }
}

/// Menu entries for whichever callbacks the caller supplied, rows first.
pub fn insert_menu_entries(has_row_handler: bool, has_column_handler: bool) -> Vec<InsertMenuEntry> {
    [
        has_row_handler.then_some(InsertMenuEntry::Row),
        has_column_handler.then_some(InsertMenuEntry::Column),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Writing columns is the gate for both insert actions.
pub fn shows_insert_menu(entries: &[InsertMenuEntry], permissions: &dyn PermissionCheck) -> bool {
    !entries.is_empty() && permissions.can(PermissionAction::TenantSqlAdminWrite, "columns")
}

#[component]
pub fn DefaultHeader(table: TableDescriptor, insert: InsertHandlers) -> Element {
    let services = use_context::<GridServices>();
    let mut menu_open = use_signal(|| false);

    let entries = insert_menu_entries(insert.on_add_row.is_some(), insert.on_add_column.is_some());
    let can_insert = shows_insert_menu(&entries, services.permissions.as_ref());
    let items: Vec<(InsertMenuEntry, &'static str, String)> = entries
        .iter()
        .map(|entry| (*entry, entry.label(), entry.description(&table.name)))
        .collect();

    rsx! {
        div { class: "grid-header__group",
            RefreshButton {}
            FilterPopover { table: table.clone() }
            SortPopover { table: table.clone() }
        }
        if !entries.is_empty() {
            div { class: "grid-header__separator" }
        }
        if can_insert {
            div { class: "popover",
                button {
                    class: "btn btn-primary btn-sm",
                    onclick: move |_| {
                        let open = menu_open();
                        menu_open.set(!open);
                    },
                    "Insert"
                }
                if menu_open() {
                    div { class: "popover__panel dropdown",
                        for (entry, title, description) in items {
                            button {
                                key: "{title}",
                                class: "dropdown__item",
                                onclick: move |_| {
                                    menu_open.set(false);
                                    let handler = match entry {
                                        InsertMenuEntry::Row => insert.on_add_row,
                                        InsertMenuEntry::Column => insert.on_add_column,
                                    };
                                    if let Some(handler) = handler {
                                        handler.call(());
                                    }
                                },
                                span { class: "dropdown__title", "{title}" }
                                span { class: "dropdown__description", "{description}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
