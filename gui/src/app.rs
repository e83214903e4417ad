#![allow(non_snake_case)]
use dioxus::prelude::*;
use grid_shared::models::{Filter, Sort};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::components::{GridView, Header, Toasts};
use crate::config::theme::ThemePalette;
use crate::config::AppConfig;
use crate::error::GridError;
use crate::services::{rows_editable, DirectoryDownloads, GrpcRowsClient, RolePermissions};
use crate::state::{BulkActivity, GridServices, GridState, Notification, NotificationQueue, RefreshToken};

/// Wires the engine client, permissions and downloads from config. Mutation failures are
/// forwarded to the notification queue through a channel since the handler must be `Send`.
fn connect_services(config: &AppConfig, mut notifications: Signal<NotificationQueue>) -> Result<GridServices, String> {
    let rows = GrpcRowsClient::connect_lazy(config.engine.endpoint()).map_err(|e| e.to_string())?;
    let permissions = RolePermissions::from_role_name(&config.user.role);
    let downloads = DirectoryDownloads::new(config.downloads.directory.clone());

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    spawn(async move {
        while let Some(message) = rx.recv().await {
            notifications.write().push(Notification::error(message));
        }
    });

    let services = GridServices::new(Arc::new(rows), Arc::new(permissions), Arc::new(downloads))
        .with_error_handler(Arc::new(move |err: &GridError| {
            let _ = tx.send(err.to_string());
        }));
    Ok(services)
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let palette = ThemePalette::by_name(&config.app.theme);
    let notifications = use_context_provider(|| Signal::new(NotificationQueue::default()));
    let services = use_hook(|| connect_services(&config, notifications));
    let theme = palette.css_variables();

    rsx! {
        div { class: "studio", style: "{theme}",
            {match services {
                Ok(services) => rsx! { Studio { services } },
                Err(err) => rsx! {
                    div { class: "grid-status grid-status--error", "Could not configure the engine client: {err}" }
                },
            }}
            Toasts {}
        }
    }
}

#[component]
fn Studio(services: GridServices) -> Element {
    let config = use_context::<AppConfig>();
    let mut notifications = use_context::<Signal<NotificationQueue>>();
    use_context_provider(|| services.clone());
    let editable = rows_editable(config.grid.editable, services.permissions.as_ref());
    use_context_provider(|| Signal::new(GridState::new(config.grid.rows_per_page, editable)));
    let filters = use_context_provider(|| Signal::new(Vec::<Filter>::new()));
    let sorts = use_context_provider(|| Signal::new(Vec::<Sort>::new()));
    use_context_provider(|| Signal::new(RefreshToken::default()));
    use_context_provider(|| Signal::new(BulkActivity::default()));

    let schema = config.grid.schema.clone();
    let name = config.grid.table.clone();
    let api = services.rows.clone();
    let table = use_resource(move || {
        let api = api.clone();
        let schema = schema.clone();
        let name = name.clone();
        async move { api.get_table(&schema, &name).await }
    });

    let qualified = format!("{}.{}", config.grid.schema, config.grid.table);
    let body = match &*table.read() {
        None => rsx! {
            div { class: "grid-status", "Loading {qualified}..." }
        },
        Some(Err(err)) => {
            tracing::error!(table = %qualified, error = %err, "Failed to load table definition");
            rsx! {
                div { class: "grid-status grid-status--error", "Could not load {qualified}: {err}" }
            }
        }
        Some(Ok(table)) => {
            let row_target = qualified.clone();
            let column_target = qualified.clone();
            rsx! {
                Header {
                    table: table.clone(),
                    sorts: sorts(),
                    filters: filters(),
                    on_add_row: move |_| {
                        notifications.write().push(Notification::info(format!("Row editor for {} is not available", row_target)));
                    },
                    on_add_column: move |_| {
                        notifications.write().push(Notification::info(format!("Column editor for {} is not available", column_target)));
                    },
                    span { class: "grid-header__table", "{qualified}" }
                }
                GridView { table: table.clone() }
            }
        }
    };

    rsx! {
        div { class: "studio__grid", {body} }
    }
}
