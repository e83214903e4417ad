#![allow(non_snake_case)]
use dioxus::prelude::*;
use grid_shared::models::{Filter, Sort, TableDescriptor};

use super::row_actions::{delete_rows, export_rows, selection_total, GridHost, RowSelection};
use crate::components::confirm_modal::ConfirmModal;
use crate::state::{
    BulkActivity, Dispatch, GridAction, GridServices, GridState, Notification, NotificationQueue, RefreshToken,
};

/// Routes bulk-action effects into the app's signals. Every signal here is owned above the
/// toolbar, so a running action can still write to them after the toolbar unmounts.
#[derive(Clone, Copy)]
struct SignalHost {
    grid: Signal<GridState>,
    notifications: Signal<NotificationQueue>,
    activity: Signal<BulkActivity>,
}

impl Dispatch for SignalHost {
    fn dispatch(&mut self, action: GridAction) {
        self.grid.write().apply(action);
    }
}

impl GridHost for SignalHost {
    fn notify(&mut self, notification: Notification) {
        self.notifications.write().push(notification);
    }

    fn is_exporting(&self) -> bool {
        self.activity.peek().exporting
    }

    fn set_exporting(&mut self, exporting: bool) {
        self.activity.write().exporting = exporting;
    }
}

/// Toolbar shown while rows are selected: selection summary, select-all, CSV export and delete.
#[component]
pub fn RowHeader(table: TableDescriptor, sorts: Vec<Sort>, filters: Vec<Filter>) -> Element {
    let services = use_context::<GridServices>();
    let mut grid = use_context::<Signal<GridState>>();
    let notifications = use_context::<Signal<NotificationQueue>>();
    let mut refresh = use_context::<Signal<RefreshToken>>();
    let mut activity = use_context::<Signal<BulkActivity>>();

    let count_api = services.rows.clone();
    let count_table = table.clone();
    let total_rows = use_resource(use_reactive((&filters,), move |(filters,)| {
        let api = count_api.clone();
        let table = count_table.clone();
        let _token = refresh();
        async move { selection_total(api.as_ref(), &table, &filters).await }
    }));
    let total = (*total_rows.read()).unwrap_or(0);

    let selection = RowSelection::from_state(&table, &sorts, &filters, &grid.read(), total);
    let editable = grid.read().editable;
    let summary = selection.summary_label();
    let delete_label = selection.delete_label();
    let can_select_all = selection.can_select_all();
    let select_all_label = selection.select_all_label();
    let select_all_action = selection.select_all_action();
    let prompt = selection.confirm_prompt();
    let current = activity();
    let show_confirm = current.shows_confirm();
    let BulkActivity { exporting, deleting, .. } = current;

    let host = SignalHost { grid, notifications, activity };

    // Both actions run outside this component's scope: clearing the selection mid-flight
    // unmounts the toolbar but must not cancel them.
    let export_selection = selection.clone();
    let export_services = services.clone();
    let on_export = move |_: MouseEvent| {
        let selection = export_selection.clone();
        let services = export_services.clone();
        let mut host = host;
        spawn_forever(async move {
            export_rows(&selection, services.rows.as_ref(), services.downloads.as_ref(), &mut host).await;
        });
    };

    let on_confirm_delete = move |_: ()| {
        let selection = selection.clone();
        let services = services.clone();
        let mut host = host;
        activity.write().start_delete();
        spawn_forever(async move {
            let outcome = delete_rows(&selection, services.rows.as_ref(), services.on_error.as_ref(), &mut host).await;
            activity.write().finish_delete();
            if outcome.succeeded() {
                refresh.write().bump();
            }
        });
    };

    rsx! {
        div { class: "grid-header__group",
            button {
                class: "btn-ghost btn-icon btn-sm",
                title: "Clear selection",
                onclick: move |_| grid.write().apply(GridAction::clear_selection()),
                "×"
            }
            span { class: "grid-header__summary", "{summary}" }
            if can_select_all {
                button {
                    class: "btn-link btn-sm",
                    onclick: move |_| grid.write().apply(select_all_action.clone()),
                    "{select_all_label}"
                }
            }
        }
        div { class: "grid-header__group",
            button {
                class: "btn btn-sm",
                disabled: exporting,
                onclick: on_export,
                if exporting { "Exporting..." } else { "Export to CSV" }
            }
            if editable {
                button {
                    class: "btn btn-danger btn-sm",
                    onclick: move |_| activity.write().confirming = true,
                    "{delete_label}"
                }
            }
        }
        if show_confirm {
            ConfirmModal {
                prompt,
                busy: deleting,
                on_confirm: on_confirm_delete,
                on_cancel: move |_| activity.write().cancel_confirm(),
            }
        }
    }
}
