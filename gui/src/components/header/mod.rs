// Grid toolbar. Switches between the default controls and the bulk-selection actions.
use dioxus::prelude::*;
use grid_shared::models::{Filter, Sort, TableDescriptor};

use crate::state::{GridAction, GridState};

pub mod default_header;
pub mod filter_popover;
pub mod refresh_button;
pub mod row_actions;
pub mod row_header;
pub mod sort_popover;

pub use default_header::{DefaultHeader, InsertHandlers};
pub use row_header::RowHeader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    Default,
    RowSelection,
}

impl HeaderMode {
    pub fn for_state(state: &GridState) -> Self {
        if state.has_selection() {
            HeaderMode::RowSelection
        } else {
            HeaderMode::Default
        }
    }
}

/// Query criteria changed: back to the first page with nothing selected.
pub(crate) fn restart_paging(mut grid: Signal<GridState>) {
    let mut state = grid.write();
    state.apply(GridAction::clear_selection());
    state.apply(GridAction::SetPage(1));
}

/// Toolbar above the grid. Extra actions passed as children render after the controls.
#[component]
pub fn Header(
    table: TableDescriptor,
    sorts: Vec<Sort>,
    filters: Vec<Filter>,
    on_add_row: Option<EventHandler<()>>,
    on_add_column: Option<EventHandler<()>>,
    #[props(default)] children: Element,
) -> Element {
    let grid = use_context::<Signal<GridState>>();
    let mode = HeaderMode::for_state(&grid.read());
    let insert = InsertHandlers { on_add_row, on_add_column };

    rsx! {
        div { class: "grid-header",
            div { class: "grid-header__bar",
                if mode == HeaderMode::RowSelection {
                    RowHeader { table: table.clone(), sorts: sorts.clone(), filters: filters.clone() }
                } else {
                    DefaultHeader { table: table.clone(), insert }
                }
            }
            div { class: "grid-header__extra", {children} }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_shared::models::Row;
    use serde_json::Map;

    #[test]
    fn test_mode_follows_selection() {
        let mut state = GridState::default();
        assert_eq!(HeaderMode::for_state(&state), HeaderMode::Default);

        state.apply(GridAction::SetRows(vec![Row::new(0, Map::new())]));
        state.apply(GridAction::SelectedRowsChange { selected_rows: [0].into_iter().collect() });
        assert_eq!(HeaderMode::for_state(&state), HeaderMode::RowSelection);

        state.apply(GridAction::clear_selection());
        assert_eq!(HeaderMode::for_state(&state), HeaderMode::Default);
    }
}
