#![allow(non_snake_case)]
use dioxus::prelude::*;

use crate::state::RefreshToken;

#[component]
pub fn RefreshButton() -> Element {
    let mut refresh = use_context::<Signal<RefreshToken>>();

    rsx! {
        button {
            class: "btn btn-sm",
            title: "Reload rows",
            onclick: move |_| {
                tracing::debug!("Refreshing grid");
                refresh.write().bump();
            },
            "Refresh"
        }
    }
}
