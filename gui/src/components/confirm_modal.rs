#![allow(non_snake_case)]
use dioxus::prelude::*;

use crate::components::header::row_actions::ConfirmPrompt;

/// Destructive-action confirmation. While `busy`, both buttons are disabled.
#[component]
pub fn ConfirmModal(
    prompt: ConfirmPrompt,
    #[props(default)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal",
                h3 { class: "modal__title", "{prompt.title}" }
                p { class: "modal__message", "{prompt.message}" }
                div { class: "modal__actions",
                    button {
                        class: "btn btn-sm",
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-danger btn-sm",
                        disabled: busy,
                        onclick: move |_| on_confirm.call(()),
                        if busy { "Deleting..." } else { "{prompt.confirm_text}" }
                    }
                }
            }
        }
    }
}
