#![allow(non_snake_case)]
use dioxus::prelude::*;

use crate::state::{NotificationCategory, NotificationQueue};

fn category_class(category: NotificationCategory) -> &'static str {
    match category {
        NotificationCategory::Info => "toast toast--info",
        NotificationCategory::Success => "toast toast--success",
        NotificationCategory::Error => "toast toast--error",
    }
}

#[component]
pub fn Toasts() -> Element {
    let mut queue = use_context::<Signal<NotificationQueue>>();

    let items: Vec<(u64, &'static str, String, String)> = queue
        .read()
        .iter()
        .map(|(id, n)| {
            let time = n.created_at.format("%H:%M:%S").to_string();
            (*id, category_class(n.category), time, n.message.clone())
        })
        .collect();

    rsx! {
        div { class: "toasts",
            for (id, class, time, message) in items {
                div { key: "{id}", class: "{class}",
                    span { class: "toast__time", "{time}" }
                    span { class: "toast__message", "{message}" }
                    button {
                        class: "btn-ghost btn-sm",
                        title: "Dismiss",
                        onclick: move |_| queue.write().dismiss(id),
                        "×"
                    }
                }
            }
        }
    }
}
