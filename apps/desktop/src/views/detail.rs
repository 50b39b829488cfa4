use super::Route;
use crate::Backend;
use dioxus::prelude::*;
use trek_catalog::{LoadState, Lookup};

/// Full record view. Re-reads the collection instead of reusing the list.
#[component]
pub fn DestinationDetail(id: String) -> Element {
    let backend = use_context::<Backend>();
    let lookup = use_resource(use_reactive!(|(id,)| {
        let backend = backend.clone();
        async move { LoadState::from(backend.lookup(id).await) }
    }));

    let state = lookup.read().clone().unwrap_or_default();
    let destination = match state {
        LoadState::Loading | LoadState::Ready(Lookup::Pending) => {
            return rsx! { p { class: "status", "Loading..." } };
        }
        LoadState::Failed(message) => {
            return rsx! { p { class: "status error", "Could not load destination: {message}" } };
        }
        LoadState::Ready(Lookup::NotFound) => {
            return rsx! {
                div { class: "status",
                    p { "Destination not found." }
                    Link { to: Route::Home {}, "Back to destinations" }
                }
            };
        }
        LoadState::Ready(Lookup::Found(destination)) => destination,
    };

    let extra: Vec<String> = destination.additional_images().map(str::to_owned).collect();

    rsx! {
        article { class: "detail",
            Link { to: Route::Home {}, "Back to destinations" }
            h1 { "{destination.name}" }
            img { class: "hero", src: "{destination.image}", alt: "{destination.name}" }
            if !extra.is_empty() {
                div { class: "gallery",
                    for src in extra {
                        img { key: "{src}", src: "{src}", alt: "{destination.name}" }
                    }
                }
            }
            p { class: "description", "{destination.description}" }
            dl {
                dt { "Country" }
                dd { "{destination.country}" }
                dt { "Budget" }
                dd { "${destination.budget}" }
            }
        }
    }
}
