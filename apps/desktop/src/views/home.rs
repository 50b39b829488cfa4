use super::Route;
use crate::Backend;
use dioxus::prelude::*;
use trek_catalog::{Destination, DestinationFilter, LoadState, country_options};
use trek_domain::constants::{DEFAULT_BUDGET_MAX, DEFAULT_BUDGET_MIN};

/// Catalog list with search, country and budget filters.
///
/// The collection is fetched once per visit; filtering happens locally on every change.
#[component]
pub fn Home() -> Element {
    let backend = use_context::<Backend>();
    let destinations = use_resource(move || {
        let backend = backend.clone();
        async move { LoadState::from(backend.destinations().await) }
    });

    let mut search = use_signal(String::new);
    let mut country = use_signal(String::new);
    let mut min_budget = use_signal(|| DEFAULT_BUDGET_MIN);
    let mut max_budget = use_signal(|| DEFAULT_BUDGET_MAX);

    let state = destinations.read().clone().unwrap_or_default();
    let all = match state {
        LoadState::Loading => {
            return rsx! { p { class: "status", "Loading destinations..." } };
        }
        LoadState::Failed(message) => {
            return rsx! { p { class: "status error", "Could not load destinations: {message}" } };
        }
        LoadState::Ready(all) => all,
    };

    let options: Vec<String> = country_options(&all).into_iter().map(str::to_owned).collect();
    let visible = DestinationFilter::new()
        .search(search())
        .country(country())
        .budget(min_budget(), max_budget())
        .apply_owned(all);

    rsx! {
        section { class: "home",
            h1 { "Explore destinations" }
            div { class: "filters",
                input {
                    r#type: "search",
                    placeholder: "Search by name",
                    value: "{search}",
                    oninput: move |evt| search.set(evt.value()),
                }
                select {
                    value: "{country}",
                    onchange: move |evt| country.set(evt.value()),
                    option { value: "", "All countries" }
                    for name in options {
                        option { key: "{name}", value: "{name}", "{name}" }
                    }
                }
                label { class: "range",
                    "Min ${min_budget}"
                    input {
                        r#type: "range",
                        min: "{DEFAULT_BUDGET_MIN}",
                        max: "{DEFAULT_BUDGET_MAX}",
                        step: "10",
                        value: "{min_budget}",
                        oninput: move |evt| {
                            if let Ok(value) = evt.value().parse() {
                                min_budget.set(value);
                            }
                        },
                    }
                }
                label { class: "range",
                    "Max ${max_budget}"
                    input {
                        r#type: "range",
                        min: "{DEFAULT_BUDGET_MIN}",
                        max: "{DEFAULT_BUDGET_MAX}",
                        step: "10",
                        value: "{max_budget}",
                        oninput: move |evt| {
                            if let Ok(value) = evt.value().parse() {
                                max_budget.set(value);
                            }
                        },
                    }
                }
            }
            if visible.is_empty() {
                p { class: "status", "No destinations match these filters." }
            }
            div { class: "grid",
                for destination in visible {
                    DestinationCard { key: "{destination.id}", destination }
                }
            }
        }
    }
}

#[component]
fn DestinationCard(destination: Destination) -> Element {
    rsx! {
        Link { class: "card", to: Route::DestinationDetail { id: destination.id.clone() },
            img { src: "{destination.image}", alt: "{destination.name}" }
            div { class: "card-body",
                h3 { "{destination.name}" }
                p { class: "country", "{destination.country}" }
                p { class: "budget", "${destination.budget}" }
            }
        }
    }
}
