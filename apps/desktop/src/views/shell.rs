use super::Route;
use crate::Backend;
use dioxus::prelude::*;
use trek_domain::preferences::Preferences;

/// Navigation bar and theme toggle around the active page.
#[component]
pub fn Shell() -> Element {
    let backend = use_context::<Backend>();
    let mut prefs = use_context::<Signal<Preferences>>();

    let toggle = move |_| {
        let next = prefs().toggled();
        prefs.set(next);

        let save = backend.save_preferences(next);
        spawn(async move {
            if let Err(err) = save.await {
                tracing::warn!(error = %err, "Failed to persist preferences");
            }
        });
    };

    let theme = prefs().theme_class();
    let toggle_label = if prefs().dark_mode { "Light mode" } else { "Dark mode" };

    rsx! {
        div { class: "app {theme}",
            nav { class: "nav",
                Link { class: "brand", to: Route::Home {}, "Trek" }
                Link { to: Route::Home {}, "Destinations" }
                Link { to: Route::AdminForm {}, "Add destination" }
                button { class: "theme-toggle", onclick: toggle, "{toggle_label}" }
            }
            main { class: "content", Outlet::<Route> {} }
        }
    }
}
