use crate::Backend;
use dioxus::prelude::*;
use trek_catalog::DestinationDraft;

fn optional(value: String) -> Option<String> {
    Some(value).filter(|v| !v.trim().is_empty())
}

/// Form appending a destination. Reports the assigned id or the rejection reason.
#[component]
pub fn AdminForm() -> Element {
    let backend = use_context::<Backend>();
    let mut draft = use_signal(DestinationDraft::default);
    let mut budget = use_signal(String::new);
    let mut outcome = use_signal(|| None::<Result<String, String>>);
    let mut submitting = use_signal(|| false);

    let submit = move |_| {
        let mut next = draft();
        match budget().trim().parse::<f64>() {
            Ok(value) => next.budget = value,
            Err(_) => {
                outcome.set(Some(Err("Budget must be a number".to_owned())));
                return;
            }
        }

        let backend = backend.clone();
        submitting.set(true);
        spawn(async move {
            let result = backend.submit(next).await;
            if result.is_ok() {
                draft.set(DestinationDraft::default());
                budget.set(String::new());
            }
            outcome.set(Some(result.map_err(|err| err.to_string())));
            submitting.set(false);
        });
    };

    let current = draft();
    let report = match outcome() {
        Some(Ok(id)) => rsx! { p { class: "status ok", "Destination added with id {id}" } },
        Some(Err(message)) => rsx! { p { class: "status error", "{message}" } },
        None => rsx! {},
    };

    rsx! {
        section { class: "admin",
            h1 { "Add a destination" }
            div { class: "form",
                label { "Name"
                    input { value: "{current.name}", oninput: move |evt| draft.write().name = evt.value() }
                }
                label { "Country"
                    input { value: "{current.country}", oninput: move |evt| draft.write().country = evt.value() }
                }
                label { "Budget"
                    input { r#type: "number", min: "0", value: "{budget}", oninput: move |evt| budget.set(evt.value()) }
                }
                label { "Image URL"
                    input { value: "{current.image}", oninput: move |evt| draft.write().image = evt.value() }
                }
                label { "Additional image 1"
                    input {
                        value: current.additional_image1.clone().unwrap_or_default(),
                        oninput: move |evt| draft.write().additional_image1 = optional(evt.value()),
                    }
                }
                label { "Additional image 2"
                    input {
                        value: current.additional_image2.clone().unwrap_or_default(),
                        oninput: move |evt| draft.write().additional_image2 = optional(evt.value()),
                    }
                }
                label { "Description"
                    textarea { value: "{current.description}", oninput: move |evt| draft.write().description = evt.value() }
                }
                button { disabled: submitting(), onclick: submit, "Add destination" }
            }
            {report}
        }
    }
}
