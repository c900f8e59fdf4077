use dioxus::prelude::*;

/// Form wrapper that keeps submission on the client.
///
/// A non-empty `error` renders as a banner above the fields.
#[component]
pub fn Form(
    #[props(default)] onsubmit: EventHandler<FormEvent>,
    #[props(default)] error: Option<String>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "form", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        form {
            novalidate: true,
            onsubmit: move |evt| {
                evt.prevent_default();
                onsubmit.call(evt);
            },
            ..merged,
            if let Some(message) = error.filter(|m| !m.is_empty()) {
                div { class: "form-error", role: "alert", "{message}" }
            }
            {children}
        }
    }
}
