use dioxus::prelude::*;

/// Pulsing inline placeholder shown while data loads.
#[component]
pub fn Skeleton(
    #[props(default = "6rem".to_string())] width: String,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "skeleton", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        span {
            "aria-hidden": "true",
            style: "width: {width}",
            ..merged,
        }
    }
}
