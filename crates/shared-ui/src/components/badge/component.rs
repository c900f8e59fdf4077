use dioxus::prelude::*;

/// Colour of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BadgeTone {
    #[default]
    Neutral,
    Success,
    Info,
    Accent,
    Warning,
}

impl BadgeTone {
    fn class(&self) -> &'static str {
        match self {
            BadgeTone::Neutral => "neutral",
            BadgeTone::Success => "success",
            BadgeTone::Info => "info",
            BadgeTone::Accent => "accent",
            BadgeTone::Warning => "warning",
        }
    }

    /// Tone for an activity status label.
    pub fn for_status(status: &str) -> Self {
        match status {
            "완료" | "정산" => BadgeTone::Success,
            "접수" | "배차" | "픽업" => BadgeTone::Info,
            "리뷰" | "혜택" => BadgeTone::Accent,
            "거절" => BadgeTone::Warning,
            _ => BadgeTone::Neutral,
        }
    }
}

/// Small pill for inline statuses.
#[component]
pub fn Badge(
    #[props(default)] tone: BadgeTone,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![
        Attribute::new("class", "badge", None, false),
        Attribute::new("data-tone", tone.class(), None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        span {
            ..merged,
            {children}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tones() {
        assert_eq!(BadgeTone::for_status("완료"), BadgeTone::Success);
        assert_eq!(BadgeTone::for_status("접수"), BadgeTone::Info);
        assert_eq!(BadgeTone::for_status("혜택"), BadgeTone::Accent);
        assert_eq!(BadgeTone::for_status("거절"), BadgeTone::Warning);
        assert_eq!(BadgeTone::for_status("기타"), BadgeTone::Neutral);
    }
}
