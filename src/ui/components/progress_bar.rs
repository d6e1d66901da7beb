use dioxus::prelude::*;

#[component]
pub fn ProgressBar(label: String, percent: u8) -> Element {
    rsx! {
        div {
            div { class: "progress-meta",
                span { "{label}" }
                span { "{percent}%" }
            }
            div { class: "progress",
                div { class: "progress-bar", style: "width: {percent}%" }
            }
        }
    }
}
