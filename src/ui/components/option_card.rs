use dioxus::prelude::*;

use crate::ui::theme;

/// Clickable card used for every choice in the quote flow. Empty strings hide the
/// matching line.
#[component]
pub fn OptionCard(
    title: String,
    #[props(default)] emoji: String,
    #[props(default)] description: String,
    #[props(default)] badge: String,
    #[props(default)] badge_class: String,
    #[props(default)] note: String,
    selected: bool,
    #[props(default)] locked: bool,
    #[props(default)] show_checkbox: bool,
    on_select: EventHandler<()>,
) -> Element {
    let class = theme::option_card(selected, locked);
    let checkbox = if show_checkbox {
        format!("{} ", theme::checkbox(selected || locked))
    } else {
        String::new()
    };
    let badge_class = if badge_class.is_empty() {
        "price-tag".to_string()
    } else {
        badge_class
    };

    rsx! {
        button {
            class: "{class}",
            disabled: locked,
            onclick: move |_| {
                if !locked {
                    on_select.call(());
                }
            },
            if !emoji.is_empty() {
                div { class: "emoji", "{emoji}" }
            }
            span { class: "title", "{checkbox}{title}" }
            if !description.is_empty() {
                p { class: "muted", "{description}" }
            }
            if !note.is_empty() {
                div { class: "note", "{note}" }
            }
            if !badge.is_empty() {
                span { class: "{badge_class}", "{badge}" }
            }
        }
    }
}
