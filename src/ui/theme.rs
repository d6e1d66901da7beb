//! Class helpers so pages share one look per theme and selection state.

use crate::domain::Theme;

pub fn root_class(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "app theme-light",
        Theme::Dark => "app theme-dark",
    }
}

pub fn nav_button(active: bool) -> &'static str {
    if active {
        "btn btn-active"
    } else {
        "btn"
    }
}

/// Selectable card. Locked cards are always on and ignore clicks.
pub fn option_card(selected: bool, locked: bool) -> &'static str {
    match (selected || locked, locked) {
        (true, true) => "option-card selected locked",
        (true, false) => "option-card selected",
        (false, _) => "option-card",
    }
}

pub fn price_tag(price: u32) -> &'static str {
    if price == 0 {
        "price-tag included"
    } else {
        "price-tag"
    }
}

pub fn checkbox(checked: bool) -> &'static str {
    if checked {
        "☑"
    } else {
        "☐"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_cards_render_selected() {
        assert_eq!(option_card(false, true), "option-card selected locked");
        assert_eq!(option_card(true, false), "option-card selected");
        assert_eq!(option_card(false, false), "option-card");
    }
}
