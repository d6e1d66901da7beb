use std::{fmt, path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};

use super::{entities::QuoteResult, pricing::PricingConfig, wizard::QuoteWizard};
use crate::i18n::{Locale, Translator};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "☀️",
            Theme::Dark => "🌙",
        }
    }
}

/// Where the active pricing table was read from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PricingSource {
    #[default]
    Builtin,
    File(PathBuf),
}

impl fmt::Display for PricingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingSource::Builtin => f.write_str("built-in"),
            PricingSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub locale: Locale,
    pub theme: Theme,
    pub pricing: Arc<PricingConfig>,
    pub pricing_source: PricingSource,
    /// The single in-progress quote of this session.
    pub wizard: QuoteWizard,
}

impl AppState {
    pub fn translator(&self) -> Translator {
        Translator::new(self.locale)
    }

    pub fn quote(&self) -> Option<QuoteResult> {
        self.wizard.quote(&self.pricing)
    }

    /// Swaps in a new pricing table and prunes selections it no longer knows.
    /// Returns the number of selections dropped.
    pub fn replace_pricing(&mut self, pricing: PricingConfig, source: PricingSource) -> usize {
        self.pricing = Arc::new(pricing);
        self.pricing_source = source;
        self.wizard.retain_known(&self.pricing)
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.locale = persisted.locale;
        self.theme = persisted.theme;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            locale: self.locale,
            theme: self.theme,
        }
    }
}

/// User preferences that survive restarts. The quote itself is never persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProjectCategory;

    #[test]
    fn preferences_roundtrip_without_quote() {
        let mut state = AppState::default();
        state.locale = Locale::En;
        state.theme = Theme::Light;
        let pricing = state.pricing.clone();
        state
            .wizard
            .choose_category(ProjectCategory::Landing, &pricing);

        let mut restored = AppState::default();
        restored.apply_persisted(state.to_persisted());
        assert_eq!(restored.locale, Locale::En);
        assert_eq!(restored.theme, Theme::Light);
        assert_eq!(restored.wizard.category(), None);
    }

    #[test]
    fn partial_preferences_fall_back_to_defaults() {
        let parsed: PersistedState = serde_json::from_str(r#"{"locale":"en"}"#).unwrap();
        assert_eq!(parsed.locale, Locale::En);
        assert_eq!(parsed.theme, Theme::Dark);
    }

    #[test]
    fn replacing_pricing_reprices_current_quote() {
        let mut state = AppState::default();
        let pricing = state.pricing.clone();
        state
            .wizard
            .choose_category(ProjectCategory::Landing, &pricing);
        assert_eq!(state.quote().map(|q| q.total), Some(350));

        let mut cheaper = PricingConfig::default();
        cheaper.base_prices.insert(ProjectCategory::Landing, 300);
        let dropped = state.replace_pricing(cheaper, PricingSource::File("p.json".into()));

        assert_eq!(dropped, 0);
        assert_eq!(state.quote().map(|q| q.total), Some(300));
        assert_eq!(state.pricing_source.to_string(), "p.json");
    }
}
