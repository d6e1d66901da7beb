use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Kind of project a quote is requested for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Landing,
    Webapp,
    Ecommerce,
    Admin,
    Api,
    Cms,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 6] = [
        ProjectCategory::Landing,
        ProjectCategory::Webapp,
        ProjectCategory::Ecommerce,
        ProjectCategory::Admin,
        ProjectCategory::Api,
        ProjectCategory::Cms,
    ];

    /// Stable key used in config files and locale bundles.
    pub fn key(&self) -> &'static str {
        match self {
            ProjectCategory::Landing => "landing",
            ProjectCategory::Webapp => "webapp",
            ProjectCategory::Ecommerce => "ecommerce",
            ProjectCategory::Admin => "admin",
            ProjectCategory::Api => "api",
            ProjectCategory::Cms => "cms",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ProjectCategory::Landing => "🎯",
            ProjectCategory::Webapp => "💻",
            ProjectCategory::Ecommerce => "🛒",
            ProjectCategory::Admin => "📋",
            ProjectCategory::Api => "🔌",
            ProjectCategory::Cms => "📝",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a string does not name a known category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown project category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ProjectCategory {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        ProjectCategory::ALL
            .into_iter()
            .find(|category| category.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(trimmed.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    Simple,
    #[default]
    Medium,
    Complex,
}

impl ComplexityTier {
    pub const ALL: [ComplexityTier; 3] = [
        ComplexityTier::Simple,
        ComplexityTier::Medium,
        ComplexityTier::Complex,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ComplexityTier::Simple => "simple",
            ComplexityTier::Medium => "medium",
            ComplexityTier::Complex => "complex",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineTier {
    Rush,
    #[default]
    Normal,
    Flexible,
}

impl TimelineTier {
    pub const ALL: [TimelineTier; 3] = [
        TimelineTier::Rush,
        TimelineTier::Normal,
        TimelineTier::Flexible,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TimelineTier::Rush => "rush",
            TimelineTier::Normal => "normal",
            TimelineTier::Flexible => "flexible",
        }
    }
}

/// Key of a feature inside one category's table, e.g. `"dashboard"`.
pub type FeatureKey = String;

/// Global key of an additional service, e.g. `"hosting_setup"`.
pub type ServiceKey = String;

/// One selectable line in a price table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceOption {
    pub key: String,
    pub price: u32,
}

impl PriceOption {
    pub fn new(key: impl Into<String>, price: u32) -> Self {
        Self {
            key: key.into(),
            price,
        }
    }

    /// Zero-priced features ship with every project of the category.
    pub fn is_included(&self) -> bool {
        self.price == 0
    }
}

/// Everything the user has picked so far. Keys are kept in selection order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub category: Option<ProjectCategory>,
    pub features: Vec<FeatureKey>,
    pub complexity: ComplexityTier,
    pub timeline: TimelineTier,
    pub services: Vec<ServiceKey>,
}

impl QuoteRequest {
    pub fn for_category(category: ProjectCategory) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn with_features<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn with_services<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.services.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn with_complexity(mut self, complexity: ComplexityTier) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_timeline(mut self, timeline: TimelineTier) -> Self {
        self.timeline = timeline;
        self
    }
}

/// Price estimate with every intermediate value kept for display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub base_price: u32,
    pub features_price: u32,
    pub services_price: u32,
    pub subtotal: u32,
    pub complexity_factor: f64,
    pub timeline_factor: f64,
    /// `subtotal × complexity × timeline`, before services are added.
    pub scaled: f64,
    pub total: u64,
    pub min: u64,
    pub max: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("WebApp".parse::<ProjectCategory>(), Ok(ProjectCategory::Webapp));
        assert_eq!(" cms ".parse::<ProjectCategory>(), Ok(ProjectCategory::Cms));
        assert_eq!(
            "web-application".parse::<ProjectCategory>(),
            Err(UnknownCategory("web-application".to_string()))
        );
    }

    #[test]
    fn tiers_default_to_medium_and_normal() {
        let request = QuoteRequest::default();
        assert_eq!(request.category, None);
        assert_eq!(request.complexity, ComplexityTier::Medium);
        assert_eq!(request.timeline, TimelineTier::Normal);
    }

    #[test]
    fn category_keys_match_serde_names() {
        for category in ProjectCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.key()));
        }
    }
}
