//! Quote pricing: the price table and the calculation over it.
//!
//! The calculation is total. A missing category prices at zero and keys that are not in
//! the table contribute nothing, so a stale selection degrades to a smaller quote rather
//! than an error.

use std::{collections::BTreeMap, sync::OnceLock};

use serde::{Deserialize, Serialize};

use super::entities::{
    ComplexityTier, FeatureKey, PriceOption, ProjectCategory, QuoteRequest, QuoteResult,
    TimelineTier,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMultipliers {
    pub simple: f64,
    pub medium: f64,
    pub complex: f64,
}

impl ComplexityMultipliers {
    pub fn factor(&self, tier: ComplexityTier) -> f64 {
        match tier {
            ComplexityTier::Simple => self.simple,
            ComplexityTier::Medium => self.medium,
            ComplexityTier::Complex => self.complex,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineMultipliers {
    pub rush: f64,
    pub normal: f64,
    pub flexible: f64,
}

impl TimelineMultipliers {
    pub fn factor(&self, tier: TimelineTier) -> f64 {
        match tier {
            TimelineTier::Rush => self.rush,
            TimelineTier::Normal => self.normal,
            TimelineTier::Flexible => self.flexible,
        }
    }
}

/// Spread of the quoted range around the computed total.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min_multiplier: f64,
    pub max_multiplier: f64,
}

/// Read-only price table. All prices are whole USD.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Phone number (digits only) that shared quotes are addressed to.
    #[serde(default)]
    pub contact_phone: String,
    pub base_prices: BTreeMap<ProjectCategory, u32>,
    /// Per-category feature tables, in display order.
    pub features: BTreeMap<ProjectCategory, Vec<PriceOption>>,
    pub additional_services: Vec<PriceOption>,
    pub complexity_multipliers: ComplexityMultipliers,
    pub timeline_multipliers: TimelineMultipliers,
    pub price_range: PriceRange,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("invalid pricing table: {0}")]
pub struct InvalidPricing(pub String);

impl PricingConfig {
    /// Starting price of a category, zero when the table has no entry for it.
    pub fn base_price(&self, category: ProjectCategory) -> u32 {
        self.base_prices.get(&category).copied().unwrap_or(0)
    }

    /// Feature table of a category in display order. Empty for unknown categories.
    pub fn features(&self, category: ProjectCategory) -> &[PriceOption] {
        self.features
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Zero-priced features, selected as soon as the category is chosen.
    pub fn mandatory_features(&self, category: ProjectCategory) -> Vec<FeatureKey> {
        self.features(category)
            .iter()
            .filter(|option| option.is_included())
            .map(|option| option.key.clone())
            .collect()
    }

    pub fn feature(&self, category: ProjectCategory, key: &str) -> Option<&PriceOption> {
        self.features(category).iter().find(|option| option.key == key)
    }

    pub fn feature_price(&self, category: ProjectCategory, key: &str) -> u32 {
        self.feature(category, key)
            .map(|option| option.price)
            .unwrap_or(0)
    }

    pub fn is_mandatory(&self, category: ProjectCategory, key: &str) -> bool {
        self.feature(category, key)
            .map(PriceOption::is_included)
            .unwrap_or(false)
    }

    pub fn services(&self) -> &[PriceOption] {
        &self.additional_services
    }

    pub fn service(&self, key: &str) -> Option<&PriceOption> {
        self.additional_services
            .iter()
            .find(|option| option.key == key)
    }

    pub fn service_price(&self, key: &str) -> u32 {
        self.service(key).map(|option| option.price).unwrap_or(0)
    }

    /// Prices a request. Multipliers scale base + features only; services are added
    /// afterwards. `min`/`max` are rounded from the unrounded total, not from `total`.
    pub fn calculate(&self, request: &QuoteRequest) -> QuoteResult {
        let base_price = request
            .category
            .map(|category| self.base_price(category))
            .unwrap_or(0);

        let features_price = match request.category {
            Some(category) => request
                .features
                .iter()
                .map(|key| self.feature_price(category, key))
                .fold(0_u32, u32::saturating_add),
            None => 0,
        };

        let services_price = request
            .services
            .iter()
            .map(|key| self.service_price(key))
            .fold(0_u32, u32::saturating_add);

        let subtotal = base_price.saturating_add(features_price);
        let complexity_factor = self.complexity_multipliers.factor(request.complexity);
        let timeline_factor = self.timeline_multipliers.factor(request.timeline);

        let scaled = f64::from(subtotal) * complexity_factor * timeline_factor;
        let unrounded = scaled + f64::from(services_price);

        QuoteResult {
            base_price,
            features_price,
            services_price,
            subtotal,
            complexity_factor,
            timeline_factor,
            scaled,
            total: round_money(unrounded),
            min: round_money(unrounded * self.price_range.min_multiplier),
            max: round_money(unrounded * self.price_range.max_multiplier),
        }
    }

    /// Checks the invariants the calculation relies on for a sensible range.
    pub fn validate(&self) -> Result<(), InvalidPricing> {
        let factors = [
            ("complexity.simple", self.complexity_multipliers.simple),
            ("complexity.medium", self.complexity_multipliers.medium),
            ("complexity.complex", self.complexity_multipliers.complex),
            ("timeline.rush", self.timeline_multipliers.rush),
            ("timeline.normal", self.timeline_multipliers.normal),
            ("timeline.flexible", self.timeline_multipliers.flexible),
            ("range.min", self.price_range.min_multiplier),
            ("range.max", self.price_range.max_multiplier),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value <= 0.0 {
                return Err(InvalidPricing(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        let complexity = &self.complexity_multipliers;
        if !(complexity.simple <= complexity.medium && complexity.medium <= complexity.complex) {
            return Err(InvalidPricing(
                "complexity multipliers must satisfy simple <= medium <= complex".to_string(),
            ));
        }

        let timeline = &self.timeline_multipliers;
        if !(timeline.flexible <= timeline.normal && timeline.normal <= timeline.rush) {
            return Err(InvalidPricing(
                "timeline multipliers must satisfy flexible <= normal <= rush".to_string(),
            ));
        }

        if self.price_range.min_multiplier > 1.0 || self.price_range.max_multiplier < 1.0 {
            return Err(InvalidPricing(
                "price range must satisfy min <= 1 <= max".to_string(),
            ));
        }

        for (category, options) in &self.features {
            if let Some(duplicate) = first_duplicate(options) {
                return Err(InvalidPricing(format!(
                    "feature '{duplicate}' listed twice for {category}"
                )));
            }
        }
        if let Some(duplicate) = first_duplicate(&self.additional_services) {
            return Err(InvalidPricing(format!(
                "service '{duplicate}' listed twice"
            )));
        }

        Ok(())
    }
}

fn first_duplicate(options: &[PriceOption]) -> Option<&str> {
    options.iter().enumerate().find_map(|(idx, option)| {
        options[..idx]
            .iter()
            .any(|earlier| earlier.key == option.key)
            .then_some(option.key.as_str())
    })
}

/// Rounds half away from zero and clamps to the non-negative range.
fn round_money(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

fn options(entries: &[(&str, u32)]) -> Vec<PriceOption> {
    entries
        .iter()
        .map(|(key, price)| PriceOption::new(*key, *price))
        .collect()
}

impl Default for PricingConfig {
    fn default() -> Self {
        let base_prices = BTreeMap::from([
            (ProjectCategory::Landing, 350),
            (ProjectCategory::Webapp, 1500),
            (ProjectCategory::Ecommerce, 1800),
            (ProjectCategory::Admin, 1200),
            (ProjectCategory::Api, 600),
            (ProjectCategory::Cms, 900),
        ]);

        let features = BTreeMap::from([
            (
                ProjectCategory::Landing,
                options(&[
                    ("responsive", 0),
                    ("seo", 100),
                    ("analytics", 50),
                    ("forms", 75),
                    ("animations", 150),
                    ("cms", 200),
                ]),
            ),
            (
                ProjectCategory::Webapp,
                options(&[
                    ("responsive", 0),
                    ("auth", 250),
                    ("dashboard", 400),
                    ("database", 200),
                    ("api", 250),
                    ("realtime", 450),
                ]),
            ),
            (
                ProjectCategory::Ecommerce,
                options(&[
                    ("responsive", 0),
                    ("cart", 200),
                    ("payments", 300),
                    ("inventory", 250),
                    ("orders", 200),
                    ("admin", 350),
                ]),
            ),
            (
                ProjectCategory::Admin,
                options(&[
                    ("responsive", 0),
                    ("database", 0),
                    ("auth", 0),
                    ("dashboard", 200),
                    ("users", 300),
                    ("reports", 400),
                    ("notifications", 250),
                    ("audit", 300),
                    ("inventory", 400),
                    ("security", 350),
                    ("api", 300),
                    ("backup", 250),
                    ("roles", 350),
                ]),
            ),
            (
                ProjectCategory::Api,
                options(&[
                    ("rest", 0),
                    ("security", 150),
                    ("database", 200),
                    ("docs", 100),
                    ("backup", 200),
                    ("monitoring", 150),
                ]),
            ),
            (
                ProjectCategory::Cms,
                options(&[
                    ("responsive", 0),
                    ("blog", 0),
                    ("auth", 0),
                    ("editor", 200),
                    ("seo", 150),
                    ("themes", 300),
                    ("media", 200),
                    ("plugins", 400),
                    ("comments", 150),
                    ("multilang", 350),
                    ("users", 250),
                    ("analytics", 200),
                    ("backup", 300),
                ]),
            ),
        ]);

        Self {
            currency_symbol: default_currency_symbol(),
            contact_phone: "50376592632".to_string(),
            base_prices,
            features,
            additional_services: options(&[
                ("domain_setup", 30),
                ("hosting_setup", 50),
                ("server_config", 120),
                ("ssl_certificate", 25),
                ("email_setup", 40),
                ("technical_support", 150),
                ("maintenance", 200),
                ("seo_audit", 100),
                ("documentation", 80),
                ("backup_setup", 60),
            ]),
            complexity_multipliers: ComplexityMultipliers {
                simple: 0.8,
                medium: 1.0,
                complex: 1.5,
            },
            timeline_multipliers: TimelineMultipliers {
                rush: 1.6,
                normal: 1.0,
                flexible: 0.85,
            },
            price_range: PriceRange {
                min_multiplier: 0.9,
                max_multiplier: 1.2,
            },
        }
    }
}

static BUILTIN: OnceLock<PricingConfig> = OnceLock::new();

/// The table compiled into the binary.
pub fn builtin() -> &'static PricingConfig {
    BUILTIN.get_or_init(PricingConfig::default)
}

/// Feature table of `category` in the built-in pricing.
pub fn project_features(category: ProjectCategory) -> &'static [PriceOption] {
    builtin().features(category)
}

/// Prices `request` against the built-in pricing.
pub fn calculate_project_price(request: &QuoteRequest) -> QuoteResult {
    builtin().calculate(request)
}

/// "Starting at" price of `category` in the built-in pricing.
pub fn project_base_price(category: ProjectCategory) -> u32 {
    builtin().base_price(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn landing_without_extras_prices_at_base() {
        let request = QuoteRequest::for_category(ProjectCategory::Landing);
        let result = calculate_project_price(&request);

        assert_eq!(result.base_price, 350);
        assert_eq!(result.features_price, 0);
        assert_eq!(result.services_price, 0);
        assert_eq!(result.total, 350);
        assert_eq!(result.min, 315);
        assert_eq!(result.max, 420);
    }

    #[test]
    fn complex_rush_webapp_scales_before_services() {
        let request = QuoteRequest::for_category(ProjectCategory::Webapp)
            .with_features(["dashboard", "realtime"])
            .with_complexity(ComplexityTier::Complex)
            .with_timeline(TimelineTier::Rush)
            .with_services(["hosting_setup"]);
        let result = calculate_project_price(&request);

        assert_eq!(result.base_price, 1500);
        assert_eq!(result.features_price, 850);
        assert_eq!(result.subtotal, 2350);
        assert!(approx(result.complexity_factor, 1.5));
        assert!(approx(result.timeline_factor, 1.6));
        assert!(approx(result.scaled, 5640.0));
        assert_eq!(result.services_price, 50);
        assert_eq!(result.total, 5690);
        assert_eq!(result.min, 5121);
        assert_eq!(result.max, 6828);
    }

    #[test]
    fn base_price_matches_table_for_every_category() {
        let table = builtin();
        for category in ProjectCategory::ALL {
            assert_eq!(project_base_price(category), table.base_prices[&category]);
        }
    }

    #[test]
    fn missing_category_is_an_empty_quote() {
        let request = QuoteRequest::default()
            .with_features(["dashboard"])
            .with_timeline(TimelineTier::Rush);
        let result = calculate_project_price(&request);

        assert_eq!(result.base_price, 0);
        assert_eq!(result.features_price, 0);
        assert_eq!(result.total, 0);
        assert_eq!(result.min, 0);
        assert_eq!(result.max, 0);
    }

    #[test]
    fn category_absent_from_table_prices_at_zero() {
        let mut config = PricingConfig::default();
        config.base_prices.remove(&ProjectCategory::Api);
        config.features.remove(&ProjectCategory::Api);

        let request = QuoteRequest::for_category(ProjectCategory::Api).with_features(["docs"]);
        let result = config.calculate(&request);

        assert_eq!(result.base_price, 0);
        assert_eq!(result.features_price, 0);
        assert!(config.features(ProjectCategory::Api).is_empty());
    }

    #[test]
    fn unknown_keys_contribute_nothing() {
        let plain = QuoteRequest::for_category(ProjectCategory::Landing).with_features(["seo"]);
        let noisy = plain
            .clone()
            .with_features(["hologram", "realtime"])
            .with_services(["moon_hosting"]);

        let plain_result = calculate_project_price(&plain);
        let noisy_result = calculate_project_price(&noisy);

        assert_eq!(noisy_result.features_price, 100);
        assert_eq!(noisy_result.services_price, 0);
        assert_eq!(plain_result, noisy_result);
    }

    #[test]
    fn services_are_not_scaled() {
        let request = QuoteRequest::for_category(ProjectCategory::Landing)
            .with_complexity(ComplexityTier::Simple)
            .with_timeline(TimelineTier::Flexible)
            .with_services(["maintenance"]);
        let result = calculate_project_price(&request);

        // 350 * 0.8 * 0.85 = 238, plus 200 flat.
        assert_eq!(result.total, 438);
    }

    #[test]
    fn range_is_rounded_from_unrounded_total() {
        let request = QuoteRequest::for_category(ProjectCategory::Landing)
            .with_features(["forms"])
            .with_timeline(TimelineTier::Flexible);
        let result = calculate_project_price(&request);

        // 425 * 0.85 = 361.25 -> total 361, min 325.125 -> 325, max 433.5 -> 434.
        assert_eq!(result.total, 361);
        assert_eq!(result.min, 325);
        assert_eq!(result.max, 434);
    }

    #[test]
    fn mandatory_features_are_the_zero_priced_ones() {
        assert_eq!(
            builtin().mandatory_features(ProjectCategory::Admin),
            vec!["responsive", "database", "auth"]
        );
        assert_eq!(
            builtin().mandatory_features(ProjectCategory::Api),
            vec!["rest"]
        );
        assert!(builtin().is_mandatory(ProjectCategory::Cms, "blog"));
        assert!(!builtin().is_mandatory(ProjectCategory::Cms, "editor"));
        assert!(!builtin().is_mandatory(ProjectCategory::Cms, "nonexistent"));
    }

    #[test]
    fn feature_listing_keeps_table_order() {
        let keys: Vec<_> = project_features(ProjectCategory::Webapp)
            .iter()
            .map(|option| option.key.as_str())
            .collect();
        assert_eq!(
            keys,
            ["responsive", "auth", "dashboard", "database", "api", "realtime"]
        );
    }

    #[test]
    fn builtin_table_is_valid() {
        assert_eq!(builtin().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_inverted_tiers_and_bad_range() {
        let mut config = PricingConfig::default();
        config.timeline_multipliers.rush = 0.5;
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.price_range.min_multiplier = 1.1;
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.complexity_multipliers.simple = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_keys() {
        let mut config = PricingConfig::default();
        config
            .additional_services
            .push(PriceOption::new("hosting_setup", 10));
        let err = config.validate().unwrap_err();
        assert!(err.0.contains("hosting_setup"));
    }

    #[test]
    fn config_survives_json() {
        let config = PricingConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: PricingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    fn request_strategy() -> impl Strategy<Value = QuoteRequest> {
        let category = prop::sample::select(ProjectCategory::ALL.to_vec());
        let complexity = prop::sample::select(ComplexityTier::ALL.to_vec());
        let timeline = prop::sample::select(TimelineTier::ALL.to_vec());
        let service_mask = prop::collection::vec(any::<bool>(), builtin().services().len());
        (category, complexity, timeline, service_mask)
            .prop_flat_map(|(category, complexity, timeline, service_mask)| {
                let feature_count = builtin().features(category).len();
                prop::collection::vec(any::<bool>(), feature_count).prop_map(move |mask| {
                    let features = pick(builtin().features(category), &mask);
                    let services = pick(builtin().services(), &service_mask);
                    QuoteRequest::for_category(category)
                        .with_features(features)
                        .with_services(services)
                        .with_complexity(complexity)
                        .with_timeline(timeline)
                })
            })
    }

    fn pick(options: &[PriceOption], mask: &[bool]) -> Vec<String> {
        options
            .iter()
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .map(|(option, _)| option.key.clone())
            .collect()
    }

    proptest! {
        #[test]
        fn range_brackets_total(request in request_strategy()) {
            let result = calculate_project_price(&request);
            prop_assert!(result.min <= result.total);
            prop_assert!(result.total <= result.max);
        }

        #[test]
        fn calculation_is_repeatable(request in request_strategy()) {
            prop_assert_eq!(
                calculate_project_price(&request),
                calculate_project_price(&request)
            );
        }

        #[test]
        fn adding_priced_items_never_lowers_total(request in request_strategy()) {
            let before = calculate_project_price(&request).total;
            let category = request.category.unwrap();

            for option in project_features(category) {
                if option.price > 0 && !request.features.contains(&option.key) {
                    let grown = request.clone().with_features([option.key.clone()]);
                    prop_assert!(calculate_project_price(&grown).total >= before);
                }
            }
            for option in builtin().services() {
                if !request.services.contains(&option.key) {
                    let grown = request.clone().with_services([option.key.clone()]);
                    prop_assert!(calculate_project_price(&grown).total >= before);
                }
            }
        }

        #[test]
        fn timeline_orders_totals(request in request_strategy()) {
            let rush = calculate_project_price(&request.clone().with_timeline(TimelineTier::Rush));
            let normal = calculate_project_price(&request.clone().with_timeline(TimelineTier::Normal));
            let flexible = calculate_project_price(&request.with_timeline(TimelineTier::Flexible));
            prop_assert!(rush.total > normal.total);
            prop_assert!(normal.total > flexible.total);
        }
    }
}
