//! Five-step quote flow. Owns the one in-progress request of a session.

use serde::{Deserialize, Serialize};

use super::{
    entities::{ComplexityTier, ProjectCategory, QuoteRequest, QuoteResult, TimelineTier},
    pricing::PricingConfig,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WizardStep {
    #[default]
    Category,
    Features,
    Scope,
    Services,
    Summary,
}

impl WizardStep {
    pub const COUNT: u8 = 5;

    /// 1-based position, as shown in "step 2 of 5".
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Category => 1,
            WizardStep::Features => 2,
            WizardStep::Scope => 3,
            WizardStep::Services => 4,
            WizardStep::Summary => 5,
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            WizardStep::Category => Some(WizardStep::Features),
            WizardStep::Features => Some(WizardStep::Scope),
            WizardStep::Scope => Some(WizardStep::Services),
            WizardStep::Services => Some(WizardStep::Summary),
            WizardStep::Summary => None,
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            WizardStep::Category => None,
            WizardStep::Features => Some(WizardStep::Category),
            WizardStep::Scope => Some(WizardStep::Features),
            WizardStep::Services => Some(WizardStep::Scope),
            WizardStep::Summary => Some(WizardStep::Services),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuoteWizard {
    step: WizardStep,
    request: QuoteRequest,
}

impl QuoteWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn request(&self) -> &QuoteRequest {
        &self.request
    }

    pub fn category(&self) -> Option<ProjectCategory> {
        self.request.category
    }

    /// Picks the project type and replaces the feature selection with its included set.
    pub fn choose_category(&mut self, category: ProjectCategory, pricing: &PricingConfig) {
        self.request.category = Some(category);
        self.request.features = pricing.mandatory_features(category);
    }

    /// Flips a feature. Included features stay selected; keys outside the current
    /// category's table are ignored. Returns whether the selection changed.
    pub fn toggle_feature(&mut self, key: &str, pricing: &PricingConfig) -> bool {
        let Some(category) = self.request.category else {
            return false;
        };
        let Some(option) = pricing.feature(category, key) else {
            return false;
        };
        if option.is_included() {
            return false;
        }

        toggle_key(&mut self.request.features, key);
        true
    }

    pub fn is_feature_selected(&self, key: &str) -> bool {
        self.request.features.iter().any(|selected| selected == key)
    }

    pub fn set_complexity(&mut self, complexity: ComplexityTier) {
        self.request.complexity = complexity;
    }

    pub fn set_timeline(&mut self, timeline: TimelineTier) {
        self.request.timeline = timeline;
    }

    /// Flips an additional service. Unknown keys are ignored.
    pub fn toggle_service(&mut self, key: &str, pricing: &PricingConfig) -> bool {
        if pricing.service(key).is_none() {
            return false;
        }
        toggle_key(&mut self.request.services, key);
        true
    }

    pub fn is_service_selected(&self, key: &str) -> bool {
        self.request.services.iter().any(|selected| selected == key)
    }

    /// Only the first step gates: a category must be picked.
    pub fn can_proceed(&self) -> bool {
        match self.step {
            WizardStep::Category => self.request.category.is_some(),
            WizardStep::Summary => false,
            _ => true,
        }
    }

    pub fn next(&mut self) -> bool {
        if !self.can_proceed() {
            return false;
        }
        match self.step.next() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    pub fn previous(&mut self) -> bool {
        match self.step.previous() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    pub fn is_first_step(&self) -> bool {
        self.step == WizardStep::Category
    }

    pub fn is_last_step(&self) -> bool {
        self.step == WizardStep::Summary
    }

    pub fn progress_percent(&self) -> u8 {
        let ratio = f64::from(self.step.number()) / f64::from(WizardStep::COUNT);
        (ratio * 100.0).round() as u8
    }

    /// Back to step one with nothing selected.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Drops selections the pricing table no longer knows about and re-adds the
    /// category's included features. Returns how many keys were dropped.
    pub fn retain_known(&mut self, pricing: &PricingConfig) -> usize {
        let before = self.request.features.len() + self.request.services.len();

        match self.request.category {
            Some(category) => self
                .request
                .features
                .retain(|key| pricing.feature(category, key).is_some()),
            None => self.request.features.clear(),
        }
        self.request
            .services
            .retain(|key| pricing.service(key).is_some());

        let dropped = before - (self.request.features.len() + self.request.services.len());

        if let Some(category) = self.request.category {
            for key in pricing.mandatory_features(category) {
                if !self.request.features.contains(&key) {
                    self.request.features.push(key);
                }
            }
        }

        if dropped > 0 {
            tracing::debug!(dropped, "pruned selections missing from pricing table");
        }
        dropped
    }

    /// Current estimate, `None` until a category is chosen.
    pub fn quote(&self, pricing: &PricingConfig) -> Option<QuoteResult> {
        self.request
            .category
            .map(|_| pricing.calculate(&self.request))
    }
}

fn toggle_key(keys: &mut Vec<String>, key: &str) {
    if let Some(index) = keys.iter().position(|selected| selected == key) {
        keys.remove(index);
    } else {
        keys.push(key.to_string());
    }
}
