//! Quote domain: price table, calculation, the quote flow and its export.

pub mod app_state;
pub mod entities;
pub mod pricing;
pub mod summary;
pub mod wizard;

#[allow(unused_imports)]
pub use app_state::{AppState, PersistedState, PricingSource, Theme};
#[allow(unused_imports)]
pub use entities::{
    ComplexityTier, FeatureKey, PriceOption, ProjectCategory, QuoteRequest, QuoteResult,
    ServiceKey, TimelineTier, UnknownCategory,
};
#[allow(unused_imports)]
pub use pricing::{
    builtin, calculate_project_price, project_base_price, project_features, InvalidPricing,
    PricingConfig,
};
#[allow(unused_imports)]
pub use summary::{format_money, new_reference, QuoteSummary};
#[allow(unused_imports)]
pub use wizard::{QuoteWizard, WizardStep};
