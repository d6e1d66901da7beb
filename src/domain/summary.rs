//! Human-readable quote text and the share link built from it.

use time::Date;
use url::Url;

use super::{
    entities::{PriceOption, QuoteRequest, QuoteResult},
    pricing::PricingConfig,
};
use crate::i18n::Translator;

const SHARE_BASE_URL: &str = "https://wa.me/";

/// Formats whole currency units with thousands separators, e.g. `$6,828`.
pub fn format_money(symbol: &str, amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{symbol}{grouped}")
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuoteSummary {
    pub reference: String,
    pub text: String,
}

impl QuoteSummary {
    /// Builds the shareable text. The headline figure is the top of the range.
    pub fn build(
        request: &QuoteRequest,
        result: &QuoteResult,
        pricing: &PricingConfig,
        t: Translator,
        reference: &str,
        date: Date,
    ) -> Self {
        let type_label = request
            .category
            .map(|category| t.t(&format!("quote.project_types.{}", category.key())))
            .unwrap_or_else(|| t.t("quote.step5.not_selected"));

        let mut lines = vec![t.t("quote.messages.selected_features")];
        if let Some(category) = request.category {
            lines.extend(
                selected_in_order(pricing.features(category), &request.features)
                    .map(|option| feature_line(option, pricing, t)),
            );
        }

        let services: Vec<_> =
            selected_in_order(pricing.services(), &request.services).collect();
        if !services.is_empty() {
            lines.push(String::new());
            lines.push(t.t("quote.messages.services_header"));
            lines.extend(services.into_iter().map(|option| {
                let name = t.t(&format!("quote.additional_services.{}", option.key));
                format!(
                    "→ {name} (+{})",
                    format_money(&pricing.currency_symbol, u64::from(option.price))
                )
            }));
        }

        let features_text = lines.join("\n");
        let complexity = t.t(&format!("quote.complexity.{}", request.complexity.key()));
        let timeline = t.t(&format!("quote.timeline.{}", request.timeline.key()));
        let total = format_money(&pricing.currency_symbol, result.max);

        let body = t.format(
            "quote.messages.summary",
            &[
                ("type", type_label.as_str()),
                ("complexity", complexity.as_str()),
                ("timeline", timeline.as_str()),
                ("featuresText", features_text.as_str()),
                ("total", total.as_str()),
            ],
        );
        let date = date.to_string();
        let footer = t.format(
            "quote.messages.reference",
            &[("reference", reference), ("date", date.as_str())],
        );

        Self {
            reference: reference.to_string(),
            text: format!("{body}\n\n{footer}"),
        }
    }

    /// Deep link that opens a chat with `phone` prefilled with the summary.
    pub fn share_link(&self, phone: &str) -> Result<Url, url::ParseError> {
        let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
        let base = Url::parse(SHARE_BASE_URL)?.join(&digits)?;
        Url::parse_with_params(base.as_str(), [("text", self.text.as_str())])
    }
}

/// Short reference printed on exported quotes.
pub fn new_reference() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("Q-{}", id[..8].to_uppercase())
}

fn selected_in_order<'a>(
    table: &'a [PriceOption],
    selected: &'a [String],
) -> impl Iterator<Item = &'a PriceOption> {
    table
        .iter()
        .filter(move |option| selected.iter().any(|key| *key == option.key))
}

fn feature_line(option: &PriceOption, pricing: &PricingConfig, t: Translator) -> String {
    let name = t.t(&format!("quote.features.{}", option.key));
    if option.is_included() {
        format!("→ {name} {}", t.t("quote.messages.included"))
    } else {
        format!(
            "→ {name} (+{})",
            format_money(&pricing.currency_symbol, u64::from(option.price))
        )
    }
}

#[cfg(test)]
mod tests {
    use time::Month;

    use super::*;
    use crate::domain::entities::{ComplexityTier, ProjectCategory, TimelineTier};
    use crate::i18n::Locale;

    fn sample_date() -> Date {
        Date::from_calendar_date(2025, Month::March, 14).unwrap()
    }

    fn sample_request() -> QuoteRequest {
        QuoteRequest::for_category(ProjectCategory::Webapp)
            .with_features(["realtime", "responsive", "dashboard"])
            .with_complexity(ComplexityTier::Complex)
            .with_timeline(TimelineTier::Rush)
            .with_services(["hosting_setup"])
    }

    #[test]
    fn money_is_grouped_by_thousands() {
        assert_eq!(format_money("$", 0), "$0");
        assert_eq!(format_money("$", 420), "$420");
        assert_eq!(format_money("$", 6828), "$6,828");
        assert_eq!(format_money("€", 1_234_567), "€1,234,567");
    }

    #[test]
    fn summary_lists_selection_in_table_order() {
        let pricing = PricingConfig::default();
        let request = sample_request();
        let result = pricing.calculate(&request);
        let summary = QuoteSummary::build(
            &request,
            &result,
            &pricing,
            Translator::new(Locale::En),
            "Q-TEST0001",
            sample_date(),
        );

        let expected = "Hi! I would like a quote for a project.\n\n\
            Type: Web application\n\
            Complexity: Complex\n\
            Timeline: Urgent\n\n\
            Selected features:\n\
            → Mobile friendly design (included)\n\
            → Dashboard (+$400)\n\
            → Real-time updates (+$450)\n\n\
            Additional services:\n\
            → Hosting setup (+$50)\n\n\
            Estimated budget: up to $6,828\n\n\
            Ref. Q-TEST0001 · 2025-03-14";
        assert_eq!(summary.text, expected);
        assert_eq!(summary.reference, "Q-TEST0001");
    }

    #[test]
    fn services_block_is_omitted_when_empty() {
        let pricing = PricingConfig::default();
        let request = QuoteRequest::for_category(ProjectCategory::Landing)
            .with_features(["responsive"]);
        let result = pricing.calculate(&request);
        let summary = QuoteSummary::build(
            &request,
            &result,
            &pricing,
            Translator::new(Locale::Es),
            "Q-1",
            sample_date(),
        );

        assert!(summary.text.contains("Tipo: Landing page"));
        assert!(summary.text.contains("hasta $420"));
        assert!(!summary.text.contains("Servicios adicionales"));
    }

    #[test]
    fn share_link_targets_contact_and_encodes_text() {
        let summary = QuoteSummary {
            reference: "Q-1".to_string(),
            text: "Hola & adiós\n$350".to_string(),
        };
        let link = summary.share_link("+503 7659-2632").unwrap();

        assert_eq!(link.host_str(), Some("wa.me"));
        assert_eq!(link.path(), "/50376592632");
        let text = link
            .query_pairs()
            .find(|(key, _)| key == "text")
            .map(|(_, value)| value.into_owned());
        assert_eq!(text.as_deref(), Some("Hola & adiós\n$350"));
    }

    #[test]
    fn references_are_short_and_distinct() {
        let first = new_reference();
        let second = new_reference();
        assert_eq!(first.len(), 10);
        assert!(first.starts_with("Q-"));
        assert_ne!(first, second);
    }
}
