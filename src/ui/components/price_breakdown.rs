use dioxus::prelude::*;

use crate::{
    domain::{format_money, QuoteResult},
    i18n::Translator,
};

#[derive(Clone, PartialEq)]
struct BreakdownRow {
    label: String,
    value: String,
    total: bool,
}

/// Every step of the calculation, in the order it is applied.
#[component]
pub fn PriceBreakdown(result: QuoteResult, currency: String, t: Translator) -> Element {
    let money = |amount: u32| format_money(&currency, u64::from(amount));
    let rows = vec![
        row(t.t("quote.breakdown.base"), money(result.base_price)),
        row(t.t("quote.breakdown.features"), format!("+{}", money(result.features_price))),
        row(t.t("quote.breakdown.subtotal"), money(result.subtotal)),
        row(t.t("quote.breakdown.complexity"), format!("×{}", result.complexity_factor)),
        row(t.t("quote.breakdown.timeline"), format!("×{}", result.timeline_factor)),
        row(t.t("quote.breakdown.services"), format!("+{}", money(result.services_price))),
        BreakdownRow {
            label: t.t("quote.breakdown.total"),
            value: format_money(&currency, result.total),
            total: true,
        },
    ];

    rsx! {
        table { class: "breakdown",
            tbody {
                for entry in rows {
                    tr { class: if entry.total { "total" } else { "" },
                        td { "{entry.label}" }
                        td { "{entry.value}" }
                    }
                }
            }
        }
    }
}

fn row(label: String, value: String) -> BreakdownRow {
    BreakdownRow {
        label,
        value,
        total: false,
    }
}
