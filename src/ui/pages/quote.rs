//! The five-step quote flow.

use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::{
    domain::{
        format_money, new_reference, AppState, ComplexityTier, PricingConfig, ProjectCategory,
        QuoteResult, QuoteSummary, QuoteWizard, TimelineTier, WizardStep,
    },
    i18n::Translator,
    infra::export::save_quote,
    ui::{
        components::{
            kpi_card::KpiCard,
            option_card::OptionCard,
            price_breakdown::PriceBreakdown,
            progress_bar::ProgressBar,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

#[component]
pub fn QuotePage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let mut reference = use_signal(new_reference);

    let (wizard, pricing, t) =
        state.with(|st| (st.wizard.clone(), st.pricing.clone(), st.translator()));
    let quote = wizard.quote(&pricing);
    let step = wizard.step();

    let step_number = step.number().to_string();
    let step_total = WizardStep::COUNT.to_string();
    let progress_label = t.format(
        "quote.step_of",
        &[("step", step_number.as_str()), ("total", step_total.as_str())],
    );

    let running_estimate = match (&quote, step) {
        (Some(result), WizardStep::Features | WizardStep::Scope | WizardStep::Services) => {
            Some(format!(
                "{}: {} – {}",
                t.t("quote.step5.estimated_quote"),
                format_money(&pricing.currency_symbol, result.min),
                format_money(&pricing.currency_symbol, result.max)
            ))
        }
        _ => None,
    };

    let body = match step {
        WizardStep::Category => category_step(state, &wizard, &pricing, t),
        WizardStep::Features => features_step(state, &wizard, &pricing, t),
        WizardStep::Scope => scope_step(state, &wizard, &pricing, t),
        WizardStep::Services => services_step(state, &wizard, &pricing, t),
        WizardStep::Summary => {
            let summary = quote.as_ref().map(|result| {
                QuoteSummary::build(
                    wizard.request(),
                    result,
                    &pricing,
                    t,
                    &reference(),
                    OffsetDateTime::now_utc().date(),
                )
            });
            summary_step(toasts, &wizard, &pricing, quote.clone(), summary, t)
        }
    };

    let can_proceed = wizard.can_proceed();
    let is_first = wizard.is_first_step();
    let is_last = wizard.is_last_step();

    rsx! {
        section { class: "panel",
            h2 { "💰 " {t.t("quote.title")} }
            ProgressBar { label: progress_label, percent: wizard.progress_percent() }
            {body}
            if let Some(estimate) = running_estimate {
                div { class: "notice", "{estimate}" }
            }
            div { class: "wizard-actions",
                button {
                    class: "btn",
                    disabled: is_first,
                    onclick: move |_| {
                        state.with_mut(|st| {
                            st.wizard.previous();
                        });
                    },
                    "← " {t.t("quote.previous")}
                }
                if is_last {
                    button {
                        class: "btn",
                        onclick: move |_| {
                            state.with_mut(|st| st.wizard.reset());
                            reference.set(new_reference());
                        },
                        "↺ " {t.t("quote.start_over")}
                    }
                } else {
                    button {
                        class: "btn btn-primary",
                        disabled: !can_proceed,
                        onclick: move |_| {
                            state.with_mut(|st| {
                                st.wizard.next();
                            });
                        },
                        {t.t("quote.next")} " →"
                    }
                }
            }
        }
    }
}

fn category_step(
    mut state: Signal<AppState>,
    wizard: &QuoteWizard,
    pricing: &PricingConfig,
    t: Translator,
) -> Element {
    let cards: Vec<_> = ProjectCategory::ALL
        .into_iter()
        .map(|category| {
            let price = format_money(
                &pricing.currency_symbol,
                u64::from(pricing.base_price(category)),
            );
            (
                category,
                category_name(t, category),
                t.t(&format!("quote.project_descriptions.{}", category.key())),
                t.format("quote.starting_at", &[("price", price.as_str())]),
            )
        })
        .collect();

    let selected = wizard.category();
    let selected_label = selected.map(|category| {
        let name = category_name(t, category);
        t.format("quote.step1.selected", &[("type", name.as_str())])
    });

    rsx! {
        h3 { {t.t("quote.step1.title")} }
        div { class: "card-grid",
            for (category, name, description, from) in cards {
                OptionCard {
                    key: "{category}",
                    title: name,
                    emoji: category.emoji().to_string(),
                    description,
                    badge: from,
                    selected: selected == Some(category),
                    on_select: move |_| {
                        state.with_mut(|st| st.wizard.choose_category(category, &st.pricing));
                    },
                }
            }
        }
        if let Some(label) = selected_label {
            div { class: "notice", "✓ {label}" }
        }
    }
}

fn features_step(
    mut state: Signal<AppState>,
    wizard: &QuoteWizard,
    pricing: &PricingConfig,
    t: Translator,
) -> Element {
    let Some(category) = wizard.category() else {
        return rsx! {
            h3 { {t.t("quote.step2.title")} }
            div { class: "notice", {t.t("quote.step2.select_category_first")} }
        };
    };

    let name = category_name(t, category);
    let heading = t.format("quote.step2.select_features", &[("type", name.as_str())]);
    let included = t.t("quote.step2.included");
    let required = t.t("quote.step2.required");

    let cards: Vec<_> = pricing
        .features(category)
        .iter()
        .map(|option| {
            let badge = if option.is_included() {
                included.clone()
            } else {
                format!(
                    "+{}",
                    format_money(&pricing.currency_symbol, u64::from(option.price))
                )
            };
            (
                option.key.clone(),
                t.t(&format!("quote.features.{}", option.key)),
                badge,
                theme::price_tag(option.price).to_string(),
                option.is_included(),
                wizard.is_feature_selected(&option.key),
            )
        })
        .collect();

    let count = wizard.request().features.len().to_string();
    let selected_count = t.format("quote.step2.features_selected", &[("count", count.as_str())]);
    let any_selected = !wizard.request().features.is_empty();

    rsx! {
        h3 { {t.t("quote.step2.title")} }
        p { class: "muted", "{heading}" }
        div { class: "card-grid",
            for (feature_key, title, badge, badge_class, locked, selected) in cards {
                OptionCard {
                    key: "{feature_key}",
                    title,
                    badge,
                    badge_class,
                    note: if locked { required.clone() } else { String::new() },
                    selected,
                    locked,
                    show_checkbox: true,
                    on_select: move |_| {
                        state.with_mut(|st| {
                            st.wizard.toggle_feature(&feature_key, &st.pricing);
                        });
                    },
                }
            }
        }
        if any_selected {
            div { class: "notice", "{selected_count}" }
        }
    }
}

fn scope_step(
    mut state: Signal<AppState>,
    wizard: &QuoteWizard,
    pricing: &PricingConfig,
    t: Translator,
) -> Element {
    let request = wizard.request();

    let complexity_cards: Vec<_> = ComplexityTier::ALL
        .into_iter()
        .map(|tier| {
            (
                tier,
                t.t(&format!("quote.complexity.{}", tier.key())),
                t.t(&format!("quote.complexity_descriptions.{}", tier.key())),
                format!("×{}", pricing.complexity_multipliers.factor(tier)),
            )
        })
        .collect();

    let timeline_cards: Vec<_> = TimelineTier::ALL
        .into_iter()
        .map(|tier| {
            (
                tier,
                t.t(&format!("quote.timeline.{}", tier.key())),
                t.t(&format!("quote.timeline_descriptions.{}", tier.key())),
                format!("×{}", pricing.timeline_multipliers.factor(tier)),
            )
        })
        .collect();

    let current_complexity = request.complexity;
    let current_timeline = request.timeline;

    rsx! {
        h3 { {t.t("quote.step3.title")} }
        h4 { {t.t("quote.step3.complexity_title")} }
        div { class: "card-grid",
            for (tier, title, description, factor) in complexity_cards {
                OptionCard {
                    key: "{tier.key()}",
                    title,
                    description,
                    badge: factor,
                    selected: current_complexity == tier,
                    on_select: move |_| state.with_mut(|st| st.wizard.set_complexity(tier)),
                }
            }
        }
        h4 { {t.t("quote.step3.timeline_title")} }
        div { class: "card-grid",
            for (tier, title, description, factor) in timeline_cards {
                OptionCard {
                    key: "{tier.key()}",
                    title,
                    description,
                    badge: factor,
                    selected: current_timeline == tier,
                    on_select: move |_| state.with_mut(|st| st.wizard.set_timeline(tier)),
                }
            }
        }
    }
}

fn services_step(
    mut state: Signal<AppState>,
    wizard: &QuoteWizard,
    pricing: &PricingConfig,
    t: Translator,
) -> Element {
    let cards: Vec<_> = pricing
        .services()
        .iter()
        .map(|option| {
            (
                option.key.clone(),
                t.t(&format!("quote.additional_services.{}", option.key)),
                format!(
                    "+{}",
                    format_money(&pricing.currency_symbol, u64::from(option.price))
                ),
                wizard.is_service_selected(&option.key),
            )
        })
        .collect();

    rsx! {
        h3 { {t.t("quote.step4.title")} }
        p { class: "muted", {t.t("quote.step4.optional")} }
        div { class: "card-grid",
            for (service_key, title, badge, selected) in cards {
                OptionCard {
                    key: "{service_key}",
                    title,
                    badge,
                    selected,
                    show_checkbox: true,
                    on_select: move |_| {
                        state.with_mut(|st| {
                            st.wizard.toggle_service(&service_key, &st.pricing);
                        });
                    },
                }
            }
        }
    }
}

fn summary_step(
    toasts: Signal<Vec<ToastMessage>>,
    wizard: &QuoteWizard,
    pricing: &PricingConfig,
    quote: Option<QuoteResult>,
    summary: Option<QuoteSummary>,
    t: Translator,
) -> Element {
    let (Some(result), Some(summary)) = (quote, summary) else {
        return rsx! {
            h3 { {t.t("quote.step5.title")} }
            div { class: "notice", {t.t("quote.step2.select_category_first")} }
        };
    };

    let currency = pricing.currency_symbol.clone();
    let request = wizard.request();
    let type_label = request
        .category
        .map(|category| category_name(t, category))
        .unwrap_or_else(|| t.t("quote.step5.not_selected"));
    let bullets = [
        format!("{} {type_label}", t.t("quote.step5.type")),
        format!(
            "{} {} {}",
            t.t("quote.step5.features"),
            request.features.len(),
            t.t("quote.step5.features_selected")
        ),
        format!(
            "{} {}",
            t.t("quote.step5.complexity"),
            t.t(&format!("quote.complexity.{}", request.complexity.key()))
        ),
        format!(
            "{} {}",
            t.t("quote.step5.timeline"),
            t.t(&format!("quote.timeline.{}", request.timeline.key()))
        ),
    ];

    let share_action = match summary.share_link(&pricing.contact_phone) {
        Ok(url) => rsx! {
            a {
                class: "btn btn-primary",
                href: "{url}",
                target: "_blank",
                rel: "noreferrer",
                "💬 " {t.t("quote.step5.send_whatsapp")}
            }
        },
        Err(err) => {
            tracing::warn!(%err, "could not build share link");
            let error = err.to_string();
            let message = t.format("quote.messages.link_failed", &[("error", error.as_str())]);
            rsx! { span { class: "muted", "{message}" } }
        }
    };
    let copy_text = summary.text.clone();
    let reference = summary.reference.clone();

    rsx! {
        h3 { {t.t("quote.step5.title")} }
        div { class: "kpi-grid",
            KpiCard {
                title: t.t("quote.step5.minimum"),
                value: format_money(&currency, result.min),
            }
            KpiCard {
                title: t.t("quote.breakdown.total"),
                value: format_money(&currency, result.total),
                description: reference,
            }
            KpiCard {
                title: t.t("quote.step5.maximum"),
                value: format_money(&currency, result.max),
            }
        }
        PriceBreakdown { result: result.clone(), currency: currency.clone(), t }
        ul {
            for bullet in bullets {
                li { "{bullet}" }
            }
        }
        p { class: "muted", {t.t("quote.step5.contact_message")} }
        div { class: "export-actions",
            button {
                class: "btn",
                onclick: move |_| copy_to_clipboard(copy_text.clone(), toasts, t),
                "📋 " {t.t("quote.step5.copy_quote")}
            }
            {share_action}
            button {
                class: "btn",
                onclick: move |_| save_to_file(&summary, toasts, t),
                "💾 " {t.t("quote.step5.save_file")}
            }
        }
    }
}

fn copy_to_clipboard(text: String, toasts: Signal<Vec<ToastMessage>>, t: Translator) {
    let literal = serde_json::to_string(&text).unwrap_or_default();
    let script = format!("await navigator.clipboard.writeText({literal}); return true;");
    spawn(async move {
        match document::eval(&script).await {
            Ok(_) => push_toast(toasts, ToastKind::Success, t.t("quote.messages.copied")),
            Err(err) => {
                tracing::warn!(?err, "clipboard write failed");
                push_toast(toasts, ToastKind::Error, t.t("quote.messages.copy_failed"));
            }
        }
    });
}

fn save_to_file(summary: &QuoteSummary, toasts: Signal<Vec<ToastMessage>>, t: Translator) {
    match save_quote(summary) {
        Ok(path) => {
            let path = path.display().to_string();
            push_toast(
                toasts,
                ToastKind::Success,
                t.format("quote.messages.saved", &[("path", path.as_str())]),
            );
        }
        Err(err) => {
            let error = err.to_string();
            push_toast(
                toasts,
                ToastKind::Error,
                t.format("quote.messages.save_failed", &[("error", error.as_str())]),
            );
        }
    }
}

fn category_name(t: Translator, category: ProjectCategory) -> String {
    t.t(&format!("quote.project_types.{}", category.key()))
}
