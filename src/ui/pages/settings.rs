use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    domain::{AppState, PricingSource, Theme},
    i18n::Locale,
    infra::config::{load_pricing, write_editable_copy},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
    util::version::version_label,
};

#[component]
pub fn SettingsPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let (t, current_locale, current_theme, source) = state.with(|st| {
        (
            st.translator(),
            st.locale,
            st.theme,
            st.pricing_source.clone(),
        )
    });

    let source_label = match &source {
        PricingSource::Builtin => t.t("settings.builtin"),
        PricingSource::File(_) => source.to_string(),
    };
    let source_line = t.format("settings.pricing_source", &[("source", source_label.as_str())]);
    let version = version_label();
    let version_line = t.format("settings.version", &[("version", version.as_str())]);

    let on_reload = move |_| {
        let loaded = load_pricing();
        let t = state.with(|st| st.translator());
        let pruned = state.with_mut(|st| st.replace_pricing(loaded.config, loaded.source));

        match loaded.warning {
            Some(warning) => push_toast(toasts, ToastKind::Warning, warning),
            None => push_toast(toasts, ToastKind::Success, t.t("settings.reloaded")),
        }
        if pruned > 0 {
            let count = pruned.to_string();
            push_toast(
                toasts,
                ToastKind::Info,
                t.format("settings.pruned", &[("count", count.as_str())]),
            );
        }
    };

    let on_write_copy = move |_| {
        let (t, pricing) = state.with(|st| (st.translator(), st.pricing.clone()));
        match write_editable_copy(&pricing) {
            Ok(path) => {
                let path = path.display().to_string();
                push_toast(
                    toasts,
                    ToastKind::Success,
                    t.format("settings.written", &[("path", path.as_str())]),
                );
            }
            Err(err) => {
                let error = err.to_string();
                push_toast(
                    toasts,
                    ToastKind::Error,
                    t.format("settings.write_failed", &[("error", error.as_str())]),
                );
            }
        }
    };

    let themes = [
        (Theme::Dark, t.t("settings.dark")),
        (Theme::Light, t.t("settings.light")),
    ];

    rsx! {
        div { class: "panel",
            h2 { "⚙️ " {t.t("nav.settings")} }

            h3 { {t.t("settings.language")} }
            div { class: "segmented",
                for locale in Locale::ALL {
                    button {
                        key: "{locale.code()}",
                        class: theme::nav_button(locale == current_locale),
                        onclick: move |_| {
                            state.with_mut(|st| st.locale = locale);
                            persist_user_state(&state, toasts);
                        },
                        "{locale.flag()} {locale.native_name()}"
                    }
                }
            }

            h3 { {t.t("settings.theme")} }
            div { class: "segmented",
                for (option, label) in themes {
                    button {
                        key: "{label}",
                        class: theme::nav_button(option == current_theme),
                        onclick: move |_| {
                            state.with_mut(|st| st.theme = option);
                            persist_user_state(&state, toasts);
                        },
                        "{option.icon()} {label}"
                    }
                }
            }

            h3 { {t.t("settings.pricing")} }
            p { class: "muted", "{source_line}" }
            div { class: "export-actions",
                button { class: "btn btn-primary", onclick: on_reload, "↻ " {t.t("settings.reload")} }
                button { class: "btn", onclick: on_write_copy, "📝 " {t.t("settings.write_copy")} }
            }

            p { class: "muted", "{version_line}" }
        }
    }
}
