use dioxus::{prelude::*, signals::Signal};

use crate::{
    domain::AppState,
    infra::config::load_pricing,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{QuotePage, SettingsPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Quote {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    let toasts = use_signal(Vec::<ToastMessage>::new);

    use_hook({
        let mut state = state;
        move || {
            if let Some(saved) = load_persisted_state() {
                state.with_mut(|st| st.apply_persisted(saved));
            }

            let loaded = load_pricing();
            state.with_mut(|st| {
                st.replace_pricing(loaded.config, loaded.source);
            });
            if let Some(warning) = loaded.warning {
                push_toast(toasts, ToastKind::Warning, warning);
            }
        }
    });
    use_context_provider(|| state);
    use_context_provider(|| toasts);

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// Saves locale and theme; failures surface as an error toast.
pub fn persist_user_state(state: &Signal<AppState>, toasts: Signal<Vec<ToastMessage>>) {
    let (snapshot, t) = state.with(|st| (st.to_persisted(), st.translator()));
    if let Err(err) = save_persisted_state(&snapshot) {
        tracing::warn!(%err, "failed to persist preferences");
        let error = err.to_string();
        push_toast(
            toasts,
            ToastKind::Error,
            t.format("settings.save_failed", &[("error", error.as_str())]),
        );
    }
}

#[component]
pub fn Quote() -> Element {
    rsx! { Shell { QuotePage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
