use dioxus::prelude::*;

use crate::{
    app::{persist_user_state, Route},
    domain::AppState,
    i18n::Locale,
    ui::{components::toast::ToastMessage, theme},
    util::version::APP_NAME,
};

#[component]
pub fn Shell(children: Element) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    let (t, current_locale, current_theme) =
        state.with(|st| (st.translator(), st.locale, st.theme));
    let root_class = theme::root_class(current_theme);

    rsx! {
        div { class: "{root_class}",
            header { class: "header",
                div { class: "brand",
                    h1 { "💰 {APP_NAME}" }
                    p { class: "muted", {t.t("nav.tagline")} }
                }
                nav { class: "nav",
                    NavButton {
                        active: matches!(current_route, Route::Quote {}),
                        onclick: move |_| { nav.push(Route::Quote {}); },
                        label: t.t("nav.quote"),
                    }
                    NavButton {
                        active: matches!(current_route, Route::Settings {}),
                        onclick: move |_| { nav.push(Route::Settings {}); },
                        label: format!("⚙️ {}", t.t("nav.settings")),
                    }
                }
                div { class: "header-tools",
                    for locale in Locale::ALL {
                        button {
                            key: "{locale.code()}",
                            class: theme::nav_button(locale == current_locale),
                            title: locale.native_name(),
                            onclick: move |_| {
                                state.with_mut(|st| st.locale = locale);
                                persist_user_state(&state, toasts);
                            },
                            "{locale.flag()}"
                        }
                    }
                    button {
                        class: "btn",
                        onclick: move |_| {
                            state.with_mut(|st| st.theme = st.theme.toggled());
                            persist_user_state(&state, toasts);
                        },
                        "{current_theme.toggled().icon()}"
                    }
                }
            }
            main { class: "main",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: String) -> Element {
    rsx! {
        button {
            class: theme::nav_button(active),
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
