use std::time::Duration;

use dioxus::prelude::*;

use crate::util::generate_id;

const TOAST_AUTO_DISMISS: Duration = Duration::from_secs(6);
const MAX_TOASTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: String,
    pub kind: ToastKind,
    pub text: String,
}

impl ToastMessage {
    pub fn new(kind: ToastKind, text: impl Into<String>) -> Self {
        Self {
            id: generate_id("toast"),
            kind,
            text: text.into(),
        }
    }
}

pub fn push_toast(
    mut toasts: Signal<Vec<ToastMessage>>,
    kind: ToastKind,
    message: impl Into<String>,
) {
    let text = message.into();
    match kind {
        ToastKind::Error => tracing::warn!(%text, "error toast"),
        _ => tracing::debug!(%text, ?kind, "toast"),
    }
    toasts.with_mut(|entries| {
        if entries.len() >= MAX_TOASTS {
            entries.remove(0);
        }
        entries.push(ToastMessage::new(kind, text));
    });
}

#[component]
pub fn Toast() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let views = toasts()
        .into_iter()
        .map(ToastView::from)
        .collect::<Vec<_>>();

    if views.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        div {
            class: "toast-stack",
            ul {
                for view in views {
                    ToastCard { key: "{view.id}", view, toasts }
                }
            }
        }
    }
}

#[component]
fn ToastCard(view: ToastView, toasts: Signal<Vec<ToastMessage>>) -> Element {
    let toast_id = view.id.clone();
    let dismiss_id = view.id.clone();
    let mut toasts = toasts;
    let _auto_dismiss = use_future(move || {
        let id = toast_id.clone();
        async move {
            tokio::time::sleep(TOAST_AUTO_DISMISS).await;
            toasts.with_mut(|items| items.retain(|toast| toast.id != id));
        }
    });

    rsx! {
        li {
            class: "toast {view.theme}",
            span { "{view.icon}" }
            p { "{view.text}" }
            button {
                onclick: move |_| {
                    let target = dismiss_id.clone();
                    toasts.with_mut(|items| items.retain(|toast| toast.id != target));
                },
                "✕"
            }
        }
    }
}

#[derive(Clone, PartialEq)]
struct ToastView {
    id: String,
    text: String,
    theme: &'static str,
    icon: &'static str,
}

impl From<ToastMessage> for ToastView {
    fn from(message: ToastMessage) -> Self {
        let (theme, icon) = match message.kind {
            ToastKind::Info => ("toast-info", "ℹ️"),
            ToastKind::Success => ("toast-success", "✅"),
            ToastKind::Warning => ("toast-warning", "⚠️"),
            ToastKind::Error => ("toast-error", "⛔"),
        };

        ToastView {
            id: message.id,
            text: message.text,
            theme,
            icon,
        }
    }
}
