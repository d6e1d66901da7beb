//! English/Spanish string bundles, embedded at build time.

use std::{collections::HashMap, sync::OnceLock};

use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(RustEmbed)]
#[folder = "assets/locales"]
struct LocaleBundles;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Es,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Es, Locale::En];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// Name of the language in that language.
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Es => "Español",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Locale::En => "🇺🇸",
            Locale::Es => "🇪🇸",
        }
    }
}

static BUNDLES: OnceLock<HashMap<Locale, Value>> = OnceLock::new();

fn bundles() -> &'static HashMap<Locale, Value> {
    BUNDLES.get_or_init(|| {
        [Locale::En, Locale::Es]
            .into_iter()
            .map(|locale| (locale, load_bundle(locale)))
            .collect()
    })
}

fn load_bundle(locale: Locale) -> Value {
    let file = format!("{}.json", locale.code());
    let Some(asset) = LocaleBundles::get(&file) else {
        tracing::error!(%file, "locale bundle missing from binary");
        return Value::Null;
    };
    serde_json::from_slice(asset.data.as_ref()).unwrap_or_else(|err| {
        tracing::error!(%file, %err, "locale bundle is not valid JSON");
        Value::Null
    })
}

/// Looks up dotted keys such as `quote.step1.title` in the active bundle, falling back
/// to English and then to the key itself.
#[derive(Clone, Copy, Debug)]
pub struct Translator {
    locale: Locale,
    primary: &'static Value,
    fallback: &'static Value,
}

impl PartialEq for Translator {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        static NULL: Value = Value::Null;
        let all = bundles();
        Self {
            locale,
            primary: all.get(&locale).unwrap_or(&NULL),
            fallback: all.get(&Locale::En).unwrap_or(&NULL),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn t(&self, key: &str) -> String {
        lookup(self.primary, key)
            .or_else(|| lookup(self.fallback, key))
            .map(str::to_string)
            .unwrap_or_else(|| {
                tracing::debug!(key, locale = self.locale.code(), "missing translation");
                key.to_string()
            })
    }

    /// Translates `key` and substitutes `{name}` placeholders.
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        interpolate(&self.t(key), args)
    }
}

fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a str> {
    key.split('.')
        .try_fold(root, |node, segment| node.get(segment))
        .and_then(Value::as_str)
}

pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), value)
    })
}
