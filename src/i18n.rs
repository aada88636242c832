//! Translation catalog for document headings and user-facing messages.
//!
//! Tables are nested JSON objects addressed by dotted keys such as
//! `categories.commit_only`. Lookups fall back to English, then to the key
//! itself, so a missing translation never fails.

use anyhow::{Context, Result};
use log::{error, info};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::constants::DEFAULT_LANGUAGE;

/// Supported languages as `(code, display name)` pairs.
pub const AVAILABLE_LANGUAGES: [(&str, &str); 3] = [("en", "English"), ("fr", "Français"), ("es", "Español")];

const BUILTIN_TABLES: [(&str, &str); 3] = [
    ("en", include_str!("../translations/en.json")),
    ("fr", include_str!("../translations/fr.json")),
    ("es", include_str!("../translations/es.json")),
];

/// Source of translated text.
pub trait Translator {
    /// Text for a dotted key; implementations return the key when unknown.
    fn get_text(&self, key: &str) -> String;
}

/// In-memory catalog of translation tables with English fallback.
#[derive(Debug, Clone)]
pub struct TranslationCatalog {
    current_language: String,
    translations: HashMap<String, Value>,
}

impl Default for TranslationCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TranslationCatalog {
    /// Catalog with the tables shipped in the binary.
    pub fn builtin() -> Self {
        let mut translations = HashMap::new();
        for (code, source) in BUILTIN_TABLES {
            match serde_json::from_str::<Value>(source) {
                Ok(table) => {
                    translations.insert(code.to_string(), table);
                }
                Err(e) => error!("❌ Built-in {code} translation table is invalid: {e}"),
            }
        }

        Self {
            current_language: DEFAULT_LANGUAGE.to_string(),
            translations,
        }
    }

    /// Built-in catalog with `{code}.json` files from `dir` merged on top.
    ///
    /// Missing files are skipped; unreadable or invalid files are errors.
    pub fn with_overrides<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let mut catalog = Self::builtin();

        for (code, _) in AVAILABLE_LANGUAGES {
            let path = dir.as_ref().join(format!("{code}.json"));
            if !path.exists() {
                continue;
            }

            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read translation file: {}", path.display()))?;
            let table: Value = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse translation file: {}", path.display()))?;

            let base = catalog
                .translations
                .entry(code.to_string())
                .or_insert_with(|| Value::Object(Default::default()));
            merge(base, table);
            info!("Loaded {code} translation overrides from {}", path.display());
        }

        Ok(catalog)
    }

    /// Supported `(code, display name)` pairs.
    pub fn available_languages() -> &'static [(&'static str, &'static str)] {
        &AVAILABLE_LANGUAGES
    }

    pub fn is_available(code: &str) -> bool {
        Self::available_languages().iter().any(|(available, _)| *available == code)
    }

    /// Display name for `code`, if supported.
    pub fn language_name(code: &str) -> Option<&'static str> {
        Self::available_languages()
            .iter()
            .find(|(available, _)| *available == code)
            .map(|(_, name)| *name)
    }

    /// Switch language; unknown codes are ignored and `false` is returned.
    pub fn set_language(&mut self, code: &str) -> bool {
        if Self::is_available(code) {
            self.current_language = code.to_string();
            true
        } else {
            false
        }
    }

    pub fn language(&self) -> &str {
        &self.current_language
    }

    /// Translated text with `{name}` placeholders substituted.
    ///
    /// Placeholders without a matching argument are left as-is.
    pub fn get_text_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.get_text(key);
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }

    fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        let mut current = self.translations.get(language)?;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        current.as_str()
    }
}

impl Translator for TranslationCatalog {
    fn get_text(&self, key: &str) -> String {
        self.lookup(&self.current_language, key)
            .or_else(|| self.lookup(DEFAULT_LANGUAGE, key))
            .unwrap_or(key)
            .to_string()
    }
}

/// Deep-merge `overlay` into `base`, overlay values winning.
fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
