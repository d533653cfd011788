//! Conversions from domain types into [`Value`]s for templating.

use crate::config::SiteConfig;
use crate::document::{Document, IndexEntry};
use gtmpl::Value;
use std::collections::HashMap;

impl From<&Document> for Value {
    fn from(d: &Document) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), Value::String(d.title.clone()));
        m.insert("date".to_owned(), Value::String(d.date.clone()));
        m.insert("content".to_owned(), Value::String(d.html.clone()));
        m.insert("show_badge".to_owned(), Value::Bool(d.show_badge));
        Value::Object(m)
    }
}

impl From<&IndexEntry> for Value {
    fn from(e: &IndexEntry) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("link".to_owned(), Value::String(e.link.clone()));
        m.insert("title".to_owned(), Value::String(e.title.clone()));
        m.insert("date".to_owned(), Value::String(e.date.clone()));
        Value::Object(m)
    }
}

impl From<&SiteConfig> for Value {
    fn from(s: &SiteConfig) -> Value {
        let fields = [
            ("title", &s.title),
            ("tagline", &s.tagline),
            ("author", &s.author),
            ("author_url", &s.author_url),
            ("copyright_since", &s.copyright_since),
            ("stylesheet", &s.stylesheet),
            ("badge_loader", &s.badge_loader),
            ("highlight_stylesheet", &s.highlight_stylesheet),
            ("highlight_script", &s.highlight_script),
        ];
        Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect(),
        )
    }
}
