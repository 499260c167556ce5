use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A CSS declaration value. Bare numbers render with a `px` suffix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Number(f64),
    Text(String),
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Number(value as f64)
    }
}

/// A media-query feature value. `Flag(true)` renders as the bare feature
/// name, `Flag(false)` drops the feature entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

/// CSS declarations keyed by camel-case property name, in source order.
pub type Props = IndexMap<String, PropValue>;

/// Media-query features keyed by camel-case feature name, in source order.
pub type MediaQuery = IndexMap<String, MediaValue>;

/// One compiled, installable CSS rule for a single class token.
///
/// `css` starts empty and is set to the text as actually stored by the
/// stylesheet sink once the rule is installed; the sink may normalize the
/// submitted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub class_name: String,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub pseudo_classes: Vec<String>,
    #[serde(default)]
    pub media_query: MediaQuery,
    #[serde(default)]
    pub css: String,
}

impl Rule {
    pub fn new(class_name: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            props: Props::new(),
            pseudo_classes: Vec::new(),
            media_query: MediaQuery::new(),
            css: String::new(),
        }
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn with_pseudo_classes(mut self, pseudo_classes: Vec<String>) -> Self {
        self.pseudo_classes = pseudo_classes;
        self
    }

    pub fn with_media_query(mut self, media_query: MediaQuery) -> Self {
        self.media_query = media_query;
        self
    }

    /// Render the rule to CSS text: escaped class selector with pseudo-class
    /// suffixes, kebab-cased declarations, and an `@media` wrapper when any
    /// media-query feature survives (`Flag(false)` features are dropped; a
    /// query reduced to nothing falls back to the unwrapped rule).
    pub fn to_css(&self) -> String {
        let mut selector = escape_class_name(&self.class_name);
        for pseudo in &self.pseudo_classes {
            selector.push(':');
            selector.push_str(pseudo);
        }

        let body = to_css_rule(&format!(".{}", selector), &self.props);

        if self.media_query.is_empty() {
            return body;
        }

        let conditions: Vec<String> = self
            .media_query
            .iter()
            .filter_map(|(feature, value)| match value {
                MediaValue::Flag(true) => Some(to_css_prop(feature)),
                MediaValue::Flag(false) => None,
                MediaValue::Number(n) => Some(format!("({}: {}px)", to_css_prop(feature), n)),
                MediaValue::Text(s) => Some(format!("({}: {})", to_css_prop(feature), s)),
            })
            .collect();

        if conditions.is_empty() {
            body
        } else {
            format!("@media {} {{ {} }}", conditions.join(" and "), body)
        }
    }
}

/// Convert a camel-case property key to its hyphenated CSS form.
pub fn to_css_prop(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Render a declaration value; numbers get a `px` suffix.
pub fn to_css_val(value: &PropValue) -> String {
    match value {
        PropValue::Number(n) => format!("{}px", n),
        PropValue::Text(s) => s.clone(),
    }
}

/// Render `selector {prop: val; prop: val}`.
fn to_css_rule(selector: &str, props: &Props) -> String {
    let declarations: Vec<String> = props
        .iter()
        .map(|(key, value)| format!("{}: {}", to_css_prop(key), to_css_val(value)))
        .collect();
    format!("{} {{{}}}", selector, declarations.join("; "))
}

/// Escape every character outside `[A-Za-z0-9_-]` with a backslash so the
/// raw class token is usable in a selector.
pub fn escape_class_name(class_name: &str) -> String {
    let mut out = String::with_capacity(class_name.len());
    for ch in class_name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            out.push(ch);
        } else {
            out.push('\\');
            out.push(ch);
        }
    }
    out
}
