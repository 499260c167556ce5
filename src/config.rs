use crate::errors::{ObserverError, Result};
use crate::rule::{MediaQuery, Props, Rule};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Resolves a pseudo-class tag to its rendered form.
pub type PseudoClassFn = Box<dyn Fn(&str) -> String>;

/// Maps a modifier tag to a media-query fragment. `None` means the modifier
/// contributes nothing.
pub type MediaQueryFn = Box<dyn Fn(&str) -> Option<MediaQuery>>;

/// Maps a base class name to its CSS declarations. `None` vetoes the class:
/// no rule is ever produced for it, however often it occurs.
pub type PropsFn = Box<dyn Fn(&str) -> Option<Props>>;

/// Engine configuration. All mappers default to inert values; with the
/// default `props` mapper no class ever resolves to a rule.
pub struct ObserverConfig {
    pub pseudo_class: PseudoClassFn,
    pub media_query: MediaQueryFn,
    pub props: PropsFn,
    /// Pre-compiled rules adopted at construction. A preseeded rule is used
    /// in place of compilation the first time its class name becomes live.
    pub rules: IndexMap<String, Rule>,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            pseudo_class: Box::new(|tag| tag.to_string()),
            media_query: Box::new(|_| None),
            props: Box::new(|_| None),
            rules: IndexMap::new(),
        }
    }
}

impl ObserverConfig {
    pub fn with_props(mut self, props: impl Fn(&str) -> Option<Props> + 'static) -> Self {
        self.props = Box::new(props);
        self
    }

    pub fn with_media_query(
        mut self,
        media_query: impl Fn(&str) -> Option<MediaQuery> + 'static,
    ) -> Self {
        self.media_query = Box::new(media_query);
        self
    }

    pub fn with_pseudo_class(mut self, pseudo_class: impl Fn(&str) -> String + 'static) -> Self {
        self.pseudo_class = Box::new(pseudo_class);
        self
    }

    pub fn with_rules(mut self, rules: IndexMap<String, Rule>) -> Self {
        self.rules = rules;
        self
    }
}

impl std::fmt::Debug for ObserverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverConfig")
            .field("rules", &self.rules.len())
            .finish_non_exhaustive()
    }
}

/// Declarative, file-loadable alternative to the mapper closures.
///
/// `props` maps base class names to declarations, `media` maps modifier
/// tags to media-query fragments, `pseudo` maps pseudo tags to their
/// rendered form (unmapped tags pass through unchanged).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTable {
    pub props: IndexMap<String, Props>,
    pub media: IndexMap<String, MediaQuery>,
    pub pseudo: IndexMap<String, String>,
}

impl StyleTable {
    /// Load a style table from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ObserverError::ConfigError {
            message: format!("Failed to read style table {}: {}", path.display(), e),
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| ObserverError::ConfigError {
            message: format!("Failed to parse style table JSON: {}", e),
        })
    }

    /// Merge with another table; entries from `other` win on collision.
    pub fn merge(mut self, other: Self) -> Self {
        self.props.extend(other.props);
        self.media.extend(other.media);
        self.pseudo.extend(other.pseudo);
        self
    }

    /// Turn the table into an [`ObserverConfig`] whose mappers look up the
    /// table entries.
    pub fn into_config(self) -> ObserverConfig {
        let StyleTable {
            props,
            media,
            pseudo,
        } = self;

        ObserverConfig::default()
            .with_props(move |name| props.get(name).cloned())
            .with_media_query(move |modifier| media.get(modifier).cloned())
            .with_pseudo_class(move |tag| {
                pseudo
                    .get(tag)
                    .cloned()
                    .unwrap_or_else(|| tag.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{MediaValue, PropValue};

    #[test]
    fn test_default_config_is_inert() {
        let config = ObserverConfig::default();
        assert_eq!((config.pseudo_class)("hover"), "hover");
        assert!((config.media_query)("sm").is_none());
        assert!((config.props)("btn").is_none());
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_style_table_json() {
        let table = StyleTable::from_json_str(
            r#"{
                "props": {"btn": {"color": "red", "fontSize": 12}},
                "media": {"sm": {"minWidth": 640, "screen": true}},
                "pseudo": {"hover": "hover"}
            }"#,
        )
        .unwrap();

        let btn = table.props.get("btn").unwrap();
        assert_eq!(btn.get("color"), Some(&PropValue::Text("red".to_string())));
        assert_eq!(btn.get("fontSize"), Some(&PropValue::Number(12.0)));

        let sm = table.media.get("sm").unwrap();
        assert_eq!(sm.get("screen"), Some(&MediaValue::Flag(true)));
    }

    #[test]
    fn test_style_table_rejects_invalid_json() {
        let err = StyleTable::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ObserverError::ConfigError { .. }));
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = StyleTable::default();
        base.pseudo.insert("hover".to_string(), "hover".to_string());
        base.pseudo.insert("focus".to_string(), "focus".to_string());

        let mut other = StyleTable::default();
        other
            .pseudo
            .insert("hover".to_string(), "is(:hover)".to_string());

        let merged = base.merge(other);
        assert_eq!(merged.pseudo.get("hover").unwrap(), "is(:hover)");
        assert_eq!(merged.pseudo.get("focus").unwrap(), "focus");
    }

    #[test]
    fn test_into_config_lookups() {
        let table = StyleTable::from_json_str(
            r#"{"props": {"btn": {"color": "red"}}, "pseudo": {"hover": "where(:hover)"}}"#,
        )
        .unwrap();
        let config = table.into_config();

        assert!((config.props)("btn").is_some());
        assert!((config.props)("unknown").is_none());
        assert_eq!((config.pseudo_class)("hover"), "where(:hover)");
        assert_eq!((config.pseudo_class)("focus"), "focus");
        assert!((config.media_query)("sm").is_none());
    }
}
