use regex::Regex;
use std::sync::OnceLock;

/// Structured form of a raw class token.
///
/// Grammar: `<name>(:<pseudo1>:<pseudo2>...)?(\?<mod1>\?<mod2>...)?` where
/// the name part excludes `:` and `?`. Pseudo tags and modifiers keep their
/// source order; modifier order matters when media-query fragments collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassName {
    pub name: String,
    pub pseudo: Vec<String>,
    pub modifiers: Vec<String>,
}

static CLASS_TOKEN: OnceLock<Regex> = OnceLock::new();

fn class_token_re() -> &'static Regex {
    CLASS_TOKEN.get_or_init(|| Regex::new(r"^([^:?]+)(:[^?]+)?(\?.+)?$").unwrap())
}

impl ClassName {
    /// Parse a single whitespace-free class token.
    ///
    /// Parsing never fails: a token that doesn't match the grammar is
    /// treated as an opaque base name with no pseudo tags or modifiers.
    pub fn parse(token: &str) -> ClassName {
        match class_token_re().captures(token) {
            Some(captures) => {
                let name = captures[1].to_string();
                let pseudo = captures
                    .get(2)
                    .map(|m| m.as_str()[1..].split(':').map(str::to_string).collect())
                    .unwrap_or_default();
                let modifiers = captures
                    .get(3)
                    .map(|m| m.as_str()[1..].split('?').map(str::to_string).collect())
                    .unwrap_or_default();

                ClassName {
                    name,
                    pseudo,
                    modifiers,
                }
            }
            None => ClassName {
                name: token.to_string(),
                pseudo: Vec::new(),
                modifiers: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        let parsed = ClassName::parse("btn");
        assert_eq!(parsed.name, "btn");
        assert!(parsed.pseudo.is_empty());
        assert!(parsed.modifiers.is_empty());
    }

    #[test]
    fn test_pseudo_and_modifiers() {
        let parsed = ClassName::parse("btn:hover:focus?sm?dark");
        assert_eq!(parsed.name, "btn");
        assert_eq!(parsed.pseudo, vec!["hover", "focus"]);
        assert_eq!(parsed.modifiers, vec!["sm", "dark"]);
    }

    #[test]
    fn test_pseudo_only() {
        let parsed = ClassName::parse("link:visited");
        assert_eq!(parsed.name, "link");
        assert_eq!(parsed.pseudo, vec!["visited"]);
        assert!(parsed.modifiers.is_empty());
    }

    #[test]
    fn test_modifiers_only() {
        let parsed = ClassName::parse("card?md");
        assert_eq!(parsed.name, "card");
        assert!(parsed.pseudo.is_empty());
        assert_eq!(parsed.modifiers, vec!["md"]);
    }

    #[test]
    fn test_modifier_order_preserved() {
        let parsed = ClassName::parse("x?b?a?c");
        assert_eq!(parsed.modifiers, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_unmatched_token_falls_back_to_opaque_name() {
        // Leading separator leaves no name part; the whole token is the name
        let parsed = ClassName::parse(":hover");
        assert_eq!(parsed.name, ":hover");
        assert!(parsed.pseudo.is_empty());
        assert!(parsed.modifiers.is_empty());
    }
}
