use crate::counter::CountMap;
use crate::dom::DomNode;
use std::collections::HashMap;

/// Instrumentation from one collection pass, mostly interesting for the
/// dedup cache hit rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// Elements visited, roots included.
    pub elements_visited: usize,
    /// Class attributes resolved from the dedup cache without re-tokenizing.
    pub cache_hits: usize,
    /// Class attributes tokenized for the first time.
    pub cache_misses: usize,
}

/// Walks element subtrees and counts every class token found.
///
/// Generated markup tends to repeat identical class-attribute strings across
/// many elements, so token lists are cached per raw attribute string and
/// reused on repeat sightings. The cache lives as long as the collector.
#[derive(Debug, Default)]
pub struct ClassCollector {
    dedup: HashMap<String, Vec<String>>,
    stats: CollectStats,
}

impl ClassCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count class-token occurrences across `roots`, each root visited
    /// inclusively with all of its descendants.
    pub fn collect<N: DomNode>(&mut self, roots: &[N]) -> CountMap {
        let mut classes = CountMap::new();

        for root in roots {
            let mut stack = vec![root.clone()];
            while let Some(node) = stack.pop() {
                self.stats.elements_visited += 1;

                if let Some(attr) = node.class_attr() {
                    if !attr.trim().is_empty() {
                        self.count_attr(&attr, &mut classes);
                    }
                }

                // Reverse so the stack pops children in document order
                let mut children = node.children();
                children.reverse();
                stack.extend(children);
            }
        }

        classes
    }

    fn count_attr(&mut self, attr: &str, classes: &mut CountMap) {
        if let Some(tokens) = self.dedup.get(attr) {
            self.stats.cache_hits += 1;
            for token in tokens {
                classes.increase(token, 1);
            }
            return;
        }

        self.stats.cache_misses += 1;
        let tokens: Vec<String> = attr.split_whitespace().map(str::to_string).collect();
        for token in &tokens {
            classes.increase(token, 1);
        }
        self.dedup.insert(attr.to_string(), tokens);
    }

    pub fn stats(&self) -> CollectStats {
        self.stats
    }
}

/// One-shot collection with a fresh dedup cache.
pub fn collect_classes<N: DomNode>(roots: &[N]) -> CountMap {
    ClassCollector::new().collect(roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    #[test]
    fn test_repeated_token_in_one_attribute() {
        let element = Element::with_class("div", "a b a");
        let classes = collect_classes(&[element]);

        assert_eq!(classes.count("a"), 2);
        assert_eq!(classes.count("b"), 1);
        assert_eq!(classes.len(), 2);
    }

    #[test]
    fn test_root_is_visited_inclusively() {
        let root = Element::with_class("div", "outer")
            .child(Element::with_class("span", "inner"));
        let classes = collect_classes(&[root]);

        assert_eq!(classes.count("outer"), 1);
        assert_eq!(classes.count("inner"), 1);
    }

    #[test]
    fn test_classless_elements_are_skipped() {
        let root = Element::new("div")
            .child(Element::new("p"))
            .child(Element::with_class("span", "  "));
        let classes = collect_classes(&[root]);

        assert!(classes.is_empty());
    }

    #[test]
    fn test_dedup_cache_counts() {
        let root = Element::new("div")
            .child(Element::with_class("span", "btn primary"))
            .child(Element::with_class("span", "btn primary"))
            .child(Element::with_class("span", "btn"));

        let mut collector = ClassCollector::new();
        let classes = collector.collect(&[root]);

        assert_eq!(classes.count("btn"), 3);
        assert_eq!(classes.count("primary"), 2);

        let stats = collector.stats();
        assert_eq!(stats.cache_misses, 2);
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.elements_visited, 4);
    }
}
