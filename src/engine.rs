use crate::collect::collect_classes;
use crate::config::ObserverConfig;
use crate::counter::CountMap;
use crate::delta::{fold_batch, ChangeRecord};
use crate::dom::DomNode;
use crate::errors::{ObserverError, Result};
use crate::parser::ClassName;
use crate::rule::{MediaQuery, Rule};
use crate::sink::{MemorySink, RuleHandle, StyleSink};
use indexmap::IndexMap;

struct Installed {
    rule: Rule,
    handle: RuleHandle,
}

/// Usage engine: owns the reference counts of live class names and the
/// rules installed for them.
///
/// Invariant between processed batches: a class name is either absent from
/// both the usage counter and the installed-rule map, or present in both
/// with a count of at least one.
///
/// The host's change-detection mechanism delivers batches serially through
/// [`Observer::process_batch`]; each batch is folded to one net delta and
/// applied to completion before the next is considered.
pub struct Observer<N: DomNode, S: StyleSink = MemorySink> {
    root: N,
    config: ObserverConfig,
    sink: S,
    preseeded: IndexMap<String, Rule>,
    usage: CountMap,
    rules: IndexMap<String, Installed>,
    started: bool,
}

impl<N: DomNode> Observer<N, MemorySink> {
    /// Observe `root` with an in-memory sink.
    pub fn new(root: N, config: ObserverConfig) -> Self {
        Self::with_sink(root, config, MemorySink::new())
    }
}

impl<N: DomNode, S: StyleSink> Observer<N, S> {
    pub fn with_sink(root: N, mut config: ObserverConfig, sink: S) -> Self {
        let preseeded = std::mem::take(&mut config.rules);
        Self {
            root,
            config,
            sink,
            preseeded,
            usage: CountMap::new(),
            rules: IndexMap::new(),
            started: false,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn root(&self) -> &N {
        &self.root
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Seed the engine from a full collection pass over the root and begin
    /// accepting batches.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Err(ObserverError::AlreadyStarted);
        }
        self.started = true;

        let initial = collect_classes(std::slice::from_ref(&self.root));
        self.apply_changes(&initial);
        Ok(())
    }

    /// Tear down every installed rule and stop accepting batches.
    pub fn stop(&mut self) -> Result<()> {
        if !self.started {
            return Err(ObserverError::NotStarted);
        }
        self.sink.dispose();
        self.rules.clear();
        self.usage = CountMap::new();
        self.started = false;
        Ok(())
    }

    /// Apply one serialized batch of raw change records.
    pub fn process_batch(&mut self, records: &[ChangeRecord<N>]) -> Result<()> {
        if !self.started {
            return Err(ObserverError::NotStarted);
        }
        let changes = fold_batch(records);
        self.apply_changes(&changes);
        Ok(())
    }

    /// Net signed deltas in, install/retain/release decisions out.
    /// Deltas for distinct class names are independent.
    fn apply_changes(&mut self, changes: &CountMap) {
        for (class_name, diff) in changes.iter() {
            if diff < 0 {
                // Releasing a class that was never installed is a no-op;
                // overlapping removal notifications must not double-release.
                if !self.usage.contains(class_name) {
                    continue;
                }
                self.usage.increase(class_name, diff);
                if self.usage.count(class_name) < 1 {
                    self.uninstall(class_name);
                }
            } else if diff > 0 {
                if self.usage.contains(class_name) {
                    // A rule's CSS is fixed once compiled; a repeat sighting
                    // is a pure count increment.
                    self.usage.increase(class_name, diff);
                    continue;
                }
                match self.resolve_rule(class_name) {
                    Some(rule) => self.install(class_name, rule, diff),
                    // Vetoed class names occupy no engine state at all.
                    None => continue,
                }
            }
        }
    }

    /// Compile `class_name` into a rule, or `None` when the props mapper
    /// has nothing for its base name.
    pub fn compile_rule(&self, class_name: &str) -> Option<Rule> {
        let ClassName {
            name,
            pseudo,
            modifiers,
        } = ClassName::parse(class_name);

        let props = (self.config.props)(&name)?;

        let mut media_query = MediaQuery::new();
        for modifier in &modifiers {
            if let Some(fragment) = (self.config.media_query)(modifier) {
                // Later modifiers overwrite earlier ones on feature collision
                media_query.extend(fragment);
            }
        }

        let pseudo_classes = pseudo
            .iter()
            .map(|tag| (self.config.pseudo_class)(tag))
            .collect();

        Some(
            Rule::new(class_name)
                .with_props(props)
                .with_pseudo_classes(pseudo_classes)
                .with_media_query(media_query),
        )
    }

    fn resolve_rule(&mut self, class_name: &str) -> Option<Rule> {
        if let Some(rule) = self.preseeded.shift_remove(class_name) {
            return Some(rule);
        }
        self.compile_rule(class_name)
    }

    fn install(&mut self, class_name: &str, mut rule: Rule, count: i64) {
        let handle = self.sink.insert(&rule.to_css());
        // The sink may normalize the text; keep its form as the rule's
        if let Some(stored) = self.sink.css_text(handle) {
            rule.css = stored.to_string();
        }
        self.rules
            .insert(class_name.to_string(), Installed { rule, handle });
        self.usage.increase(class_name, count);
    }

    fn uninstall(&mut self, class_name: &str) {
        self.usage.remove(class_name);
        if let Some(installed) = self.rules.shift_remove(class_name) {
            self.sink.remove(installed.handle);
        }
    }

    /// Installed rule for `class_name`, if any.
    pub fn rule(&self, class_name: &str) -> Option<&Rule> {
        self.rules.get(class_name).map(|installed| &installed.rule)
    }

    /// Live occurrence count for `class_name`, zero when not installed.
    pub fn usage_count(&self, class_name: &str) -> i64 {
        self.usage.count(class_name)
    }

    /// Currently installed class names, in installation order.
    pub fn installed_classes(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Concatenate every installed rule's stored CSS text, in installation
    /// order, newline-joined.
    pub fn to_css(&self) -> String {
        self.rules
            .values()
            .map(|installed| installed.rule.css.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
