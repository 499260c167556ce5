use indexmap::IndexMap;

/// Opaque identity of one installed rule within a sink.
///
/// The engine keys removal on this handle rather than comparing rule text,
/// so a sink is free to normalize or reformat the text it stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleHandle(u64);

impl RuleHandle {
    pub(crate) fn new(id: u64) -> Self {
        RuleHandle(id)
    }
}

/// The external store of live CSS rule text.
///
/// One sink instance is scoped to one `start()`/`stop()` cycle of the
/// engine; `dispose` tears down everything the cycle installed.
pub trait StyleSink {
    /// Install a rule and return its handle. The stored text may differ
    /// from the submitted text; read it back with [`StyleSink::css_text`].
    fn insert(&mut self, css: &str) -> RuleHandle;

    /// Text as actually stored for `handle`, `None` once removed.
    fn css_text(&self, handle: RuleHandle) -> Option<&str>;

    /// Remove one rule. Removing an unknown handle is a no-op.
    fn remove(&mut self, handle: RuleHandle);

    /// Tear down every installed rule.
    fn dispose(&mut self);
}

/// In-memory sink holding rule text in insertion order.
#[derive(Debug, Default)]
pub struct MemorySink {
    rules: IndexMap<u64, String>,
    next_id: u64,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Full stylesheet text, newline-joined in insertion order.
    pub fn stylesheet(&self) -> String {
        self.rules.values().cloned().collect::<Vec<_>>().join("\n")
    }
}

impl StyleSink for MemorySink {
    fn insert(&mut self, css: &str) -> RuleHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.rules.insert(id, css.to_string());
        RuleHandle::new(id)
    }

    fn css_text(&self, handle: RuleHandle) -> Option<&str> {
        self.rules.get(&handle.0).map(String::as_str)
    }

    fn remove(&mut self, handle: RuleHandle) {
        self.rules.shift_remove(&handle.0);
    }

    fn dispose(&mut self) {
        self.rules.clear();
    }
}
