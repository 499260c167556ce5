//! Runtime atomic CSS engine.
//!
//! Class names observed on a live element subtree act as keys into a
//! rule-generation function: the first live occurrence of a class installs
//! exactly one stylesheet rule for it, further occurrences are reference
//! counted, and the rule is uninstalled the moment the last occurrence
//! disappears.
//!
//! - **counter**: signed occurrence counting with explicit zero pruning
//! - **parser**: class token grammar (`name:pseudo?modifier` segments)
//! - **collect**: subtree class enumeration with a tokenization dedup cache
//! - **delta**: folding raw change records into one net delta per batch
//! - **rule**: rule value object and CSS text synthesis
//! - **sink**: stylesheet store trait, keyed by opaque rule handles
//! - **config**: mapper configuration and the file-loadable [`StyleTable`]
//! - **engine**: the [`Observer`] orchestrator tying it all together

pub mod collect;
pub mod config;
pub mod counter;
pub mod delta;
pub mod dom;
pub mod engine;
pub mod errors;
pub mod parser;
pub mod rule;
pub mod sink;

pub use collect::{collect_classes, ClassCollector, CollectStats};
pub use config::{MediaQueryFn, ObserverConfig, PropsFn, PseudoClassFn, StyleTable};
pub use counter::CountMap;
pub use delta::{fold_batch, ChangeRecord};
pub use dom::{DomNode, Element};
pub use engine::Observer;
pub use errors::{ObserverError, Result};
pub use parser::ClassName;
pub use rule::{MediaQuery, MediaValue, PropValue, Props, Rule};
pub use sink::{MemorySink, RuleHandle, StyleSink};
