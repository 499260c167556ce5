use crate::collect::collect_classes;
use crate::counter::CountMap;
use crate::dom::DomNode;

/// One raw change record from the host's change-detection mechanism.
#[derive(Debug, Clone)]
pub enum ChangeRecord<N: DomNode> {
    /// A class attribute changed on one element. `previous` is `None` when
    /// the host has no prior observation, in which case nothing is
    /// subtracted.
    Attribute {
        current: String,
        previous: Option<String>,
    },
    /// Subtrees were inserted into or removed from the observed tree at one
    /// mutation point.
    ChildList { added: Vec<N>, removed: Vec<N> },
}

impl<N: DomNode> ChangeRecord<N> {
    pub fn attribute(current: &str, previous: Option<&str>) -> Self {
        ChangeRecord::Attribute {
            current: current.to_string(),
            previous: previous.map(str::to_string),
        }
    }

    pub fn child_list(added: Vec<N>, removed: Vec<N>) -> Self {
        ChangeRecord::ChildList { added, removed }
    }
}

/// Fold a whole batch of change records into one net signed counter.
///
/// The fold is commutative per class name, so record order within the batch
/// does not matter. Entries whose additions and removals cancel out inside
/// the batch are pruned and must trigger no engine action downstream;
/// nonzero entries are kept whether positive or negative.
pub fn fold_batch<N: DomNode>(records: &[ChangeRecord<N>]) -> CountMap {
    let mut changes = CountMap::new();

    for record in records {
        match record {
            ChangeRecord::Attribute { current, previous } => {
                for token in current.split_whitespace() {
                    changes.increase(token, 1);
                }
                if let Some(previous) = previous {
                    for token in previous.split_whitespace() {
                        changes.increase(token, -1);
                    }
                }
            }
            ChangeRecord::ChildList { added, removed } => {
                for (name, count) in collect_classes(added).iter() {
                    changes.increase(name, count);
                }
                for (name, count) in collect_classes(removed).iter() {
                    changes.increase(name, -count);
                }
            }
        }
    }

    changes.prune_zeros();
    changes
}
