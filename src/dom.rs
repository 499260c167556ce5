use serde::Deserialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Minimal view of an element tree the engine can observe.
///
/// The real change-detection host owns the element representation; the
/// engine only needs the class attribute and child traversal. `Clone` is
/// expected to be cheap (a shared handle, not a deep copy).
pub trait DomNode: Clone {
    /// Raw class-attribute string, `None` when the attribute is absent.
    fn class_attr(&self) -> Option<String>;

    /// Child elements, in document order. Non-element nodes are not
    /// represented at this interface.
    fn children(&self) -> Vec<Self>;
}

/// In-memory element used by the tests, benchmarks and the CLI.
///
/// Shares its data behind an `Rc` so that a node can sit in a tree and in a
/// change record at the same time.
#[derive(Clone)]
pub struct Element {
    inner: Rc<RefCell<ElementData>>,
}

struct ElementData {
    tag: String,
    class: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ElementData {
                tag: tag.to_string(),
                class: None,
                children: Vec::new(),
            })),
        }
    }

    pub fn with_class(tag: &str, class: &str) -> Self {
        let element = Self::new(tag);
        element.inner.borrow_mut().class = Some(class.to_string());
        element
    }

    pub fn tag(&self) -> String {
        self.inner.borrow().tag.clone()
    }

    /// Replace the class attribute, returning the previous value so the
    /// host can form an attribute change record from the transition.
    pub fn set_class(&self, class: Option<&str>) -> Option<String> {
        std::mem::replace(
            &mut self.inner.borrow_mut().class,
            class.map(str::to_string),
        )
    }

    /// Append `child` and return `self` for builder-style tree construction.
    pub fn child(self, child: Element) -> Self {
        self.inner.borrow_mut().children.push(child);
        self
    }

    pub fn append(&self, child: Element) {
        self.inner.borrow_mut().children.push(child);
    }

    /// Detach `child` (matched by identity, not content). Returns whether a
    /// child was removed.
    pub fn remove_child(&self, child: &Element) -> bool {
        let mut data = self.inner.borrow_mut();
        let before = data.children.len();
        data.children
            .retain(|existing| !Rc::ptr_eq(&existing.inner, &child.inner));
        data.children.len() != before
    }
}

impl DomNode for Element {
    fn class_attr(&self) -> Option<String> {
        self.inner.borrow().class.clone()
    }

    fn children(&self) -> Vec<Element> {
        self.inner.borrow().children.clone()
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        f.debug_struct("Element")
            .field("tag", &data.tag)
            .field("class", &data.class)
            .field("children", &data.children.len())
            .finish()
    }
}

/// JSON document form of an element tree: `{"tag": "div", "class": "a b",
/// "children": [...]}`. `class` and `children` are optional.
#[derive(Debug, Deserialize)]
struct ElementDoc {
    tag: String,
    #[serde(default)]
    class: Option<String>,
    #[serde(default)]
    children: Vec<ElementDoc>,
}

impl From<ElementDoc> for Element {
    fn from(doc: ElementDoc) -> Self {
        let element = Element::new(&doc.tag);
        if let Some(class) = doc.class {
            element.set_class(Some(&class));
        }
        for child in doc.children {
            element.append(child.into());
        }
        element
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        ElementDoc::deserialize(deserializer).map(Element::from)
    }
}
