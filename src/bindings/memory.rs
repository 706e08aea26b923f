//! In-memory page used for headless hosts and tests.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Click events bubble
//! from the target through its ancestors and finally to document listeners;
//! key events go to document listeners only.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::host::{EventHandler, EventKind, EventOutcome, ListenTarget, PageEvent, PageHost};
use crate::services::scroll_lock::ScrollLockSlot;

/// Handle to a node in a [`MemoryPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Description of an element to insert.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug)]
struct Node {
    tag: String,
    id: Option<String>,
    parent: Option<NodeId>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
}

struct Listener {
    target: Option<NodeId>,
    kind: EventKind,
    handler: Rc<RefCell<EventHandler<NodeId>>>,
}

/// Result of dispatching a synthetic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// Number of handlers that ran.
    pub handled: usize,
    pub default_prevented: bool,
}

#[derive(Default)]
pub struct MemoryPage {
    nodes: RefCell<Vec<Node>>,
    listeners: RefCell<Vec<Listener>>,
    body_overflow: RefCell<String>,
    scroll_lock: ScrollLockSlot,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element under `parent` (or at the top level) and return its handle.
    pub fn insert(&self, spec: ElementSpec, parent: Option<NodeId>) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(Node {
            tag: spec.tag.to_ascii_lowercase(),
            id: spec.id,
            parent,
            classes: spec.classes,
            attributes: spec.attributes,
        });
        id
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(node.0) {
            n.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attribute(&self, node: NodeId, name: &str) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(node.0) {
            n.attributes.remove(name);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn listener_count_for(&self, target: ListenTarget<'_, NodeId>, kind: EventKind) -> usize {
        let target = match target {
            ListenTarget::Element(node) => Some(*node),
            ListenTarget::Document => None,
        };
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .count()
    }

    /// Dispatch a click on `target`, bubbling to the document.
    pub fn click(&self, target: NodeId) -> Dispatch {
        let mut path: Vec<Option<NodeId>> = self.ancestors(target).into_iter().map(Some).collect();
        path.push(None);
        self.dispatch(&path, EventKind::Click, &PageEvent::click(target))
    }

    /// Dispatch a keydown with `KeyboardEvent.key == key` to the document.
    pub fn key_down(&self, key: &str) -> Dispatch {
        self.dispatch(&[None], EventKind::KeyDown, &PageEvent::key_down(key))
    }

    fn dispatch(
        &self,
        path: &[Option<NodeId>],
        kind: EventKind,
        event: &PageEvent<NodeId>,
    ) -> Dispatch {
        let mut result = Dispatch {
            handled: 0,
            default_prevented: false,
        };
        for current in path {
            // Snapshot so handlers may touch the page while running.
            let handlers: Vec<_> = self
                .listeners
                .borrow()
                .iter()
                .filter(|l| l.target == *current && l.kind == kind)
                .map(|l| Rc::clone(&l.handler))
                .collect();
            for handler in handlers {
                let mut handler = handler.borrow_mut();
                let outcome = (*handler)(event);
                result.handled += 1;
                if outcome == EventOutcome::PreventDefault {
                    result.default_prevented = true;
                }
            }
        }
        result
    }

    /// `node` followed by its ancestors, innermost first.
    fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut chain = Vec::new();
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            let Some(n) = nodes.get(id.0) else { break };
            chain.push(id);
            cursor = n.parent;
        }
        chain
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        let nodes = self.nodes.borrow();
        let Some(n) = nodes.get(node.0) else {
            return false;
        };
        match selector {
            Selector::Id(id) => n.id.as_deref() == Some(id.as_str()),
            Selector::Class(class) => n.classes.iter().any(|c| c == class),
            Selector::Attribute { name, value: None } => n.attributes.contains_key(name),
            Selector::Attribute {
                name,
                value: Some(value),
            } => n.attributes.get(name) == Some(value),
            Selector::Tag(tag) => n.tag.eq_ignore_ascii_case(tag),
        }
    }
}

/// The single simple selectors the in-memory page understands.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
    Tag(String),
}

impl Selector {
    fn parse(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            return (!id.is_empty()).then(|| Selector::Id(id.to_string()));
        }
        if let Some(class) = selector.strip_prefix('.') {
            return (!class.is_empty()).then(|| Selector::Class(class.to_string()));
        }
        if let Some(inner) = selector.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return match inner.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                    Some(Selector::Attribute {
                        name: name.trim().to_string(),
                        value: Some(value.to_string()),
                    })
                }
                None if !inner.trim().is_empty() => Some(Selector::Attribute {
                    name: inner.trim().to_string(),
                    value: None,
                }),
                None => None,
            };
        }
        if !selector.is_empty() && selector.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Some(Selector::Tag(selector.to_string()));
        }
        None
    }
}

impl PageHost for MemoryPage {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            log::warn!("Unsupported selector {selector:?}");
            return Vec::new();
        };
        let count = self.nodes.borrow().len();
        (0..count)
            .map(NodeId)
            .filter(|node| self.matches(*node, &selector))
            .collect()
    }

    fn closest(&self, element: &NodeId, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        self.ancestors(*element)
            .into_iter()
            .find(|node| self.matches(*node, &selector))
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.nodes
            .borrow()
            .get(element.0)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.nodes
            .borrow()
            .get(element.0)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&self, element: &NodeId, class: &str) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(element.0) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&self, element: &NodeId, class: &str) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(element.0) {
            n.classes.retain(|c| c != class);
        }
    }

    fn set_frame_address(&self, frame: &NodeId, address: &str) {
        self.set_attribute(*frame, "src", address);
    }

    fn frame_address(&self, frame: &NodeId) -> Option<String> {
        self.attribute(frame, "src")
    }

    fn body_overflow(&self) -> String {
        self.body_overflow.borrow().clone()
    }

    fn set_body_overflow(&self, value: &str) {
        *self.body_overflow.borrow_mut() = value.to_string();
    }

    fn scroll_lock_slot(&self) -> &ScrollLockSlot {
        &self.scroll_lock
    }

    fn listen(
        &self,
        target: ListenTarget<'_, NodeId>,
        kind: EventKind,
        handler: EventHandler<NodeId>,
    ) {
        let target = match target {
            ListenTarget::Element(node) => Some(*node),
            ListenTarget::Document => None,
        };
        self.listeners.borrow_mut().push(Listener {
            target,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
    }
}
