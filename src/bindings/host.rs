//! The DOM surface the journal modal needs.
//!
//! [`PageHost`] is implemented by [`WebPage`](super::web::WebPage) for the browser and
//! by [`MemoryPage`](super::memory::MemoryPage) for headless use.

use crate::services::scroll_lock::ScrollLockSlot;

/// Event types the controller listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
}

impl EventKind {
    /// DOM event type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
        }
    }
}

/// Where a listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenTarget<'a, E> {
    Element(&'a E),
    Document,
}

/// The parts of a DOM event the handlers read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEvent<E> {
    /// The element the event was originally dispatched to, if any.
    pub target: Option<E>,
    /// `KeyboardEvent.key` for key events.
    pub key: Option<String>,
}

impl<E> PageEvent<E> {
    pub fn click(target: E) -> Self {
        Self {
            target: Some(target),
            key: None,
        }
    }

    pub fn key_down(key: impl Into<String>) -> Self {
        Self {
            target: None,
            key: Some(key.into()),
        }
    }
}

/// What the host should do with the event after a handler ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventOutcome {
    #[default]
    Continue,
    PreventDefault,
}

pub type EventHandler<E> = Box<dyn FnMut(&PageEvent<E>) -> EventOutcome>;

/// A page the modal controller can be attached to.
///
/// All methods take `&self`; hosts use interior mutability where they need it.
pub trait PageHost {
    type Element: Clone + PartialEq + 'static;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Nearest inclusive ancestor of `element` matching `selector`.
    fn closest(&self, element: &Self::Element, selector: &str) -> Option<Self::Element>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;
    fn add_class(&self, element: &Self::Element, class: &str);
    fn remove_class(&self, element: &Self::Element, class: &str);

    /// Point an embedded frame at `address`.
    fn set_frame_address(&self, frame: &Self::Element, address: &str);
    fn frame_address(&self, frame: &Self::Element) -> Option<String>;

    /// Inline `overflow` of the body; empty when unset.
    fn body_overflow(&self) -> String;
    /// Set the body's inline `overflow`; an empty value removes it.
    fn set_body_overflow(&self, value: &str);

    /// Scroll lock bookkeeping shared by every lock over this page.
    fn scroll_lock_slot(&self) -> &ScrollLockSlot;

    /// Register a listener that lives as long as the page.
    fn listen(
        &self,
        target: ListenTarget<'_, Self::Element>,
        kind: EventKind,
        handler: EventHandler<Self::Element>,
    );
}
