//! Browser page host over `web-sys`.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlIFrameElement, KeyboardEvent};

use super::host::{EventHandler, EventKind, EventOutcome, ListenTarget, PageEvent, PageHost};
use crate::services::scroll_lock::ScrollLockSlot;

thread_local! {
    // One window, one body: every WebPage on this thread shares the lock count.
    static SCROLL_LOCK: Rc<ScrollLockSlot> = Rc::new(ScrollLockSlot::new());
}

/// The live document of the current window.
#[derive(Debug, Clone)]
pub struct WebPage {
    document: Document,
    scroll_lock: Rc<ScrollLockSlot>,
}

impl WebPage {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            scroll_lock: SCROLL_LOCK.with(Rc::clone),
        }
    }

    /// The document of the global window, if there is one.
    pub fn current() -> Option<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn body(&self) -> Option<HtmlElement> {
        self.document.body()
    }
}

fn page_event(event: &Event) -> PageEvent<Element> {
    PageEvent {
        target: event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok()),
        key: event.dyn_ref::<KeyboardEvent>().map(|e| e.key()),
    }
}

impl PageHost for WebPage {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("Invalid selector {selector:?}: {e:?}");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn closest(&self, element: &Element, selector: &str) -> Option<Element> {
        element.closest(selector).ok().flatten()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&self, element: &Element, class: &str) {
        if let Err(e) = element.class_list().add_1(class) {
            log::warn!("Failed to add class {class}: {e:?}");
        }
    }

    fn remove_class(&self, element: &Element, class: &str) {
        if let Err(e) = element.class_list().remove_1(class) {
            log::warn!("Failed to remove class {class}: {e:?}");
        }
    }

    fn set_frame_address(&self, frame: &Element, address: &str) {
        match frame.dyn_ref::<HtmlIFrameElement>() {
            Some(iframe) => iframe.set_src(address),
            None => {
                if let Err(e) = frame.set_attribute("src", address) {
                    log::warn!("Failed to set frame src: {e:?}");
                }
            }
        }
    }

    fn frame_address(&self, frame: &Element) -> Option<String> {
        frame.get_attribute("src")
    }

    fn body_overflow(&self) -> String {
        self.body()
            .and_then(|body| body.style().get_property_value("overflow").ok())
            .unwrap_or_default()
    }

    fn set_body_overflow(&self, value: &str) {
        let Some(body) = self.body() else {
            return;
        };
        let style = body.style();
        let result = if value.is_empty() {
            style.remove_property("overflow").map(|_| ())
        } else {
            style.set_property("overflow", value)
        };
        if let Err(e) = result {
            log::warn!("Failed to set body overflow: {e:?}");
        }
    }

    fn scroll_lock_slot(&self) -> &ScrollLockSlot {
        &self.scroll_lock
    }

    fn listen(&self, target: ListenTarget<'_, Element>, kind: EventKind, mut handler: EventHandler<Element>) {
        let callback = Closure::wrap(Box::new(move |event: Event| {
            if handler(&page_event(&event)) == EventOutcome::PreventDefault {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(Event)>);

        let result = match target {
            ListenTarget::Element(element) => element
                .add_event_listener_with_callback(kind.as_str(), callback.as_ref().unchecked_ref()),
            ListenTarget::Document => self
                .document
                .add_event_listener_with_callback(kind.as_str(), callback.as_ref().unchecked_ref()),
        };
        if let Err(e) = result {
            log::warn!("Failed to add {} listener: {e:?}", kind.as_str());
        }

        // Listeners stay for the lifetime of the page
        callback.forget();
    }
}
