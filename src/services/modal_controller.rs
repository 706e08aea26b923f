//! Journal modal controller.
//!
//! Opens the modal with a per-item journal loaded into the embedded frame and
//! closes it on a backdrop click or the dismiss key. Visibility lives in the
//! DOM as the absence of the hidden marker class; the controller never writes
//! it at attach time.

use std::cell::RefCell;
use std::rc::Rc;

use crate::bindings::{EventKind, EventOutcome, ListenTarget, PageEvent, PageHost};
use crate::config::{ModalConfig, TriggerWiring};
use crate::error::{ModalError, Result};
use crate::services::journal_route::JournalRoute;
use crate::services::scroll_lock::{ViewportLease, ViewportLock};

struct ControllerState<H: PageHost> {
    host: Rc<H>,
    config: ModalConfig,
    route: JournalRoute,
    modal: H::Element,
    frame: H::Element,
    lock: ViewportLock<H>,
    lease: RefCell<Option<ViewportLease<H>>>,
    current_target: RefCell<Option<String>>,
}

/// Handle to an attached journal modal. Clones share the same modal.
pub struct ModalController<H: PageHost + 'static> {
    state: Rc<ControllerState<H>>,
}

impl<H: PageHost + 'static> Clone for ModalController<H> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<H: PageHost + 'static> ModalController<H> {
    /// Attach to `host`.
    ///
    /// Both the modal root and the frame must exist; if either is missing
    /// nothing is wired and [`ModalError::MissingHandle`] is returned. The
    /// scroll lock is the page's own, shared with anything else locking it.
    pub fn attach(host: Rc<H>, config: ModalConfig) -> Result<Self> {
        config.validate()?;

        let modal = host
            .element_by_id(&config.modal_id)
            .ok_or_else(|| ModalError::missing(&config.modal_id))?;
        let frame = host
            .element_by_id(&config.frame_id)
            .ok_or_else(|| ModalError::missing(&config.frame_id))?;
        let lock = ViewportLock::new(Rc::clone(&host));

        let controller = Self {
            state: Rc::new(ControllerState {
                route: JournalRoute::from_config(&config),
                host,
                config,
                modal,
                frame,
                lock,
                lease: RefCell::new(None),
                current_target: RefCell::new(None),
            }),
        };
        controller.wire();
        Ok(controller)
    }

    /// Show the journal for `item_id`.
    ///
    /// Re-opening while visible just retargets the frame.
    pub fn open(&self, item_id: &str) -> Result<()> {
        let state = &self.state;
        let address = state.route.address_for(item_id)?;

        state.host.set_frame_address(&state.frame, &address);
        state.host.remove_class(&state.modal, &state.config.hidden_class);
        {
            let mut lease = state.lease.borrow_mut();
            if lease.is_none() {
                *lease = Some(state.lock.acquire());
            }
        }
        *state.current_target.borrow_mut() = Some(item_id.to_string());

        log::debug!("Opened journal modal at {address}");
        Ok(())
    }

    /// Hide the modal. The frame keeps its last address.
    pub fn close(&self) {
        let state = &self.state;
        state.host.add_class(&state.modal, &state.config.hidden_class);
        // Drop outside the borrow; releasing may touch the host.
        let lease = state.lease.borrow_mut().take();
        if lease.is_some() {
            log::debug!("Closed journal modal");
        }
        drop(lease);
    }

    pub fn is_open(&self) -> bool {
        !self
            .state
            .host
            .has_class(&self.state.modal, &self.state.config.hidden_class)
    }

    /// Identifier of the last item opened, kept after close.
    pub fn current_target(&self) -> Option<String> {
        self.state.current_target.borrow().clone()
    }

    pub fn frame_address(&self) -> Option<String> {
        self.state.host.frame_address(&self.state.frame)
    }

    pub fn config(&self) -> &ModalConfig {
        &self.state.config
    }

    pub fn lock(&self) -> &ViewportLock<H> {
        &self.state.lock
    }

    fn wire(&self) {
        let host = &self.state.host;
        let config = &self.state.config;
        let selector = config.trigger_selector();

        match config.trigger_wiring {
            TriggerWiring::Static => {
                let triggers = host.query_all(&selector);
                log::debug!("Wiring {} journal trigger(s)", triggers.len());
                for trigger in &triggers {
                    let controller = self.clone();
                    let trigger_el = trigger.clone();
                    host.listen(
                        ListenTarget::Element(trigger),
                        EventKind::Click,
                        Box::new(move |_: &PageEvent<H::Element>| {
                            controller.activate(&trigger_el);
                            EventOutcome::PreventDefault
                        }),
                    );
                }
            }
            TriggerWiring::Delegated => {
                log::debug!("Delegating journal triggers matching {selector}");
                let controller = self.clone();
                host.listen(
                    ListenTarget::Document,
                    EventKind::Click,
                    Box::new(move |event: &PageEvent<H::Element>| {
                        let trigger = event
                            .target
                            .as_ref()
                            .and_then(|target| controller.state.host.closest(target, &selector));
                        match trigger {
                            Some(trigger) => {
                                controller.activate(&trigger);
                                EventOutcome::PreventDefault
                            }
                            None => EventOutcome::Continue,
                        }
                    }),
                );
            }
        }

        let controller = self.clone();
        host.listen(
            ListenTarget::Element(&self.state.modal),
            EventKind::Click,
            Box::new(move |event: &PageEvent<H::Element>| {
                if event.target.as_ref() == Some(&controller.state.modal) {
                    controller.close();
                }
                EventOutcome::Continue
            }),
        );

        let controller = self.clone();
        host.listen(
            ListenTarget::Document,
            EventKind::KeyDown,
            Box::new(move |event: &PageEvent<H::Element>| {
                let dismiss = event.key.as_deref() == Some(controller.state.config.dismiss_key.as_str());
                // A lease left behind after another controller hid the same modal still counts.
                if dismiss && (controller.is_open() || controller.holds_lease()) {
                    controller.close();
                }
                EventOutcome::Continue
            }),
        );
    }

    fn holds_lease(&self) -> bool {
        self.state.lease.borrow().is_some()
    }

    fn activate(&self, trigger: &H::Element) {
        let item_id = self
            .state
            .host
            .attribute(trigger, &self.state.config.item_attribute)
            .unwrap_or_default();
        if item_id.is_empty() {
            return;
        }
        if let Err(e) = self.open(&item_id) {
            log::warn!("Ignoring journal trigger: {e}");
        }
    }
}
