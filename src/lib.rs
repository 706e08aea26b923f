//! Plant journal modal for the garden dashboard pages.
//!
//! The host page calls [`init_journal_modal`] once its markup is in place. The
//! returned [`JournalModal`] shows `/journal/{plantId}` in the modal's frame
//! when a `[data-open-modal]` trigger is clicked, and hides it again on a
//! backdrop click or Escape.

pub mod bindings;
pub mod config;
pub mod error;
pub mod logging;
pub mod services;

use std::rc::Rc;

use log::Level;
use wasm_bindgen::prelude::*;

pub use config::{IdentifierPolicy, ModalConfig, TriggerWiring};
pub use error::{ModalError, Result};
pub use services::{JournalRoute, ModalController, ViewportLease, ViewportLock};

use bindings::WebPage;

/// Attach the journal modal to the current document.
///
/// `options` is an optional object with `ModalConfig` keys (`modalId`,
/// `frameId`, `triggerWiring`, ...). Returns `undefined` when the modal or its
/// frame is not on the page; throws only for invalid options.
#[wasm_bindgen(js_name = initJournalModal)]
pub fn init_journal_modal(options: JsValue) -> std::result::Result<Option<JournalModal>, JsValue> {
    console_error_panic_hook::set_once();
    logging::install_console_logging(Level::Info);

    let config = ModalConfig::from_js(options).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let Some(page) = WebPage::current() else {
        log::debug!("No document available; journal modal disabled");
        return Ok(None);
    };

    match ModalController::attach(Rc::new(page), config) {
        Ok(controller) => Ok(Some(JournalModal { controller })),
        Err(e) if e.is_missing_handle() => {
            log::debug!("Journal modal disabled: {e}");
            Ok(None)
        }
        Err(e) => Err(JsValue::from_str(&e.to_string())),
    }
}

/// Adjust console log verbosity (`off`, `error`, `warn`, `info`, `debug`, `trace`).
#[wasm_bindgen(js_name = setJournalModalLogLevel)]
pub fn set_journal_modal_log_level(level: &str) -> std::result::Result<(), JsValue> {
    let filter = logging::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {level}")))?;
    logging::set_console_log_level(filter);
    Ok(())
}

/// Script-facing handle to an attached journal modal.
#[wasm_bindgen]
pub struct JournalModal {
    controller: ModalController<WebPage>,
}

#[wasm_bindgen]
impl JournalModal {
    /// Show the journal for `plant_id`.
    pub fn open(&self, plant_id: &str) -> std::result::Result<(), JsValue> {
        self.controller
            .open(plant_id)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn close(&self) {
        self.controller.close();
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    #[wasm_bindgen(js_name = currentTarget)]
    pub fn current_target(&self) -> Option<String> {
        self.controller.current_target()
    }

    #[wasm_bindgen(js_name = frameAddress)]
    pub fn frame_address(&self) -> Option<String> {
        self.controller.frame_address()
    }
}
