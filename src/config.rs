use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::{ModalError, Result};

/// How item identifiers are placed into the frame address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierPolicy {
    /// Interpolate the identifier untouched.
    Verbatim,
    /// Percent-encode the identifier as a single path component.
    #[default]
    Encode,
    /// Only accept `[A-Za-z0-9_-]+`; anything else is rejected.
    Strict,
}

/// How trigger elements are wired to the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerWiring {
    /// One listener per trigger present at attach time.
    #[default]
    Static,
    /// A single document listener resolving the nearest trigger on each click.
    Delegated,
}

/// Markup contract and behaviour switches for the journal modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModalConfig {
    /// Id of the modal root (the backdrop element).
    pub modal_id: String,
    /// Id of the embedded journal frame.
    pub frame_id: String,
    /// Class whose presence hides the modal.
    pub hidden_class: String,
    /// Boolean attribute marking trigger elements.
    pub trigger_attribute: String,
    /// Data attribute carrying the item identifier on a trigger.
    pub item_attribute: String,
    /// Address prefix for the journal view.
    pub route_prefix: String,
    pub identifier_policy: IdentifierPolicy,
    pub trigger_wiring: TriggerWiring,
    /// `KeyboardEvent.key` value that dismisses the modal.
    pub dismiss_key: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            modal_id: "journal-modal".to_string(),
            frame_id: "journal-iframe".to_string(),
            hidden_class: "modal-hidden".to_string(),
            trigger_attribute: "data-open-modal".to_string(),
            item_attribute: "data-plant-id".to_string(),
            route_prefix: "/journal/".to_string(),
            identifier_policy: IdentifierPolicy::default(),
            trigger_wiring: TriggerWiring::default(),
            dismiss_key: "Escape".to_string(),
        }
    }
}

impl ModalConfig {
    /// Parse a JSON object; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Convert a JS options object. `undefined` and `null` mean all defaults.
    pub fn from_js(options: JsValue) -> Result<Self> {
        if options.is_undefined() || options.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_wasm_bindgen::from_value(options)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("modalId", &self.modal_id),
            ("frameId", &self.frame_id),
            ("hiddenClass", &self.hidden_class),
            ("triggerAttribute", &self.trigger_attribute),
            ("itemAttribute", &self.item_attribute),
            ("dismissKey", &self.dismiss_key),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ModalError::config(format!("{name} must not be empty")));
            }
        }
        if self.hidden_class.contains(char::is_whitespace) {
            return Err(ModalError::config("hiddenClass must be a single class name"));
        }
        if !self.route_prefix.starts_with('/') {
            return Err(ModalError::config(format!(
                "routePrefix must start with '/', got {:?}",
                self.route_prefix
            )));
        }
        Ok(())
    }

    /// Selector matching every trigger element.
    pub fn trigger_selector(&self) -> String {
        format!("[{}]", self.trigger_attribute)
    }
}
