//! Browser Journal Modal Tests
//!
//! Runs the exported entry points against a real document with
//! wasm-bindgen-test. Document listeners from earlier tests stay on the shared
//! page, so each test uses its own element ids and the delegated test its own
//! trigger attribute.

#![cfg(target_arch = "wasm32")]

use garden_journal_modal::{
    init_journal_modal, set_journal_modal_log_level, ModalConfig, TriggerWiring,
};
use wasm_bindgen::JsValue;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn config_for(prefix: &str) -> ModalConfig {
    ModalConfig {
        modal_id: format!("{prefix}-modal"),
        frame_id: format!("{prefix}-iframe"),
        ..ModalConfig::default()
    }
}

fn mount(prefix: &str, plant_ids: &[&str]) {
    mount_with_trigger(prefix, "data-open-modal", plant_ids);
}

fn mount_with_trigger(prefix: &str, trigger: &str, plant_ids: &[&str]) {
    let links: String = plant_ids
        .iter()
        .map(|id| {
            format!(
                r##"<a href="#" id="{prefix}-link-{id}" {trigger} data-plant-id="{id}"><span id="{prefix}-icon-{id}">🌱</span></a>"##
            )
        })
        .collect();
    let html = format!(
        r#"<main>{links}</main>
        <div id="{prefix}-modal" class="modal modal-hidden">
            <div id="{prefix}-content" class="modal-content">
                <iframe id="{prefix}-iframe"></iframe>
            </div>
        </div>"#
    );
    let body = document().body().unwrap();
    body.set_inner_html(&html);
    body.style().remove_property("overflow").unwrap();
}

fn element(id: &str) -> HtmlElement {
    document()
        .get_element_by_id(id)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
}

fn press(key: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    document().dispatch_event(&event).unwrap();
}

fn overflow() -> String {
    document()
        .body()
        .unwrap()
        .style()
        .get_property_value("overflow")
        .unwrap()
}

fn options(config: &ModalConfig) -> JsValue {
    serde_wasm_bindgen::to_value(config).unwrap()
}

// ============================================================================
// Initialization
// ============================================================================

#[wasm_bindgen_test]
fn test_missing_markup_returns_none() {
    document().body().unwrap().set_inner_html("<main></main>");
    let modal = init_journal_modal(options(&config_for("absent"))).unwrap();
    assert!(modal.is_none());
}

#[wasm_bindgen_test]
fn test_invalid_options_throw() {
    let config = ModalConfig {
        route_prefix: "journal".to_string(),
        ..config_for("invalid")
    };
    assert!(init_journal_modal(options(&config)).is_err());
}

#[wasm_bindgen_test]
fn test_absent_options_use_defaults() {
    assert_eq!(ModalConfig::from_js(JsValue::UNDEFINED).unwrap(), ModalConfig::default());
    assert_eq!(ModalConfig::from_js(JsValue::NULL).unwrap(), ModalConfig::default());
}

#[wasm_bindgen_test]
fn test_init_without_options_finds_default_markup() {
    mount("journal", &["3"]);
    let modal = init_journal_modal(JsValue::UNDEFINED).unwrap().unwrap();
    modal.open("3").unwrap();
    assert_eq!(modal.frame_address().as_deref(), Some("/journal/3"));
    modal.close();
    assert_eq!(overflow(), "");
}

// ============================================================================
// Log Level
// ============================================================================

#[wasm_bindgen_test]
fn test_set_log_level_accepts_known_names() {
    set_journal_modal_log_level("debug").unwrap();
    assert_eq!(log::max_level(), log::LevelFilter::Debug);

    // Attaching again keeps the level chosen by the page.
    mount("verbose", &[]);
    init_journal_modal(options(&config_for("verbose"))).unwrap();
    assert_eq!(log::max_level(), log::LevelFilter::Debug);

    set_journal_modal_log_level("warn").unwrap();
    assert_eq!(log::max_level(), log::LevelFilter::Warn);
}

#[wasm_bindgen_test]
fn test_set_log_level_rejects_unknown_name() {
    let err = set_journal_modal_log_level("loud").unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("Unknown log level: loud"));
}

// ============================================================================
// Open / Dismiss
// ============================================================================

#[wasm_bindgen_test]
fn test_click_trigger_then_escape() {
    mount("scenario", &["7"]);
    let modal = init_journal_modal(options(&config_for("scenario")))
        .unwrap()
        .unwrap();
    assert!(!modal.is_open());
    assert_eq!(overflow(), "");

    element("scenario-link-7").click();
    assert!(modal.is_open());
    assert_eq!(modal.frame_address().as_deref(), Some("/journal/7"));
    assert_eq!(overflow(), "hidden");

    press("Escape");
    assert!(!modal.is_open());
    assert_eq!(overflow(), "");
    assert_eq!(modal.frame_address().as_deref(), Some("/journal/7"));
    assert_eq!(modal.current_target().as_deref(), Some("7"));
}

#[wasm_bindgen_test]
fn test_backdrop_versus_content_click() {
    mount("backdrop", &["42"]);
    let modal = init_journal_modal(options(&config_for("backdrop")))
        .unwrap()
        .unwrap();
    modal.open("42").unwrap();

    element("backdrop-content").click();
    assert!(modal.is_open());

    element("backdrop-modal").click();
    assert!(!modal.is_open());
    assert!(element("backdrop-modal")
        .class_list()
        .contains("modal-hidden"));
}

#[wasm_bindgen_test]
fn test_escape_while_hidden_is_ignored() {
    mount("idle", &["7"]);
    let modal = init_journal_modal(options(&config_for("idle")))
        .unwrap()
        .unwrap();
    document()
        .body()
        .unwrap()
        .style()
        .set_property("overflow", "auto")
        .unwrap();

    press("Escape");
    assert!(!modal.is_open());
    assert_eq!(overflow(), "auto");
}

// ============================================================================
// Wiring Modes
// ============================================================================

#[wasm_bindgen_test]
fn test_static_wiring_skips_late_triggers() {
    mount("static", &[]);
    let modal = init_journal_modal(options(&config_for("static")))
        .unwrap()
        .unwrap();

    let late = document().create_element("a").unwrap();
    late.set_id("static-late");
    late.set_attribute("data-open-modal", "").unwrap();
    late.set_attribute("data-plant-id", "99").unwrap();
    document().body().unwrap().append_child(&late).unwrap();

    element("static-late").click();
    assert!(!modal.is_open());
    assert_eq!(overflow(), "");
}

#[wasm_bindgen_test]
fn test_delegated_wiring_handles_nested_targets() {
    mount_with_trigger("delegated", "data-open-delegated", &["5"]);
    let config = ModalConfig {
        trigger_attribute: "data-open-delegated".to_string(),
        trigger_wiring: TriggerWiring::Delegated,
        ..config_for("delegated")
    };
    let modal = init_journal_modal(options(&config)).unwrap().unwrap();

    element("delegated-icon-5").click();
    assert!(modal.is_open());
    assert_eq!(modal.frame_address().as_deref(), Some("/journal/5"));
    modal.close();
}
