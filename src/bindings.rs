//! JavaScript surface: `Panzoom(element, options)` returning a `PanZoom`
//! object with `zoom`, `pan`, `getScale`, `getPan`, `setOptions`, `reset`
//! and `destroy`.

use panzoom_core::{ConfigPatch, PanZoomConfig, Transform};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::controller::ViewportController;

/// Per-call options for `zoom`, `pan` and `reset`.
#[derive(Debug, Default, Deserialize)]
struct ApplyOptions {
    #[serde(default)]
    animate: bool,
}

fn to_json(value: &JsValue) -> Result<String, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok("null".to_string());
    }
    // Functions and symbols stringify to `undefined`.
    Ok(js_sys::JSON::stringify(value)?
        .as_string()
        .unwrap_or_else(|| "null".to_string()))
}

fn options_error(e: serde_json::Error) -> JsValue {
    js_sys::Error::new(&format!("invalid panzoom options: {e}")).into()
}

fn parse_patch(options: &JsValue) -> Result<ConfigPatch, JsValue> {
    ConfigPatch::from_json(&to_json(options)?).map_err(options_error)
}

/// Lenient: a missing or malformed options argument means no animation.
fn wants_animation(options: &JsValue) -> bool {
    let parsed = to_json(options).ok().and_then(|json| {
        serde_json::from_str::<Option<ApplyOptions>>(&json)
            .map_err(|e| log::warn!("ignoring apply options: {e}"))
            .ok()
    });
    parsed.flatten().unwrap_or_default().animate
}

fn json_to_js(json: &str) -> JsValue {
    js_sys::JSON::parse(json).unwrap_or(JsValue::UNDEFINED)
}

fn transform_to_js(t: &Transform) -> JsValue {
    json_to_js(&t.to_json())
}

#[wasm_bindgen]
pub struct PanZoom {
    inner: ViewportController,
}

#[wasm_bindgen]
impl PanZoom {
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement, options: JsValue) -> Result<PanZoom, JsValue> {
        let config = PanZoomConfig::from_patch(&parse_patch(&options)?);
        let inner = ViewportController::new(element, config)?;
        log::info!("panzoom attached, scale {}", inner.scale());
        Ok(PanZoom { inner })
    }

    /// Returns `{scale, x, y}`.
    pub fn zoom(&self, target_scale: f64, options: JsValue) -> JsValue {
        transform_to_js(&self.inner.set_zoom(target_scale, wants_animation(&options)))
    }

    /// Returns `{scale, x, y}`.
    pub fn pan(&self, x: f64, y: f64, options: JsValue) -> JsValue {
        transform_to_js(&self.inner.set_pan(x, y, wants_animation(&options)))
    }

    #[wasm_bindgen(js_name = getScale)]
    pub fn get_scale(&self) -> f64 {
        self.inner.scale()
    }

    /// Returns `{x, y}`.
    #[wasm_bindgen(js_name = getPan)]
    pub fn get_pan(&self) -> JsValue {
        let (x, y) = self.inner.pan();
        json_to_js(&serde_json::json!({ "x": x, "y": y }).to_string())
    }

    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&self, options: JsValue) -> Result<(), JsValue> {
        self.inner.update_config(&parse_patch(&options)?);
        Ok(())
    }

    pub fn reset(&self, options: JsValue) {
        self.inner.reset_view(wants_animation(&options));
    }

    pub fn destroy(&self) {
        self.inner.teardown();
        log::info!("panzoom detached");
    }
}

/// Factory matching the `Panzoom(element, options)` call shape.
#[wasm_bindgen(js_name = Panzoom)]
pub fn panzoom(element: HtmlElement, options: JsValue) -> Result<PanZoom, JsValue> {
    PanZoom::new(element, options)
}
