//! Thin web-sys helpers: measuring the container, reading pointer
//! positions, writing the element's transform and dispatching events.

use panzoom_core::{ContainerMetrics, LocalPoint, Notification, Transform};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, Element, Event, HtmlElement, MouseEvent, TouchEvent};

pub const ANIMATION_MS: i32 = 300;
const TRANSITION_ANIMATED: &str = "transform 0.3s ease-out";
const TRANSITION_NONE: &str = "none";

/// Padding and border widths from the container's computed style. Any value
/// the browser cannot provide counts as 0.
pub fn read_container_metrics(container: &Element) -> ContainerMetrics {
    let style = web_sys::window().and_then(|w| w.get_computed_style(container).ok().flatten());
    let Some(style) = style else {
        log::warn!("no computed style for container, assuming zero padding/border");
        return ContainerMetrics::default();
    };
    let px = |name: &str| js_sys::parse_float(&style.get_property_value(name).unwrap_or_default());
    ContainerMetrics::new(
        px("padding-left"),
        px("padding-top"),
        px("border-left-width"),
        px("border-top-width"),
    )
}

/// Client coordinates to the container's content-box space.
pub fn local_point(container: &Element, metrics: &ContainerMetrics, client_x: f64, client_y: f64) -> LocalPoint {
    let rect = container.get_bounding_client_rect();
    metrics.to_local(client_x, client_y, rect.left(), rect.top())
}

pub fn mouse_client(ev: &MouseEvent) -> (f64, f64) {
    (ev.client_x() as f64, ev.client_y() as f64)
}

/// First touch point only; multi-touch is not a gesture here.
pub fn touch_client(ev: &TouchEvent) -> Option<(f64, f64)> {
    let touch = ev.touches().get(0)?;
    Some((touch.client_x() as f64, touch.client_y() as f64))
}

/// True when the event target sits inside an element matching `selector`.
pub fn target_within(ev: &Event, selector: &str) -> bool {
    if selector.is_empty() {
        return false;
    }
    let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return false;
    };
    match target.closest(selector) {
        Ok(found) => found.is_some(),
        Err(e) => {
            log::error!("bad exclusion selector {selector:?}: {e:?}");
            false
        }
    }
}

pub fn set_transition(element: &HtmlElement, animate: bool) {
    let value = if animate { TRANSITION_ANIMATED } else { TRANSITION_NONE };
    if let Err(e) = element.style().set_property("transition", value) {
        log::error!("failed to set transition: {e:?}");
    }
}

/// Write `matrix(s, 0, 0, s, x, y)` with origin at the element's top-left.
pub fn write_transform(element: &HtmlElement, t: &Transform, animate: bool) {
    set_transition(element, animate);
    let style = element.style();
    if let Err(e) = style.set_property("transform", &t.css_matrix()) {
        log::error!("failed to set transform: {e:?}");
    }
    if let Err(e) = style.set_property("transform-origin", "0 0") {
        log::error!("failed to set transform-origin: {e:?}");
    }
}

/// Dispatch a `panzoom:*` CustomEvent on the element.
pub fn dispatch(element: &HtmlElement, note: &Notification) {
    let init = CustomEventInit::new();
    if let Some(json) = note.detail_json() {
        match js_sys::JSON::parse(&json) {
            Ok(detail) => init.set_detail(&detail),
            Err(e) => log::error!("bad event detail {json}: {e:?}"),
        }
    }
    let event = match CustomEvent::new_with_event_init_dict(note.event_name(), &init) {
        Ok(ev) => ev,
        Err(e) => {
            log::error!("failed to create {}: {e:?}", note.event_name());
            return;
        }
    };
    if let Err(e) = element.dispatch_event(&event) {
        log::error!("failed to dispatch {}: {e:?}", note.event_name());
    }
}

/// Run `f` once after `ms`. Returns the timeout handle.
pub fn set_timeout(f: impl FnOnce() + 'static, ms: i32) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let cb = Closure::once_into_js(f);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
}

pub fn clear_timeout(handle: i32) {
    if let Some(window) = web_sys::window() {
        window.clear_timeout_with_handle(handle);
    }
}
