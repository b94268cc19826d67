//! Binds a [`Viewport`] to a live element: subscribes to mouse, touch and
//! wheel input, feeds it content-box coordinates, and mirrors every change
//! into the element's CSS transform and `panzoom:*` events.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use panzoom_core::{ConfigPatch, ContainerMetrics, LocalPoint, Notification, PanZoomConfig, Transform, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlElement, MouseEvent, TouchEvent, WheelEvent};

use crate::dom;
use crate::listeners::{Subscription, Subscriptions};

struct Shared {
    element: HtmlElement,
    container: Element,
    metrics: ContainerMetrics,
    viewport: RefCell<Viewport>,
    /// Timeout that turns the CSS transition off after an animated update.
    pending_timer: Cell<Option<i32>>,
}

pub struct ViewportController {
    shared: Rc<Shared>,
    subscriptions: RefCell<Subscriptions>,
}

impl ViewportController {
    /// Control `element` inside its parent element.
    pub fn new(element: HtmlElement, config: PanZoomConfig) -> Result<Self, JsValue> {
        let container = element
            .parent_element()
            .ok_or_else(|| JsValue::from_str("panzoom element has no parent"))?;
        Self::with_container(element, container, config)
    }

    pub fn with_container(element: HtmlElement, container: Element, config: PanZoomConfig) -> Result<Self, JsValue> {
        let metrics = dom::read_container_metrics(&container);
        log::debug!("container metrics {metrics:?}");
        let shared = Rc::new(Shared {
            element,
            container,
            metrics,
            viewport: RefCell::new(Viewport::new(config)),
            pending_timer: Cell::new(None),
        });
        let subscriptions = subscribe(&shared)?;
        let initial = shared.viewport.borrow().transform();
        shared.apply(&initial, false);
        Ok(Self { shared, subscriptions: RefCell::new(subscriptions) })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.shared.element
    }

    pub fn transform(&self) -> Transform {
        self.shared.viewport.borrow().transform()
    }

    pub fn scale(&self) -> f64 {
        self.shared.viewport.borrow().scale()
    }

    pub fn pan(&self) -> (f64, f64) {
        self.shared.viewport.borrow().pan()
    }

    pub fn is_dragging(&self) -> bool {
        self.shared.viewport.borrow().is_dragging()
    }

    pub fn is_attached(&self) -> bool {
        !self.subscriptions.borrow().is_empty()
    }

    /// Zoom about the current origin; emits `panzoom:zoom`.
    pub fn set_zoom(&self, target: f64, animate: bool) -> Transform {
        let note = self.shared.viewport.borrow_mut().set_zoom(target);
        self.shared.commit(note, animate)
    }

    /// Move without bounds. Emits nothing.
    pub fn set_pan(&self, x: f64, y: f64, animate: bool) -> Transform {
        let t = self.shared.viewport.borrow_mut().set_pan(x, y);
        self.shared.apply(&t, animate);
        t
    }

    pub fn update_config(&self, patch: &ConfigPatch) {
        self.shared.viewport.borrow_mut().update_config(patch);
    }

    /// Back to the configured start transform; emits `panzoom:zoom`.
    pub fn reset_view(&self, animate: bool) -> Transform {
        let note = self.shared.viewport.borrow_mut().reset();
        self.shared.commit(note, animate)
    }

    /// Remove every listener and cancel a pending animation timer. The
    /// current transform is left in place. Safe to call more than once.
    pub fn teardown(&self) {
        self.subscriptions.borrow_mut().detach_all();
        if let Some(handle) = self.shared.pending_timer.take() {
            dom::clear_timeout(handle);
        }
    }
}

impl Drop for ViewportController {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Shared {
    fn local_point(&self, (client_x, client_y): (f64, f64)) -> LocalPoint {
        dom::local_point(&self.container, &self.metrics, client_x, client_y)
    }

    fn excluded(&self, ev: &Event) -> bool {
        let vp = self.viewport.borrow();
        dom::target_within(ev, &vp.config().exclude_selector)
    }

    fn apply(self: &Rc<Self>, t: &Transform, animate: bool) {
        dom::write_transform(&self.element, t, animate);
        if animate {
            self.schedule_transition_off();
        }
    }

    /// Apply and announce a zoom-type change. Callers must not hold a
    /// viewport borrow: event listeners may call straight back in.
    fn commit(self: &Rc<Self>, note: Notification, animate: bool) -> Transform {
        let t = match note {
            Notification::Zoom(t) => t,
            _ => self.viewport.borrow().transform(),
        };
        self.apply(&t, animate);
        dom::dispatch(&self.element, &note);
        t
    }

    fn schedule_transition_off(self: &Rc<Self>) {
        if let Some(previous) = self.pending_timer.take() {
            dom::clear_timeout(previous);
        }
        let weak: Weak<Shared> = Rc::downgrade(self);
        let result = dom::set_timeout(
            move || {
                if let Some(shared) = weak.upgrade() {
                    shared.pending_timer.set(None);
                    dom::set_transition(&shared.element, false);
                }
            },
            dom::ANIMATION_MS,
        );
        match result {
            Ok(handle) => self.pending_timer.set(Some(handle)),
            Err(e) => log::error!("failed to schedule transition reset: {e:?}"),
        }
    }

    fn on_mouse_down(self: &Rc<Self>, ev: &MouseEvent) {
        if self.excluded(ev) {
            return;
        }
        let at = self.local_point(dom::mouse_client(ev));
        let note = self.viewport.borrow_mut().begin_drag(at);
        ev.prevent_default();
        if let Some(note) = note {
            dom::dispatch(&self.element, &note);
        }
    }

    fn on_mouse_move(self: &Rc<Self>, ev: &MouseEvent) {
        if !self.viewport.borrow().is_dragging() {
            return;
        }
        let at = self.local_point(dom::mouse_client(ev));
        let moved = self.viewport.borrow_mut().drag_to(at);
        if let Some(t) = moved {
            self.apply(&t, false);
        }
    }

    fn on_touch_start(self: &Rc<Self>, ev: &TouchEvent) {
        if self.excluded(ev) || ev.touches().length() != 1 {
            return;
        }
        let Some(client) = dom::touch_client(ev) else { return };
        let at = self.local_point(client);
        let note = self.viewport.borrow_mut().begin_drag(at);
        if let Some(note) = note {
            dom::dispatch(&self.element, &note);
        }
    }

    fn on_touch_move(self: &Rc<Self>, ev: &TouchEvent) {
        if ev.touches().length() != 1 || !self.viewport.borrow().is_dragging() {
            return;
        }
        let Some(client) = dom::touch_client(ev) else { return };
        let at = self.local_point(client);
        let moved = self.viewport.borrow_mut().drag_to(at);
        if let Some(t) = moved {
            self.apply(&t, false);
            ev.prevent_default();
        }
    }

    /// mouseup, touchend and touchcancel.
    fn on_release(self: &Rc<Self>) {
        let note = self.viewport.borrow_mut().end_drag();
        if let Some(note) = note {
            dom::dispatch(&self.element, &note);
        }
    }

    fn on_wheel(self: &Rc<Self>, ev: &WheelEvent) {
        ev.prevent_default();
        let client = dom::mouse_client(ev);
        let note = self
            .viewport
            .borrow_mut()
            .wheel(ev.delta_y(), || self.local_point(client));
        if let Some(note) = note {
            self.commit(note, false);
        }
    }
}

/// Wrap a typed handler as an `Event` callback holding the shared state.
fn handler<E: JsCast + 'static>(shared: &Rc<Shared>, f: fn(&Rc<Shared>, &E)) -> impl FnMut(Event) + 'static {
    let shared = Rc::clone(shared);
    move |ev: Event| {
        if let Some(ev) = ev.dyn_ref::<E>() {
            f(&shared, ev);
        }
    }
}

fn subscribe(shared: &Rc<Shared>) -> Result<Subscriptions, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let element: &EventTarget = shared.element.as_ref();
    let container: &EventTarget = shared.container.as_ref();
    let document: &EventTarget = document.as_ref();

    // If any registration fails, dropping `subs` detaches the ones already made.
    let mut subs = Subscriptions::default();
    subs.push(Subscription::attach(element, "mousedown", handler(shared, Shared::on_mouse_down))?);
    subs.push(Subscription::attach(document, "mousemove", handler(shared, Shared::on_mouse_move))?);
    subs.push(Subscription::attach(document, "mouseup", handler::<MouseEvent>(shared, |s, _| s.on_release()))?);
    subs.push(Subscription::attach_active(container, "wheel", handler(shared, Shared::on_wheel))?);
    subs.push(Subscription::attach(element, "touchstart", handler(shared, Shared::on_touch_start))?);
    subs.push(Subscription::attach_active(document, "touchmove", handler(shared, Shared::on_touch_move))?);
    subs.push(Subscription::attach(document, "touchend", handler::<TouchEvent>(shared, |s, _| s.on_release()))?);
    subs.push(Subscription::attach(document, "touchcancel", handler::<TouchEvent>(shared, |s, _| s.on_release()))?);
    Ok(subs)
}
