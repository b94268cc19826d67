use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

/// One registered DOM listener. The closure registered with the browser is
/// the same one handed back to `removeEventListener`, so detaching always
/// finds it.
pub struct Subscription {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Subscription {
    pub fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), kind, callback })
    }

    /// Register with `passive: false` so the handler may call `preventDefault`
    /// (wheel, and touchmove on the document).
    pub fn attach_active(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { target: target.clone(), kind, callback })
    }

    pub fn detach(self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            log::error!("failed to remove {} listener: {e:?}", self.kind);
        }
    }
}

/// Every listener a controller owns, detached together.
#[derive(Default)]
pub struct Subscriptions {
    list: Vec<Subscription>,
}

impl Subscriptions {
    pub fn push(&mut self, sub: Subscription) {
        self.list.push(sub);
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn detach_all(&mut self) {
        for sub in self.list.drain(..) {
            sub.detach();
        }
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.detach_all();
    }
}
