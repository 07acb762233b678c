//! Small web-sys helpers shared by the widget components

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, Window};

use crate::error::PickerError;

pub fn window() -> Result<Window, PickerError> {
    web_sys::window().ok_or(PickerError::NoWindow)
}

pub fn document() -> Result<Document, PickerError> {
    window()?.document().ok_or(PickerError::NoDocument)
}

/// Whether `DOMContentLoaded` has already fired
pub fn dom_content_loaded(document: &Document) -> bool {
    document.ready_state() != "loading"
}

/// Resolves once the document has been parsed
pub async fn wait_for_dom_ready() -> Result<(), PickerError> {
    let document = document()?;
    if dom_content_loaded(&document) {
        return Ok(());
    }

    let mut register_error = None;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let options = web_sys::AddEventListenerOptions::new();
        options.set_once(true);
        if let Err(e) = document.add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            &resolve,
            &options,
        ) {
            register_error = Some(e);
        }
    });
    if let Some(e) = register_error {
        return Err(e.into());
    }

    wasm_bindgen_futures::JsFuture::from(promise).await?;
    Ok(())
}

/// Element an event was dispatched on, walking up from text nodes
pub fn event_element(event: &Event) -> Option<Element> {
    let target = event.target()?;
    match target.dyn_into::<Element>() {
        Ok(element) => Some(element),
        Err(target) => target
            .dyn_into::<web_sys::Node>()
            .ok()
            .and_then(|node| node.parent_element()),
    }
}

/// Generate a random alphanumeric id (9 characters) for a trigger element
pub fn generate_trigger_id() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..9)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// An event listener that stays registered for as long as this value is alive
///
/// Closures are kept here instead of being `forget()`-ed, dropping the listener
/// removes it from its target.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, PickerError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            log::debug!("Failed to remove {} listener: {:?}", self.event, e);
        }
    }
}
