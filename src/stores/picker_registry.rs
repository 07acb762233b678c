//! Page-wide picker registry
//!
//! Every picker on a page shares one dataset, one popup element, one `PickerState`
//! and one pair of outside-click/resize listeners. They all live here, in a
//! thread-local registry that is filled lazily by the first picker and emptied only
//! by [`teardown`].
//!
//! Event closures are owned by the registry (see `Listener`) rather than leaked, so
//! teardown removes them from the page.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Event, Node};

use crate::components::field_wrapper::{find_fields, wrap_field, TargetField, WrappedField};
use crate::components::markup::{PopupMarkup, TRIGGER_CLASS};
use crate::components::popup::Popup;
use crate::error::PickerError;
use crate::options::{PickerOptions, SelectCallback};
use crate::services::emoji_dataset::fetch_dataset;
use crate::stores::emoji_store::{DatasetState, EmojiDataset, EmojiEntry};
use crate::stores::picker_state::{PickerState, Transition, TriggerId};
use crate::utils::dom::{self, dom_content_loaded, event_element, wait_for_dom_ready, Listener};

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

/// A constructed picker: what to attach to and how
#[derive(Debug)]
pub struct PickerInstance {
    pub selector: String,
    pub options: PickerOptions,
}

struct FieldBinding {
    wrapped: WrappedField,
    on_select: Option<SelectCallback>,
    _click: Listener,
}

#[derive(Default)]
struct Registry {
    /// Bumped by teardown so late dataset responses are dropped
    generation: u32,
    dataset: DatasetState<Rc<EmojiDataset>>,
    /// Pickers waiting for the dataset and/or DOMContentLoaded
    pending: Vec<Rc<PickerInstance>>,
    popup: Option<Popup>,
    state: PickerState,
    fields: Vec<FieldBinding>,
    popup_listeners: Vec<Listener>,
    guard_listeners: Vec<Listener>,
}

enum NextStep {
    Done,
    Fetch { url: String, generation: u32 },
    WaitForDom,
}

fn with_registry<R>(f: impl FnOnce(&mut Registry) -> R) -> Option<R> {
    REGISTRY.with(|cell| match cell.try_borrow_mut() {
        Ok(mut registry) => Some(f(&mut registry)),
        Err(_) => {
            log::warn!("Emoji picker is busy, event dropped");
            None
        }
    })
}

fn report(result: Option<Result<(), PickerError>>) {
    if let Some(Err(e)) = result {
        log::error!("Emoji picker: {}", e);
    }
}

/// Attach `instance` now, or queue it until the dataset and the DOM are ready
pub fn request(instance: Rc<PickerInstance>) -> Result<(), PickerError> {
    let document = dom::document()?;

    let step = with_registry(|registry| match &registry.dataset {
        DatasetState::Loaded(_) if dom_content_loaded(&document) => {
            if let Err(e) = registry.initialize(&document, &instance) {
                log::error!("Failed to attach emoji picker to {:?}: {}", instance.selector, e);
            }
            NextStep::Done
        }
        DatasetState::Loaded(_) => {
            registry.pending.push(instance.clone());
            NextStep::WaitForDom
        }
        DatasetState::Loading => {
            registry.pending.push(instance.clone());
            NextStep::Done
        }
        DatasetState::Pending => {
            registry.dataset = DatasetState::Loading;
            registry.pending.push(instance.clone());
            NextStep::Fetch {
                url: instance.options.dataset_url.clone(),
                generation: registry.generation,
            }
        }
        DatasetState::Failed(e) => {
            log::warn!(
                "Emoji dataset unavailable ({}), picker for {:?} stays inactive",
                e,
                instance.selector
            );
            NextStep::Done
        }
    })
    .ok_or_else(|| PickerError::Dom("picker registry is busy".to_string()))?;

    match step {
        NextStep::Fetch { url, generation } => {
            wasm_bindgen_futures::spawn_local(load_dataset(url, generation));
        }
        NextStep::WaitForDom => {
            wasm_bindgen_futures::spawn_local(async {
                match wait_for_dom_ready().await {
                    Ok(()) => flush_pending(),
                    Err(e) => log::error!("Emoji picker: {}", e),
                }
            });
        }
        NextStep::Done => {}
    }
    Ok(())
}

async fn load_dataset(url: String, generation: u32) {
    log::info!("Fetching emoji dataset from {}", url);
    let (dataset, dom_ready) = futures::join!(fetch_dataset(&url), wait_for_dom_ready());
    let result = dom_ready.and(dataset).map(Rc::new);

    let stored = with_registry(|registry| {
        if registry.generation != generation || !registry.dataset.is_loading() {
            log::debug!("Discarding emoji dataset from a torn down page state");
            return false;
        }
        if let Err(e) = &result {
            log::error!(
                "Failed to load emoji dataset, {} picker(s) stay inactive: {}",
                registry.pending.len(),
                e
            );
            registry.pending.clear();
        }
        registry.dataset = result.into();
        true
    });

    if stored == Some(true) {
        flush_pending();
    }
}

fn flush_pending() {
    report(with_registry(|registry| {
        if registry.dataset.data().is_none() {
            return Ok(());
        }
        let document = dom::document()?;
        for instance in std::mem::take(&mut registry.pending) {
            if let Err(e) = registry.initialize(&document, &instance) {
                log::error!("Failed to attach emoji picker to {:?}: {}", instance.selector, e);
            }
        }
        Ok(())
    }));
}

/// Use `dataset` instead of fetching one. Pickers waiting on a request in flight are
/// attached right away and the response is dropped. Returns `false` when a dataset is
/// already loaded.
pub fn provide_dataset(dataset: EmojiDataset) -> bool {
    let waiting = with_registry(|registry| {
        if registry.dataset.data().is_some() {
            return None;
        }
        registry.dataset = DatasetState::Loaded(Rc::new(dataset));
        Some(!registry.pending.is_empty())
    })
    .flatten();

    match waiting {
        None => false,
        Some(false) => true,
        Some(true) => {
            match dom::document() {
                Ok(document) if dom_content_loaded(&document) => flush_pending(),
                _ => wasm_bindgen_futures::spawn_local(async {
                    match wait_for_dom_ready().await {
                        Ok(()) => flush_pending(),
                        Err(e) => log::error!("Emoji picker: {}", e),
                    }
                }),
            }
            true
        }
    }
}

/// Remove the popup, every listener and every trigger; forget the dataset.
pub fn teardown() {
    let taken = REGISTRY.with(|cell| {
        cell.try_borrow_mut().map(|mut registry| {
            let generation = registry.generation.wrapping_add(1);
            std::mem::replace(
                &mut *registry,
                Registry {
                    generation,
                    ..Registry::default()
                },
            )
        })
    });

    match taken {
        Ok(registry) => registry.dispose(),
        Err(_) => log::warn!("Emoji picker teardown requested during event dispatch, ignored"),
    }
}

fn peek<R: Default>(f: impl FnOnce(&Registry) -> R) -> R {
    REGISTRY.with(|cell| cell.try_borrow().map(|registry| f(&registry)).unwrap_or_default())
}

pub fn is_open() -> bool {
    peek(|registry| registry.state.is_open())
}

pub fn active_trigger() -> Option<TriggerId> {
    peek(|registry| registry.state.active_trigger().cloned())
}

/// `pending`, `loading`, `loaded` or `failed`
pub fn dataset_status() -> &'static str {
    peek(|registry| Some(registry.dataset.status())).unwrap_or("pending")
}

/// Number of fields currently carrying a trigger
pub fn field_count() -> usize {
    peek(|registry| registry.fields.len())
}

impl Registry {
    /// Wrap every eligible field for `instance`; builds the popup on first use
    fn initialize(&mut self, document: &Document, instance: &PickerInstance) -> Result<(), PickerError> {
        let fields = find_fields(document, &instance.selector);
        if fields.is_empty() {
            log::debug!("No text fields match {:?}", instance.selector);
            return Ok(());
        }

        self.ensure_popup(document)?;
        self.prune_detached();

        for field in fields {
            let wrapped = wrap_field(document, field, &instance.options)?;
            let trigger_id = wrapped.trigger_id.clone();
            let click = Listener::new(&wrapped.trigger, "click", move |_| {
                handle_trigger_click(&trigger_id)
            })?;
            self.fields.push(FieldBinding {
                wrapped,
                on_select: instance.options.on_select.clone(),
                _click: click,
            });
        }
        log::info!("Emoji picker attached to {:?}", instance.selector);
        Ok(())
    }

    fn ensure_popup(&mut self, document: &Document) -> Result<(), PickerError> {
        if self.popup.is_some() {
            return Ok(());
        }
        let dataset = self
            .dataset
            .data()
            .cloned()
            .ok_or_else(|| PickerError::Dom("emoji dataset not loaded".to_string()))?;

        let elements = PopupMarkup::from_dataset(&dataset)
            .render(document)?
            .ok_or_else(|| PickerError::Dom("an emoji picker popup already exists".to_string()))?;
        let popup = Popup::new(elements);

        self.state = PickerState::new(
            dataset.first_category().map(|c| c.id.clone()),
            popup.measure_waypoints(),
        );
        self.popup_listeners = popup_listeners(&popup)?;
        if self.guard_listeners.is_empty() {
            self.guard_listeners = guard_listeners(document)?;
        }
        self.popup = Some(popup);
        Ok(())
    }

    /// Carry a state transition over to the popup element
    fn apply(&mut self, transition: Transition) -> Result<(), PickerError> {
        let Some(popup) = &self.popup else {
            return Ok(());
        };
        match transition {
            Transition::Opened { trigger } => {
                let trigger_element = find_binding(&self.fields, &trigger)
                    .filter(|b| b.wrapped.is_connected())
                    .map(|b| b.wrapped.trigger.clone());
                let Some(trigger_element) = trigger_element else {
                    log::debug!("Trigger {} left the page, closing", trigger.as_str());
                    self.state.invalidate_trigger(&trigger);
                    popup.hide()?;
                    self.prune_detached();
                    return Ok(());
                };
                popup.hide()?;
                popup.reset(self.state.first_category())?;
                self.state.set_waypoints(popup.measure_waypoints());
                let position = popup.show_below(&trigger_element)?;
                log::debug!(
                    "Emoji picker opened for {} at {}",
                    trigger.as_str(),
                    position.to_style()
                );
            }
            Transition::Closed => popup.hide()?,
            Transition::Unchanged => {}
        }
        Ok(())
    }

    fn select(&mut self, event: &Event) -> Option<(EmojiEntry, TargetField, SelectCallback)> {
        let trigger = self.state.active_trigger()?.clone();
        let element = event_element(event)?;
        let index = self.popup.as_ref()?.elements().item_index(&element)?;

        let connected = find_binding(&self.fields, &trigger).map(|b| b.wrapped.is_connected());
        if connected != Some(true) {
            let transition = self.state.invalidate_trigger(&trigger);
            report(Some(self.apply(transition)));
            self.prune_detached();
            return None;
        }

        let entry = self.dataset.data()?.entry_at(index)?.clone();
        let binding = find_binding(&self.fields, &trigger)?;
        binding.wrapped.field.append(&entry.glyph);
        log::debug!("Inserted {} ({})", entry.glyph, entry.code);

        let callback = binding.on_select.clone()?;
        Some((entry, binding.wrapped.field.clone(), callback))
    }
}

impl Registry {
    /// Drop bindings whose trigger or field left the page, deregistering their
    /// click listeners
    fn prune_detached(&mut self) {
        let before = self.fields.len();
        self.fields.retain(|binding| {
            let connected = binding.wrapped.is_connected();
            if !connected {
                binding.wrapped.trigger.remove();
            }
            connected
        });
        if let Some(trigger) = self.state.active_trigger().cloned() {
            if find_binding(&self.fields, &trigger).is_none() {
                self.state.invalidate_trigger(&trigger);
                if let Some(popup) = &self.popup {
                    report(Some(popup.hide()));
                }
            }
        }
        let pruned = before - self.fields.len();
        if pruned > 0 {
            log::debug!("Released {} emoji picker field(s) removed from the page", pruned);
        }
    }
}

fn find_binding<'a>(fields: &'a [FieldBinding], trigger: &TriggerId) -> Option<&'a FieldBinding> {
    fields.iter().find(|b| &b.wrapped.trigger_id == trigger)
}

fn popup_listeners(popup: &Popup) -> Result<Vec<Listener>, PickerError> {
    let elements = popup.elements();
    Ok(vec![
        Listener::new(&elements.tab_bar, "click", handle_tab_click)?,
        Listener::new(&elements.scroller, "scroll", |_| handle_scroll())?,
        Listener::new(&elements.scroller, "click", handle_emoji_click)?,
        Listener::new(&elements.search_input, "keyup", |_| handle_search())?,
        Listener::new(&elements.clear_icon, "click", |_| handle_clear_search())?,
    ])
}

fn guard_listeners(document: &Document) -> Result<Vec<Listener>, PickerError> {
    let window = dom::window()?;
    Ok(vec![
        Listener::new(document, "click", handle_document_click)?,
        Listener::new(&window, "resize", |_| handle_resize())?,
    ])
}

fn handle_trigger_click(trigger: &TriggerId) {
    report(with_registry(|registry| {
        let transition = registry.state.toggle(trigger);
        registry.apply(transition)
    }));
}

fn handle_tab_click(event: Event) {
    report(with_registry(|registry| {
        let Some(popup) = &registry.popup else {
            return Ok(());
        };
        let Some(id) = event_element(&event).and_then(|el| popup.elements().tab_id(&el)) else {
            return Ok(());
        };
        popup.scroll_to_category(&id);
        popup.activate_tab(&id)?;
        registry.state.select_category(id);
        Ok(())
    }));
}

fn handle_scroll() {
    report(with_registry(|registry| {
        let Some(popup) = &registry.popup else {
            return Ok(());
        };
        match registry.state.track_scroll(popup.scroll_top()) {
            Some(id) => popup.activate_tab(id),
            None => Ok(()),
        }
    }));
}

fn handle_search() {
    report(with_registry(|registry| {
        let Some(popup) = &registry.popup else {
            return Ok(());
        };
        let query = popup.search_query();
        registry.state.set_search_query(&query);
        popup.apply_search(&query).map(|_| ())
    }));
}

fn handle_clear_search() {
    report(with_registry(|registry| {
        let Some(popup) = &registry.popup else {
            return Ok(());
        };
        registry.state.set_search_query("");
        popup.clear_search()
    }));
}

fn handle_emoji_click(event: Event) {
    // the user callback runs with the registry released, it may attach more pickers
    if let Some((entry, field, callback)) = with_registry(|registry| registry.select(&event)).flatten() {
        callback(&entry, &field);
    }
}

fn handle_document_click(event: Event) {
    report(with_registry(|registry| {
        if !registry.state.is_open() {
            return Ok(());
        }
        let Some(popup) = &registry.popup else {
            return Ok(());
        };
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        let inside_popup = target.as_ref().map(|node| popup.contains(node)).unwrap_or(false);
        let inside_trigger = event_element(&event)
            .and_then(|el| el.closest(&format!(".{}", TRIGGER_CLASS)).ok().flatten())
            .is_some();

        let transition = registry.state.handle_outside_click(inside_popup, inside_trigger);
        registry.apply(transition)
    }));
}

fn handle_resize() {
    report(with_registry(|registry| {
        let transition = registry.state.handle_resize();
        registry.apply(transition)
    }));
}

impl Registry {
    fn dispose(self) {
        let Registry {
            popup,
            fields,
            popup_listeners,
            guard_listeners,
            pending,
            ..
        } = self;

        drop(guard_listeners);
        drop(popup_listeners);
        for binding in fields {
            binding.wrapped.unwrap();
        }
        if let Some(popup) = popup {
            popup.remove();
        }
        if !pending.is_empty() {
            log::debug!("Dropped {} pending emoji picker(s)", pending.len());
        }
    }
}
