use crate::logging::{debug_on_error, log_event, LogLevel};
use crate::reveal::{RevealOptions, RevealRegistry, RevealState};
use crate::scrolling::{anchor_target_id, scroll_destination, SectionBounds};
use js_sys::{Array, Reflect};
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Element, Event, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions,
};

pub const HEADER_ID: &str = "navbar";
const SECTION_SELECTOR: &str = "section[id]";
const REVEAL_ID_ATTR: &str = "data-reveal-id";

pub fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn smooth_scroll_to(top: f64) {
    let Some(win) = window() else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
}

fn html_element_by_id(id: &str) -> Option<HtmlElement> {
    window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// Distance from the top of the document, independent of offset parents.
fn document_top(element: &Element) -> f64 {
    element.get_bounding_client_rect().top() + scroll_y()
}

pub fn header_height() -> f64 {
    html_element_by_id(HEADER_ID)
        .map(|header| f64::from(header.offset_height()))
        .unwrap_or(0.0)
}

/// Scrolls so the anchor target sits just below the header. Returns false
/// when the fragment does not resolve to an element.
pub fn scroll_to_anchor(href: &str) -> bool {
    let target = anchor_target_id(href).and_then(html_element_by_id);

    let Some(target) = target else {
        log_event(LogLevel::Debug, "anchor_target_missing", json!({ "href": href }));
        return false;
    };

    smooth_scroll_to(scroll_destination(document_top(&target), header_height()));
    true
}

/// Reads the bounds of every `section[id]` in document order.
pub fn section_bounds() -> Vec<SectionBounds> {
    let Some(sections) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector_all(SECTION_SELECTOR).ok())
    else {
        return Vec::new();
    };

    (0..sections.length())
        .filter_map(|index| sections.get(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(|section| SectionBounds {
            id: section.id(),
            top: document_top(&section),
            height: f64::from(section.offset_height()),
        })
        .collect()
}

pub fn set_body_scroll_lock(locked: bool) {
    let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };

    let style = body.style();
    let applied = if locked {
        style.set_property("overflow", "hidden")
    } else {
        style.remove_property("overflow").map(drop)
    };
    debug_on_error("scroll_lock_failed", applied);
}

pub fn supports_intersection_observer() -> bool {
    window()
        .map(|win| {
            let win: JsValue = win.into();
            Reflect::has(&win, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
        })
        .unwrap_or(false)
}

/// A DOM event subscription that is removed again when dropped.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Option<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .ok()?;

        Some(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        debug_on_error(
            "listener_remove_failed",
            self.target
                .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref()),
        );
    }
}

type RevealCallback = Rc<dyn Fn(RevealState)>;

#[derive(Default)]
struct RevealTargets {
    registry: RevealRegistry,
    callbacks: HashMap<u32, RevealCallback>,
}

/// One `IntersectionObserver` shared by every reveal candidate on the page.
/// Each candidate is reported once, on its first intersection, and then
/// unobserved.
pub struct RevealObserver {
    observer: IntersectionObserver,
    targets: Rc<RefCell<RevealTargets>>,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl RevealObserver {
    /// Returns `None` when the browser cannot provide intersection events.
    pub fn new(threshold: f64) -> Option<Self> {
        if !supports_intersection_observer() {
            return None;
        }

        let targets = Rc::new(RefCell::new(RevealTargets::default()));
        let callback = {
            let targets = targets.clone();
            Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                move |entries: Array, observer: IntersectionObserver| {
                    let mut revealed = Vec::new();
                    {
                        let mut targets = targets.borrow_mut();
                        for entry in entries.iter() {
                            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                                continue;
                            };
                            let target = entry.target();
                            let Some(id) = target
                                .get_attribute(REVEAL_ID_ATTR)
                                .and_then(|value| value.parse::<u32>().ok())
                            else {
                                continue;
                            };

                            if let Some(state) = targets.registry.on_entry(id, entry.is_intersecting()) {
                                observer.unobserve(&target);
                                if let Some(on_reveal) = targets.callbacks.remove(&id) {
                                    revealed.push((on_reveal, state));
                                }
                            }
                        }
                    }

                    // Callbacks re-render components, which may drop registrations.
                    for (on_reveal, state) in revealed {
                        on_reveal(state);
                    }
                },
            )
        };

        let init = IntersectionObserverInit::new();
        init.set_root_margin("0px");
        init.set_threshold(&JsValue::from_f64(threshold));

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).ok()?;

        Some(Self {
            observer,
            targets,
            _callback: callback,
        })
    }

    /// Starts watching `element`. The returned registration stops watching it
    /// when dropped.
    pub fn observe<F>(&self, element: &Element, options: RevealOptions, on_reveal: F) -> Option<RevealRegistration>
    where
        F: Fn(RevealState) + 'static,
    {
        let id = {
            let mut targets = self.targets.borrow_mut();
            let id = targets.registry.register(options);
            targets.callbacks.insert(id, Rc::new(on_reveal));
            id
        };

        let registration = RevealRegistration {
            id,
            element: element.clone(),
            observer: self.observer.clone(),
            targets: self.targets.clone(),
        };
        element.set_attribute(REVEAL_ID_ATTR, &id.to_string()).ok()?;
        self.observer.observe(element);

        Some(registration)
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub struct RevealRegistration {
    id: u32,
    element: Element,
    observer: IntersectionObserver,
    targets: Rc<RefCell<RevealTargets>>,
}

impl Drop for RevealRegistration {
    fn drop(&mut self) {
        self.observer.unobserve(&self.element);
        let mut targets = self.targets.borrow_mut();
        targets.registry.release(self.id);
        targets.callbacks.remove(&self.id);
    }
}
