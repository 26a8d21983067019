/// Model behind the single toast element. Every `notify` bumps the
/// generation; show and hide callbacks scheduled for an older generation are
/// dropped, so the latest message is the one on screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastModel {
    message: String,
    visible: bool,
    generation: u64,
}

impl ToastModel {
    pub fn notify(&mut self, message: &str) -> u64 {
        self.message = message.to_string();
        self.generation += 1;
        self.generation
    }

    /// Returns false when the callback belongs to a superseded message.
    pub fn show(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.visible = true;
        true
    }

    pub fn hide(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.visible = false;
        true
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{configure, notify};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::ToastModel;
    use crate::config::{DEFAULT_FEEDBACK_MS, DEFAULT_TOAST_SHOW_DELAY_MS};
    use crate::logging::{debug_on_error, log_event, LogLevel};
    use gloo_timers::callback::Timeout;
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{window, HtmlElement};

    const TOAST_STYLE: &str = "position: fixed; bottom: 100px; left: 50%; \
        transform: translateX(-50%) translateY(20px); background: #333; color: white; \
        padding: 12px 24px; border-radius: 8px; font-size: 14px; z-index: 1000; opacity: 0; \
        transition: all 0.3s ease; box-shadow: 0 4px 12px rgba(0, 0, 0, 0.3);";

    struct ToastHost {
        element: HtmlElement,
        model: ToastModel,
    }

    thread_local! {
        static TOAST: RefCell<Option<ToastHost>> = const { RefCell::new(None) };
        static TIMING: Cell<(u32, u32)> = const {
            Cell::new((DEFAULT_TOAST_SHOW_DELAY_MS, DEFAULT_FEEDBACK_MS))
        };
    }

    /// Sets the show delay and on-screen time used by every later `notify`.
    pub fn configure(show_delay_ms: u32, visible_ms: u32) {
        TIMING.with(|timing| timing.set((show_delay_ms, visible_ms)));
    }

    fn create_element() -> Result<HtmlElement, JsValue> {
        let document = window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("document unavailable"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("body unavailable"))?;
        let element: HtmlElement = document.create_element("div")?.dyn_into()?;
        element.set_class_name("toast");
        element.set_attribute("role", "status")?;
        element.style().set_css_text(TOAST_STYLE);
        body.append_child(&element)?;
        Ok(element)
    }

    fn set_visible(element: &HtmlElement, visible: bool) {
        let style = element.style();
        let (opacity, transform) = if visible {
            ("1", "translateX(-50%) translateY(0)")
        } else {
            ("0", "translateX(-50%) translateY(20px)")
        };
        debug_on_error(
            "toast_style_failed",
            style
                .set_property("opacity", opacity)
                .and_then(|()| style.set_property("transform", transform)),
        );
    }

    fn with_host(generation: u64, apply: fn(&mut ToastModel, u64) -> bool, visible: bool) {
        TOAST.with(|slot| {
            if let Some(host) = slot.borrow_mut().as_mut() {
                if apply(&mut host.model, generation) {
                    set_visible(&host.element, visible);
                }
            }
        });
    }

    /// Shows `message` in the page toast, creating the element on first use.
    pub fn notify(message: &str) {
        let generation = TOAST.with(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.is_none() {
                match create_element() {
                    Ok(element) => {
                        *slot = Some(ToastHost {
                            element,
                            model: ToastModel::default(),
                        })
                    }
                    Err(err) => {
                        log_event(
                            LogLevel::Error,
                            "toast_unavailable",
                            json!({ "error": format!("{err:?}") }),
                        );
                        return None;
                    }
                }
            }

            let host = slot.as_mut()?;
            let generation = host.model.notify(message);
            host.element.set_text_content(Some(host.model.message()));
            Some(generation)
        });

        let Some(generation) = generation else {
            return;
        };
        let (show_delay_ms, visible_ms) = TIMING.with(Cell::get);

        Timeout::new(show_delay_ms, move || {
            with_host(generation, ToastModel::show, true);
        })
        .forget();

        Timeout::new(visible_ms, move || {
            with_host(generation, ToastModel::hide, false);
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_notify_shows_then_hides() {
        let mut toast = ToastModel::default();
        let generation = toast.notify("¡Copiado al portapapeles!");

        assert!(!toast.is_visible());
        assert!(toast.show(generation));
        assert!(toast.is_visible());
        assert!(toast.hide(generation));
        assert!(!toast.is_visible());
    }

    #[test]
    fn quick_repeat_keeps_latest_message_visible() {
        let mut toast = ToastModel::default();
        let first = toast.notify("first");
        assert!(toast.show(first));

        let second = toast.notify("second");
        assert!(!toast.show(first));
        assert!(toast.show(second));

        // The first hide timer fires while the second message is on screen.
        assert!(!toast.hide(first));
        assert!(toast.is_visible());
        assert_eq!(toast.message(), "second");

        assert!(toast.hide(second));
        assert!(!toast.is_visible());
    }
}
