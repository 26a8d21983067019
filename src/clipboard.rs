use serde::Serialize;
use std::fmt;

/// Removes every whitespace character, so `"ES12 3456"` copies as `"ES123456"`.
pub fn normalize(text: &str) -> String {
    text.chars().filter(|ch| !ch.is_whitespace()).collect()
}

/// Which mechanism placed the text on the clipboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyPath {
    ClipboardApi,
    SelectionFallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CopyError {
    /// The page has no document or body to host the fallback selection.
    Unavailable,
    /// `execCommand("copy")` ran but reported that nothing was copied.
    CommandRejected,
    Js(String),
}

impl CopyError {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unavailable => "unavailable",
            Self::CommandRejected => "command_rejected",
            Self::Js(message) => message.as_str(),
        }
    }
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Glyph shown in place of the trigger's icon while the copy is confirmed.
pub const CONFIRMED_GLYPH: &str = "fas fa-check";

/// Clipboard API first when the page may use it, the selection fallback otherwise.
pub fn first_path(clipboard_api_available: bool) -> CopyPath {
    if clipboard_api_available {
        CopyPath::ClipboardApi
    } else {
        CopyPath::SelectionFallback
    }
}

/// Outcome of one write attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CopyStep {
    Copied(CopyPath),
    /// The clipboard API rejected the write; retry through the selection.
    Fallback(CopyError),
    Failed(CopyError),
}

impl CopyStep {
    pub fn after(path: CopyPath, outcome: Result<(), CopyError>) -> Self {
        match (path, outcome) {
            (path, Ok(())) => Self::Copied(path),
            (CopyPath::ClipboardApi, Err(err)) => Self::Fallback(err),
            (CopyPath::SelectionFallback, Err(err)) => Self::Failed(err),
        }
    }
}

/// What a copy trigger does once the copy settles. A failed copy leaves the
/// trigger untouched and shows no toast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CopyFeedback {
    pub copied: bool,
    pub schedule_restore: bool,
    pub notify: bool,
}

impl CopyFeedback {
    pub fn on_result(result: &Result<CopyPath, CopyError>, has_icon: bool) -> Self {
        match result {
            Ok(_) => Self {
                copied: true,
                schedule_restore: has_icon,
                notify: true,
            },
            Err(_) => Self::default(),
        }
    }
}

/// Icon class for a trigger in the given `copied` state.
pub fn icon_glyph(copied: bool, icon: &str) -> &str {
    if copied {
        CONFIRMED_GLYPH
    } else {
        icon
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::copy_text;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{first_path, normalize, CopyError, CopyPath, CopyStep};
    use crate::logging::{log_event, LogLevel};
    use js_sys::Reflect;
    use serde_json::json;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{window, Document, HtmlDocument, HtmlTextAreaElement};

    impl From<JsValue> for CopyError {
        fn from(value: JsValue) -> Self {
            let message = value
                .as_string()
                .or_else(|| {
                    value
                        .dyn_ref::<js_sys::Error>()
                        .map(|err| String::from(err.message()))
                })
                .unwrap_or_else(|| "javascript error".to_string());
            Self::Js(message)
        }
    }

    fn secure_clipboard_available() -> bool {
        let Some(win) = window() else {
            return false;
        };
        let navigator = win.navigator();
        win.is_secure_context()
            && Reflect::get(&navigator, &JsValue::from_str("clipboard"))
                .map(|value| !value.is_undefined() && !value.is_null())
                .unwrap_or(false)
    }

    async fn write_with_clipboard_api(text: &str) -> Result<(), CopyError> {
        let win = window().ok_or(CopyError::Unavailable)?;
        let promise = win.navigator().clipboard().write_text(text);
        JsFuture::from(promise).await?;
        Ok(())
    }

    fn write_with_selection(text: &str) -> Result<(), CopyError> {
        let document = window()
            .and_then(|w| w.document())
            .ok_or(CopyError::Unavailable)?;
        let body = document.body().ok_or(CopyError::Unavailable)?;

        let textarea: HtmlTextAreaElement = document
            .create_element("textarea")?
            .dyn_into()
            .map_err(JsValue::from)?;
        textarea.set_value(text);
        let style = textarea.style();
        style.set_property("position", "fixed")?;
        style.set_property("left", "-999999px")?;
        style.set_property("top", "-999999px")?;
        body.append_child(&textarea)?;

        let copied = select_and_copy(&document, &textarea);
        textarea.remove();
        copied
    }

    fn select_and_copy(document: &Document, textarea: &HtmlTextAreaElement) -> Result<(), CopyError> {
        textarea.focus()?;
        textarea.select();

        let html_document = document
            .dyn_ref::<HtmlDocument>()
            .ok_or(CopyError::Unavailable)?;
        if html_document.exec_command("copy")? {
            Ok(())
        } else {
            Err(CopyError::CommandRejected)
        }
    }

    /// Copies the whitespace-free form of `raw`. The clipboard API is tried
    /// first in secure contexts; any rejection falls through to a hidden
    /// textarea selection.
    pub async fn copy_text(raw: &str) -> Result<CopyPath, CopyError> {
        let text = normalize(raw);
        let mut path = first_path(secure_clipboard_available());

        loop {
            let outcome = match path {
                CopyPath::ClipboardApi => write_with_clipboard_api(&text).await,
                CopyPath::SelectionFallback => write_with_selection(&text),
            };

            match CopyStep::after(path, outcome) {
                CopyStep::Copied(path) => return Ok(path),
                CopyStep::Fallback(err) => {
                    log_event(
                        LogLevel::Warn,
                        "clipboard_primary_failed",
                        json!({ "reason": err.as_str() }),
                    );
                    path = CopyPath::SelectionFallback;
                }
                CopyStep::Failed(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_all_whitespace() {
        assert_eq!(normalize("abc 123  xyz"), "abc123xyz");
        assert_eq!(normalize("\tES12 3456\n7890\u{a0}1234 "), "ES12345678901234");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn normalize_keeps_non_whitespace_untouched() {
        assert_eq!(normalize("+34-600-123-456"), "+34-600-123-456");
    }

    #[test]
    fn errors_render_stable_reasons() {
        assert_eq!(CopyError::CommandRejected.to_string(), "command_rejected");
        assert_eq!(CopyError::Js("NotAllowedError".to_string()).to_string(), "NotAllowedError");
    }

    #[test]
    fn rejected_clipboard_api_falls_back_to_selection() {
        assert_eq!(first_path(true), CopyPath::ClipboardApi);
        assert_eq!(first_path(false), CopyPath::SelectionFallback);

        let denied = CopyError::Js("NotAllowedError".to_string());
        assert_eq!(
            CopyStep::after(CopyPath::ClipboardApi, Err(denied.clone())),
            CopyStep::Fallback(denied)
        );
        assert_eq!(
            CopyStep::after(CopyPath::ClipboardApi, Ok(())),
            CopyStep::Copied(CopyPath::ClipboardApi)
        );
    }

    #[test]
    fn selection_failure_is_final() {
        assert_eq!(
            CopyStep::after(CopyPath::SelectionFallback, Err(CopyError::CommandRejected)),
            CopyStep::Failed(CopyError::CommandRejected)
        );
        assert_eq!(
            CopyStep::after(CopyPath::SelectionFallback, Ok(())),
            CopyStep::Copied(CopyPath::SelectionFallback)
        );
    }

    #[test]
    fn failed_copy_shows_no_feedback() {
        for has_icon in [true, false] {
            let feedback = CopyFeedback::on_result(&Err(CopyError::CommandRejected), has_icon);
            assert_eq!(feedback, CopyFeedback::default());
            assert!(!feedback.copied);
            assert!(!feedback.notify);
        }
    }

    #[test]
    fn copy_with_icon_confirms_then_restores() {
        let feedback = CopyFeedback::on_result(&Ok(CopyPath::ClipboardApi), true);
        assert_eq!(
            feedback,
            CopyFeedback {
                copied: true,
                schedule_restore: true,
                notify: true,
            }
        );

        assert_eq!(icon_glyph(feedback.copied, "fas fa-copy"), CONFIRMED_GLYPH);
        // The restore timer clears `copied`, which brings the original icon back.
        assert_eq!(icon_glyph(false, "fas fa-copy"), "fas fa-copy");
    }

    #[test]
    fn copy_without_icon_keeps_copied_state() {
        let feedback = CopyFeedback::on_result(&Ok(CopyPath::SelectionFallback), false);

        assert!(feedback.copied);
        assert!(feedback.notify);
        assert!(!feedback.schedule_restore);
    }
}
