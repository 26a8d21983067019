use std::cell::Cell;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
                LogLevel::Warn => 2,
                LogLevel::Error => 3,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown log level `{other}`")),
        }
    }
}

thread_local! {
    static MIN_LEVEL: Cell<LogLevel> = const { Cell::new(LogLevel::Info) };
}

pub fn set_min_level(level: LogLevel) {
    MIN_LEVEL.with(|min| min.set(level));
}

fn enabled(level: LogLevel) -> bool {
    MIN_LEVEL.with(|min| level >= min.get())
}

/// Emits one JSON line: `ts`, `level`, `event`, then any object fields.
pub fn log_event(level: LogLevel, event: &str, fields: serde_json::Value) {
    if !enabled(level) {
        return;
    }

    let line = event_payload(now_unix_millis(), level, event, fields).to_string();
    write_line(level, &line);
}

/// Passes `Ok` through; an `Err` is logged at debug level under `event` and
/// becomes `None`.
pub fn debug_on_error<T, E: std::fmt::Debug>(event: &str, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log_event(LogLevel::Debug, event, serde_json::json!({ "error": format!("{err:?}") }));
            None
        }
    }
}

fn event_payload(ts: u64, level: LogLevel, event: &str, fields: serde_json::Value) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert("ts".to_string(), serde_json::Value::Number(serde_json::Number::from(ts)));
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload)
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn write_line(level: LogLevel, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&value),
        LogLevel::Info => web_sys::console::log_1(&value),
        LogLevel::Warn => web_sys::console::warn_1(&value),
        LogLevel::Error => web_sys::console::error_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_line(_level: LogLevel, line: &str) {
    println!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_carries_base_keys_and_fields() {
        let payload = event_payload(42, LogLevel::Warn, "clipboard_primary_failed", json!({ "reason": "denied" }));

        assert_eq!(payload["ts"], json!(42));
        assert_eq!(payload["level"], json!("warn"));
        assert_eq!(payload["event"], json!("clipboard_primary_failed"));
        assert_eq!(payload["reason"], json!("denied"));
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let payload = event_payload(1, LogLevel::Info, "landing_started", json!("stray"));

        assert_eq!(payload.as_object().map(|map| map.len()), Some(3));
    }

    #[test]
    fn level_filter_respects_ordering() {
        set_min_level(LogLevel::Warn);
        assert!(!enabled(LogLevel::Info));
        assert!(enabled(LogLevel::Warn));
        assert!(enabled(LogLevel::Error));

        set_min_level(LogLevel::Debug);
        assert!(enabled(LogLevel::Debug));
    }

    #[test]
    fn debug_on_error_keeps_values_and_swallows_errors() {
        set_min_level(LogLevel::Debug);

        assert_eq!(debug_on_error::<_, String>("toast_style_failed", Ok(7)), Some(7));
        assert_eq!(debug_on_error::<(), _>("toast_style_failed", Err("denied")), None);
    }

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(" Error ".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(
            "trace".parse::<LogLevel>(),
            Err("unknown log level `trace`".to_string())
        );
    }
}
