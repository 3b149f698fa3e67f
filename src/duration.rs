use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A duration in seconds, coerced best-effort from whatever the feed holds.
///
/// Malformed values are not rejected: they become NaN and later render as a
/// degenerate clock string, so one bad row never fails a whole load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seconds(pub f64);

impl Seconds {
    /// Numeric coercion of an arbitrary JSON value.
    pub fn coerce(value: &Value) -> Self {
        let secs = match value {
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Null => 0.0,
            Value::Array(_) | Value::Object(_) => f64::NAN,
        };
        Self(secs)
    }

    /// Whether the value can be rendered as a clock string.
    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}

impl Seconds {
    /// Value of a document with no `duration` key at all. Unlike an explicit
    /// `null` (which coerces to 0) it renders degenerate.
    pub fn missing() -> Self {
        Self(f64::NAN)
    }
}

impl From<u64> for Seconds {
    fn from(secs: u64) -> Self {
        Self(secs as f64)
    }
}

impl<'de> Deserialize<'de> for Seconds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let secs = Self::coerce(&value);
        if !secs.is_valid() {
            tracing::warn!("Coerced malformed duration {value} to an invalid value");
        }
        Ok(secs)
    }
}

/// Render seconds as `H:MM:SS` (one hour or more) or `M:SS`.
/// Fractional seconds are floored; invalid input yields `NaN:NaN`.
pub fn format_duration(duration: Seconds) -> String {
    if !duration.is_valid() {
        return "NaN:NaN".to_string();
    }
    let total = duration.0.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_minutes_and_hours() {
        assert_eq!(format_duration(Seconds::from(0)), "0:00");
        assert_eq!(format_duration(Seconds::from(59)), "0:59");
        assert_eq!(format_duration(Seconds::from(60)), "1:00");
        assert_eq!(format_duration(Seconds::from(125)), "2:05");
        assert_eq!(format_duration(Seconds::from(3599)), "59:59");
        assert_eq!(format_duration(Seconds::from(3600)), "1:00:00");
        assert_eq!(format_duration(Seconds::from(3661)), "1:01:01");
        assert_eq!(format_duration(Seconds::from(36_000)), "10:00:00");
    }

    #[test]
    fn floors_fractional_seconds() {
        assert_eq!(format_duration(Seconds(59.9)), "0:59");
    }

    #[test]
    fn coerces_numeric_strings() {
        assert_eq!(Seconds::coerce(&json!("3661")), Seconds(3661.0));
        assert_eq!(Seconds::coerce(&json!(" 42 ")), Seconds(42.0));
        assert_eq!(Seconds::coerce(&json!("")), Seconds(0.0));
        assert_eq!(Seconds::coerce(&json!(null)), Seconds(0.0));
        assert_eq!(Seconds::coerce(&json!(true)), Seconds(1.0));
    }

    #[test]
    fn malformed_values_render_degenerate() {
        assert_eq!(format_duration(Seconds::coerce(&json!("abc"))), "NaN:NaN");
        assert_eq!(format_duration(Seconds::coerce(&json!([1, 2]))), "NaN:NaN");
        assert_eq!(format_duration(Seconds(-5.0)), "NaN:NaN");
    }

    #[test]
    fn deserializes_from_any_json() {
        let secs: Seconds = serde_json::from_str("\"125\"").unwrap();
        assert_eq!(secs, Seconds(125.0));
        let secs: Seconds = serde_json::from_str("{\"x\":1}").unwrap();
        assert!(!secs.is_valid());
    }
}
