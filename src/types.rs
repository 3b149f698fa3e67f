use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::duration::Seconds;
use crate::normalize::normalize;

/// One entry of the `{ "docs": [...] }` payload, exactly as published.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVideo {
    pub id: String, // external video identifier
    pub title: Vec<String>,
    pub body: Vec<String>,
    #[serde(default)]
    pub title_raw: Option<RawTitle>,
    #[serde(default)]
    pub live: bool,
    #[serde(default)]
    pub at: PublishedAt,
    #[serde(default = "Seconds::missing")]
    pub duration: Seconds,
}

/// Display title: either a single string or a list of fragments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTitle {
    Text(String),
    Fragments(Vec<String>),
}

impl RawTitle {
    pub fn display(&self) -> String {
        match self {
            RawTitle::Text(text) => text.clone(),
            RawTitle::Fragments(parts) => parts.join(" "),
        }
    }
}

/// Publication date parsed best-effort from a date-ish JSON value.
/// `None` means the value could not be understood and renders as `Invalid Date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublishedAt(pub Option<NaiveDate>);

impl PublishedAt {
    pub fn parse(value: &Value) -> Self {
        let date = match value {
            Value::String(s) => parse_date_str(s.trim()),
            Value::Number(n) => n
                .as_i64()
                .and_then(DateTime::from_timestamp_millis)
                .map(|dt| dt.date_naive()),
            _ => None,
        };
        Self(date)
    }

    /// Long-form date in `locale`, e.g. "1 janvier 2023" for `fr_FR`.
    pub fn localized(&self, locale: Locale) -> String {
        match self.0 {
            Some(date) => date
                .and_time(NaiveTime::MIN)
                .and_utc()
                .format_localized("%-d %B %Y", locale)
                .to_string(),
            None => "Invalid Date".to_string(),
        }
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc().date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

impl<'de> Deserialize<'de> for PublishedAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let at = Self::parse(&value);
        if at.0.is_none() {
            tracing::warn!("Unrecognised publish date {value}");
        }
        Ok(at)
    }
}

/// A loaded video with its search text folded once, at load time.
/// `normalized_title[i]` is `normalize(title[i])`, likewise for the body.
#[derive(Debug, Clone)]
pub struct Document {
    pub raw: RawVideo,
    pub normalized_title: Vec<String>,
    pub normalized_body: Vec<String>,
}

impl Document {
    pub fn new(raw: RawVideo) -> Self {
        let normalized_title = raw.title.iter().map(|t| normalize(t)).collect();
        let normalized_body = raw.body.iter().map(|b| normalize(b)).collect();
        Self {
            raw,
            normalized_title,
            normalized_body,
        }
    }

    pub fn id(&self) -> &str {
        &self.raw.id
    }

    pub fn is_live(&self) -> bool {
        self.raw.live
    }

    /// Title shown to the user. Falls back to the title fragments when the
    /// feed carries no `title_raw`.
    pub fn display_title(&self) -> String {
        match &self.raw.title_raw {
            Some(title) => title.display(),
            None => self.raw.title.join(" "),
        }
    }
}

/// Which field(s) a query token has to be found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Title,
    Body,
    #[default]
    All,
}

/// Restriction on the `live` flag, applied before token matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LiveFilter {
    #[default]
    All,
    OnlyLive,
    NoLive,
}

impl LiveFilter {
    pub fn admits(&self, live: bool) -> bool {
        match self {
            LiveFilter::All => true,
            LiveFilter::OnlyLive => live,
            LiveFilter::NoLive => !live,
        }
    }
}
