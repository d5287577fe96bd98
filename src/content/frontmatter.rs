//! Metadata block parsing

use chrono::{
    DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone,
};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

const YAML_FENCE: &str = "---";
const JSON_FENCE: &str = ";;;";

/// Accepts any scalar as a string; null, lists and maps become `None`
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarString;

    impl<'de> Visitor<'de> for ScalarString {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(self)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarString)
}

/// Accepts booleans, integers and yes/no style strings. Anything else is `None`.
fn bool_like<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    struct BoolLike;

    impl<'de> Visitor<'de> for BoolLike {
        type Value = Option<bool>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a boolean")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value != 0))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Some(value != 0))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(match value.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(true),
                "false" | "no" | "off" | "0" | "" => Some(false),
                _ => None,
            })
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_f64<E: de::Error>(self, _value: f64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(self)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }

    deserializer.deserialize_any(BoolLike)
}

/// Metadata declared at the top of a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "bool_like")]
    pub featured: Option<bool>,

    /// Keys this generator does not use
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Split a document into its metadata and body.
    ///
    /// Never fails: a missing, unterminated or malformed block yields empty
    /// metadata.
    pub fn parse(content: &str) -> (Self, &str) {
        let content = skip_blank_lines(content.trim_start_matches('\u{feff}'));

        if content.starts_with(YAML_FENCE) {
            return Self::parse_yaml(content);
        }
        if content.starts_with(JSON_FENCE) {
            return Self::parse_json(content);
        }

        (FrontMatter::default(), content)
    }

    fn parse_yaml(content: &str) -> (Self, &str) {
        let Some((block, body)) = split_block(content, YAML_FENCE) else {
            return (FrontMatter::default(), content);
        };

        if block.trim().is_empty() {
            return (FrontMatter::default(), body);
        }

        // `---` is also a markdown horizontal rule
        if !looks_like_mapping(block) {
            return (FrontMatter::default(), content);
        }

        match serde_yaml::from_str::<FrontMatter>(block) {
            Ok(fm) => (fm, body),
            Err(e) => {
                tracing::warn!("Failed to parse YAML metadata, ignoring it: {}", e);
                (FrontMatter::default(), body)
            }
        }
    }

    fn parse_json(content: &str) -> (Self, &str) {
        let Some((block, body)) = split_block(content, JSON_FENCE) else {
            return (FrontMatter::default(), content);
        };

        if block.trim().is_empty() {
            return (FrontMatter::default(), body);
        }

        match serde_json::from_str::<FrontMatter>(block) {
            Ok(fm) => (fm, body),
            Err(e) => {
                tracing::warn!("Failed to parse JSON metadata, ignoring it: {}", e);
                (FrontMatter::default(), body)
            }
        }
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Drop leading whitespace-only lines, keeping the indentation of the first real line
fn skip_blank_lines(content: &str) -> &str {
    let mut rest = content;
    while let Some(pos) = rest.find('\n') {
        if !rest[..pos].trim().is_empty() {
            break;
        }
        rest = &rest[pos + 1..];
    }
    rest
}

/// Split `fence\n...\nfence\n` off the start of `content`.
/// Both fences must sit alone on their lines.
fn split_block<'a>(content: &'a str, fence: &str) -> Option<(&'a str, &'a str)> {
    let rest = content.strip_prefix(fence)?;
    let rest = match rest.find('\n') {
        Some(pos) if rest[..pos].trim().is_empty() => &rest[pos + 1..],
        _ => return None,
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == fence {
            let block = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Some((block, body));
        }
        offset += line.len();
    }

    None
}

/// At least one line must read `key: value` with a plain identifier key
fn looks_like_mapping(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some((key, value)) = trimmed.split_once(':') else {
            return false;
        };
        let is_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp" | "mailto");
        is_key && (value.is_empty() || value.starts_with(' '))
    })
}

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a date string in various formats. Values without an offset are local time.
pub fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(resolve_local(&Local, &naive));
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return Some(resolve_local(&Local, &naive));
        }
    }

    None
}

/// Map a wall-clock time to an instant. Ambiguous times take the earlier
/// instant; times skipped by a DST change move forward past the gap.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => match tz.from_local_datetime(&(*naive + Duration::hours(1))) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
            LocalResult::None => {
                let offset = tz.offset_from_utc_datetime(naive).fix().local_minus_utc();
                tz.from_utc_datetime(&(*naive - Duration::seconds(i64::from(offset))))
            }
        },
    }
}
