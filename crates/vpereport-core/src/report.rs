//! Extraction of chart inputs from the incoming report document.
//!
//! The document is handled as raw [`serde_json::Value`] because its shape is
//! open-ended: channels, totals and raw article lists may all be absent.
//! Absence is never an error here — a missing key simply drops that channel
//! from the corresponding chart input.

use serde_json::Value;

use crate::channel::Channel;
use crate::normalize::clean_value;
use crate::rank::Article;

/// Unwraps the accepted payload envelopes into the report object.
///
/// Accepts a JSON object, or a non-empty array whose first element is an
/// object (a legacy producer wraps the report in a single-element list).
/// Returns `None` for any other top-level shape.
#[must_use]
pub fn unwrap_envelope(payload: Value) -> Option<Value> {
    match payload {
        Value::Object(_) => Some(payload),
        Value::Array(mut items) if !items.is_empty() => {
            let first = items.swap_remove(0);
            matches!(first, Value::Object(_)).then_some(first)
        }
        _ => None,
    }
}

/// Collects `(channel, value)` pairs for one totals field.
///
/// Channels missing the field (or missing entirely) are omitted, not zeroed;
/// present-but-unparseable values normalize to `0.0`.
#[must_use]
pub fn channel_totals(doc: &Value, field: &str) -> Vec<(Channel, f64)> {
    Channel::ALL
        .iter()
        .copied()
        .filter_map(|channel| {
            doc.get(channel.display_name())
                .and_then(|entry| entry.get(field))
                .map(|value| (channel, clean_value(value)))
        })
        .collect()
}

/// Pulls the article list out of `"{channel}_raw".noticias`.
///
/// Entries that do not deserialize as articles are dropped.
#[must_use]
pub fn channel_articles(doc: &Value, channel: Channel) -> Vec<Article> {
    doc.get(channel.raw_key())
        .and_then(|raw| raw.get("noticias"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
