//! Social counters and the optimistic like/share mutators.
//!
//! Counters are best-effort analytics, not correctness-critical state:
//! the local value is incremented before the remote call is dispatched,
//! and a remote failure never rolls it back. The local copy and the
//! server copy may diverge indefinitely.

use crate::ContentClient;
use l10n::Locale;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Like/share/view counters attached to a content-detail record.
///
/// Older backend rows store counters as numerals-as-text; deserialization
/// always coerces to numbers so an increment is arithmetic, never string
/// concatenation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialCounters {
    #[serde(default, deserialize_with = "coerce_count")]
    pub likes: i64,
    #[serde(default, deserialize_with = "coerce_count")]
    pub shares: i64,
    #[serde(default, deserialize_with = "coerce_count")]
    pub views: i64,
}

impl SocialCounters {
    /// Extract counters from a raw detail record.
    ///
    /// Absent or malformed fields read as zero.
    pub fn from_record(record: &Value) -> SocialCounters {
        SocialCounters {
            likes: coerce_field(record, "likes"),
            shares: coerce_field(record, "shares"),
            views: coerce_field(record, "views"),
        }
    }
}

fn coerce_field(record: &Value, field: &str) -> i64 {
    match record.get(field) {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn coerce_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => Ok(n.as_i64().unwrap_or(0)),
        Value::String(s) => Ok(s.trim().parse().unwrap_or(0)),
        _ => Ok(0),
    }
}

/// Message handed to the platform share sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareMessage {
    pub title: String,
    pub description: String,
    pub link: Option<String>,
}

impl ShareMessage {
    /// Compose a record's share message in the given locale.
    ///
    /// Title and description go through the localized-field resolver;
    /// the external link rides along when the record carries one.
    pub fn from_record(record: &Value, locale: Locale) -> ShareMessage {
        ShareMessage {
            title: l10n::resolve(record, "title", locale),
            description: l10n::resolve(record, "description", locale),
            link: record
                .get("link")
                .and_then(Value::as_str)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        }
    }

    /// Render the message as share-sheet text.
    pub fn compose(&self) -> String {
        let mut parts = vec![self.title.clone(), self.description.clone()];
        if let Some(link) = &self.link {
            parts.push(link.clone());
        }
        parts.retain(|p| !p.is_empty());
        parts.join("\n")
    }
}

impl ContentClient {
    /// Optimistically like a record.
    ///
    /// The returned counters carry `likes + 1` immediately; the PATCH to
    /// the like route runs in the background and its failure is logged
    /// only, never reconciled back into the local value.
    pub fn like(
        &self,
        resource_id: &str,
        counters: &SocialCounters,
        token: Option<&str>,
    ) -> (SocialCounters, tokio::task::JoinHandle<()>) {
        let updated = SocialCounters {
            likes: counters.likes + 1,
            ..*counters
        };
        let pending = self.spawn_action(resource_id, "like", token);
        (updated, pending)
    }

    /// Optimistically share a record.
    ///
    /// Returns `shares + 1`, the background PATCH handle, and the
    /// composed [`ShareMessage`] for the platform share sheet.
    pub fn share(
        &self,
        resource_id: &str,
        counters: &SocialCounters,
        token: Option<&str>,
        record: &Value,
        locale: Locale,
    ) -> (SocialCounters, tokio::task::JoinHandle<()>, ShareMessage) {
        let updated = SocialCounters {
            shares: counters.shares + 1,
            ..*counters
        };
        let pending = self.spawn_action(resource_id, "share", token);
        let message = ShareMessage::from_record(record, locale);
        (updated, pending, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_counters_coerce_numerals_as_text() {
        let counters: SocialCounters =
            serde_json::from_value(json!({ "likes": "3", "shares": "12", "views": 40 })).unwrap();

        assert_eq!(counters.likes, 3);
        assert_eq!(counters.shares, 12);
        assert_eq!(counters.views, 40);
    }

    #[test]
    fn test_counters_malformed_fields_read_zero() {
        let counters: SocialCounters =
            serde_json::from_value(json!({ "likes": "lots", "shares": null })).unwrap();

        assert_eq!(counters.likes, 0);
        assert_eq!(counters.shares, 0);
        assert_eq!(counters.views, 0);
    }

    #[test]
    fn test_from_record_with_text_counters() {
        let record = json!({ "title": "x", "likes": "3", "shares": "3" });
        let counters = SocialCounters::from_record(&record);

        assert_eq!(counters.likes, 3);
        // Incrementing a coerced value is arithmetic, not "31".
        assert_eq!(counters.shares + 1, 4);
    }

    #[test]
    fn test_share_message_localized() {
        let record = json!({
            "title": "Harvest festival",
            "title_tamil": "அறுவடை திருவிழா",
            "description": "Annual meet",
            "link": "https://uzhavan.app/n/5"
        });

        let ta = ShareMessage::from_record(&record, Locale::Ta);
        assert_eq!(ta.title, "அறுவடை திருவிழா");
        assert_eq!(
            ta.compose(),
            "அறுவடை திருவிழா\nAnnual meet\nhttps://uzhavan.app/n/5"
        );

        let en = ShareMessage::from_record(&record, Locale::En);
        assert_eq!(en.title, "Harvest festival");
    }

    #[test]
    fn test_share_message_without_link() {
        let record = json!({ "title": "Note", "description": "" });
        let message = ShareMessage::from_record(&record, Locale::En);

        assert_eq!(message.link, None);
        assert_eq!(message.compose(), "Note");
    }

    #[tokio::test]
    async fn test_like_increments_before_remote_resolves() {
        // Nothing listens on this address; the remote call will fail.
        let client = ContentClient::new("http://127.0.0.1:9");
        let counters = SocialCounters {
            likes: 3,
            ..Default::default()
        };

        let (updated, pending) = client.like("17", &counters, Some("tok"));
        // Local value is already incremented, remote still outstanding.
        assert_eq!(updated.likes, 4);

        // Remote failure does not roll the local value back.
        pending.await.unwrap();
        assert_eq!(updated.likes, 4);
        assert_eq!(updated.shares, counters.shares);
    }

    #[tokio::test]
    async fn test_share_with_text_counter_yields_numeric() {
        let client = ContentClient::new("http://127.0.0.1:9");
        let record = json!({ "title": "T", "shares": "3" });
        let counters = SocialCounters::from_record(&record);

        let (updated, pending, message) =
            client.share("17", &counters, None, &record, Locale::En);

        assert_eq!(updated.shares, 4);
        assert_eq!(message.title, "T");
        pending.await.unwrap();
        assert_eq!(updated.shares, 4);
    }
}
