use chrono::{DateTime, Duration, Utc};

/// One pooled message. Immutable once recorded; it is never edited or
/// explicitly deleted, it only ages out of windowed queries.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only, arrival-ordered record of recently seen normalized messages.
///
/// There is no deduplication and no size cap; retention is purely temporal.
/// Timestamps are monotonic non-decreasing in practice because every request
/// is stamped with its processing-time "now", but nothing here relies on it.
#[derive(Debug, Default)]
pub struct TweetPool {
    messages: Vec<Message>,
}

impl TweetPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, text: impl Into<String>, timestamp: DateTime<Utc>) {
        self.messages.push(Message {
            text: text.into(),
            timestamp,
        });
    }

    /// Every record newer than `now - duration`, in insertion order. The
    /// comparison is strict: a record stamped exactly at the cutoff is out.
    /// Read-side filtering only; the pool is not mutated.
    pub fn window(&self, now: DateTime<Utc>, duration: Duration) -> Vec<&Message> {
        let cutoff = now - duration;
        self.messages
            .iter()
            .filter(|message| message.timestamp > cutoff)
            .collect()
    }

    /// Drops every record stamped at or before `cutoff`. As long as the
    /// cutoff is no newer than `now - <largest window queried>`, eviction
    /// never changes what `window` returns; it only bounds memory.
    pub fn evict_older_than(&mut self, cutoff: DateTime<Utc>) {
        self.messages.retain(|message| message.timestamp > cutoff);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
