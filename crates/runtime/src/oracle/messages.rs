use std::collections::VecDeque;

use game_core::{Message, MessageLog, MessageTone};

/// Message log that keeps the most recent `capacity` entries.
///
/// `posted` counts every message ever posted, so readers can keep a mark
/// that stays meaningful after old entries fall off.
#[derive(Clone, Debug)]
pub struct BoundedLog {
    capacity: usize,
    messages: VecDeque<Message>,
    posted: u64,
}

impl BoundedLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            messages: VecDeque::new(),
            posted: 0,
        }
    }

    /// Total messages posted since creation, evicted ones included.
    pub fn posted(&self) -> u64 {
        self.posted
    }

    /// Retained messages posted after `mark`, a previous [`BoundedLog::posted`].
    pub fn since(&self, mark: u64) -> impl Iterator<Item = &Message> {
        let fresh = self.posted.saturating_sub(mark);
        let fresh = usize::try_from(fresh).unwrap_or(usize::MAX).min(self.messages.len());
        self.messages.iter().skip(self.messages.len() - fresh)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn latest(&self) -> Option<&Message> {
        self.messages.back()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl MessageLog for BoundedLog {
    fn post(&mut self, text: String, tone: MessageTone) {
        tracing::debug!(%tone, "{text}");
        self.messages.push_back(Message { text, tone });
        self.posted += 1;
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }
}
