//! Player-facing narration.

use strum::{Display, IntoStaticStr};

/// Colour tag attached to a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageTone {
    Neutral,
    Good,
    Danger,
    Notice,
    Prompt,
    Muted,
    Equip,
    Unequip,
}

impl MessageTone {
    pub fn hex(self) -> &'static str {
        match self {
            MessageTone::Neutral => "#FFFFFF",
            MessageTone::Good => "#00FF00",
            MessageTone::Danger => "#FF0000",
            MessageTone::Notice => "#FFA500",
            MessageTone::Prompt => "#63FFFF",
            MessageTone::Muted => "#808080",
            MessageTone::Equip => "#A000C8",
            MessageTone::Unequip => "#DA8EE7",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub text: String,
    pub tone: MessageTone,
}

/// Fire-and-forget sink for narration.
pub trait MessageLog {
    fn post(&mut self, text: String, tone: MessageTone);
}

impl MessageLog for Vec<Message> {
    fn post(&mut self, text: String, tone: MessageTone) {
        self.push(Message { text, tone });
    }
}

/// Discards every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLog;

impl MessageLog for NullLog {
    fn post(&mut self, _text: String, _tone: MessageTone) {}
}
