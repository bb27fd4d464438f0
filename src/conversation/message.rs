//! Transcript entries.

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    System,
}

/// A single transcript entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
    origin: Origin,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self { text: text.into(), origin: Origin::User }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self { text: text.into(), origin: Origin::System }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_user(&self) -> bool {
        self.origin == Origin::User
    }
}
