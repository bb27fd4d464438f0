//! Read-only transcript snapshots for renderers.
//!
//! A [`TranscriptView`] is taken under the controller lock and owns its data,
//! so iterating it never blocks the controller. Each call to
//! [`TranscriptView::iter`] starts again from the first message.

use super::message::{Message, Origin};

/// One line as a renderer should display it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub text: &'a str,
    pub origin: Origin,
    /// `true` for the "processing" indicator, which is not part of the
    /// transcript history.
    pub transient: bool,
}

#[derive(Debug, Clone)]
pub struct TranscriptView {
    messages: Vec<Message>,
    pending: Option<String>,
}

impl TranscriptView {
    pub(crate) fn new(messages: Vec<Message>, pending: Option<String>) -> Self {
        Self { messages, pending }
    }

    /// Messages in insertion order, followed by the processing indicator
    /// while an answer is pending.
    pub fn iter(&self) -> impl Iterator<Item = Entry<'_>> {
        let history = self.messages.iter().map(|m| Entry {
            text: m.text(),
            origin: m.origin(),
            transient: false,
        });
        let indicator = self.pending.as_deref().map(|text| Entry {
            text,
            origin: Origin::System,
            transient: true,
        });
        history.chain(indicator)
    }

    /// Persisted messages only.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<'a> IntoIterator for &'a TranscriptView {
    type Item = Entry<'a>;
    type IntoIter = Box<dyn Iterator<Item = Entry<'a>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
