//! The chat visual: the root component a host instantiates through the
//! plugin descriptor.

use std::sync::Arc;

use crate::answer::Answerer;
use crate::config::ChatConfig;
use crate::conversation::Conversation;

/// What the host hands to the visual constructor.
#[derive(Debug, Clone)]
pub struct VisualConstructorOptions {
    pub answerer: Answerer,
    pub chat: ChatConfig,
}

/// One chat widget instance, with its own conversation.
pub struct ChatVisual {
    conversation: Arc<Conversation>,
}

impl ChatVisual {
    pub fn new(options: VisualConstructorOptions) -> Self {
        Self {
            conversation: Arc::new(Conversation::new(options.answerer, options.chat)),
        }
    }

    pub fn conversation(&self) -> Arc<Conversation> {
        Arc::clone(&self.conversation)
    }
}
