use async_trait::async_trait;

use crate::error::ChannelError;


/// A selectable option: `label` is shown, `tag` comes back in the selection event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub tag: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tag: tag.into(),
        }
    }

    /// An option whose label and tag are the same string.
    pub fn plain(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            label: tag.clone(),
            tag,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub options: Vec<Choice>,
}

impl Prompt {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: vec![],
        }
    }

    pub fn with_options(text: impl Into<String>, options: Vec<Choice>) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }
}


/// The presentation side of a chat transport.
#[async_trait]
pub trait CommunicationChannel: Send + Sync {
    async fn send_prompt(&self, recipient: &str, prompt: &Prompt) -> Result<(), ChannelError>;

    /// Confirms to the transport that a selection was handled.
    async fn acknowledge(&self, recipient: &str, tag: &str) -> Result<(), ChannelError>;
}
