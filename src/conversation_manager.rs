use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tracing::{debug, info};

use crate::communication_channel::CommunicationChannel;
use crate::conversation_state::{Conversation, Session};
use crate::error::ChannelError;
use crate::event::Event;
use crate::transition::{transition, Effect, Outcome};


/// Owns every user's conversation and drives it one event at a time.
///
/// Users never share state. The registry lock only covers the pure
/// transition, so a slow channel for one user does not hold up another.
pub struct ConversationManager {
    channel: Arc<dyn CommunicationChannel>,
    conversations: Mutex<HashMap<String, Conversation>>,
}


impl ConversationManager {
    pub fn new(channel: Arc<dyn CommunicationChannel>) -> Self {
        Self {
            channel,
            conversations: Mutex::new(HashMap::new()),
        }
    }


    /// Applies `event` for `user_id` and renders the result through the channel.
    ///
    /// The new state is committed before anything is sent, so a channel error
    /// leaves the conversation advanced.
    pub async fn handle_event(&self, user_id: &str, event: Event) -> Result<Outcome, ChannelError> {
        let result = {
            let mut conversations = self.conversations.lock().unwrap_or_else(PoisonError::into_inner);
            let current = conversations.get(user_id).cloned().unwrap_or_default();
            let result = transition(&current, &event, Utc::now());

            if result.conversation.is_vacant() {
                conversations.remove(user_id);
            } else {
                conversations.insert(user_id.to_string(), result.conversation.clone());
            }

            result
        };

        log_outcome(user_id, &event, &result.outcome);

        for effect in &result.effects {
            match effect {
                Effect::Acknowledge { tag } => self.channel.acknowledge(user_id, tag).await?,
                Effect::Render(prompt) => self.channel.send_prompt(user_id, prompt).await?,
            }
        }

        Ok(result.outcome)
    }


    /// A snapshot of the user's live session, if any.
    pub fn session(&self, user_id: &str) -> Option<Session> {
        let conversations = self.conversations.lock().unwrap_or_else(PoisonError::into_inner);
        conversations.get(user_id).and_then(|conversation| conversation.session.clone())
    }


    pub fn delete_pending(&self, user_id: &str) -> bool {
        let conversations = self.conversations.lock().unwrap_or_else(PoisonError::into_inner);
        conversations.get(user_id).map_or(false, |conversation| conversation.delete_pending)
    }


    pub fn active_sessions(&self) -> usize {
        let conversations = self.conversations.lock().unwrap_or_else(PoisonError::into_inner);
        conversations.values().filter(|conversation| conversation.session.is_some()).count()
    }
}


fn log_outcome(user_id: &str, event: &Event, outcome: &Outcome) {
    match outcome {
        Outcome::Started => info!(user_id, "conversation started"),
        Outcome::Advanced(state) => debug!(user_id, ?state, "conversation advanced"),
        Outcome::Rejected(invalid) => debug!(user_id, %invalid, "portal link rejected"),
        Outcome::Completed(order) => info!(
            user_id,
            chain = %order.chain,
            slot = %order.slot,
            "conversation completed"
        ),
        Outcome::DeleteRequested => info!(user_id, "delete confirmation requested"),
        Outcome::Deleted => info!(user_id, "configuration data deleted, conversation restarted"),
        Outcome::DeleteCancelled => info!(user_id, "deletion cancelled"),
        Outcome::Ignored => debug!(user_id, kind = event.kind(), "event ignored"),
    }
}
