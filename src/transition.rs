//! Pure conversation transitions.
//!
//! `transition` takes a user's current conversation and one event and returns
//! the next conversation plus the effects the manager should carry out. No I/O
//! happens here; the same inputs always give the same result.

use chrono::{DateTime, Utc};

use crate::communication_channel::{Choice, Prompt};
use crate::conversation_state::{Chain, Conversation, Order, Session, Slot, State};
use crate::event::{BotCommand, Event};
use crate::portal_link::{validate_portal_link, InvalidPortalLink};

pub const FAST_TRACK_TAG: &str = "Fast-Track";
pub const CONFIRM_DELETE_TAG: &str = "confirm_delete";
pub const CANCEL_DELETE_TAG: &str = "cancel_delete";

const SELECT_CHAIN_TEXT: &str = "Select chain:";
const TOKEN_ADDRESS_TEXT: &str = "Send me your token address.";
const ORDER_TEXT: &str = "What do you want to order?";
const PORTAL_LINK_TEXT: &str = "Send me portal/group link.";
const INVALID_PORTAL_LINK_TEXT: &str = "Incorrect portal or group link. Please send a valid Telegram link.";
const SELECT_SLOT_TEXT: &str = "Select open slot or click to see the nearest potential availability time:";
const DELETE_CONFIRM_TEXT: &str = "Are you sure to delete all configuration data?\n\
    Do not do this if you have paid or are about to pay for this configuration, \
    as a new payment wallet will be generated next time!";
const DELETED_TEXT: &str = "All configuration data has been deleted.";
const DELETE_CANCELLED_TEXT: &str = "Deletion cancelled.";


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Answer the selection event that caused this transition.
    Acknowledge { tag: String },
    Render(Prompt),
}


/// What happened, for the caller and the logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Started,
    Advanced(State),
    Rejected(InvalidPortalLink),
    Completed(Order),
    DeleteRequested,
    Deleted,
    DeleteCancelled,
    Ignored,
}


#[derive(Debug)]
pub struct TransitionResult {
    pub conversation: Conversation,
    pub effects: Vec<Effect>,
    pub outcome: Outcome,
}

impl TransitionResult {
    fn new(conversation: Conversation, outcome: Outcome) -> Self {
        Self {
            conversation,
            effects: vec![],
            outcome,
        }
    }

    fn ignored(current: &Conversation) -> Self {
        Self::new(current.clone(), Outcome::Ignored)
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    fn acknowledging(self, tag: &str) -> Self {
        self.with_effect(Effect::Acknowledge { tag: tag.to_string() })
    }

    fn rendering(self, prompt: Prompt) -> Self {
        self.with_effect(Effect::Render(prompt))
    }
}


pub fn chain_prompt() -> Prompt {
    let options = Chain::ALL.into_iter().map(|chain| Choice::plain(chain.tag())).collect();
    Prompt::with_options(SELECT_CHAIN_TEXT, options)
}

pub fn order_prompt() -> Prompt {
    Prompt::with_options(ORDER_TEXT, vec![Choice::new("Trending Fast-Track", FAST_TRACK_TAG)])
}

pub fn portal_link_prompt() -> Prompt {
    Prompt::text(PORTAL_LINK_TEXT)
}

pub fn slot_prompt() -> Prompt {
    let options = Slot::ALL.into_iter().map(|slot| Choice::plain(slot.tag())).collect();
    Prompt::with_options(SELECT_SLOT_TEXT, options)
}

pub fn delete_prompt() -> Prompt {
    Prompt::with_options(
        DELETE_CONFIRM_TEXT,
        vec![
            Choice::new("Yes, I'm sure", CONFIRM_DELETE_TAG),
            Choice::new("No", CANCEL_DELETE_TAG),
        ],
    )
}


/// Computes the next conversation for `event`.
///
/// `start` and `delete` are honoured in every state. The delete answers only
/// count while a confirmation is pending. Everything else is routed by the
/// session's current state, and an event the state does not accept leaves the
/// conversation exactly as it was.
pub fn transition(current: &Conversation, event: &Event, now: DateTime<Utc>) -> TransitionResult {
    match event {
        Event::Command(name) => match BotCommand::parse(name) {
            Some(BotCommand::Start) => {
                let conversation = Conversation {
                    session: Some(Session::new(now)),
                    delete_pending: current.delete_pending,
                };
                TransitionResult::new(conversation, Outcome::Started).rendering(chain_prompt())
            }
            Some(BotCommand::Delete) => {
                let conversation = Conversation {
                    session: current.session.clone(),
                    delete_pending: true,
                };
                TransitionResult::new(conversation, Outcome::DeleteRequested).rendering(delete_prompt())
            }
            None => TransitionResult::ignored(current),
        },

        Event::Selection(tag) if current.delete_pending && tag == CONFIRM_DELETE_TAG => {
            let conversation = Conversation {
                session: Some(Session::new(now)),
                delete_pending: false,
            };
            TransitionResult::new(conversation, Outcome::Deleted)
                .acknowledging(tag)
                .rendering(Prompt::text(DELETED_TEXT))
                .rendering(chain_prompt())
        }

        Event::Selection(tag) if current.delete_pending && tag == CANCEL_DELETE_TAG => {
            let conversation = Conversation {
                session: current.session.clone(),
                delete_pending: false,
            };
            TransitionResult::new(conversation, Outcome::DeleteCancelled)
                .acknowledging(tag)
                .rendering(Prompt::text(DELETE_CANCELLED_TEXT))
        }

        _ => match &current.session {
            Some(session) => step(current, session, event, now),
            None => TransitionResult::ignored(current),
        },
    }
}


fn step(current: &Conversation, session: &Session, event: &Event, now: DateTime<Utc>) -> TransitionResult {
    let advance = |next: Session| {
        let state = next.current_state;
        let conversation = Conversation {
            session: Some(next),
            delete_pending: current.delete_pending,
        };
        TransitionResult::new(conversation, Outcome::Advanced(state))
    };

    match (session.current_state, event) {
        (State::SelectingChain, Event::Selection(tag)) => match tag.parse::<Chain>() {
            Ok(chain) => advance(Session {
                chain: Some(chain),
                current_state: State::TypingToken,
                ..session.clone()
            })
            .acknowledging(tag)
            .rendering(Prompt::text(TOKEN_ADDRESS_TEXT)),
            Err(()) => TransitionResult::ignored(current),
        },

        (State::TypingToken, Event::Text(content)) => advance(Session {
            token_address: Some(content.clone()),
            current_state: State::SelectingSlotOrOrder,
            ..session.clone()
        })
        .rendering(order_prompt()),

        (State::SelectingSlotOrOrder, Event::Selection(tag)) if tag == FAST_TRACK_TAG => advance(Session {
            current_state: State::TypingPortal,
            ..session.clone()
        })
        .acknowledging(tag)
        .rendering(portal_link_prompt()),

        (State::TypingPortal, Event::Text(content)) => match validate_portal_link(content) {
            Ok(link) => advance(Session {
                portal_link: Some(link.into_inner()),
                current_state: State::SelectingSlotFinal,
                ..session.clone()
            })
            .rendering(slot_prompt()),
            // No attempt counter: the user may retry forever.
            Err(invalid) => TransitionResult::new(current.clone(), Outcome::Rejected(invalid))
                .rendering(Prompt::text(INVALID_PORTAL_LINK_TEXT))
                .rendering(portal_link_prompt()),
        },

        (State::SelectingSlotFinal, Event::Selection(tag)) => {
            let Ok(slot) = tag.parse::<Slot>() else {
                return TransitionResult::ignored(current);
            };
            let Some(order) = complete(session, slot, now) else {
                return TransitionResult::ignored(current);
            };
            let conversation = Conversation {
                session: None,
                delete_pending: current.delete_pending,
            };
            TransitionResult::new(conversation, Outcome::Completed(order))
                .acknowledging(tag)
                .rendering(Prompt::text(format!("You selected {}.", slot)))
        }

        _ => TransitionResult::ignored(current),
    }
}


fn complete(session: &Session, slot: Slot, now: DateTime<Utc>) -> Option<Order> {
    Some(Order {
        chain: session.chain?,
        token_address: session.token_address.clone()?,
        portal_link: session.portal_link.clone()?,
        slot,
        started_at: session.started_at,
        completed_at: now,
    })
}
