use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Chain {
    #[serde(rename = "ETH")]
    Eth,
    #[serde(rename = "BNB")]
    Bnb,
    #[serde(rename = "SOL")]
    Sol,
}

impl Chain {
    pub const ALL: [Chain; 3] = [Chain::Eth, Chain::Bnb, Chain::Sol];

    pub fn tag(self) -> &'static str {
        match self {
            Chain::Eth => "ETH",
            Chain::Bnb => "BNB",
            Chain::Sol => "SOL",
        }
    }
}

impl FromStr for Chain {
    type Err = ();

    /// Tags match exactly; `eth` is not a chain.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Chain::ALL.into_iter().find(|chain| chain.tag() == tag).ok_or(())
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}


/// Placement purchased at the end of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Slot {
    #[serde(rename = "Top 3 Guarantee")]
    Top3Guarantee,
    #[serde(rename = "Top 8 Guarantee")]
    Top8Guarantee,
    #[serde(rename = "Any position")]
    AnyPosition,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Top3Guarantee, Slot::Top8Guarantee, Slot::AnyPosition];

    pub fn tag(self) -> &'static str {
        match self {
            Slot::Top3Guarantee => "Top 3 Guarantee",
            Slot::Top8Guarantee => "Top 8 Guarantee",
            Slot::AnyPosition => "Any position",
        }
    }
}

impl FromStr for Slot {
    type Err = ();

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Slot::ALL.into_iter().find(|slot| slot.tag() == tag).ok_or(())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}


/// Where a live session is waiting. A finished conversation has no state at
/// all: its session is dropped from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    SelectingChain,
    TypingToken,
    SelectingSlotOrOrder,
    TypingPortal,
    SelectingSlotFinal,
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub chain: Option<Chain>,
    pub token_address: Option<String>,
    pub portal_link: Option<String>,
    pub current_state: State,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            chain: None,
            token_address: None,
            portal_link: None,
            current_state: State::SelectingChain,
            started_at,
        }
    }
}


/// What a user's entry in the registry holds between events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    pub session: Option<Session>,
    pub delete_pending: bool,
}

impl Conversation {
    /// Nothing left worth keeping in the registry.
    pub fn is_vacant(&self) -> bool {
        self.session.is_none() && !self.delete_pending
    }
}


/// The record handed back when a session terminates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub chain: Chain,
    pub token_address: String,
    pub portal_link: String,
    pub slot: Slot,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}
