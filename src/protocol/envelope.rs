//! Notification envelopes.
//!
//! Every resolved action produces exactly one `Envelope`. The transport reads
//! `to` to decide between answering the acting player and broadcasting, and
//! forwards `event` and `content` untouched.

use serde::{Deserialize, Serialize};

use crate::board::{Action, Game, Resources};

/// Who receives an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recipient {
    /// Only the acting player.
    One,
    /// Every participant.
    All,
}

/// The event name of an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    #[serde(rename = "illegal action")]
    IllegalAction,
    #[serde(rename = "game event")]
    GameEvent,
    #[serde(rename = "game end")]
    GameEnd,
    #[serde(rename = "loading done")]
    LoadingDone,
}

/// Extra data a handler reports alongside the new state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    /// Resources added by a collect action.
    Collected(Resources),
    /// Resources removed by a pay-upkeep action.
    PaidUpkeep(Resources),
}

/// Envelope payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Content {
    /// Why an action was rejected.
    Reason(String),
    Game {
        game: Box<Game>,
        #[serde(skip_serializing_if = "Option::is_none")]
        action: Option<Action>,
        #[serde(skip_serializing_if = "Option::is_none")]
        response: Option<Response>,
    },
    Empty {},
}

/// One notification for the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub to: Recipient,
    pub event: Event,
    pub content: Content,
}

impl Envelope {
    /// A rejection addressed to the acting player.
    pub fn illegal(reason: impl Into<String>) -> Self {
        Envelope {
            to: Recipient::One,
            event: Event::IllegalAction,
            content: Content::Reason(reason.into()),
        }
    }

    /// A broadcast of the mutated game.
    pub fn game_event(game: &Game, action: Option<Action>, response: Option<Response>) -> Self {
        Envelope {
            to: Recipient::All,
            event: Event::GameEvent,
            content: Content::Game {
                game: Box::new(game.clone()),
                action,
                response,
            },
        }
    }

    /// The terminal broadcast.
    pub fn game_end() -> Self {
        Envelope {
            to: Recipient::All,
            event: Event::GameEnd,
            content: Content::Empty {},
        }
    }

    /// The current game, for a player who finished loading.
    pub fn loading_done(game: &Game) -> Self {
        Envelope {
            to: Recipient::One,
            event: Event::LoadingDone,
            content: Content::Game {
                game: Box::new(game.clone()),
                action: None,
                response: None,
            },
        }
    }

    pub fn is_illegal(&self) -> bool {
        self.event == Event::IllegalAction
    }

    /// The rejection reason, if this is an illegal-action envelope.
    pub fn reason(&self) -> Option<&str> {
        match &self.content {
            Content::Reason(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn response(&self) -> Option<&Response> {
        match &self.content {
            Content::Game { response, .. } => response.as_ref(),
            _ => None,
        }
    }

    /// Serializes the envelope as a single JSON line.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
