//! JSON action codec.
//!
//! Clients send actions as one flat JSON object:
//!
//! ```text
//! {"player":0,"actiontype":"build","planetid":3,"objecttype":"factory","resourceid":1}
//! ```
//!
//! `RawAction` mirrors that record field for field. Decoding checks that the
//! fields a known `actiontype` needs are present and names the first missing
//! one; an unknown `actiontype` still decodes and is rejected later as an
//! ordinary illegal action.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::action::{Action, ActionKind};
use crate::board::planet::PlanetId;
use crate::board::state::PlayerId;
use crate::board::structure::{StructureKind, ALL_STRUCTURES};
use crate::board::unit::AgentKind;

/// Errors from decoding an action.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed action: {0}")]
    Json(#[from] serde_json::Error),

    #[error("a {actiontype} action needs a {field}")]
    MissingField {
        actiontype: String,
        field: &'static str,
    },

    #[error("unknown structure type '{0}'")]
    UnknownStructure(String),

    #[error("unknown agent type '{0}'")]
    UnknownAgent(String),
}

/// The flat wire form of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAction {
    pub player: PlayerId,
    pub actiontype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planetid: Option<PlanetId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objecttype: Option<String>,
    /// Slot index on the planet. Negative values mean "no resource".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resourceid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agenttype: Option<String>,
}

fn structure_from_name(name: &str) -> Result<StructureKind, WireError> {
    ALL_STRUCTURES
        .iter()
        .copied()
        .find(|k| k.name() == name)
        .ok_or_else(|| WireError::UnknownStructure(name.to_string()))
}

impl RawAction {
    fn require<T>(&self, value: Option<T>, field: &'static str) -> Result<T, WireError> {
        value.ok_or_else(|| WireError::MissingField {
            actiontype: self.actiontype.clone(),
            field,
        })
    }

    fn slot(&self) -> Option<usize> {
        self.resourceid.and_then(|r| usize::try_from(r).ok())
    }

    fn structure(&self) -> Result<StructureKind, WireError> {
        let name = self.require(self.objecttype.as_deref(), "objecttype")?;
        structure_from_name(name)
    }

    /// Validates the record and builds the typed action.
    pub fn into_action(self) -> Result<Action, WireError> {
        let kind = match self.actiontype.as_str() {
            "place" => ActionKind::Place {
                planet: self.require(self.planetid, "planetid")?,
                slot: self.slot(),
                structure: self.structure()?,
            },
            "build" => ActionKind::Build {
                planet: self.require(self.planetid, "planetid")?,
                slot: self.slot(),
                structure: self.structure()?,
            },
            "recruit" => {
                let planet = self.require(self.planetid, "planetid")?;
                let name = self.require(self.agenttype.as_deref(), "agenttype")?;
                let agent = AgentKind::from_name(name)
                    .ok_or_else(|| WireError::UnknownAgent(name.to_string()))?;
                ActionKind::Recruit { planet, agent }
            }
            "collect_resources" => ActionKind::CollectResources,
            "pay_upkeep" => ActionKind::PayUpkeep,
            "turn_done" => ActionKind::TurnDone,
            "loading_done" => ActionKind::LoadingDone,
            _ => ActionKind::Unknown(self.actiontype.clone()),
        };
        Ok(Action::new(self.player, kind))
    }

    /// Flattens a typed action back into its wire record.
    pub fn from_action(action: &Action) -> RawAction {
        let mut raw = RawAction {
            player: action.player,
            actiontype: action.kind.tag().to_string(),
            planetid: None,
            objecttype: None,
            resourceid: None,
            agenttype: None,
        };
        match &action.kind {
            ActionKind::Place {
                planet,
                slot,
                structure,
            }
            | ActionKind::Build {
                planet,
                slot,
                structure,
            } => {
                raw.planetid = Some(*planet);
                raw.resourceid = slot.map(|s| s as i64);
                raw.objecttype = Some(structure.name().to_string());
            }
            ActionKind::Recruit { planet, agent } => {
                raw.planetid = Some(*planet);
                raw.agenttype = Some(agent.name().to_string());
            }
            _ => {}
        }
        raw
    }
}

/// Decodes one JSON action.
pub fn parse_action(json: &str) -> Result<Action, WireError> {
    let raw: RawAction = serde_json::from_str(json)?;
    raw.into_action()
}
