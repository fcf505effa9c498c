use std::fmt;

use serde::{Deserialize, Serialize};

use crate::creature::BattleCreature;

/// Lifecycle phase of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattlePhase {
    #[default]
    Selection,
    Battle,
    Results,
}

impl BattlePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            BattlePhase::Selection => "selection",
            BattlePhase::Battle => "battle",
            BattlePhase::Results => "results",
        }
    }
}

impl fmt::Display for BattlePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a caller may ask a battle to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BattleAction {
    SelectPlayer,
    SelectOpponent,
    StartBattle,
    ExecuteMove,
    EndTurn,
    EndBattle,
    Reset,
}

impl BattleAction {
    pub fn as_str(self) -> &'static str {
        match self {
            BattleAction::SelectPlayer => "select-player",
            BattleAction::SelectOpponent => "select-opponent",
            BattleAction::StartBattle => "start-battle",
            BattleAction::ExecuteMove => "execute-move",
            BattleAction::EndTurn => "end-turn",
            BattleAction::EndBattle => "end-battle",
            BattleAction::Reset => "reset",
        }
    }
}

impl fmt::Display for BattleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one battle session. Created on battle start, reset for the next battle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BattleState {
    pub battle_phase: BattlePhase,
    pub player_creature: Option<BattleCreature>,
    pub opponent_creature: Option<BattleCreature>,
    pub current_turn: Side,
    pub winner: Option<Side>,
    pub battle_active: bool,
}

impl BattleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_both_creatures(&self) -> bool {
        self.player_creature.is_some() && self.opponent_creature.is_some()
    }

    pub fn creature(&self, side: Side) -> Option<&BattleCreature> {
        match side {
            Side::Player => self.player_creature.as_ref(),
            Side::Opponent => self.opponent_creature.as_ref(),
        }
    }

    pub fn creature_mut(&mut self, side: Side) -> Option<&mut BattleCreature> {
        match side {
            Side::Player => self.player_creature.as_mut(),
            Side::Opponent => self.opponent_creature.as_mut(),
        }
    }
}

/// What happened when one side attacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub attacker: Side,
    pub damage: u32,
    pub defender_hp: u32,
    pub battle_over: bool,
    pub winner: Option<Side>,
}
