//! Phase rules of the battle lifecycle: selection -> battle -> results -> selection.
//!
//! These checks are pure; [`super::session::BattleSession`] consults them
//! before every mutation.

use super::types::{BattleAction, BattlePhase, BattleState, Side};

/// Actions permitted in each phase.
pub fn allowed_actions(phase: BattlePhase) -> &'static [BattleAction] {
    match phase {
        BattlePhase::Selection => &[
            BattleAction::SelectPlayer,
            BattleAction::SelectOpponent,
            BattleAction::StartBattle,
        ],
        BattlePhase::Battle => &[
            BattleAction::ExecuteMove,
            BattleAction::EndTurn,
            BattleAction::EndBattle,
        ],
        BattlePhase::Results => &[BattleAction::Reset, BattleAction::StartBattle],
    }
}

impl BattleState {
    /// Whether the state satisfies the entry condition of `target`.
    pub fn can_transition_to_phase(&self, target: BattlePhase) -> bool {
        match target {
            BattlePhase::Selection => true,
            BattlePhase::Battle => self.has_both_creatures(),
            BattlePhase::Results => self.winner.is_some(),
        }
    }

    /// The phase this state should move to next. Never skips a phase.
    pub fn next_phase(&self) -> BattlePhase {
        match self.battle_phase {
            BattlePhase::Selection if self.has_both_creatures() => BattlePhase::Battle,
            BattlePhase::Selection => BattlePhase::Selection,
            BattlePhase::Battle if self.winner.is_some() => BattlePhase::Results,
            BattlePhase::Battle => BattlePhase::Battle,
            BattlePhase::Results => BattlePhase::Selection,
        }
    }

    pub fn is_action_allowed(&self, action: BattleAction) -> bool {
        allowed_actions(self.battle_phase).contains(&action)
    }

    /// Whose turn follows the current one. Outside an active battle it is the player's.
    pub fn next_turn(&self) -> Side {
        if self.battle_phase == BattlePhase::Battle && self.battle_active {
            self.current_turn.other()
        } else {
            Side::Player
        }
    }

    /// True once either creature is out of HP.
    pub fn should_end_battle(&self) -> bool {
        [&self.player_creature, &self.opponent_creature]
            .into_iter()
            .flatten()
            .any(|c| c.current_hp == 0)
    }
}
