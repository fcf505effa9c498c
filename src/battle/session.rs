//! A single battle session: participant selection, the move loop, and teardown.
//!
//! The opponent's counter-move is a separate call so the UI can pace it.
//! Every battle start or reset issues a new session token; moves carrying an
//! older token are rejected, so a delayed counter-move scheduled for a
//! previous battle can never touch the current one.

use rand::Rng;
use tracing::{debug, info, warn};

use super::types::{BattleAction, BattlePhase, BattleState, Side, TurnOutcome};
use crate::balance::{MAX_ATTACK_DAMAGE, MIN_ATTACK_DAMAGE};
use crate::creature::{select_random_opponent, BattleCreature, Creature};
use crate::error::BattleError;

/// Rolls the damage of one attack.
pub fn roll_damage(rng: &mut impl Rng) -> u32 {
    rng.gen_range(MIN_ATTACK_DAMAGE..=MAX_ATTACK_DAMAGE)
}

/// Owns the state of one battle from selection to results.
#[derive(Debug, Clone, Default)]
pub struct BattleSession {
    state: BattleState,
    log: Vec<String>,
    token: u64,
}

impl BattleSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Token of the current battle.
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.winner
    }

    pub fn is_over(&self) -> bool {
        self.state.battle_phase == BattlePhase::Results
    }

    fn ensure_allowed(&self, action: BattleAction) -> Result<(), BattleError> {
        if self.state.is_action_allowed(action) {
            Ok(())
        } else {
            Err(BattleError::ActionNotAllowed {
                action,
                phase: self.state.battle_phase,
            })
        }
    }

    fn ensure_current(&self, token: u64) -> Result<(), BattleError> {
        if token == self.token {
            Ok(())
        } else {
            warn!(given = token, current = self.token, "rejected stale battle token");
            Err(BattleError::StaleSession {
                given: token,
                current: self.token,
            })
        }
    }

    fn ensure_ready(creature: &Creature) -> Result<(), BattleError> {
        if creature.is_battle_ready() {
            Ok(())
        } else {
            Err(BattleError::CreatureNotReady(creature.id.clone()))
        }
    }

    /// Rejects `creature` if it already fights on the other side.
    fn ensure_distinct(&self, creature: &Creature, side: Side) -> Result<(), BattleError> {
        match self.state.creature(side.other()) {
            Some(other) if other.creature.id == creature.id => {
                Err(BattleError::SameCreature(creature.id.clone()))
            }
            _ => Ok(()),
        }
    }

    pub fn select_player(&mut self, creature: Creature) -> Result<(), BattleError> {
        self.ensure_allowed(BattleAction::SelectPlayer)?;
        Self::ensure_ready(&creature)?;
        self.ensure_distinct(&creature, Side::Player)?;
        self.state.player_creature = Some(BattleCreature::from_creature(creature));
        Ok(())
    }

    pub fn select_opponent(&mut self, creature: Creature) -> Result<(), BattleError> {
        self.ensure_allowed(BattleAction::SelectOpponent)?;
        Self::ensure_ready(&creature)?;
        self.ensure_distinct(&creature, Side::Opponent)?;
        self.state.opponent_creature = Some(BattleCreature::from_creature(creature));
        Ok(())
    }

    /// Picks a random ready opponent from `roster`, excluding the player's creature.
    pub fn select_random_opponent(
        &mut self,
        roster: &[Creature],
        rng: &mut impl Rng,
    ) -> Result<Creature, BattleError> {
        self.ensure_allowed(BattleAction::SelectOpponent)?;
        let player_id = self
            .state
            .player_creature
            .as_ref()
            .map(|c| c.creature.id.as_str())
            .unwrap_or_default();
        let opponent = select_random_opponent(roster, player_id, rng)?.clone();
        self.state.opponent_creature = Some(BattleCreature::from_creature(opponent.clone()));
        Ok(opponent)
    }

    /// Starts a battle between the selected creatures and returns its token.
    ///
    /// Allowed from selection, and from results as a rematch with full HP.
    pub fn start_battle(&mut self) -> Result<u64, BattleError> {
        self.ensure_allowed(BattleAction::StartBattle)?;
        if !self.state.can_transition_to_phase(BattlePhase::Battle) {
            return Err(BattleError::MissingCreature);
        }

        for side in [Side::Player, Side::Opponent] {
            if let Some(c) = self.state.creature_mut(side) {
                c.reset_hp();
            }
        }
        self.state.battle_phase = BattlePhase::Battle;
        self.state.battle_active = true;
        self.state.current_turn = Side::Player;
        self.state.winner = None;
        self.token += 1;

        let (player, opponent) = self.names();
        self.log.clear();
        self.log.push(format!("Battle started: {} vs {}!", player, opponent));
        info!(token = self.token, %player, %opponent, "battle started");

        Ok(self.token)
    }

    /// Resolves the player's attack.
    pub fn resolve_player_move(
        &mut self,
        token: u64,
        rng: &mut impl Rng,
    ) -> Result<TurnOutcome, BattleError> {
        self.resolve_move(token, Side::Player, rng)
    }

    /// Resolves the opponent's automatic counter-attack.
    pub fn resolve_opponent_move(
        &mut self,
        token: u64,
        rng: &mut impl Rng,
    ) -> Result<TurnOutcome, BattleError> {
        self.resolve_move(token, Side::Opponent, rng)
    }

    /// Player move followed by the opponent's counter-move, unless the first one ends the battle.
    pub fn resolve_round(
        &mut self,
        token: u64,
        rng: &mut impl Rng,
    ) -> Result<Vec<TurnOutcome>, BattleError> {
        let first = self.resolve_player_move(token, rng)?;
        if first.battle_over {
            return Ok(vec![first]);
        }
        let second = self.resolve_opponent_move(token, rng)?;
        Ok(vec![first, second])
    }

    fn resolve_move(
        &mut self,
        token: u64,
        attacker: Side,
        rng: &mut impl Rng,
    ) -> Result<TurnOutcome, BattleError> {
        self.ensure_current(token)?;
        self.ensure_allowed(BattleAction::ExecuteMove)?;
        if !self.state.battle_active {
            return Err(BattleError::BattleInactive);
        }
        if self.state.current_turn != attacker {
            return Err(BattleError::WrongTurn {
                expected: self.state.current_turn,
                attempted: attacker,
            });
        }

        let damage = roll_damage(rng);
        let defender = attacker.other();
        let defender_hp = match self.state.creature_mut(defender) {
            Some(c) => c.take_damage(damage),
            None => return Err(BattleError::MissingCreature),
        };

        let (attacker_name, defender_name) = match attacker {
            Side::Player => self.names(),
            Side::Opponent => {
                let (p, o) = self.names();
                (o, p)
            }
        };
        self.log.push(format!(
            "{} attacks {} for {} damage!",
            attacker_name, defender_name, damage
        ));
        debug!(%attacker, damage, defender_hp, "move resolved");

        if self.state.should_end_battle() {
            self.finish(attacker);
            self.log.push(format!("{} wins!", attacker_name));
        } else {
            self.state.current_turn = self.state.next_turn();
        }

        Ok(TurnOutcome {
            attacker,
            damage,
            defender_hp,
            battle_over: self.state.winner.is_some(),
            winner: self.state.winner,
        })
    }

    /// Passes the turn without attacking.
    pub fn end_turn(&mut self, token: u64) -> Result<Side, BattleError> {
        self.ensure_current(token)?;
        self.ensure_allowed(BattleAction::EndTurn)?;
        if !self.state.battle_active {
            return Err(BattleError::BattleInactive);
        }
        self.state.current_turn = self.state.next_turn();
        Ok(self.state.current_turn)
    }

    /// Ends the battle early. The player forfeits to the opponent.
    pub fn end_battle(&mut self, token: u64) -> Result<Side, BattleError> {
        self.ensure_current(token)?;
        self.ensure_allowed(BattleAction::EndBattle)?;
        let winner = self.state.winner.unwrap_or(Side::Opponent);
        self.finish(winner);
        self.log.push("Battle ended early.".to_string());
        Ok(winner)
    }

    fn finish(&mut self, winner: Side) {
        self.state.winner = Some(winner);
        self.state.battle_active = false;
        self.state.battle_phase = self.state.next_phase();
        info!(token = self.token, %winner, "battle finished");
    }

    /// Clears the finished battle and returns to selection.
    pub fn reset(&mut self) -> Result<(), BattleError> {
        self.ensure_allowed(BattleAction::Reset)?;
        self.state = BattleState::new();
        self.log.clear();
        self.token += 1;
        Ok(())
    }

    fn names(&self) -> (String, String) {
        let name = |side: Side| {
            self.state
                .creature(side)
                .map_or_else(|| side.to_string(), |c| c.creature.name.clone())
        };
        (name(Side::Player), name(Side::Opponent))
    }
}
