//! Roster queries used when picking battle participants.

use rand::Rng;

use super::types::Creature;
use crate::error::BattleError;

/// Creatures in the roster that may take part in a battle.
pub fn battle_ready(roster: &[Creature]) -> Vec<&Creature> {
    roster.iter().filter(|c| c.is_battle_ready()).collect()
}

/// Picks a uniformly random battle-ready opponent that is not the player's creature.
///
/// Returns `BattleError::NoOpponents` when nothing is left to fight.
pub fn select_random_opponent<'a>(
    roster: &'a [Creature],
    player_id: &str,
    rng: &mut impl Rng,
) -> Result<&'a Creature, BattleError> {
    let candidates: Vec<&Creature> = roster
        .iter()
        .filter(|c| c.is_battle_ready() && c.id != player_id)
        .collect();

    if candidates.is_empty() {
        return Err(BattleError::NoOpponents);
    }

    Ok(candidates[rng.gen_range(0..candidates.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::types::{CreatureStatus, Stats};
    use crate::error::NO_OPPONENTS_MESSAGE;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ready(name: &str) -> Creature {
        Creature::new(name, Stats::new(50, 50, 50, 100)).with_status(CreatureStatus::Ready)
    }

    #[test]
    fn test_battle_ready_filters_status() {
        let roster = vec![
            ready("a"),
            Creature::new("b", Stats::default()).with_status(CreatureStatus::Processing),
            Creature::new("c", Stats::default()).with_status(CreatureStatus::Failed),
            ready("d"),
        ];
        let names: Vec<&str> = battle_ready(&roster).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "d"]);
    }

    #[test]
    fn test_opponent_is_never_the_player() {
        let roster = vec![ready("a"), ready("b"), ready("c")];
        let player_id = roster[1].id.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let opp = select_random_opponent(&roster, &player_id, &mut rng).unwrap();
            assert_ne!(opp.id, player_id);
            assert!(opp.is_battle_ready());
        }
    }

    #[test]
    fn test_no_opponents_when_only_player_is_ready() {
        let roster = vec![
            ready("solo"),
            Creature::new("pending", Stats::default()),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = select_random_opponent(&roster, &roster[0].id, &mut rng).unwrap_err();
        assert_eq!(err, BattleError::NoOpponents);
        assert_eq!(err.to_string(), NO_OPPONENTS_MESSAGE);
    }

    #[test]
    fn test_empty_roster_has_no_opponents() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(select_random_opponent(&[], "x", &mut rng).is_err());
    }
}
