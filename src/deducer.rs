//! Fixed-point driver over all consistency and deduction rules.
//!
//! [`deduce`] applies every rule in [`RULES`] in order, threading the
//! knowledge from one rule into the next, and repeats the whole pass until a
//! pass changes nothing. Rules only ever turn unknown cells into known ones
//! (or fail), and a game has finitely many cells, so the loop terminates.

use log::{debug, trace, warn};

use crate::consistency::{self, ConsistencyRule};
use crate::deduction::{self, DeductionRule};
use crate::game::{GameObjects, Suggestions};
use crate::knowledge::Knowledge;
use crate::paradox::LogicalParadox;

#[derive(Copy, Clone)]
pub enum Rule {
    Consistency(&'static str, ConsistencyRule),
    Deduction(&'static str, DeductionRule),
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Consistency(name, _) | Rule::Deduction(name, _) => name,
        }
    }

    pub fn apply(
        &self,
        game: &GameObjects,
        suggestions: &Suggestions,
        knowledge: &Knowledge,
    ) -> Result<Knowledge, LogicalParadox> {
        match self {
            Rule::Consistency(_, rule) => rule(game, knowledge),
            Rule::Deduction(_, rule) => rule(suggestions, knowledge),
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Every rule, in the order a single pass applies them.
pub const RULES: [Rule; 9] = [
    Rule::Consistency(
        "cards_are_owned_at_most_once",
        consistency::cards_are_owned_at_most_once,
    ),
    Rule::Consistency(
        "cards_are_owned_at_least_once",
        consistency::cards_are_owned_at_least_once,
    ),
    Rule::Consistency(
        "player_owns_at_most_hand_size",
        consistency::player_owns_at_most_hand_size,
    ),
    Rule::Consistency(
        "player_owns_at_least_hand_size",
        consistency::player_owns_at_least_hand_size,
    ),
    Rule::Consistency(
        "case_file_owns_at_most_1_per_category",
        consistency::case_file_owns_at_most_1_per_category,
    ),
    Rule::Consistency(
        "case_file_owns_at_least_1_per_category",
        consistency::case_file_owns_at_least_1_per_category,
    ),
    Rule::Deduction(
        "non_refuters_dont_have_suggested_cards",
        deduction::non_refuters_dont_have_suggested_cards,
    ),
    Rule::Deduction("refuter_used_seen_card", deduction::refuter_used_seen_card),
    Rule::Deduction(
        "refuter_used_only_card_they_own",
        deduction::refuter_used_only_card_they_own,
    ),
];

/// Upper bound on the number of passes [`deduce`] needs for `game`.
///
/// Every pass but the last learns at least one new cell.
pub fn max_passes(game: &GameObjects) -> usize {
    let players = game.players().len();
    let cards = game.total_cards();
    players * cards + cards + players + 1
}

/// Applies each rule once, in order.
pub fn deduce_once(
    game: &GameObjects,
    suggestions: &Suggestions,
    knowledge: &Knowledge,
) -> Result<Knowledge, LogicalParadox> {
    RULES.iter().try_fold(knowledge.clone(), |knowledge, rule| {
        let next = rule.apply(game, suggestions, &knowledge)?;
        if next != knowledge {
            trace!(
                "{} learned {} cell(s)",
                rule.name(),
                next.known_cells() - knowledge.known_cells()
            );
        }
        Ok(next)
    })
}

/// Saturates `knowledge` with everything the rules can derive.
///
/// Stops at the first [`LogicalParadox`], which means the inputs are
/// contradictory.
pub fn deduce(
    game: &GameObjects,
    suggestions: &Suggestions,
    knowledge: &Knowledge,
) -> Result<Knowledge, LogicalParadox> {
    let limit = max_passes(game);
    let mut current = knowledge.clone();
    for pass in 1..=limit {
        let next = deduce_once(game, suggestions, &current)?;
        if next == current {
            debug!(
                "deduce: fixed point after {} pass(es), {} known cell(s)",
                pass,
                next.known_cells()
            );
            return Ok(next);
        }
        current = next;
    }
    warn!("deduce: no fixed point after {} passes", limit);
    Ok(current)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::game::{Card, CardCategory, Player, Suggestion};
    use crate::knowledge::Mark;

    fn card(category: &str, name: &str) -> Card {
        Card::new(CardCategory::new(category), name)
    }

    fn players() -> (Player, Player, Player) {
        (Player::new("Anisha"), Player::new("Bob"), Player::new("Cho"))
    }

    fn game() -> GameObjects {
        let (anisha, bob, cho) = players();
        GameObjects::classic([anisha, bob, cho])
    }

    #[test]
    fn test_deduce_empty_is_identity() {
        let game = game();
        let empty = Knowledge::new();
        assert_eq!(deduce(&game, &Suggestions::new(), &empty), Ok(empty));
    }

    #[test]
    fn test_rules_are_named() {
        let names: Vec<&str> = RULES.iter().map(Rule::name).collect();
        assert_eq!(names.len(), 9);
        assert_eq!(names[0], "cards_are_owned_at_most_once");
        assert_eq!(names[8], "refuter_used_only_card_they_own");
    }

    #[test]
    fn test_deduce_reaches_fixed_point() {
        let game = game();
        let (anisha, bob, cho) = players();
        let knowledge = Knowledge::new()
            .with_hand_size(&game, &anisha, 6)
            .unwrap()
            .with_hand_size(&game, &bob, 6)
            .unwrap()
            .with_hand_size(&game, &cho, 6)
            .unwrap()
            .with_player_mark(&anisha, &card("Suspect", "Prof. Plum"), Mark::Yes)
            .unwrap();

        let deduced = deduce(&game, &Suggestions::new(), &knowledge).unwrap();
        assert_eq!(deduce_once(&game, &Suggestions::new(), &deduced), Ok(deduced.clone()));
        assert_eq!(
            deduced.case_file_mark(&card("Suspect", "Prof. Plum")),
            Some(Mark::No)
        );
    }

    #[test]
    fn test_deduce_chains_rules() {
        let game = game();
        let (anisha, bob, cho) = players();
        let plum = card("Suspect", "Prof. Plum");
        let rope = card("Weapon", "Rope");
        let hall = card("Room", "Hall");

        // Bob and Cho can't refute, so Plum, Rope and Hall are with Anisha or
        // in the case file. Anisha holds Rope and Hall, so Plum is the
        // murderer, and no other suspect is.
        let suggestion = Suggestion::new(
            anisha.clone(),
            [plum.clone(), rope.clone(), hall.clone()],
            [bob.clone(), cho.clone()],
            None,
            None,
        )
        .unwrap();
        let knowledge = Knowledge::new()
            .with_player_mark(&anisha, &rope, Mark::Yes)
            .unwrap()
            .with_player_mark(&anisha, &hall, Mark::Yes)
            .unwrap()
            .with_player_mark(&anisha, &plum, Mark::No)
            .unwrap();

        let deduced = deduce(&game, &Suggestions::unit(suggestion), &knowledge).unwrap();
        assert_eq!(deduced.case_file_mark(&plum), Some(Mark::Yes));
        assert_eq!(deduced.case_file_mark(&rope), Some(Mark::No));
        assert_eq!(
            deduced.case_file_mark(&card("Suspect", "Miss Scarlet")),
            Some(Mark::No)
        );
        assert_eq!(deduced.player_mark(&bob, &plum), Some(Mark::No));
    }

    #[test]
    fn test_deduce_reports_paradox() {
        let game = game();
        let (anisha, bob, _) = players();
        let plum = card("Suspect", "Prof. Plum");
        let knowledge = Knowledge::new()
            .with_player_mark(&anisha, &plum, Mark::Yes)
            .unwrap()
            .with_player_mark(&bob, &plum, Mark::Yes)
            .unwrap();
        assert!(deduce(&game, &Suggestions::new(), &knowledge).is_err());
    }

    #[test]
    fn test_max_passes() {
        // 3 players x 21 cards + 21 cards + 3 players + 1
        assert_eq!(max_passes(&game()), 88);
    }
}
