//! Rules derived from the history of suggestions.

use crate::game::{Card, Suggestions};
use crate::knowledge::{Knowledge, Mark};
use crate::paradox::LogicalParadox;

/// Signature shared by all deduction rules.
pub type DeductionRule = fn(&Suggestions, &Knowledge) -> Result<Knowledge, LogicalParadox>;

/// A player who could not refute a suggestion holds none of its cards.
pub fn non_refuters_dont_have_suggested_cards(
    suggestions: &Suggestions,
    knowledge: &Knowledge,
) -> Result<Knowledge, LogicalParadox> {
    let mut result = knowledge.clone();
    for suggestion in suggestions {
        for player in suggestion.non_refuters() {
            for card in suggestion.cards() {
                result = result.with_player_mark(player, card, Mark::No)?;
            }
        }
    }
    Ok(result)
}

/// A refuter holds the card we saw them show.
pub fn refuter_used_seen_card(
    suggestions: &Suggestions,
    knowledge: &Knowledge,
) -> Result<Knowledge, LogicalParadox> {
    let mut result = knowledge.clone();
    for suggestion in suggestions {
        if let (Some(refuter), Some(card)) = (suggestion.refuter(), suggestion.seen_card()) {
            result = result.with_player_mark(refuter, card, Mark::Yes)?;
        }
    }
    Ok(result)
}

/// A refuter who can hold only one of the suggested cards must have shown it.
pub fn refuter_used_only_card_they_own(
    suggestions: &Suggestions,
    knowledge: &Knowledge,
) -> Result<Knowledge, LogicalParadox> {
    let mut result = knowledge.clone();
    for suggestion in suggestions.iter().filter(|s| s.is_ambiguous()) {
        let Some(refuter) = suggestion.refuter() else {
            continue;
        };
        let candidates: Vec<&Card> = suggestion
            .cards()
            .iter()
            .filter(|card| knowledge.player_mark(refuter, card) != Some(Mark::No))
            .collect();
        match candidates.as_slice() {
            [] => {
                return Err(LogicalParadox::RefuterHoldsNoSuggestedCard {
                    refuter: refuter.clone(),
                })
            }
            [card] => result = result.with_player_mark(refuter, card, Mark::Yes)?,
            _ => {}
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::game::{CardCategory, Player, Suggestion};

    fn suspect(name: &str) -> Card {
        Card::new(CardCategory::new("Suspect"), name)
    }

    fn weapon(name: &str) -> Card {
        Card::new(CardCategory::new("Weapon"), name)
    }

    fn room(name: &str) -> Card {
        Card::new(CardCategory::new("Room"), name)
    }

    fn guess() -> [Card; 3] {
        [suspect("Prof. Plum"), weapon("Rope"), room("Hall")]
    }

    #[test]
    fn test_rules_leave_empty_knowledge_alone() {
        let empty = Knowledge::new();
        let suggestions = Suggestions::new();
        let rules: [DeductionRule; 3] = [
            non_refuters_dont_have_suggested_cards,
            refuter_used_seen_card,
            refuter_used_only_card_they_own,
        ];
        for rule in rules {
            assert_eq!(rule(&suggestions, &empty), Ok(empty.clone()));
        }
    }

    #[test]
    fn test_non_refuters_dont_have_suggested_cards() {
        let bob = Player::new("Bob");
        let cho = Player::new("Cho");
        let suggestion = Suggestion::new(
            Player::new("Anisha"),
            guess(),
            [bob.clone(), cho.clone()],
            None,
            None,
        )
        .unwrap();
        let suggestions = Suggestions::unit(suggestion);

        let result = non_refuters_dont_have_suggested_cards(&suggestions, &Knowledge::new()).unwrap();
        for card in guess() {
            assert_eq!(result.player_mark(&bob, &card), Some(Mark::No));
            assert_eq!(result.player_mark(&cho, &card), Some(Mark::No));
        }
        assert_eq!(result.known_cells(), 6);
    }

    #[test]
    fn test_refuter_used_seen_card() {
        let bob = Player::new("Bob");
        let suggestion = Suggestion::new(
            Player::new("Anisha"),
            guess(),
            Vec::<Player>::new(),
            Some(bob.clone()),
            Some(weapon("Rope")),
        )
        .unwrap();
        let suggestions = Suggestions::unit(suggestion);

        let result = refuter_used_seen_card(&suggestions, &Knowledge::new()).unwrap();
        assert_eq!(result.player_mark(&bob, &weapon("Rope")), Some(Mark::Yes));
        assert_eq!(result.known_cells(), 1);
    }

    #[test]
    fn test_refuter_used_only_card_they_own() {
        let bob = Player::new("Bob");
        let suggestion = Suggestion::new(
            Player::new("Anisha"),
            guess(),
            Vec::<Player>::new(),
            Some(bob.clone()),
            None,
        )
        .unwrap();
        let suggestions = Suggestions::unit(suggestion);

        let knowledge = Knowledge::new()
            .with_player_mark(&bob, &suspect("Prof. Plum"), Mark::No)
            .unwrap()
            .with_player_mark(&bob, &room("Hall"), Mark::No)
            .unwrap();
        let result = refuter_used_only_card_they_own(&suggestions, &knowledge).unwrap();
        assert_eq!(result.player_mark(&bob, &weapon("Rope")), Some(Mark::Yes));

        // With two candidates left nothing can be concluded.
        let partial = Knowledge::new()
            .with_player_mark(&bob, &room("Hall"), Mark::No)
            .unwrap();
        assert_eq!(
            refuter_used_only_card_they_own(&suggestions, &partial),
            Ok(partial.clone())
        );

        let impossible = knowledge
            .with_player_mark(&bob, &weapon("Rope"), Mark::No)
            .unwrap();
        assert_eq!(
            refuter_used_only_card_they_own(&suggestions, &impossible),
            Err(LogicalParadox::RefuterHoldsNoSuggestedCard { refuter: bob })
        );
    }

    #[test]
    fn test_seen_card_is_not_ambiguous() {
        let bob = Player::new("Bob");
        let suggestion = Suggestion::new(
            Player::new("Anisha"),
            guess(),
            Vec::<Player>::new(),
            Some(bob.clone()),
            Some(room("Hall")),
        )
        .unwrap();
        let suggestions = Suggestions::unit(suggestion);
        let knowledge = Knowledge::new()
            .with_player_mark(&bob, &suspect("Prof. Plum"), Mark::No)
            .unwrap()
            .with_player_mark(&bob, &weapon("Rope"), Mark::No)
            .unwrap();
        assert_eq!(
            refuter_used_only_card_they_own(&suggestions, &knowledge),
            Ok(knowledge.clone())
        );
    }
}
