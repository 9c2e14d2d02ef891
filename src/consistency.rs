//! Rules derived from the structure of the game alone.
//!
//! - Every card is held by exactly one owner (a player or the case file).
//! - A player with a known hand size holds exactly that many cards.
//! - The case file holds exactly one card of each category.
//!
//! Each rule reads its input as a snapshot, works out which marks the snapshot
//! implies, and writes them through the [`Knowledge`] update operations. On
//! consistent input this only fills blank cells. An implied mark that
//! contradicts a known one surfaces as a [`LogicalParadox`].

use crate::game::{Card, GameObjects, Owner, Player};
use crate::knowledge::{Knowledge, Mark};
use crate::paradox::LogicalParadox;

/// Signature shared by all consistency rules.
pub type ConsistencyRule = fn(&GameObjects, &Knowledge) -> Result<Knowledge, LogicalParadox>;

/// If an owner is known to hold a card, nobody else holds it.
pub fn cards_are_owned_at_most_once(
    game: &GameObjects,
    knowledge: &Knowledge,
) -> Result<Knowledge, LogicalParadox> {
    let mut result = knowledge.clone();
    for card in game.cards() {
        let holders: Vec<Owner> = game
            .owners()
            .filter(|owner| knowledge.mark(owner, card) == Some(Mark::Yes))
            .collect();
        let Some(holder) = holders.first() else {
            continue;
        };
        for owner in game.owners().filter(|owner| owner != holder) {
            result = result.with_mark(&owner, card, Mark::No)?;
        }
    }
    Ok(result)
}

/// If every owner but one is known not to hold a card, the remaining one does.
pub fn cards_are_owned_at_least_once(
    game: &GameObjects,
    knowledge: &Knowledge,
) -> Result<Knowledge, LogicalParadox> {
    let mut result = knowledge.clone();
    for card in game.cards() {
        let candidates: Vec<Owner> = game
            .owners()
            .filter(|owner| knowledge.mark(owner, card) != Some(Mark::No))
            .collect();
        match candidates.as_slice() {
            [] => return Err(LogicalParadox::CardHasNoOwner { card: card.clone() }),
            [owner] => result = result.with_mark(owner, card, Mark::Yes)?,
            _ => {}
        }
    }
    Ok(result)
}

fn count_marks(game: &GameObjects, knowledge: &Knowledge, player: &Player, mark: Mark) -> usize {
    game.cards()
        .iter()
        .filter(|card| knowledge.player_mark(player, card) == Some(mark))
        .count()
}

/// Marks every remaining card of `player` whose cell is not already `keep`.
fn fill_player_row(
    game: &GameObjects,
    knowledge: &Knowledge,
    mut result: Knowledge,
    player: &Player,
    keep: Mark,
) -> Result<Knowledge, LogicalParadox> {
    for card in game.cards() {
        if knowledge.player_mark(player, card) != Some(keep) {
            result = result.with_player_mark(player, card, !keep)?;
        }
    }
    Ok(result)
}

/// A player already known to hold `hand_size` cards holds nothing else.
pub fn player_owns_at_most_hand_size(
    game: &GameObjects,
    knowledge: &Knowledge,
) -> Result<Knowledge, LogicalParadox> {
    let mut result = knowledge.clone();
    for player in game.players() {
        let Some(hand_size) = knowledge.hand_size(player) else {
            continue;
        };
        let held = count_marks(game, knowledge, player, Mark::Yes);
        if held > hand_size {
            return Err(LogicalParadox::TooManyCardsHeld {
                player: player.clone(),
                hand_size,
                held,
            });
        }
        if held == hand_size {
            result = fill_player_row(game, knowledge, result, player, Mark::Yes)?;
        }
    }
    Ok(result)
}

/// A player who can only hold `hand_size` more cards holds all of them.
pub fn player_owns_at_least_hand_size(
    game: &GameObjects,
    knowledge: &Knowledge,
) -> Result<Knowledge, LogicalParadox> {
    let mut result = knowledge.clone();
    for player in game.players() {
        let Some(hand_size) = knowledge.hand_size(player) else {
            continue;
        };
        let available = game.total_cards() - count_marks(game, knowledge, player, Mark::No);
        if available < hand_size {
            return Err(LogicalParadox::TooFewCardsAvailable {
                player: player.clone(),
                hand_size,
                available,
            });
        }
        if available == hand_size {
            result = fill_player_row(game, knowledge, result, player, Mark::No)?;
        }
    }
    Ok(result)
}

/// Once the case file's card of a category is known, the others are not in it.
pub fn case_file_owns_at_most_1_per_category(
    game: &GameObjects,
    knowledge: &Knowledge,
) -> Result<Knowledge, LogicalParadox> {
    let mut result = knowledge.clone();
    for category in game.categories() {
        let cards: Vec<&Card> = game.cards_in(&category).collect();
        let Some(solution) = cards
            .iter()
            .find(|card| knowledge.case_file_mark(card) == Some(Mark::Yes))
        else {
            continue;
        };
        for card in cards.iter().filter(|card| *card != solution) {
            result = result.with_case_file_mark(card, Mark::No)?;
        }
    }
    Ok(result)
}

/// When only one card of a category may still be in the case file, it is.
pub fn case_file_owns_at_least_1_per_category(
    game: &GameObjects,
    knowledge: &Knowledge,
) -> Result<Knowledge, LogicalParadox> {
    let mut result = knowledge.clone();
    for category in game.categories() {
        let candidates: Vec<&Card> = game
            .cards_in(&category)
            .filter(|card| knowledge.case_file_mark(card) != Some(Mark::No))
            .collect();
        match candidates.as_slice() {
            [] => return Err(LogicalParadox::CaseFileCategoryEmpty { category }),
            [card] => result = result.with_case_file_mark(card, Mark::Yes)?,
            _ => {}
        }
    }
    Ok(result)
}
