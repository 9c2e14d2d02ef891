//! Logical contradictions raised while updating or saturating [`Knowledge`][crate::knowledge::Knowledge].

use thiserror::Error;

use crate::game::{Card, CardCategory, Player};

/// A contradiction between facts.
///
/// The first group of variants is raised by the knowledge update operations
/// when a known cell would be overwritten with the opposite value. The second
/// group is raised by the consistency and deduction rules when the game's
/// structure cannot be satisfied at all.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Error)]
pub enum LogicalParadox {
    #[error("{player} is known to hold {card}, but would be marked as not holding it")]
    PlayerChecklistYesToNo { player: Player, card: Card },
    #[error("{player} is known not to hold {card}, but would be marked as holding it")]
    PlayerChecklistNoToYes { player: Player, card: Card },
    #[error("the case file is known to hold {card}, but would be marked as not holding it")]
    CaseFileChecklistYesToNo { card: Card },
    #[error("the case file is known not to hold {card}, but would be marked as holding it")]
    CaseFileChecklistNoToYes { card: Card },
    #[error("{player} holds {existing} cards, but would be set to hold {attempted}")]
    HandSizeConflict {
        player: Player,
        existing: usize,
        attempted: usize,
    },
    #[error("{player} cannot hold a negative number of cards ({size})")]
    NegativeHandSize { player: Player, size: i64 },
    #[error("{player} cannot hold {size} cards when only {total} exist")]
    HandSizeExceedsCardCount {
        player: Player,
        size: i64,
        total: usize,
    },

    #[error("nobody can hold {card}")]
    CardHasNoOwner { card: Card },
    #[error("the case file cannot hold any {category} card")]
    CaseFileCategoryEmpty { category: CardCategory },
    #[error("{player} holds {held} cards, more than their hand size of {hand_size}")]
    TooManyCardsHeld {
        player: Player,
        hand_size: usize,
        held: usize,
    },
    #[error("{player} can hold at most {available} cards, fewer than their hand size of {hand_size}")]
    TooFewCardsAvailable {
        player: Player,
        hand_size: usize,
        available: usize,
    },
    #[error("{refuter} refuted a suggestion without holding any of its cards")]
    RefuterHoldsNoSuggestedCard { refuter: Player },
}
