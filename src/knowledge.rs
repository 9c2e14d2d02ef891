//! The knowledge base: what is known about who holds which card.
//!
//! [`Knowledge`] is made of three persistent maps. A missing entry means
//! "unknown". Values are never mutated in place: every update returns a new
//! [`Knowledge`] sharing structure with the old one, or a [`LogicalParadox`]
//! when the update contradicts what is already known.
//!
//! All updates follow the same contract:
//!
//! - the key is absent: it is set and a new value is returned,
//! - the key holds the same value: the input is returned unchanged,
//! - the key holds a different value: the update fails.

use std::fmt;
use std::ops::Not;

use im::OrdMap;

use crate::game::{Card, GameObjects, Owner, Player};
use crate::paradox::LogicalParadox;

/// A known checklist value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Mark {
    /// Known to hold the card.
    Yes,
    /// Known not to hold the card.
    No,
}

impl Not for Mark {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Mark::Yes => Mark::No,
            Mark::No => Mark::Yes,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Yes => f.write_str("Y"),
            Mark::No => f.write_str("N"),
        }
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct Knowledge {
    player_checklist: OrdMap<(Player, Card), Mark>,
    case_file_checklist: OrdMap<Card, Mark>,
    player_hand_size: OrdMap<Player, usize>,
}

impl Knowledge {
    /// Knowledge with no known cells.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_checklist(&self) -> &OrdMap<(Player, Card), Mark> {
        &self.player_checklist
    }

    pub fn case_file_checklist(&self) -> &OrdMap<Card, Mark> {
        &self.case_file_checklist
    }

    pub fn player_hand_sizes(&self) -> &OrdMap<Player, usize> {
        &self.player_hand_size
    }

    pub fn player_mark(&self, player: &Player, card: &Card) -> Option<Mark> {
        self.player_checklist
            .get(&(player.clone(), card.clone()))
            .copied()
    }

    pub fn case_file_mark(&self, card: &Card) -> Option<Mark> {
        self.case_file_checklist.get(card).copied()
    }

    pub fn mark(&self, owner: &Owner, card: &Card) -> Option<Mark> {
        match owner {
            Owner::Player(player) => self.player_mark(player, card),
            Owner::CaseFile => self.case_file_mark(card),
        }
    }

    pub fn hand_size(&self, player: &Player) -> Option<usize> {
        self.player_hand_size.get(player).copied()
    }

    /// Number of checklist cells (player or case file) with a known mark.
    pub fn known_cells(&self) -> usize {
        self.player_checklist.len() + self.case_file_checklist.len()
    }

    pub fn with_player_mark(
        &self,
        player: &Player,
        card: &Card,
        mark: Mark,
    ) -> Result<Self, LogicalParadox> {
        match self.player_mark(player, card) {
            None => Ok(Knowledge {
                player_checklist: self
                    .player_checklist
                    .update((player.clone(), card.clone()), mark),
                ..self.clone()
            }),
            Some(existing) if existing == mark => Ok(self.clone()),
            Some(Mark::Yes) => Err(LogicalParadox::PlayerChecklistYesToNo {
                player: player.clone(),
                card: card.clone(),
            }),
            Some(Mark::No) => Err(LogicalParadox::PlayerChecklistNoToYes {
                player: player.clone(),
                card: card.clone(),
            }),
        }
    }

    pub fn with_case_file_mark(&self, card: &Card, mark: Mark) -> Result<Self, LogicalParadox> {
        match self.case_file_mark(card) {
            None => Ok(Knowledge {
                case_file_checklist: self.case_file_checklist.update(card.clone(), mark),
                ..self.clone()
            }),
            Some(existing) if existing == mark => Ok(self.clone()),
            Some(Mark::Yes) => Err(LogicalParadox::CaseFileChecklistYesToNo { card: card.clone() }),
            Some(Mark::No) => Err(LogicalParadox::CaseFileChecklistNoToYes { card: card.clone() }),
        }
    }

    pub fn with_mark(&self, owner: &Owner, card: &Card, mark: Mark) -> Result<Self, LogicalParadox> {
        match owner {
            Owner::Player(player) => self.with_player_mark(player, card, mark),
            Owner::CaseFile => self.with_case_file_mark(card, mark),
        }
    }

    /// Records how many cards `player` holds.
    ///
    /// The size is signed so that raw user input can be checked here rather
    /// than silently wrapped by the caller.
    pub fn with_hand_size(
        &self,
        game: &GameObjects,
        player: &Player,
        size: i64,
    ) -> Result<Self, LogicalParadox> {
        if size < 0 {
            return Err(LogicalParadox::NegativeHandSize {
                player: player.clone(),
                size,
            });
        }
        let total = game.total_cards();
        let attempted = match usize::try_from(size) {
            Ok(attempted) if attempted <= total => attempted,
            _ => {
                return Err(LogicalParadox::HandSizeExceedsCardCount {
                    player: player.clone(),
                    size,
                    total,
                })
            }
        };

        match self.hand_size(player) {
            None => Ok(Knowledge {
                player_hand_size: self.player_hand_size.update(player.clone(), attempted),
                ..self.clone()
            }),
            Some(existing) if existing == attempted => Ok(self.clone()),
            Some(existing) => Err(LogicalParadox::HandSizeConflict {
                player: player.clone(),
                existing,
                attempted,
            }),
        }
    }

    /// Every (owner, card) cell of `game` that has no known mark yet.
    pub fn unknown_cells<'a>(&'a self, game: &'a GameObjects) -> impl Iterator<Item = (Owner, Card)> + 'a {
        game.owners()
            .flat_map(move |owner| game.cards().iter().map(move |card| (owner.clone(), card.clone())))
            .filter(move |(owner, card)| self.mark(owner, card).is_none())
    }
}
