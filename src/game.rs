//! Players, cards and suggestions.
//!
//! All domain values are cheap to clone (they share their strings through
//! [`Arc`]) and are compared, ordered and hashed structurally, so they can be
//! stored in persistent collections and used as memo keys.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use im::OrdSet;
use thiserror::Error;

/// A player, identified by display name.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Player(Arc<str>);

impl Player {
    pub fn new(name: impl AsRef<str>) -> Self {
        Player(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A card category, e.g. "Suspect", "Weapon" or "Room".
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CardCategory(Arc<str>);

impl CardCategory {
    pub fn new(name: impl AsRef<str>) -> Self {
        CardCategory(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A card: a name within a category.
///
/// Cards order by category first, so iterating an ordered set of cards visits
/// each category as one contiguous run.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Card {
    category: CardCategory,
    name: Arc<str>,
}

impl Card {
    pub fn new(category: CardCategory, name: impl AsRef<str>) -> Self {
        Card {
            category,
            name: Arc::from(name.as_ref()),
        }
    }

    pub fn category(&self) -> &CardCategory {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Whoever may hold a card: one of the players, or the hidden case file.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Owner {
    Player(Player),
    CaseFile,
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Player(player) => write!(f, "{}", player),
            Owner::CaseFile => f.write_str("Case file"),
        }
    }
}

/// The fixed roster of a game: who plays, and which cards exist.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct GameObjects {
    players: OrdSet<Player>,
    cards: OrdSet<Card>,
}

pub const CLASSIC_SUSPECTS: [&str; 6] = [
    "Miss Scarlet",
    "Col. Mustard",
    "Mrs. White",
    "Mr. Green",
    "Mrs. Peacock",
    "Prof. Plum",
];

pub const CLASSIC_WEAPONS: [&str; 6] = [
    "Candlestick",
    "Knife",
    "Lead Pipe",
    "Revolver",
    "Rope",
    "Wrench",
];

pub const CLASSIC_ROOMS: [&str; 9] = [
    "Kitchen",
    "Ballroom",
    "Conservatory",
    "Dining Room",
    "Billiard Room",
    "Library",
    "Lounge",
    "Hall",
    "Study",
];

impl GameObjects {
    pub fn new(
        players: impl IntoIterator<Item = Player>,
        cards: impl IntoIterator<Item = Card>,
    ) -> Self {
        GameObjects {
            players: players.into_iter().collect(),
            cards: cards.into_iter().collect(),
        }
    }

    /// The standard 21-card deck: 6 suspects, 6 weapons and 9 rooms.
    pub fn classic(players: impl IntoIterator<Item = Player>) -> Self {
        let deck = [
            ("Suspect", &CLASSIC_SUSPECTS[..]),
            ("Weapon", &CLASSIC_WEAPONS[..]),
            ("Room", &CLASSIC_ROOMS[..]),
        ];
        let cards = deck.into_iter().flat_map(|(category, names)| {
            let category = CardCategory::new(category);
            names
                .iter()
                .map(move |name| Card::new(category.clone(), name))
        });
        GameObjects::new(players, cards)
    }

    pub fn players(&self) -> &OrdSet<Player> {
        &self.players
    }

    pub fn cards(&self) -> &OrdSet<Card> {
        &self.cards
    }

    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn categories(&self) -> OrdSet<CardCategory> {
        self.cards.iter().map(|card| card.category().clone()).collect()
    }

    pub fn cards_in<'a>(&'a self, category: &'a CardCategory) -> impl Iterator<Item = &'a Card> + 'a {
        self.cards
            .iter()
            .filter(move |card| card.category() == category)
    }

    /// Every player followed by the case file.
    pub fn owners(&self) -> impl Iterator<Item = Owner> + '_ {
        self.players
            .iter()
            .cloned()
            .map(Owner::Player)
            .chain(std::iter::once(Owner::CaseFile))
    }
}

/// Reasons a suggestion record is rejected.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum SuggestionError {
    #[error("a card was seen but nobody refuted the suggestion")]
    SeenCardWithoutRefuter,
    #[error("seen card {0} was not part of the suggestion")]
    SeenCardNotSuggested(Card),
    #[error("{0} cannot both refute and fail to refute the same suggestion")]
    RefuterIsNonRefuter(Player),
    #[error("more than one {0} card was suggested")]
    DuplicateCategory(CardCategory),
}

/// A recorded guess and how it was answered.
///
/// The seen card, when present, implies a refuter and is one of the
/// suggested cards; [`Suggestion::new`] enforces this.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Suggestion {
    suggester: Player,
    cards: BTreeSet<Card>,
    non_refuters: BTreeSet<Player>,
    refuter: Option<Player>,
    seen_card: Option<Card>,
}

/// The suggestion history of one game.
pub type Suggestions = OrdSet<Suggestion>;

impl Suggestion {
    pub fn new(
        suggester: Player,
        cards: impl IntoIterator<Item = Card>,
        non_refuters: impl IntoIterator<Item = Player>,
        refuter: Option<Player>,
        seen_card: Option<Card>,
    ) -> Result<Self, SuggestionError> {
        let mut suggested = BTreeSet::new();
        let mut categories = BTreeSet::new();
        for card in cards {
            if !categories.insert(card.category().clone()) {
                return Err(SuggestionError::DuplicateCategory(card.category().clone()));
            }
            suggested.insert(card);
        }
        let non_refuters: BTreeSet<Player> = non_refuters.into_iter().collect();

        if let Some(card) = &seen_card {
            if refuter.is_none() {
                return Err(SuggestionError::SeenCardWithoutRefuter);
            }
            if !suggested.contains(card) {
                return Err(SuggestionError::SeenCardNotSuggested(card.clone()));
            }
        }
        if let Some(player) = &refuter {
            if non_refuters.contains(player) {
                return Err(SuggestionError::RefuterIsNonRefuter(player.clone()));
            }
        }

        Ok(Suggestion {
            suggester,
            cards: suggested,
            non_refuters,
            refuter,
            seen_card,
        })
    }

    pub fn suggester(&self) -> &Player {
        &self.suggester
    }

    pub fn cards(&self) -> &BTreeSet<Card> {
        &self.cards
    }

    pub fn non_refuters(&self) -> &BTreeSet<Player> {
        &self.non_refuters
    }

    pub fn refuter(&self) -> Option<&Player> {
        self.refuter.as_ref()
    }

    pub fn seen_card(&self) -> Option<&Card> {
        self.seen_card.as_ref()
    }

    /// Refuted, but we don't know which card was shown.
    pub fn is_ambiguous(&self) -> bool {
        self.refuter.is_some() && self.seen_card.is_none()
    }
}
