//! Property tests over random deals of a small game.
//!
//! Every scenario is generated from a real deal: revealed cells and hand
//! sizes are copied from the deal, and suggestions are answered the way the
//! players would answer them. The knowledge is therefore always consistent,
//! and everything derived from it must agree with the deal.

use std::collections::BTreeMap;

use cluedo_rs::deducer::{deduce, deduce_once, max_passes, RULES};
use cluedo_rs::game::{Card, CardCategory, GameObjects, Owner, Player, Suggestion, Suggestions};
use cluedo_rs::knowledge::{Knowledge, Mark};
use cluedo_rs::predict::{Predictor, PredictorOptions};
use num_bigint::BigUint;
use proptest::prelude::*;
use proptest::sample::Index;

const PLAYERS: [&str; 3] = ["Anisha", "Bob", "Cho"];
const HAND_SIZES: [usize; 3] = [2, 2, 1];
const SUSPECTS: [&str; 3] = ["Plum", "Mustard", "Scarlet"];
const WEAPONS: [&str; 2] = ["Rope", "Knife"];
const ROOMS: [&str; 3] = ["Hall", "Study", "Library"];

fn card(category: &str, name: &str) -> Card {
    Card::new(CardCategory::new(category), name)
}

fn cards() -> Vec<Card> {
    let suspects = SUSPECTS.iter().map(|name| card("Suspect", name));
    let weapons = WEAPONS.iter().map(|name| card("Weapon", name));
    let rooms = ROOMS.iter().map(|name| card("Room", name));
    suspects.chain(weapons).chain(rooms).collect()
}

#[derive(Debug, Clone)]
struct Scenario {
    game: GameObjects,
    truth: BTreeMap<Card, Owner>,
    knowledge: Knowledge,
    suggestions: Suggestions,
}

impl Scenario {
    /// `order` is a shuffled deck: the first card of each category goes to
    /// the case file, the rest is dealt in order.
    fn new(
        order: Vec<Card>,
        revealed: Vec<bool>,
        known_sizes: [bool; 3],
        guesses: Vec<(usize, usize, usize, usize)>,
    ) -> Self {
        let players: Vec<Player> = PLAYERS.iter().map(Player::new).collect();
        let game = GameObjects::new(players.clone(), cards());

        let mut truth = BTreeMap::new();
        let mut dealt = Vec::new();
        for card in order {
            let taken = truth
                .iter()
                .any(|(c, _): (&Card, &Owner)| c.category() == card.category());
            if taken {
                dealt.push(card);
            } else {
                truth.insert(card, Owner::CaseFile);
            }
        }
        let mut dealt = dealt.into_iter();
        for (player, &size) in players.iter().zip(&HAND_SIZES) {
            for card in dealt.by_ref().take(size) {
                truth.insert(card, Owner::Player(player.clone()));
            }
        }

        let mut knowledge = Knowledge::new();
        let cells = game
            .owners()
            .flat_map(|owner| game.cards().iter().map(move |card| (owner.clone(), card.clone())));
        for ((owner, card), reveal) in cells.zip(&revealed) {
            if *reveal {
                let mark = if truth[&card] == owner { Mark::Yes } else { Mark::No };
                knowledge = knowledge.with_mark(&owner, &card, mark).unwrap();
            }
        }
        for ((player, &size), &known) in players.iter().zip(&HAND_SIZES).zip(&known_sizes) {
            if known {
                knowledge = knowledge.with_hand_size(&game, player, size as i64).unwrap();
            }
        }

        let mut suggestions = Suggestions::new();
        for (suggester, s, w, r) in guesses {
            let guess = [
                card("Suspect", SUSPECTS[s]),
                card("Weapon", WEAPONS[w]),
                card("Room", ROOMS[r]),
            ];
            let mut non_refuters = Vec::new();
            let mut refuter = None;
            let mut seen = None;
            for step in 1..players.len() {
                let player = &players[(suggester + step) % players.len()];
                let holder = Owner::Player(player.clone());
                match guess.iter().find(|card| truth[*card] == holder) {
                    Some(shown) => {
                        refuter = Some(player.clone());
                        // Only our own suggestions show us the card.
                        if suggester == 0 {
                            seen = Some(shown.clone());
                        }
                        break;
                    }
                    None => non_refuters.push(player.clone()),
                }
            }
            let suggestion =
                Suggestion::new(players[suggester].clone(), guess, non_refuters, refuter, seen)
                    .unwrap();
            suggestions.insert(suggestion);
        }

        Scenario {
            game,
            truth,
            knowledge,
            suggestions,
        }
    }

    fn is_true(&self, owner: &Owner, card: &Card, mark: Mark) -> bool {
        (self.truth[card] == *owner) == (mark == Mark::Yes)
    }

    /// Every mark in `knowledge` agrees with the deal.
    fn agrees_with(&self, knowledge: &Knowledge) -> bool {
        let players = knowledge
            .player_checklist()
            .iter()
            .all(|((player, card), mark)| self.is_true(&Owner::Player(player.clone()), card, *mark));
        let case_file = knowledge
            .case_file_checklist()
            .iter()
            .all(|(card, mark)| self.is_true(&Owner::CaseFile, card, *mark));
        players && case_file
    }

    fn predictor(&self) -> Predictor {
        Predictor::with_options(self.game.clone(), PredictorOptions::default().with_threads(2))
    }
}

fn scenario() -> impl Strategy<Value = Scenario> {
    (
        Just(cards()).prop_shuffle(),
        prop::collection::vec(any::<bool>(), 4 * 8),
        any::<[bool; 3]>(),
        prop::collection::vec((0..3usize, 0..3usize, 0..2usize, 0..3usize), 0..4),
    )
        .prop_map(|(order, revealed, known_sizes, guesses)| {
            Scenario::new(order, revealed, known_sizes, guesses)
        })
}

/// Every known cell of `before` keeps its mark in `after`.
fn extends(before: &Knowledge, after: &Knowledge) -> bool {
    let players = before
        .player_checklist()
        .iter()
        .all(|(key, mark)| after.player_checklist().get(key) == Some(mark));
    let case_file = before
        .case_file_checklist()
        .iter()
        .all(|(key, mark)| after.case_file_checklist().get(key) == Some(mark));
    let sizes = before
        .player_hand_sizes()
        .iter()
        .all(|(key, size)| after.player_hand_sizes().get(key) == Some(size));
    players && case_file && sizes
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rules_are_sound_monotone_and_idempotent(s in scenario()) {
        for rule in RULES {
            let once = rule.apply(&s.game, &s.suggestions, &s.knowledge);
            prop_assert!(once.is_ok(), "{} failed on a real deal: {:?}", rule.name(), once);
            let once = once.unwrap();
            prop_assert!(extends(&s.knowledge, &once), "{} forgot something", rule.name());
            prop_assert!(s.agrees_with(&once), "{} contradicts the deal", rule.name());

            let twice = rule.apply(&s.game, &s.suggestions, &once).unwrap();
            prop_assert_eq!(twice, once, "{} is not idempotent", rule.name());
        }
    }

    #[test]
    fn deduce_reaches_a_sound_fixed_point(s in scenario()) {
        let deduced = deduce(&s.game, &s.suggestions, &s.knowledge).unwrap();
        prop_assert!(extends(&s.knowledge, &deduced));
        prop_assert!(s.agrees_with(&deduced));
        prop_assert_eq!(deduce_once(&s.game, &s.suggestions, &deduced).unwrap(), deduced.clone());
        prop_assert_eq!(deduce(&s.game, &s.suggestions, &deduced).unwrap(), deduced);
    }

    #[test]
    fn deduce_terminates_within_bound(s in scenario()) {
        let mut current = s.knowledge.clone();
        let mut passes = 0;
        loop {
            passes += 1;
            prop_assert!(passes <= max_passes(&s.game));
            let next = deduce_once(&s.game, &s.suggestions, &current).unwrap();
            if next == current {
                break;
            }
            current = next;
        }
    }

    #[test]
    fn count_splits_on_any_unknown_cell(s in scenario(), pick in any::<Index>()) {
        let predictor = s.predictor();
        let deduced = deduce(&s.game, &s.suggestions, &s.knowledge).unwrap();
        let total = predictor.count_ways(&s.suggestions, &s.knowledge).unwrap();
        prop_assert!(total > BigUint::ZERO);
        prop_assert_eq!(&predictor.count_ways(&s.suggestions, &deduced).unwrap(), &total);

        let unknown: Vec<(Owner, Card)> = deduced.unknown_cells(&s.game).collect();
        if unknown.is_empty() {
            return Ok(());
        }
        let (owner, card) = pick.get(&unknown);
        let yes = deduced.with_mark(owner, card, Mark::Yes).unwrap();
        let no = deduced.with_mark(owner, card, Mark::No).unwrap();
        let split = predictor.count_ways(&s.suggestions, &yes).unwrap()
            + predictor.count_ways(&s.suggestions, &no).unwrap();
        prop_assert_eq!(split, total);
    }

    #[test]
    fn prediction_is_a_distribution_over_owners(s in scenario()) {
        let predictor = s.predictor();
        let prediction = predictor.predict(&s.suggestions, &s.knowledge).unwrap();
        let total = predictor.count_ways(&s.suggestions, &s.knowledge).unwrap();

        for card in s.game.cards() {
            let mut sum = BigUint::ZERO;
            for owner in s.game.owners() {
                let p = prediction.get(&owner, card).unwrap();
                sum += p.numerator() * &total / p.denominator();
            }
            prop_assert_eq!(&sum, &total, "{}", card);

            let actual = prediction.get(&s.truth[card], card).unwrap();
            prop_assert!(!actual.is_zero(), "the real owner of {} was ruled out", card);
        }
    }
}
