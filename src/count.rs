//! Counting the card arrangements consistent with a knowledge state.
//!
//! An arrangement gives every card exactly one owner such that:
//!
//! - every known mark is respected,
//! - every player with a known hand size holds exactly that many cards,
//! - the case file holds exactly one card of each category.
//!
//! Cards that no owner is known to hold are grouped by the set of owners that
//! may still hold them. Cards within a group are interchangeable, so splitting
//! a group of `n` cards as `k1, k2, ...` among its owners can be done in
//! `C(n, k1) * C(n - k1, k2) * ...` ways. The groups are processed one after
//! another, tracking how many more cards each bounded owner still needs; the
//! recursion is memoized on (group, remaining quotas).

use std::collections::{BTreeMap, HashMap};

use log::trace;
use num_bigint::BigUint;

use crate::combinatorics::Combinatorics;
use crate::game::{CardCategory, GameObjects};
use crate::knowledge::{Knowledge, Mark};

/// An owner as seen by the counter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
enum Slot {
    /// Must receive an exact number of further cards, tracked in the quota
    /// vector at this index. Known hand sizes and case-file categories.
    Bounded(usize),
    /// A player with unknown hand size, by player index.
    Unbounded(usize),
}

struct Counter<'a> {
    /// Interchangeable card groups: allowed owners and group size.
    groups: Vec<(Vec<Slot>, usize)>,
    /// `cards_left[i]` is the number of cards in `groups[i..]`.
    cards_left: Vec<usize>,
    combinatorics: &'a Combinatorics,
    memo: HashMap<(usize, Vec<usize>), BigUint>,
}

impl Counter<'_> {
    fn count(&mut self, group: usize, quotas: Vec<usize>) -> BigUint {
        let needed: usize = quotas.iter().sum();
        if needed > self.cards_left[group] {
            return BigUint::ZERO;
        }
        if group == self.groups.len() {
            return if needed == 0 {
                BigUint::from(1u32)
            } else {
                BigUint::ZERO
            };
        }

        let key = (group, quotas);
        if let Some(ways) = self.memo.get(&key) {
            return ways.clone();
        }

        let (slots, size) = self.groups[group].clone();
        let ways = self.distribute(group, &slots, size, key.1.clone());
        self.memo.insert(key, ways.clone());
        ways
    }

    /// Splits the `remaining` cards of `group` among `slots`, then moves on to
    /// the next group.
    fn distribute(
        &mut self,
        group: usize,
        slots: &[Slot],
        remaining: usize,
        quotas: Vec<usize>,
    ) -> BigUint {
        let Some((slot, rest)) = slots.split_first() else {
            return if remaining == 0 {
                self.count(group + 1, quotas)
            } else {
                BigUint::ZERO
            };
        };

        let most = match *slot {
            Slot::Bounded(i) => remaining.min(quotas[i]),
            Slot::Unbounded(_) => remaining,
        };
        // The last owner takes whatever is left.
        let least = if rest.is_empty() { remaining } else { 0 };

        let mut total = BigUint::ZERO;
        for taken in least..=most {
            let mut next = quotas.clone();
            if let Slot::Bounded(i) = *slot {
                next[i] -= taken;
            }
            let ways = self.distribute(group, rest, remaining - taken, next);
            if ways != BigUint::ZERO {
                total += self.combinatorics.binomial(remaining, taken) * ways;
            }
        }
        total
    }
}

/// Number of arrangements of the unknown cells consistent with `knowledge`.
///
/// The input is expected to be deduced already, but the count is exact for
/// any input: an infeasible state (including a contradictory one) has zero
/// arrangements.
pub fn count_ways_definite(
    game: &GameObjects,
    knowledge: &Knowledge,
    combinatorics: &Combinatorics,
) -> BigUint {
    let mut quotas = Vec::new();

    let mut player_slots = Vec::new();
    for (index, player) in game.players().iter().enumerate() {
        let slot = match knowledge.hand_size(player) {
            Some(hand_size) => {
                let held = game
                    .cards()
                    .iter()
                    .filter(|card| knowledge.player_mark(player, card) == Some(Mark::Yes))
                    .count();
                let Some(remaining) = hand_size.checked_sub(held) else {
                    return BigUint::ZERO;
                };
                quotas.push(remaining);
                Slot::Bounded(quotas.len() - 1)
            }
            None => Slot::Unbounded(index),
        };
        player_slots.push((player, slot));
    }

    let mut category_slots: BTreeMap<CardCategory, Slot> = BTreeMap::new();
    for category in game.categories() {
        let held = game
            .cards_in(&category)
            .filter(|card| knowledge.case_file_mark(card) == Some(Mark::Yes))
            .count();
        let Some(remaining) = 1usize.checked_sub(held) else {
            return BigUint::ZERO;
        };
        quotas.push(remaining);
        category_slots.insert(category, Slot::Bounded(quotas.len() - 1));
    }

    let mut groups: BTreeMap<Vec<Slot>, usize> = BTreeMap::new();
    for card in game.cards() {
        let holders = game
            .owners()
            .filter(|owner| knowledge.mark(owner, card) == Some(Mark::Yes))
            .count();
        match holders {
            0 => {}
            1 => continue,
            _ => return BigUint::ZERO,
        }

        let mut slots: Vec<Slot> = player_slots
            .iter()
            .filter(|(player, _)| knowledge.player_mark(player, card) != Some(Mark::No))
            .map(|(_, slot)| *slot)
            .collect();
        if knowledge.case_file_mark(card) != Some(Mark::No) {
            if let Some(slot) = category_slots.get(card.category()) {
                slots.push(*slot);
            }
        }
        *groups.entry(slots).or_default() += 1;
    }

    let groups: Vec<(Vec<Slot>, usize)> = groups.into_iter().collect();
    let mut cards_left = vec![0; groups.len() + 1];
    for (i, (_, size)) in groups.iter().enumerate().rev() {
        cards_left[i] = cards_left[i + 1] + size;
    }

    let mut counter = Counter {
        groups,
        cards_left,
        combinatorics,
        memo: HashMap::new(),
    };
    let ways = counter.count(0, quotas);
    trace!(
        "count_ways_definite: {} group(s), {} memo entries -> {}",
        counter.groups.len(),
        counter.memo.len(),
        ways
    );
    ways
}
