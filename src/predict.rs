//! Exact probabilities for every checklist cell.
//!
//! The probability that an owner holds a card is the number of arrangements
//! in which they do, divided by the number of all arrangements consistent
//! with what is known.
//!
//! Counting is done in three layers, each memoized in the [`Predictor`]:
//!
//! 1. [`Predictor::all_knowledge_branches`] resolves every refutation whose
//!    shown card we did not see into disjoint hypotheses ("branches").
//! 2. Each branch is saturated with [`deduce`]; contradictory branches are
//!    dropped.
//! 3. [`Predictor::count_ways_definite`] counts the arrangements of each
//!    remaining branch, and [`Predictor::count_ways`] sums them.
//!
//! Because the branches of a suggestion are disjoint ("shows the first
//! candidate", "doesn't hold the first but shows the second", ...), summing
//! their counts never counts an arrangement twice.

use std::sync::Arc;

use im::OrdMap;
use log::{debug, trace};
use num_bigint::BigUint;
use thiserror::Error;

use crate::cache::MemoCache;
use crate::combinatorics::Combinatorics;
use crate::count;
use crate::deducer::deduce;
use crate::game::{Card, GameObjects, Owner, Player, Suggestions};
use crate::knowledge::{Knowledge, Mark};
use crate::paradox::LogicalParadox;
use crate::probability::Probability;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum PredictError {
    #[error("the inputs are contradictory: {0}")]
    Paradox(#[from] LogicalParadox),
    #[error("no card arrangement is consistent with the inputs")]
    NoConsistentArrangement,
    #[error("more than {limit} refutation branches to explore")]
    BranchLimitExceeded { limit: usize },
}

/// Tuning knobs for a [`Predictor`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PredictorOptions {
    /// Worker threads used to evaluate cells in parallel. At least 1.
    pub threads: usize,
    /// Largest number of refutation branches explored for one knowledge
    /// state before giving up.
    pub max_branches: usize,
}

impl Default for PredictorOptions {
    fn default() -> Self {
        Self {
            threads: std::thread::available_parallelism().map_or(1, |n| n.get()),
            max_branches: 100_000,
        }
    }
}

impl PredictorOptions {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_max_branches(mut self, max_branches: usize) -> Self {
        self.max_branches = max_branches;
        self
    }
}

/// Probabilities for every cell of a game.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Prediction {
    player_checklist: OrdMap<(Player, Card), Probability>,
    case_file_checklist: OrdMap<Card, Probability>,
}

impl Prediction {
    pub fn player_checklist(&self) -> &OrdMap<(Player, Card), Probability> {
        &self.player_checklist
    }

    pub fn case_file_checklist(&self) -> &OrdMap<Card, Probability> {
        &self.case_file_checklist
    }

    pub fn player(&self, player: &Player, card: &Card) -> Option<&Probability> {
        self.player_checklist.get(&(player.clone(), card.clone()))
    }

    pub fn case_file(&self, card: &Card) -> Option<&Probability> {
        self.case_file_checklist.get(card)
    }

    pub fn get(&self, owner: &Owner, card: &Card) -> Option<&Probability> {
        match owner {
            Owner::Player(player) => self.player(player, card),
            Owner::CaseFile => self.case_file(card),
        }
    }

    fn insert(&mut self, owner: Owner, card: Card, probability: Probability) {
        match owner {
            Owner::Player(player) => {
                self.player_checklist.insert((player, card), probability);
            }
            Owner::CaseFile => {
                self.case_file_checklist.insert(card, probability);
            }
        }
    }
}

type BranchKey = (Suggestions, Knowledge);

/// Probability engine for one game.
///
/// Holds the memo tables, so reusing a predictor across calls (for instance
/// after each new suggestion) reuses every count computed so far.
pub struct Predictor {
    game: GameObjects,
    options: PredictorOptions,
    combinatorics: Combinatorics,
    branches: MemoCache<BranchKey, Arc<Vec<Knowledge>>>,
    ways: MemoCache<BranchKey, BigUint>,
    definite_ways: MemoCache<Knowledge, BigUint>,
}

impl Predictor {
    pub fn new(game: GameObjects) -> Self {
        Self::with_options(game, PredictorOptions::default())
    }

    pub fn with_options(game: GameObjects, options: PredictorOptions) -> Self {
        Self {
            game,
            options,
            combinatorics: Combinatorics::new(),
            branches: MemoCache::new(),
            ways: MemoCache::new(),
            definite_ways: MemoCache::new(),
        }
    }

    pub fn game(&self) -> &GameObjects {
        &self.game
    }

    pub fn options(&self) -> &PredictorOptions {
        &self.options
    }

    /// Every way of resolving the ambiguous refutations in `suggestions`,
    /// applied to `knowledge`.
    ///
    /// For a refutation with candidate cards `c1, c2, ..., cn`, the `i`-th
    /// choice marks `ci` as held by the refuter and `c1..c(i-1)` as not held.
    /// Choices that contradict the knowledge are dropped as soon as they
    /// appear. Without ambiguous refutations the only branch is `knowledge`.
    pub fn all_knowledge_branches(
        &self,
        suggestions: &Suggestions,
        knowledge: &Knowledge,
    ) -> Result<Arc<Vec<Knowledge>>, PredictError> {
        self.branches
            .get_or_try_insert_with((suggestions.clone(), knowledge.clone()), || {
                let mut branches = vec![knowledge.clone()];
                for suggestion in suggestions.iter().filter(|s| s.is_ambiguous()) {
                    let Some(refuter) = suggestion.refuter() else {
                        continue;
                    };
                    let candidates: Vec<&Card> = suggestion.cards().iter().collect();
                    let mut next = Vec::new();
                    for branch in &branches {
                        for (i, shown) in candidates.iter().enumerate() {
                            let choice = candidates[..i]
                                .iter()
                                .try_fold(branch.clone(), |k, card| {
                                    k.with_player_mark(refuter, card, Mark::No)
                                })
                                .and_then(|k| k.with_player_mark(refuter, shown, Mark::Yes));
                            if let Ok(choice) = choice {
                                next.push(choice);
                            }
                        }
                    }
                    if next.len() > self.options.max_branches {
                        return Err(PredictError::BranchLimitExceeded {
                            limit: self.options.max_branches,
                        });
                    }
                    branches = next;
                }
                trace!("all_knowledge_branches: {} branch(es)", branches.len());
                Ok(Arc::new(branches))
            })
    }

    /// Number of arrangements consistent with `knowledge` and `suggestions`.
    pub fn count_ways(
        &self,
        suggestions: &Suggestions,
        knowledge: &Knowledge,
    ) -> Result<BigUint, PredictError> {
        self.ways
            .get_or_try_insert_with((suggestions.clone(), knowledge.clone()), || {
                let branches = self.all_knowledge_branches(suggestions, knowledge)?;
                let mut total = BigUint::ZERO;
                for branch in branches.iter() {
                    match deduce(&self.game, suggestions, branch) {
                        Ok(deduced) => total += self.count_ways_definite(&deduced),
                        Err(paradox) => trace!("count_ways: dropping branch: {}", paradox),
                    }
                }
                Ok(total)
            })
    }

    /// Memoized [`count::count_ways_definite`] for this game.
    pub fn count_ways_definite(&self, knowledge: &Knowledge) -> BigUint {
        self.definite_ways.get_or_insert_with(knowledge.clone(), || {
            count::count_ways_definite(&self.game, knowledge, &self.combinatorics)
        })
    }

    /// Probability that `owner` holds `card`, given `total` consistent
    /// arrangements of `knowledge`.
    fn cell_probability(
        &self,
        suggestions: &Suggestions,
        knowledge: &Knowledge,
        owner: &Owner,
        card: &Card,
        total: &BigUint,
    ) -> Result<Probability, PredictError> {
        let Ok(hypothesis) = knowledge.with_mark(owner, card, Mark::Yes) else {
            return Ok(Probability::zero());
        };
        let ways = self.count_ways(suggestions, &hypothesis)?;
        trace!("{} holds {}: {} / {}", owner, card, ways, total);
        Probability::new(ways, total.clone()).ok_or(PredictError::NoConsistentArrangement)
    }

    /// Probabilities for every cell of the game.
    ///
    /// Known cells (after deduction) get exactly 0 or 1. Unknown cells are
    /// evaluated independently, spread over `options.threads` threads.
    pub fn predict(
        &self,
        suggestions: &Suggestions,
        knowledge: &Knowledge,
    ) -> Result<Prediction, PredictError> {
        let knowledge = deduce(&self.game, suggestions, knowledge)?;
        let total = self.count_ways(suggestions, &knowledge)?;
        if total == BigUint::ZERO {
            return Err(PredictError::NoConsistentArrangement);
        }
        debug!("predict: {} consistent arrangement(s)", total);

        let mut prediction = Prediction::default();
        let mut unknown = Vec::new();
        for owner in self.game.owners() {
            for card in self.game.cards() {
                let known = match knowledge.mark(&owner, card) {
                    Some(Mark::Yes) => Probability::one(),
                    Some(Mark::No) => Probability::zero(),
                    None => {
                        unknown.push((owner.clone(), card.clone()));
                        continue;
                    }
                };
                prediction.insert(owner.clone(), card.clone(), known);
            }
        }
        debug!(
            "predict: {} unknown cell(s) on {} thread(s)",
            unknown.len(),
            self.options.threads
        );

        let chunk_size = unknown.len().div_ceil(self.options.threads.max(1)).max(1);
        let results: Vec<Result<Vec<(Owner, Card, Probability)>, PredictError>> =
            std::thread::scope(|scope| {
                let workers: Vec<_> = unknown
                    .chunks(chunk_size)
                    .map(|chunk| {
                        let knowledge = &knowledge;
                        let total = &total;
                        scope.spawn(move || {
                            chunk
                                .iter()
                                .map(|(owner, card)| {
                                    self.cell_probability(suggestions, knowledge, owner, card, total)
                                        .map(|probability| (owner.clone(), card.clone(), probability))
                                })
                                .collect::<Result<Vec<_>, PredictError>>()
                        })
                    })
                    .collect();
                workers
                    .into_iter()
                    .map(|worker| match worker.join() {
                        Ok(result) => result,
                        Err(panic) => std::panic::resume_unwind(panic),
                    })
                    .collect()
            });

        for result in results {
            for (owner, card, probability) in result? {
                prediction.insert(owner, card, probability);
            }
        }

        debug!(
            "predict: cache hits/misses: branches {}/{}, ways {}/{}, definite {}/{}",
            self.branches.hits(),
            self.branches.misses(),
            self.ways.hits(),
            self.ways.misses(),
            self.definite_ways.hits(),
            self.definite_ways.misses()
        );
        Ok(prediction)
    }
}

/// One-shot prediction with default options.
pub fn predict(
    game: &GameObjects,
    suggestions: &Suggestions,
    knowledge: &Knowledge,
) -> Result<Prediction, PredictError> {
    Predictor::new(game.clone()).predict(suggestions, knowledge)
}
