//! # cluedo-rs: deduction and exact probabilities for Clue/Cluedo
//!
//! **`cluedo-rs`** keeps track of what a player of Clue (Cluedo) knows about
//! who holds which card, derives everything that logically follows, and
//! computes the exact probability of every cell that is still unknown.
//!
//! ## How it works
//!
//! - **Knowledge**: an immutable [`Knowledge`][crate::knowledge::Knowledge]
//!   value records, for each player and for the hidden case file, which cards
//!   are known to be held (Y) or not held (N), plus known hand sizes.
//!   Updates return a new value, or a
//!   [`LogicalParadox`][crate::paradox::LogicalParadox] when they contradict
//!   what is already known.
//! - **Deduction**: [`deduce`][crate::deducer::deduce] applies the structural
//!   rules of the game ([`consistency`]) and the rules derived from the
//!   suggestion history ([`deduction`]) until nothing changes.
//! - **Prediction**: a [`Predictor`][crate::predict::Predictor] counts every
//!   card arrangement consistent with the knowledge and the suggestions, and
//!   turns ratios of counts into exact [`Probability`][crate::probability::Probability]
//!   values. Counts are [`BigUint`][num_bigint::BigUint]s and all the
//!   intermediate counting functions are memoized.
//!
//! ## Basic Usage
//!
//! ```rust
//! use cluedo_rs::deducer::deduce;
//! use cluedo_rs::game::{Card, CardCategory, GameObjects, Player, Suggestions};
//! use cluedo_rs::knowledge::{Knowledge, Mark};
//! use cluedo_rs::predict::predict;
//!
//! let anisha = Player::new("Anisha");
//! let bob = Player::new("Bob");
//! let game = GameObjects::classic([anisha.clone(), bob.clone()]);
//! let plum = Card::new(CardCategory::new("Suspect"), "Prof. Plum");
//!
//! // 1. Record what we know
//! let knowledge = Knowledge::new()
//!     .with_hand_size(&game, &anisha, 9)?
//!     .with_hand_size(&game, &bob, 9)?
//!     .with_player_mark(&anisha, &plum, Mark::Yes)?;
//!
//! // 2. Derive what follows
//! let suggestions = Suggestions::new();
//! let deduced = deduce(&game, &suggestions, &knowledge)?;
//! assert_eq!(deduced.case_file_mark(&plum), Some(Mark::No));
//!
//! // 3. Ask for probabilities
//! let prediction = predict(&game, &suggestions, &knowledge)?;
//! let scarlet = Card::new(CardCategory::new("Suspect"), "Miss Scarlet");
//! assert_eq!(prediction.case_file(&scarlet).unwrap().to_string(), "20.00%");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`game`]**: players, cards and suggestions.
//! - **[`knowledge`]** and **[`paradox`]**: the knowledge base and its contradictions.
//! - **[`deducer`]**: the fixed-point driver over all rules.
//! - **[`count`]** and **[`combinatorics`]**: exact counting of card arrangements.
//! - **[`predict`]**: the probability engine.

pub mod cache;
pub mod combinatorics;
pub mod consistency;
pub mod count;
pub mod deducer;
pub mod deduction;
pub mod game;
pub mod knowledge;
pub mod paradox;
pub mod predict;
pub mod probability;
