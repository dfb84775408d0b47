//! Two six-sided dice.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Result of rolling both dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    pub die1: u8,
    pub die2: u8,
}

impl Roll {
    pub fn new(die1: u8, die2: u8) -> Self {
        Self { die1, die2 }
    }

    /// Sum of both dice
    pub fn total(&self) -> u8 {
        self.die1 + self.die2
    }

    pub fn is_double(&self) -> bool {
        is_double(self.die1, self.die2)
    }
}

/// Whether two dice show the same face
pub fn is_double(die1: u8, die2: u8) -> bool {
    die1 == die2
}

/// Anything that can produce dice rolls.
///
/// The random source is passed in so a single seeded RNG drives the whole
/// simulation.
pub trait DiceSource {
    fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Roll;
}

/// Independent, uniform 1..=6 dice
#[derive(Debug, Clone, Copy, Default)]
pub struct FairDice;

impl DiceSource for FairDice {
    fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Roll {
        Roll::new(rng.gen_range(1..=6), rng.gen_range(1..=6))
    }
}

/// Replays a fixed sequence of rolls, then falls back to fair dice
#[derive(Debug, Clone, Default)]
pub struct LoadedDice {
    queue: VecDeque<Roll>,
}

impl LoadedDice {
    /// Queue up `(die1, die2)` pairs in the order they should come out
    pub fn new(rolls: impl IntoIterator<Item = (u8, u8)>) -> Self {
        Self {
            queue: rolls
                .into_iter()
                .map(|(die1, die2)| Roll::new(die1, die2))
                .collect(),
        }
    }

    /// Add another roll to the end of the queue
    pub fn push(&mut self, die1: u8, die2: u8) {
        self.queue.push_back(Roll::new(die1, die2));
    }

    /// Rolls still queued
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DiceSource for LoadedDice {
    fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Roll {
        match self.queue.pop_front() {
            Some(roll) => roll,
            None => FairDice.roll(rng),
        }
    }
}
