// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Types representing weighted voting games, coalitions and pivot counts.

use crate::arithmetic::{Weight, WeightRef};
use crate::error::PowerIndexError;
use crate::vector_math::{dot_product, normalize};
use log::warn;
use num::{BigInt, BigRational};
use std::ops::Mul;

/// Whether to enumerate coalitions and orderings on a single thread or with
/// the [rayon](https://crates.io/crates/rayon) thread pool.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallel {
    /// Serial enumeration on the calling thread.
    No,
    /// Parallel enumeration with rayon.
    Rayon,
}

/// Weighted voting game input, representing a parsed game file.
#[derive(Debug, PartialEq)]
pub struct VotingGame<W> {
    /// Name of the game.
    pub title: String,
    /// Names of the voters, if provided.
    pub names: Option<Vec<String>>,
    /// Weight of each voter.
    pub weights: Vec<W>,
    /// Minimal combined weight for a coalition to win.
    pub quota: W,
}

impl<W> VotingGame<W>
where
    W: Weight,
    for<'a> &'a W: WeightRef<W>,
{
    /// Creates an untitled game with anonymous voters.
    pub fn new(weights: Vec<W>, quota: W) -> Self {
        VotingGame {
            title: String::new(),
            names: None,
            weights,
            quota,
        }
    }

    /// Number of voters in this game.
    pub fn num_voters(&self) -> usize {
        self.weights.len()
    }

    /// Combined weight of all the voters.
    pub fn total_weight(&self) -> W {
        self.weights.iter().sum()
    }

    /// Display name of the given voter.
    pub fn voter_name(&self, voter: usize) -> String {
        match &self.names {
            Some(names) => names[voter].clone(),
            None => format!("Voter #{voter}"),
        }
    }

    /// Counts the pivotal voters of all winning coalitions.
    pub fn banzhaf_penrose(&self, parallel: Parallel) -> Result<PivotCounts, PowerIndexError> {
        crate::banzhaf::count_pivots(&self.weights, &self.quota, parallel)
    }

    /// Counts the pivotal voters of all orderings of voters.
    pub fn shapley_shubik(&self, parallel: Parallel) -> Result<PivotCounts, PowerIndexError> {
        crate::shapley_shubik::count_pivots(&self.weights, &self.quota, parallel)
    }
}

/// Vote of a single voter within a coalition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vote {
    /// The voter votes against the measure.
    No,
    /// The voter votes for the measure.
    Yes,
}

impl Vote {
    /// Whether this is a "yes" vote.
    #[inline(always)]
    pub fn is_yes(self) -> bool {
        self == Vote::Yes
    }
}

/// A vote multiplied by a weight is the weight contributed by the voter to
/// the measure.
impl<'a, 'b, W> Mul<&'b W> for &'a Vote
where
    W: Weight,
    for<'c> &'c W: WeightRef<W>,
{
    type Output = W;

    #[inline(always)]
    fn mul(self, weight: &'b W) -> W {
        match self {
            Vote::Yes => weight.clone(),
            Vote::No => W::zero(),
        }
    }
}

/// A combination of votes, one per voter, indexed like the voters' weights.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coalition {
    votes: Vec<Vote>,
}

impl Coalition {
    /// Creates a coalition from the given votes.
    pub fn new(votes: Vec<Vote>) -> Self {
        Coalition { votes }
    }

    /// Creates the coalition represented by the given bit mask. The mask is
    /// read in big-endian order: the least significant bit is the vote of the
    /// last voter.
    pub fn from_mask(mask: u64, num_voters: usize) -> Self {
        let votes = (0..num_voters)
            .map(|voter| {
                if mask & voter_bit(num_voters, voter) != 0 {
                    Vote::Yes
                } else {
                    Vote::No
                }
            })
            .collect();
        Coalition { votes }
    }

    /// Votes of each voter.
    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    /// Number of voters.
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    /// Whether this coalition is over an empty set of voters.
    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Returns the indices of the voters voting "yes".
    pub fn yes_voters(&self) -> impl Iterator<Item = usize> + '_ {
        self.votes
            .iter()
            .enumerate()
            .filter(|(_, vote)| vote.is_yes())
            .map(|(i, _)| i)
    }

    /// Combined weight of the "yes" voters, i.e. the dot product of the votes
    /// with the weights.
    pub fn total_weight<W>(&self, weights: &[W]) -> Result<W, PowerIndexError>
    where
        W: Weight,
        for<'a> &'a W: WeightRef<W>,
    {
        dot_product(&self.votes, weights)
    }
}

/// Returns the bit of a coalition mask that holds the vote of the given voter.
#[inline(always)]
pub(crate) fn voter_bit(num_voters: usize, voter: usize) -> u64 {
    1 << (num_voters - 1 - voter)
}

/// Set of pivotal voters within a winning coalition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PivotalitySet {
    pivotal: Vec<bool>,
}

impl PivotalitySet {
    /// Creates a set from per-voter pivotality flags.
    pub fn new(pivotal: Vec<bool>) -> Self {
        PivotalitySet { pivotal }
    }

    /// Per-voter pivotality flags.
    pub fn flags(&self) -> &[bool] {
        &self.pivotal
    }

    /// Whether the given voter is pivotal.
    pub fn is_pivotal(&self, voter: usize) -> bool {
        self.pivotal[voter]
    }

    /// Converts the flags into counts of zero or one.
    pub fn to_counts(&self) -> Vec<u128> {
        self.pivotal.iter().map(|&p| p as u128).collect()
    }
}

/// Raw number of times each voter is pivotal, before normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PivotCounts {
    /// Pivot count of each voter.
    pub counts: Vec<u128>,
}

impl PivotCounts {
    /// Wraps the given per-voter counts.
    pub fn new(counts: Vec<u128>) -> Self {
        PivotCounts { counts }
    }

    /// Sum of the pivot counts of all voters.
    pub fn total(&self) -> u128 {
        self.counts.iter().sum()
    }

    /// Normalizes the counts into a power vector summing to one.
    pub fn power(&self) -> Result<Vec<f64>, PowerIndexError> {
        let counts: Vec<f64> = self.counts.iter().map(|&c| c as f64).collect();
        normalize(&counts).map_err(Self::log_degenerate)
    }

    /// Normalizes the counts into an exact power vector summing to one.
    pub fn exact_power(&self) -> Result<Vec<BigRational>, PowerIndexError> {
        let counts: Vec<BigRational> = self
            .counts
            .iter()
            .map(|&c| BigRational::from_integer(BigInt::from(c)))
            .collect();
        normalize(&counts).map_err(Self::log_degenerate)
    }

    fn log_degenerate(error: PowerIndexError) -> PowerIndexError {
        warn!("No voter is ever pivotal: the power index is undefined for this game");
        error
    }
}
