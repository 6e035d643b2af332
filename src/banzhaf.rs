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

//! Module computing the
//! [Banzhaf-Penrose-Coleman power index](https://en.wikipedia.org/wiki/Banzhaf_power_index),
//! by enumerating all the coalitions of voters.
//!
//! Each of the `2^n` coalitions is represented by a bit mask, read in
//! big-endian order (see [`Coalition::from_mask()`]). A voter's raw score is
//! the number of winning coalitions in which it is pivotal, i.e. in which its
//! defection would make the coalition lose.

use crate::arithmetic::{total_weight, Weight, WeightRef};
use crate::error::PowerIndexError;
use crate::types::{voter_bit, Coalition, Parallel, PivotCounts, PivotalitySet};
use crate::vector_math::vector_sum;
use log::{debug, info, trace};
use rayon::prelude::*;

/// Maximal number of voters, so that coalition masks fit in a [`u64`].
pub const MAX_VOTERS: usize = 63;

/// Computes the Banzhaf-Penrose-Coleman power index of each voter, serially.
pub fn banzhaf_penrose<W>(weights: &[W], quota: &W) -> Result<Vec<f64>, PowerIndexError>
where
    W: Weight,
    for<'a> &'a W: WeightRef<W>,
{
    count_pivots(weights, quota, Parallel::No)?.power()
}

/// Counts, for each voter, the number of winning coalitions in which it is
/// pivotal.
pub fn count_pivots<W>(
    weights: &[W],
    quota: &W,
    parallel: Parallel,
) -> Result<PivotCounts, PowerIndexError>
where
    W: Weight,
    for<'a> &'a W: WeightRef<W>,
{
    let num_voters = check_num_voters(weights.len())?;
    total_weight(weights)?;
    info!("Counting Banzhaf pivots: {num_voters} voters, quota = {quota}");

    let num_masks = 1u64 << num_voters;
    let accumulator = match parallel {
        Parallel::No => {
            let mut accumulator = PivotAccumulator::new(num_voters);
            for mask in 0..num_masks {
                accumulator.process_mask(weights, quota, mask);
            }
            accumulator
        }
        Parallel::Rayon => (0..num_masks)
            .into_par_iter()
            .fold_with(
                PivotAccumulator::new(num_voters),
                |mut accumulator, mask| {
                    accumulator.process_mask(weights, quota, mask);
                    accumulator
                },
            )
            .map(Ok)
            .try_reduce(
                || PivotAccumulator::new(num_voters),
                |a, b| a.reduce(b),
            )?,
    };

    debug!(
        "Enumerated {num_masks} coalitions, {} winning",
        accumulator.num_winning
    );
    Ok(PivotCounts::new(accumulator.counts))
}

/// Returns all the winning coalitions, by increasing mask order.
pub fn winning_coalitions<W>(weights: &[W], quota: &W) -> Result<Vec<Coalition>, PowerIndexError>
where
    W: Weight,
    for<'a> &'a W: WeightRef<W>,
{
    Ok(WinningCoalitions::new(weights, quota)?.collect())
}

/// Returns the pivotal voters of a coalition: the "yes" voters whose defection
/// would make the coalition lose. A losing coalition has no pivotal voter.
pub fn pivotal_voters<W>(
    coalition: &Coalition,
    weights: &[W],
    quota: &W,
) -> Result<PivotalitySet, PowerIndexError>
where
    W: Weight,
    for<'a> &'a W: WeightRef<W>,
{
    total_weight(weights)?;
    let total = coalition.total_weight(weights)?;
    let is_winning = total >= *quota;
    let pivotal = std::iter::zip(coalition.votes(), weights)
        .map(|(vote, weight)| is_winning && vote.is_yes() && &total - weight < *quota)
        .collect();
    Ok(PivotalitySet::new(pivotal))
}

/// Iterator over the winning coalitions of a game, by increasing mask order.
/// Losing coalitions are skipped without being materialized.
pub struct WinningCoalitions<'a, W> {
    weights: &'a [W],
    quota: &'a W,
    next_mask: u64,
    num_masks: u64,
}

impl<'a, W> WinningCoalitions<'a, W>
where
    W: Weight,
    for<'b> &'b W: WeightRef<W>,
{
    /// Creates an iterator over the winning coalitions of the given game.
    pub fn new(weights: &'a [W], quota: &'a W) -> Result<Self, PowerIndexError> {
        let num_voters = check_num_voters(weights.len())?;
        total_weight(weights)?;
        Ok(WinningCoalitions {
            weights,
            quota,
            next_mask: 0,
            num_masks: 1 << num_voters,
        })
    }
}

impl<W> Iterator for WinningCoalitions<'_, W>
where
    W: Weight,
    for<'a> &'a W: WeightRef<W>,
{
    type Item = Coalition;

    fn next(&mut self) -> Option<Coalition> {
        while self.next_mask < self.num_masks {
            let mask = self.next_mask;
            self.next_mask += 1;
            if mask_weight(self.weights, mask) >= *self.quota {
                return Some(Coalition::from_mask(mask, self.weights.len()));
            }
        }
        None
    }
}

/// Per-thread state accumulated while enumerating coalition masks.
#[derive(Clone)]
struct PivotAccumulator {
    /// Number of times each voter was pivotal.
    counts: Vec<u128>,
    /// Number of winning coalitions seen.
    num_winning: u64,
}

impl PivotAccumulator {
    fn new(num_voters: usize) -> Self {
        PivotAccumulator {
            counts: vec![0; num_voters],
            num_winning: 0,
        }
    }

    fn reduce(self, other: Self) -> Result<Self, PowerIndexError> {
        Ok(PivotAccumulator {
            counts: vector_sum::<u128>(&self.counts, &other.counts)?,
            num_winning: self.num_winning + other.num_winning,
        })
    }

    /// Credits the pivotal voters of the coalition represented by the given
    /// mask, if it's winning. The total weight is computed once and shared by
    /// all the voters.
    fn process_mask<W>(&mut self, weights: &[W], quota: &W, mask: u64)
    where
        W: Weight,
        for<'a> &'a W: WeightRef<W>,
    {
        let total = mask_weight(weights, mask);
        if total < *quota {
            return;
        }
        trace!("Winning coalition {mask:#b} (total weight {total})");
        self.num_winning += 1;

        let num_voters = weights.len();
        for (voter, weight) in weights.iter().enumerate() {
            if mask & voter_bit(num_voters, voter) != 0 && &total - weight < *quota {
                self.counts[voter] += 1;
            }
        }
    }
}

/// Combined weight of the voters present in the given coalition mask.
fn mask_weight<W>(weights: &[W], mask: u64) -> W
where
    W: Weight,
    for<'a> &'a W: WeightRef<W>,
{
    let num_voters = weights.len();
    weights
        .iter()
        .enumerate()
        .filter(|&(voter, _)| mask & voter_bit(num_voters, voter) != 0)
        .map(|(_, weight)| weight)
        .sum()
}

fn check_num_voters(num_voters: usize) -> Result<usize, PowerIndexError> {
    if num_voters > MAX_VOTERS {
        return Err(PowerIndexError::TooManyVoters {
            num_voters,
            max: MAX_VOTERS,
        });
    }
    Ok(num_voters)
}
