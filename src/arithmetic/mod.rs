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

//! Module providing a trait to abstract over the arithmetic of voter weights
//! and quotas, and various implementations of this arithmetic.

mod exact;
mod float64;
mod integer;

use crate::error::PowerIndexError;
use num::traits::{One, Zero};
use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// Trait representing the weight of a voter (or a quota) in a weighted voting
/// game. Here we only consider the arithmetic operations needed to enumerate
/// coalitions: sums, differences and comparisons.
pub trait Weight:
    Clone
    + Debug
    + Display
    + PartialEq
    + PartialOrd
    + Zero
    + One
    + Sum
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> Sum<&'a Self>
    + for<'a> Add<&'a Self, Output = Self>
where
    for<'a> &'a Self: WeightRef<Self>,
{
    /// Obtains a weight equal to the given integer.
    fn from_usize(i: usize) -> Self;

    /// Parses a weight from its textual representation in a game file.
    /// Returns [`None`] if the input isn't representable in this arithmetic.
    fn parse(input: &str) -> Option<Self>;

    /// Sums the given weights, or returns [`None`] if the result isn't
    /// representable in this arithmetic.
    fn checked_total(weights: &[Self]) -> Option<Self> {
        Some(weights.iter().sum())
    }

    /// Description of the implemented arithmetic, e.g. "64-bit floating point
    /// arithmetic".
    fn description() -> &'static str;
}

/// Combined weight of all the voters. Every partial sum of non-negative
/// weights is bounded by this total, so coalition weights cannot overflow once
/// this succeeds.
pub fn total_weight<W>(weights: &[W]) -> Result<W, PowerIndexError>
where
    W: Weight,
    for<'a> &'a W: WeightRef<W>,
{
    W::checked_total(weights).ok_or(PowerIndexError::WeightOverflow)
}

/// Helper trait that weight references implement.
pub trait WeightRef<Output>: Sized + Add<Self, Output = Output> + Sub<Self, Output = Output> {}
