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

//! Module providing exact arithmetic, implementing the [`Weight`] trait for
//! [`BigRational`].

use super::{Weight, WeightRef};
use num::traits::Zero;
use num::{BigInt, BigRational};

impl WeightRef<BigRational> for &BigRational {}

impl Weight for BigRational {
    fn from_usize(i: usize) -> Self {
        BigRational::from_integer(BigInt::from(i))
    }

    /// Parses either an integer (`42`), a decimal number (`0.25`) or a
    /// fraction (`1/3`).
    fn parse(input: &str) -> Option<Self> {
        if let Some((numer, denom)) = input.split_once('/') {
            let numer = parse_digits(numer)?;
            let denom = parse_digits(denom)?;
            if denom.is_zero() {
                return None;
            }
            return Some(BigRational::new(numer, denom));
        }

        match input.split_once('.') {
            None => parse_digits(input).map(BigRational::from_integer),
            Some((int, frac)) => {
                if int.is_empty() || frac.is_empty() {
                    return None;
                }
                parse_digits(int)?;
                let numer = parse_digits(&format!("{int}{frac}"))?;
                let denom = num::pow(BigInt::from(10), frac.len());
                Some(BigRational::new(numer, denom))
            }
        }
    }

    fn description() -> &'static str {
        "exact rational arithmetic"
    }
}

/// Parses a non-empty string of ASCII digits.
fn parse_digits(input: &str) -> Option<BigInt> {
    if input.is_empty() || !input.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }
    input.parse::<BigInt>().ok()
}
