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

//! Module to write textual reports of power indices.

use crate::arithmetic::{Weight, WeightRef};
use crate::error::PowerIndexError;
use crate::types::{PivotCounts, VotingGame};
use std::io;

/// Writes the description of a game.
pub fn write_header<W>(
    out: &mut impl io::Write,
    game: &VotingGame<W>,
    package_name: &str,
) -> io::Result<()>
where
    W: Weight,
    for<'a> &'a W: WeightRef<W>,
{
    writeln!(out, "Game: {}", game.title)?;
    writeln!(out)?;
    writeln!(out, "\t{package_name}")?;
    writeln!(out, "\tArithmetic: {}", W::description())?;
    writeln!(out, "\tVoters: {}", game.num_voters())?;
    writeln!(out, "\tQuota: {}", game.quota)?;
    writeln!(out, "\tTotal weight: {}", game.total_weight())?;
    writeln!(out)?;
    Ok(())
}

/// Writes the power of each voter, both as a floating-point approximation and
/// as an exact fraction, optionally followed by the raw pivot counts.
///
/// A game in which no voter is ever pivotal is reported as such rather than
/// returning an error, so that the other index can still be reported.
pub fn write_power<W>(
    out: &mut impl io::Write,
    game: &VotingGame<W>,
    index_name: &str,
    counts: &PivotCounts,
    raw_counts: bool,
) -> io::Result<()>
where
    W: Weight,
    for<'a> &'a W: WeightRef<W>,
{
    writeln!(out, "{index_name}:")?;
    match counts.power().and_then(|p| Ok((p, counts.exact_power()?))) {
        Ok((power, exact_power)) => {
            for (voter, (p, exact)) in std::iter::zip(power, exact_power).enumerate() {
                write!(
                    out,
                    "\t{} (weight {}): {p:.6} = {exact}",
                    game.voter_name(voter),
                    game.weights[voter]
                )?;
                if raw_counts {
                    write!(out, " ({} pivots)", counts.counts[voter])?;
                }
                writeln!(out)?;
            }
        }
        Err(PowerIndexError::DegenerateNormalization) => {
            writeln!(out, "\tUndefined: no voter is ever pivotal")?;
        }
        Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
    }
    writeln!(out)?;
    Ok(())
}
