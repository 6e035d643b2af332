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

//! Module to parse weighted voting game files.
//!
//! A game file has the following structure:
//!
//! ```text
//! 4 21
//! [names alice bob carol dave]
//! 1
//! 3
//! 9
//! 27
//! "Council"
//! ```
//!
//! The header contains the number of voters and the quota. Optional lines of
//! the form `[option values...]` follow, then one weight per voter, then an
//! optional quoted title.

use crate::arithmetic::{total_weight, Weight, WeightRef};
use crate::error::ParseError;
use crate::types::VotingGame;
use log::{info, trace, warn};
use regex::Regex;
use std::io::BufRead;

/// Parses a game file into a voting game, with weights and quota represented
/// in the given arithmetic.
pub fn parse_game<W>(input: impl BufRead) -> Result<VotingGame<W>, ParseError>
where
    W: Weight,
    for<'a> &'a W: WeightRef<W>,
{
    let re_header = Regex::new(r"^([0-9]+) ([0-9][0-9./]*)$")?;
    let re_option = Regex::new(r"^\[([a-z]+)((?: [^ \]]+)*)\]$")?;
    let re_weight = Regex::new(r"^[0-9][0-9./]*$")?;

    let mut lines = input.lines().peekable();

    let header = lines.next().ok_or(ParseError::MissingHeader)??;
    let header = header.trim_end();
    let cap_header = re_header
        .captures(header)
        .ok_or_else(|| ParseError::InvalidHeader(header.to_owned()))?;
    let num_voters = cap_header[1]
        .parse::<usize>()
        .map_err(|_| ParseError::InvalidHeader(header.to_owned()))?;
    let quota = W::parse(&cap_header[2])
        .ok_or_else(|| ParseError::InvalidQuota(cap_header[2].to_owned()))?;

    info!("{num_voters} voters / quota {quota}");

    // Parse the options
    let mut names = None;
    while let Some(Ok(line)) = lines.peek() {
        let Some(cap_option) = re_option.captures(line.trim_end()) else {
            break;
        };

        match &cap_option[1] {
            "names" => {
                let values: Vec<String> = cap_option[2]
                    .split_whitespace()
                    .map(|x| x.to_owned())
                    .collect();
                info!("Voter names: {values:?}");
                if values.len() != num_voters {
                    return Err(ParseError::WrongNumberOfNames {
                        expected: num_voters,
                        actual: values.len(),
                    });
                }
                names = Some(values);
            }
            option => warn!("Unknown option: {option}"),
        }

        lines.next();
    }

    let mut weights = Vec::with_capacity(num_voters);
    for voter in 0..num_voters {
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(ParseError::MissingWeights {
                    expected: num_voters,
                    actual: voter,
                })
            }
        };
        let line = line.trim();
        let weight = if re_weight.is_match(line) {
            W::parse(line)
        } else {
            None
        };
        let weight = weight.ok_or_else(|| ParseError::InvalidWeight {
            voter,
            value: line.to_owned(),
        })?;
        trace!("Voter #{voter}: weight {weight}");
        weights.push(weight);
    }

    let total = total_weight(&weights).map_err(|_| ParseError::WeightOverflow)?;
    info!("Total weight: {total}");
    if quota > total {
        warn!("Quota {quota} exceeds the total weight {total}: no coalition can win");
    } else if quota.is_zero() {
        warn!("Quota is zero: every coalition wins");
    }

    let mut title = None;
    for line in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match remove_quotes(line) {
            Some(x) if title.is_none() => title = Some(x.to_owned()),
            _ => return Err(ParseError::UnexpectedLine(line.to_owned())),
        }
    }
    let title = title.unwrap_or_default();
    info!("Game title: {title}");

    Ok(VotingGame {
        title,
        names,
        weights,
        quota,
    })
}

/// Removes the leading and trailing double-quotes, or returns [`None`] if the
/// input isn't quoted.
fn remove_quotes(x: &str) -> Option<&str> {
    x.strip_prefix('"')?.strip_suffix('"')
}
