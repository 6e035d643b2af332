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

//! Error types returned by power index computations and by the game file
//! parser.

use thiserror::Error;

/// Error returned when a power index cannot be computed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PowerIndexError {
    /// Two vectors combined elementwise have different lengths.
    #[error("Vector length mismatch: {left} != {right}")]
    LengthMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },

    /// The vector to normalize sums to zero, i.e. no voter is ever pivotal.
    #[error("Power index undefined for this game: no voter is ever pivotal")]
    DegenerateNormalization,

    /// Factorial of a negative number.
    #[error("Factorial is undefined for negative input {0}")]
    InvalidFactorialInput(i64),

    /// Factorial that doesn't fit in 128 bits.
    #[error("Factorial of {0} overflows 128 bits")]
    FactorialOverflow(i64),

    /// The combined weight of the voters isn't representable in the chosen
    /// arithmetic.
    #[error("Combined weight of the voters overflows")]
    WeightOverflow,

    /// The game has more voters than the enumeration supports.
    #[error("Too many voters: {num_voters} (at most {max} supported)")]
    TooManyVoters {
        /// Number of voters in the game.
        num_voters: usize,
        /// Maximal number of voters supported by the index.
        max: usize,
    },
}

/// Error returned when parsing a game file.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Failure to read the input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure to compile a line pattern.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// The input is empty.
    #[error("Missing header line")]
    MissingHeader,

    /// The first line isn't of the form `<num_voters> <quota>`.
    #[error("Invalid header line: {0:?}")]
    InvalidHeader(String),

    /// The quota cannot be represented in the chosen arithmetic.
    #[error("Invalid quota: {0:?}")]
    InvalidQuota(String),

    /// A weight line cannot be represented in the chosen arithmetic.
    #[error("Invalid weight for voter #{voter}: {value:?}")]
    InvalidWeight {
        /// Index of the voter.
        voter: usize,
        /// Offending input.
        value: String,
    },

    /// The file ended before all the weights were read.
    #[error("Expected {expected} weights, found {actual}")]
    MissingWeights {
        /// Number of voters declared in the header.
        expected: usize,
        /// Number of weights actually read.
        actual: usize,
    },

    /// The combined weight of the voters isn't representable in the chosen
    /// arithmetic.
    #[error("Combined weight of the voters overflows")]
    WeightOverflow,

    /// The `[names ...]` option doesn't match the number of voters.
    #[error("Expected {expected} voter names, found {actual}")]
    WrongNumberOfNames {
        /// Number of voters declared in the header.
        expected: usize,
        /// Number of names in the option line.
        actual: usize,
    },

    /// A line after the weights is neither a title nor empty.
    #[error("Unexpected line: {0:?}")]
    UnexpectedLine(String),
}
