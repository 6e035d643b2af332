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

//! Voting power indices for weighted voting games.
//!
//! A weighted voting game assigns a weight to each voter, and a measure
//! passes if the combined weight of the voters in favor meets the quota. This
//! crate quantifies the influence of each voter with two classical indices:
//! - the [Banzhaf-Penrose-Coleman index](banzhaf), counting the coalitions in
//!   which a voter is pivotal,
//! - the [Shapley-Shubik index](shapley_shubik), counting the orderings of
//!   voters in which a voter is pivotal.
//!
//! ```
//! use power_index_rs::{banzhaf_penrose, shapley_shubik};
//!
//! let weights = [4i64, 3, 2, 1];
//! assert_eq!(banzhaf_penrose(&weights, &6), Ok(vec![5.0 / 12.0, 0.25, 0.25, 1.0 / 12.0]));
//! assert_eq!(shapley_shubik(&weights, &6), Ok(vec![5.0 / 12.0, 0.25, 0.25, 1.0 / 12.0]));
//! ```

#![forbid(missing_docs, unsafe_code)]

pub mod arithmetic;
pub mod banzhaf;
pub mod cli;
pub mod error;
pub mod parse;
pub mod report;
pub mod shapley_shubik;
pub mod types;
mod util;
pub mod vector_math;

pub use arithmetic::{Weight, WeightRef};
pub use banzhaf::banzhaf_penrose;
pub use error::{ParseError, PowerIndexError};
pub use shapley_shubik::shapley_shubik;
pub use types::{Coalition, Parallel, PivotCounts, PivotalitySet, Vote, VotingGame};
