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

//! Command-line parameters and entry point of the program.

use crate::arithmetic::{Weight, WeightRef};
use crate::parse::parse_game;
use crate::report::{write_header, write_power};
use crate::types::Parallel;
use clap::Parser;
use num::BigRational;
use std::error::Error;
use std::io::{BufRead, Write};

/// Rust implementation of voting power indices for weighted voting games.
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(version)]
pub struct Cli {
    /// Package name to show in the report.
    #[arg(long, default_value = "Implementation: power-index-rs")]
    pub package_name: String,

    /// Arithmetic to use for weights and quota.
    #[arg(long, value_enum)]
    pub arithmetic: Arithmetic,

    /// Power index to compute.
    #[arg(long, value_enum, default_value = "both")]
    pub index: Index,

    /// Parallelism used to enumerate coalitions and orderings.
    #[arg(long, value_enum, default_value = "rayon")]
    pub parallel: Parallel,

    /// Also print the raw number of times each voter is pivotal.
    #[arg(long)]
    pub raw_counts: bool,
}

/// Arithmetic for voter weights.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arithmetic {
    /// 64-bit integers.
    Integer,
    /// 64-bit floating-point numbers.
    Float64,
    /// Exact rational numbers.
    Exact,
}

/// Power index to compute.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Index {
    /// Banzhaf-Penrose-Coleman index.
    Banzhaf,
    /// Shapley-Shubik index.
    ShapleyShubik,
    /// Both indices.
    Both,
}

impl Cli {
    /// Reads a game from the given input, and writes the report of the
    /// requested power indices to the given output.
    pub fn run(self, input: impl BufRead, output: &mut impl Write) -> Result<(), Box<dyn Error>> {
        match self.arithmetic {
            Arithmetic::Integer => self.run_with::<i64>(input, output),
            Arithmetic::Float64 => self.run_with::<f64>(input, output),
            Arithmetic::Exact => self.run_with::<BigRational>(input, output),
        }
    }

    fn run_with<W>(&self, input: impl BufRead, output: &mut impl Write) -> Result<(), Box<dyn Error>>
    where
        W: Weight,
        for<'a> &'a W: WeightRef<W>,
    {
        let game = parse_game::<W>(input)?;
        write_header(output, &game, &self.package_name)?;

        if matches!(self.index, Index::Banzhaf | Index::Both) {
            let counts = game.banzhaf_penrose(self.parallel)?;
            write_power(
                output,
                &game,
                "Banzhaf-Penrose-Coleman index",
                &counts,
                self.raw_counts,
            )?;
        }
        if matches!(self.index, Index::ShapleyShubik | Index::Both) {
            let counts = game.shapley_shubik(self.parallel)?;
            write_power(
                output,
                &game,
                "Shapley-Shubik index",
                &counts,
                self.raw_counts,
            )?;
        }
        Ok(())
    }
}
