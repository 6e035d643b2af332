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

//! Module implementing the [`Weight`] trait for [`f64`].

use super::{Weight, WeightRef};

impl WeightRef<f64> for &f64 {}

impl Weight for f64 {
    fn from_usize(i: usize) -> Self {
        i as f64
    }

    /// Parses a plain decimal number such as `12.5`. Exponents aren't part of
    /// the game file grammar.
    fn parse(input: &str) -> Option<Self> {
        if !input.starts_with(|c: char| c.is_ascii_digit())
            || !input.bytes().all(|c| c.is_ascii_digit() || c == b'.')
        {
            return None;
        }
        input.parse::<f64>().ok().filter(|x| x.is_finite())
    }

    fn checked_total(weights: &[Self]) -> Option<Self> {
        let total: f64 = weights.iter().sum();
        Some(total).filter(|x| x.is_finite())
    }

    fn description() -> &'static str {
        "64-bit floating-point arithmetic"
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_description() {
        assert_eq!(f64::description(), "64-bit floating-point arithmetic");
    }

    #[test]
    fn test_parse_decimals() {
        assert_eq!(f64::parse("0.25"), Some(0.25));
        assert_eq!(f64::parse("12.5"), Some(12.5));
    }

    #[test]
    fn test_checked_total() {
        assert_eq!(f64::checked_total(&[0.5, 0.25]), Some(0.75));
        assert_eq!(f64::checked_total(&[f64::MAX, f64::MAX]), None);
    }

    #[test]
    fn test_parse_rejects_exponents() {
        assert_eq!(f64::parse("1e3"), None);
        assert_eq!(f64::parse("1E3"), None);
        assert_eq!(f64::parse("2.5e-1"), None);
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert_eq!(f64::parse(&format!("1{}", "0".repeat(400))), None);
        assert_eq!(f64::parse("inf"), None);
        assert_eq!(f64::parse("NaN"), None);
        assert_eq!(f64::parse("-1"), None);
    }
}
