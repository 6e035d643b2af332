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

//! Module implementing the [`Weight`] trait for [`i64`].

use super::{Weight, WeightRef};

impl WeightRef<i64> for &i64 {}

impl Weight for i64 {
    #[inline(always)]
    fn from_usize(i: usize) -> Self {
        i as i64
    }

    fn parse(input: &str) -> Option<Self> {
        if !input.bytes().all(|c| c.is_ascii_digit()) {
            return None;
        }
        input.parse::<i64>().ok()
    }

    fn checked_total(weights: &[Self]) -> Option<Self> {
        weights.iter().try_fold(0i64, |total, &w| total.checked_add(w))
    }

    fn description() -> &'static str {
        "64-bit integer arithmetic"
    }
}
