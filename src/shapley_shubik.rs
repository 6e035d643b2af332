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
//! [Shapley-Shubik power index](https://en.wikipedia.org/wiki/Shapley%E2%80%93Shubik_power_index).
//!
//! Conceptually, voters join a coalition one after the other, in each of the
//! `n!` possible orders. The pivotal voter of an ordering is the one whose
//! arrival first brings the coalition's weight to the quota. A voter's raw
//! score is the number of orderings in which it is pivotal.
//!
//! Rather than enumerating all the orderings, the recursion below walks over
//! the sets of voters already placed. Once a voter is found pivotal after a
//! set of `k - 1` other voters (out of `k` remaining ones), the `(k - 1)!`
//! orderings of the voters placed after it are all credited at once.

use crate::arithmetic::{total_weight, Weight, WeightRef};
use crate::error::PowerIndexError;
use crate::types::{Parallel, PivotCounts};
use crate::vector_math::{factorial_table, vector_sum};
use log::{debug, info, trace};
use rayon::prelude::*;

/// Maximal number of voters, so that `n!` fits in a [`u128`].
pub const MAX_VOTERS: usize = 34;

/// Computes the Shapley-Shubik power index of each voter, serially.
pub fn shapley_shubik<W>(weights: &[W], quota: &W) -> Result<Vec<f64>, PowerIndexError>
where
    W: Weight,
    for<'a> &'a W: WeightRef<W>,
{
    count_pivots(weights, quota, Parallel::No)?.power()
}

/// Counts, for each voter, the number of orderings of voters in which it is
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
    let num_voters = weights.len();
    if num_voters > MAX_VOTERS {
        return Err(PowerIndexError::TooManyVoters {
            num_voters,
            max: MAX_VOTERS,
        });
    }
    total_weight(weights)?;
    info!("Counting Shapley-Shubik pivots: {num_voters} voters, quota = {quota}");

    let factorials = factorial_table(num_voters)?;
    let all_voters: u64 = (1 << num_voters) - 1;

    let counter = match parallel {
        Parallel::No => {
            let mut counter = PivotCounter::new(weights, quota, &factorials);
            counter.count_rec(all_voters, &W::zero());
            counter
        }
        Parallel::Rayon => {
            let mut counter = (0..num_voters)
                .into_par_iter()
                .map(|first_voter| {
                    let mut counter = PivotCounter::new(weights, quota, &factorials);
                    counter.place_voter(all_voters, &W::zero(), first_voter);
                    Ok(counter)
                })
                .try_reduce(
                    || PivotCounter::new(weights, quota, &factorials),
                    |a, b| a.reduce(b),
                )?;
            // Root call, split across the first voters above.
            counter.fn_calls += 1;
            counter
        }
    };

    debug!(
        "Finished counting pivots ({} recursive calls)",
        counter.fn_calls
    );
    Ok(PivotCounts::new(counter.counts))
}

/// State of the recursive enumeration of orderings.
struct PivotCounter<'a, W> {
    /// Weight of each voter.
    weights: &'a [W],
    /// Quota to reach.
    quota: &'a W,
    /// Pre-computed table of `k!` for `k < n`.
    factorials: &'a [u128],
    /// Number of orderings in which each voter is pivotal.
    counts: Vec<u128>,
    /// Number of recursive calls performed.
    fn_calls: usize,
}

impl<'a, W> PivotCounter<'a, W>
where
    W: Weight,
    for<'b> &'b W: WeightRef<W>,
{
    fn new(weights: &'a [W], quota: &'a W, factorials: &'a [u128]) -> Self {
        PivotCounter {
            weights,
            quota,
            factorials,
            counts: vec![0; weights.len()],
            fn_calls: 0,
        }
    }

    fn reduce(self, other: Self) -> Result<Self, PowerIndexError> {
        Ok(PivotCounter {
            counts: vector_sum::<u128>(&self.counts, &other.counts)?,
            fn_calls: self.fn_calls + other.fn_calls,
            ..self
        })
    }

    /// Tries every remaining voter as the next one to join a coalition of the
    /// given total weight. Bit `k` of `remaining` is set if voter `k` hasn't
    /// joined yet.
    fn count_rec(&mut self, remaining: u64, total: &W) {
        self.fn_calls += 1;

        let mut voters = remaining;
        while voters != 0 {
            let voter = voters.trailing_zeros() as usize;
            voters &= voters - 1;
            self.place_voter(remaining, total, voter);
        }
    }

    /// Places the given voter next, among the remaining ones. Either the voter
    /// is pivotal for all the orderings of the voters after it, or the
    /// recursion continues without it.
    fn place_voter(&mut self, remaining: u64, total: &W, voter: usize) {
        let new_total = total + &self.weights[voter];
        if new_total >= *self.quota {
            let orderings = self.factorials[remaining.count_ones() as usize - 1];
            trace!(
                "Voter #{voter} is pivotal for {orderings} orderings (total weight {new_total})"
            );
            self.counts[voter] += orderings;
        } else {
            self.count_rec(remaining & !(1 << voter), &new_total);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arithmetic::test::weights;
    use crate::util::log_tester::LogCapture;
    use crate::vector_math::factorial;
    use log::Level::{Debug, Info, Trace};
    use num::BigRational;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::marker::PhantomData;

    macro_rules! shapley_shubik_tests {
        ( $typew:ty, $($case:ident,)+ ) => {
            $(
            #[test]
            fn $case() {
                $crate::shapley_shubik::test::ShapleyShubikTests::<$typew>::$case();
            }
            )+
        };
    }

    macro_rules! all_shapley_shubik_tests {
        ( $mod:ident, $typew:ty ) => {
            mod $mod {
                use super::*;

                shapley_shubik_tests!(
                    $typew,
                    test_equal_weights,
                    test_odd_one_out,
                    test_dictator,
                    test_single_voter,
                    test_single_voter_below_quota,
                    test_known_counts,
                    test_empty_game,
                    test_zero_quota,
                    test_unreachable_quota,
                    test_counts_sum_to_factorial,
                    test_normalization,
                    test_order_preservation,
                    test_matches_brute_force,
                    test_rayon_is_consistent,
                    test_too_many_voters,
                );
            }
        };
    }

    all_shapley_shubik_tests!(integer, i64);
    all_shapley_shubik_tests!(float64, f64);
    all_shapley_shubik_tests!(exact, BigRational);

    /// Counts pivots by explicitly enumerating all orderings of voters with
    /// Heap's algorithm.
    fn brute_force_counts(weights_: &[usize], quota: usize) -> Vec<u128> {
        let n = weights_.len();
        let mut counts = vec![0u128; n];
        let mut order: Vec<usize> = (0..n).collect();
        let mut credit = |order: &[usize]| {
            let mut total = 0;
            for &voter in order {
                total += weights_[voter];
                if total >= quota {
                    counts[voter] += 1;
                    break;
                }
            }
        };

        credit(&order);
        let mut c = vec![0; n];
        let mut i = 1;
        while i < n {
            if c[i] < i {
                if i % 2 == 0 {
                    order.swap(0, i);
                } else {
                    order.swap(c[i], i);
                }
                credit(&order);
                c[i] += 1;
                i = 1;
            } else {
                c[i] = 0;
                i += 1;
            }
        }
        counts
    }

    #[test]
    fn test_brute_force_counts() {
        assert_eq!(brute_force_counts(&[50, 49, 1], 51), [4, 1, 1]);
        assert_eq!(brute_force_counts(&[1, 1, 1, 1], 3), [6, 6, 6, 6]);
    }

    pub struct ShapleyShubikTests<W> {
        _phantom: PhantomData<W>,
    }

    impl<W> ShapleyShubikTests<W>
    where
        W: Weight,
        for<'a> &'a W: WeightRef<W>,
    {
        fn power(weights_: &[usize], quota: usize) -> Result<Vec<f64>, PowerIndexError> {
            shapley_shubik(&weights::<W>(weights_), &W::from_usize(quota))
        }

        fn counts(weights_: &[usize], quota: usize, parallel: Parallel) -> Vec<u128> {
            count_pivots(&weights::<W>(weights_), &W::from_usize(quota), parallel)
                .unwrap()
                .counts
        }

        fn random_game(rng: &mut ChaCha8Rng, num_voters: usize) -> (Vec<usize>, usize) {
            let weights: Vec<usize> = (0..num_voters).map(|_| rng.gen_range(1..=100)).collect();
            let total: usize = weights.iter().sum();
            let quota = rng.gen_range(1..=total);
            (weights, quota)
        }

        fn test_equal_weights() {
            assert_eq!(Self::power(&[1, 1, 1, 1], 3), Ok(vec![0.25; 4]));
        }

        fn test_odd_one_out() {
            assert_eq!(Self::power(&[1, 2, 2, 4, 4], 8).unwrap()[0], 0.0);
        }

        fn test_dictator() {
            assert_eq!(
                Self::power(&[1, 3, 9, 27], 21),
                Ok(vec![0.0, 0.0, 0.0, 1.0])
            );
        }

        fn test_single_voter() {
            assert_eq!(Self::power(&[5], 3), Ok(vec![1.0]));
            assert_eq!(Self::power(&[5], 5), Ok(vec![1.0]));
        }

        fn test_single_voter_below_quota() {
            assert_eq!(
                Self::power(&[5], 6),
                Err(PowerIndexError::DegenerateNormalization)
            );
        }

        fn test_known_counts() {
            assert_eq!(Self::counts(&[50, 49, 1], 51, Parallel::No), [4, 1, 1]);
            assert_eq!(Self::counts(&[4, 3, 2, 1], 6, Parallel::No), [10, 6, 6, 2]);
            assert_eq!(
                Self::counts(&[1, 2, 2, 4, 4], 8, Parallel::No),
                [0, 20, 20, 40, 40]
            );
        }

        fn test_empty_game() {
            assert_eq!(Self::counts(&[], 0, Parallel::No), Vec::<u128>::new());
            assert_eq!(
                Self::power(&[], 0),
                Err(PowerIndexError::DegenerateNormalization)
            );
            assert_eq!(
                Self::power(&[], 1),
                Err(PowerIndexError::DegenerateNormalization)
            );
        }

        fn test_zero_quota() {
            // The first voter of every ordering is pivotal.
            assert_eq!(Self::counts(&[3, 2, 1], 0, Parallel::No), [2, 2, 2]);
        }

        fn test_unreachable_quota() {
            assert_eq!(Self::counts(&[1, 2, 3], 7, Parallel::No), [0, 0, 0]);
            assert_eq!(
                Self::power(&[1, 2, 3], 7),
                Err(PowerIndexError::DegenerateNormalization)
            );
        }

        fn test_counts_sum_to_factorial() {
            let mut rng = ChaCha8Rng::seed_from_u64(52);
            for num_voters in 1..=8 {
                let (weights_, quota) = Self::random_game(&mut rng, num_voters);
                let counts = Self::counts(&weights_, quota, Parallel::No);
                assert_eq!(
                    counts.iter().sum::<u128>(),
                    factorial(num_voters as i64).unwrap()
                );
            }
        }

        fn test_normalization() {
            let mut rng = ChaCha8Rng::seed_from_u64(53);
            for num_voters in 1..=7 {
                let (weights_, quota) = Self::random_game(&mut rng, num_voters);
                let power = Self::power(&weights_, quota).unwrap();
                let sum: f64 = power.iter().sum();
                assert!((sum - 1.0).abs() < 1e-9, "sum = {sum} for {weights_:?}");
                assert!(power.iter().all(|&p| (0.0..=1.0).contains(&p)));
            }
        }

        fn test_order_preservation() {
            let mut rng = ChaCha8Rng::seed_from_u64(54);
            for num_voters in 1..=7 {
                let (weights_, quota) = Self::random_game(&mut rng, num_voters);
                let counts = Self::counts(&weights_, quota, Parallel::No);
                for i in 0..num_voters {
                    for j in 0..num_voters {
                        if weights_[i] >= weights_[j] {
                            assert!(
                                counts[i] >= counts[j],
                                "{counts:?} not ordered like {weights_:?}"
                            );
                        }
                    }
                }
            }
        }

        fn test_matches_brute_force() {
            let mut rng = ChaCha8Rng::seed_from_u64(55);
            for num_voters in 1..=7 {
                for _ in 0..3 {
                    let (weights_, quota) = Self::random_game(&mut rng, num_voters);
                    assert_eq!(
                        Self::counts(&weights_, quota, Parallel::No),
                        brute_force_counts(&weights_, quota),
                        "weights = {weights_:?}, quota = {quota}"
                    );
                }
            }
        }

        fn test_rayon_is_consistent() {
            let mut rng = ChaCha8Rng::seed_from_u64(56);
            for num_voters in [0, 1, 4, 8] {
                let (weights_, quota) = Self::random_game(&mut rng, num_voters.max(1));
                let weights_ = &weights_[..num_voters];
                assert_eq!(
                    Self::counts(weights_, quota, Parallel::Rayon),
                    Self::counts(weights_, quota, Parallel::No),
                );
            }
        }

        fn test_too_many_voters() {
            let weights_ = vec![W::one(); 35];
            assert_eq!(
                count_pivots(&weights_, &W::one(), Parallel::Rayon),
                Err(PowerIndexError::TooManyVoters {
                    num_voters: 35,
                    max: 34,
                })
            );
        }
    }

    #[test]
    fn test_random_real_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(57);
        for _ in 0..20 {
            let weights_: Vec<f64> = (0..5).map(|_| rng.gen::<f64>()).collect();
            let quota = weights_.iter().sum::<f64>() * 0.6;
            let power = shapley_shubik(&weights_, &quota).unwrap();
            for i in 0..5 {
                assert!((0.0..=1.0).contains(&power[i]));
                for j in 0..5 {
                    if weights_[i] >= weights_[j] {
                        assert!(power[i] >= power[j], "{power:?} for {weights_:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_logs() {
        let logger = LogCapture::start();
        let counts = count_pivots(&[1i64, 1], &2, Parallel::No).unwrap();
        assert_eq!(counts.counts, [1, 1]);
        logger.check_target_logs(
            "power_index_rs::shapley_shubik",
            [
                (Info, "Counting Shapley-Shubik pivots: 2 voters, quota = 2"),
                (Trace, "Voter #1 is pivotal for 1 orderings (total weight 2)"),
                (Trace, "Voter #0 is pivotal for 1 orderings (total weight 2)"),
                (Debug, "Finished counting pivots (3 recursive calls)"),
            ],
        );
    }

    #[test]
    fn test_logs_rayon() {
        // Workers log on their own threads, so only the calling thread's
        // records are captured. The call count matches the serial one.
        let logger = LogCapture::start();
        let counts = count_pivots(&[1i64, 1], &2, Parallel::Rayon).unwrap();
        assert_eq!(counts.counts, [1, 1]);
        logger.check_target_logs(
            "power_index_rs::shapley_shubik",
            [
                (Info, "Counting Shapley-Shubik pivots: 2 voters, quota = 2"),
                (Debug, "Finished counting pivots (3 recursive calls)"),
            ],
        );
    }

    #[test]
    fn test_weight_overflow() {
        for parallel in [Parallel::No, Parallel::Rayon] {
            assert_eq!(
                count_pivots(&[i64::MAX, 1], &i64::MAX, parallel),
                Err(PowerIndexError::WeightOverflow)
            );
        }
        assert_eq!(
            shapley_shubik(&[f64::MAX, f64::MAX], &1.0),
            Err(PowerIndexError::WeightOverflow)
        );
    }
}
