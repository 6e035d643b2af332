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

//! Stateless vector and integer helpers shared by the power index
//! computations.

use crate::error::PowerIndexError;
use num::traits::Zero;
use std::iter::Sum;
use std::ops::{Add, Div, Mul};

/// Computes the sum of the elementwise products of two vectors of the same
/// length.
pub fn dot_product<T, U, V>(v1: &[T], v2: &[U]) -> Result<V, PowerIndexError>
where
    for<'a> &'a T: Mul<&'a U, Output = V>,
    V: Sum,
{
    check_lengths(v1.len(), v2.len())?;
    Ok(std::iter::zip(v1, v2).map(|(a, b)| a * b).sum())
}

/// Computes the elementwise sum of two vectors of the same length.
pub fn vector_sum<T>(v1: &[T], v2: &[T]) -> Result<Vec<T>, PowerIndexError>
where
    for<'a> &'a T: Add<&'a T, Output = T>,
{
    check_lengths(v1.len(), v2.len())?;
    Ok(std::iter::zip(v1, v2).map(|(a, b)| a + b).collect())
}

/// Divides every element of the given vector by the sum of all elements, so
/// that the result sums to one.
///
/// A vector summing to zero cannot be normalized: this returns
/// [`PowerIndexError::DegenerateNormalization`] rather than a vector of NaNs.
pub fn normalize<T>(v: &[T]) -> Result<Vec<T>, PowerIndexError>
where
    T: Zero + for<'a> Sum<&'a T>,
    for<'a> &'a T: Div<&'a T, Output = T>,
{
    let sum: T = v.iter().sum();
    if sum.is_zero() {
        return Err(PowerIndexError::DegenerateNormalization);
    }
    Ok(v.iter().map(|x| x / &sum).collect())
}

/// Computes `n!`, with `0! = 1! = 1`.
pub fn factorial(n: i64) -> Result<u128, PowerIndexError> {
    if n < 0 {
        return Err(PowerIndexError::InvalidFactorialInput(n));
    }
    (2..=n as u128).try_fold(1u128, |acc, i| {
        acc.checked_mul(i)
            .ok_or(PowerIndexError::FactorialOverflow(n))
    })
}

/// Computes the table `[0!, 1!, ..., (len - 1)!]`.
pub fn factorial_table(len: usize) -> Result<Vec<u128>, PowerIndexError> {
    let mut table = Vec::with_capacity(len);
    let mut acc = 1u128;
    for i in 0..len {
        if i > 1 {
            acc = acc
                .checked_mul(i as u128)
                .ok_or(PowerIndexError::FactorialOverflow(i as i64))?;
        }
        table.push(acc);
    }
    Ok(table)
}

/// Returns the big-endian binary digits of the given number, without leading
/// zeros. In particular, zero has an empty expansion.
pub fn binary_expansion(mut i: u64) -> Vec<u8> {
    let mut bits = Vec::with_capacity(64 - i.leading_zeros() as usize);
    while i != 0 {
        bits.push((i & 1) as u8);
        i >>= 1;
    }
    bits.reverse();
    bits
}

/// Pads the given digits with zeros on the left, up to the given width.
/// Inputs already at least as wide are returned unchanged.
pub fn zero_pad_left(digits: &[u8], width: usize) -> Vec<u8> {
    let padding = width.saturating_sub(digits.len());
    let mut result = vec![0; padding];
    result.extend_from_slice(digits);
    result
}

fn check_lengths(left: usize, right: usize) -> Result<(), PowerIndexError> {
    if left != right {
        return Err(PowerIndexError::LengthMismatch { left, right });
    }
    Ok(())
}
