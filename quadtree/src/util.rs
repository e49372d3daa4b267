// Copyright 2025 the Quadtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::cmp::Ordering;

use crate::types::{Scalar, ScalarAcc};

/// True for zero and positive values; false for negatives and NaN.
#[inline]
pub(crate) fn is_non_negative<T: Scalar>(v: T) -> bool {
    matches!(
        v.partial_cmp(&T::zero()),
        Some(Ordering::Greater | Ordering::Equal)
    )
}

/// Squared Euclidean distance between two locations, in the widened accumulator.
///
/// `None` when the result does not fit the accumulator, which can only happen
/// for integer coordinates far apart; such a distance exceeds any radius.
#[inline]
pub(crate) fn distance_sq<T: Scalar>(a: (T, T), b: (T, T)) -> Option<ScalarAcc<T>> {
    let dx = T::widen(a.0) - T::widen(b.0);
    let dy = T::widen(a.1) - T::widen(b.1);
    T::checked_norm_sq(dx, dy)
}

/// Total order for accumulators that are assumed to be NaN-free.
#[inline]
pub(crate) fn cmp_acc<A: PartialOrd>(a: &A, b: &A) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}
