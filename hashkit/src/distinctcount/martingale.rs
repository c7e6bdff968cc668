// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt;

use super::StateChangeObserver;
use crate::error::Error;

/// Martingale estimator of the number of distinct elements inserted into a sketch.
///
/// Each state change observed while the state change probability was `p` adds `1 / p` to the
/// estimate. The estimate is unbiased for any sketch that reports its state change probability
/// correctly, and it is only valid as long as every insertion into the sketch is observed; after
/// merging sketches the estimator no longer applies.
///
/// # Examples
///
/// ```
/// # use hashkit::distinctcount::MartingaleEstimator;
/// let mut estimator = MartingaleEstimator::new();
/// estimator.state_changed(0.5);
/// estimator.state_changed(0.25);
/// assert_eq!(estimator.distinct_count_estimate(), 3.0);
/// assert_eq!(estimator.state_change_probability(), 0.25);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MartingaleEstimator {
    distinct_count_estimate: f64,
    state_change_probability: f64,
}

impl Default for MartingaleEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl MartingaleEstimator {
    /// Creates an estimator for an empty sketch.
    pub const fn new() -> Self {
        Self {
            distinct_count_estimate: 0.0,
            state_change_probability: 1.0,
        }
    }

    /// Creates an estimator with the given state, for example restored from serialized data.
    ///
    /// Returns an [`InvalidArgument`](crate::error::ErrorKind::InvalidArgument) error if
    /// `distinct_count_estimate` is negative or NaN, or if `state_change_probability` is not
    /// within `[0, 1]`.
    pub fn with_values(
        distinct_count_estimate: f64,
        state_change_probability: f64,
    ) -> Result<Self, Error> {
        let mut estimator = Self::new();
        estimator.set(distinct_count_estimate, state_change_probability)?;
        Ok(estimator)
    }

    /// Resets the estimator to the state of an empty sketch.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Sets the state of the estimator.
    ///
    /// Both arguments are validated before anything is changed; see
    /// [`with_values`](Self::with_values) for the accepted ranges.
    pub fn set(
        &mut self,
        distinct_count_estimate: f64,
        state_change_probability: f64,
    ) -> Result<(), Error> {
        if !(distinct_count_estimate >= 0.0) {
            return Err(
                Error::invalid_argument("distinct count estimate must be non-negative")
                    .with_context("distinct_count_estimate", distinct_count_estimate),
            );
        }
        if !(0.0..=1.0).contains(&state_change_probability) {
            return Err(
                Error::invalid_argument("state change probability must be in range [0, 1]")
                    .with_context("state_change_probability", state_change_probability),
            );
        }
        self.distinct_count_estimate = distinct_count_estimate;
        // -0.0 + 0.0 == +0.0, so a negative zero cannot flip the sign of 1 / p
        self.state_change_probability = state_change_probability + 0.0;
        Ok(())
    }

    /// Records a state change of the observed sketch.
    ///
    /// `probability` is the state change probability after the change. It is trusted to be
    /// within `[0, 1]` and not greater than the previous one.
    #[inline]
    pub fn state_changed(&mut self, probability: f64) {
        self.distinct_count_estimate += 1.0 / self.state_change_probability;
        self.state_change_probability = probability;
    }

    /// Returns the current estimate of the number of distinct elements.
    pub fn distinct_count_estimate(&self) -> f64 {
        self.distinct_count_estimate
    }

    /// Returns the current state change probability.
    pub fn state_change_probability(&self) -> f64 {
        self.state_change_probability
    }
}

impl StateChangeObserver for MartingaleEstimator {
    fn state_changed(&mut self, probability: f64) {
        MartingaleEstimator::state_changed(self, probability);
    }
}

/// Doubles are written with at least one fractional digit: as plain decimals within
/// `[1e-3, 1e7)` and in scientific notation with an upper-case `E` outside of it. Non-finite
/// values print as `Infinity`, `-Infinity` or `NaN`.
impl fmt::Display for MartingaleEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MartingaleEstimator{distinctCountEstimate=")?;
        write_double(f, self.distinct_count_estimate)?;
        f.write_str(", stateChangeProbability=")?;
        write_double(f, self.state_change_probability)?;
        f.write_str("}")
    }
}

fn write_double(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("NaN");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        // shortest round-trip digits, always with a fractional part
        return write!(f, "{value:?}");
    }
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    if mantissa.contains('.') {
        write!(f, "{mantissa}E{exponent}")
    } else {
        write!(f, "{mantissa}.0E{exponent}")
    }
}
