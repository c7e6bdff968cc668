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

//! Building blocks for distinct-count sketches.
//!
//! Many cardinality sketches only change their state when an element is inserted that has not
//! been seen before, and they can tell the probability with which the next new element would
//! change the state. A [`StateChangeObserver`] is notified of every such change; the
//! [`MartingaleEstimator`] turns these notifications into an unbiased running estimate of the
//! number of distinct elements inserted so far, as described in Ting, "Streamed approximate
//! counting of distinct elements" (KDD 2014).

mod martingale;

pub use self::martingale::MartingaleEstimator;

/// Receives the state changes of a distinct-count sketch.
pub trait StateChangeObserver {
    /// Called after the sketch changed its state.
    ///
    /// `probability` is the probability that the next insertion of a new element changes the
    /// state again. It never increases over the lifetime of a sketch.
    fn state_changed(&mut self, probability: f64);
}
