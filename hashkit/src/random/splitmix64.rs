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

use super::PseudoRandomGenerator;
use super::PseudoRandomGeneratorProvider;

const GOLDEN_GAMMA: u64 = 0x9e3779b97f4a7c15;

/// The SplitMix64 generator of Steele, Lea and Flood.
///
/// The state advances by a fixed odd increment and each output is a bijective mix of the state,
/// so resetting to the same seed replays the same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Creates a generator starting from `seed`.
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl PseudoRandomGenerator for SplitMix64 {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }

    fn reset(&mut self, seed: u64) {
        self.state = seed;
    }
}

/// Creates [`SplitMix64`] generators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitMix64Provider;

impl PseudoRandomGeneratorProvider for SplitMix64Provider {
    type Generator = SplitMix64;

    fn create(&self) -> SplitMix64 {
        SplitMix64::new(0)
    }

    fn create_with_seed(&self, seed: u64) -> SplitMix64 {
        SplitMix64::new(seed)
    }
}
