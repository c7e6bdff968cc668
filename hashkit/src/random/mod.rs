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

//! Seedable pseudo-random generators.
//!
//! Consistent hashing needs a stream of random numbers that is fully determined by a hash key.
//! The [`PseudoRandomGenerator`] trait describes such a stream and a
//! [`PseudoRandomGeneratorProvider`] creates independent generator instances, so that
//! algorithms can be written against any generator family.

mod splitmix64;

pub use self::splitmix64::SplitMix64;
pub use self::splitmix64::SplitMix64Provider;

/// The distance between consecutive doubles in `[0.5, 1)`, 2^-53.
const F64_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// A deterministic, reseedable source of pseudo-random numbers.
pub trait PseudoRandomGenerator {
    /// Returns the next 64 random bits.
    fn next_u64(&mut self) -> u64;

    /// Resets the generator to the state determined by `seed`.
    fn reset(&mut self, seed: u64);

    /// Returns the next 32 random bits.
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Returns a uniformly distributed value in `[0, bound)`.
    ///
    /// Uses Lemire's multiply-and-reject method, which needs a single draw in almost all cases.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    fn uniform_u32(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "bound must be positive");
        let mut product = u64::from(self.next_u32()) * u64::from(bound);
        if (product as u32) < bound {
            let threshold = bound.wrapping_neg() % bound;
            while (product as u32) < threshold {
                product = u64::from(self.next_u32()) * u64::from(bound);
            }
        }
        (product >> 32) as u32
    }

    /// Returns a uniformly distributed value in `[0, 1)` with 53 bits of precision.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * F64_UNIT
    }

    /// Returns an exponentially distributed value with rate 1.
    fn next_exponential(&mut self) -> f64 {
        -(-self.next_f64()).ln_1p()
    }
}

/// A factory of [`PseudoRandomGenerator`] instances of one generator family.
pub trait PseudoRandomGeneratorProvider {
    /// The generator type created by this provider.
    type Generator: PseudoRandomGenerator;

    /// Creates a generator with an unspecified but fixed initial state.
    fn create(&self) -> Self::Generator;

    /// Creates a generator whose state is determined by `seed`.
    fn create_with_seed(&self, seed: u64) -> Self::Generator {
        let mut generator = self.create();
        generator.reset(seed);
        generator
    }
}

/// Returns the provider of [`SplitMix64`] generators.
pub fn splitmix64_v1() -> SplitMix64Provider {
    SplitMix64Provider
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_f64_range() {
        let mut generator = splitmix64_v1().create_with_seed(0x3c52_6f0e_1d4a_9b87);
        let mut sum = 0.0;
        for _ in 0..10_000 {
            let value = generator.next_f64();
            assert!((0.0..1.0).contains(&value));
            sum += value;
        }
        let mean = sum / 10_000.0;
        assert!((mean - 0.5).abs() < 0.02, "mean {mean}");
    }

    #[test]
    fn test_next_exponential_mean() {
        let mut generator = splitmix64_v1().create_with_seed(17);
        let mut sum = 0.0;
        for _ in 0..20_000 {
            let value = generator.next_exponential();
            assert!(value >= 0.0 && value.is_finite());
            sum += value;
        }
        let mean = sum / 20_000.0;
        assert!((mean - 1.0).abs() < 0.05, "mean {mean}");
    }

    #[test]
    fn test_uniform_u32() {
        let mut generator = splitmix64_v1().create_with_seed(99);
        let mut counts = [0u32; 6];
        for _ in 0..60_000 {
            counts[generator.uniform_u32(6) as usize] += 1;
        }
        for count in counts {
            assert!((9_000..11_000).contains(&count), "{counts:?}");
        }
        assert_eq!(generator.uniform_u32(1), 0);
    }

    #[test]
    #[should_panic(expected = "bound must be positive")]
    fn test_uniform_u32_zero_bound() {
        splitmix64_v1().create().uniform_u32(0);
    }
}
