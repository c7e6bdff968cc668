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

//! Improved consistent weighted sampling (ICWS) with uniform weights.
//!
//! ICWS, introduced by Ioffe in "Improved Consistent Sampling, Weighted Minhash and L1
//! Sketching" (2010), draws for an element of weight `w` a sample `y` with `0 < y <= w` that is
//! uniformly distributed and consistent: for weights `w <= w'` the samples coincide with
//! probability `w / w'`. Treating the number of buckets as the weight of the key and rounding the
//! sample down yields a bucket index with exactly the properties consistent hashing requires.
//!
//! The random variates only depend on the key, so the sample for a given key is found with
//! constant work instead of racing all candidate buckets.

use super::ConsistentBucketHasher;
use crate::random::PseudoRandomGenerator;
use crate::random::PseudoRandomGeneratorProvider;

/// A [`ConsistentBucketHasher`] based on improved consistent weighted sampling.
///
/// Holds nothing but the generator provider; a fresh generator seeded with the key is created
/// for every lookup, so a single instance can be shared freely.
#[derive(Debug, Clone)]
pub struct ImprovedConsistentWeightedSampling<P> {
    provider: P,
}

impl<P> ImprovedConsistentWeightedSampling<P>
where
    P: PseudoRandomGeneratorProvider,
{
    /// Creates a bucket hasher drawing random numbers from generators of `provider`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P> ConsistentBucketHasher for ImprovedConsistentWeightedSampling<P>
where
    P: PseudoRandomGeneratorProvider,
{
    fn bucket(&self, hash: u64, num_buckets: u32) -> u32 {
        assert!(num_buckets > 0, "num_buckets must be positive");
        let mut generator = self.provider.create_with_seed(hash);

        // r ~ Gamma(2, 1), b ~ Uniform(0, 1)
        let r = generator.next_exponential() + generator.next_exponential();
        let b = generator.next_f64();

        let t = (f64::from(num_buckets).ln() / r + b).floor();
        let y = (r * (t - b)).exp();

        // y < num_buckets in exact arithmetic, rounding may push it onto the boundary
        (y as u32).min(num_buckets - 1)
    }
}
