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

//! Consistent hashing of keys to a variable number of buckets.
//!
//! A [`ConsistentBucketHasher`] maps a 64-bit hash to one of `n` buckets such that the assignment
//! is uniform and, when the number of buckets grows from `n` to `n + 1`, only the keys that move
//! to the new bucket change their assignment. In expectation that is a fraction of `1 / (n + 1)`
//! of all keys, the minimum possible.
//!
//! # Usage
//!
//! ```rust
//! # use hashkit::consistent::ConsistentBucketHasher;
//! # use hashkit::consistent::improved_consistent_weighted_sampling;
//! # use hashkit::hashing::Hasher64;
//! # use hashkit::hashing::WyhashFinal3;
//! # use hashkit::random::splitmix64_v1;
//! let bucket_hasher = improved_consistent_weighted_sampling(splitmix64_v1());
//! let hash = WyhashFinal3::new().hash_str_to_u64("user-4711");
//!
//! let bucket = bucket_hasher.bucket(hash, 10);
//! assert!(bucket < 10);
//!
//! // growing the cluster either keeps the bucket or moves the key to the new one
//! let grown = bucket_hasher.bucket(hash, 11);
//! assert!(grown == bucket || grown == 10);
//! ```

mod icws;

pub use self::icws::ImprovedConsistentWeightedSampling;
use crate::random::PseudoRandomGeneratorProvider;

/// Assigns hash keys to buckets consistently.
pub trait ConsistentBucketHasher {
    /// Returns the bucket in `[0, num_buckets)` assigned to `hash`.
    ///
    /// The input should be a uniformly distributed hash value, such as the output of a
    /// [`Hasher64`](crate::hashing::Hasher64).
    ///
    /// # Panics
    ///
    /// Panics if `num_buckets` is zero.
    fn bucket(&self, hash: u64, num_buckets: u32) -> u32;
}

/// Returns a consistent bucket hasher based on improved consistent weighted sampling, drawing its
/// random numbers from generators of the given provider.
///
/// Computing a bucket takes constant time, independent of the number of buckets.
pub fn improved_consistent_weighted_sampling<P>(provider: P) -> ImprovedConsistentWeightedSampling<P>
where
    P: PseudoRandomGeneratorProvider,
{
    ImprovedConsistentWeightedSampling::new(provider)
}
