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

//! Secrets parameterizing the Wyhash family.

use super::wyhash::wymix;

/// The default secret of the Wyhash final3 family.
pub const DEFAULT_SECRET: [u64; 4] = [
    0xa0761d6478bd642f,
    0xe7037ed1a0b428db,
    0x8ebc6af09c88c6e3,
    0x589965cc75374cc3,
];

/// All byte values with exactly four bits set, in ascending order.
const SECRET_BYTES: [u8; 70] = [
    15, 23, 27, 29, 30, 39, 43, 45, 46, 51, 53, 54, 57, 58, 60, 71, 75, 77, 78, 83, 85, 86, 89, 90,
    92, 99, 101, 102, 105, 106, 108, 113, 114, 116, 120, 135, 139, 141, 142, 147, 149, 150, 153,
    154, 156, 163, 165, 166, 169, 170, 172, 177, 178, 180, 184, 195, 197, 198, 201, 202, 204, 209,
    210, 212, 216, 225, 226, 228, 232, 240,
];

/// Upper bound on the candidates drawn for a single secret.
///
/// A candidate is accepted with a probability of a few percent, so this bound is never reached.
const MAX_CANDIDATES_PER_SECRET: u32 = 1 << 24;

/// Derives a secret of four 64-bit constants from `seed`.
///
/// Each constant is assembled from eight bytes with exactly four bits set. A candidate is only
/// accepted if it is odd and differs from every previously accepted constant in exactly 32 bits.
/// The result is fully determined by `seed`.
///
/// # Panics
///
/// Panics if no acceptable candidate is found within a very large number of attempts, which
/// cannot happen for any seed.
///
/// # Examples
///
/// ```
/// # use hashkit::hashing::make_secret;
/// let secret = make_secret(42);
/// assert!(secret.iter().all(|s| s % 2 == 1));
/// assert_eq!((secret[0] ^ secret[3]).count_ones(), 32);
/// ```
pub fn make_secret(seed: u64) -> [u64; 4] {
    let mut seed = seed;
    let mut secret = [0u64; 4];
    for i in 0..secret.len() {
        let mut candidates = 0;
        secret[i] = loop {
            assert!(
                candidates < MAX_CANDIDATES_PER_SECRET,
                "no valid secret constant found after {candidates} candidates"
            );
            candidates += 1;

            let mut candidate = 0u64;
            for shift in (0..64).step_by(8) {
                seed = seed.wrapping_add(0xa0761d6478bd642f);
                let index = wymix(seed, seed ^ 0xe7037ed1a0b428db) % SECRET_BYTES.len() as u64;
                candidate |= u64::from(SECRET_BYTES[index as usize]) << shift;
            }
            if candidate & 1 == 1
                && secret[..i]
                    .iter()
                    .all(|accepted| (accepted ^ candidate).count_ones() == 32)
            {
                break candidate;
            }
        };
    }
    secret
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid(secret: &[u64; 4]) {
        for (i, a) in secret.iter().enumerate() {
            assert_eq!(a & 1, 1, "{a:#x} is even");
            for b in &secret[..i] {
                assert_eq!((a ^ b).count_ones(), 32, "{a:#x} vs {b:#x}");
            }
        }
    }

    #[test]
    fn test_secret_bytes() {
        assert!(SECRET_BYTES.iter().all(|b| b.count_ones() == 4));
        assert!(SECRET_BYTES.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(
            SECRET_BYTES.len(),
            (0..=u8::MAX).filter(|b| b.count_ones() == 4).count()
        );
    }

    #[test]
    fn test_default_secret_is_valid() {
        assert_valid(&DEFAULT_SECRET);
    }

    #[test]
    fn test_known_secrets() {
        assert_eq!(
            make_secret(0),
            [
                0x95d49a959ca5a395,
                0xb4a9716ac94da695,
                0x5635cc6355956559,
                0xe1e18e3a9c591da9,
            ]
        );
        assert_eq!(
            make_secret(42),
            [
                0x4d781d729a998b95,
                0xa52e8ec66a3c5655,
                0xb4e89c6536272da3,
                0x6aacaaac8ee2c393,
            ]
        );
    }

    #[test]
    fn test_generated_secrets_are_valid() {
        let mut seed = 0x1d8b_3f5e_c6a2_9047u64;
        for _ in 0..200 {
            let secret = make_secret(seed);
            assert_valid(&secret);
            assert_eq!(make_secret(seed), secret);
            seed = wymix(seed, 0x9e3779b97f4a7c15) ^ seed.rotate_left(17);
        }
    }
}
