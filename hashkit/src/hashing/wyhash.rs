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

use std::hash::BuildHasher;
use std::hash::Hasher;

use byteorder::ByteOrder;
use byteorder::LE;

use super::HashSink;
use super::HashStream128;
use super::HashStream64;
use super::HashValue128;
use super::Hasher128;
use super::Hasher64;
use super::secret::DEFAULT_SECRET;
use super::secret::make_secret;

const BLOCK_LEN: usize = 48;
/// A full block plus room for the widest single write to spill over.
const BUFFER_LEN: usize = BLOCK_LEN + 8;
/// Number of UTF-16 code units in one block.
const BLOCK_CHARS: usize = BLOCK_LEN / 2;

/// Multiplies `a` and `b` into a 128-bit product and folds its two halves with XOR.
#[inline]
pub fn wymix(a: u64, b: u64) -> u64 {
    let product = u128::from(a) * u128::from(b);
    (product as u64) ^ ((product >> 64) as u64)
}

/// The Wyhash hash function, revision final3.
///
/// A value of this type is one member of the hash family: an initial seed combined with a
/// schedule of secrets. It is immutable, `Copy` and safe to share between threads; every
/// computation gets its own [`WyhashFinal3Stream`].
///
/// # Examples
///
/// ```
/// # use hashkit::hashing::Hasher64;
/// # use hashkit::hashing::WyhashFinal3;
/// let hasher = WyhashFinal3::with_seed(3);
/// assert_eq!(hasher.hash_bytes_to_u64(b"message digest"), 0x6e2ff3298208a67c);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WyhashFinal3 {
    seed: u64,
    secret1: u64,
    secret2: u64,
    secret3: u64,
}

impl WyhashFinal3 {
    /// Creates the hash function with seed 0 and the default secret.
    pub const fn new() -> Self {
        Self::with_seed(0)
    }

    /// Creates the hash function with the given seed and the default secret.
    pub const fn with_seed(seed: u64) -> Self {
        Self::with_secret(seed, &DEFAULT_SECRET)
    }

    /// Creates the hash function with the given seed and a secret derived from `secret_seed`.
    ///
    /// Deriving the secret runs the rejection sampling of [`make_secret`]; create the hash
    /// function once and reuse it.
    pub fn with_seed_and_secret(seed: u64, secret_seed: u64) -> Self {
        Self::with_secret(seed, &make_secret(secret_seed))
    }

    const fn with_secret(seed: u64, secret: &[u64; 4]) -> Self {
        Self {
            seed: seed ^ secret[0],
            secret1: secret[1],
            secret2: secret[2],
            secret3: secret[3],
        }
    }

    /// Folds every full 16-byte segment but the last into `seed`.
    #[inline]
    fn absorb_segments(&self, mut seed: u64, mut bytes: &[u8]) -> u64 {
        while bytes.len() > 16 {
            seed = wymix(
                LE::read_u64(bytes) ^ self.secret1,
                LE::read_u64(&bytes[8..]) ^ seed,
            );
            bytes = &bytes[16..];
        }
        seed
    }

    /// Computes the words `a`, `b` and the folded seed for a complete input.
    fn one_shot_words(&self, input: &[u8]) -> (u64, u64, u64) {
        let len = input.len();
        if len <= 16 {
            let (a, b) = short_words(input);
            return (a, b, self.seed);
        }

        let mut rest = input;
        let mut seed = self.seed;
        if rest.len() > BLOCK_LEN {
            let mut lanes = Lanes::new(self.seed);
            while rest.len() > BLOCK_LEN {
                let (block, tail) = rest.split_at(BLOCK_LEN);
                lanes.absorb(self, &read_block(block));
                rest = tail;
            }
            seed = lanes.fold();
        }
        let seed = self.absorb_segments(seed, rest);
        let last = &input[len - 16..];
        (LE::read_u64(last), LE::read_u64(&last[8..]), seed)
    }

    #[inline]
    fn finish_low(&self, len: u64, a: u64, b: u64, seed: u64) -> u64 {
        wymix(self.secret1 ^ len, wymix(a ^ self.secret1, b ^ seed))
    }

    /// Second output word: the final mix keyed with `secret2` instead of `secret1`.
    #[inline]
    fn finish_high(&self, len: u64, a: u64, b: u64, seed: u64) -> u64 {
        wymix(self.secret2 ^ len, wymix(a ^ self.secret2, b ^ seed))
    }
}

impl Default for WyhashFinal3 {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher64 for WyhashFinal3 {
    type Stream = WyhashFinal3Stream;

    fn hash_stream(&self) -> WyhashFinal3Stream {
        WyhashFinal3Stream::new(*self)
    }

    fn hash_bytes_to_u64(&self, input: &[u8]) -> u64 {
        let (a, b, seed) = self.one_shot_words(input);
        self.finish_low(input.len() as u64, a, b, seed)
    }
}

/// The low 64 bits equal [`hash_bytes_to_u64`](Hasher64::hash_bytes_to_u64) and therefore the
/// published wyhash final3 values. Wyhash defines no 128-bit variant, so the high 64 bits are
/// specific to this crate: the final mix applied once more to the same state, keyed with the
/// second secret word. They are stable across releases but there are no external reference
/// values to check them against.
impl Hasher128 for WyhashFinal3 {
    fn hash_bytes_to_128(&self, input: &[u8]) -> HashValue128 {
        let len = input.len() as u64;
        let (a, b, seed) = self.one_shot_words(input);
        HashValue128::new(
            self.finish_high(len, a, b, seed),
            self.finish_low(len, a, b, seed),
        )
    }
}

impl BuildHasher for WyhashFinal3 {
    type Hasher = WyhashFinal3Stream;

    fn build_hasher(&self) -> WyhashFinal3Stream {
        self.hash_stream()
    }
}

/// The three interleaved accumulators absorbing 48-byte blocks.
#[derive(Debug, Clone, Copy)]
struct Lanes {
    seed: u64,
    see1: u64,
    see2: u64,
}

impl Lanes {
    fn new(seed: u64) -> Self {
        Self {
            seed,
            see1: seed,
            see2: seed,
        }
    }

    #[inline]
    fn absorb(&mut self, hasher: &WyhashFinal3, w: &[u64; 6]) {
        self.seed = wymix(w[0] ^ hasher.secret1, w[1] ^ self.seed);
        self.see1 = wymix(w[2] ^ hasher.secret2, w[3] ^ self.see1);
        self.see2 = wymix(w[4] ^ hasher.secret3, w[5] ^ self.see2);
    }

    /// Combines the lanes; the identity on `seed` while no block has been absorbed.
    fn fold(&self) -> u64 {
        self.seed ^ self.see1 ^ self.see2
    }
}

/// Streaming state of one Wyhash final3 computation.
///
/// Writes are collected in a working buffer of 48 bytes plus 8 bytes of slack. As soon as more
/// than 48 bytes are pending, the first 48 are absorbed as a block and the overflow moves to the
/// front. At least one byte therefore always stays buffered once a block has been absorbed, and
/// the bytes behind the pending ones still hold the end of the last block, which finalization
/// needs when fewer than 16 bytes are pending.
///
/// A stream is owned by a single computation. Sharing one between threads requires external
/// synchronization.
#[derive(Debug, Clone)]
pub struct WyhashFinal3Stream {
    hasher: WyhashFinal3,
    buffer: [u8; BUFFER_LEN],
    byte_count: u64,
    offset: usize,
    lanes: Lanes,
}

impl WyhashFinal3Stream {
    fn new(hasher: WyhashFinal3) -> Self {
        Self {
            hasher,
            buffer: [0; BUFFER_LEN],
            byte_count: 0,
            offset: 0,
            lanes: Lanes::new(hasher.seed),
        }
    }

    /// Returns the total number of bytes written since creation or the last reset.
    pub fn byte_count(&self) -> u64 {
        self.byte_count
    }

    #[inline]
    fn put_le<const N: usize>(&mut self, bytes: [u8; N]) -> &mut Self {
        self.buffer[self.offset..self.offset + N].copy_from_slice(&bytes);
        self.offset += N;
        self.byte_count += N as u64;
        if self.offset > BLOCK_LEN {
            self.offset -= BLOCK_LEN;
            self.process_buffer();
            self.buffer
                .copy_within(BLOCK_LEN..BLOCK_LEN + self.offset, 0);
        }
        self
    }

    #[inline]
    fn process_buffer(&mut self) {
        let block = read_block(&self.buffer);
        self.lanes.absorb(&self.hasher, &block);
    }

    fn final_words(&self) -> (u64, u64, u64) {
        let pending = &self.buffer[..self.offset];
        if self.byte_count <= 16 {
            let (a, b) = short_words(pending);
            return (a, b, self.lanes.seed);
        }

        let seed = self.hasher.absorb_segments(self.lanes.fold(), pending);
        if self.offset >= 16 {
            let last = &pending[self.offset - 16..];
            (LE::read_u64(last), LE::read_u64(&last[8..]), seed)
        } else {
            // the last 16 bytes wrap around from the end of the previous block
            let split = 16 - self.offset;
            let mut last = [0u8; 16];
            last[..split].copy_from_slice(&self.buffer[BLOCK_LEN - split..BLOCK_LEN]);
            last[split..].copy_from_slice(pending);
            (LE::read_u64(&last), LE::read_u64(&last[8..]), seed)
        }
    }
}

impl HashSink for WyhashFinal3Stream {
    fn put_u8(&mut self, v: u8) -> &mut Self {
        self.put_le([v])
    }

    fn put_u16(&mut self, v: u16) -> &mut Self {
        self.put_le(v.to_le_bytes())
    }

    fn put_u32(&mut self, v: u32) -> &mut Self {
        self.put_le(v.to_le_bytes())
    }

    fn put_u64(&mut self, v: u64) -> &mut Self {
        self.put_le(v.to_le_bytes())
    }

    fn put_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        let len = bytes.len();
        self.byte_count += len as u64;
        let room = BLOCK_LEN - self.offset;
        if len <= room {
            self.buffer[self.offset..self.offset + len].copy_from_slice(bytes);
            self.offset += len;
            return self;
        }

        let (head, mut rest) = bytes.split_at(room);
        self.buffer[self.offset..BLOCK_LEN].copy_from_slice(head);
        self.process_buffer();
        while rest.len() > BLOCK_LEN {
            let (block, tail) = rest.split_at(BLOCK_LEN);
            self.lanes.absorb(&self.hasher, &read_block(block));
            rest = tail;
        }
        self.offset = rest.len();
        self.buffer[..self.offset].copy_from_slice(rest);
        if self.offset < 16 && len > BLOCK_LEN {
            self.buffer[32 + self.offset..BLOCK_LEN]
                .copy_from_slice(&bytes[len - 16..len - self.offset]);
        }
        self
    }

    fn put_chars(&mut self, chars: &[u16]) -> &mut Self {
        let len = chars.len();
        self.byte_count += (len as u64) << 1;
        let mut i = 0;
        if len > (BLOCK_LEN - self.offset) >> 1 {
            // top up the buffer to a complete block, spilling at most one byte into the slack
            while self.offset <= BLOCK_LEN - 8 {
                LE::write_u64(&mut self.buffer[self.offset..], char_word(&chars[i..]));
                i += 4;
                self.offset += 8;
            }
            while self.offset < BLOCK_LEN {
                LE::write_u16(&mut self.buffer[self.offset..], chars[i]);
                i += 1;
                self.offset += 2;
            }
            self.process_buffer();
            self.offset &= 1;

            if self.offset == 0 {
                while i + BLOCK_CHARS < len {
                    self.lanes.absorb(&self.hasher, &char_block(&chars[i..]));
                    i += BLOCK_CHARS;
                }
            } else {
                // odd stream position: every block starts with the high byte of the unit before
                let mut carry = u64::from(chars[i - 1] >> 8);
                while i + BLOCK_CHARS <= len {
                    let w = char_block(&chars[i..]);
                    let shifted: [u64; 6] = std::array::from_fn(|k| match k {
                        0 => carry | (w[0] << 8),
                        _ => (w[k - 1] >> 56) | (w[k] << 8),
                    });
                    carry = w[5] >> 56;
                    self.lanes.absorb(&self.hasher, &shifted);
                    i += BLOCK_CHARS;
                }
                self.buffer[0] = carry as u8;
            }

            if len > BLOCK_CHARS {
                // restore the end of the last absorbed block behind the pending units
                let mut j = 32 + self.offset + ((len - i) << 1);
                let mut k = len - 8;
                while j < BLOCK_LEN {
                    LE::write_u16(&mut self.buffer[j..], chars[k]);
                    j += 2;
                    k += 1;
                }
            }
        }

        while i + 3 < len {
            LE::write_u64(&mut self.buffer[self.offset..], char_word(&chars[i..]));
            i += 4;
            self.offset += 8;
        }
        while i < len {
            LE::write_u16(&mut self.buffer[self.offset..], chars[i]);
            i += 1;
            self.offset += 2;
        }
        self
    }
}

impl HashStream64 for WyhashFinal3Stream {
    fn finish64(&self) -> u64 {
        let (a, b, seed) = self.final_words();
        self.hasher.finish_low(self.byte_count, a, b, seed)
    }

    fn reset(&mut self) -> &mut Self {
        self.byte_count = 0;
        self.offset = 0;
        self.lanes = Lanes::new(self.hasher.seed);
        self
    }
}

impl HashStream128 for WyhashFinal3Stream {
    fn finish128(&self) -> HashValue128 {
        let (a, b, seed) = self.final_words();
        HashValue128::new(
            self.hasher.finish_high(self.byte_count, a, b, seed),
            self.hasher.finish_low(self.byte_count, a, b, seed),
        )
    }
}

/// Integer writes are little-endian on every platform so that hashes are portable.
impl Hasher for WyhashFinal3Stream {
    fn finish(&self) -> u64 {
        self.finish64()
    }

    fn write(&mut self, bytes: &[u8]) {
        self.put_bytes(bytes);
    }

    fn write_u8(&mut self, i: u8) {
        self.put_u8(i);
    }

    fn write_u16(&mut self, i: u16) {
        self.put_u16(i);
    }

    fn write_u32(&mut self, i: u32) {
        self.put_u32(i);
    }

    fn write_u64(&mut self, i: u64) {
        self.put_u64(i);
    }

    fn write_usize(&mut self, i: usize) {
        self.put_u64(i as u64);
    }
}

/// Reads the words `a` and `b` of an input of at most 16 bytes.
#[inline]
fn short_words(input: &[u8]) -> (u64, u64) {
    let len = input.len();
    if len >= 4 {
        let step = (len >> 3) << 2;
        let a = (u64::from(LE::read_u32(input)) << 32) | u64::from(LE::read_u32(&input[step..]));
        let b = (u64::from(LE::read_u32(&input[len - 4..])) << 32)
            | u64::from(LE::read_u32(&input[len - 4 - step..]));
        (a, b)
    } else if len > 0 {
        let a = (u64::from(input[0]) << 16)
            | (u64::from(input[len >> 1]) << 8)
            | u64::from(input[len - 1]);
        (a, 0)
    } else {
        (0, 0)
    }
}

#[inline]
fn read_block(bytes: &[u8]) -> [u64; 6] {
    std::array::from_fn(|k| LE::read_u64(&bytes[k << 3..]))
}

/// Packs four UTF-16 code units into one little-endian word.
#[inline]
fn char_word(chars: &[u16]) -> u64 {
    u64::from(chars[0])
        | (u64::from(chars[1]) << 16)
        | (u64::from(chars[2]) << 32)
        | (u64::from(chars[3]) << 48)
}

#[inline]
fn char_block(chars: &[u16]) -> [u64; 6] {
    std::array::from_fn(|k| char_word(&chars[k << 2..]))
}
