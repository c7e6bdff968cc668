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

//! Non-cryptographic hash functions and the sink abstraction used to feed them.
//!
//! Hash functions are exposed through small capability traits rather than a type hierarchy:
//!
//! - [`HashSink`] accepts typed primitive writes and concatenates them into one logical byte
//!   stream. Integers are written in little-endian order and text as UTF-16 code units, each
//!   encoded as two little-endian bytes.
//! - [`HashStream64`] and [`HashStream128`] are sinks that can be finalized into a hash value.
//! - [`Hasher64`] and [`Hasher128`] are immutable hash function instances (a seed and a secret)
//!   that create fresh streams and hash contiguous inputs in one shot.
//!
//! The result of a stream only depends on the concatenated bytes, never on how the writes were
//! chunked, and it is always equal to the one-shot hash of the same bytes.
//!
//! # Usage
//!
//! ```rust
//! # use hashkit::hashing::HashSink;
//! # use hashkit::hashing::HashStream64;
//! # use hashkit::hashing::Hasher64;
//! # use hashkit::hashing::WyhashFinal3;
//! let hasher = WyhashFinal3::with_seed(42);
//!
//! let mut stream = hasher.hash_stream();
//! stream.put_u32(0x6463_6261).put_bytes(b"efgh");
//!
//! assert_eq!(stream.finish64(), hasher.hash_bytes_to_u64(b"abcdefgh"));
//! ```

mod secret;
mod value;
mod wyhash;

pub use self::secret::DEFAULT_SECRET;
pub use self::secret::make_secret;
pub use self::value::HashValue128;
pub use self::wyhash::WyhashFinal3;
pub use self::wyhash::WyhashFinal3Stream;
pub use self::wyhash::wymix;
use crate::error::Error;

/// An incremental sink accumulating typed writes into one logical byte stream.
///
/// Every method returns the sink itself so that writes can be chained.
pub trait HashSink {
    /// Appends a single byte.
    fn put_u8(&mut self, v: u8) -> &mut Self;

    /// Appends a 16-bit integer as 2 little-endian bytes.
    fn put_u16(&mut self, v: u16) -> &mut Self;

    /// Appends a 32-bit integer as 4 little-endian bytes.
    fn put_u32(&mut self, v: u32) -> &mut Self;

    /// Appends a 64-bit integer as 8 little-endian bytes.
    fn put_u64(&mut self, v: u64) -> &mut Self;

    /// Appends a range of bytes.
    fn put_bytes(&mut self, bytes: &[u8]) -> &mut Self;

    /// Appends a sequence of UTF-16 code units, each as 2 little-endian bytes.
    fn put_chars(&mut self, chars: &[u16]) -> &mut Self;

    /// Appends a signed byte.
    fn put_i8(&mut self, v: i8) -> &mut Self {
        self.put_u8(v as u8)
    }

    /// Appends a signed 16-bit integer.
    fn put_i16(&mut self, v: i16) -> &mut Self {
        self.put_u16(v as u16)
    }

    /// Appends a signed 32-bit integer.
    fn put_i32(&mut self, v: i32) -> &mut Self {
        self.put_u32(v as u32)
    }

    /// Appends a signed 64-bit integer.
    fn put_i64(&mut self, v: i64) -> &mut Self {
        self.put_u64(v as u64)
    }

    /// Appends a boolean as a single byte, `1` for `true` and `0` for `false`.
    fn put_bool(&mut self, v: bool) -> &mut Self {
        self.put_u8(u8::from(v))
    }

    /// Appends the raw IEEE 754 bits of a 32-bit float.
    fn put_f32(&mut self, v: f32) -> &mut Self {
        self.put_u32(v.to_bits())
    }

    /// Appends the raw IEEE 754 bits of a 64-bit float.
    fn put_f64(&mut self, v: f64) -> &mut Self {
        self.put_u64(v.to_bits())
    }

    /// Appends a character as its one or two UTF-16 code units.
    fn put_char(&mut self, c: char) -> &mut Self {
        let mut units = [0u16; 2];
        self.put_chars(c.encode_utf16(&mut units))
    }

    /// Appends a string as its UTF-16 code units.
    ///
    /// Equivalent to calling [`put_char`](Self::put_char) for every character of `s`.
    fn put_str(&mut self, s: &str) -> &mut Self {
        let mut chunk = [0u16; 64];
        let mut len = 0;
        for unit in s.encode_utf16() {
            chunk[len] = unit;
            len += 1;
            if len == chunk.len() {
                self.put_chars(&chunk);
                len = 0;
            }
        }
        self.put_chars(&chunk[..len])
    }
}

/// A [`HashSink`] that can be finalized into a 64-bit hash value.
pub trait HashStream64: HashSink {
    /// Returns the 64-bit hash of all bytes written so far.
    ///
    /// The stream is left untouched, so more data may be appended afterwards.
    fn finish64(&self) -> u64;

    /// Resets the stream to the state it had right after creation.
    fn reset(&mut self) -> &mut Self;
}

/// A [`HashStream64`] that can also be finalized into a 128-bit hash value.
pub trait HashStream128: HashStream64 {
    /// Returns the 128-bit hash of all bytes written so far.
    ///
    /// The low 64 bits are equal to [`finish64`](HashStream64::finish64).
    fn finish128(&self) -> HashValue128;
}

/// A 64-bit hash function.
///
/// Implementations are immutable and cheap to share; all mutable state lives in the streams
/// they create.
pub trait Hasher64 {
    /// The stream type created by this hash function.
    type Stream: HashStream64;

    /// Creates a fresh stream bound to the seed and secret of this hash function.
    fn hash_stream(&self) -> Self::Stream;

    /// Hashes a contiguous byte slice.
    fn hash_bytes_to_u64(&self, input: &[u8]) -> u64 {
        let mut stream = self.hash_stream();
        stream.put_bytes(input);
        stream.finish64()
    }

    /// Hashes `len` bytes of `input` starting at `offset`.
    ///
    /// Returns an [`InvalidArgument`](crate::error::ErrorKind::InvalidArgument) error if the
    /// range does not lie within `input`.
    fn hash_bytes_range_to_u64(&self, input: &[u8], offset: usize, len: usize) -> Result<u64, Error> {
        checked_range(input, offset, len).map(|bytes| self.hash_bytes_to_u64(bytes))
    }

    /// Hashes a sequence of UTF-16 code units.
    fn hash_chars_to_u64(&self, chars: &[u16]) -> u64 {
        let mut stream = self.hash_stream();
        stream.put_chars(chars);
        stream.finish64()
    }

    /// Hashes the UTF-16 code units of a string.
    fn hash_str_to_u64(&self, s: &str) -> u64 {
        let mut stream = self.hash_stream();
        stream.put_str(s);
        stream.finish64()
    }

    /// Hashes an object by letting `funnel` write it into a fresh stream.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hashkit::hashing::HashSink;
    /// # use hashkit::hashing::Hasher64;
    /// # use hashkit::hashing::WyhashFinal3;
    /// struct Point {
    ///     x: i32,
    ///     y: i32,
    /// }
    ///
    /// let hasher = WyhashFinal3::new();
    /// let hash = hasher.hash_to_u64(&Point { x: 1, y: 2 }, |p, sink| {
    ///     sink.put_i32(p.x).put_i32(p.y);
    /// });
    /// assert_eq!(hash, hasher.hash_bytes_to_u64(&[1, 0, 0, 0, 2, 0, 0, 0]));
    /// ```
    fn hash_to_u64<T, F>(&self, obj: &T, funnel: F) -> u64
    where
        T: ?Sized,
        F: FnOnce(&T, &mut Self::Stream),
    {
        let mut stream = self.hash_stream();
        funnel(obj, &mut stream);
        stream.finish64()
    }
}

/// A hash function producing 128-bit hash values.
pub trait Hasher128: Hasher64 {
    /// Hashes a contiguous byte slice into a 128-bit value.
    fn hash_bytes_to_128(&self, input: &[u8]) -> HashValue128;

    /// Hashes `len` bytes of `input` starting at `offset` into a 128-bit value.
    ///
    /// Returns an [`InvalidArgument`](crate::error::ErrorKind::InvalidArgument) error if the
    /// range does not lie within `input`.
    fn hash_bytes_range_to_128(
        &self,
        input: &[u8],
        offset: usize,
        len: usize,
    ) -> Result<HashValue128, Error> {
        checked_range(input, offset, len).map(|bytes| self.hash_bytes_to_128(bytes))
    }
}

fn checked_range(input: &[u8], offset: usize, len: usize) -> Result<&[u8], Error> {
    offset
        .checked_add(len)
        .and_then(|end| input.get(offset..end))
        .ok_or_else(|| Error::out_of_range(offset, len, input.len()))
}
