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
use std::hash::Hash;
use std::hash::Hasher;
use std::str::FromStr;

use byteorder::BE;
use byteorder::ByteOrder;

use crate::error::Error;

/// A 128-bit hash value.
///
/// Equality and ordering consider both halves, with the most significant half compared first.
/// The [`Hash`] implementation only feeds the least significant half, which is already a
/// uniformly distributed hash.
///
/// The byte encoding is the most significant half followed by the least significant half, both
/// big-endian, so that the hexadecimal form reads like the 128-bit number it represents.
///
/// # Examples
///
/// ```
/// # use hashkit::hashing::HashValue128;
/// let value = HashValue128::new(0x0123456789abcdef, 0xfedcba9876543210);
/// assert_eq!(value.to_hex(), "0123456789abcdeffedcba9876543210");
/// assert_eq!(value.to_string(), "0x0123456789abcdeffedcba9876543210");
/// assert_eq!(value.as_u32(), 0x76543210);
/// assert_eq!(HashValue128::from_bytes(value.to_bytes()), value);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct HashValue128 {
    high: u64,
    low: u64,
}

impl HashValue128 {
    /// Creates a hash value from its most and least significant 64 bits.
    pub const fn new(high: u64, low: u64) -> Self {
        Self { high, low }
    }

    /// Returns the 64 most significant bits.
    pub const fn high(&self) -> u64 {
        self.high
    }

    /// Returns the 64 least significant bits.
    pub const fn low(&self) -> u64 {
        self.low
    }

    /// Returns the 64 least significant bits as a 64-bit hash value.
    pub const fn as_u64(&self) -> u64 {
        self.low
    }

    /// Returns the 32 least significant bits as a 32-bit hash value.
    pub const fn as_u32(&self) -> u32 {
        self.low as u32
    }

    /// Encodes this value as 16 bytes, most significant byte first.
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        BE::write_u64(&mut bytes[..8], self.high);
        BE::write_u64(&mut bytes[8..], self.low);
        bytes
    }

    /// Decodes a value from the encoding produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self::new(BE::read_u64(&bytes[..8]), BE::read_u64(&bytes[8..]))
    }

    /// Returns the 32 lowercase hexadecimal digits of the byte encoding, without prefix.
    pub fn to_hex(&self) -> String {
        format!("{self:x}")
    }
}

impl Hash for HashValue128 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.low);
    }
}

impl From<u128> for HashValue128 {
    fn from(value: u128) -> Self {
        Self::new((value >> 64) as u64, value as u64)
    }
}

impl From<HashValue128> for u128 {
    fn from(value: HashValue128) -> Self {
        (u128::from(value.high) << 64) | u128::from(value.low)
    }
}

impl TryFrom<&[u8]> for HashValue128 {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; 16] = bytes.try_into().map_err(|_| {
            Error::invalid_data("a 128-bit hash value is encoded in 16 bytes")
                .with_context("actual", bytes.len())
        })?;
        Ok(Self::from_bytes(bytes))
    }
}

/// Parses the 32 hexadecimal digits written by [`to_hex`](HashValue128::to_hex), optionally
/// prefixed with `0x`.
impl FromStr for HashValue128 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != 32 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(
                Error::invalid_data("expected 32 hexadecimal digits").with_context("input", s)
            );
        }
        let value = u128::from_str_radix(digits, 16)
            .map_err(|err| Error::invalid_data(err.to_string()).with_context("input", s))?;
        Ok(value.into())
    }
}

impl fmt::LowerHex for HashValue128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        write!(f, "{:016x}{:016x}", self.high, self.low)
    }
}

impl fmt::Display for HashValue128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:#x}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;
    use crate::error::ErrorKind;

    fn std_hash<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_accessors() {
        let value = HashValue128::new(0x8000_0000_0000_0001, 0x1234_5678_9abc_def0);
        assert_eq!(value.high(), 0x8000_0000_0000_0001);
        assert_eq!(value.low(), 0x1234_5678_9abc_def0);
        assert_eq!(value.as_u64(), value.low());
        assert_eq!(value.as_u32(), 0x9abc_def0);
    }

    #[test]
    fn test_byte_encoding() {
        let value = HashValue128::new(0x0102030405060708, 0x090a0b0c0d0e0f10);
        assert_eq!(value.to_bytes(), [
            1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16
        ]);
        assert_eq!(HashValue128::from_bytes(value.to_bytes()), value);
        assert_eq!(HashValue128::try_from(&value.to_bytes()[..]).unwrap(), value);

        let err = HashValue128::try_from(&[0u8; 15][..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_hex() {
        let value = HashValue128::new(0xff, 0xa);
        assert_eq!(value.to_hex(), "00000000000000ff000000000000000a");
        assert_eq!(format!("{value}"), "0x00000000000000ff000000000000000a");
        assert_eq!(format!("{value:x}"), value.to_hex());

        assert_eq!(value.to_hex().parse::<HashValue128>().unwrap(), value);
        assert_eq!(value.to_string().parse::<HashValue128>().unwrap(), value);
        assert!("0xff".parse::<HashValue128>().is_err());
        assert!("+0000000000000ff000000000000000a".parse::<HashValue128>().is_err());
        assert!("g0000000000000ff000000000000000a".parse::<HashValue128>().is_err());
    }

    #[test]
    fn test_u128_conversion() {
        let value = HashValue128::new(1, 2);
        let wide: u128 = value.into();
        assert_eq!(wide, (1u128 << 64) | 2);
        assert_eq!(HashValue128::from(wide), value);
    }

    #[test]
    fn test_equality_and_ordering_use_both_halves() {
        let a = HashValue128::new(1, 5);
        let b = HashValue128::new(2, 5);
        assert_ne!(a, b);
        assert!(a < b);
        assert!(HashValue128::new(1, 6) > a);
        assert!(HashValue128::new(0, u64::MAX) < a);
    }

    #[test]
    fn test_hash_uses_low_half_only() {
        let a = HashValue128::new(1, 5);
        let b = HashValue128::new(2, 5);
        assert_eq!(std_hash(&a), std_hash(&b));
        assert_eq!(std_hash(&a), std_hash(&5u64));
    }
}
