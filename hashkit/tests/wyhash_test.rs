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

mod common;

use std::collections::HashMap;
use std::hash::BuildHasher;

use common::random_bytes;
use common::random_chars;
use hashkit::error::ErrorKind;
use hashkit::hashing::HashSink;
use hashkit::hashing::HashStream128;
use hashkit::hashing::HashStream64;
use hashkit::hashing::Hasher128;
use hashkit::hashing::Hasher64;
use hashkit::hashing::WyhashFinal3;
use hashkit::hashing::WyhashFinal3Stream;
use hashkit::random::PseudoRandomGenerator;
use hashkit::random::SplitMix64;

const CHAR_BOUNDARY_LENGTHS: [usize; 11] = [0, 1, 23, 24, 25, 47, 48, 49, 100, 101, 250];

fn hashers() -> [WyhashFinal3; 3] {
    [
        WyhashFinal3::new(),
        WyhashFinal3::with_seed(0x5d4f_8a73_0b2c_91e6),
        WyhashFinal3::with_seed_and_secret(0x2e9b_4c10_77d3_a5f8, 0x6a1f_03c9_d8b2_4e57),
    ]
}

/// Writes `data` using a random mix of integer writes and byte ranges of random length.
fn put_randomly(stream: &mut WyhashFinal3Stream, data: &[u8], generator: &mut SplitMix64) {
    let mut rest = data;
    while !rest.is_empty() {
        match generator.uniform_u32(6) {
            0 => {
                stream.put_u8(rest[0]);
                rest = &rest[1..];
            }
            1 if rest.len() >= 2 => {
                stream.put_u16(u16::from_le_bytes([rest[0], rest[1]]));
                rest = &rest[2..];
            }
            2 if rest.len() >= 4 => {
                stream.put_u32(u32::from_le_bytes(rest[..4].try_into().unwrap()));
                rest = &rest[4..];
            }
            3 if rest.len() >= 8 => {
                stream.put_u64(u64::from_le_bytes(rest[..8].try_into().unwrap()));
                rest = &rest[8..];
            }
            _ => {
                let max = rest.len().min(130) as u32;
                let len = generator.uniform_u32(max + 1) as usize;
                stream.put_bytes(&rest[..len]);
                rest = &rest[len..];
            }
        }
    }
}

fn char_bytes(chars: &[u16]) -> Vec<u8> {
    chars.iter().flat_map(|c| c.to_le_bytes()).collect()
}

#[test]
fn test_single_write_matches_one_shot() {
    let mut generator = SplitMix64::new(1);
    for hasher in hashers() {
        for len in 0..=300 {
            let data = random_bytes(&mut generator, len);
            let mut stream = hasher.hash_stream();
            stream.put_bytes(&data);
            assert_eq!(stream.finish64(), hasher.hash_bytes_to_u64(&data), "len {len}");
            assert_eq!(stream.finish128(), hasher.hash_bytes_to_128(&data), "len {len}");
        }
    }
}

#[test]
fn test_byte_by_byte_matches_one_shot() {
    let mut generator = SplitMix64::new(2);
    for hasher in hashers() {
        for len in 0..=200 {
            let data = random_bytes(&mut generator, len);
            let mut stream = hasher.hash_stream();
            for &byte in &data {
                stream.put_u8(byte);
            }
            assert_eq!(stream.finish64(), hasher.hash_bytes_to_u64(&data), "len {len}");
        }
    }
}

#[test]
fn test_random_chunking_matches_one_shot() {
    let mut generator = SplitMix64::new(3);
    for hasher in hashers() {
        for len in (0..=400).chain([1000, 1001, 4099]) {
            let data = random_bytes(&mut generator, len);
            let expected = hasher.hash_bytes_to_128(&data);
            for _ in 0..4 {
                let mut stream = hasher.hash_stream();
                put_randomly(&mut stream, &data, &mut generator);
                assert_eq!(stream.byte_count(), len as u64);
                assert_eq!(stream.finish64(), expected.low(), "len {len}");
                assert_eq!(stream.finish128(), expected, "len {len}");
            }
        }
    }
}

#[test]
fn test_integer_writes_match_little_endian_bytes() {
    let hasher = WyhashFinal3::with_seed(77);
    for prefix_len in 0..=50 {
        let prefix = vec![0x5a; prefix_len];

        let mut typed = hasher.hash_stream();
        typed
            .put_bytes(&prefix)
            .put_i8(-3)
            .put_i16(-1234)
            .put_u32(0xdead_beef)
            .put_i32(i32::MIN)
            .put_u64(0x0123_4567_89ab_cdef)
            .put_i64(-42);

        let mut bytes = prefix.clone();
        bytes.extend_from_slice(&(-3i8).to_le_bytes());
        bytes.extend_from_slice(&(-1234i16).to_le_bytes());
        bytes.extend_from_slice(&0xdead_beefu32.to_le_bytes());
        bytes.extend_from_slice(&i32::MIN.to_le_bytes());
        bytes.extend_from_slice(&0x0123_4567_89ab_cdefu64.to_le_bytes());
        bytes.extend_from_slice(&(-42i64).to_le_bytes());

        let mut raw = hasher.hash_stream();
        raw.put_bytes(&bytes);
        assert_eq!(typed.finish64(), raw.finish64(), "prefix {prefix_len}");
        assert_eq!(typed.finish64(), hasher.hash_bytes_to_u64(&bytes));
    }
}

#[test]
fn test_chars_match_utf16_le_bytes() {
    let mut generator = SplitMix64::new(4);
    for hasher in hashers() {
        // prefixes of odd length shift the code units to odd stream positions
        for prefix_len in 0..=3 {
            for len in CHAR_BOUNDARY_LENGTHS {
                let prefix = random_bytes(&mut generator, prefix_len);
                let chars = random_chars(&mut generator, len);

                let mut stream = hasher.hash_stream();
                stream.put_bytes(&prefix).put_chars(&chars);

                let mut bytes = prefix.clone();
                bytes.extend(char_bytes(&chars));
                assert_eq!(
                    stream.finish128(),
                    hasher.hash_bytes_to_128(&bytes),
                    "prefix {prefix_len}, len {len}"
                );
            }
        }
    }
}

#[test]
fn test_chars_at_every_buffer_offset() {
    let mut generator = SplitMix64::new(5);
    let hasher = WyhashFinal3::with_seed(9);
    for prefix_len in 0..=97 {
        for len in [3, 24, 25, 26, 49, 73, 120] {
            let prefix = random_bytes(&mut generator, prefix_len);
            let chars = random_chars(&mut generator, len);

            let mut stream = hasher.hash_stream();
            stream.put_bytes(&prefix).put_chars(&chars).put_u8(0xff);

            let mut bytes = prefix.clone();
            bytes.extend(char_bytes(&chars));
            bytes.push(0xff);
            assert_eq!(
                stream.finish64(),
                hasher.hash_bytes_to_u64(&bytes),
                "prefix {prefix_len}, len {len}"
            );
        }
    }
}

#[test]
fn test_chunked_chars() {
    let mut generator = SplitMix64::new(6);
    let hasher = WyhashFinal3::new();
    for len in [50, 99, 500] {
        let chars = random_chars(&mut generator, len);
        let expected = hasher.hash_chars_to_u64(&chars);
        assert_eq!(expected, hasher.hash_bytes_to_u64(&char_bytes(&chars)));

        for _ in 0..10 {
            let mut stream = hasher.hash_stream();
            let mut rest = &chars[..];
            while !rest.is_empty() {
                let n = generator.uniform_u32(rest.len().min(60) as u32 + 1) as usize;
                if n % 2 == 0 {
                    stream.put_chars(&rest[..n]);
                } else {
                    for &c in &rest[..n] {
                        stream.put_u16(c);
                    }
                }
                rest = &rest[n..];
            }
            assert_eq!(stream.finish64(), expected, "len {len}");
        }
    }
}

#[test]
fn test_str_matches_utf16() {
    let hasher = WyhashFinal3::with_seed(12);
    let text = "Gr\u{fc}\u{df}e, \u{4e16}\u{754c}! \u{1f980}\u{1f980} ".repeat(9);
    let units: Vec<u16> = text.encode_utf16().collect();
    assert_eq!(hasher.hash_str_to_u64(&text), hasher.hash_bytes_to_u64(&char_bytes(&units)));
}

#[test]
fn test_hash_range() {
    let mut generator = SplitMix64::new(7);
    let data = random_bytes(&mut generator, 100);
    let hasher = WyhashFinal3::with_seed(3);

    assert_eq!(
        hasher.hash_bytes_range_to_u64(&data, 3, 60).unwrap(),
        hasher.hash_bytes_to_u64(&data[3..63])
    );
    assert_eq!(
        hasher.hash_bytes_range_to_128(&data, 0, 100).unwrap(),
        hasher.hash_bytes_to_128(&data)
    );

    let err = hasher.hash_bytes_range_to_u64(&data, 50, 51).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    let err = hasher.hash_bytes_range_to_128(&data, 101, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_seeds_and_secrets_change_the_hash() {
    let data = b"the same input";
    let default = WyhashFinal3::new().hash_bytes_to_u64(data);
    assert_ne!(WyhashFinal3::with_seed(1).hash_bytes_to_u64(data), default);
    assert_ne!(WyhashFinal3::with_seed_and_secret(0, 1).hash_bytes_to_u64(data), default);
    assert_eq!(
        WyhashFinal3::with_seed_and_secret(5, 1).hash_bytes_to_u64(data),
        WyhashFinal3::with_seed_and_secret(5, 1).hash_bytes_to_u64(data)
    );
}

#[test]
fn test_build_hasher() {
    let hasher = WyhashFinal3::with_seed(21);
    assert_eq!(hasher.hash_one("key"), hasher.hash_one("key"));
    assert_ne!(hasher.hash_one("key"), hasher.hash_one("kez"));

    let mut map: HashMap<String, usize, WyhashFinal3> = HashMap::with_hasher(hasher);
    for i in 0..1000 {
        map.insert(format!("item-{i}"), i);
    }
    assert_eq!(map.len(), 1000);
    assert_eq!(map.get("item-512"), Some(&512));
}

#[test]
fn test_streams_are_independent() {
    let hasher = WyhashFinal3::with_seed(8);
    let mut a = hasher.hash_stream();
    let mut b = hasher.hash_stream();
    a.put_bytes(b"left");
    b.put_bytes(b"right");
    assert_eq!(a.finish64(), hasher.hash_bytes_to_u64(b"left"));
    assert_eq!(b.finish64(), hasher.hash_bytes_to_u64(b"right"));

    let mut c = a.clone();
    c.put_u8(b'!');
    assert_eq!(a.finish64(), hasher.hash_bytes_to_u64(b"left"));
    assert_eq!(c.finish64(), hasher.hash_bytes_to_u64(b"left!"));
}
