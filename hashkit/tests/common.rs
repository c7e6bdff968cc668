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

use hashkit::random::PseudoRandomGenerator;
use hashkit::random::SplitMix64;

pub fn random_bytes(generator: &mut SplitMix64, len: usize) -> Vec<u8> {
    (0..len).map(|_| generator.next_u64() as u8).collect()
}

pub fn random_chars(generator: &mut SplitMix64, len: usize) -> Vec<u16> {
    (0..len).map(|_| generator.next_u64() as u16).collect()
}
