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

//! # hashkit
//!
//! Hashing primitives for data structures that must agree across processes and restarts:
//!
//! - [`hashing`]: the streaming, seedable Wyhash (final3) hash function behind a sink
//!   abstraction, and the [`HashValue128`](hashing::HashValue128) type.
//! - [`consistent`]: consistent assignment of hash keys to a variable number of buckets.
//! - [`distinctcount`]: the martingale estimator used by distinct-count sketches.
//! - [`random`]: seedable pseudo-random generators used by the consistent hashing algorithms.
//!
//! None of the hash functions are cryptographic; they must not be used where an adversary
//! controls the input and benefits from collisions.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod consistent;
pub mod distinctcount;
pub mod error;
pub mod hashing;
pub mod random;
