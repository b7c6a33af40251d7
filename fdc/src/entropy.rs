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

//! Shannon entropy of byte sequences, in bits per byte.

/// Upper bound of the entropy of a byte sequence: all 256 values equally likely.
pub const MAX_ENTROPY: f64 = 8.0;

/// Frequency table over the 256 possible byte values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteHistogram {
    counts: [u64; 256],
    total: u64,
}

impl ByteHistogram {
    /// Count every byte of `data` in a single pass.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &b in data {
            counts[b as usize] += 1;
        }
        ByteHistogram {
            counts,
            total: data.len() as u64,
        }
    }

    /// Number of bytes counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Number of distinct byte values that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Shannon entropy of the counted bytes.
    ///
    /// An empty histogram carries no information and yields `0.0`.
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let len = self.total as f64;
        let mut entropy = 0.0;
        for &c in &self.counts {
            if c == 0 {
                continue;
            }
            let p = c as f64 / len;
            entropy -= p * p.log2();
        }
        entropy.clamp(0.0, MAX_ENTROPY)
    }
}

/// Computes the Shannon entropy of `data` in bits per byte.
///
/// Returns a value in `[0.0, 8.0]`: `0.0` when all bytes are identical (or `data`
/// is empty), `8.0` when all 256 byte values occur equally often.
pub fn measure_entropy(data: &[u8]) -> f64 {
    ByteHistogram::from_bytes(data).entropy()
}
