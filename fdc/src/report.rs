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

//! Figures derived from a finished compression, for display only.
use crate::entropy::MAX_ENTROPY;
use std::fmt;

/// Sizes and entropy of one compression. None of this is stored in the container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompressionReport {
    pub original_size: u64,
    /// Size of the whole container, header and metadata included.
    pub compressed_size: u64,
    pub entropy: f64,
}

impl CompressionReport {
    pub fn new(original_size: u64, compressed_size: u64, entropy: f64) -> Self {
        CompressionReport {
            original_size,
            compressed_size,
            entropy,
        }
    }

    /// `original / compressed`, or `0` for an empty container.
    pub fn compression_ratio(&self) -> f64 {
        if self.compressed_size == 0 {
            return 0.0;
        }
        self.original_size as f64 / self.compressed_size as f64
    }

    /// Percentage of the original size saved. Negative when the container is larger
    /// than the input; `0` for an empty input.
    pub fn space_saved_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (1.0 - self.compressed_size as f64 / self.original_size as f64) * 100.0
    }

    /// Entropy as a percentage of the 8 bits/byte maximum.
    pub fn efficiency_percent(&self) -> f64 {
        efficiency_percent(self.entropy)
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Original size:     {}",
            format_file_size(self.original_size)
        )?;
        writeln!(
            f,
            "Compressed size:   {}",
            format_file_size(self.compressed_size)
        )?;
        writeln!(f, "Compression ratio: {:.2}:1", self.compression_ratio())?;
        writeln!(f, "Space saved:       {:.1}%", self.space_saved_percent())?;
        writeln!(f, "Entropy:           {:.2} bits per byte", self.entropy)?;
        write!(
            f,
            "Efficiency:        {:.1}% of theoretical maximum",
            self.efficiency_percent()
        )
    }
}

/// `entropy / 8` as a percentage, capped at 100.
pub fn efficiency_percent(entropy: f64) -> f64 {
    (entropy / MAX_ENTROPY * 100.0).min(100.0)
}

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Render a byte count with 1024-based units, e.g. `1.5 KB`.
///
/// At most two decimals are shown and trailing zeros are dropped.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}
