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

//! The metadata record stored at the front of every container.
use crate::{FdcResult, entropy::MAX_ENTROPY, error::Details};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Description of the original file, written once when a container is built.
///
/// On the wire this is a compact JSON object with the keys `originalSize`,
/// `originalName`, `entropy` and `timestamp`, in that order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    original_size: u64,
    original_name: String,
    entropy: f64,
    timestamp: u64,
}

/// Wire form accepted when reading; tolerates keys written by other producers.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMetadata {
    original_size: u64,
    original_name: String,
    entropy: f64,
    timestamp: u64,
    #[serde(flatten)]
    unknown: BTreeMap<String, serde_json::Value>,
}

impl Metadata {
    /// Create the metadata for an original file.
    ///
    /// Fails if `entropy` is not a finite value within `[0, 8]` bits per byte.
    pub fn new(
        original_size: u64,
        original_name: impl Into<String>,
        entropy: f64,
        timestamp: u64,
    ) -> FdcResult<Self> {
        check_entropy(entropy)?;
        Ok(Metadata {
            original_size,
            original_name: original_name.into(),
            entropy,
            timestamp,
        })
    }

    /// Byte length of the uncompressed input.
    pub fn original_size(&self) -> u64 {
        self.original_size
    }

    /// File name of the original input. May be empty.
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Shannon entropy of the original input, in bits per byte.
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Creation instant in milliseconds since the UNIX epoch.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Serialize into the compact JSON text stored in a container.
    pub fn to_json(&self) -> FdcResult<String> {
        serde_json::to_string(self).map_err(|e| Details::SerializeMetadata(e).into())
    }

    /// Parse the metadata block of a container.
    pub fn from_json_bytes(bytes: &[u8]) -> FdcResult<Self> {
        let text = std::str::from_utf8(bytes).map_err(Details::MetadataUtf8)?;
        let raw: RawMetadata = serde_json::from_str(text).map_err(Details::MetadataJson)?;
        for key in raw.unknown.keys() {
            warn!("Ignoring unknown metadata key: {key}");
        }
        Metadata::new(
            raw.original_size,
            raw.original_name,
            raw.entropy,
            raw.timestamp,
        )
    }
}

fn check_entropy(entropy: f64) -> FdcResult<()> {
    if (0.0..=MAX_ENTROPY).contains(&entropy) {
        Ok(())
    } else {
        Err(Details::MetadataEntropyRange(entropy).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    type TestResult = anyhow::Result<()>;

    #[test]
    fn serializes_keys_in_wire_order() -> TestResult {
        let metadata = Metadata::new(4, "zeros.bin", 0.0, 1_700_000_000_000)?;
        assert_eq!(
            metadata.to_json()?,
            r#"{"originalSize":4,"originalName":"zeros.bin","entropy":0.0,"timestamp":1700000000000}"#
        );
        Ok(())
    }

    #[test]
    fn parses_what_it_writes() -> TestResult {
        let metadata = Metadata::new(1234, "résumé (final).pdf", 7.25, 42)?;
        let parsed = Metadata::from_json_bytes(metadata.to_json()?.as_bytes())?;
        assert_eq!(parsed, metadata);
        Ok(())
    }

    #[test]
    fn accepts_integral_entropy_and_any_key_order() -> TestResult {
        let json = br#"{"timestamp":1,"entropy":8,"originalName":"","originalSize":256}"#;
        let metadata = Metadata::from_json_bytes(json)?;
        assert_eq!(metadata.entropy(), 8.0);
        assert_eq!(metadata.original_size(), 256);
        assert_eq!(metadata.original_name(), "");
        assert_eq!(metadata.timestamp(), 1);
        Ok(())
    }

    #[test]
    fn ignores_unknown_keys() -> TestResult {
        let json = br#"{"originalSize":1,"originalName":"a","entropy":0,"timestamp":2,"tag":1}"#;
        let metadata = Metadata::from_json_bytes(json)?;
        assert_eq!(metadata, Metadata::new(1, "a", 0.0, 2)?);
        Ok(())
    }

    #[rstest]
    #[case::not_json(&b"not json"[..])]
    #[case::not_an_object(&b"[1,2,3]"[..])]
    #[case::missing_name(&br#"{"originalSize":1,"entropy":0,"timestamp":2}"#[..])]
    #[case::missing_timestamp(&br#"{"originalSize":1,"originalName":"a","entropy":0}"#[..])]
    #[case::negative_size(&br#"{"originalSize":-1,"originalName":"a","entropy":0,"timestamp":2}"#[..])]
    #[case::fractional_size(&br#"{"originalSize":1.5,"originalName":"a","entropy":0,"timestamp":2}"#[..])]
    #[case::name_not_a_string(&br#"{"originalSize":1,"originalName":7,"entropy":0,"timestamp":2}"#[..])]
    #[case::entropy_too_high(&br#"{"originalSize":1,"originalName":"a","entropy":8.5,"timestamp":2}"#[..])]
    #[case::entropy_negative(&br#"{"originalSize":1,"originalName":"a","entropy":-0.5,"timestamp":2}"#[..])]
    #[case::invalid_utf8(&[b'{', 0xFF, 0xFE, b'}'][..])]
    fn rejects_malformed_records(#[case] json: &[u8]) {
        let err = Metadata::from_json_bytes(json).unwrap_err();
        assert!(err.is_invalid_metadata(), "{err:?}");
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(8.000_001)]
    fn new_rejects_entropy_out_of_range(#[case] entropy: f64) {
        assert!(Metadata::new(0, "", entropy, 0).is_err());
    }
}
