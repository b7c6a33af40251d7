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

//! Turning whole files into containers and back.
use crate::{
    FdcResult, Metadata,
    clock::{Clock, FixedClock, SystemClock},
    codec::{Codec, CompressionCodec},
    container::{ContainerRef, encode_container},
    entropy::measure_entropy,
    report::CompressionReport,
};
use log::{debug, warn};

/// File extension appended to the name of a compressed file.
pub const CONTAINER_EXTENSION: &str = "fdc";

/// Name used for a restored file whose container does not record one.
pub const FALLBACK_FILE_NAME: &str = "decompressed-file";

/// Name of the container written for a file called `original_name`.
pub fn container_file_name(original_name: &str) -> String {
    format!("{original_name}.{CONTAINER_EXTENSION}")
}

/// A freshly built container together with what went into it.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedFile {
    pub container: Vec<u8>,
    pub metadata: Metadata,
}

impl EncodedFile {
    pub fn report(&self) -> CompressionReport {
        CompressionReport::new(
            self.metadata.original_size(),
            self.container.len() as u64,
            self.metadata.entropy(),
        )
    }
}

/// The contents of a container after decompression.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedFile {
    pub name: String,
    pub data: Vec<u8>,
    pub metadata: Metadata,
}

impl DecodedFile {
    /// The recorded original name, or [`FALLBACK_FILE_NAME`] if it is empty.
    pub fn file_name(&self) -> &str {
        if self.name.is_empty() {
            FALLBACK_FILE_NAME
        } else {
            &self.name
        }
    }
}

/// Compress `raw` into a container using the given codec and clock.
pub fn encode_file_with<C, K>(
    codec: &C,
    clock: &K,
    name: &str,
    raw: &[u8],
) -> FdcResult<EncodedFile>
where
    C: CompressionCodec + ?Sized,
    K: Clock + ?Sized,
{
    let entropy = measure_entropy(raw);
    let compressed = codec.compress(raw)?;
    debug!(
        "Compressed {name:?}: {} -> {} bytes, entropy {entropy:.4} bits/byte",
        raw.len(),
        compressed.len()
    );
    let metadata = Metadata::new(raw.len() as u64, name, entropy, clock.now_millis())?;
    let container = encode_container(&metadata, &compressed)?;
    Ok(EncodedFile {
        container,
        metadata,
    })
}

/// Restore the original file from a container using the given codec.
pub fn decode_file_with<C>(codec: &C, container: &[u8]) -> FdcResult<DecodedFile>
where
    C: CompressionCodec + ?Sized,
{
    let (metadata, payload) = ContainerRef::parse(container)?.into_parts();
    let data = codec.decompress(payload)?;
    if data.len() as u64 != metadata.original_size() {
        warn!(
            "Container for {:?} records {} bytes but {} were restored",
            metadata.original_name(),
            metadata.original_size(),
            data.len()
        );
    }
    debug!(
        "Restored {:?}: {} -> {} bytes",
        metadata.original_name(),
        payload.len(),
        data.len()
    );
    Ok(DecodedFile {
        name: metadata.original_name().to_string(),
        data,
        metadata,
    })
}

/// Compress `raw` into a container with the default codec and the system clock.
pub fn encode_file(name: &str, raw: &[u8]) -> FdcResult<Vec<u8>> {
    Ok(Encoder::default().encode(name, raw)?.container)
}

/// Restore the original name, bytes and metadata of a container built with the default codec.
pub fn decode_file(container: &[u8]) -> FdcResult<DecodedFile> {
    Decoder::default().decode(container)
}

/// Builds containers.
///
/// ```
/// use fdc::{Codec, Encoder};
///
/// let encoder = Encoder::builder().codec(Codec::Null).fixed_timestamp(0).build();
/// let encoded = encoder.encode("notes.txt", b"hello").unwrap();
/// assert_eq!(encoded.metadata.timestamp(), 0);
/// ```
#[derive(bon::Builder, Clone, Copy, Debug, Default, PartialEq)]
pub struct Encoder {
    #[builder(default)]
    codec: Codec,
    /// Timestamp to record instead of reading the system clock.
    fixed_timestamp: Option<u64>,
}

impl Encoder {
    pub fn codec(&self) -> Codec {
        self.codec
    }

    pub fn encode(&self, name: &str, raw: &[u8]) -> FdcResult<EncodedFile> {
        match self.fixed_timestamp {
            Some(timestamp) => encode_file_with(&self.codec, &FixedClock(timestamp), name, raw),
            None => encode_file_with(&self.codec, &SystemClock, name, raw),
        }
    }
}

/// Reads containers. The codec must match the one the container was built with.
#[derive(bon::Builder, Clone, Copy, Debug, Default, PartialEq)]
pub struct Decoder {
    #[builder(default)]
    codec: Codec,
}

impl Decoder {
    pub fn codec(&self) -> Codec {
        self.codec
    }

    pub fn decode(&self, container: &[u8]) -> FdcResult<DecodedFile> {
        decode_file_with(&self.codec, container)
    }
}
