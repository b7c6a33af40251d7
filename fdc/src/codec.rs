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

//! Compression codecs used for container payloads.

use crate::{FdcResult, error::Details, error::Error, util};
use strum_macros::{EnumString, IntoStaticStr};

/// A lossless byte compressor used to produce and restore container payloads.
///
/// The container never looks inside the payload, so any codec works as long as
/// both ends of a round trip agree on it. [`Codec`] covers the built-in ones;
/// implement this trait to plug in another.
pub trait CompressionCodec {
    /// Compress `raw`. Empty input must produce a valid (possibly non-empty) stream.
    fn compress(&self, raw: &[u8]) -> FdcResult<Vec<u8>>;

    /// Restore the bytes of a stream previously produced by [`compress`](Self::compress).
    ///
    /// Implementations report an invalid stream with [`Error::corrupt_stream`].
    fn decompress(&self, stream: &[u8]) -> FdcResult<Vec<u8>>;
}

impl<C: CompressionCodec + ?Sized> CompressionCodec for &C {
    fn compress(&self, raw: &[u8]) -> FdcResult<Vec<u8>> {
        (**self).compress(raw)
    }

    fn decompress(&self, stream: &[u8]) -> FdcResult<Vec<u8>> {
        (**self).decompress(stream)
    }
}

/// Settings for the `Deflate` codec.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct DeflateSettings {
    level: u8,
}

impl DeflateSettings {
    pub fn new(compression_level: miniz_oxide::deflate::CompressionLevel) -> Self {
        use miniz_oxide::deflate::CompressionLevel::*;
        let level = match compression_level {
            // miniz_oxide spells "default" as -1
            DefaultCompression => DefaultLevel as u8,
            other => other as u8,
        };
        DeflateSettings { level }
    }

    /// Build settings from a numeric level, `0` (store) to `10` (uber compression).
    /// Levels above `10` are clamped.
    pub fn from_level(level: u8) -> Self {
        let max = miniz_oxide::deflate::CompressionLevel::UberCompression as u8;
        DeflateSettings {
            level: level.min(max),
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}

impl Default for DeflateSettings {
    /// Default compression level is `miniz_oxide::deflate::CompressionLevel::DefaultCompression`.
    fn default() -> Self {
        Self::new(miniz_oxide::deflate::CompressionLevel::DefaultCompression)
    }
}

/// The built-in compression codecs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab_case")]
pub enum Codec {
    /// The `Null` codec simply passes through data uncompressed.
    Null,
    /// The `Deflate` codec writes the payload using the deflate algorithm
    /// as specified in RFC 1951, wrapped in the zlib format of RFC 1950
    /// (two byte header, trailing Adler-32 checksum).
    Deflate(DeflateSettings),
}

impl Default for Codec {
    fn default() -> Self {
        Codec::Deflate(DeflateSettings::default())
    }
}

impl CompressionCodec for Codec {
    fn compress(&self, raw: &[u8]) -> FdcResult<Vec<u8>> {
        Ok(match self {
            Codec::Null => raw.to_vec(),
            Codec::Deflate(settings) => {
                miniz_oxide::deflate::compress_to_vec_zlib(raw, settings.level())
            }
        })
    }

    fn decompress(&self, stream: &[u8]) -> FdcResult<Vec<u8>> {
        let limit = util::allocation_limit();
        match self {
            Codec::Null => {
                util::safe_len(stream.len())?;
                Ok(stream.to_vec())
            }
            Codec::Deflate(_settings) => {
                miniz_oxide::inflate::decompress_to_vec_zlib_with_limit(stream, limit)
                    .map_err(|e| inflate_error(e.status, limit))
            }
        }
    }
}

fn inflate_error(status: miniz_oxide::inflate::TINFLStatus, limit: usize) -> Error {
    use miniz_oxide::inflate::TINFLStatus::*;
    use std::io::{Error as IoError, ErrorKind};
    let err = match status {
        // only reachable through the output limit
        HasMoreOutput => {
            return Details::MemoryAllocation {
                desired: limit.saturating_add(1),
                maximum: limit,
            }
            .into();
        }
        FailedCannotMakeProgress | NeedsMoreInput => IoError::from(ErrorKind::UnexpectedEof),
        Adler32Mismatch => IoError::new(ErrorKind::InvalidData, "adler-32 checksum mismatch"),
        Failed => IoError::new(ErrorKind::InvalidData, "invalid zlib stream"),
        BadParam | Done => IoError::other(format!(
            "Unexpected error: miniz_oxide reported {status:?} while inflating"
        )),
    };
    Error::corrupt_stream(err)
}
