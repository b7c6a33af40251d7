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

use std::{error::Error as _, fmt};

/// Errors encountered while building or reading a container.
///
/// To inspect the details of the error use [`details`](Self::details) or [`into_details`](Self::into_details)
/// to get a [`Details`] which contains more precise error information.
///
/// See [`Details`] for all possible errors.
#[derive(thiserror::Error, Debug)]
#[repr(transparent)]
#[error(transparent)]
pub struct Error {
    details: Box<Details>,
}

impl Error {
    pub fn new(details: Details) -> Self {
        Self {
            details: Box::new(details),
        }
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    pub fn into_details(self) -> Details {
        *self.details
    }

    /// Wrap a failure reported by a [`CompressionCodec`](crate::CompressionCodec) implementation
    /// while compressing.
    pub fn compress<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self::new(Details::Compress(err.into()))
    }

    /// Wrap a failure reported by a [`CompressionCodec`](crate::CompressionCodec) implementation
    /// while decompressing.
    pub fn corrupt_stream(err: std::io::Error) -> Self {
        Self::new(Details::CorruptStream(err))
    }

    /// The container is shorter than its length header implies.
    pub fn is_truncated(&self) -> bool {
        matches!(*self.details, Details::TruncatedContainer { .. })
    }

    /// The metadata block could not be decoded into a [`Metadata`](crate::Metadata).
    pub fn is_invalid_metadata(&self) -> bool {
        matches!(
            *self.details,
            Details::MetadataUtf8(_) | Details::MetadataJson(_) | Details::MetadataEntropyRange(_)
        )
    }

    /// The compressed payload was rejected by the codec.
    pub fn is_corrupt_stream(&self) -> bool {
        matches!(*self.details, Details::CorruptStream(_))
    }
}

impl From<Details> for Error {
    fn from(details: Details) -> Self {
        Self::new(details)
    }
}

#[derive(thiserror::Error)]
pub enum Details {
    #[error("Container is truncated: need at least {required} bytes, got {actual}")]
    TruncatedContainer { required: usize, actual: usize },

    #[error("Container metadata is not valid utf-8")]
    MetadataUtf8(#[source] std::str::Utf8Error),

    #[error("Container metadata is not a valid metadata record")]
    MetadataJson(#[source] serde_json::Error),

    #[error("Container metadata entropy {0} is outside of [0, 8] bits per byte")]
    MetadataEntropyRange(f64),

    #[error("Serialized metadata is {0} bytes, which does not fit a 32-bit length header")]
    MetadataTooLarge(usize),

    #[error("Failed to serialize metadata")]
    SerializeMetadata(#[source] serde_json::Error),

    #[error("Failed to compress payload")]
    Compress(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("Failed to decompress payload")]
    CorruptStream(#[source] std::io::Error),

    #[error("Unable to allocate {desired} bytes (maximum allowed: {maximum})")]
    MemoryAllocation { desired: usize, maximum: usize },
}

impl fmt::Debug for Details {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut msg = self.to_string();
        if let Some(e) = self.source() {
            msg.extend([": ", &e.to_string()]);
        }
        write!(f, "{msg}")
    }
}
