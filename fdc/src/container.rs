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

//! The length-prefixed container envelope.
//!
//! ```text
//! +-----------------------+
//! | meta_len (4 bytes)    |  u32 little-endian
//! +-----------------------+
//! | metadata (meta_len)   |  UTF-8 JSON object
//! +-----------------------+
//! | payload (remainder)   |  compressed bytes, opaque
//! +-----------------------+
//! ```
//!
//! There is no magic number and no trailer: the payload runs to the end of
//! the buffer.
use crate::{FdcResult, Metadata, error::Details};

/// Size of the metadata length header in bytes.
pub const HEADER_LEN: usize = 4;

/// Frame `payload` behind the serialized `metadata`.
///
/// The output is exactly `4 + meta_len + payload.len()` bytes long.
pub fn encode_container(metadata: &Metadata, payload: &[u8]) -> FdcResult<Vec<u8>> {
    let meta = metadata.to_json()?;
    let header = meta_len_header(meta.len())?;

    let mut container = Vec::with_capacity(HEADER_LEN + meta.len() + payload.len());
    container.extend_from_slice(&header);
    container.extend_from_slice(meta.as_bytes());
    container.extend_from_slice(payload);
    Ok(container)
}

fn meta_len_header(meta_len: usize) -> FdcResult<[u8; HEADER_LEN]> {
    match u32::try_from(meta_len) {
        Ok(len) => Ok(len.to_le_bytes()),
        Err(_) => Err(Details::MetadataTooLarge(meta_len).into()),
    }
}

/// Split a container into its metadata and an owned copy of its payload.
///
/// # Errors
/// - [`Details::TruncatedContainer`] if the buffer is shorter than its header or than the
///   metadata length it declares
/// - [`Details::MetadataUtf8`], [`Details::MetadataJson`] or [`Details::MetadataEntropyRange`]
///   if the metadata block is not a valid record
pub fn decode_container(container: &[u8]) -> FdcResult<(Metadata, Vec<u8>)> {
    let (metadata, payload) = ContainerRef::parse(container)?.into_parts();
    Ok((metadata, payload.to_vec()))
}

/// A parsed container borrowing its payload from the input buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerRef<'a> {
    metadata: Metadata,
    payload: &'a [u8],
}

impl<'a> ContainerRef<'a> {
    pub fn parse(container: &'a [u8]) -> FdcResult<Self> {
        let Some((header, rest)) = container.split_first_chunk::<HEADER_LEN>() else {
            return Err(Details::TruncatedContainer {
                required: HEADER_LEN,
                actual: container.len(),
            }
            .into());
        };
        let meta_len = u32::from_le_bytes(*header) as usize;
        if rest.len() < meta_len {
            return Err(Details::TruncatedContainer {
                required: HEADER_LEN.saturating_add(meta_len),
                actual: container.len(),
            }
            .into());
        }

        let (meta, payload) = rest.split_at(meta_len);
        let metadata = Metadata::from_json_bytes(meta)?;
        Ok(ContainerRef { metadata, payload })
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    pub fn into_parts(self) -> (Metadata, &'a [u8]) {
        (self.metadata, self.payload)
    }
}
