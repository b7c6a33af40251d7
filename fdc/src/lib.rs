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

//! **fdc** turns an arbitrary file into a self-describing compressed container and
//! restores the original bytes from it.
//!
//! A container is a 4 byte little-endian length, followed by that many bytes of JSON
//! [`Metadata`] (original size, original name, Shannon entropy and a timestamp), followed
//! by the compressed payload:
//!
//! ```
//! use fdc::{decode_file, encode_file};
//!
//! let container = encode_file("greeting.txt", b"hello hello hello").unwrap();
//! let decoded = decode_file(&container).unwrap();
//!
//! assert_eq!(decoded.name, "greeting.txt");
//! assert_eq!(decoded.data, b"hello hello hello");
//! assert_eq!(decoded.metadata.original_size(), 17);
//! ```
//!
//! The payload is produced by a [`CompressionCodec`]. By default this is
//! [`Codec::Deflate`], zlib-wrapped DEFLATE. Use [`Encoder`] and [`Decoder`] to pick another
//! codec or to pin the recorded timestamp, and [`container`] to work with the envelope
//! directly.
//!
//! # MSRV
//!
//! The current MSRV is 1.88.0.

mod codec;

pub mod clock;
pub mod container;
pub mod entropy;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod report;
pub mod util;

pub use codec::{Codec, CompressionCodec, DeflateSettings};
pub use container::{ContainerRef, decode_container, encode_container};
pub use entropy::measure_entropy;
pub use error::Error;
pub use metadata::Metadata;
pub use pipeline::{
    DecodedFile, Decoder, EncodedFile, Encoder, container_file_name, decode_file, decode_file_with,
    encode_file, encode_file_with,
};
pub use report::CompressionReport;

/// A convenience type alias for `Result`s with `Error`s.
pub type FdcResult<T> = Result<T, Error>;
