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

//! The allocation limit is process-wide and write-once, so it gets its own test binary.

use fdc::{Codec, Decoder, Encoder, error::Details, util};
use pretty_assertions::assert_eq;

type TestResult = anyhow::Result<()>;

const LIMIT: usize = 64 * 1024;

#[test]
fn decompression_stops_at_the_configured_limit() -> TestResult {
    assert_eq!(util::max_allocation_bytes(LIMIT), LIMIT);
    // later calls cannot change it
    assert_eq!(util::max_allocation_bytes(1), LIMIT);

    let within = vec![b'a'; LIMIT / 2];
    let encoded = Encoder::default().encode("ok", &within)?;
    let decoded = Decoder::default().decode(&encoded.container)?;
    assert_eq!(decoded.data, within);

    // a tiny container that inflates past the limit
    let zeros = vec![0u8; LIMIT + 1];
    let bomb = Encoder::default().encode("bomb", &zeros)?;
    assert!(bomb.container.len() < 1024);
    let err = Decoder::default().decode(&bomb.container).unwrap_err();
    match err.into_details() {
        Details::MemoryAllocation { maximum, .. } => assert_eq!(maximum, LIMIT),
        other => panic!("Expected Details::MemoryAllocation, got {other:?}"),
    }

    let plain = Encoder::builder()
        .codec(Codec::Null)
        .build()
        .encode("plain", &vec![1u8; LIMIT + 1])?
        .container;
    let decoder = Decoder::builder().codec(Codec::Null).build();
    let err = decoder.decode(&plain).unwrap_err();
    assert!(matches!(err.details(), Details::MemoryAllocation { .. }));
    Ok(())
}
