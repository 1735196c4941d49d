// Copyright 2025 Anapaya Systems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Utility for constructing deterministic SCION paths in tests.
//!
//! The [`TestPathBuilder`] defines the exact sequence of hops a path takes, and the path
//! metadata such as expiration and interfaces.
//!
//! #### To create a basic path
//! ```
//! use scion_proto::{address::IsdAsn, path::test_builder::TestPathBuilder};
//!
//! let src = "1-ff00:0:110".parse::<IsdAsn>().unwrap();
//! let dst = "1-ff00:0:120".parse::<IsdAsn>().unwrap();
//!
//! let path = TestPathBuilder::new(src, dst)
//!     .add_hop(0, 1) // Source AS, egress through interface 1
//!     .add_hop(2, 3) // Transit AS
//!     .add_hop(4, 0) // Destination AS, ingress through interface 4
//!     .build();
//!
//! assert_eq!(path.interface_count(), 4);
//! ```
//!
//! #### Paths of a given length
//! ```
//! use scion_proto::{address::IsdAsn, path::test_builder::TestPathBuilder};
//!
//! let src = "1-1".parse::<IsdAsn>().unwrap();
//! let dst = "2-1".parse::<IsdAsn>().unwrap();
//!
//! // Five ASes, distinct from other paths built with a different seed
//! let path = TestPathBuilder::linear(src, dst, 5, 7).build();
//! assert_eq!(path.interface_count(), 8);
//! ```

use std::time::{Duration, SystemTime};

use crate::{
    address::{Asn, IsdAsn},
    path::{Path, PathInterface, PathMetadata},
};

/// A builder for constructing deterministic SCION paths in tests.
///
/// This is intended for tests only, not for constructing production paths.
#[derive(Debug, Clone)]
pub struct TestPathBuilder {
    src: IsdAsn,
    dst: IsdAsn,
    current_asn: u64,
    expiration: SystemTime,
    with_interfaces: bool,
    hops: Vec<TestHop>,
}

#[derive(Debug, Clone, Copy)]
struct TestHop {
    isd_asn: IsdAsn,
    ingress: u16,
    egress: u16,
}

impl TestPathBuilder {
    /// Expiration used if none is set, far enough in the future to never matter.
    pub const DEFAULT_EXPIRATION_SECS: u64 = u32::MAX as u64;
    /// MTU used if none is set.
    pub const DEFAULT_MTU: u16 = 1472;

    /// Creates a new builder for a path from `src` to `dst`.
    pub fn new(src: IsdAsn, dst: IsdAsn) -> Self {
        Self {
            src,
            dst,
            current_asn: src.asn().to_u64(),
            expiration: SystemTime::UNIX_EPOCH
                + Duration::from_secs(Self::DEFAULT_EXPIRATION_SECS),
            with_interfaces: true,
            hops: Vec::new(),
        }
    }

    /// Creates a builder for a path across `as_count` ASes.
    ///
    /// The source AS egresses through interface 1, every transit AS uses interfaces 1 and 2 and
    /// the destination AS ingresses through interface 2. Transit ASNs are derived from `seed` so
    /// paths with at least one transit AS and different seeds have different fingerprints.
    ///
    /// A path across `n >= 2` ASes has `2 * (n - 1)` interfaces. A single AS yields a path without
    /// interfaces.
    pub fn linear(src: IsdAsn, dst: IsdAsn, as_count: u16, seed: u32) -> Self {
        let mut builder = Self::new(src, dst);
        if as_count <= 1 {
            return builder.add_hop(0, 0);
        }

        builder = builder.add_hop(0, 1);
        builder = builder.with_asn(0x1_0000_0000 + ((seed as u64) << 16));
        for _ in 0..as_count - 2 {
            builder = builder.add_hop(2, 1);
        }
        builder.add_hop(2, 0)
    }

    /// Sets the expiration of the path.
    pub fn with_expiration(mut self, expiration: SystemTime) -> Self {
        self.expiration = expiration;
        self
    }

    /// Sets the ASN used for the next hop.
    ///
    /// ASN is automatically incremented when adding a hop.
    ///
    /// The set ASN is ignored on the last hop of the path, which is always the destination.
    pub fn with_asn(mut self, asn: u64) -> Self {
        self.current_asn = asn;
        self
    }

    /// Omits the interface list from the path metadata.
    pub fn without_interfaces(mut self) -> Self {
        self.with_interfaces = false;
        self
    }

    /// Adds a hop with the given ingress and egress interface.
    ///
    /// Interface 0 means the path starts or ends in this AS and is not part of the interface
    /// list.
    pub fn add_hop(mut self, ingress: u16, egress: u16) -> Self {
        self.hops.push(TestHop {
            isd_asn: IsdAsn::new(self.src.isd(), Asn::new(self.current_asn)),
            ingress,
            egress,
        });
        self.current_asn += 1;
        self
    }

    /// Builds the path.
    pub fn build(mut self) -> Path {
        if self.hops.len() > 1
            && let Some(last) = self.hops.last_mut()
        {
            last.isd_asn = self.dst;
        }

        let interfaces = self.with_interfaces.then(|| {
            self.hops
                .iter()
                .flat_map(|hop| {
                    [hop.ingress, hop.egress]
                        .into_iter()
                        .filter(|id| *id != 0)
                        .map(|id| {
                            PathInterface {
                                isd_asn: hop.isd_asn,
                                id,
                            }
                        })
                })
                .collect()
        });

        Path::new(
            self.src,
            self.dst,
            Some(PathMetadata {
                expiration: self.expiration,
                mtu: Self::DEFAULT_MTU,
                interfaces,
            }),
        )
    }
}
