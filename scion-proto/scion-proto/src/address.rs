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

//! SCION ISD and AS identifiers.
//!
//! Text formats:
//! - ISD: decimal, e.g. `1`
//! - AS: decimal for BGP-compatible numbers below 2^32 (e.g. `64512`), otherwise three
//!   colon-separated 16-bit hex groups (e.g. `ff00:0:110`)
//! - ISD-AS: `<isd>-<as>`, e.g. `1-ff00:0:110`

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Errors returned when parsing addresses from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    /// The ISD is not a valid 16-bit decimal number.
    #[error("invalid ISD {0:?}")]
    InvalidIsd(String),
    /// The AS number is malformed or out of range.
    #[error("invalid AS number {0:?}")]
    InvalidAsn(String),
    /// The input is not of the form `<isd>-<as>`.
    #[error("invalid ISD-AS {0:?}, expected <isd>-<as>")]
    InvalidIsdAsn(String),
}

/// Isolation domain identifier.
///
/// 0 is the wildcard ISD.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Isd(pub u16);

impl Isd {
    /// The wildcard ISD.
    pub const WILDCARD: Self = Self(0);

    /// Returns true if this is the wildcard ISD.
    pub fn is_wildcard(&self) -> bool {
        *self == Self::WILDCARD
    }
}

impl From<u16> for Isd {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl FromStr for Isd {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_decimal(s) {
            return Err(AddressParseError::InvalidIsd(s.to_string()));
        }

        u16::from_str(s)
            .map(Isd)
            .map_err(|_| AddressParseError::InvalidIsd(s.to_string()))
    }
}

impl fmt::Display for Isd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Autonomous system number, 48 bits wide.
///
/// 0 is the wildcard AS.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Asn(u64);

impl Asn {
    /// The wildcard AS.
    pub const WILDCARD: Self = Self(0);
    /// Largest representable AS number.
    pub const MAX_VALUE: u64 = (1 << 48) - 1;
    /// AS numbers below this value are BGP compatible and printed in decimal.
    const BGP_ASN_LIMIT: u64 = 1 << 32;

    /// Creates a new AS number. Bits above the 48th are discarded.
    pub const fn new(id: u64) -> Self {
        Self(id & Self::MAX_VALUE)
    }

    /// Returns the AS number as an integer.
    pub const fn to_u64(self) -> u64 {
        self.0
    }

    /// Returns true if this is the wildcard AS.
    pub fn is_wildcard(&self) -> bool {
        *self == Self::WILDCARD
    }
}

impl From<u32> for Asn {
    fn from(value: u32) -> Self {
        Self(value as u64)
    }
}

impl FromStr for Asn {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AddressParseError::InvalidAsn(s.to_string());

        if !s.contains(':') {
            // BGP style, decimal
            if !is_decimal(s) {
                return Err(invalid());
            }
            let value = u64::from_str(s).map_err(|_| invalid())?;
            if value >= Self::BGP_ASN_LIMIT {
                return Err(invalid());
            }
            return Ok(Self(value));
        }

        let mut value = 0u64;
        let mut groups = 0;
        for group in s.split(':') {
            if group.is_empty()
                || group.len() > 4
                || !group.bytes().all(|b| b.is_ascii_hexdigit())
            {
                return Err(invalid());
            }
            let group = u16::from_str_radix(group, 16).map_err(|_| invalid())?;
            value = (value << 16) | group as u64;
            groups += 1;
        }

        if groups != 3 {
            return Err(invalid());
        }

        Ok(Self(value))
    }
}

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < Self::BGP_ASN_LIMIT {
            return write!(f, "{}", self.0);
        }

        write!(
            f,
            "{:x}:{:x}:{:x}",
            (self.0 >> 32) & 0xffff,
            (self.0 >> 16) & 0xffff,
            self.0 & 0xffff
        )
    }
}

/// Combined ISD and AS identifier.
///
/// Packed into 64 bits: the upper 16 bits hold the ISD, the lower 48 bits the AS number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsdAsn(u64);

impl IsdAsn {
    /// The wildcard ISD-AS.
    pub const WILDCARD: Self = Self(0);

    /// Creates a new ISD-AS from its parts.
    pub const fn new(isd: Isd, asn: Asn) -> Self {
        Self(((isd.0 as u64) << 48) | asn.0)
    }

    /// Returns the ISD part.
    pub const fn isd(&self) -> Isd {
        Isd((self.0 >> 48) as u16)
    }

    /// Returns the AS part.
    pub const fn asn(&self) -> Asn {
        Asn(self.0 & Asn::MAX_VALUE)
    }

    /// Returns true if both the ISD and the AS are wildcards.
    pub fn is_wildcard(&self) -> bool {
        self.isd().is_wildcard() && self.asn().is_wildcard()
    }

    /// Returns the packed representation in network byte order.
    pub const fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl From<IsdAsn> for u64 {
    fn from(value: IsdAsn) -> Self {
        value.0
    }
}

impl From<u64> for IsdAsn {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for IsdAsn {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((isd, asn)) = s.split_once('-') else {
            return Err(AddressParseError::InvalidIsdAsn(s.to_string()));
        };

        Ok(Self::new(Isd::from_str(isd)?, Asn::from_str(asn)?))
    }
}

impl fmt::Display for IsdAsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.isd(), self.asn())
    }
}

/// Returns true if `s` is a non-empty string of ASCII digits, without a sign.
fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test_log::test]
    fn should_parse_hex_asn() {
        let asn = Asn::from_str("ff00:0:110").unwrap();
        assert_eq!(asn.to_u64(), 0xff00_0000_0110);
        assert_eq!(asn.to_string(), "ff00:0:110");
    }

    #[test_log::test]
    fn should_parse_bgp_asn_as_decimal() {
        let asn = Asn::from_str("64512").unwrap();
        assert_eq!(asn.to_u64(), 64512);
        assert_eq!(asn.to_string(), "64512");
    }

    #[test_log::test]
    fn should_reject_malformed_asn() {
        for input in [
            "",
            "ff00:0",
            "ff00:0:110:1",
            "ff00::110",
            "fffff:0:1",
            "4294967296",
            "x",
            "+5",
            "+ff:0:1",
            "ff:+0:1",
            "-5",
        ] {
            assert_eq!(
                Asn::from_str(input),
                Err(AddressParseError::InvalidAsn(input.to_string())),
                "input {input:?}"
            );
        }
    }

    #[test_log::test]
    fn should_parse_isd_asn() {
        let ia = IsdAsn::from_str("1-ff00:0:110").unwrap();
        assert_eq!(ia.isd(), Isd(1));
        assert_eq!(ia.asn(), Asn::new(0xff00_0000_0110));
        assert_eq!(ia.to_string(), "1-ff00:0:110");
    }

    #[test_log::test]
    fn should_reject_isd_asn_without_separator() {
        assert_eq!(
            IsdAsn::from_str("1ff00:0:110"),
            Err(AddressParseError::InvalidIsdAsn("1ff00:0:110".to_string()))
        );
        assert_eq!(
            IsdAsn::from_str("x-1"),
            Err(AddressParseError::InvalidIsd("x".to_string()))
        );
    }

    #[test_log::test]
    fn should_reject_signed_isd() {
        for input in ["+1", "-1", ""] {
            assert_eq!(
                Isd::from_str(input),
                Err(AddressParseError::InvalidIsd(input.to_string())),
                "input {input:?}"
            );
        }
        assert_eq!(
            IsdAsn::from_str("+1-ff00:0:110"),
            Err(AddressParseError::InvalidIsd("+1".to_string()))
        );
    }

    #[test_log::test]
    fn should_detect_wildcards() {
        assert!(IsdAsn::from_str("0-0").unwrap().is_wildcard());
        assert!(!IsdAsn::from_str("1-0").unwrap().is_wildcard());
        assert!(Isd::WILDCARD.is_wildcard());
        assert!(!Asn::new(1).is_wildcard());
    }

    #[test]
    fn display_should_parse_back() {
        proptest!(|(isd in any::<u16>(), asn in 0..=Asn::MAX_VALUE)| {
            let ia = IsdAsn::new(Isd(isd), Asn::new(asn));
            prop_assert_eq!(IsdAsn::from_str(&ia.to_string()).unwrap(), ia);
        });
    }
}
