// crates/types/src/mac.rs
//! Canonical MAC address type.
//!
//! Every MAC that enters the system — lease files, neighbor tables,
//! registration requests, ignore lists — is parsed into [`MacAddr`] before
//! being used as a key anywhere. The canonical text form is six lowercase
//! hex byte-pairs joined by `:` (`aa:bb:cc:dd:ee:ff`). Parsing accepts `:`
//! or `-` separators and any hex case; everything else is rejected.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A six-byte hardware address.
///
/// Stored as raw octets, so canonicalization is idempotent by construction:
/// however the input was delimited or cased, `Display` always renders the
/// one canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddr([u8; 6]);

/// Error returned when a string is not a valid MAC address.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid MAC address: {input:?} (expected six hex byte-pairs joined by ':' or '-')")]
pub struct MacParseError {
    pub input: String,
}

impl MacAddr {
    /// Construct from raw octets.
    pub const fn from_octets(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// The raw octets of this address.
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl FromStr for MacAddr {
    type Err = MacParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MacParseError {
            input: s.to_string(),
        };

        let bytes = s.as_bytes();
        // Six 2-digit groups plus five separators.
        if bytes.len() != 17 {
            return Err(err());
        }

        let mut octets = [0u8; 6];
        for (i, octet) in octets.iter_mut().enumerate() {
            let at = i * 3;
            if i > 0 && bytes[at - 1] != b':' && bytes[at - 1] != b'-' {
                return Err(err());
            }
            let hi = hex_value(bytes[at]).ok_or_else(err)?;
            let lo = hex_value(bytes[at + 1]).ok_or_else(err)?;
            *octet = (hi << 4) | lo;
        }

        Ok(Self(octets))
    }
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl Serialize for MacAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MacAddr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MacVisitor;

        impl Visitor<'_> for MacVisitor {
            type Value = MacAddr;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a MAC address string like \"aa:bb:cc:dd:ee:ff\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<MacAddr, E> {
                v.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(MacVisitor)
    }
}
