//! Location expressions.
//!
//! A location is written `<region>:<start>..<end>:<strand>` with 1-based
//! inclusive coordinates, e.g. `chr1:100..200:-1`. Parsing yields a
//! [`RawLocation`] still in that numbering; [`RawLocation::validate`] turns it
//! into a 0-based half-open [`GenomicLocation`].

use crate::types::{GenomicLocation, Strand};
use crate::{Error, Result};
use std::str::FromStr;

/// Default cap on the length of a single query, in bases
pub const DEFAULT_MAX_LENGTH: u64 = 100_000_000;

/// Parsed but unvalidated location, 1-based inclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLocation {
    pub region: String,
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
}

impl FromStr for Strand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1" | "+1" | "+" => Ok(Strand::Forward),
            "-1" | "-" => Ok(Strand::Reverse),
            _ => Err(Error::MalformedLocation(format!("invalid strand: {:?}", s))),
        }
    }
}

impl FromStr for RawLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::MalformedLocation(s.to_string());

        // Region names may themselves contain ':', so split from the right
        let (rest, strand) = s.rsplit_once(':').ok_or_else(malformed)?;
        let (region, range) = rest.rsplit_once(':').ok_or_else(malformed)?;
        let (start, end) = range.split_once("..").ok_or_else(malformed)?;

        if region.is_empty() {
            return Err(malformed());
        }

        Ok(RawLocation {
            region: region.to_string(),
            start: parse_coordinate(start).ok_or_else(malformed)?,
            end: parse_coordinate(end).ok_or_else(malformed)?,
            strand: strand.parse().map_err(|_| malformed())?,
        })
    }
}

fn parse_coordinate(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl RawLocation {
    /// Normalize to 0-based half-open and check the range against `max_length`.
    ///
    /// A start of 0 is clamped rather than rejected, so `chr1:0..10:1` reads
    /// the same bases as `chr1:1..10:1`.
    pub fn validate(self, max_length: u64) -> Result<GenomicLocation> {
        let start = self.start.saturating_sub(1);
        let end = self.end;

        if start > end {
            return Err(Error::InvertedRange { start, end });
        }

        let length = end - start;
        if length > max_length {
            return Err(Error::RangeTooLarge {
                length,
                max: max_length,
            });
        }

        Ok(GenomicLocation {
            region: self.region,
            start,
            end,
            strand: self.strand,
        })
    }
}

/// Parse and validate in one step.
pub fn parse_location(s: &str, max_length: u64) -> Result<GenomicLocation> {
    s.parse::<RawLocation>()?.validate(max_length)
}
