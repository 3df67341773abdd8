use std::fmt::Display;
use std::str::FromStr;

use super::DomainErr;

/// A read group id: `index.lane.instrumentRunId`, parsed from the right
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgid {
    index: String,
    lane: u32,
    instrument_run_id: String,
}

impl Rgid {
    /// assemble an rgid from its parts as the fastq registry reports them
    pub fn from_parts(index: impl Into<String>, lane: u32, instrument_run_id: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            lane,
            instrument_run_id: instrument_run_id.into(),
        }
    }

    /// the sample index
    pub fn index(&self) -> &str {
        &self.index
    }

    /// the flowcell lane
    pub fn lane(&self) -> u32 {
        self.lane
    }

    /// the sequencing run this read group came off
    pub fn instrument_run_id(&self) -> &str {
        &self.instrument_run_id
    }
}

impl FromStr for Rgid {
    type Err = DomainErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainErr::InvalidRgid(s.to_string());

        let (rest, instrument_run_id) = s.rsplit_once('.').ok_or_else(invalid)?;
        let (index, lane) = rest.rsplit_once('.').ok_or_else(invalid)?;
        let lane_number = lane.parse::<u32>().map_err(|_| invalid())?;
        // lookups use the rendered rgid, so only canonical lanes round trip
        if lane_number.to_string() != lane {
            return Err(invalid());
        }

        if index.is_empty() || instrument_run_id.is_empty() {
            return Err(invalid());
        }

        Ok(Self::from_parts(index, lane_number, instrument_run_id))
    }
}

impl Display for Rgid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.index, self.lane, self.instrument_run_id)
    }
}

impl TryFrom<String> for Rgid {
    type Error = DomainErr;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgid> for String {
    fn from(value: Rgid) -> Self {
        value.to_string()
    }
}

impl serde::Serialize for Rgid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Rgid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse every rgid in an event list, failing on the first malformed one
pub fn parse_rgids<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Rgid>, DomainErr> {
    raw.iter().map(|s| s.as_ref().parse()).collect()
}

/// Parse a required rgid list from an event. An empty list is valid, an absent one is not
pub fn required_rgids(raw: Option<Vec<String>>, field: &'static str) -> Result<Vec<Rgid>, DomainErr> {
    parse_rgids(&raw.ok_or(DomainErr::MissingInput(field))?)
}
