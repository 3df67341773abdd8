use serde::Serialize;
use serde::ser::SerializeMap;

/// A single reported metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    /// a whole number, reported as is
    Integer(i64),
    /// a real number
    Decimal(f64),
    /// the metrics file for this value was not produced. Serialises as `-1`
    NotApplicable,
    /// the metrics document is missing, or exists without this value. Serialises as `null`
    Unavailable,
}

impl MetricValue {
    /// read a csv cell, preferring an integer reading when one exists
    pub fn parse_cell(cell: &str) -> Option<Self> {
        let cell = cell.trim();
        if let Ok(i) = cell.parse::<i64>() {
            return Some(Self::Integer(i));
        }
        cell.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Self::Decimal)
    }

    /// read a json number, `None` for anything else
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Decimal)),
            _ => None,
        }
    }

    /// round decimals to `places` decimal places, leaving every other variant alone
    pub fn rounded(self, places: i32) -> Self {
        match self {
            Self::Decimal(f) => Self::Decimal(round_to(f, places)),
            other => other,
        }
    }

    /// divide by `divisor`, turning integers into decimals
    pub fn divided_by(self, divisor: f64) -> Self {
        match self {
            Self::Integer(i) => Self::Decimal(i as f64 / divisor),
            Self::Decimal(f) => Self::Decimal(f / divisor),
            other => other,
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Decimal(f) => serializer.serialize_f64(*f),
            Self::NotApplicable => serializer.serialize_i64(-1),
            Self::Unavailable => serializer.serialize_none(),
        }
    }
}

/// round half away from zero to `places` decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Metric name to value, serialised as a json object in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricTags(Vec<(String, MetricValue)>);

impl MetricTags {
    /// append a metric, replacing any earlier value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: MetricValue) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((name, value)),
        }
    }

    /// look a metric up by name
    pub fn get(&self, name: &str) -> Option<MetricValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    /// the metric names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    /// number of metrics
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// true when there are no metrics
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, MetricValue)> for MetricTags {
    fn from_iter<I: IntoIterator<Item = (String, MetricValue)>>(iter: I) -> Self {
        let mut tags = Self::default();
        for (name, value) in iter {
            tags.insert(name, value);
        }
        tags
    }
}

impl Serialize for MetricTags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Aggregate qc over a set of fastqs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QcSummary {
    /// total coverage across the fastqs, 2dp
    pub coverage_sum: MetricValue,
    /// mean duplication fraction, 2dp
    pub dup_frac_avg: MetricValue,
    /// mean insert size, 2dp
    pub insert_size_avg: MetricValue,
}
