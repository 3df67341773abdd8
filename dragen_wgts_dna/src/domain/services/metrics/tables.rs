use crate::domain::models::{DomainErr, MetricValue};

/// How a value is located inside a dragen metrics csv
#[derive(Debug, Clone, Copy)]
pub(super) enum Layout {
    /// A headed table with one row per sample
    Keyed {
        key_column: &'static str,
        value_column: &'static str,
    },
    /// Headerless `section,subsection,metric,value[,percentage]` rows
    Named { metric: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub(super) struct CsvMetric {
    pub name: &'static str,
    pub file_suffix: &'static str,
    pub layout: Layout,
    pub places: Option<i32>,
}

pub(super) const TUMOR_CSV_METRICS: [CsvMetric; 5] = [
    CsvMetric {
        name: "hrd_score",
        file_suffix: "hrdscore.csv",
        layout: Layout::Keyed {
            key_column: "Sample",
            value_column: "HRD_Score",
        },
        places: None,
    },
    CsvMetric {
        name: "tmb_score",
        file_suffix: "tmb.metrics.csv",
        layout: Layout::Named { metric: "TMB" },
        places: None,
    },
    CsvMetric {
        name: "sv_pass_count",
        file_suffix: "sv_metrics.csv",
        layout: Layout::Named {
            metric: "Total number of structural variants (PASS)",
        },
        places: None,
    },
    CsvMetric {
        name: "cnv_estimated_tumor_purity",
        file_suffix: "cnv_metrics.csv",
        layout: Layout::Named {
            metric: "Estimated tumor purity",
        },
        places: Some(4),
    },
    CsvMetric {
        name: "cnv_overall_ploidy",
        file_suffix: "cnv_metrics.csv",
        layout: Layout::Named {
            metric: "Overall ploidy",
        },
        places: Some(4),
    },
];

pub(super) fn coverage_metric(is_tumor: bool) -> CsvMetric {
    CsvMetric {
        name: "avg_autosomal_coverage_over_genome",
        file_suffix: if is_tumor {
            "wgs_coverage_metrics_tumor.csv"
        } else {
            "wgs_coverage_metrics.csv"
        },
        layout: Layout::Named {
            metric: "Average autosomal coverage over genome",
        },
        places: Some(4),
    }
}

/// Pull `metric` for `sample_name` out of a csv. `None` when the file has no data rows.
pub(super) fn extract(
    content: &[u8],
    metric: &CsvMetric,
    sample_name: &str,
    file: &str,
) -> Result<Option<MetricValue>, DomainErr> {
    let malformed = |detail: String| DomainErr::MalformedMetric {
        file: file.to_string(),
        detail,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(matches!(metric.layout, Layout::Keyed { .. }))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content);

    let (key_idx, value_idx, wanted) = match metric.layout {
        Layout::Keyed {
            key_column,
            value_column,
        } => {
            let headers = reader.headers().map_err(|e| malformed(e.to_string()))?;
            let position = |column: &str| {
                headers
                    .iter()
                    .position(|h| h == column)
                    .ok_or_else(|| malformed(format!("no {column} column")))
            };
            (position(key_column)?, position(value_column)?, sample_name)
        }
        Layout::Named { metric } => (2, 3, metric),
    };

    let mut rows = 0;
    let mut matches = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| malformed(e.to_string()))?;
        rows += 1;
        if record.get(key_idx) == Some(wanted) {
            matches.push(record.get(value_idx).unwrap_or_default().to_string());
        }
    }

    if rows == 0 {
        return Ok(None);
    }

    match matches.as_slice() {
        [cell] => MetricValue::parse_cell(cell)
            .map(Some)
            .ok_or_else(|| malformed(format!("{wanted:?} has non numeric value {cell:?}"))),
        _ => Err(DomainErr::AmbiguousMetric {
            file: file.to_string(),
            metric: wanted.to_string(),
            matches: matches.len(),
        }),
    }
}

/// A value inside the consolidated `{sample}.metrics.json`
#[derive(Debug, Clone, Copy)]
pub(super) struct JsonMetric {
    pub name: &'static str,
    /// object keys to follow; [SAMPLE] stands in for the sample name
    pub path: &'static [&'static str],
    pub divisor: Option<f64>,
    pub places: Option<i32>,
    /// whether a missing value is reported as unavailable rather than failing
    pub optional: bool,
}

pub(super) const SAMPLE: &str = "{sample}";

pub(super) const JSON_METRICS: [JsonMetric; 4] = [
    JsonMetric {
        name: "contamination_rate",
        path: &[
            "modules",
            "mapAlign",
            "globalMetrics",
            "estimatedSampleContamination",
            "value",
        ],
        divisor: None,
        places: Some(4),
        optional: false,
    },
    JsonMetric {
        name: "duplication_frac",
        path: &[
            "modules",
            "mapAlign",
            "globalMetrics",
            "duplicateMarkedReads",
            "percentage",
        ],
        divisor: Some(100.0),
        places: Some(4),
        optional: false,
    },
    JsonMetric {
        name: "total_post_filter_variants",
        path: &[
            "modules",
            "variantCaller",
            "postFilter",
            SAMPLE,
            "totalVariants",
            "value",
        ],
        divisor: None,
        places: None,
        optional: true,
    },
    JsonMetric {
        name: "ti_tv_ratio",
        path: &[
            "modules",
            "variantCaller",
            "postFilter",
            SAMPLE,
            "tiTvRatio",
            "value",
        ],
        divisor: None,
        places: Some(4),
        optional: false,
    },
];

impl JsonMetric {
    pub(super) fn read(
        &self,
        document: &serde_json::Value,
        sample_name: &str,
        file: &str,
    ) -> Result<MetricValue, DomainErr> {
        let found = self.path.iter().try_fold(document, |node, key| {
            let key = if *key == SAMPLE { sample_name } else { *key };
            node.get(key)
        });

        let Some(value) = found.and_then(MetricValue::from_json) else {
            if self.optional {
                return Ok(MetricValue::Unavailable);
            }
            return Err(DomainErr::MalformedMetric {
                file: file.to_string(),
                detail: format!("no numeric value at {}", self.path.join(".")),
            });
        };

        let value = match self.divisor {
            Some(divisor) => value.divided_by(divisor),
            None => value,
        };
        Ok(match self.places {
            Some(places) => value.rounded(places),
            None => value,
        })
    }
}
