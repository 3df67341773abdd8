use crate::domain::{
    models::{DomainErr, MetricTags, MetricValue, as_directory},
    ports::ObjectStore,
};

use super::casing::snake_to_camel;

mod tables;

use tables::{CsvMetric, JSON_METRICS, TUMOR_CSV_METRICS, coverage_metric, extract};

/// Which variant calling output to summarise
#[derive(Debug, Clone, PartialEq)]
pub struct PostAnalysisRequest {
    /// the sample the metrics files are named after
    pub sample_name: String,
    /// the directory dragen wrote its metrics files to
    pub output_uri: String,
    /// whether this was the tumor half of a somatic run
    pub is_tumor: bool,
}

/// Reads dragen metrics files and reduces them to run tags
#[derive(Debug, Clone)]
pub struct MetricsService<O> {
    store: O,
}

impl<O> MetricsService<O>
where
    O: ObjectStore,
    anyhow::Error: From<O::Err>,
{
    /// create a new instance of self
    pub fn new(store: O) -> Self {
        Self { store }
    }

    /// Collect the headline metrics of a variant calling run.
    ///
    /// Tumor runs report hrd, tmb, sv and cnv metrics on top of coverage and
    /// the json metrics, and every name is prefixed with `tumor`. Missing csv
    /// files report `-1`, a missing json document reports `null`.
    #[tracing::instrument(err, skip(self))]
    pub async fn post_analysis_tags(
        &self,
        request: &PostAnalysisRequest,
    ) -> Result<MetricTags, DomainErr> {
        if request.sample_name.is_empty() {
            return Err(DomainErr::MissingInput("variantCallingSampleName"));
        }
        if request.output_uri.is_empty() {
            return Err(DomainErr::MissingInput("variantCallingOutputUri"));
        }

        let dir = as_directory(&request.output_uri);
        let sample = request.sample_name.as_str();
        let mut metrics: Vec<(&'static str, MetricValue)> = Vec::new();

        if request.is_tumor {
            for metric in &TUMOR_CSV_METRICS {
                metrics.push((metric.name, self.csv_metric(&dir, sample, metric).await?));
            }
        }

        let coverage = coverage_metric(request.is_tumor);
        metrics.push((coverage.name, self.csv_metric(&dir, sample, &coverage).await?));

        let file = format!("{sample}.metrics.json");
        let document = self.fetch(&dir, &file).await?;
        let document = document
            .map(|bytes| serde_json::from_slice::<serde_json::Value>(&bytes))
            .transpose()
            .map_err(|e| DomainErr::MalformedMetric {
                file: file.clone(),
                detail: e.to_string(),
            })?;

        for metric in &JSON_METRICS {
            let value = match &document {
                Some(document) => metric.read(document, sample, &file)?,
                None => MetricValue::Unavailable,
            };
            metrics.push((metric.name, value));
        }

        let prefix = if request.is_tumor { "tumor_" } else { "" };
        Ok(metrics
            .into_iter()
            .map(|(name, value)| (snake_to_camel(&format!("{prefix}{name}")), value))
            .collect())
    }

    async fn fetch(&self, dir: &str, file: &str) -> Result<Option<Vec<u8>>, DomainErr> {
        let uri = format!("{dir}{file}");
        let content = self
            .store
            .fetch(&uri)
            .await
            .map_err(anyhow::Error::from)?;
        if content.is_none() {
            tracing::info!(uri = %uri, "metrics file not found");
        }
        Ok(content)
    }

    async fn csv_metric(
        &self,
        dir: &str,
        sample: &str,
        metric: &CsvMetric,
    ) -> Result<MetricValue, DomainErr> {
        let file = format!("{sample}.{}", metric.file_suffix);
        let Some(content) = self.fetch(dir, &file).await? else {
            return Ok(MetricValue::NotApplicable);
        };

        let value = match extract(&content, metric, sample, &file)? {
            Some(value) => value,
            None => return Ok(MetricValue::NotApplicable),
        };
        Ok(match metric.places {
            Some(places) => value.rounded(places),
            None => value,
        })
    }
}

#[cfg(test)]
mod tests;
