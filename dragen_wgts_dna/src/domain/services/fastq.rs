use std::collections::{BTreeSet, HashSet};

use crate::domain::{
    models::{
        DomainErr, FastqListRow, FastqRecord, MetricValue, QcSummary, Rgid, S3Uri, round_to,
    },
    ports::FastqRegistry,
};

/// Resolves read group ids against the fastq registry
#[derive(Debug, Clone)]
pub struct FastqService<F> {
    registry: F,
}

impl<F> FastqService<F>
where
    F: FastqRegistry,
    anyhow::Error: From<F::Err>,
{
    /// create a new instance of self
    pub fn new(registry: F) -> Self {
        Self { registry }
    }

    async fn fastq_by_rgid(&self, rgid: &Rgid) -> Result<FastqRecord, DomainErr> {
        Ok(self
            .registry
            .get_fastq_by_rgid(rgid)
            .await
            .map_err(anyhow::Error::from)?)
    }

    /// Fetch the fastqs for `rgids` by listing each distinct instrument run
    /// once and keeping only the records whose rgid was asked for.
    async fn fastqs_by_instrument_run(&self, rgids: &[Rgid]) -> Result<Vec<FastqRecord>, DomainErr> {
        let wanted: HashSet<&Rgid> = rgids.iter().collect();
        let runs: BTreeSet<&str> = rgids.iter().map(Rgid::instrument_run_id).collect();

        let mut fastqs = Vec::new();
        for run in runs {
            let in_run = self
                .registry
                .get_fastqs_in_instrument_run(run)
                .await
                .map_err(anyhow::Error::from)?;
            tracing::debug!(instrument_run_id = run, count = in_run.len(), "listed fastqs");
            fastqs.extend(in_run.into_iter().filter(|f| wanted.contains(&f.rgid)));
        }

        Ok(fastqs)
    }

    /// the distinct fastq ids behind `rgids`, sorted
    #[tracing::instrument(err, skip(self))]
    pub async fn fastq_id_list(&self, rgids: &[Rgid]) -> Result<Vec<String>, DomainErr> {
        let mut ids = BTreeSet::new();
        for rgid in rgids {
            ids.insert(self.fastq_by_rgid(rgid).await?.id);
        }
        Ok(ids.into_iter().collect())
    }

    /// the distinct fastq set ids behind `rgids`, sorted. Fastqs not yet in a set are skipped
    #[tracing::instrument(err, skip(self))]
    pub async fn fastq_set_id_list(&self, rgids: &[Rgid]) -> Result<Vec<String>, DomainErr> {
        let ids: BTreeSet<String> = self
            .fastqs_by_instrument_run(rgids)
            .await?
            .into_iter()
            .filter_map(|f| f.fastq_set_id)
            .collect();
        Ok(ids.into_iter().collect())
    }

    /// the fastq list rows behind `rgids`, optionally relocated under `location_override`
    #[tracing::instrument(err, skip(self))]
    pub async fn fastq_list_rows(
        &self,
        rgids: &[Rgid],
        location_override: Option<S3Uri>,
    ) -> Result<Vec<FastqListRow>, DomainErr> {
        let fastqs = self.fastqs_by_instrument_run(rgids).await?;

        let mut rows = Vec::with_capacity(fastqs.len());
        for fastq in fastqs {
            let row = self
                .registry
                .to_fastq_list_row(&fastq.id, location_override.clone())
                .await
                .map_err(anyhow::Error::from)?;
            rows.push(row);
        }
        Ok(rows)
    }

    /// Sum coverage and average duplication and insert size across the fastqs
    /// behind `rgids`. Every value is `-1` when no fastq matched.
    #[tracing::instrument(err, skip(self))]
    pub async fn qc_summary(&self, rgids: &[Rgid]) -> Result<QcSummary, DomainErr> {
        let fastqs = self.fastqs_by_instrument_run(rgids).await?;
        summarise_qc(&fastqs)
    }

    /// Whether every fastq behind `rgids` comes from one individual.
    ///
    /// `None` when none of the fastqs are in a set yet. A single set is
    /// checked internally, several sets are checked pairwise and must all
    /// relate.
    #[tracing::instrument(err, skip(self))]
    pub async fn check_ntsm_internal(&self, rgids: &[Rgid]) -> Result<Option<bool>, DomainErr> {
        let sets = self.fastq_set_id_list(rgids).await?;

        match sets.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(
                self.registry
                    .validate_ntsm_internal(only)
                    .await
                    .map_err(anyhow::Error::from)?,
            )),
            many => {
                let mut related = true;
                for (i, a) in many.iter().enumerate() {
                    for b in &many[i + 1..] {
                        let pair = self
                            .registry
                            .validate_ntsm_external(a, b)
                            .await
                            .map_err(anyhow::Error::from)?;
                        tracing::debug!(a = %a, b = %b, related = pair, "compared fastq sets");
                        related &= pair;
                    }
                }
                Ok(Some(related))
            }
        }
    }

    /// Whether every normal fastq set relates to every tumor fastq set.
    /// Vacuously true when either side has no sets.
    #[tracing::instrument(err, skip(self))]
    pub async fn check_ntsm_external(
        &self,
        rgids: &[Rgid],
        tumor_rgids: &[Rgid],
    ) -> Result<bool, DomainErr> {
        let normal = self.fastq_set_ids_by_rgid(rgids).await?;
        let tumor = self.fastq_set_ids_by_rgid(tumor_rgids).await?;

        let mut related = true;
        for a in &normal {
            for b in &tumor {
                related &= self
                    .registry
                    .validate_ntsm_external(a, b)
                    .await
                    .map_err(anyhow::Error::from)?;
            }
        }
        Ok(related)
    }

    async fn fastq_set_ids_by_rgid(&self, rgids: &[Rgid]) -> Result<BTreeSet<String>, DomainErr> {
        let mut ids = BTreeSet::new();
        for rgid in rgids {
            if let Some(set) = self.fastq_by_rgid(rgid).await?.fastq_set_id {
                ids.insert(set);
            }
        }
        Ok(ids)
    }
}

#[derive(Debug, Clone, Copy, strum::IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
enum QcEstimate {
    RawWgsCoverageEstimate,
    DuplicationFractionEstimate,
    InsertSizeEstimate,
}

impl QcEstimate {
    fn read(self, fastq: &FastqRecord) -> Result<f64, DomainErr> {
        let qc = fastq.qc.as_ref();
        let value = match self {
            Self::RawWgsCoverageEstimate => qc.and_then(|q| q.raw_wgs_coverage_estimate),
            Self::DuplicationFractionEstimate => qc.and_then(|q| q.duplication_fraction_estimate),
            Self::InsertSizeEstimate => qc.and_then(|q| q.insert_size_estimate),
        };
        value.ok_or_else(|| DomainErr::MissingQcEstimate {
            fastq_id: fastq.id.clone(),
            field: self.into(),
        })
    }
}

fn summarise_qc(fastqs: &[FastqRecord]) -> Result<QcSummary, DomainErr> {
    if fastqs.is_empty() {
        return Ok(QcSummary {
            coverage_sum: MetricValue::NotApplicable,
            dup_frac_avg: MetricValue::NotApplicable,
            insert_size_avg: MetricValue::NotApplicable,
        });
    }

    let mut coverage = 0.0;
    let mut duplication = 0.0;
    let mut insert_size = 0.0;
    for fastq in fastqs {
        coverage += QcEstimate::RawWgsCoverageEstimate.read(fastq)?;
        duplication += QcEstimate::DuplicationFractionEstimate.read(fastq)?;
        insert_size += QcEstimate::InsertSizeEstimate.read(fastq)?;
    }

    let n = fastqs.len() as f64;
    Ok(QcSummary {
        coverage_sum: MetricValue::Decimal(round_to(coverage, 2)),
        dup_frac_avg: MetricValue::Decimal(round_to(duplication / n, 2)),
        insert_size_avg: MetricValue::Decimal(round_to(insert_size / n, 2)),
    })
}
