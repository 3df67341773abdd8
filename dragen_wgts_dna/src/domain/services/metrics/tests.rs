use std::collections::HashMap;
use std::sync::Arc;

use cool_asserts::assert_matches;
use serde_json::json;

use crate::domain::ports::MockObjectStore;

use super::*;

const OUT: &str = "s3://bucket/analysis/dragen-wgts-dna/20250101abcdef01/";

/// an object store holding `files` under [OUT]
fn store(files: &[(&str, &str)]) -> MockObjectStore {
    let files: Arc<HashMap<String, Vec<u8>>> = Arc::new(
        files
            .iter()
            .map(|(name, body)| (format!("{OUT}{name}"), body.as_bytes().to_vec()))
            .collect(),
    );

    let mut store = MockObjectStore::new();
    store.expect_fetch().returning(move |uri| {
        let content = files.get(&uri.to_string()).cloned();
        Box::pin(async move { Ok(content) })
    });
    store
}

fn request(sample: &str, is_tumor: bool) -> PostAnalysisRequest {
    PostAnalysisRequest {
        sample_name: sample.to_string(),
        output_uri: OUT.to_string(),
        is_tumor,
    }
}

fn metrics_json(sample: &str) -> String {
    json!({
        "modules": {
            "mapAlign": {
                "globalMetrics": {
                    "estimatedSampleContamination": {"value": 0.001234567},
                    "duplicateMarkedReads": {"value": 12345678, "percentage": 12.3456}
                }
            },
            "variantCaller": {
                "postFilter": {
                    sample: {
                        "totalVariants": {"value": 5012345},
                        "tiTvRatio": {"value": 2.012345}
                    }
                }
            }
        }
    })
    .to_string()
}

#[tokio::test]
async fn it_reports_germline_metrics() {
    let store = store(&[
        (
            "L2301197.wgs_coverage_metrics.csv",
            "COVERAGE SUMMARY,,Aligned bases,1000\n\
             COVERAGE SUMMARY,,Average autosomal coverage over genome,82.16\n",
        ),
        ("L2301197.metrics.json", &metrics_json("L2301197")),
    ]);

    let tags = MetricsService::new(store)
        .post_analysis_tags(&request("L2301197", false))
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&tags).unwrap(),
        json!({
            "avgAutosomalCoverageOverGenome": 82.16,
            "contaminationRate": 0.0012,
            "duplicationFrac": 0.1235,
            "totalPostFilterVariants": 5012345,
            "tiTvRatio": 2.0123
        })
    );
}

#[tokio::test]
async fn it_reports_tumor_metrics_with_a_prefix() {
    let store = store(&[
        (
            "L2301198.hrdscore.csv",
            "Sample,LOH_Score,TAI_Score,LST_Score,HRD_Score\n\
             L2301197,1,2,3,6\n\
             L2301198,10,12,20,42\n",
        ),
        ("L2301198.tmb.metrics.csv", "TMB SUMMARY,,TMB,3.52\n"),
        (
            "L2301198.sv_metrics.csv",
            "SV SUMMARY,,Total number of structural variants (PASS),1234,100.00\n",
        ),
        (
            "L2301198.cnv_metrics.csv",
            "CNV SUMMARY,,Estimated tumor purity,0.604999\n\
             CNV SUMMARY,,Overall ploidy,2.1\n",
        ),
        (
            "L2301198.wgs_coverage_metrics_tumor.csv",
            "COVERAGE SUMMARY,,Average autosomal coverage over genome,101.23456\n",
        ),
    ]);

    let tags = MetricsService::new(store)
        .post_analysis_tags(&request("L2301198", true))
        .await
        .unwrap();

    assert_eq!(
        tags.names().collect::<Vec<_>>(),
        vec![
            "tumorHrdScore",
            "tumorTmbScore",
            "tumorSvPassCount",
            "tumorCnvEstimatedTumorPurity",
            "tumorCnvOverallPloidy",
            "tumorAvgAutosomalCoverageOverGenome",
            "tumorContaminationRate",
            "tumorDuplicationFrac",
            "tumorTotalPostFilterVariants",
            "tumorTiTvRatio",
        ]
    );
    assert_eq!(tags.get("tumorHrdScore"), Some(MetricValue::Integer(42)));
    assert_eq!(tags.get("tumorTmbScore"), Some(MetricValue::Decimal(3.52)));
    assert_eq!(tags.get("tumorSvPassCount"), Some(MetricValue::Integer(1234)));
    assert_eq!(
        tags.get("tumorCnvEstimatedTumorPurity"),
        Some(MetricValue::Decimal(0.605))
    );
    assert_eq!(
        tags.get("tumorAvgAutosomalCoverageOverGenome"),
        Some(MetricValue::Decimal(101.2346))
    );
    assert_eq!(tags.get("tumorTiTvRatio"), Some(MetricValue::Unavailable));
}

#[tokio::test]
async fn it_reports_missing_files_as_not_applicable() {
    let tags = MetricsService::new(store(&[]))
        .post_analysis_tags(&request("L2301198", true))
        .await
        .unwrap();

    let json = serde_json::to_value(&tags).unwrap();
    assert_eq!(json["tumorHrdScore"], json!(-1));
    assert_eq!(json["tumorAvgAutosomalCoverageOverGenome"], json!(-1));
    assert_eq!(json["tumorContaminationRate"], json!(null));
    assert_eq!(tags.get("tumorDuplicationFrac"), Some(MetricValue::Unavailable));
    assert_eq!(tags.len(), 10);
}

#[tokio::test]
async fn it_treats_empty_csvs_as_absent() {
    let store = store(&[("L1.wgs_coverage_metrics.csv", "")]);

    let tags = MetricsService::new(store)
        .post_analysis_tags(&request("L1", false))
        .await
        .unwrap();

    assert_eq!(
        tags.get("avgAutosomalCoverageOverGenome"),
        Some(MetricValue::NotApplicable)
    );
}

#[tokio::test]
async fn it_reports_missing_variant_totals_as_unavailable() {
    let document = json!({
        "modules": {
            "mapAlign": {"globalMetrics": {
                "estimatedSampleContamination": {"value": 0.0},
                "duplicateMarkedReads": {"percentage": 10}
            }},
            "variantCaller": {"postFilter": {"L1": {"tiTvRatio": {"value": 2}}}}
        }
    })
    .to_string();
    let store = store(&[("L1.metrics.json", &document)]);

    let tags = MetricsService::new(store)
        .post_analysis_tags(&request("L1", false))
        .await
        .unwrap();

    assert_eq!(tags.get("totalPostFilterVariants"), Some(MetricValue::Unavailable));
    assert_eq!(tags.get("duplicationFrac"), Some(MetricValue::Decimal(0.1)));
    assert_eq!(tags.get("tiTvRatio"), Some(MetricValue::Integer(2)));
}

#[tokio::test]
async fn it_fails_on_missing_required_json_metrics() {
    let store = store(&[("L1.metrics.json", r#"{"modules": {}}"#)]);

    let err = MetricsService::new(store)
        .post_analysis_tags(&request("L1", false))
        .await
        .unwrap_err();

    assert_matches!(err, DomainErr::MalformedMetric { file, .. } => {
        assert_eq!(file, "L1.metrics.json");
    });
}

#[tokio::test]
async fn it_fails_on_repeated_metric_rows() {
    let store = store(&[(
        "L1.wgs_coverage_metrics.csv",
        "COVERAGE SUMMARY,,Average autosomal coverage over genome,82.16\n\
         COVERAGE SUMMARY,,Average autosomal coverage over genome,80.00\n",
    )]);

    let err = MetricsService::new(store)
        .post_analysis_tags(&request("L1", false))
        .await
        .unwrap_err();

    assert_matches!(err, DomainErr::AmbiguousMetric { matches: 2, .. });
}

#[tokio::test]
async fn it_fails_when_the_sample_has_no_hrd_row() {
    let store = store(&[(
        "L2.hrdscore.csv",
        "Sample,LOH_Score,TAI_Score,LST_Score,HRD_Score\nL1,1,2,3,6\n",
    )]);

    let err = MetricsService::new(store)
        .post_analysis_tags(&request("L2", true))
        .await
        .unwrap_err();

    assert_matches!(err, DomainErr::AmbiguousMetric { metric, matches: 0, .. } => {
        assert_eq!(metric, "L2");
    });
}

#[tokio::test]
async fn it_requires_a_sample_name() {
    let err = MetricsService::new(MockObjectStore::new())
        .post_analysis_tags(&request("", false))
        .await
        .unwrap_err();

    assert_matches!(err, DomainErr::MissingInput("variantCallingSampleName"));
}

#[tokio::test]
async fn it_appends_a_slash_to_the_output_directory() {
    let mut store = MockObjectStore::new();
    store
        .expect_fetch()
        .withf(|uri| uri.starts_with("s3://bucket/out/L1."))
        .returning(|_| Box::pin(async move { Ok(None) }));

    let tags = MetricsService::new(store)
        .post_analysis_tags(&PostAnalysisRequest {
            sample_name: "L1".to_string(),
            output_uri: "s3://bucket/out".to_string(),
            is_tumor: false,
        })
        .await
        .unwrap();

    assert_eq!(tags.len(), 5);
}
