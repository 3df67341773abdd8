use super::*;
use cool_asserts::assert_matches;
use dragen_wgts_dna::domain::{
    models::{FastqRecord, Rgid},
    ports::MockFastqRegistry,
};
use lambda_runtime::Context;
use serde_json::{Map, json};

fn event(payload: serde_json::Value) -> LambdaEvent<Event> {
    LambdaEvent::new(serde_json::from_value(payload).unwrap(), Context::default())
}

fn registry() -> MockFastqRegistry {
    let mut registry = MockFastqRegistry::new();
    registry
        .expect_get_fastqs_in_instrument_run()
        .returning(|_| {
            Box::pin(async move {
                Ok(vec![FastqRecord {
                    id: "fqr.a".to_string(),
                    fastq_set_id: None,
                    rgid: Rgid::from_parts("GAATTCGT", 1, "run1"),
                    qc: None,
                }])
            })
        });
    registry
}

#[tokio::test]
async fn it_passes_the_override_prefix_through() {
    let mut registry = registry();
    registry
        .expect_to_fastq_list_row()
        .withf(|_, location| {
            location
                .as_ref()
                .is_some_and(|uri| uri.bucket() == "cache" && uri.key() == "ora-decompression/")
        })
        .times(1)
        .returning(|_, _| {
            Box::pin(async move {
                Ok(FastqListRow {
                    rgid: "GAATTCGT.1.run1".to_string(),
                    rglb: "L2301197".to_string(),
                    rgsm: "L2301197".to_string(),
                    lane: 1,
                    read1_file_uri: Some("s3://cache/ora-decompression/R1.fastq.gz".to_string()),
                    read2_file_uri: None,
                    extra: Map::new(),
                })
            })
        });

    let response = handler(
        &FastqService::new(registry),
        event(json!({
            "fastqRgidList": ["GAATTCGT.1.run1"],
            "fastqListRowUriOverride": "s3://cache/ora-decompression/"
        })),
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::to_value(response).unwrap(),
        json!({"fastqListRows": [{
            "rgid": "GAATTCGT.1.run1",
            "rglb": "L2301197",
            "rgsm": "L2301197",
            "lane": 1,
            "read1FileUri": "s3://cache/ora-decompression/R1.fastq.gz"
        }]})
    );
}

#[tokio::test]
async fn it_rejects_an_override_that_is_not_an_s3_uri() {
    let err = handler(
        &FastqService::new(MockFastqRegistry::new()),
        event(json!({
            "fastqRgidList": ["GAATTCGT.1.run1"],
            "fastqListRowUriOverride": "/local/path/"
        })),
    )
    .await
    .unwrap_err();

    assert_matches!(err.downcast_ref::<DomainErr>(), Some(DomainErr::InvalidS3Uri(_)));
}
