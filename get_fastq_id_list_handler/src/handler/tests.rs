use super::*;
use dragen_wgts_dna::domain::{
    models::{FastqRecord, Rgid},
    ports::MockFastqRegistry,
};
use lambda_runtime::Context;
use serde_json::json;

fn event(payload: serde_json::Value) -> LambdaEvent<Event> {
    LambdaEvent::new(serde_json::from_value(payload).unwrap(), Context::default())
}

#[tokio::test]
async fn it_returns_sorted_unique_ids() {
    let mut registry = MockFastqRegistry::new();
    registry.expect_get_fastq_by_rgid().returning(|rgid| {
        let record = FastqRecord {
            id: format!("fqr.{}", rgid.index()),
            fastq_set_id: None,
            rgid: Rgid::clone(rgid),
            qc: None,
        };
        Box::pin(async move { Ok(record) })
    });

    let response = handler(
        &FastqService::new(registry),
        event(json!({"fastqRgidList": ["b.1.run1", "a.1.run1", "a.1.run1"]})),
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::to_value(response).unwrap(),
        json!({"fastqIdList": ["fqr.a", "fqr.b"]})
    );
}

#[tokio::test]
async fn it_rejects_events_without_rgids() {
    let err = handler(&FastqService::new(MockFastqRegistry::new()), event(json!({})))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "fastqRgidList is a required input");
}
