use super::*;
use dragen_wgts_dna::domain::{
    models::{FastqRecord, Rgid},
    ports::MockFastqRegistry,
};
use lambda_runtime::Context;
use serde_json::json;

fn record(rgid: &str, set: Option<&str>) -> FastqRecord {
    FastqRecord {
        id: format!("fqr.{rgid}"),
        fastq_set_id: set.map(str::to_string),
        rgid: rgid.parse::<Rgid>().unwrap(),
        qc: None,
    }
}

#[tokio::test]
async fn it_lists_each_set_once() {
    let mut registry = MockFastqRegistry::new();
    registry
        .expect_get_fastqs_in_instrument_run()
        .withf(|run| run.to_string() == "250606_A01052_0262_BHFGJWDSXF")
        .times(1)
        .returning(|_| {
            let records = vec![
                record("AAA.1.250606_A01052_0262_BHFGJWDSXF", Some("fqs.1")),
                record("CCC.2.250606_A01052_0262_BHFGJWDSXF", Some("fqs.1")),
                record("GGG.3.250606_A01052_0262_BHFGJWDSXF", Some("fqs.2")),
            ];
            Box::pin(async move { Ok(records) })
        });

    let response = handler(
        &FastqService::new(registry),
        LambdaEvent::new(
            serde_json::from_value(json!({"fastqRgidList": [
                "AAA.1.250606_A01052_0262_BHFGJWDSXF",
                "CCC.2.250606_A01052_0262_BHFGJWDSXF"
            ]}))
            .unwrap(),
            Context::default(),
        ),
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::to_value(response).unwrap(),
        json!({"fastqSetIdList": ["fqs.1"]})
    );
}
