use super::*;
use cool_asserts::assert_matches;
use dragen_wgts_dna::domain::{models::DomainErr, ports::MockProjectStorage};
use lambda_runtime::Context;
use serde_json::json;

fn event(payload: serde_json::Value) -> LambdaEvent<Event> {
    LambdaEvent::new(serde_json::from_value(payload).unwrap(), Context::default())
}

#[tokio::test]
async fn it_returns_the_project_base_uri() {
    let mut storage = MockProjectStorage::new();
    storage
        .expect_s3_prefix_for_project()
        .withf(|id| id.to_string() == "ea19a3f5-ec7c-4940-a474-c31cd91dbad4")
        .returning(|_| {
            Box::pin(async move { Ok("s3://pipeline-cache/byob-icav2/development/".to_string()) })
        });

    let response = handler(
        &ProjectService::new(storage),
        event(json!({"projectId": "ea19a3f5-ec7c-4940-a474-c31cd91dbad4"})),
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::to_value(response).unwrap(),
        json!({"s3Uri": "s3://pipeline-cache/byob-icav2/development/"})
    );
}

#[tokio::test]
async fn it_requires_a_project_id() {
    let err = handler(&ProjectService::new(MockProjectStorage::new()), event(json!({})))
        .await
        .unwrap_err();

    assert_matches!(
        err.downcast_ref::<DomainErr>(),
        Some(DomainErr::MissingInput("projectId"))
    );
}
