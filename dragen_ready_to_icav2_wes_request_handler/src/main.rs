mod handler;

use handler::{Event, handler};

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use orcabus_entrypoint::OrcabusEntrypoint;

#[tokio::main]
async fn main() -> Result<(), Error> {
    OrcabusEntrypoint::for_handler("dragen_ready_to_icav2_wes_request").init();

    let func = service_fn(|event: LambdaEvent<Event>| async move { handler(event) });

    run(func).await
}
