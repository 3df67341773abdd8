//! The analysis platform's project api as [ProjectStorage]

use icav2_client::{Icav2Client, Icav2Err};

use crate::domain::ports::ProjectStorage;

impl ProjectStorage for Icav2Client {
    type Err = Icav2Err;

    async fn s3_prefix_for_project(&self, project_id: &str) -> Result<String, Self::Err> {
        self.get_s3_key_prefix_by_project_id(project_id).await
    }
}
