use crate::domain::{models::DomainErr, ports::ProjectStorage};

/// Finds where analysis projects keep their data
#[derive(Debug, Clone)]
pub struct ProjectService<P> {
    storage: P,
}

impl<P> ProjectService<P>
where
    P: ProjectStorage,
    anyhow::Error: From<P::Err>,
{
    /// create a new instance of self
    pub fn new(storage: P) -> Self {
        Self { storage }
    }

    /// the s3 uri the project's data lives under
    #[tracing::instrument(err, skip(self))]
    pub async fn base_uri(&self, project_id: Option<&str>) -> Result<String, DomainErr> {
        let project_id = project_id
            .filter(|id| !id.is_empty())
            .ok_or(DomainErr::MissingInput("projectId"))?;

        Ok(self
            .storage
            .s3_prefix_for_project(project_id)
            .await
            .map_err(anyhow::Error::from)?)
    }
}
