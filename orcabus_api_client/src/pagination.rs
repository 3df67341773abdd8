use crate::{
    OrcabusApi,
    error::{OrcabusClientErr, check_status, decode},
};

#[derive(serde::Deserialize, Debug)]
struct Links {
    next: Option<String>,
}

/// the envelope every list endpoint returns
#[derive(serde::Deserialize, Debug)]
struct Page<T> {
    links: Links,
    results: Vec<T>,
}

impl OrcabusApi {
    /// GET a list endpoint and follow `links.next` until every page is read
    #[tracing::instrument(err, skip(self, query))]
    pub(crate) async fn get_all_pages<T>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, OrcabusClientErr>
    where
        T: serde::de::DeserializeOwned,
    {
        let first = self.client.get(url).query(query).send().await?;
        let mut page: Page<T> = decode(check_status(first).await?).await?;
        let mut results = std::mem::take(&mut page.results);

        while let Some(next) = page.links.next.take() {
            tracing::trace!(next=%next, "fetching next page");
            let response = self.client.get(&next).send().await?;
            page = decode(check_status(response).await?).await?;
            results.append(&mut page.results);
        }

        Ok(results)
    }
}
