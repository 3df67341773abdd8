use reqwest::{Response, StatusCode};

#[derive(thiserror::Error, Debug)]
pub enum OrcabusClientErr {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("unexpected response {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        source: reqwest::Error,
    },
}

/// map non-success responses into [OrcabusClientErr]
#[tracing::instrument(skip(response), fields(url = %response.url()))]
pub(crate) async fn check_status(response: Response) -> Result<Response, OrcabusClientErr> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND => Err(OrcabusClientErr::NotFound(response.url().to_string())),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(OrcabusClientErr::Unauthorized),
        _ => {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(body=%body, status=%status, "unexpected response from orcabus api");
            Err(OrcabusClientErr::UnexpectedStatus {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// decode a json body, naming the url on failure
pub(crate) async fn decode<T: serde::de::DeserializeOwned>(
    response: Response,
) -> Result<T, OrcabusClientErr> {
    let url = response.url().to_string();
    response
        .json::<T>()
        .await
        .map_err(|source| OrcabusClientErr::Decode { url, source })
}
