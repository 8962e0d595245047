//! Gateway speaking the hosted store's REST dialect (Supabase / PostgREST).

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde_json::Value;
use tracing::debug;

use super::{into_rows, Gateway, JsonRow};
use crate::{DbError, Table};

/// Talks to `{url}/rest/v1/{table}` using the project's access key.
#[derive(Clone)]
pub struct RestGateway {
    client: Client,
    base: Url,
    key: String,
}

impl std::fmt::Debug for RestGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestGateway")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

impl RestGateway {
    /// Build a gateway for the project at `url`, authenticating with `key`.
    pub fn new(url: Url, key: impl Into<String>) -> Result<Self, DbError> {
        if url.cannot_be_a_base() {
            return Err(DbError::InvalidUrl(url.to_string()));
        }
        let client = Client::builder().build()?;
        Ok(Self { client, base: url, key: key.into() })
    }

    fn endpoint(&self, table: Table) -> Result<Url, DbError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| DbError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(["rest", "v1", table.as_str()]);
        Ok(url)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }
}

#[async_trait]
impl Gateway for RestGateway {
    async fn insert(&self, table: Table, record: JsonRow) -> Result<Vec<JsonRow>, DbError> {
        let url = self.endpoint(table)?;
        debug!(%table, "POST {url}");
        let resp = self
            .request(reqwest::Method::POST, url)
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await?;
        rows(resp).await
    }

    async fn select_all(&self, table: Table) -> Result<Vec<JsonRow>, DbError> {
        let mut url = self.endpoint(table)?;
        url.query_pairs_mut().append_pair("select", "*");
        debug!(%table, "GET {url}");
        let resp = self.request(reqwest::Method::GET, url).send().await?;
        rows(resp).await
    }
}

/// Decode a PostgREST response into rows, surfacing its error message on
/// non-success statuses.
async fn rows(resp: Response) -> Result<Vec<JsonRow>, DbError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
            .unwrap_or(body);
        return Err(DbError::Rest { status: status.as_u16(), message });
    }

    let body: Value = resp.json().await?;
    into_rows(body)
}
