use anyhow::Result;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub project_url: String,
    pub service_key: String,
}

/// Failed PostgREST or Edge Function call. Kept as a typed error so callers
/// can downcast from `anyhow` and inspect the backend's message, which is
/// how stored-procedure rejections travel.
#[derive(Debug, Error)]
#[error("supabase request failed: {context} (status {status}): {message}")]
pub struct SupabaseApiError {
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
    pub context: String,
}

#[derive(Debug, serde::Deserialize)]
struct PostgrestErrorEnvelope {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

/// Minimal Supabase client built on reqwest. Covers the three surfaces this
/// service talks to: PostgREST tables, stored procedures via `/rpc`, and
/// Edge Functions.
pub struct SupabaseClient {
    http: reqwest::Client,
    rest_url: String,
    functions_url: String,
    service_key: String,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Self {
        let base = config.project_url.trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            rest_url: format!("{}/rest/v1", base),
            functions_url: format!("{}/functions/v1", base),
            service_key: config.service_key,
        }
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.service_key))
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let (code, message, details, hint) =
            match serde_json::from_str::<PostgrestErrorEnvelope>(&body) {
                Ok(envelope) => (
                    envelope.code,
                    envelope.message,
                    envelope.details,
                    envelope.hint,
                ),
                Err(_) => (None, None, None, None),
            };

        error!(
            status = %status,
            postgrest_code = ?code,
            postgrest_details = ?details,
            postgrest_hint = ?hint,
            response_body = %body,
            context = %context,
            "supabase api request failed"
        );

        Err(SupabaseApiError {
            status: status.as_u16(),
            code,
            message: message.unwrap_or(body),
            context: context.to_string(),
        }
        .into())
    }

    /// GET on a PostgREST table. `query` holds raw PostgREST filter pairs,
    /// e.g. `("user_id", "eq.<uuid>")`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
        context: &str,
    ) -> Result<Vec<T>> {
        let resp = self
            .authed(self.http.get(format!("{}/{}", self.rest_url, table)))
            .query(query)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, context).await?;

        Ok(resp.json().await?)
    }

    /// INSERT returning the written row.
    pub async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        row: &B,
        context: &str,
    ) -> Result<T> {
        let resp = self
            .authed(self.http.post(format!("{}/{}", self.rest_url, table)))
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, context).await?;

        // PostgREST returns an array even for single-row inserts.
        let mut rows: Vec<T> = resp.json().await?;
        rows.pop()
            .ok_or_else(|| anyhow::anyhow!("{}: insert returned no rows", context))
    }

    /// UPSERT on a conflict target, returning the written row.
    pub async fn upsert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        on_conflict: &str,
        row: &B,
        context: &str,
    ) -> Result<T> {
        let resp = self
            .authed(self.http.post(format!("{}/{}", self.rest_url, table)))
            .query(&[("on_conflict", on_conflict)])
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(row)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, context).await?;

        let mut rows: Vec<T> = resp.json().await?;
        rows.pop()
            .ok_or_else(|| anyhow::anyhow!("{}: upsert returned no rows", context))
    }

    /// Invoke a stored procedure through PostgREST's `/rpc` surface.
    pub async fn rpc<B: Serialize, T: DeserializeOwned>(
        &self,
        function: &str,
        args: &B,
        context: &str,
    ) -> Result<T> {
        let resp = self
            .authed(
                self.http
                    .post(format!("{}/rpc/{}", self.rest_url, function)),
            )
            .header(CONTENT_TYPE, "application/json")
            .json(args)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, context).await?;

        Ok(resp.json().await?)
    }

    /// Invoke an Edge Function.
    pub async fn function<B: Serialize, T: DeserializeOwned>(
        &self,
        name: &str,
        body: &B,
        context: &str,
    ) -> Result<T> {
        let resp = self
            .authed(self.http.post(format!("{}/{}", self.functions_url, name)))
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, context).await?;

        Ok(resp.json().await?)
    }
}
