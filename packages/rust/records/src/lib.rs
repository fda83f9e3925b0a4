//! Record store client for the Airtable v0 REST API.
//!
//! The enrichment run needs exactly two operations from the store:
//! - [`TableClient::list_all`]: every record in a table, following the
//!   pagination cursor until the listing is exhausted
//! - [`TableClient::batch_update`]: apply queued field updates, at most
//!   [`MAX_BATCH_UPDATE`] records per call

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use logofill_shared::{LogofillError, Result};

/// Public REST root for the record store API.
const DEFAULT_API_BASE: &str = "https://api.airtable.com/v0";

/// Timeout in seconds for every record store call.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Provider limit on records per batch-update call.
pub const MAX_BATCH_UPDATE: usize = 10;

/// User-Agent string for record store requests.
const USER_AGENT: &str = concat!("Logofill/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// One row of the table: an opaque record id plus named field values.
///
/// Fields with no value are absent from the mapping entirely, which is why
/// "already enriched" can be decided by key presence alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: serde_json::Map<String, Value>,
}

impl Record {
    /// Raw value of a field, if the key is present.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// String value of a field; `None` when absent, non-string, or empty.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whether the field key is present at all.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Whether the field holds a truthy value (not null, not `""`, not `[]`).
    pub fn has_value(&self, name: &str) -> bool {
        match self.fields.get(name) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        }
    }
}

/// One queued enrichment result, keyed by record id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub id: String,
    pub fields: serde_json::Map<String, Value>,
}

/// One page of the listing endpoint.
#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    records: Vec<Record>,
    /// Cursor for the next page; absent on the final page.
    #[serde(default)]
    offset: Option<String>,
}

/// PATCH payload wrapper for batch updates.
#[derive(Debug, Serialize)]
struct BatchUpdateBody<'a> {
    records: &'a [RecordUpdate],
}

// ---------------------------------------------------------------------------
// TableClient
// ---------------------------------------------------------------------------

/// Client for a single table in a single base.
#[derive(Debug, Clone)]
pub struct TableClient {
    client: Client,
    api_base: String,
    token: String,
    base_id: String,
    table: String,
}

impl TableClient {
    /// Create a client for `table` in `base_id`, authenticated by `token`.
    pub fn new(
        token: impl Into<String>,
        base_id: impl Into<String>,
        table: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LogofillError::Records(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.into(),
            token: token.into(),
            base_id: base_id.into(),
            table: table.into(),
        })
    }

    /// Point the client at a different API root (tests, proxies).
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Name of the table this client writes to.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Table endpoint URL with the base id and table name as encoded path
    /// segments (table names routinely contain spaces).
    fn table_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| LogofillError::Records(format!("invalid API base {}: {e}", self.api_base)))?;
        url.path_segments_mut()
            .map_err(|_| {
                LogofillError::Records(format!("API base cannot carry paths: {}", self.api_base))
            })?
            .pop_if_empty()
            .push(&self.base_id)
            .push(&self.table);
        Ok(url)
    }

    /// List every record in the table in source order.
    ///
    /// The store pages its listing; this follows the `offset` cursor until
    /// exhausted and concatenates the pages into one vector.
    #[instrument(skip_all, fields(table = %self.table))]
    pub async fn list_all(&self) -> Result<Vec<Record>> {
        let url = self.table_url()?;
        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut request = self.client.get(url.clone()).bearer_auth(&self.token);
            if let Some(cursor) = &offset {
                request = request.query(&[("offset", cursor.as_str())]);
            }

            let response = request
                .send()
                .await
                .map_err(|e| LogofillError::Records(format!("list failed: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LogofillError::Records(format!(
                    "list returned HTTP {status}: {}",
                    snippet(&body)
                )));
            }

            let page: ListResponse = response
                .json()
                .await
                .map_err(|e| LogofillError::Records(format!("list response is not valid JSON: {e}")))?;

            pages += 1;
            debug!(page = pages, count = page.records.len(), "fetched record page");
            records.extend(page.records);

            match page.offset {
                Some(cursor) => offset = Some(cursor),
                None => break,
            }
        }

        debug!(total = records.len(), pages, "listing complete");
        Ok(records)
    }

    /// Apply up to [`MAX_BATCH_UPDATE`] field updates in a single PATCH call.
    ///
    /// An empty slice is a no-op and an oversized slice is rejected before
    /// any request is made. Transport errors and non-success statuses are
    /// returned as [`LogofillError::Records`]; the enrichment run treats
    /// them as fatal.
    #[instrument(skip_all, fields(table = %self.table, count = updates.len()))]
    pub async fn batch_update(&self, updates: &[RecordUpdate]) -> Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        if updates.len() > MAX_BATCH_UPDATE {
            return Err(LogofillError::validation(format!(
                "batch of {} exceeds the provider cap of {MAX_BATCH_UPDATE}",
                updates.len()
            )));
        }

        let url = self.table_url()?;
        let response = self
            .client
            .patch(url)
            .bearer_auth(&self.token)
            .json(&BatchUpdateBody { records: updates })
            .send()
            .await
            .map_err(|e| LogofillError::Records(format!("batch update failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LogofillError::Records(format!(
                "batch update returned HTTP {status}: {}",
                snippet(&body)
            )));
        }

        debug!("batch update applied");
        Ok(())
    }
}

/// Trimmed response-body excerpt for log-sized error messages.
fn snippet(body: &str) -> String {
    body.trim().chars().take(200).collect()
}
