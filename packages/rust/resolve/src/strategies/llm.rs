//! Last-resort resolution through an OpenAI chat completion.
//!
//! The model is asked for the bare domain behind a company name and its
//! reply is scanned for a domain token. The prompt pins the reply format,
//! so responses tend to be a single token; anything off-format merely
//! falls through as no match.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use logofill_shared::{LogofillError, Result};

use crate::domain::{clean_domain, extract_domain_token, logo_cdn_url};

use super::{ResolverStrategy, StrategyOutcome};

/// Public REST root for the OpenAI API.
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Timeout in seconds for each completion call.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Token cap for the reply. A bare domain fits comfortably.
const MAX_COMPLETION_TOKENS: usize = 16;

const SYSTEM_PROMPT: &str = "You map company or product names to their primary website domain. \
    Reply with the bare domain only, like example.com. \
    Reply UNKNOWN if you are not sure.";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: usize,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Asks a chat model for the domain behind a company name.
pub struct LlmResolver {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl LlmResolver {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LogofillError::Llm(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Point the resolver at a different API root (tests, proxies).
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    async fn complete(&self, company: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            temperature: 0.0,
            max_tokens: MAX_COMPLETION_TOKENS,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: company,
                },
            ],
        };

        let url = format!("{}/chat/completions", self.api_base);
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LogofillError::Llm(format!("chat completion failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LogofillError::Llm(format!(
                "chat completion returned HTTP {status}"
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            LogofillError::Llm(format!("chat completion response is not valid JSON: {e}"))
        })?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

#[async_trait]
impl ResolverStrategy for LlmResolver {
    async fn resolve(&self, company: &str) -> Result<StrategyOutcome> {
        let reply = self.complete(company).await?;
        let reply = reply.trim();

        if reply.is_empty() || reply.eq_ignore_ascii_case("unknown") {
            debug!(%company, "model does not know the domain");
            return Ok(StrategyOutcome::NoMatch);
        }

        let domain = extract_domain_token(reply).and_then(|token| clean_domain(&token));
        match domain {
            Some(domain) => Ok(StrategyOutcome::Found(logo_cdn_url(&domain))),
            None => {
                debug!(%company, %reply, "reply carries no domain token");
                Ok(StrategyOutcome::NoMatch)
            }
        }
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}
