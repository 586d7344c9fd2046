use std::fmt;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header;
use tokio::time::sleep;

use crate::{
    wire::{self, MintRequest, TransferRequest},
    BalanceResponse, ClientOptions, EconomyInfo, GenZError, Operation, Result, TransactionReceipt,
};

/// Characters escaped when a player id is placed into a URL path.
///
/// `/` stays in the set so the id always occupies a single path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Ceiling on the backoff delay between attempts.
const MAX_BACKOFF_MS: u64 = 3_000;
/// Jitter added to each backoff delay to avoid synchronized retries.
const BACKOFF_JITTER_MS: u64 = 200;

#[derive(Clone)]
/// HTTP client for the GenZ token-ledger API.
pub struct GenZClient {
    http: reqwest::Client,
    base_url: String,
    authorization: Option<String>,
    options: ClientOptions,
}

impl fmt::Debug for GenZClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenZClient")
            .field("base_url", &self.base_url)
            .field(
                "authorization",
                &self.authorization.as_ref().map(|_| "<redacted>"),
            )
            .field("options", &self.options)
            .finish()
    }
}

impl GenZClient {
    /// Creates an unauthenticated client.
    ///
    /// Suitable for endpoints that do not sit behind API-key auth, such as
    /// the health check.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            authorization: None,
            options: ClientOptions::default(),
        }
    }

    /// Creates a client that authenticates with a bearer API key.
    ///
    /// If the key is missing the `Bearer ` prefix, it is added
    /// automatically. An empty key is treated as no key at all.
    pub fn new_bearer(base_url: impl Into<String>, api_key: impl AsRef<str>) -> Self {
        let mut client = Self::new(base_url);
        let api_key = api_key.as_ref();
        if !api_key.trim().is_empty() {
            client.authorization = Some(normalize_bearer_authorization(api_key));
        }
        client
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `GENZ_BASE_URL` — ledger endpoint base URL (required, non-empty)
    /// - `GENZ_API_KEY` — API key (optional; Bearer prefix optional)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use genz_http::GenZClient;
    ///
    /// let client = GenZClient::from_env().expect("missing GENZ_BASE_URL");
    /// ```
    pub fn from_env() -> std::result::Result<Self, String> {
        let base_url = std::env::var("GENZ_BASE_URL")
            .map_err(|_| "missing GENZ_BASE_URL environment variable".to_owned())?;
        if base_url.trim().is_empty() {
            return Err("GENZ_BASE_URL is set but empty".to_owned());
        }
        match std::env::var("GENZ_API_KEY") {
            Ok(api_key) => Ok(Self::new_bearer(base_url, api_key)),
            Err(_) => Ok(Self::new(base_url)),
        }
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Verifies the service is reachable, returning the raw health report.
    pub async fn health_check(&self) -> Result<String> {
        self.execute(Operation::get("/v1/health")).await
    }

    /// Credits freshly minted tokens to a player's wallet.
    pub async fn mint(&self, player_id: &str, amount: i64) -> Result<TransactionReceipt> {
        self.mint_with_reason(player_id, amount, None).await
    }

    /// Credits tokens with an audit reason recorded against the mint.
    pub async fn mint_with_reason(
        &self,
        player_id: &str,
        amount: i64,
        reason: Option<&str>,
    ) -> Result<TransactionReceipt> {
        require_player_id("playerId", player_id)?;
        require_positive_amount(amount)?;
        let operation = Operation::post_json(
            "/v1/tokens/mint",
            &MintRequest {
                player_id,
                amount,
                reason,
            },
        )?;
        let body = self.execute(operation).await?;
        wire::decode_json(&body)
    }

    /// Moves tokens between two players' wallets.
    pub async fn transfer(
        &self,
        from_player_id: &str,
        to_player_id: &str,
        amount: i64,
    ) -> Result<TransactionReceipt> {
        require_player_id("fromPlayerId", from_player_id)?;
        require_player_id("toPlayerId", to_player_id)?;
        require_positive_amount(amount)?;
        let operation = Operation::post_json(
            "/v1/tokens/transfer",
            &TransferRequest {
                from_player_id,
                to_player_id,
                amount,
            },
        )?;
        let body = self.execute(operation).await?;
        wire::decode_json(&body)
    }

    /// Reads a player's current wallet balance.
    pub async fn balance(&self, player_id: &str) -> Result<BalanceResponse> {
        require_player_id("playerId", player_id)?;
        let path = format!(
            "/v1/wallets/{}/balance",
            utf8_percent_encode(player_id, PATH_SEGMENT)
        );
        let body = self.execute(Operation::get(path)).await?;
        wire::decode_json(&body)
    }

    /// Fetches token economy metadata (name, symbol, decimals).
    pub async fn economy(&self) -> Result<EconomyInfo> {
        let body = self.execute(Operation::get("/v1/economy")).await?;
        wire::decode_json(&body)
    }

    /// Runs one logical call to terminal resolution.
    ///
    /// The operation is issued over HTTP; transport failures and 5xx
    /// responses are retried up to `max_retries` further attempts, with
    /// backoff between attempts. Statuses in the 3xx/4xx range are surfaced
    /// immediately: repeating a request the server has already rejected
    /// cannot succeed without caller intervention.
    ///
    /// Resolves with the raw response body on any 2xx status. Decoding is
    /// the caller's concern; the typed methods on this client do it for the
    /// documented endpoints.
    pub async fn execute(&self, operation: Operation) -> Result<String> {
        let url = self.request_url(&operation.path);
        let mut attempt = 0usize;
        loop {
            let mut request = self
                .http
                .request(operation.method.clone(), &url)
                .header(header::CONTENT_TYPE, "application/json")
                .timeout(Duration::from_millis(self.options.timeout_ms));
            if let Some(authorization) = &self.authorization {
                request = request.header(header::AUTHORIZATION, authorization);
            }
            if let Some(body) = &operation.body_json {
                request = request.body(body.clone());
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.map_err(GenZError::Transport)?;

                    if status.is_success() {
                        return Ok(body);
                    }

                    if status.is_server_error() && attempt < self.options.max_retries {
                        self.wait_before_retry(attempt).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(GenZError::Http {
                        status: status.as_u16(),
                        body,
                    });
                }
                Err(err) => {
                    if attempt < self.options.max_retries {
                        self.wait_before_retry(attempt).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(GenZError::Transport(err));
                }
            }
        }
    }

    fn request_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end().trim_end_matches('/'), path)
    }

    /// Waits before the next retry attempt.
    ///
    /// Exponential backoff capped at [`MAX_BACKOFF_MS`], with up to
    /// [`BACKOFF_JITTER_MS`] of jitter. A zero base skips the wait entirely.
    async fn wait_before_retry(&self, attempt: usize) {
        if self.options.retry_backoff_ms == 0 {
            return;
        }
        let exp = attempt.min(16) as u32;
        let multiplier = 1u64 << exp;
        let delay_ms = self
            .options
            .retry_backoff_ms
            .saturating_mul(multiplier)
            .saturating_add(fastrand::u64(0..BACKOFF_JITTER_MS))
            .min(MAX_BACKOFF_MS);

        #[cfg(feature = "tracing")]
        tracing::debug!("retrying ledger request after {} ms", delay_ms);

        sleep(Duration::from_millis(delay_ms)).await;
    }
}

fn require_player_id(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GenZError::InvalidRequest(format!("{field} is required")));
    }
    Ok(())
}

fn require_positive_amount(amount: i64) -> Result<()> {
    if amount <= 0 {
        return Err(GenZError::InvalidRequest(
            "amount must be positive".to_owned(),
        ));
    }
    Ok(())
}

fn normalize_bearer_authorization(api_key: &str) -> String {
    let trimmed = api_key.trim();
    let prefix = trimmed.get(..7);
    if prefix.is_some_and(|value| value.eq_ignore_ascii_case("bearer ")) {
        trimmed.to_owned()
    } else {
        format!("Bearer {trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use percent_encoding::utf8_percent_encode;

    use super::{normalize_bearer_authorization, GenZClient, PATH_SEGMENT};

    #[test]
    fn normalize_bearer_adds_prefix_when_missing() {
        assert_eq!(
            normalize_bearer_authorization("abc123"),
            "Bearer abc123".to_owned()
        );
    }

    #[test]
    fn normalize_bearer_keeps_existing_prefix() {
        assert_eq!(
            normalize_bearer_authorization("bEaReR abc123"),
            "bEaReR abc123".to_owned()
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let client = GenZClient::new_bearer("https://ledger.example", "secret-key");
        let debug = format!("{client:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn empty_api_key_leaves_client_unauthenticated() {
        let client = GenZClient::new_bearer("https://ledger.example", "  ");
        assert!(client.authorization.is_none());
    }

    #[test]
    fn request_url_trims_trailing_whitespace_and_slashes() {
        let client = GenZClient::new("https://ledger.example/  ");
        assert_eq!(
            client.request_url("/v1/health"),
            "https://ledger.example/v1/health"
        );
    }

    #[test]
    fn path_segment_encoding_keeps_id_in_one_segment() {
        let encoded = utf8_percent_encode("a b/c", PATH_SEGMENT).to_string();
        assert_eq!(encoded, "a%20b%2Fc");
    }
}
