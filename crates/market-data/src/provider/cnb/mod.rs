//! Czech National Bank daily fixing provider.
//!
//! CNB publishes the fixing once per business day shortly after 14:30 Prague
//! time. No API key is needed.

mod parser;

pub use parser::parse_daily_rates;

use reqwest::Client;
use rust_decimal::Decimal;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::CnbDailyRates;

/// Provider ID constant
pub const PROVIDER_ID: &str = "CNB";

pub const DEFAULT_BASE_URL: &str = "https://www.cnb.cz";

pub const DAILY_RATES_PATH: &str =
    "/cs/financni_trhy/devizovy_trh/kurzy_devizoveho_trhu/denni_kurz.txt";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the CNB daily rates file.
///
/// # Example
///
/// ```ignore
/// use pennywise_market_data::CnbProvider;
///
/// let provider = CnbProvider::new();
/// let czk_per_gbp = provider.czk_per_unit("GBP").await?;
/// ```
#[derive(Clone)]
pub struct CnbProvider {
    client: Client,
    base_url: String,
}

impl CnbProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Points the provider at another host, e.g. a mirror or a test server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn daily_rates_url(&self) -> String {
        format!("{}{}", self.base_url, DAILY_RATES_PATH)
    }

    /// Downloads and parses today's publication.
    pub async fn fetch_daily_rates(&self) -> Result<CnbDailyRates, MarketDataError> {
        let url = self.daily_rates_url();
        log::debug!("Fetching CNB daily rates from {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::HttpStatus {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let rates = parse_daily_rates(&body)?;
        log::debug!(
            "Parsed {} CNB rates published {}",
            rates.rates.len(),
            rates.published
        );
        Ok(rates)
    }

    /// CZK per one unit of `code` from today's publication.
    pub async fn czk_per_unit(&self, code: &str) -> Result<Decimal, MarketDataError> {
        self.fetch_daily_rates().await?.czk_per_unit(code)
    }
}

impl Default for CnbProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RetryClass;
    use rust_decimal_macros::dec;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MOCK_BODY: &str = "16.10.2026 #200\n\
země|měna|množství|kód|kurz\n\
EMU|euro|1|EUR|24,310\n\
Velká Británie|libra|1|GBP|28,146\n";

    async fn create_mock_server(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(DAILY_RATES_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn fetches_and_parses_publication() {
        let server = create_mock_server(200, MOCK_BODY).await;
        let provider = CnbProvider::with_base_url(server.uri());

        let rates = provider.fetch_daily_rates().await.unwrap();

        assert_eq!(rates.sequence, Some(200));
        assert_eq!(rates.rates.len(), 2);
        assert_eq!(provider.czk_per_unit("GBP").await.unwrap(), dec!(28.146));
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let server = create_mock_server(200, MOCK_BODY).await;
        let provider = CnbProvider::with_base_url(format!("{}/", server.uri()));

        assert_eq!(provider.czk_per_unit("EUR").await.unwrap(), dec!(24.310));
    }

    #[tokio::test]
    async fn server_error_is_retryable() {
        let server = create_mock_server(503, "maintenance").await;
        let provider = CnbProvider::with_base_url(server.uri());

        let err = provider.fetch_daily_rates().await.unwrap_err();

        assert!(matches!(
            err,
            MarketDataError::HttpStatus { status: 503, .. }
        ));
        assert_eq!(err.retry_class(), RetryClass::WithBackoff);
    }

    #[tokio::test]
    async fn html_error_page_is_a_parse_error() {
        let server = create_mock_server(200, "<html>\n<body>Not here</body>\n</html>").await;
        let provider = CnbProvider::with_base_url(server.uri());

        let err = provider.czk_per_unit("GBP").await.unwrap_err();

        assert!(matches!(err, MarketDataError::Parse { .. }));
        assert_eq!(err.retry_class(), RetryClass::Never);
    }
}
