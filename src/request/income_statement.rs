//! Annual income statement request

use crate::client::FinancialModelingPrep;
use crate::error::{Error, Result};
use crate::execute::Execute;
use crate::processor::{Processor, Raw, Records};
use crate::request::Request;

/// Annual income statement request builder
pub struct IncomeStatement<'a, Client: Request, P: Processor = Raw> {
    client: &'a FinancialModelingPrep<Client>,
    /// Stock symbol
    pub symbol: String,
    processor: P,
}

// Constructor - always starts with Raw
impl<'a, C: Request> IncomeStatement<'a, C, Raw> {
    /// Create new income statement request (returns raw JSON by default)
    pub fn new(client: &'a FinancialModelingPrep<C>, symbol: impl Into<String>) -> Self {
        Self {
            client,
            symbol: symbol.into(),
            processor: Raw,
        }
    }

    /// Decode the response into records
    pub fn records(self) -> IncomeStatement<'a, C, Records> {
        IncomeStatement {
            client: self.client,
            symbol: self.symbol,
            processor: Records,
        }
    }
}

impl<'a, C: Request, P: Processor + 'a> IncomeStatement<'a, C, P> {
    /// Execute the request and return the result
    pub fn get(self) -> impl std::future::Future<Output = Result<P::Output>> + Send + 'a
    where
        P::Output: Send,
    {
        Execute::get(self)
    }

    /// Full request URL, including the API key.
    pub fn url(&self) -> Result<String> {
        let api_key = self.client.api_key().ok_or(Error::MissingApiKey)?;
        let query = serde_urlencoded::to_string([("period", "annual"), ("apikey", api_key)])
            .map_err(|e| Error::Custom(format!("failed to encode query: {e}")))?;

        Ok(format!(
            "{}/income-statement/{}?{}",
            self.client.base_url(),
            self.symbol,
            query
        ))
    }
}

impl<'a, C: Request, P: Processor + 'a> Execute for IncomeStatement<'a, C, P>
where
    P::Output: Send,
{
    type Output = P::Output;

    #[allow(refining_impl_trait_reachable)]
    async fn get(self) -> Result<P::Output> {
        let url = self.url()?;
        tracing::debug!(symbol = %self.symbol, base_url = %self.client.base_url(), "requesting income statement");

        // Make request using Request trait, bounded by the client timeout
        let timeout = self.client.timeout();
        let response = match tokio::time::timeout(timeout, self.client.client().get(&url)).await {
            Ok(response) => response,
            Err(_) => Err(Error::Timeout(timeout)),
        };

        // Process using associated Processor type
        self.processor.process(response)
    }
}
