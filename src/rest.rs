//! REST API endpoints for Financial Modeling Prep

use crate::client::FinancialModelingPrep;
use crate::processor::Raw;
use crate::request::IncomeStatement;
use crate::request::Request;

/// Get the annual income statements for a stock
///
/// Returns a request builder that will return results as raw JSON string.
/// Call `.records()` on it to decode the body into [`Record`](crate::record::Record)s.
///
/// # Example
/// ```no_run
/// # use fmp_relay::FinancialModelingPrep;
/// # async fn example() {
/// # let client = FinancialModelingPrep::default().with_key("api-key");
/// let records = fmp_relay::rest::income_statement(&client, "AAPL")
///     .records()
///     .get()
///     .await
///     .unwrap();
/// # }
/// ```
pub fn income_statement<'a, Client: Request>(
    client: &'a FinancialModelingPrep<Client>,
    symbol: impl Into<String>,
) -> IncomeStatement<'a, Client, Raw> {
    IncomeStatement::new(client, symbol)
}
