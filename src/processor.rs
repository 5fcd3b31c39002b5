//! Response processors
//!
//! A request builder carries a processor that turns the HTTP response into
//! its output type. Builders start with [`Raw`] and can be switched to
//! [`Records`].

use serde_json::Value;

use crate::error::{Error, Result};
use crate::record::{Record, value_kind};
use crate::response::Response;

/// Turns an HTTP response into a typed output
pub trait Processor: Send + Sync {
    /// The processed output type
    type Output;

    /// Process the response, or pass through the request error
    fn process<R: Response>(&self, response: Result<R>) -> Result<Self::Output>;
}

/// Returns the response body as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct Raw;

impl Processor for Raw {
    type Output = String;

    fn process<R: Response>(&self, response: Result<R>) -> Result<String> {
        let resp = success(response?)?;
        Ok(resp.body().to_owned())
    }
}

/// Decodes the body as a JSON array of [`Record`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct Records;

impl Processor for Records {
    type Output = Vec<Record>;

    fn process<R: Response>(&self, response: Result<R>) -> Result<Vec<Record>> {
        let resp = success(response?)?;
        let value: Value = serde_json::from_str(resp.body())?;

        match value {
            Value::Array(items) => items.into_iter().map(Record::try_from).collect(),
            // The API reports bad keys and exhausted quotas as an object with status 200
            Value::Object(map) => match map.get("Error Message").and_then(Value::as_str) {
                Some(message) => Err(Error::ApiError {
                    request_id: resp.request_id().to_owned(),
                    status: resp.status(),
                    message: message.to_string(),
                }),
                None => Err(Error::UnexpectedShape("expected array of records, got object".to_string())),
            },
            other => Err(Error::UnexpectedShape(format!(
                "expected array of records, got {}",
                value_kind(&other)
            ))),
        }
    }
}

fn success<R: Response>(resp: R) -> Result<R> {
    if !resp.is_success() {
        return Err(Error::ApiError {
            request_id: resp.request_id().to_owned(),
            status: resp.status(),
            message: resp.body().to_owned(),
        });
    }
    Ok(resp)
}
