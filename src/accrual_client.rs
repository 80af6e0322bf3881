//! HTTP adapter for the accrual authority.
//!
//! One GET per call, bounded by the client timeout. Nothing is retried here;
//! the poller picks the order up again on its next cycle.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::domain::{AccrualClient, AccrualError, AccrualReply, Error, OrderNumber};

pub struct HttpAccrualClient {
    client: Client,
    base_url: String,
}

impl HttpAccrualClient {
    /// `base_url` is e.g. "http://localhost:8081", without a trailing slash.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl AccrualClient for HttpAccrualClient {
    async fn fetch(&self, number: &OrderNumber) -> Result<AccrualReply, AccrualError> {
        let url = format!("{}/api/orders/{}", self.base_url, number);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AccrualError::Unreachable(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(AccrualError::Unexpected(response.status().as_u16()));
        }

        let reply: AccrualReply = response
            .json()
            .await
            .map_err(|e| AccrualError::Malformed(e.to_string()))?;

        if reply.accrual.is_some_and(|a| a.is_negative()) {
            return Err(AccrualError::Malformed(format!(
                "negative accrual for order {}",
                reply.order
            )));
        }

        Ok(reply)
    }
}
