//! Outbound lookups for the home page: the public IP and a trivia fact.
//!
//! Both are decoration. Any failure is logged and turns into `None`, so the
//! pages that show them keep working when the upstream is down.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

#[derive(Clone)]
pub struct InfoClient {
    http: Client,
    ip_lookup_url: String,
    fact_url: String,
}

impl InfoClient {
    pub fn new(
        ip_lookup_url: impl Into<String>,
        fact_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            ip_lookup_url: ip_lookup_url.into(),
            fact_url: fact_url.into(),
        })
    }

    pub async fn public_ip(&self) -> Option<String> {
        self.fetch_field(&self.ip_lookup_url, "ip").await
    }

    pub async fn cat_fact(&self) -> Option<String> {
        self.fetch_field(&self.fact_url, "fact").await
    }

    async fn fetch_field(&self, url: &str, field: &str) -> Option<String> {
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Lookup {} failed: {}", url, e);
                return None;
            }
        };
        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Lookup {} returned an error status: {}", url, e);
                return None;
            }
        };
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Lookup {} returned an unreadable body: {}", url, e);
                return None;
            }
        };
        let value = body.get(field).and_then(Value::as_str).map(str::to_string);
        if value.is_none() {
            log::warn!("Lookup {} response has no '{}' field", url, field);
        }
        value
    }
}
