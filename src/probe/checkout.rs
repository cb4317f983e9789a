//! One-shot create-checkout-session probe.

use anyhow::{Context, Result};
use serde::Serialize;
use ureq::Agent;

/// JSON body of a create-checkout-session request.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    /// Price identifier of the plan being purchased
    pub price_id: String,
    /// Checkout mode: "payment" or "subscription"
    pub mode: String,
    /// URL to redirect after successful payment
    pub success_url: String,
    /// URL to redirect if checkout is cancelled
    pub cancel_url: String,
}

/// A single probe: endpoint, bearer token, and the body to send.
pub struct CheckoutProbe {
    pub endpoint: String,
    pub token: String,
    pub request: CheckoutRequest,
}

impl CheckoutProbe {
    /// Send the request and print status, headers, and body to stdout.
    ///
    /// Non-2xx responses are printed like any other response; only transport
    /// failures (refused connection, DNS, ...) are errors. No retry and no
    /// timeout override, so a hung backend blocks the probe.
    pub fn send(&self) -> Result<()> {
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();

        let auth = format!("Bearer {}", self.token);
        let mut response = agent
            .post(self.endpoint.as_str())
            .header("Authorization", auth.as_str())
            .send_json(&self.request)
            .with_context(|| format!("Request to {} failed", self.endpoint))?;

        let status = response.status();
        println!("Status: {}", status);
        for (name, value) in response.headers() {
            println!("{}: {}", name, value.to_str().unwrap_or("<non-ascii>"));
        }

        let body = response
            .body_mut()
            .read_to_string()
            .context("Failed to read response body")?;
        println!();
        println!("{}", body);

        if status.is_success() {
            println!("Checkout session created");
        } else {
            println!("Checkout request rejected ({})", status);
        }
        Ok(())
    }
}
