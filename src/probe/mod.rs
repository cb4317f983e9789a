//! Manual HTTP probes against the hosted checkout backend.
//!
//! One-shot request/response/print, no retries and no timeout override. The
//! bearer token comes from the environment, never from the config file.

pub mod checkout;

pub use checkout::{CheckoutProbe, CheckoutRequest};

use anyhow::{Context, Result};

use crate::config::ProbeSettings;

/// Build a checkout probe from settings and send it.
pub fn run(settings: &ProbeSettings) -> Result<()> {
    anyhow::ensure!(
        !settings.price_id.is_empty(),
        "probe.price_id is not configured (set it in the config file or pass --price)"
    );

    let token = std::env::var(&settings.token_env)
        .with_context(|| format!("{} is not set", settings.token_env))?;

    let probe = CheckoutProbe {
        endpoint: settings.endpoint.clone(),
        token,
        request: CheckoutRequest {
            price_id: settings.price_id.clone(),
            mode: settings.mode.clone(),
            success_url: settings.success_url.clone(),
            cancel_url: settings.cancel_url.clone(),
        },
    };
    probe.send()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_requires_price_id() {
        let settings = ProbeSettings::default();
        let err = run(&settings).unwrap_err();
        assert!(err.to_string().contains("price_id"));
    }
}
