//! Provider-published beta, read on a best-effort basis.

use crate::data::MetadataProvider;
use serde_json::Value;
use tracing::{debug, warn};

/// Metadata key holding the published beta.
const BETA_KEY: &str = "beta";

/// Read the beta a metadata source publishes for `ticker`.
///
/// Never fails: an unavailable source, a missing field, or a value that is
/// not a finite number all yield `None`. Numeric strings are accepted.
pub fn read_provider_beta(provider: &dyn MetadataProvider, ticker: &str) -> Option<f64> {
    let info = match provider.info(ticker) {
        Ok(info) => info,
        Err(e) => {
            warn!(ticker, provider = provider.name(), error = %e, "beta metadata unavailable");
            return None;
        }
    };

    let beta = info.get(BETA_KEY).and_then(coerce_f64);
    if beta.is_none() {
        debug!(ticker, provider = provider.name(), "no usable beta in metadata");
    }
    beta
}

fn coerce_f64(value: &Value) -> Option<f64> {
    let x = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    x.is_finite().then_some(x)
}
