use serde::{Deserialize, Serialize};

use pharmaops_core::Money;

/// Risk tier of a projected balance. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Safe,
    Warning,
    Critical,
}

/// Classify a balance against the configured safety threshold.
///
/// - `balance < 0` → `Critical`
/// - `0 <= balance < safe_threshold` → `Warning`
/// - otherwise → `Safe`
pub fn classify(balance: Money, safe_threshold: Money) -> RiskTier {
    if balance.is_negative() {
        RiskTier::Critical
    } else if balance < safe_threshold {
        RiskTier::Warning
    } else {
        RiskTier::Safe
    }
}
