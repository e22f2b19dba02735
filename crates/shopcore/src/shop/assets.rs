use serde::{Deserialize, Serialize};

/// A cryptocurrency the shop accepts, with where to send it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAsset {
    /// Ticker shown to the user and carried in tokens, e.g. `BTC`
    pub symbol: String,
    /// Button label, e.g. `Bitcoin`
    pub name: String,
    /// Identifier understood by the price provider, e.g. `bitcoin`
    pub quote_id: String,
    #[serde(default)]
    pub payout_address: String,
}

impl PaymentAsset {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        quote_id: impl Into<String>,
        payout_address: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            quote_id: quote_id.into(),
            payout_address: payout_address.into(),
        }
    }
}

/// Case-insensitive lookup by ticker.
pub fn find_asset<'a>(assets: &'a [PaymentAsset], symbol: &str) -> Option<&'a PaymentAsset> {
    assets.iter().find(|asset| asset.symbol.eq_ignore_ascii_case(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets() -> Vec<PaymentAsset> {
        vec![
            PaymentAsset::new("BTC", "Bitcoin", "bitcoin", "bc1qexample"),
            PaymentAsset::new("SOL", "Solana", "solana", "So1example"),
        ]
    }

    #[test]
    fn test_find_asset_ignores_case() {
        let assets = assets();
        assert_eq!(find_asset(&assets, "btc").map(|a| a.quote_id.as_str()), Some("bitcoin"));
        assert_eq!(find_asset(&assets, "Sol").map(|a| a.name.as_str()), Some("Solana"));
    }

    #[test]
    fn test_find_asset_unknown() {
        assert!(find_asset(&assets(), "DOGE").is_none());
        assert!(find_asset(&assets(), "").is_none());
    }
}
