/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the API client, the local snapshot and the UI layer.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One subscription owned by the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    /// Watched address (or pool id for txpool subscriptions)
    pub address: String,
    pub color: String,
    /// User-editable label
    pub label: String,
    pub user_id: String,
    /// e.g. "ethereum_blockchain"
    #[serde(alias = "subscription_type")]
    pub subscription_type_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Subscription {
    pub fn kind(&self) -> SubscriptionKind {
        SubscriptionKind::from_type_id(&self.subscription_type_id)
    }

    /// Creation date as MM/DD/YYYY, empty when unknown
    pub fn created_date(&self) -> String {
        self.created_at
            .map(|at| at.format("%m/%d/%Y").to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionsList {
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

/// Kinds of subscription the table knows how to draw.
///
/// Discriminants index `KIND_TABLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionKind {
    EthereumBlockchain = 0,
    EthereumTxpool = 1,
    AlgorandBlockchain = 2,
    AlgorandTxpool = 3,
    Unknown = 4,
}

/// Display metadata for a subscription kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindDisplay {
    pub kind: SubscriptionKind,
    pub type_id: &'static str,
    pub label: &'static str,
    pub icon_url: Option<&'static str>,
}

static KIND_TABLE: [KindDisplay; 5] = [
    KindDisplay {
        kind: SubscriptionKind::EthereumBlockchain,
        type_id: "ethereum_blockchain",
        label: "Ethereum blockchain",
        icon_url: Some("https://ethereum.org/static/c48a5f760c34dfadcf05a208dab137cc/31987/eth-diamond-rainbow.png"),
    },
    KindDisplay {
        kind: SubscriptionKind::EthereumTxpool,
        type_id: "ethereum_txpool",
        label: "Ethereum transaction pool",
        icon_url: Some("https://ethereum.org/static/a183661dd70e0e5c70689a0ec95ef0ba/31987/eth-diamond-purple.png"),
    },
    KindDisplay {
        kind: SubscriptionKind::AlgorandBlockchain,
        type_id: "algorand_blockchain",
        label: "Algorand blockchain",
        icon_url: Some("https://www.algorand.com/assets/media-kit/logos/logo-marks/png/algorand_logo_mark_black.png"),
    },
    KindDisplay {
        kind: SubscriptionKind::AlgorandTxpool,
        type_id: "algorand_txpool",
        label: "Algorand transaction pool",
        icon_url: Some("https://www.algorand.com/assets/media-kit/logos/logo-marks/png/algorand_logo_mark_white.png"),
    },
    KindDisplay {
        kind: SubscriptionKind::Unknown,
        type_id: "",
        label: "Unknown pool",
        icon_url: None,
    },
];

impl SubscriptionKind {
    /// Look up a kind by its API type id, `Unknown` when unrecognised
    pub fn from_type_id(type_id: &str) -> Self {
        KIND_TABLE
            .iter()
            .find(|entry| entry.kind != SubscriptionKind::Unknown && entry.type_id == type_id)
            .map(|entry| entry.kind)
            .unwrap_or(SubscriptionKind::Unknown)
    }

    pub fn display(self) -> &'static KindDisplay {
        &KIND_TABLE[self as usize]
    }

    /// Every icon worth downloading for the table
    pub fn icon_urls() -> impl Iterator<Item = &'static str> {
        KIND_TABLE.iter().filter_map(|entry| entry.icon_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_lookup() {
        assert_eq!(SubscriptionKind::from_type_id("ethereum_txpool"), SubscriptionKind::EthereumTxpool);
        assert_eq!(SubscriptionKind::from_type_id("algorand_blockchain"), SubscriptionKind::AlgorandBlockchain);
        assert_eq!(SubscriptionKind::from_type_id("solana_blockchain"), SubscriptionKind::Unknown);
        // The unknown row's empty type id must not match an empty input
        assert_eq!(SubscriptionKind::from_type_id(""), SubscriptionKind::Unknown);
    }

    #[test]
    fn test_table_is_indexed_by_discriminant() {
        for entry in KIND_TABLE.iter() {
            assert_eq!(entry.kind.display(), entry);
        }
        assert!(SubscriptionKind::Unknown.display().icon_url.is_none());
        assert_eq!(SubscriptionKind::icon_urls().count(), 4);
    }

    #[test]
    fn test_parse_api_payload() {
        let json = r##"{
            "subscriptions": [{
                "id": "a1",
                "address": "0xabc",
                "color": "#ff0000",
                "label": "cold wallet",
                "user_id": "u1",
                "subscription_type": "ethereum_blockchain",
                "created_at": "2021-08-20T12:00:00Z"
            }]
        }"##;
        let list: SubscriptionsList = serde_json::from_str(json).unwrap();
        let sub = &list.subscriptions[0];
        assert_eq!(sub.kind(), SubscriptionKind::EthereumBlockchain);
        assert_eq!(sub.created_date(), "08/20/2021");
    }

    #[test]
    fn test_missing_fields_default() {
        let list: SubscriptionsList = serde_json::from_str("{}").unwrap();
        assert!(list.subscriptions.is_empty());
    }
}
