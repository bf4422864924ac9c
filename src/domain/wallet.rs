use serde::{Deserialize, Serialize};

/// A merchant's receiving wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: u32,
    pub owner_id: u32,
    pub label: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Receiving addresses, handed out to sales in order.
    #[serde(default)]
    pub addresses: Vec<String>,
}

fn default_active() -> bool {
    true
}

impl Wallet {
    /// Address used for the sale with the given 1-based index.
    pub fn address_for_index(&self, sale_index: u32) -> Option<&str> {
        if self.addresses.is_empty() || sale_index == 0 {
            return None;
        }
        let slot = (sale_index as usize - 1) % self.addresses.len();
        self.addresses.get(slot).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_for_index_cycles() {
        let wallet = Wallet {
            id: 1,
            owner_id: 1,
            label: "main".to_string(),
            is_active: true,
            addresses: vec!["qa".to_string(), "qb".to_string()],
        };
        assert_eq!(wallet.address_for_index(1), Some("qa"));
        assert_eq!(wallet.address_for_index(2), Some("qb"));
        assert_eq!(wallet.address_for_index(3), Some("qa"));
        assert_eq!(wallet.address_for_index(0), None);
    }

    #[test]
    fn test_wallet_without_addresses() {
        let wallet = Wallet {
            id: 1,
            owner_id: 1,
            label: "empty".to_string(),
            is_active: true,
            addresses: Vec::new(),
        };
        assert_eq!(wallet.address_for_index(1), None);
    }
}
