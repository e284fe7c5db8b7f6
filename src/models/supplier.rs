//! Supplier records.

use serde::{Deserialize, Serialize};

/// A supplier of one or more products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    /// Supplier id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Inventory item ids this supplier can deliver.
    pub product_ids: Vec<u64>,
    /// Probability of on-time, in-full delivery, 0..=1.
    pub reliability: f64,
    /// Nominal lead time in days.
    pub lead_time_days: f64,
    /// Relative lead-time spread, 0..=1.
    pub lead_time_variability: f64,
    /// Price multiplier relative to list unit cost.
    pub cost_factor: f64,
}

impl Supplier {
    /// Returns `true` if this supplier delivers `product_id`.
    pub fn supplies(&self, product_id: u64) -> bool {
        self.product_ids.contains(&product_id)
    }

    /// Returns `true` if the two suppliers cover at least one common product.
    pub fn shares_product_with(&self, other: &Supplier) -> bool {
        self.product_ids.iter().any(|&p| other.supplies(p))
    }

    /// Picks the backup for `primary` among `candidates`.
    ///
    /// A backup is any other supplier sharing a product with `primary`. The
    /// most reliable wins; ties go to the lower id.
    pub fn find_backup<'a>(primary: &Supplier, candidates: &'a [Supplier]) -> Option<&'a Supplier> {
        candidates
            .iter()
            .filter(|s| s.id != primary.id && s.shares_product_with(primary))
            .min_by(|a, b| {
                b.reliability
                    .total_cmp(&a.reliability)
                    .then_with(|| a.id.cmp(&b.id))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier(id: u64, products: &[u64], reliability: f64) -> Supplier {
        Supplier {
            id,
            name: format!("S{id}"),
            product_ids: products.to_vec(),
            reliability,
            lead_time_days: 5.0,
            lead_time_variability: 0.1,
            cost_factor: 1.0,
        }
    }

    #[test]
    fn test_shares_product() {
        let a = supplier(1, &[1, 2], 0.9);
        let b = supplier(2, &[2, 3], 0.9);
        let c = supplier(3, &[4], 0.9);
        assert!(a.shares_product_with(&b));
        assert!(!a.shares_product_with(&c));
    }

    #[test]
    fn test_find_backup_prefers_reliability() {
        let primary = supplier(1, &[1, 2], 0.9);
        let all = vec![
            primary.clone(),
            supplier(2, &[2], 0.7),
            supplier(3, &[1], 0.95),
            supplier(4, &[9], 0.99),
        ];
        let backup = Supplier::find_backup(&primary, &all).expect("has backup");
        assert_eq!(backup.id, 3);
    }

    #[test]
    fn test_find_backup_tie_lower_id() {
        let primary = supplier(1, &[1], 0.9);
        let all = vec![supplier(5, &[1], 0.8), supplier(2, &[1], 0.8)];
        assert_eq!(Supplier::find_backup(&primary, &all).map(|s| s.id), Some(2));
    }

    #[test]
    fn test_find_backup_none() {
        let primary = supplier(1, &[1], 0.9);
        assert!(Supplier::find_backup(&primary, &[primary.clone()]).is_none());
    }
}
