//! Carbon footprint report SKUs and partner commission.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::model::{CompanySize, SizeBand};

/// Share of RRP paid out as commission.
const COMMISSION_RATE: Decimal = dec!(0.35);

/// One priced service package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sku {
    pub code: String,
    /// Size tier shown alongside the SKU, e.g. `Small (11-25)`.
    pub tier: String,
    pub description: String,
    pub min_employees: u32,
    pub max_employees: u32,
    pub rrp: Decimal,
}

impl Sku {
    fn new(code: &str, tier: &str, min_employees: u32, max_employees: u32, rrp: Decimal) -> Self {
        Self {
            code: code.to_string(),
            tier: tier.to_string(),
            description: format!(
                "Carbon Footprint Report ({min_employees}-{max_employees} employees)"
            ),
            min_employees,
            max_employees,
            rrp,
        }
    }

    /// 35% of RRP, split in two: the first share rounds down, the second up.
    pub fn commission(&self) -> Commission {
        let total = self.rrp * COMMISSION_RATE;
        let half = total / dec!(2);
        Commission {
            total,
            first_share: half.floor(),
            second_share: half.ceil(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commission {
    pub total: Decimal,
    pub first_share: Decimal,
    pub second_share: Decimal,
}

/// A SKU offered to a lead, with its commission worked out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuRecommendation {
    #[serde(flatten)]
    pub sku: Sku,
    pub commission: Commission,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRecommendation {
    pub tier: String,
    pub sku_recommendations: Vec<SkuRecommendation>,
}

/// The SKU list, ordered by employee band.
#[derive(Debug, Clone)]
pub struct PricingTable {
    skus: Vec<Sku>,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            skus: vec![
                Sku::new("CFR-1", "Micro (1-10)", 1, 10, dec!(1380)),
                Sku::new("CFR-2", "Small (11-25)", 11, 25, dec!(1840)),
                Sku::new("CFR-3", "Medium (26-100)", 26, 100, dec!(2300)),
                Sku::new("CFR-4", "Large (101+)", 101, 250, dec!(2760)),
            ],
        }
    }
}

impl PricingTable {
    pub fn skus(&self) -> &[Sku] {
        &self.skus
    }

    /// Pick the SKU for an employee count. Counts past the last band use the
    /// largest SKU.
    pub fn for_employees(&self, count: u32) -> Option<&Sku> {
        self.skus
            .iter()
            .find(|s| count >= s.min_employees && count <= s.max_employees)
            .or_else(|| self.skus.iter().filter(|s| count > s.max_employees).last())
    }

    /// Categories use a representative count: small → 11-25, medium →
    /// 26-100, large → 101+.
    pub fn for_size(&self, size: &CompanySize) -> Option<&Sku> {
        let count = match size {
            CompanySize::Employees(n) => *n,
            CompanySize::Category(SizeBand::Small) => 25,
            CompanySize::Category(SizeBand::Medium) => 100,
            CompanySize::Category(SizeBand::Large) => 250,
        };
        self.for_employees(count)
    }

    /// The tier label comes from the chosen SKU's band.
    pub fn recommend(&self, size: &CompanySize) -> PricingRecommendation {
        let sku = self.for_size(size);
        PricingRecommendation {
            tier: sku.map_or_else(|| "Unspecified".to_string(), |s| s.tier.clone()),
            sku_recommendations: sku
                .map(|sku| SkuRecommendation {
                    sku: sku.clone(),
                    commission: sku.commission(),
                })
                .into_iter()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(table: &PricingTable, size: CompanySize) -> &str {
        table.for_size(&size).map(|s| s.code.as_str()).unwrap_or("none")
    }

    #[test]
    fn categories_map_to_skus() {
        let table = PricingTable::default();
        assert_eq!(code(&table, CompanySize::Category(SizeBand::Small)), "CFR-2");
        assert_eq!(code(&table, CompanySize::Category(SizeBand::Medium)), "CFR-3");
        assert_eq!(code(&table, CompanySize::Category(SizeBand::Large)), "CFR-4");
    }

    #[test]
    fn employee_counts_map_to_bands() {
        let table = PricingTable::default();
        assert_eq!(code(&table, CompanySize::Employees(1)), "CFR-1");
        assert_eq!(code(&table, CompanySize::Employees(10)), "CFR-1");
        assert_eq!(code(&table, CompanySize::Employees(11)), "CFR-2");
        assert_eq!(code(&table, CompanySize::Employees(26)), "CFR-3");
        assert_eq!(code(&table, CompanySize::Employees(101)), "CFR-4");
        assert_eq!(code(&table, CompanySize::Employees(5000)), "CFR-4");
        assert_eq!(code(&table, CompanySize::Employees(0)), "none");
    }

    #[test]
    fn commission_splits_round_down_then_up() {
        let table = PricingTable::default();
        let cfr1 = table.for_employees(5).unwrap().commission();
        assert_eq!(cfr1.total, dec!(483));
        assert_eq!(cfr1.first_share, dec!(241));
        assert_eq!(cfr1.second_share, dec!(242));

        let cfr2 = table.for_employees(20).unwrap().commission();
        assert_eq!(cfr2.total, dec!(644));
        assert_eq!(cfr2.first_share, dec!(322));
        assert_eq!(cfr2.second_share, dec!(322));
    }

    #[test]
    fn recommendation_carries_tier_and_commission() {
        let table = PricingTable::default();
        let rec = table.recommend(&CompanySize::Employees(40));
        assert_eq!(rec.tier, "Medium (26-100)");
        assert_eq!(rec.sku_recommendations.len(), 1);
        assert_eq!(rec.sku_recommendations[0].sku.code, "CFR-3");
        assert_eq!(rec.sku_recommendations[0].commission.second_share, dec!(403));
    }

    #[test]
    fn tier_label_matches_chosen_sku() {
        let table = PricingTable::default();
        let rec = table.recommend(&CompanySize::Employees(5));
        assert_eq!(rec.tier, "Micro (1-10)");
        assert_eq!(rec.sku_recommendations[0].sku.code, "CFR-1");

        let rec = table.recommend(&CompanySize::Category(SizeBand::Small));
        assert_eq!(rec.tier, "Small (11-25)");
        assert_eq!(rec.sku_recommendations[0].sku.code, "CFR-2");

        let rec = table.recommend(&CompanySize::Employees(0));
        assert_eq!(rec.tier, "Unspecified");
        assert!(rec.sku_recommendations.is_empty());
    }
}
