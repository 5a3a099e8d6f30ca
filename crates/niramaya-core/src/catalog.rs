//! # Catalog
//!
//! Read-only test and package catalog the site sells from.
//!
//! The data ships inside the crate (`data/catalog.json`) and is parsed once
//! by [`Catalog::builtin`]. Prices are paise, ceilings are basis points, the
//! same units the pricing engine uses.
//!
//! ```rust
//! use niramaya_core::catalog::Catalog;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let cbc = catalog.line_item("CBC001", 1).unwrap();
//! assert_eq!(cbc.name, "Complete Blood Count (CBC)");
//! ```

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CatalogLineItem, DiscountRate};
use crate::validation::{
    validate_code, validate_discount_rate, validate_pincode, validate_price,
    validate_search_query,
};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Category filter value that matches every category.
pub const ALL_CATEGORIES: &str = "All";

// =============================================================================
// Entries
// =============================================================================

/// A single diagnostic test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LabTest {
    pub code: String,
    pub name: String,
    pub sample_type: String,
    /// Report turnaround ("12 hours").
    pub turnaround: String,
    pub mrp: Money,
    pub max_discount_bps: u32,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Who a package is designed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Both,
}

/// A bundled health checkup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HealthPackage {
    pub code: String,
    pub name: String,
    pub description: String,
    pub inclusions: Vec<String>,
    pub sample_types: Vec<String>,
    pub turnaround: String,
    pub mrp: Money,
    pub max_discount_bps: u32,
    pub category: String,
    pub best_for: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
}

impl HealthPackage {
    /// Whether the package shows up under a gender filter.
    ///
    /// No filter, a `Both` filter, or a package marked `Both` always match.
    pub fn suits(&self, gender: Option<Gender>) -> bool {
        match gender {
            None | Some(Gender::Both) => true,
            Some(wanted) => matches!(self.gender, Some(Gender::Both)) || self.gender == Some(wanted),
        }
    }
}

/// Anything that can be put in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogEntry {
    Test(LabTest),
    Package(HealthPackage),
}

impl CatalogEntry {
    pub fn code(&self) -> &str {
        match self {
            CatalogEntry::Test(t) => &t.code,
            CatalogEntry::Package(p) => &p.code,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CatalogEntry::Test(t) => &t.name,
            CatalogEntry::Package(p) => &p.name,
        }
    }

    pub fn mrp(&self) -> Money {
        match self {
            CatalogEntry::Test(t) => t.mrp,
            CatalogEntry::Package(p) => p.mrp,
        }
    }

    pub fn max_discount(&self) -> DiscountRate {
        match self {
            CatalogEntry::Test(t) => DiscountRate::from_bps(t.max_discount_bps),
            CatalogEntry::Package(p) => DiscountRate::from_bps(p.max_discount_bps),
        }
    }

    /// One unit of this entry, ready for the pricing engine.
    pub fn to_line_item(&self) -> CatalogLineItem {
        CatalogLineItem::new(self.code(), self.name(), self.mrp(), self.max_discount())
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogData {
    tests: Vec<LabTest>,
    packages: Vec<HealthPackage>,
    serviceable_pincodes: Vec<String>,
}

/// The loaded catalog.
///
/// ## Invariants
/// - Codes are unique across tests and packages
/// - Every price is non-negative and every ceiling is at most 100%
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    pincodes: BTreeSet<String>,
}

impl Catalog {
    /// Parses the catalog bundled with the crate.
    pub fn builtin() -> CoreResult<Self> {
        Catalog::from_json(BUILTIN_CATALOG)
    }

    /// Parses and validates catalog JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let data: CatalogData = serde_json::from_str(json)?;

        let entries: Vec<CatalogEntry> = data
            .tests
            .into_iter()
            .map(CatalogEntry::Test)
            .chain(data.packages.into_iter().map(CatalogEntry::Package))
            .collect();

        let mut seen = HashSet::new();
        for entry in &entries {
            validate_code(entry.code())?;
            validate_price(entry.mrp())?;
            validate_discount_rate(entry.max_discount())?;
            if !seen.insert(entry.code()) {
                return Err(ValidationError::Duplicate {
                    field: "code".to_string(),
                    value: entry.code().to_string(),
                }
                .into());
            }
        }

        let mut pincodes = BTreeSet::new();
        for pincode in data.serviceable_pincodes {
            validate_pincode(&pincode)?;
            pincodes.insert(pincode.trim().to_string());
        }

        Ok(Catalog { entries, pincodes })
    }

    /// Every entry, tests first, in file order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn tests(&self) -> impl Iterator<Item = &LabTest> {
        self.entries.iter().filter_map(|e| match e {
            CatalogEntry::Test(t) => Some(t),
            CatalogEntry::Package(_) => None,
        })
    }

    pub fn packages(&self) -> impl Iterator<Item = &HealthPackage> {
        self.entries.iter().filter_map(|e| match e {
            CatalogEntry::Package(p) => Some(p),
            CatalogEntry::Test(_) => None,
        })
    }

    /// Looks up an entry by exact code.
    pub fn find(&self, code: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.code() == code)
    }

    /// Builds a line item for `code` with the given quantity.
    pub fn line_item(&self, code: &str, quantity: i64) -> CoreResult<CatalogLineItem> {
        self.find(code)
            .map(|entry| entry.to_line_item().with_quantity(quantity))
            .ok_or_else(|| CoreError::CatalogItemNotFound(code.to_string()))
    }

    /// Tests whose name or code contains `query` (case-insensitive).
    ///
    /// `None` or `"All"` as category matches every category.
    pub fn search_tests(&self, query: &str, category: Option<&str>) -> CoreResult<Vec<&LabTest>> {
        let needle = validate_search_query(query)?.to_lowercase();

        Ok(self
            .tests()
            .filter(|t| {
                t.name.to_lowercase().contains(&needle) || t.code.to_lowercase().contains(&needle)
            })
            .filter(|t| category_matches(category, &t.category))
            .collect())
    }

    /// Packages in `category` that suit `gender`.
    pub fn filter_packages(&self, category: Option<&str>, gender: Option<Gender>) -> Vec<&HealthPackage> {
        self.packages()
            .filter(|p| category_matches(category, &p.category))
            .filter(|p| p.suits(gender))
            .collect()
    }

    /// Distinct test categories in first-seen order.
    pub fn test_categories(&self) -> Vec<&str> {
        distinct(self.tests().map(|t| t.category.as_str()))
    }

    /// Distinct package categories in first-seen order.
    pub fn package_categories(&self) -> Vec<&str> {
        distinct(self.packages().map(|p| p.category.as_str()))
    }

    /// Whether home collection is offered at `pincode`.
    pub fn is_serviceable(&self, pincode: &str) -> CoreResult<bool> {
        validate_pincode(pincode)?;
        Ok(self.pincodes.contains(pincode.trim()))
    }
}

fn category_matches(filter: Option<&str>, category: &str) -> bool {
    match filter {
        None => true,
        Some(f) if f == ALL_CATEGORIES => true,
        Some(f) => f == category,
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = catalog();
        assert_eq!(catalog.tests().count(), 8);
        assert_eq!(catalog.packages().count(), 5);
        assert_eq!(catalog.entries().len(), 13);
    }

    #[test]
    fn test_find_and_line_item() {
        let catalog = catalog();

        let lipid = catalog.find("LIPID001").unwrap();
        assert!(matches!(lipid, CatalogEntry::Test(_)));
        assert_eq!(lipid.mrp(), Money::from_rupees(700));
        assert_eq!(lipid.max_discount().bps(), 3000);

        let corporate = catalog.line_item("CORPORATE001", 2).unwrap();
        assert_eq!(corporate.unit_price, Money::from_rupees(4500));
        assert_eq!(corporate.max_discount_bps, 4000);
        assert_eq!(corporate.quantity, 2);

        assert!(matches!(
            catalog.line_item("NOPE001", 1),
            Err(CoreError::CatalogItemNotFound(_))
        ));
    }

    #[test]
    fn test_search_tests() {
        let catalog = catalog();

        let vitamins = catalog.search_tests("vitamin", None).unwrap();
        assert_eq!(vitamins.len(), 2);

        let by_code = catalog.search_tests("cbc", Some(ALL_CATEGORIES)).unwrap();
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].code, "CBC001");

        let organ = catalog.search_tests("", Some("Organ Function")).unwrap();
        let codes: Vec<&str> = organ.iter().map(|t| t.code.as_str()).collect();
        assert_eq!(codes, ["LFT001", "KFT001"]);

        assert!(catalog.search_tests("vitamin", Some("Routine")).unwrap().is_empty());
        assert_eq!(catalog.search_tests("   ", None).unwrap().len(), 8);
    }

    #[test]
    fn test_filter_packages_by_gender() {
        let catalog = catalog();

        assert_eq!(catalog.filter_packages(None, None).len(), 5);
        assert_eq!(catalog.filter_packages(None, Some(Gender::Both)).len(), 5);
        // Women's package is female-only, everything else is for both
        assert_eq!(catalog.filter_packages(None, Some(Gender::Male)).len(), 4);
        assert_eq!(catalog.filter_packages(None, Some(Gender::Female)).len(), 5);

        let cardiac = catalog.filter_packages(Some("Cardiac"), Some(Gender::Female));
        assert_eq!(cardiac.len(), 1);
        assert_eq!(cardiac[0].code, "CARDIAC001");
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = catalog();
        assert_eq!(
            catalog.test_categories(),
            [
                "Routine",
                "Organ Function",
                "Heart Health",
                "Hormonal",
                "Diabetes",
                "Vitamins"
            ]
        );
        assert_eq!(catalog.package_categories().len(), 5);
    }

    #[test]
    fn test_is_serviceable() {
        let catalog = catalog();
        assert!(catalog.is_serviceable("110001").unwrap());
        assert!(catalog.is_serviceable(" 201008 ").unwrap());
        assert!(!catalog.is_serviceable("400001").unwrap());
        assert!(catalog.is_serviceable("abc").is_err());
    }

    #[test]
    fn test_from_json_rejects_duplicate_codes() {
        let json = r#"{
            "tests": [
                {"code":"A1","name":"A","sampleType":"Blood","turnaround":"6 hours","mrp":100,"maxDiscountBps":0,"category":"X"},
                {"code":"A1","name":"B","sampleType":"Blood","turnaround":"6 hours","mrp":100,"maxDiscountBps":0,"category":"X"}
            ],
            "packages": [],
            "serviceablePincodes": []
        }"#;

        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_from_json_rejects_bad_ceiling() {
        let json = r#"{
            "tests": [
                {"code":"A1","name":"A","sampleType":"Blood","turnaround":"6 hours","mrp":100,"maxDiscountBps":20000,"category":"X"}
            ],
            "packages": [],
            "serviceablePincodes": []
        }"#;

        assert!(matches!(
            Catalog::from_json(json),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_from_json_reports_malformed_data() {
        assert!(matches!(
            Catalog::from_json("{ not json"),
            Err(CoreError::CatalogData(_))
        ));
    }
}
