//! Investment catalog
//!
//! The fixed set of targets a user can pick from, each with an expected
//! annual return. The catalog is built once at startup (either the built-in
//! table or a JSON file) and shared read-only by every session.

use crate::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Kind of investment target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Broad asset class (stocks, bonds, real estate, funds)
    AssetClass,
    /// A named company
    Company,
}

/// Identifier of a catalog entry
///
/// Only produced by [`InvestmentCatalog::lookup`], so holding one means the
/// target was accepted by the catalog that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(String);

impl TargetId {
    /// Normalized catalog key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One investment target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Lookup key, matched case-insensitively
    pub key: String,
    /// Name shown to the user
    pub display_name: String,
    /// Expected annual return as a fraction (0.08 = 8%)
    pub annual_rate: f64,
    /// Longer description sent when the target is chosen
    pub description: String,
    /// One-line risk profile used in the options overview
    pub risk_note: String,
    /// Asset class or company
    pub kind: TargetKind,
    /// Icon shown before the entry in the overview
    #[serde(default)]
    pub icon: Option<String>,
}

impl CatalogEntry {
    /// Annual rate as a percentage
    pub fn rate_percent(&self) -> f64 {
        self.annual_rate * 100.0
    }

    fn normalized_key(&self) -> String {
        normalize_key(&self.key)
    }
}

fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Immutable mapping from target name to rate and description
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for InvestmentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl InvestmentCatalog {
    /// Build a catalog from entries, rejecting duplicate keys and unusable rates
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(AdvisorError::CatalogError(
                "catalog must contain at least one entry".to_string(),
            ));
        }

        let mut seen = Vec::with_capacity(entries.len());
        for entry in &entries {
            let key = entry.normalized_key();
            if key.is_empty() {
                return Err(AdvisorError::CatalogError("empty target key".to_string()));
            }
            if seen.contains(&key) {
                return Err(AdvisorError::CatalogError(format!(
                    "duplicate target key: {}",
                    entry.key
                )));
            }
            if !entry.annual_rate.is_finite() || entry.annual_rate <= -1.0 {
                return Err(AdvisorError::CatalogError(format!(
                    "invalid annual rate {} for {}",
                    entry.annual_rate, entry.key
                )));
            }
            seen.push(key);
        }

        Ok(Self { entries })
    }

    /// Load a catalog from a JSON array of entries
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Load a catalog from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading investment catalog from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The hardcoded catalog: four asset classes and a handful of companies
    pub fn builtin() -> Self {
        let asset = |key: &str, rate: f64, icon: &str, risk: &str, description: &str| CatalogEntry {
            key: key.to_string(),
            display_name: key.to_string(),
            annual_rate: rate,
            description: description.to_string(),
            risk_note: risk.to_string(),
            kind: TargetKind::AssetClass,
            icon: Some(icon.to_string()),
        };
        let company = |key: &str, name: &str, rate: f64, risk: &str, description: &str| {
            CatalogEntry {
                key: key.to_string(),
                display_name: name.to_string(),
                annual_rate: rate,
                description: description.to_string(),
                risk_note: risk.to_string(),
                kind: TargetKind::Company,
                icon: Some("🏢".to_string()),
            }
        };

        Self {
            entries: vec![
                asset(
                    "الأسهم",
                    0.08,
                    "📈",
                    "مخاطرة عالية، ولكن عوائد محتملة عالية.",
                    "تستثمر في شركات مثل Apple، Microsoft، أو الشركات المحلية.",
                ),
                asset(
                    "السندات",
                    0.04,
                    "💵",
                    "مخاطرة أقل، وعوائد ثابتة.",
                    "تستثمر في سندات حكومية مثل السندات الأمريكية أو الأوروبية.",
                ),
                asset(
                    "العقارات",
                    0.06,
                    "🏠",
                    "استثمار آمن، مع نمو طويل الأجل.",
                    "يمكنك شراء عقار سكني أو استثماري في مناطق نامية مثل العاصمة الإدارية الجديدة أو القاهرة الجديدة.",
                ),
                asset(
                    "الصناديق المشتركة",
                    0.05,
                    "📊",
                    "استثمارات متنوعة ومخاطرة معتدلة.",
                    "استثمارات متنوعة في أسهم وسندات مختلفة لتحقيق توازن في المخاطر.",
                ),
                company(
                    "apple",
                    "Apple",
                    0.12,
                    "سهم تقني كبير، تقلبات متوسطة.",
                    "Apple: شركة تقنية رائدة في الهواتف والحواسيب والخدمات الرقمية، بتدفقات نقدية قوية.",
                ),
                company(
                    "microsoft",
                    "Microsoft",
                    0.10,
                    "سهم تقني مستقر نسبياً.",
                    "Microsoft: برمجيات وخدمات سحابية (Azure) ودخل متكرر من الاشتراكات.",
                ),
                company(
                    "amazon",
                    "Amazon",
                    0.11,
                    "نمو مرتفع مع تقلبات ملحوظة.",
                    "Amazon: تجارة إلكترونية وخدمات سحابية (AWS) بهوامش متزايدة.",
                ),
                company(
                    "tesla",
                    "Tesla",
                    0.15,
                    "مخاطرة مرتفعة جداً وتقلبات حادة.",
                    "Tesla: سيارات كهربائية وتخزين طاقة، سهم شديد التقلب.",
                ),
            ],
        }
    }

    /// Case-insensitive lookup of a target name
    pub fn lookup(&self, name: &str) -> Option<TargetId> {
        let key = normalize_key(name);
        self.entries
            .iter()
            .find(|entry| entry.normalized_key() == key)
            .map(|entry| TargetId(entry.normalized_key()))
    }

    /// Entry for a previously issued identifier
    pub fn get(&self, id: &TargetId) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.normalized_key() == id.0)
    }

    /// Annual rate for a target name, matched case-insensitively
    pub fn rate_of(&self, name: &str) -> Option<f64> {
        let id = self.lookup(name)?;
        self.get(&id).map(|entry| entry.annual_rate)
    }

    /// All entries in catalog order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries of one kind
    pub fn entries_of(&self, kind: TargetKind) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a validated catalog
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog() {
        let catalog = InvestmentCatalog::builtin();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.entries_of(TargetKind::AssetClass).count(), 4);
        assert_eq!(catalog.rate_of("السندات"), Some(0.04));
        assert_eq!(catalog.rate_of("apple"), Some(0.12));
        // builtin data must pass the same validation as loaded data
        assert!(InvestmentCatalog::new(catalog.entries().to_vec()).is_ok());
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let catalog = InvestmentCatalog::builtin();
        let id = catalog.lookup("Apple").unwrap();
        assert_eq!(id.as_str(), "apple");
        assert_eq!(catalog.lookup("APPLE"), Some(id.clone()));
        assert_eq!(catalog.lookup("  apple "), Some(id.clone()));
        assert_eq!(catalog.get(&id).unwrap().display_name, "Apple");
    }

    #[test]
    fn test_lookup_unknown() {
        let catalog = InvestmentCatalog::builtin();
        assert!(catalog.lookup("bitcoin").is_none());
        assert!(catalog.lookup("").is_none());
        assert!(catalog.lookup("apple inc").is_none());
        assert!(catalog.rate_of("bitcoin").is_none());
    }

    #[test]
    fn test_rejects_duplicates_case_insensitively() {
        let mut entries = InvestmentCatalog::builtin().entries().to_vec();
        let mut dup = entries[4].clone();
        dup.key = "APPLE".to_string();
        entries.push(dup);

        let err = InvestmentCatalog::new(entries).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_rejects_bad_rate_and_empty() {
        let mut entry = InvestmentCatalog::builtin().entries()[0].clone();
        entry.annual_rate = f64::NAN;
        assert!(InvestmentCatalog::new(vec![entry]).is_err());
        assert!(InvestmentCatalog::new(vec![]).is_err());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"key": "Gold", "display_name": "Gold", "annual_rate": 0.07,
                 "description": "Physical gold", "risk_note": "Hedge",
                 "kind": "asset_class"}}]"#
        )
        .unwrap();

        let catalog = InvestmentCatalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.rate_of("gold"), Some(0.07));
        assert!(catalog.entries()[0].icon.is_none());
    }

    #[test]
    fn test_from_missing_file() {
        let result = InvestmentCatalog::from_file("/definitely/not/here.json");
        assert!(matches!(result, Err(AdvisorError::IoError(_))));
    }

    #[test]
    fn test_rate_percent() {
        let catalog = InvestmentCatalog::builtin();
        let id = catalog.lookup("tesla").unwrap();
        let entry = catalog.get(&id).unwrap();
        assert!((entry.rate_percent() - 15.0).abs() < 1e-9);
    }
}
