use crate::error::{BuilderError, Result};
use serde::{Deserialize, Serialize};

/// The eight component slots of a build, in display order
///
/// This set is closed: every validation branch in the rule set and the
/// engine is written against exactly these keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cpu,
    Motherboard,
    #[serde(alias = "ram")]
    Memory,
    Gpu,
    Storage,
    Cooler,
    Psu,
    Case,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 8] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Memory,
        Category::Gpu,
        Category::Storage,
        Category::Cooler,
        Category::Psu,
        Category::Case,
    ];

    /// Canonical lowercase key
    pub fn key(self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Motherboard => "motherboard",
            Category::Memory => "memory",
            Category::Gpu => "gpu",
            Category::Storage => "storage",
            Category::Cooler => "cooler",
            Category::Psu => "psu",
            Category::Case => "case",
        }
    }

    /// Human label shown on the bill and in the quote
    pub fn label(self) -> &'static str {
        match self {
            Category::Cpu => "Processors",
            Category::Motherboard => "Motherboards",
            Category::Memory => "Memory",
            Category::Gpu => "Graphics Cards",
            Category::Storage => "Storage",
            Category::Cooler => "Cooling",
            Category::Psu => "Power Supply",
            Category::Case => "Cabinet",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Category {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cpu" => Ok(Category::Cpu),
            "motherboard" => Ok(Category::Motherboard),
            // storefront tags still use the old key
            "memory" | "ram" => Ok(Category::Memory),
            "gpu" => Ok(Category::Gpu),
            "storage" => Ok(Category::Storage),
            "cooler" => Ok(Category::Cooler),
            "psu" => Ok(Category::Psu),
            "case" => Ok(Category::Case),
            _ => Err(BuilderError::Parse(format!(
                "Invalid category: {s}. Valid options: cpu, motherboard, memory, gpu, storage, cooler, psu, case"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("cpu".parse::<Category>().unwrap(), Category::Cpu);
        assert_eq!(" PSU ".parse::<Category>().unwrap(), Category::Psu);
        assert_eq!("ram".parse::<Category>().unwrap(), Category::Memory);
        assert!("monitor".parse::<Category>().is_err());
    }

    #[test]
    fn test_keys_round_trip_through_parse() {
        for category in Category::ALL {
            assert_eq!(category.key().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_display_order_and_labels() {
        assert_eq!(Category::ALL.len(), 8);
        assert!(Category::ALL.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Category::Case.label(), "Cabinet");
        assert_eq!(Category::Cooler.label(), "Cooling");
    }

    #[test]
    fn test_serde_alias() {
        let parsed: Category = serde_json::from_str("\"ram\"").unwrap();
        assert_eq!(parsed, Category::Memory);
        assert_eq!(serde_json::to_string(&Category::Gpu).unwrap(), "\"gpu\"");
    }
}
