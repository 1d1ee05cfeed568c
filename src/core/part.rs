use crate::core::Category;
use crate::error::BuilderError;
use serde::{Deserialize, Serialize};

/// Cooler construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoolerKind {
    Air,
    Liquid,
}

impl std::fmt::Display for CoolerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoolerKind::Air => write!(f, "Air"),
            CoolerKind::Liquid => write!(f, "Liquid"),
        }
    }
}

impl std::str::FromStr for CoolerKind {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "air" => Ok(CoolerKind::Air),
            "liquid" | "aio" => Ok(CoolerKind::Liquid),
            _ => Err(BuilderError::Parse(format!("Invalid cooler type: {s}"))),
        }
    }
}

/// Board/chassis size, ordered smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormFactor {
    MiniItx,
    MicroAtx,
    Atx,
    ExtendedAtx,
}

impl FormFactor {
    /// A board of this size physically fits in a case rated for `case`
    pub fn fits_in(self, case: FormFactor) -> bool {
        self <= case
    }
}

impl std::fmt::Display for FormFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormFactor::MiniItx => write!(f, "Mini-ITX"),
            FormFactor::MicroAtx => write!(f, "mATX"),
            FormFactor::Atx => write!(f, "ATX"),
            FormFactor::ExtendedAtx => write!(f, "E-ATX"),
        }
    }
}

impl std::str::FromStr for FormFactor {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "miniitx" | "itx" => Ok(FormFactor::MiniItx),
            "matx" | "microatx" => Ok(FormFactor::MicroAtx),
            "atx" => Ok(FormFactor::Atx),
            "eatx" | "extendedatx" => Ok(FormFactor::ExtendedAtx),
            _ => Err(BuilderError::Parse(format!("Invalid form factor: {s}"))),
        }
    }
}

/// One purchasable component from the catalog
///
/// Parts are plain data. Which attributes matter depends on `category`;
/// an attribute that is `None` places no constraint on compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub id: String,
    pub category: Category,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    /// Whole currency units
    pub price: u64,
    /// Watts drawn at load
    #[serde(default)]
    pub power_draw: u32,
    #[serde(default)]
    pub socket: Option<String>,
    #[serde(default)]
    pub memory_type: Option<String>,
    #[serde(default)]
    pub form_factor: Option<String>,
    #[serde(default)]
    pub cooler_kind: Option<CoolerKind>,
    #[serde(default)]
    pub wattage_rating: Option<u32>,
    #[serde(default)]
    pub sticks_per_kit: Option<u32>,
    #[serde(default)]
    pub modular: Option<bool>,
    #[serde(default)]
    pub variant_id: Option<String>,
    /// Display-only score, 0-100
    #[serde(default)]
    pub performance: u8,
}

impl Part {
    pub fn new(id: &str, category: Category, name: &str, price: u64) -> Part {
        Part {
            id: id.to_string(),
            category,
            name: name.to_string(),
            brand: String::new(),
            price,
            power_draw: 0,
            socket: None,
            memory_type: None,
            form_factor: None,
            cooler_kind: None,
            wattage_rating: None,
            sticks_per_kit: None,
            modular: None,
            variant_id: None,
            performance: 0,
        }
    }

    pub fn with_brand(mut self, brand: &str) -> Self {
        self.brand = brand.to_string();
        self
    }

    pub fn with_power_draw(mut self, watts: u32) -> Self {
        self.power_draw = watts;
        self
    }

    pub fn with_socket(mut self, socket: &str) -> Self {
        self.socket = Some(socket.to_string());
        self
    }

    pub fn with_memory_type(mut self, memory_type: &str) -> Self {
        self.memory_type = Some(memory_type.to_string());
        self
    }

    pub fn with_form_factor(mut self, form_factor: &str) -> Self {
        self.form_factor = Some(form_factor.to_string());
        self
    }

    pub fn with_cooler_kind(mut self, kind: CoolerKind) -> Self {
        self.cooler_kind = Some(kind);
        self
    }

    pub fn with_wattage_rating(mut self, watts: u32) -> Self {
        self.wattage_rating = Some(watts);
        self
    }

    pub fn with_sticks_per_kit(mut self, sticks: u32) -> Self {
        self.sticks_per_kit = Some(sticks);
        self
    }

    pub fn with_modular(mut self, modular: bool) -> Self {
        self.modular = Some(modular);
        self
    }

    pub fn with_variant_id(mut self, variant_id: &str) -> Self {
        self.variant_id = Some(variant_id.to_string());
        self
    }

    pub fn with_performance(mut self, score: u8) -> Self {
        self.performance = score.min(100);
        self
    }

    /// Memory sticks in one unit of this part, never less than 1
    pub fn sticks_per_kit(&self) -> u32 {
        self.sticks_per_kit.unwrap_or(1).max(1)
    }

    /// Parsed form factor, `None` when absent or unrecognized
    pub fn parsed_form_factor(&self) -> Option<FormFactor> {
        self.form_factor.as_deref().and_then(|f| f.parse().ok())
    }

    /// Short spec badge used when listing the catalog
    pub fn badge(&self) -> String {
        if let Some(socket) = &self.socket {
            return socket.clone();
        }
        if let Some(memory_type) = &self.memory_type {
            return memory_type.clone();
        }
        if let Some(kind) = self.cooler_kind {
            return kind.to_string();
        }
        if let Some(watts) = self.wattage_rating {
            return format!("{watts}W");
        }
        "Std".to_string()
    }
}
