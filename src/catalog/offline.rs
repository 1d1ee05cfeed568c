use crate::catalog::{Catalog, CatalogSource};
use crate::core::{Category, CoolerKind, Part};
use crate::error::Result;

/// The built-in catalog used until (or instead of) a live fetch
pub fn offline_catalog() -> Catalog {
    vec![
        // processors
        Part::new("c1", Category::Cpu, "Intel Core i5-12400F", 9500)
            .with_brand("Intel")
            .with_socket("LGA1700")
            .with_power_draw(65)
            .with_performance(40),
        Part::new("c2", Category::Cpu, "Intel Core i5-13600K", 24500)
            .with_brand("Intel")
            .with_socket("LGA1700")
            .with_power_draw(125)
            .with_performance(75),
        Part::new("c4", Category::Cpu, "AMD Ryzen 5 7600X", 19500)
            .with_brand("AMD")
            .with_socket("AM5")
            .with_power_draw(105)
            .with_performance(60),
        // motherboards
        Part::new("m1", Category::Motherboard, "MSI PRO B760M-E DDR4", 9200)
            .with_brand("MSI")
            .with_socket("LGA1700")
            .with_memory_type("DDR4")
            .with_form_factor("mATX")
            .with_performance(30),
        Part::new("m3", Category::Motherboard, "Gigabyte B650M Gaming X", 14500)
            .with_brand("Gigabyte")
            .with_socket("AM5")
            .with_memory_type("DDR5")
            .with_form_factor("mATX")
            .with_performance(50),
        // memory
        Part::new("r1", Category::Memory, "Corsair Vengeance LPX 16GB (8x2)", 3800)
            .with_brand("Corsair")
            .with_memory_type("DDR4")
            .with_power_draw(5)
            .with_sticks_per_kit(2)
            .with_performance(30),
        Part::new("r3", Category::Memory, "XPG Lancer RGB 32GB (16x2)", 10500)
            .with_brand("XPG")
            .with_memory_type("DDR5")
            .with_power_draw(10)
            .with_sticks_per_kit(2)
            .with_performance(80),
        // graphics
        Part::new("g1", Category::Gpu, "Zotac RTX 3060", 24500)
            .with_brand("NVIDIA")
            .with_power_draw(170)
            .with_performance(45),
        // storage
        Part::new("s1", Category::Storage, "WD Blue SN580 1TB", 5600)
            .with_brand("WD")
            .with_power_draw(5)
            .with_performance(40),
        // power
        Part::new("p2", Category::Psu, "Deepcool PM750D 750W", 7500)
            .with_brand("Deepcool")
            .with_wattage_rating(750)
            .with_modular(false)
            .with_performance(60),
        // chassis
        Part::new("ca1", Category::Case, "Ant Esports ICE-100", 3500)
            .with_brand("Ant Esports")
            .with_form_factor("mATX")
            .with_performance(20),
        // cooling
        Part::new("co1", Category::Cooler, "Deepcool AG400", 2100)
            .with_brand("Deepcool")
            .with_cooler_kind(CoolerKind::Air)
            .with_performance(30),
    ]
    .into_iter()
    .collect()
}

/// Catalog source backed by `offline_catalog`
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSource;

impl CatalogSource for OfflineSource {
    fn name(&self) -> &str {
        "offline"
    }

    fn fetch(&self) -> Result<Catalog> {
        Ok(offline_catalog())
    }
}
