//! Catalog and quote integration tests
//!
//! Covers the path from a storefront response to a sent quote: parsing,
//! fallback to the offline catalog, building from the loaded parts, and
//! rendering the inquiry and its link.

use rig_builder::catalog::{parse_response, RefreshOutcome, CATALOG_UNAVAILABLE_ADVISORY};
use rig_builder::{
    offline_catalog, render_message, BuildEngine, BuilderError, Catalog, CatalogProvider,
    CatalogSource, Category, Config, QuoteDispatcher, Result,
};
use std::io::Write;
use tempfile::NamedTempFile;

const STOREFRONT_BODY: &str = r#"{
  "data": {
    "products": {
      "edges": [
        {"node": {
          "id": "gid://shopify/Product/1",
          "title": "AMD Ryzen 7 7800X3D",
          "vendor": "AMD",
          "tags": ["Builder_Component", "category:cpu", "socket:AM5", "watts:120"],
          "variants": {"edges": [{"node": {
            "id": "gid://shopify/ProductVariant/11",
            "price": {"amount": "36999.50", "currencyCode": "INR"}
          }}]}
        }},
        {"node": {
          "id": "gid://shopify/Product/2",
          "title": "ASUS TUF B650-Plus",
          "vendor": "ASUS",
          "tags": ["Builder_Component", "category:motherboard", "socket:am5", "ramtype:DDR5", "size:ATX"],
          "variants": {"edges": [{"node": {
            "id": "gid://shopify/ProductVariant/21",
            "price": {"amount": "18500.0", "currencyCode": "INR"}
          }}]}
        }},
        {"node": {
          "id": "gid://shopify/Product/3",
          "title": "Corsair RM850e",
          "vendor": "Corsair",
          "tags": ["Builder_Component", "category:psu", "watts:850W", "modular:true"],
          "variants": {"edges": [{"node": {
            "id": "gid://shopify/ProductVariant/31",
            "price": {"amount": "11200.00", "currencyCode": "INR"}
          }}]}
        }},
        {"node": {
          "id": "gid://shopify/Product/4",
          "title": "Mystery Gadget",
          "vendor": "Acme",
          "tags": ["Builder_Component", "category:monitor"]
        }},
        {"node": {"title": "Record without an id"}}
      ]
    }
  }
}"#;

struct ResponseSource(&'static str);

impl CatalogSource for ResponseSource {
    fn name(&self) -> &str {
        "recorded storefront"
    }

    fn fetch(&self) -> Result<Catalog> {
        parse_response(self.0)
    }
}

struct DownSource;

impl CatalogSource for DownSource {
    fn name(&self) -> &str {
        "down"
    }

    fn fetch(&self) -> Result<Catalog> {
        Err(BuilderError::Transport("connection refused".to_string()))
    }
}

#[test]
fn test_storefront_response_normalizes_good_records_only() {
    let catalog = parse_response(STOREFRONT_BODY).unwrap();

    assert_eq!(catalog.len(), 3);
    let cpu = catalog
        .require(Category::Cpu, "gid://shopify/Product/1")
        .unwrap();
    assert_eq!(cpu.price, 37000);
    assert_eq!(cpu.power_draw, 120);
    assert_eq!(cpu.socket.as_deref(), Some("AM5"));
    assert_eq!(
        cpu.variant_id.as_deref(),
        Some("gid://shopify/ProductVariant/11")
    );

    let psu = catalog
        .require(Category::Psu, "gid://shopify/Product/3")
        .unwrap();
    assert_eq!(psu.wattage_rating, Some(850));
    assert_eq!(psu.power_draw, 0);
    assert_eq!(psu.modular, Some(true));
}

#[test]
fn test_storefront_socket_tags_must_match_exactly() {
    let catalog = parse_response(STOREFRONT_BODY).unwrap();
    let mut engine = BuildEngine::new();

    let cpu = catalog
        .require(Category::Cpu, "gid://shopify/Product/1")
        .unwrap();
    let board = catalog
        .require(Category::Motherboard, "gid://shopify/Product/2")
        .unwrap();
    engine.place(cpu, Category::Cpu).unwrap();

    let rejection = engine.place(board, Category::Motherboard).unwrap_err();
    assert_eq!(
        rejection.to_string(),
        "Incompatible! cpu socket is AM5 but motherboard socket is am5"
    );
    assert_eq!(engine.total_price(), 37000);
}

#[test]
fn test_graphql_errors_fail_the_whole_fetch() {
    let body = r#"{"data": null, "errors": [{"message": "Unauthorized"}]}"#;
    match parse_response(body) {
        Err(BuilderError::Catalog(message)) => assert_eq!(message, "Unauthorized"),
        other => panic!("expected catalog error, got {other:?}"),
    }
    assert!(parse_response("not json").is_err());
}

#[test]
fn test_provider_falls_back_then_recovers() {
    let mut provider = CatalogProvider::new();

    let outcome = provider.refresh(&DownSource);
    assert!(matches!(outcome, RefreshOutcome::FellBack { .. }));
    assert_eq!(provider.advisory(), Some(CATALOG_UNAVAILABLE_ADVISORY));
    assert!(!provider.is_live());
    assert_eq!(provider.catalog(), &offline_catalog());

    let outcome = provider.refresh(&ResponseSource(STOREFRONT_BODY));
    assert!(matches!(outcome, RefreshOutcome::Updated { parts: 3 }));
    assert!(provider.is_live());
    assert!(provider.advisory().is_none());
    assert!(provider.catalog().find(Category::Cpu, "c4").is_none());
}

#[test]
fn test_empty_storefront_keeps_previous_catalog() {
    let mut provider = CatalogProvider::new();
    let outcome = provider.refresh(&ResponseSource(r#"{"data": {"products": {"edges": []}}}"#));

    assert!(matches!(outcome, RefreshOutcome::FellBack { .. }));
    assert_eq!(provider.catalog().len(), offline_catalog().len());
}

#[test]
fn test_build_survives_catalog_refresh() {
    let mut provider = CatalogProvider::new();
    let mut engine = BuildEngine::new();
    let cpu = provider.catalog().require(Category::Cpu, "c4").unwrap();
    engine.place(cpu, Category::Cpu).unwrap();

    provider.refresh(&ResponseSource(STOREFRONT_BODY));

    assert_eq!(engine.build().part(Category::Cpu).unwrap().name, "AMD Ryzen 5 7600X");
    assert_eq!(engine.total_price(), 19500);
}

#[test]
fn test_quote_message_for_offline_build() {
    let catalog = offline_catalog();
    let mut engine = BuildEngine::new();
    for (category, id) in [
        (Category::Cpu, "c4"),
        (Category::Motherboard, "m3"),
        (Category::Memory, "r3"),
    ] {
        engine
            .place(catalog.require(category, id).unwrap(), category)
            .unwrap();
    }
    engine.set_quantity(Category::Memory, 1);

    let message = render_message(&engine.quote());
    let expected = "*New Custom PC Inquiry from Website Builder*\n\n\
        *Processors:* AMD Ryzen 5 7600X (x1) - ₹19,500\n\
        *Motherboards:* Gigabyte B650M Gaming X (x1) - ₹14,500\n\
        *Memory:* XPG Lancer RGB 32GB (16x2) (x2) - ₹21,000\n\
        \n*Total Estimated Cost:* ₹55,000\n\
        *Estimated Power:* 225W\n\n\
        Please confirm availability and final pricing.";
    assert_eq!(message, expected);
}

#[test]
fn test_dispatch_builds_link_from_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "quote_phone_number = \"+91 98765-43210\"").unwrap();

    let config = Config::with_defaults();
    config.load_file(file.path()).unwrap();
    let phone = config.require_phone_number().unwrap();

    let catalog = offline_catalog();
    let mut engine = BuildEngine::new();
    engine
        .place(catalog.require(Category::Gpu, "g1").unwrap(), Category::Gpu)
        .unwrap();

    let (message, url) = QuoteDispatcher::new(&phone).dispatch(&engine.quote()).unwrap();
    assert!(message.contains("Zotac RTX 3060"));
    assert_eq!(url.host_str(), Some("wa.me"));
    assert_eq!(url.path(), "/919876543210");

    let text = url
        .query_pairs()
        .find(|(key, _)| key == "text")
        .map(|(_, value)| value.into_owned())
        .unwrap();
    assert_eq!(text, message);
}

#[test]
fn test_dispatch_refuses_empty_build() {
    let engine = BuildEngine::new();
    let result = QuoteDispatcher::new("919876543210").dispatch(&engine.quote());
    assert!(matches!(result, Err(BuilderError::Quote(_))));
}
