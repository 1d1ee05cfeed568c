//! Storefront catalog adapter
//!
//! Products tagged `Builder_Component` carry their builder metadata as
//! `key:value` tags, e.g. `category:cpu`, `socket:AM5`, `ramtype:DDR5`,
//! `watts:105`, `size:mATX`, `coolertype:Liquid`, `sticks:2`. A product
//! whose tags cannot be turned into a part is dropped on its own; the rest
//! of the response still loads.

use crate::catalog::Catalog;
use crate::core::monetary::conversions::parse_amount;
use crate::core::{Category, CoolerKind, Part};
use crate::error::{BuilderError, Result};
use log::{info, warn};
use serde::Deserialize;

/// GraphQL query for every builder product
pub const PRODUCTS_QUERY: &str = r#"{
  products(first: 250, query: "tag:Builder_Component") {
    edges {
      node {
        id
        title
        description
        vendor
        tags
        variants(first: 1) {
          edges {
            node {
              id
              price {
                amount
                currencyCode
              }
            }
          }
        }
      }
    }
  }
}"#;

/// Storefront API version the query is written against
pub const API_VERSION: &str = "2024-01";

/// Power draw assumed for a graphics card that has no `watts` tag
pub const DEFAULT_GPU_POWER_WATTS: u32 = 200;

/// Performance score given to every storefront product
pub const DEFAULT_PERFORMANCE: u8 = 50;

/// GraphQL endpoint for a shop domain
pub fn endpoint(domain: &str) -> String {
    format!("https://{domain}/api/{API_VERSION}/graphql.json")
}

#[derive(Debug, Deserialize)]
struct Response {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    products: Connection<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct Connection<T> {
    #[serde(default = "Vec::new")]
    edges: Vec<Edge<T>>,
}

#[derive(Debug, Clone, Deserialize)]
struct Edge<T> {
    node: T,
}

/// One product record as the storefront returns it
#[derive(Debug, Clone, Deserialize)]
pub struct ProductNode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    variants: Option<Connection<VariantNode>>,
}

#[derive(Debug, Clone, Deserialize)]
struct VariantNode {
    id: String,
    price: Option<MoneyV2>,
}

#[derive(Debug, Clone, Deserialize)]
struct MoneyV2 {
    amount: String,
}

/// Builder metadata pulled out of a product's tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSpecs {
    pub category: Option<String>,
    pub socket: Option<String>,
    pub memory_type: Option<String>,
    pub watts: Option<u32>,
    pub form_factor: Option<String>,
    pub cooler_kind: Option<CoolerKind>,
    pub sticks: Option<u32>,
    pub modular: Option<bool>,
}

/// Leading digits of a tag value, so "750W" reads as 750
fn parse_count(key: &str, value: &str) -> Result<u32> {
    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits
        .parse()
        .map_err(|_| BuilderError::Parse(format!("Invalid {key} tag value: {value}")))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(BuilderError::Parse(format!("Invalid {key} tag value: {value}"))),
    }
}

/// Read builder metadata from `key:value` tags.
///
/// Tags without a `:` or with an empty value are not builder tags and are
/// skipped, as are unknown keys. A known key with a malformed value is an
/// error.
pub fn parse_tags<S: AsRef<str>>(tags: &[S]) -> Result<TagSpecs> {
    let mut specs = TagSpecs::default();
    for tag in tags {
        let Some((key, value)) = tag.as_ref().split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match key.as_str() {
            "category" => specs.category = Some(value.to_lowercase()),
            "socket" => specs.socket = Some(value.to_string()),
            "ramtype" => specs.memory_type = Some(value.to_string()),
            "watts" => specs.watts = Some(parse_count(&key, value)?),
            "size" => specs.form_factor = Some(value.to_string()),
            "coolertype" => specs.cooler_kind = Some(value.parse()?),
            "sticks" => specs.sticks = Some(parse_count(&key, value)?),
            "modular" => specs.modular = Some(parse_flag(&key, value)?),
            _ => {}
        }
    }
    Ok(specs)
}

/// Turn one product record into a part
pub fn normalize_product(node: &ProductNode) -> Result<Part> {
    let specs = parse_tags(&node.tags)?;
    let category: Category = specs
        .category
        .as_deref()
        .ok_or_else(|| BuilderError::Parse(format!("Product {} has no category tag", node.id)))?
        .parse()?;

    let variant = node
        .variants
        .as_ref()
        .and_then(|variants| variants.edges.first())
        .map(|edge| &edge.node);
    let price = match variant.and_then(|v| v.price.as_ref()) {
        Some(money) => parse_amount(&money.amount)?,
        None => 0,
    };

    let mut part = Part::new(&node.id, category, &node.title, price)
        .with_brand(&node.vendor)
        .with_sticks_per_kit(specs.sticks.unwrap_or(1))
        .with_performance(DEFAULT_PERFORMANCE);

    // a supply's watts is what it delivers, everything else draws
    if category == Category::Psu {
        if let Some(watts) = specs.watts {
            part = part.with_wattage_rating(watts);
        }
    } else {
        let default_draw = if category == Category::Gpu {
            DEFAULT_GPU_POWER_WATTS
        } else {
            0
        };
        part = part.with_power_draw(specs.watts.unwrap_or(default_draw));
    }

    part.socket = specs.socket;
    part.memory_type = specs.memory_type;
    part.form_factor = specs.form_factor;
    part.cooler_kind = specs.cooler_kind;
    part.modular = specs.modular;
    part.variant_id = variant.map(|v| v.id.clone());
    Ok(part)
}

/// Parse a full GraphQL response body into a catalog
pub fn parse_response(body: &str) -> Result<Catalog> {
    let response: Response = serde_json::from_str(body)?;
    if let Some(first) = response.errors.first() {
        return Err(BuilderError::Catalog(first.message.clone()));
    }
    let data = response
        .data
        .ok_or_else(|| BuilderError::Catalog("Response has no product data".to_string()))?;

    let mut catalog = Catalog::new();
    let mut dropped = 0usize;
    for edge in data.products.edges {
        let normalized = serde_json::from_value::<ProductNode>(edge.node)
            .map_err(BuilderError::from)
            .and_then(|node| normalize_product(&node));
        match normalized {
            Ok(part) => catalog.insert(part),
            Err(e) => {
                dropped += 1;
                warn!("Dropping storefront product: {e}");
            }
        }
    }

    info!(
        "Normalized {} storefront products ({dropped} dropped)",
        catalog.len()
    );
    Ok(catalog)
}

/// Live catalog source talking to the storefront GraphQL API
#[cfg(feature = "storefront")]
pub struct StorefrontClient {
    domain: String,
    access_token: String,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "storefront")]
impl StorefrontClient {
    pub fn new(domain: &str, access_token: &str, timeout: std::time::Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BuilderError::Transport(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            domain: domain.to_string(),
            access_token: access_token.to_string(),
            client,
        })
    }

    /// Client for the configured shop, or a config error when no access
    /// token has been set
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        if !config.is_storefront_configured() {
            return Err(BuilderError::Config(
                "Storefront access token is not configured".to_string(),
            ));
        }
        Self::new(
            &config.get_storefront_domain(),
            &config.get_access_token(),
            config.get_catalog_timeout(),
        )
    }
}

#[cfg(feature = "storefront")]
impl crate::catalog::CatalogSource for StorefrontClient {
    fn name(&self) -> &str {
        &self.domain
    }

    fn fetch(&self) -> Result<Catalog> {
        let response = self
            .client
            .post(endpoint(&self.domain))
            .header("X-Shopify-Storefront-Access-Token", &self.access_token)
            .json(&serde_json::json!({ "query": PRODUCTS_QUERY }))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(BuilderError::Transport(format!("HTTP {status}: {body}")));
        }
        parse_response(&body)
    }
}
