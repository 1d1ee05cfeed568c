// This is my main entry point for the rig builder CLI
// It replays build gestures against the engine and prints the bill and quote
use log::{error, warn, LevelFilter};
use rig_builder::catalog::RefreshOutcome;
use rig_builder::core::monetary::conversions::format_currency;
use rig_builder::core::{psu_capacity, MEMORY_SLOTS};
use rig_builder::{
    render_message, BuildEngine, Catalog, CatalogProvider, Category, Command, Gesture, Opt,
    QuoteDispatcher, RuleSet, GLOBAL_CONFIG,
};
use clap::Parser;
use std::process;

fn main() {
    // I initialize logging at Info so placements and rejections show up
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let opt = Opt::parse();

    // A config file overrides the environment, so I load it before any command runs
    if let Some(path) = &opt.config {
        if let Err(e) = GLOBAL_CONFIG.load_file(path) {
            error!("Error: {e}");
            process::exit(1);
        }
    }

    // If something goes wrong, I log the error and exit with code 1
    if let Err(e) = run_command(opt.command) {
        error!("Error: {e}");
        process::exit(1);
    }
}

/// Offline catalog, or the live one when asked for and available
fn load_catalog(live: bool) -> CatalogProvider {
    // I always start from the offline catalog; a failed live fetch keeps it
    let mut provider = CatalogProvider::new();
    if live {
        refresh_live(&mut provider);
        if let Some(advisory) = provider.advisory() {
            println!("! {advisory}");
        }
    }
    provider
}

#[cfg(feature = "storefront")]
fn refresh_live(provider: &mut CatalogProvider) {
    match rig_builder::catalog::StorefrontClient::from_config(&GLOBAL_CONFIG) {
        Ok(client) => {
            if let RefreshOutcome::FellBack { reason } = provider.refresh(&client) {
                warn!("Live catalog unavailable: {reason}");
            }
        }
        Err(e) => warn!("Live catalog disabled: {e}"),
    }
}

#[cfg(not(feature = "storefront"))]
fn refresh_live(provider: &mut CatalogProvider) {
    // Without the storefront feature I still go through refresh so the
    // fallback advisory is shown the same way
    struct Unsupported;

    impl rig_builder::CatalogSource for Unsupported {
        fn name(&self) -> &str {
            "storefront"
        }

        fn fetch(&self) -> rig_builder::Result<Catalog> {
            Err(rig_builder::BuilderError::Config(
                "built without the storefront feature".to_string(),
            ))
        }
    }

    if let RefreshOutcome::FellBack { reason } = provider.refresh(&Unsupported) {
        warn!("Live catalog unavailable: {reason}");
    }
}

fn print_catalog(catalog: &Catalog, search: Option<&str>) {
    let groups: Vec<(Category, Vec<_>)> = match search {
        Some(term) => catalog.search(term),
        None => Category::ALL
            .iter()
            .map(|&c| (c, catalog.parts(c).to_vec()))
            .collect(),
    };

    if groups.is_empty() {
        println!("No items found");
    }
    for (category, parts) in groups {
        println!("== {} ({category})", category.label());
        if parts.is_empty() {
            println!("   No items found");
        }
        for part in parts {
            println!(
                "   {:<6} {:<36} {:<12} {:>10}  [{}]",
                part.id,
                part.name,
                part.brand,
                format_currency(part.price),
                part.badge()
            );
        }
    }
}

fn run_command(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        // When I want to browse the parts, optionally filtered by a search term
        Command::Catalog { search, live } => {
            let provider = load_catalog(live);
            print_catalog(provider.catalog(), search.as_deref());
        }
        // When I want to price a build, I replay every gesture on a fresh engine
        Command::Quote {
            gestures,
            strict,
            live,
            link,
            json,
        } => {
            let provider = load_catalog(live);
            // --strict wins over the config switch for the form factor rule
            let rules = if strict {
                RuleSet::strict()
            } else {
                GLOBAL_CONFIG.rule_set()
            };
            let mut engine = BuildEngine::with_rules(rules);

            for gesture in gestures {
                match &gesture {
                    Gesture::Place { category, id } => {
                        // An unknown id is a typo, so I stop there. A rejection is
                        // a normal outcome: I report it and keep going
                        let part = provider.catalog().require(*category, id)?;
                        if let Err(rejection) = engine.place(part, *category) {
                            println!("x {gesture}: {rejection}");
                        }
                    }
                    Gesture::Remove(category) => engine.remove(*category),
                    Gesture::Quantity { category, delta } => {
                        // I only mention steps that did nothing, like hitting the memory slot limit
                        let adjustment = engine.set_quantity(*category, *delta);
                        if !adjustment.is_changed() {
                            println!("- {gesture}: unchanged ({adjustment:?})");
                        }
                    }
                    Gesture::Reset => engine.reset(),
                }
            }

            // I take one snapshot so the bill, totals and message all agree
            let snapshot = engine.quote();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
                return Ok(());
            }

            if snapshot.is_empty() {
                println!("No parts added yet.");
                return Ok(());
            }

            for line in &snapshot.lines {
                println!(
                    "{:<16} {:<36} x{:<2} {:>12}",
                    line.category_label,
                    line.part_name,
                    line.quantity,
                    format_currency(line.line_total)
                );
            }
            println!();
            println!("Estimated Total: {}", format_currency(snapshot.total_price));
            // The power check is advisory: a weak PSU is flagged, never blocked
            let indicator = if engine.power_margin() { "OK" } else { "LOW" };
            println!(
                "Power: {}W of {}W [{indicator}]",
                snapshot.total_power,
                psu_capacity(engine.build())
            );
            println!(
                "Memory slots: {}/{MEMORY_SLOTS}",
                engine.total_memory_sticks()
            );
            println!();
            println!("{}", render_message(&snapshot));

            if link {
                // The link needs a shop number; I fail here rather than build a dead link
                let dispatcher = QuoteDispatcher::new(&GLOBAL_CONFIG.require_phone_number()?);
                let (_, url) = dispatcher.dispatch(&snapshot)?;
                println!();
                println!("{url}");
            }
        }
    }
    Ok(())
}
