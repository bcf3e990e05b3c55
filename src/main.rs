//! Headless DecoKit driver.
//!
//! Loads the catalog, applies the given facets, places the listed items (or
//! every filtered item once) and prints the quantity summary.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::sync::broadcast::error::RecvError;

use decokit::{
    build_designer, default_config_path, init_logging, AppEvent, Catalog, Config, EventBus,
    FacetChange, PlacementOptions, BUILD_DATE, VERSION,
};
use decokit_core::units::format_size;

#[derive(Parser, Debug)]
#[command(name = "decokit", version, about = "Place catalog artwork and print quantity rows")]
struct Args {
    /// Configuration file (JSON or TOML). Defaults to the platform config path.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Type facet, a whole category or its parent part.
    #[arg(long = "type", value_name = "TYPE")]
    item_type: Option<String>,

    /// Colour to add to the colour facet. Repeatable.
    #[arg(long = "color", value_name = "COLOR")]
    colors: Vec<String>,

    /// Search text matched against names and keywords.
    #[arg(long)]
    search: Option<String>,

    /// Directory holding items.json and backgrounds.json.
    catalog_dir: PathBuf,

    /// Catalog ids to place. Every filtered item is placed once when empty.
    item_ids: Vec<String>,
}

impl Args {
    fn facets(&self) -> Vec<FacetChange> {
        let mut facets = Vec::new();
        if let Some(item_type) = &self.item_type {
            facets.push(FacetChange::Type(item_type.clone()));
        }
        facets.extend(self.colors.iter().cloned().map(FacetChange::ToggleColor));
        if let Some(search) = &self.search {
            facets.push(FacetChange::Search(search.clone()));
        }
        facets
    }
}

/// Logs filter results and notifications until the bus is dropped.
fn spawn_event_log(bus: &EventBus) -> tokio::task::JoinHandle<()> {
    let mut events = bus.receiver();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event @ AppEvent::Filter(_)) => tracing::info!("{}", event.description()),
                Ok(AppEvent::Notification(n)) => tracing::warn!("{}", n.message),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!("Event log skipped {} events", skipped)
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("DecoKit {} (built {})", VERSION, BUILD_DATE);

    let args = Args::parse();
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let catalog = Catalog::load_dir(&args.catalog_dir);

    let bus = Arc::new(EventBus::new());
    let event_log = spawn_event_log(&bus);

    let mut engine = config.filter.engine(catalog.items.clone()).with_bus(bus.clone());
    for facet in args.facets() {
        engine.set_facet(facet);
    }
    engine.apply();
    tracing::info!("{}", engine.count_label());
    for item in engine.filtered() {
        let size = item.size_mm.as_ref().map(format_size).unwrap_or_default();
        tracing::debug!("  {} {}", item.name, size);
    }

    let to_place: Vec<_> = if args.item_ids.is_empty() {
        engine.filtered().to_vec()
    } else {
        args.item_ids
            .iter()
            .filter_map(|id| {
                let item = catalog.find_item(id).cloned();
                if item.is_none() {
                    tracing::warn!("No catalog item '{}'", id);
                }
                item
            })
            .collect()
    };

    let mut designer = build_designer(&config, bus);
    let options = PlacementOptions::default();
    for item in &to_place {
        // Failures reach the event log as notifications.
        let _ = designer.add_item(item, &options).await;
    }

    for row in designer.summary() {
        println!("{:>3} x {}", row.quantity, row.name);
    }
    println!(
        "{} placed, {} undo steps",
        designer.document().item_count(),
        designer.history().len().saturating_sub(1)
    );

    // Closing the bus lets the event log drain and finish.
    drop(engine);
    drop(designer);
    event_log.await?;

    Ok(())
}
