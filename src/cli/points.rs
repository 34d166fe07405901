//! Saved point command handlers
//!
//! `list`, `remove` and `has` over the configured store.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use clap::Args;

/// List command arguments
#[derive(Args)]
pub struct ListArgs {
    /// Output format (text, json, gpx)
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Remove command arguments
#[derive(Args)]
pub struct RemoveArgs {
    /// Index as shown by `list`
    pub index: usize,
}

/// Has command arguments
#[derive(Args)]
pub struct HasArgs {
    /// Latitude
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,
}

/// Run the list command
pub fn list(args: ListArgs) -> Result<()> {
    if args.list_formats {
        println!("Available output formats:");
        for format in available_formats() {
            println!("  {:6} - {}", format.name, format.description);
        }
        return Ok(());
    }

    let config = Config::load()?;
    let format = args.format.unwrap_or(config.output.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let store = super::open_store(&config)?;
    let output = formatter.format(store.points())?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        print!("{}", output);
    }

    Ok(())
}

/// Run the remove command
pub fn remove(args: RemoveArgs) -> Result<()> {
    let config = Config::load()?;
    let mut store = super::open_store(&config)?;

    let removed = store.remove_at(args.index)?;
    println!("Removed [{}] {}", args.index, removed.location_string());
    Ok(())
}

/// Run the has command
///
/// Exits non-zero when the coordinate is not saved, so it can be scripted.
pub fn has(args: HasArgs) -> Result<()> {
    let coords = Coordinates::new(args.lat, args.lng);
    coords.validate()?;

    let config = Config::load()?;
    let store = super::open_store(&config)?;

    if store.has(&coords) {
        println!("yes");
        Ok(())
    } else {
        println!("no");
        std::process::exit(1);
    }
}
