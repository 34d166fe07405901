//! Search command handler
//!
//! Geocodes an address, prints the candidates and saves the ones picked with
//! `--add` or `--all`.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::{GeoCodeResult, GeoCodeService, Geocoder};
use crate::store::{KeyValueStore, RealWorldLocations};
use clap::Args;
use tracing::debug;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text address to look up
    pub address: String,

    /// Save the result at this index (repeatable)
    #[arg(long = "add", short = 'a', conflicts_with = "all")]
    pub add: Vec<usize>,

    /// Save every result
    #[arg(long)]
    pub all: bool,

    /// Don't save results whose location is already saved
    #[arg(long)]
    pub skip_duplicates: bool,
}

/// Which results to keep
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub indices: Vec<usize>,
    pub all: bool,
    pub skip_duplicates: bool,
}

/// What a search did
#[derive(Debug)]
pub struct SearchOutcome {
    pub results: Vec<GeoCodeResult>,
    /// Result indices that were saved
    pub added: Vec<usize>,
    /// Result indices skipped as already saved
    pub skipped: Vec<usize>,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    let config = Config::load()?;
    let geocoder = GeoCodeService::new(&config.geocode);
    let mut store = super::open_store(&config)?;

    let selection = Selection {
        indices: args.add,
        all: args.all,
        skip_duplicates: args.skip_duplicates,
    };

    let outcome = search_and_select(&geocoder, &mut store, &args.address, &selection).await?;

    if outcome.results.is_empty() {
        println!("No matches for '{}'.", args.address);
        return Ok(());
    }

    for (index, result) in outcome.results.iter().enumerate() {
        let marker = if outcome.added.contains(&index) {
            " [saved]"
        } else if outcome.skipped.contains(&index) || store.has(&result.location()) {
            " [already saved]"
        } else {
            ""
        };
        let location = result.location();
        println!(
            "[{}] {}{}\n    ({:.6}, {:.6})",
            index,
            result.cell_display_text().replace('\n', "\n    "),
            marker,
            location.lat,
            location.lng
        );
    }

    Ok(())
}

/// Geocode `address` and append the selected results to `store`.
///
/// Selection indices are checked against the result list before anything is
/// saved.
pub async fn search_and_select<G, S>(
    geocoder: &G,
    store: &mut RealWorldLocations<S>,
    address: &str,
    selection: &Selection,
) -> Result<SearchOutcome>
where
    G: Geocoder,
    S: KeyValueStore,
{
    let results = geocoder.geocode(address).await?;
    debug!(address, count = results.len(), "search results");

    if let Some(&index) = selection.indices.iter().find(|&&i| i >= results.len()) {
        return Err(Error::IndexOutOfRange {
            index,
            len: results.len(),
        });
    }

    let chosen: Vec<usize> = if selection.all {
        (0..results.len()).collect()
    } else {
        let mut indices = selection.indices.clone();
        indices.sort_unstable();
        indices.dedup();
        indices
    };

    let mut added = Vec::new();
    let mut skipped = Vec::new();
    for index in chosen {
        let result = &results[index];
        if selection.skip_duplicates && store.has(&result.location()) {
            skipped.push(index);
            continue;
        }
        store.append(result.clone())?;
        added.push(index);
    }

    Ok(SearchOutcome {
        results,
        added,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::store::MemoryStore;

    struct FakeGeocoder {
        results: Vec<GeoCodeResult>,
    }

    impl Geocoder for FakeGeocoder {
        async fn geocode(&self, _address: &str) -> Result<Vec<GeoCodeResult>> {
            Ok(self.results.clone())
        }
    }

    struct FailingGeocoder;

    impl Geocoder for FailingGeocoder {
        async fn geocode(&self, _address: &str) -> Result<Vec<GeoCodeResult>> {
            Err(Error::InvalidFormat)
        }
    }

    fn fake() -> FakeGeocoder {
        let result = |lat: f64, city: &str| {
            GeoCodeResult::new(
                "450 Main Street, Colorado",
                Coordinates::new(lat, -105.0),
                Coordinates::new(lat, -105.0),
                city,
                "CO",
            )
        };
        FakeGeocoder {
            results: vec![result(40.16, "Longmont"), result(39.74, "Denver"), result(38.83, "Colorado Springs")],
        }
    }

    fn empty_store() -> RealWorldLocations<MemoryStore> {
        RealWorldLocations::load(MemoryStore::new()).unwrap()
    }

    #[tokio::test]
    async fn test_search_without_selection_saves_nothing() {
        let mut store = empty_store();
        let outcome = search_and_select(&fake(), &mut store, "450 Main", &Selection::default())
            .await
            .unwrap();

        assert_eq!(outcome.results.len(), 3);
        assert!(outcome.added.is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_search_adds_selected_in_result_order() {
        let mut store = empty_store();
        let selection = Selection {
            indices: vec![2, 0, 2],
            ..Selection::default()
        };

        let outcome = search_and_select(&fake(), &mut store, "450 Main", &selection)
            .await
            .unwrap();

        assert_eq!(outcome.added, vec![0, 2]);
        let cities: Vec<&str> = store.points().iter().map(|p| p.city()).collect();
        assert_eq!(cities, vec!["Longmont", "Colorado Springs"]);
    }

    #[tokio::test]
    async fn test_search_all_skips_duplicates() {
        let mut store = empty_store();
        store.append(fake().results[1].clone()).unwrap();

        let selection = Selection {
            all: true,
            skip_duplicates: true,
            ..Selection::default()
        };
        let outcome = search_and_select(&fake(), &mut store, "450 Main", &selection)
            .await
            .unwrap();

        assert_eq!(outcome.added, vec![0, 2]);
        assert_eq!(outcome.skipped, vec![1]);
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn test_search_all_keeps_duplicates_by_default() {
        let mut store = empty_store();
        store.append(fake().results[1].clone()).unwrap();

        let selection = Selection {
            all: true,
            ..Selection::default()
        };
        search_and_select(&fake(), &mut store, "450 Main", &selection)
            .await
            .unwrap();

        assert_eq!(store.len(), 4);
    }

    #[tokio::test]
    async fn test_search_bad_index_saves_nothing() {
        let mut store = empty_store();
        let selection = Selection {
            indices: vec![0, 5],
            ..Selection::default()
        };

        let err = search_and_select(&fake(), &mut store, "450 Main", &selection)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::IndexOutOfRange { index: 5, len: 3 }));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_search_propagates_geocoding_errors() {
        let mut store = empty_store();
        let err = search_and_select(&FailingGeocoder, &mut store, "x", &Selection::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFormat));
    }
}
