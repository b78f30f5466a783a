// Local information store: fetches the SpaceX collections through a
// provider, persists each one as a pretty-printed JSON file under the
// storage location, serves them back on demand, and accumulates the
// derived launch summaries and statistics during the fetch pass.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::api::{InfoProvider, ProviderError};
use crate::stats::{EntitySummary, LaunchStats};

/// The cached collections. [`Collection::ALL`] is the fetch order:
/// launches are pinned last so that the rocket and launchpad summaries
/// are fully seeded before launch records are counted against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Company,
    Launchpads,
    Rockets,
    Launches,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Company,
        Collection::Launchpads,
        Collection::Rockets,
        Collection::Launches,
    ];

    /// The collection key, also the stem of its cache file.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Company => "company",
            Collection::Launchpads => "launchpads",
            Collection::Rockets => "rockets",
            Collection::Launches => "launches",
        }
    }

    pub fn from_key(key: &str) -> Option<Collection> {
        match key {
            "company" => Some(Collection::Company),
            "launchpads" => Some(Collection::Launchpads),
            "rockets" => Some(Collection::Rockets),
            "launches" => Some(Collection::Launches),
            _ => None,
        }
    }
}

/// Errors surfaced by the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("collection `{0}` is not supported")]
    Unsupported(String),

    #[error("{} is not available, run a fetch pass first", .0.display())]
    NotFetched(PathBuf),

    #[error("SpaceX API request failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The launch record fields consumed by the aggregation pass. Every
/// other field stays untouched in the cached collection file.
#[derive(Debug, Deserialize)]
struct LaunchFields {
    success: Option<bool>,
    rocket: Option<String>,
    launchpad: Option<String>,
    date_utc: Option<String>,
}

/// Store for the cached collection files and the derived launch data.
///
/// The storage location is fixed at construction; each collection lives
/// in one `{location}/{key}.json` file written during [`fetch_all`] and
/// re-read fresh on every [`get`]. The summary lists keep the order the
/// provider returned the entities in.
///
/// [`fetch_all`]: InfoStore::fetch_all
/// [`get`]: InfoStore::get
pub struct InfoStore {
    location: PathBuf,
    rocket_summaries: Vec<(String, EntitySummary)>,
    launchpad_summaries: Vec<(String, EntitySummary)>,
    stats: LaunchStats,
}

impl InfoStore {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        InfoStore {
            location: location.into(),
            rocket_summaries: Vec::new(),
            launchpad_summaries: Vec::new(),
            stats: LaunchStats::default(),
        }
    }

    /// Fetch every collection in [`Collection::ALL`] order, persist each
    /// one, and rebuild the derived summaries and statistics.
    ///
    /// Any provider failure aborts the pass; collections already written
    /// stay on disk, the rest are reported as missing by [`get`].
    ///
    /// [`get`]: InfoStore::get
    pub fn fetch_all(&mut self, provider: &dyn InfoProvider) -> Result<(), StoreError> {
        fs::create_dir_all(&self.location)?;
        self.rocket_summaries.clear();
        self.launchpad_summaries.clear();
        self.stats = LaunchStats::default();

        for collection in Collection::ALL {
            let data = match collection {
                Collection::Company => provider.company()?,
                Collection::Launchpads => provider.launchpads()?,
                Collection::Rockets => provider.rockets()?,
                Collection::Launches => provider.launches()?,
            };
            info!("fetched collection `{}`", collection.key());

            let path = self.collection_path(collection);
            write_pretty(&path, &data)?;
            debug!("wrote {}", path.display());

            match collection {
                Collection::Company => {}
                Collection::Launchpads => seed_summaries(&mut self.launchpad_summaries, &data, true),
                Collection::Rockets => seed_summaries(&mut self.rocket_summaries, &data, false),
                Collection::Launches => self.tally_launches(&data),
            }
        }
        Ok(())
    }

    /// Read a collection fresh from its cache file.
    pub fn get(&self, key: &str) -> Result<Value, StoreError> {
        let collection =
            Collection::from_key(key).ok_or_else(|| StoreError::Unsupported(key.to_string()))?;
        self.read_collection(collection)
    }

    /// The subsequence of the launch collection whose records match all
    /// criteria by exact field equality, in collection order. Empty
    /// criteria match everything; a field name no record carries matches
    /// nothing.
    pub fn filter_launches(&self, criteria: &Map<String, Value>) -> Result<Vec<Value>, StoreError> {
        let launches = self.read_collection(Collection::Launches)?;
        let records = match launches {
            Value::Array(records) => records,
            _ => Vec::new(),
        };
        Ok(records
            .into_iter()
            .filter(|record| {
                criteria
                    .iter()
                    .all(|(field, required)| record.get(field) == Some(required))
            })
            .collect())
    }

    /// Rocket summaries in provider order.
    pub fn rocket_summaries(&self) -> &[(String, EntitySummary)] {
        &self.rocket_summaries
    }

    /// Launchpad summaries in provider order.
    pub fn launchpad_summaries(&self) -> &[(String, EntitySummary)] {
        &self.launchpad_summaries
    }

    pub fn rocket_summary(&self, id: &str) -> Option<&EntitySummary> {
        find(&self.rocket_summaries, id)
    }

    pub fn launchpad_summary(&self, id: &str) -> Option<&EntitySummary> {
        find(&self.launchpad_summaries, id)
    }

    /// Launch statistics accumulated by the last fetch pass.
    pub fn stats(&self) -> &LaunchStats {
        &self.stats
    }

    fn collection_path(&self, collection: Collection) -> PathBuf {
        self.location.join(format!("{}.json", collection.key()))
    }

    fn read_collection(&self, collection: Collection) -> Result<Value, StoreError> {
        let path = self.collection_path(collection);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFetched(path))
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    /// Count every launch record against its rocket and launchpad
    /// summaries and the year/month histograms. Runs after both summary
    /// lists are seeded; a reference to an unseeded id is a fetch-order
    /// precondition violation and is skipped with a warning.
    fn tally_launches(&mut self, data: &Value) {
        let Some(records) = data.as_array() else {
            warn!("launch collection is not an array, skipping aggregation");
            return;
        };
        for record in records {
            let fields: LaunchFields = match serde_json::from_value(record.clone()) {
                Ok(fields) => fields,
                Err(err) => {
                    warn!("skipping malformed launch record: {err}");
                    continue;
                }
            };
            let success = fields.success == Some(true);

            if let Some(id) = fields.rocket.as_deref() {
                match find_mut(&mut self.rocket_summaries, id) {
                    Some(summary) => summary.record_launch(success),
                    None => warn!("launch references unknown rocket id `{id}`"),
                }
            }
            if let Some(id) = fields.launchpad.as_deref() {
                match find_mut(&mut self.launchpad_summaries, id) {
                    Some(summary) => summary.record_launch(success),
                    None => warn!("launch references unknown launchpad id `{id}`"),
                }
            }

            match fields.date_utc.as_deref().and_then(parse_launch_date) {
                Some(date) => self.stats.record(date),
                None => warn!(
                    "launch has no parseable UTC date ({:?})",
                    fields.date_utc.as_deref().unwrap_or("missing")
                ),
            }
        }
    }
}

/// Write a JSON value as UTF-8 text indented with four spaces.
fn write_pretty(path: &Path, data: &Value) -> Result<(), StoreError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)?;
    fs::write(path, buf)?;
    Ok(())
}

/// Seed one zero-count summary per record, keyed by the record id.
/// Launchpads are displayed by their `full_name` when they carry one.
fn seed_summaries(summaries: &mut Vec<(String, EntitySummary)>, data: &Value, prefer_full_name: bool) {
    let Some(records) = data.as_array() else {
        warn!("summary collection is not an array, skipping seeding");
        return;
    };
    for record in records {
        let Some(id) = record.get("id").and_then(Value::as_str) else {
            warn!("skipping record without an id");
            continue;
        };
        let name = if prefer_full_name {
            record.get("full_name").or_else(|| record.get("name"))
        } else {
            record.get("name")
        };
        let name = name.and_then(Value::as_str).unwrap_or(id);
        summaries.push((id.to_string(), EntitySummary::new(name)));
    }
}

fn find<'a>(summaries: &'a [(String, EntitySummary)], id: &str) -> Option<&'a EntitySummary> {
    summaries
        .iter()
        .find(|(key, _)| key == id)
        .map(|(_, summary)| summary)
}

fn find_mut<'a>(
    summaries: &'a mut [(String, EntitySummary)],
    id: &str,
) -> Option<&'a mut EntitySummary> {
    summaries
        .iter_mut()
        .find(|(key, _)| key == id)
        .map(|(_, summary)| summary)
}

/// The `YYYY-MM-DD` prefix of an ISO-8601 timestamp.
fn parse_launch_date(timestamp: &str) -> Option<NaiveDate> {
    let date = timestamp.get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
