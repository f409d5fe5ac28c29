//! Where snapshots come from, and the shared snapshot the server reads.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::error::FeedError;
use super::snapshot::FeedSnapshot;
use super::types::{StationsResponse, TrainsResponse};

/// Station directory file name inside a data directory.
pub const STATIONS_FILE: &str = "stations.json";

/// Train directory file name inside a data directory.
pub const TRAINS_FILE: &str = "trains.json";

/// Something that can produce a fresh snapshot.
pub trait FeedSource: Send + Sync {
    fn load(&self) -> Result<FeedSnapshot, FeedError>;
}

/// Reads `stations.json` and `trains.json` from a directory kept up to date
/// by an external fetcher.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FeedSource for DirectorySource {
    fn load(&self) -> Result<FeedSnapshot, FeedError> {
        let stations: StationsResponse = read_json(&self.dir.join(STATIONS_FILE))?;
        let trains: TrainsResponse = read_json(&self.dir.join(TRAINS_FILE))?;
        Ok(FeedSnapshot::from_responses(&stations, &trains))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, FeedError> {
    let json = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&json).map_err(|e| FeedError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Freshness of the shared snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedStatus {
    /// When the current snapshot was loaded.
    pub updated_at: Option<DateTime<Utc>>,
    /// Whether the most recent refresh failed.
    pub error: bool,
}

struct FeedState {
    snapshot: Arc<FeedSnapshot>,
    status: FeedStatus,
}

/// Counts from a successful refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub stations: usize,
    pub trains: usize,
}

/// Thread-safe current snapshot with support for background refresh.
#[derive(Clone)]
pub struct SharedFeed {
    inner: Arc<RwLock<FeedState>>,
    source: Arc<dyn FeedSource>,
}

impl SharedFeed {
    /// Create a SharedFeed by loading from `source`.
    ///
    /// This will fail if the source can't produce a snapshot.
    pub fn load(source: impl FeedSource + 'static) -> Result<Self, FeedError> {
        let snapshot = source.load()?;
        Ok(Self::with_snapshot(
            Arc::new(source),
            snapshot,
            Some(Utc::now()),
        ))
    }

    /// Create a SharedFeed with no data yet.
    pub fn empty(source: impl FeedSource + 'static) -> Self {
        Self::with_snapshot(Arc::new(source), FeedSnapshot::default(), None)
    }

    fn with_snapshot(
        source: Arc<dyn FeedSource>,
        snapshot: FeedSnapshot,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            inner: Arc::new(RwLock::new(FeedState {
                snapshot: Arc::new(snapshot),
                status: FeedStatus {
                    updated_at,
                    error: false,
                },
            })),
            source,
        }
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> Arc<FeedSnapshot> {
        self.inner.read().await.snapshot.clone()
    }

    pub async fn status(&self) -> FeedStatus {
        self.inner.read().await.status
    }

    /// Reload from the source.
    ///
    /// On success, replaces the current snapshot and clears the error flag.
    /// On failure, the existing snapshot is kept, the error flag is set and
    /// the error is returned.
    pub async fn refresh(&self) -> Result<RefreshSummary, FeedError> {
        let source = self.source.clone();
        let loaded = tokio::task::spawn_blocking(move || source.load())
            .await
            .map_err(|e| FeedError::Interrupted(e.to_string()))
            .and_then(|result| result);

        let mut guard = self.inner.write().await;
        match loaded {
            Ok(snapshot) => {
                let summary = RefreshSummary {
                    stations: snapshot.stations().len(),
                    trains: snapshot.trains().len(),
                };
                guard.snapshot = Arc::new(snapshot);
                guard.status = FeedStatus {
                    updated_at: Some(Utc::now()),
                    error: false,
                };
                Ok(summary)
            }
            Err(e) => {
                guard.status.error = true;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    const STATIONS: &str = r#"{
        "WAS": {"name": "Washington Union", "code": "WAS", "city": "Washington",
                "state": "DC", "trains": ["19-1"]}
    }"#;

    const TRAINS: &str = r#"{
        "19": [{"routeName": "Crescent", "trainNum": "19", "trainID": "19-1",
                "origName": "New York Penn", "destName": "New Orleans",
                "stations": [{"code": "WAS", "schArr": "2023-01-01T06:00:00-05:00",
                              "schDep": "2023-01-01T06:30:00-05:00",
                              "arrCmnt": "10 Minutes Late", "status": "Enroute"}]}]
    }"#;

    fn write_feed(dir: &Path, stations: &str, trains: &str) {
        std::fs::write(dir.join(STATIONS_FILE), stations).unwrap();
        std::fs::write(dir.join(TRAINS_FILE), trains).unwrap();
    }

    #[test]
    fn directory_source_loads() {
        let dir = tempdir().unwrap();
        write_feed(dir.path(), STATIONS, TRAINS);

        let snap = DirectorySource::new(dir.path()).load().unwrap();
        assert_eq!(snap.stations().len(), 1);
        assert_eq!(snap.trains().len(), 1);
    }

    #[test]
    fn directory_source_missing_file() {
        let dir = tempdir().unwrap();
        let err = DirectorySource::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, FeedError::Io { ref path, .. } if path.ends_with(STATIONS_FILE)));
    }

    #[test]
    fn directory_source_bad_json() {
        let dir = tempdir().unwrap();
        write_feed(dir.path(), STATIONS, "[not json");
        let err = DirectorySource::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, FeedError::Json { ref path, .. } if path.ends_with(TRAINS_FILE)));
    }

    #[test]
    fn malformed_records_do_not_reject_the_feed() {
        let dir = tempdir().unwrap();
        let stations = r#"{
            "WAS": {"name": "Washington Union", "code": "WAS", "city": "Washington",
                    "state": "DC", "trains": ["19-1", "19-2", "21-1"]},
            "XXX": {"name": 7, "code": "XXX"}
        }"#;
        let trains = r#"{
            "19": [
                {"routeName": "Crescent", "trainNum": "19", "trainID": "19-1",
                 "stations": [{"code": "WAS", "schDep": "2023-01-01T06:30:00-05:00"}]},
                {"routeName": null, "trainNum": "19", "trainID": "19-2"}
            ],
            "20": "not a list",
            "21": [
                {"routeName": "Palmetto", "trainNum": 21, "trainID": "21-1",
                 "stations": [{"code": "WAS", "schDep": 5},
                              {"code": "WAS", "schDep": "2023-01-01T07:00:00-05:00"}]}
            ]
        }"#;
        write_feed(dir.path(), stations, trains);

        let snap = DirectorySource::new(dir.path()).load().unwrap();
        assert_eq!(snap.stations().len(), 1);

        let ids: Vec<_> = snap.trains().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["19-1", "21-1"]);
        assert_eq!(snap.trains()[1].stops.len(), 1);

        let was = crate::domain::StationCode::parse("WAS").unwrap();
        assert_eq!(snap.station_trains(was).len(), 2);
    }

    #[test]
    fn load_fails_fast() {
        let dir = tempdir().unwrap();
        assert!(SharedFeed::load(DirectorySource::new(dir.path())).is_err());
    }

    #[tokio::test]
    async fn load_sets_status() {
        let dir = tempdir().unwrap();
        write_feed(dir.path(), STATIONS, TRAINS);

        let feed = SharedFeed::load(DirectorySource::new(dir.path())).unwrap();
        let status = feed.status().await;
        assert!(status.updated_at.is_some());
        assert!(!status.error);
        assert_eq!(feed.snapshot().await.trains().len(), 1);
    }

    #[tokio::test]
    async fn empty_has_no_data() {
        let feed = SharedFeed::empty(DirectorySource::new("/nonexistent"));
        assert!(feed.snapshot().await.stations().is_empty());
        assert_eq!(
            feed.status().await,
            FeedStatus {
                updated_at: None,
                error: false
            }
        );
    }

    #[tokio::test]
    async fn failed_refresh_keeps_snapshot_and_flags_error() {
        let dir = tempdir().unwrap();
        write_feed(dir.path(), STATIONS, TRAINS);
        let feed = SharedFeed::load(DirectorySource::new(dir.path())).unwrap();
        let first_update = feed.status().await.updated_at;

        std::fs::write(dir.path().join(TRAINS_FILE), "{").unwrap();
        assert!(feed.refresh().await.is_err());

        let status = feed.status().await;
        assert!(status.error);
        assert_eq!(status.updated_at, first_update);
        assert_eq!(feed.snapshot().await.trains().len(), 1);

        // A later good refresh clears the flag.
        write_feed(dir.path(), STATIONS, r#"{}"#);
        let summary = feed.refresh().await.unwrap();
        assert_eq!(
            summary,
            RefreshSummary {
                stations: 1,
                trains: 0
            }
        );
        assert!(!feed.status().await.error);
        assert!(feed.snapshot().await.trains().is_empty());
    }

    /// Hands out a queue of canned results.
    struct Scripted(Mutex<Vec<Result<FeedSnapshot, FeedError>>>);

    impl FeedSource for Scripted {
        fn load(&self) -> Result<FeedSnapshot, FeedError> {
            self.0
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(FeedError::Interrupted("script exhausted".into())))
        }
    }

    #[tokio::test]
    async fn readers_keep_their_snapshot_across_refresh() {
        let feed = SharedFeed::empty(Scripted(Mutex::new(vec![Ok(FeedSnapshot::new(
            vec![],
            vec![],
        ))])));

        let before = feed.snapshot().await;
        feed.refresh().await.unwrap();
        let after = feed.snapshot().await;

        assert!(!Arc::ptr_eq(&before, &after));
        assert!(feed.status().await.updated_at.is_some());

        // Script exhausted: the refresh fails but readers still get data.
        assert!(feed.refresh().await.is_err());
        assert!(Arc::ptr_eq(&after, &feed.snapshot().await));
    }
}
