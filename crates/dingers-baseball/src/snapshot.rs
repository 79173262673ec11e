// On-disk monthly snapshots of the player table (CSV with a header row).

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use dingers_core::period::LeagueMonth;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::table::{PlayerRow, PlayerTable};

const HEADER: [&str; 3] = ["Player", "Team", "HRs"];

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in snapshot {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("snapshot {path} has header {found:?}, expected Player,Team,HRs")]
    Header { path: PathBuf, found: Vec<String> },
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRecord {
    #[serde(rename = "Player")]
    player: String,
    #[serde(rename = "Team")]
    team: String,
    #[serde(rename = "HRs")]
    hrs: u32,
}

/// Directory of `hr_YYYY-MM.csv` files, one per league month.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, month: LeagueMonth) -> PathBuf {
        self.dir.join(format!("hr_{month}.csv"))
    }

    /// Stored rows for `month`, or `None` when no snapshot exists.
    pub fn load(&self, month: LeagueMonth) -> Result<Option<Vec<PlayerRow>>, SnapshotError> {
        let path = self.path_for(month);
        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SnapshotError::Io { path, source: e }),
        };
        let rows = read_rows(file, &path)?;
        info!(path = %path.display(), rows = rows.len(), "loaded snapshot");
        Ok(Some(rows))
    }

    /// Write `table` as the snapshot for `month`, replacing any existing one.
    pub fn save(&self, month: LeagueMonth, table: &PlayerTable) -> Result<PathBuf, SnapshotError> {
        fs::create_dir_all(&self.dir).map_err(|e| SnapshotError::Io {
            path: self.dir.clone(),
            source: e,
        })?;

        let path = self.path_for(month);
        let tmp = path.with_extension("csv.tmp");
        let file = fs::File::create(&tmp).map_err(|e| SnapshotError::Io {
            path: tmp.clone(),
            source: e,
        })?;
        write_rows(file, table.rows()).map_err(|e| SnapshotError::Csv {
            path: tmp.clone(),
            source: e,
        })?;
        fs::rename(&tmp, &path).map_err(|e| SnapshotError::Io {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), rows = table.len(), "saved snapshot");
        Ok(path)
    }

    /// Delete the snapshot for `month`. Returns whether one existed.
    pub fn remove(&self, month: LeagueMonth) -> Result<bool, SnapshotError> {
        let path = self.path_for(month);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SnapshotError::Io { path, source: e }),
        }
    }
}

/// Rows of a snapshot. The header must match `HEADER` exactly, otherwise
/// every row would fail to deserialize and the file would read as empty.
fn read_rows<R: Read>(rdr: R, path: &Path) -> Result<Vec<PlayerRow>, SnapshotError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let headers = reader.headers().map_err(|e| SnapshotError::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;
    if headers.iter().map(str::trim).ne(HEADER) {
        return Err(SnapshotError::Header {
            path: path.to_path_buf(),
            found: headers.iter().map(String::from).collect(),
        });
    }

    let mut rows = Vec::new();
    for result in reader.deserialize::<SnapshotRecord>() {
        match result {
            Ok(raw) => rows.push(PlayerRow {
                player: raw.player.trim().to_string(),
                team: raw.team.trim().to_string(),
                hrs: raw.hrs,
            }),
            Err(e) => {
                warn!("skipping malformed snapshot row: {}", e);
            }
        }
    }
    Ok(rows)
}

fn write_rows<W: Write>(wtr: W, rows: &[PlayerRow]) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(wtr);
    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(SnapshotRecord {
            player: row.player.clone(),
            team: row.team.clone(),
            hrs: row.hrs,
        })?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dingers_core::config::TeamConfig;
    use dingers_core::roster::Roster;
    use std::collections::HashMap;

    fn month() -> LeagueMonth {
        LeagueMonth::new(2025, 5).unwrap()
    }

    fn sample_table() -> PlayerTable {
        let roster = Roster::from_teams(&[TeamConfig {
            id: "JIM".into(),
            players: vec!["Eugenio Suárez".into(), "Cal Raleigh".into()],
        }])
        .unwrap();
        PlayerTable::from_totals(&roster, &HashMap::from([("cal raleigh".to_string(), 11)]))
    }

    #[test]
    fn writes_header_and_rows() {
        let mut buf = Vec::new();
        write_rows(&mut buf, sample_table().rows()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Player,Team,HRs\nEugenio Suárez,JIM,0\nCal Raleigh,JIM,11\n");
    }

    #[test]
    fn empty_table_still_has_header() {
        let mut buf = Vec::new();
        write_rows(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Player,Team,HRs\n");
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let csv_data = "\
Player,Team,HRs
Cal Raleigh,JIM,11
Matt Olson,JIM,lots
Kyle Tucker,JIM,4";
        let rows = read_rows(csv_data.as_bytes(), Path::new("hr_2025-05.csv")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player, "Cal Raleigh");
        assert_eq!(rows[1].hrs, 4);
    }

    #[test]
    fn mismatched_header_is_an_error() {
        let csv_data = "player,team,hrs\nCal Raleigh,JIM,11\n";
        let err = read_rows(csv_data.as_bytes(), Path::new("hr_2025-05.csv")).unwrap_err();
        match err {
            SnapshotError::Header { found, .. } => assert_eq!(found, vec!["player", "team", "hrs"]),
            other => panic!("expected Header, got: {other}"),
        }
    }

    #[test]
    fn empty_file_is_an_error() {
        let err = read_rows("".as_bytes(), Path::new("hr_2025-05.csv")).unwrap_err();
        assert!(matches!(err, SnapshotError::Header { .. }));
    }

    #[test]
    fn save_load_remove() {
        let dir = std::env::temp_dir().join("dingers_snapshot_save_load");
        let _ = fs::remove_dir_all(&dir);
        let store = SnapshotStore::new(&dir);

        assert!(store.load(month()).unwrap().is_none());

        let path = store.save(month(), &sample_table()).unwrap();
        assert!(path.ends_with("hr_2025-05.csv"));
        assert!(!path.with_extension("csv.tmp").exists());

        let rows = store.load(month()).unwrap().unwrap();
        assert_eq!(rows, sample_table().rows());

        assert!(store.remove(month()).unwrap());
        assert!(!store.remove(month()).unwrap());
        assert!(store.load(month()).unwrap().is_none());

        let _ = fs::remove_dir_all(&dir);
    }
}
