// src/output/mod.rs

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Write `records` to `path` as a pretty-printed JSON array.
///
/// Written to a dot-prefixed tmp file next to `path`, then renamed over it,
/// so readers never see a half-written document.
pub fn write_records<T: Serialize, P: AsRef<Path>>(path: P, records: &[T]) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).with_context(|| format!("creating {:?}", dir))?;

    let file_name = path
        .file_name()
        .with_context(|| format!("output path {:?} has no file name", path))?
        .to_string_lossy();
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    let mut tmp =
        fs::File::create(&tmp_path).with_context(|| format!("creating {:?}", tmp_path))?;
    serde_json::to_writer_pretty(&mut tmp, records).context("serializing JSON")?;
    tmp.write_all(b"\n")?;
    tmp.sync_all()
        .with_context(|| format!("flushing {:?}", tmp_path))?;
    drop(tmp);

    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;
    debug!(path = %path.display(), records = records.len(), "wrote JSON document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{Record, ResultRecord};
    use tempfile::tempdir;

    #[test]
    fn writes_pretty_array_with_trailing_newline() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("results.json");
        let records = vec![Record::Result(ResultRecord {
            date: "12/04/2025".into(),
            match_type: "League".into(),
            home: "Syston".into(),
            away: "Anstey".into(),
            home_score: Some(2),
            away_score: Some(1),
            venue: "Memorial Park".into(),
            ko: "10:30".into(),
        })];

        write_records(&path, &records).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("]\n"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["homeScore"], 2);
        assert_eq!(value[0]["awayScore"], 1);
        assert_eq!(value[0]["matchType"], "League");

        // no tmp file left behind
        let leftovers: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn empty_collection_is_an_empty_array() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("fixtures.json");
        write_records::<Record, _>(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn replaces_existing_document() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("fixtures.json");
        fs::write(&path, "stale").unwrap();
        write_records::<Record, _>(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]\n");
    }
}
