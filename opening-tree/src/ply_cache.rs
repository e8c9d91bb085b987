use anyhow::{Context, Result};
use log::info;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::PlySnapshot;

pub const DEFAULT_SNAPSHOT_DIR: &str = "snapshots";

/// Per-depth snapshot files. A file that exists is authoritative and never rewritten.
pub struct PlyCache {
    snapshot_dir: PathBuf,
}

impl PlyCache {
    pub fn new(snapshot_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&snapshot_dir).with_context(|| {
            format!("Failed to create snapshot directory {:?}", snapshot_dir)
        })?;

        Ok(Self { snapshot_dir })
    }

    pub fn load(&self, ply: usize) -> Result<Option<PlySnapshot>> {
        let file_path = self.file_path(ply);

        if !file_path.is_file() {
            return Ok(None);
        }

        let file = File::open(&file_path)
            .with_context(|| format!("Failed to open snapshot {:?}", file_path))?;
        let snapshot = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse snapshot {:?}", file_path))?;

        Ok(Some(snapshot))
    }

    pub fn store(&self, ply: usize, snapshot: &PlySnapshot) -> Result<()> {
        let file_path = self.file_path(ply);
        let tmp_path = file_path.with_extension("json.tmp");

        {
            let file = File::create(&tmp_path)
                .with_context(|| format!("Failed to create snapshot {:?}", tmp_path))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, snapshot)?;
            writer.flush()?;
        }

        fs::rename(&tmp_path, &file_path)
            .with_context(|| format!("Failed to write snapshot {:?}", file_path))?;

        info!("Stored {} lines to {:?}", snapshot.len(), file_path);

        Ok(())
    }

    pub fn snapshot_dir(&self) -> &Path {
        &self.snapshot_dir
    }

    pub fn file_path(&self, ply: usize) -> PathBuf {
        self.snapshot_dir.join(format!("ply{}.json", ply))
    }
}
