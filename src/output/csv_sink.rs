//! CSV workbook sink
//!
//! Writes one CSV file per sheet group into the output directory, mirroring
//! a one-sheet-per-group workbook. Every file starts with the fixed header
//! row `ID, Name, Depth, Parent`.

use crate::crawler::FlatRecord;
use crate::output::traits::{RecordSink, SinkResult};
use csv::Writer;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Group stems are capped like the reference output's sheet titles.
const MAX_GROUP_STEM_LEN: usize = 31;

const HEADER: [&str; 4] = ["ID", "Name", "Depth", "Parent"];

/// Record sink writing one CSV file per sheet group
pub struct CsvWorkbook {
    directory: PathBuf,
    writers: HashMap<String, Writer<File>>,
}

impl CsvWorkbook {
    /// Creates the output directory (if needed) and an empty workbook.
    pub fn new(directory: &Path) -> SinkResult<Self> {
        fs::create_dir_all(directory)?;

        Ok(Self {
            directory: directory.to_path_buf(),
            writers: HashMap::new(),
        })
    }

    /// Returns the writer for a group, opening its file and writing the
    /// header row on first use.
    fn writer_for(&mut self, group: &str) -> SinkResult<&mut Writer<File>> {
        match self.writers.entry(group.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let path = self
                    .directory
                    .join(format!("{}.csv", sanitize_group_name(group)));
                let mut writer = Writer::from_path(&path)?;
                writer.write_record(HEADER)?;
                Ok(entry.insert(writer))
            }
        }
    }
}

impl RecordSink for CsvWorkbook {
    fn record(&mut self, record: &FlatRecord) -> SinkResult<()> {
        let writer = self.writer_for(&record.sheet_group)?;

        writer.write_record([
            record.id.to_string(),
            record.name.clone(),
            record.depth.to_string(),
            record.parent_id.unwrap_or(0).to_string(),
        ])?;

        Ok(())
    }

    fn finalize(&mut self) -> SinkResult<()> {
        for writer in self.writers.values_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

/// Turns a group name into a filesystem-safe file stem, capped at
/// [`MAX_GROUP_STEM_LEN`] characters.
fn sanitize_group_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let stem: String = cleaned.trim().chars().take(MAX_GROUP_STEM_LEN).collect();
    if stem.is_empty() {
        "group".to_string()
    } else {
        stem
    }
}
