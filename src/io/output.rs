//! Recording of solution snapshots.
//!
//! The solver emits a time, then one snapshot per field, before every time step,
//! and the physical node coordinates once at the start. A [`SolutionRecorder`]
//! decides what happens to them.
//!
//! # Text Format
//!
//! [`TextRecorder`] writes into an output directory:
//!
//! ```text
//! times.txt        one time per line
//! <field>.txt      one snapshot per line, values in element-major order
//! coordinates.txt  a single line with the node coordinates in the same order
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::solver::FieldMatrix;

/// Error type for writing solution output.
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error writing a file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Field name unusable as a file name
    #[error("Invalid field name: {0:?}")]
    InvalidFieldName(String),
}

/// Sink for times, field snapshots and node coordinates.
pub trait SolutionRecorder {
    /// Append a simulation time.
    fn record_time(&mut self, time: f64) -> Result<(), OutputError>;

    /// Append a snapshot of the named field.
    fn record_field(&mut self, name: &str, field: &FieldMatrix) -> Result<(), OutputError>;

    /// Store the physical node coordinates.
    fn record_coordinates(&mut self, coords: &FieldMatrix) -> Result<(), OutputError>;
}

// =============================================================================
// Null Recorder
// =============================================================================

/// Recorder that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRecorder;

impl SolutionRecorder for NullRecorder {
    fn record_time(&mut self, _time: f64) -> Result<(), OutputError> {
        Ok(())
    }

    fn record_field(&mut self, _name: &str, _field: &FieldMatrix) -> Result<(), OutputError> {
        Ok(())
    }

    fn record_coordinates(&mut self, _coords: &FieldMatrix) -> Result<(), OutputError> {
        Ok(())
    }
}

// =============================================================================
// Memory Recorder
// =============================================================================

/// Recorder that keeps all snapshots in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryRecorder {
    times: Vec<f64>,
    fields: BTreeMap<String, Vec<FieldMatrix>>,
    coordinates: Option<FieldMatrix>,
}

impl MemoryRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded times.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Snapshots of a field, in recording order.
    pub fn field(&self, name: &str) -> Option<&[FieldMatrix]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    /// Names of all recorded fields.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Recorded node coordinates.
    pub fn coordinates(&self) -> Option<&FieldMatrix> {
        self.coordinates.as_ref()
    }
}

impl SolutionRecorder for MemoryRecorder {
    fn record_time(&mut self, time: f64) -> Result<(), OutputError> {
        self.times.push(time);
        Ok(())
    }

    fn record_field(&mut self, name: &str, field: &FieldMatrix) -> Result<(), OutputError> {
        self.fields
            .entry(name.to_string())
            .or_default()
            .push(field.clone());
        Ok(())
    }

    fn record_coordinates(&mut self, coords: &FieldMatrix) -> Result<(), OutputError> {
        self.coordinates = Some(coords.clone());
        Ok(())
    }
}

// =============================================================================
// Text Recorder
// =============================================================================

/// Recorder writing whitespace-separated text files into a directory.
pub struct TextRecorder {
    dir: PathBuf,
    times: BufWriter<File>,
    fields: BTreeMap<String, BufWriter<File>>,
}

impl TextRecorder {
    /// Create the output directory (if needed) and open `times.txt`.
    pub fn new(dir: &Path) -> Result<Self, OutputError> {
        fs::create_dir_all(dir)?;
        let times = BufWriter::new(File::create(dir.join("times.txt"))?);
        Ok(Self {
            dir: dir.to_path_buf(),
            times,
            fields: BTreeMap::new(),
        })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Flush all open files.
    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.times.flush()?;
        for writer in self.fields.values_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn field_writer(&mut self, name: &str) -> Result<&mut BufWriter<File>, OutputError> {
        if !self.fields.contains_key(name) {
            check_file_stem(name)?;
            let file = File::create(self.dir.join(format!("{}.txt", name)))?;
            self.fields.insert(name.to_string(), BufWriter::new(file));
        }
        self.fields
            .get_mut(name)
            .ok_or_else(|| OutputError::InvalidFieldName(name.to_string()))
    }
}

impl SolutionRecorder for TextRecorder {
    fn record_time(&mut self, time: f64) -> Result<(), OutputError> {
        writeln!(self.times, "{:.15e}", time)?;
        Ok(())
    }

    fn record_field(&mut self, name: &str, field: &FieldMatrix) -> Result<(), OutputError> {
        let writer = self.field_writer(name)?;
        write_row(writer, field)
    }

    fn record_coordinates(&mut self, coords: &FieldMatrix) -> Result<(), OutputError> {
        let mut writer = BufWriter::new(File::create(self.dir.join("coordinates.txt"))?);
        write_row(&mut writer, coords)?;
        writer.flush()?;
        Ok(())
    }
}

/// Reject names that are empty, reserved or would escape the output directory.
fn check_file_stem(name: &str) -> Result<(), OutputError> {
    let reserved = matches!(name, "times" | "coordinates");
    if name.is_empty() || reserved || name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(OutputError::InvalidFieldName(name.to_string()));
    }
    Ok(())
}

fn write_row<W: Write>(writer: &mut W, field: &FieldMatrix) -> Result<(), OutputError> {
    let mut values = field.as_slice().iter();
    if let Some(first) = values.next() {
        write!(writer, "{:.15e}", first)?;
    }
    for value in values {
        write!(writer, " {:.15e}", value)?;
    }
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> FieldMatrix {
        FieldMatrix::from_columns(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap()
    }

    #[test]
    fn test_memory_recorder() {
        let mut recorder = MemoryRecorder::new();
        recorder.record_coordinates(&field()).unwrap();
        recorder.record_time(0.0).unwrap();
        recorder.record_field("Advection", &field()).unwrap();
        recorder.record_time(0.5).unwrap();
        recorder.record_field("Advection", &field()).unwrap();

        assert_eq!(recorder.times(), &[0.0, 0.5]);
        assert_eq!(recorder.field("Advection").unwrap().len(), 2);
        assert!(recorder.field("Other").is_none());
        assert_eq!(recorder.field_names().collect::<Vec<_>>(), vec!["Advection"]);
        assert_eq!(recorder.coordinates(), Some(&field()));
    }

    #[test]
    fn test_text_recorder_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("results");
        let mut recorder = TextRecorder::new(&out).unwrap();
        recorder.record_coordinates(&field()).unwrap();
        recorder.record_time(0.0).unwrap();
        recorder.record_field("Advection", &field()).unwrap();
        recorder.record_time(0.25).unwrap();
        recorder.record_field("Advection", &field()).unwrap();
        recorder.flush().unwrap();

        let times = fs::read_to_string(out.join("times.txt")).unwrap();
        let parsed: Vec<f64> = times.lines().map(|l| l.parse().unwrap()).collect();
        assert_eq!(parsed, vec![0.0, 0.25]);

        let snapshots = fs::read_to_string(out.join("Advection.txt")).unwrap();
        let rows: Vec<&str> = snapshots.lines().collect();
        assert_eq!(rows.len(), 2);
        let values: Vec<f64> = rows[0]
            .split_whitespace()
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);

        let coords = fs::read_to_string(out.join("coordinates.txt")).unwrap();
        assert_eq!(coords.lines().count(), 1);
    }

    #[test]
    fn test_text_recorder_rejects_bad_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = TextRecorder::new(dir.path()).unwrap();
        for name in ["", "times", "../escape", ".hidden"] {
            assert!(matches!(
                recorder.record_field(name, &field()),
                Err(OutputError::InvalidFieldName(_))
            ));
        }
    }

    #[test]
    fn test_null_recorder() {
        let mut recorder = NullRecorder;
        assert!(recorder.record_time(1.0).is_ok());
        assert!(recorder.record_field("u", &field()).is_ok());
    }
}
