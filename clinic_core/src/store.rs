//! Flat-file collection store with file locking.
//!
//! Each collection lives in one file, one record per line. Loading an
//! absent file writes the caller-supplied seed records and returns them
//! (first-run bootstrap). Saving rewrites the whole file through a temp
//! file plus rename so a crash mid-write cannot leave a half-written
//! store behind.

use crate::codec::{encode_line, Record, DELIMITER};
use crate::{Error, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Load a collection, seeding the file if it does not exist yet
///
/// Lines with the wrong field count are skipped with a warning. A field
/// that fails to parse (bad id, date, or time) fails the load for this
/// file only; callers decide how to degrade.
pub fn load_or_seed<T: Record>(path: &Path, seed: Vec<T>) -> Result<Vec<T>> {
    if !path.exists() {
        // An empty seed writes nothing: the file first appears when a
        // mutation rewrites the collection. Appointments rely on this.
        if seed.is_empty() {
            tracing::debug!("No store at {:?} and no seed records", path);
            return Ok(seed);
        }

        tracing::info!("No store at {:?}, writing {} seed records", path, seed.len());
        if let Err(e) = save(path, &seed) {
            // First-run bootstrap keeps the seed resident even if the
            // initial write fails; the next successful mutation retries.
            tracing::warn!("Unable to write seed store {:?}: {}", path, e);
        }
        return Ok(seed);
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let mut contents = String::new();
    let mut reader = std::io::BufReader::new(&file);
    let read_result = reader.read_to_string(&mut contents);
    file.unlock()?;
    read_result?;

    let mut records = Vec::new();
    for (line_num, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(DELIMITER).collect();
        if fields.len() != T::FIELD_COUNT {
            tracing::warn!(
                "Skipping malformed line {} in {:?}: expected {} fields, got {}",
                line_num + 1,
                path,
                T::FIELD_COUNT,
                fields.len()
            );
            continue;
        }

        records.push(T::from_fields(&fields)?);
    }

    tracing::debug!("Loaded {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Rewrite a collection file in full
///
/// Writes to a locked temp file in the same directory, syncs, then renames
/// over the original.
pub fn save<T: Record>(path: &Path, records: &[T]) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "store path missing parent",
        ))
    })?;
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        for record in records {
            writer.write_all(encode_line(record).as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Saved {} records to {:?}", records.len(), path);
    Ok(())
}
