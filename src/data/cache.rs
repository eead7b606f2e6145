use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::LoadError;

use super::loader::load_csv;
use super::mode::ModeCatalog;
use super::model::CommuteTable;

/// Write-once holder for the loaded table.
///
/// The first successful [`DataCache::table`] call reads the file; every later
/// call, from any thread, gets the same `Arc`. A failed load leaves the slot
/// empty so the caller sees the error.
pub struct DataCache {
    path: PathBuf,
    catalog: ModeCatalog,
    slot: Mutex<Option<Arc<CommuteTable>>>,
    loads: AtomicUsize,
}

impl DataCache {
    pub fn new(path: impl Into<PathBuf>, catalog: ModeCatalog) -> Self {
        DataCache {
            path: path.into(),
            catalog,
            slot: Mutex::new(None),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn catalog(&self) -> &ModeCatalog {
        &self.catalog
    }

    /// Shared table, loading it on first use.
    pub fn table(&self) -> Result<Arc<CommuteTable>, LoadError> {
        // The slot is only ever written with a complete table, so a poisoned
        // lock still guards consistent data.
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = slot.as_ref() {
            return Ok(Arc::clone(table));
        }

        self.loads.fetch_add(1, Ordering::SeqCst);
        let table = Arc::new(load_csv(&self.path, &self.catalog)?);
        log::info!(
            "Loaded {} trips with columns {:?} from {}",
            table.len(),
            table.columns,
            self.path.display()
        );
        *slot = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Number of times the file has actually been read.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_csv() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "transportation,start_time,ladybug_total_duration,foot_total_duration"
        )
        .unwrap();
        writeln!(file, "ladybug,540,10,").unwrap();
        writeln!(file, "foot,600,,20").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_once_and_shares_the_table() {
        let file = write_csv();
        let cache = DataCache::new(file.path(), ModeCatalog::default());

        let first = cache.table().unwrap();
        let second = cache.table().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.load_count(), 1);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn concurrent_callers_share_one_load() {
        let file = write_csv();
        let cache = Arc::new(DataCache::new(file.path(), ModeCatalog::default()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.table().unwrap())
            })
            .collect();
        let tables: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(cache.load_count(), 1);
        assert!(tables.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn failed_load_is_not_cached() {
        let cache = DataCache::new("/nonexistent/trips.csv", ModeCatalog::default());
        assert!(cache.table().is_err());
        assert!(cache.table().is_err());
        assert_eq!(cache.load_count(), 2);
    }
}
