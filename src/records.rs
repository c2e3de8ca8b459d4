//! Best level reached, persisted through a key-value store

use crate::consts::BEST_LEVEL_KEY;
use crate::persistence::{KeyValueStore, StoreError};

/// What recording a finished run did to the stored best
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The run beat the previous best (or there was none)
    NewBest { previous: Option<u32>, best: u32 },
    /// The stored best stands
    Kept { best: u32 },
}

impl RecordOutcome {
    pub fn best(&self) -> u32 {
        match *self {
            RecordOutcome::NewBest { best, .. } | RecordOutcome::Kept { best } => best,
        }
    }
}

/// Accessors for the `"bestLevel"` record
pub struct BestLevel;

impl BestLevel {
    /// Stored best level; unparsable values count as absent
    pub fn read<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<u32>, StoreError> {
        let Some(raw) = store.get(BEST_LEVEL_KEY)? else {
            return Ok(None);
        };
        match raw.trim().parse::<u32>() {
            Ok(level) => Ok(Some(level)),
            Err(_) => {
                log::warn!("Ignoring malformed {} record: {:?}", BEST_LEVEL_KEY, raw);
                Ok(None)
            }
        }
    }

    /// Overwrite the record only when `level` strictly beats it
    pub fn record<S: KeyValueStore + ?Sized>(
        store: &mut S,
        level: u32,
    ) -> Result<RecordOutcome, StoreError> {
        let previous = Self::read(store)?;
        match previous {
            Some(best) if best >= level => Ok(RecordOutcome::Kept { best }),
            _ => {
                store.set(BEST_LEVEL_KEY, &level.to_string())?;
                log::info!("New best level: {} (was {:?})", level, previous);
                Ok(RecordOutcome::NewBest { previous, best: level })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_first_record_is_written() {
        let mut store = MemoryStore::new();
        let outcome = BestLevel::record(&mut store, 2).unwrap();
        assert_eq!(outcome, RecordOutcome::NewBest { previous: None, best: 2 });
        assert_eq!(BestLevel::read(&store).unwrap(), Some(2));
    }

    #[test]
    fn test_only_strictly_greater_overwrites() {
        let mut store = MemoryStore::new();
        store.set(BEST_LEVEL_KEY, "2").unwrap();
        assert_eq!(
            BestLevel::record(&mut store, 3).unwrap(),
            RecordOutcome::NewBest { previous: Some(2), best: 3 }
        );
        assert_eq!(store.get(BEST_LEVEL_KEY).unwrap().as_deref(), Some("3"));

        assert_eq!(BestLevel::record(&mut store, 3).unwrap(), RecordOutcome::Kept { best: 3 });

        store.set(BEST_LEVEL_KEY, "5").unwrap();
        assert_eq!(BestLevel::record(&mut store, 3).unwrap().best(), 5);
        assert_eq!(store.get(BEST_LEVEL_KEY).unwrap().as_deref(), Some("5"));
    }

    #[test]
    fn test_malformed_record_is_replaced() {
        let mut store = MemoryStore::new();
        store.set(BEST_LEVEL_KEY, "lots").unwrap();
        assert_eq!(BestLevel::read(&store).unwrap(), None);
        BestLevel::record(&mut store, 1).unwrap();
        assert_eq!(BestLevel::read(&store).unwrap(), Some(1));
    }
}
