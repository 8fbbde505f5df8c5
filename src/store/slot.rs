//! One storage key holding the completed topic list

use tracing::debug;

use super::{LocalStorage, TopicStore};
use crate::error::{Result, StorageError};

/// A single key of a [`LocalStorage`] whose value is a JSON array of topic ids
#[derive(Debug, Clone)]
pub struct TopicSlot {
    storage: LocalStorage,
    key: String,
}

impl TopicSlot {
    pub fn new(storage: LocalStorage, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The storage key this slot reads and writes
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// The raw serialized value, as it sits in storage
    pub fn raw(&self) -> Option<&str> {
        self.storage.get_item(&self.key)
    }
}

impl TopicStore for TopicSlot {
    fn load(&self) -> Result<Vec<String>> {
        let Some(raw) = self.raw() else {
            debug!("No value under '{}', starting empty", self.key);
            return Ok(Vec::new());
        };

        // A literal `null` is what a cleared browser value looks like
        let topics: Option<Vec<String>> =
            serde_json::from_str(raw).map_err(|e| StorageError::Malformed {
                key: self.key.clone(),
                reason: e.to_string(),
            })?;

        Ok(topics.unwrap_or_default())
    }

    fn save(&mut self, topics: &[String]) -> Result<()> {
        let value = serde_json::to_string(topics).map_err(|e| StorageError::SerializeFailed {
            key: self.key.clone(),
            reason: e.to_string(),
        })?;
        self.storage.set_item(&self.key, value)
    }

    fn clear(&mut self) -> Result<()> {
        self.storage.remove_item(&self.key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::DEFAULT_STORAGE_KEY;
    use pretty_assertions::assert_eq;

    fn slot_with(raw: Option<&str>) -> TopicSlot {
        let mut storage = LocalStorage::in_memory();
        if let Some(raw) = raw {
            storage.set_item(DEFAULT_STORAGE_KEY, raw).unwrap();
        }
        TopicSlot::new(storage, DEFAULT_STORAGE_KEY)
    }

    #[test]
    fn test_absent_key_loads_empty() {
        assert!(slot_with(None).load().unwrap().is_empty());
    }

    #[test]
    fn test_null_loads_empty() {
        assert!(slot_with(Some("null")).load().unwrap().is_empty());
    }

    #[test]
    fn test_load_array() {
        let slot = slot_with(Some(r#"["loops","arrays"]"#));
        assert_eq!(slot.load().unwrap(), vec!["loops", "arrays"]);
    }

    #[test]
    fn test_malformed_value_is_error() {
        let err = slot_with(Some("{not json")).load().unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::Malformed { .. })));

        let err = slot_with(Some(r#"{"loops": true}"#)).load().unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::Malformed { .. })));
    }

    #[test]
    fn test_save_writes_json_array_string() {
        let mut slot = slot_with(None);
        slot.save(&["loops".to_string()]).unwrap();
        assert_eq!(slot.key(), "topicsCompleted");
        assert_eq!(slot.raw(), Some(r#"["loops"]"#));
    }

    #[test]
    fn test_clear_removes_key() {
        let mut slot = slot_with(Some(r#"["loops"]"#));
        slot.clear().unwrap();
        assert_eq!(slot.raw(), None);
        assert!(slot.storage().is_empty());
    }
}
