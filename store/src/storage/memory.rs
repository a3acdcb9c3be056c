use super::KeyValueStorage;
use crate::error::StoreError;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, Value>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage {
            entries: HashMap::new(),
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.get(key).filter(|v| !v.is_null()).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_missing_key() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("bills").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut storage = MemoryStorage::new();
        storage.set("bills", json!([1])).unwrap();
        storage.set("bills", json!([2, 3])).unwrap();
        assert_eq!(storage.get("bills").unwrap(), Some(json!([2, 3])));
    }

    #[test]
    fn test_null_reads_as_absent() {
        let mut storage = MemoryStorage::new();
        storage.set("categories", Value::Null).unwrap();
        assert_eq!(storage.get("categories").unwrap(), None);
    }
}
