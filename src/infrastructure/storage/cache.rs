// In-memory cache implementation using DashMap
use dashmap::DashMap;
use serde_json::Value;

/// Generated answers keyed by the exact query string.
///
/// Entries live as long as the owning search session; nothing is evicted.
#[derive(Debug)]
pub struct AnswerCache {
    map: DashMap<String, Vec<Value>>,
}

impl AnswerCache {
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Vec<Value>> {
        self.map.get(key).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, key: String, value: Vec<Value>) {
        self.map.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for AnswerCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_are_exact() {
        let cache = AnswerCache::new();
        cache.insert("Alien".to_string(), vec![json!({"title": "Alien"})]);

        assert!(cache.get("Alien").is_some());
        assert!(cache.get("alien").is_none());
        assert!(cache.get("Alien ").is_none());
        assert_eq!(cache.len(), 1);
    }
}
