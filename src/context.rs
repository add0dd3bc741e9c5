//! Context Store
//!
//! Accumulates the text extracted from every successful upload into one
//! shared buffer until it is explicitly cleared. Cloning a [`ContextStore`]
//! yields another handle onto the same buffer.

use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct ContextStore {
    buffer: Arc<RwLock<String>>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newline followed by `text`.
    pub async fn append(&self, text: &str) {
        let mut buffer = self.buffer.write().await;
        buffer.reserve(text.len() + 1);
        buffer.push('\n');
        buffer.push_str(text);
    }

    /// Reset the buffer to the empty string.
    pub async fn clear(&self) {
        self.buffer.write().await.clear();
    }

    pub async fn current(&self) -> String {
        self.buffer.read().await.clone()
    }

    /// Number of bytes currently held
    pub async fn len(&self) -> usize {
        self.buffer.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.buffer.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_empty() {
        let store = ContextStore::new();
        assert_eq!(store.current().await, "");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_append_prefixes_newline() {
        let store = ContextStore::new();
        store.append("hello world").await;
        assert_eq!(store.current().await, "\nhello world");
        assert_eq!(store.len().await, 12);
    }

    #[tokio::test]
    async fn test_sequential_appends_match_concatenation() {
        let store = ContextStore::new();
        store.append("A").await;
        store.append("B").await;
        assert_eq!(store.current().await, format!("\n{}\n{}", "A", "B"));
    }

    #[tokio::test]
    async fn test_empty_text_still_appends_newline() {
        let store = ContextStore::new();
        store.append("").await;
        assert_eq!(store.current().await, "\n");
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = ContextStore::new();
        store.clear().await;
        assert_eq!(store.current().await, "");

        store.append("notes").await;
        store.clear().await;
        store.clear().await;
        assert_eq!(store.current().await, "");
    }

    #[tokio::test]
    async fn test_clones_share_buffer() {
        let store = ContextStore::new();
        let handle = store.clone();
        handle.append("shared").await;
        assert_eq!(store.current().await, "\nshared");
    }

    #[tokio::test]
    async fn test_separate_instances_are_isolated() {
        let first = ContextStore::new();
        let second = ContextStore::new();
        first.append("only here").await;
        assert!(second.is_empty().await);
    }

    #[test]
    fn test_concurrent_appends_keep_fragments_whole() {
        tokio_test::block_on(async {
            let store = ContextStore::new();
            let tasks: Vec<_> = (0..16)
                .map(|i| {
                    let store = store.clone();
                    tokio::spawn(async move { store.append(&format!("chunk-{i}")).await })
                })
                .collect();
            for task in tasks {
                task.await.unwrap();
            }

            let value = store.current().await;
            let mut fragments: Vec<&str> = value.split('\n').skip(1).collect();
            fragments.sort();
            let mut expected: Vec<String> = (0..16).map(|i| format!("chunk-{i}")).collect();
            expected.sort();
            assert_eq!(fragments, expected);
        });
    }
}
