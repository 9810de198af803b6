//! Cached translation wrapper
//!
//! The translation backend itself is an external collaborator. This module
//! only adds the bounded cache and batching in front of it: misses are sent
//! in batches, failures fall back to the original text.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::models::errors::AppResult;
use crate::utils::cache::{BoundedCache, CacheStats};
use crate::utils::constants::{TRANSLATION_BATCH_SIZE, TRANSLATION_CACHE_SIZE};

/// Translation backend
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate every text into `target_lang`; the output is positional and
    /// may be shorter than the input
    async fn translate_batch(&self, texts: &[String], target_lang: &str) -> AppResult<Vec<String>>;
}

/// Translator front with a FIFO cache keyed by `(text, lang)`
pub struct CachedTranslator<T> {
    inner: T,
    cache: BoundedCache<(String, String), String>,
    batch_size: usize,
}

impl<T: Translator> CachedTranslator<T> {
    pub fn new(inner: T) -> Self {
        Self::with_limits(inner, TRANSLATION_CACHE_SIZE, TRANSLATION_BATCH_SIZE)
    }

    pub fn with_limits(inner: T, cache_size: usize, batch_size: usize) -> Self {
        Self {
            inner,
            cache: BoundedCache::new(cache_size),
            batch_size: batch_size.max(1),
        }
    }

    /// Translate one text, returns the input on blank text or failure
    pub async fn translate(&self, text: &str, target_lang: &str) -> String {
        self.translate_many(&[text.to_string()], target_lang)
            .await
            .pop()
            .unwrap_or_else(|| text.to_string())
    }

    /// Translate many texts, output is aligned with the input
    pub async fn translate_many(&self, texts: &[String], target_lang: &str) -> Vec<String> {
        let mut output: Vec<Option<String>> = Vec::with_capacity(texts.len());
        let mut misses: Vec<usize> = Vec::new();

        for (idx, text) in texts.iter().enumerate() {
            if text.trim().is_empty() {
                output.push(Some(text.clone()));
                continue;
            }
            match self.cache.get(&(text.clone(), target_lang.to_string())) {
                Some(hit) => output.push(Some(hit)),
                None => {
                    output.push(None);
                    misses.push(idx);
                }
            }
        }

        debug!(
            "🌐 translate: {} texts, {} cache misses",
            texts.len(),
            misses.len()
        );

        for chunk in misses.chunks(self.batch_size) {
            let batch: Vec<String> = chunk.iter().map(|&i| texts[i].clone()).collect();

            match self.inner.translate_batch(&batch, target_lang).await {
                Ok(translations) => {
                    for (pos, &idx) in chunk.iter().enumerate() {
                        if let Some(translated) = translations.get(pos).filter(|t| !t.is_empty()) {
                            self.cache.insert(
                                (texts[idx].clone(), target_lang.to_string()),
                                translated.clone(),
                            );
                            output[idx] = Some(translated.clone());
                        }
                    }
                }
                Err(e) => warn!("⚠️ Batch translation failed: {}", e),
            }
        }

        output
            .into_iter()
            .zip(texts)
            .map(|(translated, original)| translated.unwrap_or_else(|| original.clone()))
            .collect()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached translation
    pub fn clear(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::AppError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Upper {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Translator for Upper {
        async fn translate_batch(&self, texts: &[String], _lang: &str) -> AppResult<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts.iter().map(|t| t.to_uppercase()).collect())
        }
    }

    struct Broken;

    #[async_trait]
    impl Translator for Broken {
        async fn translate_batch(&self, _texts: &[String], _lang: &str) -> AppResult<Vec<String>> {
            Err(AppError::api_status(500))
        }
    }

    #[tokio::test]
    async fn test_cache_hit_skips_backend() {
        let calls = Arc::new(AtomicUsize::new(0));
        let translator = CachedTranslator::new(Upper { calls: calls.clone() });

        assert_eq!(translator.translate("rug", "en").await, "RUG");
        assert_eq!(translator.translate("rug", "en").await, "RUG");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(translator.cache_stats().hits, 1);
    }

    #[tokio::test]
    async fn test_batches_are_chunked() {
        let calls = Arc::new(AtomicUsize::new(0));
        let translator = CachedTranslator::with_limits(Upper { calls: calls.clone() }, 100, 2);
        let texts: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();

        let out = translator.translate_many(&texts, "en").await;
        assert_eq!(out, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failure_returns_original() {
        let translator = CachedTranslator::new(Broken);
        assert_eq!(translator.translate("创建者", "en").await, "创建者");
        assert_eq!(translator.translate("  ", "en").await, "  ");
        assert_eq!(translator.cache_stats().entries, 0);
    }
}
