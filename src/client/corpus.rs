//! SKELL client implementation
//!
//! Each operation builds a query URL, fetches it through a [`Transport`] and
//! maps the decoded JSON onto the model types.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde::de::DeserializeOwned;

use super::wire::{LinesResponse, ThesaurusResponse, WordSketchResponse};
use super::{urls, ClientConfig, HttpTransport, Result, SkellError, Transport};
use crate::models::{Collocation, CollocationRef, Language, Sentence, WordSketch, WordSketchKind};

/// Client for the SKELL corpus service
///
/// Results of [`SkellClient::get_examples`] are cached per word for the lifetime
/// of the client. The cache key is the word alone: calling
/// [`SkellClient::set_language`] does not invalidate entries fetched under the
/// previous language. Use [`SkellClient::clear_cache`] when that matters.
pub struct SkellClient<T: Transport = HttpTransport> {
    transport: T,
    config: ClientConfig,
    examples: Mutex<HashMap<String, Vec<Sentence>>>,
}

impl SkellClient<HttpTransport> {
    /// Create a new client with default configuration (English)
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let transport = HttpTransport::new(config.user_agent.clone());
        Self::with_transport(transport, config)
    }

    /// Create a client for one of the supported languages, given by name
    pub fn for_language(language: &str) -> Result<Self> {
        let language: Language = language.parse()?;
        Ok(Self::with_config(ClientConfig::with_language(language)))
    }
}

impl Default for SkellClient<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> SkellClient<T> {
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            examples: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn language(&self) -> Language {
        self.config.language
    }

    /// Change the corpus language used by subsequent requests.
    ///
    /// Cached examples are kept as they are.
    pub fn set_language(&mut self, language: Language) {
        self.config.language = language;
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Number of words with cached examples
    pub fn cached_words(&self) -> usize {
        self.cache().len()
    }

    pub fn clear_cache(&self) {
        self.cache().clear();
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<String, Vec<Sentence>>> {
        match self.examples.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("Examples cache lock was poisoned; recovering");
                poisoned.into_inner()
            }
        }
    }

    async fn get_json<R: DeserializeOwned>(&self, url: &str) -> Result<R> {
        tracing::debug!("GET {}", url);
        let body = self.transport.get(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Example sentences containing `word`
    pub async fn get_examples(&self, word: &str) -> Result<Vec<Sentence>> {
        let cached = self.cache().get(word).cloned();
        if let Some(sentences) = cached {
            tracing::debug!("Examples cache hit for {:?}", word);
            return Ok(sentences);
        }

        let url = urls::concordance(&self.config.base_url, word, self.config.language);
        let response: LinesResponse = self.get_json(&url).await?;
        let sentences = response.into_sentences();
        tracing::debug!("Fetched {} examples for {:?}", sentences.len(), word);

        // A concurrent fetch of the same word may have landed first; keep that one.
        let mut cache = self.cache();
        let cached = cache.entry(word.to_string()).or_insert(sentences);
        Ok(cached.clone())
    }

    /// Word sketch of `word`, optionally restricted to one part of speech
    pub async fn get_word_sketch(
        &self,
        word: &str,
        kind: Option<WordSketchKind>,
    ) -> Result<WordSketch> {
        let url = urls::word_sketch(&self.config.base_url, word, kind, self.config.language);
        let response: WordSketchResponse = self.get_json(&url).await?;

        let mut sketch = WordSketch::new(word.to_string(), kind);
        for gram_rel in response.gram_rels {
            sketch.add_relation(
                gram_rel.name,
                gram_rel.words.into_iter().map(Collocation::from),
            );
        }
        tracing::debug!("Word sketch for {:?} has {} relations", word, sketch.len());
        Ok(sketch)
    }

    /// Concordance lines where the sketch headword occurs with `collocation`
    /// under the collocation's grammatical relation
    pub async fn get_concordances_for_collocation(
        &self,
        collocation: CollocationRef<'_>,
    ) -> Result<Vec<Sentence>> {
        let relation = collocation.relation();
        let sketch = relation.word_sketch();
        let kind = sketch
            .kind()
            .ok_or_else(|| SkellError::MissingKind(sketch.headword().to_string()))?;

        let url = urls::word_sketch_concordance(
            &self.config.base_url,
            relation.headword(),
            kind,
            collocation.lemma_pos(),
            relation.description(),
            self.config.language,
        );
        let response: LinesResponse = self.get_json(&url).await?;
        Ok(response.into_sentences())
    }

    /// Words the thesaurus lists as similar to `word`, in service order
    pub async fn get_similar_words(&self, word: &str) -> Result<Vec<String>> {
        let url = urls::thesaurus(&self.config.base_url, word, self.config.language);
        let response: ThesaurusResponse = self.get_json(&url).await?;
        Ok(response
            .words
            .into_iter()
            .filter_map(|entry| entry.word)
            .collect())
    }
}
