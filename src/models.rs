//! Core models for the skell library
//!
//! This module contains the value types returned by the SKELL client: concordance
//! sentences, the part-of-speech and language enumerations used in query strings,
//! and the word sketch tree (sketch → grammatical relations → collocations).

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors raised while parsing model values from user input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Unsupported language: {0} (expected one of English, German, Italian, Czech, Estonian)")]
    UnsupportedLanguage(String),

    #[error("Unknown part of speech: {0}")]
    UnknownKind(String),
}

/// A concordance line split into left context, keyword in context and right context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    left: String,
    kwic: String,
    right: String,
}

impl Sentence {
    pub fn new(left: String, kwic: String, right: String) -> Self {
        Self { left, kwic, right }
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn kwic(&self) -> &str {
        &self.kwic
    }

    pub fn right(&self) -> &str {
        &self.right
    }

    /// Returns the full sentence as displayed by the service
    pub fn text(&self) -> String {
        format!("{}{}{}", self.left, self.kwic, self.right)
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.left, self.kwic, self.right)
    }
}

/// Part of speech a word sketch can be restricted to.
///
/// The single-letter codes are part of the SKELL wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordSketchKind {
    Adverb,
    Conjunction,
    Pronoun,
    Adjective,
    Noun,
    Preposition,
    Verb,
}

impl WordSketchKind {
    pub const ALL: [WordSketchKind; 7] = [
        WordSketchKind::Adverb,
        WordSketchKind::Conjunction,
        WordSketchKind::Pronoun,
        WordSketchKind::Adjective,
        WordSketchKind::Noun,
        WordSketchKind::Preposition,
        WordSketchKind::Verb,
    ];

    /// The code used in `lpos` and `headword` query parameters
    pub fn code(&self) -> char {
        match self {
            WordSketchKind::Adverb => 'a',
            WordSketchKind::Conjunction => 'c',
            WordSketchKind::Pronoun => 'd',
            WordSketchKind::Adjective => 'j',
            WordSketchKind::Noun => 'n',
            WordSketchKind::Preposition => 'p',
            WordSketchKind::Verb => 'v',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    pub fn name(&self) -> &'static str {
        match self {
            WordSketchKind::Adverb => "adverb",
            WordSketchKind::Conjunction => "conjunction",
            WordSketchKind::Pronoun => "pronoun",
            WordSketchKind::Adjective => "adjective",
            WordSketchKind::Noun => "noun",
            WordSketchKind::Preposition => "preposition",
            WordSketchKind::Verb => "verb",
        }
    }
}

impl fmt::Display for WordSketchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WordSketchKind {
    type Err = ModelError;

    /// Accepts either the full name (`noun`) or the wire code (`n`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let mut chars = lowered.chars();
        if let (Some(code), None) = (chars.next(), chars.next()) {
            if let Some(kind) = Self::from_code(code) {
                return Ok(kind);
            }
        }

        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == lowered)
            .ok_or_else(|| ModelError::UnknownKind(s.to_string()))
    }
}

/// Corpus languages supported by SKELL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    German,
    Italian,
    Czech,
    Estonian,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::German,
        Language::Italian,
        Language::Czech,
        Language::Estonian,
    ];

    /// The value sent as the `lang` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Czech => "Czech",
            Language::Estonian => "Estonian",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnsupportedLanguage(s.to_string()))
    }
}

/// A word co-occurring with the headword under one grammatical relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collocation {
    word: String,
    lemma_pos: String,
    pair_key: String,
    // index of the owning relation inside its word sketch
    relation: usize,
}

impl Collocation {
    /// Creates a detached collocation.
    ///
    /// Its [`relation_index`](Self::relation_index) is meaningless until the
    /// collocation is passed to [`WordSketch::add_relation`], which sets it.
    pub fn new(word: String, lemma_pos: String, pair_key: String) -> Self {
        Self {
            word,
            lemma_pos,
            pair_key,
            relation: 0,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    /// Lemma-position key of the collocate, e.g. `day-n`
    pub fn lemma_pos(&self) -> &str {
        &self.lemma_pos
    }

    /// The headword/collocate pair as shown by the service (`Cm` field)
    pub fn pair_key(&self) -> &str {
        &self.pair_key
    }

    /// Position of the owning relation in [`WordSketch::relations`].
    ///
    /// Only valid for collocations obtained from a [`WordSketch`]; use
    /// [`WordSketch::relation_of`] to check membership.
    pub fn relation_index(&self) -> usize {
        self.relation
    }
}

impl fmt::Display for Collocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Collocation({})", self.pair_key)
    }
}

/// A grammatical relation of a headword together with its collocations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammaticalRelation {
    headword: String,
    description: String,
    collocations: Vec<Collocation>,
}

impl GrammaticalRelation {
    pub fn headword(&self) -> &str {
        &self.headword
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn collocations(&self) -> &[Collocation] {
        &self.collocations
    }
}

impl fmt::Display for GrammaticalRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GrammaticalRelation({}, collocations=", self.description)?;
        for collocation in &self.collocations {
            writeln!(f, "\t{}", collocation)?;
        }
        write!(f, ")")
    }
}

/// Summary of a headword's grammatical relations and collocates.
///
/// The sketch owns every relation, and each relation owns its collocations.
/// Navigation back up the tree goes through [`RelationRef`] and
/// [`CollocationRef`], which borrow the sketch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSketch {
    headword: String,
    kind: Option<WordSketchKind>,
    relations: Vec<GrammaticalRelation>,
}

impl WordSketch {
    pub fn new(headword: String, kind: Option<WordSketchKind>) -> Self {
        Self {
            headword,
            kind,
            relations: Vec::new(),
        }
    }

    pub fn headword(&self) -> &str {
        &self.headword
    }

    /// The part of speech the sketch was requested with, if any
    pub fn kind(&self) -> Option<WordSketchKind> {
        self.kind
    }

    /// Appends a relation and links each collocation back to it
    pub fn add_relation<I>(&mut self, description: String, collocations: I) -> RelationRef<'_>
    where
        I: IntoIterator<Item = Collocation>,
    {
        let index = self.relations.len();
        let collocations = collocations
            .into_iter()
            .map(|mut collocation| {
                collocation.relation = index;
                collocation
            })
            .collect();

        self.relations.push(GrammaticalRelation {
            headword: self.headword.clone(),
            description,
            collocations,
        });

        RelationRef {
            sketch: &*self,
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn relation(&self, index: usize) -> Option<RelationRef<'_>> {
        (index < self.relations.len()).then_some(RelationRef {
            sketch: self,
            index,
        })
    }

    /// Relations in the order returned by the service
    pub fn relations(&self) -> impl ExactSizeIterator<Item = RelationRef<'_>> + '_ {
        (0..self.relations.len()).map(move |index| RelationRef {
            sketch: self,
            index,
        })
    }

    /// Every collocation of every relation, in response order
    pub fn collocations(&self) -> impl Iterator<Item = CollocationRef<'_>> + '_ {
        self.relations().flat_map(|relation| relation.collocations())
    }

    /// Resolves the relation a collocation of this sketch belongs to
    pub fn relation_of<'a>(&'a self, collocation: &'a Collocation) -> Option<CollocationRef<'a>> {
        let relation = self.relation(collocation.relation)?;
        relation
            .get()
            .collocations
            .iter()
            .any(|candidate| std::ptr::eq(candidate, collocation))
            .then_some(CollocationRef {
                relation,
                collocation,
            })
    }
}

impl fmt::Display for WordSketch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => writeln!(f, "WordSketch({}, {}, rels=", self.headword, kind)?,
            None => writeln!(f, "WordSketch({}, rels=", self.headword)?,
        }
        for relation in &self.relations {
            for line in relation.to_string().lines() {
                writeln!(f, "\t{}", line)?;
            }
        }
        write!(f, ")")
    }
}

/// A grammatical relation borrowed together with the sketch that owns it
#[derive(Debug, Clone, Copy)]
pub struct RelationRef<'a> {
    sketch: &'a WordSketch,
    index: usize,
}

impl<'a> RelationRef<'a> {
    pub fn word_sketch(&self) -> &'a WordSketch {
        self.sketch
    }

    pub fn get(&self) -> &'a GrammaticalRelation {
        &self.sketch.relations[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn collocations(&self) -> impl ExactSizeIterator<Item = CollocationRef<'a>> + 'a {
        let relation = *self;
        self.get()
            .collocations
            .iter()
            .map(move |collocation| CollocationRef {
                relation,
                collocation,
            })
    }
}

impl<'a> Deref for RelationRef<'a> {
    type Target = GrammaticalRelation;

    fn deref(&self) -> &Self::Target {
        self.get()
    }
}

/// A collocation borrowed together with the relation that created it
#[derive(Debug, Clone, Copy)]
pub struct CollocationRef<'a> {
    relation: RelationRef<'a>,
    collocation: &'a Collocation,
}

impl<'a> CollocationRef<'a> {
    pub fn relation(&self) -> RelationRef<'a> {
        self.relation
    }

    pub fn get(&self) -> &'a Collocation {
        self.collocation
    }
}

impl<'a> Deref for CollocationRef<'a> {
    type Target = Collocation;

    fn deref(&self) -> &Self::Target {
        self.collocation
    }
}
