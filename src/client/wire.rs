//! JSON shapes returned by the service. Absent fields default to empty values.

use serde::Deserialize;

use crate::models::{Collocation, Sentence};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LinesResponse {
    #[serde(rename = "Lines", default)]
    pub lines: Vec<Line>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Line {
    #[serde(rename = "Left", default)]
    pub left: Vec<Token>,
    #[serde(rename = "Kwic", default)]
    pub kwic: Vec<Token>,
    #[serde(rename = "Right", default)]
    pub right: Vec<Token>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Token {
    #[serde(rename = "Str", default)]
    pub text: String,
}

fn join(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.text.as_str()).collect()
}

impl From<&Line> for Sentence {
    fn from(line: &Line) -> Self {
        Sentence::new(join(&line.left), join(&line.kwic), join(&line.right))
    }
}

impl LinesResponse {
    pub fn into_sentences(self) -> Vec<Sentence> {
        self.lines.iter().map(Sentence::from).collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WordSketchResponse {
    #[serde(rename = "GramRels", default)]
    pub gram_rels: Vec<GramRel>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GramRel {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Words", default)]
    pub words: Vec<SketchWord>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SketchWord {
    #[serde(rename = "Word", default)]
    pub word: String,
    #[serde(rename = "Lempos", default)]
    pub lempos: String,
    #[serde(rename = "Cm", default)]
    pub cm: String,
}

impl From<SketchWord> for Collocation {
    fn from(word: SketchWord) -> Self {
        Collocation::new(word.word, word.lempos, word.cm)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ThesaurusResponse {
    #[serde(rename = "Words", default)]
    pub words: Vec<ThesaurusWord>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ThesaurusWord {
    #[serde(rename = "Word")]
    pub word: Option<String>,
}
