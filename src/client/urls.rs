//! Query URL construction for each SKELL endpoint.
//!
//! Words, headwords and relation descriptions are percent-encoded with every
//! character outside the RFC 3986 unreserved set escaped, so `/` goes out as
//! `%2F`. Lemma-position keys are inserted as given.

use urlencoding::encode;

use crate::models::{Language, WordSketchKind};

pub fn concordance(base_url: &str, word: &str, lang: Language) -> String {
    format!(
        "{}/concordance?query={}&lang={}&format=json",
        base_url,
        encode(word),
        lang
    )
}

pub fn word_sketch(
    base_url: &str,
    word: &str,
    kind: Option<WordSketchKind>,
    lang: Language,
) -> String {
    let mut url = format!(
        "{}/wordsketch?lang={}&query={}&format=json",
        base_url,
        lang,
        encode(word)
    );
    if let Some(kind) = kind {
        url.push_str(&format!("&lpos=-{}", kind.code()));
    }
    url
}

pub fn word_sketch_concordance(
    base_url: &str,
    headword: &str,
    kind: WordSketchKind,
    lemma_pos: &str,
    relation: &str,
    lang: Language,
) -> String {
    format!(
        "{}/wordsketch_concordance?headword={}-{}&lang={}&coll={}&gramrel={}&format=json",
        base_url,
        encode(headword),
        kind.code(),
        lang,
        lemma_pos,
        encode(relation)
    )
}

pub fn thesaurus(base_url: &str, word: &str, lang: Language) -> String {
    format!(
        "{}/thesaurus?lang={}&query={}&format=json",
        base_url,
        lang,
        encode(word)
    )
}
