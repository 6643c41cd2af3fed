//! Triplet extraction: prompt the model per chunk and parse its reply.

use std::collections::HashSet;
use std::sync::Arc;

use kgqa_core::{TextChunk, Triplet};
use kgqa_llm::{ChatRequest, LanguageModel};

use crate::error::Result;

const EXTRACTION_TEMPLATE: &str = "\
Some text is provided below. Given the text, extract up to {max_triplets} \
knowledge triplets in the form of (subject, predicate, object). Avoid stopwords.
---------------------
Example:
Text: Alice is Bob's mother.
Triplets:
(Alice, is mother of, Bob)
Text: Philz is a coffee shop founded in Berkeley in 1982.
Triplets:
(Philz, is, coffee shop)
(Philz, founded in, Berkeley)
(Philz, founded in, 1982)
---------------------
Text: {text}
Triplets:
";

/// Build the extraction prompt for one chunk of text.
pub fn extraction_prompt(text: &str, max_triplets: usize) -> String {
    EXTRACTION_TEMPLATE
        .replace("{max_triplets}", &max_triplets.to_string())
        .replace("{text}", text)
}

/// Parse a model reply holding one `(subject, predicate, object)` per line.
///
/// Lines without parentheses or with fewer than three parts are skipped.
/// A triplet with any part longer than `max_field_len` characters is
/// dropped, as are case-insensitive duplicates. At most `max_count`
/// triplets are returned.
pub fn parse_triplets(response: &str, max_count: usize, max_field_len: usize) -> Vec<Triplet> {
    let mut seen = HashSet::new();
    let mut triplets = Vec::new();

    for line in response.lines() {
        if triplets.len() >= max_count {
            break;
        }
        let Some(inner) = parenthesized(line) else {
            continue;
        };

        let parts: Vec<String> = inner.splitn(3, ',').map(clean_part).collect();
        if parts.len() != 3 {
            continue;
        }
        if parts.iter().any(|p| p.chars().count() > max_field_len) {
            tracing::debug!(line = %line.trim(), "Dropping over-long triplet");
            continue;
        }

        let Ok(triplet) = Triplet::new(&parts[0], &parts[1], &parts[2]) else {
            continue;
        };
        if seen.insert(triplet.key()) {
            triplets.push(triplet);
        }
    }

    triplets
}

fn parenthesized(line: &str) -> Option<&str> {
    let start = line.find('(')?;
    let end = line.rfind(')')?;
    (end > start).then(|| &line[start + 1..end])
}

fn clean_part(part: &str) -> String {
    part.trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim()
        .to_string()
}

/// Turns chunks into triplets with a language model.
pub struct TripletExtractor {
    llm: Arc<dyn LanguageModel>,
    max_triplets: usize,
    max_field_len: usize,
}

impl TripletExtractor {
    pub fn new(llm: Arc<dyn LanguageModel>, max_triplets: usize, max_field_len: usize) -> Self {
        Self {
            llm,
            max_triplets,
            max_field_len,
        }
    }

    pub async fn extract(&self, chunk: &TextChunk) -> Result<Vec<Triplet>> {
        let prompt = extraction_prompt(&chunk.text, self.max_triplets);
        let reply = self.llm.chat(ChatRequest::user(prompt)).await?;

        let triplets = parse_triplets(&reply, self.max_triplets, self.max_field_len);
        tracing::debug!(
            chunk = chunk.index,
            model = self.llm.model_name(),
            triplets = triplets.len(),
            "Extracted triplets"
        );
        Ok(triplets)
    }
}
