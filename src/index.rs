// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index-time document preparation.
//!
//! Documents are folded once when indexed, with the profile of the language
//! they were written in, and the folded text is stored next to the original.
//! At query time the reranker reads `title_norm`/`body_norm` instead of
//! folding again, as long as the document's language is the rerank language.

use crate::config::Resolver;
use crate::fold::{fold, FoldingProfile};
use crate::types::Candidate;
use crate::util::tokenize::collapse_whitespace;
use serde::{Deserialize, Serialize};

/// A raw document as handed to the indexer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub url: String,
    /// Language code of the document. Unset means the project default.
    #[serde(default)]
    pub language: Option<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Build the stored record for a document under `profile`.
///
/// The body is whitespace-collapsed; both normalized fields are folded and
/// lowercased so the backend can compare them against a folded query directly.
pub fn prepare_document(doc: &Document, profile: &FoldingProfile) -> Candidate {
    let title = collapse_whitespace(&doc.title);
    let body = collapse_whitespace(&doc.body);
    let title_norm = fold(&title, profile).to_lowercase();
    let body_norm = fold(&body, profile).to_lowercase();

    Candidate {
        id: doc.id.clone(),
        title,
        body,
        url: doc.url.clone(),
        language: doc.language.clone(),
        score: 0.0,
        title_norm: Some(title_norm),
        body_norm: Some(body_norm),
    }
}

/// Prepare many documents, each with its own language's profile.
///
/// Each record's `language` is set to the resolved code its norms were folded
/// with, so the reranker can tell whether they match its own profile.
pub fn prepare_documents<'a>(
    docs: impl IntoIterator<Item = &'a Document>,
    resolver: &Resolver,
) -> Vec<Candidate> {
    docs.into_iter()
        .map(|doc| {
            let language = resolver.language_for(doc.language.as_deref().unwrap_or_default());
            let profile = resolver.profile(&language);
            Candidate {
                language: Some(language.to_string()),
                ..prepare_document(doc, &profile)
            }
        })
        .collect()
}
