// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Language-aware accent folding and bounded reranking for search results.
//!
//! Two problems, one crate. **Folding** makes "Straße", "Strasse" and
//! "STRASSE" comparable without erasing letters a language cares about ("ñ"
//! in Spanish). **Reranking** takes a backend's result list and promotes the
//! hits whose titles actually match the query, touching only a bounded prefix.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌─────────────┐   ┌────────────┐
//! │  Settings  │──▶│   Resolver   │──▶│ FoldingProf │──▶│    fold    │
//! │  (config)  │   │ (lang chain) │   │ StopwordSet │   │            │
//! └────────────┘   └──────────────┘   └─────────────┘   └────────────┘
//!        │                │                                   │
//!        ▼                ▼                                   ▼
//! ┌────────────┐   ┌──────────────┐   ┌─────────────┐   ┌────────────┐
//! │ProfileCache│   │ RerankConfig │──▶│   rerank    │◀──│  backend   │
//! │  (reload)  │   │ (pool, page) │   │ (pool+sort) │   │ (execute)  │
//! └────────────┘   └──────────────┘   └─────────────┘   └────────────┘
//! ```
//!
//! | Module     | Role                                                  |
//! |------------|-------------------------------------------------------|
//! | `fold`     | profiles, the folding pass, stopword sets             |
//! | `config`   | settings, language fallback chain, snapshot cache     |
//! | `rerank`   | pool rescoring, stable ordering, pagination           |
//! | `scoring`  | boost math and the ranking comparator                 |
//! | `backend`  | the backend seam and an in-memory reference backend   |
//! | `index`    | index-time document preparation                       |
//! | `pipeline` | sanitize → fold → execute → rerank                    |
//!
//! # Usage
//!
//! ```ignore
//! use foldrank::{pipeline, InMemoryBackend, Document, PageRequest, ProfileCache, Settings};
//!
//! let cache = ProfileCache::new(Settings::load(None)?);
//! let docs = vec![Document::new("1", "El Niño")];
//! let backend = InMemoryBackend::from_documents(&docs, &cache.snapshot());
//!
//! let page = pipeline::search(&cache, &backend, "nino", "es", PageRequest::new(0, 10));
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod fold;
pub mod index;
pub mod pipeline;
pub mod rerank;
pub mod scoring;
pub mod types;
pub mod util;

pub use backend::{InMemoryBackend, SearchBackend};
pub use config::{pool_size, resolve, ProfileCache, Resolved, Resolver, Settings};
pub use error::{Error, Result};
pub use fold::stopwords::StopwordSet;
pub use fold::{fold, FoldingProfile};
pub use index::{prepare_document, Document};
pub use rerank::{paginate, rerank, rerank_all, RerankConfig};
pub use scoring::RerankWeights;
pub use types::{Boosts, Candidate, PageRequest, ResultPage, ScoredCandidate};
pub use util::lang::LangCode;
