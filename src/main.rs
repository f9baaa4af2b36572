// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use std::io::BufRead;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use foldrank::{
    fold, pipeline, Document, InMemoryBackend, PageRequest, ProfileCache, ResultPage, Settings,
};

mod cli;
use cli::display::*;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = Settings::load(cli.settings.as_deref())
        .context("loading settings")
        .and_then(|settings| {
            let cache = ProfileCache::new(settings);
            match cli.command {
                Commands::Fold { text, lang } => run_fold(&cache, text, &lang),
                Commands::Profile {
                    lang,
                    page_size,
                    json,
                } => run_profile(&cache, &lang, page_size, json),
                Commands::Search {
                    docs,
                    query,
                    lang,
                    page,
                    page_size,
                    json,
                } => run_search(&cache, &docs, &query, &lang, PageRequest::new(page, page_size), json),
            }
        });

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "foldrank=warn",
        1 => "foldrank=debug",
        _ => "foldrank=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_fold(cache: &ProfileCache, text: Option<String>, lang: &str) -> Result<()> {
    let resolved = cache.resolve(lang, None);
    match text {
        Some(text) => println!("{}", fold(&text, &resolved.folding)),
        None => {
            for line in std::io::stdin().lock().lines() {
                let line = line.context("reading stdin")?;
                println!("{}", fold(&line, &resolved.folding));
            }
        }
    }
    Ok(())
}

fn run_profile(cache: &ProfileCache, lang: &str, page_size: Option<usize>, json: bool) -> Result<()> {
    let snapshot = cache.snapshot();
    let resolved = snapshot.resolve(lang, page_size);
    let matched = snapshot.matched_entry(&resolved.language);

    if json {
        let out = serde_json::json!({
            "language": resolved.language,
            "matched_entry": matched,
            "folding": &*resolved.folding,
            "stopwords": &*resolved.stopwords,
            "rerank": {
                "language": resolved.rerank.language,
                "page_size": resolved.rerank.page_size,
                "pool_size": resolved.rerank.pool_size,
                "pool_ceiling": resolved.rerank.pool_ceiling,
                "weights": resolved.rerank.weights,
            },
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    title_box(&format!("PROFILE {}", resolved.language));

    section_top("RESOLUTION");
    row(&format!(
        " entry     {}",
        matched.as_deref().unwrap_or("(default layer)")
    ));
    row(&format!(" rerank    {}", resolved.rerank.language));
    row(&format!(
        " pool      {} (page {}, ceiling {})",
        resolved.rerank.pool_size, resolved.rerank.page_size, resolved.rerank.pool_ceiling
    ));
    let w = resolved.rerank.weights;
    row(&format!(
        " weights   exact {}  phrase {}  short {}",
        w.exact_title, w.title_phrase, w.short_match
    ));

    section_mid("PRESERVE");
    if resolved.folding.preserve().is_empty() {
        row(&themed(GRAY, &[DIM], " (none)"));
    }
    for entry in resolved.folding.preserve() {
        row(&format!(" {}", themed(GREEN, &[BOLD], entry)));
    }

    section_mid("REPLACE");
    if resolved.folding.replace().is_empty() {
        row(&themed(GRAY, &[DIM], " (none)"));
    }
    for (key, value) in resolved.folding.replace() {
        row(&format!(" {}", fold_line(key, value)));
    }

    section_mid(&format!("STOPWORDS ({})", resolved.stopwords.len()));
    let words: Vec<&str> = resolved.stopwords.iter().collect();
    for chunk in words.chunks(8) {
        row(&format!(" {}", chunk.join(" ")));
    }
    section_bot();
    Ok(())
}

fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading documents {}", path.display()))?;
    let docs: Vec<Document> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing documents {}", path.display()))?;
    Ok(docs)
}

fn run_search(
    cache: &ProfileCache,
    docs: &Path,
    query: &str,
    lang: &str,
    page: PageRequest,
    json: bool,
) -> Result<()> {
    let docs = load_documents(docs)?;
    let backend = InMemoryBackend::from_documents(&docs, &cache.snapshot());
    let results = pipeline::search(cache, &backend, query, lang, page);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }
    print_results(query, &results);
    Ok(())
}

fn print_results(query: &str, results: &ResultPage) {
    section_top(&format!("\"{}\"", truncate(query, 40)));
    if results.is_empty() {
        row(&warn_line(" no results"));
    }
    for (i, hit) in results.items.iter().enumerate() {
        let position = results.page_index * results.page_size + i + 1;
        row(&format!(
            " {:>3}. {} {} {}",
            position,
            score_value(hit.score),
            pad_right(&truncate(&hit.candidate.title, 32), 32),
            boost_badges(&hit.boosts, hit.rescored)
        ));
    }
    section_mid("PAGE");
    row(&format!(
        " {} of {}  ({} results)",
        results.page_index + 1,
        results.num_pages().max(1),
        results.total
    ));
    section_bot();
}
