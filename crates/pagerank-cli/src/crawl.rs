//! Corpus crawl: a directory of `.html` files becomes a [`LinkGraph`].
//!
//! Every `*.html` file directly inside the directory is a page, identified
//! by its file name. Outbound links are the `href` values of `<a>` tags.
//! Self-links and links to anything that is not another page of the corpus
//! (external URLs, missing files, anchors) are dropped.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use pagerank_core::LinkGraph;
use regex::Regex;
use tracing::{debug, instrument, warn};

static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("href pattern is valid")
});

/// Crawl `dir` and build the link graph of its pages.
///
/// # Errors
///
/// Returns an error if `dir` is not a readable directory or a page cannot
/// be read as UTF-8.
#[instrument]
pub fn crawl(dir: &Path) -> Result<LinkGraph> {
    let links = read_corpus(dir)?;
    Ok(LinkGraph::from_links_filtered(&links))
}

/// Raw page → linked `href` values, before filtering to the corpus.
///
/// # Errors
///
/// Same as [`crawl`].
pub fn read_corpus(dir: &Path) -> Result<HashMap<String, HashSet<String>>> {
    if !dir.is_dir() {
        bail!("corpus {} is not a directory", dir.display());
    }

    let mut pages = HashMap::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("read corpus directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("list corpus directory {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            warn!(path = %path.display(), "skipping page with non UTF-8 file name");
            continue;
        };
        if !name.ends_with(".html") {
            continue;
        }

        let contents =
            fs::read_to_string(&path).with_context(|| format!("read page {}", path.display()))?;
        let mut links = extract_links(&contents);
        links.remove(&name);
        debug!(page = %name, links = links.len(), "parsed page");
        pages.insert(name, links);
    }

    Ok(pages)
}

/// All `href` targets of `<a>` tags in `html`.
#[must_use]
pub fn extract_links(html: &str) -> HashSet<String> {
    HREF.captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
