//! HTML tree walking for tag counts and image sources
//!
//! Pages are parsed with `scraper`, whose tree is an `ego_tree` arena: each
//! node is reached through `first_child` / `next_sibling` handles and the tree
//! is only read after parsing. `scraper::Html` is not `Send`, so parsing
//! happens in `summarize_page` and only owned counts leave this module.

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};
use std::collections::VecDeque;

/// Counts and image sources extracted from a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSummary {
    /// Number of `<a>` elements
    pub links: usize,

    /// Number of `<img>` elements
    pub images: usize,

    /// Raw `src` attribute of every `<img>` that has one, in visit order
    pub image_sources: Vec<String>,
}

/// Returns every element node named `tag` reachable from `root`
///
/// # Traversal
///
/// A work queue is seeded with `root`. Each dequeued node enqueues its first
/// child and then its next sibling, so "down" and "across" links are expanded
/// in the same queue. The visit order is neither breadth-first nor document
/// order, but every node has exactly one incoming child-or-sibling link, so
/// each reachable node is visited exactly once and the walk ends after as
/// many steps as there are nodes.
///
/// The walk also follows `root`'s own next sibling. Starting from the document
/// root this makes no difference; starting from an inner node it covers the
/// node's later siblings and their subtrees as well.
///
/// Tag names are compared as-is; the HTML parser already lowercases them.
///
/// # Example
///
/// ```
/// use scraper::Html;
/// use sumi_fetch::crawler::locate;
///
/// let document = Html::parse_document("<ul><li>a</li><li>b</li></ul>");
/// assert_eq!(locate(document.tree.root(), "li").len(), 2);
/// ```
pub fn locate<'a>(root: NodeRef<'a, Node>, tag: &str) -> Vec<ElementRef<'a>> {
    let mut found = Vec::new();
    let mut queue = VecDeque::from([root]);

    while let Some(node) = queue.pop_front() {
        if let Some(child) = node.first_child() {
            queue.push_back(child);
        }
        if let Some(sibling) = node.next_sibling() {
            queue.push_back(sibling);
        }
        if let Some(element) = ElementRef::wrap(node) {
            if element.value().name() == tag {
                found.push(element);
            }
        }
    }

    found
}

/// Parses a fetched body and counts its links and images
///
/// Bytes that are not valid UTF-8 (Latin-1 or windows-1252 pages, stray
/// binary) are decoded as U+FFFD. The HTML parser recovers from any markup,
/// so every body yields a summary.
pub fn summarize_page(body: &[u8]) -> PageSummary {
    let text = String::from_utf8_lossy(body);
    let document = Html::parse_document(&text);
    let root = document.tree.root();

    let images = locate(root, "img");
    let image_sources = images
        .iter()
        .filter_map(|img| img.value().attr("src"))
        .map(str::to_string)
        .collect();

    PageSummary {
        links: locate(root, "a").len(),
        images: images.len(),
        image_sources,
    }
}
