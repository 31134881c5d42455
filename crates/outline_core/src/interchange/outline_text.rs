//! Hyphen-depth outline text format.
//!
//! Each line is one item; the count of leading `-` characters is its depth.
//!
//! ```text
//! Groceries
//! -Milk
//! --Oat
//! -Bread
//! ```

use crate::model::item::{Item, ItemId, ROOT_ID};
use crate::model::store::Store;
use crate::query::{depth_of, visible_flat_list};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use uuid::Uuid;

static LINE_BREAK_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid line break regex"));
static MARKUP_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid markup tag regex"));
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

const DEPTH_MARKER: char = '-';

/// Builds a fresh store from outline text.
///
/// A line at depth `d` becomes a child of the latest item at depth `d - 1`.
/// Depth jumps deeper than one level are clamped to the deepest open level.
/// Blank lines are skipped. Input without items yields `Store::default()`.
pub fn import_outline(text: &str) -> Store {
    let mut items: HashMap<ItemId, Item> = HashMap::new();
    items.insert(ROOT_ID, Item::new(ROOT_ID));
    // open_parents[d] receives the next item at depth d.
    let mut open_parents: Vec<ItemId> = vec![ROOT_ID];

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let body = line.trim_start_matches(DEPTH_MARKER);
        let depth = (line.len() - body.len()).min(open_parents.len() - 1);
        let parent_id = open_parents[depth];

        let item = Item::with_text(Uuid::new_v4(), body.trim());
        if let Some(parent) = items.get_mut(&parent_id) {
            parent.children.push(item.id);
        }
        open_parents.truncate(depth + 1);
        open_parents.push(item.id);
        items.insert(item.id, item);
    }

    if items.len() == 1 {
        return Store::default();
    }
    info!(
        "event=outline_import module=interchange status=ok items={}",
        items.len() - 1
    );
    Store::from_items(ROOT_ID, items.into_values())
}

/// Serializes every visible item as `"-" * depth + plain text`.
///
/// Collapsed subtrees are omitted. Lines carry no trailing whitespace.
pub fn export_outline(store: &Store) -> String {
    let lines: Vec<String> = visible_flat_list(store, store.root_id())
        .into_iter()
        .filter_map(|id| {
            let item = store.get(id)?;
            let depth = depth_of(store, id)?;
            let mut line = DEPTH_MARKER.to_string().repeat(depth);
            line.push_str(&plain_text(&item.text));
            Some(line.trim_end().to_string())
        })
        .collect();
    lines.join("\n")
}

/// Flattens a rich text payload into one line of plain text.
///
/// Leading indentation is kept (line breaks in it become spaces). After the
/// first visible character, whitespace runs collapse to one space and
/// trailing whitespace is dropped.
pub fn plain_text(rich: &str) -> String {
    let spaced = LINE_BREAK_TAG_RE.replace_all(rich, " ");
    let stripped = MARKUP_TAG_RE.replace_all(&spaced, "");
    let decoded = decode_entities(&stripped);

    let body = decoded.trim_start();
    let indent = decoded[..decoded.len() - body.len()].replace(['\r', '\n'], " ");
    let collapsed = WHITESPACE_RE.replace_all(body.trim_end(), " ");
    if collapsed.is_empty() {
        return String::new();
    }
    format!("{indent}{collapsed}")
}

fn decode_entities(value: &str) -> String {
    value
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
