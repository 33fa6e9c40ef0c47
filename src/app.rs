//! Text views
//!
//! Render lists and items for the terminal. Pure functions so they can be
//! tested without a server.

use std::fmt::Write;

use crate::models::{GroceryList, Item};

fn price(value: Option<f64>) -> String {
    value.map(|p| format!("${p:.2}")).unwrap_or_else(|| "-".to_string())
}

/// Overview of every list: one line per list
pub fn render_lists(lists: &[GroceryList]) -> String {
    if lists.is_empty() {
        return "No grocery lists yet.\n".to_string();
    }
    let mut out = String::new();
    for list in lists {
        let count = list.items.len();
        let noun = if count == 1 { "item" } else { "items" };
        let _ = writeln!(out, "{:<36}  {}  ({} {})", list.id, list.list_name, count, noun);
    }
    out
}

/// Detail view of one list
///
/// Snapshot values recorded on the entry win over the live item's values.
pub fn render_list(list: &GroceryList) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (owner: {})", list.list_name, list.created_by);
    if list.items.is_empty() {
        out.push_str("  (empty)\n");
        return out;
    }
    for (index, entry) in list.items.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {} x{}  {}  {}",
            index + 1,
            entry.display_name(),
            entry.quantity,
            price(entry.display_price()),
            entry.display_store().unwrap_or("-"),
        );
    }
    let total: f64 = list
        .items
        .iter()
        .filter_map(|e| e.display_price().map(|p| p * f64::from(e.quantity)))
        .sum();
    let _ = writeln!(out, "  total: {}", price(Some(total)));
    out
}

pub fn render_items(items: &[Item]) -> String {
    if items.is_empty() {
        return "No items yet.\n".to_string();
    }
    let mut out = String::new();
    for item in items {
        let _ = writeln!(
            out,
            "{:<36}  {}  {}  {}  [{}]",
            item.id,
            item.name,
            price(item.price),
            item.store.as_deref().unwrap_or("-"),
            item.category.as_deref().unwrap_or("uncategorized"),
        );
    }
    out
}
