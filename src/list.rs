//! Searchable, editable list of text items.
//!
//! [`ListManager`] owns an ordered collection of [`Item`]s and a query string.
//! Every operation is total: blank text and unknown ids are ignored.

use crate::view::View;
use std::fmt;

/// Message rendered when no item matches the query.
pub const EMPTY_MESSAGE: &str = "No items found";

/// Uniquely identified text record.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Item {
    /// Identifier, positive and unique within its list.
    pub id: u64,
    /// Display text.
    pub text: String,
}

impl Item {
    /// Create a new item.
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.id, self.text)
    }
}

/// Ordered list of items with a filter query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListManager {
    items: Vec<Item>,
    query: String,
}

impl ListManager {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list holding the default seed items.
    pub fn seeded() -> Self {
        Self::from_texts(["First item", "Second item", "Third item"])
    }

    /// Create a list from texts, numbering them from `1`.
    ///
    /// Blank texts are skipped.
    pub fn from_texts<I>(texts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut list = Self::new();
        for text in texts {
            list.add(text);
        }
        list
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current filter query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the filter query. Items are not modified.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Id the next added item will receive: the largest id in the list plus one,
    /// or `1` for an empty list.
    ///
    /// Ids are not reserved across removals: removing the item with the largest id
    /// makes that id available again.
    pub fn next_id(&self) -> u64 {
        self.items.iter().map(|item| item.id).max().unwrap_or(0) + 1
    }

    /// Append an item with the given text.
    ///
    /// Returns the new item's id, or `None` if `text` is blank.
    pub fn add(&mut self, text: impl Into<String>) -> Option<u64> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }

        let id = self.next_id();
        self.items.push(Item { id, text });
        Some(id)
    }

    /// Remove the item with `id`, preserving the order of the remaining items.
    ///
    /// Returns the removed item, or `None` if no item has that id.
    pub fn remove(&mut self, id: u64) -> Option<Item> {
        let idx = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(idx))
    }

    /// Items matching the current query, in order.
    pub fn filtered(&self) -> Vec<&Item> {
        filter(&self.items, &self.query)
    }

    /// Render the items matching the current query.
    ///
    /// See [`render`].
    pub fn view(&self, make_item: impl Fn(&Item) -> View) -> View {
        render(&self.items, &self.query, make_item)
    }
}

/// Items whose text contains `query`, ignoring case, in order.
///
/// An empty query matches every item.
pub fn filter<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    let query = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.text.to_lowercase().contains(&query))
        .collect()
}

/// Render the items matching `query` as a list,
/// or [`EMPTY_MESSAGE`] if none match.
pub fn render(items: &[Item], query: &str, make_item: impl Fn(&Item) -> View) -> View {
    let filtered = filter(items, query);
    if filtered.is_empty() {
        View::text(EMPTY_MESSAGE)
    } else {
        View::list(filtered.into_iter().map(make_item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &ListManager) -> Vec<u64> {
        list.items().iter().map(|item| item.id).collect()
    }

    #[test]
    fn it_adds_non_blank_items() {
        let mut list = ListManager::new();
        for text in ["a", "", "b", "   ", "\t\n", "c"] {
            list.add(text);
        }

        assert_eq!(list.len(), 3);
        assert_eq!(ids(&list), [1, 2, 3]);
    }

    #[test]
    fn it_ignores_blank_text() {
        let mut list = ListManager::seeded();
        let before = list.clone();

        assert_eq!(list.add(""), None);
        assert_eq!(list.add("   "), None);
        assert_eq!(list, before);
    }

    #[test]
    fn it_assigns_max_plus_one() {
        let mut list = ListManager::new();
        assert_eq!(list.add("X"), Some(1));

        let mut list = ListManager::seeded();
        list.remove(1);
        assert_eq!(list.add("Fourth item"), Some(4));
        assert!(list.items().iter().all(|item| item.id <= 4));
    }

    #[test]
    fn it_reuses_the_largest_id_after_removal() {
        let mut list = ListManager::seeded();
        list.remove(3);

        assert_eq!(list.add("again"), Some(3));
        assert_eq!(list.add("and again"), Some(4));
    }

    #[test]
    fn it_removes_preserving_order() {
        let mut list = ListManager::seeded();
        list.add("Fourth item");

        assert_eq!(list.remove(2), Some(Item::new(2, "Second item")));
        assert_eq!(ids(&list), [1, 3, 4]);

        let before = list.clone();
        assert_eq!(list.remove(42), None);
        assert_eq!(list, before);
    }

    #[test]
    fn it_filters_ignoring_case() {
        let mut list = ListManager::seeded();

        list.set_query("");
        assert_eq!(list.filtered().len(), 3);

        list.set_query("FIRST");
        assert_eq!(list.filtered(), [&Item::new(1, "First item")]);

        list.set_query("ond IT");
        assert_eq!(list.filtered(), [&Item::new(2, "Second item")]);

        list.set_query("missing");
        assert!(list.filtered().is_empty());
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn it_keeps_the_query_when_adding() {
        let mut list = ListManager::seeded();
        list.set_query("item");
        list.add("Fourth item");

        assert_eq!(list.query(), "item");
    }

    #[test]
    fn it_runs_the_scenario() {
        let mut list = ListManager::seeded();

        assert_eq!(list.add("Fourth item"), Some(4));
        assert_eq!(list.items()[3], Item::new(4, "Fourth item"));

        list.remove(2);
        assert_eq!(ids(&list), [1, 3, 4]);

        list.set_query("item");
        let filtered: Vec<_> = list.filtered().into_iter().map(|item| item.id).collect();
        assert_eq!(filtered, [1, 3, 4]);
    }

    #[test]
    fn it_renders_an_empty_state() {
        let mut list = ListManager::seeded();
        let make_item = |item: &Item| View::text(item.to_string());

        assert_eq!(
            list.view(make_item).texts(),
            ["1. First item", "2. Second item", "3. Third item"]
        );

        list.set_query("nothing");
        assert_eq!(list.view(make_item).texts(), [EMPTY_MESSAGE]);
    }
}
