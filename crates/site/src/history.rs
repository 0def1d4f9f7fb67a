//! Navigation history strategies.
//!
//! Both strategies keep an entry stack with a cursor; they differ in where
//! the initial location comes from and how links are written.

use crate::config::HistoryMode;
use mdxblog_render::LinkStyle;

/// A navigation history: the router reads the current location from it and
/// pushes new locations into it.
pub trait History: Send {
    /// Current location path (may still carry a query or fragment).
    fn location(&self) -> &str;

    /// Navigates to `path`, dropping any forward entries.
    fn push(&mut self, path: &str);

    /// Replaces the current entry with `path`.
    fn replace(&mut self, path: &str);

    /// Moves one entry back. Returns false when already at the first entry.
    fn back(&mut self) -> bool;

    /// Moves one entry forward. Returns false when already at the last entry.
    fn forward(&mut self) -> bool;

    /// How links to internal paths are written for this history.
    fn link_style(&self) -> LinkStyle;

    /// Formats a link target for `path`.
    fn href(&self, path: &str) -> String {
        self.link_style().href(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EntryStack {
    entries: Vec<String>,
    index: usize,
}

impl EntryStack {
    fn new(entries: Vec<String>) -> Self {
        let entries = if entries.is_empty() {
            vec!["/".to_string()]
        } else {
            entries
        };
        let index = entries.len() - 1;
        Self { entries, index }
    }

    fn current(&self) -> &str {
        &self.entries[self.index]
    }

    fn push(&mut self, path: String) {
        self.entries.truncate(self.index + 1);
        self.entries.push(path);
        self.index += 1;
    }

    fn replace(&mut self, path: String) {
        self.entries[self.index] = path;
    }

    fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }
}

/// In-memory history, independent of any address bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    stack: EntryStack,
}

impl MemoryHistory {
    /// Creates a history from initial entries; the last entry is current.
    /// No entries means a single `/` entry.
    pub fn new<I, S>(initial_entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stack: EntryStack::new(initial_entries.into_iter().map(Into::into).collect()),
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.stack.entries
    }

    /// Index of the current entry.
    pub fn index(&self) -> usize {
        self.stack.index
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(["/"])
    }
}

impl History for MemoryHistory {
    fn location(&self) -> &str {
        self.stack.current()
    }

    fn push(&mut self, path: &str) {
        self.stack.push(path.to_string());
    }

    fn replace(&mut self, path: &str) {
        self.stack.replace(path.to_string());
    }

    fn back(&mut self) -> bool {
        self.stack.back()
    }

    fn forward(&mut self) -> bool {
        self.stack.forward()
    }

    fn link_style(&self) -> LinkStyle {
        LinkStyle::Path
    }
}

/// History kept in the URL fragment: `index.html#/blog/jeremy/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashHistory {
    stack: EntryStack,
}

impl HashHistory {
    /// Starts at the location encoded in `url`'s fragment.
    pub fn from_url(url: &str) -> Self {
        Self {
            stack: EntryStack::new(vec![location_from_url(url)]),
        }
    }

    /// The current location as a fragment (`#/blog/jeremy/`).
    pub fn fragment(&self) -> String {
        format!("#{}", self.stack.current())
    }
}

impl Default for HashHistory {
    fn default() -> Self {
        Self::from_url("")
    }
}

impl History for HashHistory {
    fn location(&self) -> &str {
        self.stack.current()
    }

    fn push(&mut self, path: &str) {
        self.stack.push(location_from_url(path));
    }

    fn replace(&mut self, path: &str) {
        self.stack.replace(location_from_url(path));
    }

    fn back(&mut self) -> bool {
        self.stack.back()
    }

    fn forward(&mut self) -> bool {
        self.stack.forward()
    }

    fn link_style(&self) -> LinkStyle {
        LinkStyle::Hash
    }
}

/// Extracts the location path from a URL or fragment.
///
/// The part after `#` is the location; an empty fragment, or a URL without
/// one, means `/`. A bare path (`/blog/jeremy/`) is taken as-is.
///
/// ```
/// use mdxblog_site::history::location_from_url;
///
/// assert_eq!(location_from_url("https://blog.dev/#/blog/jeremy/"), "/blog/jeremy/");
/// assert_eq!(location_from_url("#"), "/");
/// assert_eq!(location_from_url("https://blog.dev/"), "/");
/// assert_eq!(location_from_url("/blog/jeremy/"), "/blog/jeremy/");
/// ```
pub fn location_from_url(url: &str) -> String {
    let raw = match url.split_once('#') {
        Some((_, fragment)) => fragment,
        None if url.starts_with('/') => url,
        None => "",
    };
    let raw = raw.trim();
    if raw.is_empty() {
        "/".to_string()
    } else if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{raw}")
    }
}

/// Creates the history for `mode`, starting at `initial`.
///
/// Memory history takes `initial` as its entry list; hash history reads the
/// last entry as a URL or fragment.
pub fn create_history(mode: HistoryMode, initial: &[String]) -> Box<dyn History> {
    match mode {
        HistoryMode::Memory => Box::new(MemoryHistory::new(initial.iter().cloned())),
        HistoryMode::Hash => Box::new(HashHistory::from_url(
            initial.last().map(String::as_str).unwrap_or_default(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_defaults_to_root() {
        let history = MemoryHistory::new(Vec::<String>::new());
        assert_eq!(history.location(), "/");
        assert_eq!(history.entries(), ["/"]);
    }

    #[test]
    fn memory_starts_at_last_entry() {
        let history = MemoryHistory::new(["/", "/blog/jeremy/"]);
        assert_eq!(history.location(), "/blog/jeremy/");
        assert_eq!(history.index(), 1);
    }

    #[test]
    fn back_and_forward_stay_in_bounds() {
        let mut history = MemoryHistory::default();
        assert!(!history.back());
        assert!(!history.forward());

        history.push("/a/");
        history.push("/b/");
        assert!(history.back());
        assert!(history.back());
        assert!(!history.back());
        assert_eq!(history.location(), "/");
        assert!(history.forward());
        assert_eq!(history.location(), "/a/");
    }

    #[test]
    fn push_truncates_forward_entries() {
        let mut history = MemoryHistory::default();
        history.push("/a/");
        history.push("/b/");
        history.back();
        history.push("/c/");
        assert_eq!(history.entries(), ["/", "/a/", "/c/"]);
        assert!(!history.forward());
    }

    #[test]
    fn replace_keeps_the_stack_length() {
        let mut history = MemoryHistory::new(["/", "/a/"]);
        history.replace("/b/");
        assert_eq!(history.entries(), ["/", "/b/"]);
    }

    #[test]
    fn hash_history_reads_fragment() {
        let history = HashHistory::from_url("index.html#/blog/jeremy/");
        assert_eq!(history.location(), "/blog/jeremy/");
        assert_eq!(history.fragment(), "#/blog/jeremy/");
        assert_eq!(HashHistory::default().location(), "/");
    }

    #[test]
    fn hash_push_accepts_fragments() {
        let mut history = HashHistory::default();
        history.push("#/blog/x/");
        history.push("/blog/y/");
        assert_eq!(history.location(), "/blog/y/");
        assert!(history.back());
        assert_eq!(history.location(), "/blog/x/");
    }

    #[test]
    fn hrefs_follow_the_strategy() {
        assert_eq!(MemoryHistory::default().href("/blog/x/"), "/blog/x/");
        assert_eq!(HashHistory::default().href("/blog/x/"), "#/blog/x/");
        assert_eq!(HashHistory::default().href("https://a.dev"), "https://a.dev");
    }

    #[test]
    fn create_history_picks_the_mode() {
        let entries = vec!["/".to_string(), "/blog/jeremy/".to_string()];
        let memory = create_history(HistoryMode::Memory, &entries);
        assert_eq!(memory.location(), "/blog/jeremy/");
        assert_eq!(memory.link_style(), LinkStyle::Path);

        let hash = create_history(HistoryMode::Hash, &["#/blog/x/".to_string()]);
        assert_eq!(hash.location(), "/blog/x/");
        assert_eq!(hash.link_style(), LinkStyle::Hash);
    }
}
