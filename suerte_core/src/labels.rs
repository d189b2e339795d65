use serde::{Deserialize, Serialize};
use suerte_shared::{Guarded, Rejection};
use tracing::warn;

/// Count and length limits for a [`LabelList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBounds {
    pub min: usize,
    pub max: Option<usize>,
    pub max_chars: Option<usize>,
}

impl ListBounds {
    pub const UNBOUNDED: ListBounds = ListBounds {
        min: 0,
        max: None,
        max_chars: None,
    };
}

/// Ordered, user-edited labels. Order is display order only; duplicates are fine.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelList {
    items: Vec<String>,
    bounds: ListBounds,
}

impl LabelList {
    pub fn new(bounds: ListBounds) -> Self {
        Self {
            items: Vec::new(),
            bounds,
        }
    }

    /// Seeds the list; labels the bounds reject are skipped with a warning.
    pub fn with_items<I, S>(bounds: ListBounds, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new(bounds);
        for item in items {
            let label = item.as_ref();
            if let Err(why) = list.add(label) {
                warn!(label, %why, "label skipped");
            }
        }
        list
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn bounds(&self) -> ListBounds {
        self.bounds
    }

    pub fn can_add(&self) -> bool {
        self.bounds.max.map_or(true, |max| self.items.len() < max)
    }

    pub fn can_remove(&self) -> bool {
        self.items.len() > self.bounds.min
    }

    /// Appends the trimmed label, returning its index.
    pub fn add(&mut self, label: &str) -> Guarded<usize> {
        let label = label.trim();
        if label.is_empty() {
            return Err(Rejection::EmptyLabel);
        }
        if let Some(max) = self.bounds.max {
            if self.items.len() >= max {
                return Err(Rejection::ListFull { max });
            }
        }
        if let Some(max) = self.bounds.max_chars {
            if label.chars().count() > max {
                return Err(Rejection::LabelTooLong { max });
            }
        }
        self.items.push(label.to_string());
        Ok(self.items.len() - 1)
    }

    pub fn remove(&mut self, index: usize) -> Guarded<String> {
        if index >= self.items.len() {
            return Err(Rejection::NoSuchItem {
                index,
                len: self.items.len(),
            });
        }
        if !self.can_remove() {
            return Err(Rejection::AtMinimum {
                min: self.bounds.min,
            });
        }
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) -> Guarded {
        if self.bounds.min > 0 {
            return Err(Rejection::AtMinimum {
                min: self.bounds.min,
            });
        }
        self.items.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel_bounds() -> ListBounds {
        ListBounds {
            min: 2,
            max: Some(12),
            max_chars: Some(20),
        }
    }

    #[test]
    fn whitespace_label_is_ignored() {
        let mut list = LabelList::new(ListBounds::UNBOUNDED);
        assert_eq!(list.add("  "), Err(Rejection::EmptyLabel));
        assert!(list.is_empty());
    }

    #[test]
    fn add_then_remove_returns_to_empty() {
        let mut list = LabelList::new(ListBounds::UNBOUNDED);
        assert_eq!(list.add("  Alice "), Ok(0));
        assert_eq!(list.items(), ["Alice"]);
        assert_eq!(list.remove(0).as_deref(), Ok("Alice"));
        assert!(list.is_empty());
    }

    #[test]
    fn wheel_floor_holds_at_two() {
        let mut list = LabelList::with_items(wheel_bounds(), ["a", "b"]);
        assert_eq!(list.remove(1), Err(Rejection::AtMinimum { min: 2 }));
        assert_eq!(list.len(), 2);
        assert!(!list.can_remove());
    }

    #[test]
    fn wheel_ceiling_and_length() {
        let mut list = LabelList::with_items(wheel_bounds(), (0..20).map(|i| format!("o{i}")));
        assert_eq!(list.len(), 12);
        assert_eq!(list.add("one more"), Err(Rejection::ListFull { max: 12 }));

        let mut short = LabelList::new(wheel_bounds());
        assert_eq!(
            short.add("this label is far too long"),
            Err(Rejection::LabelTooLong { max: 20 })
        );
        // counted in chars, not bytes
        assert!(short.add("ñññññññññññññññññññ").is_ok());
    }

    #[test]
    fn bad_index_is_rejected() {
        let mut list = LabelList::with_items(ListBounds::UNBOUNDED, ["x"]);
        assert_eq!(list.remove(3), Err(Rejection::NoSuchItem { index: 3, len: 1 }));
    }

    #[test]
    fn duplicates_allowed() {
        let mut list = LabelList::new(ListBounds::UNBOUNDED);
        list.add("Bo").unwrap();
        list.add("Bo").unwrap();
        assert_eq!(list.len(), 2);
        list.clear().unwrap();
        assert!(list.is_empty());
    }
}
