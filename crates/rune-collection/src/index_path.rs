//! Section/item address of a cell in a collection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-level address of an item: its section, then its index within that
/// section. Ordering is section-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, item): (usize, usize)) -> Self {
        Self::new(section, item)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_major_ordering() {
        let mut paths = vec![
            IndexPath::new(1, 0),
            IndexPath::new(0, 7),
            IndexPath::new(0, 2),
        ];
        paths.sort();
        assert_eq!(
            paths,
            vec![
                IndexPath::new(0, 2),
                IndexPath::new(0, 7),
                IndexPath::new(1, 0)
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(IndexPath::from((2, 5)).to_string(), "[2, 5]");
    }
}
