//! Entity lists used by load records to select elements or nodes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ALL: &str = "all";
const RANGE: &str = "to";

/// A selection of record indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum EntityList {
    #[default]
    Empty,
    All,
    Items(Vec<ListItem>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListItem {
    Single(u32),
    Range(u32, u32),
}

impl EntityList {
    pub fn contains(&self, index: u32) -> bool {
        match self {
            Self::Empty => false,
            Self::All => true,
            Self::Items(items) => items.iter().any(|item| match *item {
                ListItem::Single(n) => n == index,
                ListItem::Range(lo, hi) => (lo..=hi).contains(&index),
            }),
        }
    }
}

impl FromStr for EntityList {
    type Err = String;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(Self::Empty);
        }
        if token.eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }

        let mut words = token.split_whitespace().peekable();
        let mut items = Vec::new();
        while let Some(word) = words.next() {
            let start = parse_item(word)?;
            if words.peek().is_some_and(|w| w.eq_ignore_ascii_case(RANGE)) {
                words.next();
                let end_word = words.next().ok_or("range is missing its end")?;
                let end = parse_item(end_word)?;
                if end < start {
                    return Err(format!("range {start} to {end} is descending"));
                }
                items.push(ListItem::Range(start, end));
            } else {
                items.push(ListItem::Single(start));
            }
        }
        Ok(Self::Items(items))
    }
}

impl fmt::Display for EntityList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::All => f.write_str(ALL),
            Self::Items(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    match item {
                        ListItem::Single(n) => write!(f, "{n}")?,
                        ListItem::Range(lo, hi) => write!(f, "{lo} {RANGE} {hi}")?,
                    }
                }
                Ok(())
            }
        }
    }
}

fn parse_item(word: &str) -> Result<u32, String> {
    word.parse::<u32>()
        .map_err(|_| format!("'{word}' is not a list item"))
}
