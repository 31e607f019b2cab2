use std::collections::HashMap;

use crate::core::{
    hashtags,
    PbClass,
    ProductRow,
};

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    pub tag: String,
    pub frequency: u32,
}

/// Hashtag counts ordered by frequency, highest first.
///
/// Equal frequencies keep first-seen order: the tag that appeared earlier in
/// the counted sequence ranks higher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<TagEntry>,
}

impl FrequencyTable {
    pub fn from_tokens<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut positions: HashMap<&'a str, usize> = HashMap::new();
        let mut entries: Vec<TagEntry> = Vec::new();

        for token in tokens {
            match positions.get(token) {
                Some(&idx) => entries[idx].frequency += 1,
                None => {
                    positions.insert(token, entries.len());
                    entries.push(TagEntry { tag: token.to_string(), frequency: 1 });
                }
            }
        }

        // Stable sort keeps insertion order among ties
        entries.sort_by(|a, b| b.frequency.cmp(&a.frequency));

        Self { entries }
    }

    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.frequency as u64).sum()
    }

    pub fn get(&self, tag: &str) -> Option<u32> {
        self.entries.iter().find(|e| e.tag == tag).map(|e| e.frequency)
    }

    pub fn max_frequency(&self) -> u32 {
        self.entries.first().map(|e| e.frequency).unwrap_or(0)
    }

    /// Keeps at most `n` entries. Fewer entries are returned as-is.
    pub fn top(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }
}

/// Flattened hashtag tokens of every row in `class` that has a hashtag cell.
pub fn class_tokens<'a>(
    rows: &'a [ProductRow],
    class: PbClass,
) -> impl Iterator<Item = &'a str> + 'a {
    rows.iter()
        .filter(move |row| row.class == class)
        .filter_map(|row| row.hashtags.as_deref())
        .flat_map(hashtags::tokens)
}

/// Full ranked table for one class.
pub fn frequency_table(rows: &[ProductRow], class: PbClass) -> FrequencyTable {
    FrequencyTable::from_tokens(class_tokens(rows, class))
}

/// Top `top_n` hashtags for one class. Never fails: no matching rows means an
/// empty table.
pub fn rank_hashtags(rows: &[ProductRow], class: PbClass, top_n: usize) -> FrequencyTable {
    frequency_table(rows, class).top(top_n)
}

#[derive(Debug, Clone, Default)]
pub struct HashtagRanking {
    pub top_n: usize,
    pub pb: FrequencyTable,
    pub not_pb: FrequencyTable,
}

impl HashtagRanking {
    pub fn compute(rows: &[ProductRow], top_n: usize) -> Self {
        Self {
            top_n,
            pb: rank_hashtags(rows, PbClass::Pb, top_n),
            not_pb: rank_hashtags(rows, PbClass::NotPb, top_n),
        }
    }

    pub fn for_class(&self, class: PbClass) -> &FrequencyTable {
        match class {
            PbClass::Pb => &self.pb,
            PbClass::NotPb => &self.not_pb,
        }
    }
}
