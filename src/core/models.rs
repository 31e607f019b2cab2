use std::{
    fmt,
    path::PathBuf,
    str::FromStr,
};

use serde::{
    Deserialize,
    Serialize,
};

/// Private-label status of a product, as written in the `PB or Not` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PbClass {
    #[serde(rename = "PB")]
    Pb,
    #[serde(rename = "NotPB")]
    NotPb,
}

impl PbClass {
    pub const ALL: [PbClass; 2] = [PbClass::Pb, PbClass::NotPb];

    pub fn label(&self) -> &'static str {
        match self {
            PbClass::Pb => "PB",
            PbClass::NotPb => "NotPB",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PbClass::Pb => "PB",
            PbClass::NotPb => "Not PB",
        }
    }
}

impl FromStr for PbClass {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "PB" => Ok(PbClass::Pb),
            "NotPB" => Ok(PbClass::NotPb),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for PbClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Every crawled product.
    Full,
    /// Top 20% of each category by sales rank.
    Top,
}

impl DatasetKind {
    pub fn requires_rank(&self) -> bool {
        matches!(self, DatasetKind::Top)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub category: String,
    pub product_name: String,
    pub brand: String,
    pub link: Option<String>,
    pub hashtags: Option<String>, // Raw cell, None when missing
    pub discount_rate: Option<f64>, // Percentage
    pub class: PbClass,
    pub rank: Option<u32>, // Sales rank within the category
}

impl ProductRow {
    pub fn is_discounted(&self) -> bool {
        self.discount_rate.is_some_and(|rate| rate > 0.0)
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub kind: DatasetKind,
    pub source: PathBuf,
    pub rows: Vec<ProductRow>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows_of(&self, class: PbClass) -> impl Iterator<Item = &ProductRow> {
        self.rows.iter().filter(move |row| row.class == class)
    }

    pub fn count_of(&self, class: PbClass) -> usize {
        self.rows_of(class).count()
    }
}

/// Splits rows into the PB and NotPB groups, preserving order within each.
pub fn partition_by_class(rows: &[ProductRow]) -> (Vec<&ProductRow>, Vec<&ProductRow>) {
    rows.iter().partition(|row| row.class == PbClass::Pb)
}

#[cfg(test)]
pub(crate) fn test_row(category: &str, class: PbClass, hashtags: Option<&str>) -> ProductRow {
    ProductRow {
        category: category.to_string(),
        product_name: format!("{} 상품", category),
        brand: match class {
            PbClass::Pb => "노브랜드".to_string(),
            PbClass::NotPb => "농심".to_string(),
        },
        link: None,
        hashtags: hashtags.map(|s| s.to_string()),
        discount_rate: None,
        class,
        rank: None,
    }
}
