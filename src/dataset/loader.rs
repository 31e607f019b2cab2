use std::{
    collections::{
        BTreeSet,
        HashMap,
        HashSet,
    },
    fs::File,
    io::Read,
    path::Path,
};

use csv::StringRecord;

use crate::{
    config::{
        BrandRegistry,
        DashboardConfig,
    },
    core::{
        Dataset,
        DashboardError,
        DatasetKind,
        PbClass,
        ProductRow,
    },
};

pub const COL_CATEGORY: &str = "Category";
pub const COL_PRODUCT_NAME: &str = "Product_Name";
pub const COL_BRAND: &str = "Brand";
pub const COL_LINK: &str = "Link";
pub const COL_HASHTAGS: &str = "Hashtags";
pub const COL_DISCOUNT_RATE: &str = "Discount_Rate";
pub const COL_CLASS: &str = "PB or Not";
pub const COL_RANK: &str = "Rank";

/// Cell values treated as missing, following pandas' default NA markers.
pub const NA_MARKERS: &[&str] = &["", "nan", "NaN", "NA", "N/A", "null", "None"];

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub categories: Vec<String>,
    pub brands: BrandRegistry,
    pub derive_class_from_brands: bool,
}

impl LoadOptions {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            categories: config.categories.clone(),
            brands: config.brand_registry(),
            derive_class_from_brands: config.derive_class_from_brands,
        }
    }
}

struct ColumnIndex {
    category: usize,
    product_name: usize,
    brand: usize,
    hashtags: usize,
    discount_rate: usize,
    class: usize,
    link: Option<usize>,
    rank: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, kind: DatasetKind, path: &Path) -> Result<Self, DashboardError> {
        let positions: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim_start_matches('\u{feff}').trim(), idx))
            .collect();

        let required = |column: &str| {
            positions.get(column).copied().ok_or_else(|| DashboardError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            })
        };

        let (link, rank) = if kind.requires_rank() {
            (Some(required(COL_LINK)?), Some(required(COL_RANK)?))
        } else {
            (positions.get(COL_LINK).copied(), positions.get(COL_RANK).copied())
        };

        Ok(Self {
            category: required(COL_CATEGORY)?,
            product_name: required(COL_PRODUCT_NAME)?,
            brand: required(COL_BRAND)?,
            hashtags: required(COL_HASHTAGS)?,
            discount_rate: required(COL_DISCOUNT_RATE)?,
            class: required(COL_CLASS)?,
            link,
            rank,
        })
    }
}

fn is_missing(value: &str) -> bool {
    NA_MARKERS.contains(&value.trim())
}

fn optional_cell(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).filter(|value| !is_missing(value))
}

fn text_cell(record: &StringRecord, idx: usize) -> String {
    optional_cell(record, idx).map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Parses `12`, `12.5` or `12%`. Missing values are `Ok(None)`.
pub fn parse_discount(value: &str) -> Result<Option<f64>, ()> {
    if is_missing(value) {
        return Ok(None);
    }
    let number = value.trim().trim_end_matches('%').trim();
    match number.parse::<f64>() {
        Ok(rate) if rate.is_finite() => Ok(Some(rate)),
        _ => Err(()),
    }
}

/// Parses a positive integer rank. pandas may write integral floats like `3.0`.
pub fn parse_rank(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Ok(rank) = value.parse::<u32>() {
        return (rank > 0).then_some(rank);
    }
    let float = value.parse::<f64>().ok()?;
    if float >= 1.0 && float.fract() == 0.0 && float <= u32::MAX as f64 {
        Some(float as u32)
    } else {
        None
    }
}

struct RowParser<'a> {
    path: &'a Path,
    kind: DatasetKind,
    columns: ColumnIndex,
    options: &'a LoadOptions,
}

impl RowParser<'_> {
    fn invalid(&self, record: &StringRecord, column: &str, idx: usize) -> DashboardError {
        DashboardError::InvalidField {
            path: self.path.to_path_buf(),
            line: record.position().map(|p| p.line()).unwrap_or(0),
            column: column.to_string(),
            value: record.get(idx).unwrap_or_default().to_string(),
        }
    }

    fn parse(&self, record: &StringRecord) -> Result<ProductRow, DashboardError> {
        let c = &self.columns;
        let brand = text_cell(record, c.brand);

        let class_value = record.get(c.class).unwrap_or_default();
        let class = if self.options.derive_class_from_brands {
            self.options.brands.classify(&brand)
        } else {
            class_value.parse::<PbClass>().map_err(|_| self.invalid(record, COL_CLASS, c.class))?
        };

        let discount_rate = parse_discount(record.get(c.discount_rate).unwrap_or_default())
            .map_err(|_| self.invalid(record, COL_DISCOUNT_RATE, c.discount_rate))?;

        let rank = match c.rank {
            Some(idx) => match optional_cell(record, idx) {
                Some(value) => Some(parse_rank(value).ok_or_else(|| self.invalid(record, COL_RANK, idx))?),
                None if self.kind.requires_rank() => return Err(self.invalid(record, COL_RANK, idx)),
                None => None,
            },
            None => None,
        };

        Ok(ProductRow {
            category: text_cell(record, c.category),
            product_name: text_cell(record, c.product_name),
            brand,
            link: c.link.and_then(|idx| optional_cell(record, idx)).map(|v| v.trim().to_string()),
            hashtags: optional_cell(record, c.hashtags).map(str::to_string),
            discount_rate,
            class,
            rank,
        })
    }
}

/// Reads a dataset from any CSV source. `path` is only used for reporting.
pub fn read_dataset<R: Read>(
    reader: R,
    path: &Path,
    kind: DatasetKind,
    options: &LoadOptions,
) -> Result<Dataset, DashboardError> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let parser = RowParser { path, kind, columns: ColumnIndex::resolve(&headers, kind, path)?, options };

    let mut rows = Vec::new();
    let mut seen_ranks: HashSet<(String, u32)> = HashSet::new();

    for record in csv_reader.records() {
        let row = parser.parse(&record?)?;

        if kind.requires_rank() {
            if let Some(rank) = row.rank {
                if !seen_ranks.insert((row.category.clone(), rank)) {
                    return Err(DashboardError::DuplicateRank {
                        path: path.to_path_buf(),
                        category: row.category,
                        rank,
                    });
                }
            }
        }

        rows.push(row);
    }

    report_data_quality(&rows, path, options);
    log::info!("Loaded {} rows from {}", rows.len(), path.display());

    Ok(Dataset { kind, source: path.to_path_buf(), rows })
}

pub fn load_dataset(path: &Path, kind: DatasetKind, options: &LoadOptions) -> Result<Dataset, DashboardError> {
    let file = File::open(path).map_err(|e| DashboardError::MissingInput {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;
    read_dataset(file, path, kind, options)
}

fn report_data_quality(rows: &[ProductRow], path: &Path, options: &LoadOptions) {
    let unknown: BTreeSet<&str> = rows
        .iter()
        .map(|row| row.category.as_str())
        .filter(|category| !options.categories.iter().any(|c| c == category))
        .collect();
    if !options.categories.is_empty() && !unknown.is_empty() {
        let names: Vec<&str> = unknown.into_iter().collect();
        log::warn!(
            "{}: {} categories not in the configured list: {}",
            path.display(),
            names.len(),
            names.join(", ")
        );
    }

    if !options.derive_class_from_brands && !options.brands.is_empty() {
        let mismatched =
            rows.iter().filter(|row| options.brands.classify(&row.brand) != row.class).count();
        if mismatched > 0 {
            log::warn!(
                "{}: {} rows disagree with the PB brand list on '{}'",
                path.display(),
                mismatched,
                COL_CLASS
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const TOP_CSV: &str = "\
,Rank,Category,Product_Name,Brand,Link,Hashtags,Discount_Rate,PB or Not
0,1,채소,친환경 당근,노브랜드,https://example.com/1,\"[맛있는, 신선한]\",10%,PB
1,2,채소,양파,농협,https://example.com/2,,0,NotPB
2,1,뷰티,수분크림,자연주의,https://example.com/3,[신선한],NaN,PB
";

    fn options() -> LoadOptions {
        LoadOptions {
            categories: vec!["채소".to_string(), "뷰티".to_string()],
            brands: BrandRegistry::new(&["노브랜드", "자연주의"]),
            derive_class_from_brands: false,
        }
    }

    fn read(csv: &str, kind: DatasetKind) -> Result<Dataset, DashboardError> {
        read_dataset(csv.as_bytes(), &PathBuf::from("top_20_df.csv"), kind, &options())
    }

    #[test]
    fn test_read_top_dataset() {
        let dataset = read(TOP_CSV, DatasetKind::Top).unwrap();
        assert_eq!(dataset.len(), 3);

        let first = &dataset.rows[0];
        assert_eq!(first.category, "채소");
        assert_eq!(first.product_name, "친환경 당근");
        assert_eq!(first.hashtags.as_deref(), Some("[맛있는, 신선한]"));
        assert_eq!(first.discount_rate, Some(10.0));
        assert_eq!(first.class, PbClass::Pb);
        assert_eq!(first.rank, Some(1));
        assert_eq!(first.link.as_deref(), Some("https://example.com/1"));

        // Empty and NaN cells are missing values
        assert_eq!(dataset.rows[1].hashtags, None);
        assert_eq!(dataset.rows[1].discount_rate, Some(0.0));
        assert_eq!(dataset.rows[2].discount_rate, None);
    }

    #[test]
    fn test_full_dataset_without_rank() {
        let csv = "\
Category,Product_Name,Brand,Hashtags,Discount_Rate,PB or Not
채소,양파,농협,[],5.5,NotPB
";
        let dataset = read(csv, DatasetKind::Full).unwrap();
        assert_eq!(dataset.rows[0].rank, None);
        assert_eq!(dataset.rows[0].link, None);
        assert_eq!(dataset.rows[0].hashtags.as_deref(), Some("[]"));
        assert_eq!(dataset.rows[0].discount_rate, Some(5.5));

        // The same file lacks the columns the top dataset needs
        match read(csv, DatasetKind::Top) {
            Err(DashboardError::MissingColumn { column, .. }) => assert_eq!(column, COL_LINK),
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "Category,Product_Name,Brand,Discount_Rate,PB or Not\n채소,양파,농협,0,NotPB\n";
        match read(csv, DatasetKind::Full) {
            Err(DashboardError::MissingColumn { column, .. }) => assert_eq!(column, COL_HASHTAGS),
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_fields() {
        let bad_class = "Category,Product_Name,Brand,Hashtags,Discount_Rate,PB or Not\n채소,양파,농협,,0,Maybe\n";
        match read(bad_class, DatasetKind::Full) {
            Err(DashboardError::InvalidField { column, value, line, .. }) => {
                assert_eq!(column, COL_CLASS);
                assert_eq!(value, "Maybe");
                assert_eq!(line, 2);
            }
            other => panic!("Expected InvalidField, got {:?}", other),
        }

        let bad_discount = "Category,Product_Name,Brand,Hashtags,Discount_Rate,PB or Not\n채소,양파,농협,,ten,PB\n";
        assert!(matches!(
            read(bad_discount, DatasetKind::Full),
            Err(DashboardError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_duplicate_rank_in_category() {
        let csv = "\
Rank,Category,Product_Name,Brand,Link,Hashtags,Discount_Rate,PB or Not
1,채소,당근,노브랜드,l1,,0,PB
1,뷰티,크림,농협,l2,,0,NotPB
1,채소,양파,농협,l3,,0,NotPB
";
        match read(csv, DatasetKind::Top) {
            Err(DashboardError::DuplicateRank { category, rank, .. }) => {
                assert_eq!(category, "채소");
                assert_eq!(rank, 1);
            }
            other => panic!("Expected DuplicateRank, got {:?}", other),
        }
    }

    #[test]
    fn test_derive_class_from_brands() {
        let csv = "Category,Product_Name,Brand,Hashtags,Discount_Rate,PB or Not\n채소,당근,노브랜드,,0,NotPB\n채소,양파,농협,,0,\n";
        let mut options = options();
        options.derive_class_from_brands = true;

        let dataset =
            read_dataset(csv.as_bytes(), &PathBuf::from("dataset.csv"), DatasetKind::Full, &options)
                .unwrap();
        assert_eq!(dataset.rows[0].class, PbClass::Pb);
        assert_eq!(dataset.rows[1].class, PbClass::NotPb);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.csv");
        assert!(matches!(
            load_dataset(&path, DatasetKind::Full, &options()),
            Err(DashboardError::MissingInput { .. })
        ));
    }

    #[test]
    fn test_value_parsers() {
        assert_eq!(parse_discount("12%"), Ok(Some(12.0)));
        assert_eq!(parse_discount(" 7.5 "), Ok(Some(7.5)));
        assert_eq!(parse_discount("nan"), Ok(None));
        assert_eq!(parse_discount("inf"), Err(()));
        assert_eq!(parse_rank("3"), Some(3));
        assert_eq!(parse_rank("3.0"), Some(3));
        assert_eq!(parse_rank("0"), None);
        assert_eq!(parse_rank("2.5"), None);
    }
}
