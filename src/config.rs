use std::{
    collections::HashSet,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    analysis::DEFAULT_TOP_N,
    core::{
        DashboardError,
        PbClass,
    },
    persistence::{
        get_data_file_path,
        load_json,
        load_json_or_default,
        save_json,
    },
};

pub const CONFIG_FILE: &str = "config.json";

/// Upper bound of the hashtag chart size, shared with the Top N slider.
pub const MAX_TOP_N: usize = 50;

pub const DEFAULT_SOURCE_URL: &str =
    "https://emart.ssg.com/disp/theme/category.ssg?dispCtgId=6000224023&sort=sale";

pub const DEFAULT_CATEGORIES: &[&str] = &[
    "과일/견과/쌀",
    "채소",
    "정육/계란류",
    "수산물/건해산",
    "우유/유제품",
    "밀키트/반찬/간편요리",
    "김치/반찬/델리",
    "생수/음료/커피/건강",
    "면류/통조림",
    "양념/오일",
    "과자/간식",
    "베이커리/잼",
    "제지/위생용품",
    "청소/생활용품",
    "가구/인테리어",
    "주방용품",
    "반려동물",
    "뷰티",
    "베이비/키즈",
    "리빙/생활",
];

pub const DEFAULT_PB_BRANDS: &[&str] = &[
    "노브랜드",
    "피코크",
    "이마트",
    "자연주의",
    "몰리스",
    "러빙홈",
    "스마트이팅",
    "데이즈",
    "일렉트로맨",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Preferred font, drawn ahead of the bundled Hangul font.
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
    pub zoom: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { font_path: None, font_size: 13.0, zoom: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub full_dataset_path: PathBuf,
    pub top_dataset_path: PathBuf,
    pub categories: Vec<String>,
    pub pb_brands: Vec<String>,
    /// Recompute `PB or Not` from `pb_brands` instead of trusting the column.
    pub derive_class_from_brands: bool,
    pub top_n: usize,
    pub source_url: String,
    pub render: RenderConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            full_dataset_path: PathBuf::from("./dataset.csv"),
            top_dataset_path: PathBuf::from("./top_20_df.csv"),
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            pb_brands: DEFAULT_PB_BRANDS.iter().map(|s| s.to_string()).collect(),
            derive_class_from_brands: false,
            top_n: DEFAULT_TOP_N,
            source_url: DEFAULT_SOURCE_URL.to_string(),
            render: RenderConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn default_path() -> PathBuf {
        get_data_file_path(CONFIG_FILE)
    }

    /// Loads an explicit config file. The file must exist.
    pub fn load(path: &Path) -> Result<Self, DashboardError> {
        let config: Self = load_json(path)?.ok_or_else(|| DashboardError::MissingInput {
            path: path.to_path_buf(),
            source: Box::new(std::io::Error::from(std::io::ErrorKind::NotFound)),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the config at `path`, falling back to defaults when it is absent,
    /// unreadable or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        let config: Self = load_json_or_default(path);
        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Invalid config {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), DashboardError> {
        self.validate()?;
        save_json(self, path)
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        if !(1..=MAX_TOP_N).contains(&self.top_n) {
            return Err(DashboardError::InvalidConfig(format!("top_n must be between 1 and {}", MAX_TOP_N)));
        }
        if self.categories.is_empty() {
            return Err(DashboardError::InvalidConfig("categories must not be empty".to_string()));
        }
        if !(self.render.font_size > 0.0) {
            return Err(DashboardError::InvalidConfig("render.font_size must be positive".to_string()));
        }
        Ok(())
    }

    pub fn brand_registry(&self) -> BrandRegistry {
        BrandRegistry::new(&self.pb_brands)
    }
}

/// Curated private-label brand names.
#[derive(Debug, Clone, Default)]
pub struct BrandRegistry {
    brands: HashSet<String>,
}

impl BrandRegistry {
    pub fn new<S: AsRef<str>>(brands: &[S]) -> Self {
        Self {
            brands: brands
                .iter()
                .map(|b| b.as_ref().trim().to_string())
                .filter(|b| !b.is_empty())
                .collect(),
        }
    }

    pub fn is_pb(&self, brand: &str) -> bool {
        self.brands.contains(brand.trim())
    }

    pub fn classify(&self, brand: &str) -> PbClass {
        if self.is_pb(brand) {
            PbClass::Pb
        } else {
            PbClass::NotPb
        }
    }

    pub fn len(&self) -> usize {
        self.brands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.categories.len(), 20);
        assert_eq!(config.top_n, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "top_n": 5, "pb_brands": ["피코크"], "render": { "font_size": 9.0 } }"#)
            .unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.pb_brands, vec!["피코크".to_string()]);
        assert_eq!(config.render.font_size, 9.0);
        assert_eq!(config.render.zoom, 1.0);
        assert_eq!(config.categories.len(), 20);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "top_n": 0 }"#).unwrap();
        assert!(matches!(DashboardConfig::load(&path), Err(DashboardError::InvalidConfig(_))));

        fs::write(&path, format!(r#"{{ "top_n": {} }}"#, MAX_TOP_N + 1)).unwrap();
        assert!(matches!(DashboardConfig::load(&path), Err(DashboardError::InvalidConfig(_))));

        fs::write(&path, format!(r#"{{ "top_n": {} }}"#, MAX_TOP_N)).unwrap();
        assert_eq!(DashboardConfig::load(&path).unwrap().top_n, MAX_TOP_N);

        fs::write(&path, r#"{ "categories": [] }"#).unwrap();
        assert!(matches!(DashboardConfig::load(&path), Err(DashboardError::InvalidConfig(_))));

        let missing = dir.path().join("missing.json");
        assert!(matches!(DashboardConfig::load(&missing), Err(DashboardError::MissingInput { .. })));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(DashboardConfig::load_or_default(&path), DashboardConfig::default());

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(DashboardConfig::load_or_default(&path), DashboardConfig::default());

        fs::write(&path, r#"{ "top_n": 500 }"#).unwrap();
        assert_eq!(DashboardConfig::load_or_default(&path), DashboardConfig::default());

        fs::write(&path, r#"{ "top_n": 7 }"#).unwrap();
        assert_eq!(DashboardConfig::load_or_default(&path).top_n, 7);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = DashboardConfig::default();
        config.derive_class_from_brands = true;
        config.render.font_path = Some(PathBuf::from("/fonts/NanumGothic.ttf"));

        config.save(&path).unwrap();
        assert_eq!(DashboardConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_brand_registry() {
        let registry = BrandRegistry::new(&[" 노브랜드 ", "피코크", ""]);
        assert_eq!(registry.len(), 2);
        assert!(registry.is_pb("노브랜드"));
        assert_eq!(registry.classify(" 피코크"), PbClass::Pb);
        assert_eq!(registry.classify("농심"), PbClass::NotPb);
    }
}
