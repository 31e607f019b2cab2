use std::path::{
    Path,
    PathBuf,
};

use eframe::egui::{
    self,
    RichText,
};

use super::{
    charts::{
        discount_box_plot,
        hashtag_bar_chart,
    },
    metrics::{
        category_breakdown_grid,
        summary_cards,
    },
    product_table::ProductTableState,
    theme::{
        apply_theme,
        Palette,
    },
};
use crate::{
    analysis::DashboardViews,
    config::{
        DashboardConfig,
        MAX_TOP_N,
    },
    core::{
        DashboardError,
        PbClass,
    },
    dataset::{
        DashboardData,
        DatasetCache,
    },
};

const TITLE: &str = "이마트 새벽배송 카테고리 별 상위 20% 항목 분석";
const SUBTITLE: &str = "-이마트 PB의 입지 파악 및 개선 방향 중심으로";
const TEAM: &str = "신세계아이앤씨 / 데이터분석";
const PURPOSE: &str = "활용도\n-신세계가 제공하는 새벽배송 서비스에서 판매량 상위 20% 상품 PB/not-PB비교 분석\n\n의미\n-PB 상품의 현재 경쟁력 파악 및 방향성 탐구";
const COLLECTION: &str = "수집 데이터 설명\n카테고리별 상품명, 브랜드명, 링크, 해시태그, 할인율 데이터 수집\n페이지바 태그 수집해 자동으로 페이지 돌아가며 수집\n[Brand]에서 PB 브랜드명 리스트와 비교해 [PB or Not] 생성\n판매순으로 크롤링->인덱스열을 [Rank]로 생성";
const STEPS: &str = "1. 전처리\nDType 변환, 불용어 제거, 상위 20% 데이터셋 추출\n2. 활용1\n 카테고리 별로 상위 20% 제품 할인율 비교 by boxplot\n3. 활용2\n 상위 20% 제품 TOP 10 해시태그 비교 by barplot";

const SECTION_SPACING: f32 = 12.0;

pub struct DashboardApp {
    config: DashboardConfig,
    config_path: PathBuf,
    cache: DatasetCache,
    data: DashboardData,
    views: DashboardViews,
    palette: Palette,
    product_table: ProductTableState,
    top_n: usize,
    status: Option<String>,
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: DashboardConfig,
        config_path: PathBuf,
        cache: DatasetCache,
        data: DashboardData,
    ) -> Self {
        let app = Self::with_data(config, config_path, cache, data);
        apply_theme(&cc.egui_ctx, &app.palette, &app.config.render);
        app
    }

    fn with_data(config: DashboardConfig, config_path: PathBuf, cache: DatasetCache, data: DashboardData) -> Self {
        let top_n = config.top_n;
        let views = DashboardViews::compute(&data.full, &data.top, &config.categories, top_n);

        Self {
            config,
            config_path,
            cache,
            data,
            views,
            palette: Palette::default(),
            product_table: ProductTableState::default(),
            top_n,
            status: None,
        }
    }

    fn install(&mut self, data: DashboardData) {
        if data.same_as(&self.data) {
            return;
        }
        self.views = DashboardViews::compute(&data.full, &data.top, &self.config.categories, self.top_n);
        self.data = data;
        log::info!("Dashboard refreshed");
    }

    /// Re-reads the datasets. Unchanged files come back from the cache and
    /// leave the views untouched.
    fn reload(&mut self) {
        match DashboardData::load(&self.config, &mut self.cache) {
            Ok(data) => {
                self.install(data);
                self.status = None;
            }
            Err(e) => {
                log::error!("Reload failed: {}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    fn dataset_path_mut(&mut self, top: bool) -> &mut PathBuf {
        if top {
            &mut self.config.top_dataset_path
        } else {
            &mut self.config.full_dataset_path
        }
    }

    /// Points one dataset at `path`. The config is only written once the new
    /// file has loaded; on failure the previous path stays in effect.
    fn switch_dataset(&mut self, top: bool, path: PathBuf) -> Result<(), DashboardError> {
        let previous = std::mem::replace(self.dataset_path_mut(top), path);

        match DashboardData::load(&self.config, &mut self.cache) {
            Ok(data) => {
                self.install(data);
                if let Err(e) = self.save_config() {
                    log::warn!("Failed to save config: {}", e);
                }
                Ok(())
            }
            Err(e) => {
                *self.dataset_path_mut(top) = previous;
                Err(e)
            }
        }
    }

    fn pick_dataset(&mut self, top: bool) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .add_filter("All Files", &["*"])
            .pick_file()
        else {
            return;
        };

        match self.switch_dataset(top, path) {
            Ok(()) => self.status = None,
            Err(e) => {
                log::error!("Failed to switch dataset: {}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    fn save_config(&self) -> Result<(), DashboardError> {
        self.config.save(&self.config_path)
    }

    fn ui_header(&self, ui: &mut egui::Ui) {
        ui.heading(self.palette.heading(TITLE));
        ui.label(self.palette.weak(SUBTITLE));
        ui.add_space(SECTION_SPACING);
        ui.label(TEAM);
        ui.label(PURPOSE);
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("데이터 수집 페이지");
            if ui.button("Browser").clicked() {
                ui.ctx().open_url(egui::OpenUrl::new_tab(&self.config.source_url));
            }
        });
        ui.label(COLLECTION);
        ui.label(STEPS);
    }

    fn ui_data_sources(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Data Sources").show(ui, |ui| {
            let mut pick = None;
            egui::Grid::new("data_sources").num_columns(4).show(ui, |ui| {
                for (label, path, rows, top) in [
                    ("Full dataset", &self.config.full_dataset_path, self.data.full.len(), false),
                    ("Top 20% dataset", &self.config.top_dataset_path, self.data.top.len(), true),
                ] {
                    ui.label(label);
                    ui.label(path_label(path));
                    ui.label(format!("{} rows", rows));
                    if ui.button("Choose…").clicked() {
                        pick = Some(top);
                    }
                    ui.end_row();
                }
            });

            if let Some(top) = pick {
                self.pick_dataset(top);
            }

            if ui.button("⟳ Reload").clicked() {
                self.reload();
            }

            if let Some(status) = &self.status {
                ui.colored_label(self.palette.red, status.as_str());
            }
        });
    }

    fn ui_discounts(&self, ui: &mut egui::Ui) {
        ui.columns(2, |columns| {
            columns[0].heading(self.palette.heading("할인율 Boxplot"));
            columns[1].label("A SMALL\n- Share\n- Discount Rate\n- Number of discounted products");
        });

        let discounts = &self.views.discounts;
        discount_box_plot(ui, "PB 할인율 Boxplot", discounts, &[PbClass::Pb], &self.palette);
        ui.add_space(SECTION_SPACING);
        discount_box_plot(ui, "Not PB 할인율 Boxplot", discounts, &[PbClass::NotPb], &self.palette);
        ui.add_space(SECTION_SPACING);
        discount_box_plot(ui, "Discount_Rate Boxplot", discounts, &PbClass::ALL, &self.palette);

        ui.add_space(SECTION_SPACING);
        egui::CollapsingHeader::new("Category Breakdown").show(ui, |ui| {
            category_breakdown_grid(ui, &self.views.breakdown);
        });
    }

    fn ui_hashtags(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.palette.heading("상위 Hash tag 비교"));

        let slider = ui.add(egui::Slider::new(&mut self.top_n, 1..=MAX_TOP_N).text("Top N"));
        if slider.changed() {
            self.views.refresh_hashtags(&self.data.top, self.top_n);
        }

        let hashtags = &self.views.hashtags;
        let palette = &self.palette;
        ui.columns(2, |columns| {
            hashtag_bar_chart(
                &mut columns[0],
                &format!("Top {} Hashtags - PB", hashtags.top_n),
                hashtags.for_class(PbClass::Pb),
                palette.class_color(PbClass::Pb),
                palette,
            );
            hashtag_bar_chart(
                &mut columns[1],
                &format!("Top {} Hashtags - Not PB", hashtags.top_n),
                hashtags.for_class(PbClass::NotPb),
                palette.class_color(PbClass::NotPb),
                palette,
            );
        });
    }
}

fn path_label(path: &Path) -> RichText {
    RichText::new(path.display().to_string()).monospace()
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                self.ui_header(ui);
                ui.separator();

                self.ui_data_sources(ui);

                egui::CollapsingHeader::new("Top Ranked Products").show(ui, |ui| {
                    self.product_table.show(ui, &self.data.top.rows);
                });

                ui.add_space(SECTION_SPACING);
                summary_cards(ui, &self.views.metrics, &self.palette);
                ui.separator();

                self.ui_discounts(ui);
                ui.separator();

                self.ui_hashtags(ui);
            });
        });
    }
}
