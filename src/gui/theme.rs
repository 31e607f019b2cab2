use std::fs;

use eframe::egui::{
    self,
    epaint::text::{
        FontInsert,
        FontPriority,
        InsertFontFamily,
    },
    Color32,
    RichText,
    Stroke,
    TextStyle,
    Visuals,
};

use crate::{
    config::RenderConfig,
    core::PbClass,
};

const HANGUL_FONT: &str = "NanumBarunGothic";
const OVERRIDE_FONT: &str = "dashboard-font";

#[derive(Clone)]
pub struct Palette {
    pub background: Color32,
    pub background_light: Color32,
    pub foreground: Color32,
    pub comment: Color32,
    pub selection: Color32,
    pub purple: Color32,
    pub cyan: Color32,
    pub yellow: Color32,
    pub red: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self::dracula()
    }
}

impl Palette {
    //Colors from:
    //https://github.com/ShabbirHasan1/egui_dracula/blob/master/src/lib.rs
    pub fn dracula() -> Self {
        Self {
            background: Color32::from_rgb(0x28, 0x2a, 0x36),
            background_light: Color32::from_rgb(52, 54, 66),
            foreground: Color32::from_rgb(0xf8, 0xf8, 0xf2),
            comment: Color32::from_rgb(0x62, 0x72, 0xa4),
            selection: Color32::from_rgb(0x44, 0x47, 0x5a),
            purple: Color32::from_rgb(189, 147, 249),
            cyan: Color32::from_rgb(139, 233, 253),
            yellow: Color32::from_rgb(0xf1, 0xfa, 0x8c),
            red: Color32::from_rgb(0xff, 0x55, 0x55),
        }
    }

    /// PB is drawn yellow, NotPB red.
    pub fn class_color(&self, class: PbClass) -> Color32 {
        match class {
            PbClass::Pb => self.yellow,
            PbClass::NotPb => self.red,
        }
    }

    pub fn heading(&self, content: &str) -> RichText {
        RichText::new(content).color(self.purple)
    }

    pub fn weak(&self, content: &str) -> RichText {
        RichText::new(content).color(self.comment)
    }

    pub fn grid_stroke(&self) -> Stroke {
        Stroke::new(0.5, self.comment.linear_multiply(0.5))
    }
}

pub fn apply_theme(ctx: &egui::Context, palette: &Palette, render: &RenderConfig) {
    let default = Visuals::dark();
    let mut visuals = Visuals {
        dark_mode: true,
        panel_fill: palette.background,
        window_fill: palette.background,
        extreme_bg_color: palette.background_light,
        hyperlink_color: palette.cyan,
        ..default
    };
    visuals.selection.bg_fill = palette.selection;
    visuals.widgets.noninteractive.fg_stroke.color = palette.foreground;
    visuals.widgets.inactive.fg_stroke.color = palette.foreground;

    ctx.set_theme(egui::Theme::Dark);
    ctx.set_visuals_of(egui::Theme::Dark, visuals);

    let base = render.font_size;
    ctx.style_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            font_id.size = match text_style {
                TextStyle::Heading => base * 1.6,
                TextStyle::Small => base * 0.75,
                _ => base,
            };
        }
    });

    ctx.set_zoom_factor(render.zoom);

    // The bundled font only covers Hangul, so it sits behind the default Latin fonts
    ctx.add_font(FontInsert::new(
        HANGUL_FONT,
        egui::FontData::from_static(include_bytes!("../../assets/fonts/NanumBarunGothic.ttf")),
        vec![
            InsertFontFamily {
                family: egui::FontFamily::Proportional,
                priority: FontPriority::Lowest,
            },
            InsertFontFamily {
                family: egui::FontFamily::Monospace,
                priority: FontPriority::Lowest,
            },
        ],
    ));

    if let Some(path) = &render.font_path {
        match fs::read(path) {
            Ok(bytes) => {
                ctx.add_font(FontInsert::new(
                    OVERRIDE_FONT,
                    egui::FontData::from_owned(bytes),
                    vec![
                        InsertFontFamily {
                            family: egui::FontFamily::Proportional,
                            priority: FontPriority::Highest,
                        },
                        InsertFontFamily {
                            family: egui::FontFamily::Monospace,
                            priority: FontPriority::Lowest,
                        },
                    ],
                ));
            }
            Err(e) => log::warn!("Failed to read font {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::FontId;

    use super::*;

    fn themed_context(render: &RenderConfig) -> egui::Context {
        let ctx = egui::Context::default();
        apply_theme(&ctx, &Palette::default(), render);
        // Font changes land at the start of the next frame
        let _ = ctx.run(egui::RawInput::default(), |_| {});
        ctx
    }

    #[test]
    fn test_default_theme_renders_hangul() {
        let render = RenderConfig::default();
        let ctx = themed_context(&render);

        ctx.fonts(|fonts| {
            assert!(fonts.has_glyphs(&FontId::proportional(render.font_size), "신선한 채소"));
            assert!(fonts.has_glyphs(&FontId::monospace(render.font_size), "노브랜드"));
            assert!(fonts.has_glyphs(&FontId::proportional(render.font_size), "Top 10 Hashtags"));
        });
    }

    #[test]
    fn test_unreadable_font_override_keeps_bundled_font() {
        let dir = tempfile::tempdir().unwrap();
        let render = RenderConfig {
            font_path: Some(dir.path().join("missing.ttf")),
            ..RenderConfig::default()
        };
        let ctx = themed_context(&render);

        ctx.fonts(|fonts| {
            assert!(fonts.has_glyphs(&FontId::proportional(render.font_size), "상위 20%"));
        });
    }
}
