#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use hvac_toolbox::{
    app, config, convert_unit, estimate_gas_charge, estimate_pressure_drop,
    i18n::{self, keys},
    report, ConversionInput, ConversionKind, GasChargeInput, PressureDropInput, RefrigerantType,
};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};
use tracing::{info, warn};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/ko/en/pt)
    let mut cli_lang = String::from("auto");
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = val.to_string();
        } else if a == "--lang" || a == "-L" {
            if let Some(val) = args.next() {
                cli_lang = val;
            }
        }
    }

    let app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Config error: {e}");
            config::Config::default()
        }
    };
    hvac_toolbox::init_tracing(&app_cfg.log_filter);

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([720.0, 560.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "HVAC Technician Toolbox",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                warn!("font setup failed: {e}");
            }
            Box::new(GuiApp::new(app_cfg, &cli_lang))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["hvac_toolbox.png", "icon.png", "assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(name.to_string(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        // 기본 폰트 뒤에 두어 라틴 문자는 그대로, 한글만 대체 폰트로 표시한다
        fonts
            .families
            .entry(family)
            .or_default()
            .push(name.to_string());
    }
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위해 시스템 폰트를 찾아 등록한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<std::path::PathBuf> = vec![
        "assets/fonts/NotoSansKR-Regular.ttf".into(),
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf".into(),
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc".into(),
        "/System/Library/Fonts/AppleSDGothicNeo.ttc".into(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.insert(0, fonts.join("malgun.ttf"));
    }
    let path = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| "no Hangul font found".to_string())?;
    let bytes = fs::read(path).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "hangul_font");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    GasCharge,
    PressureDrop,
    Conversion,
}

/// 계산 결과 표시: 문장 목록 또는 오류 메시지.
type Outcome = Option<Result<Vec<String>, String>>;

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    tab: Tab,
    show_settings: bool,
    lang_input: String,
    pack_dir_input: String,
    save_status: Option<String>,
    // 냉매 충전량
    gas_capacity: String,
    gas_length: String,
    gas_refrigerant: RefrigerantType,
    gas_result: Outcome,
    // 압력손실
    drop_diameter: String,
    drop_length: String,
    drop_flow: String,
    drop_result: Outcome,
    // 단위 변환
    conv_value: String,
    conv_kind: ConversionKind,
    conv_result: Outcome,
}

impl GuiApp {
    fn new(config: config::Config, cli_lang: &str) -> Self {
        let tr = app::translator_for(&config, cli_lang);
        Self {
            tab: Tab::GasCharge,
            show_settings: false,
            lang_input: config.language.clone(),
            pack_dir_input: config.language_pack_dir.clone().unwrap_or_default(),
            save_status: None,
            gas_capacity: String::new(),
            gas_length: String::new(),
            gas_refrigerant: config.default_refrigerant.clone(),
            gas_result: None,
            drop_diameter: String::new(),
            drop_length: String::new(),
            drop_flow: String::new(),
            drop_result: None,
            conv_value: String::new(),
            conv_kind: config.default_conversion,
            conv_result: None,
            config,
            tr,
        }
    }

    fn txt(&self, key: &str) -> String {
        self.tr.t(key).into_owned()
    }

    fn error_text(&self, err: &hvac_toolbox::ValidationError) -> String {
        warn!(%err, "calculation input rejected");
        report::validation_message(&self.tr, err)
    }

    fn calculate_gas_charge(&mut self) {
        let outcome = GasChargeInput::parse(
            &self.gas_capacity,
            &self.gas_length,
            self.gas_refrigerant.label(),
        )
        .and_then(|input| estimate_gas_charge(&input));
        self.gas_result = Some(match outcome {
            Ok(res) => Ok(report::gas_charge_lines(&self.tr, &res)),
            Err(err) => Err(self.error_text(&err)),
        });
    }

    fn calculate_pressure_drop(&mut self) {
        let outcome = PressureDropInput::parse(&self.drop_diameter, &self.drop_length, &self.drop_flow)
            .and_then(|input| estimate_pressure_drop(&input));
        self.drop_result = Some(match outcome {
            Ok(res) => Ok(report::pressure_drop_lines(&self.tr, &res)),
            Err(err) => Err(self.error_text(&err)),
        });
    }

    fn run_conversion(&mut self) {
        let outcome = ConversionInput::parse(&self.conv_value, self.conv_kind.selector())
            .and_then(|input| convert_unit(&input));
        self.conv_result = Some(match outcome {
            Ok(res) => Ok(vec![report::conversion_line(&res)]),
            Err(err) => Err(self.error_text(&err)),
        });
    }

    fn save_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        let dir = self.pack_dir_input.trim();
        self.config.language_pack_dir = (!dir.is_empty()).then(|| dir.to_string());
        self.tr = app::translator_for(&self.config, "auto");
        self.save_status = Some(match self.config.save() {
            Ok(()) => {
                info!(language = %self.config.language, "settings saved");
                self.txt(keys::GUI_SAVED)
            }
            Err(e) => report::config_error_message(&self.tr, &e),
        });
    }

    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading(self.txt(keys::APP_TITLE));
            ui.add_space(8.0);
        });
        for (tab, key) in [
            (Tab::GasCharge, keys::GUI_TAB_GAS_CHARGE),
            (Tab::PressureDrop, keys::GUI_TAB_PRESSURE_DROP),
            (Tab::Conversion, keys::GUI_TAB_CONVERSION),
        ] {
            let button = egui::Button::new(self.txt(key))
                .selected(self.tab == tab)
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
        ui.separator();
        if ui.button(self.txt(keys::GUI_SETTINGS)).clicked() {
            self.show_settings = true;
        }
    }

    fn ui_gas_charge(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.txt(keys::GUI_TAB_GAS_CHARGE));
        ui.label(self.txt(keys::HELP_GAS_CHARGE));
        ui.add_space(8.0);
        let capacity_label = format!("{} [BTU]", self.txt(keys::FIELD_RATED_CAPACITY));
        let length_label = format!("{} [m]", self.txt(keys::FIELD_LINE_LENGTH));
        let refrigerant_label = self.txt(keys::GUI_REFRIGERANT);
        egui::Grid::new("gas_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label(capacity_label);
                ui.add(egui::TextEdit::singleline(&mut self.gas_capacity).hint_text("12000"));
                ui.end_row();
                ui.label(length_label);
                ui.add(egui::TextEdit::singleline(&mut self.gas_length).hint_text("10"));
                ui.end_row();
                ui.label(refrigerant_label);
                egui::ComboBox::from_id_source("gas_refrigerant")
                    .selected_text(self.gas_refrigerant.label().to_string())
                    .show_ui(ui, |ui| {
                        for r in RefrigerantType::KNOWN {
                            let label = r.label().to_string();
                            ui.selectable_value(&mut self.gas_refrigerant, r, label);
                        }
                    });
                ui.end_row();
            });
        ui.add_space(8.0);
        if ui.button(self.txt(keys::GUI_CALCULATE)).clicked() {
            self.calculate_gas_charge();
        }
        show_outcome(ui, &self.gas_result);
    }

    fn ui_pressure_drop(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.txt(keys::GUI_TAB_PRESSURE_DROP));
        ui.label(self.txt(keys::HELP_PRESSURE_DROP));
        ui.add_space(8.0);
        let labels = [
            format!("{} [mm]", self.txt(keys::FIELD_PIPE_DIAMETER)),
            format!("{} [m]", self.txt(keys::FIELD_PIPE_LENGTH)),
            format!("{} [m³/h]", self.txt(keys::FIELD_FLOW_RATE)),
        ];
        egui::Grid::new("drop_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                let fields = [
                    (&mut self.drop_diameter, "15.88"),
                    (&mut self.drop_length, "20"),
                    (&mut self.drop_flow, "5"),
                ];
                for (label, (value, hint)) in labels.into_iter().zip(fields) {
                    ui.label(label);
                    ui.add(egui::TextEdit::singleline(value).hint_text(hint));
                    ui.end_row();
                }
            });
        ui.add_space(8.0);
        if ui.button(self.txt(keys::GUI_CALCULATE)).clicked() {
            self.calculate_pressure_drop();
        }
        show_outcome(ui, &self.drop_result);
    }

    fn ui_conversion(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.txt(keys::GUI_TAB_CONVERSION));
        ui.label(self.txt(keys::HELP_UNIT_CONVERSION));
        ui.add_space(8.0);
        let kind_label = self.txt(keys::GUI_CONVERSION_KIND);
        let value_label = self.txt(keys::FIELD_VALUE);
        egui::Grid::new("conv_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label(kind_label);
                egui::ComboBox::from_id_source("conv_kind")
                    .selected_text(self.conv_kind.to_string())
                    .show_ui(ui, |ui| {
                        for kind in ConversionKind::ALL {
                            ui.selectable_value(&mut self.conv_kind, kind, kind.to_string());
                        }
                    });
                ui.end_row();
                ui.label(value_label);
                ui.text_edit_singleline(&mut self.conv_value);
                ui.end_row();
            });
        ui.add_space(8.0);
        if ui.button(self.txt(keys::GUI_CONVERT)).clicked() {
            self.run_conversion();
        }
        show_outcome(ui, &self.conv_result);
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings;
        let mut save_clicked = false;
        let auto_label = self.txt(keys::GUI_LANGUAGE_AUTO);
        let lang_label = self.txt(keys::GUI_LANGUAGE);
        let pack_label = self.txt(keys::GUI_PACK_DIR);
        let browse_label = self.txt(keys::GUI_BROWSE);
        let save_label = self.txt(keys::GUI_SAVE);
        egui::Window::new(self.txt(keys::GUI_SETTINGS))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(lang_label);
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(self.lang_input.clone())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.lang_input, "auto".into(), auto_label);
                        ui.selectable_value(&mut self.lang_input, "ko".into(), "한국어");
                        ui.selectable_value(&mut self.lang_input, "en".into(), "English");
                        ui.selectable_value(&mut self.lang_input, "pt".into(), "Português");
                    });
                ui.separator();
                ui.label(pack_label);
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut self.pack_dir_input);
                    if ui.button(browse_label).clicked() {
                        if let Some(dir) = FileDialog::new().pick_folder() {
                            self.pack_dir_input = dir.display().to_string();
                        }
                    }
                });
                ui.separator();
                if ui.button(save_label).clicked() {
                    save_clicked = true;
                }
                if let Some(msg) = &self.save_status {
                    ui.label(msg);
                }
            });
        self.show_settings = open;
        if save_clicked {
            self.save_settings();
        }
    }
}

fn show_outcome(ui: &mut egui::Ui, outcome: &Outcome) {
    let Some(outcome) = outcome else {
        return;
    };
    ui.add_space(12.0);
    egui::Frame::group(ui.style()).show(ui, |ui| match outcome {
        Ok(lines) => {
            for line in lines {
                ui.monospace(line);
            }
        }
        Err(msg) => {
            let color = ui.visuals().error_fg_color;
            ui.colored_label(color, msg);
        }
    });
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if self.show_settings {
            self.ui_settings(ctx);
        }

        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(180.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::GasCharge => self.ui_gas_charge(ui),
                    Tab::PressureDrop => self.ui_pressure_drop(ui),
                    Tab::Conversion => self.ui_conversion(ui),
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> GuiApp {
        GuiApp::new(config::Config::default(), "en")
    }

    #[test]
    fn gas_charge_button_fills_report() {
        let mut app = app();
        app.gas_capacity = "12000".into();
        app.gas_length = "10".into();
        app.calculate_gas_charge();
        let lines = app.gas_result.clone().unwrap().unwrap();
        assert_eq!(lines[3], "• TOTAL: 1060g (1.06kg)");
    }

    #[test]
    fn empty_fields_show_validation_error() {
        let mut app = app();
        app.calculate_pressure_drop();
        let msg = app.drop_result.clone().unwrap().unwrap_err();
        assert!(msg.contains("pipe diameter"), "{msg}");
    }

    #[test]
    fn conversion_uses_configured_default_kind() {
        let mut cfg = config::Config::default();
        cfg.default_conversion = ConversionKind::CelsiusToFahrenheit;
        let mut app = GuiApp::new(cfg, "en");
        app.conv_value = "100".into();
        app.run_conversion();
        assert_eq!(
            app.conv_result.clone().unwrap().unwrap(),
            vec!["100°C = 212.0°F".to_string()]
        );
    }
}
