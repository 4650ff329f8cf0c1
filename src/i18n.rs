use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use sys_locale::get_locale;
use tracing::debug;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_GAS_CHARGE: &str = "main_menu.gas_charge";
    pub const MAIN_MENU_PRESSURE_DROP: &str = "main_menu.pressure_drop";
    pub const MAIN_MENU_UNIT_CONVERSION: &str = "main_menu.unit_conversion";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const GAS_CHARGE_HEADING: &str = "gas_charge.heading";
    pub const PROMPT_CAPACITY: &str = "prompt.capacity";
    pub const PROMPT_LINE_LENGTH: &str = "prompt.line_length";
    pub const PROMPT_REFRIGERANT: &str = "prompt.refrigerant";
    pub const HELP_GAS_CHARGE: &str = "help.gas_charge";

    pub const PRESSURE_DROP_HEADING: &str = "pressure_drop.heading";
    pub const PROMPT_DIAMETER: &str = "prompt.diameter";
    pub const PROMPT_PIPE_LENGTH: &str = "prompt.pipe_length";
    pub const PROMPT_FLOW: &str = "prompt.flow";
    pub const HELP_PRESSURE_DROP: &str = "help.pressure_drop";

    pub const UNIT_CONVERSION_HEADING: &str = "unit_conversion.heading";
    pub const PROMPT_CONVERSION_KIND: &str = "prompt.conversion_kind";
    pub const PROMPT_VALUE: &str = "prompt.value";
    pub const HELP_UNIT_CONVERSION: &str = "help.unit_conversion";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_LANGUAGE_OPTIONS: &str = "settings.language_options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const REPORT_GAS_TITLE: &str = "report.gas.title";
    pub const REPORT_GAS_BASE: &str = "report.gas.base";
    pub const REPORT_GAS_ADDITIONAL: &str = "report.gas.additional";
    pub const REPORT_GAS_TOTAL: &str = "report.gas.total";
    pub const REPORT_GAS_REFRIGERANT: &str = "report.gas.refrigerant";

    pub const REPORT_DROP_TITLE: &str = "report.drop.title";
    pub const REPORT_DROP_VELOCITY: &str = "report.drop.velocity";
    pub const REPORT_DROP_PER_METER: &str = "report.drop.per_meter";
    pub const REPORT_DROP_TOTAL_BAR: &str = "report.drop.total_bar";
    pub const REPORT_DROP_TOTAL_PSI: &str = "report.drop.total_psi";
    pub const REPORT_DROP_WARNING: &str = "report.drop.warning";
    pub const REPORT_DROP_OK: &str = "report.drop.ok";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_UNSUPPORTED_CONVERSION: &str = "error.unsupported_conversion";
    pub const ERROR_IO: &str = "error.io";
    pub const ERROR_CONFIG: &str = "error.config";
    pub const ERROR_JSON: &str = "error.json";

    pub const FIELD_RATED_CAPACITY: &str = "field.rated_capacity_btu";
    pub const FIELD_LINE_LENGTH: &str = "field.line_length_m";
    pub const FIELD_PIPE_DIAMETER: &str = "field.pipe_diameter_mm";
    pub const FIELD_PIPE_LENGTH: &str = "field.pipe_length_m";
    pub const FIELD_FLOW_RATE: &str = "field.flow_rate_m3_per_h";
    pub const FIELD_VALUE: &str = "field.value";

    pub const GUI_TAB_GAS_CHARGE: &str = "gui.tab.gas_charge";
    pub const GUI_TAB_PRESSURE_DROP: &str = "gui.tab.pressure_drop";
    pub const GUI_TAB_CONVERSION: &str = "gui.tab.conversion";
    pub const GUI_REFRIGERANT: &str = "gui.refrigerant";
    pub const GUI_CONVERSION_KIND: &str = "gui.conversion_kind";
    pub const GUI_CALCULATE: &str = "gui.calculate";
    pub const GUI_CONVERT: &str = "gui.convert";
    pub const GUI_SETTINGS: &str = "gui.settings";
    pub const GUI_LANGUAGE: &str = "gui.language";
    pub const GUI_LANGUAGE_AUTO: &str = "gui.language_auto";
    pub const GUI_PACK_DIR: &str = "gui.pack_dir";
    pub const GUI_BROWSE: &str = "gui.browse";
    pub const GUI_SAVE: &str = "gui.save";
    pub const GUI_SAVED: &str = "gui.saved";

    /// 내장 카탈로그가 모두 갖춰야 하는 키 목록.
    pub const ALL: &[&str] = &[
        ERROR_PREFIX,
        APP_EXIT,
        APP_TITLE,
        MAIN_MENU_TITLE,
        MAIN_MENU_GAS_CHARGE,
        MAIN_MENU_PRESSURE_DROP,
        MAIN_MENU_UNIT_CONVERSION,
        MAIN_MENU_SETTINGS,
        MAIN_MENU_EXIT,
        PROMPT_MENU_SELECT,
        INVALID_SELECTION_RETRY,
        GAS_CHARGE_HEADING,
        PROMPT_CAPACITY,
        PROMPT_LINE_LENGTH,
        PROMPT_REFRIGERANT,
        HELP_GAS_CHARGE,
        PRESSURE_DROP_HEADING,
        PROMPT_DIAMETER,
        PROMPT_PIPE_LENGTH,
        PROMPT_FLOW,
        HELP_PRESSURE_DROP,
        UNIT_CONVERSION_HEADING,
        PROMPT_CONVERSION_KIND,
        PROMPT_VALUE,
        HELP_UNIT_CONVERSION,
        SETTINGS_HEADING,
        SETTINGS_CURRENT_LANGUAGE,
        SETTINGS_LANGUAGE_OPTIONS,
        SETTINGS_PROMPT_CHANGE,
        SETTINGS_INVALID,
        SETTINGS_SAVED,
        REPORT_GAS_TITLE,
        REPORT_GAS_BASE,
        REPORT_GAS_ADDITIONAL,
        REPORT_GAS_TOTAL,
        REPORT_GAS_REFRIGERANT,
        REPORT_DROP_TITLE,
        REPORT_DROP_VELOCITY,
        REPORT_DROP_PER_METER,
        REPORT_DROP_TOTAL_BAR,
        REPORT_DROP_TOTAL_PSI,
        REPORT_DROP_WARNING,
        REPORT_DROP_OK,
        ERROR_INVALID_NUMBER,
        ERROR_UNSUPPORTED_CONVERSION,
        ERROR_IO,
        ERROR_CONFIG,
        ERROR_JSON,
        FIELD_RATED_CAPACITY,
        FIELD_LINE_LENGTH,
        FIELD_PIPE_DIAMETER,
        FIELD_PIPE_LENGTH,
        FIELD_FLOW_RATE,
        FIELD_VALUE,
        GUI_TAB_GAS_CHARGE,
        GUI_TAB_PRESSURE_DROP,
        GUI_TAB_CONVERSION,
        GUI_REFRIGERANT,
        GUI_CONVERSION_KIND,
        GUI_CALCULATE,
        GUI_CONVERT,
        GUI_SETTINGS,
        GUI_LANGUAGE,
        GUI_LANGUAGE_AUTO,
        GUI_PACK_DIR,
        GUI_BROWSE,
        GUI_SAVE,
        GUI_SAVED,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
    Pt,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else if c.starts_with("pt") {
            Language::Pt
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
            Language::Pt => "pt",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en/pt)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir.and_then(|dir| load_overrides(dir, lang_code));
        if overrides.is_some() {
            debug!(lang = lang_code, ?pack_dir, "language pack loaded");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 → 선택 언어 → 영어 순으로 찾는다.
    pub fn t(&self, key: &str) -> Cow<'_, str> {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return Cow::Borrowed(v.as_str());
        }
        let builtin = match self.lang {
            Language::Ko => ko(key),
            Language::Pt => pt(key),
            Language::En => None,
        };
        Cow::Borrowed(
            builtin
                .or_else(|| en(key))
                .unwrap_or("[missing translation]"),
        )
    }

    /// `{name}` 자리표시자를 채운 번역을 반환한다.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        let mut out = self.t(key).into_owned();
        for (k, v) in vars {
            out = out.replace(&format!("{{{k}}}"), v);
        }
        out
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("pt") => Some("pt".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" | "en" | "pt" => Some(lang),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        APP_TITLE => "HVAC Technician Toolbox",
        MAIN_MENU_TITLE => "\n=== HVAC Technician Toolbox ===",
        MAIN_MENU_GAS_CHARGE => "1) Gas Charge",
        MAIN_MENU_PRESSURE_DROP => "2) Pressure Drop",
        MAIN_MENU_UNIT_CONVERSION => "3) Unit Conversion",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        GAS_CHARGE_HEADING => "\n-- Refrigerant Gas Charge --",
        PROMPT_CAPACITY => "Rated capacity [BTU] (ex: 12000): ",
        PROMPT_LINE_LENGTH => "Line length [m] (ex: 10): ",
        PROMPT_REFRIGERANT => "Refrigerant (R410A/R22/R32, enter = {default}): ",
        HELP_GAS_CHARGE => "Help: the first 5 m of line are included in the base charge.",
        PRESSURE_DROP_HEADING => "\n-- Line Pressure Drop --",
        PROMPT_DIAMETER => "Pipe diameter [mm] (ex: 15.88): ",
        PROMPT_PIPE_LENGTH => "Length [m] (ex: 20): ",
        PROMPT_FLOW => "Flow rate [m3/h] (ex: 5): ",
        HELP_PRESSURE_DROP => "Help: simplified Darcy-Weisbach with friction factor 0.02.",
        UNIT_CONVERSION_HEADING => "\n-- Unit Conversion --",
        PROMPT_CONVERSION_KIND => "Conversion number (enter = {default}): ",
        PROMPT_VALUE => "Value: ",
        HELP_UNIT_CONVERSION => "Help: choose a conversion, then enter the value.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_LANGUAGE_OPTIONS => "1) auto  2) 한국어  3) English  4) Português",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; settings unchanged.",
        SETTINGS_SAVED => "Language changed to:",
        REPORT_GAS_TITLE => "Recommended gas charge:",
        REPORT_GAS_BASE => "• Base charge: {grams}g",
        REPORT_GAS_ADDITIONAL => "• Additional ({meters}m): {grams}g",
        REPORT_GAS_TOTAL => "• TOTAL: {grams}g ({kg}kg)",
        REPORT_GAS_REFRIGERANT => "Gas: {refrigerant}",
        REPORT_DROP_TITLE => "Pressure drop result:",
        REPORT_DROP_VELOCITY => "• Fluid velocity: {velocity} m/s",
        REPORT_DROP_PER_METER => "• Loss per metre: {loss} bar/m",
        REPORT_DROP_TOTAL_BAR => "• Total loss: {bar} bar",
        REPORT_DROP_TOTAL_PSI => "• Total loss: {psi} PSI",
        REPORT_DROP_WARNING => "⚠️ High velocity! Consider a larger diameter.",
        REPORT_DROP_OK => "✓ Velocity OK",
        ERROR_INVALID_NUMBER => "Please fill in every field correctly ({field}: \"{input}\").",
        ERROR_UNSUPPORTED_CONVERSION => "Unsupported conversion: \"{selector}\".",
        ERROR_IO => "Error: input/output failed ({detail}).",
        ERROR_CONFIG => "Error: could not read or write config.toml ({detail}).",
        ERROR_JSON => "Error: could not write JSON output ({detail}).",
        FIELD_RATED_CAPACITY => "rated capacity",
        FIELD_LINE_LENGTH => "line length",
        FIELD_PIPE_DIAMETER => "pipe diameter",
        FIELD_PIPE_LENGTH => "pipe length",
        FIELD_FLOW_RATE => "flow rate",
        FIELD_VALUE => "value",
        GUI_TAB_GAS_CHARGE => "Gas Charge",
        GUI_TAB_PRESSURE_DROP => "Pressure Drop",
        GUI_TAB_CONVERSION => "Conversion",
        GUI_REFRIGERANT => "Refrigerant",
        GUI_CONVERSION_KIND => "Conversion type",
        GUI_CALCULATE => "Calculate",
        GUI_CONVERT => "Convert",
        GUI_SETTINGS => "Settings",
        GUI_LANGUAGE => "Language",
        GUI_LANGUAGE_AUTO => "System",
        GUI_PACK_DIR => "Language pack folder",
        GUI_BROWSE => "Browse…",
        GUI_SAVE => "Save settings",
        GUI_SAVED => "Saved.",
        _ => return None,
    })
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "HVAC 기술자 툴박스",
        MAIN_MENU_TITLE => "\n=== HVAC 기술자 툴박스 ===",
        MAIN_MENU_GAS_CHARGE => "1) 냉매 충전량",
        MAIN_MENU_PRESSURE_DROP => "2) 배관 압력손실",
        MAIN_MENU_UNIT_CONVERSION => "3) 단위 변환",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        GAS_CHARGE_HEADING => "\n-- 냉매 충전량 계산 --",
        PROMPT_CAPACITY => "정격 용량 [BTU] (예: 12000): ",
        PROMPT_LINE_LENGTH => "배관 길이 [m] (예: 10): ",
        PROMPT_REFRIGERANT => "냉매 (R410A/R22/R32, 엔터 = {default}): ",
        HELP_GAS_CHARGE => "도움말: 배관 처음 5 m는 기본 충전량에 포함됩니다.",
        PRESSURE_DROP_HEADING => "\n-- 배관 압력손실 --",
        PROMPT_DIAMETER => "배관 내경 [mm] (예: 15.88): ",
        PROMPT_PIPE_LENGTH => "길이 [m] (예: 20): ",
        PROMPT_FLOW => "유량 [m3/h] (예: 5): ",
        HELP_PRESSURE_DROP => "도움말: 마찰계수 0.02를 쓰는 단순 Darcy-Weisbach 식입니다.",
        UNIT_CONVERSION_HEADING => "\n-- 단위 변환 --",
        PROMPT_CONVERSION_KIND => "변환 번호 (엔터 = {default}): ",
        PROMPT_VALUE => "값 입력: ",
        HELP_UNIT_CONVERSION => "도움말: 변환 종류를 고른 뒤 값을 입력하세요.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_LANGUAGE_OPTIONS => "1) 자동  2) 한국어  3) English  4) Português",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어가 변경되었습니다:",
        REPORT_GAS_TITLE => "권장 냉매 충전량:",
        REPORT_GAS_BASE => "• 기본 충전량: {grams}g",
        REPORT_GAS_ADDITIONAL => "• 추가 ({meters}m): {grams}g",
        REPORT_GAS_TOTAL => "• 합계: {grams}g ({kg}kg)",
        REPORT_GAS_REFRIGERANT => "냉매: {refrigerant}",
        REPORT_DROP_TITLE => "압력손실 결과:",
        REPORT_DROP_VELOCITY => "• 유속: {velocity} m/s",
        REPORT_DROP_PER_METER => "• m당 손실: {loss} bar/m",
        REPORT_DROP_TOTAL_BAR => "• 전체 손실: {bar} bar",
        REPORT_DROP_TOTAL_PSI => "• 전체 손실: {psi} PSI",
        REPORT_DROP_WARNING => "⚠️ 유속이 높습니다! 배관 지름을 키우는 것을 검토하세요.",
        REPORT_DROP_OK => "✓ 유속 적정",
        ERROR_INVALID_NUMBER => "모든 항목을 올바르게 입력하세요 ({field}: \"{input}\").",
        ERROR_UNSUPPORTED_CONVERSION => "지원하지 않는 변환입니다: \"{selector}\".",
        ERROR_IO => "오류: 입출력에 실패했습니다 ({detail}).",
        ERROR_CONFIG => "오류: config.toml을 읽거나 쓸 수 없습니다 ({detail}).",
        ERROR_JSON => "오류: JSON 출력에 실패했습니다 ({detail}).",
        FIELD_RATED_CAPACITY => "정격 용량",
        FIELD_LINE_LENGTH => "배관 길이",
        FIELD_PIPE_DIAMETER => "배관 내경",
        FIELD_PIPE_LENGTH => "배관 길이",
        FIELD_FLOW_RATE => "유량",
        FIELD_VALUE => "값",
        GUI_TAB_GAS_CHARGE => "냉매 충전량",
        GUI_TAB_PRESSURE_DROP => "배관 압력손실",
        GUI_TAB_CONVERSION => "단위 변환",
        GUI_REFRIGERANT => "냉매",
        GUI_CONVERSION_KIND => "변환 종류",
        GUI_CALCULATE => "계산",
        GUI_CONVERT => "변환",
        GUI_SETTINGS => "설정",
        GUI_LANGUAGE => "언어",
        GUI_LANGUAGE_AUTO => "시스템",
        GUI_PACK_DIR => "언어팩 폴더",
        GUI_BROWSE => "찾아보기…",
        GUI_SAVE => "설정 저장",
        GUI_SAVED => "저장되었습니다.",
        _ => return None,
    })
}

fn pt(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Erro",
        APP_EXIT => "Encerrando o aplicativo.",
        APP_TITLE => "Caixa de Ferramentas do Técnico",
        MAIN_MENU_TITLE => "\n=== Calculadora Técnica ===",
        MAIN_MENU_GAS_CHARGE => "1) Carga de Gás",
        MAIN_MENU_PRESSURE_DROP => "2) Perda de Carga",
        MAIN_MENU_UNIT_CONVERSION => "3) Conversão",
        MAIN_MENU_SETTINGS => "4) Configurações",
        MAIN_MENU_EXIT => "0) Sair",
        PROMPT_MENU_SELECT => "Escolha: ",
        INVALID_SELECTION_RETRY => "Opção inválida. Tente novamente.",
        GAS_CHARGE_HEADING => "\n-- Cálculo de Carga de Gás Refrigerante --",
        PROMPT_CAPACITY => "Potência [BTUs] (Ex: 12000): ",
        PROMPT_LINE_LENGTH => "Comprimento da tubulação [m] (Ex: 10): ",
        PROMPT_REFRIGERANT => "Tipo de gás (R410A/R22/R32, enter = {default}): ",
        HELP_GAS_CHARGE => "Ajuda: os primeiros 5 m de tubulação já estão incluídos na carga base.",
        PRESSURE_DROP_HEADING => "\n-- Cálculo de Perda de Carga em Tubulações --",
        PROMPT_DIAMETER => "Diâmetro do tubo [mm] (Ex: 15.88): ",
        PROMPT_PIPE_LENGTH => "Comprimento [m] (Ex: 20): ",
        PROMPT_FLOW => "Vazão [m³/h] (Ex: 5): ",
        HELP_PRESSURE_DROP => "Ajuda: Darcy-Weisbach simplificado com fator de atrito 0,02.",
        UNIT_CONVERSION_HEADING => "\n-- Conversão de Unidades --",
        PROMPT_CONVERSION_KIND => "Tipo de conversão (enter = {default}): ",
        PROMPT_VALUE => "Valor: ",
        HELP_UNIT_CONVERSION => "Ajuda: escolha a conversão e depois digite o valor.",
        SETTINGS_HEADING => "\n-- Configurações --",
        SETTINGS_CURRENT_LANGUAGE => "Idioma atual:",
        SETTINGS_LANGUAGE_OPTIONS => "1) automático  2) 한국어  3) English  4) Português",
        SETTINGS_PROMPT_CHANGE => "Digite o número para alterar (enter para cancelar): ",
        SETTINGS_INVALID => "Opção inválida; configurações mantidas.",
        SETTINGS_SAVED => "Idioma alterado para:",
        REPORT_GAS_TITLE => "Carga de Gás Recomendada:",
        REPORT_GAS_BASE => "• Carga Base: {grams}g",
        REPORT_GAS_ADDITIONAL => "• Adicional ({meters}m): {grams}g",
        REPORT_GAS_TOTAL => "• TOTAL: {grams}g ({kg}kg)",
        REPORT_GAS_REFRIGERANT => "Gás: {refrigerant}",
        REPORT_DROP_TITLE => "Resultado da Perda de Carga:",
        REPORT_DROP_VELOCITY => "• Velocidade do fluido: {velocity} m/s",
        REPORT_DROP_PER_METER => "• Perda por metro: {loss} bar/m",
        REPORT_DROP_TOTAL_BAR => "• Perda Total: {bar} bar",
        REPORT_DROP_TOTAL_PSI => "• Perda Total: {psi} PSI",
        REPORT_DROP_WARNING => "⚠️ Velocidade alta! Considere aumentar o diâmetro.",
        REPORT_DROP_OK => "✓ Velocidade adequada",
        ERROR_INVALID_NUMBER => "Por favor, preencha todos os campos corretamente ({field}: \"{input}\").",
        ERROR_UNSUPPORTED_CONVERSION => "Conversão não suportada: \"{selector}\".",
        ERROR_IO => "Erro: falha de entrada/saída ({detail}).",
        ERROR_CONFIG => "Erro: não foi possível ler ou gravar config.toml ({detail}).",
        ERROR_JSON => "Erro: não foi possível gerar a saída JSON ({detail}).",
        FIELD_RATED_CAPACITY => "potência",
        FIELD_LINE_LENGTH => "comprimento da tubulação",
        FIELD_PIPE_DIAMETER => "diâmetro do tubo",
        FIELD_PIPE_LENGTH => "comprimento",
        FIELD_FLOW_RATE => "vazão",
        FIELD_VALUE => "valor",
        GUI_TAB_GAS_CHARGE => "Carga de Gás",
        GUI_TAB_PRESSURE_DROP => "Perda de Carga",
        GUI_TAB_CONVERSION => "Conversão",
        GUI_REFRIGERANT => "Tipo de Gás",
        GUI_CONVERSION_KIND => "Tipo de Conversão",
        GUI_CALCULATE => "Calcular",
        GUI_CONVERT => "Converter",
        GUI_SETTINGS => "Configurações",
        GUI_LANGUAGE => "Idioma",
        GUI_LANGUAGE_AUTO => "Sistema",
        GUI_PACK_DIR => "Pasta do pacote de idioma",
        GUI_BROWSE => "Procurar…",
        GUI_SAVE => "Salvar",
        GUI_SAVED => "Salvo.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_report_missing_translation() {
        let tr = Translator::new("pt-BR");
        assert_eq!(tr.language(), Language::Pt);
        assert_eq!(tr.t("no.such.key"), "[missing translation]");
    }

    #[test]
    fn every_builtin_language_covers_every_key() {
        for (code, catalogue) in [
            ("en", en as fn(&str) -> Option<&'static str>),
            ("ko", ko),
            ("pt", pt),
        ] {
            for key in keys::ALL {
                assert!(catalogue(key).is_some(), "{code} lacks {key}");
            }
        }
    }

    #[test]
    fn portuguese_pack_overrides_builtin_strings() {
        let dir = std::env::temp_dir().join(format!("hvac_toolbox_pt_pack_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("pt.toml"), "[general]\napp_exit = \"Tchau\"\n").unwrap();
        let tr = Translator::new_with_pack("pt", dir.to_str());
        assert_eq!(tr.t(keys::APP_EXIT), "Tchau");
        assert_eq!(tr.t(keys::GUI_SAVE), "Salvar");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn fills_placeholders() {
        let tr = Translator::new("en");
        let line = tr.tf(
            keys::REPORT_GAS_TOTAL,
            &[("grams", "1060".into()), ("kg", "1.06".into())],
        );
        assert_eq!(line, "• TOTAL: 1060g (1.06kg)");
    }

    #[test]
    fn normalizes_language_codes() {
        assert_eq!(resolve_language("ko-KR", None), "ko");
        assert_eq!(resolve_language("auto", Some("pt_BR")), "pt");
        assert_eq!(normalize_lang("fr"), None);
        assert_eq!(normalize_locale_string("pt_BR.UTF-8"), Some("pt".into()));
    }

    #[test]
    fn nested_pack_tables_flatten_to_dotted_keys() {
        let map = parse_toml_to_map("[report.gas]\ntitle = \"Carga:\"\n").unwrap();
        assert_eq!(map.get("report.gas.title").map(String::as_str), Some("Carga:"));
    }

    #[test]
    fn pack_overrides_builtin_strings() {
        let dir = std::env::temp_dir().join(format!("hvac_toolbox_pack_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("en.toml"), "[general]\napp_exit = \"Bye\"\n").unwrap();
        let tr = Translator::new_with_pack("en-us", dir.to_str());
        assert_eq!(tr.t(keys::APP_EXIT), "Bye");
        assert_eq!(tr.t(keys::GUI_SAVE), "Save settings");
        fs::remove_dir_all(&dir).unwrap();
    }
}
