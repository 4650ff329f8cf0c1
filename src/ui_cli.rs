use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::app::AppError;
use crate::config::Config;
use crate::conversion::{convert_unit, ConversionInput, ConversionKind};
use crate::i18n::{self, keys, Translator};
use crate::piping::{estimate_pressure_drop, PressureDropInput};
use crate::refrigerant::{estimate_gas_charge, GasChargeInput};
use crate::report;
use crate::validation::ValidationError;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    GasCharge,
    PressureDrop,
    UnitConversion,
    Settings,
    Exit,
}

/// 대화형 입출력을 감싼다. 테스트에서는 메모리 버퍼를 연결한다.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn println(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝나면 None.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn read_field(&mut self, prompt: &str) -> Result<String, AppError> {
        Ok(self.read_line(prompt)?.unwrap_or_default())
    }

    /// 메인 메뉴를 표시하고 선택값을 반환한다.
    pub fn main_menu(&mut self, tr: &Translator) -> Result<MenuChoice, AppError> {
        for key in [
            keys::MAIN_MENU_TITLE,
            keys::MAIN_MENU_GAS_CHARGE,
            keys::MAIN_MENU_PRESSURE_DROP,
            keys::MAIN_MENU_UNIT_CONVERSION,
            keys::MAIN_MENU_SETTINGS,
            keys::MAIN_MENU_EXIT,
        ] {
            self.println(&tr.t(key))?;
        }
        loop {
            let Some(sel) = self.read_line(&tr.t(keys::PROMPT_MENU_SELECT))? else {
                return Ok(MenuChoice::Exit);
            };
            match sel.trim() {
                "1" => return Ok(MenuChoice::GasCharge),
                "2" => return Ok(MenuChoice::PressureDrop),
                "3" => return Ok(MenuChoice::UnitConversion),
                "4" => return Ok(MenuChoice::Settings),
                "0" => return Ok(MenuChoice::Exit),
                _ => self.println(&tr.t(keys::INVALID_SELECTION_RETRY))?,
            }
        }
    }

    /// 냉매 충전량 메뉴를 처리한다.
    pub fn handle_gas_charge(&mut self, tr: &Translator, cfg: &Config) -> Result<(), AppError> {
        self.println(&tr.t(keys::GAS_CHARGE_HEADING))?;
        self.println(&tr.t(keys::HELP_GAS_CHARGE))?;
        let capacity = self.read_field(&tr.t(keys::PROMPT_CAPACITY))?;
        let length = self.read_field(&tr.t(keys::PROMPT_LINE_LENGTH))?;
        let default_label = cfg.default_refrigerant.label().to_string();
        let refrigerant = self.read_field(&tr.tf(
            keys::PROMPT_REFRIGERANT,
            &[("default", default_label.clone())],
        ))?;
        let refrigerant = if refrigerant.trim().is_empty() {
            default_label
        } else {
            refrigerant
        };
        let outcome = GasChargeInput::parse(&capacity, &length, &refrigerant)
            .and_then(|input| estimate_gas_charge(&input))
            .map(|res| report::gas_charge_lines(tr, &res));
        self.print_outcome(tr, outcome)
    }

    /// 배관 압력손실 메뉴를 처리한다.
    pub fn handle_pressure_drop(&mut self, tr: &Translator) -> Result<(), AppError> {
        self.println(&tr.t(keys::PRESSURE_DROP_HEADING))?;
        self.println(&tr.t(keys::HELP_PRESSURE_DROP))?;
        let diameter = self.read_field(&tr.t(keys::PROMPT_DIAMETER))?;
        let length = self.read_field(&tr.t(keys::PROMPT_PIPE_LENGTH))?;
        let flow = self.read_field(&tr.t(keys::PROMPT_FLOW))?;
        let outcome = PressureDropInput::parse(&diameter, &length, &flow)
            .and_then(|input| estimate_pressure_drop(&input))
            .map(|res| report::pressure_drop_lines(tr, &res));
        self.print_outcome(tr, outcome)
    }

    /// 단위 변환 메뉴를 처리한다.
    pub fn handle_unit_conversion(
        &mut self,
        tr: &Translator,
        cfg: &Config,
    ) -> Result<(), AppError> {
        self.println(&tr.t(keys::UNIT_CONVERSION_HEADING))?;
        self.println(&tr.t(keys::HELP_UNIT_CONVERSION))?;
        for (i, kind) in ConversionKind::ALL.iter().enumerate() {
            self.println(&format!("{}) {kind}", i + 1))?;
        }
        let sel = self.read_field(&tr.tf(
            keys::PROMPT_CONVERSION_KIND,
            &[("default", cfg.default_conversion.to_string())],
        ))?;
        let selector = match map_conversion(sel.trim()) {
            Some(kind) => kind.selector().to_string(),
            None if sel.trim().is_empty() => cfg.default_conversion.selector().to_string(),
            // 번호가 아니면 선택자 문자열(psi-bar 등)로 해석한다
            None => sel.trim().to_string(),
        };
        let value = self.read_field(&tr.t(keys::PROMPT_VALUE))?;
        let outcome = ConversionInput::parse(&value, &selector)
            .and_then(|input| convert_unit(&input))
            .map(|res| vec![report::conversion_line(&res)]);
        self.print_outcome(tr, outcome)
    }

    /// 설정 메뉴를 처리한다. 언어가 바뀌면 true.
    pub fn handle_settings(&mut self, tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
        self.println(&tr.t(keys::SETTINGS_HEADING))?;
        self.println(&format!(
            "{} {} ({})",
            tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
            cfg.language,
            tr.language_code()
        ))?;
        self.println(&tr.t(keys::SETTINGS_LANGUAGE_OPTIONS))?;
        let sel = self.read_field(&tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
        let language = match sel.trim() {
            "" => return Ok(false),
            "1" => "auto",
            "2" => "ko",
            "3" => "en",
            "4" => "pt",
            _ => {
                self.println(&tr.t(keys::SETTINGS_INVALID))?;
                return Ok(false);
            }
        };
        cfg.language = language.to_string();
        let resolved = i18n::resolve_language(&cfg.language, None);
        let new_tr = Translator::new_with_pack(&resolved, cfg.language_pack_dir.as_deref());
        self.println(&format!("{} {}", new_tr.t(keys::SETTINGS_SAVED), cfg.language))?;
        Ok(true)
    }

    fn print_outcome(
        &mut self,
        tr: &Translator,
        outcome: Result<Vec<String>, ValidationError>,
    ) -> Result<(), AppError> {
        match outcome {
            Ok(lines) => {
                self.println("")?;
                for line in lines {
                    self.println(&line)?;
                }
            }
            Err(err) => {
                warn!(%err, "calculation input rejected");
                self.println(&format!(
                    "{}: {}",
                    tr.t(keys::ERROR_PREFIX),
                    report::validation_message(tr, &err)
                ))?;
            }
        }
        Ok(())
    }
}

fn map_conversion(sel: &str) -> Option<ConversionKind> {
    let n: usize = sel.parse().ok()?;
    ConversionKind::ALL.get(n.checked_sub(1)?).copied()
}
