use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::info;

use crate::config::{Config, ConfigError};
use crate::i18n::{self, keys, Translator};
use crate::ui_cli::{Console, MenuChoice};
use crate::validation::ValidationError;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("입력 오류: {0}")]
    Validation(#[from] ValidationError),
    #[error("JSON 출력 오류: {0}")]
    Json(#[from] serde_json::Error),
}

/// 설정과 언어팩 경로로 번역기를 만든다.
pub fn translator_for(config: &Config, cli_lang: &str) -> Translator {
    let resolved = i18n::resolve_language(cli_lang, Some(config.language.as_str()));
    Translator::new_with_pack(&resolved, config.language_pack_dir.as_deref())
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// `persist`가 false면 설정 변경을 파일에 쓰지 않는다.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &mut Config,
    tr: &mut Translator,
    persist: bool,
) -> Result<(), AppError> {
    loop {
        let choice = console.main_menu(tr)?;
        info!(?choice, "menu selected");
        match choice {
            MenuChoice::GasCharge => console.handle_gas_charge(tr, config)?,
            MenuChoice::PressureDrop => console.handle_pressure_drop(tr)?,
            MenuChoice::UnitConversion => console.handle_unit_conversion(tr, config)?,
            MenuChoice::Settings => {
                if console.handle_settings(tr, config)? {
                    *tr = translator_for(config, "auto");
                    if persist {
                        config.save()?;
                    }
                }
            }
            MenuChoice::Exit => {
                if persist {
                    config.save()?;
                }
                console.println(&tr.t(keys::APP_EXIT))?;
                break;
            }
        }
    }
    Ok(())
}
