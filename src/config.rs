use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::conversion::ConversionKind;
use crate::refrigerant::RefrigerantType;

/// 기본 설정 파일 이름.
pub const CONFIG_FILE: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/ko/en/pt)
    pub language: String,
    /// 사용자 언어팩 디렉터리 (`<dir>/<lang>.toml`)
    pub language_pack_dir: Option<String>,
    /// 충전량 계산기에서 처음 선택되는 냉매
    pub default_refrigerant: RefrigerantType,
    /// 변환기에서 처음 선택되는 변환
    pub default_conversion: ConversionKind,
    /// RUST_LOG가 없을 때 사용할 tracing 필터
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            default_refrigerant: RefrigerantType::R410A,
            default_conversion: ConversionKind::PsiToBar,
            log_filter: "info".to_string(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("설정 파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Deserialize(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 작업 디렉터리의 config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_create(Path::new(CONFIG_FILE))
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본값을 기록하고 반환한다.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_to(&cfg, path)?;
        info!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

fn save_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_to(self, &PathBuf::from(CONFIG_FILE))
    }
}
