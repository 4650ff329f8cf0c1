//! 핵심 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 엔진을 사용한다.
//!
//! 계산기(`refrigerant`, `piping`, `conversion`)는 입력 레코드를 받아
//! 결과 레코드 또는 [`validation::ValidationError`]를 돌려주는 순수 함수다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod i18n;
pub mod piping;
pub mod refrigerant;
pub mod report;
pub mod ui_cli;
pub mod units;
pub mod validation;

pub use conversion::{convert_unit, ConversionInput, ConversionKind, ConversionResult};
pub use piping::{estimate_pressure_drop, PressureDropInput, PressureDropResult};
pub use refrigerant::{estimate_gas_charge, GasChargeInput, GasChargeResult, RefrigerantType};
pub use validation::ValidationError;

/// tracing 구독자를 초기화한다. RUST_LOG가 있으면 그 값을 우선한다.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    // 이미 초기화된 경우(테스트 등)는 무시한다
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
