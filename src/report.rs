//! 계산 결과를 화면 표시용 문장으로 바꾼다. CLI와 GUI가 함께 사용한다.
//!
//! 소수 자릿수는 현장에서 쓰던 계산표와 동일하게 맞춘다.

use crate::app::AppError;
use crate::config::ConfigError;
use crate::conversion::{ConversionKind, ConversionResult};
use crate::i18n::{keys, Translator};
use crate::piping::PressureDropResult;
use crate::refrigerant::GasChargeResult;
use crate::validation::ValidationError;

/// 고정 소수점 표기. 정확히 중간인 값은 올림한다 (`2.5` → `3`, `5.25` → `5.3`).
///
/// f64의 십진 전개는 소수점 아래 1074자리 안에서 끝나므로 그 길이로 출력한 문자열이 정확한 값이다.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let exact = format!("{:.1074}", value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(digits))
        .collect();
    if frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }
    let int_len = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(kept[..int_len].iter().map(|b| char::from(*b)));
    if digits > 0 {
        out.push('.');
        out.extend(kept[int_len..].iter().map(|b| char::from(*b)));
    }
    out
}

/// 냉매 충전량 결과 문장.
pub fn gas_charge_lines(tr: &Translator, res: &GasChargeResult) -> Vec<String> {
    vec![
        tr.t(keys::REPORT_GAS_TITLE).into_owned(),
        tr.tf(keys::REPORT_GAS_BASE, &[("grams", to_fixed(res.base_charge_g, 0))]),
        tr.tf(
            keys::REPORT_GAS_ADDITIONAL,
            &[
                ("meters", to_fixed(res.billable_length_m, 1)),
                ("grams", to_fixed(res.additional_charge_g, 0)),
            ],
        ),
        tr.tf(
            keys::REPORT_GAS_TOTAL,
            &[
                ("grams", to_fixed(res.total_charge_g, 0)),
                ("kg", to_fixed(res.total_charge_kg, 2)),
            ],
        ),
        tr.tf(
            keys::REPORT_GAS_REFRIGERANT,
            &[("refrigerant", res.refrigerant.label().to_string())],
        ),
    ]
}

/// 압력손실 결과 문장. 마지막 줄은 유속 경고 또는 적정 표시.
pub fn pressure_drop_lines(tr: &Translator, res: &PressureDropResult) -> Vec<String> {
    let verdict = if res.velocity_warning {
        keys::REPORT_DROP_WARNING
    } else {
        keys::REPORT_DROP_OK
    };
    vec![
        tr.t(keys::REPORT_DROP_TITLE).into_owned(),
        tr.tf(
            keys::REPORT_DROP_VELOCITY,
            &[("velocity", to_fixed(res.velocity_m_per_s, 2))],
        ),
        tr.tf(
            keys::REPORT_DROP_PER_METER,
            &[("loss", to_fixed(res.loss_per_meter_bar, 4))],
        ),
        tr.tf(
            keys::REPORT_DROP_TOTAL_BAR,
            &[("bar", to_fixed(res.total_loss_bar, 3))],
        ),
        tr.tf(
            keys::REPORT_DROP_TOTAL_PSI,
            &[("psi", to_fixed(res.total_loss_psi, 2))],
        ),
        tr.t(verdict).into_owned(),
    ]
}

/// 변환 종류별 결과 소수 자릿수.
pub fn conversion_precision(kind: ConversionKind) -> usize {
    match kind {
        ConversionKind::PsiToBar => 4,
        ConversionKind::BarToPsi
        | ConversionKind::BtuPerHourToWatts
        | ConversionKind::WattsToBtuPerHour => 2,
        ConversionKind::CelsiusToFahrenheit | ConversionKind::FahrenheitToCelsius => 1,
    }
}

/// `100°C = 212.0°F`, `14.5038 PSI = 1.0000 Bar` 형식의 한 줄.
pub fn conversion_line(res: &ConversionResult) -> String {
    let precision = conversion_precision(res.kind);
    format!(
        "{} = {}",
        with_unit(&res.input_value.to_string(), res.source_unit),
        with_unit(&to_fixed(res.converted_value, precision), res.target_unit)
    )
}

fn with_unit(value: &str, unit: crate::units::Unit) -> String {
    if unit.is_temperature() {
        format!("{value}{unit}")
    } else {
        format!("{value} {unit}")
    }
}

/// 검증 오류를 번역된 메시지로 바꾼다.
pub fn validation_message(tr: &Translator, err: &ValidationError) -> String {
    match err {
        ValidationError::InvalidNumber { field, input } => {
            let field_label = tr.t(&format!("field.{field}")).into_owned();
            tr.tf(
                keys::ERROR_INVALID_NUMBER,
                &[("field", field_label), ("input", input.clone())],
            )
        }
        ValidationError::UnsupportedConversion(selector) => tr.tf(
            keys::ERROR_UNSUPPORTED_CONVERSION,
            &[("selector", selector.clone())],
        ),
    }
}

/// 설정 파일 오류 메시지. 세부 내용은 원인 오류의 문장을 그대로 쓴다.
pub fn config_error_message(tr: &Translator, err: &ConfigError) -> String {
    let detail = match err {
        ConfigError::Io(e) => e.to_string(),
        ConfigError::Deserialize(e) => e.to_string(),
        ConfigError::Serialize(e) => e.to_string(),
    };
    tr.tf(keys::ERROR_CONFIG, &[("detail", detail)])
}

/// 실행 오류를 현재 언어의 한 줄 메시지로 바꾼다.
pub fn app_error_message(tr: &Translator, err: &AppError) -> String {
    match err {
        AppError::Io(e) => tr.tf(keys::ERROR_IO, &[("detail", e.to_string())]),
        AppError::Config(e) => config_error_message(tr, e),
        AppError::Validation(e) => validation_message(tr, e),
        AppError::Json(e) => tr.tf(keys::ERROR_JSON, &[("detail", e.to_string())]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::{convert_unit, ConversionInput};
    use crate::piping::{estimate_pressure_drop, PressureDropInput};
    use crate::refrigerant::{estimate_gas_charge, GasChargeInput, RefrigerantType};

    #[test]
    fn gas_charge_report_matches_reference_layout() {
        let tr = Translator::new("pt");
        let res = estimate_gas_charge(&GasChargeInput {
            rated_capacity_btu: 12_000.0,
            line_length_m: 10.0,
            refrigerant: RefrigerantType::R410A,
        })
        .unwrap();
        assert_eq!(
            gas_charge_lines(&tr, &res),
            vec![
                "Carga de Gás Recomendada:",
                "• Carga Base: 960g",
                "• Adicional (5.0m): 100g",
                "• TOTAL: 1060g (1.06kg)",
                "Gás: R410A",
            ]
        );
    }

    #[test]
    fn to_fixed_rounds_exact_halves_up() {
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(962.5, 0), "963");
        assert_eq!(to_fixed(5.25, 1), "5.3");
        assert_eq!(to_fixed(0.125, 1), "0.1");
        assert_eq!(to_fixed(9.995, 2), "9.99");
        assert_eq!(to_fixed(99.96, 1), "100.0");
        assert_eq!(to_fixed(1.06, 2), "1.06");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(7.0, 3), "7.000");
    }

    #[test]
    fn gas_charge_report_rounds_halves_like_the_field_sheet() {
        let tr = Translator::new("pt");
        let lines = |length: f64| {
            let res = estimate_gas_charge(&GasChargeInput {
                rated_capacity_btu: 12_000.0,
                line_length_m: length,
                refrigerant: RefrigerantType::R410A,
            })
            .unwrap();
            gas_charge_lines(&tr, &res)
        };
        let short = lines(5.125);
        assert_eq!(short[2], "• Adicional (0.1m): 3g");
        assert!(short[3].starts_with("• TOTAL: 963g"), "{}", short[3]);
        let long = lines(10.25);
        assert_eq!(long[2], "• Adicional (5.3m): 105g");
    }

    #[test]
    fn pressure_drop_report_ends_with_verdict() {
        let tr = Translator::new("en");
        let res = estimate_pressure_drop(&PressureDropInput {
            pipe_diameter_mm: 15.88,
            pipe_length_m: 20.0,
            flow_rate_m3_per_h: 5.0,
        })
        .unwrap();
        let lines = pressure_drop_lines(&tr, &res);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines.last().unwrap(), "⚠️ High velocity! Consider a larger diameter.");
    }

    #[test]
    fn conversion_lines_follow_kind_precision() {
        let line = |value: f64, kind| {
            conversion_line(&convert_unit(&ConversionInput { value, kind }).unwrap())
        };
        assert_eq!(line(100.0, ConversionKind::CelsiusToFahrenheit), "100°C = 212.0°F");
        assert_eq!(line(14.5038, ConversionKind::PsiToBar), "14.5038 PSI = 1.0000 Bar");
        assert_eq!(line(2.0, ConversionKind::BarToPsi), "2 Bar = 29.01 PSI");
        assert_eq!(line(1000.0, ConversionKind::BtuPerHourToWatts), "1000 BTU/h = 293.07 Watts");
    }

    #[test]
    fn app_errors_are_reported_once_in_the_session_language() {
        let tr = Translator::new("pt");
        let err = AppError::from(ValidationError::InvalidNumber {
            field: "rated_capacity_btu",
            input: "abc".into(),
        });
        let msg = app_error_message(&tr, &err);
        assert_eq!(
            msg,
            "Por favor, preencha todos os campos corretamente (potência: \"abc\")."
        );

        let tr = Translator::new("en");
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let msg = app_error_message(&tr, &AppError::from(ConfigError::from(io)));
        assert_eq!(msg, "Error: could not read or write config.toml (denied).");
        assert!(!msg.contains("오류"));
    }

    #[test]
    fn validation_messages_name_the_field() {
        let tr = Translator::new("en");
        let err = ValidationError::InvalidNumber {
            field: "pipe_diameter_mm",
            input: "abc".into(),
        };
        assert_eq!(
            validation_message(&tr, &err),
            "Please fill in every field correctly (pipe diameter: \"abc\")."
        );
        let err = ValidationError::UnsupportedConversion("psi-kpa".into());
        assert_eq!(validation_message(&tr, &err), "Unsupported conversion: \"psi-kpa\".");
    }
}
