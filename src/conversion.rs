use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::units::Unit;
use crate::validation::{finite_output, parse_number, require_finite, ValidationError};

const BAR_PER_PSI: f64 = 0.0689476;
const PSI_PER_BAR: f64 = 14.5038;
const WATT_PER_BTU_H: f64 = 0.293071;
const BTU_H_PER_WATT: f64 = 3.41214;

/// 지원하는 변환 종류. 선택자 문자열은 `psi-bar` 형식이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConversionKind {
    #[serde(rename = "psi-bar")]
    PsiToBar,
    #[serde(rename = "bar-psi")]
    BarToPsi,
    #[serde(rename = "btu-watts")]
    BtuPerHourToWatts,
    #[serde(rename = "watts-btu")]
    WattsToBtuPerHour,
    #[serde(rename = "celsius-fahrenheit")]
    CelsiusToFahrenheit,
    #[serde(rename = "fahrenheit-celsius")]
    FahrenheitToCelsius,
}

impl ConversionKind {
    pub const ALL: [ConversionKind; 6] = [
        ConversionKind::PsiToBar,
        ConversionKind::BarToPsi,
        ConversionKind::BtuPerHourToWatts,
        ConversionKind::WattsToBtuPerHour,
        ConversionKind::CelsiusToFahrenheit,
        ConversionKind::FahrenheitToCelsius,
    ];

    pub fn selector(&self) -> &'static str {
        match self {
            ConversionKind::PsiToBar => "psi-bar",
            ConversionKind::BarToPsi => "bar-psi",
            ConversionKind::BtuPerHourToWatts => "btu-watts",
            ConversionKind::WattsToBtuPerHour => "watts-btu",
            ConversionKind::CelsiusToFahrenheit => "celsius-fahrenheit",
            ConversionKind::FahrenheitToCelsius => "fahrenheit-celsius",
        }
    }

    pub fn source_unit(&self) -> Unit {
        match self {
            ConversionKind::PsiToBar => Unit::Psi,
            ConversionKind::BarToPsi => Unit::Bar,
            ConversionKind::BtuPerHourToWatts => Unit::BtuPerHour,
            ConversionKind::WattsToBtuPerHour => Unit::Watt,
            ConversionKind::CelsiusToFahrenheit => Unit::Celsius,
            ConversionKind::FahrenheitToCelsius => Unit::Fahrenheit,
        }
    }

    pub fn target_unit(&self) -> Unit {
        self.inverse().source_unit()
    }

    /// 반대 방향 변환.
    pub fn inverse(&self) -> ConversionKind {
        match self {
            ConversionKind::PsiToBar => ConversionKind::BarToPsi,
            ConversionKind::BarToPsi => ConversionKind::PsiToBar,
            ConversionKind::BtuPerHourToWatts => ConversionKind::WattsToBtuPerHour,
            ConversionKind::WattsToBtuPerHour => ConversionKind::BtuPerHourToWatts,
            ConversionKind::CelsiusToFahrenheit => ConversionKind::FahrenheitToCelsius,
            ConversionKind::FahrenheitToCelsius => ConversionKind::CelsiusToFahrenheit,
        }
    }

    fn apply(&self, value: f64) -> f64 {
        match self {
            ConversionKind::PsiToBar => value * BAR_PER_PSI,
            ConversionKind::BarToPsi => value * PSI_PER_BAR,
            ConversionKind::BtuPerHourToWatts => value * WATT_PER_BTU_H,
            ConversionKind::WattsToBtuPerHour => value * BTU_H_PER_WATT,
            ConversionKind::CelsiusToFahrenheit => value * 9.0 / 5.0 + 32.0,
            ConversionKind::FahrenheitToCelsius => (value - 32.0) * 5.0 / 9.0,
        }
    }
}

impl std::fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.source_unit(), self.target_unit())
    }
}

impl FromStr for ConversionKind {
    type Err = ValidationError;

    /// `psi-bar`, `psi→bar`, `psi_to_bar` 같은 표기를 모두 받는다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let normalized = lowered
            .replace("->", "-")
            .replace('→', "-")
            .replace("_to_", "-")
            .replace('_', "-");
        let kind = match normalized.as_str() {
            "psi-bar" => ConversionKind::PsiToBar,
            "bar-psi" => ConversionKind::BarToPsi,
            "btu-watts" | "btu/h-watts" | "btu-w" => ConversionKind::BtuPerHourToWatts,
            "watts-btu" | "watts-btu/h" | "w-btu" => ConversionKind::WattsToBtuPerHour,
            "celsius-fahrenheit" | "c-f" => ConversionKind::CelsiusToFahrenheit,
            "fahrenheit-celsius" | "f-c" => ConversionKind::FahrenheitToCelsius,
            _ => return Err(ValidationError::UnsupportedConversion(s.to_string())),
        };
        Ok(kind)
    }
}

/// 단위 변환 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionInput {
    pub value: f64,
    pub kind: ConversionKind,
}

impl ConversionInput {
    /// 화면에서 입력된 값과 선택자 문자열로 입력값을 구성한다.
    pub fn parse(value: &str, kind: &str) -> Result<Self, ValidationError> {
        let kind = kind.parse()?;
        Ok(Self {
            value: parse_number("value", value)?,
            kind,
        })
    }
}

/// 단위 변환 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConversionResult {
    pub input_value: f64,
    pub converted_value: f64,
    pub kind: ConversionKind,
    pub source_unit: Unit,
    pub target_unit: Unit,
}

/// 고정 변환표로 값을 환산한다.
pub fn convert_unit(input: &ConversionInput) -> Result<ConversionResult, ValidationError> {
    let value = require_finite("value", input.value)?;
    let converted_value = finite_output("value", value, input.kind.apply(value))?;
    debug!(kind = input.kind.selector(), value, converted_value, "unit converted");
    Ok(ConversionResult {
        input_value: value,
        converted_value,
        kind: input.kind,
        source_unit: input.kind.source_unit(),
        target_unit: input.kind.target_unit(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(value: f64, kind: ConversionKind) -> f64 {
        convert_unit(&ConversionInput { value, kind })
            .unwrap()
            .converted_value
    }

    #[test]
    fn fixed_table_values() {
        assert!((run(1.0, ConversionKind::BarToPsi) - 14.5038).abs() < 1e-12);
        assert!((run(1000.0, ConversionKind::BtuPerHourToWatts) - 293.071).abs() < 1e-9);
        assert!((run(100.0, ConversionKind::WattsToBtuPerHour) - 341.214).abs() < 1e-9);
        assert!((run(212.0, ConversionKind::FahrenheitToCelsius) - 100.0).abs() < 1e-12);
        assert!((run(-40.0, ConversionKind::CelsiusToFahrenheit) + 40.0).abs() < 1e-12);
    }

    #[test]
    fn selector_round_trip_and_aliases() {
        for kind in ConversionKind::ALL {
            assert_eq!(kind.selector().parse::<ConversionKind>().unwrap(), kind);
            assert_eq!(kind.inverse().inverse(), kind);
            assert_eq!(kind.target_unit(), kind.inverse().source_unit());
        }
        assert_eq!("PSI→Bar".parse::<ConversionKind>().unwrap(), ConversionKind::PsiToBar);
        assert_eq!("c_to_f".parse::<ConversionKind>().unwrap(), ConversionKind::CelsiusToFahrenheit);
    }

    #[test]
    fn unknown_selector_is_unsupported() {
        let err = "kelvin-rankine".parse::<ConversionKind>().unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedConversion("kelvin-rankine".into()));
        assert!(matches!(
            ConversionInput::parse("10", "psi-kpa"),
            Err(ValidationError::UnsupportedConversion(_))
        ));
    }

    #[test]
    fn non_finite_value_is_rejected() {
        let err = convert_unit(&ConversionInput {
            value: f64::NAN,
            kind: ConversionKind::PsiToBar,
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { field: "value", .. }));
    }

    #[test]
    fn overflowing_conversion_is_rejected() {
        let input = ConversionInput::parse("1e308", "bar-psi").unwrap();
        let err = convert_unit(&input).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidNumber {
                field: "value",
                input: 1e308_f64.to_string()
            }
        );
        assert!(convert_unit(&ConversionInput::parse("-1e308", "c-f").unwrap()).is_err());
    }

    #[test]
    fn display_uses_unit_symbols() {
        assert_eq!(ConversionKind::CelsiusToFahrenheit.to_string(), "°C → °F");
        assert_eq!(ConversionKind::BtuPerHourToWatts.to_string(), "BTU/h → Watts");
    }
}
