use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::validation::{
    finite_output, parse_number, require_non_negative, require_positive, ValidationError,
};

/// 기본 충전량에 포함되는 배관 길이 [m]. 이 길이까지는 추가 충전이 없다.
pub const INCLUDED_LENGTH_M: f64 = 5.0;

/// 냉매 종류. 알 수 없는 라벨은 `Other`로 보존하고 기본 계수를 적용한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RefrigerantType {
    R410A,
    R22,
    R32,
    Other(String),
}

impl RefrigerantType {
    /// 선택 목록에 표시하는 기본 냉매들.
    pub const KNOWN: [RefrigerantType; 3] =
        [RefrigerantType::R410A, RefrigerantType::R22, RefrigerantType::R32];

    pub fn label(&self) -> &str {
        match self {
            RefrigerantType::R410A => "R410A",
            RefrigerantType::R22 => "R22",
            RefrigerantType::R32 => "R32",
            RefrigerantType::Other(label) => label,
        }
    }

    /// 냉매별 충전 계수. R410A/R22 외에는 모두 기본 행을 사용한다.
    pub fn coefficients(&self) -> ChargeCoefficients {
        match self {
            RefrigerantType::R410A => ChargeCoefficients {
                base_rate_g_per_btu: 0.08,
                additional_g_per_m: 20.0,
            },
            RefrigerantType::R22 => ChargeCoefficients {
                base_rate_g_per_btu: 0.06,
                additional_g_per_m: 15.0,
            },
            RefrigerantType::R32 | RefrigerantType::Other(_) => ChargeCoefficients {
                base_rate_g_per_btu: 0.09,
                additional_g_per_m: 25.0,
            },
        }
    }
}

impl Default for RefrigerantType {
    fn default() -> Self {
        RefrigerantType::R410A
    }
}

impl fmt::Display for RefrigerantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RefrigerantType {
    type Err = std::convert::Infallible;

    /// 대소문자, 공백, `-` 구분자를 무시한다 (`r-410a` → R410A).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        Ok(match normalized.as_str() {
            "R410A" => RefrigerantType::R410A,
            "R22" => RefrigerantType::R22,
            "R32" => RefrigerantType::R32,
            _ => RefrigerantType::Other(s.trim().to_string()),
        })
    }
}

impl From<String> for RefrigerantType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(r) => r,
            Err(never) => match never {},
        }
    }
}

impl From<RefrigerantType> for String {
    fn from(value: RefrigerantType) -> Self {
        value.label().to_string()
    }
}

/// 냉매별 충전 계수.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeCoefficients {
    /// 정격 용량 1 BTU당 기본 충전량 [g]
    pub base_rate_g_per_btu: f64,
    /// 포함 길이를 초과하는 배관 1 m당 추가 충전량 [g]
    pub additional_g_per_m: f64,
}

/// 냉매 충전량 계산 입력.
#[derive(Debug, Clone, PartialEq)]
pub struct GasChargeInput {
    /// 정격 용량 [BTU]
    pub rated_capacity_btu: f64,
    /// 냉매 배관 길이 [m]
    pub line_length_m: f64,
    pub refrigerant: RefrigerantType,
}

impl GasChargeInput {
    /// 화면에서 입력된 문자열로 입력값을 구성한다.
    pub fn parse(
        rated_capacity_btu: &str,
        line_length_m: &str,
        refrigerant: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            rated_capacity_btu: parse_number("rated_capacity_btu", rated_capacity_btu)?,
            line_length_m: parse_number("line_length_m", line_length_m)?,
            refrigerant: RefrigerantType::from(refrigerant.to_string()),
        })
    }
}

/// 냉매 충전량 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GasChargeResult {
    pub base_charge_g: f64,
    /// 추가 충전 대상 길이 [m]
    pub billable_length_m: f64,
    pub additional_charge_g: f64,
    pub total_charge_g: f64,
    pub total_charge_kg: f64,
    pub refrigerant: RefrigerantType,
}

/// 정격 용량과 배관 길이로 필요한 냉매 충전량을 추정한다.
///
/// - 기본 충전량 = 용량 × 냉매별 계수
/// - 추가 충전량 = max(0, 길이 − 5 m) × 냉매별 m당 충전량
pub fn estimate_gas_charge(input: &GasChargeInput) -> Result<GasChargeResult, ValidationError> {
    let capacity = require_positive("rated_capacity_btu", input.rated_capacity_btu)?;
    let length = require_non_negative("line_length_m", input.line_length_m)?;
    let coeff = input.refrigerant.coefficients();

    let base_charge_g = capacity * coeff.base_rate_g_per_btu;
    let billable_length_m = (length - INCLUDED_LENGTH_M).max(0.0);
    let additional_charge_g = finite_output(
        "line_length_m",
        length,
        billable_length_m * coeff.additional_g_per_m,
    )?;
    let total_charge_g =
        finite_output("line_length_m", length, base_charge_g + additional_charge_g)?;

    debug!(
        refrigerant = %input.refrigerant,
        base_charge_g,
        additional_charge_g,
        total_charge_g,
        "gas charge estimated"
    );

    Ok(GasChargeResult {
        base_charge_g,
        billable_length_m,
        additional_charge_g,
        total_charge_g,
        total_charge_kg: total_charge_g / 1000.0,
        refrigerant: input.refrigerant.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(capacity: f64, length: f64, refrigerant: RefrigerantType) -> GasChargeInput {
        GasChargeInput {
            rated_capacity_btu: capacity,
            line_length_m: length,
            refrigerant,
        }
    }

    #[test]
    fn r22_uses_its_own_row() {
        let res = estimate_gas_charge(&input(10_000.0, 7.0, RefrigerantType::R22)).unwrap();
        assert!((res.base_charge_g - 600.0).abs() < 1e-9);
        assert!((res.additional_charge_g - 30.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_refrigerant_falls_back_to_default_row() {
        let other: RefrigerantType = "R407C".parse().unwrap();
        assert_eq!(other, RefrigerantType::Other("R407C".into()));
        assert_eq!(other.coefficients(), RefrigerantType::R32.coefficients());
        let res = estimate_gas_charge(&input(1000.0, 6.0, other)).unwrap();
        assert!((res.base_charge_g - 90.0).abs() < 1e-9);
        assert!((res.additional_charge_g - 25.0).abs() < 1e-9);
        assert_eq!(res.refrigerant.label(), "R407C");
    }

    #[test]
    fn label_parsing_is_lenient() {
        assert_eq!("r410a".parse::<RefrigerantType>().unwrap(), RefrigerantType::R410A);
        assert_eq!("R-22".parse::<RefrigerantType>().unwrap(), RefrigerantType::R22);
        assert_eq!(" r32 ".parse::<RefrigerantType>().unwrap(), RefrigerantType::R32);
    }

    #[test]
    fn rejects_out_of_domain_values() {
        assert!(estimate_gas_charge(&input(0.0, 3.0, RefrigerantType::R410A)).is_err());
        assert!(estimate_gas_charge(&input(9000.0, -1.0, RefrigerantType::R410A)).is_err());
        assert!(estimate_gas_charge(&input(f64::NAN, 3.0, RefrigerantType::R410A)).is_err());
        assert!(estimate_gas_charge(&input(9000.0, f64::INFINITY, RefrigerantType::R22)).is_err());
    }

    #[test]
    fn overflowing_line_length_is_rejected() {
        let err = estimate_gas_charge(&input(12_000.0, 1e308, RefrigerantType::R32)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { field: "line_length_m", .. }));
    }

    #[test]
    fn parse_reports_failing_field() {
        let err = GasChargeInput::parse("12000", "", "R410A").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidNumber {
                field: "line_length_m",
                input: String::new()
            }
        );
    }

    #[test]
    fn serde_uses_plain_labels() {
        let json = serde_json::to_string(&RefrigerantType::R22).unwrap();
        assert_eq!(json, "\"R22\"");
        let back: RefrigerantType = serde_json::from_str("\"R1234yf\"").unwrap();
        assert_eq!(back, RefrigerantType::Other("R1234yf".into()));
    }
}
