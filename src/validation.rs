//! 계산 입력 검증. 모든 계산기가 공유하는 단일 오류 타입을 정의한다.

use thiserror::Error;

/// 계산 입력이 잘못되었을 때 반환되는 오류.
///
/// 엔진은 사용자용 문장을 만들지 않는다. 표시 계층이 필드명과 원본 입력을
/// 이용해 번역된 메시지를 구성한다 (`report::validation_message`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 숫자로 해석할 수 없거나, 유한하지 않거나, 허용 범위를 벗어난 값
    #[error("invalid number for {field}: {input:?}")]
    InvalidNumber { field: &'static str, input: String },
    /// 알 수 없는 변환 선택자
    #[error("unsupported conversion: {0:?}")]
    UnsupportedConversion(String),
}

impl ValidationError {
    pub(crate) fn invalid(field: &'static str, value: f64) -> Self {
        ValidationError::InvalidNumber {
            field,
            input: value.to_string(),
        }
    }
}

/// 사용자가 입력한 문자열을 유한한 실수로 해석한다.
///
/// 앞뒤 공백은 무시한다. 빈 문자열, 숫자가 아닌 문자열, `NaN`/`inf`는 모두 거부한다.
pub fn parse_number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::InvalidNumber {
            field,
            input: raw.to_string(),
        }),
    }
}

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::invalid(field, value))
    }
}

/// 계산 결과가 유한하지 않으면 원인이 된 입력 필드를 오류로 돌려준다.
pub(crate) fn finite_output(
    field: &'static str,
    input: f64,
    output: f64,
) -> Result<f64, ValidationError> {
    if output.is_finite() {
        Ok(output)
    } else {
        Err(ValidationError::invalid(field, input))
    }
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let v = require_finite(field, value)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(ValidationError::invalid(field, v))
    }
}

pub(crate) fn require_non_negative(
    field: &'static str,
    value: f64,
) -> Result<f64, ValidationError> {
    let v = require_finite(field, value)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(ValidationError::invalid(field, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_numbers() {
        assert_eq!(parse_number("x", " 12000 ").unwrap(), 12000.0);
        assert_eq!(parse_number("x", "15.88").unwrap(), 15.88);
        assert_eq!(parse_number("x", "-3e2").unwrap(), -300.0);
    }

    #[test]
    fn rejects_empty_and_garbage() {
        for raw in ["", "   ", "abc", "12abc", "1,5", "NaN", "inf", "-infinity"] {
            let err = parse_number("capacity", raw).unwrap_err();
            assert_eq!(
                err,
                ValidationError::InvalidNumber {
                    field: "capacity",
                    input: raw.to_string()
                }
            );
        }
    }

    #[test]
    fn range_helpers() {
        assert!(require_positive("d", 0.0).is_err());
        assert!(require_positive("d", f64::NAN).is_err());
        assert!(require_non_negative("l", 0.0).is_ok());
        assert!(require_non_negative("l", -0.1).is_err());
        assert!(require_finite("v", f64::INFINITY).is_err());
    }
}
