//! 변환기에서 다루는 단위 정의.

use serde::{Deserialize, Serialize};

/// 변환기가 지원하는 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "PSI")]
    Psi,
    #[serde(rename = "Bar")]
    Bar,
    #[serde(rename = "BTU/h")]
    BtuPerHour,
    #[serde(rename = "Watts")]
    Watt,
    #[serde(rename = "°C")]
    Celsius,
    #[serde(rename = "°F")]
    Fahrenheit,
}

impl Unit {
    /// 화면에 표시하는 단위 기호.
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Psi => "PSI",
            Unit::Bar => "Bar",
            Unit::BtuPerHour => "BTU/h",
            Unit::Watt => "Watts",
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
        }
    }

    /// 온도 단위는 값과 기호를 붙여 쓴다 (`100°C`).
    pub fn is_temperature(&self) -> bool {
        matches!(self, Unit::Celsius | Unit::Fahrenheit)
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}
