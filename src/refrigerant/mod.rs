//! 냉매 관련 계산 모듈. 현재는 배관 길이 기반 충전량 추정만 제공한다.

pub mod gas_charge;

pub use gas_charge::{
    estimate_gas_charge, ChargeCoefficients, GasChargeInput, GasChargeResult, RefrigerantType,
    INCLUDED_LENGTH_M,
};
