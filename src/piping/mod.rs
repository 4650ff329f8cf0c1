//! 냉매 배관 압력손실 계산 모듈.

pub mod pressure_drop;

pub use pressure_drop::{
    estimate_pressure_drop, PressureDropInput, PressureDropResult, FRICTION_FACTOR,
    GRAVITY_M_PER_S2, PSI_PER_BAR, VELOCITY_WARNING_M_PER_S,
};
