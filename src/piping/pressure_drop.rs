use serde::Serialize;
use tracing::debug;

use crate::validation::{finite_output, parse_number, require_positive, ValidationError};

/// 고정 마찰계수
pub const FRICTION_FACTOR: f64 = 0.02;
/// 중력가속도 [m/s²]
pub const GRAVITY_M_PER_S2: f64 = 9.81;
/// 1 bar당 psi
pub const PSI_PER_BAR: f64 = 14.5038;
/// 이 유속을 넘으면 배관 확대를 권고한다 [m/s]
pub const VELOCITY_WARNING_M_PER_S: f64 = 5.0;

/// 배관 압력손실 계산 입력.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureDropInput {
    /// 배관 내경 [mm]
    pub pipe_diameter_mm: f64,
    /// 배관 길이 [m]
    pub pipe_length_m: f64,
    /// 체적 유량 [m3/h]
    pub flow_rate_m3_per_h: f64,
}

impl PressureDropInput {
    /// 화면에서 입력된 문자열로 입력값을 구성한다.
    pub fn parse(
        pipe_diameter_mm: &str,
        pipe_length_m: &str,
        flow_rate_m3_per_h: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            pipe_diameter_mm: parse_number("pipe_diameter_mm", pipe_diameter_mm)?,
            pipe_length_m: parse_number("pipe_length_m", pipe_length_m)?,
            flow_rate_m3_per_h: parse_number("flow_rate_m3_per_h", flow_rate_m3_per_h)?,
        })
    }
}

/// 압력손실 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PressureDropResult {
    /// 유속 [m/s]
    pub velocity_m_per_s: f64,
    /// 단위 길이당 손실 [bar/m]
    pub loss_per_meter_bar: f64,
    /// 전체 손실 [bar]
    pub total_loss_bar: f64,
    /// 전체 손실 [psi]
    pub total_loss_psi: f64,
    /// 유속이 권고치를 초과하는지 여부
    pub velocity_warning: bool,
}

/// 고정 마찰계수를 쓰는 단순 Darcy-Weisbach 형태로 압력손실을 추정한다.
///
/// v = 4Q / (πd²), ΔP/L = f·v² / (2·g·d)
///
/// 유량은 [m3/h] 값이 초 단위 환산 없이 그대로 식에 들어간다.
pub fn estimate_pressure_drop(
    input: &PressureDropInput,
) -> Result<PressureDropResult, ValidationError> {
    let diameter_mm = require_positive("pipe_diameter_mm", input.pipe_diameter_mm)?;
    let length_m = require_positive("pipe_length_m", input.pipe_length_m)?;
    let flow = require_positive("flow_rate_m3_per_h", input.flow_rate_m3_per_h)?;

    // 넘침/언더플로는 mm 미만 내경이면 내경, 아니면 유량 탓으로 본다
    let (cause, cause_value) = if diameter_mm < 1.0 {
        ("pipe_diameter_mm", diameter_mm)
    } else {
        ("flow_rate_m3_per_h", flow)
    };

    let d = diameter_mm / 1000.0;
    let velocity = finite_output(
        cause,
        cause_value,
        (flow * 4.0) / (std::f64::consts::PI * d.powi(2)),
    )?;
    let loss_per_meter_bar = finite_output(
        cause,
        cause_value,
        FRICTION_FACTOR * (velocity * velocity) / (2.0 * GRAVITY_M_PER_S2 * d),
    )?;
    let total_loss_bar = finite_output("pipe_length_m", length_m, loss_per_meter_bar * length_m)?;
    let total_loss_psi = finite_output("pipe_length_m", length_m, total_loss_bar * PSI_PER_BAR)?;
    let velocity_warning = velocity > VELOCITY_WARNING_M_PER_S;

    debug!(
        velocity,
        total_loss_bar, velocity_warning, "pressure drop estimated"
    );

    Ok(PressureDropResult {
        velocity_m_per_s: velocity,
        loss_per_meter_bar,
        total_loss_bar,
        total_loss_psi,
        velocity_warning,
    })
}
