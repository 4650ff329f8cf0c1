use hvac_toolbox::piping::{
    FRICTION_FACTOR, GRAVITY_M_PER_S2, PSI_PER_BAR, VELOCITY_WARNING_M_PER_S,
};
use hvac_toolbox::{estimate_pressure_drop, PressureDropInput, ValidationError};
use proptest::prelude::*;
use std::f64::consts::PI;

#[test]
fn copper_line_five_m3_per_h() {
    let input = PressureDropInput::parse("15.88", "20", "5").expect("parse");
    let res = estimate_pressure_drop(&input).expect("pressure drop");

    let d = 15.88 / 1000.0;
    let v = 5.0 * 4.0 / (PI * d * d);
    let per_m = FRICTION_FACTOR * v * v / (2.0 * GRAVITY_M_PER_S2 * d);
    assert!((res.velocity_m_per_s - v).abs() / v < 1e-12);
    assert!((res.loss_per_meter_bar - per_m).abs() / per_m < 1e-12);
    assert!((res.total_loss_bar - per_m * 20.0).abs() / (per_m * 20.0) < 1e-12);
    assert!(res.velocity_warning, "v={}", res.velocity_m_per_s);
}

#[test]
fn zero_diameter_is_rejected() {
    let input = PressureDropInput::parse("0", "20", "5").expect("parse");
    let err = estimate_pressure_drop(&input).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::InvalidNumber { field: "pipe_diameter_mm", .. }
    ));
}

#[test]
fn missing_flow_is_rejected() {
    let err = PressureDropInput::parse("15.88", "20", "  ").unwrap_err();
    assert!(matches!(
        err,
        ValidationError::InvalidNumber { field: "flow_rate_m3_per_h", .. }
    ));
}

proptest! {
    #[test]
    fn psi_tracks_bar_and_warning_tracks_velocity(
        diameter in 5.0f64..2000.0,
        length in 0.1f64..500.0,
        flow in 0.001f64..50.0,
    ) {
        let res = estimate_pressure_drop(&PressureDropInput {
            pipe_diameter_mm: diameter,
            pipe_length_m: length,
            flow_rate_m3_per_h: flow,
        })
        .unwrap();
        prop_assert_eq!(res.total_loss_psi, res.total_loss_bar * PSI_PER_BAR);
        prop_assert_eq!(res.velocity_warning, res.velocity_m_per_s > VELOCITY_WARNING_M_PER_S);
        prop_assert!(res.total_loss_bar > 0.0);
    }
}
