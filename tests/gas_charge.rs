use hvac_toolbox::{estimate_gas_charge, GasChargeInput, RefrigerantType, ValidationError};
use proptest::prelude::*;

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn residential_split_r410a() {
    let input = GasChargeInput::parse("12000", "10", "R410A").expect("parse");
    let res = estimate_gas_charge(&input).expect("gas charge");
    approx(res.base_charge_g, 960.0);
    approx(res.billable_length_m, 5.0);
    approx(res.additional_charge_g, 100.0);
    approx(res.total_charge_g, 1060.0);
    approx(res.total_charge_kg, 1.06);
    assert_eq!(res.refrigerant, RefrigerantType::R410A);
}

#[test]
fn short_line_adds_nothing() {
    for length in ["0", "3", "5"] {
        let input = GasChargeInput::parse("9000", length, "R22").expect("parse");
        let res = estimate_gas_charge(&input).expect("gas charge");
        approx(res.additional_charge_g, 0.0);
        approx(res.total_charge_g, 540.0);
    }
}

#[test]
fn r32_uses_fallback_coefficients() {
    let input = GasChargeInput::parse("18000", "15", "r-32").expect("parse");
    let res = estimate_gas_charge(&input).expect("gas charge");
    approx(res.base_charge_g, 1620.0);
    approx(res.additional_charge_g, 250.0);
    assert_eq!(res.refrigerant, RefrigerantType::R32);
}

#[test]
fn blank_capacity_is_rejected() {
    let err = GasChargeInput::parse("", "10", "R410A").unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidNumber {
            field: "rated_capacity_btu",
            input: String::new(),
        }
    );
}

proptest! {
    #[test]
    fn total_is_sum_and_kg_is_grams_over_thousand(
        capacity in 1.0f64..200_000.0,
        length in 0.0f64..200.0,
        idx in 0usize..3,
    ) {
        let input = GasChargeInput {
            rated_capacity_btu: capacity,
            line_length_m: length,
            refrigerant: RefrigerantType::KNOWN[idx].clone(),
        };
        let res = estimate_gas_charge(&input).unwrap();
        prop_assert_eq!(res.total_charge_g, res.base_charge_g + res.additional_charge_g);
        prop_assert_eq!(res.total_charge_kg, res.total_charge_g / 1000.0);
        prop_assert!(res.additional_charge_g >= 0.0);
        if length <= 5.0 {
            prop_assert_eq!(res.additional_charge_g, 0.0);
        }
    }

    #[test]
    fn alphabetic_capacity_never_parses(raw in "[a-zA-Z]{1,8}") {
        let lowered = raw.to_lowercase();
        prop_assume!(!["inf", "infinity", "nan"].contains(&lowered.as_str()));
        let outcome = GasChargeInput::parse(&raw, "10", "R410A");
        let is_capacity_error = matches!(
            outcome,
            Err(ValidationError::InvalidNumber { field: "rated_capacity_btu", .. })
        );
        prop_assert!(is_capacity_error);
    }
}
