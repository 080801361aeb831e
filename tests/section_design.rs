use std::collections::HashMap;

use approx::assert_relative_eq;
use rc_section_solver::prelude::*;

fn worked_example() -> SectionModel {
    SectionModel::new(
        SectionGeometry::new(0.3, 0.5, 0.05, 0.05),
        ConcreteLaw::new(-20e6, -0.002, -0.0035),
        SteelLaw::new(435e6, 200e9, 0.01),
    )
    .unwrap()
}

fn check_equilibrium(model: &SectionModel, result: &DesignResult, loads: &DesignLoads) {
    let state = model.evaluate_state(
        &result.strain,
        &Reinforcement::bottom_only(result.required_area),
    );
    assert_relative_eq!(state.n, result.n, epsilon = 1e-6, max_relative = 1e-9);
    assert_relative_eq!(state.m, result.m, epsilon = 1e-6, max_relative = 1e-9);
    assert!((result.n - loads.n).abs() <= 1000.0);
}

#[test]
fn worked_example_both_designers_agree() {
    let model = worked_example();
    let loads = DesignLoads::from_kn(0.0, 30.0);

    let lookup = model.design(&loads, &DesignOptions::lookup()).unwrap();
    let root = model.design(&loads, &DesignOptions::root_search()).unwrap();

    for result in [&lookup, &root] {
        eprintln!(
            "As2 = {:.3} cm², eps = ({:.3}, {:.3})‰, M = {:.3} kNm, {} iterations",
            result.required_area_cm2(),
            result.strain.top * 1000.0,
            result.strain.bottom * 1000.0,
            result.m / 1000.0,
            result.iterations
        );
        assert_eq!(result.status, DesignStatus::Converged);
        assert!(result.error_rel < 0.01);
        assert!(result.required_area_cm2() > 1.4 && result.required_area_cm2() < 1.8);
        // bottom layer yields in this regime
        assert_relative_eq!(result.bottom_layer_stress, 435e6, max_relative = 1e-12);
        check_equilibrium(&model, result, &loads);
    }

    assert!((lookup.required_area - root.required_area).abs() / root.required_area < 0.02);
}

#[test]
fn designs_close_equilibrium_under_axial_load() {
    let model = worked_example();
    for (n, m) in [(0.0, 100.0), (0.0, 200.0), (-200.0, 100.0), (-97.5, 29.7)] {
        let loads = DesignLoads::from_kn(n, m);
        for options in [DesignOptions::lookup(), DesignOptions::root_search()] {
            let result = model.design(&loads, &options).unwrap();
            assert!(result.converged, "N = {} kN, M = {} kNm", n, m);
            assert!(result.required_area > 0.0);
            check_equilibrium(&model, &result, &loads);
        }
    }
}

#[test]
fn converged_designs_carry_target_axial_force() {
    let model = worked_example();
    let tolerance = DesignOptions::default().axial_tolerance;
    let cases = [
        (-1500.0, 30.0),
        (-800.0, 30.0),
        (-800.0, 5.0),
        (-300.0, 5.0),
        (300.0, 100.0),
        (-1500.0, 150.0),
    ];
    for (n, m) in cases {
        let loads = DesignLoads::from_kn(n, m);
        let root = model.design(&loads, &DesignOptions::root_search()).unwrap();
        assert_eq!(root.status, DesignStatus::Converged, "N = {} kN, M = {} kNm", n, m);

        let lookup = model.design(&loads, &DesignOptions::lookup()).unwrap();
        for result in [&root, &lookup] {
            if result.converged {
                assert!(
                    (result.n - loads.n).abs() <= tolerance,
                    "N = {} kN, M = {} kNm: axial residual {:.1} kN",
                    n,
                    m,
                    (result.n - loads.n).abs() / 1000.0
                );
                check_equilibrium(&model, result, &loads);
            } else {
                assert!(result.required_area < model.geometry.area());
            }
        }
    }

    // pure tension with bottom steel only needs at least 60 kNm
    let loads = DesignLoads::from_kn(300.0, 5.0);
    for options in [DesignOptions::lookup(), DesignOptions::root_search()] {
        let result = model.design(&loads, &options).unwrap();
        assert_eq!(result.status, DesignStatus::OutsideFeasibleRange);
    }
}

#[test]
fn required_area_grows_with_moment() {
    let model = worked_example();
    let designer = model.lookup_designer(DesignOptions::lookup()).unwrap();
    let areas: Vec<f64> = [18.0, 30.0, 100.0, 200.0]
        .iter()
        .map(|&m| designer.design(&DesignLoads::from_kn(0.0, m)).required_area)
        .collect();
    assert!(areas.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn moment_far_beyond_capacity_is_infeasible() {
    let model = worked_example();
    // roughly ten times the moment at the balanced state
    let loads = DesignLoads::from_kn(0.0, 2280.0);
    for options in [DesignOptions::lookup(), DesignOptions::root_search()] {
        let result = model.design(&loads, &options).unwrap();
        assert_eq!(result.status, DesignStatus::OutsideFeasibleRange);
        assert!(!result.converged);
        assert!(result.required_area.is_finite());
        assert!(result.required_area < model.geometry.area());
    }
}

#[test]
fn hogging_moment_is_infeasible_for_bottom_steel() {
    let model = worked_example();
    let loads = DesignLoads::from_kn(0.0, -30.0);
    for options in [DesignOptions::lookup(), DesignOptions::root_search()] {
        let result = model.design(&loads, &options).unwrap();
        assert_eq!(result.status, DesignStatus::OutsideFeasibleRange);
    }
}

#[test]
fn refinement_never_loosens_lookup() {
    let model = worked_example();
    let loads = DesignLoads::from_kn(0.0, 30.0);
    let coarse = DesignOptions::lookup().with_densification(Densification::Uniform(2));
    let plain = model.design(&loads, &coarse).unwrap();
    let refined = model
        .design(&loads, &coarse.clone().with_refinement(10))
        .unwrap();
    assert!(refined.error_abs <= plain.error_abs + 1e-9);
    assert!(refined.converged);
}

#[test]
fn variants_at_design_state() {
    let model = worked_example();
    let loads = DesignLoads::from_kn(0.0, 30.0);
    let result = model.design(&loads, &DesignOptions::lookup()).unwrap();
    let variants = model.reinforcement_variants(&result.strain, &loads);

    let single = variants.bottom_only.unwrap();
    assert_relative_eq!(single.area, result.required_area, max_relative = 1e-9);
    assert_relative_eq!(single.moment, result.m, max_relative = 1e-9);

    let optimal = variants.optimal.unwrap();
    let state = model.evaluate_state(
        &result.strain,
        &Reinforcement::new(optimal.top_area, optimal.bottom_area),
    );
    assert_relative_eq!(state.n, loads.n, epsilon = 1e-3);
    assert_relative_eq!(state.m, loads.m, max_relative = 1e-9);
}

#[test]
fn load_combinations_design_together() {
    let model = worked_example();
    let mut effects = HashMap::new();
    effects.insert("Dead".to_string(), LoadEffect::from_kn(0.0, 10.0));
    effects.insert("Live".to_string(), LoadEffect::from_kn(0.0, 8.0));
    let combos = [
        LoadCombination::uls_dead_live(),
        LoadCombination::sls_characteristic(),
        LoadCombination::uls_dead_wind_live(),
    ];

    // no wind effect supplied
    assert!(model
        .design_combinations(&effects, &combos, &DesignOptions::default())
        .is_err());

    let results = model
        .design_combinations(&effects, &combos[..2], &DesignOptions::root_search())
        .unwrap();
    assert_eq!(results[0].0, LoadCombination::uls_dead_live().name);
    assert_relative_eq!(results[0].1.n, 0.0, epsilon = 1000.0);
    assert!(results.iter().all(|(_, r)| r.converged));
    assert!(results[0].1.required_area > results[1].1.required_area);
}
