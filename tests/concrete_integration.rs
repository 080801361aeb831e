use approx::assert_relative_eq;
use rc_section_solver::prelude::*;

fn section() -> (SectionGeometry, ConcreteLaw) {
    (SectionGeometry::default(), ConcreteLaw::default())
}

fn relative_gap(a: f64, b: f64) -> f64 {
    (a - b).abs() / b.abs()
}

#[test]
fn closed_form_matches_quadrature() {
    let (geom, concrete) = section();
    let analytical = AnalyticalIntegrator::default();
    let numerical = NumericalIntegrator::default();

    // compression only, mixed, mostly tension, reversed curvature
    let fields = [
        StrainField::new(-0.0035, -0.001),
        StrainField::new(-0.0035, 0.005),
        StrainField::new(-0.001, 0.01),
        StrainField::new(0.0, -0.0035),
    ];

    for strain in &fields {
        let exact = analytical.integrate(strain, &geom, &concrete);
        let approx = numerical.integrate(strain, &geom, &concrete);
        eprintln!(
            "({:+.4}, {:+.4}): N = {:.1} / {:.1} kN, M = {:.2} / {:.2} kNm",
            strain.top,
            strain.bottom,
            exact.n / 1000.0,
            approx.n / 1000.0,
            exact.m / 1000.0,
            approx.m / 1000.0
        );
        assert!(relative_gap(approx.n, exact.n) < 0.005);
        assert!(relative_gap(approx.m, exact.m) < 0.005);
    }
}

#[test]
fn moment_sign_follows_compressed_side() {
    let (geom, concrete) = section();
    let analytical = AnalyticalIntegrator::default();
    let numerical = NumericalIntegrator::default();

    // compressed top: sagging, positive moment
    let sagging = StrainField::new(-0.0035, 0.0);
    // compressed bottom: hogging, negative moment
    let hogging = StrainField::new(0.0, -0.0035);

    for integrator in [&analytical as &dyn ConcreteIntegrator, &numerical] {
        assert!(integrator.integrate(&sagging, &geom, &concrete).m > 0.0);
        assert!(integrator.integrate(&hogging, &geom, &concrete).m < 0.0);
    }
}

#[test]
fn near_zero_curvature_stays_continuous() {
    let (geom, concrete) = section();
    let strain = StrainField::new(-0.0015, -0.0015 + 1e-9);
    let exact = AnalyticalIntegrator::default().integrate(&strain, &geom, &concrete);
    let approx = NumericalIntegrator::default().integrate(&strain, &geom, &concrete);
    let uniform =
        AnalyticalIntegrator::default().integrate(&StrainField::uniform(-0.0015), &geom, &concrete);

    assert_relative_eq!(exact.n, approx.n, max_relative = 1e-6);
    assert_relative_eq!(exact.n, uniform.n, max_relative = 1e-6);
    assert!((exact.m - approx.m).abs() < 1.0);
    assert!(exact.m.abs() < 1.0);
}

#[test]
fn quadrature_error_shrinks_with_slices() {
    let (geom, concrete) = section();
    let strain = StrainField::new(-0.0035, 0.005);
    let exact = AnalyticalIntegrator::default().integrate(&strain, &geom, &concrete);

    let coarse = NumericalIntegrator::new(10).integrate(&strain, &geom, &concrete);
    let fine = NumericalIntegrator::new(1000).integrate(&strain, &geom, &concrete);

    assert!(relative_gap(fine.n, exact.n) < relative_gap(coarse.n, exact.n));
    assert!(relative_gap(fine.m, exact.m) < relative_gap(coarse.m, exact.m));
    assert!(relative_gap(fine.n, exact.n) < 1e-5);
}

#[test]
fn tension_carries_no_concrete_stress() {
    let (geom, concrete) = section();
    for strain in [
        StrainField::new(0.0, 0.01),
        StrainField::new(0.001, 0.002),
        StrainField::uniform(0.01),
    ] {
        let exact = AnalyticalIntegrator::default().integrate(&strain, &geom, &concrete);
        let approx = NumericalIntegrator::default().integrate(&strain, &geom, &concrete);
        assert_eq!(exact, SectionForces::zero());
        assert_eq!(approx.n, 0.0);
        assert_eq!(approx.m, 0.0);
    }
}

#[test]
fn uniform_compression_has_no_moment() {
    let (geom, concrete) = section();
    let f = AnalyticalIntegrator::default().integrate(
        &StrainField::uniform(concrete.eps_cu),
        &geom,
        &concrete,
    );
    assert_relative_eq!(f.n, concrete.fcd * geom.area(), max_relative = 1e-12);
    assert_eq!(f.m, 0.0);

    // symmetric steel keeps the squash load centred
    let model = SectionModel::default();
    let diagram = model
        .interaction_diagram(&Reinforcement::from_cm2(5.0, 5.0), &Densification::Uniform(0))
        .unwrap();
    let p1 = diagram.point(CharacteristicState::PureCompression).unwrap();
    assert!(p1.m.abs() < 1e-6);
    assert_relative_eq!(
        p1.n,
        concrete.fcd * geom.area() - 2.0 * 5e-4 * 435e6,
        max_relative = 1e-12
    );
}

#[test]
fn axial_force_never_decreases_along_diagram() {
    let model = SectionModel::default();
    for reinf in [
        Reinforcement::none(),
        Reinforcement::from_cm2(3.0, 6.0),
        Reinforcement::from_cm2(10.0, 2.0),
    ] {
        let diagram = model
            .interaction_diagram(&reinf, &Densification::Uniform(10))
            .unwrap();
        for pair in diagram.points().windows(2) {
            assert!(
                pair[1].n >= pair[0].n - 1e-6,
                "N drops from {} to {}",
                pair[0].label,
                pair[1].label
            );
        }
    }
}

#[test]
fn numerical_diagram_tracks_analytical() {
    let model = SectionModel::default();
    let reinf = Reinforcement::from_cm2(3.0, 6.0);
    let dens = Densification::Uniform(5);
    let exact = model.interaction_diagram(&reinf, &dens).unwrap();
    let approx = InteractionDiagramBuilder::new(
        &model.geometry,
        &model.concrete,
        &model.steel,
        NumericalIntegrator::from_settings(&model.settings),
    )
    .build(&reinf, &dens)
    .unwrap();

    assert_eq!(exact.len(), approx.len());
    // scale for points whose resultant vanishes
    let n_scale = 0.005 * 3e6;
    let m_scale = 0.005 * 2e5;
    for (a, b) in exact.iter().zip(approx.iter()) {
        assert_eq!(a.label, b.label);
        assert!((a.n - b.n).abs() < n_scale, "{}: N", a.label);
        assert!((a.m - b.m).abs() < m_scale, "{}: M", a.label);
    }
}
