//! RC Section Solver Example - 300 x 500 mm beam in pure bending

use std::collections::HashMap;

use rc_section_solver::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== RC Section Solver Example: 300 x 500 mm beam ===\n");

    // C30/37-like concrete, B500 steel, 50 mm to both layers
    let model = SectionModel::new(
        SectionGeometry::symmetric(0.3, 0.5, 0.05),
        ConcreteLaw::default(),
        SteelLaw::default(),
    )?;

    // Capacity envelope without reinforcement
    let diagram = model.interaction_diagram(&Reinforcement::none(), &Densification::Uniform(10))?;
    let summary = diagram.summary();
    println!("Plain concrete diagram: {} points", summary.num_points);
    println!(
        "  N range: {:.1} kN ({}) .. {:.1} kN ({})",
        summary.min_n / 1000.0,
        summary.min_n_point,
        summary.max_n / 1000.0,
        summary.max_n_point
    );
    println!(
        "  Max |M|: {:.1} kNm ({})\n",
        summary.max_abs_m / 1000.0,
        summary.max_abs_m_point
    );

    println!("Characteristic points:");
    println!(
        "  {:<4} {:>9} {:>9} {:>10} {:>10}",
        "", "eps_t", "eps_b", "N [kN]", "M [kNm]"
    );
    for point in diagram.characteristic_points() {
        println!(
            "  {:<4} {:>8.3}‰ {:>8.3}‰ {:>10.1} {:>10.1}",
            point.label,
            point.strain.top * 1000.0,
            point.strain.bottom * 1000.0,
            point.n / 1000.0,
            point.m / 1000.0
        );
    }

    // Required steel for 30 kNm by both designers
    let loads = DesignLoads::from_kn(0.0, 30.0);
    println!("\nDesign for N = 0 kN, M = 30 kNm:");
    for options in [DesignOptions::lookup(), DesignOptions::root_search()] {
        let method = options.method;
        let result = model.design(&loads, &options)?;
        println!(
            "  {:?}: {:?}, As2 = {:.2} cm², eps = ({:.3}‰, {:.3}‰), M = {:.2} kNm, {} it.",
            method,
            result.status,
            result.required_area_cm2(),
            result.strain.top * 1000.0,
            result.strain.bottom * 1000.0,
            result.m / 1000.0,
            result.iterations
        );

        let variants = model.reinforcement_variants(&result.strain, &loads);
        if let Some(optimal) = variants.optimal {
            println!(
                "    two-layer: As1 = {:.2} cm², As2 = {:.2} cm²",
                optimal.top_area * 1e4,
                optimal.bottom_area * 1e4
            );
        }
        if let Some(sym) = variants.symmetric {
            println!(
                "    symmetric: As = {:.2} cm² total, M = {:.2} kNm",
                sym.total_area * 1e4,
                sym.moment / 1000.0
            );
        }
    }

    // A moment far beyond the plain section capacity
    let result = model.design(&DesignLoads::from_kn(0.0, 2280.0), &DesignOptions::default())?;
    println!("\nDesign for M = 2280 kNm: {:?}", result.status);

    // Load combinations
    let mut effects = HashMap::new();
    effects.insert("Dead".to_string(), LoadEffect::from_kn(-50.0, 12.0));
    effects.insert("Live".to_string(), LoadEffect::from_kn(-20.0, 9.0));
    let combos = [
        LoadCombination::uls_dead_live(),
        LoadCombination::sls_characteristic(),
    ];
    println!("\nLoad combinations:");
    for (name, result) in model.design_combinations(&effects, &combos, &DesignOptions::default())? {
        println!(
            "  {:<12} N = {:>7.1} kN, M = {:>6.1} kNm, As2 = {:.2} cm² ({:?})",
            name,
            result.n / 1000.0,
            result.m / 1000.0,
            result.required_area_cm2(),
            result.status
        );
    }

    Ok(())
}
