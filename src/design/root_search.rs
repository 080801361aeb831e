//! Root-search designer: regula falsi on the top fibre strain

use log::{debug, log, trace, warn, Level};

use super::required_bottom_area;
use crate::analysis::DesignOptions;
use crate::elements::{ConcreteLaw, SectionGeometry, SteelLaw, StrainField};
use crate::error::SectionResult;
use crate::integration::{AnalyticalIntegrator, ConcreteIntegrator};
use crate::loads::DesignLoads;
use crate::math::relative_error;
use crate::results::{DesignResult, DesignStatus, SectionForces};

/// Finite-difference step on the bottom fibre strain
const STRAIN_STEP: f64 = 1e-7;

/// Section state found for one top fibre strain
#[derive(Debug, Clone, Copy)]
struct Evaluation {
    strain: StrainField,
    area: f64,
    concrete: SectionForces,
    eps_s2: f64,
    sigma_s2: f64,
    n: f64,
    m: f64,
}

/// Designs bottom reinforcement by searching the top fibre strain for which
/// the equilibrium state carries the target moment
///
/// For each trial top strain the bottom fibre strain is found by a damped
/// Newton iteration on axial equilibrium, first without steel and then with
/// the area that closes equilibrium at that state.
#[derive(Debug, Clone)]
pub struct RootSearchDesigner<I = AnalyticalIntegrator> {
    geometry: SectionGeometry,
    concrete: ConcreteLaw,
    steel: SteelLaw,
    integrator: I,
    options: DesignOptions,
}

impl<I: ConcreteIntegrator> RootSearchDesigner<I> {
    pub fn new(
        geometry: SectionGeometry,
        concrete: ConcreteLaw,
        steel: SteelLaw,
        integrator: I,
        options: DesignOptions,
    ) -> SectionResult<Self> {
        options.validate()?;
        Ok(Self {
            geometry,
            concrete,
            steel,
            integrator,
            options,
        })
    }

    pub fn options(&self) -> &DesignOptions {
        &self.options
    }

    fn level(&self) -> Level {
        if self.options.log {
            Level::Debug
        } else {
            Level::Trace
        }
    }

    /// Bottom fibre strain at which the bottom layer reaches `eps_ud`
    fn max_bottom_strain(&self, eps_top: f64) -> f64 {
        let h = self.geometry.height;
        let d = self.geometry.effective_depth();
        eps_top + (self.steel.eps_ud - eps_top) * h / d
    }

    fn state(&self, eps_top: f64, eps_bottom: f64, area: f64) -> Evaluation {
        let strain = StrainField::new(eps_top, eps_bottom);
        let concrete = self
            .integrator
            .integrate(&strain, &self.geometry, &self.concrete);
        let x_s2 = self.geometry.bottom_layer_position();
        let eps_s2 = strain.at(x_s2, self.geometry.height);
        let sigma_s2 = self.steel.stress(eps_s2);
        let force = area * sigma_s2;
        Evaluation {
            strain,
            area,
            concrete,
            eps_s2,
            sigma_s2,
            n: concrete.n + force,
            m: concrete.m - force * x_s2,
        }
    }

    /// Damped Newton iteration for the bottom fibre strain giving `N = target_n`
    ///
    /// N never decreases with the bottom strain, so the residual brackets the
    /// root inside the clamp range; steps leaving the bracket bisect instead.
    /// When the target is out of reach the nearest clamp is returned and the
    /// axial residual stays open.
    fn solve_bottom(&self, eps_top: f64, area: f64, target_n: f64, start: f64) -> f64 {
        let mut lo = self.concrete.eps_cu;
        let mut hi = self.max_bottom_strain(eps_top);
        let residual = |eps_bottom: f64| self.state(eps_top, eps_bottom, area).n - target_n;

        if residual(lo) >= 0.0 {
            return lo;
        }
        if residual(hi) <= 0.0 {
            return hi;
        }

        let mut eps_bottom = start.clamp(lo, hi);
        for iter in 0..self.options.max_inner_iterations {
            let r = residual(eps_bottom);
            if r.abs() < self.options.axial_tolerance {
                break;
            }
            if r < 0.0 {
                lo = eps_bottom;
            } else {
                hi = eps_bottom;
            }
            let slope = (residual(eps_bottom + STRAIN_STEP) - residual(eps_bottom - STRAIN_STEP))
                / (2.0 * STRAIN_STEP);
            let newton = eps_bottom - self.options.newton_damping * r / slope;
            let next = if slope.abs() >= f64::EPSILON && newton > lo && newton < hi {
                newton
            } else {
                0.5 * (lo + hi)
            };
            trace!("  inner {}: eps_b = {:.6e}, residual = {:.3} N", iter, next, r);
            if (next - eps_bottom).abs() < 1e-12 {
                eps_bottom = next;
                break;
            }
            eps_bottom = next;
        }
        eps_bottom
    }

    /// Equilibrium state and required area for one top fibre strain
    fn evaluate(&self, eps_top: f64, target_n: f64) -> Evaluation {
        let lo = self.concrete.eps_cu;
        let hi = self.max_bottom_strain(eps_top);

        let eps_bottom = self.solve_bottom(eps_top, 0.0, target_n, 0.5 * (lo + hi));
        let plain = self.state(eps_top, eps_bottom, 0.0);
        let area =
            required_bottom_area(target_n, plain.concrete.n, plain.sigma_s2).unwrap_or(0.0);

        let eps_bottom = self.solve_bottom(eps_top, area, target_n, eps_bottom);
        self.state(eps_top, eps_bottom, area)
    }

    fn result(
        &self,
        eval: &Evaluation,
        loads: &DesignLoads,
        status: DesignStatus,
        iterations: usize,
    ) -> DesignResult {
        DesignResult {
            status,
            converged: status == DesignStatus::Converged,
            required_area: eval.area,
            strain: eval.strain,
            bottom_layer_strain: eval.eps_s2,
            bottom_layer_stress: eval.sigma_s2,
            concrete: eval.concrete,
            n: eval.n,
            m: eval.m,
            error_abs: (eval.m - loads.m).abs(),
            error_rel: relative_error(eval.m, loads.m),
            iterations,
        }
    }

    fn in_equilibrium(&self, eval: &Evaluation, loads: &DesignLoads) -> bool {
        (eval.n - loads.n).abs() <= self.options.axial_tolerance
    }

    /// Moment within tolerance at a state that also carries the target N
    fn is_converged(&self, eval: &Evaluation, loads: &DesignLoads) -> bool {
        self.in_equilibrium(eval, loads)
            && self
                .options
                .is_converged((eval.m - loads.m).abs(), relative_error(eval.m, loads.m))
    }

    /// Required bottom reinforcement for the target loads
    pub fn design(&self, loads: &DesignLoads) -> DesignResult {
        let level = self.level();

        let mut a = self.concrete.eps_cu;
        let mut b = self.steel.eps_ud;
        let eval_a = self.evaluate(a, loads.n);
        let eval_b = self.evaluate(b, loads.n);
        let mut fa = eval_a.m - loads.m;
        let mut fb = eval_b.m - loads.m;

        debug!(
            "Root search range: M({:.4}) = {:.2} kNm, M({:.4}) = {:.2} kNm",
            a,
            eval_a.m / 1000.0,
            b,
            eval_b.m / 1000.0
        );

        if self.is_converged(&eval_a, loads) {
            return self.result(&eval_a, loads, DesignStatus::Converged, 0);
        }
        if self.is_converged(&eval_b, loads) {
            return self.result(&eval_b, loads, DesignStatus::Converged, 0);
        }
        // target N out of reach over the whole top strain range
        let unreachable =
            !self.in_equilibrium(&eval_a, loads) && !self.in_equilibrium(&eval_b, loads);
        if fa * fb > 0.0 || unreachable {
            warn!(
                "M = {:.1} kNm outside the reachable range [{:.1}, {:.1}] kNm at N = {:.1} kN",
                loads.m / 1000.0,
                eval_a.m.min(eval_b.m) / 1000.0,
                eval_a.m.max(eval_b.m) / 1000.0,
                loads.n / 1000.0
            );
            let nearest = if fa.abs() < fb.abs() { eval_a } else { eval_b };
            return self.result(&nearest, loads, DesignStatus::OutsideFeasibleRange, 0);
        }

        // Illinois variant: the end kept for two consecutive steps has its
        // residual halved
        let mut side = 0i8;
        let mut last = eval_a;
        let mut iterations = 0;
        for iter in 1..=self.options.max_iterations {
            iterations = iter;
            let c = (a * fb - b * fa) / (fb - fa);
            let eval_c = self.evaluate(c, loads.n);
            let fc = eval_c.m - loads.m;
            last = eval_c;

            log!(
                level,
                "Iteration {}: eps_top = {:.6e}, M = {:.3} kNm, As = {:.3} cm²",
                iter,
                c,
                eval_c.m / 1000.0,
                eval_c.area * 1e4
            );

            if self.is_converged(&eval_c, loads) {
                return self.result(&eval_c, loads, DesignStatus::Converged, iter);
            }

            if fc * fb > 0.0 {
                b = c;
                fb = fc;
                if side == -1 {
                    fa *= 0.5;
                }
                side = -1;
            } else if fa * fc > 0.0 {
                a = c;
                fa = fc;
                if side == 1 {
                    fb *= 0.5;
                }
                side = 1;
            } else {
                break;
            }
        }

        warn!(
            "Root search did not converge in {} iterations (N = {:.1} kN, M = {:.3} kNm, \
             target {:.1} kN, {:.3} kNm)",
            iterations,
            last.n / 1000.0,
            last.m / 1000.0,
            loads.n / 1000.0,
            loads.m / 1000.0
        );
        self.result(&last, loads, DesignStatus::NotConverged, iterations)
    }
}
