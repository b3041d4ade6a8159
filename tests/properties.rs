//! Property tests for counters, bounds and selection.

use proptest::prelude::*;
use u_opcount::eval::{Evaluator, FnObjective, Objective, OperationCost, W22};
use u_opcount::ga::selection::{normalize, selection_probabilities};
use u_opcount::ga::{GaConfig, GaRunner};
use u_opcount::pso::{PsoConfig, PsoRunner};
use u_opcount::random::create_rng;
use u_opcount::space::Bounds;

fn bounds_strategy() -> impl Strategy<Value = Bounds> {
    (-1000.0f64..1000.0, 0.0f64..500.0).prop_map(|(min, width)| Bounds {
        min,
        max: min + width,
    })
}

proptest! {
    #[test]
    fn evaluate_counts_exactly(points in prop::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 0..200)) {
        let mut ev = Evaluator::new(W22);
        for &(x, y) in &points {
            let v = ev.evaluate(x, y);
            prop_assert_eq!(v.to_bits(), W22.value(x, y).to_bits());
        }
        let stats = ev.stats();
        prop_assert_eq!(stats.evaluations, points.len() as u64);
        prop_assert_eq!(stats.multiplications, 3 * points.len() as u64);
        prop_assert_eq!(stats.divisions, 0);
    }

    #[test]
    fn probabilities_form_a_distribution(fitnesses in prop::collection::vec(-1e6f64..1e6, 1..64)) {
        let p = selection_probabilities(&fitnesses);
        prop_assert!(p.is_normalized());
        prop_assert_eq!(p.cost.divisions, fitnesses.len() as u64);
        let sum: f64 = p.probabilities.iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
        prop_assert!(p.probabilities.iter().all(|&pi| pi > 0.0));
    }

    #[test]
    fn lower_fitness_never_less_likely(fitnesses in prop::collection::vec(-1e3f64..1e3, 2..32)) {
        let p = selection_probabilities(&fitnesses);
        for i in 0..fitnesses.len() {
            for j in 0..fitnesses.len() {
                if fitnesses[i] < fitnesses[j] {
                    prop_assert!(p.probabilities[i] >= p.probabilities[j]);
                }
            }
        }
    }

    #[test]
    fn zero_weights_are_uniform(n in 1usize..64) {
        let p = normalize(&vec![0.0; n]);
        prop_assert_eq!(p.cost.divisions, 0);
        for &pi in &p.probabilities {
            prop_assert!((pi - 1.0 / n as f64).abs() < 1e-12);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn ga_population_stays_in_bounds(
        bounds in bounds_strategy(),
        half in 1usize..12,
        mutation_rate in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let config = GaConfig::default()
            .with_bounds(bounds)
            .with_population_size(half * 2)
            .with_generations(15)
            .with_mutation_rate(mutation_rate)
            .with_mutation_sigma(100.0);
        let mut ev = Evaluator::new(W22);
        let mut rng = create_rng(seed);
        let mut ok = true;
        GaRunner::run_observed(&mut ev, &config, &mut rng, |_, pop| {
            ok &= pop.len() == half * 2;
            ok &= pop.iter().all(|c| bounds.contains_point(*c));
        }).unwrap();
        prop_assert!(ok);
    }

    #[test]
    fn pso_particles_stay_in_bounds(
        bounds in bounds_strategy(),
        swarm_size in 1usize..20,
        w in 0.0f64..2.0,
        seed in any::<u64>(),
    ) {
        let config = PsoConfig::default()
            .with_bounds(bounds)
            .with_swarm_size(swarm_size)
            .with_iterations(15)
            .with_inertia(w)
            .with_coefficients(2.0, 2.0);
        let mut ev = Evaluator::new(W22);
        let mut rng = create_rng(seed);
        let mut ok = true;
        PsoRunner::run_observed(&mut ev, &config, &mut rng, |_, swarm| {
            ok &= swarm.particles.iter().all(|p| bounds.contains_point(p.position));
        }).unwrap();
        prop_assert!(ok);
    }

    #[test]
    fn best_value_history_never_increases(seed in any::<u64>()) {
        let mut ev = Evaluator::new(W22);
        let ga = GaRunner::run(&mut ev, &GaConfig::default().with_generations(30).with_seed(seed)).unwrap();
        prop_assert!(ga.fitness_history.windows(2).all(|w| w[1] <= w[0]));

        ev.reset();
        let pso = PsoRunner::run(&mut ev, &PsoConfig::default().with_iterations(30).with_seed(seed)).unwrap();
        prop_assert!(pso.value_history.windows(2).all(|w| w[1] <= w[0]));
        prop_assert_eq!(pso.global_min_info, pso.improvements.last().map(|i| i.snapshot));
    }

    #[test]
    fn custom_cost_model_is_charged_per_call(mults in 0u64..10, divs in 0u64..10, seed in any::<u64>()) {
        let objective = FnObjective::new(|x, y| x.abs() + y.abs(), OperationCost::new(mults, divs));
        let mut ev = Evaluator::new(objective);
        let config = PsoConfig::default().with_swarm_size(5).with_iterations(4).with_seed(seed);
        PsoRunner::run(&mut ev, &config).unwrap();
        prop_assert_eq!(ev.stats().multiplications, 20 * mults);
        prop_assert_eq!(ev.stats().divisions, 20 * divs);
    }
}
