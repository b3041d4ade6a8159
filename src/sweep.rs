//! Hyperparameter sweeps and the CSV cost report.
//!
//! A sweep runs each configuration on a freshly reset evaluator and
//! reduces the run to one [`SweepRecord`]: the best value found and the
//! cost (evaluations and total operations) needed to reach it. Records
//! are read and written with the `csv` crate using the columns below.
//!
//! ```text
//! algorithm,pop_or_swarm_size,gens_or_iterations,crossover_rate,mutation_rate,w,c1,c2,best_fitness,evaluations_to_find_min,total_ops_to_find_min,execution_time
//! ```
//!
//! Columns that do not apply to an algorithm are left empty.

use crate::error::ConfigError;
use crate::eval::{Evaluator, Objective};
use crate::ga::{GaConfig, GaResult, GaRunner};
use crate::pso::{PsoConfig, PsoResult, PsoRunner};
use crate::space::Bounds;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Write};
use tracing::info;

/// Header row of the CSV report.
pub const CSV_HEADER: &str = "algorithm,pop_or_swarm_size,gens_or_iterations,crossover_rate,\
mutation_rate,w,c1,c2,best_fitness,evaluations_to_find_min,total_ops_to_find_min,execution_time";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "GA")]
    Ga,
    #[serde(rename = "PSO")]
    Pso,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Ga => f.write_str("GA"),
            Algorithm::Pso => f.write_str("PSO"),
        }
    }
}

/// One sweep run reduced to its report row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRecord {
    pub algorithm: Algorithm,
    pub pop_or_swarm_size: usize,
    pub gens_or_iterations: usize,
    pub crossover_rate: Option<f64>,
    pub mutation_rate: Option<f64>,
    pub w: Option<f64>,
    pub c1: Option<f64>,
    pub c2: Option<f64>,
    pub best_fitness: f64,
    /// Evaluations spent when the best value was found.
    pub evaluations_to_find_min: u64,
    /// Objective plus internal multiplications and divisions spent when
    /// the best value was found.
    pub total_ops_to_find_min: u64,
    /// Wall-clock seconds for the whole run.
    pub execution_time: f64,
}

impl SweepRecord {
    pub fn from_ga(config: &GaConfig, result: &GaResult) -> Self {
        let found = result.global_min_info.unwrap_or_default();
        Self {
            algorithm: Algorithm::Ga,
            pop_or_swarm_size: config.population_size,
            gens_or_iterations: config.generations,
            crossover_rate: Some(config.crossover_rate),
            mutation_rate: Some(config.mutation_rate),
            w: None,
            c1: None,
            c2: None,
            best_fitness: result.best_fitness,
            evaluations_to_find_min: found.counters.evaluations,
            total_ops_to_find_min: found.total_operations(),
            execution_time: result.elapsed.as_secs_f64(),
        }
    }

    pub fn from_pso(config: &PsoConfig, result: &PsoResult) -> Self {
        let found = result.global_min_info.unwrap_or_default();
        Self {
            algorithm: Algorithm::Pso,
            pop_or_swarm_size: config.swarm_size,
            gens_or_iterations: config.iterations,
            crossover_rate: None,
            mutation_rate: None,
            w: Some(config.w),
            c1: Some(config.c1),
            c2: Some(config.c2),
            best_fitness: result.gbest_val,
            evaluations_to_find_min: found.counters.evaluations,
            total_ops_to_find_min: found.total_operations(),
            execution_time: result.elapsed.as_secs_f64(),
        }
    }
}

/// Writes `records` as CSV rows, preceded by the header row when `header`
/// is set. Appending to an existing report passes `header = false`.
pub fn write_csv<W: Write>(
    out: W,
    records: &[SweepRecord],
    header: bool,
) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(header)
        .from_writer(out);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a CSV report that starts with the header row.
pub fn read_csv<R: Read>(input: R) -> Result<Vec<SweepRecord>, csv::Error> {
    csv::Reader::from_reader(input).deserialize().collect()
}

/// Record with the lowest `best_fitness` for `algorithm`.
pub fn best_for(records: &[SweepRecord], algorithm: Algorithm) -> Option<&SweepRecord> {
    records
        .iter()
        .filter(|r| r.algorithm == algorithm)
        .min_by(|a, b| a.best_fitness.total_cmp(&b.best_fitness))
}

/// Built-in GA search space: large populations and high mutation rates
/// for escaping local minima, plus a balanced and a slow-burn setting.
pub fn ga_param_space(bounds: Bounds) -> Vec<GaConfig> {
    [
        (400, 75, 0.8, 0.3),
        (150, 200, 0.85, 0.5),
        (300, 100, 0.9, 0.4),
        (200, 150, 0.6, 0.2),
        (200, 150, 0.7, 0.7),
        (500, 60, 0.9, 0.3),
        (150, 200, 0.8, 0.25),
    ]
    .into_iter()
    .map(|(pop, gens, cx, mu)| {
        GaConfig::default()
            .with_bounds(bounds)
            .with_population_size(pop)
            .with_generations(gens)
            .with_crossover_rate(cx)
            .with_mutation_rate(mu)
    })
    .collect()
}

/// Built-in PSO search space: an inertia sweep, a swarm-size versus
/// iteration trade-off, and cognitive/social imbalance.
pub fn pso_param_space(bounds: Bounds) -> Vec<PsoConfig> {
    [
        (15, 20, 0.001, 2.0, 2.0),
        (15, 20, 0.1, 2.0, 2.0),
        (15, 20, 0.3, 2.0, 2.0),
        (15, 20, 0.5, 2.0, 2.0),
        (15, 20, 0.7, 2.0, 2.0),
        (40, 10, 0.5, 2.0, 2.0),
        (20, 20, 0.5, 2.0, 2.0),
        (10, 40, 0.5, 2.0, 2.0),
        (8, 50, 0.5, 2.0, 2.0),
        (12, 30, 0.4, 2.5, 1.5),
        (12, 30, 0.4, 1.5, 2.5),
    ]
    .into_iter()
    .map(|(size, iters, w, c1, c2)| {
        PsoConfig::default()
            .with_bounds(bounds)
            .with_swarm_size(size)
            .with_iterations(iters)
            .with_inertia(w)
            .with_coefficients(c1, c2)
    })
    .collect()
}

/// Runs configurations one after another on a shared evaluator.
///
/// The evaluator is reset before every run. Each configuration is run
/// `repeats` times. With a base seed, run `k` of a call to
/// [`run_ga`](Self::run_ga) or [`run_pso`](Self::run_pso) uses `seed + k`,
/// counting repeats within each configuration in order. Every call starts
/// again at `k = 0`, so the GA and PSO phases draw the same seed sequence.
#[derive(Debug, Clone)]
pub struct Sweep {
    pub repeats: usize,
    pub seed: Option<u64>,
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            repeats: 1,
            seed: None,
        }
    }
}

impl Sweep {
    pub fn new(repeats: usize, seed: Option<u64>) -> Result<Self, ConfigError> {
        let sweep = Self { repeats, seed };
        sweep.validate()?;
        Ok(sweep)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repeats == 0 {
            return Err(ConfigError::ZeroIterations { what: "repeats" });
        }
        Ok(())
    }

    fn run_seed(&self, run: usize) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(run as u64))
    }

    pub fn run_ga<O: Objective>(
        &self,
        evaluator: &mut Evaluator<O>,
        configs: &[GaConfig],
    ) -> Result<Vec<SweepRecord>, ConfigError> {
        self.validate()?;
        let mut records = Vec::with_capacity(configs.len() * self.repeats);
        for (i, config) in configs.iter().enumerate() {
            for r in 0..self.repeats {
                let mut config = config.clone();
                config.seed = self.run_seed(i * self.repeats + r);
                info!(
                    test = i + 1,
                    of = configs.len(),
                    population_size = config.population_size,
                    generations = config.generations,
                    "running GA configuration"
                );
                evaluator.reset();
                let result = GaRunner::run(evaluator, &config)?;
                records.push(SweepRecord::from_ga(&config, &result));
            }
        }
        Ok(records)
    }

    pub fn run_pso<O: Objective>(
        &self,
        evaluator: &mut Evaluator<O>,
        configs: &[PsoConfig],
    ) -> Result<Vec<SweepRecord>, ConfigError> {
        self.validate()?;
        let mut records = Vec::with_capacity(configs.len() * self.repeats);
        for (i, config) in configs.iter().enumerate() {
            for r in 0..self.repeats {
                let mut config = config.clone();
                config.seed = self.run_seed(i * self.repeats + r);
                info!(
                    test = i + 1,
                    of = configs.len(),
                    swarm_size = config.swarm_size,
                    iterations = config.iterations,
                    "running PSO configuration"
                );
                evaluator.reset();
                let result = PsoRunner::run(evaluator, &config)?;
                records.push(SweepRecord::from_pso(&config, &result));
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::W22;

    fn ga_record() -> SweepRecord {
        SweepRecord {
            algorithm: Algorithm::Ga,
            pop_or_swarm_size: 150,
            gens_or_iterations: 200,
            crossover_rate: Some(0.85),
            mutation_rate: Some(0.5),
            w: None,
            c1: None,
            c2: None,
            best_fitness: -1234.5,
            evaluations_to_find_min: 9000,
            total_ops_to_find_min: 51_000,
            execution_time: 0.25,
        }
    }

    fn written(records: &[SweepRecord], header: bool) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, records, header).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_csv_header_and_empty_pso_columns() {
        let text = written(&[ga_record()], true);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some("GA,150,200,0.85,0.5,,,,-1234.5,9000,51000,0.25")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_append_without_header() {
        let mut report = written(&[ga_record()], true);
        report.push_str(&written(&[ga_record()], false));
        assert_eq!(report.matches("algorithm,").count(), 1);
        assert_eq!(read_csv(report.as_bytes()).unwrap().len(), 2);
    }

    #[test]
    fn test_write_then_read_report() {
        let mut pso = ga_record();
        pso.algorithm = Algorithm::Pso;
        pso.crossover_rate = None;
        pso.mutation_rate = None;
        pso.w = Some(0.5);
        pso.c1 = Some(2.0);
        pso.c2 = Some(2.0);
        let records = vec![ga_record(), pso];
        let text = written(&records, true);
        assert_eq!(read_csv(text.as_bytes()).unwrap(), records);
    }

    #[test]
    fn test_read_quoted_fields_and_crlf() {
        // As saved by spreadsheet tools.
        let text = format!(
            "{CSV_HEADER}\r\n\"GA\",150,200,\"0.85\",0.5,,,,-1234.5,9000,51000,0.25\r\n"
        );
        assert_eq!(read_csv(text.as_bytes()).unwrap(), vec![ga_record()]);
    }

    #[test]
    fn test_read_rejects_malformed_rows() {
        let unknown = format!("{CSV_HEADER}\nSA,1,2,,,,,,0,0,0,0\n");
        assert!(read_csv(unknown.as_bytes()).is_err());
        let bad_number = format!("{CSV_HEADER}\nGA,x,2,,,,,,0,0,0,0\n");
        assert!(read_csv(bad_number.as_bytes()).is_err());
        let short = format!("{CSV_HEADER}\nGA,1,2\n");
        assert!(read_csv(short.as_bytes()).is_err());
    }

    #[test]
    fn test_best_for_picks_lowest_fitness() {
        let mut better = ga_record();
        better.best_fitness = -2000.0;
        let records = vec![ga_record(), better.clone()];
        assert_eq!(best_for(&records, Algorithm::Ga), Some(&better));
        assert_eq!(best_for(&records, Algorithm::Pso), None);
    }

    #[test]
    fn test_param_spaces_are_valid() {
        for c in ga_param_space(Bounds::default()) {
            assert!(c.validate().is_ok(), "{c:?}");
        }
        for c in pso_param_space(Bounds::default()) {
            assert!(c.validate().is_ok(), "{c:?}");
        }
    }

    #[test]
    fn test_sweep_resets_between_runs() {
        let mut ev = Evaluator::new(W22);
        let configs = vec![
            PsoConfig::default().with_swarm_size(4).with_iterations(5),
            PsoConfig::default().with_swarm_size(6).with_iterations(5),
        ];
        let records = Sweep::new(2, Some(7)).unwrap().run_pso(&mut ev, &configs).unwrap();
        assert_eq!(records.len(), 4);
        // Counters only hold the last run.
        assert_eq!(ev.stats().evaluations, 30);
        for r in &records {
            assert!(r.evaluations_to_find_min >= 1);
            assert!(r.evaluations_to_find_min <= (r.pop_or_swarm_size * 5) as u64);
        }
    }

    #[test]
    fn test_sweep_is_reproducible_with_seed() {
        let configs = vec![GaConfig::default()
            .with_population_size(10)
            .with_generations(10)];
        let mut ev = Evaluator::new(W22);
        let sweep = Sweep::new(1, Some(3)).unwrap();
        let a = sweep.run_ga(&mut ev, &configs).unwrap();
        let b = sweep.run_ga(&mut ev, &configs).unwrap();
        assert_eq!(a[0].best_fitness, b[0].best_fitness);
        assert_eq!(a[0].total_ops_to_find_min, b[0].total_ops_to_find_min);
    }

    #[test]
    fn test_sweep_propagates_config_error() {
        let configs = vec![GaConfig::default().with_population_size(3)];
        let mut ev = Evaluator::new(W22);
        assert_eq!(
            Sweep::default().run_ga(&mut ev, &configs).unwrap_err(),
            ConfigError::PopulationSize(3)
        );
    }

    #[test]
    fn test_zero_repeats_rejected() {
        assert_eq!(
            Sweep::new(0, Some(1)).unwrap_err(),
            ConfigError::ZeroIterations { what: "repeats" }
        );
        let sweep = Sweep {
            repeats: 0,
            seed: None,
        };
        let mut ev = Evaluator::new(W22);
        let configs = vec![PsoConfig::default().with_swarm_size(4).with_iterations(5)];
        assert!(sweep.run_pso(&mut ev, &configs).is_err());
        assert_eq!(ev.stats().evaluations, 0);
    }

    #[test]
    fn test_each_phase_starts_at_base_seed() {
        let base = 11;
        let pso_config = PsoConfig::default().with_swarm_size(6).with_iterations(8);
        let ga_config = GaConfig::default()
            .with_population_size(6)
            .with_generations(8);
        let sweep = Sweep::new(2, Some(base)).unwrap();
        let mut ev = Evaluator::new(W22);
        let ga = sweep.run_ga(&mut ev, &[ga_config.clone()]).unwrap();
        let pso = sweep.run_pso(&mut ev, &[pso_config.clone()]).unwrap();

        // The PSO phase does not continue from where the GA phase stopped.
        let mut standalone = Evaluator::new(W22);
        let expected =
            PsoRunner::run(&mut standalone, &pso_config.clone().with_seed(base)).unwrap();
        assert_eq!(pso[0].best_fitness, expected.gbest_val);
        let expected = SweepRecord::from_pso(&pso_config, &expected);
        assert_eq!(pso[0].total_ops_to_find_min, expected.total_ops_to_find_min);

        let mut standalone = Evaluator::new(W22);
        let second = GaRunner::run(&mut standalone, &ga_config.with_seed(base + 1)).unwrap();
        assert_eq!(ga[1].best_fitness, second.best_fitness);
    }
}
