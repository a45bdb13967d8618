//! Run configuration: engine parameters plus fitness weights.

use serde::{Deserialize, Deserializer, Serialize};

use super::fitness::FitnessWeights;
use crate::error::Result;
use crate::ga::GaConfig;

/// Everything a timetabling run can be tuned with.
///
/// Deserializes from any subset of fields; missing ones keep their default.
/// This holds inside `ga` too: a partial `ga` section is laid over the
/// timetable engine defaults, not over [`GaConfig::default`].
///
/// ```
/// use u_timetable::timetable::TimetableConfig;
///
/// let config = TimetableConfig::default();
/// assert_eq!(config.ga.max_generations, 16_750);
/// assert_eq!(config.ga.seed, Some(13));
/// assert_eq!(config.weights.base_score, 10_000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    #[serde(deserialize_with = "deserialize_ga")]
    pub ga: GaConfig,
    pub weights: FitnessWeights,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            ga: default_ga(),
            weights: FitnessWeights::default(),
        }
    }
}

/// Engine defaults tuned for weekly timetables: a long run with a fixed
/// seed so repeated runs publish the same schedule.
fn default_ga() -> GaConfig {
    GaConfig::default()
        .with_max_generations(16_750)
        .with_seed(13)
}

/// Fields of a `ga` section. Absent fields keep the timetable defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GaOverlay {
    population_size: Option<usize>,
    max_generations: Option<usize>,
    tournament_size: Option<usize>,
    crossover_rate: Option<f64>,
    mutation_rate: Option<f64>,
    gene_mutation_rate: Option<f64>,
    archive_size: Option<usize>,
    parallel: Option<bool>,
    /// Outer `None`: field absent. `Some(None)`: explicit `null`.
    #[serde(deserialize_with = "present")]
    seed: Option<Option<u64>>,
}

impl GaOverlay {
    fn apply(self, mut ga: GaConfig) -> GaConfig {
        if let Some(v) = self.population_size {
            ga.population_size = v;
        }
        if let Some(v) = self.max_generations {
            ga.max_generations = v;
        }
        if let Some(v) = self.tournament_size {
            ga.tournament_size = v;
        }
        if let Some(v) = self.crossover_rate {
            ga.crossover_rate = v;
        }
        if let Some(v) = self.mutation_rate {
            ga.mutation_rate = v;
        }
        if let Some(v) = self.gene_mutation_rate {
            ga.gene_mutation_rate = v;
        }
        if let Some(v) = self.archive_size {
            ga.archive_size = v;
        }
        if let Some(v) = self.parallel {
            ga.parallel = v;
        }
        if let Some(v) = self.seed {
            ga.seed = v;
        }
        ga
    }
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Option<u64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u64>::deserialize(deserializer).map(Some)
}

fn deserialize_ga<'de, D>(deserializer: D) -> std::result::Result<GaConfig, D::Error>
where
    D: Deserializer<'de>,
{
    GaOverlay::deserialize(deserializer).map(|overlay| overlay.apply(default_ga()))
}

impl TimetableConfig {
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.ga.validate()?;
        self.weights.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ga::GaError;

    #[test]
    fn test_defaults_validate() {
        let config = TimetableConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ga.population_size, 100);
        assert_eq!(config.ga.tournament_size, 3);
        assert_eq!(config.ga.crossover_rate, 0.7);
        assert_eq!(config.ga.mutation_rate, 0.2);
        assert_eq!(config.ga.gene_mutation_rate, 0.2);
    }

    #[test]
    fn test_partial_document() {
        let json = r#"{
            "ga": { "population_size": 40 },
            "weights": { "gap": 30 }
        }"#;
        let config: TimetableConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.ga.population_size, 40);
        assert_eq!(config.ga.seed, Some(13));
        assert_eq!(config.ga.max_generations, 16_750);
        assert_eq!(config.ga.tournament_size, 3);
        assert_eq!(config.weights.gap, 30.0);
        assert_eq!(config.weights.isolated_block, 350.0);
    }

    #[test]
    fn test_ga_section_overrides() {
        let json = r#"{ "ga": { "seed": 99, "max_generations": 10, "parallel": false } }"#;
        let config: TimetableConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.ga.seed, Some(99));
        assert_eq!(config.ga.max_generations, 10);
        assert!(!config.ga.parallel);
        assert_eq!(config.ga.population_size, 100);

        // An explicit null asks for a random seed.
        let config: TimetableConfig =
            serde_json::from_str(r#"{ "ga": { "seed": null } }"#).unwrap();
        assert_eq!(config.ga.seed, None);
        assert_eq!(config.ga.max_generations, 16_750);
    }

    #[test]
    fn test_empty_ga_section_uses_timetable_defaults() {
        let config: TimetableConfig = serde_json::from_str(r#"{ "ga": {} }"#).unwrap();
        assert_eq!(config, TimetableConfig::default());
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = TimetableConfig::default().with_ga(default_ga().with_population_size(12));
        let json = serde_json::to_string(&config).unwrap();
        let back: TimetableConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_missing_ga_section_uses_timetable_defaults() {
        let config: TimetableConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TimetableConfig::default());
    }

    #[test]
    fn test_validate_reports_source() {
        let config =
            TimetableConfig::default().with_ga(GaConfig::default().with_population_size(1));
        assert!(matches!(
            config.validate(),
            Err(Error::Ga(GaError::InvalidConfig(_)))
        ));

        let weights = FitnessWeights {
            ideal_block_max: 1,
            ..FitnessWeights::default()
        };
        let config = TimetableConfig::default().with_weights(weights);
        assert!(matches!(config.validate(), Err(Error::InvalidWeights(_))));
    }
}
