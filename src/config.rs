//! User-facing configuration (spec.md §6): everything the CLI and the
//! library entry point need to run a partitioning job, deserialized from a
//! YAML file via `serde_yaml` and validated before use.

use serde::{Deserialize, Serialize};

use crate::coarsening::rating::{CommunityAwareRating, EdgeFrequencyRating, HeavyEdgeRating, RatingFunction};
use crate::coarsening::CoarseningConfig;
use crate::error::{HypartError, Result};
use crate::ids::Weight;
use crate::objective::Objective;
use crate::recursive_bisection::RecursiveBisectionConfig;
use crate::rng::TieBreakingPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingFunctionKind {
    HeavyEdge,
    EdgeFrequency,
    CommunityAware,
}

impl RatingFunctionKind {
    pub fn build(self) -> Box<dyn RatingFunction> {
        match self {
            RatingFunctionKind::HeavyEdge => Box::new(HeavyEdgeRating),
            RatingFunctionKind::EdgeFrequency => Box::new(EdgeFrequencyRating),
            RatingFunctionKind::CommunityAware => Box::new(CommunityAwareRating),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub num_blocks: usize,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub objective: Objective,
    #[serde(default)]
    pub rating_function: RatingFunctionKind,
    #[serde(default)]
    pub tie_breaking: TieBreakingPolicy,
    #[serde(default = "default_contraction_limit")]
    pub coarsening_contraction_limit: usize,
    #[serde(default = "default_max_node_weight_fraction")]
    pub max_node_weight_fraction: f64,
    #[serde(default = "default_nruns")]
    pub nruns_initial_partitioning: usize,
    #[serde(default = "default_max_fm_passes")]
    pub max_fm_passes: usize,
}

fn default_epsilon() -> f64 {
    0.03
}
fn default_seed() -> u64 {
    0
}
fn default_contraction_limit() -> usize {
    160
}
fn default_max_node_weight_fraction() -> f64 {
    0.01
}
fn default_nruns() -> usize {
    10
}
fn default_max_fm_passes() -> usize {
    50
}

impl Default for Objective {
    fn default() -> Self {
        Objective::Km1
    }
}

impl Default for RatingFunctionKind {
    fn default() -> Self {
        RatingFunctionKind::HeavyEdge
    }
}

impl Default for TieBreakingPolicy {
    fn default() -> Self {
        TieBreakingPolicy::LastWins
    }
}

impl Config {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Config =
            serde_yaml::from_str(text).map_err(|e| HypartError::config_invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_blocks == 0 {
            return Err(HypartError::config_invalid("num_blocks must be at least 1"));
        }
        if !(self.epsilon >= 0.0 && self.epsilon < 1.0) {
            return Err(HypartError::config_invalid(format!(
                "epsilon must be in [0, 1), got {}",
                self.epsilon
            )));
        }
        if !(self.max_node_weight_fraction > 0.0 && self.max_node_weight_fraction <= 1.0) {
            return Err(HypartError::config_invalid(format!(
                "max_node_weight_fraction must be in (0, 1], got {}",
                self.max_node_weight_fraction
            )));
        }
        if self.coarsening_contraction_limit == 0 {
            return Err(HypartError::config_invalid(
                "coarsening_contraction_limit must be at least 1",
            ));
        }
        if self.nruns_initial_partitioning == 0 {
            return Err(HypartError::config_invalid(
                "nruns_initial_partitioning must be at least 1",
            ));
        }
        Ok(())
    }

    /// `total_weight * max_node_weight_fraction`, the absolute cap used by
    /// coarsening to stop a single contracted vertex from swallowing an
    /// unreasonable share of the input (spec.md §4.2).
    pub fn max_allowed_node_weight(&self, total_weight: Weight) -> Weight {
        ((total_weight as f64) * self.max_node_weight_fraction).ceil() as Weight
    }

    pub fn coarsening_config(&self, total_weight: Weight) -> CoarseningConfig {
        CoarseningConfig {
            contraction_limit: self.coarsening_contraction_limit,
            max_allowed_node_weight: self.max_allowed_node_weight(total_weight),
            tie_breaking: self.tie_breaking,
        }
    }

    pub fn recursive_bisection_config(&self, total_weight: Weight) -> RecursiveBisectionConfig {
        RecursiveBisectionConfig {
            coarsening_contraction_limit: self.coarsening_contraction_limit,
            max_allowed_node_weight: self.max_allowed_node_weight(total_weight),
            tie_breaking: self.tie_breaking,
            nruns_initial_partitioning: self.nruns_initial_partitioning,
            objective: self.objective,
            max_fm_passes: self.max_fm_passes,
            epsilon: self.epsilon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_yaml_with_defaults() {
        let config = Config::from_yaml_str("num_blocks: 4\n").unwrap();
        assert_eq!(config.num_blocks, 4);
        assert_eq!(config.objective, Objective::Km1);
        assert!((config.epsilon - 0.03).abs() < 1e-12);
    }

    #[test]
    fn rejects_zero_blocks() {
        let err = Config::from_yaml_str("num_blocks: 0\n").unwrap_err();
        assert!(matches!(err, HypartError::ConfigInvalid(_)));
    }

    #[test]
    fn rejects_epsilon_out_of_range() {
        let err = Config::from_yaml_str("num_blocks: 2\nepsilon: 1.5\n").unwrap_err();
        assert!(matches!(err, HypartError::ConfigInvalid(_)));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = Config::from_yaml_str("num_blocks: 2\nbogus_field: true\n").unwrap_err();
        assert!(matches!(err, HypartError::ConfigInvalid(_)));
    }
}
