use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::damping::SingularPolicy;
use crate::face::Face;
use crate::rod::RodParams;
use crate::spline::DEFAULT_OFFSET;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("rod needs at least 2 particles, got {0}")]
	TooFewParticles(usize),
	#[error("{field} = {value} outside [{min}, {max}]")]
	OutOfRange {
		field: &'static str,
		value: f32,
		min: f32,
		max: f32,
	},
	#[error("timestep must be positive, got {0}")]
	NonPositiveTimestep(f32),
	#[error("invalid config: {0}")]
	Json(#[from] serde_json::Error),
}

fn check_range(
	field: &'static str,
	value: f32,
	min: f32,
	max: f32,
) -> Result<(), ConfigError> {
	// also rejects NaN
	if value >= min && value <= max {
		Ok(())
	} else {
		Err(ConfigError::OutOfRange {
			field,
			value,
			min,
			max,
		})
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RodConfig {
	pub particles: usize,
	pub stiffness: f32,
	pub dt: f32,
	pub gravity: [f32; 3],
	pub damping: f32,
	pub singular: SingularPolicy,
	pub sides: usize,
	pub radius: f32,
	pub curve_accuracy: usize,
	pub knot_offset: usize,
}

impl Default for RodConfig {
	fn default() -> Self {
		Self {
			particles: 24,
			stiffness: 0.5,
			dt: 0.01,
			gravity: [0.; 3],
			damping: 0.03,
			singular: SingularPolicy::default(),
			sides: 2,
			radius: 1.0,
			curve_accuracy: 10,
			knot_offset: DEFAULT_OFFSET,
		}
	}
}

impl RodConfig {
	pub fn from_json(text: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.particles < 2 {
			return Err(ConfigError::TooFewParticles(self.particles));
		}
		if !(self.dt > 0.) {
			return Err(ConfigError::NonPositiveTimestep(self.dt));
		}
		check_range("stiffness", self.stiffness, 0., 1.)?;
		check_range("damping", self.damping, 0., 1.)?;
		check_range("sides", self.sides as f32, 2., 64.)?;
		check_range("radius", self.radius, 0.01, 8.)?;
		check_range("curve_accuracy", self.curve_accuracy as f32, 1., 100.)?;
		check_range("knot_offset", self.knot_offset as f32, 1., 10.)?;
		Ok(())
	}

	pub fn params(&self) -> RodParams {
		RodParams::default()
			.with_dt(self.dt)
			.with_gravity(self.gravity.into())
			.with_stiffness(self.stiffness)
			.with_damping(self.damping)
			.with_singular_policy(self.singular)
	}

	pub fn face(&self) -> Face {
		Face::new(self.sides, self.radius)
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
	pub count: usize,
	// initial positions in [-extent, extent]^3
	pub extent: f32,
	pub seed: u64,
	pub min_separation: f32,
	// bodies are clamped into [-bound, bound]^3
	pub bound: f32,
	pub gravity: [f32; 3],
}

impl Default for SwarmConfig {
	fn default() -> Self {
		Self {
			count: 20,
			extent: 1.5,
			seed: 1,
			min_separation: 1.0,
			bound: 2.0,
			gravity: [0., -9.81, 0.],
		}
	}
}

impl SwarmConfig {
	pub fn from_json(text: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		check_range("extent", self.extent, 0., f32::MAX)?;
		check_range("min_separation", self.min_separation, 0., f32::MAX)?;
		check_range("bound", self.bound, f32::MIN_POSITIVE, f32::MAX)?;
		for g in self.gravity {
			check_range("gravity", g, -f32::MAX, f32::MAX)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_default_valid() {
		RodConfig::default().validate().unwrap();
	}

	#[test]
	fn test_partial_json() {
		let config =
			RodConfig::from_json(r#"{"particles": 8, "gravity": [0, -9.8, 0]}"#)
				.unwrap();
		assert_eq!(config.particles, 8);
		assert_eq!(config.gravity, [0., -9.8, 0.]);
		assert_eq!(config.sides, 2);
		assert_eq!(config.singular, SingularPolicy::PseudoInverse);
	}

	#[test]
	fn test_policy_json() {
		let config = RodConfig::from_json(r#"{"singular": "propagate"}"#).unwrap();
		assert_eq!(config.singular, SingularPolicy::Propagate);
	}

	#[test]
	fn test_rejects() {
		let err = RodConfig::from_json(r#"{"particles": 1}"#).unwrap_err();
		assert!(matches!(err, ConfigError::TooFewParticles(1)));
		let err = RodConfig::from_json(r#"{"stiffness": 1.5}"#).unwrap_err();
		assert!(matches!(err, ConfigError::OutOfRange { field: "stiffness", .. }));
		let err = RodConfig::from_json(r#"{"sides": 65}"#).unwrap_err();
		assert!(matches!(err, ConfigError::OutOfRange { field: "sides", .. }));
		let err = RodConfig::from_json(r#"{"dt": 0}"#).unwrap_err();
		assert!(matches!(err, ConfigError::NonPositiveTimestep(_)));
		let err = RodConfig::from_json("{").unwrap_err();
		assert!(matches!(err, ConfigError::Json(_)));
		eprintln!("{}", err);
	}

	#[test]
	fn test_params() {
		let config = RodConfig {
			stiffness: 0.8,
			..Default::default()
		};
		let params = config.params();
		assert_eq!(params.stiffness, 0.8);
		assert_eq!(params.dt, 0.01);
		assert_eq!(config.face().sides(), 2);
	}

	#[test]
	fn test_swarm_json() {
		let config = SwarmConfig::from_json(r#"{"count": 3, "seed": 7}"#).unwrap();
		assert_eq!(config.count, 3);
		assert_eq!(config.seed, 7);
		assert_eq!(config.bound, 2.0);
	}

	#[test]
	fn test_swarm_rejects() {
		SwarmConfig::default().validate().unwrap();
		let err = SwarmConfig::from_json(r#"{"extent": -1.0, "bound": -2.0}"#)
			.unwrap_err();
		assert!(matches!(err, ConfigError::OutOfRange { field: "extent", .. }));
		let err = SwarmConfig::from_json(r#"{"bound": 0}"#).unwrap_err();
		assert!(matches!(err, ConfigError::OutOfRange { field: "bound", .. }));
		let err = SwarmConfig::from_json(r#"{"min_separation": -0.5}"#).unwrap_err();
		assert!(matches!(
			err,
			ConfigError::OutOfRange {
				field: "min_separation",
				..
			}
		));
		let config = SwarmConfig {
			extent: f32::NAN,
			..Default::default()
		};
		assert!(config.validate().is_err());
		let config = SwarmConfig {
			gravity: [0., f32::INFINITY, 0.],
			..Default::default()
		};
		assert!(matches!(
			config.validate(),
			Err(ConfigError::OutOfRange { field: "gravity", .. })
		));
	}
}
