//! Request-driven orchestration of the generators.
//!
//! A [`GenerationRequest`] names one generator and carries its parameters; it
//! deserialises from JSON so front ends can keep requests in files. Every call
//! to [`Generator::generate`] owns a fresh RNG: seeded when the request gives
//! a seed, from entropy otherwise.
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fractal::{generate_profile, DiamondSquare, Displacement, MutationSchedule, Refiner};
use crate::grid::Grid;
use crate::literal::parse_grid_literal;
use crate::noise::{noise_height_map, NoiseMapParams};
use crate::profile::Profile;

// ── Parameters ────────────────────────────────────────────────────────────────

/// Diamond-square height map. Defaults: side 129, randomness 1.0 halving per level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightMapParams {
    pub size_factor: u32,
    pub initial_randomness: f64,
    pub roughness_factor: f64,
    /// Also perturb square-phase centres.
    pub square_perturbation: bool,
    pub seed: Option<u64>,
}

impl Default for HeightMapParams {
    fn default() -> Self {
        Self {
            size_factor: 7,
            initial_randomness: 1.0,
            roughness_factor: 0.5,
            square_perturbation: false,
            seed: None,
        }
    }
}

/// Repeated definition increases of an externally supplied grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineParams {
    /// Seed grid in literal form, e.g. `"0,1;1,0"`.
    pub grid: String,
    /// Randomness of the first increase.
    pub randomness: f64,
    /// Multiplier applied to the randomness after each increase.
    pub auto_roughness: f64,
    pub steps: usize,
    pub seed: Option<u64>,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            grid: "0,1;1,0".to_string(),
            randomness: 0.5,
            auto_roughness: 0.5,
            steps: 6,
            seed: None,
        }
    }
}

/// Midpoint-displacement profile. The schedule length sets the iteration count.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileParams {
    pub schedule: MutationSchedule,
    pub displacement: Displacement,
    pub seed: Option<u64>,
}

// ── Requests and results ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationRequest {
    HeightMap(HeightMapParams),
    Refine(RefineParams),
    Profile(ProfileParams),
    NoiseMap(NoiseMapParams),
}

impl GenerationRequest {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidRequest(e.to_string()))
    }

    fn seed(&self) -> Option<u64> {
        match self {
            Self::HeightMap(p) => p.seed,
            Self::Refine(p) => p.seed,
            Self::Profile(p) => p.seed,
            Self::NoiseMap(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum GeneratedField {
    Grid(Grid),
    Profile(Profile),
}

impl GeneratedField {
    pub fn min_height(&self) -> f64 {
        match self {
            Self::Grid(g) => g.min_height(),
            Self::Profile(p) => p.min_height(),
        }
    }

    pub fn max_height(&self) -> f64 {
        match self {
            Self::Grid(g) => g.max_height(),
            Self::Profile(p) => p.max_height(),
        }
    }
}

// ── Orchestrator ──────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Generator;

impl Generator {
    pub fn new() -> Self {
        Self
    }

    /// Run the generator named by `request`.
    pub fn generate(&self, request: &GenerationRequest) -> Result<GeneratedField> {
        let mut rng = match request.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        match request {
            GenerationRequest::HeightMap(p) => {
                let grid = DiamondSquare::new(p.initial_randomness, p.roughness_factor)
                    .with_square_perturbation(p.square_perturbation)
                    .generate(p.size_factor, &mut rng)?;
                Ok(GeneratedField::Grid(grid))
            }
            GenerationRequest::Refine(p) => {
                let seed_grid = parse_grid_literal(&p.grid)?;
                let mut refiner = Refiner::new(seed_grid, p.randomness, p.auto_roughness);
                for _ in 0..p.steps {
                    refiner.refine(&mut rng)?;
                }
                Ok(GeneratedField::Grid(refiner.into_grid()))
            }
            GenerationRequest::Profile(p) => {
                let profile = generate_profile(
                    p.schedule.len(),
                    |i| p.schedule.rate_at(i),
                    p.displacement,
                    &mut rng,
                )?;
                Ok(GeneratedField::Profile(profile))
            }
            GenerationRequest::NoiseMap(p) => {
                let (grid, _) = noise_height_map(p)?;
                Ok(GeneratedField::Grid(grid))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_height_map_is_reproducible() {
        let req = GenerationRequest::HeightMap(HeightMapParams { size_factor: 4, seed: Some(42), ..Default::default() });
        let generator = Generator::new();
        let a = generator.generate(&req).unwrap();
        let b = generator.generate(&req).unwrap();
        assert_eq!(a, b);
        match a {
            GeneratedField::Grid(g) => assert_eq!((g.rows, g.cols), (17, 17)),
            other => panic!("expected grid, got {other:?}"),
        }
    }

    #[test]
    fn refine_request_grows_seed_grid() {
        let req = GenerationRequest::from_json_str(
            r#"{"kind": "refine", "grid": "0,1;1,0", "steps": 3, "seed": 1}"#,
        )
        .unwrap();
        let GeneratedField::Grid(g) = Generator::new().generate(&req).unwrap() else {
            panic!("expected grid");
        };
        assert_eq!(g.rows, 9);
        assert_eq!(g.get(0, 0), 0.0);
        assert_eq!(g.get(0, 8), 1.0);
        assert_eq!(g.get(8, 0), 1.0);
        assert_eq!(g.get(8, 8), 0.0);
    }

    #[test]
    fn profile_request_uses_schedule_length() {
        let req = GenerationRequest::from_json_str(
            r#"{"kind": "profile", "schedule": {"type": "explicit", "rates": [2, 2, 1.5, 1]}, "displacement": "multiplicative", "seed": 3}"#,
        )
        .unwrap();
        let GeneratedField::Profile(p) = Generator::new().generate(&req).unwrap() else {
            panic!("expected profile");
        };
        assert_eq!(p.len(), 17);
    }

    #[test]
    fn noise_map_request_uses_defaults() {
        let req = GenerationRequest::from_json_str(r#"{"kind": "noise_map", "width": 24, "height": 12}"#).unwrap();
        let field = Generator::new().generate(&req).unwrap();
        let GeneratedField::Grid(g) = &field else {
            panic!("expected grid");
        };
        assert_eq!((g.rows, g.cols), (12, 24));
        assert!(field.max_height() <= 1.0 + 1e-12 && field.min_height() >= -1e-12);
    }

    #[test]
    fn malformed_request_is_invalid() {
        assert!(matches!(
            GenerationRequest::from_json_str(r#"{"kind": "teapot"}"#),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn bad_refine_literal_propagates() {
        let req = GenerationRequest::Refine(RefineParams { grid: "0,1;2".into(), ..Default::default() });
        assert!(matches!(Generator::new().generate(&req), Err(Error::RaggedGrid { .. })));
    }
}
