//! Octave sums of gradient noise.
//!
//! Octave `i` samples the engine at frequency `lacunarity^i` with amplitude
//! `gain^i`, where `gain = lacunarity^(−H)`. Larger `H` gives smoother fields,
//! the noise-side counterpart of a smaller roughness factor.
use super::gradient::{CoordinateGradients, GradientNoise, GradientSource};
use super::weight::{SumOfSquares, WeightKernel};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Fbm<G = CoordinateGradients, W = SumOfSquares> {
    pub hurst: f64,
    pub octaves: u32,
    pub lacunarity: f64,
    noise: GradientNoise<G, W>,
}

impl Fbm {
    /// fBm over the default engine with lacunarity 2.
    pub fn new(hurst: f64, octaves: u32) -> Self {
        Self::with_noise(GradientNoise::default(), hurst, octaves)
    }
}

impl<G: GradientSource, W: WeightKernel> Fbm<G, W> {
    pub fn with_noise(noise: GradientNoise<G, W>, hurst: f64, octaves: u32) -> Self {
        Self { hurst, octaves, lacunarity: 2.0, noise }
    }

    /// Per-octave amplitude decay.
    #[inline]
    fn gain(&self) -> f64 {
        self.lacunarity.powf(-self.hurst)
    }

    /// Evaluate the octave sum at `point`. Unscaled: the first octave has
    /// amplitude 1.
    pub fn sample(&self, point: &[f64]) -> Result<f64> {
        let gain = self.gain();
        let mut scaled = point.to_vec();
        let mut value = 0.0;
        let mut amp = 1.0;
        let mut freq = 1.0;
        for _ in 0..self.octaves {
            for (s, p) in scaled.iter_mut().zip(point) {
                *s = p * freq;
            }
            value += amp * self.noise.sample(&scaled)?;
            amp *= gain;
            freq *= self.lacunarity;
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::perlin;

    #[test]
    fn single_octave_is_the_engine() {
        let fbm = Fbm::new(0.75, 1);
        for p in [[0.3, 0.9], [4.2, -1.7]] {
            assert_eq!(fbm.sample(&p).unwrap(), perlin(&p).unwrap());
        }
    }

    #[test]
    fn produces_non_constant_output() {
        let fbm = Fbm::new(0.75, 6);
        let values: Vec<f64> = (0..64).map(|i| fbm.sample(&[i as f64 * 0.11, 0.37]).unwrap()).collect();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(max - min > 0.01);
    }

    #[test]
    fn zero_octaves_is_flat() {
        assert_eq!(Fbm::new(0.5, 0).sample(&[1.3, 2.1]).unwrap(), 0.0);
    }

    #[test]
    fn higher_hurst_decays_faster() {
        let smooth = Fbm::new(0.9, 4);
        let rough = Fbm::new(0.3, 4);
        assert!(smooth.gain() < rough.gain());
    }
}
