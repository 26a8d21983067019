const SIZE_PX: (f64, f64) = (5.0, 15.0);
const OPACITY: (f64, f64) = (0.05, 0.15);
const POSITION_PCT: (f64, f64) = (0.0, 100.0);
const DURATION_S: (f64, f64) = (10.0, 20.0);
const DRIFT_PX: (f64, f64) = (-50.0, 50.0);

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub size_px: f64,
    pub opacity: f64,
    pub left_pct: f64,
    pub top_pct: f64,
    pub duration_s: f64,
    pub drift_px: f64,
}

impl Particle {
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self {
            size_px: in_range(rng, SIZE_PX),
            opacity: in_range(rng, OPACITY),
            left_pct: in_range(rng, POSITION_PCT),
            top_pct: in_range(rng, POSITION_PCT),
            duration_s: in_range(rng, DURATION_S),
            drift_px: in_range(rng, DRIFT_PX),
        }
    }

    pub fn style(&self) -> String {
        format!(
            "width: {size:.2}px; height: {size:.2}px; background: rgba(255, 255, 255, {opacity:.3}); \
             left: {left:.2}%; top: {top:.2}%; animation-duration: {duration:.2}s; --drift: {drift:.2}px;",
            size = self.size_px,
            opacity = self.opacity,
            left = self.left_pct,
            top = self.top_pct,
            duration = self.duration_s,
            drift = self.drift_px,
        )
    }
}

fn in_range(rng: &mut fastrand::Rng, bounds: (f64, f64)) -> f64 {
    bounds.0 + rng.f64() * (bounds.1 - bounds.0)
}

pub fn generate(rng: &mut fastrand::Rng, count: usize) -> Vec<Particle> {
    (0..count).map(|_| Particle::random(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PARTICLE_COUNT;

    #[test]
    fn generates_requested_count_within_ranges() {
        let mut rng = fastrand::Rng::with_seed(7);
        let particles = generate(&mut rng, DEFAULT_PARTICLE_COUNT);

        assert_eq!(particles.len(), 30);
        for particle in &particles {
            assert!((5.0..15.0).contains(&particle.size_px));
            assert!((0.05..0.15).contains(&particle.opacity));
            assert!((0.0..100.0).contains(&particle.left_pct));
            assert!((0.0..100.0).contains(&particle.top_pct));
            assert!((10.0..20.0).contains(&particle.duration_s));
            assert!((-50.0..50.0).contains(&particle.drift_px));
        }
    }

    #[test]
    fn particles_are_independently_parameterized() {
        let mut rng = fastrand::Rng::with_seed(11);
        let particles = generate(&mut rng, 2);

        assert_ne!(particles[0], particles[1]);
    }

    #[test]
    fn style_is_square_and_carries_drift() {
        let particle = Particle {
            size_px: 8.0,
            opacity: 0.1,
            left_pct: 25.0,
            top_pct: 75.0,
            duration_s: 12.5,
            drift_px: -20.0,
        };

        let style = particle.style();
        assert!(style.contains("width: 8.00px; height: 8.00px;"));
        assert!(style.contains("rgba(255, 255, 255, 0.100)"));
        assert!(style.contains("animation-duration: 12.50s;"));
        assert!(style.contains("--drift: -20.00px;"));
    }
}
