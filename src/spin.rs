//! Spin animation and winner selection.
//!
//! A spin starts from the wheel's current rotation, adds a fixed number of full
//! turns plus a random fraction of one turn, and eases the rotation towards that
//! target with a cubic ease-out over a fixed duration. The engine does not own a
//! timer: the event loop calls [`SpinEngine::tick`] once per frame and the engine
//! reports where the wheel is and, on the last frame, which slice won.

use rand::Rng;
use std::f64::consts::{PI, TAU};
use std::time::{Duration, Instant};

use crate::config::SpinConfig;

/// Nudge applied before locating the pointer so an angle that lands exactly on a
/// slice edge resolves to a single slice.
const EDGE_EPSILON: f64 = 1e-9;

/// Maps any angle (radians) into `[0, 2π)`.
pub fn normalize(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid may round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Cubic ease-out: fast at the start, settling gently at `p = 1`.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Returns the index of the slice resting under the pointer for a wheel rotated
/// by `angle` with `slice_count` equal slices.
///
/// The pointer sits at the right edge of the wheel and slice 0 starts at the
/// left edge when the rotation is zero. An empty wheel is drawn as a single
/// placeholder slice, so a count of zero behaves like a count of one.
pub fn winning_index(angle: f64, slice_count: usize) -> usize {
    let n = slice_count.max(1);
    let angle_step = TAU / n as f64;
    let relative = normalize(PI - angle - EDGE_EPSILON);

    ((relative / angle_step).floor() as usize) % n
}

/// What the wheel is doing on a given frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinFrame {
    /// No spin in progress; the wheel rests at its last rotation.
    Idle,
    /// Mid-animation rotation.
    Turning { rotation: f64 },
    /// Final frame of a spin. The engine is idle again after returning this.
    Finished { rotation: f64, winner: usize },
}

#[derive(Debug, Clone, Copy)]
struct Animation {
    start: f64,
    extra: f64,
    started_at: Instant,
}

/// Drives one wheel's rotation across spins.
#[derive(Debug, Clone)]
pub struct SpinEngine {
    rotation: f64,
    turns: u32,
    duration: Duration,
    animation: Option<Animation>,
}

impl SpinEngine {
    pub fn new(config: &SpinConfig) -> Self {
        Self {
            rotation: 0.0,
            turns: config.turns,
            duration: Duration::from_millis(config.duration_ms),
            animation: None,
        }
    }

    /// Current normalized rotation of the wheel.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_spinning(&self) -> bool {
        self.animation.is_some()
    }

    /// Fraction of the running spin that has elapsed, or `None` when idle.
    pub fn progress(&self, now: Instant) -> Option<f64> {
        self.animation.map(|anim| self.progress_of(&anim, now))
    }

    /// Starts a spin unless one is already running.
    ///
    /// Returns `false` (and changes nothing) while a spin is in progress.
    pub fn request_spin<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) -> bool {
        if self.animation.is_some() {
            return false;
        }

        let extra = TAU * f64::from(self.turns) + rng.random::<f64>() * TAU;
        self.animation = Some(Animation {
            start: self.rotation,
            extra,
            started_at: now,
        });

        tracing::debug!(start = self.rotation, extra, "spin started");
        true
    }

    /// Advances the animation to `now`.
    ///
    /// `slice_count` is only consulted on the final frame, to resolve the winner.
    pub fn tick(&mut self, now: Instant, slice_count: usize) -> SpinFrame {
        let Some(anim) = self.animation else {
            return SpinFrame::Idle;
        };

        let progress = self.progress_of(&anim, now);
        self.rotation = normalize(anim.start + anim.extra * ease_out_cubic(progress));

        if progress < 1.0 {
            return SpinFrame::Turning {
                rotation: self.rotation,
            };
        }

        self.animation = None;
        SpinFrame::Finished {
            rotation: self.rotation,
            winner: winning_index(self.rotation, slice_count),
        }
    }

    fn progress_of(&self, anim: &Animation, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(anim.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine() -> SpinEngine {
        SpinEngine::new(&SpinConfig {
            turns: 20,
            duration_ms: 10_000,
        })
    }

    #[test]
    fn test_normalize_wraps_into_range() {
        assert!((normalize(TAU + 1.0) - 1.0).abs() < 1e-12);
        assert!((normalize(-1.0) - (TAU - 1.0)).abs() < 1e-12);
        assert_eq!(normalize(0.0), 0.0);
        assert_eq!(normalize(TAU), 0.0);
        assert!(normalize(-1e-18) < TAU);
    }

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
        // Clamped outside [0, 1]
        assert_eq!(ease_out_cubic(-3.0), 0.0);
        assert_eq!(ease_out_cubic(7.0), 1.0);
    }

    #[test]
    fn test_ease_out_cubic_is_monotonic() {
        let mut last = 0.0;
        for step in 1..=100_u32 {
            let eased = ease_out_cubic(f64::from(step) / 100.0);
            assert!(eased >= last);
            last = eased;
        }
    }

    #[test]
    fn test_winning_index_three_entries_at_rest() {
        // floor((π - ε) / (2π/3)) = floor(1.5) = 1
        assert_eq!(winning_index(0.0, 3), 1);
    }

    #[test]
    fn test_winning_index_is_deterministic() {
        for i in 0..50_i32 {
            let angle = f64::from(i) * 0.37;
            assert_eq!(winning_index(angle, 7), winning_index(angle, 7));
        }
    }

    #[test]
    fn test_winning_index_slice_edge_resolves_below() {
        // Rotation π puts the boundary between the last and first slice under
        // the pointer; the epsilon pushes it into the last slice.
        assert_eq!(winning_index(PI, 4), 3);
    }

    #[test]
    fn test_winning_index_empty_wheel_is_placeholder() {
        assert_eq!(winning_index(1.234, 0), 0);
        assert_eq!(winning_index(5.0, 1), 0);
    }

    #[test]
    fn test_winning_index_always_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..40 {
            for _ in 0..50 {
                let angle = rng.random_range(-20.0..20.0);
                assert!(winning_index(angle, n) < n);
            }
        }
    }

    #[test]
    fn test_request_spin_ignored_while_spinning() {
        let mut engine = engine();
        let mut rng = StdRng::seed_from_u64(1);
        let t0 = Instant::now();

        assert!(engine.request_spin(&mut rng, t0));
        assert!(engine.is_spinning());
        assert!(!engine.request_spin(&mut rng, t0 + Duration::from_secs(1)));
    }

    #[test]
    fn test_tick_when_idle() {
        let mut engine = engine();
        assert_eq!(engine.tick(Instant::now(), 5), SpinFrame::Idle);
        assert_eq!(engine.progress(Instant::now()), None);
    }

    #[test]
    fn test_spin_runs_to_completion() {
        let mut engine = engine();
        let mut rng = StdRng::seed_from_u64(42);
        let t0 = Instant::now();
        engine.request_spin(&mut rng, t0);

        let mid = engine.tick(t0 + Duration::from_secs(5), 5);
        assert!(matches!(mid, SpinFrame::Turning { .. }));
        assert!(engine.is_spinning());
        assert_eq!(engine.progress(t0 + Duration::from_secs(5)), Some(0.5));

        match engine.tick(t0 + Duration::from_secs(10), 5) {
            SpinFrame::Finished { rotation, winner } => {
                assert_eq!(winner, winning_index(rotation, 5));
                assert!(winner < 5);
                assert_eq!(engine.rotation(), rotation);
            }
            other => panic!("expected finished frame, got {other:?}"),
        }
        assert!(!engine.is_spinning());
        assert_eq!(engine.tick(t0 + Duration::from_secs(11), 5), SpinFrame::Idle);
    }

    #[test]
    fn test_final_rotation_matches_target() {
        let mut engine = engine();
        let mut rng = StdRng::seed_from_u64(3);
        let mut mirror = StdRng::seed_from_u64(3);
        let t0 = Instant::now();

        engine.request_spin(&mut rng, t0);
        let fraction = mirror.random::<f64>();
        let expected = normalize(TAU * 20.0 + fraction * TAU);

        engine.tick(t0 + Duration::from_secs(30), 2);
        assert!((engine.rotation() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_carries_over_between_spins() {
        let mut engine = engine();
        let mut rng = StdRng::seed_from_u64(11);
        let t0 = Instant::now();

        engine.request_spin(&mut rng, t0);
        engine.tick(t0 + Duration::from_secs(10), 3);
        let first = engine.rotation();

        let t1 = t0 + Duration::from_secs(20);
        engine.request_spin(&mut rng, t1);
        // First frame of the next spin starts where the last one ended
        match engine.tick(t1, 3) {
            SpinFrame::Turning { rotation } => assert!((rotation - first).abs() < 1e-9),
            other => panic!("expected turning frame, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_duration_finishes_on_first_tick() {
        let mut engine = SpinEngine::new(&SpinConfig {
            turns: 1,
            duration_ms: 0,
        });
        let mut rng = StdRng::seed_from_u64(5);
        let t0 = Instant::now();
        engine.request_spin(&mut rng, t0);

        assert!(matches!(engine.tick(t0, 4), SpinFrame::Finished { .. }));
    }
}
