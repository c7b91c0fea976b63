//! First-order low-pass filtering for tilt input.
//!
//! The smoothing state is an explicit value owned by the caller — typically
//! the tracking session — and passed into every update. Nothing here holds
//! hidden state, so pause/resume and fresh-start semantics are entirely the
//! caller's decision via [`FilterState::reset`].

/// Apply one low-pass step: `previous + alpha * (input - previous)`.
///
/// `alpha` close to 1 tracks the input faithfully with high jitter; close
/// to 0 is smoother but laggier. The response to a step input decays
/// geometrically at rate `(1 - alpha)` per sample.
pub fn low_pass(previous: f64, input: f64, alpha: f64) -> f64 {
    previous + alpha * (input - previous)
}

/// Per-axis smoothing state.
///
/// Defaults to the resting origin. State persists for as long as the owner
/// keeps it; it is never reset implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterState {
    /// Filtered x-axis value.
    pub x: f64,
    /// Filtered y-axis value.
    pub y: f64,
}

impl FilterState {
    /// Advance both axes by one sample.
    pub fn advance(&mut self, x_input: f64, y_input: f64, alpha: f64) {
        self.x = low_pass(self.x, x_input, alpha);
        self.y = low_pass(self.y, y_input, alpha);
    }

    /// Return to the resting origin.
    pub fn reset(&mut self) {
        *self = FilterState::default();
    }
}

/// Closed-form step response: the fraction of a constant input reached
/// after `n` samples starting from zero, `1 - (1 - alpha)^n`.
pub fn step_response(alpha: f64, n: u32) -> f64 {
    1.0 - (1.0 - alpha).powi(n as i32)
}

/// Number of samples until the step response reaches `fraction` of a
/// constant input. Used for settling-time diagnostics.
pub fn samples_to_settle(alpha: f64, fraction: f64) -> u32 {
    let fraction = fraction.clamp(0.0, 1.0 - 1e-12);
    if fraction == 0.0 || alpha >= 1.0 {
        return 0;
    }
    ((1.0 - fraction).ln() / (1.0 - alpha).ln()).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step() {
        // From zero, one sample moves alpha of the way to the input.
        assert!((low_pass(0.0, 1.0, 0.15) - 0.15).abs() < 1e-12);
        assert!((low_pass(0.0, -1.0, 0.15) + 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_iterated_filter_matches_closed_form() {
        let alpha = 0.15;
        let input = 1.3;
        let mut filtered = 0.0;
        for n in 1..=60u32 {
            filtered = low_pass(filtered, input, alpha);
            let expected = input * step_response(alpha, n);
            assert!(
                (filtered - expected).abs() < 1e-9,
                "n={n}: {filtered} vs {expected}"
            );
        }
    }

    #[test]
    fn test_convergence_is_monotonic_without_overshoot() {
        let alpha = 0.15;
        let input = 1.8;
        let mut filtered = 0.0;
        let mut previous = 0.0;
        for _ in 0..200 {
            filtered = low_pass(filtered, input, alpha);
            assert!(filtered >= previous, "must approach monotonically");
            assert!(filtered <= input, "must never overshoot the input");
            previous = filtered;
        }
        assert!((filtered - input).abs() < 1e-9);
    }

    #[test]
    fn test_state_advance_is_per_axis() {
        let mut state = FilterState::default();
        state.advance(-1.0, 0.5, 0.15);
        assert!((state.x + 0.15).abs() < 1e-12);
        assert!((state.y - 0.075).abs() < 1e-12);
    }

    #[test]
    fn test_reset_returns_to_origin() {
        let mut state = FilterState { x: 0.4, y: -0.2 };
        state.reset();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_step_response_endpoints() {
        assert_eq!(step_response(0.15, 0), 0.0);
        assert!((step_response(0.15, 1) - 0.15).abs() < 1e-12);
        assert!(step_response(0.15, 10_000) > 0.999_999);
    }

    #[test]
    fn test_settling_estimate() {
        // ln(0.01) / ln(0.85) is about 28.3, so 29 samples reach 99%.
        assert_eq!(samples_to_settle(0.15, 0.99), 29);
        assert!(step_response(0.15, 29) >= 0.99);
        assert!(step_response(0.15, 28) < 0.99);
    }
}
