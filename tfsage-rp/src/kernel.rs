//! Distance-decay kernel of the regulatory potential model.

use crate::consts::{DEFAULT_DECAY, WINDOW_DECAYS};
use crate::errors::{Result, RpError};

///
/// Potential of a peak `distance` bp away from a locus: `2^(-distance / decay)`.
///
/// Equals 1 at distance 0 and halves every `decay` bp.
///
#[inline]
pub fn potential(distance: f64, decay: f64) -> f64 {
    (-distance / decay).exp2()
}

/// The kernel with its summation window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayKernel {
    decay: f64,
    window: u32,
}

impl DecayKernel {
    pub fn new(decay: f64) -> Result<Self> {
        if !decay.is_finite() || decay <= 0.0 {
            return Err(RpError::InvalidDecay(decay));
        }
        let window = (decay * WINDOW_DECAYS).min(u32::MAX as f64) as u32;
        Ok(DecayKernel { decay, window })
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Largest distance, in bp, that still contributes.
    pub fn window(&self) -> u32 {
        self.window
    }

    /// Kernel value inside the window, zero outside it.
    #[inline]
    pub fn contribution(&self, distance: u32) -> f64 {
        if distance > self.window {
            return 0.0;
        }
        potential(distance as f64, self.decay)
    }
}

impl Default for DecayKernel {
    fn default() -> Self {
        DecayKernel {
            decay: DEFAULT_DECAY,
            window: (DEFAULT_DECAY * WINDOW_DECAYS) as u32,
        }
    }
}
