//! Stagger timing for collections
//!
//! Computes the per-item delay used when a list animates in sequence, like
//! dropdown rows sliding in one after another.

/// Direction for stagger animations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaggerDirection {
    /// Animate first to last
    #[default]
    Forward,
    /// Animate last to first
    Reverse,
    /// Animate from center outward
    FromCenter,
}

/// Per-item delay calculator
#[derive(Clone, Copy, Debug)]
pub struct Stagger {
    /// Delay between consecutive items (ms)
    pub each_ms: f32,
    /// Delay before the first item (ms)
    pub start_ms: f32,
    /// Order items animate in
    pub direction: StaggerDirection,
}

impl Stagger {
    /// Stagger with the given gap between items
    pub fn each(each_ms: f32) -> Self {
        Self {
            each_ms,
            start_ms: 0.0,
            direction: StaggerDirection::Forward,
        }
    }

    /// Delay the whole sequence
    pub fn start_at(mut self, start_ms: f32) -> Self {
        self.start_ms = start_ms;
        self
    }

    /// Animate last to first
    pub fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    /// Animate from center outward
    pub fn from_center(mut self) -> Self {
        self.direction = StaggerDirection::FromCenter;
        self
    }

    /// Calculate the delay for a specific item index
    pub fn delay_for_index(&self, index: usize, total: usize) -> f32 {
        let effective_index = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
            StaggerDirection::FromCenter => {
                let center = total / 2;
                if index <= center {
                    center - index
                } else {
                    index - center
                }
            }
        };
        self.start_ms + self.each_ms * effective_index as f32
    }
}
