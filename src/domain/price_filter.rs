//! Two-handle price range filter.
//!
//! The lower handle moves along a logarithmic curve so that cheap items, where
//! most filtering happens, get fine-grained control. The upper handle is linear
//! and doubles as the "no limit" toggle: parking it on the domain maximum
//! disables the upper bound.
//!
//! Everything here is a pure function of the domain and the caller-held filter
//! value; the UI owns storage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of the normalized lower-handle control range.
pub const SLIDER_POSITIONS: f64 = 100.0;
/// Step of the linear upper handle, in chaos.
pub const UPPER_BOUND_STEP: f64 = 10.0;

/// Active price filter. `max == None` means no upper bound.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceFilterValue {
    pub min: f64,
    pub max: Option<f64>,
}

impl PriceFilterValue {
    /// Row predicate: inclusive on both ends.
    pub fn includes(&self, price: f64) -> bool {
        price >= self.min && self.max.map_or(true, |max| price <= max)
    }

    pub fn describe(&self) -> String {
        match self.max {
            Some(max) => format!(
                "Showing items between {} and {} chaos",
                format_bound(self.min),
                format_bound(max)
            ),
            None => format!(
                "Showing items from {} chaos and above",
                format_bound(self.min)
            ),
        }
    }
}

/// Slider-facing view of a filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceRange {
    pub lower: f64,
    /// Equals the domain maximum while the upper bound is disabled.
    pub upper: f64,
    pub upper_enabled: bool,
}

/// Rejected domain bounds.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum InvalidPriceDomain {
    #[error("price domain bounds must be finite (got {min}..={max})")]
    NotFinite { min: f64, max: f64 },
    #[error("price domain min {min} exceeds max {max}")]
    Inverted { min: f64, max: f64 },
    /// The lower handle's curve is `ln(price + 1)`.
    #[error("price domain min {min} must be greater than -1")]
    BelowLogFloor { min: f64 },
}

/// Fixed value range of the filtered field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DomainBounds")]
pub struct PriceDomain {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct DomainBounds {
    min: f64,
    max: f64,
}

impl TryFrom<DomainBounds> for PriceDomain {
    type Error = InvalidPriceDomain;

    fn try_from(bounds: DomainBounds) -> Result<Self, Self::Error> {
        Self::try_new(bounds.min, bounds.max)
    }
}

impl Default for PriceDomain {
    fn default() -> Self {
        Self::new(0.0, 600.0)
    }
}

impl PriceDomain {
    /// # Panics
    ///
    /// Panics if either bound is not finite, `min > max`, or `min <= -1`.
    pub fn new(min: f64, max: f64) -> Self {
        match Self::try_new(min, max) {
            Ok(domain) => domain,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(min: f64, max: f64) -> Result<Self, InvalidPriceDomain> {
        if !min.is_finite() || !max.is_finite() {
            return Err(InvalidPriceDomain::NotFinite { min, max });
        }
        if min > max {
            return Err(InvalidPriceDomain::Inverted { min, max });
        }
        if min <= -1.0 {
            return Err(InvalidPriceDomain::BelowLogFloor { min });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn current_range(&self, filter: Option<&PriceFilterValue>) -> PriceRange {
        match filter {
            None => PriceRange {
                lower: self.min,
                upper: self.max,
                upper_enabled: false,
            },
            Some(value) => PriceRange {
                lower: value.min,
                upper: value.max.unwrap_or(self.max),
                upper_enabled: value.max.map_or(false, |max| max != self.max),
            },
        }
    }

    /// Highest value the lower handle can reach for `range`.
    pub fn effective_max(&self, range: &PriceRange) -> f64 {
        if range.upper_enabled {
            range.upper
        } else {
            self.max
        }
    }

    pub fn update_lower_bound(&self, new_lower: f64, range: &PriceRange) -> PriceRange {
        PriceRange {
            lower: new_lower.min(self.effective_max(range)),
            ..*range
        }
    }

    /// Moving the handle onto the domain maximum disables the upper bound;
    /// any other value enables it.
    pub fn update_upper_bound(&self, new_upper: f64, range: &PriceRange) -> PriceRange {
        let upper_enabled = new_upper != self.max;
        PriceRange {
            upper: if upper_enabled { new_upper } else { self.max },
            upper_enabled,
            ..*range
        }
    }

    /// Lower-handle position in `[0, 100]` for a price.
    pub fn lower_bound_slider_value(&self, price: f64, range: &PriceRange) -> f64 {
        linear_to_log(price, self.min, self.effective_max(range))
    }

    /// Price for a lower-handle position in `[0, 100]`.
    pub fn lower_bound_linear_value(&self, position: f64, range: &PriceRange) -> f64 {
        log_to_linear(position, self.min, self.effective_max(range))
    }

    /// Collapses a range back to "no filter" when it sits on the defaults.
    pub fn normalized_filter_value(&self, range: &PriceRange) -> Option<PriceFilterValue> {
        if range.lower == self.min && (!range.upper_enabled || range.upper == self.max) {
            return None;
        }

        Some(PriceFilterValue {
            min: range.lower,
            max: range.upper_enabled.then_some(range.upper),
        })
    }

    pub fn has_active_filter(&self, filter: Option<&PriceFilterValue>) -> bool {
        let Some(value) = filter else {
            return false;
        };
        let range = self.current_range(filter);
        value.min != self.min || (range.upper_enabled && value.max != Some(self.max))
    }
}

/// Clears the filter entirely.
pub fn reset_filter() -> Option<PriceFilterValue> {
    None
}

/// Maps a price onto the logarithmic `[0, 100]` control range.
pub fn linear_to_log(value: f64, min: f64, effective_max: f64) -> f64 {
    if value <= min {
        return 0.0;
    }
    let log_min = (min + 1.0).ln();
    let log_max = (effective_max + 1.0).ln();
    if log_max <= log_min {
        return 0.0;
    }

    let position = ((value + 1.0).ln() - log_min) / (log_max - log_min) * SLIDER_POSITIONS;
    position.clamp(0.0, SLIDER_POSITIONS)
}

/// Inverse of [`linear_to_log`], rounded to whole chaos.
pub fn log_to_linear(position: f64, min: f64, effective_max: f64) -> f64 {
    let log_min = (min + 1.0).ln();
    let log_max = (effective_max + 1.0).ln();
    if log_max <= log_min {
        return min;
    }

    let position = position.clamp(0.0, SLIDER_POSITIONS);
    let value = (log_min + (position / SLIDER_POSITIONS) * (log_max - log_min)).exp() - 1.0;
    value.round().clamp(min, effective_max)
}

fn format_bound(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
