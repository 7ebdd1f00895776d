//! Length values.
//!
//! [XSL 1.1 § 5.9.13 Definitions of Units of Measure](https://www.w3.org/TR/xsl11/)
//!
//! Absolute lengths are stored as integer millipoints (1/1000 pt) so that
//! sums such as `start-indent = margin + padding + border` are exact.
//! Percentages that cannot be resolved while properties are bound (they
//! depend on the containing area) are carried along with their base.

use core::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Millipoints per point.
pub const MILLIPOINTS_PER_POINT: i64 = 1000;

/// Default source resolution in dots per inch, used to convert `px`.
pub const DEFAULT_SOURCE_RESOLUTION: f64 = 72.0;

/// Initial value of `font-size`.
/// [§ 7.9.4 "font-size"](https://www.w3.org/TR/xsl11/#font-size) "Initial: medium"
pub const DEFAULT_FONT_SIZE_PT: f64 = 12.0;

/// Units accepted after a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LengthUnit {
    /// Points, 1/72 inch.
    Pt,
    /// Pixels, relative to the source resolution.
    Px,
    /// Millimetres.
    Mm,
    /// Centimetres.
    Cm,
    /// Inches.
    In,
    /// Picas, 12 points.
    Pc,
    /// Font-relative: the computed font-size.
    Em,
}

impl LengthUnit {
    /// Number of points in one unit. `None` for font-relative units, which
    /// need a font size to resolve.
    #[must_use]
    pub fn points_per_unit(self) -> Option<f64> {
        match self {
            Self::Pt => Some(1.0),
            Self::Px => Some(72.0 / DEFAULT_SOURCE_RESOLUTION),
            Self::Mm => Some(72.0 / 25.4),
            Self::Cm => Some(72.0 / 2.54),
            Self::In => Some(72.0),
            Self::Pc => Some(12.0),
            Self::Em => None,
        }
    }
}

/// What a percentage is a percentage of.
///
/// [§ 5.9.13](https://www.w3.org/TR/xsl11/) "Percentages are
/// relative to some other value, which is defined for each property."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PercentBase {
    /// The font-size of this formatting object.
    FontSize,
    /// The font-size of the parent formatting object.
    ParentFontSize,
    /// The inline-progression-dimension of the containing block.
    ContainingBlockWidth,
    /// The block-progression-dimension of the containing block.
    ContainingBlockHeight,
}

/// A percentage awaiting its base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Percentage {
    /// The number before the `%`.
    pub value: f64,
    /// What it is relative to.
    pub base: PercentBase,
}

/// A length: a fixed part in millipoints plus an optional unresolved
/// percentage.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Length {
    millipoints: i64,
    percentage: Option<Percentage>,
}

impl Length {
    /// Zero length.
    pub const ZERO: Self = Self {
        millipoints: 0,
        percentage: None,
    };

    /// An absolute length in millipoints.
    #[must_use]
    pub const fn from_millipoints(millipoints: i64) -> Self {
        Self {
            millipoints,
            percentage: None,
        }
    }

    /// An absolute length in points, rounded to the nearest millipoint.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_points(points: f64) -> Self {
        Self::from_millipoints((points * 1000.0).round() as i64)
    }

    /// An absolute length from a number and an absolute unit. Returns `None`
    /// for font-relative units.
    #[must_use]
    pub fn from_unit(value: f64, unit: LengthUnit) -> Option<Self> {
        unit.points_per_unit()
            .map(|factor| Self::from_points(value * factor))
    }

    /// An unresolved percentage.
    #[must_use]
    pub const fn percentage(value: f64, base: PercentBase) -> Self {
        Self {
            millipoints: 0,
            percentage: Some(Percentage { value, base }),
        }
    }

    /// True if no percentage is pending.
    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        self.percentage.is_none()
    }

    /// The value in millipoints, if absolute.
    #[must_use]
    pub const fn millipoints(&self) -> Option<i64> {
        if self.percentage.is_none() {
            Some(self.millipoints)
        } else {
            None
        }
    }

    /// The value in points, if absolute.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn points(&self) -> Option<f64> {
        self.millipoints().map(|mpt| mpt as f64 / 1000.0)
    }

    /// The fixed part, ignoring any pending percentage.
    #[must_use]
    pub const fn fixed_millipoints(&self) -> i64 {
        self.millipoints
    }

    /// The pending percentage, if any.
    #[must_use]
    pub const fn pending_percentage(&self) -> Option<Percentage> {
        self.percentage
    }

    /// Resolve against `base` (in millipoints).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn resolve(&self, base: i64) -> i64 {
        match self.percentage {
            Some(pct) => self.millipoints + (pct.value * base as f64 / 100.0).round() as i64,
            None => self.millipoints,
        }
    }

    /// Add two lengths. Fails if both carry percentages of different bases.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        let percentage = match (self.percentage, other.percentage) {
            (None, None) => None,
            (Some(p), None) | (None, Some(p)) => Some(p),
            (Some(a), Some(b)) if a.base == b.base => Some(Percentage {
                value: a.value + b.value,
                base: a.base,
            }),
            (Some(_), Some(_)) => return None,
        };
        Some(Self {
            millipoints: self.millipoints.checked_add(other.millipoints)?,
            percentage,
        })
    }

    /// Multiply by a plain number.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn scale(self, factor: f64) -> Self {
        Self {
            millipoints: (self.millipoints as f64 * factor).round() as i64,
            percentage: self.percentage.map(|p| Percentage {
                value: p.value * factor,
                base: p.base,
            }),
        }
    }
}

/// Format millipoints as a compact point value, e.g. `12pt` or `0.5pt`.
#[allow(clippy::cast_precision_loss)]
fn write_points(f: &mut fmt::Formatter<'_>, millipoints: i64) -> fmt::Result {
    if millipoints % MILLIPOINTS_PER_POINT == 0 {
        write!(f, "{}pt", millipoints / MILLIPOINTS_PER_POINT)
    } else {
        write!(f, "{}pt", millipoints as f64 / 1000.0)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percentage {
            None => write_points(f, self.millipoints),
            Some(pct) if self.millipoints == 0 => write!(f, "{}%({})", pct.value, pct.base),
            Some(pct) => {
                write_points(f, self.millipoints)?;
                write!(f, " + {}%({})", pct.value, pct.base)
            }
        }
    }
}
