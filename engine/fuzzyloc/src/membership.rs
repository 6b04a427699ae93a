//! Membership functions and fuzzification.
//!
//! A [`MembershipRange`] describes one named fuzzy set over a slice of an
//! input variable's domain; [`membership`] computes the degree to which a
//! crisp value belongs to that set under a given [`FunctionType`], and
//! [`fuzzify`] evaluates a whole family of ranges at once.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Shape applied uniformly to every range of every variable in one model
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionType {
    Triangle,
    Trapezoid,
    Gaussian,
    Sigmoid,
}

/// One named fuzzy set over `[start, end]`, with an optional peak.
///
/// When `peak` is absent each shape derives its own default: triangle and
/// trapezoid center on the midpoint, gaussian centers on the midpoint with
/// `sigma = (end - start) / 6`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipRange {
    pub name: String,
    pub start: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak: Option<f64>,
    pub end: f64,
}

impl MembershipRange {
    pub fn new(name: impl Into<String>, start: f64, peak: Option<f64>, end: f64) -> Self {
        Self {
            name: name.into(),
            start,
            peak,
            end,
        }
    }
}

/// Compute the membership degree of `x` in `range` under `function_type`.
///
/// Always returns a value in `[0, 1]`. Values outside `[start, end]` have
/// degree zero, which also makes a degenerate `start > end` range (possible
/// mid-search before repair) evaluate to zero everywhere instead of failing.
pub fn membership(x: f64, function_type: FunctionType, range: &MembershipRange) -> f64 {
    let MembershipRange {
        start, peak, end, ..
    } = *range;

    if x < start || x > end {
        return 0.0;
    }
    // A zero-width range admits only x == start.
    if end - start <= 0.0 {
        return 1.0;
    }

    let degree = match function_type {
        FunctionType::Triangle => {
            let peak = peak.unwrap_or((start + end) / 2.0);
            if x == peak {
                1.0
            } else if x < peak {
                (x - start) / (peak - start)
            } else {
                (end - x) / (end - peak)
            }
        }
        FunctionType::Trapezoid => match peak {
            // The peak marks the start of the flat top; the top runs halfway
            // from the peak to the right edge.
            Some(peak) => {
                let flat_end = peak + (end - peak) / 2.0;
                if x >= peak && x <= flat_end {
                    1.0
                } else if x < peak {
                    (x - start) / (peak - start)
                } else {
                    (end - x) / (end - flat_end)
                }
            }
            // No peak: the flat top spans the middle third.
            None => {
                let first_third = start + (end - start) / 3.0;
                let second_third = end - (end - start) / 3.0;
                if x >= first_third && x <= second_third {
                    1.0
                } else if x < first_third {
                    (x - start) / (first_third - start)
                } else {
                    (end - x) / (end - second_third)
                }
            }
        },
        FunctionType::Gaussian => {
            // The spread divisor differs between the two branches (/3 with a
            // peak, /6 without). The asymmetry is kept as observed behavior;
            // see DESIGN.md.
            let (center, sigma) = match peak {
                Some(peak) => (peak, f64::max(peak - start, end - peak) / 3.0),
                None => ((start + end) / 2.0, (end - start) / 6.0),
            };
            if sigma <= 0.0 {
                // Peak pinned to one edge of a range it fully covers.
                if x == center {
                    1.0
                } else {
                    0.0
                }
            } else {
                (-(x - center).powi(2) / (2.0 * sigma.powi(2))).exp()
            }
        }
        FunctionType::Sigmoid => {
            let midpoint = (start + end) / 2.0;
            let scale = 10.0 / (end - start);
            1.0 / (1.0 + (-scale * (x - midpoint)).exp())
        }
    };

    degree.clamp(0.0, 1.0)
}

/// Fuzzify one crisp value against every range of a variable.
///
/// Every range is evaluated independently; ranges are not required to be
/// mutually exclusive, so overlaps simply produce several nonzero degrees.
pub fn fuzzify(
    value: f64,
    ranges: &[MembershipRange],
    function_type: FunctionType,
) -> BTreeMap<String, f64> {
    ranges
        .iter()
        .map(|range| (range.name.clone(), membership(value, function_type, range)))
        .collect()
}
