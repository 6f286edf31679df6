//! Core mobility types: terminal/cell identifiers, radio quality, application quality.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Radio Network Temporary Identifier of a connected terminal.
///
/// The RNTI is assigned by the serving cell and identifies the terminal for
/// the duration of its connection. It is opaque to the decision engine; the
/// engine only uses it as a table key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerminalId(u16);

impl TerminalId {
    /// Creates a terminal identifier from a raw RNTI value.
    pub const fn new(rnti: u16) -> Self {
        Self(rnti)
    }

    /// Returns the raw RNTI value.
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Debug for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TerminalId({})", self.0)
    }
}

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for TerminalId {
    fn from(rnti: u16) -> Self {
        Self::new(rnti)
    }
}

/// Physical cell identifier.
///
/// The value `0` is reserved to mean "no cell"/unset and never identifies a
/// real cell; [`CellId::NONE`] and [`CellId::is_none`] make that convention
/// explicit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(u16);

impl CellId {
    /// The reserved "no cell" value.
    pub const NONE: CellId = CellId(0);

    /// Creates a cell identifier from a raw value.
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns the raw cell identifier value.
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns true if this is the reserved "no cell" value.
    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "CellId(none)")
        } else {
            write!(f, "CellId({})", self.0)
        }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for CellId {
    fn from(id: u16) -> Self {
        Self::new(id)
    }
}

impl Default for CellId {
    fn default() -> Self {
        Self::NONE
    }
}

/// Quantized Reference Signal Received Quality measurement.
///
/// RSRQ is reported on the standard quantized range 0..=34 (3GPP TS 36.133),
/// higher is better. Construction clamps out-of-range raw values to the
/// maximum rather than rejecting them, since reports carrying them are
/// already validated by the decoding layer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rsrq(u8);

impl Rsrq {
    /// Smallest reportable value.
    pub const MIN: Rsrq = Rsrq(0);
    /// Largest reportable value.
    pub const MAX: Rsrq = Rsrq(34);

    /// Creates an RSRQ measurement, clamping to the reportable range.
    pub const fn new(value: u8) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Returns the quantized value.
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a float, for weighted scoring.
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }
}

impl fmt::Debug for Rsrq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rsrq({})", self.0)
    }
}

impl fmt::Display for Rsrq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Application-quality sample for a terminal or a cell.
///
/// `qoe` is a mean-opinion-score style experience value on the 1-5 scale;
/// `qos` is a packet delivery ratio in [0, 1]. A missing sample is
/// represented as `Option::None` at the provider boundary; the evaluator
/// normalizes absence to [`QualitySample::ZERO`] before scoring, so a cell
/// with no reported quality competes with zeroed application terms.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QualitySample {
    /// Quality of Experience (MOS scale, 1-5).
    pub qoe: f64,
    /// Quality of Service (packet delivery ratio, 0-1).
    pub qos: f64,
}

impl QualitySample {
    /// The all-zero sample that absent provider data normalizes to.
    pub const ZERO: QualitySample = QualitySample { qoe: 0.0, qos: 0.0 };

    /// Creates a quality sample.
    pub const fn new(qoe: f64, qos: f64) -> Self {
        Self { qoe, qos }
    }
}

impl fmt::Display for QualitySample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "qoe={:.2} qos={:.2}", self.qoe, self.qos)
    }
}

/// Weights of the composite handover score.
///
/// These are hand-tuned policy coefficients on an uncalibrated scale and are
/// deliberately not required to sum to 1; the composite score is a weighted
/// sum, not a probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    /// Weight applied to the quantized RSRQ value.
    pub rsrq: f64,
    /// Weight applied to the QoE (MOS) term.
    pub qoe: f64,
    /// Weight applied to the QoS (PDR) term.
    pub qos: f64,
}

impl WeightVector {
    /// Creates a weight vector.
    pub const fn new(rsrq: f64, qoe: f64, qos: f64) -> Self {
        Self { rsrq, qoe, qos }
    }

    /// Computes the composite score for one candidate.
    pub fn composite(&self, rsrq: f64, qoe: f64, qos: f64) -> f64 {
        rsrq * self.rsrq + qoe * self.qoe + qos * self.qos
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            rsrq: 0.2,
            qoe: 0.4,
            qos: 0.1,
        }
    }
}
