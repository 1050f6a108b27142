//! Switch kinds and the kind-keyed sharpness lookup.
//!
//! Purpose
//! -------
//! Name the four switch kinds the scheduler can propose and tie each kind
//! that actually starts a blend to its sharpness through an explicit lookup
//! table, so no code path ever indexes a tuple by a kind's numeric code.
//!
//! Key behaviors
//! -------------
//! - [`SwitchKind`] carries the legacy numeric codes (`NONE = -1`,
//!   `GRADUAL = 0`, `ABRUPT = 1`, `PREDEFINED = 2`) only for display and
//!   export; they never select a sharpness.
//! - [`SharpnessTable`] answers "which sharpness drives a blend of this kind"
//!   via [`SharpnessTable::get`], returning `None` for `NONE` and for a
//!   `PREDEFINED` kind with no transition-map entry behind it.
//! - [`ActiveSwitch`] pairs the active kind with the transition duration of a
//!   predefined switch and renders the event label (`PREDEFINED_<duration>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Gradual and abrupt switches share every code path; they differ only in
//!   which sharpness the table returns.
//! - Sharpness values stored in the table are raw configuration values;
//!   flooring to the minimum step happens in the weight schedule.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the numeric codes and names, and check that each kind
//!   looks up its own slot regardless of declaration order.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of regime switch proposed or active in a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SwitchKind {
    /// No switch.
    #[default]
    None,
    /// Random switch using the gradual sharpness.
    Gradual,
    /// Random switch using the abrupt sharpness.
    Abrupt,
    /// Scheduled switch from a transition-map entry.
    Predefined,
}

impl SwitchKind {
    /// Legacy numeric code used in exported tables.
    pub const fn code(self) -> i8 {
        match self {
            SwitchKind::None => -1,
            SwitchKind::Gradual => 0,
            SwitchKind::Abrupt => 1,
            SwitchKind::Predefined => 2,
        }
    }

    /// Upper-case label used in event logs.
    pub const fn name(self) -> &'static str {
        match self {
            SwitchKind::None => "NONE",
            SwitchKind::Gradual => "GRADUAL",
            SwitchKind::Abrupt => "ABRUPT",
            SwitchKind::Predefined => "PREDEFINED",
        }
    }

    /// `true` for every kind that starts a blend.
    pub const fn is_switch(self) -> bool {
        !matches!(self, SwitchKind::None)
    }
}

impl std::fmt::Display for SwitchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// SharpnessTable — per-kind weight increments.
///
/// Fields
/// ------
/// - `gradual`: `f64`
///   Increment used by [`SwitchKind::Gradual`] blends (slower convergence).
/// - `abrupt`: `f64`
///   Increment used by [`SwitchKind::Abrupt`] blends (faster convergence).
/// - `predefined`: `Option<f64>`
///   Increment derived from the transition-map entry that triggered a
///   [`SwitchKind::Predefined`] blend; `None` outside such a decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharpnessTable {
    pub gradual: f64,
    pub abrupt: f64,
    pub predefined: Option<f64>,
}

impl SharpnessTable {
    pub fn new(gradual: f64, abrupt: f64) -> SharpnessTable {
        SharpnessTable { gradual, abrupt, predefined: None }
    }

    /// Copy of this table with the predefined slot filled.
    pub fn with_predefined(self, predefined: f64) -> SharpnessTable {
        SharpnessTable { predefined: Some(predefined), ..self }
    }

    /// Sharpness driving a blend of `kind`, if any.
    pub fn get(&self, kind: SwitchKind) -> Option<f64> {
        match kind {
            SwitchKind::None => None,
            SwitchKind::Gradual => Some(self.gradual),
            SwitchKind::Abrupt => Some(self.abrupt),
            SwitchKind::Predefined => self.predefined,
        }
    }
}

/// ActiveSwitch — the switch currently driving the blend.
///
/// `duration` is only set for predefined switches and only feeds the label.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActiveSwitch {
    pub kind: SwitchKind,
    pub duration: Option<usize>,
    pub sharpness: f64,
}

impl ActiveSwitch {
    /// The steady-state placeholder (`NONE`, no duration).
    pub fn none() -> ActiveSwitch {
        ActiveSwitch::default()
    }

    /// Label recorded in the event log, e.g. `GRADUAL` or `PREDEFINED_4`.
    pub fn label(&self) -> String {
        match (self.kind, self.duration) {
            (SwitchKind::Predefined, Some(duration)) => format!("PREDEFINED_{duration}"),
            (kind, _) => kind.name().to_string(),
        }
    }
}
