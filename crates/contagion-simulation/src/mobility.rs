//! Time-varying mobility policy
//!
//! A schedule maps the step index to the integration time step used for that
//! step. A smaller `dt` means particles travel less per step, which is how
//! "shelter-in-place" is modelled; lifting restrictions raises it again.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Time step once restrictions are lifted
pub const OPEN_DT: f64 = 0.036;

/// Time step under partial restrictions
pub const PARTIAL_DT: f64 = 0.025;

/// Time step while sheltering in place
pub const SHELTER_DT: f64 = 0.015;

/// Mobility level of one phase of a schedule
#[derive(Debug, Clone, Copy, PartialEq)]
enum Level {
    /// The configured base time step
    Base,
    Open,
    Partial,
    Shelter,
}

impl Level {
    fn dt(self, base_dt: f64) -> f64 {
        match self {
            Level::Base => base_dt,
            Level::Open => OPEN_DT,
            Level::Partial => PARTIAL_DT,
            Level::Shelter => SHELTER_DT,
        }
    }
}

/// Phase table: each entry applies from its start step until the next entry
type Phases = &'static [(u64, Level)];

const CONSTANT: Phases = &[(0, Level::Base)];
const STOP_SHORT: Phases = &[(0, Level::Base), (200, Level::Open)];
const STOP_MID: Phases = &[(0, Level::Base), (300, Level::Open)];
const STOP_LONG: Phases = &[(0, Level::Base), (400, Level::Open)];
const LIGHTSWITCH: Phases = &[
    (0, Level::Base),
    (80, Level::Open),
    (120, Level::Shelter),
    (200, Level::Open),
    (240, Level::Shelter),
    (320, Level::Open),
    (360, Level::Shelter),
    (440, Level::Open),
];
const LIGHTSWITCH_4_21: Phases = &[
    (0, Level::Base),
    (200, Level::Partial),
    (300, Level::Shelter),
    (500, Level::Open),
];
const LIGHTSWITCH_6_21: Phases = &[
    (0, Level::Base),
    (160, Level::Partial),
    (240, Level::Shelter),
    (400, Level::Partial),
    (480, Level::Shelter),
    (640, Level::Open),
];
const LIGHTSWITCH_6_21_FREQUENT: Phases = &[
    (0, Level::Base),
    (80, Level::Partial),
    (120, Level::Shelter),
    (200, Level::Partial),
    (240, Level::Shelter),
    (320, Level::Open),
];

/// Named population-wide mobility schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MobilitySchedule {
    /// Base time step for every step
    #[default]
    None,
    /// Base time step until step 200, then open
    StopShort,
    /// Base time step until step 300, then open
    StopMid,
    /// Base time step until step 400, then open
    StopLong,
    /// Alternating open and shelter phases from step 80, open for good from 440
    Lightswitch,
    /// Partial reopening at 200, shelter again at 300, open from 500
    Lightswitch4_21,
    /// Two partial/shelter cycles starting at 160, open from 640
    Lightswitch6_21,
    /// Two short partial/shelter cycles starting at 80, open from 320
    Lightswitch6_21Frequent,
}

impl MobilitySchedule {
    pub const ALL: [MobilitySchedule; 8] = [
        MobilitySchedule::None,
        MobilitySchedule::StopShort,
        MobilitySchedule::StopMid,
        MobilitySchedule::StopLong,
        MobilitySchedule::Lightswitch,
        MobilitySchedule::Lightswitch4_21,
        MobilitySchedule::Lightswitch6_21,
        MobilitySchedule::Lightswitch6_21Frequent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MobilitySchedule::None => "none",
            MobilitySchedule::StopShort => "stop_short",
            MobilitySchedule::StopMid => "stop_mid",
            MobilitySchedule::StopLong => "stop_long",
            MobilitySchedule::Lightswitch => "lightswitch",
            MobilitySchedule::Lightswitch4_21 => "lightswitch_4_21",
            MobilitySchedule::Lightswitch6_21 => "lightswitch_6_21",
            MobilitySchedule::Lightswitch6_21Frequent => "lightswitch_6_21_frequent",
        }
    }

    fn phases(self) -> Phases {
        match self {
            MobilitySchedule::None => CONSTANT,
            MobilitySchedule::StopShort => STOP_SHORT,
            MobilitySchedule::StopMid => STOP_MID,
            MobilitySchedule::StopLong => STOP_LONG,
            MobilitySchedule::Lightswitch => LIGHTSWITCH,
            MobilitySchedule::Lightswitch4_21 => LIGHTSWITCH_4_21,
            MobilitySchedule::Lightswitch6_21 => LIGHTSWITCH_6_21,
            MobilitySchedule::Lightswitch6_21Frequent => LIGHTSWITCH_6_21_FREQUENT,
        }
    }

    /// Effective time step at `step`, given the configured base time step.
    pub fn dt_at(self, step: u64, base_dt: f64) -> f64 {
        self.phases()
            .iter()
            .rev()
            .find(|(start, _)| *start <= step)
            .map_or(base_dt, |(_, level)| level.dt(base_dt))
    }
}

impl fmt::Display for MobilitySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MobilitySchedule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MobilitySchedule::ALL
            .into_iter()
            .find(|schedule| schedule.name() == s)
            .ok_or_else(|| Error::UnknownSchedule(s.to_string()))
    }
}

impl TryFrom<String> for MobilitySchedule {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<MobilitySchedule> for String {
    fn from(schedule: MobilitySchedule) -> Self {
        schedule.name().to_string()
    }
}
