//! Actuator channels and remote parameter identifiers.
//!
//! The remote side addresses actuators by name; that name is resolved to a
//! closed [`Channel`] enum exactly once at the remote-write boundary and
//! never re-parsed per call.

use core::fmt;

/// One addressable boolean actuator routed through the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Light-triggered general-purpose LED.
    Led,
    /// Button/remote-toggled general-purpose LED.
    Led2,
    /// Gas indicator: high concentration.
    Red,
    /// Gas indicator: moderate concentration.
    Yellow,
    /// Gas indicator: low concentration.
    Blue,
}

impl Channel {
    /// Number of gate channels.
    pub const COUNT: usize = 5;

    /// Index into the gate's cached-state table.
    pub const fn index(self) -> usize {
        match self {
            Self::Led => 0,
            Self::Led2 => 1,
            Self::Red => 2,
            Self::Yellow => 3,
            Self::Blue => 4,
        }
    }

    /// Resolve a remote parameter name. Unknown names yield `None`; the
    /// boundary ignores them rather than surfacing an error.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "LED" => Some(Self::Led),
            "LED2" => Some(Self::Led2),
            "RED" => Some(Self::Red),
            "YELLOW" => Some(Self::Yellow),
            "BLUE" => Some(Self::Blue),
            _ => None,
        }
    }

    /// Wire name used when reporting this channel's state.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Led => "LED",
            Self::Led2 => "LED2",
            Self::Red => "RED",
            Self::Yellow => "YELLOW",
            Self::Blue => "BLUE",
        }
    }

    /// The remote parameter this channel reports under.
    pub const fn param(self) -> Param {
        match self {
            Self::Led => Param::Led,
            Self::Led2 => Param::Led2,
            Self::Red => Param::Red,
            Self::Yellow => Param::Yellow,
            Self::Blue => Param::Blue,
        }
    }
}

/// Remote parameters this core reports to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Led,
    Led2,
    Red,
    Yellow,
    Blue,
    Temperature,
    Humidity,
    GasPpm,
    LightPercent,
    MetalDetection,
}

impl Param {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Led => "LED",
            Self::Led2 => "LED2",
            Self::Red => "RED",
            Self::Yellow => "YELLOW",
            Self::Blue => "BLUE",
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::GasPpm => "MQ135",
            Self::LightPercent => "Light (ADC)",
            Self::MetalDetection => "Metal Detection",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value attached to a remote report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Float(f32),
    Text(&'static str),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Float(v) => write!(f, "{v:.2}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
