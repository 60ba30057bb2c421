use serde::{Deserialize, Serialize};
use std::fmt;

/// Access right fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    #[default]
    ReadOnly,
    WriteOnly,
    Execute,
    ReadWrite,
}

impl Access {
    pub fn permits(self, operation: Operation) -> bool {
        matches!(
            (self, operation),
            (Access::ReadOnly | Access::ReadWrite, Operation::Read)
                | (Access::WriteOnly | Access::ReadWrite, Operation::Write)
                | (Access::Execute, Operation::Execute)
        )
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Access::ReadOnly => "read-only",
            Access::WriteOnly => "write-only",
            Access::Execute => "execute-only",
            Access::ReadWrite => "read-write",
        };
        f.write_str(name)
    }
}

/// Guarded resource operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Read,
    Write,
    Execute,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::Execute => "execute",
        };
        f.write_str(name)
    }
}

/// Physical unit attached to a resource, display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    #[default]
    None,
    Date,
    Hours,
    Percent,
    AmpereHour,
    Volt,
    DecibelMilliwatt,
    Hertz,
    Seconds,
    Decibel,
    Millisecond,
    Bytes,
    Celsius,
    Watt,
    Kelvin,
    Ampere,
    KilowattHour,
    Lumen,
    WattHour,
    Var,
    VarHour,
    Lux,
    KilovarHour,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::None | Unit::Date => "",
            Unit::Hours => "h",
            Unit::Percent => "%",
            Unit::AmpereHour => "Ah",
            Unit::Volt => "V",
            Unit::DecibelMilliwatt => "dBm",
            Unit::Hertz => "Hz",
            Unit::Seconds => "s",
            Unit::Decibel => "dB",
            Unit::Millisecond => "ms",
            Unit::Bytes => "B",
            Unit::Celsius => "Cel",
            Unit::Watt => "W",
            Unit::Kelvin => "K",
            Unit::Ampere => "A",
            Unit::KilowattHour => "kWh",
            Unit::Lumen => "lm",
            Unit::WattHour => "Wh",
            Unit::Var => "var",
            Unit::VarHour => "varh",
            Unit::Lux => "lx",
            Unit::KilovarHour => "kvarh",
        }
    }
}
