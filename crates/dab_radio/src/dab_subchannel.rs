use std::fmt;
use dab_core::dab_error::{DabError, DabResult};
use crate::dab_protection_table::get_uep_protection;

// DOC: ETSI EN 300 401
// Referring to clause 6.2.1 - Basic sub-channel organization
// Both the start address and the long form sub-channel size are 10 bit fields
pub const MAX_SUBCHANNEL_SIZE: u32 = 1023;
pub const MAX_SUBCHANNEL_START_ADDRESS: u32 = 1023;

/// Equal error protection (EEP) profile and level carried by the long form of FIG 0/1.
/// Only these 8 combinations are defined so every derivation below is an exhaustive match.
///
/// | Profile | Levels | Bitrate step |
/// | ------- | ------ | ------------ |
/// | A (option 0) | 1A to 4A | 8 kbit/s |
/// | B (option 1) | 1B to 4B | 32 kbit/s |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EepProtection {
    A1,
    A2,
    A3,
    A4,
    B1,
    B2,
    B3,
    B4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EepProfile {
    A,
    B,
}

impl EepProtection {
    pub const ALL: [EepProtection; 8] = [
        EepProtection::A1, EepProtection::A2, EepProtection::A3, EepProtection::A4,
        EepProtection::B1, EepProtection::B2, EepProtection::B3, EepProtection::B4,
    ];

    /// Builds the protection from the raw 3 bit option and 2 bit protection level fields of FIG 0/1.
    pub fn from_fig_fields(option: u8, level: u8) -> DabResult<Self> {
        match (option, level) {
            (0, 0) => Ok(EepProtection::A1),
            (0, 1) => Ok(EepProtection::A2),
            (0, 2) => Ok(EepProtection::A3),
            (0, 3) => Ok(EepProtection::A4),
            (1, 0) => Ok(EepProtection::B1),
            (1, 1) => Ok(EepProtection::B2),
            (1, 2) => Ok(EepProtection::B3),
            (1, 3) => Ok(EepProtection::B4),
            (option, level) => Err(DabError::UnsupportedProtection { option, level }),
        }
    }

    pub fn profile(self) -> EepProfile {
        match self {
            EepProtection::A1 | EepProtection::A2 | EepProtection::A3 | EepProtection::A4 => EepProfile::A,
            EepProtection::B1 | EepProtection::B2 | EepProtection::B3 | EepProtection::B4 => EepProfile::B,
        }
    }

    /// Protection level from 1 (strongest) to 4 (weakest).
    pub fn level(self) -> u8 {
        match self {
            EepProtection::A1 | EepProtection::B1 => 1,
            EepProtection::A2 | EepProtection::B2 => 2,
            EepProtection::A3 | EepProtection::B3 => 3,
            EepProtection::A4 | EepProtection::B4 => 4,
        }
    }

    // DOC: ETSI EN 300 401
    // Referring to clause 6.2.1 - Basic sub-channel organization, tables 9 and 10
    // The sub-channel size is n*divisor CUs for a bitrate of n*multiplier kbit/s
    fn bitrate(self, length: u32) -> u32 {
        match self {
            EepProtection::A1 => length / 12 * 8,
            EepProtection::A2 => length / 8 * 8,
            EepProtection::A3 => length / 6 * 8,
            EepProtection::A4 => length / 4 * 8,
            EepProtection::B1 => length / 27 * 32,
            EepProtection::B2 => length / 21 * 32,
            EepProtection::B3 => length / 18 * 32,
            EepProtection::B4 => length / 15 * 32,
        }
    }

    fn capacity_units(self, bitrate: u32) -> u32 {
        match self {
            EepProtection::A1 => (bitrate * 12) >> 3,
            EepProtection::A2 => bitrate,
            EepProtection::A3 => (bitrate * 6) >> 3,
            EepProtection::A4 => bitrate >> 1,
            EepProtection::B1 => (bitrate * 27) >> 5,
            EepProtection::B2 => (bitrate * 21) >> 5,
            EepProtection::B3 => (bitrate * 18) >> 5,
            EepProtection::B4 => (bitrate * 15) >> 5,
        }
    }
}

impl fmt::Display for EepProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EepProfile::A => write!(f, "A"),
            EepProfile::B => write!(f, "B"),
        }
    }
}

/// Error protection of a subchannel as signalled in FIG 0/1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionSettings {
    /// Unequal error protection, given as an index into the UEP table.
    ShortForm { uep_table_index: usize, uep_level: u8 },
    /// Equal error protection.
    LongForm(EepProtection),
}

impl ProtectionSettings {
    /// Short form with the protection level taken from the UEP table.
    pub fn short_form(uep_table_index: usize) -> DabResult<Self> {
        let row = get_uep_protection(uep_table_index)?;
        Ok(ProtectionSettings::ShortForm { uep_table_index, uep_level: row.protection_level })
    }

    pub fn long_form(option: u8, level: u8) -> DabResult<Self> {
        Ok(ProtectionSettings::LongForm(EepProtection::from_fig_fields(option, level)?))
    }

    /// Audio bitrate in kbit/s of a subchannel of the given size.
    /// Long form sizes larger than the 10 bit size field are rejected.
    pub fn bitrate(&self, length: u32) -> DabResult<u32> {
        match *self {
            ProtectionSettings::ShortForm { uep_table_index, .. } => {
                Ok(get_uep_protection(uep_table_index)?.bitrate_kbps)
            },
            ProtectionSettings::LongForm(eep) => Ok(eep.bitrate(check_size(length)?)),
        }
    }

    /// Number of capacity units occupied by a subchannel of the given size.
    /// For EEP this is derived from the bitrate, so sizes that are not a whole number of
    /// bitrate steps are rounded down to the capacity actually used.
    pub fn capacity_units(&self, length: u32) -> DabResult<u32> {
        match *self {
            ProtectionSettings::ShortForm { uep_table_index, .. } => {
                Ok(get_uep_protection(uep_table_index)?.capacity_units)
            },
            ProtectionSettings::LongForm(eep) => Ok(eep.capacity_units(eep.bitrate(check_size(length)?))),
        }
    }
}

fn check_size(length: u32) -> DabResult<u32> {
    if length > MAX_SUBCHANNEL_SIZE {
        return Err(DabError::InvalidSubchannelSize(length));
    }
    Ok(length)
}

impl fmt::Display for ProtectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtectionSettings::ShortForm { uep_level, .. } => write!(f, "UEP {}", uep_level),
            ProtectionSettings::LongForm(eep) => write!(f, "EEP {}-{}", eep.level(), eep.profile()),
        }
    }
}

/// A subchannel of the main service channel (MSC) as described by FIG 0/1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subchannel {
    /// Sub-channel size field of the long form. Unused by the short form.
    pub length: u32,
    /// First capacity unit of the subchannel inside the CIF, if known.
    pub start_address: Option<u32>,
    pub protection_settings: ProtectionSettings,
}

impl Subchannel {
    pub fn new(length: u32, protection_settings: ProtectionSettings) -> Self {
        Self { length, start_address: None, protection_settings }
    }

    pub fn with_start_address(self, start_address: u32) -> Self {
        Self { start_address: Some(start_address), ..self }
    }

    pub fn bitrate(&self) -> DabResult<u32> {
        self.protection_settings.bitrate(self.length)
    }

    pub fn capacity_units(&self) -> DabResult<u32> {
        self.protection_settings.capacity_units(self.length)
    }

    /// Human readable protection such as "UEP 3" or "EEP 2-A".
    pub fn protection_label(&self) -> String {
        self.protection_settings.to_string()
    }

    fn checked_start_address(&self) -> DabResult<Option<u32>> {
        match self.start_address {
            Some(start_address) if start_address > MAX_SUBCHANNEL_START_ADDRESS => {
                Err(DabError::InvalidStartAddress(start_address))
            },
            start_address => Ok(start_address),
        }
    }

    /// Last capacity unit occupied by the subchannel.
    pub fn end_address(&self) -> DabResult<Option<u32>> {
        let Some(start_address) = self.checked_start_address()? else {
            return Ok(None);
        };
        let nb_capacity_units = self.capacity_units()?;
        Ok(Some((start_address + nb_capacity_units).saturating_sub(1)))
    }

    /// Checks that the subchannel fits inside a CIF with the given number of capacity units.
    /// A subchannel without a start address is only checked against the CIF size.
    pub fn check_capacity(&self, nb_capacity_units_per_cif: u32) -> DabResult<()> {
        let start_address = self.checked_start_address()?.unwrap_or(0);
        let nb_capacity_units = self.capacity_units()?;
        match start_address.checked_add(nb_capacity_units) {
            Some(end) if end <= nb_capacity_units_per_cif => Ok(()),
            _ => Err(DabError::CapacityExceeded { start_address, nb_capacity_units, nb_capacity_units_per_cif }),
        }
    }
}
