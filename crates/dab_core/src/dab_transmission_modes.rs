use crate::dab_error::DabError;

/// DOC: ETSI EN 300 401
/// Referring to clause 14.2 - Transmission frame
/// Each mode trades carrier spacing against symbol duration to suit a different network topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DabTransmissionMode {
    I,
    II,
    III,
    IV,
}

impl DabTransmissionMode {
    pub const ALL: [DabTransmissionMode; 4] = [
        DabTransmissionMode::I,
        DabTransmissionMode::II,
        DabTransmissionMode::III,
        DabTransmissionMode::IV,
    ];

    /// The mode number as written in the standard, from 1 to 4.
    pub fn number(self) -> u32 {
        match self {
            DabTransmissionMode::I   => 1,
            DabTransmissionMode::II  => 2,
            DabTransmissionMode::III => 3,
            DabTransmissionMode::IV  => 4,
        }
    }
}

impl TryFrom<u32> for DabTransmissionMode {
    type Error = DabError;

    fn try_from(mode: u32) -> Result<Self, Self::Error> {
        match mode {
            1 => Ok(DabTransmissionMode::I),
            2 => Ok(DabTransmissionMode::II),
            3 => Ok(DabTransmissionMode::III),
            4 => Ok(DabTransmissionMode::IV),
            mode => Err(DabError::InvalidMode(mode)),
        }
    }
}

impl std::fmt::Display for DabTransmissionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}
