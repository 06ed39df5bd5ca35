use thiserror::Error;

/// Result type shared by the DAB crates.
pub type DabResult<T> = Result<T, DabError>;

/// Validation failures on values extracted from the broadcast stream.
/// None of these are transient. The caller should discard the offending FIG and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DabError {
    #[error("invalid transmission mode {0}, expected one of [1,2,3,4]")]
    InvalidMode(u32),
    #[error("invalid UEP protection table index {0}, expected 0..=63")]
    InvalidProtectionIndex(usize),
    #[error("sub-channel size {0} does not fit the 10 bit size field")]
    InvalidSubchannelSize(u32),
    #[error("sub-channel start address {0} does not fit the 10 bit address field")]
    InvalidStartAddress(u32),
    #[error("unsupported EEP protection with option {option} and level {level}")]
    UnsupportedProtection { option: u8, level: u8 },
    #[error("invalid character set {0:#04x}")]
    InvalidCharset(u8),
    #[error("illegal transport mechanism id {0}")]
    IllegalTransportMode(u8),
    #[error("invalid extended label segment index {0}, expected 0..=15")]
    InvalidSegmentIndex(usize),
    #[error("invalid extended label segment count {0}, expected 1..=16")]
    InvalidSegmentCount(usize),
    #[error("extended label segment is {0} bytes long, limit is 16")]
    InvalidSegmentLength(usize),
    #[error("subchannel at {start_address} with {nb_capacity_units} CUs exceeds {nb_capacity_units_per_cif} CUs in CIF")]
    CapacityExceeded { start_address: u32, nb_capacity_units: u32, nb_capacity_units_per_cif: u32 },
}
