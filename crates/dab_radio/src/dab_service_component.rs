use dab_core::dab_error::{DabError, DabResult};

/// Transport mechanism of a service component, from the TMid field of FIG 0/2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportMode {
    /// MSC stream mode carrying audio.
    Audio,
    /// MSC stream mode carrying data.
    StreamData,
    /// Fast information data channel.
    FIDC,
    /// MSC packet mode carrying data.
    PacketData,
}

impl TryFrom<u8> for TransportMode {
    type Error = DabError;

    fn try_from(tmid: u8) -> Result<Self, Self::Error> {
        match tmid {
            0 => Ok(TransportMode::Audio),
            1 => Ok(TransportMode::StreamData),
            2 => Ok(TransportMode::FIDC),
            3 => Ok(TransportMode::PacketData),
            tmid => Err(DabError::IllegalTransportMode(tmid)),
        }
    }
}

/// Audio service component type (ASCTy) as far as the audio decoder is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioServiceComponentType {
    DABPlus,
    Unknown,
}

// DOC: ETSI TS 101 756
// Referring to clause 5.3 - Audio service component types, table 2a
const ASCTY_DAB_PLUS: u8 = 63;

impl From<u8> for AudioServiceComponentType {
    fn from(ascty: u8) -> Self {
        match ascty {
            ASCTY_DAB_PLUS => AudioServiceComponentType::DABPlus,
            _ => AudioServiceComponentType::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServiceComponent {
    /// Transport mechanism identifier.
    pub tmid: u8,
    /// Audio service component type, only meaningful for audio components.
    pub ascty: u8,
}

impl ServiceComponent {
    pub fn new(tmid: u8, ascty: u8) -> Self {
        Self { tmid, ascty }
    }

    pub fn transport_mode(&self) -> DabResult<TransportMode> {
        TransportMode::try_from(self.tmid)
    }

    pub fn audio_type(&self) -> AudioServiceComponentType {
        AudioServiceComponentType::from(self.ascty)
    }

    pub fn is_dab_plus(&self) -> bool {
        self.audio_type() == AudioServiceComponentType::DABPlus
    }
}
