use crate::dab_error::DabResult;
use crate::dab_transmission_modes::DabTransmissionMode;

/// Refer to the struct DabRadioParameters for the bit level quantities derived from these constants.
/// All durations are counted in samples at a sampling frequency of 2.048MHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DabParameters {
    pub transmission_mode: DabTransmissionMode,
    /// Number of OFDM symbols in a transmission frame excluding the NULL symbol. (L)
    pub nb_symbols: usize,
    /// Number of carriers that carry data. (K)
    pub nb_carriers: usize,
    /// Duration of a whole transmission frame. (T_F)
    pub nb_frame_period: usize,
    /// Duration of NULL symbol. (T_null)
    pub nb_null_period: usize,
    /// Duration of OFDM data symbol. (T_s)
    pub nb_symbol_period: usize,
    /// Duration of the useful part of an OFDM data symbol, which is also the FFT size. (T_u)
    pub nb_useful_period: usize,
    /// Duration of the guard interval (cyclic prefix) of an OFDM data symbol.
    pub nb_guard_period: usize,
    /// Frequency spacing between adjacent carriers in Hz.
    pub carrier_spacing_hz: usize,
    /// Number of symbols for the fast information channel (FIC). This carries metadata about the ensemble.
    pub nb_fic_symbols: usize,
    /// Number of symbols for the main service channel (MSC). This carries radio data for each channel in the ensemble.
    pub nb_msc_symbols: usize,
    /// Number of fast information blocks (FIB) in the FIC
    pub nb_fibs_in_fic: usize,
    /// Number of common interleaved frames (CIF) in the MSC.
    pub nb_cifs_in_msc: usize,
}

impl DabParameters {
    /// Resolves the constants for a raw mode number taken from configuration or the command line.
    pub fn resolve(mode: u32) -> DabResult<Self> {
        let transmission_mode = DabTransmissionMode::try_from(mode)?;
        Ok(get_dab_parameters(transmission_mode))
    }
}

// DOC: ETSI EN 300 401
// Referring to clause 14.2 - Transmission frame, table 38
pub fn get_dab_parameters(transmission_mode: DabTransmissionMode) -> DabParameters {
    let params = match transmission_mode {
        DabTransmissionMode::I => DabParameters {
            transmission_mode,
            nb_symbols: 76,
            nb_carriers: 1536,
            nb_frame_period: 196608,
            nb_null_period: 2656,
            nb_symbol_period: 2552,
            nb_useful_period: 2048,
            nb_guard_period: 504,
            carrier_spacing_hz: 1000,
            nb_fic_symbols: 3,
            nb_msc_symbols: 72,
            nb_fibs_in_fic: 12,
            nb_cifs_in_msc: 4,
        },
        DabTransmissionMode::II => DabParameters {
            transmission_mode,
            nb_symbols: 76,
            nb_carriers: 384,
            nb_frame_period: 49152,
            nb_null_period: 664,
            nb_symbol_period: 638,
            nb_useful_period: 512,
            nb_guard_period: 126,
            carrier_spacing_hz: 4000,
            nb_fic_symbols: 3,
            nb_msc_symbols: 72,
            nb_fibs_in_fic: 3,
            nb_cifs_in_msc: 1,
        },
        DabTransmissionMode::III => DabParameters {
            transmission_mode,
            nb_symbols: 153,
            nb_carriers: 192,
            nb_frame_period: 49152,
            nb_null_period: 345,
            nb_symbol_period: 319,
            nb_useful_period: 256,
            nb_guard_period: 63,
            carrier_spacing_hz: 2000,
            nb_fic_symbols: 8,
            nb_msc_symbols: 144,
            nb_fibs_in_fic: 4,
            nb_cifs_in_msc: 1,
        },
        DabTransmissionMode::IV => DabParameters {
            transmission_mode,
            nb_symbols: 76,
            nb_carriers: 768,
            nb_frame_period: 98304,
            nb_null_period: 1328,
            nb_symbol_period: 1276,
            nb_useful_period: 1024,
            nb_guard_period: 252,
            carrier_spacing_hz: 2000,
            nb_fic_symbols: 3,
            nb_msc_symbols: 72,
            nb_fibs_in_fic: 6,
            nb_cifs_in_msc: 2,
        },
    };

    assert!(params.nb_symbols >= 2, "Number of symbols must be at least 2 due to differential QPSK encoding");
    assert!(params.nb_useful_period >= params.nb_carriers, "Number of data carriers is limited to FFT resolution");
    assert!(params.nb_symbol_period == params.nb_useful_period + params.nb_guard_period, "Symbol period must be the useful period plus the guard interval");
    assert!(params.nb_frame_period == params.nb_null_period + params.nb_symbols*params.nb_symbol_period, "Frame period must be the NULL symbol plus all data symbols");
    assert!((params.nb_symbols-1) == (params.nb_fic_symbols + params.nb_msc_symbols), "Number of data symbols after DQPSK doesn't match number of FIC and MSC symbols");
    assert!(params.nb_fibs_in_fic % params.nb_cifs_in_msc == 0, "The number of FIBs in the FIC must be a multiple of the number of CIFs in the MSC.");

    params
}
