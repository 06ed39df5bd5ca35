use dab_core::dab_parameters::DabParameters;
use dab_radio::dab_charset::{CharacterSet, DefaultCharsetConverter};
use dab_radio::dab_label::DabLabel;
use dab_radio::dab_protection_table::UEP_PROTECTION_TABLE;
use dab_radio::dab_radio_parameters::get_dab_radio_parameters;
use dab_radio::dab_subchannel::{ProtectionSettings, Subchannel};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct AppArguments {
    /// DAB transmission mode. Valid modes are \[1,2,3,4\]
    #[arg(short, long, default_value_t = 1)]
    mode: u32,
    #[command(subcommand)]
    command: AppCommand,
}

#[derive(Subcommand, Debug)]
enum AppCommand {
    /// Print the frame structure of the transmission mode
    Params,
    /// Print the UEP protection table
    Table,
    /// Print the bitrate and capacity of a subchannel
    Subchannel {
        /// Index into the UEP table for short form protection
        #[arg(long, conflicts_with_all = ["eep_option", "eep_level"])]
        uep_index: Option<usize>,
        /// EEP option, 0 for profile A and 1 for profile B
        #[arg(long, default_value_t = 0)]
        eep_option: u8,
        /// EEP protection level field from 0 to 3
        #[arg(long, default_value_t = 2)]
        eep_level: u8,
        /// Sub-channel size field of the long form
        #[arg(short, long, default_value_t = 0)]
        length: u32,
        /// Start address of the subchannel in capacity units
        #[arg(short, long)]
        start_address: Option<u32>,
    },
    /// Assemble a label from a FIG 1 label and UTF-8 FIG 2 segments
    Label {
        /// FIG 1 label, at most 16 characters
        #[arg(long, default_value = "")]
        fig1: String,
        /// FIG 1 character flag field selecting the short label, eg 0xF800
        #[arg(long, default_value = "0x0000")]
        flag: String,
        /// Extended label segments in the form <index>:<text>
        #[arg(long)]
        segment: Vec<String>,
        /// Number of extended label segments. Defaults to the number of segments given.
        #[arg(long)]
        segment_count: Option<usize>,
    },
}

fn main() -> Result<(), String> {
    pretty_env_logger::init();
    let args = AppArguments::parse();

    let params = DabParameters::resolve(args.mode).map_err(|err| err.to_string())?;
    log::debug!("Resolved parameters for mode {}", params.transmission_mode);

    match args.command {
        AppCommand::Params => print_params(&params),
        AppCommand::Table => print_table(),
        AppCommand::Subchannel { uep_index, eep_option, eep_level, length, start_address } => {
            let protection_settings = match uep_index {
                Some(index) => ProtectionSettings::short_form(index),
                None => ProtectionSettings::long_form(eep_option, eep_level),
            }.map_err(|err| err.to_string())?;
            let mut subchannel = Subchannel::new(length, protection_settings);
            if let Some(start_address) = start_address {
                subchannel = subchannel.with_start_address(start_address);
            }
            print_subchannel(&params, &subchannel)?;
        },
        AppCommand::Label { fig1, flag, segment, segment_count } => {
            let flag = parse_flag(&flag)?;
            let label = assemble_label(&fig1, flag, &segment, segment_count)?;
            let converter = DefaultCharsetConverter;
            println!("label: {}", label.render(&converter));
            println!("fig1: {}", label.fig1_label_utf8(&converter));
            println!("short: {}", label.fig1_shortlabel_utf8(&converter));
            println!("state: {:?}", label.state());
        },
    }
    Ok(())
}

fn print_params(params: &DabParameters) {
    let radio_params = get_dab_radio_parameters(params.transmission_mode);
    println!("mode: {}", params.transmission_mode);
    println!("symbols (L): {}", params.nb_symbols);
    println!("carriers (K): {}", params.nb_carriers);
    println!("frame period (T_F): {}", params.nb_frame_period);
    println!("null period (T_null): {}", params.nb_null_period);
    println!("symbol period (T_s): {}", params.nb_symbol_period);
    println!("useful period (T_u): {}", params.nb_useful_period);
    println!("guard period: {}", params.nb_guard_period);
    println!("carrier spacing: {}Hz", params.carrier_spacing_hz);
    println!("FIC symbols: {}", radio_params.nb_fic_symbols);
    println!("MSC symbols: {}", radio_params.nb_msc_symbols);
    println!("FIBs per FIC: {}", radio_params.nb_fibs_in_fic);
    println!("CIFs per MSC: {}", radio_params.nb_cifs_in_msc);
    println!("bits per CIF: {}", radio_params.nb_bits_per_cif);
    println!("CUs per CIF: {}", radio_params.nb_capacity_units_per_cif);
}

fn print_table() {
    println!("{:>5} {:>4} {:>5} {:>7}", "index", "CUs", "level", "kbit/s");
    for (index, row) in UEP_PROTECTION_TABLE.iter().enumerate() {
        println!("{:>5} {:>4} {:>5} {:>7}", index, row.capacity_units, row.protection_level, row.bitrate_kbps);
    }
}

fn print_subchannel(params: &DabParameters, subchannel: &Subchannel) -> Result<(), String> {
    let radio_params = get_dab_radio_parameters(params.transmission_mode);
    let bitrate = subchannel.bitrate().map_err(|err| err.to_string())?;
    let capacity_units = subchannel.capacity_units().map_err(|err| err.to_string())?;
    println!("protection: {}", subchannel.protection_label());
    println!("bitrate: {}kbit/s", bitrate);
    println!("capacity units: {}", capacity_units);
    if let Some(end_address) = subchannel.end_address().map_err(|err| err.to_string())? {
        println!("end address: {}", end_address);
    }
    subchannel
        .check_capacity(radio_params.nb_capacity_units_per_cif as u32)
        .map_err(|err| err.to_string())
}

fn parse_flag(flag: &str) -> Result<u16, String> {
    let digits = flag.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(digits, 16).map_err(|err| format!("Invalid character flag {}: {}", flag, err))
}

fn assemble_label(fig1: &str, flag: u16, segments: &[String], segment_count: Option<usize>) -> Result<DabLabel, String> {
    let mut label = DabLabel::new();
    label.set_full_label(fig1.as_bytes(), flag, CharacterSet::UnicodeUtf8);
    if segments.is_empty() {
        return Ok(label);
    }

    label.set_extended_label_charset(0x0F).map_err(|err| err.to_string())?;
    label
        .set_segment_count(segment_count.unwrap_or(segments.len()))
        .map_err(|err| err.to_string())?;
    for segment in segments {
        let (index, text) = segment
            .split_once(':')
            .ok_or_else(|| format!("Segment {} should be <index>:<text>", segment))?;
        let index: usize = index
            .parse()
            .map_err(|err| format!("Invalid segment index {}: {}", index, err))?;
        label.insert_segment(index, text.as_bytes()).map_err(|err| err.to_string())?;
    }
    Ok(label)
}
