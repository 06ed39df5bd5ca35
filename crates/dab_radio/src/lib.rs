pub mod dab_charset;
pub mod dab_label;
pub mod dab_protection_table;
pub mod dab_radio_parameters;
pub mod dab_service_component;
pub mod dab_subchannel;
