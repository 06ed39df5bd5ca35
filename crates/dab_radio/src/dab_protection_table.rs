use dab_core::dab_error::{DabError, DabResult};

/// One row of the unequal error protection (UEP) table used by the short form of FIG 0/1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UepProtection {
    /// Size of the subchannel in capacity units (CU) of 64 bits.
    pub capacity_units: u32,
    /// Protection level from 1 (strongest) to 5 (weakest).
    pub protection_level: u8,
    /// Audio bitrate in kbit/s.
    pub bitrate_kbps: u32,
}

pub const NB_UEP_TABLE_ENTRIES: usize = 64;

// DOC: ETSI EN 300 401
// Referring to clause 6.2.1 - Basic sub-channel organization, table 8
// The short form only carries a 6 bit index into this table
pub static UEP_PROTECTION_TABLE: [UepProtection; NB_UEP_TABLE_ENTRIES] = [
    UepProtection { capacity_units:  16, protection_level: 5, bitrate_kbps:  32 }, // 0
    UepProtection { capacity_units:  21, protection_level: 4, bitrate_kbps:  32 },
    UepProtection { capacity_units:  24, protection_level: 3, bitrate_kbps:  32 },
    UepProtection { capacity_units:  29, protection_level: 2, bitrate_kbps:  32 },
    UepProtection { capacity_units:  35, protection_level: 1, bitrate_kbps:  32 },
    UepProtection { capacity_units:  24, protection_level: 5, bitrate_kbps:  48 }, // 5
    UepProtection { capacity_units:  29, protection_level: 4, bitrate_kbps:  48 },
    UepProtection { capacity_units:  35, protection_level: 3, bitrate_kbps:  48 },
    UepProtection { capacity_units:  42, protection_level: 2, bitrate_kbps:  48 },
    UepProtection { capacity_units:  52, protection_level: 1, bitrate_kbps:  48 },
    UepProtection { capacity_units:  29, protection_level: 5, bitrate_kbps:  56 }, // 10
    UepProtection { capacity_units:  35, protection_level: 4, bitrate_kbps:  56 },
    UepProtection { capacity_units:  42, protection_level: 3, bitrate_kbps:  56 },
    UepProtection { capacity_units:  52, protection_level: 2, bitrate_kbps:  56 },
    UepProtection { capacity_units:  32, protection_level: 5, bitrate_kbps:  64 },
    UepProtection { capacity_units:  42, protection_level: 4, bitrate_kbps:  64 }, // 15
    UepProtection { capacity_units:  48, protection_level: 3, bitrate_kbps:  64 },
    UepProtection { capacity_units:  58, protection_level: 2, bitrate_kbps:  64 },
    UepProtection { capacity_units:  70, protection_level: 1, bitrate_kbps:  64 },
    UepProtection { capacity_units:  40, protection_level: 5, bitrate_kbps:  80 },
    UepProtection { capacity_units:  52, protection_level: 4, bitrate_kbps:  80 }, // 20
    UepProtection { capacity_units:  58, protection_level: 3, bitrate_kbps:  80 },
    UepProtection { capacity_units:  70, protection_level: 2, bitrate_kbps:  80 },
    UepProtection { capacity_units:  84, protection_level: 1, bitrate_kbps:  80 },
    UepProtection { capacity_units:  48, protection_level: 5, bitrate_kbps:  96 },
    UepProtection { capacity_units:  58, protection_level: 4, bitrate_kbps:  96 }, // 25
    UepProtection { capacity_units:  70, protection_level: 3, bitrate_kbps:  96 },
    UepProtection { capacity_units:  84, protection_level: 2, bitrate_kbps:  96 },
    UepProtection { capacity_units: 104, protection_level: 1, bitrate_kbps:  96 },
    UepProtection { capacity_units:  58, protection_level: 5, bitrate_kbps: 112 },
    UepProtection { capacity_units:  70, protection_level: 4, bitrate_kbps: 112 }, // 30
    UepProtection { capacity_units:  84, protection_level: 3, bitrate_kbps: 112 },
    UepProtection { capacity_units: 104, protection_level: 2, bitrate_kbps: 112 },
    UepProtection { capacity_units:  64, protection_level: 5, bitrate_kbps: 128 },
    UepProtection { capacity_units:  84, protection_level: 4, bitrate_kbps: 128 },
    UepProtection { capacity_units:  96, protection_level: 3, bitrate_kbps: 128 }, // 35
    UepProtection { capacity_units: 116, protection_level: 2, bitrate_kbps: 128 },
    UepProtection { capacity_units: 140, protection_level: 1, bitrate_kbps: 128 },
    UepProtection { capacity_units:  80, protection_level: 5, bitrate_kbps: 160 },
    UepProtection { capacity_units: 104, protection_level: 4, bitrate_kbps: 160 },
    UepProtection { capacity_units: 116, protection_level: 3, bitrate_kbps: 160 }, // 40
    UepProtection { capacity_units: 140, protection_level: 2, bitrate_kbps: 160 },
    UepProtection { capacity_units: 168, protection_level: 1, bitrate_kbps: 160 },
    UepProtection { capacity_units:  96, protection_level: 5, bitrate_kbps: 192 },
    UepProtection { capacity_units: 116, protection_level: 4, bitrate_kbps: 192 },
    UepProtection { capacity_units: 140, protection_level: 3, bitrate_kbps: 192 }, // 45
    UepProtection { capacity_units: 168, protection_level: 2, bitrate_kbps: 192 },
    UepProtection { capacity_units: 208, protection_level: 1, bitrate_kbps: 192 },
    UepProtection { capacity_units: 116, protection_level: 5, bitrate_kbps: 224 },
    UepProtection { capacity_units: 140, protection_level: 4, bitrate_kbps: 224 },
    UepProtection { capacity_units: 168, protection_level: 3, bitrate_kbps: 224 }, // 50
    UepProtection { capacity_units: 208, protection_level: 2, bitrate_kbps: 224 },
    UepProtection { capacity_units: 232, protection_level: 1, bitrate_kbps: 224 },
    UepProtection { capacity_units: 128, protection_level: 5, bitrate_kbps: 256 },
    UepProtection { capacity_units: 168, protection_level: 4, bitrate_kbps: 256 },
    UepProtection { capacity_units: 192, protection_level: 3, bitrate_kbps: 256 }, // 55
    UepProtection { capacity_units: 232, protection_level: 2, bitrate_kbps: 256 },
    UepProtection { capacity_units: 280, protection_level: 1, bitrate_kbps: 256 },
    UepProtection { capacity_units: 160, protection_level: 5, bitrate_kbps: 320 },
    UepProtection { capacity_units: 208, protection_level: 4, bitrate_kbps: 320 },
    UepProtection { capacity_units: 280, protection_level: 2, bitrate_kbps: 320 }, // 60
    UepProtection { capacity_units: 192, protection_level: 5, bitrate_kbps: 384 },
    UepProtection { capacity_units: 280, protection_level: 3, bitrate_kbps: 384 },
    UepProtection { capacity_units: 416, protection_level: 1, bitrate_kbps: 384 },
];

/// Looks up a row of the UEP table from the 6 bit table switch of FIG 0/1.
pub fn get_uep_protection(index: usize) -> DabResult<&'static UepProtection> {
    UEP_PROTECTION_TABLE.get(index).ok_or(DabError::InvalidProtectionIndex(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_endpoints() {
        let first = get_uep_protection(0).unwrap();
        assert_eq!((first.capacity_units, first.protection_level, first.bitrate_kbps), (16, 5, 32));
        let last = get_uep_protection(63).unwrap();
        assert_eq!((last.capacity_units, last.protection_level, last.bitrate_kbps), (416, 1, 384));
    }

    #[test]
    fn rejects_index_past_table() {
        assert_eq!(get_uep_protection(64), Err(DabError::InvalidProtectionIndex(64)));
    }

    #[test]
    fn bitrates_never_decrease() {
        for rows in UEP_PROTECTION_TABLE.windows(2) {
            assert!(rows[0].bitrate_kbps <= rows[1].bitrate_kbps);
            assert!(rows[1].bitrate_kbps % 8 == 0);
        }
    }

    #[test]
    fn stronger_protection_costs_more_capacity() {
        // Within one bitrate a lower protection level number means more redundancy
        for rows in UEP_PROTECTION_TABLE.windows(2) {
            if rows[0].bitrate_kbps == rows[1].bitrate_kbps {
                assert!(rows[0].protection_level > rows[1].protection_level);
                assert!(rows[0].capacity_units < rows[1].capacity_units);
            }
        }
    }
}
