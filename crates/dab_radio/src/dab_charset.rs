use dab_core::dab_error::DabError;

/// Character set of a label as signalled in FIG 1 and FIG 2.
///
/// DOC: ETSI TS 101 756
/// Referring to clause 5.2 - Character sets, table 19
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterSet {
    /// Complete EBU Latin based repertoire.
    #[default]
    EbuLatin,
    /// ISO/IEC 10646 using UCS-2 transformation format, big endian.
    UnicodeUcs2,
    /// ISO/IEC 10646 using UTF-8 transformation format.
    UnicodeUtf8,
    /// No character set has been signalled yet.
    Undefined,
}

impl TryFrom<u8> for CharacterSet {
    type Error = DabError;

    fn try_from(charset_id: u8) -> Result<Self, Self::Error> {
        match charset_id {
            0x00 => Ok(CharacterSet::EbuLatin),
            0x06 => Ok(CharacterSet::UnicodeUcs2),
            0x0F => Ok(CharacterSet::UnicodeUtf8),
            id => Err(DabError::InvalidCharset(id)),
        }
    }
}

/// Converts label bytes in a broadcast character set to UTF-8.
pub trait CharsetConverter {
    fn to_utf8(&self, bytes: &[u8], charset: CharacterSet) -> String;
}

impl<F> CharsetConverter for F
where F: Fn(&[u8], CharacterSet) -> String
{
    fn to_utf8(&self, bytes: &[u8], charset: CharacterSet) -> String {
        self(bytes, charset)
    }
}

/// Converter for the Unicode character sets.
/// EBU Latin is only decoded where it agrees with ASCII, the remaining code points become U+FFFD.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCharsetConverter;

impl CharsetConverter for DefaultCharsetConverter {
    fn to_utf8(&self, bytes: &[u8], charset: CharacterSet) -> String {
        match charset {
            CharacterSet::UnicodeUtf8 => String::from_utf8_lossy(bytes).into_owned(),
            CharacterSet::UnicodeUcs2 => {
                let code_units = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
                char::decode_utf16(code_units)
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect()
            },
            CharacterSet::EbuLatin | CharacterSet::Undefined => {
                bytes.iter().map(|&b| ebu_latin_to_char(b)).collect()
            },
        }
    }
}

// NOTE: 0x24, 0x5C, 0x5E, 0x60 and 0x7E differ from ASCII in EBU Latin
fn ebu_latin_to_char(b: u8) -> char {
    match b {
        0x24 | 0x5C | 0x5E | 0x60 | 0x7E => char::REPLACEMENT_CHARACTER,
        0x20..=0x7D => b as char,
        _ => char::REPLACEMENT_CHARACTER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_ids() {
        assert_eq!(CharacterSet::try_from(0x00), Ok(CharacterSet::EbuLatin));
        assert_eq!(CharacterSet::try_from(0x06), Ok(CharacterSet::UnicodeUcs2));
        assert_eq!(CharacterSet::try_from(0x0F), Ok(CharacterSet::UnicodeUtf8));
        assert_eq!(CharacterSet::try_from(0x01), Err(DabError::InvalidCharset(0x01)));
        assert_eq!(CharacterSet::try_from(0x10), Err(DabError::InvalidCharset(0x10)));
    }

    #[test]
    fn decodes_ucs2_big_endian() {
        let bytes = [0x00, b'R', 0x00, 0xE4, 0x04, 0x1F];
        assert_eq!(DefaultCharsetConverter.to_utf8(&bytes, CharacterSet::UnicodeUcs2), "Rä\u{41F}");
    }

    #[test]
    fn ucs2_drops_dangling_byte() {
        let bytes = [0x00, b'A', 0x00];
        assert_eq!(DefaultCharsetConverter.to_utf8(&bytes, CharacterSet::UnicodeUcs2), "A");
    }

    #[test]
    fn decodes_ascii_subset_of_ebu_latin() {
        let converter = DefaultCharsetConverter;
        assert_eq!(converter.to_utf8(b"BBC Radio 4", CharacterSet::EbuLatin), "BBC Radio 4");
        assert_eq!(converter.to_utf8(&[b'a', 0x82], CharacterSet::EbuLatin), "a\u{FFFD}");
    }

    #[test]
    fn closures_are_converters() {
        let upper = |bytes: &[u8], _: CharacterSet| String::from_utf8_lossy(bytes).to_uppercase();
        assert_eq!(upper.to_utf8(b"dab", CharacterSet::EbuLatin), "DAB");
    }
}
