use dab_core::dab_error::{DabError, DabResult};
use crate::dab_charset::{CharacterSet, CharsetConverter};

/// Number of character slots in a FIG 1 label.
pub const FIG1_LABEL_LENGTH: usize = 16;
/// Maximum number of segments in a FIG 2 extended label.
pub const FIG2_MAX_SEGMENTS: usize = 16;
/// Maximum number of bytes in a single FIG 2 segment.
pub const FIG2_MAX_SEGMENT_LENGTH: usize = 16;

/// Assembly state of the FIG 2 extended label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelState {
    /// No extended label has been announced.
    Fig1Only,
    /// Bit i of received is set when segment i has arrived.
    AwaitingSegments { segment_count: usize, received: u16 },
    Complete,
}

/// Label of an ensemble or service assembled from FIG 1 and FIG 2.
///
/// FIG 1 carries the full label in a single FIG and is replaced whenever a new one arrives.
/// FIG 2 carries an extended label split into up to 16 segments that may arrive in any order.
/// The extended label is preferred once every announced segment has arrived.
///
/// # Diagram of FIG 2 segment storage
/// ```text
/// | segment_mask  | bit 0 | bit 1 | ... | bit 15 |
/// | segments      | [u8;16] | [u8;16] | ... | [u8;16] |
/// | segment_count | n, only bits 0..n decide completeness |
/// ```
#[derive(Debug, Clone)]
pub struct DabLabel {
    fig1_label: Vec<u8>,
    fig1_flag: u16,
    charset: CharacterSet,
    segments: [[u8; FIG2_MAX_SEGMENT_LENGTH]; FIG2_MAX_SEGMENTS],
    segment_lengths: [u8; FIG2_MAX_SEGMENTS],
    segment_mask: u16,
    segment_count: usize,
    extended_label_charset: CharacterSet,
}

impl Default for DabLabel {
    fn default() -> Self {
        Self {
            fig1_label: Vec::with_capacity(FIG1_LABEL_LENGTH),
            fig1_flag: 0,
            charset: CharacterSet::EbuLatin,
            segments: [[0; FIG2_MAX_SEGMENT_LENGTH]; FIG2_MAX_SEGMENTS],
            segment_lengths: [0; FIG2_MAX_SEGMENTS],
            segment_mask: 0,
            segment_count: 0,
            extended_label_charset: CharacterSet::Undefined,
        }
    }
}

impl DabLabel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a FIG 1 label with its character flag field.
    /// Labels longer than 16 bytes are cut to 16 bytes.
    pub fn set_full_label(&mut self, label: &[u8], flag: u16, charset: CharacterSet) {
        if label.len() > FIG1_LABEL_LENGTH {
            log::debug!("FIG1 label of {} bytes cut to {}", label.len(), FIG1_LABEL_LENGTH);
        }
        let length = label.len().min(FIG1_LABEL_LENGTH);
        self.fig1_label.clear();
        self.fig1_label.extend_from_slice(&label[..length]);
        self.fig1_flag = flag;
        self.charset = charset;
    }

    /// Sets the FIG 1 character set from its raw 4 bit identifier.
    pub fn set_charset(&mut self, charset_id: u8) -> DabResult<()> {
        self.charset = CharacterSet::try_from(charset_id)?;
        Ok(())
    }

    pub fn set_extended_label_charset(&mut self, charset_id: u8) -> DabResult<()> {
        self.extended_label_charset = CharacterSet::try_from(charset_id)?;
        Ok(())
    }

    /// Announces the number of segments in the extended label.
    /// A count different from the previous announcement means a new label so all previously
    /// received segments are dropped. Segments that arrived before the first announcement count
    /// towards the first label, so a label whose segments all arrived early is complete at once.
    pub fn set_segment_count(&mut self, segment_count: usize) -> DabResult<()> {
        if segment_count == 0 || segment_count > FIG2_MAX_SEGMENTS {
            return Err(DabError::InvalidSegmentCount(segment_count));
        }
        if segment_count != self.segment_count {
            // Segments that arrived before the first announcement belong to the announced label
            if self.segment_count != 0 {
                log::debug!("FIG2 segment count changed from {} to {}, dropping segments", self.segment_count, segment_count);
                self.segment_mask = 0;
                self.segment_lengths = [0; FIG2_MAX_SEGMENTS];
            }
            self.segment_count = segment_count;
        }
        Ok(())
    }

    /// Adds or replaces one segment of the extended label.
    pub fn insert_segment(&mut self, index: usize, data: &[u8]) -> DabResult<()> {
        if index >= FIG2_MAX_SEGMENTS {
            return Err(DabError::InvalidSegmentIndex(index));
        }
        if data.len() > FIG2_MAX_SEGMENT_LENGTH {
            return Err(DabError::InvalidSegmentLength(data.len()));
        }
        if self.segment_count != 0 && index >= self.segment_count {
            log::debug!("FIG2 segment {} is outside of announced count {}", index, self.segment_count);
        }
        self.segments[index][..data.len()].copy_from_slice(data);
        self.segment_lengths[index] = data.len() as u8;
        self.segment_mask |= 1 << index;
        Ok(())
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    pub fn state(&self) -> LabelState {
        if self.segment_count == 0 {
            return LabelState::Fig1Only;
        }
        let required = required_mask(self.segment_count);
        let received = self.segment_mask & required;
        if received == required {
            LabelState::Complete
        } else {
            LabelState::AwaitingSegments { segment_count: self.segment_count, received }
        }
    }

    pub fn is_fig2_complete(&self) -> bool {
        self.state() == LabelState::Complete
    }

    /// The FIG 1 label as raw bytes in its character set.
    pub fn fig1_label(&self) -> &[u8] {
        &self.fig1_label
    }

    pub fn fig1_flag(&self) -> u16 {
        self.fig1_flag
    }

    pub fn charset(&self) -> CharacterSet {
        self.charset
    }

    pub fn fig1_label_utf8(&self, converter: &impl CharsetConverter) -> String {
        converter.to_utf8(until_nul(&self.fig1_label), self.charset)
    }

    pub fn fig1_shortlabel_utf8(&self, converter: &impl CharsetConverter) -> String {
        let shortlabel = flag_to_shortlabel(&self.fig1_label, self.fig1_flag);
        converter.to_utf8(until_nul(&shortlabel), self.charset)
    }

    /// The extended label, if every segment has arrived and its character set may be used.
    pub fn fig2_label(&self, converter: &impl CharsetConverter) -> Option<String> {
        if !self.is_fig2_complete() {
            return None;
        }

        let segments_cat: Vec<u8> = (0..self.segment_count)
            .flat_map(|i| &self.segments[i][..self.segment_lengths[i] as usize])
            .copied()
            .collect();

        // DOC: ETSI EN 300 401
        // Referring to clause 8.1.13 - Extended label
        // EBU Latin may only be used by FIG 1 so receivers fall back to it
        match self.extended_label_charset {
            CharacterSet::EbuLatin => {
                log::warn!("FIG2 label encoded in EBU Latin is not allowed, using FIG1 label");
                None
            },
            CharacterSet::UnicodeUtf8 => Some(String::from_utf8_lossy(&segments_cat).into_owned()),
            CharacterSet::UnicodeUcs2 => Some(converter.to_utf8(&segments_cat, CharacterSet::UnicodeUcs2)),
            CharacterSet::Undefined => None,
        }
    }

    /// The label to show to a listener.
    pub fn render(&self, converter: &impl CharsetConverter) -> String {
        match self.fig2_label(converter) {
            Some(label) if !label.is_empty() => label,
            _ => self.fig1_label_utf8(converter),
        }
    }

    pub fn utf8_label(&self, converter: &impl CharsetConverter) -> String {
        self.render(converter)
    }
}

fn required_mask(segment_count: usize) -> u16 {
    if segment_count >= FIG2_MAX_SEGMENTS {
        u16::MAX
    } else {
        (1u16 << segment_count) - 1
    }
}

fn until_nul(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}

// DOC: ETSI EN 300 401
// Referring to clause 8.1.14.1 - Character flag field
// Bit 15 of the flag corresponds to the first character of the label
pub fn flag_to_shortlabel(label: &[u8], flag: u16) -> Vec<u8> {
    label
        .iter()
        .take(FIG1_LABEL_LENGTH)
        .enumerate()
        .filter(|&(i, _)| flag & (0x8000 >> i) != 0)
        .map(|(_, &c)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dab_charset::DefaultCharsetConverter;

    const CONVERTER: DefaultCharsetConverter = DefaultCharsetConverter;

    #[test]
    fn empty_label_renders_empty() {
        let label = DabLabel::new();
        assert_eq!(label.state(), LabelState::Fig1Only);
        assert_eq!(label.render(&CONVERTER), "");
    }

    #[test]
    fn shortlabel_from_flag() {
        let mut label = DabLabel::new();
        label.set_full_label(b"Radio Test", 0b1111_1000_0000_0000, CharacterSet::EbuLatin);
        assert_eq!(label.fig1_label_utf8(&CONVERTER), "Radio Test");
        assert_eq!(label.fig1_shortlabel_utf8(&CONVERTER), "Radio");
    }

    #[test]
    fn shortlabel_skips_unflagged_characters() {
        assert_eq!(flag_to_shortlabel(b"Radio Test", 0x8000 | 0x0200 | 0x0100), b"RTe");
        assert_eq!(flag_to_shortlabel(b"Radio Test", 0), b"");
    }

    #[test]
    fn fig1_is_last_write_wins() {
        let mut label = DabLabel::new();
        label.set_full_label(b"First label", 0xFF00, CharacterSet::EbuLatin);
        label.set_full_label(b"Second", 0xF000, CharacterSet::UnicodeUtf8);
        assert_eq!(label.fig1_label_utf8(&CONVERTER), "Second");
        assert_eq!(label.fig1_shortlabel_utf8(&CONVERTER), "Seco");
        assert_eq!(label.charset(), CharacterSet::UnicodeUtf8);
    }

    #[test]
    fn fig1_label_is_cut_to_sixteen_bytes() {
        let mut label = DabLabel::new();
        label.set_full_label(b"0123456789abcdefXYZ", 0, CharacterSet::EbuLatin);
        assert_eq!(label.fig1_label(), b"0123456789abcdef");
    }

    #[test]
    fn fig1_label_stops_at_nul() {
        let mut label = DabLabel::new();
        label.set_full_label(b"DAB\0junk", 0, CharacterSet::EbuLatin);
        assert_eq!(label.fig1_label_utf8(&CONVERTER), "DAB");
    }

    #[test]
    fn tracks_received_segments() {
        let mut label = DabLabel::new();
        label.set_segment_count(3).unwrap();
        label.insert_segment(2, b"c").unwrap();
        label.insert_segment(0, b"a").unwrap();
        assert_eq!(label.state(), LabelState::AwaitingSegments { segment_count: 3, received: 0b101 });
        label.insert_segment(1, b"b").unwrap();
        assert_eq!(label.state(), LabelState::Complete);
    }

    #[test]
    fn same_segment_count_keeps_segments() {
        let mut label = DabLabel::new();
        label.set_segment_count(2).unwrap();
        label.insert_segment(0, b"a").unwrap();
        label.set_segment_count(2).unwrap();
        label.insert_segment(1, b"b").unwrap();
        assert!(label.is_fig2_complete());
    }

    #[test]
    fn new_segment_count_drops_stale_segments() {
        let mut label = DabLabel::new();
        label.set_extended_label_charset(0x0F).unwrap();
        label.set_segment_count(2).unwrap();
        label.insert_segment(0, b"old ").unwrap();
        label.insert_segment(1, b"label").unwrap();
        assert_eq!(label.fig2_label(&CONVERTER).as_deref(), Some("old label"));

        label.set_segment_count(3).unwrap();
        assert_eq!(label.state(), LabelState::AwaitingSegments { segment_count: 3, received: 0 });
        label.insert_segment(2, b"!").unwrap();
        assert_eq!(label.fig2_label(&CONVERTER), None);
    }

    #[test]
    fn segment_before_count_is_kept() {
        let mut label = DabLabel::new();
        label.set_extended_label_charset(0x0F).unwrap();
        label.insert_segment(0, b"early").unwrap();
        assert_eq!(label.state(), LabelState::Fig1Only);
        label.set_segment_count(2).unwrap();
        assert_eq!(label.state(), LabelState::AwaitingSegments { segment_count: 2, received: 0b01 });
        label.insert_segment(1, b" bird").unwrap();
        assert_eq!(label.state(), LabelState::Complete);
        assert_eq!(label.fig2_label(&CONVERTER).as_deref(), Some("early bird"));

        // The next announcement with a different count starts from nothing
        label.set_segment_count(1).unwrap();
        assert_eq!(label.state(), LabelState::AwaitingSegments { segment_count: 1, received: 0 });
    }

    #[test]
    fn replaced_segment_uses_latest_length() {
        let mut label = DabLabel::new();
        label.set_extended_label_charset(0x0F).unwrap();
        label.set_segment_count(1).unwrap();
        label.insert_segment(0, b"longer text").unwrap();
        label.insert_segment(0, b"short").unwrap();
        assert_eq!(label.fig2_label(&CONVERTER).as_deref(), Some("short"));
    }

    #[test]
    fn rejects_malformed_segments() {
        let mut label = DabLabel::new();
        assert_eq!(label.set_segment_count(0), Err(DabError::InvalidSegmentCount(0)));
        assert_eq!(label.set_segment_count(17), Err(DabError::InvalidSegmentCount(17)));
        assert_eq!(label.insert_segment(16, b"x"), Err(DabError::InvalidSegmentIndex(16)));
        assert_eq!(label.insert_segment(0, &[b'x'; 17]), Err(DabError::InvalidSegmentLength(17)));
        assert_eq!(label.set_charset(0x03), Err(DabError::InvalidCharset(0x03)));
        assert_eq!(label.set_extended_label_charset(0xFF), Err(DabError::InvalidCharset(0xFF)));
    }

    #[test]
    fn sixteen_segments_fill_the_mask() {
        let mut label = DabLabel::new();
        label.set_extended_label_charset(0x0F).unwrap();
        label.set_segment_count(16).unwrap();
        for i in 0..16 {
            label.insert_segment(i, &[b'a' + i as u8]).unwrap();
        }
        assert_eq!(label.fig2_label(&CONVERTER).as_deref(), Some("abcdefghijklmnop"));
    }

    #[test]
    fn undefined_extended_charset_falls_back() {
        let mut label = DabLabel::new();
        label.set_full_label(b"Fallback", 0, CharacterSet::EbuLatin);
        label.set_segment_count(1).unwrap();
        label.insert_segment(0, b"Extended").unwrap();
        assert!(label.is_fig2_complete());
        assert_eq!(label.fig2_label(&CONVERTER), None);
        assert_eq!(label.render(&CONVERTER), "Fallback");
    }
}
