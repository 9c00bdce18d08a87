/// The 3 bit type name format (TNF) of a record
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum NdefType {
    Empty,
    WellKnown,
    Mime,
    AbsoluteUri,
    External,
    Unknown,
    Unchanged,
    Reserved,
}

impl NdefType {
    /// Only the lower 3 bits are used
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Self::Empty,
            1 => Self::WellKnown,
            2 => Self::Mime,
            3 => Self::AbsoluteUri,
            4 => Self::External,
            5 => Self::Unknown,
            6 => Self::Unchanged,
            _ => Self::Reserved,
        }
    }

    pub fn to_bits(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::WellKnown => 1,
            Self::Mime => 2,
            Self::AbsoluteUri => 3,
            Self::External => 4,
            Self::Unknown => 5,
            Self::Unchanged => 6,
            Self::Reserved => 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_ignore_flag_bits() {
        // 0xD1 is MB | ME | SR with a well known TNF
        assert_eq!(NdefType::from_bits(0xD1), NdefType::WellKnown);
        assert_eq!(NdefType::from_bits(0x07), NdefType::Reserved);
        assert_eq!(NdefType::Mime.to_bits(), 2);
    }
}
