//! # Code tables
//!
//! Modified Huffman run-length codes (T.4, Tables 2 and 3) and the
//! two-dimensional mode codes (T.4, Table 4 / T.6, Table 1).

use crate::Color;

/// A prefix code word
///
/// The significant bits of `codeword` are left-aligned, i.e. the first bit
/// of the code is bit 15.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Code {
    /// The left-aligned code word
    pub codeword: u16,
    /// The number of significant bits (1..=16)
    pub length: u8,
}

impl Code {
    /// Create a code from its right-aligned `bits`, e.g. `Code::new(0b0111, 4)`
    pub const fn new(bits: u16, length: u8) -> Self {
        let mask = if length >= 16 { u16::MAX } else { (1 << length) - 1 };
        Self {
            codeword: (bits & mask) << (16 - length as u32),
            length,
        }
    }

    /// Get the code word right-aligned
    pub const fn bits(&self) -> u16 {
        self.codeword >> (16 - self.length as u32)
    }

    /// Whether `self` is a prefix of `other`, or equal to it
    pub const fn is_prefix_of(&self, other: &Code) -> bool {
        if self.length > other.length {
            return false;
        }
        let shift = 16 - self.length as u32;
        (self.codeword >> shift) == (other.codeword >> shift)
    }
}

const fn c(bits: u16, length: u8) -> Code {
    Code::new(bits, length)
}

/// The longest run-length code
pub const MAX_RUN_CODE_LEN: u8 = 13;

/// Distance between two make-up run lengths
pub const MAKEUP_STEP: usize = 64;

/// The longest run length that has a single code
pub const MAX_MAKEUP_RUN: usize = 2560;

/// The first run length that uses the shared make-up codes
pub const SHARED_MAKEUP_START: usize = 1792;

/// White terminating codes for run lengths 0..=63
#[rustfmt::skip]
pub const WHITE_TERMINALS: [Code; 64] = [
    c(0b00110101, 8), c(0b000111, 6), c(0b0111, 4), c(0b1000, 4),
    c(0b1011, 4), c(0b1100, 4), c(0b1110, 4), c(0b1111, 4),
    c(0b10011, 5), c(0b10100, 5), c(0b00111, 5), c(0b01000, 5),
    c(0b001000, 6), c(0b000011, 6), c(0b110100, 6), c(0b110101, 6),
    c(0b101010, 6), c(0b101011, 6), c(0b0100111, 7), c(0b0001100, 7),
    c(0b0001000, 7), c(0b0010111, 7), c(0b0000011, 7), c(0b0000100, 7),
    c(0b0101000, 7), c(0b0101011, 7), c(0b0010011, 7), c(0b0100100, 7),
    c(0b0011000, 7), c(0b00000010, 8), c(0b00000011, 8), c(0b00011010, 8),
    c(0b00011011, 8), c(0b00010010, 8), c(0b00010011, 8), c(0b00010100, 8),
    c(0b00010101, 8), c(0b00010110, 8), c(0b00010111, 8), c(0b00101000, 8),
    c(0b00101001, 8), c(0b00101010, 8), c(0b00101011, 8), c(0b00101100, 8),
    c(0b00101101, 8), c(0b00000100, 8), c(0b00000101, 8), c(0b00001010, 8),
    c(0b00001011, 8), c(0b01010010, 8), c(0b01010011, 8), c(0b01010100, 8),
    c(0b01010101, 8), c(0b00100100, 8), c(0b00100101, 8), c(0b01011000, 8),
    c(0b01011001, 8), c(0b01011010, 8), c(0b01011011, 8), c(0b01001010, 8),
    c(0b01001011, 8), c(0b00110010, 8), c(0b00110011, 8), c(0b00110100, 8),
];

/// Black terminating codes for run lengths 0..=63
#[rustfmt::skip]
pub const BLACK_TERMINALS: [Code; 64] = [
    c(0b0000110111, 10), c(0b010, 3), c(0b11, 2), c(0b10, 2),
    c(0b011, 3), c(0b0011, 4), c(0b0010, 4), c(0b00011, 5),
    c(0b000101, 6), c(0b000100, 6), c(0b0000100, 7), c(0b0000101, 7),
    c(0b0000111, 7), c(0b00000100, 8), c(0b00000111, 8), c(0b000011000, 9),
    c(0b0000010111, 10), c(0b0000011000, 10), c(0b0000001000, 10), c(0b00001100111, 11),
    c(0b00001101000, 11), c(0b00001101100, 11), c(0b00000110111, 11), c(0b00000101000, 11),
    c(0b00000010111, 11), c(0b00000011000, 11), c(0b000011001010, 12), c(0b000011001011, 12),
    c(0b000011001100, 12), c(0b000011001101, 12), c(0b000001101000, 12), c(0b000001101001, 12),
    c(0b000001101010, 12), c(0b000001101011, 12), c(0b000011010010, 12), c(0b000011010011, 12),
    c(0b000011010100, 12), c(0b000011010101, 12), c(0b000011010110, 12), c(0b000011010111, 12),
    c(0b000001101100, 12), c(0b000001101101, 12), c(0b000011011010, 12), c(0b000011011011, 12),
    c(0b000001010100, 12), c(0b000001010101, 12), c(0b000001010110, 12), c(0b000001010111, 12),
    c(0b000001100100, 12), c(0b000001100101, 12), c(0b000001010010, 12), c(0b000001010011, 12),
    c(0b000000100100, 12), c(0b000000110111, 12), c(0b000000111000, 12), c(0b000000100111, 12),
    c(0b000000101000, 12), c(0b000001011000, 12), c(0b000001011001, 12), c(0b000000101011, 12),
    c(0b000000101100, 12), c(0b000001011010, 12), c(0b000001100110, 12), c(0b000001100111, 12),
];

/// White make-up codes for run lengths 64, 128, ..., 1728
#[rustfmt::skip]
pub const WHITE_MAKEUPS: [Code; 27] = [
    c(0b11011, 5), c(0b10010, 5), c(0b010111, 6), c(0b0110111, 7),
    c(0b00110110, 8), c(0b00110111, 8), c(0b01100100, 8), c(0b01100101, 8),
    c(0b01101000, 8), c(0b01100111, 8), c(0b011001100, 9), c(0b011001101, 9),
    c(0b011010010, 9), c(0b011010011, 9), c(0b011010100, 9), c(0b011010101, 9),
    c(0b011010110, 9), c(0b011010111, 9), c(0b011011000, 9), c(0b011011001, 9),
    c(0b011011010, 9), c(0b011011011, 9), c(0b010011000, 9), c(0b010011001, 9),
    c(0b010011010, 9), c(0b011000, 6), c(0b010011011, 9),
];

/// Black make-up codes for run lengths 64, 128, ..., 1728
#[rustfmt::skip]
pub const BLACK_MAKEUPS: [Code; 27] = [
    c(0b0000001111, 10), c(0b000011001000, 12), c(0b000011001001, 12), c(0b000001011011, 12),
    c(0b000000110011, 12), c(0b000000110100, 12), c(0b000000110101, 12), c(0b0000001101100, 13),
    c(0b0000001101101, 13), c(0b0000001001010, 13), c(0b0000001001011, 13), c(0b0000001001100, 13),
    c(0b0000001001101, 13), c(0b0000001110010, 13), c(0b0000001110011, 13), c(0b0000001110100, 13),
    c(0b0000001110101, 13), c(0b0000001110110, 13), c(0b0000001110111, 13), c(0b0000001010010, 13),
    c(0b0000001010011, 13), c(0b0000001010100, 13), c(0b0000001010101, 13), c(0b0000001011010, 13),
    c(0b0000001011011, 13), c(0b0000001100100, 13), c(0b0000001100101, 13),
];

/// Extended make-up codes for run lengths 1792, 1856, ..., 2560 (both colors)
#[rustfmt::skip]
pub const SHARED_MAKEUPS: [Code; 13] = [
    c(0b00000001000, 11), c(0b00000001100, 11), c(0b00000001101, 11), c(0b000000010010, 12),
    c(0b000000010011, 12), c(0b000000010100, 12), c(0b000000010101, 12), c(0b000000010110, 12),
    c(0b000000010111, 12), c(0b000000011100, 12), c(0b000000011101, 12), c(0b000000011110, 12),
    c(0b000000011111, 12),
];

/// End of line
pub const EOL: Code = c(0b000000000001, 12);
/// End of line, followed by a 2D coded row
pub const EOL0: Code = c(0b0000000000010, 13);
/// End of line, followed by a 1D coded row
pub const EOL1: Code = c(0b0000000000011, 13);

/// Number of EOLs in a return-to-control sequence (G3)
pub const RTC_EOLS: usize = 6;
/// Number of EOLs in an end-of-facsimile-block (G4)
pub const EOFB_EOLS: usize = 2;

/// Pass mode
pub const PASS: Code = c(0b0001, 4);
/// Horizontal mode
pub const HORIZONTAL: Code = c(0b001, 3);
/// Vertical mode, `a1` just under `b1`
pub const V0: Code = c(0b1, 1);
/// Vertical mode, `a1` is 1 right of `b1`
pub const VR1: Code = c(0b011, 3);
/// Vertical mode, `a1` is 2 right of `b1`
pub const VR2: Code = c(0b000011, 6);
/// Vertical mode, `a1` is 3 right of `b1`
pub const VR3: Code = c(0b0000011, 7);
/// Vertical mode, `a1` is 1 left of `b1`
pub const VL1: Code = c(0b010, 3);
/// Vertical mode, `a1` is 2 left of `b1`
pub const VL2: Code = c(0b000010, 6);
/// Vertical mode, `a1` is 3 left of `b1`
pub const VL3: Code = c(0b0000010, 7);
/// Prefix of an extension (e.g. uncompressed mode), followed by 3 bits
pub const EXTENSION: Code = c(0b0000001, 7);

/// A two-dimensional coding mode
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
    /// `b2` lies left of `a1`
    Pass,
    /// `a0a1` and `a1a2` are coded as runs
    Horizontal,
    /// `a1` is coded relative to `b1`, with an offset in -3..=3
    Vertical(i8),
    /// An extension code
    Extension,
}

impl Mode {
    /// The code word for this mode
    ///
    /// Returns `None` for a vertical offset outside of -3..=3
    pub const fn code(self) -> Option<Code> {
        match self {
            Mode::Pass => Some(PASS),
            Mode::Horizontal => Some(HORIZONTAL),
            Mode::Vertical(-3) => Some(VL3),
            Mode::Vertical(-2) => Some(VL2),
            Mode::Vertical(-1) => Some(VL1),
            Mode::Vertical(0) => Some(V0),
            Mode::Vertical(1) => Some(VR1),
            Mode::Vertical(2) => Some(VR2),
            Mode::Vertical(3) => Some(VR3),
            Mode::Vertical(_) => None,
            Mode::Extension => Some(EXTENSION),
        }
    }
}

/// All two-dimensional mode codes
pub const MODE_CODES: [(Mode, Code); 10] = [
    (Mode::Pass, PASS),
    (Mode::Horizontal, HORIZONTAL),
    (Mode::Vertical(0), V0),
    (Mode::Vertical(1), VR1),
    (Mode::Vertical(2), VR2),
    (Mode::Vertical(3), VR3),
    (Mode::Vertical(-1), VL1),
    (Mode::Vertical(-2), VL2),
    (Mode::Vertical(-3), VL3),
    (Mode::Extension, EXTENSION),
];

/// The terminating codes for a color
pub fn terminals(color: Color) -> &'static [Code; 64] {
    match color {
        Color::White => &WHITE_TERMINALS,
        Color::Black => &BLACK_TERMINALS,
    }
}

/// The make-up codes for a color (without the shared ones)
pub fn makeups(color: Color) -> &'static [Code; 27] {
    match color {
        Color::White => &WHITE_MAKEUPS,
        Color::Black => &BLACK_MAKEUPS,
    }
}

/// All run-length codes of a color, paired with their run length
pub fn run_codes(color: Color) -> impl Iterator<Item = (usize, Code)> {
    let terms = terminals(color).iter().copied().enumerate();
    let makeups = makeups(color)
        .iter()
        .copied()
        .enumerate()
        .map(|(i, code)| ((i + 1) * MAKEUP_STEP, code));
    let shared = SHARED_MAKEUPS
        .iter()
        .copied()
        .enumerate()
        .map(|(i, code)| (SHARED_MAKEUP_START + i * MAKEUP_STEP, code));
    terms.chain(makeups).chain(shared)
}

/// The make-up code for a multiple of 64 in 64..=2560
pub fn makeup_code(color: Color, len: usize) -> Code {
    debug_assert!(len % MAKEUP_STEP == 0 && (MAKEUP_STEP..=MAX_MAKEUP_RUN).contains(&len));
    if len >= SHARED_MAKEUP_START {
        SHARED_MAKEUPS[(len - SHARED_MAKEUP_START) / MAKEUP_STEP]
    } else {
        makeups(color)[len / MAKEUP_STEP - 1]
    }
}

/// The sequence of codes for a run of `len` pixels
///
/// Runs of 2560 or more start with a chain of the 2560 make-up code, the
/// rest is coded as an optional make-up code and a terminating code.
pub fn codes_for_run(color: Color, mut len: usize) -> impl Iterator<Item = Code> {
    let chain = len / MAX_MAKEUP_RUN;
    len %= MAX_MAKEUP_RUN;
    let makeup = (len >= MAKEUP_STEP).then(|| makeup_code(color, len - len % MAKEUP_STEP));
    let terminal = terminals(color)[len % MAKEUP_STEP];
    std::iter::repeat(SHARED_MAKEUPS[SHARED_MAKEUPS.len() - 1])
        .take(chain)
        .chain(makeup)
        .chain(std::iter::once(terminal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_prefix_free(codes: &[Code]) {
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(
                        !a.is_prefix_of(b),
                        "{:0w1$b} is a prefix of {:0w2$b}",
                        a.bits(),
                        b.bits(),
                        w1 = a.length as usize,
                        w2 = b.length as usize,
                    );
                }
            }
        }
    }

    #[test]
    fn test_code_alignment() {
        let code = Code::new(0b0111, 4);
        assert_eq!(code.codeword, 0b0111_0000_0000_0000);
        assert_eq!(code.bits(), 0b0111);
        assert_eq!(EOL.codeword, 0b0000_0000_0001_0000);
        assert_eq!(EOL1.bits(), 0b11);
    }

    #[test]
    fn test_white_prefix_free() {
        let codes: Vec<Code> = run_codes(Color::White).map(|(_, c)| c).collect();
        assert_eq!(codes.len(), 64 + 27 + 13);
        assert_prefix_free(&codes);
    }

    #[test]
    fn test_black_prefix_free() {
        let codes: Vec<Code> = run_codes(Color::Black).map(|(_, c)| c).collect();
        assert_prefix_free(&codes);
    }

    #[test]
    fn test_mode_prefix_free() {
        let codes: Vec<Code> = MODE_CODES.iter().map(|(_, c)| *c).collect();
        assert_prefix_free(&codes);
    }

    #[test]
    fn test_no_run_code_looks_like_eol() {
        for color in [Color::White, Color::Black] {
            for (len, code) in run_codes(color) {
                assert!(code.codeword.leading_zeros() < 11, "{:?} {}", color, len);
            }
        }
    }

    #[test]
    fn test_codes_for_run() {
        let codes: Vec<_> = codes_for_run(Color::White, 5).collect();
        assert_eq!(codes, vec![WHITE_TERMINALS[5]]);

        let codes: Vec<_> = codes_for_run(Color::Black, 64).collect();
        assert_eq!(codes, vec![BLACK_MAKEUPS[0], BLACK_TERMINALS[0]]);

        let codes: Vec<_> = codes_for_run(Color::White, 1800).collect();
        assert_eq!(codes, vec![SHARED_MAKEUPS[0], WHITE_TERMINALS[8]]);

        let codes: Vec<_> = codes_for_run(Color::White, 2561).collect();
        assert_eq!(codes, vec![SHARED_MAKEUPS[12], WHITE_TERMINALS[1]]);

        let codes: Vec<_> = codes_for_run(Color::Black, 2560 * 2 + 130).collect();
        assert_eq!(
            codes,
            vec![
                SHARED_MAKEUPS[12],
                SHARED_MAKEUPS[12],
                BLACK_MAKEUPS[1],
                BLACK_TERMINALS[2]
            ]
        );
    }

    #[test]
    fn test_mode_code() {
        assert_eq!(Mode::Vertical(-2).code(), Some(VL2));
        assert_eq!(Mode::Vertical(4).code(), None);
        for (mode, code) in MODE_CODES {
            assert_eq!(mode.code(), Some(code));
        }
    }
}
