//! # Rows and synchronization codes
//!
//! The frame coder runs the row coders for the selected [`Scheme`] and
//! takes care of EOL codes, row tags, byte alignment and the RTC / EOFB
//! terminators.

use log::{debug, trace, warn};

use crate::{
    bits::{BitReader, BitWriter},
    config::{CodecConfig, Scheme},
    g3, g42d,
    tables::{EOFB_EOLS, EOL, EOL0, EOL1, RTC_EOLS},
    Color, FaxError, FaxResult, PixelValues,
};

/// What comes next at the start of a row
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum RowStart {
    /// A row coded with the 1D coder
    OneD,
    /// A row coded with the 2D coder
    TwoD,
    /// The terminator or the end of the data
    End,
}

/// The encoder
pub struct Encoder<'a> {
    config: &'a CodecConfig,
    pixels: PixelValues,
    writer: BitWriter,
    reference: Vec<Color>,
    coding: Vec<Color>,
}

impl<'a> Encoder<'a> {
    /// Create a new encoder
    pub fn new(config: &'a CodecConfig) -> FaxResult<Self> {
        if config.columns == 0 {
            return Err(FaxError::InvalidColumns);
        }
        Ok(Self {
            config,
            pixels: config.pixels(),
            writer: BitWriter::with_capacity(config.columns),
            reference: vec![Color::White; config.columns],
            coding: Vec::with_capacity(config.columns),
        })
    }

    /// Encode the next row
    ///
    /// Pixels after the first `columns` are ignored.
    pub fn encode_row(&mut self, index: usize, row: &[u8]) -> FaxResult<()> {
        let columns = self.config.columns;
        if row.len() < columns {
            return Err(FaxError::RowLength {
                row: index,
                len: row.len(),
                columns,
            });
        }
        self.pixels.to_colors(&row[..columns], &mut self.coding);

        match self.config.scheme() {
            Scheme::G3OneD => {
                if self.config.end_of_line {
                    self.writer.write_code(EOL);
                }
                g3::encode_row(&mut self.writer, &self.coding);
            }
            Scheme::G3TwoD { k } => {
                let one_d = index % k == 0;
                if self.config.end_of_line {
                    self.writer.write_code(if one_d { EOL1 } else { EOL0 });
                } else {
                    self.writer.write(one_d);
                }
                if one_d {
                    g3::encode_row(&mut self.writer, &self.coding);
                } else {
                    g42d::encode_row(&mut self.writer, &self.reference, &self.coding);
                }
            }
            Scheme::G4 => g42d::encode_row(&mut self.writer, &self.reference, &self.coding),
        }
        trace!("row {} ends at bit {}", index, self.writer.bit_pos());

        if self.config.encoded_byte_align {
            self.writer.align();
        }
        std::mem::swap(&mut self.reference, &mut self.coding);
        Ok(())
    }

    /// Write the terminator (if configured) and return the data
    pub fn finish(mut self) -> Vec<u8> {
        if self.config.end_of_block {
            match self.config.scheme() {
                Scheme::G3OneD => self.writer.write_eols(EOL, RTC_EOLS),
                Scheme::G3TwoD { .. } => self.writer.write_eols(EOL1, RTC_EOLS),
                Scheme::G4 => self.writer.write_eols(EOL, EOFB_EOLS),
            }
        }
        let mut data = self.writer.done();
        self.config.fill_order.apply(&mut data);
        data
    }

    /// Encode all rows, up to `Rows` if that is set
    pub fn encode<R: AsRef<[u8]>>(mut self, rows: &[R]) -> FaxResult<Vec<u8>> {
        let limit = match self.config.rows {
            0 => rows.len(),
            n => n.min(rows.len()),
        };
        for (index, row) in rows[..limit].iter().enumerate() {
            self.encode_row(index, row.as_ref())?;
        }
        debug!("encoded {} rows of {} pixels", limit, self.config.columns);
        Ok(self.finish())
    }
}

/// The decoder
pub struct Decoder<'a> {
    config: &'a CodecConfig,
    pixels: PixelValues,
    reference: Vec<Color>,
    coding: Vec<Color>,
    damaged: usize,
}

impl<'a> Decoder<'a> {
    /// Create a new decoder
    pub fn new(config: &'a CodecConfig) -> FaxResult<Self> {
        if config.columns == 0 {
            return Err(FaxError::InvalidColumns);
        }
        Ok(Self {
            config,
            pixels: config.pixels(),
            reference: vec![Color::White; config.columns],
            coding: Vec::with_capacity(config.columns),
            damaged: 0,
        })
    }

    fn can_skip(&self) -> bool {
        self.config.can_recover() && self.damaged < self.config.damaged_rows_before_error
    }

    /// Find out what comes next at the start of a row
    fn sync(&self, reader: &mut BitReader, row: usize) -> FaxResult<RowStart> {
        if reader.is_exhausted() {
            return Ok(RowStart::End);
        }
        match self.config.scheme() {
            Scheme::G4 => {
                if !reader.try_eol() {
                    Ok(RowStart::TwoD)
                } else if reader.try_eol() {
                    Ok(RowStart::End)
                } else {
                    Err(FaxError::EofbCorrupt {
                        bit_pos: reader.bit_pos(),
                    })
                }
            }
            Scheme::G3OneD => self.sync_g3(reader, row, false),
            Scheme::G3TwoD { .. } => self.sync_g3(reader, row, true),
        }
    }

    fn sync_g3(&self, reader: &mut BitReader, row: usize, tagged: bool) -> FaxResult<RowStart> {
        let mut eols = 0;
        let mut tag = None;
        while eols < RTC_EOLS && reader.try_eol() {
            eols += 1;
            if tagged {
                tag = match reader.remaining() {
                    0 => None,
                    _ => Some(reader.read_bit()?),
                };
            }
        }
        trace!("{} EOL(s) before row {} at bit {}", eols, row, reader.bit_pos());

        let start = |tag: Option<bool>| match tag {
            Some(false) => RowStart::TwoD,
            _ => RowStart::OneD,
        };
        match eols {
            0 if self.config.end_of_line => Err(FaxError::MissingEol { row }),
            0 if tagged => Ok(start(Some(reader.read_bit()?))),
            0 => Ok(RowStart::OneD),
            1 if reader.is_exhausted() => Ok(RowStart::End),
            1 => Ok(start(tag)),
            RTC_EOLS => Ok(RowStart::End),
            _ if reader.is_exhausted() => Ok(RowStart::End),
            _ => Err(FaxError::RtcCorrupt { eols }),
        }
    }

    /// Consume the terminator after the last of `Rows` rows, if there is one
    fn skip_terminator(&self, reader: &mut BitReader) -> bool {
        let count = match self.config.scheme() {
            Scheme::G4 => EOFB_EOLS,
            _ => RTC_EOLS,
        };
        let tagged = matches!(self.config.scheme(), Scheme::G3TwoD { .. });
        let mut lookahead = reader.clone();
        for _ in 0..count {
            if !lookahead.try_eol() || (tagged && lookahead.read_bit().is_err()) {
                return false;
            }
        }
        *reader = lookahead;
        true
    }

    fn decode_row(&mut self, reader: &mut BitReader, row: usize) -> FaxResult<bool> {
        let coder = self.sync(reader, row)?;
        trace!("row {} is {:?}", row, coder);
        let result = match coder {
            RowStart::End => return Ok(false),
            RowStart::OneD => g3::decode_row(reader, self.config.columns, &mut self.coding),
            RowStart::TwoD => g42d::decode_row(reader, &self.reference, &mut self.coding),
        };
        result.map_err(|e| e.in_row(row))?;
        Ok(true)
    }

    /// Decode all rows from `data`, which must be in MSB-first order
    pub fn decode(mut self, data: &[u8]) -> FaxResult<Vec<Vec<u8>>> {
        let mut reader = BitReader::new(data);
        let mut rows = Vec::new();
        loop {
            let index = rows.len();
            if self.config.rows > 0 && index >= self.config.rows {
                if self.config.end_of_block {
                    let found = self.skip_terminator(&mut reader);
                    debug!("terminator after {} rows: {}", index, found);
                }
                break;
            }
            match self.decode_row(&mut reader, index) {
                Ok(true) if self.config.encoded_byte_align => reader.align(),
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if self.can_skip() => {
                    self.damaged += 1;
                    warn!(
                        "Replacing damaged row {} ({}/{}): {}",
                        index, self.damaged, self.config.damaged_rows_before_error, e
                    );
                    self.coding.clear();
                    self.coding.resize(self.config.columns, Color::White);
                    reader.seek_eol();
                }
                Err(e) => return Err(e),
            }
            rows.push(self.pixels.to_bytes(&self.coding));
            std::mem::swap(&mut self.reference, &mut self.coding);
        }
        debug!("decoded {} rows, {} bits left", rows.len(), reader.remaining());
        Ok(rows)
    }
}
