use crate::scoring::MaintainabilityRecord;
use std::borrow::Cow;
use std::io::Write;

pub const HEADER: [&str; 2] = ["Project", "Maintainability Index"];

const LINE_TERMINATOR: &str = "\r\n";

/// Writes maintainability records as CSV.
///
/// Fields are quoted only when they contain a delimiter, a quote or a line
/// break, and rows end with CRLF.
pub struct CsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_header(&mut self) -> std::io::Result<()> {
        self.write_row(&HEADER)
    }

    pub fn write_record(&mut self, record: &MaintainabilityRecord) -> std::io::Result<()> {
        let score = format_score(record.score);
        self.write_row(&[record.project.as_str(), score.as_str()])
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_row(&mut self, fields: &[&str]) -> std::io::Result<()> {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.writer.write_all(b",")?;
            }
            self.writer.write_all(escape_field(field).as_bytes())?;
        }
        self.writer.write_all(LINE_TERMINATOR.as_bytes())
    }
}

pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Shortest representation that reads back to the same value.
///
/// Magnitudes below `1e-4` switch to exponent form with a signed two-digit
/// exponent (`5e-05`), as Python's `repr(float)` writes them.
pub fn format_score(score: f64) -> String {
    let magnitude = score.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        padded_exponent(&format!("{score:e}"))
    } else {
        format!("{score}")
    }
}

fn padded_exponent(text: &str) -> String {
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text.to_string(),
    }
}
