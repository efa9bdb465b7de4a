use crate::error::SsitError;
use crate::pipeline::ScanTable;
use crate::record::{Inversion, Record};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Significant digits used for every real column.
pub const DISPLAY_DIGITS: usize = 12;

pub const INF_TOKEN: &str = "INF";

/// `%g`-style rendering: `digits` significant digits, trailing zeros
/// dropped, scientific notation outside `1e-4 <= |x| < 10^digits`.
pub fn format_g(x: f64, digits: usize) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, x);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        unreachable!("LowerExp output without exponent: {}", scientific);
    };
    let exponent: i32 = exponent
        .parse()
        .unwrap_or_else(|_| unreachable!("LowerExp exponent not an integer: {}", scientific));

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (digits as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

pub fn format_real(x: f64) -> String {
    format_g(x, DISPLAY_DIGITS)
}

pub fn format_optional(x: Option<f64>) -> String {
    x.map(format_real).unwrap_or_default()
}

pub fn format_inversion(i: &Inversion) -> String {
    match i {
        Inversion::Finite(v) => format_real(*v),
        Inversion::Infinite => INF_TOKEN.to_string(),
    }
}

fn flag(b: bool) -> &'static str {
    if b { "1" } else { "0" }
}

pub fn header(near_eps: f64) -> Vec<String> {
    [
        "n",
        "set_type",
        "d_min",
        "H_s",
        "I",
        "I_is_inf",
        "prime_proxy",
    ]
    .into_iter()
    .map(str::to_string)
    .chain(std::iter::once(format!("in_NearInf_eps_{}", near_eps)))
    .chain(
        [
            "lane_a",
            "D_inf",
            "SIS",
            "d2I",
            "K",
            "zone",
            "shock_flag",
            "guard_flag",
            "ido_dominators",
        ]
        .into_iter()
        .map(str::to_string),
    )
    .collect()
}

pub fn row(r: &Record) -> Vec<String> {
    vec![
        r.n.to_string(),
        r.class.as_str().to_string(),
        r.d_min.map(|d| d.to_string()).unwrap_or_default(),
        format_optional(r.h_s),
        format_inversion(&r.inversion),
        flag(r.inversion.is_infinite()).to_string(),
        flag(r.prime_proxy).to_string(),
        flag(r.near_infinity).to_string(),
        format_real(r.lane),
        format_real(r.depth),
        r.band.map(|b| b.as_str().to_string()).unwrap_or_default(),
        format_optional(r.second_difference),
        format_optional(r.curvature),
        r.zone.as_str().to_string(),
        flag(r.shock).to_string(),
        flag(r.guard).to_string(),
        r.dominators.map(|c| c.to_string()).unwrap_or_default(),
    ]
}

/// Forwards writes and hashes every byte that passes through.
pub struct HashingWriter<W: Write> {
    inner: W,
    hasher: Sha256,
}

impl<W: Write> HashingWriter<W> {
    pub fn new(inner: W) -> Self {
        HashingWriter { inner, hasher: Sha256::new() }
    }

    /// Hex SHA-256 of everything written so far, plus the inner writer.
    pub fn finish(self) -> (String, W) {
        (hex::encode(self.hasher.finalize()), self.inner)
    }
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.hasher.update(&buf[..written]);
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

pub fn write_csv<W: Write>(table: &ScanTable, out: &mut W) -> Result<(), SsitError> {
    writeln!(out, "{}", header(table.config().near_eps).join(","))?;
    for record in table.records() {
        writeln!(out, "{}", row(record).join(","))?;
    }
    Ok(())
}

pub fn csv_bytes(table: &ScanTable) -> Result<Vec<u8>, SsitError> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(buf)
}

/// Write the table as CSV and return the hex SHA-256 of the written bytes.
pub fn write_csv_file<P: AsRef<Path>>(table: &ScanTable, path: P) -> Result<String, SsitError> {
    let file = File::create(path)?;
    let mut writer = HashingWriter::new(BufWriter::new(file));
    write_csv(table, &mut writer)?;
    writer.flush()?;
    let (digest, _) = writer.finish();
    Ok(digest)
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
