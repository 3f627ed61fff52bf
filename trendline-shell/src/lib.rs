mod error;
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

use serde_derive::*;
use std::io::Read;
use trendline_morph::{Candle, CandlestickSeries, ScanStart};
use trendline_utils::{parse_ts_from_str, Interval};

/// One row of a candle table, matched by header name.
#[derive(Debug, Deserialize)]
struct CandleRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Open")]
    open: f64,
    #[serde(rename = "High")]
    high: f64,
    #[serde(rename = "Low")]
    low: f64,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "Volume", default)]
    volume: f64,
}

/// Reads a candle table with a header row, comma or whitespace delimited.
///
/// Columns are matched by name: Date, Open, High, Low, Close and the
/// optional Volume. Any other column (Idx, Notes...) is ignored and
/// positions follow row order.
pub fn load_candles<R: Read>(mut reader: R, interval: Interval) -> Result<CandlestickSeries> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let normalized = normalize_delimiters(&text);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(normalized.as_bytes());
    let mut candles = Vec::new();
    for (i, r) in rdr.deserialize().enumerate() {
        let rec: CandleRecord = r?;
        let ts = parse_ts_from_str(&rec.date)
            .map_err(|e| Error::Input(format!("row {}: {}", i + 1, e)))?;
        candles.push(Candle::new(
            ts, rec.open, rec.high, rec.low, rec.close, rec.volume,
        ));
    }
    log::debug!("{} candles loaded", candles.len());
    Ok(CandlestickSeries::from_candles(candles, interval)?)
}

/// A bare integer is a position, anything else a timestamp.
pub fn parse_scan_from(s: &str) -> Result<ScanStart> {
    if let Ok(pos) = s.trim().parse::<usize>() {
        return Ok(ScanStart::Position(pos));
    }
    Ok(ScanStart::Timestamp(parse_ts_from_str(s.trim())?))
}

// whitespace tables are rewritten as comma separated
fn normalize_delimiters(text: &str) -> String {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty()).peekable();
    let comma = lines.peek().map(|h| h.contains(',')).unwrap_or(false);
    let mut out = String::with_capacity(text.len());
    for line in lines {
        if comma {
            out.push_str(line);
        } else {
            out.push_str(&line.split_whitespace().collect::<Vec<_>>().join(","));
        }
        out.push('\n');
    }
    out
}
