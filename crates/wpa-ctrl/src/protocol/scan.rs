//! `SCAN_RESULTS` decoder.

use super::table::{field, parse_flags, Header, FIELD_SEPARATOR};
use crate::error::ParseError;
use crate::models::{MacAddr, ScanResult};

/// Decode a `SCAN_RESULTS` reply.
///
/// Fault-tolerant per line: a line that is too short, or whose BSSID,
/// frequency or signal level does not parse, is recorded as one
/// [`ParseError`] and skipped. Both vectors are meaningful together.
pub fn parse_scan_results(reply: &str) -> (Vec<ScanResult>, Vec<ParseError>) {
    let mut results = Vec::new();
    let mut errors = Vec::new();

    let mut lines = reply.lines();
    let Some(header) = lines.next().map(Header::parse) else {
        errors.push(ParseError::empty());
        return (results, errors);
    };

    let columns = ScanColumns {
        bssid: header.position("bssid"),
        frequency: header.position("frequency"),
        rssi: header.position("signal level"),
        flags: header.position("flags"),
        ssid: header.position("ssid"),
        count: header.len(),
    };

    for line in lines {
        match columns.parse_line(line) {
            Ok(result) => results.push(result),
            Err(e) => errors.push(e),
        }
    }

    (results, errors)
}

struct ScanColumns {
    bssid: Option<usize>,
    frequency: Option<usize>,
    rssi: Option<usize>,
    flags: Option<usize>,
    ssid: Option<usize>,
    count: usize,
}

impl ScanColumns {
    fn parse_line(&self, line: &str) -> Result<ScanResult, ParseError> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() < self.count {
            return Err(ParseError::new(line));
        }

        let bssid = match self.bssid {
            Some(c) => field(&fields, Some(c))
                .parse::<MacAddr>()
                .map_err(|e| ParseError::with_source(line, e))?,
            None => MacAddr::default(),
        };

        let parse_int = |col: Option<usize>| -> Result<i32, ParseError> {
            match col {
                Some(c) => field(&fields, Some(c))
                    .parse::<i32>()
                    .map_err(|e| ParseError::with_source(line, e)),
                None => Ok(0),
            }
        };

        Ok(ScanResult {
            bssid,
            frequency: parse_int(self.frequency)?,
            rssi: parse_int(self.rssi)?,
            flags: self
                .flags
                .map(|c| parse_flags(field(&fields, Some(c))))
                .unwrap_or_default(),
            ssid: field(&fields, self.ssid).to_string(),
        })
    }
}
