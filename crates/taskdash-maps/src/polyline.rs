//! Encoded polyline decoding (Google algorithm, precision 5, as used by OSRM).

use crate::error::PolylineError;
use crate::types::Coordinate;

const PRECISION: f64 = 1e5;

/// Decode an encoded polyline into `(lat, lng)` points.
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        lat = accumulate(lat, bytes, &mut index)?;
        lng = accumulate(lng, bytes, &mut index)?;
        points.push(Coordinate {
            lat: lat as f64 / PRECISION,
            lng: lng as f64 / PRECISION,
        });
    }

    Ok(points)
}

/// Add the next delta to a running coordinate sum.
fn accumulate(sum: i64, bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let start = *index;
    let delta = next_value(bytes, index)?;
    sum.checked_add(delta).ok_or(PolylineError::Overflow(start))
}

/// Read one zig-zag varint of 5-bit chunks starting at `index`.
fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0u32;

    loop {
        let at = *index;
        let byte = *bytes.get(at).ok_or(PolylineError::Truncated(at))?;
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidChar {
                ch: char::from(byte),
                index: at,
            });
        }
        if shift > 55 {
            return Err(PolylineError::Overflow(at));
        }

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        *index += 1;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}
