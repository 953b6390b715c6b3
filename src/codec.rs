//! Open Location Code encoding and decoding.
//!
//! A minimal codec for the base-20 location codes that tile addresses are
//! built on. It covers what tiling needs: encoding a coordinate into a full
//! code (optionally padded), decoding a full code into its bounding box, and
//! the validity checks that decide whether a code can back a tile.
//!
//! Coordinates are converted to integers before digit extraction so cell
//! boundaries are exact at every code length.
//!
//! ```rust
//! use geotiling::codec;
//!
//! let code = codec::encode(47.0000625, 8.0000625, 10)?;
//! assert_eq!(code, "8FVC2222+22");
//!
//! let area = codec::decode(&code)?;
//! assert!((area.center_latitude() - 47.0000625).abs() < 1e-9);
//! # Ok::<(), geotiling::GeoTilingError>(())
//! ```

use crate::error::{GeoTilingError, Result};
use geotiling_types::area::CodeArea;

/// The 20 digits of the code alphabet, in value order.
pub const ALPHABET: &[u8; 20] = b"23456789CFGHJMPQRVWX";

/// Separator between the eighth and ninth digit of a full code.
pub const SEPARATOR: char = '+';

/// Number of digits before the separator in a full code.
pub const SEPARATOR_POSITION: usize = 8;

/// Digit used to pad codes shorter than the separator position.
pub const PADDING_CHARACTER: char = '0';

/// Number of digits made of interleaved latitude/longitude pairs.
pub const PAIR_CODE_LENGTH: usize = 10;

pub const MIN_CODE_LENGTH: usize = 2;
pub const MAX_CODE_LENGTH: usize = 15;

const ENCODING_BASE: i64 = 20;
const GRID_COLUMNS: i64 = 4;
const GRID_ROWS: i64 = 5;
const GRID_CODE_LENGTH: u32 = (MAX_CODE_LENGTH - PAIR_CODE_LENGTH) as u32;

const LATITUDE_MAX: i64 = 90;
const LONGITUDE_MAX: i64 = 180;

/// Integer units per degree of latitude at full grid precision.
const LAT_INTEGER_MULTIPLIER: i64 = 8000 * 3125;
/// Integer units per degree of longitude at full grid precision.
const LNG_INTEGER_MULTIPLIER: i64 = 8000 * 1024;

const DIGIT_VALUES: [i8; 128] = build_digit_values();

const fn build_digit_values() -> [i8; 128] {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        let c = ALPHABET[i];
        table[c as usize] = i as i8;
        table[c.to_ascii_lowercase() as usize] = i as i8;
        i += 1;
    }
    table
}

/// Value of a code digit, case-insensitive. `None` for anything outside the alphabet.
///
/// ```rust
/// use geotiling::codec::digit_value;
///
/// assert_eq!(digit_value('2'), Some(0));
/// assert_eq!(digit_value('x'), Some(19));
/// assert_eq!(digit_value('A'), None);
/// ```
pub fn digit_value(c: char) -> Option<usize> {
    if !c.is_ascii() {
        return None;
    }
    let value = DIGIT_VALUES[c as usize];
    (value >= 0).then_some(value as usize)
}

/// Encode a location into a full code of `code_length` significant digits.
///
/// Latitude is clipped to [-90, 90] and longitude normalized into [-180, 180).
/// Lengths below the separator position must be even and are padded with `'0'`.
pub fn encode(latitude: f64, longitude: f64, code_length: usize) -> Result<String> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(GeoTilingError::InvalidCoordinate(format!(
            "Coordinates must be finite, got: ({}, {})",
            latitude, longitude
        )));
    }

    if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code_length)
        || (code_length < PAIR_CODE_LENGTH && code_length % 2 == 1)
    {
        return Err(GeoTilingError::InvalidCodeLength(code_length));
    }

    let digits = encode_digits(latitude, longitude, code_length);

    let mut code = String::with_capacity(code_length.max(SEPARATOR_POSITION) + 1);
    for (i, digit) in digits.iter().take(code_length).enumerate() {
        if i == SEPARATOR_POSITION {
            code.push(SEPARATOR);
        }
        code.push(*digit as char);
    }
    for _ in code_length..SEPARATOR_POSITION {
        code.push(PADDING_CHARACTER);
    }
    if code_length <= SEPARATOR_POSITION {
        code.push(SEPARATOR);
    }

    Ok(code)
}

/// The first `length` digits of the code for a location, without separator or padding.
///
/// Total for any input: non-finite values land in a boundary cell.
pub(crate) fn encode_address(latitude: f64, longitude: f64, length: usize) -> String {
    let length = length.min(PAIR_CODE_LENGTH);
    encode_digits(latitude, longitude, length)
        .iter()
        .take(length)
        .map(|digit| *digit as char)
        .collect()
}

fn encode_digits(latitude: f64, longitude: f64, code_length: usize) -> [u8; MAX_CODE_LENGTH] {
    let (mut lat_val, mut lng_val) = to_integers(latitude, longitude);
    let mut digits = [ALPHABET[0]; MAX_CODE_LENGTH];

    if code_length > PAIR_CODE_LENGTH {
        for i in (PAIR_CODE_LENGTH..MAX_CODE_LENGTH).rev() {
            let lat_digit = lat_val % GRID_ROWS;
            let lng_digit = lng_val % GRID_COLUMNS;
            digits[i] = ALPHABET[(lat_digit * GRID_COLUMNS + lng_digit) as usize];
            lat_val /= GRID_ROWS;
            lng_val /= GRID_COLUMNS;
        }
    } else {
        lat_val /= GRID_ROWS.pow(GRID_CODE_LENGTH);
        lng_val /= GRID_COLUMNS.pow(GRID_CODE_LENGTH);
    }

    for i in (0..PAIR_CODE_LENGTH / 2).rev() {
        digits[i * 2] = ALPHABET[(lat_val % ENCODING_BASE) as usize];
        digits[i * 2 + 1] = ALPHABET[(lng_val % ENCODING_BASE) as usize];
        lat_val /= ENCODING_BASE;
        lng_val /= ENCODING_BASE;
    }

    digits
}

/// Convert degrees to non-negative integer grid units, clipping latitude and
/// wrapping longitude.
fn to_integers(latitude: f64, longitude: f64) -> (i64, i64) {
    let latitude = latitude.clamp(-(LATITUDE_MAX as f64), LATITUDE_MAX as f64);
    let mut lat_val =
        to_units(latitude, LAT_INTEGER_MULTIPLIER) + LATITUDE_MAX * LAT_INTEGER_MULTIPLIER;
    lat_val = lat_val.clamp(0, 2 * LATITUDE_MAX * LAT_INTEGER_MULTIPLIER - 1);

    let longitude = if (-180.0..180.0).contains(&longitude) {
        longitude
    } else {
        (longitude + 180.0).rem_euclid(360.0) - 180.0
    };
    let lng_val = (to_units(longitude, LNG_INTEGER_MULTIPLIER)
        + LONGITUDE_MAX * LNG_INTEGER_MULTIPLIER)
        .rem_euclid(2 * LONGITUDE_MAX * LNG_INTEGER_MULTIPLIER);

    (lat_val, lng_val)
}

// Rounds away float noise below a millionth of a unit before flooring, so
// values sitting on a cell boundary land in the cell they start.
fn to_units(degrees: f64, multiplier: i64) -> i64 {
    ((degrees * multiplier as f64 * 1e6).round() / 1e6).floor() as i64
}

/// Decode a full code into the area it covers.
pub fn decode(code: &str) -> Result<CodeArea> {
    if !is_full(code) {
        return Err(GeoTilingError::InvalidAddress(format!(
            "{} is not a valid full code",
            code
        )));
    }

    Ok(decode_digits(code))
}

/// Decode the significant digits of a code into the area they cover.
///
/// Separator and padding are skipped. Callers validate the digits first.
pub(crate) fn decode_digits(code: &str) -> CodeArea {
    let digits: Vec<i64> = code
        .chars()
        .filter(|c| *c != SEPARATOR && *c != PADDING_CHARACTER)
        .take(MAX_CODE_LENGTH)
        .filter_map(digit_value)
        .map(|value| value as i64)
        .collect();

    let pair_len = digits.len().min(PAIR_CODE_LENGTH);
    let mut lat_val = 0i64;
    let mut lng_val = 0i64;
    let mut lat_place = ENCODING_BASE * LAT_INTEGER_MULTIPLIER;
    let mut lng_place = ENCODING_BASE * LNG_INTEGER_MULTIPLIER;
    let mut lat_res = lat_place;
    let mut lng_res = lng_place;

    for pair in digits[..pair_len].chunks(2) {
        lat_res = lat_place;
        lng_res = lng_place;
        lat_val += pair[0] * lat_place;
        lng_val += pair.get(1).copied().unwrap_or(0) * lng_place;
        lat_place /= ENCODING_BASE;
        lng_place /= ENCODING_BASE;
    }

    for digit in &digits[pair_len..] {
        lat_res /= GRID_ROWS;
        lng_res /= GRID_COLUMNS;
        lat_val += (digit / GRID_COLUMNS) * lat_res;
        lng_val += (digit % GRID_COLUMNS) * lng_res;
    }

    let lat_scale = LAT_INTEGER_MULTIPLIER as f64;
    let lng_scale = LNG_INTEGER_MULTIPLIER as f64;
    CodeArea::new(
        lat_val as f64 / lat_scale - LATITUDE_MAX as f64,
        lng_val as f64 / lng_scale - LONGITUDE_MAX as f64,
        (lat_val + lat_res) as f64 / lat_scale - LATITUDE_MAX as f64,
        (lng_val + lng_res) as f64 / lng_scale - LONGITUDE_MAX as f64,
        digits.len(),
    )
}

/// Check that a string is a syntactically valid code, full or short.
pub fn is_valid(code: &str) -> bool {
    if code.len() < 2 || !code.is_ascii() {
        return false;
    }

    let Some(separator) = code.find(SEPARATOR) else {
        return false;
    };
    if code.rfind(SEPARATOR) != Some(separator) {
        return false;
    }
    if separator > SEPARATOR_POSITION || separator % 2 == 1 {
        return false;
    }

    if let Some(padding_start) = code.find(PADDING_CHARACTER) {
        // Short codes cannot be padded, and padding cannot lead.
        if separator < SEPARATOR_POSITION || padding_start == 0 || padding_start > separator {
            return false;
        }
        // One even-length run of padding, immediately before a trailing separator.
        let padding = &code[padding_start..separator];
        if padding.len() % 2 == 1 || padding.chars().any(|c| c != PADDING_CHARACTER) {
            return false;
        }
        if !code.ends_with(SEPARATOR) {
            return false;
        }
    }

    // A single digit after the separator is not allowed.
    if code.len() - separator - 1 == 1 {
        return false;
    }

    code.chars()
        .all(|c| c == SEPARATOR || c == PADDING_CHARACTER || digit_value(c).is_some())
}

/// Check that a code is valid and short (separator before position 8).
pub fn is_short(code: &str) -> bool {
    match code.find(SEPARATOR) {
        Some(separator) => is_valid(code) && separator < SEPARATOR_POSITION,
        None => false,
    }
}

/// Check that a code is valid, not short, and its first digits stay on the globe.
///
/// ```rust
/// use geotiling::codec::is_full;
///
/// assert!(is_full("8FVC9G8F+6X"));
/// assert!(is_full("C9000000+"));
/// assert!(!is_full("9G8F+6X")); // short
/// assert!(!is_full("X2000000+")); // first latitude digit beyond 90°
/// ```
pub fn is_full(code: &str) -> bool {
    if !is_valid(code) || is_short(code) {
        return false;
    }

    let mut chars = code.chars();
    let first_latitude = chars.next().and_then(digit_value).unwrap_or(usize::MAX);
    if first_latitude as i64 * ENCODING_BASE >= 2 * LATITUDE_MAX {
        return false;
    }
    if let Some(first_longitude) = chars.next().and_then(digit_value)
        && first_longitude as i64 * ENCODING_BASE >= 2 * LONGITUDE_MAX
    {
        return false;
    }
    true
}

/// Check whether a code carries padding digits.
pub fn is_padded(code: &str) -> bool {
    code.contains(PADDING_CHARACTER)
}
