use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Position of a well on a plate, zero-based.
///
/// Ordering is row-major (`A1 < A2 < ... < A12 < B1`), which is the canonical
/// iteration order of every container in this crate.
///
/// Well ids are written in plate notation: row letters followed by the
/// one-based column number. Rows past `Z` continue with `AA`, `AB`, ... as on
/// 1536-well plates.
///
/// # Example
///
/// ```
/// use platestats_model::WellId;
///
/// let id: WellId = "H12".parse().unwrap();
/// assert_eq!(id, WellId::new(7, 11));
/// assert_eq!(WellId::new(26, 0).to_string(), "AA1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WellId {
    row: u16,
    column: u16,
}

impl WellId {
    #[must_use]
    pub const fn new(row: u16, column: u16) -> Self {
        Self { row, column }
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn row(self) -> u16 {
        self.row
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn column(self) -> u16 {
        self.column
    }
}

impl fmt::Display for WellId {
    #[expect(clippy::cast_possible_truncation)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::with_capacity(2);
        let mut n = u32::from(self.row) + 1;
        while n > 0 {
            n -= 1;
            letters.push(char::from(b'A' + (n % 26) as u8));
            n /= 26;
        }
        for c in letters.iter().rev() {
            write!(f, "{c}")?;
        }
        write!(f, "{}", u32::from(self.column) + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseWellIdError {
    #[display("well id '{input}' has no row letters")]
    MissingRow { input: String },
    #[display("well id '{input}' has no column number")]
    MissingColumn { input: String },
    #[display("well id '{input}' has an invalid column number")]
    InvalidColumn { input: String },
    #[display("well id '{input}' is out of range")]
    OutOfRange { input: String },
}

impl FromStr for WellId {
    type Err = ParseWellIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = || s.to_owned();
        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (letters, digits) = s.split_at(split);
        if letters.is_empty() {
            return Err(ParseWellIdError::MissingRow { input: input() });
        }
        if digits.is_empty() {
            return Err(ParseWellIdError::MissingColumn { input: input() });
        }

        let mut row = 0_u32;
        for c in letters.bytes() {
            let digit = u32::from(c.to_ascii_uppercase() - b'A') + 1;
            row = row
                .checked_mul(26)
                .and_then(|r| r.checked_add(digit))
                .ok_or_else(|| ParseWellIdError::OutOfRange { input: input() })?;
        }
        let row = u16::try_from(row - 1)
            .map_err(|_| ParseWellIdError::OutOfRange { input: input() })?;

        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseWellIdError::InvalidColumn { input: input() });
        }
        let column = digits
            .parse::<u32>()
            .map_err(|_| ParseWellIdError::OutOfRange { input: input() })?;
        let column = column
            .checked_sub(1)
            .ok_or_else(|| ParseWellIdError::InvalidColumn { input: input() })?;
        let column = u16::try_from(column)
            .map_err(|_| ParseWellIdError::OutOfRange { input: input() })?;

        Ok(Self { row, column })
    }
}

impl Serialize for WellId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WellId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A single well: an identity plus an ordered sequence of readings.
///
/// The number of readings is fixed at construction. Readings are kept in the
/// order they were measured.
///
/// # Example
///
/// ```
/// use platestats_model::{Well, WellId};
///
/// let well = Well::new(WellId::new(0, 0), vec![1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(well.size(), 4);
/// assert_eq!(well.slice(1, 2), Some(&[2.0, 3.0][..]));
/// assert_eq!(well.slice(3, 2), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Well {
    id: WellId,
    readings: Vec<f64>,
}

impl Well {
    #[must_use]
    pub fn new(id: WellId, readings: Vec<f64>) -> Self {
        Self { id, readings }
    }

    #[must_use]
    pub fn id(&self) -> WellId {
        self.id
    }

    /// Number of readings.
    #[must_use]
    pub fn size(&self) -> usize {
        self.readings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    #[must_use]
    pub fn readings(&self) -> &[f64] {
        &self.readings
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.readings.iter().copied()
    }

    /// Readings `[begin, begin + length)`, or `None` if that range does not fit.
    #[must_use]
    pub fn slice(&self, begin: usize, length: usize) -> Option<&[f64]> {
        let end = begin.checked_add(length)?;
        self.readings.get(begin..end)
    }

    /// Materializes the readings `[begin, begin + length)` as a new well with
    /// the same identity.
    #[must_use]
    pub fn window(&self, begin: usize, length: usize) -> Option<Self> {
        self.slice(begin, length)
            .map(|readings| Self::new(self.id, readings.to_vec()))
    }
}

impl<'a> IntoIterator for &'a Well {
    type Item = f64;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.iter().copied()
    }
}
