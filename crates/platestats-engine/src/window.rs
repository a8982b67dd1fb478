use platestats_model::Well;

use crate::{RangeError, StatError};

/// A contiguous sub-range `[begin, begin + length)` of a well's readings.
///
/// The same window is applied to every well an operation touches. Its length
/// is always at least 1; whether it fits a given well is checked when it is
/// applied.
///
/// # Example
///
/// ```
/// use platestats_engine::Window;
/// use platestats_model::{Well, WellId};
///
/// let well = Well::new(WellId::new(0, 0), vec![1.0, 2.0, 3.0, 4.0]);
/// let window = Window::new(1, 2).unwrap();
/// assert_eq!(window.slice(&well).unwrap(), &[2.0, 3.0]);
///
/// assert!(Window::new(0, 0).is_err());
/// assert!(Window::try_from((-1_i64, 3)).is_err());
/// assert!(Window::new(3, 2).unwrap().slice(&well).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    begin: usize,
    length: usize,
}

impl Window {
    /// Creates a window, rejecting an empty length.
    pub fn new(begin: usize, length: usize) -> Result<Self, StatError> {
        if length == 0 {
            return Err(RangeError::EmptyLength { length: 0 }.into());
        }
        Ok(Self { begin, length })
    }

    #[must_use]
    pub fn begin(self) -> usize {
        self.begin
    }

    #[must_use]
    pub fn length(self) -> usize {
        self.length
    }

    /// One past the last selected index, or `None` if it overflows `usize`.
    #[must_use]
    pub fn end(self) -> Option<usize> {
        self.begin.checked_add(self.length)
    }

    /// Whether the window lies entirely within a sequence of `size` readings.
    #[must_use]
    pub fn fits(self, size: usize) -> bool {
        self.end().is_some_and(|end| end <= size)
    }

    /// The readings of `well` selected by this window.
    pub fn slice(self, well: &Well) -> Result<&[f64], StatError> {
        well.slice(self.begin, self.length).ok_or_else(|| {
            RangeError::Overrun {
                well: well.id(),
                begin: self.begin,
                length: self.length,
                size: well.size(),
            }
            .into()
        })
    }
}

impl TryFrom<(i64, i64)> for Window {
    type Error = StatError;

    /// Converts a signed `(begin, length)` pair, as read from external input.
    fn try_from((begin, length): (i64, i64)) -> Result<Self, Self::Error> {
        let begin = usize::try_from(begin).map_err(|_| RangeError::NegativeBegin { begin })?;
        match usize::try_from(length) {
            Ok(length) if length > 0 => Self::new(begin, length),
            _ => Err(RangeError::EmptyLength { length }.into()),
        }
    }
}
