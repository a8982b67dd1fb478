//! The generic core behind every [`Statistic`] entry point.
//!
//! All operations reduce to three shapes: one well, one value per well of a
//! container, and one value per pooled container. Each shape first selects
//! the readings of every touched well (validating the window) and only then
//! runs reductions, so a bad window never yields partial work.

use platestats_model::{Well, WellContainer, WellId};

use crate::{ResultMap, StatError, Statistic, Window};

fn select(well: &Well, window: Option<Window>) -> Result<&[f64], StatError> {
    match window {
        Some(window) => window.slice(well),
        None => Ok(well.readings()),
    }
}

/// Concatenates the readings of every well of `container` in canonical
/// order, restricted to `window` when one is given.
///
/// This is the sequence every aggregated operation reduces. Every well is
/// checked against the window; the first misfit is returned.
///
/// ```
/// use platestats_engine::{Window, pool};
/// use platestats_model::{Well, WellId, WellSet};
///
/// let set = WellSet::new(
///     "s",
///     [
///         Well::new(WellId::new(1, 0), vec![4.0, 5.0, 6.0]),
///         Well::new(WellId::new(0, 0), vec![1.0, 2.0, 3.0]),
///     ],
/// )
/// .unwrap();
/// assert_eq!(pool(&set, None).unwrap(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// assert_eq!(pool(&set, Some(Window::new(2, 1).unwrap())).unwrap(), [3.0, 6.0]);
/// assert!(pool(&set, Some(Window::new(2, 2).unwrap())).is_err());
/// ```
pub fn pool<C>(container: &C, window: Option<Window>) -> Result<Vec<f64>, StatError>
where
    C: WellContainer + ?Sized,
{
    let mut pooled = Vec::new();
    for well in container.wells() {
        pooled.extend_from_slice(select(well, window)?);
    }
    Ok(pooled)
}

pub(crate) fn single<S>(
    stat: &S,
    well: &Well,
    window: Option<Window>,
) -> Result<S::Output, StatError>
where
    S: Statistic + ?Sized,
{
    stat.reduce(select(well, window)?)
}

pub(crate) fn per_well<S, C>(
    stat: &S,
    container: &C,
    window: Option<Window>,
) -> Result<ResultMap<WellId, S::Output>, StatError>
where
    S: Statistic + ?Sized,
    C: WellContainer + ?Sized,
{
    let selected = container
        .wells()
        .map(|well| select(well, window).map(|values| (well.id(), values)))
        .collect::<Result<Vec<_>, StatError>>()?;
    selected
        .into_iter()
        .map(|(id, values)| stat.reduce(values).map(|value| (id, value)))
        .collect()
}

pub(crate) fn aggregated<S, C>(
    stat: &S,
    container: &C,
    window: Option<Window>,
) -> Result<S::Output, StatError>
where
    S: Statistic + ?Sized,
    C: WellContainer + ?Sized,
{
    stat.reduce(&pool(container, window)?)
}

pub(crate) fn aggregated_each<'a, S, C, I>(
    stat: &S,
    containers: I,
    window: Option<Window>,
) -> Result<ResultMap<String, S::Output>, StatError>
where
    S: Statistic + ?Sized,
    C: WellContainer + 'a,
    I: IntoIterator<Item = &'a C>,
{
    let pools = containers
        .into_iter()
        .map(|container| {
            pool(container, window).map(|values| (container.label().to_owned(), values))
        })
        .collect::<Result<Vec<_>, StatError>>()?;
    pools
        .into_iter()
        .map(|(label, values)| stat.reduce(&values).map(|value| (label, value)))
        .collect()
}
