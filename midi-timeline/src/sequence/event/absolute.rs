use crate::{events::MIDIDelta, num::MIDINum};

/// Pairs every event with the absolute time it happens at, by accumulating deltas.
pub fn to_absolute_ticks<D, E, I>(iter: I) -> impl Iterator<Item = (D, E)>
where
    D: MIDINum,
    E: MIDIDelta<D>,
    I: IntoIterator<Item = E>,
{
    let mut time = D::zero();
    iter.into_iter().map(move |event| {
        time += event.delta();
        (time, event)
    })
}

/// Sum of all deltas, the time of the last event.
pub fn total_ticks<D, E, I>(iter: I) -> D
where
    D: MIDINum,
    E: MIDIDelta<D>,
    I: IntoIterator<Item = E>,
{
    let mut time = D::zero();
    for event in iter {
        time += event.delta();
    }
    time
}
