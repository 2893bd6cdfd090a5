//! Positional linear interpolation over an ordered value sequence.

/// Fill nulls in place: interior runs by linear interpolation between the
/// nearest known neighbors, leading and trailing runs by extending the
/// nearest known value. An all-null slice is left unchanged.
pub(crate) fn interpolate_bidirectional(values: &mut [Option<f64>]) {
    let known: Vec<usize> = values
        .iter()
        .enumerate()
        .filter_map(|(idx, v)| v.map(|_| idx))
        .collect();

    let (Some(&first), Some(&last)) = (known.first(), known.last()) else {
        return;
    };

    // boundary extension
    for idx in 0..first {
        values[idx] = values[first];
    }
    for idx in (last + 1)..values.len() {
        values[idx] = values[last];
    }

    // interior gaps
    for window in known.windows(2) {
        let (a, b) = (window[0], window[1]);
        if b - a <= 1 {
            continue;
        }
        let (Some(va), Some(vb)) = (values[a], values[b]) else {
            continue;
        };
        let step = (vb - va) / (b - a) as f64;
        for idx in (a + 1)..b {
            values[idx] = Some(va + step * (idx - a) as f64);
        }
    }
}
