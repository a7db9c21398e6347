/// Index of the first maximum. Later entries only win if strictly greater.
pub fn argmax(d: &[f64]) -> usize {
    if d.is_empty() {
        return 0;
    }

    let mut max_ix = 0;
    let mut max = &d[0];

    for (i, v) in d.iter().enumerate() {
        if v > max {
            max = v;
            max_ix = i;
        }
    }

    max_ix
}

pub fn onehot(i: usize, size: usize) -> Vec<f64> {
    let mut oh = vec![0.; size];
    if i < size {
        oh[i] = 1.;
    }
    oh
}

/// Position of the single `1` in a one-hot vector, `None` if the vector is not one-hot.
pub fn hot_index(d: &[f64]) -> Option<usize> {
    let mut hot = None;

    for (i, v) in d.iter().enumerate() {
        if *v == 1. {
            if hot.is_some() {
                return None;
            }
            hot = Some(i);
        } else if *v != 0. {
            return None;
        }
    }

    hot
}
