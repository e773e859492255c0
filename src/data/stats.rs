use super::model::{Dataset, School};

// ---------------------------------------------------------------------------
// Pearson correlation over pairwise-complete rows
// ---------------------------------------------------------------------------

/// Pearson correlation between two score accessors over the given view.
///
/// Rows missing either value are excluded, not imputed. Returns `None` when
/// fewer than 2 complete pairs remain, or when either column has zero
/// variance (the coefficient is undefined there).
pub fn pearson<FX, FY>(dataset: &Dataset, indices: &[usize], x: FX, y: FY) -> Option<f64>
where
    FX: Fn(&School) -> Option<f64>,
    FY: Fn(&School) -> Option<f64>,
{
    let pairs: Vec<(f64, f64)> = indices
        .iter()
        .filter_map(|&i| {
            let s = &dataset.schools[i];
            Some((x(s)?, y(s)?))
        })
        .collect();
    pearson_pairs(&pairs)
}

/// Pearson correlation of complete (x, y) pairs.
pub fn pearson_pairs(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len();
    if n < 2 {
        return None;
    }

    let nf = n as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / nf;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return None;
    }
    Some(cov / denom)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::test_fixtures::{dataset, school};

    #[test]
    fn perfectly_aligned_pairs_give_one() {
        let r = pearson_pairs(&[(1.0, 2.0), (2.0, 4.0)]).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn perfectly_inverse_pairs_give_minus_one() {
        let r = pearson_pairs(&[(1.0, 4.0), (2.0, 2.0), (3.0, 0.0)]).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn fewer_than_two_pairs_is_undefined() {
        assert_eq!(pearson_pairs(&[]), None);
        assert_eq!(pearson_pairs(&[(1.0, 1.0)]), None);
    }

    #[test]
    fn zero_variance_is_undefined() {
        assert_eq!(pearson_pairs(&[(5.0, 1.0), (5.0, 2.0)]), None);
    }

    #[test]
    fn rows_missing_either_value_are_excluded() {
        let mut a = school("A", 1, "Ovalle");
        a.simce_lect_4b = Some(200.0);
        a.simce_mate_4b = Some(210.0);
        let mut b = school("B", 2, "Ovalle");
        b.simce_lect_4b = Some(250.0);
        b.simce_mate_4b = Some(260.0);
        // c is incomplete and would destroy the perfect alignment if included.
        let mut c = school("C", 3, "Ovalle");
        c.simce_lect_4b = Some(100.0);
        c.simce_mate_4b = None;

        let ds = dataset(vec![a, b, c]);
        let r = pearson(&ds, &[0, 1, 2], |s| s.simce_lect_4b, |s| s.simce_mate_4b).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }
}
