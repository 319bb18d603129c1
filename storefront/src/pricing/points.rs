use super::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointsOutcome {
    pub points_used: u64,
    pub discount: Amount,
}

/// Spends as many whole points as fit into `base`, up to `available_points`.
///
/// The discount is always a multiple of `point_value` and never exceeds
/// `base`. A `point_value` of zero redeems nothing.
pub fn apply_points(
    base: Amount,
    available_points: u64,
    point_value: Amount,
    use_points: bool,
) -> PointsOutcome {
    if !use_points || point_value == 0 {
        return PointsOutcome::default();
    }

    let points_used = available_points.min(base / point_value);
    PointsOutcome {
        points_used,
        discount: points_used * point_value,
    }
}
