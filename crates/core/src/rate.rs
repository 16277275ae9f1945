//! Hourly rate resolution.

/// Effective hourly rate of a relation.
///
/// A relation-specific override wins over the teacher's default rate; when
/// neither is set the rate is zero.
pub fn resolve_rate(relation_rate: Option<f64>, teacher_rate: Option<f64>) -> f64 {
    relation_rate.or(teacher_rate).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_teacher_default() {
        assert_eq!(resolve_rate(Some(50.0), Some(30.0)), 50.0);
    }

    #[test]
    fn falls_back_to_teacher_default() {
        assert_eq!(resolve_rate(None, Some(30.0)), 30.0);
    }

    #[test]
    fn zero_when_nothing_is_set() {
        assert_eq!(resolve_rate(None, None), 0.0);
    }

    #[test]
    fn explicit_zero_override_is_kept() {
        assert_eq!(resolve_rate(Some(0.0), Some(30.0)), 0.0);
    }
}
