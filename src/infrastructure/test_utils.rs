/// Test utilities for resolver tests
///
/// Every test pins "now" explicitly so results never depend on the machine
/// clock or its time zone.
///
/// ## Usage Examples
///
/// ```rust
/// use crate::infrastructure::test_utils::fixtures::{fixed_now, utc};
///
/// #[test]
/// fn my_test() {
///     let now = fixed_now(2024, 2, 15);
///     // resolve against `now`, compare with `utc(...)`
/// }
/// ```
#[cfg(test)]
pub mod fixtures {
    use crate::application::{DateRangeResolver, ResolverConfig};
    use crate::domain::WeekStart;
    use chrono::{DateTime, TimeZone, Utc};

    /// Noon UTC on the given day, far from any day boundary
    pub fn fixed_now(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        utc(year, month, day, 12, 0, 0)
    }

    pub fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .expect("valid UTC fixture")
    }

    /// Resolver with a Monday week start and no hooks
    pub fn monday_resolver() -> DateRangeResolver {
        DateRangeResolver::new(ResolverConfig {
            week_start: WeekStart::MONDAY,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use chrono::Timelike;

    #[test]
    fn fixed_now_is_midday() {
        let now = fixed_now(2024, 3, 1);
        assert_eq!(now.hour(), 12);
        assert_eq!(now, utc(2024, 3, 1, 12, 0, 0));
    }

    #[test]
    fn monday_resolver_has_no_hooks() {
        assert!(monday_resolver().hooks().is_empty());
    }
}
