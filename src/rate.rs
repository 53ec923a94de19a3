use std::time::Duration;

/// What a fill rate counts: pixels for ordered modes, shades for solid
/// (255 interpolation steps across the window).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateUnit {
    Pixels,
    Shades,
}

impl RateUnit {
    fn singular(self) -> &'static str {
        match self {
            RateUnit::Pixels => "pixel",
            RateUnit::Shades => "shade",
        }
    }

    fn plural(self) -> &'static str {
        match self {
            RateUnit::Pixels => "pixels",
            RateUnit::Shades => "shades",
        }
    }
}

/// Human-readable fill speed for `total_units` spread over `duration`.
///
/// Escalates second → minute → hour → day until the rate reaches one
/// unit per period; slower than one unit per day inverts to
/// `1 <unit>/<N> days` (or years past 365 days).
pub fn format_rate(total_units: u64, duration: Duration, unit: RateUnit) -> String {
    let per_second = total_units as f64 / duration.as_secs_f64();
    let per_minute = per_second * 60.0;
    let per_hour = per_minute * 60.0;
    let per_day = per_hour * 24.0;

    if per_second >= 1.0 {
        format!("{per_second:.1} {}/second", unit.plural())
    } else if per_minute >= 1.0 {
        format!("{per_minute:.1} {}/minute", unit.plural())
    } else if per_hour >= 1.0 {
        format!("{per_hour:.1} {}/hour", unit.plural())
    } else if per_day >= 1.0 {
        format!("{per_day:.1} {}/day", unit.plural())
    } else {
        let days_per_unit = 1.0 / per_day;
        if days_per_unit < 365.0 {
            format!("1 {}/{days_per_unit:.1} days", unit.singular())
        } else {
            format!("1 {}/{:.1} years", unit.singular(), days_per_unit / 365.0)
        }
    }
}
