//! Human-readable number and build formatting

use squad_core::{Build, StatCategory};

const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Abbreviate a number with a thousands/millions/billions/trillions suffix
///
/// Values under a thousand are printed without decimals.
pub fn abbreviate(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    for (scale, suffix) in UNITS {
        if magnitude >= scale {
            return format!("{:.1}{}", value / scale, suffix);
        }
    }
    format!("{:.0}", value)
}

/// Probability as a percentage with two decimals
pub fn percent(chance: f64) -> String {
    format!("{:.2}%", chance * 100.0)
}

/// Build spelled out per category, e.g. `power 6, precision 20, evasion 20, hull 26`
pub fn describe_build(build: &Build) -> String {
    StatCategory::all()
        .iter()
        .map(|&category| format!("{} {}", category, build.get(category)))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate(0.0), "0");
        assert_eq!(abbreviate(999.0), "999");
        assert_eq!(abbreviate(1_200.0), "1.2K");
        assert_eq!(abbreviate(3_400_000.0), "3.4M");
        assert_eq!(abbreviate(5_000_000_000.0), "5.0B");
        assert_eq!(abbreviate(2.5e12), "2.5T");
        assert_eq!(abbreviate(-1_500.0), "-1.5K");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.5), "50.00%");
        assert_eq!(percent(1.0), "100.00%");
    }

    #[test]
    fn test_describe_build() {
        assert_eq!(describe_build(&Build::new(6, 20, 20, 26)), "power 6, precision 20, evasion 20, hull 26");
        assert_eq!(describe_build(&Build::zero()), "power 0, precision 0, evasion 0, hull 0");
    }
}
