//! Per-spell tuning values and duration parsing.
//!
//! Durations are written either as ticks (`"40t"`) or as whole seconds
//! (`"2"`, converted with the host tick rate).

/// Tuning for every built-in spell.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct SpellTuning {
    pub confundo: ConfundoTuning,
    pub stupefy: StupefyTuning,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct ConfundoTuning {
    pub duration: String,
}

impl Default for ConfundoTuning {
    fn default() -> Self {
        Self {
            duration: "10".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct StupefyTuning {
    pub vertical_knockback: f64,
    pub horizontal_knockback: f64,
    pub damage: u32,
    pub confusion_duration: String,
    pub weakness_duration: String,
}

impl Default for StupefyTuning {
    fn default() -> Self {
        Self {
            vertical_knockback: 2.0,
            horizontal_knockback: 0.5,
            damage: 2,
            confusion_duration: "5".to_owned(),
            weakness_duration: "10".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration {value:?}: expected \"<n>t\" (ticks) or \"<n>\" (seconds)")]
pub struct DurationError {
    pub value: String,
}

/// Parses a duration string into host ticks.
pub fn parse_duration(value: &str, ticks_per_second: u32) -> Result<u32, DurationError> {
    let invalid = || DurationError {
        value: value.to_owned(),
    };
    let trimmed = value.trim();

    match trimmed.strip_suffix('t') {
        Some(ticks) => ticks.parse::<u32>().map_err(|_| invalid()),
        None => trimmed
            .parse::<u32>()
            .ok()
            .and_then(|seconds| seconds.checked_mul(ticks_per_second))
            .ok_or_else(invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_suffix_is_taken_literally() {
        assert_eq!(parse_duration("40t", 20), Ok(40));
        assert_eq!(parse_duration("0t", 20), Ok(0));
    }

    #[test]
    fn bare_number_is_seconds() {
        assert_eq!(parse_duration("5", 20), Ok(100));
        assert_eq!(parse_duration(" 3 ", 10), Ok(30));
    }

    #[test]
    fn garbage_is_rejected() {
        for value in ["", "t", "five", "5s", "-1", "1.5"] {
            assert!(parse_duration(value, 20).is_err(), "{value:?} parsed");
        }
    }
}
