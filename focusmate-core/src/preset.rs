//! Timer presets: named focus/break interval bundles.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub id: u32,
    pub name: String,
    pub focus_min: i32,
    pub short_break_min: i32,
    pub long_break_min: i32,

    /// Focus sessions between long breaks.
    pub cycles_before_long: i32,
}

impl Preset {
    /// The classic 25/5 Pomodoro with a long break every fourth cycle.
    pub fn classic() -> Self {
        Self {
            id: 1,
            name: "Classic".to_string(),
            focus_min: 25,
            short_break_min: 5,
            long_break_min: 15,
            cycles_before_long: 4,
        }
    }

    /// Which break follows the `completed_cycles`-th focus session of the day:
    /// every `cycles_before_long`-th one earns the long break.
    pub fn break_after(&self, completed_cycles: i32) -> (i32, &'static str) {
        if self.cycles_before_long > 0 && completed_cycles % self.cycles_before_long == 0 {
            (self.long_break_min, "long")
        } else {
            (self.short_break_min, "short")
        }
    }
}

/// Catalog seeded into a fresh store. Users can edit `presets.json` afterwards.
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset::classic(),
        Preset {
            id: 2,
            name: "Deep Work".to_string(),
            focus_min: 50,
            short_break_min: 10,
            long_break_min: 20,
            cycles_before_long: 2,
        },
        Preset {
            id: 3,
            name: "Short Burst".to_string(),
            focus_min: 15,
            short_break_min: 3,
            long_break_min: 10,
            cycles_before_long: 4,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_cadence() {
        let p = Preset::classic();
        assert_eq!(p.break_after(1), (5, "short"));
        assert_eq!(p.break_after(3), (5, "short"));
        assert_eq!(p.break_after(4), (15, "long"));
        assert_eq!(p.break_after(8), (15, "long"));
    }

    #[test]
    fn test_zero_cycle_preset_never_goes_long() {
        let mut p = Preset::classic();
        p.cycles_before_long = 0;
        assert_eq!(p.break_after(4), (5, "short"));
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let presets = builtin_presets();
        let mut ids: Vec<u32> = presets.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), presets.len());
    }
}
