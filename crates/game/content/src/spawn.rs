//! Weighted spawn tables for populating generated rooms.

/// One weighted choice.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnEntry {
    pub template: String,
    pub weight: u32,
    /// First floor on which the entry may appear.
    #[cfg_attr(feature = "serde", serde(default = "first_floor"))]
    pub min_floor: u32,
}

#[cfg(feature = "serde")]
fn first_floor() -> u32 {
    1
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnTables {
    #[cfg_attr(feature = "serde", serde(default))]
    pub monsters: Vec<SpawnEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<SpawnEntry>,
}

impl SpawnTables {
    pub fn pick_monster(&self, floor: u32, roll: u32) -> Option<&str> {
        pick(&self.monsters, floor, roll)
    }

    pub fn pick_item(&self, floor: u32, roll: u32) -> Option<&str> {
        pick(&self.items, floor, roll)
    }
}

/// Maps `roll` onto the entries available on `floor`, proportionally to
/// their weights.
fn pick(entries: &[SpawnEntry], floor: u32, roll: u32) -> Option<&str> {
    let available = || entries.iter().filter(|entry| entry.min_floor <= floor);
    let total: u32 = available().map(|entry| entry.weight).sum();
    if total == 0 {
        return None;
    }

    let mut remaining = roll % total;
    for entry in available() {
        if remaining < entry.weight {
            return Some(entry.template.as_str());
        }
        remaining -= entry.weight;
    }
    None
}
