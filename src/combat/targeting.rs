//! Hit location tables
//!
//! Two-level weighted lookup: attack category picks a region, the region
//! picks a sub-part. Tables are built once (from `Default` or TOML),
//! validated, then only ever borrowed.

use crate::combat::armor::ArmorCoverage;
use crate::combat::body_zone::{BodyPartId, Region};
use crate::combat::equipment::EquipmentSlot;
use crate::combat::weapons::AttackCategory;
use crate::combat::weighted::weighted_pick;
use crate::core::error::{CombatError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One row of a region distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionWeight {
    pub region: Region,
    pub weight: f32,
}

/// One row of a region's sub-part distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubPart {
    /// Stable identifier, unique within the region
    pub id: String,
    /// Anatomy part this entry addresses; `None` for a glancing hit
    #[serde(default)]
    pub path: Option<BodyPartId>,
    pub weight: f32,
    #[serde(default)]
    pub vital: bool,
    #[serde(default)]
    pub glancing: bool,
    /// Display name override
    #[serde(default)]
    pub name: Option<String>,
}

impl SubPart {
    fn part(path: BodyPartId, weight: f32) -> Self {
        Self {
            id: path_key(path),
            path: Some(path),
            weight,
            vital: false,
            glancing: false,
            name: None,
        }
    }

    fn organ(path: BodyPartId, weight: f32) -> Self {
        Self {
            vital: true,
            ..Self::part(path, weight)
        }
    }

    fn graze(id: &str, name: &str, weight: f32) -> Self {
        Self {
            id: id.to_string(),
            path: None,
            weight,
            vital: false,
            glancing: true,
            name: Some(name.to_string()),
        }
    }

    fn display_name(&self, region: Region) -> String {
        match (&self.name, self.path) {
            (Some(name), _) => name.clone(),
            (None, Some(path)) => path.display_name().to_string(),
            (None, None) => region.display_name().to_string(),
        }
    }
}

fn path_key(path: BodyPartId) -> String {
    path.display_name().replace(' ', "_")
}

/// Result of a targeting roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitLocation {
    pub region: Region,
    pub part_id: String,
    pub path: Option<BodyPartId>,
    pub vital: bool,
    pub glancing: bool,
    pub name: String,
}

impl HitLocation {
    /// Part that takes the damage: the addressed sub-part, or the region
    /// root on a glancing hit
    pub fn struck_part(&self) -> BodyPartId {
        self.path.unwrap_or_else(|| self.region.root())
    }

    fn from_entry(region: Region, entry: &SubPart) -> Self {
        Self {
            region,
            part_id: entry.id.clone(),
            path: entry.path,
            vital: entry.vital,
            glancing: entry.glancing,
            name: entry.display_name(region),
        }
    }
}

/// Region distributions per attack category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionWeights {
    #[serde(default)]
    pub blunt: Option<Vec<RegionWeight>>,
    #[serde(default)]
    pub sharp: Option<Vec<RegionWeight>>,
    #[serde(default)]
    pub unarmed: Option<Vec<RegionWeight>>,
    /// Used for any category without its own table
    pub fallback: Vec<RegionWeight>,
}

fn region_table(weights: [f32; 6]) -> Vec<RegionWeight> {
    Region::all()
        .into_iter()
        .zip(weights)
        .map(|(region, weight)| RegionWeight { region, weight })
        .collect()
}

impl Default for RegionWeights {
    fn default() -> Self {
        // head, torso, left arm, right arm, left leg, right leg
        Self {
            blunt: Some(region_table([20.0, 40.0, 10.0, 10.0, 10.0, 10.0])),
            sharp: Some(region_table([15.0, 45.0, 10.0, 10.0, 10.0, 10.0])),
            unarmed: Some(region_table([30.0, 40.0, 10.0, 10.0, 5.0, 5.0])),
            fallback: region_table([15.0, 35.0, 12.0, 12.0, 13.0, 13.0]),
        }
    }
}

impl RegionWeights {
    pub fn for_category(&self, category: AttackCategory) -> &[RegionWeight] {
        let specific = match category {
            AttackCategory::Blunt => self.blunt.as_ref(),
            AttackCategory::Sharp => self.sharp.as_ref(),
            AttackCategory::Unarmed => self.unarmed.as_ref(),
        };
        specific.unwrap_or(&self.fallback)
    }
}

fn default_parts() -> BTreeMap<Region, Vec<SubPart>> {
    use BodyPartId::*;

    let arm = |upper, fore, hand| {
        vec![
            SubPart::part(upper, 30.0),
            SubPart::part(fore, 35.0),
            SubPart::part(hand, 20.0),
            SubPart::graze("arm_graze", "arm", 15.0),
        ]
    };
    let leg = |thigh, shin, foot| {
        vec![
            SubPart::part(thigh, 35.0),
            SubPart::part(shin, 30.0),
            SubPart::part(foot, 20.0),
            SubPart::graze("leg_graze", "leg", 15.0),
        ]
    };

    BTreeMap::from([
        (
            Region::Head,
            vec![
                SubPart::organ(Brain, 10.0),
                SubPart::part(LeftEye, 8.0),
                SubPart::part(RightEye, 8.0),
                SubPart::part(Jaw, 19.0),
                SubPart::organ(Throat, 10.0),
                SubPart::graze("scalp", "scalp", 45.0),
            ],
        ),
        (
            Region::Torso,
            vec![
                SubPart::organ(Heart, 8.0),
                SubPart::organ(LeftLung, 10.0),
                SubPart::organ(RightLung, 10.0),
                SubPart::organ(Liver, 10.0),
                SubPart::part(Stomach, 12.0),
                SubPart::organ(Spine, 5.0),
                SubPart::graze("chest", "chest", 45.0),
            ],
        ),
        (Region::LeftArm, arm(LeftUpperArm, LeftForearm, LeftHand)),
        (Region::RightArm, arm(RightUpperArm, RightForearm, RightHand)),
        (Region::LeftLeg, leg(LeftThigh, LeftShin, LeftFoot)),
        (Region::RightLeg, leg(RightThigh, RightShin, RightFoot)),
    ])
}

/// Every data table the resolver reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatTables {
    #[serde(default)]
    pub region_weights: RegionWeights,
    #[serde(default = "default_parts")]
    pub parts: BTreeMap<Region, Vec<SubPart>>,
    #[serde(default)]
    pub coverage: ArmorCoverage,
}

impl Default for CombatTables {
    fn default() -> Self {
        Self {
            region_weights: RegionWeights::default(),
            parts: default_parts(),
            coverage: ArmorCoverage::default(),
        }
    }
}

impl CombatTables {
    /// Parse tables from TOML; omitted sections keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let tables: CombatTables = toml::from_str(content)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject tables the selector cannot draw from
    pub fn validate(&self) -> Result<()> {
        let categories = [
            ("blunt", self.region_weights.blunt.as_deref()),
            ("sharp", self.region_weights.sharp.as_deref()),
            ("unarmed", self.region_weights.unarmed.as_deref()),
            ("fallback", Some(self.region_weights.fallback.as_slice())),
        ];

        for (label, table) in categories {
            let Some(table) = table else { continue };
            if table.is_empty() {
                return Err(CombatError::InvalidTable(format!(
                    "region table '{label}' is empty"
                )));
            }
            for row in table {
                check_weight(row.weight, &format!("{label}.{}", row.region.display_name()))?;
                if self.parts.get(&row.region).map_or(true, |p| p.is_empty()) {
                    return Err(CombatError::InvalidTable(format!(
                        "region '{}' in table '{label}' has no sub-parts",
                        row.region.display_name()
                    )));
                }
            }
        }

        for (region, entries) in &self.parts {
            for entry in entries {
                check_weight(entry.weight, &entry.id)?;
                if let Some(path) = entry.path {
                    if path.region() != *region {
                        return Err(CombatError::InvalidTable(format!(
                            "sub-part '{}' addresses {} outside {}",
                            entry.id,
                            path.display_name(),
                            region.display_name()
                        )));
                    }
                    if entry.glancing {
                        return Err(CombatError::InvalidTable(format!(
                            "glancing sub-part '{}' must not address a part",
                            entry.id
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Region distribution used for a category
    pub fn regions_for(&self, category: AttackCategory) -> &[RegionWeight] {
        self.region_weights.for_category(category)
    }

    /// Sub-part distribution of a region; empty if the region has none
    pub fn parts_for(&self, region: Region) -> &[SubPart] {
        self.parts.get(&region).map_or(&[], |p| p.as_slice())
    }

    pub fn coverage_for(&self, slot: EquipmentSlot) -> &[Region] {
        self.coverage.regions_for(slot)
    }

    pub fn slots_covering(&self, region: Region) -> Vec<EquipmentSlot> {
        self.coverage.slots_covering(region)
    }

    /// Roll a region for the category, then a sub-part within it
    ///
    /// Draws exactly twice. Tables must have passed `validate`.
    pub fn roll_hit_location<R: Rng>(&self, category: AttackCategory, rng: &mut R) -> HitLocation {
        let region = weighted_pick(self.regions_for(category), |r| r.weight, rng).region;
        let entry = weighted_pick(self.parts_for(region), |p| p.weight, rng);
        HitLocation::from_entry(region, entry)
    }

    /// Location for a specific part, using the table entry when one exists
    pub fn location_of(&self, part: BodyPartId) -> HitLocation {
        let region = part.region();
        match self.parts_for(region).iter().find(|p| p.path == Some(part)) {
            Some(entry) => HitLocation::from_entry(region, entry),
            None => HitLocation {
                region,
                part_id: path_key(part),
                path: Some(part),
                vital: false,
                glancing: false,
                name: part.display_name().to_string(),
            },
        }
    }
}

fn check_weight(weight: f32, label: &str) -> Result<()> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(CombatError::InvalidTable(format!(
            "weight for '{label}' must be positive, got {weight}"
        )))
    }
}
