//! Body regions and addressable body parts
//!
//! Six coarse regions carry the targeting weights. Each region owns a root
//! part plus a fixed set of sub-parts, all addressed by `BodyPartId`
//! instead of string paths.

use serde::{Deserialize, Serialize};

/// Coarse body zone used for targeting and armor coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Head,
    Torso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl Region {
    /// Returns all regions
    pub fn all() -> [Region; 6] {
        [
            Region::Head,
            Region::Torso,
            Region::LeftArm,
            Region::RightArm,
            Region::LeftLeg,
            Region::RightLeg,
        ]
    }

    /// The part that stands for the region as a whole
    pub fn root(&self) -> BodyPartId {
        match self {
            Region::Head => BodyPartId::Head,
            Region::Torso => BodyPartId::Torso,
            Region::LeftArm => BodyPartId::LeftArm,
            Region::RightArm => BodyPartId::RightArm,
            Region::LeftLeg => BodyPartId::LeftLeg,
            Region::RightLeg => BodyPartId::RightLeg,
        }
    }

    /// Head and torso are the only regions a parry or arm block can protect
    pub fn is_core(&self) -> bool {
        matches!(self, Region::Head | Region::Torso)
    }

    /// Is this an arm region?
    pub fn is_arm(&self) -> bool {
        matches!(self, Region::LeftArm | Region::RightArm)
    }

    /// Is this a leg region?
    pub fn is_leg(&self) -> bool {
        matches!(self, Region::LeftLeg | Region::RightLeg)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Region::Head => "head",
            Region::Torso => "torso",
            Region::LeftArm => "left arm",
            Region::RightArm => "right arm",
            Region::LeftLeg => "left leg",
            Region::RightLeg => "right leg",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Stable identifier for every addressable body part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPartId {
    // Region roots
    Head,
    Torso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,

    // Head
    Brain,
    LeftEye,
    RightEye,
    Jaw,
    Throat,

    // Torso
    Heart,
    LeftLung,
    RightLung,
    Liver,
    Stomach,
    Spine,

    // Arms
    LeftUpperArm,
    LeftForearm,
    LeftHand,
    RightUpperArm,
    RightForearm,
    RightHand,

    // Legs
    LeftThigh,
    LeftShin,
    LeftFoot,
    RightThigh,
    RightShin,
    RightFoot,
}

impl BodyPartId {
    /// Returns all parts, region roots first
    pub fn all() -> [BodyPartId; 29] {
        use BodyPartId::*;
        [
            Head,
            Torso,
            LeftArm,
            RightArm,
            LeftLeg,
            RightLeg,
            Brain,
            LeftEye,
            RightEye,
            Jaw,
            Throat,
            Heart,
            LeftLung,
            RightLung,
            Liver,
            Stomach,
            Spine,
            LeftUpperArm,
            LeftForearm,
            LeftHand,
            RightUpperArm,
            RightForearm,
            RightHand,
            LeftThigh,
            LeftShin,
            LeftFoot,
            RightThigh,
            RightShin,
            RightFoot,
        ]
    }

    /// Region this part belongs to
    pub fn region(&self) -> Region {
        use BodyPartId::*;
        match self {
            Head | Brain | LeftEye | RightEye | Jaw | Throat => Region::Head,
            Torso | Heart | LeftLung | RightLung | Liver | Stomach | Spine => Region::Torso,
            LeftArm | LeftUpperArm | LeftForearm | LeftHand => Region::LeftArm,
            RightArm | RightUpperArm | RightForearm | RightHand => Region::RightArm,
            LeftLeg | LeftThigh | LeftShin | LeftFoot => Region::LeftLeg,
            RightLeg | RightThigh | RightShin | RightFoot => Region::RightLeg,
        }
    }

    /// Is this the root part of its region?
    pub fn is_region_root(&self) -> bool {
        self.region().root() == *self
    }

    /// Sub-part an arm raised in guard puts in the way of a blow
    pub fn guarding_part(arm: Region) -> Option<BodyPartId> {
        match arm {
            Region::LeftArm => Some(BodyPartId::LeftForearm),
            Region::RightArm => Some(BodyPartId::RightForearm),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        use BodyPartId::*;
        match self {
            Head => "head",
            Torso => "torso",
            LeftArm => "left arm",
            RightArm => "right arm",
            LeftLeg => "left leg",
            RightLeg => "right leg",
            Brain => "brain",
            LeftEye => "left eye",
            RightEye => "right eye",
            Jaw => "jaw",
            Throat => "throat",
            Heart => "heart",
            LeftLung => "left lung",
            RightLung => "right lung",
            Liver => "liver",
            Stomach => "stomach",
            Spine => "spine",
            LeftUpperArm => "left upper arm",
            LeftForearm => "left forearm",
            LeftHand => "left hand",
            RightUpperArm => "right upper arm",
            RightForearm => "right forearm",
            RightHand => "right hand",
            LeftThigh => "left thigh",
            LeftShin => "left shin",
            LeftFoot => "left foot",
            RightThigh => "right thigh",
            RightShin => "right shin",
            RightFoot => "right foot",
        }
    }
}
