//! Growth-stage mapping from plant type and level to a display symbol.

use crate::model::{GoalStatus, PlantType};

const SPROUT_STAGES: &[&str] = &["🌱", "🌿", "☘️", "🍀"];
const HERB_STAGES: &[&str] = &["🌱", "🌿", "🪴", "🌾"];
const TREE_STAGES: &[&str] = &["🌱", "🌿", "🪴", "🌳", "🌲"];
const FLOWER_STAGES: &[&str] = &["🌱", "🌿", "🌷", "🌸", "🌺"];

const STAGE_LABELS: &[&str] = &["Seedling", "Sprouting", "Growing", "Blooming", "Flourishing"];

/// Ordered growth stages for a plant type.
pub fn stages(plant_type: PlantType) -> &'static [&'static str] {
    match plant_type {
        PlantType::Sprout => SPROUT_STAGES,
        PlantType::Herb => HERB_STAGES,
        PlantType::Tree => TREE_STAGES,
        PlantType::Flower => FLOWER_STAGES,
    }
}

/// Symbol shown for a withered plant of this type.
pub fn withered_symbol(plant_type: PlantType) -> &'static str {
    match plant_type {
        PlantType::Sprout => "🍂",
        PlantType::Herb => "🥀",
        PlantType::Tree => "🪵",
        PlantType::Flower => "🥀",
    }
}

/// Stage index for a level: `clamp(level - 1, 0, last)`.
pub fn stage_index(plant_type: PlantType, level: u32) -> usize {
    let last = stages(plant_type).len() - 1;
    (level.saturating_sub(1) as usize).min(last)
}

/// Display symbol for a goal's current growth stage.
///
/// Withered goals always show the withered symbol regardless of level.
pub fn growth_stage(plant_type: PlantType, level: u32, status: GoalStatus) -> &'static str {
    if status == GoalStatus::Withered {
        return withered_symbol(plant_type);
    }
    stages(plant_type)[stage_index(plant_type, level)]
}

/// Same as [`growth_stage`] but takes the plant type as an API string.
pub fn growth_stage_for(plant_type: &str, level: u32, status: GoalStatus) -> &'static str {
    growth_stage(PlantType::from_str_lossy(plant_type), level, status)
}

/// Human-readable name of the stage at `level`.
pub fn stage_label(plant_type: PlantType, level: u32, status: GoalStatus) -> &'static str {
    if status == GoalStatus::Withered {
        return "Withered";
    }
    let index = stage_index(plant_type, level);
    let last = stages(plant_type).len() - 1;
    if index == last {
        STAGE_LABELS[STAGE_LABELS.len() - 1]
    } else {
        STAGE_LABELS[index.min(STAGE_LABELS.len() - 2)]
    }
}
