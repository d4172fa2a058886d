use crate::{
    cloth::{config::ClothConfig, Cloth},
    error::ClothError,
};

/// Build a cloth hanging from its two top corners
pub fn build_hanging_cloth(config: &ClothConfig) -> Result<Cloth, ClothError> {
    let mut cloth = Cloth::from_config(config)?;
    cloth.lock_particle(0, 0);
    cloth.lock_particle(0, config.num_cols - 1);
    Ok(cloth)
}

/// Build a cloth pinned at all four corners
pub fn build_draped_cloth(config: &ClothConfig) -> Result<Cloth, ClothError> {
    let mut cloth = build_hanging_cloth(config)?;
    let last_row = config.num_rows - 1;
    cloth.lock_particle(last_row, 0);
    cloth.lock_particle(last_row, config.num_cols - 1);
    Ok(cloth)
}
