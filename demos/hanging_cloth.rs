use cloth_sim::{
    builders::cloth_builder::build_hanging_cloth,
    cloth::config::{ClothConfig, LayAxis},
    energy::{constraint_deviation, total_energy},
    error::ClothError,
    flog,
    plot::plot,
    types::Float,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config =
        ClothConfig::new(10., 10., 30, 30, 200., 550., 400., 0.005, LayAxis::Y).with_wind_seed(7);
    let mut cloth = build_hanging_cloth(&config)?;
    cloth.set_wind_vector(0., 0., 1.);
    cloth.set_wind_factor(4);

    let final_time = 5.0;
    let dt = 1.0 / 600.0;
    let num_steps = (final_time / dt) as usize;

    let free_corner = (config.num_rows - 1, config.num_cols - 1);
    let mut heights: Vec<Float> = Vec::with_capacity(num_steps);
    for s in 0..num_steps {
        cloth.step_simulation(dt)?;
        let corner = cloth
            .position(free_corner.0, free_corner.1)
            .ok_or(ClothError::Uninitialized)?;
        heights.push(corner.y);

        if s % 600 == 0 {
            flog!(
                "t = {:.2}s, corner y = {:.3}, energy = {:.3}, deviation = {:.4}",
                s as Float * dt,
                corner.y,
                total_energy(&cloth),
                constraint_deviation(&cloth)
            );
        }
    }

    plot("hanging_cloth.png", "free corner height", &heights, dt)?;
    Ok(())
}
