use wasm_bindgen::prelude::*;
use web_sys::js_sys::Uint32Array;

use crate::{
    builders::cloth_builder::build_hanging_cloth,
    cloth::{config::ClothConfig, Cloth},
    error::ClothError,
    types::{Float, FloatArray},
};

impl From<ClothError> for JsValue {
    fn from(e: ClothError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

#[wasm_bindgen]
pub struct InterfaceCloth {
    pub(crate) inner: Cloth,
}

#[wasm_bindgen]
impl InterfaceCloth {
    // Return particle positions as flattened
    pub fn vertices(&self) -> FloatArray {
        FloatArray::from(
            self.inner
                .particles()
                .iter()
                .flat_map(|p| [p.position.x, p.position.y, p.position.z])
                .collect::<Vec<Float>>()
                .as_slice(),
        )
    }

    // Return triangles as flattened
    pub fn faces(&self) -> Uint32Array {
        Uint32Array::from(
            self.inner
                .faces()
                .iter()
                .flat_map(|f| [f[0] as u32, f[1] as u32, f[2] as u32])
                .collect::<Vec<u32>>()
                .as_slice(),
        )
    }

    // Return spring endpoints as flattened pairs
    pub fn edges(&self) -> Uint32Array {
        Uint32Array::from(
            self.inner
                .springs()
                .flat_map(|s| [s.p1 as u32, s.p2 as u32])
                .collect::<Vec<u32>>()
                .as_slice(),
        )
    }

    // Return (u, v) per particle as flattened
    pub fn tex_coords(&self) -> FloatArray {
        FloatArray::from(
            self.inner
                .tex_coords()
                .iter()
                .flatten()
                .copied()
                .collect::<Vec<Float>>()
                .as_slice(),
        )
    }

    // 1 for locked particles, 0 otherwise
    pub fn locked(&self) -> Uint32Array {
        Uint32Array::from(
            self.inner
                .particles()
                .iter()
                .map(|p| p.locked as u32)
                .collect::<Vec<u32>>()
                .as_slice(),
        )
    }

    pub fn step(&mut self, dt: Float) -> Result<(), JsValue> {
        let n_substep = 4;
        for _ in 0..n_substep {
            self.inner.step_simulation(dt / (n_substep as Float))?;
        }
        Ok(())
    }

    #[wasm_bindgen(js_name = lockParticle)]
    pub fn lock_particle(&mut self, row: usize, col: usize) {
        self.inner.lock_particle(row, col);
    }

    #[wasm_bindgen(js_name = setWindVector)]
    pub fn set_wind_vector(&mut self, x: Float, y: Float, z: Float) {
        self.inner.set_wind_vector(x, y, z);
    }

    #[wasm_bindgen(js_name = setWindFactor)]
    pub fn set_wind_factor(&mut self, factor: u32) {
        self.inner.set_wind_factor(factor);
    }
}

#[wasm_bindgen]
pub fn createCloth() -> Result<InterfaceCloth, JsValue> {
    let cloth = build_hanging_cloth(&ClothConfig::default())?;
    Ok(InterfaceCloth { inner: cloth })
}
