use wasm_bindgen::prelude::*;

pub mod cloth;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}
