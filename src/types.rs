use web_sys::js_sys::Float32Array;

pub type Float = f32;

/// JS typed array matching `Float`
pub type FloatArray = Float32Array;
