use wasm_bindgen::prelude::*;

use crate::{png_to_svg, VectorizeOptions};

/// Converts PNG bytes to SVG text. `options_json` may be empty or a partial
/// JSON object of [`VectorizeOptions`] fields.
#[wasm_bindgen(js_name = pngToSvg)]
pub fn png_to_svg_wasm(png_bytes: &[u8], options_json: &str) -> Result<String, JsValue> {
    let options = if options_json.trim().is_empty() {
        VectorizeOptions::default()
    } else {
        VectorizeOptions::from_json(options_json).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    png_to_svg(png_bytes, &options).map_err(|e| JsValue::from_str(&e.to_string()))
}
