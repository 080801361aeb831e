//! WASM bindings for the RC Section Solver
//!
//! JSON in, JSON out. Requests use the same fields as the HTTP service.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::api::{self, ApiResponse, SectionRequest};
use crate::error::SectionResult;

// Use wee_alloc for smaller WASM binary
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[derive(Debug, Serialize)]
struct Timed<T> {
    #[serde(flatten)]
    response: ApiResponse<T>,
    /// Timing information in milliseconds
    ms_elapsed: f64,
}

fn run<T, F>(request_json: &str, f: F) -> String
where
    T: Serialize,
    F: FnOnce(&SectionRequest) -> SectionResult<T>,
{
    let start = js_sys::Date::now();
    let response = match serde_json::from_str::<SectionRequest>(request_json) {
        Ok(request) => ApiResponse::from_result(f(&request)),
        Err(e) => {
            let msg = format!("Failed to parse request: {}", e);
            web_sys::console::warn_1(&JsValue::from_str(&msg));
            ApiResponse::failure(msg)
        }
    };
    let timed = Timed {
        response,
        ms_elapsed: js_sys::Date::now() - start,
    };
    serde_json::to_string(&timed).unwrap_or_else(|e| {
        format!(r#"{{"success":false,"error":"Serialization failed: {}"}}"#, e)
    })
}

/// Interaction diagram for the requested section and reinforcement
#[wasm_bindgen]
pub fn interaction_diagram(request_json: &str) -> String {
    run(request_json, api::interaction_diagram)
}

/// Plain concrete diagram in (k, q) form
#[wasm_bindgen]
pub fn concrete_diagram(request_json: &str) -> String {
    run(request_json, api::concrete_diagram)
}

/// Required bottom reinforcement for the requested loads
#[wasm_bindgen]
pub fn design(request_json: &str) -> String {
    run(request_json, api::design)
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
