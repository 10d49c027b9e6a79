use wasm_bindgen::prelude::*;

use crate::compare::{compare_pairs, WordComparison};
use crate::input::{load_pairs_from_bytes, normalize_word};
use crate::levenshtein::{full_table_distance, rolling_row_distance};
use crate::report::{comparisons_to_json, write_comparisons_ipc};

fn report_progress(progress_callback: &js_sys::Function, message: &str) {
    let _ = progress_callback.call1(&JsValue::NULL, &JsValue::from_str(message));
}

fn fail(context: &str, err: impl std::fmt::Display) -> JsValue {
    let message = format!("{context}: {err}");
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// Symbols are compared literally; callers wanting case folding lower-case first.
#[wasm_bindgen]
pub fn edit_distance_full_table(a: &str, b: &str) -> usize {
    full_table_distance(&normalize_word(a, true), &normalize_word(b, true))
}

#[wasm_bindgen]
pub fn edit_distance_rolling_row(a: &str, b: &str) -> usize {
    rolling_row_distance(&normalize_word(a, true), &normalize_word(b, true))
}

fn process_pairs(
    content: &[u8],
    is_gzipped: bool,
    progress_callback: &js_sys::Function,
    label: &str,
) -> Result<Vec<WordComparison>, JsValue> {
    report_progress(progress_callback, &format!("Rust Wasm ({label}): Starting..."));
    let pairs = load_pairs_from_bytes(content, is_gzipped)
        .map_err(|e| fail("Pairs parsing error", e))?;
    if pairs.is_empty() {
        return Err(fail("Pairs parsing error", "no word pairs in input"));
    }
    report_progress(
        progress_callback,
        &format!("Rust Wasm ({label}): Loaded {} pairs.", pairs.len()),
    );

    Ok(compare_pairs(pairs, false, |done, total| {
        report_progress(
            progress_callback,
            &format!("Rust Wasm ({label}): Compared {done}/{total} pairs."),
        );
    }))
}

#[wasm_bindgen]
pub fn process_pairs_to_json(
    content: &[u8],
    is_gzipped: bool,
    progress_callback: &js_sys::Function,
) -> Result<String, JsValue> {
    let comparisons = process_pairs(content, is_gzipped, progress_callback, "JSON")?;
    report_progress(progress_callback, "Rust Wasm (JSON): Serializing data...");
    comparisons_to_json(&comparisons).map_err(|e| fail("JSON serialization error", e))
}

#[wasm_bindgen]
pub fn process_pairs_to_ipc_bytes(
    content: &[u8],
    is_gzipped: bool,
    progress_callback: &js_sys::Function,
) -> Result<Vec<u8>, JsValue> {
    let comparisons = process_pairs(content, is_gzipped, progress_callback, "IPC")?;
    report_progress(progress_callback, "Rust Wasm (IPC): Finalizing IPC stream...");
    let ipc_buffer = write_comparisons_ipc(Vec::new(), &comparisons)
        .map_err(|e| fail("Arrow IPC error", e))?;
    report_progress(progress_callback, "Rust Wasm (IPC): Processing complete.");
    Ok(ipc_buffer)
}
