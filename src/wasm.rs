//! WASM bindings for Symcirc Core.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmTransferFunction } from 'symcirc_core';
//!
//! await init();
//!
//! const netlist = `
//!   .interface 1
//!   R1 1 2 1k
//!   C1 2 0 1u
//! `;
//!
//! const tf = new WasmTransferFunction(netlist);
//! console.log(tf.to_display_string());
//! ```

use wasm_bindgen::prelude::*;

use crate::error::SymcircError;
use crate::solver::{AnalysisConfig, Metacircuit};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

impl From<SymcircError> for JsValue {
    fn from(err: SymcircError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// The analysed transfer function of a netlist.
#[wasm_bindgen]
pub struct WasmTransferFunction {
    meta: Metacircuit,
}

#[wasm_bindgen]
impl WasmTransferFunction {
    /// Parse, build and analyse a netlist.
    ///
    /// # Example
    /// ```javascript
    /// const tf = new WasmTransferFunction(netlist);
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(netlist: &str) -> Result<WasmTransferFunction, JsValue> {
        Self::with_config(netlist, true, false)
    }

    /// Analyse with explicit simplification and numeric settings.
    #[wasm_bindgen]
    pub fn with_config(
        netlist: &str,
        simplify: bool,
        numeric: bool,
    ) -> Result<WasmTransferFunction, JsValue> {
        if netlist.trim().is_empty() {
            return Err(SymcircError::WasmError {
                message: "empty netlist".to_string(),
            }
            .into());
        }
        let config = AnalysisConfig::new()
            .with_simplify(simplify)
            .with_numeric(numeric);
        let meta = crate::analyse_netlist(netlist, &config)?;
        Ok(WasmTransferFunction { meta })
    }

    /// The numerator polynomial `N(s)`.
    #[wasm_bindgen]
    pub fn numerator(&self) -> String {
        self.meta.numerator().as_string()
    }

    /// The denominator polynomial `D(s)`.
    #[wasm_bindgen]
    pub fn denominator(&self) -> String {
        self.meta.denominator().as_string()
    }

    /// `Y(s) = N(s) / D(s)`.
    #[wasm_bindgen]
    pub fn to_display_string(&self) -> String {
        self.meta.to_display_string()
    }

    /// Numeric `Y(s) = N(s) / D(s)`, when requested at construction.
    #[wasm_bindgen]
    pub fn numeric_string(&self) -> Option<String> {
        self.meta
            .digit()
            .map(|digit| format!("Y(s) = {} / {}", digit.numerator, digit.denominator))
    }

    /// Number of common trees found.
    #[wasm_bindgen(getter)]
    pub fn tree_count(&self) -> f64 {
        self.meta.stats().trees as f64
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
