//! WASM bindings for the invoice PDF splitter.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! The archive is returned as bytes; saving or offering it for download is
//! left to the caller.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use invsplit_core::models::config::{
    ClientStrategy, MissingFieldPolicy, SpacePolicy, SplitterConfig,
};
use invsplit_core::{describe_text, split_document, ExtractedFields, Sanitizer, SplitReport};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[derive(Serialize)]
struct FieldsJs {
    #[serde(flatten)]
    fields: ExtractedFields,
    filename: String,
}

/// Extract the invoice fields from one page of text.
///
/// Returns `{ invoice_number, schedule_date, client_name, missing, filename }`.
#[wasm_bindgen]
pub fn extract_fields(text: &str) -> Result<JsValue, JsValue> {
    let page = describe_text(text, &SplitterConfig::default());
    let output = FieldsJs {
        fields: page.fields,
        filename: page.filename,
    };

    serde_wasm_bindgen::to_value(&output).map_err(to_js_error)
}

/// Sanitize a value for use in a filename with the default naming rules.
#[wasm_bindgen]
pub fn sanitize(value: &str) -> String {
    Sanitizer::default().sanitize(value)
}

/// Split a PDF with the default configuration.
///
/// `strict` skips pages with missing fields instead of using placeholders.
#[wasm_bindgen]
pub fn split_invoices(data: &[u8], strict: bool) -> Result<SplitResult, JsValue> {
    let mut splitter = InvoiceSplitter::new();
    splitter.set_strict(strict);
    splitter.split(data)
}

/// Archive bytes and report of one split.
#[wasm_bindgen]
pub struct SplitResult {
    archive: Vec<u8>,
    report: SplitReport,
}

#[wasm_bindgen]
impl SplitResult {
    /// The zip archive.
    #[wasm_bindgen(getter)]
    pub fn archive(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.archive.as_slice())
    }

    /// Per-page report as a plain object.
    #[wasm_bindgen]
    pub fn report(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.report).map_err(to_js_error)
    }

    /// Pages written to the archive.
    #[wasm_bindgen(getter)]
    pub fn processed(&self) -> u32 {
        self.report.processed
    }

    #[wasm_bindgen(getter)]
    pub fn skipped(&self) -> u32 {
        self.report.skipped
    }

    /// Final "All done!" line.
    #[wasm_bindgen]
    pub fn summary(&self) -> String {
        self.report.summary()
    }
}

/// Configurable splitter for browser use.
#[wasm_bindgen]
pub struct InvoiceSplitter {
    config: SplitterConfig,
}

#[wasm_bindgen]
impl InvoiceSplitter {
    /// Create a splitter with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: SplitterConfig::default(),
        }
    }

    /// Create a splitter from a configuration object.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config: JsValue) -> Result<InvoiceSplitter, JsValue> {
        let config: SplitterConfig = serde_wasm_bindgen::from_value(config).map_err(to_js_error)?;
        config.validate().map_err(to_js_error)?;
        Ok(Self { config })
    }

    /// Skip pages with missing fields.
    #[wasm_bindgen]
    pub fn set_strict(&mut self, strict: bool) {
        self.config.extraction.missing_fields = if strict {
            MissingFieldPolicy::Skip
        } else {
            MissingFieldPolicy::Placeholder
        };
    }

    /// Replace whitespace with `_` (true) or drop it (false).
    #[wasm_bindgen]
    pub fn set_underscore_spaces(&mut self, underscore: bool) {
        self.config.naming.spaces = if underscore {
            SpacePolicy::Underscore
        } else {
            SpacePolicy::Remove
        };
    }

    /// Extra symbols allowed in filenames besides letters and digits.
    #[wasm_bindgen]
    pub fn set_allowed_symbols(&mut self, symbols: &str) -> Result<(), JsValue> {
        let mut config = self.config.clone();
        config.naming.allowed_symbols = symbols.to_string();
        config.validate().map_err(to_js_error)?;
        self.config = config;
        Ok(())
    }

    /// Client-name strategy order, e.g. `["between_headers", "attn"]`.
    #[wasm_bindgen]
    pub fn set_client_strategies(&mut self, strategies: JsValue) -> Result<(), JsValue> {
        let strategies: Vec<ClientStrategy> =
            serde_wasm_bindgen::from_value(strategies).map_err(to_js_error)?;
        let mut config = self.config.clone();
        config.extraction.client_strategies = strategies;
        config.validate().map_err(to_js_error)?;
        self.config = config;
        Ok(())
    }

    /// Deflate archive entries instead of storing them.
    #[wasm_bindgen]
    pub fn set_compress(&mut self, compress: bool) {
        self.config.archive.compress = compress;
    }

    /// Current configuration as a plain object.
    #[wasm_bindgen]
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.config).map_err(to_js_error)
    }

    /// Split a PDF into a zip of renamed single-page invoices.
    #[wasm_bindgen]
    pub fn split(&self, data: &[u8]) -> Result<SplitResult, JsValue> {
        let outcome = split_document(data, &self.config).map_err(to_js_error)?;

        for page in outcome.report.pages.iter().filter(|p| !p.is_processed()) {
            web_sys::console::warn_1(&JsValue::from_str(&page.message()));
        }

        Ok(SplitResult {
            archive: outcome.archive,
            report: outcome.report,
        })
    }

    /// Fields and filename for one page of text under this configuration.
    #[wasm_bindgen]
    pub fn describe(&self, text: &str) -> Result<JsValue, JsValue> {
        let page = describe_text(text, &self.config);
        serde_wasm_bindgen::to_value(&page).map_err(to_js_error)
    }
}

impl Default for InvoiceSplitter {
    fn default() -> Self {
        Self::new()
    }
}
