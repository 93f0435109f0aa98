//! Launch options and language selection

use serde::{Deserialize, Serialize};

use crate::{BridgeError, Result};

/// Document name used when the page supplies none
pub const DEFAULT_DOCUMENT: &str = "test.py";
/// Monospace font the core measures at launch
pub const DEFAULT_FONT_FAMILY: &str = "Roboto Mono";
pub const DEFAULT_FONT_SIZE: f64 = 14.0;
/// Web font loaded by the standalone page before the core starts
pub const DEFAULT_FONT_SOURCE: &str = "url(https://fonts.gstatic.com/s/robotomono/v23/L0xuDF4xlVMF-BfR8bXMIhJHg45mwgGEFl0_3vq_ROW-AJi8SJQt.woff)";
pub const DEFAULT_LANGUAGE_PICKER: &str = "language-picker";

/// Presentation parameters handed to the core at launch.
///
/// Deserialized from page globals (`fileName`/`docId`, `fontFamily`,
/// `fontSize`) or the standalone page's options object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LaunchOptions {
    #[serde(alias = "fileName", alias = "docId")]
    pub document: String,
    pub font_family: String,
    pub font_size: f64,
    /// CSS `src` for a font to load before launch; `None` uses installed fonts
    pub font_source: Option<String>,
    /// Element id of the `<select>` that switches languages
    pub language_picker: Option<String>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            document: DEFAULT_DOCUMENT.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_source: None,
            language_picker: None,
        }
    }
}

impl LaunchOptions {
    /// Defaults for the standalone demo page
    pub fn standalone() -> Self {
        Self {
            font_source: Some(DEFAULT_FONT_SOURCE.to_string()),
            language_picker: Some(DEFAULT_LANGUAGE_PICKER.to_string()),
            ..Self::default()
        }
    }

    /// Parse options from JSON, filling gaps with defaults, then validate
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Self::default().overlay(value)
    }

    /// Replace the fields present in `value`, keeping the rest, then validate.
    ///
    /// Accepts the page-global spellings (`fileName`, `docId`) for the
    /// document name.
    pub fn overlay(self, value: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(fields) = value else {
            return Err(BridgeError::Config("options must be an object".to_string()));
        };
        let mut merged = match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(base)) => base,
            Ok(other) => {
                return Err(BridgeError::Config(format!("unexpected options shape: {other}")))
            }
            Err(e) => return Err(BridgeError::Config(e.to_string())),
        };
        for (key, field) in fields {
            let key = match key.as_str() {
                "fileName" | "docId" => "document".to_string(),
                _ => key,
            };
            merged.insert(key, field);
        }
        let options: Self = serde_json::from_value(serde_json::Value::Object(merged))
            .map_err(|e| BridgeError::Config(e.to_string()))?;
        options.validated()
    }

    /// Check invariants the core relies on
    pub fn validated(self) -> Result<Self> {
        if self.document.trim().is_empty() {
            return Err(BridgeError::Config("document name is empty".to_string()));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(BridgeError::Config(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        if self.font_family.trim().is_empty() {
            return Err(BridgeError::Config("font family is empty".to_string()));
        }
        Ok(self)
    }

    /// Font shorthand used to wait for the font, e.g. `14pt Roboto Mono`
    pub fn font_shorthand(&self) -> String {
        format!("{}pt {}", self.font_size, self.font_family)
    }

    /// The document name with its extension replaced by `extension`
    pub fn document_with_extension(&self, extension: &str) -> String {
        let stem = match self.document.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => self.document.as_str(),
        };
        format!("{stem}.{}", extension.trim_start_matches('.'))
    }
}

/// Languages the core knows by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    Java,
    Cpp,
    CSharp,
    Rust,
    Verilog,
    SystemVerilog,
}

impl Language {
    /// Resolve the language for a file name.
    ///
    /// Unknown extensions fall back to Python, matching the core.
    pub fn for_file(file_name: &str) -> Self {
        match file_name.rsplit('.').next() {
            Some("py") => Self::Python,
            Some("java") => Self::Java,
            Some("cpp" | "h" | "hpp") => Self::Cpp,
            Some("cs") => Self::CSharp,
            Some("rs") => Self::Rust,
            Some("v" | "vh") => Self::Verilog,
            Some("sv" | "svh") => Self::SystemVerilog,
            _ => Self::Python,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let options = LaunchOptions::from_json(json!({})).unwrap();
        assert_eq!(options, LaunchOptions::default());
        assert_eq!(options.document, "test.py");
        assert_eq!(options.font_size, 14.0);
    }

    #[test]
    fn test_page_global_names() {
        let options = LaunchOptions::from_json(json!({
            "fileName": "main.rs",
            "fontFamily": "Fira Code",
            "fontSize": 12
        }))
        .unwrap();
        assert_eq!(options.document, "main.rs");
        assert_eq!(options.font_family, "Fira Code");
        assert_eq!(options.font_size, 12.0);

        let options = LaunchOptions::from_json(json!({"docId": "untitled-1.py"})).unwrap();
        assert_eq!(options.document, "untitled-1.py");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            LaunchOptions::from_json(json!({"fileName": ""})),
            Err(BridgeError::Config(_))
        ));
        assert!(matches!(
            LaunchOptions::from_json(json!({"fontSize": 0})),
            Err(BridgeError::Config(_))
        ));
        assert!(matches!(
            LaunchOptions::from_json(json!({"fontSize": "large"})),
            Err(BridgeError::Config(_))
        ));
    }

    #[test]
    fn test_standalone_defaults() {
        let options = LaunchOptions::standalone();
        assert_eq!(options.font_shorthand(), "14pt Roboto Mono");
        assert_eq!(options.language_picker.as_deref(), Some("language-picker"));
        assert!(options.font_source.is_some());
    }

    #[test]
    fn test_overlay_keeps_unset_fields() {
        let options = LaunchOptions::standalone()
            .overlay(json!({"fileName": "demo.java", "fontSize": 16}))
            .unwrap();
        assert_eq!(options.document, "demo.java");
        assert_eq!(options.font_size, 16.0);
        assert_eq!(options.font_family, "Roboto Mono");
        assert_eq!(options.language_picker.as_deref(), Some("language-picker"));

        let options = LaunchOptions::standalone()
            .overlay(json!({"fontSource": null}))
            .unwrap();
        assert_eq!(options.font_source, None);
    }

    #[test]
    fn test_overlay_requires_object() {
        assert!(matches!(
            LaunchOptions::default().overlay(json!("test.py")),
            Err(BridgeError::Config(_))
        ));
    }

    #[test]
    fn test_document_with_extension() {
        let options = LaunchOptions::default();
        assert_eq!(options.document_with_extension("rs"), "test.rs");
        assert_eq!(options.document_with_extension(".java"), "test.java");

        let options = LaunchOptions {
            document: "Makefile".to_string(),
            ..LaunchOptions::default()
        };
        assert_eq!(options.document_with_extension("py"), "Makefile.py");
    }

    #[test]
    fn test_language_for_file() {
        assert_eq!(Language::for_file("test.py"), Language::Python);
        assert_eq!(Language::for_file("a/b/widget.hpp"), Language::Cpp);
        assert_eq!(Language::for_file("top.svh"), Language::SystemVerilog);
        assert_eq!(Language::for_file("notes.txt"), Language::Python);
        assert_eq!(Language::for_file("lib.rs"), Language::Rust);
    }
}
