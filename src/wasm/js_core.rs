//! The editing core as a separately compiled JS module

use js_sys::{Array, Function, Object, Promise, Reflect};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::describe;
use crate::engine::EditorCore;
use crate::{BridgeError, Result};

/// A core module namespace: a default `init(callbacks)` export returning a
/// promise, plus one named export per core entry point.
pub struct JsCore {
    module: Object,
}

impl JsCore {
    /// Instantiate the core, registering `callbacks` as its outbound slots
    pub async fn load(module: JsValue, callbacks: &Object) -> Result<Self> {
        let module: Object = module
            .dyn_into()
            .map_err(|_| BridgeError::Load("core module is not an object".to_string()))?;
        let init = Reflect::get(&module, &JsValue::from_str("default"))
            .ok()
            .and_then(|init| init.dyn_into::<Function>().ok())
            .ok_or_else(|| {
                BridgeError::Load("core module has no default init export".to_string())
            })?;

        let pending = init
            .call1(&JsValue::UNDEFINED, callbacks)
            .map_err(|e| BridgeError::Load(describe(&e)))?;
        JsFuture::from(Promise::resolve(&pending))
            .await
            .map_err(|e| BridgeError::Load(describe(&e)))?;

        Ok(Self { module })
    }

    fn call(&self, name: &'static str, args: &[JsValue]) -> Result<()> {
        let function = Reflect::get(&self.module, &JsValue::from_str(name))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| BridgeError::Core {
                call: name,
                reason: "not exported by the core module".to_string(),
            })?;
        let args = args.iter().collect::<Array>();
        function
            .apply(&JsValue::UNDEFINED, &args)
            .map_err(|e| BridgeError::Core {
                call: name,
                reason: describe(&e),
            })?;
        Ok(())
    }

    /// Call `name` with a single opaque JSON payload
    fn call_with_payload(&self, name: &'static str, payload: &Value) -> Result<()> {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let payload = payload
            .serialize(&serializer)
            .map_err(|e| BridgeError::Core {
                call: name,
                reason: e.to_string(),
            })?;
        self.call(name, &[payload])
    }
}

impl EditorCore for JsCore {
    fn run_editor(&mut self, document: &str, font_family: &str, font_size: f64) -> Result<()> {
        self.call(
            "run_editor",
            &[
                JsValue::from_str(document),
                JsValue::from_str(font_family),
                JsValue::from_f64(font_size),
            ],
        )
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.call("set_text", &[JsValue::from_str(text)])
    }

    fn set_file(&mut self, file_name: &str) -> Result<()> {
        self.call("set_file", &[JsValue::from_str(file_name)])
    }

    fn apply_edit(&mut self, edit: Value) -> Result<()> {
        self.call_with_payload("apply_edit", &edit)
    }

    fn copy_selection(&mut self) -> Result<()> {
        self.call("copy_selection", &[])
    }

    fn cut_selection(&mut self) -> Result<()> {
        self.call("cut_selection", &[])
    }

    fn insert_text(&mut self, text: &str) -> Result<()> {
        self.call("insert_text", &[JsValue::from_str(text)])
    }

    fn new_diagnostics(&mut self, diagnostics: Value) -> Result<()> {
        self.call_with_payload("new_diagnostics", &diagnostics)
    }

    fn set_hover_info(&mut self, hover: Value) -> Result<()> {
        self.call_with_payload("set_hover_info", &hover)
    }

    fn set_quick_fixes(&mut self, actions: Value) -> Result<()> {
        self.call_with_payload("set_quick_fixes", &actions)
    }

    fn set_completions(&mut self, completions: Value) -> Result<()> {
        self.call_with_payload("set_completions", &completions)
    }

    fn undo(&mut self) -> Result<()> {
        self.call("undo", &[])
    }

    fn redo(&mut self) -> Result<()> {
        self.call("redo", &[])
    }
}
