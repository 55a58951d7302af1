//! Syntax check of generated sources with QuickJS.

use rquickjs::{
    Context as JsContext, Error as JsError, Exception, FromJs, Module, Runtime as JsRuntime,
    loader::{BuiltinLoader, BuiltinResolver},
};

use crate::{NodecodeError, Result};

/// Source of the stand-in for every host module, only its default export is imported.
const HOST_MODULE_STUB: &str = "export default {};";

/// Compile `source` as an ES module without evaluating it.
///
/// Each name in `host_modules` resolves to an empty stub module. Importing
/// any other module is a compile error.
pub fn check_module_syntax(
    name: &str,
    source: &str,
    host_modules: &[&str],
) -> Result<()> {
    let runtime = JsRuntime::new().map_err(|e| script_error("JS_RUNTIME_ERROR", e.to_string()))?;

    let (resolver, loader) = host_modules.iter().fold(
        (BuiltinResolver::default(), BuiltinLoader::default()),
        |(resolver, loader), module| (resolver.with_module(*module), loader.with_module(*module, HOST_MODULE_STUB)),
    );
    runtime.set_loader(resolver, loader);

    let ctx = JsContext::full(&runtime).map_err(|e| script_error("JS_RUNTIME_ERROR", e.to_string()))?;

    ctx.with(|ctx| match Module::declare(ctx.clone(), name, source) {
        Ok(_) => Ok(()),
        Err(JsError::Exception) => {
            let message = Exception::from_js(&ctx, ctx.catch()).ok().and_then(|e| e.message()).unwrap_or_default();
            Err(script_error("JS_COMPILE_ERROR", message))
        }
        Err(e) => Err(script_error("JS_COMPILE_ERROR", e.to_string())),
    })
}

fn script_error(
    ecode: &str,
    message: String,
) -> NodecodeError {
    NodecodeError::Script {
        ecode: ecode.to_string(),
        message,
    }
}

#[cfg(test)]
mod test {
    use super::check_module_syntax;
    use crate::NodecodeError;

    #[test]
    fn test_valid_module_with_imports() {
        let source = r#"
import http from 'http';
import zen from 'zen';

export const handler = async (input) => {
  const response = await http.get("https://example.com");
  return response.data;
};
"#;
        check_module_syntax("handler.js", source, &["http", "zen"]).unwrap();
    }

    #[test]
    fn test_unknown_import() {
        let source = "import axios from 'axios';\nexport const handler = async () => axios;";
        let err = check_module_syntax("handler.js", source, &["http", "zen"]).unwrap_err();
        assert!(matches!(err, NodecodeError::Script { ref ecode, .. } if ecode == "JS_COMPILE_ERROR"));

        check_module_syntax("handler.js", source, &["axios"]).unwrap();
    }

    #[test]
    fn test_invalid_module() {
        let source = "export const handler = async (input) => { return ; ";
        let err = check_module_syntax("handler.js", source, &[]).unwrap_err();
        assert!(matches!(err, NodecodeError::Script { ref ecode, .. } if ecode == "JS_COMPILE_ERROR"));
    }
}
