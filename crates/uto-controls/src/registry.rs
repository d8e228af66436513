//! Component registration bridge
//!
//! User code calls `registerComponent(name, module, controls, options)` while it is evaluated.
//! [`RegisterComponentFn`] turns such a call into an [`UpdatePropertyControlsInfo`] action, but only
//! when the parsed controls differ from the ones already held by the editor. Re-dispatching
//! unchanged controls would re-trigger evaluation of the same code.

use std::sync::Arc;

use im::OrdMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::controls::{parse_property_controls, ParsedPropertyControls};

/// Controls and import requirements of one registered component
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDescriptor {
    /// Parsed controls, keyed by prop name
    pub property_controls: ParsedPropertyControls,
    /// Imports the component needs when inserted
    pub required_imports: Option<Vec<Value>>,
}

/// Registered components, keyed by module name or path, then by component name
pub type PropertyControlsInfo = OrdMap<String, OrdMap<String, ComponentDescriptor>>;

/// Optional registration parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOptions {
    /// Imports the component needs when inserted
    #[serde(default)]
    pub required_imports: Option<Vec<Value>>,
}

/// Editor action replacing the controls of one module
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePropertyControlsInfo {
    /// Controls to merge into the editor's state
    pub controls: PropertyControlsInfo,
}

/// Receives editor actions
pub trait ControlsDispatch: Send + Sync {
    /// Dispatch an update
    fn dispatch(&self, update: UpdatePropertyControlsInfo);
}

impl<F> ControlsDispatch for F
where
    F: Fn(UpdatePropertyControlsInfo) + Send + Sync,
{
    fn dispatch(&self, update: UpdatePropertyControlsInfo) {
        self(update);
    }
}

/// Reads the controls currently held by the editor
pub trait ControlsStateSource: Send + Sync {
    /// Current controls, or `None` while the editor has no state
    fn property_controls_info(&self) -> Option<PropertyControlsInfo>;
}

impl<F> ControlsStateSource for F
where
    F: Fn() -> Option<PropertyControlsInfo> + Send + Sync,
{
    fn property_controls_info(&self) -> Option<PropertyControlsInfo> {
        self()
    }
}

/// Reasons a registration call is ignored
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// Component name is empty
    #[error("registerComponent needs a component name")]
    MissingComponentName,

    /// Module name or path is empty
    #[error("registerComponent needs a module name or path")]
    MissingModule,

    /// Property controls are not an object
    #[error("registerComponent needs a property controls object")]
    ControlsNotAnObject,
}

/// What a registration call did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Arguments were invalid; a warning was logged
    Rejected(RegistrationError),
    /// No editor state to compare against
    NoEditorState,
    /// Controls match the registered ones
    Unchanged,
    /// An update was dispatched
    Dispatched,
}

/// The `registerComponent` function handed to user code
#[derive(Clone)]
pub struct RegisterComponentFn {
    dispatch: Arc<dyn ControlsDispatch>,
    state_source: Option<Arc<dyn ControlsStateSource>>,
}

impl std::fmt::Debug for RegisterComponentFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterComponentFn")
            .field("has_state_source", &self.state_source.is_some())
            .finish_non_exhaustive()
    }
}

impl RegisterComponentFn {
    /// Create register function
    #[must_use]
    pub fn new(
        dispatch: Arc<dyn ControlsDispatch>,
        state_source: Option<Arc<dyn ControlsStateSource>>,
    ) -> Self {
        Self {
            dispatch,
            state_source,
        }
    }

    /// Register `component_name` from `module_name_or_path` with its property controls
    pub fn register_component(
        &self,
        component_name: &str,
        module_name_or_path: &str,
        property_controls: &Value,
        options: Option<&RegisterOptions>,
    ) -> RegisterOutcome {
        let controls = match validate(component_name, module_name_or_path, property_controls) {
            Ok(controls) => controls,
            Err(error) => {
                tracing::warn!(
                    %error,
                    "registerComponent has 3 parameters: component name, module name or path, property controls object"
                );
                return RegisterOutcome::Rejected(error);
            }
        };

        let parsed = parse_property_controls(controls);
        let Some(current) = self
            .state_source
            .as_ref()
            .and_then(|source| source.property_controls_info())
        else {
            return RegisterOutcome::NoEditorState;
        };

        let module = current.get(module_name_or_path).cloned().unwrap_or_default();
        let unchanged = module
            .get(component_name)
            .is_some_and(|descriptor| descriptor.property_controls == parsed);
        if unchanged {
            return RegisterOutcome::Unchanged;
        }

        let descriptor = ComponentDescriptor {
            property_controls: parsed,
            required_imports: options.and_then(|options| options.required_imports.clone()),
        };
        let controls = OrdMap::unit(
            module_name_or_path.to_string(),
            module.update(component_name.to_string(), descriptor),
        );
        tracing::debug!(
            component = component_name,
            module = module_name_or_path,
            "dispatching property controls update"
        );
        self.dispatch.dispatch(UpdatePropertyControlsInfo { controls });
        RegisterOutcome::Dispatched
    }
}

fn validate<'a>(
    component_name: &str,
    module_name_or_path: &str,
    property_controls: &'a Value,
) -> Result<&'a serde_json::Map<String, Value>, RegistrationError> {
    if component_name.is_empty() {
        return Err(RegistrationError::MissingComponentName);
    }
    if module_name_or_path.is_empty() {
        return Err(RegistrationError::MissingModule);
    }
    property_controls
        .as_object()
        .ok_or(RegistrationError::ControlsNotAnObject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<UpdatePropertyControlsInfo>>);

    impl ControlsDispatch for Recorder {
        fn dispatch(&self, update: UpdatePropertyControlsInfo) {
            self.0.lock().unwrap().push(update);
        }
    }

    fn empty_state() -> Arc<dyn ControlsStateSource> {
        Arc::new(|| Some(PropertyControlsInfo::new()))
    }

    #[test]
    fn rejects_invalid_arguments() {
        let recorder = Arc::new(Recorder::default());
        let register = RegisterComponentFn::new(recorder.clone(), Some(empty_state()));

        assert_eq!(
            register.register_component("", "/src/card.js", &json!({}), None),
            RegisterOutcome::Rejected(RegistrationError::MissingComponentName)
        );
        assert_eq!(
            register.register_component("Card", "", &json!({}), None),
            RegisterOutcome::Rejected(RegistrationError::MissingModule)
        );
        assert_eq!(
            register.register_component("Card", "/src/card.js", &json!("x"), None),
            RegisterOutcome::Rejected(RegistrationError::ControlsNotAnObject)
        );
        assert!(recorder.0.lock().unwrap().is_empty());
    }

    #[test]
    fn no_state_source_dispatches_nothing() {
        let recorder = Arc::new(Recorder::default());
        let register = RegisterComponentFn::new(recorder.clone(), None);
        assert_eq!(
            register.register_component("Card", "/src/card.js", &json!({}), None),
            RegisterOutcome::NoEditorState
        );
        assert!(recorder.0.lock().unwrap().is_empty());
    }

    #[test]
    fn dispatches_new_controls_with_imports() {
        let recorder = Arc::new(Recorder::default());
        let register = RegisterComponentFn::new(recorder.clone(), Some(empty_state()));
        let options = RegisterOptions {
            required_imports: Some(vec![json!({"source": "/src/card.js", "name": "Card"})]),
        };

        let outcome = register.register_component(
            "Card",
            "/src/card.js",
            &json!({"title": {"type": "string"}}),
            Some(&options),
        );
        assert_eq!(outcome, RegisterOutcome::Dispatched);

        let updates = recorder.0.lock().unwrap();
        let descriptor = updates[0]
            .controls
            .get("/src/card.js")
            .and_then(|module| module.get("Card"))
            .unwrap();
        assert!(descriptor.property_controls.get("title").unwrap().is_ok());
        assert_eq!(descriptor.required_imports.as_ref().map(Vec::len), Some(1));
    }
}
