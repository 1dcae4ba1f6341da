//! Argument schemas for the dispatched operations.
//!
//! Every operation receives its arguments as a positional JSON array. Each
//! schema below is a serde struct deserialised from that array, so arity and
//! types are checked by serde; [`OperationArgs::validate`] adds the checks
//! types cannot express. Trailing optional arguments may be omitted or `null`.

use bufroute::{OpenerOptions, Operation, Params, ViewId};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::DispatchError;

/// A validated argument schema bound to one operation.
pub trait OperationArgs: DeserializeOwned {
    /// Operation whose arguments this schema describes.
    const OPERATION: Operation;

    /// Checks constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated constraint.
    fn validate(&self) -> Result<(), String>;

    /// Deserialises and validates positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidArguments`] naming the operation when
    /// the arguments have the wrong arity or types, or fail validation.
    fn from_args(args: Vec<Value>) -> Result<Self, DispatchError> {
        let operation = Self::OPERATION.as_str();
        let parsed: Self = serde_json::from_value(Value::Array(args))
            .map_err(|error| DispatchError::invalid_arguments(operation, error.to_string()))?;
        parsed
            .validate()
            .map_err(|message| DispatchError::invalid_arguments(operation, message))?;
        Ok(parsed)
    }
}

/// `open`: path, params?, fragment?, options?
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OpenArgs {
    /// Requested path.
    pub path: String,
    /// Parameters for the name.
    #[serde(default)]
    pub params: Option<Params>,
    /// Fragment for the name.
    #[serde(default)]
    pub fragment: Option<String>,
    /// Presentation policy.
    #[serde(default)]
    pub options: Option<OpenerOptions>,
}

impl OperationArgs for OpenArgs {
    const OPERATION: Operation = Operation::Open;

    fn validate(&self) -> Result<(), String> {
        require_non_empty("path", &self.path)?;
        require_param_keys(self.params.as_ref())
    }
}

/// `preload`: path, params?, fragment?
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PreloadArgs {
    /// Requested path.
    pub path: String,
    /// Parameters for the name.
    #[serde(default)]
    pub params: Option<Params>,
    /// Fragment for the name.
    #[serde(default)]
    pub fragment: Option<String>,
}

impl OperationArgs for PreloadArgs {
    const OPERATION: Operation = Operation::Preload;

    fn validate(&self) -> Result<(), String> {
        require_non_empty("path", &self.path)?;
        require_param_keys(self.params.as_ref())
    }
}

/// `action`: view, action name, params?
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionArgs {
    /// View whose resource the action runs against.
    pub view: ViewId,
    /// Action name.
    pub action: String,
    /// Action parameters.
    #[serde(default)]
    pub params: Option<Params>,
}

impl OperationArgs for ActionArgs {
    const OPERATION: Operation = Operation::Action;

    fn validate(&self) -> Result<(), String> {
        require_non_empty("action name", &self.action)?;
        require_param_keys(self.params.as_ref())
    }
}

/// `internal:load` and `internal:save`: view, name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignalArgs {
    /// View the host signalled for.
    pub view: ViewId,
    /// Name currently attached to the view.
    pub name: String,
}

impl SignalArgs {
    fn check(&self) -> Result<(), String> {
        require_non_empty("name", &self.name)
    }
}

/// Arguments of the host's read signal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LoadArgs(pub SignalArgs);

impl OperationArgs for LoadArgs {
    const OPERATION: Operation = Operation::Load;

    fn validate(&self) -> Result<(), String> {
        self.0.check()
    }
}

/// Arguments of the host's write signal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SaveArgs(pub SignalArgs);

impl OperationArgs for SaveArgs {
    const OPERATION: Operation = Operation::Save;

    fn validate(&self) -> Result<(), String> {
        self.0.check()
    }
}

/// `internal:close`: view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CloseArgs {
    /// View the host closed.
    pub view: ViewId,
}

impl OperationArgs for CloseArgs {
    const OPERATION: Operation = Operation::Close;

    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// `internal:command`: path, args?, modifiers?
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandArgs {
    /// Path the command opens.
    pub path: String,
    /// Flag-style arguments typed after the command.
    #[serde(default)]
    pub args: Option<Vec<String>>,
    /// Window modifiers the command was invoked with.
    #[serde(default)]
    pub modifiers: Option<String>,
}

impl CommandArgs {
    /// Converts the flag-style arguments into parameters.
    ///
    /// # Errors
    ///
    /// See [`parse_command_args`].
    pub fn params(&self) -> Result<Params, String> {
        parse_command_args(self.args.as_deref().unwrap_or_default())
    }
}

impl OperationArgs for CommandArgs {
    const OPERATION: Operation = Operation::Command;

    fn validate(&self) -> Result<(), String> {
        require_non_empty("path", &self.path)?;
        self.params().map(drop)
    }
}

/// `setup:command`: path, command name?
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetupCommandArgs {
    /// Path the command opens.
    pub path: String,
    /// Explicit command name.
    #[serde(default)]
    pub command: Option<String>,
}

impl OperationArgs for SetupCommandArgs {
    const OPERATION: Operation = Operation::SetupCommand;

    fn validate(&self) -> Result<(), String> {
        require_non_empty("path", &self.path)?;
        match self.command.as_deref() {
            Some(command) if command.trim().is_empty() => {
                Err(String::from("command name is empty"))
            }
            Some(command) if !is_command_name(command) => Err(format!(
                "command name '{command}' must start with an uppercase ASCII letter \
                 and contain only ASCII letters and digits"
            )),
            _ => Ok(()),
        }
    }
}

/// Converts flag-style command arguments into parameters.
///
/// Accepts `--key=value`, bare `key=value`, and `--flag` (recorded as
/// `"true"`). Repeating a key collects its values into a sequence.
///
/// # Errors
///
/// Returns a description of the first token that is a bare positional word,
/// an empty flag, or has an empty key.
pub fn parse_command_args(args: &[String]) -> Result<Params, String> {
    let mut params = Params::new();
    for token in args {
        let (key, value) = match token.strip_prefix("--") {
            Some(flag) => flag.split_once('=').unwrap_or((flag, "true")),
            None => token
                .split_once('=')
                .ok_or_else(|| format!("unexpected positional argument '{token}'"))?,
        };
        if key.is_empty() {
            return Err(format!("argument '{token}' has an empty key"));
        }
        params.push(key, value);
    }
    Ok(params)
}

fn require_non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is empty"));
    }
    Ok(())
}

fn require_param_keys(params: Option<&Params>) -> Result<(), String> {
    if params.is_some_and(|params| params.iter().any(|(key, _)| key.is_empty())) {
        return Err(String::from("parameter keys must not be empty"));
    }
    Ok(())
}

fn is_command_name(command: &str) -> bool {
    let mut chars = command.chars();
    chars.next().is_some_and(|first| first.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}
