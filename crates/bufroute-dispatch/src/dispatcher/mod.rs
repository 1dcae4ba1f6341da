//! Operation routing for dispatched requests.
//!
//! The [`Dispatcher`] owns a [`Router`] and the [`Host`] it drives. It maps a
//! request's prefixed method onto an [`Operation`], validates the arguments
//! against that operation's schema, and only then calls into the router.

use bufroute::{Host, OpenerOptions, Operation, Router, SignalBinding, SplitStyle};
use bufroute_config::Config;
use serde_json::Value;
use tracing::debug;

use crate::arguments::{
    ActionArgs, CloseArgs, CommandArgs, LoadArgs, OpenArgs, OperationArgs, PreloadArgs, SaveArgs,
    SetupCommandArgs,
};
use crate::errors::DispatchError;
use crate::request::RpcRequest;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Routes validated requests to a router.
#[derive(Debug)]
pub struct Dispatcher<H> {
    router: Router,
    host: H,
}

impl<H: Host> Dispatcher<H> {
    /// Creates a dispatcher around an existing router.
    pub const fn new(router: Router, host: H) -> Self {
        Self { router, host }
    }

    /// Creates a dispatcher with an empty router configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Config`] when the configuration is invalid and
    /// [`DispatchError::Router`] when the scheme cannot be used.
    pub fn from_config(config: &Config, host: H) -> Result<Self, DispatchError> {
        config.validate()?;
        let router = Router::new(config.scheme())?.with_prefix(config.prefix());
        Ok(Self::new(router, host))
    }

    /// Router receiving dispatched operations.
    pub const fn router(&self) -> &Router {
        &self.router
    }

    /// Mutable router, for registering handlers.
    pub const fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    /// Host driven by the router.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host.
    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Binds the router's read signal on the host.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Router`] when the host refuses the binding.
    pub fn bind(&mut self) -> Result<SignalBinding, DispatchError> {
        Ok(self.router.bind_signals(&mut self.host)?)
    }

    /// Dispatches one request and returns the operation's value.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownOperation`] for methods outside the
    /// router's prefix, [`DispatchError::InvalidArguments`] when arguments
    /// fail their schema, and [`DispatchError::Router`] when the router
    /// rejects the operation.
    pub fn dispatch(&mut self, request: RpcRequest) -> Result<Value, DispatchError> {
        request.validate()?;
        let method = request.method();
        let operation = self
            .router
            .operations()
            .parse(method)
            .ok_or_else(|| DispatchError::unknown_operation(method))?;
        debug!(
            target: DISPATCH_TARGET,
            method,
            operation = operation.as_str(),
            args = request.args.len(),
            "dispatching request"
        );
        self.route(operation, request.args)
    }

    fn route(&mut self, operation: Operation, args: Vec<Value>) -> Result<Value, DispatchError> {
        match operation {
            Operation::Open => self.open(OpenArgs::from_args(args)?),
            Operation::Preload => self.preload(PreloadArgs::from_args(args)?),
            Operation::Action => self.action(ActionArgs::from_args(args)?),
            Operation::Load => self.load(LoadArgs::from_args(args)?),
            Operation::Save => self.save(SaveArgs::from_args(args)?),
            Operation::Close => Ok(self.close(CloseArgs::from_args(args)?)),
            Operation::Command => self.command(CommandArgs::from_args(args)?),
            Operation::SetupCommand => self.setup_command(SetupCommandArgs::from_args(args)?),
        }
    }

    fn open(&mut self, args: OpenArgs) -> Result<Value, DispatchError> {
        let name = self.router.open(
            &mut self.host,
            &args.path,
            &args.params.unwrap_or_default(),
            args.fragment.as_deref(),
            args.options.unwrap_or_default(),
        )?;
        Ok(Value::String(name))
    }

    fn preload(&mut self, args: PreloadArgs) -> Result<Value, DispatchError> {
        let name = self.router.preload(
            &mut self.host,
            &args.path,
            &args.params.unwrap_or_default(),
            args.fragment.as_deref(),
        )?;
        Ok(Value::String(name))
    }

    fn action(&self, args: ActionArgs) -> Result<Value, DispatchError> {
        Ok(self.router.invoke_action(
            &self.host,
            args.view,
            &args.action,
            &args.params.unwrap_or_default(),
        )?)
    }

    fn load(&mut self, LoadArgs(args): LoadArgs) -> Result<Value, DispatchError> {
        let state = self
            .router
            .on_resource_read(&mut self.host, args.view, &args.name)?;
        Ok(Value::from(state.as_str()))
    }

    fn save(&mut self, SaveArgs(args): SaveArgs) -> Result<Value, DispatchError> {
        self.router
            .on_resource_write(&mut self.host, args.view, &args.name)?;
        Ok(Value::Null)
    }

    fn close(&mut self, args: CloseArgs) -> Value {
        Value::Bool(self.router.on_view_closed(args.view).is_some())
    }

    fn command(&mut self, args: CommandArgs) -> Result<Value, DispatchError> {
        let params = args
            .params()
            .map_err(|message| DispatchError::invalid_arguments(Operation::Command.as_str(), message))?;
        let split = SplitStyle::classify(args.modifiers.as_deref().unwrap_or_default())?;
        let name = self.router.open(
            &mut self.host,
            &args.path,
            &params,
            None,
            OpenerOptions::split(split),
        )?;
        Ok(Value::String(name))
    }

    fn setup_command(&mut self, args: SetupCommandArgs) -> Result<Value, DispatchError> {
        let command =
            self.router
                .setup_command(&mut self.host, &args.path, args.command.as_deref())?;
        Ok(Value::String(command))
    }
}
