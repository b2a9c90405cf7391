//! Extraction boundary
//!
//! An extraction function declares its parameters once with a [`Boundary`].
//! On each call the arguments are bound against that declaration, source
//! parameters are wrapped in a fresh context, and whatever the body returns
//! is unwrapped before it reaches the caller. Callers only ever see plain
//! values or an error.

use crate::plain::IntoPlain;
use crate::wrapped::Wrapped;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::trace;

#[derive(Debug, Clone)]
struct Parameter {
    name: String,
    // Present for parameters that are wrapped on entry
    description: Option<String>,
    default: Option<Value>,
}

/// Declared parameter list of an extraction function
#[derive(Debug, Clone)]
pub struct Boundary {
    function: String,
    parameters: Vec<Parameter>,
}

impl Boundary {
    /// Boundary of the named function with no parameters yet
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            parameters: Vec::new(),
        }
    }

    /// Boundary whose listed parameters are all sources sharing one
    /// description
    pub fn shared(function: impl Into<String>, description: &str, names: &[&str]) -> Self {
        names
            .iter()
            .fold(Self::new(function), |boundary, name| boundary.source(*name, description))
    }

    fn parameter(
        mut self,
        name: impl Into<String>,
        description: Option<String>,
        default: Option<Value>,
    ) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            description,
            default,
        });
        self
    }

    /// Required source parameter, wrapped with the given description
    #[must_use]
    pub fn source(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.parameter(name, Some(description.into()), None)
    }

    /// Source parameter falling back to `default` when omitted.
    ///
    /// The default is wrapped like a passed argument.
    #[must_use]
    pub fn optional_source(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        default: Value,
    ) -> Self {
        self.parameter(name, Some(description.into()), Some(default))
    }

    /// Required parameter passed to the body as is
    #[must_use]
    pub fn plain(self, name: impl Into<String>) -> Self {
        self.parameter(name, None, None)
    }

    /// Plain parameter falling back to `default` when omitted
    #[must_use]
    pub fn optional(self, name: impl Into<String>, default: Value) -> Self {
        self.parameter(name, None, Some(default))
    }

    /// Name of the function behind this boundary
    pub fn function(&self) -> &str {
        &self.function
    }

    fn bind<'a>(&'a self, arguments: Arguments<'a>) -> Result<Bound<'a>> {
        let mut slots: Vec<Option<&'a Value>> = vec![None; self.parameters.len()];

        if arguments.positional.len() > self.parameters.len() {
            return Err(Error::bind(&self.function, "too many positional arguments"));
        }
        for (slot, value) in slots.iter_mut().zip(arguments.positional) {
            *slot = Some(value);
        }

        for (name, value) in arguments.named {
            let position = self
                .parameters
                .iter()
                .position(|parameter| parameter.name == name)
                .ok_or_else(|| {
                    Error::bind(
                        &self.function,
                        format!("got an unexpected keyword argument '{name}'"),
                    )
                })?;
            if slots[position].replace(value).is_some() {
                return Err(Error::bind(
                    &self.function,
                    format!("multiple values for argument '{name}'"),
                ));
            }
        }

        let mut bound = IndexMap::with_capacity(self.parameters.len());
        for (parameter, slot) in self.parameters.iter().zip(slots) {
            let value = slot.or(parameter.default.as_ref()).ok_or_else(|| {
                Error::bind(
                    &self.function,
                    format!("missing a required argument: '{}'", parameter.name),
                )
            })?;
            let argument = match &parameter.description {
                Some(description) => BoundArgument::Source(Wrapped::new(value, description)),
                None => BoundArgument::Plain(value),
            };
            bound.insert(parameter.name.as_str(), argument);
        }

        Ok(Bound {
            function: &self.function,
            arguments: bound,
        })
    }

    /// Bind `arguments`, run `body` over them and unwrap its result.
    ///
    /// Invalid source errors raised by the body are passed on unchanged.
    pub fn call<'a, R, F>(&'a self, arguments: Arguments<'a>, body: F) -> Result<R::Plain>
    where
        R: IntoPlain,
        F: FnOnce(Bound<'a>) -> Result<R>,
    {
        trace!(function = %self.function, "entering extraction");
        let bound = self.bind(arguments)?;
        let result = body(bound);
        if let Err(Error::InvalidSource(error)) = &result {
            trace!(
                function = %self.function,
                location = %error.location,
                reason = %error.reason,
                "invalid source"
            );
        }
        result.map(IntoPlain::into_plain)
    }
}

/// Arguments of one call through a [`Boundary`]
#[derive(Debug, Clone, Default)]
pub struct Arguments<'a> {
    positional: Vec<&'a Value>,
    named: Vec<(String, &'a Value)>,
}

impl<'a> Arguments<'a> {
    /// No arguments
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument
    #[must_use]
    pub fn arg(mut self, value: &'a Value) -> Self {
        self.positional.push(value);
        self
    }

    /// Add a named argument
    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, value: &'a Value) -> Self {
        self.named.push((name.into(), value));
        self
    }
}

#[derive(Debug, Clone)]
enum BoundArgument<'a> {
    Source(Wrapped<'a>),
    Plain(&'a Value),
}

/// Arguments bound to declared parameters, sources already wrapped
#[derive(Debug, Clone)]
pub struct Bound<'a> {
    function: &'a str,
    arguments: IndexMap<&'a str, BoundArgument<'a>>,
}

impl<'a> Bound<'a> {
    /// Wrapped source argument
    pub fn source(&self, name: &str) -> Result<Wrapped<'a>> {
        match self.arguments.get(name) {
            Some(BoundArgument::Source(wrapped)) => Ok(wrapped.clone()),
            Some(BoundArgument::Plain(_)) => Err(Error::bind(
                self.function,
                format!("argument '{name}' is not a source"),
            )),
            None => Err(Error::bind(self.function, format!("no argument '{name}'"))),
        }
    }

    /// Plain argument
    pub fn plain(&self, name: &str) -> Result<&'a Value> {
        match self.arguments.get(name) {
            Some(BoundArgument::Plain(value)) => Ok(*value),
            Some(BoundArgument::Source(_)) => Err(Error::bind(
                self.function,
                format!("argument '{name}' is a source"),
            )),
            None => Err(Error::bind(self.function, format!("no argument '{name}'"))),
        }
    }
}

/// Run an extraction over a single source.
///
/// Shorthand for a [`Boundary`] with one required source parameter.
pub fn extract<'a, R, F>(source: &'a Value, description: &'a str, body: F) -> Result<R::Plain>
where
    R: IntoPlain,
    F: FnOnce(Wrapped<'a>) -> Result<R>,
{
    body(Wrapped::new(source, description)).map(IntoPlain::into_plain)
}
