//! Resource name codec.
//!
//! Resource names follow the micro-format
//! `scheme://path[;key=value[&key2=value2...]][#fragment]`. Reserved
//! characters inside the path, parameter keys and parameter values are
//! percent-escaped so they never collide with the delimiters. A key may repeat
//! to carry a multi-valued parameter.
//!
//! Names without parameters are formatted without the `;` separator, so
//! `scheme://path;` parses successfully but formats back as `scheme://path`.

mod params;

use std::borrow::Cow;
use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use crate::error::RouterError;

pub use self::params::{ParamValue, Params};

const SCHEME_SEPARATOR: &str = "://";
const PARAMS_SEPARATOR: char = ';';
const PAIR_SEPARATOR: char = '&';
const KEY_VALUE_SEPARATOR: char = '=';
const FRAGMENT_SEPARATOR: char = '#';

/// Characters escaped in the path, parameter keys and parameter values.
const COMPONENT: &AsciiSet = &CONTROLS
    .add(b'%')
    .add(b';')
    .add(b'&')
    .add(b'=')
    .add(b'#');

/// Characters escaped in the fragment, which runs to the end of the name.
const FRAGMENT: &AsciiSet = &CONTROLS.add(b'%');

/// Returns `true` when `scheme` can prefix a resource name.
///
/// A scheme starts with an ASCII letter followed by ASCII letters, digits,
/// `+`, `-` or `.`.
#[must_use]
pub fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// A parsed resource name.
///
/// # Example
///
/// ```
/// use bufroute::name::ResourceName;
///
/// let name = ResourceName::parse("gitui://log;author=ada#HEAD").expect("valid name");
/// assert_eq!(name.scheme(), "gitui");
/// assert_eq!(name.path(), "log");
/// assert_eq!(name.params().get_str("author"), Some("ada"));
/// assert_eq!(name.fragment(), Some("HEAD"));
/// assert_eq!(name.to_string(), "gitui://log;author=ada#HEAD");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceName {
    scheme: String,
    path: String,
    params: Params,
    fragment: Option<String>,
}

impl ResourceName {
    /// Creates a name with no parameters and no fragment.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::IllegalScheme`] when the scheme is not a valid
    /// scheme.
    pub fn new(scheme: impl Into<String>, path: impl Into<String>) -> Result<Self, RouterError> {
        let scheme = scheme.into();
        if !is_valid_scheme(&scheme) {
            return Err(RouterError::IllegalScheme { scheme });
        }
        Ok(Self {
            scheme,
            path: path.into(),
            params: Params::new(),
            fragment: None,
        })
    }

    /// Replaces the parameters.
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Replaces the fragment.
    #[must_use]
    pub fn with_fragment(mut self, fragment: Option<String>) -> Self {
        self.fragment = fragment;
        self
    }

    /// Parses a resource name.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::MalformedName`] when the `scheme://` prefix is
    /// missing or invalid, a parameter lacks `=` or a key, or an escape does
    /// not decode to UTF-8.
    pub fn parse(name: &str) -> Result<Self, RouterError> {
        let Some((scheme, rest)) = name.split_once(SCHEME_SEPARATOR) else {
            return Err(RouterError::malformed_name(name, "missing 'scheme://' prefix"));
        };
        if !is_valid_scheme(scheme) {
            return Err(RouterError::malformed_name(
                name,
                format!("'{scheme}' is not a valid scheme"),
            ));
        }

        let (body, fragment) = match rest.split_once(FRAGMENT_SEPARATOR) {
            Some((body, fragment)) => (body, Some(decode(name, fragment)?)),
            None => (rest, None),
        };
        let (raw_path, query) = match body.split_once(PARAMS_SEPARATOR) {
            Some((path, query)) => (path, query),
            None => (body, ""),
        };

        Ok(Self {
            scheme: scheme.to_owned(),
            path: decode(name, raw_path)?,
            params: parse_params(name, query)?,
            fragment,
        })
    }

    /// Formats the name; equivalent to `to_string()`.
    #[must_use]
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Scheme of the name.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Unescaped path of the name.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parameters of the name.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Fragment of the name, if present.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SCHEME_SEPARATOR}{}",
            self.scheme,
            utf8_percent_encode(&self.path, COMPONENT)
        )?;

        let mut separator = PARAMS_SEPARATOR;
        for (key, value) in self.params.iter() {
            let key = utf8_percent_encode(key, COMPONENT);
            for item in value.values() {
                write!(
                    f,
                    "{separator}{key}{KEY_VALUE_SEPARATOR}{}",
                    utf8_percent_encode(item, COMPONENT)
                )?;
                separator = PAIR_SEPARATOR;
            }
        }

        if let Some(fragment) = &self.fragment {
            write!(
                f,
                "{FRAGMENT_SEPARATOR}{}",
                utf8_percent_encode(fragment, FRAGMENT)
            )?;
        }
        Ok(())
    }
}

fn parse_params(name: &str, query: &str) -> Result<Params, RouterError> {
    let mut params = Params::new();
    if query.is_empty() {
        return Ok(params);
    }
    for pair in query.split(PAIR_SEPARATOR) {
        let Some((key, value)) = pair.split_once(KEY_VALUE_SEPARATOR) else {
            return Err(RouterError::malformed_name(
                name,
                format!("parameter '{pair}' lacks '{KEY_VALUE_SEPARATOR}'"),
            ));
        };
        if key.is_empty() {
            return Err(RouterError::malformed_name(
                name,
                format!("parameter '{pair}' has an empty key"),
            ));
        }
        params.push(decode(name, key)?, decode(name, value)?);
    }
    Ok(params)
}

fn decode(name: &str, component: &str) -> Result<String, RouterError> {
    percent_decode_str(component)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|error| {
            RouterError::malformed_name(name, format!("invalid escape in '{component}': {error}"))
        })
}
