// Fluent validation of request parameters

use crate::validators::{
    InRange, IsPositive, Length, Matches, MaxLength, MinLength, NonNegative, Numeric, OneOf,
};
use crate::{
    ParameterSource, RawParameter, Source, ValidationAggregator, ValidationError,
    ValidationErrors, ValidationSettings,
};
use gauntlet_core::HttpRequest;
use std::fmt;

/// Scalar types a raw parameter can be coerced into
pub trait ParamType: Sized {
    /// Name used in coercion failure messages
    const TYPE_NAME: &'static str;

    fn coerce(raw: &str) -> Option<Self>;
}

impl ParamType for i32 {
    const TYPE_NAME: &'static str = "integer";

    fn coerce(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl ParamType for i64 {
    const TYPE_NAME: &'static str = "64-bit integer";

    fn coerce(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl ParamType for f64 {
    const TYPE_NAME: &'static str = "float";

    fn coerce(raw: &str) -> Option<Self> {
        raw.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl ParamType for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn coerce(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl ParamType for String {
    const TYPE_NAME: &'static str = "string";

    fn coerce(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

enum ChainState<T> {
    /// Presence and coercion not evaluated yet
    Pending,
    /// Optional and not supplied
    Absent,
    Failed,
    Valid(T),
}

/// Rule chain for one request parameter.
///
/// Presence and coercion are evaluated lazily by the first rule or resolver,
/// so `required()`/`optional()` must come before any rule. Once the field
/// fails, remaining rules are skipped; the failure itself lives in the
/// aggregator the chain was created from.
pub struct ParamChain<'a, T> {
    param: RawParameter,
    required: bool,
    state: ChainState<T>,
    aggregator: &'a ValidationAggregator,
}

impl<'a, T: ParamType> ParamChain<'a, T> {
    pub fn new(param: RawParameter, aggregator: &'a ValidationAggregator) -> Self {
        Self {
            param,
            required: true,
            state: ChainState::Pending,
            aggregator,
        }
    }

    pub fn field(&self) -> &str {
        &self.param.name
    }

    pub fn source(&self) -> Source {
        self.param.source
    }

    /// A missing or empty value is a failure (the default).
    ///
    /// Must come before any rule; presence is settled by the first one.
    pub fn required(mut self) -> Self {
        self.assert_unresolved("required");
        self.required = true;
        self
    }

    /// A missing or empty value skips every rule without failing.
    ///
    /// Must come before any rule; presence is settled by the first one.
    pub fn optional(mut self) -> Self {
        self.assert_unresolved("optional");
        self.required = false;
        self
    }

    fn assert_unresolved(&self, modifier: &str) {
        debug_assert!(
            matches!(self.state, ChainState::Pending),
            "`{modifier}()` on `{}` must be called before any rule",
            self.param.name
        );
    }

    fn resolve(&mut self) {
        if !matches!(self.state, ChainState::Pending) {
            return;
        }

        let next = match self.param.value() {
            None if self.required => {
                self.aggregator
                    .record_error(ValidationError::required(&self.param.name));
                ChainState::Failed
            }
            None => ChainState::Absent,
            Some(raw) => match T::coerce(raw) {
                Some(value) => ChainState::Valid(value),
                None => {
                    self.aggregator.record_error(ValidationError::coercion(
                        &self.param.name,
                        T::TYPE_NAME,
                        raw,
                    ));
                    ChainState::Failed
                }
            },
        };
        self.state = next;
    }

    fn apply<F>(mut self, rule: F) -> Self
    where
        F: FnOnce(&T, &str) -> Result<(), ValidationError>,
    {
        self.resolve();
        let failure = match &self.state {
            ChainState::Valid(value) => rule(value, &self.param.name).err(),
            _ => None,
        };
        if let Some(error) = failure {
            self.aggregator.record_error(error);
            self.state = ChainState::Failed;
        }
        self
    }

    /// Value must be one of `allowed`; comparison is exact
    pub fn one_of<A>(self, allowed: &[A]) -> Self
    where
        A: fmt::Display,
        T: PartialEq<A> + fmt::Display,
    {
        self.apply(|value, field| OneOf(allowed).validate(value, field))
    }

    /// Custom check on the coerced value
    pub fn must<F>(self, predicate: F, message: impl Into<String>) -> Self
    where
        F: FnOnce(&T) -> bool,
    {
        self.apply(|value, field| {
            if predicate(value) {
                Ok(())
            } else {
                Err(ValidationError::new(field, message).with_constraint("must"))
            }
        })
    }

    /// The coerced value, or the zero value if the field failed.
    ///
    /// Check the aggregator before trusting the result.
    pub fn value(mut self) -> T
    where
        T: Default,
    {
        self.resolve();
        if self.aggregator.has_failure(&self.param.name) {
            return T::default();
        }
        match self.state {
            ChainState::Valid(value) => value,
            _ => T::default(),
        }
    }

    /// The coerced value; `None` when absent or failed
    pub fn value_opt(mut self) -> Option<T> {
        self.resolve();
        if self.aggregator.has_failure(&self.param.name) {
            return None;
        }
        match self.state {
            ChainState::Valid(value) => Some(value),
            _ => None,
        }
    }

    /// The coerced value if present and not failed, otherwise `default`.
    ///
    /// Presence and coercion are checked like in [`value`](Self::value), so
    /// a required field that is missing still records a failure. The
    /// default adds no failure of its own.
    pub fn value_or(mut self, default: T) -> T {
        self.resolve();
        if self.aggregator.has_failure(&self.param.name) {
            return default;
        }
        match self.state {
            ChainState::Valid(value) => value,
            _ => default,
        }
    }
}

impl<T: ParamType + Numeric> ParamChain<'_, T> {
    /// Value must be greater than zero
    pub fn positive(self) -> Self {
        self.apply(|value, field| IsPositive::validate(*value, field))
    }

    /// Value must be zero or greater
    pub fn non_negative(self) -> Self {
        self.apply(|value, field| NonNegative::validate(*value, field))
    }

    /// Value must lie in `min..=max`
    pub fn range(self, min: T, max: T) -> Self {
        self.apply(|value, field| InRange { min, max }.validate(*value, field))
    }
}

impl ParamChain<'_, String> {
    pub fn min_length(self, min: usize) -> Self {
        self.apply(|value, field| MinLength(min).validate(value, field))
    }

    pub fn max_length(self, max: usize) -> Self {
        self.apply(|value, field| MaxLength(max).validate(value, field))
    }

    pub fn length(self, min: usize, max: usize) -> Self {
        self.apply(|value, field| Length { min, max }.validate(value, field))
    }

    /// Whole value must match `regex`; failures carry `message`
    pub fn pattern(self, regex: &Matches, message: impl Into<String>) -> Self {
        self.apply(|value, field| {
            regex
                .validate(value, field)
                .map_err(|error| error.with_message(message))
        })
    }
}

/// Per-request facade over the parameters of a request.
///
/// Every chain created here records into the same aggregator; call
/// [`check`](Self::check) once all parameters are read.
///
/// ```
/// use gauntlet_core::HttpRequest;
/// use gauntlet_validation::ParamValidator;
///
/// let req = HttpRequest::new("GET", "/orders")
///     .with_query_param("size", "10");
///
/// let params = ParamValidator::new(&req);
/// let page = params.query_int("page").optional().range(1, 100).value_or(1);
/// let size = params.query_int("size").range(1, 50).value_or(10);
///
/// assert!(params.check().is_ok());
/// assert_eq!((page, size), (1, 10));
/// ```
pub struct ParamValidator<'r, S: ParameterSource + ?Sized = HttpRequest> {
    params: &'r S,
    settings: ValidationSettings,
    aggregator: ValidationAggregator,
}

impl<'r, S: ParameterSource + ?Sized> ParamValidator<'r, S> {
    pub fn new(params: &'r S) -> Self {
        Self::with_settings(params, ValidationSettings::default())
    }

    pub fn with_settings(params: &'r S, settings: ValidationSettings) -> Self {
        Self {
            params,
            settings,
            aggregator: ValidationAggregator::new(),
        }
    }

    /// Start a chain for `name` read from `source` and coerced to `T`
    pub fn param<T: ParamType>(&self, source: Source, name: &str) -> ParamChain<'_, T> {
        let raw = RawParameter::read(self.params, source, name, self.settings.trim_whitespace);
        ParamChain::new(raw, &self.aggregator)
    }

    pub fn path<T: ParamType>(&self, name: &str) -> ParamChain<'_, T> {
        self.param(Source::Path, name)
    }

    pub fn query<T: ParamType>(&self, name: &str) -> ParamChain<'_, T> {
        self.param(Source::Query, name)
    }

    pub fn header<T: ParamType>(&self, name: &str) -> ParamChain<'_, T> {
        self.param(Source::Header, name)
    }

    pub fn path_int(&self, name: &str) -> ParamChain<'_, i32> {
        self.path(name)
    }

    pub fn path_i64(&self, name: &str) -> ParamChain<'_, i64> {
        self.path(name)
    }

    pub fn path_string(&self, name: &str) -> ParamChain<'_, String> {
        self.path(name)
    }

    pub fn query_int(&self, name: &str) -> ParamChain<'_, i32> {
        self.query(name)
    }

    pub fn query_i64(&self, name: &str) -> ParamChain<'_, i64> {
        self.query(name)
    }

    pub fn query_string(&self, name: &str) -> ParamChain<'_, String> {
        self.query(name)
    }

    pub fn query_bool(&self, name: &str) -> ParamChain<'_, bool> {
        self.query(name)
    }

    pub fn query_float(&self, name: &str) -> ParamChain<'_, f64> {
        self.query(name)
    }

    pub fn header_string(&self, name: &str) -> ParamChain<'_, String> {
        self.header(name)
    }

    pub fn header_int(&self, name: &str) -> ParamChain<'_, i32> {
        self.header(name)
    }

    pub fn settings(&self) -> &ValidationSettings {
        &self.settings
    }

    pub fn aggregator(&self) -> &ValidationAggregator {
        &self.aggregator
    }

    /// `Ok(())` if no parameter failed, otherwise all failures at once
    pub fn check(&self) -> Result<(), ValidationErrors> {
        self.aggregator.check()
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.aggregator.into_errors()
    }
}
