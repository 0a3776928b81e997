use std::fmt;

/// Where a bound controller argument is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingSource {
    /// Cascade lookup: context store, then path, then query, then body.
    /// The first source that defines the key wins.
    Auto,
    /// A named placeholder extracted from the matched path pattern.
    Path,
    /// A query string parameter.
    Query,
    /// A top-level field of the deserialized body object.
    Body,
    /// A value stored in the per-request context by earlier middleware.
    Context,
    /// The request object itself, injected positionally.
    Request,
}

impl fmt::Display for BindingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingSource::Auto => write!(f, "Auto"),
            BindingSource::Path => write!(f, "Path"),
            BindingSource::Query => write!(f, "Query"),
            BindingSource::Body => write!(f, "Body"),
            BindingSource::Context => write!(f, "Context"),
            BindingSource::Request => write!(f, "Request"),
        }
    }
}

/// One ordered argument declaration on a route.
///
/// The dispatcher turns the route's binding list into the controller's
/// argument list, in declaration order. A required binding whose key is
/// absent from its source fails the request with an argument-binding error
/// naming the parameter and the controller action; an optional binding
/// resolves to JSON `null` instead.
#[derive(Debug, Clone)]
pub struct ParamBinding {
    /// Parameter name looked up in the source (and quoted in diagnostics)
    pub key: String,
    /// Which request surface supplies the value
    pub source: BindingSource,
    /// Whether a missing value fails the request (default: true)
    pub required: bool,
}

impl ParamBinding {
    fn new(key: impl Into<String>, source: BindingSource) -> Self {
        Self {
            key: key.into(),
            source,
            required: true,
        }
    }

    /// Cascade binding; a key literally named `request` injects the request
    /// object itself.
    #[must_use]
    pub fn auto(key: impl Into<String>) -> Self {
        Self::new(key, BindingSource::Auto)
    }

    /// Bind from a path placeholder.
    #[must_use]
    pub fn path(key: impl Into<String>) -> Self {
        Self::new(key, BindingSource::Path)
    }

    /// Bind from a query parameter.
    #[must_use]
    pub fn query(key: impl Into<String>) -> Self {
        Self::new(key, BindingSource::Query)
    }

    /// Bind from a body field.
    #[must_use]
    pub fn body(key: impl Into<String>) -> Self {
        Self::new(key, BindingSource::Body)
    }

    /// Bind from the per-request context store.
    #[must_use]
    pub fn context(key: impl Into<String>) -> Self {
        Self::new(key, BindingSource::Context)
    }

    /// Inject the request object itself.
    #[must_use]
    pub fn request() -> Self {
        Self::new("request", BindingSource::Request)
    }

    /// Mark the binding optional: a missing value becomes JSON `null`
    /// instead of failing the request.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}
