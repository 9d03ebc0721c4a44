//! The warning value: kind, message, optional field data and cause.
//!
//! Warnings are data, not control flow. They are constructed once, never
//! mutated, and optionally handed to a [`crate::WarningRegistry`].

use crate::config::HelpUrlConfig;
use crate::error::WarnError;
use crate::kind::WarningKind;
use crate::message::{compose, WarningInit};
use serde::{Deserialize, Serialize};
use std::error;
use std::fmt;
use std::sync::Arc;

/// A non-fatal, structured diagnostic.
#[derive(Debug, Clone)]
pub struct Warning {
    kind: WarningKind,
    message: String,
    data: Option<WarningInit>,
    cause: Option<Cause>,
}

impl Warning {
    /// A warning carrying the kind's default message and no data.
    pub fn new(kind: WarningKind) -> Self {
        Self::with_message(kind, kind.default_message())
    }

    /// A warning whose message is composed from `init`. The field-set is
    /// stored verbatim as the warning's data.
    pub fn from_init(kind: WarningKind, init: WarningInit) -> Self {
        let message = compose(kind, &init);
        Self {
            kind,
            message,
            data: Some(init),
            cause: None,
        }
    }

    /// A warning with a literal message.
    pub fn with_message(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            data: None,
            cause: None,
        }
    }

    /// A warning with a literal message plus field data. The message is kept
    /// unchanged; `init` never influences it.
    pub fn with_message_and_init(
        kind: WarningKind,
        message: impl Into<String>,
        init: WarningInit,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            data: Some(init),
            cause: None,
        }
    }

    pub fn base(message: impl Into<String>) -> Self {
        Self::with_message(WarningKind::Base, message)
    }

    pub fn deprecation(init: WarningInit) -> Self {
        Self::from_init(WarningKind::Deprecation, init)
    }

    pub fn pending_deprecation(init: WarningInit) -> Self {
        Self::from_init(WarningKind::PendingDeprecation, init)
    }

    pub fn stability(init: WarningInit) -> Self {
        Self::from_init(WarningKind::Stability, init)
    }

    /// Attach the prior error or warning that led to this one.
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn kind(&self) -> WarningKind {
        self.kind
    }

    pub fn code(&self) -> u32 {
        self.kind.code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&WarningInit> {
        self.data.as_ref()
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Help URL rooted at the default knowledge base.
    pub fn help_url(&self) -> String {
        self.help_url_with(&HelpUrlConfig::default())
    }

    /// Help URL of the form
    /// `{root}/0x{code}?message=..[&data=..][&cause=..]`, each parameter
    /// percent-encoded. `data` is the JSON field-set, `cause` a JSON summary
    /// of the direct cause.
    pub fn help_url_with(&self, config: &HelpUrlConfig) -> String {
        let mut url = format!(
            "{}/0x{:x}?message={}",
            config.root(),
            self.code(),
            urlencoding::encode(&self.message)
        );

        if let Some(data) = self.data_json() {
            url.push_str("&data=");
            url.push_str(&urlencoding::encode(&data));
        }

        if let Some(cause) = &self.cause {
            if let Ok(json) = serde_json::to_string(&cause.summary(config)) {
                url.push_str("&cause=");
                url.push_str(&urlencoding::encode(&json));
            }
        }

        url
    }

    /// Serializable snapshot of the warning, help URL included.
    pub fn to_report(&self, config: &HelpUrlConfig) -> WarningReport {
        WarningReport {
            kind: self.kind,
            name: self.name(),
            code: self.code(),
            message: self.message.clone(),
            data: self.data.clone().filter(|d| !d.is_empty()),
            cause: self.cause.as_ref().map(|c| c.summary(config)),
            help_url: self.help_url_with(config),
        }
    }

    fn data_json(&self) -> Option<String> {
        let data = self.data.as_ref()?;
        serde_json::to_string(data).ok().filter(|json| json != "{}")
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [0x{:x}]: {}", self.name(), self.code(), self.message)
    }
}

impl error::Error for Warning {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.cause.as_ref().map(Cause::as_error)
    }
}

/// The direct cause of a warning: an earlier warning or any other error.
#[derive(Debug, Clone)]
pub enum Cause {
    Warning(Arc<Warning>),
    Error(Arc<dyn error::Error + Send + Sync>),
}

impl Cause {
    pub fn error(err: impl error::Error + Send + Sync + 'static) -> Self {
        Cause::Error(Arc::new(err))
    }

    pub fn name(&self) -> &str {
        match self {
            Cause::Warning(w) => w.name(),
            Cause::Error(_) => "Error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Cause::Warning(w) => w.message().to_string(),
            Cause::Error(e) => e.to_string(),
        }
    }

    /// Help URL recorded for the cause: only a warning that itself has a
    /// cause contributes its URL, everything else records `""`.
    pub fn help_url_with(&self, config: &HelpUrlConfig) -> String {
        match self {
            Cause::Warning(w) if Warning::cause(w).is_some() => w.help_url_with(config),
            _ => String::new(),
        }
    }

    pub fn summary(&self, config: &HelpUrlConfig) -> CauseSummary {
        CauseSummary {
            name: self.name().to_string(),
            message: self.message(),
            url: self.help_url_with(config),
        }
    }

    fn as_error(&self) -> &(dyn error::Error + 'static) {
        match self {
            Cause::Warning(w) => w.as_ref() as &(dyn error::Error + 'static),
            Cause::Error(e) => e.as_ref() as &(dyn error::Error + 'static),
        }
    }
}

impl From<Warning> for Cause {
    fn from(warning: Warning) -> Self {
        Cause::Warning(Arc::new(warning))
    }
}

impl From<Arc<Warning>> for Cause {
    fn from(warning: Arc<Warning>) -> Self {
        Cause::Warning(warning)
    }
}

/// JSON shape of a cause inside a help URL and a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CauseSummary {
    pub name: String,
    pub message: String,
    pub url: String,
}

/// Serializable view of a warning.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningReport {
    pub kind: WarningKind,
    pub name: &'static str,
    pub code: u32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<WarningInit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<CauseSummary>,
    pub help_url: String,
}

/// A warning described in JSON: a `kind`, an optional literal `message`, and
/// any field-set keys alongside them.
///
/// ```json
/// { "kind": "deprecation", "featureName": "fancyFetch", "since": "2.0" }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct WarningSpec {
    pub kind: WarningKind,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub init: WarningInit,
}

impl WarningSpec {
    /// Build the warning, following the same rules as the constructors: a
    /// literal message wins, otherwise the message is composed.
    pub fn into_warning(self) -> Warning {
        match (self.message, self.init.is_empty()) {
            (Some(message), true) => Warning::with_message(self.kind, message),
            (Some(message), false) => Warning::with_message_and_init(self.kind, message, self.init),
            (None, true) => Warning::new(self.kind),
            (None, false) => Warning::from_init(self.kind, self.init),
        }
    }

    /// Like [`WarningSpec::into_warning`], but rejects an empty literal
    /// message.
    pub fn try_into_warning(self) -> Result<Warning, WarnError> {
        if self.message.as_deref() == Some("") {
            return Err(WarnError::EmptyMessage);
        }
        Ok(self.into_warning())
    }
}

/// Parse a JSON array of [`WarningSpec`]s into warnings.
///
/// A literal `message` must not be empty.
pub fn parse_warnings(json: &str) -> Result<Vec<Warning>, WarnError> {
    let specs: Vec<WarningSpec> = serde_json::from_str(json)?;

    specs
        .into_iter()
        .enumerate()
        .map(|(index, spec)| {
            spec.try_into_warning()
                .map_err(|e| WarnError::InvalidSpec {
                    index,
                    message: e.to_string(),
                })
        })
        .collect()
}
