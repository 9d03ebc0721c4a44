//! Message composition from structured warning fields.
//!
//! Each kind recognises a subset of [`Field`]s. The composer maps every
//! combination of present fields to exactly one sentence:
//!
//! | featureName | featureType | main clause                      |
//! |-------------|-------------|----------------------------------|
//! | yes         | yes         | `The {type} "{name}" {verb}.`    |
//! | no          | yes         | `A {type} {verb}.`               |
//! | yes         | no          | `The feature "{name}" {verb}.`   |
//! | no          | no          | `A feature {verb}.`              |
//!
//! followed by ` Instead use "{alt}".` and ` Read more at {url}.` whenever
//! those fields are present and recognised. Empty strings count as absent.

use crate::kind::WarningKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The structured fields a caller may supply instead of (or alongside) a
/// literal message.
///
/// Keys outside the recognised schema are kept in `extra` and surface as
/// auxiliary data on the warning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningInit {
    /// The name of the affected feature (e.g. `api.query`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_name: Option<String>,
    /// The type of the affected feature (e.g. `function`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_type: Option<String>,
    /// A feature to use in place of a deprecated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_feature_name: Option<String>,
    /// A URL pointing to a resource covering the warning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_url: Option<String>,
    /// Free-form caller data.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WarningInit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feature_name(mut self, name: impl Into<String>) -> Self {
        self.feature_name = Some(name.into());
        self
    }

    pub fn feature_type(mut self, ty: impl Into<String>) -> Self {
        self.feature_type = Some(ty.into());
        self
    }

    pub fn alternative_feature_name(mut self, name: impl Into<String>) -> Self {
        self.alternative_feature_name = Some(name.into());
        self
    }

    pub fn about_url(mut self, url: impl Into<String>) -> Self {
        self.about_url = Some(url.into());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Value of a recognised field, or `None` when it is missing or empty.
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::FeatureName => &self.feature_name,
            Field::FeatureType => &self.feature_type,
            Field::AlternativeFeatureName => &self.alternative_feature_name,
            Field::AboutUrl => &self.about_url,
        };
        value.as_deref().filter(|s| !s.is_empty())
    }

    /// True when nothing, not even extra data, was supplied.
    pub fn is_empty(&self) -> bool {
        self.feature_name.is_none()
            && self.feature_type.is_none()
            && self.alternative_feature_name.is_none()
            && self.about_url.is_none()
            && self.extra.is_empty()
    }
}

/// A named attribute that may influence a composed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FeatureName,
    FeatureType,
    AlternativeFeatureName,
    AboutUrl,
}

/// Fields each kind takes into account when composing.
pub const fn recognized_fields(kind: WarningKind) -> &'static [Field] {
    match kind {
        WarningKind::Base => &[Field::AboutUrl],
        WarningKind::PendingDeprecation | WarningKind::Stability => {
            &[Field::FeatureName, Field::FeatureType, Field::AboutUrl]
        }
        WarningKind::Deprecation => &[
            Field::FeatureName,
            Field::FeatureType,
            Field::AlternativeFeatureName,
            Field::AboutUrl,
        ],
    }
}

/// Predicate of the main clause, `None` for kinds without a feature subject.
const fn verb(kind: WarningKind) -> Option<&'static str> {
    match kind {
        WarningKind::Base => None,
        WarningKind::PendingDeprecation => Some("is pending deprecation"),
        WarningKind::Deprecation => Some("has been deprecated"),
        WarningKind::Stability => {
            Some("is unstable and should not be used in production environments")
        }
    }
}

/// Compose the canonical message for `kind` from the fields in `init`.
///
/// Pure and total: every combination of present fields yields exactly one
/// non-empty sentence, and an empty `init` yields the kind's default message.
pub fn compose(kind: WarningKind, init: &WarningInit) -> String {
    let recognized = recognized_fields(kind);
    let field = |f: Field| {
        if recognized.contains(&f) {
            init.get(f)
        } else {
            None
        }
    };

    let mut message = match verb(kind) {
        None => kind.default_message().to_string(),
        Some(verb) => match (field(Field::FeatureName), field(Field::FeatureType)) {
            (Some(name), Some(ty)) => format!("The {ty} \"{name}\" {verb}."),
            (None, Some(ty)) => format!("A {ty} {verb}."),
            (Some(name), None) => format!("The feature \"{name}\" {verb}."),
            (None, None) => kind.default_message().to_string(),
        },
    };

    if let Some(alt) = field(Field::AlternativeFeatureName) {
        message.push_str(&format!(" Instead use \"{alt}\"."));
    }
    if let Some(url) = field(Field::AboutUrl) {
        message.push_str(&format!(" Read more at {url}."));
    }

    message
}
