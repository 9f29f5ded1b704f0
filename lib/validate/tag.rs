//! Bundle tag validation.

use serde_json::{Map, Value};

use crate::bundle::{BundleTag, DeviceTag};
use crate::constants::{COMPANION_TAG, DEVICE_TAG};

use super::codes::{ErrorCode, WarningCode};
use super::result::{BundleTagError, ValidationIssue, ValidationResult};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const DEVICE_FIELDS: &[&str] = &["type", "family", "platform", "isNative"];

const COMPANION_FIELDS: &[&str] = &["type"];

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate the bundle tag attached to `file` and normalize it.
///
/// Every violated field is reported in the returned error. Warnings (ignored
/// fields, repeated platforms) are logged and otherwise dropped.
pub fn validate_bundle_tag(raw: &Value, file: &str) -> Result<BundleTag, BundleTagError> {
    let mut result = ValidationResult::default();
    let tag = check_bundle_tag(raw, file, &mut result);

    match tag {
        Some(tag) if result.is_valid() => {
            for warning in &result.warnings {
                tracing::warn!(file, code = %warning.code, "{}", warning.details);
            }
            Ok(tag)
        }
        _ => Err(BundleTagError {
            file: file.to_string(),
            issues: result.errors,
        }),
    }
}

/// Inspect the bundle tag attached to `file` and collect every error and warning.
pub fn inspect_bundle_tag(raw: &Value, file: &str) -> ValidationResult {
    let mut result = ValidationResult::default();
    check_bundle_tag(raw, file, &mut result);
    result
}

fn check_bundle_tag(raw: &Value, file: &str, result: &mut ValidationResult) -> Option<BundleTag> {
    let Some(fields) = raw.as_object() else {
        result.errors.push(ValidationIssue {
            code: ErrorCode::TagNotAnObject.into(),
            message: "bundle tag is not an object".into(),
            location: format!("{}:bundle", file),
            details: format!("expected an object, found {}", json_type(raw)),
            help: Some("attach `{ \"type\": \"device\" | \"companion\", ... }`".into()),
        });
        return None;
    };

    let kind = match fields.get("type") {
        None => {
            result.errors.push(ValidationIssue {
                code: ErrorCode::MissingBundleType.into(),
                message: "missing bundle type".into(),
                location: format!("{}:bundle", file),
                details: "field `type` is required".into(),
                help: Some(format!("set `type` to \"{}\" or \"{}\"", DEVICE_TAG, COMPANION_TAG)),
            });
            return None;
        }
        Some(Value::String(kind)) => kind.as_str(),
        Some(other) => {
            invalid_type(result, file, "type", "a string", other);
            return None;
        }
    };

    match kind {
        DEVICE_TAG => {
            unknown_fields(result, file, fields, DEVICE_FIELDS);
            check_device_tag(fields, file, result).map(BundleTag::Device)
        }
        COMPANION_TAG => {
            unknown_fields(result, file, fields, COMPANION_FIELDS);
            Some(BundleTag::Companion)
        }
        other => {
            result.errors.push(ValidationIssue {
                code: ErrorCode::UnknownBundleType.into(),
                message: "unknown bundle type".into(),
                location: format!("{}:bundle.type", file),
                details: format!("`{}` is not a bundle type", other),
                help: Some(format!("use \"{}\" or \"{}\"", DEVICE_TAG, COMPANION_TAG)),
            });
            None
        }
    }
}

fn check_device_tag(
    fields: &Map<String, Value>,
    file: &str,
    result: &mut ValidationResult,
) -> Option<DeviceTag> {
    let family = match fields.get("family") {
        None => {
            missing_field(result, file, "family");
            None
        }
        Some(Value::String(family)) if family.is_empty() => {
            result.errors.push(ValidationIssue {
                code: ErrorCode::EmptyFamily.into(),
                message: "empty device family".into(),
                location: format!("{}:bundle.family", file),
                details: "`family` must not be empty".into(),
                help: None,
            });
            None
        }
        Some(Value::String(family)) => Some(family.clone()),
        Some(other) => {
            invalid_type(result, file, "family", "a string", other);
            None
        }
    };

    let platform = match fields.get("platform") {
        None => {
            missing_field(result, file, "platform");
            None
        }
        Some(Value::Array(items)) => check_platforms(items, file, result),
        Some(other) => {
            invalid_type(result, file, "platform", "an array of strings", other);
            None
        }
    };

    let is_native = match fields.get("isNative") {
        None => Some(false),
        Some(Value::Bool(is_native)) => Some(*is_native),
        Some(other) => {
            invalid_type(result, file, "isNative", "a boolean", other);
            None
        }
    };

    Some(DeviceTag {
        family: family?,
        platform: platform?,
        is_native: is_native?,
    })
}

/// Collect platform names in declared order, dropping repeats.
fn check_platforms(items: &[Value], file: &str, result: &mut ValidationResult) -> Option<Vec<String>> {
    let mut platform: Vec<String> = Vec::with_capacity(items.len());
    let mut valid = true;

    for (i, item) in items.iter().enumerate() {
        match item {
            Value::String(name) if platform.contains(name) => {
                result.warnings.push(ValidationIssue {
                    code: WarningCode::DuplicatePlatform.into(),
                    message: "duplicate platform".into(),
                    location: format!("{}:bundle.platform[{}]", file, i),
                    details: format!("`{}` is listed more than once", name),
                    help: None,
                });
            }
            Value::String(name) => platform.push(name.clone()),
            other => {
                invalid_type(result, file, &format!("platform[{}]", i), "a string", other);
                valid = false;
            }
        }
    }

    valid.then_some(platform)
}

fn unknown_fields(
    result: &mut ValidationResult,
    file: &str,
    fields: &Map<String, Value>,
    known: &[&str],
) {
    for key in fields.keys().filter(|key| !known.contains(&key.as_str())) {
        result.warnings.push(ValidationIssue {
            code: WarningCode::UnknownField.into(),
            message: "unknown field".into(),
            location: format!("{}:bundle.{}", file, key),
            details: format!("field `{}` is ignored", key),
            help: None,
        });
    }
}

fn missing_field(result: &mut ValidationResult, file: &str, field: &str) {
    result.errors.push(ValidationIssue {
        code: ErrorCode::MissingRequiredField.into(),
        message: "missing required field".into(),
        location: format!("{}:bundle", file),
        details: format!("field `{}` is required", field),
        help: None,
    });
}

fn invalid_type(result: &mut ValidationResult, file: &str, field: &str, expected: &str, found: &Value) {
    result.errors.push(ValidationIssue {
        code: ErrorCode::InvalidFieldType.into(),
        message: "invalid field type".into(),
        location: format!("{}:bundle.{}", file, field),
        details: format!("`{}` must be {}, found {}", field, expected, json_type(found)),
        help: None,
    });
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
