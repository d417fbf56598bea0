//! JSON extractor that runs `validator` rules after deserializing.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use super::Json;
use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "itportal_server::extract::validate";

/// Deserializes a JSON body and validates it before the handler runs.
///
/// Validation failures are rendered as a 400 whose message names every
/// failing field, so invalid requests never reach the database.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self::new(data))
    }
}

type Params = HashMap<Cow<'static, str>, serde_json::Value>;

fn bound(params: &Params, key: &str) -> Option<u64> {
    params.get(key).and_then(serde_json::Value::as_u64)
}

fn describe_length(field: &str, params: &Params) -> String {
    let unit = if field.ends_with('s') && !field.contains("status") {
        "items"
    } else {
        "characters"
    };

    match (bound(params, "min"), bound(params, "max")) {
        (Some(1), None) if unit == "items" => format!("Field '{field}' must not be empty"),
        (Some(min), Some(max)) => {
            format!("Field '{field}' must be between {min} and {max} {unit} long")
        }
        (Some(min), None) => format!("Field '{field}' must be at least {min} {unit} long"),
        (None, Some(max)) => format!("Field '{field}' must be at most {max} {unit} long"),
        _ => format!("Field '{field}' has invalid length"),
    }
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return format!("Field '{field}': {message}");
    }

    match error.code.as_ref() {
        "length" => describe_length(field, &error.params),
        "required" => format!("Field '{field}' is required"),
        "email" => format!("Field '{field}' must be a valid email address"),
        "range" => format!("Field '{field}' is out of range"),
        code => format!("Field '{field}' failed validation: {code}"),
    }
}

/// Flattens nested and list errors into `parent[index].field` paths.
fn collect(prefix: Option<&str>, errors: &ValidationErrors, out: &mut Vec<String>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(errors) => {
                out.extend(errors.iter().map(|error| describe(&path, error)));
            }
            ValidationErrorsKind::Struct(nested) => collect(Some(&path), nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(Some(&format!("{path}[{index}]")), nested, out);
                }
            }
        }
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect(None, &errors, &mut messages);

        tracing::warn!(
            target: TRACING_TARGET,
            errors = ?messages,
            "request validation failed"
        );

        let message = match messages.as_slice() {
            [] => "Validation failed".to_owned(),
            [single] => single.clone(),
            multiple => multiple.join(". "),
        };

        ErrorKind::BadRequest
            .with_message(message)
            .with_resource("request")
    }
}

impl<T> aide::OperationInput for ValidateJson<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        Json::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        Json::<T>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 1))]
        ids: Vec<i64>,
        #[validate(length(min = 8))]
        password: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn messages_name_each_field() {
        let sample = Sample {
            ids: Vec::new(),
            password: "short".to_owned(),
            email: "nope".to_owned(),
        };

        let errors = sample.validate().err();
        let error = Error::from(errors.unwrap_or_default());

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(
            error.message(),
            Some(
                "Field 'email' must be a valid email address. \
                 Field 'ids' must not be empty. \
                 Field 'password' must be at least 8 characters long"
            )
        );
    }

    #[test]
    fn custom_messages_are_kept() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "type",
            ValidationError::new("transfer_target").with_message("must be TSA, TSM or Manager".into()),
        );

        let error = Error::from(errors);
        assert_eq!(error.message(), Some("Field 'type': must be TSA, TSM or Manager"));
        assert_eq!(error.resource(), Some("request"));
    }
}
