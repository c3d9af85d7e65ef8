//! Validation framework for implementation configuration tables.
//!
//! Pluggable implementations (an accounts source, a deployment transport)
//! describe the TOML table they accept with a [`Schema`] and expose it via
//! [`ConfigSchema`]; the factory validates the table before constructing
//! the implementation, so misconfiguration fails at startup with a field
//! path instead of surfacing mid-run.

use async_trait::async_trait;
use thiserror::Error;

/// Errors produced while validating a configuration table.
#[derive(Debug, Error)]
pub enum ValidationError {
	#[error("Missing required field: {0}")]
	MissingField(String),
	#[error("Invalid value for field '{field}': {message}")]
	InvalidValue { field: String, message: String },
	#[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
	TypeMismatch {
		field: String,
		expected: String,
		actual: String,
	},
}

/// Expected type of one configuration field.
#[derive(Debug)]
pub enum FieldType {
	/// A string value.
	String,
	/// An integer with optional inclusive bounds.
	Integer { min: Option<i64>, max: Option<i64> },
	/// A boolean value.
	Boolean,
	/// A nested table validated by its own schema.
	Table(Schema),
}

/// Custom per-field check run after type validation.
pub type FieldValidator = Box<dyn Fn(&toml::Value) -> Result<(), String> + Send + Sync>;

/// One named field in a schema, with its type and an optional custom check.
pub struct Field {
	pub name: String,
	pub field_type: FieldType,
	pub validator: Option<FieldValidator>,
}

impl std::fmt::Debug for Field {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("field_type", &self.field_type)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl Field {
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			validator: None,
		}
	}

	/// Attaches a custom check beyond the type match, for constraints the
	/// type system cannot express (address formats, bounded ranges over
	/// dynamic keys).
	pub fn with_validator<F>(mut self, validator: F) -> Self
	where
		F: Fn(&toml::Value) -> Result<(), String> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(validator));
		self
	}
}

/// Required and optional fields of one configuration table.
///
/// Schemas nest through [`FieldType::Table`]; errors from nested tables
/// carry the dotted path of the offending field.
#[derive(Debug)]
pub struct Schema {
	pub required: Vec<Field>,
	pub optional: Vec<Field>,
}

impl Schema {
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Checks required-field presence, field types, and custom validators,
	/// recursing into nested tables.
	pub fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let table = config
			.as_table()
			.ok_or_else(|| ValidationError::TypeMismatch {
				field: "root".to_string(),
				expected: "table".to_string(),
				actual: config.type_str().to_string(),
			})?;

		for field in &self.required {
			let value = table
				.get(&field.name)
				.ok_or_else(|| ValidationError::MissingField(field.name.clone()))?;

			validate_field_type(&field.name, value, &field.field_type)?;

			if let Some(validator) = &field.validator {
				validator(value).map_err(|msg| ValidationError::InvalidValue {
					field: field.name.clone(),
					message: msg,
				})?;
			}
		}

		for field in &self.optional {
			if let Some(value) = table.get(&field.name) {
				validate_field_type(&field.name, value, &field.field_type)?;

				if let Some(validator) = &field.validator {
					validator(value).map_err(|msg| ValidationError::InvalidValue {
						field: field.name.clone(),
						message: msg,
					})?;
				}
			}
		}

		Ok(())
	}
}

fn validate_field_type(
	field_name: &str,
	value: &toml::Value,
	expected_type: &FieldType,
) -> Result<(), ValidationError> {
	match expected_type {
		FieldType::String => {
			if !value.is_str() {
				return Err(ValidationError::TypeMismatch {
					field: field_name.to_string(),
					expected: "string".to_string(),
					actual: value.type_str().to_string(),
				});
			}
		},
		FieldType::Integer { min, max } => {
			let int_val = value
				.as_integer()
				.ok_or_else(|| ValidationError::TypeMismatch {
					field: field_name.to_string(),
					expected: "integer".to_string(),
					actual: value.type_str().to_string(),
				})?;

			if let Some(min_val) = min {
				if int_val < *min_val {
					return Err(ValidationError::InvalidValue {
						field: field_name.to_string(),
						message: format!("Value {} is less than minimum {}", int_val, min_val),
					});
				}
			}

			if let Some(max_val) = max {
				if int_val > *max_val {
					return Err(ValidationError::InvalidValue {
						field: field_name.to_string(),
						message: format!("Value {} is greater than maximum {}", int_val, max_val),
					});
				}
			}
		},
		FieldType::Boolean => {
			if !value.is_bool() {
				return Err(ValidationError::TypeMismatch {
					field: field_name.to_string(),
					expected: "boolean".to_string(),
					actual: value.type_str().to_string(),
				});
			}
		},
		FieldType::Table(schema) => {
			// Prefix nested errors with this field's name so the reported
			// path leads to the offending entry.
			schema.validate(value).map_err(|e| match e {
				ValidationError::MissingField(f) => {
					ValidationError::MissingField(format!("{}.{}", field_name, f))
				},
				ValidationError::InvalidValue { field, message } => ValidationError::InvalidValue {
					field: format!("{}.{}", field_name, field),
					message,
				},
				ValidationError::TypeMismatch {
					field,
					expected,
					actual,
				} => ValidationError::TypeMismatch {
					field: format!("{}.{}", field_name, field),
					expected,
					actual,
				},
			})?;
		},
	}

	Ok(())
}

/// Schema exposed by a pluggable implementation for its own config table.
#[async_trait]
pub trait ConfigSchema: Send + Sync {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_missing_required_field() {
		let schema = Schema::new(vec![Field::new("rpc_url", FieldType::String)], vec![]);

		let config = toml::from_str(r#"other = "value""#).unwrap();
		let result = schema.validate(&config);

		if let ValidationError::MissingField(field) = result.unwrap_err() {
			assert_eq!(field, "rpc_url");
		} else {
			panic!("Expected MissingField error");
		}
	}

	#[test]
	fn test_string_field_type() {
		let schema = Schema::new(vec![Field::new("name", FieldType::String)], vec![]);

		let valid = toml::from_str(r#"name = "UniswapV2Factory""#).unwrap();
		assert!(schema.validate(&valid).is_ok());

		let invalid = toml::from_str(r#"name = 123"#).unwrap();
		assert!(matches!(
			schema.validate(&invalid).unwrap_err(),
			ValidationError::TypeMismatch { .. }
		));
	}

	#[test]
	fn test_integer_bounds() {
		let schema = Schema::new(
			vec![Field::new(
				"min_confirmations",
				FieldType::Integer {
					min: Some(1),
					max: Some(64),
				},
			)],
			vec![],
		);

		let valid = toml::from_str(r#"min_confirmations = 3"#).unwrap();
		assert!(schema.validate(&valid).is_ok());

		let too_small = toml::from_str(r#"min_confirmations = 0"#).unwrap();
		assert!(matches!(
			schema.validate(&too_small).unwrap_err(),
			ValidationError::InvalidValue { .. }
		));

		let too_large = toml::from_str(r#"min_confirmations = 100"#).unwrap();
		assert!(matches!(
			schema.validate(&too_large).unwrap_err(),
			ValidationError::InvalidValue { .. }
		));
	}

	#[test]
	fn test_boolean_field_type() {
		let schema = Schema::new(vec![], vec![Field::new("log", FieldType::Boolean)]);

		let valid = toml::from_str(r#"log = true"#).unwrap();
		assert!(schema.validate(&valid).is_ok());

		let invalid = toml::from_str(r#"log = "yes""#).unwrap();
		assert!(matches!(
			schema.validate(&invalid).unwrap_err(),
			ValidationError::TypeMismatch { .. }
		));
	}

	#[test]
	fn test_optional_field_absent_is_ok() {
		let schema = Schema::new(
			vec![Field::new("artifacts_dir", FieldType::String)],
			vec![Field::new(
				"transaction_timeout_seconds",
				FieldType::Integer {
					min: Some(1),
					max: None,
				},
			)],
		);

		let config = toml::from_str(r#"artifacts_dir = "artifacts""#).unwrap();
		assert!(schema.validate(&config).is_ok());
	}

	#[test]
	fn test_custom_validator_failure_reports_field() {
		let field = Field::new("address", FieldType::String).with_validator(|value| {
			let s = value.as_str().unwrap_or_default();
			if s.starts_with("0x") {
				Ok(())
			} else {
				Err("must start with 0x".to_string())
			}
		});

		let schema = Schema::new(vec![field], vec![]);
		let config = toml::from_str(r#"address = "deadbeef""#).unwrap();

		if let ValidationError::InvalidValue { field, message } = schema.validate(&config).unwrap_err()
		{
			assert_eq!(field, "address");
			assert_eq!(message, "must start with 0x");
		} else {
			panic!("Expected InvalidValue error");
		}
	}

	#[test]
	fn test_nested_table_error_path() {
		let named_schema = Schema::new(vec![Field::new("deployer", FieldType::String)], vec![]);
		let schema = Schema::new(
			vec![Field::new("named", FieldType::Table(named_schema))],
			vec![],
		);

		let config = toml::from_str(
			r#"
			[named]
			admin = "0x0000000000000000000000000000000000000001"
			"#,
		)
		.unwrap();

		if let ValidationError::MissingField(field) = schema.validate(&config).unwrap_err() {
			assert_eq!(field, "named.deployer");
		} else {
			panic!("Expected MissingField error with nested path");
		}
	}

	#[test]
	fn test_non_table_root_rejected() {
		let schema = Schema::new(vec![], vec![]);
		let result = schema.validate(&toml::Value::String("not a table".to_string()));
		assert!(matches!(
			result.unwrap_err(),
			ValidationError::TypeMismatch { .. }
		));
	}
}
