use serde_json::Value;

use crate::DataFormat;
use crate::InputContext;
use crate::P2Error;
use crate::P2Result;

/// Decode JSON or YAML input into a context. The top level must be a mapping;
/// nested values keep the structure the decoder produced.
pub fn parse_structured(bytes: &[u8], format: DataFormat) -> P2Result<InputContext> {
	let value: Value = match format {
		DataFormat::Json => {
			serde_json::from_slice(bytes).map_err(|e| {
				P2Error::Decode {
					format,
					reason: e.to_string(),
				}
			})?
		}
		DataFormat::Yaml => {
			let content = std::str::from_utf8(bytes).map_err(|e| {
				P2Error::Decode {
					format,
					reason: e.to_string(),
				}
			})?;
			serde_yaml_ng::from_str(content).map_err(|e| {
				P2Error::Decode {
					format,
					reason: e.to_string(),
				}
			})?
		}
		DataFormat::Env => return crate::parse_env_buffer(bytes),
	};

	match value {
		Value::Object(map) => Ok(InputContext::from(map)),
		// An empty YAML document has no top level value at all.
		Value::Null if format == DataFormat::Yaml => Ok(InputContext::default()),
		other => {
			Err(P2Error::NotAMapping {
				format,
				found: value_kind(&other),
			})
		}
	}
}

fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "a sequence",
		Value::Object(_) => "a mapping",
	}
}
