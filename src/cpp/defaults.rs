use document::node::Node;
use document::Document;

use crate::cpp::types::{classify, ref_name, resolve, type_expr, SemanticType};
use crate::date_time::DateTime;
use crate::{Error, Result};

/// Renders a schema's declared default as a C++ literal expression.
/// References render under the referenced scope name so enum tags line
/// up with where the enum type was declared.
pub fn render_default(doc: &Document, name: &str, schema: &Node, value: &Node) -> Result<String> {
    if let Some(reference) = schema.opt("$ref") {
        let referenced = resolve(doc, schema)?;
        return render_default(doc, ref_name(reference.as_str()?)?, referenced, value);
    }

    if schema.opt("enum").is_some() {
        let tag = value
            .as_str()
            .map_err(|_| malformed(name, "enum default must be a scalar tag"))?;
        return Ok(format!("{}Enum::{}", name, tag));
    }

    match classify(schema)? {
        SemanticType::Array => {
            let item_schema = schema.get("items")?;
            let items = value
                .items()
                .map_err(|_| malformed(name, "array default must be a sequence"))?;
            let mut rendered = vec![];
            for item in items {
                rendered.push(render_default(doc, name, item_schema, item)?);
            }
            Ok(format!(
                "{}{{{}}}",
                type_expr(doc, name, schema, true)?,
                rendered.join(",")
            ))
        }
        SemanticType::String => {
            let text = value
                .as_str()
                .map_err(|_| malformed(name, "string default must be a scalar"))?;
            Ok(format!("\"{}\"", text))
        }
        SemanticType::Date => {
            let text = value
                .as_str()
                .map_err(|_| malformed(name, "date-time default must be a scalar"))?;
            let parsed = DateTime::parse(text)
                .map_err(|_| malformed(name, "date-time default matches no accepted layout"))?;
            Ok(format!("openapi::date_time_t{{\"{}\"}}", parsed))
        }
        _ => value
            .as_str()
            .map(str::to_string)
            .map_err(|_| malformed(name, "default must be a scalar")),
    }
}

fn malformed(name: &str, reason: &str) -> Error {
    Error::MalformedDefault {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
