use document::node::Node;
use document::Document;

use crate::{Error, Result};

const REF_PREFIX: &str = "#/components/schemas/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SemanticType {
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
    Date,
}

/// Maps a schema's declared kind (and, for strings, the format
/// qualifier) to a semantic type.
pub fn classify(schema: &Node) -> Result<SemanticType> {
    let declared = schema.get("type")?.as_str()?;
    match declared {
        "boolean" => Ok(SemanticType::Boolean),
        "integer" => Ok(SemanticType::Integer),
        "number" => Ok(SemanticType::Number),
        "string" => match schema.opt("format") {
            None => Ok(SemanticType::String),
            Some(qualifier) => match qualifier.as_str()? {
                "date-time" => Ok(SemanticType::Date),
                other => Err(Error::UnknownType(format!("{} ({})", declared, other))),
            },
        },
        "array" => Ok(SemanticType::Array),
        "object" => Ok(SemanticType::Object),
        _ => Err(Error::UnknownType(declared.to_string())),
    }
}

pub fn spelling(t: SemanticType) -> &'static str {
    match t {
        SemanticType::Boolean => "bool",
        SemanticType::Integer => "std::int64_t",
        SemanticType::Number => "double",
        SemanticType::String => "std::string",
        SemanticType::Array => "std::vector",
        SemanticType::Object => "std::map<std::string, std::string>",
        SemanticType::Date => "openapi::date_time_t",
    }
}

pub fn ref_name(reference: &str) -> Result<&str> {
    reference
        .strip_prefix(REF_PREFIX)
        .ok_or_else(|| Error::UnresolvedReference(reference.to_string()))
}

/// Follows a `$ref` into the component registry; non-reference nodes are
/// returned unchanged. Every emitter resolves before branching on kind.
pub fn resolve<'a>(doc: &'a Document, schema: &'a Node) -> Result<&'a Node> {
    let reference = match schema.opt("$ref") {
        Some(r) => r.as_str()?,
        None => return Ok(schema),
    };
    let name = ref_name(reference)?;
    doc.root()
        .opt("components")
        .and_then(|components| components.opt("schemas"))
        .and_then(|schemas| schemas.opt(name))
        .ok_or_else(|| Error::UnresolvedReference(reference.to_string()))
}

/// The full declared type for a schema in the scope `name`. A field is
/// optional-wrapped only if it is neither required nor defaulted: a
/// default always yields a value.
pub fn type_expr(doc: &Document, name: &str, schema: &Node, required: bool) -> Result<String> {
    let has_default = schema.opt("default").is_some();

    if let Some(reference) = schema.opt("$ref") {
        let suffix = match resolve(doc, schema)?.opt("enum") {
            Some(_) => "Enum",
            None => "",
        };
        let t = format!("{}{}", ref_name(reference.as_str()?)?, suffix);
        return Ok(wrap_optional(t, required, has_default));
    }

    let t = match schema.opt("enum") {
        Some(_) => format!("{}Enum", name),
        None => spelling(classify(schema)?).to_string(),
    };

    let t = match schema.opt("items") {
        Some(items) => format!("{}<{}>", t, type_expr(doc, name, items, true)?),
        None => t,
    };

    Ok(wrap_optional(t, required, has_default))
}

fn wrap_optional(t: String, required: bool, has_default: bool) -> String {
    if required || has_default {
        t
    } else {
        format!("std::optional<{}>", t)
    }
}

/// Parameter-scope required flag: a plain boolean.
pub fn is_required(node: &Node) -> Result<bool> {
    match node.opt("required") {
        Some(flag) => Ok(flag.as_bool()?),
        None => Ok(false),
    }
}

/// Object-scope required-ness: member of the enclosing `required` name
/// list, or a boolean `required` flag on the property schema itself. A
/// sequence-shaped key on the property belongs to a nested object and is
/// never read as a flag.
pub fn property_required(
    object_schema: &Node,
    name: &str,
    prop_schema: &Node,
) -> Result<bool> {
    if in_required_list(object_schema, name)? {
        return Ok(true);
    }
    match prop_schema.opt("required") {
        Some(flag) => Ok(flag.as_bool().unwrap_or(false)),
        None => Ok(false),
    }
}

fn in_required_list(object_schema: &Node, name: &str) -> Result<bool> {
    match object_schema.opt("required") {
        Some(list) => {
            for entry in list.items()? {
                if entry.as_str()? == name {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        None => Ok(false),
    }
}
