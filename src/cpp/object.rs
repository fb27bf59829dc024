use indoc::indoc;
use tracing::debug;

use document::node::Node;
use document::Document;

use crate::cpp::enums::gen_enum;
use crate::cpp::streams::Streams;
use crate::cpp::types::{classify, property_required, type_expr, SemanticType};
use crate::Result;

/// Emits one named component schema: an enum takes precedence over any
/// other shape, objects become records, arrays and leaf kinds become
/// aliases. Reference nodes are never emitted as standalone types.
pub fn gen_type(name: &str, doc: &Document, schema: &Node, out: &mut Streams) -> Result<()> {
    debug!("generating type {}", name);

    if gen_enum(name, schema, out)? {
        return Ok(());
    }

    // inline enum types precede their use
    if let Some(properties) = schema.opt("properties") {
        for (prop_name, prop_schema) in properties.entries()? {
            match prop_schema.opt("items") {
                Some(items) => gen_enum(prop_name, items, out)?,
                None => gen_enum(prop_name, prop_schema, out)?,
            };
        }
    }

    match classify(schema)? {
        SemanticType::Object => gen_struct(name, doc, schema, out),
        SemanticType::Array => {
            gen_enum(name, schema.get("items")?, out)?;
            gen_alias(name, doc, schema, out)
        }
        _ => gen_alias(name, doc, schema, out),
    }
}

fn gen_alias(name: &str, doc: &Document, schema: &Node, out: &mut Streams) -> Result<()> {
    let code = format!("using {} = {};\n\n", name, type_expr(doc, name, schema, true)?);
    out.decl().push_str(&code);
    Ok(())
}

fn gen_struct(name: &str, doc: &Document, schema: &Node, out: &mut Streams) -> Result<()> {
    let mut extracts = vec![];
    let mut writes = vec![];
    let mut members = vec![];
    if let Some(properties) = schema.opt("properties") {
        for (prop_name, prop_schema) in properties.entries()? {
            let required = property_required(schema, prop_name, prop_schema)?;
            extracts.push(format!(
                "  openapi::extract_member(jv.as_object(), v.{}_, \"{}\");",
                prop_name, prop_name
            ));
            writes.push(format!(
                "  openapi::write_member(o, v.{}_, \"{}\");",
                prop_name, prop_name
            ));
            members.push(format!(
                "{} {}_{{}};",
                type_expr(doc, prop_name, prop_schema, required)?,
                prop_name
            ));
        }
    }

    let to_signature = format!(
        "#NAME tag_invoke(boost::json::value_to_tag<#NAME>, boost::json::value const& jv)"
    )
    .replace("#NAME", name);
    let to_body = indoc!(
        "
        {
          auto v = #NAME{};
        #EXTRACTS
          return v;
        }
        "
    )
    .replace("#NAME", name)
    .replace("#EXTRACTS", &extracts.join("\n"));

    let from_signature = format!(
        "void tag_invoke(boost::json::value_from_tag, boost::json::value& jv, {} const& v)",
        name
    );
    let from_body = indoc!(
        "
        {
          auto& o = (jv = boost::json::object{}).as_object();
        #WRITES
        }
        "
    )
    .replace("#WRITES", &writes.join("\n"));

    if out.is_split() {
        let code = indoc!(
            "
            struct #NAME {
              CISTA_FRIEND_COMPARABLE(#NAME)

              friend #TO_SIG;
              friend #FROM_SIG;

              #MEMBERS
            };

            "
        )
        .replace("#TO_SIG", &to_signature)
        .replace("#FROM_SIG", &from_signature)
        .replace("#MEMBERS", &members.join("\n  "))
        .replace("#NAME", name);
        out.decl().push_str(&code);

        out.define(&to_signature, &to_body);
        out.define(&from_signature, &from_body);
    } else {
        let code = indoc!(
            "
            struct #NAME {
              CISTA_FRIEND_COMPARABLE(#NAME)

              inline friend #TO_SIG #TO_BODY

              inline friend #FROM_SIG #FROM_BODY

              #MEMBERS
            };

            "
        )
        .replace("#TO_SIG", &to_signature)
        .replace("#TO_BODY", &indent_block(&to_body))
        .replace("#FROM_SIG", &from_signature)
        .replace("#FROM_BODY", &indent_block(&from_body))
        .replace("#MEMBERS", &members.join("\n  "))
        .replace("#NAME", name);
        out.decl().push_str(&code);
    }

    Ok(())
}

// namespace-scope function block reindented for in-class placement
fn indent_block(block: &str) -> String {
    block.trim_end().replace("\n", "\n  ")
}
