use getset::Getters;
use tracing::debug;

use document::node::Node;
use document::Document;

use crate::cpp::defaults::render_default;
use crate::cpp::enums::gen_enum;
use crate::cpp::streams::Streams;
use crate::cpp::types::{is_required, type_expr};
use crate::Result;

#[derive(Constructor, Clone, Getters, Debug, PartialEq)]
#[get]
struct ParamSpec {
    name: String,
    cpp_type: String,
    init: String,
}

/// Emits the `{operationId}_params` record: every member is initialized
/// by looking up the like-named query parameter, with the schema default
/// handed to the lookup when one is declared.
pub fn write_params(doc: &Document, op: &Node, out: &mut Streams) -> Result<()> {
    let mut specs = vec![];
    if let Some(parameters) = op.opt("parameters") {
        for p in parameters.items()? {
            let name = p.get("name")?.as_str()?;
            let schema = p.get("schema")?;

            match schema.opt("items") {
                Some(items) => gen_enum(name, items, out)?,
                None => gen_enum(name, schema, out)?,
            };

            let cpp_type = type_expr(doc, name, schema, is_required(p)?)?;
            let init = member_init(doc, name, &cpp_type, schema)?;
            specs.push(ParamSpec::new(name.to_string(), cpp_type, init));
        }
    }

    let op_id = op.get("operationId")?.as_str()?;
    debug!("generating params for operation {}", op_id);
    let struct_name = format!("{}_params", op_id);
    let signature = format!(
        "{}(boost::urls::params_view const& params)",
        struct_name
    );

    if out.is_split() {
        let mut decl = format!("struct {} {{\n", struct_name);
        decl.push_str(&format!("  explicit {};\n\n", signature));
        for spec in &specs {
            decl.push_str(&format!("  {} {}_{{}};\n", spec.cpp_type(), spec.name()));
        }
        decl.push_str("};\n\n");
        out.decl().push_str(&decl);

        let mut def = format!("{}::{}", struct_name, signature);
        if !specs.is_empty() {
            def.push_str(" :\n    ");
            def.push_str(&join_inits(&specs, ",\n    "));
        }
        def.push_str("\n{}\n\n");
        out.def().push_str(&def);
    } else {
        let mut code = format!("struct {} {{\n", struct_name);
        code.push_str(&format!("  explicit {}", signature));
        if !specs.is_empty() {
            code.push_str(" :\n      ");
            code.push_str(&join_inits(&specs, ",\n      "));
        }
        code.push_str("\n  {}\n\n");
        for spec in &specs {
            code.push_str(&format!("  {} {}_{{}};\n", spec.cpp_type(), spec.name()));
        }
        code.push_str("};\n\n");
        out.decl().push_str(&code);
    }

    Ok(())
}

fn join_inits(specs: &[ParamSpec], separator: &str) -> String {
    specs
        .iter()
        .map(|spec| spec.init().clone())
        .collect::<Vec<String>>()
        .join(separator)
}

fn member_init(doc: &Document, name: &str, cpp_type: &str, schema: &Node) -> Result<String> {
    let mut init = format!(
        "{}_{{::openapi::parse_param<{}>(params, \"{}\"",
        name, cpp_type, name
    );
    if let Some(default_value) = schema.opt("default") {
        init.push_str(", ");
        init.push_str(&render_default(doc, name, schema, default_value)?);
    }
    init.push_str(")}");
    Ok(init)
}
