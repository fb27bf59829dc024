use getset::Getters;
use indoc::indoc;

use document::node::Node;

use crate::cpp::streams::Streams;
use crate::Result;

#[derive(Constructor, Clone, Getters, Debug, PartialEq)]
#[get]
struct EnumSpec {
    name: String,
    tags: Vec<String>,
}

/// Emits the tagged type plus both conversion directions for a schema
/// carrying a closed value set. Returns false without writing anything
/// for reference nodes (the enum is emitted once, at its definition
/// site) and for schemas without an `enum`.
pub fn gen_enum(name: &str, schema: &Node, out: &mut Streams) -> Result<bool> {
    if schema.opt("$ref").is_some() {
        return Ok(false);
    }
    let tags_node = match schema.opt("enum") {
        Some(tags) => tags,
        None => return Ok(false),
    };

    let mut tags = vec![];
    for tag in tags_node.items()? {
        tags.push(tag.as_str()?.to_string());
    }
    let spec = EnumSpec::new(format!("{}Enum", name), tags);

    gen_decl(&spec, out);
    gen_to_tag(&spec, out);
    gen_from_tag(&spec, out);
    Ok(true)
}

fn gen_decl(spec: &EnumSpec, out: &mut Streams) {
    let code = indoc!(
        "
        enum class #NAME {
          #TAGS
        };

        "
    )
    .replace("#NAME", spec.name())
    .replace("#TAGS", &spec.tags().join(",\n  "));
    out.decl().push_str(&code);
}

// Text -> tag goes through an explicit lookup table built once per enum;
// a miss names both the enum and the offending text.
fn gen_to_tag(spec: &EnumSpec, out: &mut Streams) {
    let signature = format!(
        "#NAME tag_invoke(boost::json::value_to_tag<#NAME>, boost::json::value const& jv)"
    )
    .replace("#NAME", spec.name());

    let entries = spec
        .tags()
        .iter()
        .map(|tag| format!("{{\"{}\", {}::{}}}", tag, spec.name(), tag))
        .collect::<Vec<String>>()
        .join(",\n      ");

    let body = indoc!(
        r#"
        {
          static auto const lookup = std::map<std::string_view, #NAME>{
              #ENTRIES};
          auto const sv = std::string_view{jv.as_string()};
          auto const it = lookup.find(sv);
          if (it == lookup.end()) {
            throw utl::fail("enum #NAME: unknown value {}", sv);
          }
          return it->second;
        }
        "#
    )
    .replace("#NAME", spec.name())
    .replace("#ENTRIES", &entries);

    out.function(&signature, &body);
}

// Tag -> text is an exhaustive switch; falling out of it means a value
// outside the declared set, which throws instead of hitting UB.
fn gen_from_tag(spec: &EnumSpec, out: &mut Streams) {
    let signature = format!(
        "void tag_invoke(boost::json::value_from_tag, boost::json::value& jv, {} const v)",
        spec.name()
    );

    let cases = spec
        .tags()
        .iter()
        .map(|tag| format!("    case {}::{}: jv = \"{}\"; return;", spec.name(), tag, tag))
        .collect::<Vec<String>>()
        .join("\n");

    let body = indoc!(
        r#"
        {
          switch (v) {
        #CASES
          }
          throw utl::fail("invalid #NAME value {}", static_cast<int>(v));
        }
        "#
    )
    .replace("#NAME", spec.name())
    .replace("#CASES", &cases);

    out.function(&signature, &body);
}
