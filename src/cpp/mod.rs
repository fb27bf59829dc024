mod defaults;
mod enums;
mod object;
mod params;
mod streams;
mod types;

pub use crate::cpp::streams::Streams;

use indoc::indoc;

use document::Document;

use crate::Result;

const PRELUDE: &str = indoc!(
    "
    #pragma once

    #include <cstdint>
    #include <map>
    #include <optional>
    #include <string>
    #include <string_view>
    #include <vector>

    #include \"boost/url.hpp\"
    #include \"boost/json.hpp\"

    #include \"cista/reflection/comparable.h\"

    #include \"utl/verify.h\"

    #include \"openapi/date_time.h\"
    #include \"openapi/json.h\"
    #include \"openapi/parse.h\"

    "
);

fn write_prelude(ns: Option<&str>, out: &mut Streams) {
    out.decl().push_str(PRELUDE);
    if let Some(ns) = ns {
        let open = format!("namespace {} {{\n\n", ns);
        out.decl().push_str(&open);
        if out.is_split() {
            out.def().push_str(&open);
        }
    }
}

fn write_postlude(ns: Option<&str>, out: &mut Streams) {
    if let Some(ns) = ns {
        let close = format!("\n}}  // namespace {}\n", ns);
        out.decl().push_str(&close);
        if out.is_split() {
            out.def().push_str(&close);
        }
    }
}

/// One pass over the document: every named component schema in document
/// order, then every operation's parameter set and response schema.
pub fn write_types(doc: &Document, ns: Option<&str>, out: &mut Streams) -> Result<()> {
    write_prelude(ns, out);

    if let Some(components) = doc.root().opt("components") {
        if let Some(schemas) = components.opt("schemas") {
            for (name, schema) in schemas.entries()? {
                object::gen_type(name, doc, schema, out)?;
            }
        }
    }

    if let Some(paths) = doc.root().opt("paths") {
        for (_, path) in paths.entries()? {
            for (_, op) in path.entries()? {
                params::write_params(doc, op, out)?;

                if let Some(responses) = op.opt("responses") {
                    let op_id = op.get("operationId")?.as_str()?;
                    for (_, response) in responses.entries()? {
                        // no-body responses have nothing to emit
                        if let Some(content) = response.opt("content") {
                            let schema = content.get("application/json")?.get("schema")?;
                            let name = format!("{}_response", op_id);
                            if schema.opt("$ref").is_some() {
                                // the referenced type already exists; just name it
                                let alias = format!(
                                    "using {} = {};\n\n",
                                    name,
                                    types::type_expr(doc, &name, schema, true)?
                                );
                                out.decl().push_str(&alias);
                            } else {
                                object::gen_type(&name, doc, schema, out)?;
                            }
                        }
                    }
                }
            }
        }
    }

    write_postlude(ns, out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operation<'a>(doc: &'a Document, path: &str, method: &str) -> &'a document::node::Node {
        doc.root()
            .get("paths")
            .unwrap()
            .get(path)
            .unwrap()
            .get(method)
            .unwrap()
    }

    #[test]
    fn test_enum_param_golden() {
        let doc = Document::from_str(indoc!(
            "
            paths:
              /items:
                get:
                  operationId: sort
                  parameters:
                    - in: query
                      name: sort
                      description: Sort order
                      schema:
                        type: string
                        enum: [asc, desc]
                        default: asc

                    - in: query
                      name: min
                      schema:
                        type: integer
                        default: 0

                    - in: query
                      name: needle
                      schema:
                        type: string
                        default: \"needle\"
            "
        ))
        .unwrap();

        let mut out = Streams::combined();
        params::write_params(&doc, operation(&doc, "/items", "get"), &mut out).unwrap();

        let expected = indoc!(
            r#"
            enum class sortEnum {
              asc,
              desc
            };

            inline sortEnum tag_invoke(boost::json::value_to_tag<sortEnum>, boost::json::value const& jv) {
              static auto const lookup = std::map<std::string_view, sortEnum>{
                  {"asc", sortEnum::asc},
                  {"desc", sortEnum::desc}};
              auto const sv = std::string_view{jv.as_string()};
              auto const it = lookup.find(sv);
              if (it == lookup.end()) {
                throw utl::fail("enum sortEnum: unknown value {}", sv);
              }
              return it->second;
            }

            inline void tag_invoke(boost::json::value_from_tag, boost::json::value& jv, sortEnum const v) {
              switch (v) {
                case sortEnum::asc: jv = "asc"; return;
                case sortEnum::desc: jv = "desc"; return;
              }
              throw utl::fail("invalid sortEnum value {}", static_cast<int>(v));
            }

            struct sort_params {
              explicit sort_params(boost::urls::params_view const& params) :
                  sort_{::openapi::parse_param<sortEnum>(params, "sort", sortEnum::asc)},
                  min_{::openapi::parse_param<std::int64_t>(params, "min", 0)},
                  needle_{::openapi::parse_param<std::string>(params, "needle", "needle")}
              {}

              sortEnum sort_{};
              std::int64_t min_{};
              std::string needle_{};
            };

            "#
        );
        assert_eq!(expected, out.into_parts().0);
    }

    #[test]
    fn test_array_param_golden() {
        let doc = Document::from_str(indoc!(
            "
            paths:
              /items:
                get:
                  operationId: sort
                  parameters:
                    - name: mode
                      in: query
                      required: false
                      schema:
                        default: [WALK, TRANSIT]
                        type: array
                        items:
                          type: string
                          minItems: 1
                          enum:
                            - WALK
                            - TRANSIT
                      explode: false

                    - in: query
                      name: min
                      required: true
                      schema:
                        type: integer
            "
        ))
        .unwrap();

        let mut out = Streams::combined();
        params::write_params(&doc, operation(&doc, "/items", "get"), &mut out).unwrap();

        let expected = indoc!(
            r#"
            enum class modeEnum {
              WALK,
              TRANSIT
            };

            inline modeEnum tag_invoke(boost::json::value_to_tag<modeEnum>, boost::json::value const& jv) {
              static auto const lookup = std::map<std::string_view, modeEnum>{
                  {"WALK", modeEnum::WALK},
                  {"TRANSIT", modeEnum::TRANSIT}};
              auto const sv = std::string_view{jv.as_string()};
              auto const it = lookup.find(sv);
              if (it == lookup.end()) {
                throw utl::fail("enum modeEnum: unknown value {}", sv);
              }
              return it->second;
            }

            inline void tag_invoke(boost::json::value_from_tag, boost::json::value& jv, modeEnum const v) {
              switch (v) {
                case modeEnum::WALK: jv = "WALK"; return;
                case modeEnum::TRANSIT: jv = "TRANSIT"; return;
              }
              throw utl::fail("invalid modeEnum value {}", static_cast<int>(v));
            }

            struct sort_params {
              explicit sort_params(boost::urls::params_view const& params) :
                  mode_{::openapi::parse_param<std::vector<modeEnum>>(params, "mode", std::vector<modeEnum>{modeEnum::WALK,modeEnum::TRANSIT})},
                  min_{::openapi::parse_param<std::int64_t>(params, "min")}
              {}

              std::vector<modeEnum> mode_{};
              std::int64_t min_{};
            };

            "#
        );
        assert_eq!(expected, out.into_parts().0);
    }

    #[test]
    fn test_array_component_golden() {
        let doc = Document::from_str(indoc!(
            "
            components:
              schemas:
                Pets:
                  type: array
                  items:
                    type: string
                    enum: [A, B]
            "
        ))
        .unwrap();

        let mut out = Streams::combined();
        let schema = doc
            .root()
            .get("components")
            .unwrap()
            .get("schemas")
            .unwrap()
            .get("Pets")
            .unwrap();
        object::gen_type("Pets", &doc, schema, &mut out).unwrap();
        let code = out.into_parts().0;

        assert!(code.starts_with("enum class PetsEnum {\n  A,\n  B\n};\n\n"));
        assert!(code.ends_with("using Pets = std::vector<PetsEnum>;\n\n"));
        assert_eq!(1, code.matches("enum class PetsEnum").count());
    }

    #[test]
    fn test_object_golden() {
        let doc = Document::from_str(indoc!(
            "
            components:
              schemas:
                Status:
                  type: string
                  enum: [ACTIVE, RETIRED]
                Item:
                  type: object
                  required: [x]
                  properties:
                    x:
                      $ref: '#/components/schemas/Status'
                    z:
                      type: integer
            "
        ))
        .unwrap();

        let mut out = Streams::combined();
        let schema = doc
            .root()
            .get("components")
            .unwrap()
            .get("schemas")
            .unwrap()
            .get("Item")
            .unwrap();
        object::gen_type("Item", &doc, schema, &mut out).unwrap();

        let expected = indoc!(
            r#"
            struct Item {
              CISTA_FRIEND_COMPARABLE(Item)

              inline friend Item tag_invoke(boost::json::value_to_tag<Item>, boost::json::value const& jv) {
                auto v = Item{};
                openapi::extract_member(jv.as_object(), v.x_, "x");
                openapi::extract_member(jv.as_object(), v.z_, "z");
                return v;
              }

              inline friend void tag_invoke(boost::json::value_from_tag, boost::json::value& jv, Item const& v) {
                auto& o = (jv = boost::json::object{}).as_object();
                openapi::write_member(o, v.x_, "x");
                openapi::write_member(o, v.z_, "z");
              }

              StatusEnum x_{};
              std::optional<std::int64_t> z_{};
            };

            "#
        );
        assert_eq!(expected, out.into_parts().0);
    }

    const WHOLE_DOCUMENT: &str = indoc!(
        "
        components:
          schemas:
            Status:
              type: string
              enum: [ACTIVE, RETIRED]
            Item:
              type: object
              required: [x]
              properties:
                x:
                  $ref: '#/components/schemas/Status'
                z:
                  type: integer
        paths:
          /items:
            get:
              operationId: sort
              parameters:
                - in: query
                  name: sort
                  schema:
                    type: string
                    enum: [asc, desc]
                    default: asc
              responses:
                200:
                  content:
                    application/json:
                      schema:
                        $ref: '#/components/schemas/Item'
                204:
                  description: no content
        "
    );

    #[test]
    fn test_whole_document_combined() {
        let doc = Document::from_str(WHOLE_DOCUMENT).unwrap();
        let mut out = Streams::combined();
        write_types(&doc, Some("demo"), &mut out).unwrap();
        let (code, def) = out.into_parts();
        assert_eq!(None, def);

        assert!(code.starts_with("#pragma once\n"));
        assert!(code.contains("namespace demo {\n\n"));
        assert!(code.ends_with("\n}  // namespace demo\n"));

        // a referenced enum is emitted once, at its declaration site
        assert_eq!(1, code.matches("enum class StatusEnum").count());
        assert!(code.contains("  StatusEnum x_{};"));

        // document order: components first, then operations
        let item = code.find("struct Item {").unwrap();
        let params = code.find("struct sort_params {").unwrap();
        assert!(item < params);

        // reference-typed response becomes an alias, 204 emits nothing
        assert!(code.contains("using sort_response = Item;"));
        assert_eq!(1, code.matches("struct Item {").count());
    }

    #[test]
    fn test_idempotence() {
        let doc = Document::from_str(
            "components:\n  schemas:\n    Tag:\n      type: string\n",
        )
        .unwrap();

        let mut first = Streams::combined();
        write_types(&doc, Some("demo"), &mut first).unwrap();
        let mut second = Streams::combined();
        write_types(&doc, Some("demo"), &mut second).unwrap();

        assert_eq!(first.into_parts().0, second.into_parts().0);
    }

    #[test]
    fn test_split_streams_stay_consistent() {
        let doc = Document::from_str(indoc!(
            "
            components:
              schemas:
                Status:
                  type: string
                  enum: [ACTIVE, RETIRED]
                Item:
                  type: object
                  properties:
                    x:
                      $ref: '#/components/schemas/Status'
            paths:
              /items:
                get:
                  operationId: sort
                  parameters:
                    - in: query
                      name: min
                      schema:
                        type: integer
            "
        ))
        .unwrap();

        let mut out = Streams::split("types.h");
        write_types(&doc, Some("demo"), &mut out).unwrap();
        let (decl, def) = out.into_parts();
        let def = def.unwrap();

        assert!(decl.starts_with("#pragma once\n"));
        assert!(def.starts_with("#include \"types.h\"\n\n"));
        for code in [&decl, &def] {
            assert!(code.contains("namespace demo {\n\n"));
            assert!(code.ends_with("\n}  // namespace demo\n"));
        }

        // prototypes in the declarations stream, bodies in the other one
        assert!(decl.contains(
            "StatusEnum tag_invoke(boost::json::value_to_tag<StatusEnum>, boost::json::value const& jv);"
        ));
        assert!(!decl.contains("inline"));
        assert!(decl.contains("  friend Item tag_invoke(boost::json::value_to_tag<Item>, boost::json::value const& jv);"));
        assert!(decl.contains("  explicit sort_params(boost::urls::params_view const& params);"));
        assert!(def.contains("Item tag_invoke(boost::json::value_to_tag<Item>, boost::json::value const& jv) {"));
        assert!(def.contains("sort_params::sort_params(boost::urls::params_view const& params) :"));

        // both sinks interleave symbols in the same order
        let decl_order = [
            decl.find("enum class StatusEnum").unwrap(),
            decl.find("struct Item").unwrap(),
            decl.find("struct sort_params").unwrap(),
        ];
        let def_order = [
            def.find("value_to_tag<StatusEnum>").unwrap(),
            def.find("value_to_tag<Item>").unwrap(),
            def.find("sort_params::sort_params").unwrap(),
        ];
        assert!(decl_order[0] < decl_order[1] && decl_order[1] < decl_order[2]);
        assert!(def_order[0] < def_order[1] && def_order[1] < def_order[2]);
    }
}
