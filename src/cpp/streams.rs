/// Two append-only sinks driven by one traversal. In combined mode
/// everything lands in the declarations buffer and free functions carry
/// `inline`; in split mode prototypes stay in the declarations buffer
/// while definitions go to the second one, in traversal order.
pub struct Streams {
    decl: String,
    def: Option<String>,
}

impl Streams {
    pub fn combined() -> Streams {
        Streams {
            decl: String::new(),
            def: None,
        }
    }

    pub fn split(header_path: &str) -> Streams {
        Streams {
            decl: String::new(),
            def: Some(format!("#include \"{}\"\n\n", header_path)),
        }
    }

    pub fn is_split(&self) -> bool {
        self.def.is_some()
    }

    pub fn decl(&mut self) -> &mut String {
        &mut self.decl
    }

    pub fn def(&mut self) -> &mut String {
        match &mut self.def {
            Some(def) => def,
            None => &mut self.decl,
        }
    }

    /// Free function: prototype into declarations, body into definitions.
    /// `body` is the braced compound statement.
    pub fn function(&mut self, signature: &str, body: &str) {
        match &mut self.def {
            Some(def) => {
                self.decl.push_str(signature);
                self.decl.push_str(";\n\n");
                def.push_str(signature);
                def.push_str(" ");
                def.push_str(body.trim_end());
                def.push_str("\n\n");
            }
            None => {
                self.decl.push_str("inline ");
                self.decl.push_str(signature);
                self.decl.push_str(" ");
                self.decl.push_str(body.trim_end());
                self.decl.push_str("\n\n");
            }
        }
    }

    /// Definition only; used when the declaration is emitted in-class.
    pub fn define(&mut self, signature: &str, body: &str) {
        let sink = self.def();
        sink.push_str(signature);
        sink.push_str(" ");
        sink.push_str(body.trim_end());
        sink.push_str("\n\n");
    }

    pub fn into_parts(self) -> (String, Option<String>) {
        (self.decl, self.def)
    }
}
