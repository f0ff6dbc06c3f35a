//! Turns a located class declaration into a [`Class`] with its methods and
//! fields.

use crate::accessor;
use crate::locator::{find_imports, find_package, find_target_class};
use crate::ParsedUnit;
use protocol::{Class, ClassBuilder, ExtractResult, Field, Method};
use tree_sitter::Node;
use tracing::warn;

pub fn build_class(unit: &ParsedUnit, target_class_name: Option<&str>) -> Option<Class> {
    let root = unit.root();
    let source = unit.source();

    let package_name = find_package(root, source);
    let imports = find_imports(root, source);
    let class_decl = find_target_class(root, source, target_class_name)?;

    let name = match accessor::field_text(class_decl, "name", source) {
        Ok(name) => name,
        Err(e) => {
            warn!("Skipping class declaration: {}", e);
            return None;
        }
    };

    let mut builder = ClassBuilder::new(package_name, name)
        .modifier(accessor::modifiers(class_decl, source))
        .text(accessor::text(class_decl, source))
        .imports(imports)
        .interface(accessor::optional_field_text(class_decl, "interfaces", source))
        .superclass(accessor::optional_field_text(class_decl, "superclass", source));
    let class_sig = builder.signature();

    if let Some(body) = class_decl.child_by_field_name("body") {
        for child in accessor::children(body) {
            match child.kind() {
                "method_declaration" => match build_method(child, source, &class_sig) {
                    Ok(method) => builder.add_method(method),
                    Err(e) => warn!("Skipping method in {}: {}", class_sig, e),
                },
                "field_declaration" => match build_field(child, source) {
                    Ok(Some(field)) => builder.add_field(field),
                    Ok(None) => {}
                    Err(e) => warn!("Skipping field in {}: {}", class_sig, e),
                },
                _ => {}
            }
        }
    }

    match builder.build() {
        Ok(class) => Some(class),
        Err(e) => {
            warn!("Discarding class declaration: {}", e);
            None
        }
    }
}

pub fn build_method(node: Node, source: &str, class_sig: &str) -> ExtractResult<Method> {
    let name = accessor::field_text(node, "name", source)?;
    let return_type = accessor::field_text(node, "type", source)?;
    let params = build_parameters(accessor::field(node, "parameters")?, source);

    Ok(Method {
        name: name.to_string(),
        modifier: accessor::modifiers(node, source),
        text: accessor::text(node, source).to_string(),
        return_type: return_type.to_string(),
        params,
        class_sig: class_sig.to_string(),
        docstring: accessor::docstring(node, source),
    })
}

/// One field per non-punctuation child of a `formal_parameters` node.
///
/// Children with both a `name` and a `type` become typed fields; anything
/// else (varargs, receiver parameters, stray comments) is kept verbatim.
pub fn build_parameters(params: Node, source: &str) -> Vec<Field> {
    accessor::children(params)
        .into_iter()
        .filter(|p| !accessor::is_punctuation(*p))
        .map(|p| {
            match (p.child_by_field_name("name"), p.child_by_field_name("type")) {
                (Some(name), Some(ty)) => {
                    Field::typed(accessor::text(name, source), accessor::text(ty, source))
                }
                _ => Field::raw(accessor::text(p, source)),
            }
        })
        .collect()
}

/// Builds a field from its first declarator. Returns `Ok(None)` when the
/// declaration has no declarator at all.
pub fn build_field(node: Node, source: &str) -> ExtractResult<Option<Field>> {
    let ty = accessor::field_text(node, "type", source)?;
    let Some(declarator) = node.child_by_field_name("declarator") else {
        warn!("No declarator found for {}", accessor::text(node, source));
        return Ok(None);
    };

    Ok(Some(Field {
        name: accessor::field_text(declarator, "name", source)?.to_string(),
        ty: ty.to_string(),
        modifier: accessor::modifiers(node, source),
        value: accessor::optional_field_text(declarator, "value", source).to_string(),
        docstring: accessor::docstring(node, source),
        text: Some(accessor::text(node, source).to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JavaHarness;
    use anyhow::{Context, Result};

    fn build(source: &str) -> Result<Class> {
        let mut harness = JavaHarness::new()?;
        let unit = harness.parse(source)?;
        build_class(&unit, None).context("class not found")
    }

    #[test]
    fn test_method_metadata() -> Result<()> {
        let class = build(
            r#"
package org.demo;

public class Service {
    @Override
    public final synchronized String describe(int depth, java.util.List<String> names) throws Exception {
        return "x";
    }

    static <T> T identity(T value) { return value; }
}
"#,
        )?;

        let describe = &class.methods()[0];
        assert_eq!(describe.name, "describe");
        assert_eq!(describe.modifier, "@Override\n    public final synchronized");
        assert_eq!(describe.return_type, "String");
        assert_eq!(describe.params.len(), 2);
        assert_eq!(describe.params[0], Field::typed("depth", "int"));
        assert_eq!(describe.params[1], Field::typed("names", "java.util.List<String>"));
        assert!(describe.text.starts_with("@Override"));
        assert!(describe.text.ends_with('}'));

        let identity = &class.methods()[1];
        assert_eq!(identity.modifier, "static");
        assert_eq!(identity.return_type, "T");
        assert_eq!(identity.signature(), "org.demo.Service.identity(T)");

        Ok(())
    }

    #[test]
    fn test_parameter_count_matches_source() -> Result<()> {
        let class = build(
            r#"
public class Params {
    public void none() {}
    public void one(final @Nullable String s) {}
    public void varargs(int first, String... rest) {}
    public void receiver(Params this, int x) {}
    public void arrays(int[] values, String names[]) {}
}
"#,
        )?;

        let counts: Vec<usize> = class.methods().iter().map(|m| m.params.len()).collect();
        assert_eq!(counts, vec![0, 1, 2, 2, 2]);

        let one = &class.methods()[1];
        assert_eq!(one.params[0].name, "s");
        assert_eq!(one.params[0].ty, "String");

        let varargs = &class.methods()[2];
        assert!(!varargs.params[0].is_raw());
        assert!(varargs.params[1].is_raw());
        assert_eq!(varargs.params[1].text.as_deref(), Some("String... rest"));
        assert_eq!(varargs.params[1].ty, "");

        let receiver = &class.methods()[3];
        assert!(receiver.params[0].is_raw());
        assert_eq!(receiver.params[0].text.as_deref(), Some("Params this"));
        assert_eq!(receiver.params[1], Field::typed("x", "int"));

        Ok(())
    }

    #[test]
    fn test_comment_in_parameter_list() -> Result<()> {
        let class = build(
            r#"
package a.b;

public class C {
    public void f(int x, /* c */ int y) {}
}
"#,
        )?;

        let f = &class.methods()[0];
        assert_eq!(f.params.len(), 3);
        assert_eq!(f.params[1].text.as_deref(), Some("/* c */"));
        assert_eq!(f.signature(), "a.b.C.f(int,int)");

        Ok(())
    }

    #[test]
    fn test_docstring_association() -> Result<()> {
        let class = build(
            r#"
public class Doc {
    /** The counter. */
    private int count;

    // not a docstring
    private int other;

    /** Adds. */
    public int add(int a, int b) { return a + b; }

    // line comment
    public int sub(int a, int b) { return a - b; }

    public int mul(int a, int b) { return a * b; }

    /* plain block comments count too */
    public int div(int a, int b) { return a / b; }
}
"#,
        )?;

        let field_docs: Vec<&str> = class.fields().iter().map(|f| f.docstring.as_str()).collect();
        assert_eq!(field_docs, vec!["/** The counter. */", ""]);

        let method_docs: Vec<&str> = class.methods().iter().map(|m| m.docstring.as_str()).collect();
        assert_eq!(
            method_docs,
            vec!["/** Adds. */", "", "", "/* plain block comments count too */"]
        );

        Ok(())
    }

    #[test]
    fn test_field_metadata() -> Result<()> {
        let class = build(
            r#"
public class Config {
    private static final int MAX = 10;
    protected String name;
    java.util.Map<String, Integer> counts = new java.util.HashMap<>();
    int a = 1, b = 2;
}
"#,
        )?;

        let fields = class.fields();
        assert_eq!(fields.len(), 4);

        assert_eq!(fields[0].name, "MAX");
        assert_eq!(fields[0].ty, "int");
        assert_eq!(fields[0].modifier, "private static final");
        assert_eq!(fields[0].value, "10");
        assert_eq!(fields[0].text.as_deref(), Some("private static final int MAX = 10;"));

        assert_eq!(fields[1].name, "name");
        assert_eq!(fields[1].value, "");

        assert_eq!(fields[2].ty, "java.util.Map<String, Integer>");
        assert_eq!(fields[2].modifier, "");
        assert_eq!(fields[2].value, "new java.util.HashMap<>()");

        // Only the first declarator is taken
        assert_eq!(fields[3].name, "a");
        assert_eq!(fields[3].value, "1");

        Ok(())
    }

    #[test]
    fn test_other_members_are_skipped() -> Result<()> {
        let class = build(
            r#"
public class Members {
    static { System.out.println("init"); }
    { counter = 1; }
    public Members() {}
    class Inner { void hidden() {} }
    enum Mode { ON, OFF }
    public void visible() {}
}
"#,
        )?;

        assert_eq!(class.methods().len(), 1);
        assert_eq!(class.methods()[0].name, "visible");
        assert!(class.fields().is_empty());

        Ok(())
    }
}
