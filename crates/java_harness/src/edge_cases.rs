#[cfg(test)]
mod edge_case_tests {
    use crate::*;
    use anyhow::{Context, Result};

    #[test]
    fn test_multiple_top_level_types() -> Result<()> {
        let mut harness = JavaHarness::new()?;
        let source = r#"
package com.example;

interface Shape { double area(); }

abstract class AbstractShape implements Shape {}

class Square extends AbstractShape {
    public double area() { return 1.0; }
}

public class Circle extends AbstractShape {
    private double r;
    public double area() { return Math.PI * r * r; }
}
"#;

        let circle = harness.parse_class(source, None).context("no default class")?;
        assert_eq!(circle.signature(), "com.example.Circle");
        assert_eq!(circle.superclass(), "extends AbstractShape");
        assert_eq!(circle.interface(), "");

        let square = harness.parse_class(source, Some("Square")).context("no Square")?;
        assert_eq!(square.modifier(), "");
        assert_eq!(square.methods()[0].class_sig, "com.example.Square");

        assert!(harness.parse_class(source, Some("Shape")).is_none());
        assert!(harness.parse_class(source, Some("Triangle")).is_none());

        Ok(())
    }

    #[test]
    fn test_annotated_class_modifiers() -> Result<()> {
        let mut harness = JavaHarness::new()?;
        let source = r#"
@RunWith(JUnit4.class)
public final class AnnotatedTest {
}
"#;

        let class = harness.parse_class(source, None).context("class not found")?;
        assert_eq!(class.modifier(), "@RunWith(JUnit4.class)\npublic final");

        Ok(())
    }

    #[test]
    fn test_generic_class() -> Result<()> {
        let mut harness = JavaHarness::new()?;
        let source = r#"
public class Box<T extends Comparable<T>> implements java.io.Serializable {
    private T value;

    public <U extends Number> U convert(java.util.function.Function<T, U> fn) {
        return fn.apply(value);
    }
}
"#;

        let class = harness.parse_class(source, Some("Box")).context("class not found")?;
        assert_eq!(class.name(), "Box");
        assert_eq!(class.interface(), "implements java.io.Serializable");
        assert_eq!(class.fields()[0].ty, "T");

        let convert = &class.methods()[0];
        assert_eq!(convert.return_type, "U");
        assert_eq!(convert.params[0].ty, "java.util.function.Function<T, U>");

        Ok(())
    }

    #[test]
    fn test_abstract_methods_have_no_body() -> Result<()> {
        let mut harness = JavaHarness::new()?;
        let source = r#"
public abstract class Template {
    protected abstract int compute(int x);
    public final int run() { return compute(1); }
}
"#;

        // Abstract classes are only reachable by name
        assert!(harness.parse_class(source, None).is_none());

        let class = harness.parse_class(source, Some("Template")).context("class not found")?;
        assert_eq!(class.methods().len(), 2);
        assert_eq!(class.methods()[0].modifier, "protected abstract");
        assert_eq!(class.methods()[0].text, "protected abstract int compute(int x);");

        Ok(())
    }

    #[test]
    fn test_unicode_identifiers() -> Result<()> {
        let mut harness = JavaHarness::new()?;
        let source = r#"
public class Μαθηματικά {
    /** Ο αριθμός. */
    private int αριθμός = 42;
    private String 文字列 = "hello";

    public void υπολογισμός() {}
}
"#;

        let class = harness.parse_class(source, None).context("class not found")?;
        assert_eq!(class.name(), "Μαθηματικά");
        assert_eq!(class.fields()[0].name, "αριθμός");
        assert_eq!(class.fields()[0].docstring, "/** Ο αριθμός. */");
        assert_eq!(class.fields()[1].value, "\"hello\"");
        assert_eq!(class.methods()[0].name, "υπολογισμός");

        Ok(())
    }

    #[test]
    fn test_invalid_syntax_recovery() -> Result<()> {
        let mut harness = JavaHarness::new()?;
        let source = r#"
public class Broken {
    private int ok;
    public void method() {
        if (true) {
            System.out.println("unclosed");
"#;

        // Should not panic; whatever is recovered keeps its invariants
        if let Some(class) = harness.parse_class(source, Some("Broken")) {
            assert_eq!(class.name(), "Broken");
            for method in class.methods() {
                assert_eq!(method.class_sig, ".Broken");
            }
        }

        Ok(())
    }

    #[test]
    fn test_harness_reuse_across_units() -> Result<()> {
        let mut harness = JavaHarness::new()?;

        let first = harness.parse_class("package a; public class One {}", None);
        let second = harness.parse_class("package b; public class Two {}", None);

        assert_eq!(first.map(|c| c.signature()).as_deref(), Some("a.One"));
        assert_eq!(second.map(|c| c.signature()).as_deref(), Some("b.Two"));

        Ok(())
    }
}
