use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{ExtractError, ExtractResult};

/// A variable-like declaration: a class field or a method parameter.
///
/// Parameters whose grammar shape carries no `name`/`type` pair (varargs,
/// receiver parameters) are kept as raw fields: `ty` is empty and `text`
/// holds the verbatim source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub modifier: String,
    pub value: String,
    pub docstring: String,
    pub text: Option<String>,
}

impl Field {
    pub fn typed(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            ..Self::default()
        }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            name: text.clone(),
            text: Some(text),
            ..Self::default()
        }
    }

    pub fn is_raw(&self) -> bool {
        self.ty.is_empty() && self.text.is_some()
    }

    /// A comment that sat inside a parameter list.
    pub fn is_comment(&self) -> bool {
        self.is_raw()
            && self
                .text
                .as_deref()
                .is_some_and(|t| t.starts_with("//") || t.starts_with("/*"))
    }

    /// The type as it contributes to a method signature.
    fn signature_part(&self) -> &str {
        if self.is_raw() {
            self.text.as_deref().unwrap_or_default()
        } else {
            &self.ty
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub modifier: String,
    pub text: String,
    pub return_type: String,
    pub params: Vec<Field>,
    pub class_sig: String,
    pub docstring: String,
}

impl Method {
    /// `package.Class.name(T1,T2)`; unique per overload within a class.
    /// Comments inside the parameter list are not part of the key.
    pub fn signature(&self) -> String {
        let params: Vec<&str> = self
            .params
            .iter()
            .filter(|p| !p.is_comment())
            .map(Field::signature_part)
            .collect();
        format!("{}.{}({})", self.class_sig, self.name, params.join(","))
    }

    pub fn sig_hash(&self) -> String {
        format!("{:x}", md5::compute(self.signature()))
    }

    pub fn is_public(&self) -> bool {
        self.modifier.contains("public")
    }
}

/// A top-level Java class with its members in source order.
///
/// Instances come out of [`ClassBuilder::build`] and are read-only after
/// that point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Class {
    package_name: String,
    name: String,
    modifier: String,
    text: String,
    imports: Vec<String>,
    interface: String,
    superclass: String,
    methods: Vec<Method>,
    fields: Vec<Field>,
}

impl Class {
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn modifier(&self) -> &str {
        &self.modifier
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Raw `implements ...` clause, empty when absent.
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Raw `extends ...` clause, empty when absent.
    pub fn superclass(&self) -> &str {
        &self.superclass
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn signature(&self) -> String {
        class_signature(&self.package_name, &self.name)
    }

    pub fn sig_hash(&self) -> String {
        format!("{:x}", md5::compute(self.signature()))
    }

    pub fn public_methods(&self) -> Vec<&Method> {
        self.methods.iter().filter(|m| m.is_public()).collect()
    }
}

/// `package.Class`. The package may be empty, in which case the signature
/// starts with a dot.
pub fn class_signature(package_name: &str, class_name: &str) -> String {
    format!("{}.{}", package_name, class_name)
}

/// Accumulates members during a single pass over a class body.
#[derive(Debug, Clone, Default)]
pub struct ClassBuilder {
    package_name: String,
    name: String,
    modifier: String,
    text: String,
    imports: Vec<String>,
    interface: String,
    superclass: String,
    methods: Vec<Method>,
    fields: Vec<Field>,
}

impl ClassBuilder {
    pub fn new(package_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifier = modifier.into();
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn imports(mut self, imports: Vec<String>) -> Self {
        self.imports = imports;
        self
    }

    pub fn interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = interface.into();
        self
    }

    pub fn superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = superclass.into();
        self
    }

    pub fn signature(&self) -> String {
        class_signature(&self.package_name, &self.name)
    }

    pub fn add_method(&mut self, method: Method) {
        self.methods.push(method);
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn build(self) -> ExtractResult<Class> {
        if self.name.is_empty() {
            return Err(ExtractError::Precondition("class name must not be empty".to_string()));
        }
        Ok(Class {
            package_name: self.package_name,
            name: self.name,
            modifier: self.modifier,
            text: self.text,
            imports: self.imports,
            interface: self.interface,
            superclass: self.superclass,
            methods: self.methods,
            fields: self.fields,
        })
    }
}
