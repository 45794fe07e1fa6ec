//! Syntax models
//!
//! Plain data describing code constructs. Every container owns its children,
//! so a model tree is always a strict tree.

use std::fmt;

use crate::generation::syntax::SyntaxModel;
use crate::infrastructure::templates::TokenMap;

/// Visibility of a type or member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessModifier {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

impl fmt::Display for AccessModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessModifier::Public => write!(f, "public"),
            AccessModifier::Internal => write!(f, "internal"),
            AccessModifier::Protected => write!(f, "protected"),
            AccessModifier::Private => write!(f, "private"),
        }
    }
}

/// Import directive, e.g. `using System;`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UsingModel {
    pub name: String,
}

impl UsingModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl SyntaxModel for UsingModel {}

/// A type reference such as `Dictionary<string, List<Order>>?`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeModel {
    pub name: String,
    pub nullable: bool,
    pub generic_types: Vec<TypeModel>,
    /// Namespace to import when this type is referenced
    pub namespace: Option<String>,
}

impl TypeModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_generic(mut self, generic: TypeModel) -> Self {
        self.generic_types.push(generic);
        self
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// `Task<inner>` from `System.Threading.Tasks`
    pub fn task_of(inner: TypeModel) -> Self {
        TypeModel::new("Task")
            .in_namespace("System.Threading.Tasks")
            .with_generic(inner)
    }

    /// `List<inner>` from `System.Collections.Generic`
    pub fn list_of(inner: TypeModel) -> Self {
        TypeModel::new("List")
            .in_namespace("System.Collections.Generic")
            .with_generic(inner)
    }
}

impl SyntaxModel for TypeModel {
    fn children(&self) -> Vec<&dyn SyntaxModel> {
        self.generic_types
            .iter()
            .map(|t| t as &dyn SyntaxModel)
            .collect()
    }

    fn usings(&self) -> Vec<UsingModel> {
        self.namespace.iter().map(UsingModel::new).collect()
    }
}

/// Attribute such as `[HttpGet("{id}")]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeModel {
    pub name: String,
    /// Argument expressions, written as-is
    pub arguments: Vec<String>,
    pub namespace: Option<String>,
}

impl AttributeModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

impl SyntaxModel for AttributeModel {
    fn usings(&self) -> Vec<UsingModel> {
        self.namespace.iter().map(UsingModel::new).collect()
    }
}

/// Method or constructor parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamModel {
    pub name: String,
    pub type_model: TypeModel,
    pub attribute: Option<AttributeModel>,
    pub default_value: Option<String>,
}

impl ParamModel {
    pub fn new(name: impl Into<String>, type_model: TypeModel) -> Self {
        Self {
            name: name.into(),
            type_model,
            attribute: None,
            default_value: None,
        }
    }

    pub fn with_attribute(mut self, attribute: AttributeModel) -> Self {
        self.attribute = Some(attribute);
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

impl SyntaxModel for ParamModel {
    fn children(&self) -> Vec<&dyn SyntaxModel> {
        let mut children: Vec<&dyn SyntaxModel> = Vec::new();
        if let Some(attribute) = &self.attribute {
            children.push(attribute);
        }
        children.push(&self.type_model);
        children
    }
}

/// Field declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldModel {
    pub name: String,
    pub type_model: TypeModel,
    pub access: AccessModifier,
    pub is_static: bool,
    pub is_readonly: bool,
    pub initializer: Option<String>,
}

impl FieldModel {
    /// `private readonly {type} {name};`
    pub fn private_readonly(name: impl Into<String>, type_model: TypeModel) -> Self {
        Self {
            name: name.into(),
            type_model,
            access: AccessModifier::Private,
            is_static: false,
            is_readonly: true,
            initializer: None,
        }
    }
}

impl SyntaxModel for FieldModel {
    fn children(&self) -> Vec<&dyn SyntaxModel> {
        vec![&self.type_model]
    }
}

/// Accessor list of a property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PropertyAccessors {
    #[default]
    GetSet,
    GetInit,
    GetPrivateSet,
    GetOnly,
}

impl fmt::Display for PropertyAccessors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyAccessors::GetSet => write!(f, "{{ get; set; }}"),
            PropertyAccessors::GetInit => write!(f, "{{ get; init; }}"),
            PropertyAccessors::GetPrivateSet => write!(f, "{{ get; private set; }}"),
            PropertyAccessors::GetOnly => write!(f, "{{ get; }}"),
        }
    }
}

/// Property declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyModel {
    pub name: String,
    pub type_model: TypeModel,
    pub access: AccessModifier,
    pub accessors: PropertyAccessors,
    pub is_required: bool,
    pub attributes: Vec<AttributeModel>,
    pub initializer: Option<String>,
    /// Declared inside an interface: no access modifier
    pub is_interface: bool,
}

impl PropertyModel {
    pub fn new(name: impl Into<String>, type_model: TypeModel) -> Self {
        Self {
            name: name.into(),
            type_model,
            access: AccessModifier::Public,
            accessors: PropertyAccessors::GetSet,
            is_required: false,
            attributes: Vec::new(),
            initializer: None,
            is_interface: false,
        }
    }

    pub fn with_accessors(mut self, accessors: PropertyAccessors) -> Self {
        self.accessors = accessors;
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeModel) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }
}

impl SyntaxModel for PropertyModel {
    fn children(&self) -> Vec<&dyn SyntaxModel> {
        let mut children: Vec<&dyn SyntaxModel> = self
            .attributes
            .iter()
            .map(|a| a as &dyn SyntaxModel)
            .collect();
        children.push(&self.type_model);
        children
    }
}

/// Expression or statement text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionModel {
    /// Free-form code, emitted verbatim
    Text(String),
    /// Statements emitted one per line
    Block(Vec<ExpressionModel>),
    /// Named template rendered with the given tokens
    Template { name: String, tokens: TokenMap },
}

impl ExpressionModel {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn template(name: impl Into<String>, tokens: TokenMap) -> Self {
        Self::Template {
            name: name.into(),
            tokens,
        }
    }
}

impl SyntaxModel for ExpressionModel {}

/// What a method is for; templated kinds get their body from
/// `methods/{template_name}` unless an explicit body is given
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MethodKind {
    #[default]
    Default,
    Constructor,
    Create,
    GetById,
    GetAll,
    Update,
    Delete,
}

impl MethodKind {
    /// Template providing the body of this kind, if any
    pub fn template_name(&self) -> Option<&'static str> {
        match self {
            MethodKind::Default | MethodKind::Constructor => None,
            MethodKind::Create => Some("methods/create"),
            MethodKind::GetById => Some("methods/get_by_id"),
            MethodKind::GetAll => Some("methods/get_all"),
            MethodKind::Update => Some("methods/update"),
            MethodKind::Delete => Some("methods/delete"),
        }
    }
}

/// Method or constructor declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodModel {
    pub name: String,
    pub kind: MethodKind,
    pub access: AccessModifier,
    pub params: Vec<ParamModel>,
    pub attributes: Vec<AttributeModel>,
    /// `None` means `void` (or `Task` for async methods)
    pub return_type: Option<TypeModel>,
    pub body: Option<ExpressionModel>,
    pub is_static: bool,
    pub is_async: bool,
    pub is_override: bool,
    /// Declared inside an interface: no access modifier, `;` when bodiless
    pub is_interface: bool,
    /// Aggregate the templated kinds operate on
    pub entity: Option<String>,
    pub usings: Vec<UsingModel>,
}

impl MethodModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MethodKind::Default,
            access: AccessModifier::Public,
            params: Vec::new(),
            attributes: Vec::new(),
            return_type: None,
            body: None,
            is_static: false,
            is_async: false,
            is_override: false,
            is_interface: false,
            entity: None,
            usings: Vec::new(),
        }
    }

    /// Constructor of the class called `class_name`
    pub fn constructor(class_name: impl Into<String>) -> Self {
        Self {
            kind: MethodKind::Constructor,
            ..Self::new(class_name)
        }
    }

    /// Bodiless interface member
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            is_interface: true,
            ..Self::new(name)
        }
    }

    /// Method whose body comes from the template of `kind`
    pub fn templated(name: impl Into<String>, kind: MethodKind, entity: impl Into<String>) -> Self {
        Self {
            kind,
            entity: Some(entity.into()),
            ..Self::new(name)
        }
    }

    pub fn with_param(mut self, param: ParamModel) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeModel) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_return_type(mut self, return_type: TypeModel) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn with_body(mut self, body: ExpressionModel) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_using(mut self, using: impl Into<String>) -> Self {
        self.usings.push(UsingModel::new(using));
        self
    }

    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }
}

impl SyntaxModel for MethodModel {
    fn children(&self) -> Vec<&dyn SyntaxModel> {
        let mut children: Vec<&dyn SyntaxModel> = self
            .attributes
            .iter()
            .map(|a| a as &dyn SyntaxModel)
            .collect();
        if let Some(return_type) = &self.return_type {
            children.push(return_type);
        }
        children.extend(self.params.iter().map(|p| p as &dyn SyntaxModel));
        if let Some(body) = &self.body {
            children.push(body);
        }
        children
    }

    fn usings(&self) -> Vec<UsingModel> {
        self.usings.clone()
    }
}

/// Class declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassModel {
    pub name: String,
    pub access: AccessModifier,
    pub is_static: bool,
    pub is_abstract: bool,
    pub attributes: Vec<AttributeModel>,
    pub base_class: Option<TypeModel>,
    pub implements: Vec<TypeModel>,
    pub fields: Vec<FieldModel>,
    pub properties: Vec<PropertyModel>,
    pub methods: Vec<MethodModel>,
    pub usings: Vec<UsingModel>,
}

impl ClassModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl SyntaxModel for ClassModel {
    fn children(&self) -> Vec<&dyn SyntaxModel> {
        let mut children: Vec<&dyn SyntaxModel> = Vec::new();
        children.extend(self.attributes.iter().map(|a| a as &dyn SyntaxModel));
        children.extend(self.base_class.iter().map(|t| t as &dyn SyntaxModel));
        children.extend(self.implements.iter().map(|t| t as &dyn SyntaxModel));
        children.extend(self.fields.iter().map(|f| f as &dyn SyntaxModel));
        children.extend(self.properties.iter().map(|p| p as &dyn SyntaxModel));
        children.extend(self.methods.iter().map(|m| m as &dyn SyntaxModel));
        children
    }

    fn usings(&self) -> Vec<UsingModel> {
        self.usings.clone()
    }
}

/// Interface declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceModel {
    pub name: String,
    pub access: AccessModifier,
    pub implements: Vec<TypeModel>,
    pub properties: Vec<PropertyModel>,
    pub methods: Vec<MethodModel>,
    pub usings: Vec<UsingModel>,
}

impl InterfaceModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl SyntaxModel for InterfaceModel {
    fn children(&self) -> Vec<&dyn SyntaxModel> {
        let mut children: Vec<&dyn SyntaxModel> = Vec::new();
        children.extend(self.implements.iter().map(|t| t as &dyn SyntaxModel));
        children.extend(self.properties.iter().map(|p| p as &dyn SyntaxModel));
        children.extend(self.methods.iter().map(|m| m as &dyn SyntaxModel));
        children
    }

    fn usings(&self) -> Vec<UsingModel> {
        self.usings.clone()
    }
}

/// Record declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordModel {
    pub name: String,
    pub access: AccessModifier,
    pub is_struct: bool,
    pub implements: Vec<TypeModel>,
    pub properties: Vec<PropertyModel>,
    pub methods: Vec<MethodModel>,
    pub usings: Vec<UsingModel>,
}

impl RecordModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl SyntaxModel for RecordModel {
    fn children(&self) -> Vec<&dyn SyntaxModel> {
        let mut children: Vec<&dyn SyntaxModel> = Vec::new();
        children.extend(self.implements.iter().map(|t| t as &dyn SyntaxModel));
        children.extend(self.properties.iter().map(|p| p as &dyn SyntaxModel));
        children.extend(self.methods.iter().map(|m| m as &dyn SyntaxModel));
        children
    }

    fn usings(&self) -> Vec<UsingModel> {
        self.usings.clone()
    }
}

/// Block-scoped namespace holding any syntax models
#[derive(Debug, Default)]
pub struct NamespaceModel {
    pub name: String,
    pub members: Vec<Box<dyn SyntaxModel>>,
}

impl NamespaceModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: impl SyntaxModel) -> Self {
        self.members.push(Box::new(member));
        self
    }
}

impl SyntaxModel for NamespaceModel {
    fn children(&self) -> Vec<&dyn SyntaxModel> {
        self.members.iter().map(|m| m.as_ref() as &dyn SyntaxModel).collect()
    }
}

/// One source file: imports, a file-scoped namespace and top-level code
#[derive(Debug, Default)]
pub struct DocumentModel {
    pub name: String,
    pub root_namespace: String,
    pub namespace: String,
    /// Imports required regardless of what the code references
    pub usings: Vec<UsingModel>,
    pub code: Vec<Box<dyn SyntaxModel>>,
}

impl DocumentModel {
    pub fn new(
        name: impl Into<String>,
        root_namespace: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            root_namespace: root_namespace.into(),
            namespace: namespace.into(),
            usings: Vec::new(),
            code: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: impl SyntaxModel) -> Self {
        self.code.push(Box::new(code));
        self
    }

    pub fn with_using(mut self, using: impl Into<String>) -> Self {
        self.usings.push(UsingModel::new(using));
        self
    }

    /// `{root_namespace}.{namespace}`, skipping empty parts
    pub fn full_namespace(&self) -> String {
        [self.root_namespace.as_str(), self.namespace.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl SyntaxModel for DocumentModel {
    fn children(&self) -> Vec<&dyn SyntaxModel> {
        self.code.iter().map(|c| c.as_ref() as &dyn SyntaxModel).collect()
    }

    fn usings(&self) -> Vec<UsingModel> {
        self.usings.clone()
    }
}
