use crate::parser::LoadedModule;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Schema resolver - converts request-model structs to JSON Schemas.
///
/// A model binding resolves only when the declaring module defines a struct
/// of that exact name and the struct follows the request-model convention: a
/// named-field struct whose `#[derive(..)]` list includes `Deserialize`.
/// Anything else is "no schema", never an error.
pub struct SchemaResolver;

/// Inline JSON Schema object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    /// The type of the schema (string, integer, object, array, etc.)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Properties for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
    /// Required field names for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Items schema for array types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Format for primitive types (e.g. "int32", "int64", "float", "double")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Schema {
    fn primitive(schema_type: &str, format: Option<&str>) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            properties: None,
            required: None,
            items: None,
            format: format.map(|s| s.to_string()),
        }
    }

    /// Untyped object placeholder, also used for the default 200 response.
    pub fn untyped_object() -> Self {
        Self::primitive("object", None)
    }
}

impl SchemaResolver {
    /// Resolves a model name against the module the handler was declared in.
    ///
    /// Returns `None` when no struct of that name exists or the struct is not
    /// a request model. Dotted names never match a struct ident and resolve
    /// to `None`.
    pub fn resolve(model_name: &str, module: &LoadedModule) -> Option<Schema> {
        let item = module.find_struct(model_name)?;

        if !derives_deserialize(item) {
            debug!("{} is not a request model, no schema", model_name);
            return None;
        }

        let mut resolving = HashSet::new();
        resolving.insert(model_name.to_string());
        Some(Self::struct_schema(item, module, &mut resolving))
    }

    fn struct_schema(
        item: &syn::ItemStruct,
        module: &LoadedModule,
        resolving: &mut HashSet<String>,
    ) -> Schema {
        let mut properties = BTreeMap::new();
        let mut required = Vec::new();

        if let syn::Fields::Named(named_fields) = &item.fields {
            for field in &named_fields.named {
                let Some(ident) = &field.ident else {
                    continue;
                };
                let name = ident.to_string();

                let (optional, ty) = unwrap_option(&field.ty);
                properties.insert(name.clone(), Self::type_schema(ty, module, resolving));

                if !optional {
                    required.push(name);
                }
            }
        }

        Schema {
            schema_type: Some("object".to_string()),
            properties: Some(properties),
            required: if required.is_empty() {
                None
            } else {
                Some(required)
            },
            items: None,
            format: None,
        }
    }

    fn type_schema(
        ty: &syn::Type,
        module: &LoadedModule,
        resolving: &mut HashSet<String>,
    ) -> Schema {
        match ty {
            syn::Type::Path(type_path) => {
                let Some(segment) = type_path.path.segments.last() else {
                    return Schema::untyped_object();
                };
                let name = segment.ident.to_string();

                if name == "Vec" {
                    if let Some(inner) = first_generic_arg(segment) {
                        let items = Self::type_schema(inner, module, resolving);
                        return Schema {
                            schema_type: Some("array".to_string()),
                            properties: None,
                            required: None,
                            items: Some(Box::new(items)),
                            format: None,
                        };
                    }
                    return Schema::untyped_object();
                }

                if name == "Option" {
                    if let Some(inner) = first_generic_arg(segment) {
                        return Self::type_schema(inner, module, resolving);
                    }
                    return Schema::untyped_object();
                }

                if let Some(schema) = primitive_schema(&name) {
                    return schema;
                }

                // Nested named-field struct in the same module, inlined with a
                // cycle guard
                if let Some(nested) = module.find_struct(&name) {
                    if resolving.contains(&name) {
                        debug!("Circular reference for type {}, using object", name);
                        return Schema::untyped_object();
                    }
                    if matches!(nested.fields, syn::Fields::Named(_)) {
                        resolving.insert(name.clone());
                        let schema = Self::struct_schema(nested, module, resolving);
                        resolving.remove(&name);
                        return schema;
                    }
                }

                debug!("Unknown type {}, using object placeholder", name);
                Schema::untyped_object()
            }
            syn::Type::Reference(reference) => Self::type_schema(&reference.elem, module, resolving),
            _ => Schema::untyped_object(),
        }
    }
}

/// Whether the struct's `#[derive(..)]` list includes `Deserialize`.
fn derives_deserialize(item: &syn::ItemStruct) -> bool {
    for attr in &item.attrs {
        if !attr.path().is_ident("derive") {
            continue;
        }

        let parsed = attr.parse_args_with(
            syn::punctuated::Punctuated::<syn::Path, syn::Token![,]>::parse_terminated,
        );
        if let Ok(paths) = parsed {
            let found = paths.iter().any(|path| {
                path.segments
                    .last()
                    .is_some_and(|segment| segment.ident == "Deserialize")
            });
            if found {
                return true;
            }
        }
    }

    false
}

/// Splits `Option<T>` into (optional, inner type).
fn unwrap_option(ty: &syn::Type) -> (bool, &syn::Type) {
    if let syn::Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == "Option" {
                if let Some(inner) = first_generic_arg(segment) {
                    return (true, inner);
                }
            }
        }
    }

    (false, ty)
}

fn first_generic_arg(segment: &syn::PathSegment) -> Option<&syn::Type> {
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    args.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

fn primitive_schema(name: &str) -> Option<Schema> {
    let schema = match name {
        "String" | "str" | "char" => Schema::primitive("string", None),
        "i8" | "i16" | "i32" | "u8" | "u16" | "u32" => {
            Schema::primitive("integer", Some("int32"))
        }
        "i64" | "i128" | "isize" | "u64" | "u128" | "usize" => {
            Schema::primitive("integer", Some("int64"))
        }
        "f32" => Schema::primitive("number", Some("float")),
        "f64" => Schema::primitive("number", Some("double")),
        "bool" => Schema::primitive("boolean", None),
        _ => return None,
    };

    Some(schema)
}
