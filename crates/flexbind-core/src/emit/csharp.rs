//! C# source emission
//!
//! Output order is fixed: banner, enums, the `NativeFunctions` container
//! (imports then delegates), the `Properties` enumeration and the partial
//! subject class. Given the same model the output is byte-for-byte identical.

use super::writer::IndentWriter;
use crate::config::GeneratorConfig;
use crate::metadata::Signature;
use crate::model::{AccessorKind, BindingModel, EnumDecl, Property};
use tracing::instrument;

/// Renders a [`BindingModel`] as a C# source file
pub struct CSharpEmitter<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> CSharpEmitter<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Render the whole file
    #[instrument(skip_all)]
    pub fn emit(&self, model: &BindingModel) -> String {
        let mut w = IndentWriter::new();

        self.banner(&mut w);
        w.line(&format!("namespace {}", self.config.namespace));
        w.braced(|w| {
            for decl in &model.enums {
                enum_decl(w, decl);
                w.blank();
            }

            self.native_functions(w, model);
            w.blank();

            property_names(w, &model.properties);
            w.blank();

            self.subject_class(w, &model.properties);
        });

        w.finish()
    }

    fn banner(&self, w: &mut IndentWriter) {
        for line in &self.config.copyright {
            w.line(&format!("// {}", line));
        }
        if !self.config.copyright.is_empty() {
            w.blank();
        }
        w.line(&format!(
            "// This file was generated by {}. Do not edit manually.",
            self.config.generator_name
        ));
        w.blank();
        w.line("using System;");
        w.line("using System.Runtime.InteropServices;");
        w.line(&format!(
            "using static {}.NativeFunctions;",
            self.config.namespace
        ));
        w.blank();
    }

    fn native_functions(&self, w: &mut IndentWriter, model: &BindingModel) {
        w.line("internal class NativeFunctions");
        w.braced(|w| {
            w.line(&format!("const string dll_name = \"{}\";", self.config.library));
            w.blank();
            for function in &model.functions {
                w.line(&format!(
                    "[DllImport(dll_name)] public static extern {};",
                    declaration(&function.name, &function.signature)
                ));
            }
            w.blank();
            for (id, signature) in model.delegates.iter() {
                w.line(&format!(
                    "public delegate {};",
                    declaration(&id.name(), signature)
                ));
            }
        });
    }

    fn subject_class(&self, w: &mut IndentWriter, properties: &[Property]) {
        let handle = &self.config.subject;
        w.line(&format!("public partial class {}", self.config.subject_type()));
        w.braced(|w| {
            for (position, property) in properties.iter().enumerate() {
                if position > 0 {
                    w.blank();
                }
                property_decl(w, property, handle);
            }
            w.blank();
            w.line("partial void ValidatePropertyValue(Properties property, int value);");
            w.line("partial void ValidatePropertyValue(Properties property, float value);");
        });
    }
}

fn enum_decl(w: &mut IndentWriter, decl: &EnumDecl) {
    w.line(&format!("public enum {} : int", decl.name));
    w.braced(|w| {
        for member in &decl.members {
            w.line(&format!("{} = {},", member.name, member.value));
        }
    });
}

/// Settable property names, used as validation keys
fn property_names(w: &mut IndentWriter, properties: &[Property]) {
    w.line("enum Properties");
    w.braced(|w| {
        for property in properties.iter().filter(|p| p.has_setter()) {
            w.line(&format!("{},", property.name));
        }
    });
}

fn property_decl(w: &mut IndentWriter, property: &Property, handle: &str) {
    let ty = property.ty.host_name();
    let (get_cast, set_cast) = if property.ty.is_enum() {
        (format!("({})", ty), "(int)".to_string())
    } else {
        (String::new(), String::new())
    };

    w.line(&format!("public {} {}", ty, property.name));
    w.braced(|w| {
        for accessor in &property.accessors {
            match accessor.kind {
                AccessorKind::Get => w.line(&format!(
                    "get {{ return {}{}({}); }}",
                    get_cast, accessor.function, handle
                )),
                AccessorKind::Set => {
                    w.line("set");
                    w.braced(|w| {
                        w.line(&format!(
                            "ValidatePropertyValue(Properties.{}, {}value);",
                            property.name, set_cast
                        ));
                        w.line(&format!(
                            "{}({}, {}value);",
                            accessor.function, handle, set_cast
                        ));
                    });
                }
            }
        }
    });
}

/// `<ret> <name> (<T1> arg1, <T2> arg2)`
fn declaration(name: &str, signature: &Signature) -> String {
    let args = signature
        .args
        .iter()
        .enumerate()
        .map(|(index, ty)| format!("{} arg{}", ty.host_name(), index + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} {} ({})", signature.return_type.host_name(), name, args)
}
