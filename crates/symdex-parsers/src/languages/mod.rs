//! Language registry for pattern-based extraction.
//!
//! Each language implements [`LanguageParser`](crate::LanguageParser) and is
//! registered here. Adding a language means adding a module and one line in
//! `all_parsers`.

pub mod c;
pub mod cpp;
pub mod csharp;
pub mod generic;
pub mod go;
pub mod java;
pub mod kotlin;
pub mod php;
pub mod python;
pub mod ruby;
pub mod rust;
pub mod swift;
pub mod typescript;

use crate::LanguageParser;

/// Returns all registered language parsers.
pub fn all_parsers() -> Vec<Box<dyn LanguageParser>> {
    vec![
        Box::new(typescript::TypeScriptParser::new()),
        Box::new(python::PythonParser::new()),
        Box::new(rust::RustParser::new()),
        Box::new(go::GoParser::new()),
        Box::new(java::JavaParser::new()),
        Box::new(c::CParser::new()),
        Box::new(cpp::CppParser::new()),
        Box::new(csharp::CSharpParser::new()),
        Box::new(ruby::RubyParser::new()),
        Box::new(php::PhpParser::new()),
        Box::new(swift::SwiftParser::new()),
        Box::new(kotlin::KotlinParser::new()),
    ]
}
