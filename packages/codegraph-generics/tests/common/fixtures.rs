//! Declaration, location and reference fixtures

use codegraph_generics::{
    Declaration, GenericReference, Instantiation, Location, Span, TypeArgument,
};
use std::collections::BTreeSet;

pub const FILE: &str = "src/Program.cs";

pub fn ty(name: &str, arity: usize) -> Declaration {
    Declaration::generic_type(name, arity).unwrap()
}

pub fn method(name: &str, arity: usize) -> Declaration {
    Declaration::generic_method(name, arity).unwrap()
}

/// Location on `line` of the fixture file
pub fn at(line: u32) -> Location {
    Location::new(FILE, Span::line(line, 4, 24))
}

pub fn named(name: &str) -> TypeArgument {
    TypeArgument::named(name)
}

pub fn param(owner: &Declaration, ordinal: usize) -> TypeArgument {
    TypeArgument::parameter(owner, ordinal).unwrap()
}

pub fn nested(decl: &Declaration, args: Vec<TypeArgument>) -> TypeArgument {
    TypeArgument::from_instantiation(Instantiation::new(decl.clone(), args).unwrap())
}

pub fn closed_ref(decl: &Declaration, args: &[&str], line: u32) -> GenericReference {
    let inst = decl
        .construct(args.iter().map(|a| named(a)).collect())
        .unwrap();
    GenericReference::new(inst, at(line))
}

pub fn open_ref(decl: &Declaration, args: Vec<TypeArgument>, line: u32) -> GenericReference {
    GenericReference::new(Instantiation::new(decl.clone(), args).unwrap(), at(line))
}

/// `"Box<int> @ line 2"` renderings, order-independent
pub fn rendered<'a>(refs: impl IntoIterator<Item = &'a GenericReference>) -> BTreeSet<String> {
    refs.into_iter()
        .map(|r| format!("{} @ line {}", r.instantiation(), r.location().span().start_line))
        .collect()
}

pub fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}
