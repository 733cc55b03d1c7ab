mod declaration;
mod instantiation;
mod reference;
mod type_argument;

pub use declaration::{Declaration, DeclarationKind, TypeParameterRef};
pub use instantiation::Instantiation;
pub use reference::GenericReference;
pub use type_argument::{ConcreteType, TypeArgument};
