// Domain model: Python AST subset, conversion rules, and their outputs.

pub mod diagnostics;
pub mod emit;
pub mod factory;
pub mod node;
pub mod resolve;
pub mod tstype;
