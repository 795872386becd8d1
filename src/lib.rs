//! Term core for a small statically-typed command language that scripts
//! in-world agents.
//!
//! One tree serves the whole pipeline: the parser produces terms whose
//! annotation slots hold optional hints, the checker fills every slot in,
//! the evaluator steps the result and storage keeps it with the slots
//! erased. `Term<A>` is that tree, generic over what the slots hold, and
//! this crate carries the structural operations everything downstream is
//! built from: slot mapping and erasure, type-directed bottom-up
//! rewriting and free-variable rewriting. No parsing, no inference and no
//! execution happens here.

pub mod builtin;
pub mod craft;
mod format;
mod rewrite;
pub mod term;
pub mod types;

#[cfg(test)]
mod tests;

pub use builtin::{Const, Purity};
pub use craft::{IngredientList, Inventory, MissingIngredients, Recipe, RecipeBook};
pub use term::{BareTerm, Direction, HintedTerm, Term, TypedTerm};
pub use types::Type;
