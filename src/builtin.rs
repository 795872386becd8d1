//! the builtin constant catalog

use std::fmt::{Display, Formatter, Result as FmtResult};

use phf::{phf_map, Map};

/// What a saturated application of a constant is. A `Pure` one is
/// ordinary data that keeps reducing on the spot; a `Command` one is a
/// finished value that sits still until the execution machinery runs it
/// and lets its effect happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purity {
    Command,
    Pure,
}

// macro to generate the catalog from one table {{{
macro_rules! make {
    ($($var:ident($name:literal) :: $class:ident/$arity:literal, $desc:literal),*$(,)?) => {
        /// Builtin operations of the language.
        ///
        /// The catalog is closed and versioned: each entry carries its
        /// source-level name, the argument count a saturated application
        /// takes and its purity class, declared together in one table
        /// row. Entries only ever get added, never changed or removed,
        /// since any stored program naming a constant depends on the row
        /// staying what it was.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Const { $(#[doc = $desc] $var,)* }

        /// every name that resolves to a constant
        pub const NAMES: Map<&'static str, Const> = phf_map! {
            $($name => Const::$var,)*
        };

        impl Display for Const {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                write!(f, "{}", match self { $(Self::$var => $name,)* })
            }
        }

        impl Const {
            /// the whole catalog, in table order
            pub const ALL: &'static [Const] = &[$(Const::$var,)*];

            pub fn try_from_name(name: &str) -> Option<Self> {
                NAMES.get(name).copied()
            }

            /// how many arguments a saturated application takes
            pub fn arity(self) -> usize {
                match self { $(Self::$var => $arity,)* }
            }

            pub fn purity(self) -> Purity {
                match self { $(Self::$var => Purity::$class,)* }
            }

            /// one line of help
            pub fn desc(self) -> &'static str {
                match self { $(Self::$var => $desc,)* }
            }
        }
    };
}
// }}}

make! {
    Wait("wait")   :: Command/1, "suspend execution for that many ticks",
    Move("move")   :: Command/0, "step one cell along the current heading",
    Turn("turn")   :: Command/1, "reorient to the given direction",
    Grab("grab")   :: Command/0, "pick up the entity on the current cell",
    Place("place") :: Command/1, "put down the named entity on the current cell",
    Craft("craft") :: Command/1, "consume ingredients to produce the named entity",
    Build("build") :: Command/1, "construct a child agent running the given program",
    Run("run")     :: Command/1, "execute the named stored program",
    Getx("getx")   :: Command/0, "the agent's current x coordinate",
    Gety("gety")   :: Command/0, "the agent's current y coordinate",
    Rand("rand")   :: Command/1, "a uniform random integer below the given bound",
    Say("say")     :: Command/1, "emit a message into the world log",

    If("if")       :: Pure/3,    "pick one of two suspended branches by a boolean",
    Force("force") :: Pure/1,    "unsuspend a delayed term so it reduces again",

    Eq("eq")       :: Pure/2,    "equal",
    Neq("neq")     :: Pure/2,    "not equal",
    Lt("lt")       :: Pure/2,    "strictly less",
    Leq("leq")     :: Pure/2,    "less or equal",
    Gt("gt")       :: Pure/2,    "strictly greater",
    Geq("geq")     :: Pure/2,    "greater or equal",

    Neg("neg")     :: Pure/1,    "negate a number",
    Add("add")     :: Pure/2,    "add two numbers",
    Sub("sub")     :: Pure/2,    "subtract the second number",
    Mul("mul")     :: Pure/2,    "multiply two numbers",
    Div("div")     :: Pure/2,    "divide by the second number",
    Exp("exp")     :: Pure/2,    "raise to the second number",
}

impl Const {
    /// a saturated application of one of these does not reduce further,
    /// it waits to be executed
    pub fn is_command(self) -> bool {
        Purity::Command == self.purity()
    }
}

#[test]
fn test() {
    use Const::*;

    // one name per entry, every name resolving back to its entry
    assert_eq!(Const::ALL.len(), NAMES.len());
    for c in Const::ALL.iter().copied() {
        assert_eq!(Some(c), Const::try_from_name(&c.to_string()));
        assert!(!c.desc().is_empty());
    }
    assert_eq!(None, Const::try_from_name("frobnicate"));

    // the pure set is exactly the conditional, force, the comparisons
    // and the arithmetic; everything else is a command
    let pure: Vec<Const> = Const::ALL
        .iter()
        .copied()
        .filter(|c| !c.is_command())
        .collect();
    assert_eq!(
        vec![If, Force, Eq, Neq, Lt, Leq, Gt, Geq, Neg, Add, Sub, Mul, Div, Exp],
        pure
    );
    assert_eq!(Purity::Pure, If.purity());
    assert_eq!(Purity::Command, Say.purity());

    // arities the evaluator saturates against
    assert_eq!(0, Move.arity());
    assert_eq!(1, Turn.arity());
    assert_eq!(2, Add.arity());
    assert_eq!(3, If.arity());
}
