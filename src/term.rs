//! the term tree, generic over its annotation slots

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::builtin::Const;
use crate::types::Type;

// direction literals {{{
/// Where an agent can point or step. The first four are relative to its
/// current heading, the rest name fixed axes of the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Right,
    Back,
    Forward,
    North,
    South,
    East,
    West,
    Down,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        use Direction::*;
        write!(
            f,
            "{}",
            match self {
                Left => "left",
                Right => "right",
                Back => "back",
                Forward => "forward",
                North => "north",
                South => "south",
                East => "east",
                West => "west",
                Down => "down",
            }
        )
    }
}

impl Direction {
    pub fn try_from_name(name: &str) -> Option<Self> {
        use Direction::*;
        Some(match name {
            "left" => Left,
            "right" => Right,
            "back" => Back,
            "forward" => Forward,
            "north" => North,
            "south" => South,
            "east" => East,
            "west" => West,
            "down" => Down,
            _ => return None,
        })
    }

    /// heading-independent directions
    pub fn is_absolute(self) -> bool {
        use Direction::*;
        matches!(self, North | South | East | West | Down)
    }
}
// }}}

// the tree {{{
/// One node of the command-language syntax tree.
///
/// `A` is the annotation policy: what the slot on the four annotated
/// node kinds (lambda, application, let, bind) holds. The same shape
/// goes through the whole pipeline as `HintedTerm`, then `TypedTerm`,
/// then `BareTerm`; converting between policies moves slot contents
/// only, never the shape, the literals or the names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Term<A> {
    Unit,
    Const(Const),
    Dir(Direction),
    Int(i64),
    Str(String),
    Bool(bool),
    Var(String),
    /// bound name, domain annotation, body
    Lam(String, A, Box<Term<A>>),
    /// the annotation is the argument's type
    App(A, Box<Term<A>>, Box<Term<A>>),
    /// bound name, its annotation, bound term, body
    Let(String, A, Box<Term<A>>, Box<Term<A>>),
    /// sequences two commands; the name, when there is one, binds the
    /// produced value in the continuation only
    Bind(Option<String>, A, Box<Term<A>>, Box<Term<A>>),
    Noop,
    /// keeps its subterm suspended as a value; reduction never goes
    /// under it until the forcing operator asks
    Delay(Box<Term<A>>),
}

/// out of the parser: slots hold whatever hints the source spelled out
pub type HintedTerm = Term<Option<Type>>;
/// out of the checker: every slot holds its type
pub type TypedTerm = Term<Type>;
/// annotation-free, the form storage and comparison want
pub type BareTerm = Term<()>;
// }}}

// building {{{
impl<A> Term<A> {
    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }

    pub fn lam(name: impl Into<String>, ann: A, body: Self) -> Self {
        Term::Lam(name.into(), ann, Box::new(body))
    }

    pub fn app(ann: A, fun: Self, arg: Self) -> Self {
        Term::App(ann, Box::new(fun), Box::new(arg))
    }

    pub fn let_in(name: impl Into<String>, ann: A, bound: Self, body: Self) -> Self {
        Term::Let(name.into(), ann, Box::new(bound), Box::new(body))
    }

    pub fn bind(name: Option<&str>, ann: A, producer: Self, continuation: Self) -> Self {
        Term::Bind(
            name.map(String::from),
            ann,
            Box::new(producer),
            Box::new(continuation),
        )
    }

    pub fn delay(inner: Self) -> Self {
        Term::Delay(Box::new(inner))
    }
}
// }}}

// slot mapping {{{
impl<A> Term<A> {
    /// Carries the tree over to another annotation policy: `f` visits
    /// every slot, node before children, and everything that is not a
    /// slot moves over untouched. The output has the input's node kinds,
    /// literals and names in the input's order.
    pub fn map_ann<B>(self, mut f: impl FnMut(A) -> B) -> Term<B> {
        fn go<A, B, F: FnMut(A) -> B>(t: Term<A>, f: &mut F) -> Term<B> {
            use Term::*;
            match t {
                Unit => Unit,
                Const(c) => Const(c),
                Dir(d) => Dir(d),
                Int(n) => Int(n),
                Str(s) => Str(s),
                Bool(b) => Bool(b),
                Var(w) => Var(w),
                Lam(w, a, body) => Lam(w, f(a), Box::new(go(*body, f))),
                App(a, fun, arg) => App(f(a), Box::new(go(*fun, f)), Box::new(go(*arg, f))),
                Let(w, a, bound, body) => {
                    Let(w, f(a), Box::new(go(*bound, f)), Box::new(go(*body, f)))
                }
                Bind(w, a, producer, continuation) => Bind(
                    w,
                    f(a),
                    Box::new(go(*producer, f)),
                    Box::new(go(*continuation, f)),
                ),
                Noop => Noop,
                Delay(inner) => Delay(Box::new(go(*inner, f))),
            }
        }
        go(self, &mut f)
    }

    /// Drops every annotation. Lossy and final; that is exactly what
    /// makes the result stable under comparison, ordering and hashing
    /// no matter which policy it came from.
    pub fn erase(self) -> BareTerm {
        self.map_ann(|_| ())
    }
}
// }}}

// shape views {{{
impl<A> Term<A> {
    /// Looks through nested application, handing back the applied head
    /// and its arguments first-applied first. A constant head with
    /// exactly `arity` many arguments is a saturated application.
    pub fn spine(&self) -> (&Term<A>, Vec<&Term<A>>) {
        let mut args = Vec::new();
        let mut head = self;
        while let Term::App(_, fun, arg) = head {
            args.push(&**arg);
            head = fun;
        }
        args.reverse();
        (head, args)
    }

    /// Whether `name` occurs free anywhere in here, under the same
    /// scoping `map_free` rewrites with: lambda and let shadow their
    /// whole subtree, bind shadows its continuation only.
    pub fn has_free(&self, name: &str) -> bool {
        match self {
            Term::Var(w) => name == w,
            Term::Lam(w, _, body) => name != w && body.has_free(name),
            Term::Let(w, _, bound, body) => {
                name != w && (bound.has_free(name) || body.has_free(name))
            }
            Term::Bind(w, _, producer, continuation) => {
                producer.has_free(name)
                    || (w.as_deref() != Some(name) && continuation.has_free(name))
            }
            Term::App(_, fun, arg) => fun.has_free(name) || arg.has_free(name),
            Term::Delay(inner) => inner.has_free(name),
            _ => false,
        }
    }
}
// }}}

#[test]
fn test() {
    // spine undoes what nested application built
    let sum: BareTerm = Term::app(
        (),
        Term::app((), Term::Const(Const::Add), Term::Int(1)),
        Term::var("n"),
    );
    let (head, args) = sum.spine();
    assert_eq!(&Term::Const(Const::Add), head);
    assert_eq!(vec![&Term::Int(1), &Term::var("n")], args);
    assert_eq!(Const::Add.arity(), args.len());

    let alone: BareTerm = Term::Noop;
    let (head, args) = alone.spine();
    assert_eq!(&Term::Noop, head);
    assert!(args.is_empty());

    // what binds where
    assert!(!Term::lam("x", (), Term::var("x")).has_free("x"));
    assert!(Term::lam("y", (), Term::var("x")).has_free("x"));
    assert!(!Term::let_in("x", (), Term::Int(0), Term::var("x")).has_free("x"));
    // the bound side of a rebinding let is shadowed along with the body
    assert!(!Term::let_in("x", (), Term::var("x"), Term::Int(0)).has_free("x"));
    // a bind's name is in scope for the continuation, not the producer
    assert!(Term::bind(Some("x"), (), Term::var("x"), Term::Noop).has_free("x"));
    assert!(!Term::bind(Some("x"), (), Term::Noop, Term::var("x")).has_free("x"));
    assert!(Term::bind(None, (), Term::Noop, Term::var("x")).has_free("x"));
    let suspended: BareTerm = Term::delay(Term::var("x"));
    assert!(suspended.has_free("x"));

    // direction names round-trip, the absolutes are the compass and down
    use Direction::*;
    for d in [Left, Right, Back, Forward, North, South, East, West, Down] {
        assert_eq!(Some(d), Direction::try_from_name(&d.to_string()));
    }
    assert_eq!(None, Direction::try_from_name("up"));
    assert!(West.is_absolute() && Down.is_absolute());
    assert!(!Left.is_absolute() && !Forward.is_absolute());

    // erasing drops hints and moves everything else
    let hinted: HintedTerm = Term::lam("d", Some(Type::Dir), Term::var("d"));
    assert_eq!(Term::lam("d", (), Term::var("d")), hinted.erase());
}
