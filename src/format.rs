//! printing terms back out

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::term::Term;

// Annotation slots never render, so a term and its erasure print the
// same. Application binds tightest and nests left; binders and binds
// span to the right; delay brings its own braces.
impl<A> Display for Term<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        // prec 0 anywhere, 1 function position, 2 argument position
        fn go<A>(t: &Term<A>, prec: u8, f: &mut Formatter<'_>) -> FmtResult {
            use Term::*;
            match t {
                Unit => write!(f, "()"),
                Const(c) => write!(f, "{c}"),
                Dir(d) => write!(f, "{d}"),
                Int(n) => write!(f, "{n}"),
                Str(s) => write!(f, "{s:?}"),
                Bool(b) => write!(f, "{b}"),
                Var(w) => write!(f, "{w}"),
                Noop => write!(f, "noop"),

                Delay(inner) => {
                    write!(f, "{{")?;
                    go(inner, 0, f)?;
                    write!(f, "}}")
                }

                App(_, fun, arg) => {
                    let parens = 1 < prec;
                    if parens {
                        write!(f, "(")?;
                    }
                    go(fun, 1, f)?;
                    write!(f, " ")?;
                    go(arg, 2, f)?;
                    if parens {
                        write!(f, ")")?;
                    }
                    Ok(())
                }

                Lam(name, _, body) => {
                    let parens = 0 < prec;
                    if parens {
                        write!(f, "(")?;
                    }
                    write!(f, "\\{name}. ")?;
                    go(body, 0, f)?;
                    if parens {
                        write!(f, ")")?;
                    }
                    Ok(())
                }

                Let(name, _, bound, body) => {
                    let parens = 0 < prec;
                    if parens {
                        write!(f, "(")?;
                    }
                    write!(f, "let {name} = ")?;
                    go(bound, 0, f)?;
                    write!(f, " in ")?;
                    go(body, 0, f)?;
                    if parens {
                        write!(f, ")")?;
                    }
                    Ok(())
                }

                Bind(name, _, producer, continuation) => {
                    let parens = 0 < prec;
                    if parens {
                        write!(f, "(")?;
                    }
                    if let Some(name) = name {
                        write!(f, "{name} <- ")?;
                    }
                    go(producer, 1, f)?;
                    write!(f, "; ")?;
                    go(continuation, 0, f)?;
                    if parens {
                        write!(f, ")")?;
                    }
                    Ok(())
                }
            }
        }
        go(self, 0, f)
    }
}

#[test]
fn test() {
    use insta::assert_snapshot;

    use crate::builtin::Const;
    use crate::term::{BareTerm, Direction, Term};
    use crate::types::Type;

    fn t(term: BareTerm) -> String {
        term.to_string()
    }

    assert_snapshot!(t(Term::Unit), @"()");
    assert_snapshot!(t(Term::Noop), @"noop");
    assert_snapshot!(t(Term::Dir(Direction::North)), @"north");
    assert_snapshot!(t(Term::Str("two\nlines".into())), @r#""two\nlines""#);

    // application lays flat to the left, parenthesizes to the right
    let sum = Term::app(
        (),
        Term::app((), Term::Const(Const::Add), Term::Int(1)),
        Term::Int(2),
    );
    assert_snapshot!(t(sum.clone()), @"add 1 2");
    assert_snapshot!(
        t(Term::app((), Term::Const(Const::Neg), sum)),
        @"neg (add 1 2)"
    );

    // binders span right, so they parenthesize anywhere inside one
    let id = Term::lam("x", (), Term::var("x"));
    assert_snapshot!(t(id.clone()), @r"\x. x");
    assert_snapshot!(t(Term::app((), id.clone(), Term::Int(5))), @r"(\x. x) 5");
    assert_snapshot!(t(Term::app((), Term::Const(Const::Run), id)), @r"run (\x. x)");

    assert_snapshot!(
        t(Term::let_in(
            "d",
            (),
            Term::Dir(Direction::West),
            Term::app((), Term::Const(Const::Turn), Term::var("d")),
        )),
        @"let d = west in turn d"
    );

    // a bind chain stays flat, naming only where a name is bound
    assert_snapshot!(
        t(Term::bind(
            None,
            (),
            Term::Const(Const::Move),
            Term::bind(
                Some("n"),
                (),
                Term::app((), Term::Const(Const::Rand), Term::Int(5)),
                Term::app((), Term::Const(Const::Wait), Term::var("n")),
            ),
        )),
        @"move; n <- rand 5; wait n"
    );
    assert_snapshot!(
        t(Term::bind(
            None,
            (),
            Term::bind(None, (), Term::Const(Const::Move), Term::Const(Const::Grab)),
            Term::Noop,
        )),
        @"(move; grab); noop"
    );

    // delay is its own bracket
    assert_snapshot!(
        t(Term::app(
            (),
            Term::Const(Const::Build),
            Term::delay(Term::bind(
                None,
                (),
                Term::Const(Const::Move),
                Term::Const(Const::Grab),
            )),
        )),
        @"build {move; grab}"
    );
    assert_snapshot!(
        t(Term::app(
            (),
            Term::app(
                (),
                Term::app((), Term::Const(Const::If), Term::Bool(true)),
                Term::delay(Term::Noop),
            ),
            Term::delay(Term::Noop),
        )),
        @"if true {noop} {noop}"
    );

    // annotations never render: a typed term prints as its erasure does
    let typed = Term::lam(
        "d",
        Type::Dir,
        Term::app(Type::Dir, Term::Const(Const::Turn), Term::var("d")),
    );
    assert_eq!(typed.clone().erase().to_string(), typed.to_string());
}
