//! the rewrites the checker and evaluator step with

use crate::term::{Term, TypedTerm};
use crate::types::Type;

impl TypedTerm {
    /// Rewrites every node with `f`, innermost first. `ty` is the type
    /// of the whole term; the type `f` sees alongside each node is
    /// derived from it on the way down, never re-inferred, because on a
    /// checked term each node kind fixes its children's types:
    ///
    /// ```plaintext
    /// \x. b          :: p -> r  =>  b :: r
    /// g a            :: r       =>  g :: ann -> r,  a :: ann
    /// let x = e in b :: r       =>  e :: ann,       b :: r
    /// x <- p; c      :: r       =>  p :: cmd ann,   c :: r
    /// {t}            :: r       =>  t :: r
    /// ```
    ///
    /// A term these rules cannot take apart (a lambda at a non-function
    /// type) did not come out of the checker; this panics rather than
    /// guess.
    pub fn bottom_up(
        self,
        ty: &Type,
        mut f: impl FnMut(&Type, TypedTerm) -> TypedTerm,
    ) -> TypedTerm {
        fn go<F: FnMut(&Type, TypedTerm) -> TypedTerm>(
            t: TypedTerm,
            ty: &Type,
            f: &mut F,
        ) -> TypedTerm {
            match t {
                Term::Lam(name, ann, body) => {
                    let Type::Func(_, ret) = ty else {
                        unreachable!("lambda rewritten at non-function type {ty}")
                    };
                    let body = go(*body, ret, f);
                    f(ty, Term::Lam(name, ann, Box::new(body)))
                }

                Term::App(ann, fun, arg) => {
                    let fun = go(*fun, &Type::func(ann.clone(), ty.clone()), f);
                    let arg = go(*arg, &ann, f);
                    f(ty, Term::App(ann, Box::new(fun), Box::new(arg)))
                }

                Term::Let(name, ann, bound, body) => {
                    let bound = go(*bound, &ann, f);
                    let body = go(*body, ty, f);
                    f(ty, Term::Let(name, ann, Box::new(bound), Box::new(body)))
                }

                Term::Bind(name, ann, producer, continuation) => {
                    let producer = go(*producer, &Type::cmd(ann.clone()), f);
                    let continuation = go(*continuation, ty, f);
                    f(
                        ty,
                        Term::Bind(name, ann, Box::new(producer), Box::new(continuation)),
                    )
                }

                Term::Delay(inner) => {
                    let inner = go(*inner, ty, f);
                    f(ty, Term::Delay(Box::new(inner)))
                }

                leaf @ (Term::Unit
                | Term::Const(_)
                | Term::Dir(_)
                | Term::Int(_)
                | Term::Str(_)
                | Term::Bool(_)
                | Term::Var(_)
                | Term::Noop) => f(ty, leaf),
            }
        }
        go(self, ty, &mut f)
    }
}

impl<A> Term<A> {
    /// Applies `f` to every free occurrence of `name` and leaves the
    /// rest as is; a name that never occurs free yields the tree back
    /// unchanged. A lambda or let rebinding `name` shadows its whole
    /// subtree, bound side included; a bind rebinding it shadows the
    /// continuation but never the producer.
    ///
    /// No capture avoidance happens: should `f` substitute in a term
    /// with a free variable that some binder down here also uses, that
    /// variable is silently captured. Freshness is the caller's problem.
    pub fn map_free(self, name: &str, mut f: impl FnMut(Term<A>) -> Term<A>) -> Term<A> {
        fn go<A, F: FnMut(Term<A>) -> Term<A>>(t: Term<A>, name: &str, f: &mut F) -> Term<A> {
            match t {
                Term::Var(w) if name == w => f(Term::Var(w)),

                Term::Lam(w, ann, body) if name != w => {
                    let body = go(*body, name, f);
                    Term::Lam(w, ann, Box::new(body))
                }
                Term::Let(w, ann, bound, body) if name != w => {
                    let bound = go(*bound, name, f);
                    let body = go(*body, name, f);
                    Term::Let(w, ann, Box::new(bound), Box::new(body))
                }

                // the producer runs before the name exists
                Term::Bind(w, ann, producer, continuation) => {
                    let producer = go(*producer, name, f);
                    let continuation = if w.as_deref() == Some(name) {
                        *continuation
                    } else {
                        go(*continuation, name, f)
                    };
                    Term::Bind(w, ann, Box::new(producer), Box::new(continuation))
                }

                Term::App(ann, fun, arg) => {
                    let fun = go(*fun, name, f);
                    let arg = go(*arg, name, f);
                    Term::App(ann, Box::new(fun), Box::new(arg))
                }

                Term::Delay(inner) => Term::Delay(Box::new(go(*inner, name, f))),

                // other variables, rebinding lambdas and lets, leaves
                done => done,
            }
        }
        go(self, name, &mut f)
    }
}
