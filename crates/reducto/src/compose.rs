//! Right-to-left function composition
//!
//! `compose([f, g, h])` yields `|x| f(g(h(x)))`. Used to chain store
//! enhancers, and by the same convention anything else that wraps a
//! function of one argument.

use std::rc::Rc;

/// A shareable function from `T` to `T`
pub type Unary<T> = Rc<dyn Fn(T) -> T>;

/// Compose same-typed functions from right to left.
///
/// No functions gives the identity, a single function is handed back
/// unchanged.
pub fn compose<T: 'static>(fns: impl IntoIterator<Item = Unary<T>>) -> Unary<T> {
    fns.into_iter()
        .reduce(|outer, inner| Rc::new(move |arg: T| outer(inner(arg))))
        .unwrap_or_else(|| Rc::new(|arg: T| arg))
}

/// Compose functions where only the rightmost one takes the arguments of the
/// resulting function. Several arguments are passed as a tuple.
pub fn compose_with<A, T, L>(fns: impl IntoIterator<Item = Unary<T>>, last: L) -> Rc<dyn Fn(A) -> T>
where
    A: 'static,
    T: 'static,
    L: Fn(A) -> T + 'static,
{
    let outer = compose(fns);
    Rc::new(move |args: A| outer(last(args)))
}

/// Compose closures of differing types from right to left.
///
/// ```
/// use reducto::compose;
///
/// let len = |s: &str| s.len();
/// let double = |n: usize| n * 2;
/// let describe = |n: usize| format!("{} chars", n);
///
/// assert_eq!(compose!(describe, double, len)("abc"), "6 chars");
/// ```
#[macro_export]
macro_rules! compose {
    () => {
        |arg| arg
    };
    ($f:expr $(,)?) => {
        $f
    };
    ($f:expr, $($rest:expr),+ $(,)?) => {{
        let outer = $f;
        let inner = $crate::compose!($($rest),+);
        move |arg| outer(inner(arg))
    }};
}
