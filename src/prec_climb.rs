//! Precedence climbing for expressions with binary operators.
//!
//! Instead of one recursive call per operator, [`climb`] keeps
//! an explicit stack of operands that wait for their right-hand side,
//! so arbitrarily long operator chains can be folded
//! without growing the call stack.
//!
//! ~~~
//! use monparse::prec_climb::{self, Associativity, Expr};
//!
//! enum Op {
//!     Sub,
//!     Mul,
//!     Pow,
//! }
//!
//! impl prec_climb::Op for Op {
//!     fn precedence(&self) -> usize {
//!         match self {
//!             Op::Sub => 0,
//!             Op::Mul => 1,
//!             Op::Pow => 2,
//!         }
//!     }
//!
//!     fn associativity(&self) -> Associativity {
//!         match self {
//!             Op::Pow => Associativity::Right,
//!             _ => Associativity::Left,
//!         }
//!     }
//! }
//!
//! impl Expr<Op> for i64 {
//!     fn from_op(lhs: Self, op: Op, rhs: Self) -> Self {
//!         match op {
//!             Op::Sub => lhs - rhs,
//!             Op::Mul => lhs * rhs,
//!             Op::Pow => lhs.pow(rhs as u32),
//!         }
//!     }
//! }
//!
//! use Op::{Mul, Pow, Sub};
//! // 10 - 2 * 3 - 2 ^ 3 ^ 2 =
//! // 10 -   6   -   2 ^ 9   = -508
//! let tail = [(Sub, 2), (Mul, 3), (Sub, 2), (Pow, 3), (Pow, 2)];
//! assert_eq!(prec_climb::climb(10, tail), -508);
//! ~~~

pub enum Associativity {
    Left,
    Right,
}

pub trait Op {
    fn precedence(&self) -> usize;
    fn associativity(&self) -> Associativity;
}

pub trait Expr<O: Op> {
    fn from_op(lhs: Self, op: O, rhs: Self) -> Self;
}

/// Should the operator `prev` to the left of an operand be applied
/// before the operator `next` to the right of it?
fn binds_before<O: Op>(prev: &O, next: &O) -> bool {
    let (p, n) = (prev.precedence(), next.precedence());
    p > n || (p == n && matches!(next.associativity(), Associativity::Left))
}

/// Fold `head` followed by `(operator, operand)` pairs into one expression.
pub fn climb<O: Op, T: Expr<O>>(head: T, tail: impl IntoIterator<Item = (O, T)>) -> T {
    // left-hand sides whose operator is still waiting for its right-hand side
    let mut waiting: Vec<(T, O)> = Vec::new();
    let mut acc = head;

    for (op, rhs) in tail {
        while let Some((_, prev)) = waiting.last() {
            if !binds_before(prev, &op) {
                break;
            }
            if let Some((lhs, prev)) = waiting.pop() {
                acc = T::from_op(lhs, prev, acc);
            }
        }
        waiting.push((acc, op));
        acc = rhs;
    }

    while let Some((lhs, op)) = waiting.pop() {
        acc = T::from_op(lhs, op, acc);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Tree {
        Leaf(u8),
        Bin(Box<Tree>, char, Box<Tree>),
    }

    impl Op for char {
        fn precedence(&self) -> usize {
            match self {
                '+' | '-' => 0,
                _ => 1,
            }
        }

        fn associativity(&self) -> Associativity {
            match self {
                '-' => Associativity::Left,
                _ => Associativity::Right,
            }
        }
    }

    impl Expr<char> for Tree {
        fn from_op(lhs: Self, op: char, rhs: Self) -> Self {
            Tree::Bin(Box::new(lhs), op, Box::new(rhs))
        }
    }

    fn bin(l: Tree, op: char, r: Tree) -> Tree {
        Tree::from_op(l, op, r)
    }

    use Tree::Leaf;

    #[test]
    fn right_associative_chain() {
        let t = climb(Leaf(1), [('+', Leaf(2)), ('+', Leaf(3))]);
        assert_eq!(t, bin(Leaf(1), '+', bin(Leaf(2), '+', Leaf(3))));
    }

    #[test]
    fn left_associative_chain() {
        let t = climb(Leaf(1), [('-', Leaf(2)), ('-', Leaf(3))]);
        assert_eq!(t, bin(bin(Leaf(1), '-', Leaf(2)), '-', Leaf(3)));
    }

    #[test]
    fn precedence_levels() {
        let t = climb(Leaf(1), [('*', Leaf(2)), ('+', Leaf(3)), ('*', Leaf(4))]);
        let expected = bin(bin(Leaf(1), '*', Leaf(2)), '+', bin(Leaf(3), '*', Leaf(4)));
        assert_eq!(t, expected);
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let tail = (0..100_000).map(|_| ('-', 1_i64));
        impl Expr<char> for i64 {
            fn from_op(lhs: Self, _op: char, rhs: Self) -> Self {
                lhs - rhs
            }
        }
        assert_eq!(climb(0_i64, tail), -100_000);
    }

    #[test]
    fn no_operators() {
        assert_eq!(climb(Leaf(7), [] as [(char, Tree); 0]), Leaf(7));
    }
}
