//! Lazy arithmetic over anims.
//!
//! `a + b` builds a node; nothing is evaluated until the result is sampled. The
//! same operators work on [`Completion`]s: with an incomplete operand the result
//! waits, like the operand, until it is assigned or forced.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::anim::{Anim, AnimNode, Sample};
use crate::clock::Clock;
use crate::error::{AnimError, Result};
use crate::incomplete::{Completion, IncompleteAnim, Params};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Neg,
}

impl ArithOp {
    pub fn name(self) -> &'static str {
        match self {
            ArithOp::Add => "add",
            ArithOp::Sub => "sub",
            ArithOp::Mul => "mul",
            ArithOp::Div => "div",
            ArithOp::Neg => "neg",
        }
    }

    #[inline]
    pub fn is_unary(self) -> bool {
        matches!(self, ArithOp::Neg)
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ArithOp {
    type Err = AnimError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(ArithOp::Add),
            "sub" => Ok(ArithOp::Sub),
            "mul" => Ok(ArithOp::Mul),
            "div" => Ok(ArithOp::Div),
            "neg" => Ok(ArithOp::Neg),
            other => Err(AnimError::invalid(format!("unknown operation {other:?}"))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Arithmetic {
    op: ArithOp,
    lhs: Anim,
    rhs: Option<Anim>,
}

impl Arithmetic {
    /// Build an operation node, checking that `rhs` is present exactly for binary ops.
    pub fn apply(op: ArithOp, lhs: impl Into<Anim>, rhs: Option<Anim>) -> Result<Anim> {
        match (op.is_unary(), rhs.is_some()) {
            (true, true) => Err(AnimError::invalid(format!("{op} takes one operand"))),
            (false, false) => Err(AnimError::invalid(format!("{op} takes two operands"))),
            _ => Ok(Anim::new(AnimNode::Arithmetic(Arithmetic {
                op,
                lhs: lhs.into(),
                rhs,
            }))),
        }
    }

    fn binary(op: ArithOp, lhs: Anim, rhs: Anim) -> Anim {
        Anim::new(AnimNode::Arithmetic(Arithmetic {
            op,
            lhs,
            rhs: Some(rhs),
        }))
    }

    fn unary(op: ArithOp, operand: Anim) -> Anim {
        Anim::new(AnimNode::Arithmetic(Arithmetic {
            op,
            lhs: operand,
            rhs: None,
        }))
    }

    pub fn op(&self) -> ArithOp {
        self.op
    }

    pub fn operands(&self) -> (&Anim, Option<&Anim>) {
        (&self.lhs, self.rhs.as_ref())
    }

    pub(crate) fn sample(&self, now: f32) -> Result<Sample> {
        let a = self.lhs.sample(now)?;
        let Some(rhs) = &self.rhs else {
            return Ok(Sample {
                value: -a.value,
                settled: a.settled,
            });
        };
        let b = rhs.sample(now)?;
        let value = match self.op {
            ArithOp::Add => a.value + b.value,
            ArithOp::Sub => a.value - b.value,
            ArithOp::Mul => a.value * b.value,
            ArithOp::Div => {
                if b.value == 0.0 {
                    return Err(AnimError::domain("division by zero"));
                }
                a.value / b.value
            }
            ArithOp::Neg => -a.value,
        };
        Ok(Sample {
            value,
            settled: a.settled && b.settled,
        })
    }
}

macro_rules! binary_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl $trait for Anim {
            type Output = Anim;
            fn $method(self, rhs: Anim) -> Anim {
                Arithmetic::binary($op, self, rhs)
            }
        }

        impl $trait<&Anim> for &Anim {
            type Output = Anim;
            fn $method(self, rhs: &Anim) -> Anim {
                Arithmetic::binary($op, self.clone(), rhs.clone())
            }
        }

        impl $trait<f32> for Anim {
            type Output = Anim;
            fn $method(self, rhs: f32) -> Anim {
                Arithmetic::binary($op, self, Anim::constant(rhs))
            }
        }

        impl $trait<Anim> for f32 {
            type Output = Anim;
            fn $method(self, rhs: Anim) -> Anim {
                Arithmetic::binary($op, Anim::constant(self), rhs)
            }
        }
    };
}

binary_op!(Add, add, ArithOp::Add);
binary_op!(Sub, sub, ArithOp::Sub);
binary_op!(Mul, mul, ArithOp::Mul);
binary_op!(Div, div, ArithOp::Div);

impl Neg for Anim {
    type Output = Anim;
    fn neg(self) -> Anim {
        Arithmetic::unary(ArithOp::Neg, self)
    }
}

impl Neg for &Anim {
    type Output = Anim;
    fn neg(self) -> Anim {
        Arithmetic::unary(ArithOp::Neg, self.clone())
    }
}

/// Arithmetic with at least one incomplete operand.
///
/// Completing it forwards only `startt`/`endt` to the operands. Values such as a
/// slot's current `start` are never pushed through an operator.
#[derive(Clone, Debug)]
pub struct IncompleteArithmetic {
    op: ArithOp,
    lhs: Box<Completion>,
    rhs: Option<Box<Completion>>,
}

impl IncompleteArithmetic {
    pub fn op(&self) -> ArithOp {
        self.op
    }

    pub fn operands(&self) -> (&Completion, Option<&Completion>) {
        (&self.lhs, self.rhs.as_deref())
    }

    fn combine(op: ArithOp, lhs: Completion, rhs: Option<Completion>) -> Completion {
        match (lhs, rhs) {
            (Completion::Complete(a), None) => Completion::Complete(Arithmetic::unary(op, a)),
            (Completion::Complete(a), Some(Completion::Complete(b))) => {
                Completion::Complete(Arithmetic::binary(op, a, b))
            }
            (lhs, rhs) => Completion::Incomplete(IncompleteAnim::Arithmetic(Self {
                op,
                lhs: Box::new(lhs),
                rhs: rhs.map(Box::new),
            })),
        }
    }

    pub fn complete(&self, args: &Params) -> Result<Completion> {
        let args = timing_only(args);
        let complete = |c: &Completion| match c {
            Completion::Incomplete(inc) => inc.complete(&args),
            done => Ok(done.clone()),
        };
        let lhs = complete(&self.lhs)?;
        let rhs = self.rhs.as_deref().map(complete).transpose()?;
        Ok(Self::combine(self.op, lhs, rhs))
    }

    pub fn force_complete(&self, args: &Params, clock: &Clock) -> Result<Anim> {
        let args = timing_only(args);
        let lhs = self.lhs.force_with(&args, clock)?;
        match self.rhs.as_deref() {
            Some(rhs) => Ok(Arithmetic::binary(self.op, lhs, rhs.force_with(&args, clock)?)),
            None => Ok(Arithmetic::unary(self.op, lhs)),
        }
    }

    pub fn missing_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        for operand in std::iter::once(&*self.lhs).chain(self.rhs.as_deref()) {
            if let Completion::Incomplete(inc) = operand {
                for name in inc.missing_names() {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
            }
        }
        names
    }
}

fn timing_only(args: &Params) -> Params {
    Params {
        startt: args.startt,
        endt: args.endt,
        ..Params::default()
    }
}

macro_rules! completion_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl $trait for Completion {
            type Output = Completion;
            fn $method(self, rhs: Completion) -> Completion {
                IncompleteArithmetic::combine($op, self, Some(rhs))
            }
        }

        impl $trait<Anim> for Completion {
            type Output = Completion;
            fn $method(self, rhs: Anim) -> Completion {
                IncompleteArithmetic::combine($op, self, Some(Completion::Complete(rhs)))
            }
        }

        impl $trait<f32> for Completion {
            type Output = Completion;
            fn $method(self, rhs: f32) -> Completion {
                IncompleteArithmetic::combine($op, self, Some(Completion::from(rhs)))
            }
        }

        impl $trait<Completion> for f32 {
            type Output = Completion;
            fn $method(self, rhs: Completion) -> Completion {
                IncompleteArithmetic::combine($op, Completion::from(self), Some(rhs))
            }
        }
    };
}

completion_op!(Add, add, ArithOp::Add);
completion_op!(Sub, sub, ArithOp::Sub);
completion_op!(Mul, mul, ArithOp::Mul);
completion_op!(Div, div, ArithOp::Div);

impl Neg for Completion {
    type Output = Completion;
    fn neg(self) -> Completion {
        IncompleteArithmetic::combine(ArithOp::Neg, self, None)
    }
}
