//! Lapin Anims Core
//!
//! Time-driven values for animatable attributes. An [`Anim`] is a small expression
//! graph (interpolations, chains, arithmetic, wraps, rates, slot readers) evaluated
//! against a [`Clock`]. Attributes live in [`AnimSlot`]s, grouped per instance in a
//! [`SlotSet`] whose names and indices come from a shared [`SlotLayout`].
//!
//! Single-threaded: clocks, anims and slots use `Rc` and interior mutability.

pub mod anim;
pub mod animable;
pub mod arith;
pub mod assign;
pub mod builder;
pub mod chain;
pub mod clock;
pub mod config;
pub mod error;
pub mod incomplete;
pub mod interp;
pub mod pointer;
pub mod proxy;
pub mod rate;
pub mod slot;
pub mod wrap;

// Re-exports for consumers
pub use anim::{Anim, AnimNode, Sample};
pub use animable::{
    Animable, AttrValue, LayoutBuilder, LayoutSpec, SlotDecl, SlotInfo, SlotLayout, SlotSet,
    Swizzle, SwizzleDecl,
};
pub use arith::{ArithOp, Arithmetic, IncompleteArithmetic};
pub use assign::Assignment;
pub use builder::{chain, chain_components, ease, ease_in, ease_out, lerp, InterpolateBuilder};
pub use chain::{Chain, Segment};
pub use clock::Clock;
pub use config::Config;
pub use error::AnimError;
pub use incomplete::{
    Completion, Driver, IncompleteAnim, IncompleteChain, IncompleteInterpolate, Param, Params,
};
pub use interp::{
    bezier3, bezier3_components, Bezier3Builder, CubicBezier, Easing, ExtendMode, Interpolate,
    Timing,
};
pub use pointer::{pointer, Pointer};
pub use proxy::AnimProxy;
pub use rate::{rate, rate_since, Rate};
pub use slot::{AnimSlot, SlotState};
pub use wrap::{wrap, wrap_components, SharedBounds, Wrap, WrapBounds};
