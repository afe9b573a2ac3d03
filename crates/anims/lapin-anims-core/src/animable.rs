//! Named slot layouts and the per-instance slot sets built from them.
//!
//! A [`SlotLayout`] is declared once per type: an ordered set of slots with fixed
//! indices plus swizzles that address several slots as one group. Layouts can extend
//! a single base layout. Each instance owns a [`SlotSet`] with one [`AnimSlot`] per
//! declared slot.

use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::Arc;

use hashbrown::HashMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::anim::Anim;
use crate::assign::Assignment;
use crate::clock::Clock;
use crate::error::{AnimError, Result};
use crate::incomplete::{Completion, IncompleteAnim};
use crate::slot::AnimSlot;

/// One slot in a layout declaration. Slots without an index take the lowest free one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(default)]
    pub default: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwizzleDecl {
    pub name: String,
    pub members: Vec<String>,
}

/// Layout declaration as data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub name: String,
    #[serde(default)]
    pub slots: Vec<SlotDecl>,
    #[serde(default)]
    pub swizzles: Vec<SwizzleDecl>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SlotInfo {
    pub name: String,
    pub index: usize,
    pub default: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Swizzle {
    pub name: String,
    pub members: Vec<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Attr {
    Slot(usize),
    Swizzle(usize),
}

/// Resolved layout. `slots()[i].index == i` for every slot.
#[derive(Debug)]
pub struct SlotLayout {
    name: String,
    slots: Vec<SlotInfo>,
    swizzles: Vec<Swizzle>,
    lookup: HashMap<String, Attr>,
}

impl SlotLayout {
    pub fn builder(name: impl Into<String>) -> LayoutBuilder {
        LayoutBuilder {
            name: name.into(),
            bases: Vec::new(),
            slots: Vec::new(),
            swizzles: Vec::new(),
        }
    }

    /// Build a layout from a declaration, optionally extending `base`.
    pub fn from_spec(spec: &LayoutSpec, base: Option<&Arc<SlotLayout>>) -> Result<Arc<Self>> {
        let bases: Vec<Arc<SlotLayout>> = base.into_iter().cloned().collect();
        Self::assemble(&spec.name, &bases, &spec.slots, &spec.swizzles)
    }

    fn assemble(
        name: &str,
        bases: &[Arc<SlotLayout>],
        new_slots: &[SlotDecl],
        new_swizzles: &[SwizzleDecl],
    ) -> Result<Arc<Self>> {
        if bases.len() > 1 {
            return Err(AnimError::invalid(format!(
                "layout {name} cannot extend more than one slot layout"
            )));
        }
        let base = bases.first();

        let mut slots: Vec<SlotInfo> = base.map(|b| b.slots.clone()).unwrap_or_default();
        let mut used: BTreeSet<usize> = slots.iter().map(|s| s.index).collect();
        for decl in new_slots {
            if let Some(index) = decl.index {
                if !used.insert(index) {
                    return Err(AnimError::invalid(format!("duplicate slot index {index}")));
                }
            }
        }

        let mut next = 0;
        for decl in new_slots {
            let index = match decl.index {
                Some(index) => index,
                None => {
                    while used.contains(&next) {
                        next += 1;
                    }
                    used.insert(next);
                    next
                }
            };
            slots.push(SlotInfo {
                name: decl.name.clone(),
                index,
                default: decl.default,
            });
        }
        slots.sort_by_key(|s| s.index);
        if let Some(last) = slots.last() {
            if last.index + 1 != slots.len() {
                return Err(AnimError::invalid(format!(
                    "slot indices of layout {name} must be contiguous from 0"
                )));
            }
        }

        let mut lookup = HashMap::with_capacity(slots.len());
        for slot in &slots {
            if lookup.insert(slot.name.clone(), Attr::Slot(slot.index)).is_some() {
                return Err(AnimError::invalid(format!("duplicate slot name {:?}", slot.name)));
            }
        }

        let mut swizzles: Vec<Swizzle> = base.map(|b| b.swizzles.clone()).unwrap_or_default();
        for decl in new_swizzles {
            let members = decl
                .members
                .iter()
                .map(|m| match lookup.get(m) {
                    Some(Attr::Slot(index)) => Ok(*index),
                    _ => Err(AnimError::invalid(format!(
                        "swizzle {} refers to unknown slot {m:?}",
                        decl.name
                    ))),
                })
                .collect::<Result<Vec<_>>>()?;
            swizzles.push(Swizzle {
                name: decl.name.clone(),
                members,
            });
        }
        for (i, swizzle) in swizzles.iter().enumerate() {
            if lookup.insert(swizzle.name.clone(), Attr::Swizzle(i)).is_some() {
                return Err(AnimError::invalid(format!(
                    "duplicate attribute name {:?}",
                    swizzle.name
                )));
            }
        }

        debug!(
            "built slot layout {name}: {} slots, {} swizzles",
            slots.len(),
            swizzles.len()
        );
        Ok(Arc::new(Self {
            name: name.to_string(),
            slots,
            swizzles,
            lookup,
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[SlotInfo] {
        &self.slots
    }

    pub fn swizzles(&self) -> &[Swizzle] {
        &self.swizzles
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    pub fn slot_index(&self, name: &str) -> Option<usize> {
        match self.lookup.get(name) {
            Some(Attr::Slot(index)) => Some(*index),
            _ => None,
        }
    }

    /// Slot indices addressed by a swizzle.
    pub fn swizzle(&self, name: &str) -> Option<&[usize]> {
        match self.lookup.get(name) {
            Some(Attr::Swizzle(i)) => Some(&self.swizzles[*i].members),
            _ => None,
        }
    }

    fn attr(&self, name: &str) -> Result<Attr> {
        self.lookup
            .get(name)
            .copied()
            .ok_or_else(|| AnimError::UnknownAttribute {
                name: name.to_string(),
            })
    }
}

/// Declares a layout in code.
#[derive(Clone, Debug)]
pub struct LayoutBuilder {
    name: String,
    bases: Vec<Arc<SlotLayout>>,
    slots: Vec<SlotDecl>,
    swizzles: Vec<SwizzleDecl>,
}

impl LayoutBuilder {
    pub fn slot(self, name: impl Into<String>) -> Self {
        self.slot_with_default(name, 0.0)
    }

    pub fn slot_with_default(mut self, name: impl Into<String>, default: f32) -> Self {
        self.slots.push(SlotDecl {
            name: name.into(),
            index: None,
            default,
        });
        self
    }

    pub fn slot_at(mut self, name: impl Into<String>, index: usize) -> Self {
        self.slots.push(SlotDecl {
            name: name.into(),
            index: Some(index),
            default: 0.0,
        });
        self
    }

    pub fn swizzle(mut self, name: impl Into<String>, members: &[&str]) -> Self {
        self.swizzles.push(SwizzleDecl {
            name: name.into(),
            members: members.iter().map(|m| m.to_string()).collect(),
        });
        self
    }

    /// Extend `base`. Inheriting from more than one layout fails at build time.
    pub fn inherit(mut self, base: &Arc<SlotLayout>) -> Self {
        self.bases.push(base.clone());
        self
    }

    pub fn build(self) -> Result<Arc<SlotLayout>> {
        SlotLayout::assemble(&self.name, &self.bases, &self.slots, &self.swizzles)
    }
}

/// Value written to a named attribute: one assignment for a slot, one per member for
/// a swizzle.
#[derive(Clone, Debug)]
pub enum AttrValue {
    One(Assignment),
    Many(Vec<Assignment>),
}

impl From<Assignment> for AttrValue {
    fn from(a: Assignment) -> Self {
        AttrValue::One(a)
    }
}

impl From<f32> for AttrValue {
    fn from(v: f32) -> Self {
        AttrValue::One(v.into())
    }
}

impl From<Anim> for AttrValue {
    fn from(anim: Anim) -> Self {
        AttrValue::One(anim.into())
    }
}

impl From<Completion> for AttrValue {
    fn from(c: Completion) -> Self {
        AttrValue::One(c.into())
    }
}

impl From<IncompleteAnim> for AttrValue {
    fn from(inc: IncompleteAnim) -> Self {
        AttrValue::One(inc.into())
    }
}

impl<const N: usize> From<[f32; N]> for AttrValue {
    fn from(values: [f32; N]) -> Self {
        AttrValue::Many(values.into_iter().map(Assignment::from).collect())
    }
}

impl From<Vec<f32>> for AttrValue {
    fn from(values: Vec<f32>) -> Self {
        AttrValue::Many(values.into_iter().map(Assignment::from).collect())
    }
}

impl From<Vec<Anim>> for AttrValue {
    fn from(values: Vec<Anim>) -> Self {
        AttrValue::Many(values.into_iter().map(Assignment::from).collect())
    }
}

impl From<Vec<Completion>> for AttrValue {
    fn from(values: Vec<Completion>) -> Self {
        AttrValue::Many(values.into_iter().map(Assignment::from).collect())
    }
}

impl From<Vec<Assignment>> for AttrValue {
    fn from(values: Vec<Assignment>) -> Self {
        AttrValue::Many(values)
    }
}

/// Slots of one instance. New slots hold their declared defaults.
#[derive(Debug)]
pub struct SlotSet {
    layout: Arc<SlotLayout>,
    clock: Clock,
    slots: Vec<Rc<AnimSlot>>,
}

impl SlotSet {
    pub fn new(layout: Arc<SlotLayout>, clock: &Clock) -> Self {
        let slots = layout
            .slots
            .iter()
            .map(|info| {
                let slot = AnimSlot::with_default(info.default);
                slot.set_value(info.default);
                Rc::new(slot)
            })
            .collect();
        Self {
            layout,
            clock: clock.clone(),
            slots,
        }
    }

    /// Create a set and assign initial attributes. Unknown names fail.
    pub fn with_attrs<'a, I>(layout: Arc<SlotLayout>, clock: &Clock, attrs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, AttrValue)>,
    {
        let set = Self::new(layout, clock);
        for (name, value) in attrs {
            set.set(name, value)?;
        }
        Ok(set)
    }

    pub fn layout(&self) -> &Arc<SlotLayout> {
        &self.layout
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn slot(&self, index: usize) -> Option<&Rc<AnimSlot>> {
        self.slots.get(index)
    }

    pub fn slot_named(&self, name: &str) -> Result<&Rc<AnimSlot>> {
        match self.layout.attr(name)? {
            Attr::Slot(index) => Ok(&self.slots[index]),
            Attr::Swizzle(_) => Err(not_a_slot(name)),
        }
    }

    /// Read a single slot at the clock's current time.
    pub fn get(&self, name: &str) -> Result<f32> {
        self.slot_named(name)?.read(self.clock.get_time())
    }

    /// Read a slot or every member of a swizzle.
    pub fn get_group(&self, name: &str) -> Result<Vec<f32>> {
        let now = self.clock.get_time();
        match self.layout.attr(name)? {
            Attr::Slot(index) => Ok(vec![self.slots[index].read(now)?]),
            Attr::Swizzle(i) => self.layout.swizzles[i]
                .members
                .iter()
                .map(|&index| self.slots[index].read(now))
                .collect(),
        }
    }

    pub fn get_array<const N: usize>(&self, name: &str) -> Result<[f32; N]> {
        let values = self.get_group(name)?;
        let len = values.len();
        values.try_into().map_err(|_| {
            AnimError::invalid(format!("{name} has {len} components, expected {N}"))
        })
    }

    pub fn set(&self, name: &str, value: impl Into<AttrValue>) -> Result<()> {
        match (self.layout.attr(name)?, value.into()) {
            (Attr::Slot(index), AttrValue::One(v)) => self.slots[index].assign(v, &self.clock),
            (Attr::Slot(_), AttrValue::Many(values)) => Err(AnimError::invalid(format!(
                "{name} is a single slot but got {} values",
                values.len()
            ))),
            (Attr::Swizzle(i), AttrValue::Many(values)) => {
                let members = &self.layout.swizzles[i].members;
                if members.len() != values.len() {
                    return Err(AnimError::invalid(format!(
                        "{name} has {} components but got {} values",
                        members.len(),
                        values.len()
                    )));
                }
                // all members resolve before any is written
                let resolved = members
                    .iter()
                    .zip(values)
                    .map(|(&index, v)| {
                        self.slots[index]
                            .resolve(v, &self.clock)
                            .map(|r| (index, r))
                    })
                    .collect::<Result<Vec<_>>>()?;
                for (index, r) in resolved {
                    self.slots[index].store(r);
                }
                Ok(())
            }
            (Attr::Swizzle(_), AttrValue::One(_)) => Err(AnimError::invalid(format!(
                "{name} is a swizzle and needs one value per component"
            ))),
        }
    }

    /// Anim that reads the named slot.
    pub fn attr_getter(&self, name: &str) -> Result<Anim> {
        Ok(self.slot_named(name)?.reader())
    }

    /// Readers for a slot or for each member of a swizzle.
    pub fn group_getter(&self, name: &str) -> Result<Vec<Anim>> {
        match self.layout.attr(name)? {
            Attr::Slot(index) => Ok(vec![self.slots[index].reader()]),
            Attr::Swizzle(i) => Ok(self.layout.swizzles[i]
                .members
                .iter()
                .map(|&index| self.slots[index].reader())
                .collect()),
        }
    }
}

fn not_a_slot(name: &str) -> AnimError {
    AnimError::invalid(format!("{name} is a swizzle, not a single slot"))
}

/// Implemented by types that expose animatable attributes through a [`SlotSet`].
pub trait Animable {
    fn slot_set(&self) -> &SlotSet;

    fn get(&self, name: &str) -> Result<f32> {
        self.slot_set().get(name)
    }

    fn get_group(&self, name: &str) -> Result<Vec<f32>> {
        self.slot_set().get_group(name)
    }

    fn set(&self, name: &str, value: impl Into<AttrValue>) -> Result<()>
    where
        Self: Sized,
    {
        self.slot_set().set(name, value)
    }

    fn attr_getter(&self, name: &str) -> Result<Anim> {
        self.slot_set().attr_getter(name)
    }

    fn group_getter(&self, name: &str) -> Result<Vec<Anim>> {
        self.slot_set().group_getter(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::lerp;

    fn point() -> Arc<SlotLayout> {
        SlotLayout::builder("Point")
            .slot("x")
            .slot("y")
            .swizzle("xy", &["x", "y"])
            .build()
            .unwrap()
    }

    #[test]
    fn indices_fill_the_lowest_free_slot() {
        let layout = SlotLayout::builder("Mixed")
            .slot("a")
            .slot_at("b", 0)
            .slot("c")
            .build()
            .unwrap();
        assert_eq!(layout.slot_index("b"), Some(0));
        assert_eq!(layout.slot_index("a"), Some(1));
        assert_eq!(layout.slot_index("c"), Some(2));
    }

    #[test]
    fn inheritance_appends_after_the_base() {
        let base = point();
        let derived = SlotLayout::builder("Point3")
            .inherit(&base)
            .slot("z")
            .swizzle("xyz", &["x", "y", "z"])
            .build()
            .unwrap();
        assert_eq!(derived.slot_index("z"), Some(2));
        assert_eq!(derived.swizzle("xy"), Some(&[0, 1][..]));
        assert_eq!(derived.swizzle("xyz"), Some(&[0, 1, 2][..]));
    }

    #[test]
    fn declaration_errors() {
        let base = point();
        assert!(SlotLayout::builder("Dup")
            .slot_at("a", 0)
            .slot_at("b", 0)
            .build()
            .is_err());
        assert!(SlotLayout::builder("Gap").slot_at("a", 2).build().is_err());
        assert!(SlotLayout::builder("Twice")
            .slot("a")
            .slot("a")
            .build()
            .is_err());
        assert!(SlotLayout::builder("Two")
            .inherit(&base)
            .inherit(&base)
            .build()
            .is_err());
        assert!(SlotLayout::builder("Clash")
            .inherit(&base)
            .slot_at("w", 1)
            .build()
            .is_err());
        assert!(SlotLayout::builder("BadSwizzle")
            .slot("x")
            .swizzle("xy", &["x", "y"])
            .build()
            .is_err());
    }

    #[test]
    fn set_and_get_through_swizzles() {
        let clock = Clock::new();
        let set = SlotSet::new(point(), &clock);
        set.set("xy", [3.0, 4.0]).unwrap();
        assert_eq!(set.get("x").unwrap(), 3.0);
        assert_eq!(set.get("y").unwrap(), 4.0);
        assert_eq!(set.get_array::<2>("xy").unwrap(), [3.0, 4.0]);
        assert!(set.get_array::<3>("xy").is_err());
        assert!(set.set("xy", 1.0).is_err());
        assert!(set.set("xy", [1.0, 2.0, 3.0]).is_err());
        assert!(set.set("x", [1.0, 2.0]).is_err());
    }

    #[test]
    fn failed_swizzle_write_leaves_every_member_untouched() {
        let clock = Clock::new();
        let set = SlotSet::new(point(), &clock);
        set.set("xy", [1.0_f32, 2.0]).unwrap();
        let no_end = lerp().start(0.0).dt(1.0).build().unwrap();
        let err = set
            .set("xy", vec![Assignment::from(5.0_f32), Assignment::from(no_end)])
            .unwrap_err();
        assert_eq!(err.category(), "completion");
        assert_eq!(set.get_group("xy").unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn unknown_names_are_rejected() {
        let clock = Clock::new();
        let err = SlotSet::with_attrs(point(), &clock, [("z", AttrValue::from(1.0_f32))])
            .unwrap_err();
        assert_eq!(err, AnimError::UnknownAttribute { name: "z".into() });
        let set = SlotSet::with_attrs(point(), &clock, [("xy", AttrValue::from([1.0_f32, 2.0]))])
            .unwrap();
        assert_eq!(set.get_group("xy").unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn spec_round_trips_through_json() {
        let spec: LayoutSpec = serde_json::from_str(
            r#"{
                "name": "Tint",
                "slots": [{ "name": "alpha", "default": 1.0 }, { "name": "red" }]
            }"#,
        )
        .unwrap();
        let layout = SlotLayout::from_spec(&spec, None).unwrap();
        let set = SlotSet::new(layout, &Clock::new());
        assert_eq!(set.get("alpha").unwrap(), 1.0);
        assert_eq!(set.get("red").unwrap(), 0.0);
    }
}
