//! Reads from memory owned outside the anim graph.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::anim::{Anim, AnimNode, Sample};
use crate::error::Result;

/// Reads through an accessor on every evaluation. The owner is held only to keep
/// the data alive; the anim never writes to it.
pub struct Pointer {
    owner: Rc<dyn Any>,
    read: Box<dyn Fn() -> f32>,
}

impl Pointer {
    pub fn owner(&self) -> Rc<dyn Any> {
        self.owner.clone()
    }

    pub(crate) fn sample(&self) -> Result<Sample> {
        Ok(Sample::live((self.read)()))
    }
}

impl fmt::Debug for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pointer(..)")
    }
}

/// Anim that reads `read(&owner)` each time it is evaluated.
pub fn pointer<T, F>(owner: Rc<T>, read: F) -> Anim
where
    T: 'static,
    F: Fn(&T) -> f32 + 'static,
{
    let held = owner.clone();
    Anim::new(AnimNode::Pointer(Pointer {
        owner,
        read: Box::new(move || read(&held)),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Body {
        angle: Cell<f32>,
    }

    #[test]
    fn follows_external_state() {
        let body = Rc::new(Body {
            angle: Cell::new(20.0),
        });
        let a = pointer(body.clone(), |b| b.angle.get());
        assert_eq!(a.evaluate(0.0).unwrap(), 20.0);
        body.angle.set(30.0);
        assert_eq!(a.evaluate(0.0).unwrap(), 30.0);
    }

    #[test]
    fn keeps_the_owner_alive() {
        let body = Rc::new(Body {
            angle: Cell::new(1.0),
        });
        let a = pointer(body.clone(), |b| b.angle.get());
        let AnimNode::Pointer(node) = a.node() else {
            panic!("expected a pointer node");
        };
        assert!(node.owner().downcast::<Body>().is_ok());
        drop(body);
        assert_eq!(a.evaluate(0.0).unwrap(), 1.0);
    }
}
