//! Lexically-nested environments.
//!
//! Frames form chains (bottom = global). The global frame stores its
//! variables on the global object's property map, so undeclared assignment
//! lands there and globals are visible as properties. Each frame also pins
//! the values allocated while it was the innermost frame, which keeps
//! not-yet-linked temporaries alive across a collection cycle.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::heap::Value;
use crate::value::JsString;

pub type ScopeRef = Rc<RefCell<ScopeFrame>>;

/// A scope chain: the frames visible from an execution point, bottom first.
pub type ScopeChain = Vec<ScopeRef>;

enum FrameStorage {
    /// Variables live on the global object.
    Global(Value),
    /// Ordinary function/catch frame.
    Local(rustc_hash::FxHashMap<JsString, Value>),
}

pub struct ScopeFrame {
    storage: FrameStorage,
    pub this_value: Value,
    /// Values allocated while this frame was innermost; GC roots until the
    /// frame pops or the interpreter reaches a statement boundary.
    pub allocated: FxHashSet<Value>,
}

impl ScopeFrame {
    /// The global frame, backed by the global object. `this` is the global
    /// object itself.
    pub fn global(global_object: Value) -> ScopeRef {
        Rc::new(RefCell::new(ScopeFrame {
            storage: FrameStorage::Global(global_object),
            this_value: global_object,
            allocated: FxHashSet::default(),
        }))
    }

    /// A local frame with the given `this` context.
    pub fn local(this_value: Value) -> ScopeRef {
        Rc::new(RefCell::new(ScopeFrame {
            storage: FrameStorage::Local(rustc_hash::FxHashMap::default()),
            this_value,
            allocated: FxHashSet::default(),
        }))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        match &self.storage {
            FrameStorage::Global(object) => object.get_own(name),
            FrameStorage::Local(variables) => variables.get(name).copied(),
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Create or overwrite a binding in this frame.
    pub fn define(&mut self, name: JsString, value: Value) {
        match &mut self.storage {
            FrameStorage::Global(object) => object.set_property(name, value),
            FrameStorage::Local(variables) => {
                variables.insert(name, value);
            }
        }
    }

    /// Overwrite an existing binding. Returns false when the name is not
    /// bound in this frame.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        match &mut self.storage {
            FrameStorage::Global(object) => {
                if object.get_own(name).is_some() {
                    object.set_property(name, value);
                    true
                } else {
                    false
                }
            }
            FrameStorage::Local(variables) => match variables.get_mut(name) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            },
        }
    }

    /// Push every value this frame keeps alive onto the GC worklist.
    pub fn trace(&self, worklist: &mut Vec<Value>) {
        worklist.push(self.this_value);
        match &self.storage {
            FrameStorage::Global(object) => worklist.push(*object),
            FrameStorage::Local(variables) => worklist.extend(variables.values().copied()),
        }
        worklist.extend(self.allocated.iter().copied());
    }
}
