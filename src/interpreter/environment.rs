use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::interpreter::object::Object;

/// A lexical frame: the bindings of one scope plus a link to the scope
/// enclosing it.
///
/// Frames are shared, not copied: every closure created while a frame was
/// current holds a counted reference to that same frame, so a binding
/// added or shadowed later is immediately visible to all holders. A frame
/// is freed when its last referencing closure or call frame is dropped.
pub struct Environment {
    bindings: HashMap<String, Object>,
    outer:    Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Creates the global frame, which encloses nothing.
    #[must_use]
    pub fn global() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { bindings: HashMap::new(),
                                    outer:    None, }))
    }

    /// Creates a fresh frame enclosed by `outer`.
    ///
    /// Call frames use this with the closure's defining environment as the
    /// outer link, which is what gives closures access to the bindings of
    /// the scope they were written in.
    #[must_use]
    pub fn enclosed(outer: Rc<RefCell<Self>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { bindings: HashMap::new(),
                                    outer:    Some(outer), }))
    }

    /// Resolves a name, searching this frame first and then walking
    /// outward. The first match wins.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Object> {
        if let Some(object) = self.bindings.get(name) {
            return Some(object.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.borrow().get(name))
    }

    /// Binds a name in this frame only.
    ///
    /// A name already bound in an outer frame is shadowed here, never
    /// mutated there.
    pub fn set(&mut self, name: impl Into<String>, value: Object) {
        self.bindings.insert(name.into(), value);
    }
}

// Closures reference their defining frame, and that frame may hold the
// closure itself, so a derived Debug would recurse forever. Print the
// bound names only.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.bindings.keys().collect::<Vec<_>>();
        names.sort();
        f.debug_struct("Environment")
         .field("bindings", &names)
         .field("has_outer", &self.outer.is_some())
         .finish()
    }
}
