//! Lexical scope frames.
//!
//! Each [`Environment`] maps names to values for one block or call and points
//! at the frame that encloses it.  Frames are shared through [`EnvRef`]
//! (`Rc<RefCell<_>>`) so a closure can keep the frame it captured alive after
//! the block that created it has exited; a frame is freed when the last inner
//! frame or closure holding it goes away.
//!
//! The value type is the evaluator's business, hence the `V` parameter.

use crate::error::{LoxError, Result};
use crate::token::Token;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a frame.
pub type EnvRef<V> = Rc<RefCell<Environment<V>>>;

#[derive(Debug, Clone)]
pub struct Environment<V> {
    values: HashMap<String, V>,
    enclosing: Option<EnvRef<V>>,
}

impl<V: Clone> Default for Environment<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Environment<V> {
    /// The outermost (global) frame.
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: EnvRef<V>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Wrap this frame in a shareable handle.
    pub fn into_ref(self) -> EnvRef<V> {
        Rc::new(RefCell::new(self))
    }

    pub fn enclosing(&self) -> Option<EnvRef<V>> {
        self.enclosing.clone()
    }

    /// Is `name` bound in *this* frame (ignoring enclosing ones)?
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Bind `name` in this frame.  Re‑defining overwrites.
    pub fn define(&mut self, name: &str, value: V) {
        debug!("define '{}'", name);

        self.values.insert(name.to_string(), value);
    }

    /// Look `name` up here, then outwards.
    pub fn get(&self, name: &Token) -> Result<V> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(LoxError::undefined(name))
        }
    }

    /// Update the nearest existing binding of `name`.  Never declares.
    pub fn assign(&mut self, name: &Token, value: V) -> Result<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(LoxError::undefined(name))
        }
    }

    /// Read `name` from the frame exactly `distance` hops out, without
    /// searching.  `distance` comes from a static resolution pass.
    pub fn get_at(&self, distance: usize, name: &Token) -> Result<V> {
        if distance == 0 {
            return self
                .values
                .get(&name.lexeme)
                .cloned()
                .ok_or_else(|| LoxError::undefined(name));
        }

        let frame: EnvRef<V> = self.hop(distance, name)?;
        let value: Option<V> = frame.borrow().values.get(&name.lexeme).cloned();

        value.ok_or_else(|| LoxError::undefined(name))
    }

    /// Write `name` into the frame exactly `distance` hops out.
    pub fn assign_at(&mut self, distance: usize, name: &Token, value: V) -> Result<()> {
        if distance == 0 {
            self.values.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        let frame: EnvRef<V> = self.hop(distance, name)?;
        frame.borrow_mut().values.insert(name.lexeme.clone(), value);

        Ok(())
    }

    /// Walk `distance` enclosing links starting from `env` itself.
    pub fn ancestor(env: &EnvRef<V>, distance: usize) -> Option<EnvRef<V>> {
        let mut frame: EnvRef<V> = Rc::clone(env);

        for _ in 0..distance {
            let next: EnvRef<V> = frame.borrow().enclosing.clone()?;
            frame = next;
        }

        Some(frame)
    }

    /// `distance >= 1` hops out from this frame.
    fn hop(&self, distance: usize, name: &Token) -> Result<EnvRef<V>> {
        let invalid = || LoxError::InvalidDepth {
            name: name.clone(),
            distance,
        };

        let first: &EnvRef<V> = self.enclosing.as_ref().ok_or_else(invalid)?;

        Self::ancestor(first, distance - 1).ok_or_else(invalid)
    }
}
