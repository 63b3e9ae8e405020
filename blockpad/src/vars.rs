use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of one shared variable entity. Every usage site in the tree stores
/// the key and resolves through [`Variables`], so all usages denote the
/// same entity rather than independent copies with equal names.
///
/// Keys are minted only by a registry and entries are never removed, so a
/// key obtained from a registry stays valid for that registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VarKey(usize);

impl fmt::Display for VarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// One user-introduced variable.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
}

/// The single authority for variable identities. New entities are minted
/// exactly when a mutation introduces a variable (a fresh assignment or a
/// range-for loop); they are never destroyed; a removed assignment leaves
/// a stale but harmless entry behind.
#[derive(Debug, Default)]
pub struct Variables {
    entries: Vec<Variable>,
}

impl Variables {
    pub fn new() -> Self {
        Variables::default()
    }

    /// Register a variable under the given name and return its key.
    pub fn register(&mut self, name: impl Into<String>) -> VarKey {
        self.entries.push(Variable { name: name.into() });
        VarKey(self.entries.len() - 1)
    }

    /// Register a variable under the next free generated name.
    pub fn register_fresh(&mut self) -> VarKey {
        let name = self.fresh_name();
        self.register(name)
    }

    /// Key of the variable with this exact name, if one is registered.
    pub fn lookup(&self, name: &str) -> Option<VarKey> {
        self.entries
            .iter()
            .position(|var| var.name == name)
            .map(VarKey)
    }

    /// First name of the form `var0, var1, var2, ...` not already taken.
    /// Gap-filling: with `var0` and `var2` registered, the next name is
    /// `var1`, not `var3`.
    pub fn fresh_name(&self) -> String {
        let mut i = 0usize;
        loop {
            let candidate = format!("var{}", i);
            if !self.entries.iter().any(|var| var.name == candidate) {
                return candidate;
            }
            i += 1;
        }
    }

    pub fn get(&self, key: VarKey) -> Option<&Variable> {
        self.entries.get(key.0)
    }

    /// Current name of the entity behind `key`.
    /// Panics if the key was not minted by this registry.
    pub fn name(&self, key: VarKey) -> &str {
        &self
            .entries
            .get(key.0)
            .expect("variable key minted by a different registry")
            .name
    }

    /// Rename the shared entity. Observable at every usage site and in all
    /// subsequent generated output.
    pub fn rename(&mut self, key: VarKey, name: impl Into<String>) {
        if let Some(var) = self.entries.get_mut(key.0) {
            var.name = name.into();
        }
    }

    /// All registered entities in registration order, with their keys.
    pub fn iter(&self) -> impl Iterator<Item = (VarKey, &Variable)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, var)| (VarKey(i), var))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
