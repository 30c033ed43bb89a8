//! Allow-list of names that decoding may turn back into typed values.
//!
//! Nothing is resolved by reflection: a class name read from an envelope is
//! only constructible if it was registered here first.

use std::collections::HashMap;
use std::fmt;

use pyon_types::{CompositeKind, DynamicObject, Entity, EntityType, EnumConstant, Value};

type Factory = Box<dyn Fn() -> Box<dyn Entity> + Send + Sync>;

/// Member table of an enumerated type.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumDescriptor {
    name: String,
    members: Vec<(String, Value)>,
}

impl EnumDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn member(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members.push((name.into(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.members.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// The first member whose underlying value equals `value`.
    pub fn lookup(&self, value: &Value) -> Option<EnumConstant> {
        self.members
            .iter()
            .find(|(_, v)| v == value)
            .map(|(member, v)| EnumConstant::new(self.name.clone(), member.clone(), v.clone()))
    }

    pub fn by_name(&self, member: &str) -> Option<EnumConstant> {
        self.members
            .iter()
            .find(|(n, _)| n == member)
            .map(|(member, v)| EnumConstant::new(self.name.clone(), member.clone(), v.clone()))
    }
}

/// What a registered name resolves to.
pub enum ClassEntry {
    Entity {
        kind: CompositeKind,
        factory: Factory,
    },
    Enum(EnumDescriptor),
}

impl ClassEntry {
    /// A default-initialised instance, for entity entries.
    pub fn instantiate(&self) -> Option<Box<dyn Entity>> {
        match self {
            ClassEntry::Entity { factory, .. } => Some(factory()),
            ClassEntry::Enum(_) => None,
        }
    }

    /// Registered composite flavour, for entity entries.
    pub fn kind(&self) -> Option<CompositeKind> {
        match self {
            ClassEntry::Entity { kind, .. } => Some(*kind),
            ClassEntry::Enum(_) => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumDescriptor> {
        match self {
            ClassEntry::Enum(descriptor) => Some(descriptor),
            ClassEntry::Entity { .. } => None,
        }
    }
}

impl fmt::Debug for ClassEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassEntry::Entity { kind, .. } => {
                f.debug_struct("Entity").field("kind", kind).finish_non_exhaustive()
            }
            ClassEntry::Enum(descriptor) => f.debug_tuple("Enum").field(descriptor).finish(),
        }
    }
}

/// Name → constructor table consulted during decode.
///
/// Populated once at startup and then shared read-only; it is `Send + Sync`
/// so concurrent decodes can borrow the same registry.
#[derive(Default)]
pub struct ClassRegistry {
    entries: HashMap<String, ClassEntry>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a statically typed entity under its `CLASS_NAME`.
    pub fn register<T: EntityType>(&mut self) -> &mut Self {
        self.entries.insert(
            T::CLASS_NAME.to_string(),
            ClassEntry::Entity {
                kind: T::KIND,
                factory: Box::new(|| Box::new(T::default()) as Box<dyn Entity>),
            },
        );
        self
    }

    /// Register a name that decodes into an open [`DynamicObject`].
    pub fn register_dynamic(&mut self, name: impl Into<String>, kind: CompositeKind) -> &mut Self {
        let name = name.into();
        let class = name.clone();
        self.entries.insert(
            name,
            ClassEntry::Entity {
                kind,
                factory: Box::new(move || {
                    Box::new(DynamicObject::new(class.clone(), kind)) as Box<dyn Entity>
                }),
            },
        );
        self
    }

    pub fn register_enum(&mut self, descriptor: EnumDescriptor) -> &mut Self {
        self.entries
            .insert(descriptor.name().to_string(), ClassEntry::Enum(descriptor));
        self
    }

    pub fn resolve(&self, name: &str) -> Option<&ClassEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRegistry")
            .field("names", &self.names())
            .finish()
    }
}
