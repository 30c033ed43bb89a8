use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AttributeError;
use crate::value::{Map, Value};

/// Flavour of an attribute-bearing type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeKind {
    /// Ordinary object with an attribute dictionary.
    Object,
    /// Declarative record type (fixed, declared field list).
    Record,
}

/// Object-safe plumbing that lets `Box<dyn Entity>` be cloned, compared and
/// downcast. Implemented automatically for every `Entity + Clone + PartialEq`.
pub trait EntityBase {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn clone_entity(&self) -> Box<dyn Entity>;
    fn eq_entity(&self, other: &dyn Entity) -> bool;
}

impl<T> EntityBase for T
where
    T: Entity + Clone + PartialEq + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_entity(&self) -> Box<dyn Entity> {
        Box::new(self.clone())
    }

    fn eq_entity(&self, other: &dyn Entity) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }
}

/// Field-level reflection a type opts into so it can be encoded as a
/// composite envelope and rebuilt without running its constructor.
///
/// Decoding allocates a default instance through the class registry and then
/// calls [`Entity::set_attribute`] once per decoded entry, in payload order.
pub trait Entity: EntityBase + fmt::Debug + Send + Sync {
    /// Fully-qualified type name recorded in the envelope.
    fn class_name(&self) -> &str;

    fn kind(&self) -> CompositeKind;

    /// Attribute names and values in declaration order.
    ///
    /// Names keep their leading underscores; visibility is derived from them
    /// at encode time.
    fn attributes(&self) -> Vec<(String, Value)>;

    /// Inject one decoded attribute into an allocated instance.
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), AttributeError>;

    /// Lifecycle hook run once after a top-level decode, so the instance can
    /// repair invariants its constructor would normally establish.
    fn post_decode(&mut self) {}
}

/// A statically known entity type that can be registered by type.
pub trait EntityType: Entity + Default + Clone + PartialEq + 'static {
    const CLASS_NAME: &'static str;
    const KIND: CompositeKind;
}

// ---------------------------------------------------------------------------
// Object
// ---------------------------------------------------------------------------

/// Owned handle to any entity instance.
pub struct Object(Box<dyn Entity>);

impl Object {
    pub fn new<E: Entity + 'static>(entity: E) -> Self {
        Self(Box::new(entity))
    }

    pub fn from_box(entity: Box<dyn Entity>) -> Self {
        Self(entity)
    }

    pub fn class_name(&self) -> &str {
        self.0.class_name()
    }

    pub fn kind(&self) -> CompositeKind {
        self.0.kind()
    }

    pub fn attributes(&self) -> Vec<(String, Value)> {
        self.0.attributes()
    }

    pub fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), AttributeError> {
        self.0.set_attribute(name, value)
    }

    pub fn post_decode(&mut self) {
        self.0.post_decode()
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.0.as_any_mut().downcast_mut::<T>()
    }

    pub fn into_inner(self) -> Box<dyn Entity> {
        self.0
    }
}

impl Clone for Object {
    fn clone(&self) -> Self {
        Self(self.0.clone_entity())
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_entity(other.0.as_ref())
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<E: Entity + 'static> From<E> for Object {
    fn from(entity: E) -> Self {
        Object::new(entity)
    }
}

// ---------------------------------------------------------------------------
// DynamicObject
// ---------------------------------------------------------------------------

/// Entity whose attribute set is open: any name can be injected.
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicObject {
    pub class: String,
    pub kind: CompositeKind,
    pub attributes: Map,
}

impl DynamicObject {
    pub fn new(class: impl Into<String>, kind: CompositeKind) -> Self {
        Self {
            class: class.into(),
            kind,
            attributes: Map::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

impl Entity for DynamicObject {
    fn class_name(&self) -> &str {
        &self.class
    }

    fn kind(&self) -> CompositeKind {
        self.kind
    }

    fn attributes(&self) -> Vec<(String, Value)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), AttributeError> {
        self.attributes.insert(name.to_string(), value);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// EnumConstant
// ---------------------------------------------------------------------------

/// One member of an enumerated type.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumConstant {
    /// Fully-qualified enum type name.
    pub class: String,
    /// Member name.
    pub member: String,
    /// Underlying value; this is what gets encoded.
    pub value: Box<Value>,
}

impl EnumConstant {
    pub fn new(class: impl Into<String>, member: impl Into<String>, value: Value) -> Self {
        Self {
            class: class.into(),
            member: member.into(),
            value: Box::new(value),
        }
    }
}

// ---------------------------------------------------------------------------
// impl_entity!
// ---------------------------------------------------------------------------

/// Implement [`Entity`] and [`EntityType`] for a struct from its field list.
///
/// Every listed field must implement [`crate::ToValue`] and
/// [`crate::FromValue`]; the struct must be `Default + Clone + PartialEq`.
///
/// ```
/// use pyon_types::impl_entity;
///
/// #[derive(Clone, Debug, Default, PartialEq)]
/// struct Point {
///     x: i64,
///     y: i64,
///     _cache: Option<String>,
/// }
///
/// impl_entity!(Point, "geometry.Point", record { x, y, _cache });
/// ```
#[macro_export]
macro_rules! impl_entity {
    (@kind object) => { $crate::CompositeKind::Object };
    (@kind record) => { $crate::CompositeKind::Record };
    ($ty:ty, $class:literal, $kind:ident { $($field:ident),* $(,)? } $(, on_decode = $hook:path)?) => {
        impl $crate::Entity for $ty {
            fn class_name(&self) -> &str {
                $class
            }

            fn kind(&self) -> $crate::CompositeKind {
                $crate::impl_entity!(@kind $kind)
            }

            fn attributes(&self) -> ::std::vec::Vec<(::std::string::String, $crate::Value)> {
                ::std::vec![
                    $((
                        ::std::string::String::from(stringify!($field)),
                        $crate::ToValue::to_value(&self.$field),
                    )),*
                ]
            }

            #[allow(unused_variables)]
            fn set_attribute(
                &mut self,
                name: &str,
                value: $crate::Value,
            ) -> ::std::result::Result<(), $crate::AttributeError> {
                match name {
                    $(stringify!($field) => {
                        self.$field = $crate::FromValue::from_value(value).map_err(|source| {
                            $crate::AttributeError::Conversion {
                                name: name.to_string(),
                                source,
                            }
                        })?;
                        Ok(())
                    })*
                    _ => Err($crate::AttributeError::Unknown(name.to_string())),
                }
            }

            $(
                fn post_decode(&mut self) {
                    $hook(self)
                }
            )?
        }

        impl $crate::EntityType for $ty {
            const CLASS_NAME: &'static str = $class;
            const KIND: $crate::CompositeKind = $crate::impl_entity!(@kind $kind);
        }
    };
}
