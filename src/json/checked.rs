use std::fmt::Debug;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An enumeration with a fixed set of wire values.
pub trait WireEnum: Sized + Clone + Eq + Ord + Hash + Debug {
    type Wire: Clone + Eq + Ord + Hash + Debug + Serialize + DeserializeOwned;

    fn from_wire(wire: &Self::Wire) -> Option<Self>;
    fn to_wire(&self) -> Self::Wire;
}

/// A decoded enum value, or the raw wire value when it is not one we know.
/// Unknown values are written back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Checked<T: WireEnum> {
    Valid(T),
    Invalid(T::Wire),
}

impl<T: WireEnum> Checked<T> {
    pub fn from_wire(wire: T::Wire) -> Self {
        match T::from_wire(&wire) {
            Some(value) => Checked::Valid(value),
            None => Checked::Invalid(wire),
        }
    }

    pub fn wire(&self) -> T::Wire {
        match self {
            Checked::Valid(value) => value.to_wire(),
            Checked::Invalid(wire) => wire.clone(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Checked::Valid(_))
    }

    pub fn valid(&self) -> Option<&T> {
        match self {
            Checked::Valid(value) => Some(value),
            Checked::Invalid(_) => None,
        }
    }
}

impl<T: WireEnum> From<T> for Checked<T> {
    fn from(value: T) -> Self {
        Checked::Valid(value)
    }
}

impl<T: WireEnum> Serialize for Checked<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Checked::Valid(value) => value.to_wire().serialize(serializer),
            Checked::Invalid(wire) => wire.serialize(serializer),
        }
    }
}

impl<'de, T: WireEnum> Deserialize<'de> for Checked<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::Wire::deserialize(deserializer).map(Checked::from_wire)
    }
}

/// Declare a fieldless enum together with its integer or string wire values.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident: u32 {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::json::checked::WireEnum for $name {
            type Wire = u32;

            fn from_wire(wire: &u32) -> Option<Self> {
                match *wire {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }

            fn to_wire(&self) -> u32 {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }
    };
    (
        $(#[$meta:meta])*
        pub enum $name:ident: str {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::json::checked::WireEnum for $name {
            type Wire = String;

            fn from_wire(wire: &String) -> Option<Self> {
                match wire.as_str() {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }

            fn to_wire(&self) -> String {
                match self {
                    $($name::$variant => $value.to_string()),+
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    wire_enum! {
        pub enum Flavor: u32 {
            Sweet = 1,
            Sour = 2,
        }
    }

    wire_enum! {
        pub enum Color: str {
            Red = "RED",
            Blue = "BLUE",
        }
    }

    #[test]
    fn known_values_decode() {
        let flavor: Checked<Flavor> = serde_json::from_str("2").unwrap();
        assert_eq!(flavor, Checked::Valid(Flavor::Sour));
        let color: Checked<Color> = serde_json::from_str("\"BLUE\"").unwrap();
        assert_eq!(color.valid(), Some(&Color::Blue));
        assert_eq!(serde_json::to_string(&Checked::Valid(Color::Red)).unwrap(), "\"RED\"");
    }

    #[test]
    fn unknown_values_round_trip() {
        let flavor: Checked<Flavor> = serde_json::from_str("99").unwrap();
        assert_eq!(flavor, Checked::Invalid(99));
        assert!(!flavor.is_valid());
        assert_eq!(serde_json::to_string(&flavor).unwrap(), "99");

        let color: Checked<Color> = serde_json::from_str("\"MAUVE\"").unwrap();
        assert_eq!(color.wire(), "MAUVE");
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"MAUVE\"");
    }

    #[test]
    fn wrong_wire_type_is_an_error() {
        assert!(serde_json::from_str::<Checked<Flavor>>("\"1\"").is_err());
        assert!(serde_json::from_str::<Checked<Color>>("1").is_err());
    }
}
