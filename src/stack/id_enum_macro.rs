/// Defines a closed identifier enum with a canonical lowercase name per variant.
///
/// Generates `name`, `from_name`, `all_variants`, `Display`, `FromStr` and
/// string-based serde impls. Unknown names are rejected.
#[macro_export]
macro_rules! define_id_enum {
    (
        $(#[$enum_meta:meta])*
        $enum_name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $name:literal $( | $alias:literal )*
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $enum_name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $enum_name {
            pub fn name(&self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $name,
                    )*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(
                        $name $(| $alias)* => Some(Self::$variant),
                    )*
                    _ => None,
                }
            }

            pub fn all_variants() -> &'static [Self] {
                &[
                    $(
                        Self::$variant,
                    )*
                ]
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_name(s).ok_or_else(|| {
                    let valid: Vec<&str> = Self::all_variants().iter().map(|v| v.name()).collect();
                    format!(
                        "Unknown {}: {}. Valid options: {}",
                        stringify!($enum_name),
                        s,
                        valid.join(", ")
                    )
                })
            }
        }

        impl serde::Serialize for $enum_name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}
