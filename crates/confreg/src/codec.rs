//! Bidirectional text codecs for configuration values.
//!
//! Every declarable type implements [`ConfigCodec`]: parse a value out of
//! its YAML text form, and render it back. Scalars use plain lexical
//! conversion. Containers are built compositionally on top of the element
//! codec — a sequence decodes by re-stringifying each child node and handing
//! it to the element's own `decode` — so arbitrary nesting such as
//! `IndexMap<String, Vec<u16>>` works with no bespoke code. Supporting a new
//! container shape means writing one more `impl`, never touching the
//! registry or the loader.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use indexmap::IndexMap;
use yaml_rust2::Yaml;

use crate::error::ConversionError;

/// Conversion between a type's in-memory form and its YAML text form.
pub trait ConfigCodec: Sized {
    /// Parse a value from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] on malformed or out-of-range input;
    /// never silently truncates.
    fn decode(text: &str) -> Result<Self, ConversionError>;

    /// Render the value back to YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] when an element cannot be re-parsed
    /// into a document node during container encoding.
    fn encode(&self) -> Result<String, ConversionError>;
}

impl ConfigCodec for String {
    fn decode(text: &str) -> Result<Self, ConversionError> {
        Ok(text.to_string())
    }

    fn encode(&self) -> Result<String, ConversionError> {
        Ok(self.clone())
    }
}

impl ConfigCodec for bool {
    /// Accepts the YAML 1.1 boolean lexicon (`true`/`yes`/`on` and their
    /// casings), matching what the document parser infers for bare scalars.
    fn decode(text: &str) -> Result<Self, ConversionError> {
        match text.trim() {
            "true" | "True" | "TRUE" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" => Ok(true),
            "false" | "False" | "FALSE" | "no" | "No" | "NO" | "off" | "Off" | "OFF" => Ok(false),
            other => Err(ConversionError::Scalar {
                target: "bool",
                text: other.to_string(),
            }),
        }
    }

    fn encode(&self) -> Result<String, ConversionError> {
        Ok(self.to_string())
    }
}

macro_rules! lexical_codec {
    ($($ty:ty),* $(,)?) => {$(
        impl ConfigCodec for $ty {
            fn decode(text: &str) -> Result<Self, ConversionError> {
                text.trim().parse::<$ty>().map_err(|_| ConversionError::Scalar {
                    target: stringify!($ty),
                    text: text.to_string(),
                })
            }

            fn encode(&self) -> Result<String, ConversionError> {
                Ok(self.to_string())
            }
        }
    )*};
}

lexical_codec!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

/// Decode YAML text as a sequence, running the element codec over the
/// textual form of each child node. Order and duplicates are preserved;
/// set containers collapse duplicates at insertion.
fn decode_sequence<T: ConfigCodec>(text: &str) -> Result<Vec<T>, ConversionError> {
    let node = confreg_yaml::parse(text)?;
    let Yaml::Array(items) = node else {
        return Err(ConversionError::Shape {
            expected: "sequence",
            text: text.to_string(),
        });
    };
    items
        .iter()
        .map(|item| T::decode(&confreg_yaml::node_text(item)?))
        .collect()
}

/// Re-parse each encoded element into a document node.
///
/// An element that encodes to the empty string becomes null, so empty
/// strings survive container encoding instead of failing it.
fn encode_elements<'a, T, I>(values: I) -> Result<Vec<Yaml>, ConversionError>
where
    T: ConfigCodec + 'a,
    I: IntoIterator<Item = &'a T>,
{
    values
        .into_iter()
        .map(|value| {
            let text = value.encode()?;
            if text.is_empty() {
                Ok(Yaml::Null)
            } else {
                Ok(confreg_yaml::parse(&text)?)
            }
        })
        .collect()
}

fn encode_sequence<'a, T, I>(values: I) -> Result<String, ConversionError>
where
    T: ConfigCodec + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let node = Yaml::Array(encode_elements(values)?);
    Ok(confreg_yaml::emit(&node)?)
}

impl<T: ConfigCodec> ConfigCodec for Vec<T> {
    fn decode(text: &str) -> Result<Self, ConversionError> {
        decode_sequence(text)
    }

    fn encode(&self) -> Result<String, ConversionError> {
        encode_sequence(self)
    }
}

impl<T: ConfigCodec + Ord> ConfigCodec for BTreeSet<T> {
    fn decode(text: &str) -> Result<Self, ConversionError> {
        Ok(decode_sequence::<T>(text)?.into_iter().collect())
    }

    fn encode(&self) -> Result<String, ConversionError> {
        encode_sequence(self)
    }
}

impl<T: ConfigCodec + Eq + Hash> ConfigCodec for HashSet<T> {
    fn decode(text: &str) -> Result<Self, ConversionError> {
        Ok(decode_sequence::<T>(text)?.into_iter().collect())
    }

    /// Iteration order of the underlying set, i.e. unspecified.
    fn encode(&self) -> Result<String, ConversionError> {
        encode_sequence(self)
    }
}

/// Decode YAML text as a string-keyed mapping. Keys are taken verbatim,
/// never case-folded; document order is preserved in the returned pairs.
fn decode_mapping<T: ConfigCodec>(text: &str) -> Result<Vec<(String, T)>, ConversionError> {
    let node = confreg_yaml::parse(text)?;
    let Yaml::Hash(entries) = node else {
        return Err(ConversionError::Shape {
            expected: "mapping",
            text: text.to_string(),
        });
    };
    entries
        .iter()
        .map(|(key, value)| {
            let key = confreg_yaml::scalar_text(key).ok_or(ConversionError::NonScalarKey)?;
            let value = T::decode(&confreg_yaml::node_text(value)?)?;
            Ok((key, value))
        })
        .collect()
}

fn encode_mapping<'a, T, I>(entries: I) -> Result<String, ConversionError>
where
    T: ConfigCodec + 'a,
    I: IntoIterator<Item = (&'a String, &'a T)>,
{
    let mut hash = yaml_rust2::yaml::Hash::new();
    for (key, value) in entries {
        let text = value.encode()?;
        let node = if text.is_empty() {
            Yaml::Null
        } else {
            confreg_yaml::parse(&text)?
        };
        hash.insert(Yaml::String(key.clone()), node);
    }
    Ok(confreg_yaml::emit(&Yaml::Hash(hash))?)
}

impl<T: ConfigCodec> ConfigCodec for IndexMap<String, T> {
    fn decode(text: &str) -> Result<Self, ConversionError> {
        Ok(decode_mapping::<T>(text)?.into_iter().collect())
    }

    fn encode(&self) -> Result<String, ConversionError> {
        encode_mapping(self.iter())
    }
}

impl<T: ConfigCodec> ConfigCodec for HashMap<String, T> {
    fn decode(text: &str) -> Result<Self, ConversionError> {
        Ok(decode_mapping::<T>(text)?.into_iter().collect())
    }

    /// Iteration order of the underlying map, i.e. unspecified.
    fn encode(&self) -> Result<String, ConversionError> {
        encode_mapping(self.iter())
    }
}
