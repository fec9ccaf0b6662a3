//! `Entity`: the opaque, value-like record held in an [`EntityList`].
//!
//! The planner never inspects entities beyond equality and identity bytes.
//! Identity bytes feed the state fingerprint used for visited-set dedup, so
//! two entities that compare equal must write identical bytes, and the
//! encoding must be self-delimiting (length-prefixed for variable-width data)
//! so that concatenations stay unambiguous.
//!
//! [`EntityList`]: crate::carrier::entity_list::EntityList

use std::fmt;

/// A structural program entity (declaration, invocation, ...).
///
/// `Send + Sync` so states and action libraries can be shared across threads.
pub trait Entity: Clone + Eq + fmt::Debug + Send + Sync + 'static {
    /// Append the canonical identity encoding of this entity to `buf`.
    fn write_identity(&self, buf: &mut Vec<u8>);

    /// Human-readable label for audit output.
    fn label(&self) -> String {
        format!("{self:?}")
    }
}

/// Write a length-prefixed UTF-8 string (u64 LE length, then bytes).
pub fn write_str_identity(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u64).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

impl Entity for String {
    fn write_identity(&self, buf: &mut Vec<u8>) {
        write_str_identity(buf, self);
    }

    fn label(&self) -> String {
        self.clone()
    }
}

impl Entity for &'static str {
    fn write_identity(&self, buf: &mut Vec<u8>) {
        write_str_identity(buf, self);
    }

    fn label(&self) -> String {
        (*self).to_string()
    }
}

impl Entity for char {
    fn write_identity(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&u32::from(*self).to_le_bytes());
    }

    fn label(&self) -> String {
        self.to_string()
    }
}

macro_rules! impl_integer_entity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Entity for $ty {
                fn write_identity(&self, buf: &mut Vec<u8>) {
                    buf.extend_from_slice(&self.to_le_bytes());
                }

                fn label(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

impl_integer_entity!(u8, u16, u32, u64, i32, i64);
