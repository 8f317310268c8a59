//!
//! Structure describing secret.
//!

use std::{fmt, marker::PhantomData};

use crate::{strategy::Strategy, ExposeInterface, PeekInterface, WithType};

///
/// Secret thing.
///
/// To get access to the value use the method `expose()` of trait [`ExposeInterface`]
/// or `peek()` of trait [`PeekInterface`].
///
/// Serialization writes the inner value as is: the wire formats these clients speak
/// carry credentials in the body, so masking applies to `Debug` and logs only.
///
pub struct Secret<SecretValue, MaskingStrategy = WithType>
where
    MaskingStrategy: Strategy<SecretValue>,
{
    inner_secret: SecretValue,
    marker: PhantomData<MaskingStrategy>,
}

impl<SecretValue, MaskingStrategy> Secret<SecretValue, MaskingStrategy>
where
    MaskingStrategy: Strategy<SecretValue>,
{
    /// Take ownership of a secret value
    pub fn new(secret: SecretValue) -> Self {
        Self {
            inner_secret: secret,
            marker: PhantomData,
        }
    }
}

impl<SecretValue, MaskingStrategy> PeekInterface<SecretValue>
    for Secret<SecretValue, MaskingStrategy>
where
    MaskingStrategy: Strategy<SecretValue>,
{
    fn peek(&self) -> &SecretValue {
        &self.inner_secret
    }
}

impl<SecretValue, MaskingStrategy> ExposeInterface<SecretValue>
    for Secret<SecretValue, MaskingStrategy>
where
    MaskingStrategy: Strategy<SecretValue>,
{
    fn expose(self) -> SecretValue {
        self.inner_secret
    }
}

impl<SecretValue, MaskingStrategy> From<SecretValue> for Secret<SecretValue, MaskingStrategy>
where
    MaskingStrategy: Strategy<SecretValue>,
{
    fn from(secret: SecretValue) -> Self {
        Self::new(secret)
    }
}

impl<MaskingStrategy> From<&str> for Secret<String, MaskingStrategy>
where
    MaskingStrategy: Strategy<String>,
{
    fn from(secret: &str) -> Self {
        Self::new(secret.to_owned())
    }
}

impl<SecretValue, MaskingStrategy> Clone for Secret<SecretValue, MaskingStrategy>
where
    SecretValue: Clone,
    MaskingStrategy: Strategy<SecretValue>,
{
    fn clone(&self) -> Self {
        Self::new(self.inner_secret.clone())
    }
}

impl<SecretValue, MaskingStrategy> PartialEq for Secret<SecretValue, MaskingStrategy>
where
    SecretValue: PartialEq,
    MaskingStrategy: Strategy<SecretValue>,
{
    fn eq(&self, other: &Self) -> bool {
        self.peek().eq(other.peek())
    }
}

impl<SecretValue, MaskingStrategy> Eq for Secret<SecretValue, MaskingStrategy>
where
    SecretValue: Eq,
    MaskingStrategy: Strategy<SecretValue>,
{
}

impl<SecretValue, MaskingStrategy> fmt::Debug for Secret<SecretValue, MaskingStrategy>
where
    MaskingStrategy: Strategy<SecretValue>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        MaskingStrategy::fmt(&self.inner_secret, f)
    }
}

impl<SecretValue, MaskingStrategy> Default for Secret<SecretValue, MaskingStrategy>
where
    SecretValue: Default,
    MaskingStrategy: Strategy<SecretValue>,
{
    fn default() -> Self {
        SecretValue::default().into()
    }
}

impl<SecretValue, MaskingStrategy> serde::Serialize for Secret<SecretValue, MaskingStrategy>
where
    SecretValue: serde::Serialize,
    MaskingStrategy: Strategy<SecretValue>,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner_secret.serialize(serializer)
    }
}

impl<'de, SecretValue, MaskingStrategy> serde::Deserialize<'de>
    for Secret<SecretValue, MaskingStrategy>
where
    SecretValue: serde::Deserialize<'de>,
    MaskingStrategy: Strategy<SecretValue>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SecretValue::deserialize(deserializer).map(Self::new)
    }
}
