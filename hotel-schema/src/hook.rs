use std::marker::PhantomData;

use anyhow::Result;
use async_trait::async_trait;
use hotel_core::{HookContext, HotelBeforeHook};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use crate::normalize;

/// Before-hook that replaces `ctx.data` with the body parsed and validated
/// as `T`. Register it for `create` and `update`.
pub struct ValidateSchema<T> {
    _schema: PhantomData<fn() -> T>,
}

impl<T> ValidateSchema<T> {
    pub fn new() -> Self {
        Self { _schema: PhantomData }
    }
}

impl<T> Default for ValidateSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T, P> HotelBeforeHook<Value, P> for ValidateSchema<T>
where
    T: DeserializeOwned + Validate + Serialize + 'static,
    P: Send + 'static,
{
    async fn run(&self, ctx: &mut HookContext<Value, P>) -> Result<()> {
        let Some(data) = ctx.data.as_ref() else {
            return Ok(());
        };

        let normalized = normalize::<T>(data)?;
        ctx.data = Some(normalized);
        Ok(())
    }
}
