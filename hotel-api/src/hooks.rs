use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use async_trait::async_trait;
use hotel_core::{HookContext, HotelAroundHook, HotelError, Next};
use serde_json::Value;

use crate::services::HotelParams;

/// Logs every service call and how it ended.
pub struct LogAround;

#[async_trait]
impl HotelAroundHook<Value, HotelParams> for LogAround {
    async fn run(&self, ctx: &mut HookContext<Value, HotelParams>, next: Next<Value, HotelParams>) -> Result<()> {
        let method = ctx.params.method.clone();
        let path = ctx.params.path.clone();
        let service = ctx.service_name.clone();
        let op = ctx.method.as_str();
        let started = Instant::now();

        tracing::info!(%method, %path, %service, op, "->");

        let res = next.run(ctx).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &res {
            Ok(()) => tracing::info!(%service, op, elapsed_ms, "<- ok"),
            Err(err) => match HotelError::from_anyhow(err) {
                Some(hotel) if hotel.code() < 500 => {
                    tracing::warn!(%service, op, elapsed_ms, error = %hotel.detail, "<- rejected")
                }
                _ => tracing::error!(%service, op, elapsed_ms, error = %err, "<- failed"),
            },
        }

        res
    }
}

pub fn global_hooks(app: &hotel_core::HotelApp<Value, HotelParams>) {
    app.hooks(|h| {
        h.around_all(Arc::new(LogAround));
    });
}
