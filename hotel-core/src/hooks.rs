use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::{HotelConfigSnapshot, ServiceMethodKind};

pub(crate) type HookFut<'a> = BoxFuture<'a, Result<()>>;

/// What a service call produced.
#[derive(Debug, Clone)]
pub enum HookResult<R> {
    One(R),
    Many(Vec<R>),
}

/// Context passed to hooks.
///
/// R = record type
/// P = params type (query, headers, ...)
#[derive(Debug)]
pub struct HookContext<R, P> {
    pub service_name: String,
    pub method: ServiceMethodKind,
    pub params: P,
    pub id: Option<String>,
    pub data: Option<R>,
    pub result: Option<HookResult<R>>,
    pub error: Option<anyhow::Error>,
    pub config: HotelConfigSnapshot,
}

impl<R, P> HookContext<R, P> {
    pub fn new(
        service_name: impl Into<String>,
        method: ServiceMethodKind,
        params: P,
        config: HotelConfigSnapshot,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            method,
            params,
            id: None,
            data: None,
            result: None,
            error: None,
            config,
        }
    }
}

#[async_trait]
pub trait HotelBeforeHook<R, P>: Send + Sync {
    async fn run(&self, ctx: &mut HookContext<R, P>) -> Result<()>;
}

#[async_trait]
pub trait HotelAfterHook<R, P>: Send + Sync {
    async fn run(&self, ctx: &mut HookContext<R, P>) -> Result<()>;
}

/// Error hooks see `ctx.error`; clearing it (and setting `ctx.result`)
/// recovers the call.
#[async_trait]
pub trait HotelErrorHook<R, P>: Send + Sync {
    async fn run(&self, ctx: &mut HookContext<R, P>) -> Result<()>;
}

/// Around hooks wrap everything inside them and must call `next.run(ctx)`
/// for the service to be reached.
#[async_trait]
pub trait HotelAroundHook<R, P>: Send + Sync {
    async fn run(&self, ctx: &mut HookContext<R, P>, next: Next<R, P>) -> Result<()>;
}

/// The rest of the pipeline, as seen from an around hook.
pub struct Next<R, P> {
    call: Box<dyn for<'a> FnOnce(&'a mut HookContext<R, P>) -> HookFut<'a> + Send>,
}

impl<R, P> Next<R, P> {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: for<'a> FnOnce(&'a mut HookContext<R, P>) -> HookFut<'a> + Send + 'static,
    {
        Self { call: Box::new(f) }
    }

    pub async fn run(self, ctx: &mut HookContext<R, P>) -> Result<()> {
        (self.call)(ctx).await
    }
}

type HookMap<H> = HashMap<ServiceMethodKind, Vec<Arc<H>>>;

/// Hooks registered either app-wide or for one service.
pub struct ServiceHooks<R, P> {
    pub(crate) around_all: Vec<Arc<dyn HotelAroundHook<R, P>>>,
    pub(crate) before_all: Vec<Arc<dyn HotelBeforeHook<R, P>>>,
    pub(crate) after_all: Vec<Arc<dyn HotelAfterHook<R, P>>>,
    pub(crate) error_all: Vec<Arc<dyn HotelErrorHook<R, P>>>,

    pub(crate) around_by_method: HookMap<dyn HotelAroundHook<R, P>>,
    pub(crate) before_by_method: HookMap<dyn HotelBeforeHook<R, P>>,
    pub(crate) after_by_method: HookMap<dyn HotelAfterHook<R, P>>,
    pub(crate) error_by_method: HookMap<dyn HotelErrorHook<R, P>>,
}

impl<R, P> Default for ServiceHooks<R, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, P> ServiceHooks<R, P> {
    pub fn new() -> Self {
        Self {
            around_all: Vec::new(),
            before_all: Vec::new(),
            after_all: Vec::new(),
            error_all: Vec::new(),
            around_by_method: HashMap::new(),
            before_by_method: HashMap::new(),
            after_by_method: HashMap::new(),
            error_by_method: HashMap::new(),
        }
    }

    pub fn around_all(&mut self, hook: Arc<dyn HotelAroundHook<R, P>>) -> &mut Self {
        self.around_all.push(hook);
        self
    }

    pub fn before_all(&mut self, hook: Arc<dyn HotelBeforeHook<R, P>>) -> &mut Self {
        self.before_all.push(hook);
        self
    }

    pub fn after_all(&mut self, hook: Arc<dyn HotelAfterHook<R, P>>) -> &mut Self {
        self.after_all.push(hook);
        self
    }

    pub fn error_all(&mut self, hook: Arc<dyn HotelErrorHook<R, P>>) -> &mut Self {
        self.error_all.push(hook);
        self
    }

    pub fn around(&mut self, method: ServiceMethodKind, hook: Arc<dyn HotelAroundHook<R, P>>) -> &mut Self {
        self.around_by_method.entry(method).or_default().push(hook);
        self
    }

    pub fn before(&mut self, method: ServiceMethodKind, hook: Arc<dyn HotelBeforeHook<R, P>>) -> &mut Self {
        self.before_by_method.entry(method).or_default().push(hook);
        self
    }

    pub fn after(&mut self, method: ServiceMethodKind, hook: Arc<dyn HotelAfterHook<R, P>>) -> &mut Self {
        self.after_by_method.entry(method).or_default().push(hook);
        self
    }

    pub fn error(&mut self, method: ServiceMethodKind, hook: Arc<dyn HotelErrorHook<R, P>>) -> &mut Self {
        self.error_by_method.entry(method).or_default().push(hook);
        self
    }

    pub fn before_create(&mut self, hook: Arc<dyn HotelBeforeHook<R, P>>) -> &mut Self {
        self.before(ServiceMethodKind::Create, hook)
    }

    pub fn before_update(&mut self, hook: Arc<dyn HotelBeforeHook<R, P>>) -> &mut Self {
        self.before(ServiceMethodKind::Update, hook)
    }

    pub fn after_find(&mut self, hook: Arc<dyn HotelAfterHook<R, P>>) -> &mut Self {
        self.after(ServiceMethodKind::Find, hook)
    }
}

/// `*_all` hooks first, then the ones registered for `method`.
pub(crate) fn collect_method_hooks<H: ?Sized>(
    all: &[Arc<H>],
    by_method: &HashMap<ServiceMethodKind, Vec<Arc<H>>>,
    method: &ServiceMethodKind,
) -> Vec<Arc<H>> {
    let mut out: Vec<Arc<H>> = all.to_vec();
    if let Some(hooks) = by_method.get(method) {
        out.extend(hooks.iter().cloned());
    }
    out
}
