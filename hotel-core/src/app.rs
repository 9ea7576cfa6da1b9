use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::{anyhow, Result};
use futures::FutureExt;

use crate::hooks::collect_method_hooks;
use crate::{
    HookContext, HookResult, HotelAfterHook, HotelAroundHook, HotelBeforeHook, HotelConfig,
    HotelConfigSnapshot, HotelErrorHook, HotelService, HotelServiceRegistry, Next, ServiceCapabilities,
    ServiceHooks, ServiceMethodKind,
};

struct HotelAppInner<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    registry: RwLock<HotelServiceRegistry<R, P>>,
    global_hooks: RwLock<ServiceHooks<R, P>>,
    service_hooks: RwLock<HashMap<String, ServiceHooks<R, P>>>,
    config: RwLock<HotelConfig>,
}

/// HotelApp is the central application container.
///
/// Framework-agnostic. Holds:
/// - service registry
/// - app-wide hooks
/// - per-service hooks
/// - config
///
/// Cloning is cheap; clones share the same state.
pub struct HotelApp<R, P = ()>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    inner: Arc<HotelAppInner<R, P>>,
}

type HooksForMethod<R, P> = (
    Vec<Arc<dyn HotelAroundHook<R, P>>>,
    Vec<Arc<dyn HotelBeforeHook<R, P>>>,
    Vec<Arc<dyn HotelAfterHook<R, P>>>,
    Vec<Arc<dyn HotelErrorHook<R, P>>>,
);

impl<R, P> Default for HotelApp<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R, P> Clone for HotelApp<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, P> HotelApp<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    pub fn new() -> Self {
        Self {
            inner: Arc::new(HotelAppInner {
                registry: RwLock::new(HotelServiceRegistry::new()),
                global_hooks: RwLock::new(ServiceHooks::new()),
                service_hooks: RwLock::new(HashMap::new()),
                config: RwLock::new(HotelConfig::new()),
            }),
        }
    }

    pub fn register_service<S>(&self, name: S, service: Arc<dyn HotelService<R, P>>)
    where
        S: Into<String>,
    {
        self.inner
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(name, service);
    }

    /// App-wide hooks; they run before any service-level hooks.
    pub fn hooks<F>(&self, f: F)
    where
        F: FnOnce(&mut ServiceHooks<R, P>),
    {
        let mut g = self
            .inner
            .global_hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut g);
    }

    fn configure_service_hooks<F>(&self, service_name: &str, f: F)
    where
        F: FnOnce(&mut ServiceHooks<R, P>),
    {
        let mut map = self
            .inner
            .service_hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let hooks = map.entry(service_name.to_string()).or_default();
        f(hooks);
    }

    pub fn service(&self, name: &str) -> Result<ServiceHandle<R, P>> {
        let svc = self
            .inner
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .ok_or_else(|| anyhow!("HotelService not found: {name}"))?
            .clone();

        Ok(ServiceHandle {
            app: self.clone(),
            name: name.to_string(),
            service: svc,
        })
    }

    pub fn service_names(&self) -> Vec<String> {
        let registry = self
            .inner
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = registry.names().map(str::to_string).collect();
        names.sort();
        names
    }

    pub fn set<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.inner
            .config
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set(key, value);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let cfg = self.inner.config.read().unwrap_or_else(PoisonError::into_inner);
        cfg.get(key).map(|v| v.to_string())
    }

    pub fn config_snapshot(&self) -> HotelConfigSnapshot {
        let cfg = self.inner.config.read().unwrap_or_else(PoisonError::into_inner);
        cfg.snapshot()
    }
}

/// A named service plus the app it lives in. Calls made through the
/// handle run the full hook pipeline.
pub struct ServiceHandle<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    app: HotelApp<R, P>,
    name: String,
    service: Arc<dyn HotelService<R, P>>,
}

impl<R, P> ServiceHandle<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    pub fn hooks<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut ServiceHooks<R, P>),
    {
        self.app.configure_service_hooks(&self.name, f);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &'static str {
        self.service.label()
    }

    pub fn capabilities(&self) -> ServiceCapabilities {
        self.service.capabilities()
    }
}

// ──────────────────────────────────────────────────────────────
// Pipeline
// ──────────────────────────────────────────────────────────────

impl<R, P> ServiceHandle<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    /// Global hooks first, then service hooks.
    fn collect_hooks_for_method(&self, method: &ServiceMethodKind) -> HooksForMethod<R, P> {
        let g = self
            .app
            .inner
            .global_hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let map = self
            .app
            .inner
            .service_hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let mut around = collect_method_hooks(&g.around_all, &g.around_by_method, method);
        let mut before = collect_method_hooks(&g.before_all, &g.before_by_method, method);
        let mut after = collect_method_hooks(&g.after_all, &g.after_by_method, method);
        let mut error = collect_method_hooks(&g.error_all, &g.error_by_method, method);

        if let Some(h) = map.get(&self.name) {
            around.extend(collect_method_hooks(&h.around_all, &h.around_by_method, method));
            before.extend(collect_method_hooks(&h.before_all, &h.before_by_method, method));
            after.extend(collect_method_hooks(&h.after_all, &h.after_by_method, method));
            error.extend(collect_method_hooks(&h.error_all, &h.error_by_method, method));
        }

        (around, before, after, error)
    }

    /// around → before → service call → after (innermost first), then
    /// error hooks if anything failed.
    async fn run_pipeline(&self, mut ctx: HookContext<R, P>) -> Result<HookContext<R, P>> {
        let (around, before, after, error) = self.collect_hooks_for_method(&ctx.method);

        let svc = Arc::clone(&self.service);

        let mut next: Next<R, P> = Next::new(move |ctx| {
            async move {
                for h in &before {
                    h.run(ctx).await?;
                }

                call_service(svc.as_ref(), ctx).await?;

                for h in after.iter().rev() {
                    h.run(ctx).await?;
                }

                Ok(())
            }
            .boxed()
        });

        // first registered around hook is outermost
        for h in around.iter().rev() {
            let hook = Arc::clone(h);
            let prev = next;
            next = Next::new(move |ctx| async move { hook.run(ctx, prev).await }.boxed());
        }

        if let Err(e) = next.run(&mut ctx).await {
            ctx.error = Some(e);

            for h in &error {
                if let Err(hook_err) = h.run(&mut ctx).await {
                    ctx.error = Some(hook_err);
                }
            }

            if let Some(err) = ctx.error.take() {
                return Err(err);
            }
        }

        Ok(ctx)
    }

    fn context(&self, method: ServiceMethodKind, params: P) -> HookContext<R, P> {
        HookContext::new(self.name.clone(), method, params, self.app.config_snapshot())
    }

    pub async fn find(&self, params: P) -> Result<Vec<R>> {
        let ctx = self.context(ServiceMethodKind::Find, params);
        let ctx = self.run_pipeline(ctx).await?;

        match ctx.result {
            Some(HookResult::Many(v)) => Ok(v),
            Some(HookResult::One(_)) => Err(anyhow!("find() produced HookResult::One unexpectedly")),
            None => Ok(vec![]),
        }
    }

    pub async fn get(&self, id: &str, params: P) -> Result<Option<R>> {
        let mut ctx = self.context(ServiceMethodKind::Get, params);
        ctx.id = Some(id.to_string());
        let ctx = self.run_pipeline(ctx).await?;

        match ctx.result {
            Some(HookResult::One(v)) => Ok(Some(v)),
            Some(HookResult::Many(_)) => Err(anyhow!("get() produced HookResult::Many unexpectedly")),
            None => Ok(None),
        }
    }

    pub async fn create(&self, data: R, params: P) -> Result<R> {
        let mut ctx = self.context(ServiceMethodKind::Create, params);
        ctx.data = Some(data);
        let ctx = self.run_pipeline(ctx).await?;
        expect_one(ctx.result, "create")
    }

    pub async fn update(&self, id: Option<&str>, data: R, params: P) -> Result<R> {
        let mut ctx = self.context(ServiceMethodKind::Update, params);
        ctx.id = id.map(str::to_string);
        ctx.data = Some(data);
        let ctx = self.run_pipeline(ctx).await?;
        expect_one(ctx.result, "update")
    }

    pub async fn remove(&self, id: Option<&str>, params: P) -> Result<R> {
        let mut ctx = self.context(ServiceMethodKind::Remove, params);
        ctx.id = id.map(str::to_string);
        let ctx = self.run_pipeline(ctx).await?;
        expect_one(ctx.result, "remove")
    }
}

fn expect_one<R>(result: Option<HookResult<R>>, method: &str) -> Result<R> {
    match result {
        Some(HookResult::One(v)) => Ok(v),
        Some(HookResult::Many(_)) => Err(anyhow!("{method}() produced HookResult::Many unexpectedly")),
        None => Err(anyhow!("{method}() produced no result")),
    }
}

/// Dispatch `ctx.method` to the service and store what it returns in
/// `ctx.result`.
async fn call_service<R, P>(svc: &dyn HotelService<R, P>, ctx: &mut HookContext<R, P>) -> Result<()>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    let params = ctx.params.clone();

    match ctx.method {
        ServiceMethodKind::Find => {
            let records = svc.find(params).await?;
            ctx.result = Some(HookResult::Many(records));
        }
        ServiceMethodKind::Get => {
            let id = ctx.id.clone().unwrap_or_default();
            ctx.result = svc.get(&id, params).await?.map(HookResult::One);
        }
        ServiceMethodKind::Create => {
            let data = ctx
                .data
                .take()
                .ok_or_else(|| anyhow!("create() requires ctx.data"))?;
            let created = svc.create(data, params).await?;
            ctx.result = Some(HookResult::One(created));
        }
        ServiceMethodKind::Update => {
            let data = ctx
                .data
                .take()
                .ok_or_else(|| anyhow!("update() requires ctx.data"))?;
            let id = ctx.id.clone();
            let updated = svc.update(id.as_deref(), data, params).await?;
            ctx.result = Some(HookResult::One(updated));
        }
        ServiceMethodKind::Remove => {
            let id = ctx.id.clone();
            let removed = svc.remove(id.as_deref(), params).await?;
            ctx.result = Some(HookResult::One(removed));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::HotelError;

    type Trace = Arc<Mutex<Vec<String>>>;

    struct Echo {
        trace: Trace,
    }

    #[async_trait]
    impl HotelService<String, ()> for Echo {
        async fn find(&self, _params: ()) -> Result<Vec<String>> {
            self.trace.lock().unwrap().push("service".into());
            Ok(vec!["a".into(), "b".into()])
        }

        async fn get(&self, id: &str, _params: ()) -> Result<Option<String>> {
            Ok((id == "a").then(|| id.to_string()))
        }

        async fn create(&self, data: String, _params: ()) -> Result<String> {
            self.trace.lock().unwrap().push(format!("create {data}"));
            Ok(data)
        }

        async fn remove(&self, id: Option<&str>, _params: ()) -> Result<String> {
            match id {
                Some(id) => Err(anyhow!("no such record: {id}")),
                None => Err(HotelError::bad_request("ID is required for deletion").into_anyhow()),
            }
        }
    }

    struct Mark(&'static str, Trace);

    #[async_trait]
    impl HotelBeforeHook<String, ()> for Mark {
        async fn run(&self, _ctx: &mut HookContext<String, ()>) -> Result<()> {
            self.1.lock().unwrap().push(format!("before {}", self.0));
            Ok(())
        }
    }

    #[async_trait]
    impl HotelAfterHook<String, ()> for Mark {
        async fn run(&self, _ctx: &mut HookContext<String, ()>) -> Result<()> {
            self.1.lock().unwrap().push(format!("after {}", self.0));
            Ok(())
        }
    }

    #[async_trait]
    impl HotelAroundHook<String, ()> for Mark {
        async fn run(&self, ctx: &mut HookContext<String, ()>, next: Next<String, ()>) -> Result<()> {
            self.1.lock().unwrap().push(format!("enter {}", self.0));
            next.run(ctx).await?;
            self.1.lock().unwrap().push(format!("leave {}", self.0));
            Ok(())
        }
    }

    struct RejectEmpty;

    #[async_trait]
    impl HotelBeforeHook<String, ()> for RejectEmpty {
        async fn run(&self, ctx: &mut HookContext<String, ()>) -> Result<()> {
            match ctx.data.as_deref() {
                Some("") => Err(HotelError::bad_request("value is required").into_anyhow()),
                _ => Ok(()),
            }
        }
    }

    struct Recover;

    #[async_trait]
    impl HotelErrorHook<String, ()> for Recover {
        async fn run(&self, ctx: &mut HookContext<String, ()>) -> Result<()> {
            if ctx.error.take().is_some() {
                ctx.result = Some(HookResult::One("recovered".into()));
            }
            Ok(())
        }
    }

    fn app_with_echo() -> (HotelApp<String, ()>, Trace) {
        let trace: Trace = Arc::new(Mutex::new(Vec::new()));
        let app: HotelApp<String, ()> = HotelApp::new();
        app.register_service("echo", Arc::new(Echo { trace: Arc::clone(&trace) }));
        (app, trace)
    }

    #[tokio::test]
    async fn hooks_run_in_pipeline_order() {
        let (app, trace) = app_with_echo();

        app.hooks(|h| {
            h.around_all(Arc::new(Mark("global", Arc::clone(&trace))));
            h.before_all(Arc::new(Mark("global", Arc::clone(&trace))));
            h.after_all(Arc::new(Mark("global", Arc::clone(&trace))));
        });
        let svc = app.service("echo").unwrap().hooks(|h| {
            h.before(ServiceMethodKind::Find, Arc::new(Mark("echo", Arc::clone(&trace))));
            h.after_find(Arc::new(Mark("echo", Arc::clone(&trace))));
        });

        let out = svc.find(()).await.unwrap();
        assert_eq!(out, vec!["a".to_string(), "b".to_string()]);

        assert_eq!(
            *trace.lock().unwrap(),
            vec![
                "enter global",
                "before global",
                "before echo",
                "service",
                "after echo",
                "after global",
                "leave global",
            ]
        );
    }

    #[tokio::test]
    async fn before_hook_error_skips_the_service() {
        let (app, trace) = app_with_echo();
        let svc = app.service("echo").unwrap().hooks(|h| {
            h.before_create(Arc::new(RejectEmpty));
        });

        let err = svc.create(String::new(), ()).await.unwrap_err();
        assert_eq!(HotelError::from_anyhow(&err).unwrap().code(), 400);
        assert!(trace.lock().unwrap().is_empty());

        let created = svc.create("kept".into(), ()).await.unwrap();
        assert_eq!(created, "kept");
    }

    #[tokio::test]
    async fn get_of_unknown_id_is_none() {
        let (app, _) = app_with_echo();
        let svc = app.service("echo").unwrap();

        assert_eq!(svc.get("a", ()).await.unwrap(), Some("a".to_string()));
        assert_eq!(svc.get("zzz", ()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn error_hooks_can_recover() {
        let (app, _) = app_with_echo();
        let svc = app.service("echo").unwrap();

        let err = svc.remove(None, ()).await.unwrap_err();
        assert_eq!(HotelError::from_anyhow(&err).unwrap().detail, "ID is required for deletion");

        let svc = svc.hooks(|h| {
            h.error(ServiceMethodKind::Remove, Arc::new(Recover));
        });
        assert_eq!(svc.remove(Some("x"), ()).await.unwrap(), "recovered");
    }

    #[tokio::test]
    async fn unknown_service_is_an_error() {
        let (app, _) = app_with_echo();
        assert!(app.service("nope").is_err());
        assert_eq!(app.service_names(), vec!["echo".to_string()]);
    }
}
