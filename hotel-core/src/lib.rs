//! hotel-core: framework-agnostic core for the hotel back office.

pub mod app;
pub mod config;
pub mod errors;
pub mod hooks;
pub mod registry;
pub mod service;

pub use app::{HotelApp, ServiceHandle};
pub use config::{HotelConfig, HotelConfigSnapshot};
pub use errors::{ErrorKind, HotelError, HotelResult};
pub use hooks::{
    HookContext, HookResult, HotelAfterHook, HotelAroundHook, HotelBeforeHook, HotelErrorHook,
    Next, ServiceHooks,
};
pub use registry::HotelServiceRegistry;
pub use service::{HotelService, ServiceCapabilities, ServiceMethodKind};
