//! Render Adapter - 渲染服务客户端实现

mod fake_render_client;

pub use fake_render_client::{FakeRenderClient, FakeRenderClientConfig};
