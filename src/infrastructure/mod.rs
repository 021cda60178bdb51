//! Infrastructure Layer
//!
//! - HTTP: RESTful API + 静态音频服务
//! - Adapters: 目录 / 引擎 / 存储端口实现

pub mod adapters;
pub mod http;
