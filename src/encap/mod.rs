//! 封装模块
//!
//! 把配置变成 7 条逐层记录：`build_encapsulation` 是核心入口之一。

mod pipeline;
mod record;

pub use pipeline::build_encapsulation;
pub use record::{Encapsulation, LayerEncapsulation, PayloadView};
